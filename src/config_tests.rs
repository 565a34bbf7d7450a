use crate::config::{Config, DEFAULT_MODEL_FILE_ID};
use std::env;
use std::sync::Mutex;
use std::sync::OnceLock;

// Global lock to prevent race conditions when modifying environment variables in tests
static ENV_LOCK: OnceLock<Mutex<()>> = OnceLock::new();

fn get_env_lock() -> &'static Mutex<()> {
    ENV_LOCK.get_or_init(|| Mutex::new(()))
}

const VARS: [&str; 10] = [
    "SERVER_BIND_ADDRESS",
    "SERVER_PORT",
    "MODEL_FILENAME",
    "MODEL_FILE_ID",
    "MODEL_URL",
    "MODEL_DOWNLOAD_TIMEOUT_SECS",
    "PREDICTION_API_URL",
    "PREDICTION_TIMEOUT_SECS",
    "OBSERVABILITY_ENABLED",
    "OBSERVABILITY_INTERVAL",
];

fn clear_env() {
    for var in VARS {
        unsafe { env::remove_var(var) };
    }
}

#[test]
fn test_config_defaults() {
    let _guard = get_env_lock().lock().unwrap_or_else(|e| e.into_inner());
    clear_env();

    let config = Config::from_env().expect("Should parse with defaults");

    assert_eq!(config.server.bind_address, "0.0.0.0");
    assert_eq!(config.server.port, 8000);
    assert_eq!(
        config.model.filename.to_str(),
        Some("random_forest_model.json")
    );
    assert_eq!(config.model.file_id, DEFAULT_MODEL_FILE_ID);
    assert!(config.model.url.is_none());
    assert_eq!(config.model.download_timeout_secs, 120);
    assert_eq!(config.client.api_url, "http://127.0.0.1:8000");
    assert_eq!(config.client.timeout_secs, 10);
    assert!(config.observability.enabled);
    assert_eq!(config.observability.interval_secs, 60);
}

#[test]
fn test_config_overrides() {
    let _guard = get_env_lock().lock().unwrap_or_else(|e| e.into_inner());
    clear_env();
    unsafe {
        env::set_var("SERVER_PORT", "9100");
        env::set_var("MODEL_FILENAME", "models/linear_regression_model.json");
        env::set_var("MODEL_URL", "http://storage.local/model.json");
        env::set_var("PREDICTION_API_URL", "http://prediction:8000/");
        env::set_var("OBSERVABILITY_ENABLED", "false");
    }

    let config = Config::from_env().unwrap();

    assert_eq!(config.server.port, 9100);
    assert_eq!(
        config.model.filename.to_str(),
        Some("models/linear_regression_model.json")
    );
    assert_eq!(
        config.model.source_location(),
        "http://storage.local/model.json"
    );
    assert_eq!(config.client.api_url, "http://prediction:8000/");
    assert!(!config.observability.enabled);

    clear_env();
}

#[test]
fn test_config_rejects_invalid_port() {
    let _guard = get_env_lock().lock().unwrap_or_else(|e| e.into_inner());
    clear_env();
    unsafe { env::set_var("SERVER_PORT", "not-a-port") };

    let result = Config::from_env();
    assert!(result.is_err());

    clear_env();
}

#[test]
fn test_blank_model_url_falls_back_to_drive() {
    let _guard = get_env_lock().lock().unwrap_or_else(|e| e.into_inner());
    clear_env();
    unsafe { env::set_var("MODEL_URL", "  ") };

    let config = Config::from_env().unwrap();
    assert!(config.model.uses_google_drive());

    clear_env();
}
