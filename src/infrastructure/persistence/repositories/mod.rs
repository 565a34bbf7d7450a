pub mod experiment_run_repository;

pub use experiment_run_repository::SqliteExperimentTracker;
