pub mod core;
pub mod observability;
pub mod persistence;
pub mod remote_storage;

pub use self::core::HttpClientFactory;
pub use remote_storage::HttpArtifactFetcher;
