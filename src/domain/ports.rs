use async_trait::async_trait;
use std::path::Path;

/// Retrieves a model artifact from remote storage into a local file.
#[async_trait]
pub trait ArtifactFetcher: Send + Sync {
    /// Where the artifact is fetched from, for logs and error messages
    fn source(&self) -> &str;

    /// Download the artifact to `destination`. Implementations must not
    /// leave a partial file at `destination` when they fail.
    async fn fetch(&self, destination: &Path) -> Result<(), String>;
}
