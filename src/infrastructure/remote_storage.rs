use crate::domain::ports::ArtifactFetcher;
use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest_middleware::ClientWithMiddleware;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use tracing::{info, warn};
use url::Url;

const GOOGLE_DRIVE_DOWNLOAD_URL: &str = "https://drive.google.com/uc";

/// Downloads a model artifact over HTTP(S).
///
/// The location is only parsed when a download is needed, so a bad
/// location does not matter while the artifact is cached.
///
/// Google Drive answers large-file requests with an HTML "virus scan"
/// page instead of the file. With `with_confirm_retry(true)` the request
/// is repeated once with `confirm=t`.
pub struct HttpArtifactFetcher {
    client: ClientWithMiddleware,
    source: String,
    confirm_retry: bool,
}

enum Download {
    Artifact(Vec<u8>),
    Interstitial,
}

impl HttpArtifactFetcher {
    pub fn new(client: ClientWithMiddleware, location: impl Into<String>) -> Self {
        Self {
            client,
            source: location.into(),
            confirm_retry: false,
        }
    }

    pub fn with_confirm_retry(mut self, enabled: bool) -> Self {
        self.confirm_retry = enabled;
        self
    }

    fn resolve_url(&self) -> Result<Url, String> {
        Url::parse(&self.source).map_err(|e| format!("invalid artifact URL '{}': {}", self.source, e))
    }

    async fn download(&self, url: &Url) -> Result<Download, String> {
        let response = self
            .client
            .get(url.as_str())
            .send()
            .await
            .map_err(|e| format!("request failed: {}", e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(format!("remote returned HTTP {}", status));
        }

        let is_html = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(|ct| ct.starts_with("text/html"))
            .unwrap_or(false);
        if is_html {
            return Ok(Download::Interstitial);
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| format!("failed to read response body: {}", e))?;
        if body.is_empty() {
            return Err("remote returned an empty body".to_string());
        }
        Ok(Download::Artifact(body.to_vec()))
    }

    fn confirm_url(url: &Url) -> Url {
        let mut url = url.clone();
        url.query_pairs_mut().append_pair("confirm", "t");
        url
    }
}

#[async_trait]
impl ArtifactFetcher for HttpArtifactFetcher {
    fn source(&self) -> &str {
        &self.source
    }

    async fn fetch(&self, destination: &Path) -> Result<(), String> {
        let url = self.resolve_url()?;
        let bytes = match self.download(&url).await? {
            Download::Artifact(bytes) => bytes,
            Download::Interstitial if !self.confirm_retry => {
                return Err("remote returned an HTML page instead of an artifact".to_string());
            }
            Download::Interstitial => {
                warn!("Remote storage returned a confirmation page. Retrying with confirm=t");
                match self.download(&Self::confirm_url(&url)).await? {
                    Download::Artifact(bytes) => bytes,
                    Download::Interstitial => {
                        return Err("remote storage keeps returning an HTML page".to_string());
                    }
                }
            }
        };

        if let Some(parent) = destination.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent)
                    .await
                    .map_err(|e| format!("failed to create {:?}: {}", parent, e))?;
            }
        }

        // Write next to the destination, then rename into place
        let part = part_path(destination);
        if let Err(e) = tokio::fs::write(&part, &bytes).await {
            let _ = tokio::fs::remove_file(&part).await;
            return Err(format!("failed to write {:?}: {}", part, e));
        }
        if let Err(e) = tokio::fs::rename(&part, destination).await {
            let _ = tokio::fs::remove_file(&part).await;
            return Err(format!("failed to move artifact into {:?}: {}", destination, e));
        }

        info!("Fetched {} bytes from {}", bytes.len(), self.source);
        Ok(())
    }
}

pub fn google_drive_url(file_id: &str) -> String {
    let query = url::form_urlencoded::Serializer::new(String::new())
        .append_pair("export", "download")
        .append_pair("id", file_id)
        .finish();
    format!("{}?{}", GOOGLE_DRIVE_DOWNLOAD_URL, query)
}

fn part_path(destination: &Path) -> PathBuf {
    let mut name = OsString::from(destination.as_os_str());
    name.push(".part");
    PathBuf::from(name)
}
