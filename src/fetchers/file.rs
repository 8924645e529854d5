use crate::fetchers::{FetchError, Fetcher};
use std::path::PathBuf;
use url::Url;

/// Serves HTML from a local file, whatever URL is asked for
pub struct FileFetcher {
    path: PathBuf,
}

impl FileFetcher {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl Fetcher for FileFetcher {
    async fn fetch(&self, url: &Url) -> Result<String, FetchError> {
        ::log::debug!("Reading {} in place of {}", self.path.display(), url);
        tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|e| FetchError::Io(self.path.display().to_string(), e))
    }
}
