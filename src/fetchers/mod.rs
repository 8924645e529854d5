pub mod file;
pub mod http;
pub mod webdriver;

use std::future::Future;
use thiserror::Error;
use url::Url;

pub use file::FileFetcher;
pub use http::HttpFetcher;
pub use webdriver::WebDriverFetcher;

/// Why a page could not be retrieved
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("invalid URL {0}: {1}")]
    InvalidUrl(String, url::ParseError),
    #[error("host unreachable: {0}")]
    Unreachable(String),
    #[error("server answered with status {0}")]
    Status(u16),
    #[error("timed out after {0} seconds")]
    Timeout(u64),
    #[error("request failed: {0}")]
    Request(String),
    #[error("could not read response body: {0}")]
    Body(String),
    #[error("webdriver error: {0}")]
    WebDriver(String),
    #[error("could not read {0}: {1}")]
    Io(String, std::io::Error),
}

/// Source of raw page HTML.
///
/// Failures are final; callers do not retry.
pub trait Fetcher {
    /// Retrieve the HTML behind `url`
    fn fetch(&self, url: &Url) -> impl Future<Output = Result<String, FetchError>> + Send;
}

/// Parses a user supplied URL, failing with [`FetchError::InvalidUrl`]
pub fn parse_url(raw: &str) -> Result<Url, FetchError> {
    Url::parse(raw).map_err(|e| FetchError::InvalidUrl(raw.to_string(), e))
}
