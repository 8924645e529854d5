use crate::fetchers::{FetchError, Fetcher};
use fantoccini::error::CmdError;
use fantoccini::{Client, ClientBuilder};
use std::time::Duration;
use tokio::time::timeout;
use url::Url;

/// Navigation errors reported by browsers when the host cannot be reached
const UNREACHABLE_MARKERS: [&str; 4] = [
    "ERR_NAME_NOT_RESOLVED",
    "ERR_CONNECTION_REFUSED",
    "ERR_ADDRESS_UNREACHABLE",
    "dnsNotFound",
];

/// Fetches the rendered page source through a WebDriver server
pub struct WebDriverFetcher {
    webdriver_url: String,
    timeout: Duration,
}

impl WebDriverFetcher {
    pub fn new(webdriver_url: &str, timeout: Duration) -> Self {
        Self {
            webdriver_url: webdriver_url.to_string(),
            timeout,
        }
    }

    async fn connect(&self) -> Result<Client, FetchError> {
        match ClientBuilder::native().connect(&self.webdriver_url).await {
            Ok(client) => {
                ::log::debug!("Connected to WebDriver at {}", self.webdriver_url);
                Ok(client)
            }
            Err(e) => {
                ::log::error!(
                    "Failed to connect to WebDriver at {}: {}",
                    self.webdriver_url,
                    e
                );
                ::log::error!(
                    "Make sure a WebDriver server is running or set the WEBDRIVER_URL environment variable"
                );
                Err(FetchError::WebDriver(e.to_string()))
            }
        }
    }

    async fn page_source(client: &Client, url: &Url) -> Result<String, FetchError> {
        client
            .goto(url.as_str())
            .await
            .map_err(|e| navigation_error(e, "accessing", url))?;
        client
            .source()
            .await
            .map_err(|e| navigation_error(e, "getting source for", url))
    }
}

impl Fetcher for WebDriverFetcher {
    async fn fetch(&self, url: &Url) -> Result<String, FetchError> {
        let client = self.connect().await?;

        let result = match timeout(self.timeout, Self::page_source(&client, url)).await {
            Ok(result) => result,
            Err(_) => {
                ::log::error!("Timeout scraping: {}", url);
                Err(FetchError::Timeout(self.timeout.as_secs()))
            }
        };

        if let Err(e) = client.close().await {
            ::log::warn!("Failed to close WebDriver session: {}", e);
        }

        result
    }
}

/// Maps a WebDriver command failure onto a fetch error
fn navigation_error(error: CmdError, context: &str, url: &Url) -> FetchError {
    let message = error.to_string();
    ::log::error!("Failed {} {}: {}", context, url, message);

    if UNREACHABLE_MARKERS.iter().any(|m| message.contains(m)) {
        FetchError::Unreachable(message)
    } else {
        FetchError::WebDriver(message)
    }
}
