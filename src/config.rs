use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::time::Duration;

/// How page HTML is retrieved
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    /// Plain HTTP GET
    #[default]
    Http,
    /// Page source from a WebDriver-controlled browser
    WebDriver,
}

/// Configuration for a scrape
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScrapeConfig {
    /// Fetch backend
    #[serde(default)]
    pub backend: Backend,

    /// URL for the WebDriver instance
    #[serde(default = "default_webdriver_url")]
    pub webdriver_url: String,

    /// Directory reports are written into
    #[serde(default = "default_output_dir")]
    pub output_dir: String,

    /// Seconds allowed for fetching the page
    #[serde(default = "default_fetch_timeout")]
    pub fetch_timeout_secs: u64,

    /// Seconds allowed for the domain lookup
    #[serde(default = "default_resolve_timeout")]
    pub resolve_timeout_secs: u64,

    /// User-Agent header sent by the HTTP backend
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl Default for ScrapeConfig {
    fn default() -> Self {
        Self {
            backend: Backend::default(),
            webdriver_url: default_webdriver_url(),
            output_dir: default_output_dir(),
            fetch_timeout_secs: default_fetch_timeout(),
            resolve_timeout_secs: default_resolve_timeout(),
            user_agent: default_user_agent(),
        }
    }
}

impl ScrapeConfig {
    /// Load configuration from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, Box<dyn Error>> {
        let mut file = File::open(path)?;
        let mut contents = String::new();
        file.read_to_string(&mut contents)?;

        Self::from_json(&contents)
    }

    /// Load configuration from a JSON string
    pub fn from_json(json: &str) -> Result<Self, Box<dyn Error>> {
        let config: Self = serde_json::from_str(json)?;
        Ok(config)
    }

    /// Override the WebDriver URL with the `WEBDRIVER_URL` environment variable if set
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(webdriver_url) = std::env::var("WEBDRIVER_URL") {
            if !webdriver_url.is_empty() {
                self.webdriver_url = webdriver_url;
            }
        }
        self
    }

    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_secs(self.fetch_timeout_secs)
    }

    pub fn resolve_timeout(&self) -> Duration {
        Duration::from_secs(self.resolve_timeout_secs)
    }
}

/// Default value for webdriver_url
fn default_webdriver_url() -> String {
    "http://localhost:4444".to_string()
}

/// Default value for output_dir
fn default_output_dir() -> String {
    "scrapes".to_string()
}

fn default_fetch_timeout() -> u64 {
    10
}

fn default_resolve_timeout() -> u64 {
    5
}

fn default_user_agent() -> String {
    "Mozilla/5.0".to_string()
}
