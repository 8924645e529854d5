// Re-export modules
pub mod config;
pub mod domain;
pub mod fetchers;
pub mod parsers;
pub mod report;
pub mod results;

// Re-export commonly used types for convenience
pub use config::{Backend, ScrapeConfig};
pub use fetchers::{FetchError, Fetcher};
pub use results::{PageSummary, Preview};

use fetchers::{FileFetcher, HttpFetcher, WebDriverFetcher};
use parsers::{ParseResult, Parser};
use std::error::Error;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Builds the summary of a page from its HTML, resolving the URL's host inline.
///
/// The lookup blocks; use [`summarize_with_resolution`] together with
/// [`domain::resolve_with_timeout`] when it has to be bounded.
pub fn summarize(url: &str, html: &str) -> PageSummary {
    summarize_with_resolution(html, domain::resolve(url))
}

/// Builds the summary of a page from its HTML and an already computed
/// `(domain, ip)` pair
pub fn summarize_with_resolution(html: &str, (domain, ip): (String, String)) -> PageSummary {
    let ParseResult { extracted, colors } = Parser::parse(html);

    PageSummary {
        title: extracted.title,
        headings1: extracted.headings1,
        headings2: extracted.headings2,
        paragraphs: extracted.paragraphs,
        links: extracted.links,
        images: extracted.images,
        stylesheets: extracted.stylesheets,
        scripts: extracted.scripts,
        colors,
        metas: extracted.metas,
        domain,
        ip,
    }
}

/// Everything produced for one URL
#[derive(Debug, Clone)]
pub struct ScrapeOutcome {
    pub summary: PageSummary,
    /// Rendered report text
    pub report: String,
    pub preview: Preview,
}

impl ScrapeOutcome {
    fn new(summary: PageSummary) -> Self {
        Self {
            report: report::serialize(&summary),
            preview: summary.preview(),
            summary,
        }
    }

    /// Write the report under a timestamped name in `dir`
    pub fn save(&self, dir: impl AsRef<Path>) -> std::io::Result<PathBuf> {
        let filename = report::report_filename(chrono::Local::now());
        report::save_report(dir, &filename, &self.report)
    }
}

/// Fetches `url` with `fetcher` and summarizes the result.
///
/// A fetch failure ends the scrape; domain resolution failures do not.
pub async fn scrape_with<F: Fetcher>(
    fetcher: &F,
    url: &str,
    resolve_timeout: Duration,
) -> Result<ScrapeOutcome, FetchError> {
    let parsed = fetchers::parse_url(url)?;
    let html = fetcher.fetch(&parsed).await?;
    ::log::info!("Fetched {} bytes from {}", html.len(), url);

    let resolution = domain::resolve_with_timeout(url, resolve_timeout).await;
    let summary = summarize_with_resolution(&html, resolution);

    Ok(ScrapeOutcome::new(summary))
}

/// Main builder for scraping a single page
pub struct Scrape {
    url: String,
    config: ScrapeConfig,
    html_file: Option<PathBuf>,
}

impl Scrape {
    /// Create a new Scrape builder for the given URL
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            config: ScrapeConfig::default().with_env_overrides(),
            html_file: None,
        }
    }

    /// Replace the whole configuration
    pub fn with_config(mut self, config: ScrapeConfig) -> Self {
        self.config = config;
        self
    }

    /// Load configuration from a file
    pub fn with_config_file(self, path: impl AsRef<Path>) -> Result<Self, Box<dyn Error>> {
        let config = ScrapeConfig::from_file(path)?.with_env_overrides();
        Ok(self.with_config(config))
    }

    /// Load configuration from a string
    pub fn with_config_str(self, config_str: &str) -> Result<Self, Box<dyn Error>> {
        let config = ScrapeConfig::from_json(config_str)?.with_env_overrides();
        Ok(self.with_config(config))
    }

    /// Set the fetch backend
    pub fn with_backend(mut self, backend: Backend) -> Self {
        self.config.backend = backend;
        self
    }

    /// Set the directory reports are saved in
    pub fn with_output_dir(mut self, dir: impl Into<String>) -> Self {
        self.config.output_dir = dir.into();
        self
    }

    /// Set the fetch timeout
    pub fn with_fetch_timeout(mut self, timeout_seconds: u64) -> Self {
        self.config.fetch_timeout_secs = timeout_seconds;
        self
    }

    /// Read the HTML from a local file instead of fetching it
    pub fn with_html_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.html_file = Some(path.into());
        self
    }

    pub fn config(&self) -> &ScrapeConfig {
        &self.config
    }

    /// Fetch and summarize the page
    pub async fn run(&self) -> Result<ScrapeOutcome, FetchError> {
        ::log::info!("Scraping {}", self.url);
        let resolve_timeout = self.config.resolve_timeout();

        if let Some(path) = &self.html_file {
            let fetcher = FileFetcher::new(path);
            return scrape_with(&fetcher, &self.url, resolve_timeout).await;
        }

        match self.config.backend {
            Backend::Http => {
                let fetcher =
                    HttpFetcher::new(&self.config.user_agent, self.config.fetch_timeout())?;
                scrape_with(&fetcher, &self.url, resolve_timeout).await
            }
            Backend::WebDriver => {
                let fetcher =
                    WebDriverFetcher::new(&self.config.webdriver_url, self.config.fetch_timeout());
                scrape_with(&fetcher, &self.url, resolve_timeout).await
            }
        }
    }

    /// Fetch, summarize and save the report into the configured directory
    pub async fn run_and_save(&self) -> Result<(ScrapeOutcome, PathBuf), Box<dyn Error>> {
        let outcome = self.run().await?;
        let path = outcome.save(&self.config.output_dir)?;
        Ok((outcome, path))
    }
}
