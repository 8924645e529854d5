use clap::{Parser, ValueEnum};
use page_digest::Backend;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "page-digest")]
#[command(about = "Scrapes one web page into a plain-text report")]
#[command(version)]
pub struct Args {
    /// URL of the page to scrape
    pub url: String,

    /// JSON configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Fetch backend (http, webdriver)
    #[arg(short, long, value_enum)]
    pub backend: Option<BackendArg>,

    /// Directory the report is written into
    #[arg(short, long)]
    pub output_dir: Option<String>,

    /// Fetch timeout in seconds
    #[arg(short, long)]
    pub timeout: Option<u64>,

    /// Read the HTML from this file instead of fetching the URL
    #[arg(long)]
    pub html_file: Option<PathBuf>,

    /// Also print the summary as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum BackendArg {
    Http,
    Webdriver,
}

impl From<BackendArg> for Backend {
    fn from(arg: BackendArg) -> Self {
        match arg {
            BackendArg::Http => Backend::Http,
            BackendArg::Webdriver => Backend::WebDriver,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_flags() {
        let args = Args::parse_from([
            "page-digest",
            "https://example.com",
            "--backend",
            "webdriver",
            "--timeout",
            "30",
            "--json",
        ]);
        assert_eq!(args.url, "https://example.com");
        assert_eq!(args.backend.map(Backend::from), Some(Backend::WebDriver));
        assert_eq!(args.timeout, Some(30));
        assert!(args.json);
        assert!(args.config.is_none());
    }
}
