use clap::Parser;
use page_digest::Scrape;
use std::process::ExitCode;

mod args;
use args::Args;

#[tokio::main]
async fn main() -> ExitCode {
    // Initialize logging
    env_logger::init();

    let args = Args::parse();

    let mut scrape = Scrape::new(&args.url);
    if let Some(path) = &args.config {
        scrape = match scrape.with_config_file(path) {
            Ok(scrape) => scrape,
            Err(e) => {
                ::log::error!("Failed to load config {}: {}", path.display(), e);
                return ExitCode::FAILURE;
            }
        };
    }
    if let Some(backend) = args.backend {
        scrape = scrape.with_backend(backend.into());
    }
    if let Some(dir) = args.output_dir {
        scrape = scrape.with_output_dir(dir);
    }
    if let Some(timeout) = args.timeout {
        scrape = scrape.with_fetch_timeout(timeout);
    }
    if let Some(path) = args.html_file {
        scrape = scrape.with_html_file(path);
    }

    let start_time = std::time::Instant::now();
    let (outcome, path) = match scrape.run_and_save().await {
        Ok(done) => done,
        Err(e) => {
            ::log::error!("Scrape of {} failed: {}", args.url, e);
            eprintln!("❌ Scrape failed: {}", e);
            return ExitCode::FAILURE;
        }
    };

    ::log::info!(
        "Scrape complete in {:.2} seconds",
        start_time.elapsed().as_secs_f64()
    );

    println!("{}", outcome.preview);
    println!("📎 Report: {}", path.display());

    if args.json {
        match serde_json::to_string_pretty(&outcome.summary) {
            Ok(json) => println!("{}", json),
            Err(e) => ::log::error!("Failed to serialize summary: {}", e),
        }
    }

    ExitCode::SUCCESS
}
