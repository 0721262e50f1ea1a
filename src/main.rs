use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context as _, Result, bail};
use tracing_subscriber::EnvFilter;

use airbnb_price_suggester::adapters::csv_report::CsvReportWriter;
use airbnb_price_suggester::adapters::exchange::open_exchange_rates::OpenExchangeRatesClient;
use airbnb_price_suggester::adapters::ical::client::IcalFeedClient;
use airbnb_price_suggester::config::{APP_ID_ENV, load_config};
use airbnb_price_suggester::domain::pricing::PricingModel;
use airbnb_price_suggester::suggester::{PriceSuggester, write_report};

fn find_config_path() -> PathBuf {
    // Working directory first, then next to the binary
    let candidates = [
        PathBuf::from("config.yaml"),
        binary_dir().join("config.yaml"),
    ];

    for path in &candidates {
        if path.exists() {
            return path.clone();
        }
    }

    candidates[0].clone()
}

fn binary_dir() -> PathBuf {
    std::env::current_exe()
        .ok()
        .and_then(|p| p.parent().map(Path::to_path_buf))
        .unwrap_or_else(|| PathBuf::from("."))
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();

    let config_path = find_config_path();
    let config = load_config(&config_path)?.with_app_id_override(std::env::var(APP_ID_ENV).ok());
    config.validate()?;

    let month = config.target_month(chrono::Local::now().date_naive())?;
    tracing::info!(month = %month, listings = config.listings.len(), "Starting price suggestion run");

    let feed = IcalFeedClient::new(&config.http).context("failed to build calendar HTTP client")?;
    let rates = OpenExchangeRatesClient::new(&config.exchange, config.app_id()?, &config.http)
        .context("failed to build exchange-rate HTTP client")?;

    let suggester = PriceSuggester::new(
        Arc::new(feed),
        Arc::new(rates),
        PricingModel::new(config.pricing.base_rate_usd),
        config.failure_policy,
        config.exchange.symbol.clone(),
    );

    let report = suggester.run(&config.listings, month).await?;
    tracing::info!("\n{report}");

    let writer = CsvReportWriter::new(&config.output.directory);
    if let Some(path) = write_report(&writer, &report)? {
        println!("Output written to {}", path.display());
    }

    if !report.is_complete() {
        let failures = report.failures();
        for (listing, reason) in &failures {
            tracing::error!(%listing, %reason, "Listing not priced");
        }
        bail!(
            "{} of {} listings could not be priced",
            failures.len(),
            report.outcomes.len()
        );
    }

    Ok(())
}
