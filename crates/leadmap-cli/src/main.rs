mod csv_io;
mod failure_log;
mod pipeline;

use std::path::PathBuf;

use clap::Parser;
use leadmap_places::PlacesClient;
use tracing_subscriber::EnvFilter;

use crate::csv_io::ColumnOverrides;
use crate::failure_log::FailureLog;
use crate::pipeline::{EnrichSettings, Enricher};

/// Rows processed by `--test-mode`.
const TEST_MODE_ROWS: usize = 5;

#[derive(Debug, Parser)]
#[command(name = "leadmap")]
#[command(about = "Enrich a CSV of company leads with Google Places data")]
struct Cli {
    /// Input CSV with a header row, a company column and a website column
    input: PathBuf,
    /// Only process the first N rows
    #[arg(long, conflicts_with = "test_mode")]
    limit: Option<usize>,
    /// Only process the first 5 rows
    #[arg(long)]
    test_mode: bool,
    /// Output CSV path (defaults to enhanced_<input> next to the input)
    #[arg(long, short)]
    output: Option<PathBuf>,
    /// Failure log path (overrides LEADMAP_FAILURE_LOG_PATH)
    #[arg(long)]
    failure_log: Option<PathBuf>,
    /// Header of the company name column, if not auto-detected
    #[arg(long)]
    company_column: Option<String>,
    /// Header of the website column, if not auto-detected
    #[arg(long)]
    website_column: Option<String>,
}

impl Cli {
    fn row_limit(&self) -> Option<usize> {
        if self.test_mode {
            Some(TEST_MODE_ROWS)
        } else {
            self.limit
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = leadmap_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    run(&cli, &config).await
}

/// Loads the input, enriches every lead and writes the output file.
///
/// # Errors
///
/// Returns an error if the input cannot be read or lacks a company column,
/// the places client cannot be built, or the output cannot be written.
/// Per-lead failures are logged, not propagated.
async fn run(cli: &Cli, config: &leadmap_core::AppConfig) -> anyhow::Result<()> {
    let overrides = ColumnOverrides {
        company: cli.company_column.clone(),
        website: cli.website_column.clone(),
    };
    let limit = cli.row_limit();
    if let Some(n) = limit {
        tracing::info!(limit = n, "processing only the first {n} rows");
    }

    let table = csv_io::load_leads_from_path(&cli.input, limit, &overrides)
        .map_err(|e| anyhow::anyhow!("cannot read input {}: {e}", cli.input.display()))?;

    let client = PlacesClient::with_base_url(
        &config.places_api_key,
        config.request_timeout_secs,
        &config.user_agent,
        &config.places_base_url,
    )
    .map_err(|e| anyhow::anyhow!("failed to build Places client: {e}"))?;

    let failure_log_path = cli
        .failure_log
        .clone()
        .unwrap_or_else(|| config.failure_log_path.clone());
    let mut failures = FailureLog::open_or_disabled(&failure_log_path);

    let enricher = Enricher::new(&client, EnrichSettings::from_config(config));
    let (rows, summary) = pipeline::enrich_all(&enricher, table.leads, &mut failures).await;

    let output = cli
        .output
        .clone()
        .unwrap_or_else(|| csv_io::default_output_path(&cli.input));
    csv_io::write_enriched_to_path(&output, &table.headers, &rows)?;

    tracing::info!(
        total = summary.total,
        matched = summary.matched,
        competitors = summary.competitors_found,
        no_candidates = summary.no_candidates,
        no_match = summary.no_match,
        api_errors = summary.api_errors,
        missing_company = summary.missing_company,
        logged_failures = failures.entries(),
        "enrichment finished"
    );
    println!(
        "enriched {} of {} leads; wrote {}",
        summary.matched,
        summary.total,
        output.display()
    );
    if failures.entries() > 0 {
        println!(
            "{} failures recorded in {}",
            failures.entries(),
            failure_log_path.display()
        );
    }

    Ok(())
}
