use anyhow::{Context, Result};
use clap::Parser;
use fao_landuse::{
    config::{RunConfig, EXPECTED_COUNTRIES, EXPECTED_RECORDS},
    fetch::HttpFetcher,
    pipeline::{Pipeline, PipelineOptions, RunResult},
    reference::ReferenceTable,
    store::open_backend,
};
use reqwest::Client;
use std::time::Duration;
use tracing::{error, info, warn};
use tracing_subscriber::{fmt, EnvFilter};

/// Download the FAOSTAT Land Use bulk file and load it into SQLite or PostgreSQL.
#[derive(Debug, Parser)]
#[command(name = "fao-landuse", version)]
struct Args {
    /// Dataset ZIP URL (overrides FAO_DATASET_URL)
    #[arg(long)]
    url: Option<String>,

    /// CSV entry to read from the archive
    #[arg(long)]
    entry: Option<String>,

    /// Records per upsert statement
    #[arg(long)]
    batch_size: Option<usize>,

    /// Where to write the run-summary JSON
    #[arg(long)]
    summary_path: Option<String>,

    /// tracing filter, e.g. `debug` or `info,sqlx=warn` (default: RUST_LOG or info)
    #[arg(long)]
    log_level: Option<String>,
}

fn init_logging(level: Option<&str>) {
    let env = match level {
        Some(l) => EnvFilter::new(l),
        None => EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("info,sqlx=warn")),
    };
    fmt::Subscriber::builder()
        .with_env_filter(env)
        .with_span_events(fmt::format::FmtSpan::CLOSE)
        .init();
}

fn print_troubleshooting() {
    warn!("troubleshooting:");
    warn!("  1. check your internet connection and that the dataset URL is reachable");
    warn!("  2. check DB_TYPE / DB_HOST / DB_PORT / DB_NAME / DB_USER / DB_PASSWORD");
    warn!("  3. run `check_setup` to verify the environment");
}

#[tokio::main]
async fn main() -> Result<()> {
    // ─── 1) env + args ───────────────────────────────────────────────
    dotenv::dotenv().ok();
    let args = Args::parse();
    init_logging(args.log_level.as_deref());
    info!("startup");

    // ─── 2) resolve config ───────────────────────────────────────────
    let mut cfg = RunConfig::from_env().context("invalid configuration")?;
    if let Some(url) = args.url {
        cfg.dataset_url = url;
    }
    if let Some(entry) = args.entry {
        cfg.entry_name = entry;
    }
    if let Some(n) = args.batch_size {
        cfg.batch_size = n;
    }
    if let Some(path) = args.summary_path {
        cfg.summary_path = path;
    }
    info!(
        dataset = %cfg.dataset_url,
        database = %cfg.db.describe(),
        batch_size = cfg.batch_size,
        "expecting ~{} records across {} countries",
        EXPECTED_RECORDS,
        EXPECTED_COUNTRIES
    );

    // ─── 3) wire up collaborators ────────────────────────────────────
    let client = Client::builder()
        .connect_timeout(Duration::from_secs(30))
        .build()
        .context("building HTTP client")?;
    let backend = open_backend(&cfg.db);
    let mut pipeline = Pipeline::new(
        HttpFetcher::new(client),
        backend,
        ReferenceTable::fao(),
        PipelineOptions::from(&cfg),
    );

    // ─── 4) run ──────────────────────────────────────────────────────
    let result = pipeline.run().await;
    match &result {
        RunResult::Success {
            message, stats, ..
        } => {
            info!(
                batches = stats.batches,
                rows_affected = stats.rows_affected,
                summary = %cfg.summary_path,
                "{}",
                message
            );
        }
        RunResult::Failure { stage, error } => {
            error!(%stage, "{}", error);
            print_troubleshooting();
        }
    }

    std::process::exit(result.exit_code());
}
