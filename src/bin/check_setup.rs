// src/bin/check_setup.rs

use anyhow::Result;
use fao_landuse::{
    config::{BackendKind, DbConfig, RunConfig},
    fetch::{megabytes, zips::probe_zip},
    store::open_backend,
};
use reqwest::Client;
use std::fs;
use std::path::Path;
use std::time::Duration;
use tokio::time::timeout;
use tracing::{error, info, warn};
use tracing_subscriber::{fmt, EnvFilter};

const PROBE_TIMEOUT: Duration = Duration::from_secs(10);
const WRITE_PROBE_FILE: &str = ".fao_landuse_write_probe";

fn report_config(cfg: &RunConfig) {
    let env_or = |key: &str, fallback: &str| match std::env::var(key) {
        Ok(v) if !v.trim().is_empty() => v,
        _ => format!("not set (defaulting to {fallback})"),
    };
    info!("  DB_TYPE: {}", env_or("DB_TYPE", cfg.db.kind.as_str()));
    info!("  DB_NAME: {}", env_or("DB_NAME", &cfg.db.database));
    if cfg.db.kind == BackendKind::Postgres {
        info!("  DB_HOST: {}", env_or("DB_HOST", &cfg.db.host));
        info!("  DB_PORT: {}", env_or("DB_PORT", &cfg.db.port.to_string()));
        info!("  DB_USER: {}", env_or("DB_USER", &cfg.db.user));
        if cfg.db.password.is_empty() {
            warn!("  DB_PASSWORD: not set; required by most PostgreSQL servers");
        } else {
            info!("  DB_PASSWORD: ***set***");
        }
    }
    info!("  dataset: {}", cfg.dataset_url);
}

/// Reachability is advisory only; the run itself will fail loudly if it matters.
async fn check_network(url: &str) {
    let client = match Client::builder().timeout(PROBE_TIMEOUT).build() {
        Ok(c) => c,
        Err(e) => {
            warn!("could not build HTTP client: {}", e);
            return;
        }
    };
    match timeout(PROBE_TIMEOUT, probe_zip(&client, url)).await {
        Ok(Ok(Some(len))) => info!("dataset accessible ({:.2}MB)", megabytes(len)),
        Ok(Ok(None)) => info!("dataset accessible (size unknown)"),
        Ok(Err(e)) => {
            warn!("network issue: {}", e);
            warn!("  this might be temporary or a firewall issue");
        }
        Err(_) => warn!("no response within {:?}", PROBE_TIMEOUT),
    }
}

async fn check_database(db: &DbConfig) -> bool {
    let backend = open_backend(db);
    let ok = match backend.ping().await {
        Ok(()) => {
            info!("{} connection successful", db.describe());
            true
        }
        Err(e) => {
            error!("{} connection failed: {}", db.describe(), e);
            if db.kind == BackendKind::Postgres {
                error!("  check credentials and that PostgreSQL is running");
            }
            false
        }
    };
    backend.close().await;
    ok
}

fn check_write_permission(dir: &Path) -> bool {
    let probe = dir.join(WRITE_PROBE_FILE);
    match fs::write(&probe, b"ok").and_then(|_| fs::remove_file(&probe)) {
        Ok(()) => {
            info!("write permissions: available");
            warn!("ensure at least 100MB free disk space for data processing");
            true
        }
        Err(e) => {
            error!("cannot write to {}: {}", dir.display(), e);
            false
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info,sqlx=warn"));
    fmt::Subscriber::builder().with_env_filter(env).init();

    info!("checking FAO land use integration setup");
    let mut all_ok = true;

    // ─── 1) configuration ────────────────────────────────────────────
    info!("1) configuration");
    let cfg = match RunConfig::from_env() {
        Ok(cfg) => cfg,
        Err(e) => {
            error!("invalid configuration: {}", e);
            std::process::exit(1);
        }
    };
    report_config(&cfg);

    // ─── 2) network ──────────────────────────────────────────────────
    info!("2) network");
    check_network(&cfg.dataset_url).await;

    // ─── 3) database ─────────────────────────────────────────────────
    info!("3) database");
    all_ok &= check_database(&cfg.db).await;

    // ─── 4) filesystem ───────────────────────────────────────────────
    info!("4) filesystem");
    all_ok &= check_write_permission(&std::env::current_dir()?);

    if all_ok {
        info!("all checks passed; run `fao-landuse` to start the integration");
        Ok(())
    } else {
        error!("some checks failed; fix the issues above before running");
        std::process::exit(1);
    }
}
