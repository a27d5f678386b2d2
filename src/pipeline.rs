// src/pipeline.rs

use crate::config::RunConfig;
use crate::error::PipelineError;
use crate::fetch::Fetch;
use crate::harmonize::{harmonize_for_persistence, Harmonizer};
use crate::process::{extract_entry, parse_rows};
use crate::reference::ReferenceTable;
use crate::store::{self, PersistenceBackend, UpsertStats};
use crate::summary::{log_summary, summarize, IntegrationReport, RunSummary, StageCounts};
use chrono::Utc;
use serde::Serialize;
use std::error::Error as _;
use std::fmt;
use std::path::PathBuf;
use std::time::Instant;
use tracing::{error, info};

/// Linear run state; `Failed` is reachable from every non-terminal state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Stage {
    Pending,
    Fetching,
    Extracting,
    Parsing,
    Harmonizing,
    Summarizing,
    Persisting,
    Reporting,
    Done,
    Failed,
}

impl Stage {
    pub fn is_terminal(self) -> bool {
        matches!(self, Stage::Done | Stage::Failed)
    }

    /// The state that follows `self` on success.
    pub fn next(self) -> Stage {
        match self {
            Stage::Pending => Stage::Fetching,
            Stage::Fetching => Stage::Extracting,
            Stage::Extracting => Stage::Parsing,
            Stage::Parsing => Stage::Harmonizing,
            Stage::Harmonizing => Stage::Summarizing,
            Stage::Summarizing => Stage::Persisting,
            Stage::Persisting => Stage::Reporting,
            Stage::Reporting => Stage::Done,
            Stage::Done => Stage::Done,
            Stage::Failed => Stage::Failed,
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// Per-run knobs, usually derived from [`RunConfig`].
#[derive(Debug, Clone)]
pub struct PipelineOptions {
    pub dataset_url: String,
    pub entry_name: String,
    pub batch_size: usize,
    pub summary_path: PathBuf,
}

impl From<&RunConfig> for PipelineOptions {
    fn from(cfg: &RunConfig) -> Self {
        Self {
            dataset_url: cfg.dataset_url.clone(),
            entry_name: cfg.entry_name.clone(),
            batch_size: cfg.batch_size,
            summary_path: PathBuf::from(&cfg.summary_path),
        }
    }
}

/// Outcome of [`Pipeline::run`].
#[derive(Debug)]
pub enum RunResult {
    Success {
        summary: RunSummary,
        stats: UpsertStats,
        message: String,
    },
    Failure {
        stage: Stage,
        error: String,
    },
}

impl RunResult {
    pub fn is_success(&self) -> bool {
        matches!(self, RunResult::Success { .. })
    }

    /// 0 on success, 1 on any fatal error.
    pub fn exit_code(&self) -> i32 {
        if self.is_success() {
            0
        } else {
            1
        }
    }

    pub fn summary(&self) -> Option<&RunSummary> {
        match self {
            RunResult::Success { summary, .. } => Some(summary),
            RunResult::Failure { .. } => None,
        }
    }
}

/// Fetch → extract → parse → harmonize → summarize → persist → report.
pub struct Pipeline<'r, F: Fetch> {
    fetcher: F,
    backend: Box<dyn PersistenceBackend>,
    reference: &'r ReferenceTable,
    options: PipelineOptions,
    stage: Stage,
}

impl<'r, F: Fetch> Pipeline<'r, F> {
    pub fn new(
        fetcher: F,
        backend: Box<dyn PersistenceBackend>,
        reference: &'r ReferenceTable,
        options: PipelineOptions,
    ) -> Self {
        Self {
            fetcher,
            backend,
            reference,
            options,
            stage: Stage::Pending,
        }
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }

    pub fn backend(&self) -> &dyn PersistenceBackend {
        self.backend.as_ref()
    }

    fn advance(&mut self) {
        self.stage = self.stage.next();
        info!(stage = %self.stage, "entering stage");
    }

    /// Run every stage once. Never panics on stage errors; they come back as
    /// [`RunResult::Failure`] naming the stage that failed.
    pub async fn run(&mut self) -> RunResult {
        let start = Instant::now();
        info!(
            url = %self.options.dataset_url,
            backend = %self.backend.kind(),
            "starting land use integration"
        );

        let result = self.try_run().await;
        self.backend.close().await;

        match result {
            Ok((summary, stats)) => {
                let message = format!(
                    "Successfully integrated {} countries and {} records",
                    summary.countries_covered, summary.total_records
                );
                info!(elapsed = ?start.elapsed(), "{}", message);
                RunResult::Success {
                    summary,
                    stats,
                    message,
                }
            }
            Err(err) => {
                let failed_at = self.stage;
                self.stage = Stage::Failed;
                error!(stage = %failed_at, "integration failed: {}", err);
                let mut cause = err.source();
                while let Some(c) = cause {
                    error!("  caused by: {}", c);
                    cause = c.source();
                }
                RunResult::Failure {
                    stage: failed_at,
                    error: err.to_string(),
                }
            }
        }
    }

    async fn try_run(&mut self) -> Result<(RunSummary, UpsertStats), PipelineError> {
        // ─── 1) fetch ────────────────────────────────────────────────────
        self.advance();
        let bytes = self.fetcher.fetch(&self.options.dataset_url).await?;

        // ─── 2) extract ──────────────────────────────────────────────────
        self.advance();
        let text = extract_entry(&bytes, &self.options.entry_name)?;
        drop(bytes);

        // ─── 3) parse ────────────────────────────────────────────────────
        self.advance();
        let parsed = parse_rows(&text);
        drop(text);
        let parsed_count = parsed.rows.len();

        // ─── 4) harmonize ────────────────────────────────────────────────
        self.advance();
        let harmonizer = Harmonizer::new(self.reference);
        let outcome = harmonize_for_persistence(parsed.rows, &harmonizer);

        // ─── 5) summarize ────────────────────────────────────────────────
        self.advance();
        let summary = summarize(&outcome.records);
        log_summary(&summary);

        // ─── 6) persist ──────────────────────────────────────────────────
        self.advance();
        info!(
            "saving {} records to {}",
            outcome.records.len(),
            self.backend.kind()
        );
        let stats =
            store::upsert(self.backend.as_ref(), &outcome.records, self.options.batch_size)
                .await?;

        // ─── 7) report ───────────────────────────────────────────────────
        self.advance();
        let report = IntegrationReport::new(
            summary.clone(),
            StageCounts {
                parsed: parsed_count,
                rejected: outcome.rejected,
                duplicates: outcome.duplicates,
            },
            Utc::now(),
        );
        report.write_json(&self.options.summary_path)?;

        self.advance();
        Ok((summary, stats))
    }
}
