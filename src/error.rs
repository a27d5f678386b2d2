// src/error.rs

use thiserror::Error;

/// Failures while retrieving the dataset archive.
#[derive(Debug, Error)]
pub enum NetworkError {
    #[error("invalid dataset URL {url}: {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    #[error("unsupported URL scheme `{scheme}` in {url}")]
    UnsupportedScheme { url: String, scheme: String },

    #[error("GET {url} failed: {source}")]
    Request {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("GET {url} returned HTTP {status}")]
    Status {
        url: String,
        status: reqwest::StatusCode,
    },

    #[error("reading body from {url}: {source}")]
    Body {
        url: String,
        #[source]
        source: reqwest::Error,
    },
}

/// Failures while opening the archive or pulling the CSV out of it.
#[derive(Debug, Error)]
pub enum ArchiveError {
    #[error("archive is not a readable ZIP: {0}")]
    Corrupt(#[source] zip::result::ZipError),

    #[error("entry {entry} not found in archive (found: {})", .available.join(", "))]
    MissingEntry {
        entry: String,
        available: Vec<String>,
    },

    #[error("reading entry {entry}: {source}")]
    Read {
        entry: String,
        #[source]
        source: std::io::Error,
    },
}

/// Failures talking to the relational store.
#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("unsupported database type `{0}` (expected sqlite or postgres)")]
    UnsupportedBackend(String),

    #[error("connecting to {backend}: {source}")]
    Connect {
        backend: &'static str,
        #[source]
        source: sqlx::Error,
    },

    #[error("creating fao_land_use schema: {0}")]
    Schema(#[source] sqlx::Error),

    #[error("upserting batch {batch} ({rows} rows): {source}")]
    Batch {
        batch: usize,
        rows: usize,
        #[source]
        source: sqlx::Error,
    },

    #[error("querying fao_land_use: {0}")]
    Query(#[source] sqlx::Error),
}

/// Bad environment or CLI configuration; detected before any work starts.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{var} must be a port number, got `{value}`")]
    InvalidPort { var: &'static str, value: String },

    #[error(transparent)]
    Backend(#[from] PersistenceError),
}

/// Failures writing the run-summary JSON artifact.
#[derive(Debug, Error)]
pub enum ReportError {
    #[error("serialising run summary: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("writing run summary to {path}: {source}")]
    Write {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Any fatal error a pipeline stage can raise.
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error(transparent)]
    Network(#[from] NetworkError),

    #[error(transparent)]
    Archive(#[from] ArchiveError),

    #[error(transparent)]
    Persistence(#[from] PersistenceError),

    #[error(transparent)]
    Report(#[from] ReportError),
}
