// src/config.rs

use crate::error::{ConfigError, PersistenceError};
use std::fmt;

/// Bulk download of the FAOSTAT Land Use domain.
pub const DEFAULT_DATASET_URL: &str =
    "https://bulks-faostat.fao.org/production/Inputs_LandUse_E_All_Data_(Normalized).zip";
/// CSV entry inside the bulk ZIP.
pub const DEFAULT_ENTRY_NAME: &str = "Inputs_LandUse_E_All_Data_(Normalized).csv";
pub const DATASET_LABEL: &str = "Land Use (RL)";
pub const DATA_SOURCE_TAG: &str = "FAOSTAT_RL";
pub const EXPECTED_RECORDS: usize = 412_559;
pub const EXPECTED_COUNTRIES: usize = 246;
/// A run counts as a success once this many countries made it through.
pub const SUCCESS_COUNTRY_THRESHOLD: usize = 200;
pub const DEFAULT_BATCH_SIZE: usize = 1_000;
pub const DEFAULT_SUMMARY_PATH: &str = "step1_integration_summary.json";

const DEFAULT_SQLITE_FILE: &str = "fao_data.db";
const DEFAULT_PG_DATABASE: &str = "postgres";
const DEFAULT_PG_PORT: u16 = 5432;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendKind {
    Sqlite,
    Postgres,
}

impl BackendKind {
    pub fn parse(raw: &str) -> Result<Self, PersistenceError> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "sqlite" => Ok(BackendKind::Sqlite),
            "postgres" | "postgresql" => Ok(BackendKind::Postgres),
            _ => Err(PersistenceError::UnsupportedBackend(raw.to_string())),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            BackendKind::Sqlite => "sqlite",
            BackendKind::Postgres => "postgres",
        }
    }
}

impl fmt::Display for BackendKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Connection settings for the selected store.
#[derive(Clone, PartialEq, Eq)]
pub struct DbConfig {
    pub kind: BackendKind,
    pub host: String,
    pub port: u16,
    /// Database name, or the file path when `kind` is sqlite.
    pub database: String,
    pub user: String,
    pub password: String,
}

// keeps the password out of logs
impl fmt::Debug for DbConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DbConfig")
            .field("kind", &self.kind)
            .field("host", &self.host)
            .field("port", &self.port)
            .field("database", &self.database)
            .field("user", &self.user)
            .field("password", &if self.password.is_empty() { "" } else { "***" })
            .finish()
    }
}

impl DbConfig {
    /// Resolve settings from a variable lookup. Unset and empty variables fall back to defaults.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let kind = match get("DB_TYPE") {
            Some(raw) => BackendKind::parse(&raw)?,
            None => BackendKind::Sqlite,
        };

        let port = match get("DB_PORT") {
            Some(raw) => raw.trim().parse().map_err(|_| ConfigError::InvalidPort {
                var: "DB_PORT",
                value: raw.clone(),
            })?,
            None => DEFAULT_PG_PORT,
        };

        let database = get("DB_NAME").unwrap_or_else(|| match kind {
            BackendKind::Sqlite => DEFAULT_SQLITE_FILE.to_string(),
            BackendKind::Postgres => DEFAULT_PG_DATABASE.to_string(),
        });

        Ok(Self {
            kind,
            host: get("DB_HOST").unwrap_or_else(|| "localhost".to_string()),
            port,
            database,
            user: get("DB_USER").unwrap_or_else(|| "postgres".to_string()),
            password: lookup("DB_PASSWORD").unwrap_or_default(),
        })
    }

    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Short human label, e.g. `sqlite (fao_data.db)`.
    pub fn describe(&self) -> String {
        match self.kind {
            BackendKind::Sqlite => format!("sqlite ({})", self.database),
            BackendKind::Postgres => format!(
                "postgres ({}@{}:{}/{})",
                self.user, self.host, self.port, self.database
            ),
        }
    }
}

/// Everything one integration run needs.
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub dataset_url: String,
    pub entry_name: String,
    pub batch_size: usize,
    pub summary_path: String,
    pub db: DbConfig,
}

impl RunConfig {
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let dataset_url = lookup("FAO_DATASET_URL")
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_DATASET_URL.to_string());
        Ok(Self {
            dataset_url,
            entry_name: DEFAULT_ENTRY_NAME.to_string(),
            batch_size: DEFAULT_BATCH_SIZE,
            summary_path: DEFAULT_SUMMARY_PATH.to_string(),
            db: DbConfig::from_lookup(lookup)?,
        })
    }

    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_to_embedded_sqlite_file() {
        let cfg = DbConfig::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(cfg.kind, BackendKind::Sqlite);
        assert_eq!(cfg.database, "fao_data.db");
        assert_eq!(cfg.host, "localhost");
        assert_eq!(cfg.port, 5432);
        assert_eq!(cfg.user, "postgres");
        assert_eq!(cfg.password, "");
    }

    #[test]
    fn postgres_aliases_and_overrides() {
        let cfg = DbConfig::from_lookup(lookup_from(&[
            ("DB_TYPE", "PostgreSQL"),
            ("DB_HOST", "db.internal"),
            ("DB_PORT", "6543"),
            ("DB_USER", "fao"),
            ("DB_PASSWORD", "s3cret"),
        ]))
        .unwrap();
        assert_eq!(cfg.kind, BackendKind::Postgres);
        assert_eq!(cfg.database, "postgres");
        assert_eq!(cfg.host, "db.internal");
        assert_eq!(cfg.port, 6543);
        assert_eq!(cfg.describe(), "postgres (fao@db.internal:6543/postgres)");
        assert!(!format!("{:?}", cfg).contains("s3cret"));
    }

    #[test]
    fn rejects_unknown_backend_and_bad_port() {
        let err = DbConfig::from_lookup(lookup_from(&[("DB_TYPE", "mongodb")])).unwrap_err();
        assert!(err.to_string().contains("mongodb"));

        let err = DbConfig::from_lookup(lookup_from(&[("DB_PORT", "five")])).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidPort { .. }));
    }

    #[test]
    fn dataset_url_can_be_overridden() {
        let run = RunConfig::from_lookup(lookup_from(&[(
            "FAO_DATASET_URL",
            "http://mirror.local/landuse.zip",
        )]))
        .unwrap();
        assert_eq!(run.dataset_url, "http://mirror.local/landuse.zip");
        assert_eq!(run.entry_name, DEFAULT_ENTRY_NAME);
        assert_eq!(run.batch_size, 1_000);

        let run = RunConfig::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(run.dataset_url, DEFAULT_DATASET_URL);
    }
}
