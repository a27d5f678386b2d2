// src/store/sqlite.rs

use super::PersistenceBackend;
use crate::config::{BackendKind, DbConfig};
use crate::error::PersistenceError;
use crate::harmonize::HarmonizedRecord;
use async_trait::async_trait;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::{QueryBuilder, Sqlite, SqlitePool};
use tracing::debug;

const SCHEMA: &[&str] = &[
    "CREATE TABLE IF NOT EXISTS fao_land_use (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        area_code_fao INTEGER NOT NULL,
        area_name_fao TEXT,
        item_code INTEGER NOT NULL,
        item_name TEXT,
        element_code INTEGER NOT NULL,
        element_name TEXT,
        year INTEGER NOT NULL,
        unit TEXT,
        value REAL,
        flag TEXT,
        note TEXT,
        iso3_code TEXT,
        country_name_standard TEXT,
        region TEXT,
        is_country BOOLEAN,
        has_data BOOLEAN,
        data_source TEXT,
        integration_date TEXT,
        created_at DATETIME DEFAULT CURRENT_TIMESTAMP,
        UNIQUE(area_code_fao, item_code, element_code, year)
    )",
    "CREATE INDEX IF NOT EXISTS idx_fao_land_use_iso3 ON fao_land_use (iso3_code)",
];

/// Embedded single-file store.
pub struct SqliteStore {
    pool: SqlitePool,
    path: String,
}

impl SqliteStore {
    /// The file is created on first use if it does not exist.
    pub fn connect_lazy(cfg: &DbConfig) -> Self {
        let opts = SqliteConnectOptions::new()
            .filename(&cfg.database)
            .create_if_missing(true);
        // one writer; batches are sequential anyway
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect_lazy_with(opts);
        Self {
            pool,
            path: cfg.database.clone(),
        }
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    pub(crate) fn build_upsert<'a>(batch: &'a [HarmonizedRecord]) -> QueryBuilder<'a, Sqlite> {
        super::upsert_query!(Sqlite, batch)
    }
}

#[async_trait]
impl PersistenceBackend for SqliteStore {
    fn kind(&self) -> BackendKind {
        BackendKind::Sqlite
    }

    async fn ping(&self) -> Result<(), PersistenceError> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map_err(|source| PersistenceError::Connect {
                backend: "sqlite",
                source,
            })?;
        Ok(())
    }

    async fn ensure_schema(&self) -> Result<(), PersistenceError> {
        self.ping().await?;
        for stmt in SCHEMA {
            sqlx::query(stmt)
                .execute(&self.pool)
                .await
                .map_err(PersistenceError::Schema)?;
        }
        debug!(path = %self.path, "schema ready");
        Ok(())
    }

    async fn upsert_batch(&self, batch: &[HarmonizedRecord]) -> Result<u64, sqlx::Error> {
        if batch.is_empty() {
            return Ok(0);
        }
        let mut qb = Self::build_upsert(batch);
        let res = qb.build().execute(&self.pool).await?;
        Ok(res.rows_affected())
    }

    async fn count_rows(&self) -> Result<i64, PersistenceError> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM fao_land_use")
            .fetch_one(&self.pool)
            .await
            .map_err(PersistenceError::Query)
    }

    async fn close(&self) {
        self.pool.close().await;
    }
}
