// src/store/postgres.rs

use super::PersistenceBackend;
use crate::config::{BackendKind, DbConfig};
use crate::error::PersistenceError;
use crate::harmonize::HarmonizedRecord;
use async_trait::async_trait;
use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
use sqlx::{PgPool, Postgres, QueryBuilder};
use std::time::Duration;
use tracing::debug;

const SCHEMA: &[&str] = &[
    "CREATE TABLE IF NOT EXISTS fao_land_use (
        id SERIAL PRIMARY KEY,
        area_code_fao INTEGER NOT NULL,
        area_name_fao VARCHAR(255),
        item_code INTEGER NOT NULL,
        item_name VARCHAR(255),
        element_code INTEGER NOT NULL,
        element_name VARCHAR(255),
        year INTEGER NOT NULL,
        unit VARCHAR(50),
        value DOUBLE PRECISION,
        flag VARCHAR(10),
        note TEXT,
        iso3_code VARCHAR(3),
        country_name_standard VARCHAR(255),
        region VARCHAR(100),
        is_country BOOLEAN,
        has_data BOOLEAN,
        data_source VARCHAR(50),
        integration_date TIMESTAMPTZ,
        created_at TIMESTAMPTZ DEFAULT CURRENT_TIMESTAMP,
        UNIQUE(area_code_fao, item_code, element_code, year)
    )",
    "CREATE INDEX IF NOT EXISTS idx_fao_land_use_iso3 ON fao_land_use (iso3_code)",
];

/// Networked PostgreSQL store.
pub struct PostgresStore {
    pool: PgPool,
    target: String,
}

impl PostgresStore {
    pub fn connect_lazy(cfg: &DbConfig) -> Self {
        let mut opts = PgConnectOptions::new()
            .host(&cfg.host)
            .port(cfg.port)
            .database(&cfg.database)
            .username(&cfg.user);
        if !cfg.password.is_empty() {
            opts = opts.password(&cfg.password);
        }
        let pool = PgPoolOptions::new()
            .max_connections(2)
            .acquire_timeout(Duration::from_secs(30))
            .connect_lazy_with(opts);
        Self {
            pool,
            target: format!("{}:{}/{}", cfg.host, cfg.port, cfg.database),
        }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    pub(crate) fn build_upsert<'a>(batch: &'a [HarmonizedRecord]) -> QueryBuilder<'a, Postgres> {
        super::upsert_query!(Postgres, batch)
    }
}

#[async_trait]
impl PersistenceBackend for PostgresStore {
    fn kind(&self) -> BackendKind {
        BackendKind::Postgres
    }

    async fn ping(&self) -> Result<(), PersistenceError> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map_err(|source| PersistenceError::Connect {
                backend: "postgres",
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
        debug!(target_db = %self.target, "schema ready");
        Ok(())
    }

    async fn upsert_batch(&self, batch: &[HarmonizedRecord]) -> Result<u64, sqlx::Error> {
        if batch.is_empty() {
            return Ok(0);
        }
        let mut qb = Self::build_upsert(batch);
        let res = qb.build().persistent(false).execute(&self.pool).await?;
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
