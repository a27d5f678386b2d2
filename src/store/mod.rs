// src/store/mod.rs

use crate::config::{BackendKind, DbConfig};
use crate::error::PersistenceError;
use crate::harmonize::HarmonizedRecord;
use async_trait::async_trait;
use std::time::Instant;
use tracing::{info, instrument, warn};

pub mod postgres;
pub mod sqlite;

pub use postgres::PostgresStore;
pub use sqlite::SqliteStore;

pub const TABLE: &str = "fao_land_use";

/// Insert column order; `push_values` binds in exactly this order.
pub(crate) const INSERT_COLUMNS: &str = "area_code_fao, area_name_fao, item_code, item_name, \
     element_code, element_name, year, unit, value, flag, note, iso3_code, \
     country_name_standard, region, is_country, has_data, data_source, integration_date";

pub(crate) const BINDS_PER_ROW: usize = 18;

/// Same clause for both dialects; `id` and `created_at` survive updates.
pub(crate) const UPSERT_CLAUSE: &str = " ON CONFLICT (area_code_fao, item_code, element_code, year) DO UPDATE SET \
     area_name_fao = excluded.area_name_fao, \
     item_name = excluded.item_name, \
     element_name = excluded.element_name, \
     unit = excluded.unit, \
     value = excluded.value, \
     flag = excluded.flag, \
     note = excluded.note, \
     iso3_code = excluded.iso3_code, \
     country_name_standard = excluded.country_name_standard, \
     region = excluded.region, \
     is_country = excluded.is_country, \
     has_data = excluded.has_data, \
     data_source = excluded.data_source, \
     integration_date = excluded.integration_date";

/// Multi-row upsert over `$batch` for dialect `$db`, binding each record in
/// `INSERT_COLUMNS` order.
macro_rules! upsert_query {
    ($db:ty, $batch:expr) => {{
        let mut qb: ::sqlx::QueryBuilder<'_, $db> = ::sqlx::QueryBuilder::new(format!(
            "INSERT INTO {} ({}) ",
            $crate::store::TABLE,
            $crate::store::INSERT_COLUMNS
        ));
        qb.push_values($batch, |mut b, r| {
            b.push_bind(r.area_code_fao)
                .push_bind(r.area_name_fao.as_str())
                .push_bind(r.item_code)
                .push_bind(r.item_name.as_str())
                .push_bind(r.element_code)
                .push_bind(r.element_name.as_str())
                .push_bind(r.year)
                .push_bind(r.unit.as_str())
                .push_bind(r.value)
                .push_bind(r.flag.as_deref())
                .push_bind(r.note.as_deref())
                .push_bind(r.iso3_code.as_deref())
                .push_bind(r.country_name_standard.as_deref())
                .push_bind(r.region.as_deref())
                .push_bind(r.is_country)
                .push_bind(r.has_data)
                .push_bind(r.data_source.as_str())
                .push_bind(r.integration_date);
        });
        qb.push($crate::store::UPSERT_CLAUSE);
        qb
    }};
}
pub(crate) use upsert_query;

/// Largest batch whose binds fit under SQLite's 32766 variable limit.
pub const MAX_BATCH_ROWS: usize = 32_766 / BINDS_PER_ROW;

/// A relational store that can hold harmonized records.
#[async_trait]
pub trait PersistenceBackend: Send + Sync {
    fn kind(&self) -> BackendKind;

    /// Round-trip a trivial query.
    async fn ping(&self) -> Result<(), PersistenceError>;

    /// Create the table and its unique key if they do not exist.
    async fn ensure_schema(&self) -> Result<(), PersistenceError>;

    /// Insert-or-update one batch in a single statement; returns rows affected.
    async fn upsert_batch(&self, batch: &[HarmonizedRecord]) -> Result<u64, sqlx::Error>;

    async fn count_rows(&self) -> Result<i64, PersistenceError>;

    async fn close(&self);
}

/// Build the configured backend. No connection is made until first use.
pub fn open_backend(cfg: &DbConfig) -> Box<dyn PersistenceBackend> {
    match cfg.kind {
        BackendKind::Sqlite => Box::new(SqliteStore::connect_lazy(cfg)),
        BackendKind::Postgres => Box::new(PostgresStore::connect_lazy(cfg)),
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UpsertStats {
    pub batches: usize,
    pub records: usize,
    pub rows_affected: u64,
}

pub fn effective_batch_size(requested: usize) -> usize {
    let size = requested.clamp(1, MAX_BATCH_ROWS);
    if size != requested {
        warn!(requested, using = size, "batch size out of range; clamped");
    }
    size
}

/// Ensure the schema, then write `records` batch by batch, in order.
/// Batches already written stay committed if a later one fails.
#[instrument(level = "info", skip(backend, records), fields(backend = %backend.kind(), records = records.len()))]
pub async fn upsert(
    backend: &dyn PersistenceBackend,
    records: &[HarmonizedRecord],
    batch_size: usize,
) -> Result<UpsertStats, PersistenceError> {
    let start = Instant::now();
    backend.ensure_schema().await?;

    let batch_size = effective_batch_size(batch_size);
    let total = records.len();
    let mut stats = UpsertStats::default();

    for (idx, batch) in records.chunks(batch_size).enumerate() {
        let affected = backend
            .upsert_batch(batch)
            .await
            .map_err(|source| PersistenceError::Batch {
                batch: idx,
                rows: batch.len(),
                source,
            })?;
        stats.batches += 1;
        stats.records += batch.len();
        stats.rows_affected += affected;
        info!("inserted {}/{} records", stats.records, total);
    }

    info!(
        batches = stats.batches,
        elapsed = ?start.elapsed(),
        "data saved to {} database",
        backend.kind()
    );
    Ok(stats)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn batch_size_is_clamped() {
        assert_eq!(effective_batch_size(0), 1);
        assert_eq!(effective_batch_size(1_000), 1_000);
        assert_eq!(effective_batch_size(50_000), MAX_BATCH_ROWS);
        assert!(MAX_BATCH_ROWS * BINDS_PER_ROW <= 32_766);
    }

    #[test]
    fn both_dialects_share_columns_and_conflict_clause() {
        use crate::harmonize::Harmonizer;
        use crate::process::RawRow;
        use crate::reference::ReferenceTable;

        let h = Harmonizer::new(ReferenceTable::fao());
        let recs = vec![h.harmonize_row(RawRow {
            area_code: Some(124),
            area_name: "Canada".into(),
            item_code: Some(6600),
            item_name: "Country area".into(),
            element_code: Some(5110),
            element_name: "Area".into(),
            year: Some(2020),
            unit: "1000 ha".into(),
            value: Some(1.0),
            flag: None,
            note: None,
        })];

        let lite = SqliteStore::build_upsert(&recs);
        let pg = PostgresStore::build_upsert(&recs);
        let head = |sql: &str| sql.split("VALUES").next().unwrap_or_default().to_string();

        assert_eq!(head(lite.sql()), head(pg.sql()));
        assert_eq!(
            head(lite.sql()).trim(),
            format!("INSERT INTO {TABLE} ({INSERT_COLUMNS})")
        );
        assert!(lite.sql().ends_with(UPSERT_CLAUSE));
        assert!(pg.sql().ends_with(UPSERT_CLAUSE));
    }

    #[test]
    fn column_list_matches_bind_count() {
        assert_eq!(INSERT_COLUMNS.split(',').count(), BINDS_PER_ROW);
    }
}
