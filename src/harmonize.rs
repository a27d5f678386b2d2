// src/harmonize.rs

use crate::config::DATA_SOURCE_TAG;
use crate::process::RawRow;
use crate::reference::{EntityKind, ReferenceTable};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::{HashMap, HashSet};
use tracing::{debug, info};

/// A parsed row joined against the reference table. This is the unit that
/// gets persisted once it passes [`is_retained`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HarmonizedRecord {
    pub area_code_fao: Option<i32>,
    pub area_name_fao: String,
    pub item_code: Option<i32>,
    pub item_name: String,
    pub element_code: Option<i32>,
    pub element_name: String,
    pub year: Option<i32>,
    pub unit: String,
    pub value: Option<f64>,
    pub flag: Option<String>,
    pub note: Option<String>,

    pub iso3_code: Option<String>,
    pub country_name_standard: Option<String>,
    pub region: Option<String>,
    pub is_country: bool,
    /// Non-null and non-zero.
    pub has_data: bool,
    pub data_source: String,
    pub integration_date: DateTime<Utc>,
}

/// Storage uniqueness key: (area, item, element, year).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NaturalKey {
    pub area_code: i32,
    pub item_code: i32,
    pub element_code: i32,
    pub year: i32,
}

impl HarmonizedRecord {
    pub fn key(&self) -> Option<NaturalKey> {
        Some(NaturalKey {
            area_code: self.area_code_fao?,
            item_code: self.item_code?,
            element_code: self.element_code?,
            year: self.year?,
        })
    }
}

/// Joins rows against a reference table, stamping every record of a run
/// with the same integration time.
pub struct Harmonizer<'a> {
    table: &'a ReferenceTable,
    integrated_at: DateTime<Utc>,
}

impl<'a> Harmonizer<'a> {
    pub fn new(table: &'a ReferenceTable) -> Self {
        Self::with_timestamp(table, Utc::now())
    }

    pub fn with_timestamp(table: &'a ReferenceTable, integrated_at: DateTime<Utc>) -> Self {
        Self {
            table,
            integrated_at,
        }
    }

    /// Emit one record per row, rejected or not.
    pub fn emit(&self, rows: Vec<RawRow>) -> Vec<HarmonizedRecord> {
        rows.into_iter().map(|row| self.harmonize_row(row)).collect()
    }

    pub fn harmonize_row(&self, row: RawRow) -> HarmonizedRecord {
        let mapping = row.area_code.and_then(|code| self.table.get(code));
        let is_country = mapping.map_or(true, |m| m.kind != EntityKind::Region);
        let has_data = matches!(row.value, Some(v) if v != 0.0);

        HarmonizedRecord {
            area_code_fao: row.area_code,
            area_name_fao: row.area_name,
            item_code: row.item_code,
            item_name: row.item_name,
            element_code: row.element_code,
            element_name: row.element_name,
            year: row.year,
            unit: row.unit,
            value: row.value,
            flag: row.flag,
            note: row.note,

            iso3_code: mapping.and_then(|m| m.iso3.clone()),
            country_name_standard: mapping.map(|m| m.name.clone()),
            region: mapping.and_then(|m| m.region.clone()),
            is_country,
            has_data,
            data_source: DATA_SOURCE_TAG.to_string(),
            integration_date: self.integrated_at,
        }
    }
}

/// Retention rule: a year, a value, a complete key, and not an aggregate.
/// A zero value is kept.
pub fn is_retained(record: &HarmonizedRecord) -> bool {
    record.is_country && record.value.is_some() && record.key().is_some()
}

/// Keep retained records in source order; returns them with the rejected count.
pub fn retain_valid(records: Vec<HarmonizedRecord>) -> (Vec<HarmonizedRecord>, usize) {
    let before = records.len();
    let kept: Vec<_> = records.into_iter().filter(is_retained).collect();
    let rejected = before - kept.len();
    (kept, rejected)
}

/// Collapse records sharing a [`NaturalKey`]: the last occurrence wins and
/// takes the slot of the first. Records without a key pass through untouched.
pub fn dedupe_by_key(records: Vec<HarmonizedRecord>) -> (Vec<HarmonizedRecord>, usize) {
    let mut slots: HashMap<NaturalKey, usize> = HashMap::with_capacity(records.len());
    let mut out: Vec<HarmonizedRecord> = Vec::with_capacity(records.len());
    let mut duplicates = 0;

    for record in records {
        match record.key() {
            Some(key) => match slots.get(&key) {
                Some(&idx) => {
                    debug!(?key, "duplicate natural key; keeping the later row");
                    out[idx] = record;
                    duplicates += 1;
                }
                None => {
                    slots.insert(key, out.len());
                    out.push(record);
                }
            },
            None => out.push(record),
        }
    }
    (out, duplicates)
}

/// Emit, then filter. The output holds only records fit for persistence.
pub fn harmonize(rows: Vec<RawRow>, table: &ReferenceTable) -> Vec<HarmonizedRecord> {
    let (kept, _) = retain_valid(Harmonizer::new(table).emit(rows));
    kept
}

/// Result of the full harmonizing stage.
#[derive(Debug, Default)]
pub struct HarmonizeOutcome {
    pub records: Vec<HarmonizedRecord>,
    pub rejected: usize,
    pub duplicates: usize,
}

/// Emit → filter → dedupe, with the counts the run summary reports.
pub fn harmonize_for_persistence(
    rows: Vec<RawRow>,
    harmonizer: &Harmonizer<'_>,
) -> HarmonizeOutcome {
    let emitted = harmonizer.emit(rows);
    let (kept, rejected) = retain_valid(emitted);
    let (records, duplicates) = dedupe_by_key(kept);

    let covered: HashSet<&str> = records
        .iter()
        .filter_map(|r| r.iso3_code.as_deref())
        .collect();
    info!(
        valid = records.len(),
        rejected,
        duplicates,
        countries = covered.len(),
        "processed valid records"
    );

    HarmonizeOutcome {
        records,
        rejected,
        duplicates,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reference::CountryReferenceEntry;
    use chrono::TimeZone;

    fn raw(area: Option<i32>, year: Option<i32>, value: Option<f64>) -> RawRow {
        RawRow {
            area_code: area,
            area_name: format!("area {:?}", area),
            item_code: Some(6600),
            item_name: "Country area".into(),
            element_code: Some(5110),
            element_name: "Area".into(),
            year,
            unit: "1000 ha".into(),
            value,
            flag: None,
            note: None,
        }
    }

    fn stamp() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn known_country_gets_standard_identity() {
        let h = Harmonizer::with_timestamp(ReferenceTable::fao(), stamp());
        let rec = h.harmonize_row(raw(Some(124), Some(2020), Some(5.0)));
        assert_eq!(rec.iso3_code.as_deref(), Some("CAN"));
        assert_eq!(rec.country_name_standard.as_deref(), Some("Canada"));
        assert_eq!(rec.region.as_deref(), Some("Americas"));
        assert!(rec.is_country);
        assert!(rec.has_data);
        assert_eq!(rec.data_source, "FAOSTAT_RL");
        assert_eq!(rec.integration_date, stamp());
    }

    #[test]
    fn unknown_code_passes_through_as_country() {
        let records = harmonize(
            vec![raw(Some(99_999), Some(2020), Some(1.0))],
            ReferenceTable::fao(),
        );
        assert_eq!(records.len(), 1);
        let rec = &records[0];
        assert!(rec.is_country);
        assert_eq!(rec.iso3_code, None);
        assert_eq!(rec.country_name_standard, None);
        assert_eq!(rec.region, None);
        assert_eq!(rec.area_name_fao, "area Some(99999)");
    }

    #[test]
    fn aggregates_are_always_excluded() {
        let records = harmonize(
            vec![
                raw(Some(5100), Some(2020), Some(10.0)),
                raw(Some(5500), Some(2021), Some(0.5)),
            ],
            ReferenceTable::fao(),
        );
        assert!(records.is_empty());
    }

    #[test]
    fn missing_year_or_value_is_rejected_but_zero_is_kept() {
        let h = Harmonizer::with_timestamp(ReferenceTable::fao(), stamp());
        let emitted = h.emit(vec![
            raw(Some(124), None, Some(5.0)),
            raw(Some(124), Some(2020), None),
            raw(Some(124), Some(2021), Some(0.0)),
        ]);
        assert_eq!(emitted.len(), 3);

        let (kept, rejected) = retain_valid(emitted);
        assert_eq!(rejected, 2);
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].value, Some(0.0));
        assert!(!kept[0].has_data);
    }

    #[test]
    fn incomplete_key_is_rejected() {
        let records = harmonize(vec![raw(None, Some(2020), Some(3.0))], ReferenceTable::fao());
        assert!(records.is_empty());
    }

    #[test]
    fn custom_table_marks_regions() {
        let table = ReferenceTable::from_entries([(
            1,
            CountryReferenceEntry {
                iso3: None,
                name: "World".into(),
                region: None,
                kind: EntityKind::Region,
            },
        )]);
        let rec = Harmonizer::new(&table).harmonize_row(raw(Some(1), Some(2020), Some(1.0)));
        assert!(!rec.is_country);
        assert!(!is_retained(&rec));
    }

    #[test]
    fn dedupe_keeps_last_value_in_first_slot() {
        let h = Harmonizer::with_timestamp(ReferenceTable::fao(), stamp());
        let records = h.emit(vec![
            raw(Some(124), Some(2020), Some(1.0)),
            raw(Some(404), Some(2020), Some(2.0)),
            raw(Some(124), Some(2020), Some(9.0)),
        ]);
        let (out, dups) = dedupe_by_key(records);
        assert_eq!(dups, 1);
        assert_eq!(out.len(), 2);
        assert_eq!(out[0].area_code_fao, Some(124));
        assert_eq!(out[0].value, Some(9.0));
        assert_eq!(out[1].area_code_fao, Some(404));
    }

    #[test]
    fn full_stage_reports_counts() {
        let h = Harmonizer::with_timestamp(ReferenceTable::fao(), stamp());
        let outcome = harmonize_for_persistence(
            vec![
                raw(Some(124), Some(2020), Some(1.0)),
                raw(Some(124), Some(2020), Some(2.0)),
                raw(Some(5100), Some(2020), Some(3.0)),
                raw(Some(404), None, Some(4.0)),
            ],
            &h,
        );
        assert_eq!(outcome.records.len(), 1);
        assert_eq!(outcome.rejected, 2);
        assert_eq!(outcome.duplicates, 1);
    }
}
