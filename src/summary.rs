// src/summary.rs

use crate::config::{DATASET_LABEL, EXPECTED_COUNTRIES, SUCCESS_COUNTRY_THRESHOLD};
use crate::error::ReportError;
use crate::harmonize::HarmonizedRecord;
use chrono::{DateTime, Utc};
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};
use std::collections::{HashMap, HashSet};
use std::path::Path;
use tracing::info;

pub const TOP_COUNTRIES: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct YearRange {
    pub min: i32,
    pub max: i32,
}

/// Aggregate view of one run's harmonized records.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunSummary {
    pub total_records: usize,
    pub countries_covered: usize,
    /// `None` when there were no records with a year.
    pub year_range: Option<YearRange>,
    pub land_use_categories: Vec<String>,
    pub elements: Vec<String>,
    /// Records per region, in first-seen order.
    #[serde(serialize_with = "ordered_map")]
    pub regions: Vec<(String, usize)>,
    /// Ranked, most records first.
    #[serde(serialize_with = "ordered_map")]
    pub top_countries_by_records: Vec<(String, usize)>,
}

fn ordered_map<S>(pairs: &[(String, usize)], serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    let mut map = serializer.serialize_map(Some(pairs.len()))?;
    for (name, count) in pairs {
        map.serialize_entry(name, count)?;
    }
    map.end()
}

impl RunSummary {
    pub fn top_country(&self, name: &str) -> Option<usize> {
        self.top_countries_by_records
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, c)| *c)
    }

    pub fn region_count(&self, region: &str) -> Option<usize> {
        self.regions
            .iter()
            .find(|(r, _)| r == region)
            .map(|(_, c)| *c)
    }
}

/// Insert-ordered distinct strings.
fn push_distinct<'a>(seen: &mut HashSet<&'a str>, out: &mut Vec<String>, value: &'a str) {
    if seen.insert(value) {
        out.push(value.to_string());
    }
}

/// Count `key` into `out`, appending it on first sight.
fn tally<'a>(slots: &mut HashMap<&'a str, usize>, out: &mut Vec<(String, usize)>, key: &'a str) {
    match slots.get(key) {
        Some(&idx) => out[idx].1 += 1,
        None => {
            slots.insert(key, out.len());
            out.push((key.to_string(), 1));
        }
    }
}

/// Single pass over `records`; the input is not modified.
pub fn summarize(records: &[HarmonizedRecord]) -> RunSummary {
    let mut iso3: HashSet<&str> = HashSet::new();
    let mut year_range: Option<YearRange> = None;
    let mut seen_items = HashSet::new();
    let mut items = Vec::new();
    let mut seen_elements = HashSet::new();
    let mut elements = Vec::new();
    let mut regions: Vec<(String, usize)> = Vec::new();
    let mut region_slot: HashMap<&str, usize> = HashMap::new();

    // first-encounter order is the tie-break for the ranking
    let mut per_country: Vec<(String, usize)> = Vec::new();
    let mut country_slot: HashMap<&str, usize> = HashMap::new();

    for r in records {
        if let Some(y) = r.year {
            year_range = Some(match year_range {
                Some(range) => YearRange {
                    min: range.min.min(y),
                    max: range.max.max(y),
                },
                None => YearRange { min: y, max: y },
            });
        }

        push_distinct(&mut seen_items, &mut items, &r.item_name);
        push_distinct(&mut seen_elements, &mut elements, &r.element_name);

        if let Some(region) = r.region.as_deref() {
            tally(&mut region_slot, &mut regions, region);
        }

        if let Some(code) = r.iso3_code.as_deref() {
            iso3.insert(code);
            let name = r.country_name_standard.as_deref().unwrap_or(code);
            tally(&mut country_slot, &mut per_country, name);
        }
    }

    // stable sort keeps first-encounter order among equal counts
    per_country.sort_by(|a, b| b.1.cmp(&a.1));
    per_country.truncate(TOP_COUNTRIES);

    RunSummary {
        total_records: records.len(),
        countries_covered: iso3.len(),
        year_range,
        land_use_categories: items,
        elements,
        regions,
        top_countries_by_records: per_country,
    }
}

/// Operator-facing dump of a summary.
pub fn log_summary(summary: &RunSummary) {
    info!("INTEGRATION SUMMARY");
    info!("  total records processed: {}", summary.total_records);
    info!("  countries covered: {}", summary.countries_covered);
    match summary.year_range {
        Some(r) => info!("  year range: {} - {}", r.min, r.max),
        None => info!("  year range: n/a"),
    }
    info!("  land use categories: {}", summary.land_use_categories.len());
    info!("  elements tracked: {}", summary.elements.len());

    info!("REGIONAL COVERAGE");
    for (region, count) in &summary.regions {
        info!("  {}: {} records", region, count);
    }

    info!("TOP COUNTRIES BY RECORDS");
    for (country, count) in summary.top_countries_by_records.iter().take(5) {
        info!("  {}: {} records", country, count);
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct IntegrationInfo {
    pub step: u32,
    pub dataset: String,
    pub integration_date: DateTime<Utc>,
    pub expected_countries: usize,
    pub actual_countries: usize,
    pub parsed_records: usize,
    pub rejected_records: usize,
    pub duplicate_records: usize,
    pub success: bool,
}

/// The JSON artifact written at the end of a successful run.
#[derive(Debug, Clone, Serialize)]
pub struct IntegrationReport {
    pub integration_info: IntegrationInfo,
    pub summary: RunSummary,
}

/// Record counts observed before the summary was built.
#[derive(Debug, Clone, Copy, Default)]
pub struct StageCounts {
    pub parsed: usize,
    pub rejected: usize,
    pub duplicates: usize,
}

impl IntegrationReport {
    pub fn new(summary: RunSummary, counts: StageCounts, at: DateTime<Utc>) -> Self {
        Self {
            integration_info: IntegrationInfo {
                step: 1,
                dataset: DATASET_LABEL.to_string(),
                integration_date: at,
                expected_countries: EXPECTED_COUNTRIES,
                actual_countries: summary.countries_covered,
                parsed_records: counts.parsed,
                rejected_records: counts.rejected,
                duplicate_records: counts.duplicates,
                success: summary.countries_covered >= SUCCESS_COUNTRY_THRESHOLD,
            },
            summary,
        }
    }

    /// Pretty-printed JSON, written through a temp file then renamed.
    pub fn write_json(&self, path: impl AsRef<Path>) -> Result<(), ReportError> {
        let path = path.as_ref();
        let body = serde_json::to_string_pretty(self)?;
        let tmp = path.with_extension("json.tmp");
        let shown = path.display().to_string();

        std::fs::write(&tmp, body).map_err(|source| ReportError::Write {
            path: shown.clone(),
            source,
        })?;
        std::fs::rename(&tmp, path).map_err(|source| ReportError::Write {
            path: shown.clone(),
            source,
        })?;
        info!(path = %shown, "integration summary exported");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::harmonize::Harmonizer;
    use crate::process::RawRow;
    use crate::reference::ReferenceTable;
    use chrono::TimeZone;

    fn record(area: i32, item: &str, year: i32, value: f64) -> HarmonizedRecord {
        let h = Harmonizer::with_timestamp(
            ReferenceTable::fao(),
            Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
        );
        h.harmonize_row(RawRow {
            area_code: Some(area),
            area_name: String::new(),
            item_code: Some(6600),
            item_name: item.to_string(),
            element_code: Some(5110),
            element_name: "Area".to_string(),
            year: Some(year),
            unit: "1000 ha".to_string(),
            value: Some(value),
            flag: None,
            note: None,
        })
    }

    #[test]
    fn canada_and_kenya_scenario() {
        let records = vec![
            record(124, "Country area", 2020, 5.0),
            record(124, "Country area", 2021, 7.0),
            record(404, "Country area", 2020, 3.0),
        ];
        let s = summarize(&records);
        assert_eq!(s.total_records, 3);
        assert_eq!(s.countries_covered, 2);
        assert_eq!(s.year_range, Some(YearRange { min: 2020, max: 2021 }));
        assert_eq!(
            s.top_countries_by_records,
            vec![("Canada".to_string(), 2), ("Kenya".to_string(), 1)]
        );
        assert_eq!(s.region_count("Americas"), Some(2));
        assert_eq!(s.region_count("Africa"), Some(1));
        assert_eq!(s.land_use_categories, vec!["Country area".to_string()]);
    }

    #[test]
    fn ties_keep_first_encountered_order() {
        let records = vec![
            record(404, "A", 2020, 1.0),
            record(124, "B", 2020, 1.0),
            record(76, "A", 2020, 1.0),
            record(76, "A", 2021, 1.0),
        ];
        let s = summarize(&records);
        let names: Vec<&str> = s
            .top_countries_by_records
            .iter()
            .map(|(n, _)| n.as_str())
            .collect();
        assert_eq!(names, vec!["Brazil", "Kenya", "Canada"]);
        assert_eq!(s.land_use_categories, vec!["A".to_string(), "B".to_string()]);
    }

    #[test]
    fn regions_keep_first_seen_order() {
        let records = vec![
            record(76, "Country area", 2020, 1.0),
            record(4, "Country area", 2020, 1.0),
            record(404, "Country area", 2020, 1.0),
            record(124, "Country area", 2020, 1.0),
        ];
        let s = summarize(&records);
        assert_eq!(
            s.regions,
            vec![
                ("Americas".to_string(), 2),
                ("Asia".to_string(), 1),
                ("Africa".to_string(), 1)
            ]
        );

        let text = serde_json::to_string(&s).unwrap();
        let americas = text.find("\"Americas\":2").unwrap();
        let asia = text.find("\"Asia\":1").unwrap();
        let africa = text.find("\"Africa\":1").unwrap();
        assert!(americas < asia && asia < africa);
    }

    #[test]
    fn write_json_reports_unwritable_path() {
        let report = IntegrationReport::new(
            summarize(&[]),
            StageCounts::default(),
            Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
        );
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("summary.json");
        let err = report.write_json(&path).unwrap_err();
        match err {
            ReportError::Write { path: shown, .. } => assert!(shown.ends_with("summary.json")),
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn ranking_is_capped_at_ten() {
        let codes = [4, 8, 12, 16, 20, 24, 28, 32, 51, 36, 40, 31];
        let records: Vec<_> = codes
            .iter()
            .map(|c| record(*c, "Country area", 2020, 1.0))
            .collect();
        let s = summarize(&records);
        assert_eq!(s.countries_covered, 12);
        assert_eq!(s.top_countries_by_records.len(), TOP_COUNTRIES);
        assert_eq!(s.top_countries_by_records[0].0, "Afghanistan");
    }

    #[test]
    fn unknown_codes_count_as_records_but_not_countries() {
        let records = vec![record(99_999, "Country area", 2019, 1.0)];
        let s = summarize(&records);
        assert_eq!(s.total_records, 1);
        assert_eq!(s.countries_covered, 0);
        assert!(s.top_countries_by_records.is_empty());
        assert!(s.regions.is_empty());
        assert_eq!(s.year_range, Some(YearRange { min: 2019, max: 2019 }));
    }

    #[test]
    fn empty_input() {
        let s = summarize(&[]);
        assert_eq!(s.total_records, 0);
        assert_eq!(s.year_range, None);
    }

    #[test]
    fn report_json_preserves_ranking_order() {
        let records = vec![
            record(404, "Country area", 2020, 3.0),
            record(124, "Country area", 2020, 5.0),
            record(124, "Country area", 2021, 7.0),
        ];
        let report = IntegrationReport::new(
            summarize(&records),
            StageCounts {
                parsed: 5,
                rejected: 2,
                duplicates: 0,
            },
            Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
        );
        assert!(!report.integration_info.success);

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("summary.json");
        report.write_json(&path).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        let canada = text.find("\"Canada\": 2").unwrap();
        let kenya = text.find("\"Kenya\": 1").unwrap();
        assert!(canada < kenya);

        let v: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(v["integration_info"]["dataset"], "Land Use (RL)");
        assert_eq!(v["integration_info"]["expected_countries"], 246);
        assert_eq!(v["integration_info"]["actual_countries"], 2);
        assert_eq!(v["integration_info"]["rejected_records"], 2);
        assert_eq!(v["summary"]["year_range"]["max"], 2021);
        assert_eq!(v["summary"]["top_countries_by_records"]["Kenya"], 1);
    }
}
