// src/process/parse.rs
use super::utils::{non_empty, parse_float, parse_int};
use super::RawRow;
use csv::{ReaderBuilder, StringRecord, Trim};
use tracing::{info, instrument, warn};

pub const COL_AREA_CODE: &str = "Area Code";
pub const COL_AREA: &str = "Area";
pub const COL_ITEM_CODE: &str = "Item Code";
pub const COL_ITEM: &str = "Item";
pub const COL_ELEMENT_CODE: &str = "Element Code";
pub const COL_ELEMENT: &str = "Element";
pub const COL_YEAR: &str = "Year";
pub const COL_UNIT: &str = "Unit";
pub const COL_VALUE: &str = "Value";
pub const COL_FLAG: &str = "Flag";
pub const COL_NOTE: &str = "Note";

const ALL_COLUMNS: [&str; 11] = [
    COL_AREA_CODE,
    COL_AREA,
    COL_ITEM_CODE,
    COL_ITEM,
    COL_ELEMENT_CODE,
    COL_ELEMENT,
    COL_YEAR,
    COL_UNIT,
    COL_VALUE,
    COL_FLAG,
    COL_NOTE,
];

/// Parser output: rows in source order plus the number of undecodable records dropped.
#[derive(Debug, Default)]
pub struct ParsedRows {
    pub rows: Vec<RawRow>,
    pub skipped_rows: usize,
}

/// Column positions resolved from the header row.
#[derive(Debug)]
struct ColumnIndex {
    slots: [Option<usize>; 11],
}

impl ColumnIndex {
    fn from_headers(headers: &StringRecord) -> Self {
        let mut slots = [None; 11];
        for (slot, name) in slots.iter_mut().zip(ALL_COLUMNS) {
            *slot = headers.iter().position(|h| h.trim() == name);
        }
        Self { slots }
    }

    fn missing(&self) -> Vec<&'static str> {
        self.slots
            .iter()
            .zip(ALL_COLUMNS)
            .filter(|(slot, _)| slot.is_none())
            .map(|(_, name)| name)
            .collect()
    }

    fn get<'r>(&self, record: &'r StringRecord, column: &str) -> &'r str {
        ALL_COLUMNS
            .iter()
            .position(|c| *c == column)
            .and_then(|i| self.slots[i])
            .and_then(|idx| record.get(idx))
            .unwrap_or("")
    }
}

/// Header-keyed parse of the normalized FAOSTAT CSV.
///
/// Numeric columns that fail coercion become `None` instead of failing the row;
/// records the CSV reader itself cannot decode are skipped and counted.
#[instrument(level = "info", skip(text), fields(chars = text.len()))]
pub fn parse_rows(text: &str) -> ParsedRows {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(text.as_bytes());

    let index = match rdr.headers() {
        Ok(h) => ColumnIndex::from_headers(h),
        Err(e) => {
            warn!(error = %e, "unreadable header row; nothing parsed");
            return ParsedRows::default();
        }
    };
    let missing = index.missing();
    if !missing.is_empty() {
        warn!(?missing, "columns absent from header; those fields will be empty");
    }

    let mut out = ParsedRows::default();
    for (idx, result) in rdr.records().enumerate() {
        let record = match result {
            Ok(r) => r,
            Err(e) => {
                warn!(record = idx, error = %e, "skipping malformed CSV record");
                out.skipped_rows += 1;
                continue;
            }
        };
        if record.iter().all(|f| f.is_empty()) {
            continue;
        }
        out.rows.push(to_raw_row(&index, &record));
    }

    info!(
        rows = out.rows.len(),
        skipped = out.skipped_rows,
        "parsed records"
    );
    out
}

fn to_raw_row(index: &ColumnIndex, record: &StringRecord) -> RawRow {
    let text = |col| index.get(record, col).to_string();
    RawRow {
        area_code: parse_int(index.get(record, COL_AREA_CODE)),
        area_name: text(COL_AREA),
        item_code: parse_int(index.get(record, COL_ITEM_CODE)),
        item_name: text(COL_ITEM),
        element_code: parse_int(index.get(record, COL_ELEMENT_CODE)),
        element_name: text(COL_ELEMENT),
        year: parse_int(index.get(record, COL_YEAR)),
        unit: text(COL_UNIT),
        value: parse_float(index.get(record, COL_VALUE)),
        flag: non_empty(index.get(record, COL_FLAG)),
        note: non_empty(index.get(record, COL_NOTE)),
    }
}
