// src/process/mod.rs
pub mod extract;
pub mod parse;
pub mod utils;

pub use extract::extract_entry;
pub use parse::{parse_rows, ParsedRows};

/// One CSV record as decoded from the bulk file. Numeric fields that
/// did not coerce are `None`; the harmonizer decides what to keep.
#[derive(Debug, Clone, PartialEq)]
pub struct RawRow {
    pub area_code: Option<i32>,
    pub area_name: String,
    pub item_code: Option<i32>,
    pub item_name: String,
    pub element_code: Option<i32>,
    pub element_name: String,
    pub year: Option<i32>,
    pub unit: String,
    pub value: Option<f64>,
    pub flag: Option<String>,
    pub note: Option<String>,
}
