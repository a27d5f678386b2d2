// src/process/extract.rs
use crate::error::ArchiveError;
use std::io::{Cursor, Read};
use tracing::{debug, info, instrument};
use zip::ZipArchive;

const UTF8_BOM: char = '\u{feff}';

/// Open the in-memory ZIP, find `entry_name` and decode it as UTF-8 text.
/// Invalid byte sequences are replaced rather than rejected.
#[instrument(level = "info", skip(bytes), fields(archive_bytes = bytes.len()))]
pub fn extract_entry(bytes: &[u8], entry_name: &str) -> Result<String, ArchiveError> {
    // 1) Open the ZIP
    let mut archive = ZipArchive::new(Cursor::new(bytes)).map_err(ArchiveError::Corrupt)?;

    // 2) Locate the entry by exact name
    let names: Vec<String> = archive.file_names().map(str::to_string).collect();
    debug!(entries = ?names, "archive listing");
    if !names.iter().any(|n| n == entry_name) {
        return Err(ArchiveError::MissingEntry {
            entry: entry_name.to_string(),
            available: names,
        });
    }

    let mut entry = archive.by_name(entry_name).map_err(ArchiveError::Corrupt)?;

    // 3) Buffer and decode
    let mut buf = Vec::with_capacity(entry.size() as usize);
    entry
        .read_to_end(&mut buf)
        .map_err(|source| ArchiveError::Read {
            entry: entry_name.to_string(),
            source,
        })?;

    let text = String::from_utf8_lossy(&buf);
    let text = text.strip_prefix(UTF8_BOM).unwrap_or(&*text).to_string();
    info!(entry = entry_name, chars = text.len(), "extracted CSV from ZIP");
    Ok(text)
}
