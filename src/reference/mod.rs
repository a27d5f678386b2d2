// src/reference/mod.rs

use once_cell::sync::Lazy;
use serde::Serialize;
use std::collections::HashMap;

mod countries;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum EntityKind {
    Country,
    /// Multi-country aggregate such as "Africa"; never persisted.
    Region,
}

/// Standard identity of one source area code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CountryReferenceEntry {
    pub iso3: Option<String>,
    pub name: String,
    pub region: Option<String>,
    pub kind: EntityKind,
}

/// Compile-time row of the built-in table.
pub(crate) struct AreaSeed {
    pub code: i32,
    pub iso3: Option<&'static str>,
    pub name: &'static str,
    pub region: Option<&'static str>,
    pub kind: EntityKind,
}

/// Source area code → standard identity. Read-only once built.
#[derive(Debug, Clone, Default)]
pub struct ReferenceTable {
    entries: HashMap<i32, CountryReferenceEntry>,
}

static FAO_REFERENCE: Lazy<ReferenceTable> =
    Lazy::new(|| ReferenceTable::from_seeds(countries::FAO_AREAS));

impl ReferenceTable {
    /// The built-in FAOSTAT area mapping, built on first use.
    pub fn fao() -> &'static ReferenceTable {
        &FAO_REFERENCE
    }

    fn from_seeds(seeds: &[AreaSeed]) -> Self {
        let entries = seeds
            .iter()
            .map(|s| {
                (
                    s.code,
                    CountryReferenceEntry {
                        iso3: s.iso3.map(str::to_string),
                        name: s.name.to_string(),
                        region: s.region.map(str::to_string),
                        kind: s.kind,
                    },
                )
            })
            .collect();
        Self { entries }
    }

    pub fn from_entries<I>(entries: I) -> Self
    where
        I: IntoIterator<Item = (i32, CountryReferenceEntry)>,
    {
        Self {
            entries: entries.into_iter().collect(),
        }
    }

    pub fn get(&self, area_code: i32) -> Option<&CountryReferenceEntry> {
        self.entries.get(&area_code)
    }

    /// True only for codes explicitly marked as regional aggregates.
    pub fn is_aggregate(&self, area_code: i32) -> bool {
        self.get(area_code)
            .map_or(false, |e| e.kind == EntityKind::Region)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn country_count(&self) -> usize {
        self.entries
            .values()
            .filter(|e| e.kind == EntityKind::Country)
            .count()
    }
}
