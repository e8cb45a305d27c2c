//! The searchable catalog of institution records.
//!
//! A [`Catalog`] is loaded once at startup and never mutated. Construction
//! precomputes the normalized name, normalized code, name keywords, and
//! first-letter acronym for every record so that each search touches only
//! cheap precomputed fields.
//!
//! Codes are NOT unique in real source data; records are identified by
//! catalog position and scored independently.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::normalize::{extract_keywords, first_letters, normalize};

/// One searchable record: a short code plus a display name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogRecord {
    /// Short code, 0-4 chars, may be empty and may repeat across records.
    #[serde(default)]
    pub code: String,
    /// Display name as shown to the user.
    pub name: String,
    /// Informational region label; never consulted by matching.
    #[serde(default)]
    pub region: String,
}

impl CatalogRecord {
    pub fn new(code: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            name: name.into(),
            region: String::new(),
        }
    }
}

/// A record plus its precomputed matching fields.
#[derive(Debug, Clone)]
pub(crate) struct IndexedRecord {
    pub record: CatalogRecord,
    pub norm_name: String,
    pub norm_code: String,
    pub keywords: Vec<String>,
    pub acronym: String,
}

impl IndexedRecord {
    fn new(record: CatalogRecord) -> Self {
        let norm_name = normalize(&record.name);
        let norm_code = normalize(&record.code);
        let keywords = extract_keywords(&norm_name);
        let acronym = first_letters(&norm_name);
        Self {
            record,
            norm_name,
            norm_code,
            keywords,
            acronym,
        }
    }
}

/// Error from the convenience JSON loader.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("invalid catalog JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Immutable, preprocessed record set.
///
/// Malformed records (empty names, empty codes) are tolerated: they simply
/// normalize to empty strings and rarely match anything.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    entries: Vec<IndexedRecord>,
}

impl Catalog {
    /// Build a catalog from records, precomputing all matching fields.
    pub fn from_records(records: Vec<CatalogRecord>) -> Self {
        let entries = records.into_iter().map(IndexedRecord::new).collect();
        Self { entries }
    }

    /// Load a catalog from a JSON array of records.
    pub fn from_json_slice(bytes: &[u8]) -> Result<Self, CatalogError> {
        let records: Vec<CatalogRecord> = serde_json::from_slice(bytes)?;
        Ok(Self::from_records(records))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate the original records in catalog order.
    pub fn records(&self) -> impl Iterator<Item = &CatalogRecord> {
        self.entries.iter().map(|e| &e.record)
    }

    pub(crate) fn entries(&self) -> &[IndexedRecord] {
        &self.entries
    }
}
