//! The search engine: per-record scoring plus ranking.
//!
//! A [`SearchEngine`] owns an immutable [`Catalog`] and [`SynonymTable`] and
//! exposes a pure `search` call: no interior mutability, no I/O, safe to
//! share across threads. Interactive callers are expected to debounce
//! keystrokes themselves; every call scans the full catalog.

use std::ops::Range;

use rayon::prelude::*;
use serde::Serialize;
use tracing::{debug, trace};

use crate::catalog::{Catalog, CatalogRecord};
use crate::strategy::{score_record, MatchType, PreparedQuery};
use crate::synonyms::SynonymTable;

/// Default result cap for [`SearchEngine::search`].
pub const DEFAULT_LIMIT: usize = 50;

/// Catalog size at which scoring switches to rayon.
///
/// Per-record work is small, so the parallel path only pays off once the
/// catalog is comfortably past a thousand records. Ordering is unaffected:
/// scoring collects in catalog order and sorting happens afterwards.
const PARALLEL_THRESHOLD: usize = 1000;

/// One scored candidate, valid for a single search call.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchResult {
    pub record: CatalogRecord,
    /// Strictly positive; zero-score records are never emitted.
    pub score: f64,
    pub match_type: MatchType,
}

/// Fuzzy search over an immutable institution catalog.
#[derive(Debug, Clone)]
pub struct SearchEngine {
    catalog: Catalog,
    synonyms: SynonymTable,
}

impl SearchEngine {
    /// Build an engine over a catalog with an injected synonym table.
    pub fn new(catalog: Catalog, synonyms: SynonymTable) -> Self {
        debug!(
            records = catalog.len(),
            synonym_classes = synonyms.class_count(),
            "search engine initialized"
        );
        Self { catalog, synonyms }
    }

    /// Build an engine with the built-in institution synonym table.
    pub fn with_default_synonyms(catalog: Catalog) -> Self {
        Self::new(catalog, SynonymTable::default_institution_table())
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Search with the default result cap of [`DEFAULT_LIMIT`].
    #[must_use]
    pub fn search(&self, query: &str) -> Vec<MatchResult> {
        self.search_with_limit(query, DEFAULT_LIMIT)
    }

    /// Score every catalog record against `query`, rank, and truncate.
    ///
    /// Results are ordered by score descending, ties broken by record name
    /// ascending (ordinal), then by catalog position; the ordering is a pure
    /// function of (query, catalog, synonym table). An empty normalized
    /// query returns an empty list, which callers should present as the
    /// "no query yet" state rather than "no matches".
    #[must_use]
    pub fn search_with_limit(&self, query: &str, limit: usize) -> Vec<MatchResult> {
        let prepared = PreparedQuery::new(query, &self.synonyms);
        if prepared.is_empty() || limit == 0 {
            return Vec::new();
        }

        let entries = self.catalog.entries();
        let to_result = |entry: &crate::catalog::IndexedRecord| {
            score_record(&prepared, entry, &self.synonyms).map(|(score, match_type)| MatchResult {
                record: entry.record.clone(),
                score,
                match_type,
            })
        };

        // Parallel collection preserves catalog order, so the stable sort
        // below tie-breaks identically on both paths.
        let mut matches: Vec<MatchResult> = if entries.len() >= PARALLEL_THRESHOLD {
            entries.par_iter().filter_map(to_result).collect()
        } else {
            entries.iter().filter_map(to_result).collect()
        };

        matches.sort_by(|a, b| {
            b.score
                .total_cmp(&a.score)
                .then_with(|| a.record.name.cmp(&b.record.name))
        });
        matches.truncate(limit);

        trace!(
            query = %prepared.text,
            results = matches.len(),
            "search complete"
        );
        matches
    }
}

/// Locate the raw query inside a display name for highlight rendering.
///
/// Case-insensitive (ASCII folding) substring search; returns the byte range
/// of the first occurrence in `name`, suitable for slicing the original
/// string. Returns `None` for a blank query or when the query does not occur
/// verbatim (e.g. the match came from the fuzzy or keyword strategy).
#[must_use]
pub fn highlight_span(name: &str, raw_query: &str) -> Option<Range<usize>> {
    let query: Vec<char> = raw_query.trim().chars().collect();
    if query.is_empty() {
        return None;
    }
    for (start, _) in name.char_indices() {
        let mut qi = 0;
        let mut end = start;
        for (off, c) in name[start..].char_indices() {
            if !c.eq_ignore_ascii_case(&query[qi]) {
                break;
            }
            qi += 1;
            end = start + off + c.len_utf8();
            if qi == query.len() {
                return Some(start..end);
            }
        }
    }
    None
}
