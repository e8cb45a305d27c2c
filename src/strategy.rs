//! Match strategies and per-record scoring.
//!
//! Each catalog record is evaluated against a fixed, ordered set of
//! strategies; the first strategy that produces a nonzero score wins for
//! that record, so a record is never scored twice.
//!
//! | Strategy       | Score                     | Condition                                  |
//! |----------------|---------------------------|--------------------------------------------|
//! | `Exact`        | 1000                      | normalized name or code equals query       |
//! | `CodePrefix`   | 900                       | non-empty code starts with query           |
//! | `NamePrefix`   | 850                       | name starts with query                     |
//! | `WordBoundary` | 800                       | name contains `" " + query`                |
//! | `Acronym`      | 750                       | first letters of name words contain query  |
//! | `Fuzzy`        | 600 − 50·d                | d ≤ max(2, ⌊0.4·len(query)⌋)               |
//! | `Keyword`      | 500 · matched / total     | ≥ 1 query keyword matched via synonyms     |
//! | `Contains`     | 300                       | name or code contains query                |
//!
//! The relative ordering of strategies is the load-bearing contract; the
//! constants themselves just need to preserve it.

use ahash::AHashSet;
use serde::{Deserialize, Serialize};

use crate::catalog::IndexedRecord;
use crate::levenshtein::distance_within;
use crate::normalize::{extract_keywords, normalize};
use crate::synonyms::SynonymTable;

pub const SCORE_EXACT: f64 = 1000.0;
pub const SCORE_CODE_PREFIX: f64 = 900.0;
pub const SCORE_NAME_PREFIX: f64 = 850.0;
pub const SCORE_WORD_BOUNDARY: f64 = 800.0;
pub const SCORE_ACRONYM: f64 = 750.0;
pub const SCORE_FUZZY_BASE: f64 = 600.0;
pub const SCORE_FUZZY_PENALTY: f64 = 50.0;
pub const SCORE_KEYWORD_FULL: f64 = 500.0;
pub const SCORE_CONTAINS: f64 = 300.0;

/// Which strategy produced a result's score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchType {
    Exact,
    CodePrefix,
    NamePrefix,
    WordBoundary,
    Acronym,
    Fuzzy,
    Keyword,
    Contains,
}

impl MatchType {
    /// Human-readable label for UI display.
    pub fn label(&self) -> &'static str {
        match self {
            MatchType::Exact => "exact match",
            MatchType::CodePrefix => "code prefix",
            MatchType::NamePrefix => "name prefix",
            MatchType::WordBoundary => "word match",
            MatchType::Acronym => "acronym",
            MatchType::Fuzzy => "close match",
            MatchType::Keyword => "keyword match",
            MatchType::Contains => "contains",
        }
    }
}

/// A query preprocessed once per search call.
///
/// Holds the normalized query text, its keywords, and the synonym expansion
/// of each keyword, so per-record scoring does no repeated query work.
#[derive(Debug)]
pub(crate) struct PreparedQuery {
    /// Normalized query text.
    pub text: String,
    /// `" " + text`, for the word-boundary check.
    boundary: String,
    /// Keywords of the query (tokens longer than one char).
    keywords: Vec<String>,
    /// Synonym expansion of each keyword, parallel to `keywords`.
    expanded: Vec<AHashSet<String>>,
}

impl PreparedQuery {
    pub fn new(raw_query: &str, table: &SynonymTable) -> Self {
        let text = normalize(raw_query);
        let keywords = extract_keywords(&text);
        let expanded = keywords.iter().map(|k| table.expand(k)).collect();
        let boundary = format!(" {text}");
        Self {
            text,
            boundary,
            keywords,
            expanded,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Maximum edit distance tolerated by the fuzzy strategy.
    ///
    /// Grows with query length so short queries are not over-matched:
    /// `max(2, ⌊0.4 · |query|⌋)` in chars of the normalized query.
    pub fn fuzzy_tolerance(&self) -> usize {
        let len = self.text.chars().count();
        (len * 2 / 5).max(2)
    }
}

/// Score one catalog record against a prepared query.
///
/// Returns `None` when no strategy matches; a zero score is never emitted.
pub(crate) fn score_record(
    query: &PreparedQuery,
    entry: &IndexedRecord,
    table: &SynonymTable,
) -> Option<(f64, MatchType)> {
    let q = &query.text;
    let name = &entry.norm_name;
    let code = &entry.norm_code;

    // 1. Exact: name or code equals the query.
    if name == q || (!code.is_empty() && code == q) {
        return Some((SCORE_EXACT, MatchType::Exact));
    }

    // 2. Code prefix: non-empty code starting with the query.
    if !code.is_empty() && code.starts_with(q.as_str()) {
        return Some((SCORE_CODE_PREFIX, MatchType::CodePrefix));
    }

    // 3. Name prefix.
    if !name.is_empty() && name.starts_with(q.as_str()) {
        return Some((SCORE_NAME_PREFIX, MatchType::NamePrefix));
    }

    // 4. Word boundary: query starts at a word other than the first.
    if name.contains(query.boundary.as_str()) {
        return Some((SCORE_WORD_BOUNDARY, MatchType::WordBoundary));
    }

    // 5. Acronym: first letters of the name words contain the query.
    if !entry.acronym.is_empty() && entry.acronym.contains(q.as_str()) {
        return Some((SCORE_ACRONYM, MatchType::Acronym));
    }

    // 6. Fuzzy: bounded edit distance against name and code.
    let tolerance = query.fuzzy_tolerance();
    let d_name = distance_within(q, name, tolerance);
    let d_code = distance_within(q, code, tolerance);
    let d = match (d_name, d_code) {
        (Some(a), Some(b)) => Some(a.min(b)),
        (a, b) => a.or(b),
    };
    if let Some(d) = d {
        let score = SCORE_FUZZY_BASE - SCORE_FUZZY_PENALTY * d as f64;
        // Long queries can exhaust the whole 600-point budget; a score that
        // bottoms out at zero falls through to the later strategies.
        if score > 0.0 {
            return Some((score, MatchType::Fuzzy));
        }
    }

    // 7. Keyword: synonym-expanded keyword overlap.
    if !query.keywords.is_empty() {
        let matched = matched_keyword_count(query, entry, table);
        if matched > 0 {
            let score = SCORE_KEYWORD_FULL * matched as f64 / query.keywords.len() as f64;
            return Some((score, MatchType::Keyword));
        }
    }

    // 8. Contains: raw substring fallback.
    if name.contains(q.as_str()) || (!code.is_empty() && code.contains(q.as_str())) {
        return Some((SCORE_CONTAINS, MatchType::Contains));
    }

    None
}

/// Count query keywords that match some name keyword.
///
/// Both sides are expanded through the synonym table. A query keyword
/// matches a name keyword when any expanded query term equals an expanded
/// name term, is a substring of one, or is within edit distance 1 of one.
fn matched_keyword_count(
    query: &PreparedQuery,
    entry: &IndexedRecord,
    table: &SynonymTable,
) -> usize {
    if entry.keywords.is_empty() {
        return 0;
    }
    let name_sets: Vec<AHashSet<String>> =
        entry.keywords.iter().map(|k| table.expand(k)).collect();

    query
        .expanded
        .iter()
        .filter(|query_set| {
            name_sets.iter().any(|name_set| {
                query_set.iter().any(|qt| {
                    name_set.iter().any(|nt| {
                        qt == nt || nt.contains(qt.as_str()) || distance_within(qt, nt, 1).is_some()
                    })
                })
            })
        })
        .count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{Catalog, CatalogRecord};

    fn entry(code: &str, name: &str) -> Catalog {
        Catalog::from_records(vec![CatalogRecord::new(code, name)])
    }

    fn score(query: &str, code: &str, name: &str) -> Option<(f64, MatchType)> {
        let table = SynonymTable::default_institution_table();
        let catalog = entry(code, name);
        let prepared = PreparedQuery::new(query, &table);
        score_record(&prepared, &catalog.entries()[0], &table)
    }

    #[test]
    fn test_exact_name() {
        let (s, t) = score("Acharaya Institute of Technology", "AY", "ACHARAYA INSTITUTE OF TECHNOLOGY").unwrap();
        assert_eq!(s, SCORE_EXACT);
        assert_eq!(t, MatchType::Exact);
    }

    #[test]
    fn test_exact_code() {
        let (s, t) = score("ay", "AY", "ACHARAYA INSTITUTE OF TECHNOLOGY").unwrap();
        assert_eq!(s, SCORE_EXACT);
        assert_eq!(t, MatchType::Exact);
    }

    #[test]
    fn test_code_prefix() {
        let (s, t) = score("b", "BI", "BENGALURU INSTITUTE OF TECHNOLOGY").unwrap();
        assert_eq!(s, SCORE_CODE_PREFIX);
        assert_eq!(t, MatchType::CodePrefix);
    }

    #[test]
    fn test_name_prefix() {
        let (s, t) = score("bengaluru inst", "BI", "BENGALURU INSTITUTE OF TECHNOLOGY").unwrap();
        assert_eq!(s, SCORE_NAME_PREFIX);
        assert_eq!(t, MatchType::NamePrefix);
    }

    #[test]
    fn test_word_boundary() {
        let (s, t) = score("institute of", "BI", "BENGALURU INSTITUTE OF TECHNOLOGY").unwrap();
        assert_eq!(s, SCORE_WORD_BOUNDARY);
        assert_eq!(t, MatchType::WordBoundary);
    }

    #[test]
    fn test_word_boundary_not_position_zero() {
        // A prefix match must win over word-boundary for the same query.
        let (_, t) = score("bengaluru", "", "BENGALURU INSTITUTE").unwrap();
        assert_eq!(t, MatchType::NamePrefix);
    }

    #[test]
    fn test_acronym() {
        let (s, t) = score("aiot", "", "ACHARAYA INSTITUTE OF TECHNOLOGY").unwrap();
        assert_eq!(s, SCORE_ACRONYM);
        assert_eq!(t, MatchType::Acronym);
    }

    #[test]
    fn test_acronym_substring() {
        let (_, t) = score("iot", "", "ACHARAYA INSTITUTE OF TECHNOLOGY").unwrap();
        assert_eq!(t, MatchType::Acronym);
    }

    #[test]
    fn test_fuzzy_typo() {
        // "enginering" is one insertion away from "engineering".
        let (s, t) = score("enginering", "", "ENGINEERING").unwrap();
        assert_eq!(t, MatchType::Fuzzy);
        assert_eq!(s, SCORE_FUZZY_BASE - SCORE_FUZZY_PENALTY);
    }

    #[test]
    fn test_fuzzy_uses_min_of_name_and_code_distance() {
        // Query is 1 edit from the code, far from the name.
        let (s, t) = score("ayx", "AY", "ACHARAYA INSTITUTE OF TECHNOLOGY").unwrap();
        assert_eq!(t, MatchType::Fuzzy);
        assert_eq!(s, SCORE_FUZZY_BASE - SCORE_FUZZY_PENALTY);
    }

    #[test]
    fn test_fuzzy_tolerance_boundary() {
        // |query| = 10 -> tolerance max(2, 4) = 4.
        // Exactly 4 substitutions: matched.
        let (_, t) = score("aaaaaaaaaa", "", "bbbbaaaaaa").unwrap();
        assert_eq!(t, MatchType::Fuzzy);
        // 5 substitutions: not matched by fuzzy, and nothing else fires.
        assert!(score("aaaaaaaaaa", "", "bbbbbaaaaa").is_none());
    }

    #[test]
    fn test_fuzzy_tolerance_floor_for_short_queries() {
        let table = SynonymTable::empty();
        let prepared = PreparedQuery::new("ab", &table);
        assert_eq!(prepared.fuzzy_tolerance(), 2);
        let prepared = PreparedQuery::new("abcdefghij", &table);
        assert_eq!(prepared.fuzzy_tolerance(), 4);
    }

    #[test]
    fn test_keyword_synonym_match() {
        let (s, t) = score("bangalore institute", "BI", "BENGALURU INSTITUTE OF TECHNOLOGY").unwrap();
        assert_eq!(t, MatchType::Keyword);
        // Both query keywords match: bangalore <-> bengaluru, institute.
        assert_eq!(s, SCORE_KEYWORD_FULL);
    }

    #[test]
    fn test_keyword_partial_ratio() {
        // Only "institute" matches out of two keywords.
        let (s, t) = score("zzzzzz institute", "", "ACHARAYA INSTITUTE OF TECHNOLOGY").unwrap();
        assert_eq!(t, MatchType::Keyword);
        assert_eq!(s, SCORE_KEYWORD_FULL / 2.0);
    }

    #[test]
    fn test_keyword_respects_injected_table() {
        let table = SynonymTable::builder().class(["alpha", "beta"]).build();
        let catalog = entry("", "BETA COLLEGE");
        let prepared = PreparedQuery::new("alpha campus", &table);
        let (s, t) = score_record(&prepared, &catalog.entries()[0], &table).unwrap();
        assert_eq!(t, MatchType::Keyword);
        assert_eq!(s, SCORE_KEYWORD_FULL / 2.0);
    }

    #[test]
    fn test_keyword_containment_of_midword_fragment() {
        // "haraya" is a substring of the name keyword "acharaya".
        let (s, t) = score("haraya", "", "ACHARAYA INSTITUTE").unwrap();
        assert_eq!(t, MatchType::Keyword);
        assert_eq!(s, SCORE_KEYWORD_FULL);
    }

    #[test]
    fn test_contains_fallback() {
        // A single-letter query yields no keywords, and the code is outside
        // the fuzzy tolerance, leaving only the raw substring check.
        let (s, t) = score("y", "ABC", "XYZ ABC").unwrap();
        assert_eq!(t, MatchType::Contains);
        assert_eq!(s, SCORE_CONTAINS);
    }

    #[test]
    fn test_no_match_excluded() {
        assert!(score("qqqqqq", "AY", "ACHARAYA INSTITUTE OF TECHNOLOGY").is_none());
    }

    #[test]
    fn test_empty_name_record_is_harmless() {
        // Empty name, empty code: fuzzy distance to "" is |query|, which is
        // inside tolerance only for very short queries.
        assert!(score("abcdefgh", "", "").is_none());
        let (_, t) = score("ab", "", "").unwrap();
        assert_eq!(t, MatchType::Fuzzy);
    }

    #[test]
    fn test_match_type_labels() {
        assert_eq!(MatchType::Exact.label(), "exact match");
        assert_eq!(MatchType::Keyword.label(), "keyword match");
    }
}
