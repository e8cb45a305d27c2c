//! instimatch - fuzzy search and ranking for institution-name catalogs
//!
//! Given a free-text query and a fixed catalog of a few thousand (code, name)
//! records, locate the intended entry while tolerating typos, abbreviations,
//! partial input, and acronyms, and return a deterministically ordered
//! candidate list for incremental autocomplete.
//!
//! # Features
//! - Normalization pipeline (case/punctuation/whitespace folding, keywords)
//! - Eight ordered match strategies, from exact down to raw substring
//! - Synonym equivalence classes (abbreviations, city aliases), injectable
//! - Classic Levenshtein distance with a bounded fast path
//! - Pure, stateless `search` call; safe to share across threads
//!
//! # Example
//! ```
//! use instimatch::{Catalog, CatalogRecord, SearchEngine};
//!
//! let catalog = Catalog::from_records(vec![
//!     CatalogRecord::new("AY", "ACHARAYA INSTITUTE OF TECHNOLOGY"),
//!     CatalogRecord::new("BI", "BENGALURU INSTITUTE OF TECHNOLOGY"),
//! ]);
//! let engine = SearchEngine::with_default_synonyms(catalog);
//!
//! let results = engine.search("bangalore institute");
//! assert_eq!(results[0].record.code, "BI");
//! ```

pub mod catalog;
pub mod engine;
pub mod levenshtein;
pub mod normalize;
pub mod strategy;
pub mod synonyms;

pub use catalog::{Catalog, CatalogError, CatalogRecord};
pub use engine::{highlight_span, MatchResult, SearchEngine, DEFAULT_LIMIT};
pub use strategy::MatchType;
pub use synonyms::{SynonymTable, SynonymTableBuilder};
