//! Synonym equivalence classes for keyword matching.
//!
//! A [`SynonymTable`] holds classes of interchangeable terms: abbreviations
//! and full forms ("engineering" / "engg" / "engr"), and regional aliases
//! ("bengaluru" / "bangalore"). Lookup is bidirectional: every member of a
//! class expands to the whole class, so it does not matter whether the user
//! typed the canonical term or a variant.
//!
//! The table is an explicitly constructed, immutable value injected into the
//! engine at construction time; tests can build their own tables through the
//! builder.

use ahash::{AHashMap, AHashSet};

// Built-in classes for the institution-name domain. Kept in code rather than
// loaded from a file so table construction cannot fail at runtime.
const INSTITUTION_CLASSES: &[&[&str]] = &[
    &["engineering", "engg", "eng", "engr", "engineer"],
    &["government", "govt", "gvt", "gov"],
    &["institute", "institution", "inst"],
    &["technology", "technological", "tech"],
    &["management", "mgmt", "mgt"],
    &["university", "univ", "uni"],
    &["college", "clg"],
    &["science", "sciences", "sci"],
    &["polytechnic", "poly"],
    &["department", "dept"],
    &["national", "natl"],
    &["medical", "medicine", "med"],
    &["pharmacy", "pharma", "pharm"],
    &["commerce", "comm"],
    &["junior", "jr"],
    &["senior", "sr"],
    &["saint", "st"],
    &["bengaluru", "bangalore"],
    &["mysuru", "mysore"],
    &["mangaluru", "mangalore"],
    &["belagavi", "belgaum"],
    &["kalaburagi", "gulbarga"],
    &["shivamogga", "shimoga"],
    &["hubballi", "hubli"],
    &["vijayapura", "bijapur"],
    &["tumakuru", "tumkur"],
    &["ballari", "bellary"],
];

/// Immutable table of synonym equivalence classes.
#[derive(Debug, Clone, Default)]
pub struct SynonymTable {
    /// Equivalence classes; each member of `index` points into this.
    classes: Vec<Vec<String>>,
    /// Term -> class id. Every member of a class is indexed.
    index: AHashMap<String, usize>,
}

impl SynonymTable {
    /// Start building a table from scratch.
    pub fn builder() -> SynonymTableBuilder {
        SynonymTableBuilder::default()
    }

    /// A table with no classes; every word expands only to itself.
    pub fn empty() -> Self {
        Self::default()
    }

    /// The built-in table for the institution-name domain.
    pub fn default_institution_table() -> Self {
        let mut builder = Self::builder();
        for class in INSTITUTION_CLASSES {
            builder = builder.class(class.iter().copied());
        }
        builder.build()
    }

    /// Expand a word to its full equivalence class.
    ///
    /// The result always contains the word itself and is deduplicated. Words
    /// not present in any class expand to the singleton set of themselves.
    #[must_use]
    pub fn expand(&self, word: &str) -> AHashSet<String> {
        let mut out = AHashSet::new();
        if let Some(&class_id) = self.index.get(word) {
            out.extend(self.classes[class_id].iter().cloned());
        }
        out.insert(word.to_string());
        out
    }

    /// Number of equivalence classes in the table.
    pub fn class_count(&self) -> usize {
        self.classes.len()
    }
}

/// Builder for [`SynonymTable`].
#[derive(Debug, Default)]
pub struct SynonymTableBuilder {
    classes: Vec<Vec<String>>,
}

impl SynonymTableBuilder {
    /// Add an equivalence class.
    ///
    /// Members are lower-cased on the way in. If any member already belongs
    /// to a previously added class, the new members are merged into that
    /// class instead of forming a separate one.
    pub fn class<I, S>(mut self, members: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let members: Vec<String> = members.into_iter().map(|m| m.into().to_lowercase()).collect();
        self.classes.push(members);
        self
    }

    /// Finish building, merging overlapping classes and deduplicating members.
    pub fn build(self) -> SynonymTable {
        let mut classes: Vec<Vec<String>> = Vec::new();
        let mut index: AHashMap<String, usize> = AHashMap::new();

        for members in self.classes {
            // Merge into an existing class when any member is already known.
            let target = members.iter().find_map(|m| index.get(m).copied());
            let class_id = match target {
                Some(id) => id,
                None => {
                    classes.push(Vec::new());
                    classes.len() - 1
                }
            };
            for member in members {
                if member.is_empty() {
                    continue;
                }
                if !index.contains_key(&member) {
                    index.insert(member.clone(), class_id);
                    classes[class_id].push(member);
                }
            }
        }

        SynonymTable { classes, index }
    }
}
