// WHY: Main detector interface tying anchor patterns, initials matching and normalization together
// One extractor is built per rule set and reused across documents

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub mod char_class;
pub mod extractor;
pub mod initials;
pub mod matcher;
pub mod normalization;
pub mod patterns;
pub mod rules;

// Re-export core types
pub use initials::{build_initials, truncate_for_ampersand, Initials};
pub use matcher::{phrase_matches, AbbreviationKey};
pub use normalization::{collapse_whitespace, normalize_phrase_caps};
pub use patterns::{AnchorPass, AnchorPatterns};
pub use rules::{CompiledRules, MatchRules};

/// Abbreviation -> normalized long form, iterated in key order
///
/// Keys are unique: the first long form recorded for an abbreviation is never replaced.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AbbreviationMap {
    entries: BTreeMap<String, String>,
}

impl AbbreviationMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a pair unless the abbreviation is already present; returns whether it was inserted
    pub fn insert_if_absent(&mut self, abbreviation: &str, long_form: String) -> bool {
        if self.entries.contains_key(abbreviation) {
            return false;
        }
        self.entries.insert(abbreviation.to_string(), long_form);
        true
    }

    pub fn contains(&self, abbreviation: &str) -> bool {
        self.entries.contains_key(abbreviation)
    }

    pub fn get(&self, abbreviation: &str) -> Option<&str> {
        self.entries.get(abbreviation).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Pairs in alphabetical key order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn into_inner(self) -> BTreeMap<String, String> {
        self.entries
    }
}

impl IntoIterator for AbbreviationMap {
    type Item = (String, String);
    type IntoIter = std::collections::btree_map::IntoIter<String, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

/// Main abbreviation extractor
pub struct AbbreviationExtractor {
    patterns: AnchorPatterns,
    rules: CompiledRules,
}

impl AbbreviationExtractor {
    /// Create new extractor with custom match rules
    pub fn new(rules: &MatchRules) -> Result<Self> {
        Ok(Self {
            patterns: AnchorPatterns::new()?,
            rules: CompiledRules::new(rules),
        })
    }

    /// Create extractor with the built-in stop words and prefixes
    pub fn with_default_rules() -> Result<Self> {
        Self::new(&MatchRules::default())
    }

    /// Find abbreviation / long-form pairs in `text`
    pub fn extract(&self, text: &str) -> AbbreviationMap {
        extractor::extract_pairs(text, &self.patterns, &self.rules)
    }

    /// Whether `words` match `abbreviation` under this extractor's rules
    pub fn phrase_matches<S: AsRef<str>>(&self, words: &[S], abbreviation: &str) -> bool {
        phrase_matches(words, abbreviation, &self.rules)
    }

    /// Display form of a long-form phrase under this extractor's rules
    pub fn normalize(&self, phrase: &str) -> String {
        normalize_phrase_caps(phrase, &self.rules)
    }
}

/// Extract pairs with the default rules
pub fn extract(text: &str) -> Result<AbbreviationMap> {
    Ok(AbbreviationExtractor::with_default_rules()?.extract(text))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_if_absent_keeps_first() {
        let mut map = AbbreviationMap::new();
        assert!(map.insert_if_absent("AF", "Atrial Fibrillation".to_string()));
        assert!(!map.insert_if_absent("AF", "Atrial Flutter".to_string()));
        assert_eq!(map.get("AF"), Some("Atrial Fibrillation"));
        assert_eq!(map.len(), 1);
    }

    #[test]
    fn test_iteration_is_sorted() {
        let mut map = AbbreviationMap::new();
        map.insert_if_absent("ZZ", "Zig Zag".to_string());
        map.insert_if_absent("AF", "Atrial Fibrillation".to_string());
        map.insert_if_absent("KPIs", "Key Performance Indicators".to_string());
        let keys: Vec<&str> = map.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["AF", "KPIs", "ZZ"]);
    }

    #[test]
    fn test_map_serializes_as_plain_object() {
        let mut map = AbbreviationMap::new();
        map.insert_if_absent("AF", "Atrial Fibrillation".to_string());
        let json = serde_json::to_string(&map).unwrap();
        assert_eq!(json, r#"{"AF":"Atrial Fibrillation"}"#);
        let back: AbbreviationMap = serde_json::from_str(&json).unwrap();
        assert_eq!(back, map);
    }

    #[test]
    fn test_extractor_helpers_use_rules() {
        let rules = MatchRules {
            prefixes: vec!["cardio".to_string()],
            ..MatchRules::default()
        };
        let extractor = AbbreviationExtractor::new(&rules).unwrap();
        assert!(extractor.phrase_matches(&["Cardiomyopathy"], "CM"));
        assert!(!extractor.phrase_matches(&["Intramuscular"], "IM"));
        assert_eq!(extractor.normalize("cardio unit"), "Cardio Unit");
    }
}
