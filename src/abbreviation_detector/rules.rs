// WHY: hand-curated word lists kept as data so domain-specific tuning needs no code change

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;
use tracing::info;

/// Function words that never contribute an initial
pub const DEFAULT_STOP_WORDS: &[&str] = &[
    "of", "for", "in", "on", "at", "by", "to", "from", "with",
    "about", "into", "over", "under", "between", "through",
    "the", "a", "an", "is", "are", "was", "were", "be", "being",
    "this", "that", "these", "those", "as", "than", "via",
];

/// Compound prefixes tried in order when splitting a word into prefix + root
pub const DEFAULT_PREFIXES: &[&str] = &[
    "auto", "multi", "micro", "macro",
    "electro", "hyper", "hypo",
    "inter", "intra",
    "ultra", "super", "sub", "trans",
];

pub const DEFAULT_LOOKBACK_CHARS: usize = 160;
pub const DEFAULT_MAX_PHRASE_WORDS: usize = 20;

/// Configuration for abbreviation matching
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchRules {
    /// Lowercase words skipped when building initials
    pub stop_words: Vec<String>,
    /// Lowercase compound prefixes; list order breaks ties
    pub prefixes: Vec<String>,
    /// Characters of text scanned before a trailing parenthetical
    pub lookback_chars: usize,
    /// Longest word sequence considered as a long form
    pub max_phrase_words: usize,
}

impl Default for MatchRules {
    fn default() -> Self {
        Self {
            stop_words: DEFAULT_STOP_WORDS.iter().map(|w| w.to_string()).collect(),
            prefixes: DEFAULT_PREFIXES.iter().map(|p| p.to_string()).collect(),
            lookback_chars: DEFAULT_LOOKBACK_CHARS,
            max_phrase_words: DEFAULT_MAX_PHRASE_WORDS,
        }
    }
}

impl MatchRules {
    /// Load rules from a JSON file; absent fields take their defaults
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read rules file {}", path.display()))?;
        let rules = Self::from_json_str(&content)
            .with_context(|| format!("Invalid rules file {}", path.display()))?;
        info!(
            "Loaded match rules from {}: {} stop words, {} prefixes",
            path.display(),
            rules.stop_words.len(),
            rules.prefixes.len()
        );
        Ok(rules)
    }

    pub fn from_json_str(content: &str) -> Result<Self> {
        let mut rules: Self = serde_json::from_str(content)?;
        // Comparisons are made against lowercased words
        for word in rules.stop_words.iter_mut().chain(rules.prefixes.iter_mut()) {
            *word = word.to_lowercase();
        }
        if rules.max_phrase_words == 0 {
            anyhow::bail!("max_phrase_words must be at least 1");
        }
        Ok(rules)
    }
}

/// Lookup form of `MatchRules` used on the hot path
#[derive(Debug, Clone)]
pub struct CompiledRules {
    stop_words: HashSet<String>,
    prefixes: Vec<String>,
    pub lookback_chars: usize,
    pub max_phrase_words: usize,
}

impl CompiledRules {
    pub fn new(rules: &MatchRules) -> Self {
        Self {
            stop_words: rules.stop_words.iter().cloned().collect(),
            prefixes: rules.prefixes.iter().filter(|p| !p.is_empty()).cloned().collect(),
            lookback_chars: rules.lookback_chars,
            max_phrase_words: rules.max_phrase_words,
        }
    }

    /// `word_lc` must already be lowercase
    pub fn is_stop_word(&self, word_lc: &str) -> bool {
        self.stop_words.contains(word_lc)
    }

    /// Stop word or one of the conjunctions kept lowercase mid-phrase
    pub fn is_lowercase_word(&self, word_lc: &str) -> bool {
        word_lc == "and" || word_lc == "or" || self.is_stop_word(word_lc)
    }

    pub fn prefixes(&self) -> &[String] {
        &self.prefixes
    }
}

impl Default for CompiledRules {
    fn default() -> Self {
        Self::new(&MatchRules::default())
    }
}
