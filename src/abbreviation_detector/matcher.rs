// WHY: decides whether a word sequence is a plausible long form of an abbreviation token

use super::char_class::{is_alpha, upper};
use super::initials::build_initials;
use super::rules::CompiledRules;

/// Abbreviation token reduced to the forms used for matching
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AbbreviationKey {
    /// Letters only, uppercased: "IPC4" -> "IPC", "R&D" -> "RD"
    pub letters_only: String,
    /// Accepted initials strings: the letters-only form plus its singular
    pub candidates: Vec<String>,
    pub has_ampersand: bool,
}

impl AbbreviationKey {
    pub fn new(token: &str) -> Self {
        let letters_only: String = token.chars().filter(|&ch| is_alpha(ch)).map(upper).collect();

        let mut candidates = vec![letters_only.clone()];
        // Plural abbreviations ("KPIs") may match singular phrase initials
        if letters_only.chars().count() >= 3 && letters_only.ends_with('S') {
            candidates.push(letters_only[..letters_only.len() - 1].to_string());
        }

        Self {
            letters_only,
            candidates,
            has_ampersand: token.contains('&'),
        }
    }

    /// Two letters joined by an ampersand, e.g. "R&D"
    pub fn is_two_letter_ampersand(&self) -> bool {
        self.has_ampersand && self.letters_only.chars().count() == 2
    }

    fn accepts(&self, initials: &str, saw_and: bool) -> bool {
        if self.candidates.iter().any(|c| c == initials) && (!self.has_ampersand || saw_and) {
            return true;
        }

        // "Research and Development Department (R&D)": extra trailing initials allowed
        self.is_two_letter_ampersand()
            && saw_and
            && initials.starts_with(self.letters_only.as_str())
            && initials.len() > self.letters_only.len()
    }
}

/// Whether `words` can reasonably be the long form of `abbreviation`
pub fn phrase_matches<S: AsRef<str>>(words: &[S], abbreviation: &str, rules: &CompiledRules) -> bool {
    phrase_matches_key(words, &AbbreviationKey::new(abbreviation), rules)
}

/// Same as `phrase_matches` with the key already computed
pub fn phrase_matches_key<S: AsRef<str>>(words: &[S], key: &AbbreviationKey, rules: &CompiledRules) -> bool {
    if key.letters_only.is_empty() {
        return false;
    }

    let plain = build_initials(words, key.has_ampersand, false, rules);
    if key.accepts(&plain.as_string(), plain.saw_and) {
        return true;
    }

    // Prefix splitting only adds initials, so it cannot help once we have enough
    if plain.len() >= key.letters_only.chars().count() {
        return false;
    }

    let split = build_initials(words, key.has_ampersand, true, rules);
    key.accepts(&split.as_string(), split.saw_and)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn matches(phrase: &str, abbreviation: &str) -> bool {
        let words: Vec<&str> = phrase.split_whitespace().collect();
        phrase_matches(&words, abbreviation, &CompiledRules::default())
    }

    #[test]
    fn test_key_forms() {
        let key = AbbreviationKey::new("IPC4");
        assert_eq!(key.letters_only, "IPC");
        assert_eq!(key.candidates, vec!["IPC".to_string()]);
        assert!(!key.has_ampersand);

        let key = AbbreviationKey::new("KPIs");
        assert_eq!(key.letters_only, "KPIS");
        assert_eq!(key.candidates, vec!["KPIS".to_string(), "KPI".to_string()]);

        let key = AbbreviationKey::new("R&D");
        assert_eq!(key.letters_only, "RD");
        assert!(key.is_two_letter_ampersand());

        // two-letter forms never drop the trailing S
        assert_eq!(AbbreviationKey::new("OS").candidates, vec!["OS".to_string()]);
    }

    #[test]
    fn test_simple_matches() {
        assert!(matches("Atrial Fibrillation", "AF"));
        assert!(matches("Key Performance Indicators", "KPIs"));
        assert!(matches("Department of the Interior", "DI"));
        assert!(!matches("Atrial Flutter Episode", "AF"));
        assert!(!matches("", "AF"));
    }

    #[test]
    fn test_ampersand_requires_and() {
        assert!(matches("Research and Development", "R&D"));
        assert!(!matches("Research Development", "R&D"));
        // extra trailing initials tolerated for two-letter ampersand forms
        assert!(matches("Research and Development Department", "R&D"));
        assert!(!matches("Research Development Department", "R&D"));
    }

    #[test]
    fn test_prefix_fallback() {
        assert!(matches("Intramuscular", "IM"));
        assert!(matches("Electrocardiogram", "EC"));
        assert!(!matches("Electrocardiogram", "ECG"));
        assert!(matches("Intramuscular Injection", "IMI"));
        // enough plain initials already: prefix splitting is not attempted
        assert!(!matches("Intramuscular Injection Site", "IMI"));
    }

    #[test]
    fn test_empty_letters_never_match() {
        assert!(!matches("rock and", "&&"));
    }
}
