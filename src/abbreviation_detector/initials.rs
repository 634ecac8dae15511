// WHY: initials construction is the only signal used to pair a phrase with an abbreviation
// Words -> per-word initial letters, with stop-word skipping, hyphen splitting and prefix splitting

use super::char_class::{first_alpha, is_dash, trim_boundary, upper};
use super::rules::CompiledRules;

/// Initials built from a word sequence
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Initials {
    /// One uppercase letter per significant word or sub-word, in word order
    pub letters: Vec<char>,
    /// Whether a literal "and" was seen while building for an ampersand abbreviation
    pub saw_and: bool,
}

impl Initials {
    pub fn as_string(&self) -> String {
        self.letters.iter().collect()
    }

    pub fn len(&self) -> usize {
        self.letters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.letters.is_empty()
    }
}

/// Build the initials sequence for `words`
///
/// "and" never contributes an initial; it only raises `saw_and` when
/// `has_ampersand` is set. Stop words are skipped. Hyphenated compounds
/// contribute one initial per segment, and with `use_prefixes` a segment
/// starting with a known prefix contributes prefix and root initials.
pub fn build_initials<S: AsRef<str>>(
    words: &[S],
    has_ampersand: bool,
    use_prefixes: bool,
    rules: &CompiledRules,
) -> Initials {
    let mut initials = Initials::default();

    for word in words {
        let word = trim_boundary(word.as_ref());
        if word.is_empty() {
            continue;
        }

        let word_lc = word.to_lowercase();
        if word_lc == "and" {
            if has_ampersand {
                initials.saw_and = true;
            }
            continue;
        }
        if rules.is_stop_word(&word_lc) {
            continue;
        }

        let spaced: String = word_lc
            .chars()
            .map(|ch| if is_dash(ch) { ' ' } else { ch })
            .collect();

        for part in spaced.split_whitespace() {
            if use_prefixes && push_prefix_initials(part, rules, &mut initials.letters) {
                continue;
            }
            if let Some(ch) = first_alpha(part) {
                initials.letters.push(upper(ch));
            }
        }
    }

    initials
}

/// First matching prefix wins; returns false when no prefix applies
fn push_prefix_initials(part: &str, rules: &CompiledRules, letters: &mut Vec<char>) -> bool {
    for prefix in rules.prefixes() {
        if part.len() > prefix.len() && part.starts_with(prefix.as_str()) {
            if let Some(ch) = prefix.chars().next() {
                letters.push(upper(ch));
            }
            if let Some(ch) = first_alpha(&part[prefix.len()..]) {
                letters.push(upper(ch));
            }
            return true;
        }
    }
    false
}

/// Shrink a matched word sequence to the shortest prefix whose significant
/// words start with the two target letters in order
///
/// Stop words, "and" and punctuation-only tokens pass through without
/// consuming a letter. Scanning stops at the first mismatch.
pub fn truncate_for_ampersand<'a>(
    words: &[&'a str],
    target_letters: &str,
    rules: &CompiledRules,
) -> Vec<&'a str> {
    let target: Vec<char> = target_letters.chars().map(upper).collect();
    let mut result = Vec::with_capacity(words.len());
    let mut collected = 0usize;

    for &word in words {
        let core = trim_boundary(word);
        if core.is_empty() {
            result.push(word);
            continue;
        }

        let core_lc = core.to_lowercase();
        if core_lc == "and" || rules.is_stop_word(&core_lc) {
            result.push(word);
            continue;
        }

        let Some(first) = first_alpha(core) else {
            result.push(word);
            continue;
        };

        if collected < target.len() && upper(first) == target[collected] {
            result.push(word);
            collected += 1;
            if collected == target.len() {
                break;
            }
        } else {
            break;
        }
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    fn initials(words: &[&str], has_ampersand: bool, use_prefixes: bool) -> (String, bool) {
        let built = build_initials(words, has_ampersand, use_prefixes, &CompiledRules::default());
        (built.as_string(), built.saw_and)
    }

    #[test]
    fn test_basic_initials_skip_stop_words() {
        assert_eq!(initials(&["Atrial", "Fibrillation"], false, false), ("AF".to_string(), false));
        assert_eq!(
            initials(&["Department", "of", "the", "Interior"], false, false),
            ("DI".to_string(), false)
        );
    }

    #[test]
    fn test_and_only_flags_for_ampersand() {
        assert_eq!(initials(&["Research", "and", "Development"], true, false), ("RD".to_string(), true));
        assert_eq!(initials(&["Research", "and", "Development"], false, false), ("RD".to_string(), false));
        assert_eq!(initials(&["Research", "AND", "Development"], true, false), ("RD".to_string(), true));
    }

    #[test]
    fn test_hyphen_and_en_dash_split_compounds() {
        assert_eq!(initials(&["Non-Small", "Cell"], false, false).0, "NSC");
        assert_eq!(initials(&["state\u{2013}of\u{2013}art"], false, false).0, "SOA");
        // digit-only segments contribute nothing
        assert_eq!(initials(&["4-digit", "IPC"], false, false).0, "DI");
    }

    #[test]
    fn test_boundary_punctuation_dropped() {
        assert_eq!(initials(&["(Atrial", "Fibrillation),", "..."], false, false).0, "AF");
    }

    #[test]
    fn test_prefix_splitting() {
        assert_eq!(initials(&["Intramuscular"], false, false).0, "I");
        assert_eq!(initials(&["Intramuscular"], false, true).0, "IM");
        assert_eq!(initials(&["Electrocardiogram"], false, true).0, "EC");
        // prefix must be strictly shorter than the word
        assert_eq!(initials(&["auto"], false, true).0, "A");
        assert_eq!(initials(&["hypotension"], false, true).0, "HT");
        assert_eq!(initials(&["Trans-Atlantic", "Subnet"], false, true).0, "TASN");
    }

    #[test]
    fn test_prefix_without_alpha_root() {
        assert_eq!(initials(&["multi123"], false, true).0, "M");
    }

    #[test]
    fn test_truncate_for_ampersand_stops_after_targets() {
        let rules = CompiledRules::default();
        let words = ["Research", "and", "Development", "Department"];
        assert_eq!(
            truncate_for_ampersand(&words, "RD", &rules),
            vec!["Research", "and", "Development"]
        );
    }

    #[test]
    fn test_truncate_for_ampersand_stops_on_mismatch() {
        let rules = CompiledRules::default();
        let words = ["Rapid", "Testing", "and", "Delivery"];
        assert_eq!(truncate_for_ampersand(&words, "RD", &rules), vec!["Rapid"]);
    }

    #[test]
    fn test_truncate_for_ampersand_passes_function_words() {
        let rules = CompiledRules::default();
        let words = ["the", "research", "and", "the", "development", "office"];
        assert_eq!(
            truncate_for_ampersand(&words, "RD", &rules),
            vec!["the", "research", "and", "the", "development"]
        );
    }
}
