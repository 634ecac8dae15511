// WHY: four ordered scan passes over the document; earlier passes own an abbreviation
// Digit-coded forms are trusted by construction, the rest must pass the initials check

use tracing::debug;

use super::char_class::trim_phrase;
use super::initials::truncate_for_ampersand;
use super::matcher::{phrase_matches_key, AbbreviationKey};
use super::normalization::{collapse_whitespace_into, normalize_phrase_caps};
use super::patterns::{AnchorPass, AnchorPatterns};
use super::rules::CompiledRules;
use super::AbbreviationMap;

/// Punctuation that ends the sentence-like fragment leading into a parenthetical
const FRAGMENT_BREAKS: &[char] = &['.', '!', '?', ';', ':'];

/// Run every pass over `text` in priority order
pub fn extract_pairs(text: &str, patterns: &AnchorPatterns, rules: &CompiledRules) -> AbbreviationMap {
    let mut pairs = AbbreviationMap::new();

    for pass in AnchorPass::ALL {
        let before = pairs.len();
        match pass {
            AnchorPass::DigitLongFirst => digit_long_first(text, patterns, rules, &mut pairs),
            AnchorPass::DigitShortFirst => digit_short_first(text, patterns, rules, &mut pairs),
            AnchorPass::AbbreviationFirst => abbreviation_first(text, patterns, rules, &mut pairs),
            AnchorPass::LongFormFirst => long_form_first(text, patterns, rules, &mut pairs),
        }
        debug!("{:?} pass added {} pairs", pass, pairs.len() - before);
    }

    debug!("Extracted {} abbreviation pairs from {} bytes", pairs.len(), text.len());
    pairs
}

fn record(pairs: &mut AbbreviationMap, abbreviation: &str, phrase: &str, rules: &CompiledRules) {
    if phrase.is_empty() {
        return;
    }
    if pairs.insert_if_absent(abbreviation, normalize_phrase_caps(phrase, rules)) {
        debug!("Recorded {} -> {}", abbreviation, phrase);
    }
}

/// "4-digit IPC (IPC4)"
fn digit_long_first(text: &str, patterns: &AnchorPatterns, rules: &CompiledRules, pairs: &mut AbbreviationMap) {
    for hit in patterns.scan(AnchorPass::DigitLongFirst, text) {
        if let (Some(phrase), Some(abbreviation)) = (hit.group(1), hit.group(3)) {
            if !pairs.contains(abbreviation) {
                record(pairs, abbreviation, phrase, rules);
            }
        }
    }
}

/// "IPC4 (4-digit IPC)"
fn digit_short_first(text: &str, patterns: &AnchorPatterns, rules: &CompiledRules, pairs: &mut AbbreviationMap) {
    for hit in patterns.scan(AnchorPass::DigitShortFirst, text) {
        if let (Some(abbreviation), Some(content)) = (hit.group(1), hit.group(2)) {
            if !pairs.contains(abbreviation) {
                record(pairs, abbreviation, trim_phrase(content), rules);
            }
        }
    }
}

/// "AF (Atrial Fibrillation)"
fn abbreviation_first(text: &str, patterns: &AnchorPatterns, rules: &CompiledRules, pairs: &mut AbbreviationMap) {
    for hit in patterns.scan(AnchorPass::AbbreviationFirst, text) {
        let (Some(abbreviation), Some(content)) = (hit.group(1), hit.group(2)) else {
            continue;
        };
        if pairs.contains(abbreviation) {
            continue;
        }

        let phrase = trim_phrase(content);
        let words: Vec<&str> = phrase.split_whitespace().collect();
        if phrase_matches_key(&words, &AbbreviationKey::new(abbreviation), rules) {
            record(pairs, abbreviation, phrase, rules);
        }
    }
}

/// "Atrial Fibrillation (AF)": search the text before the parenthesis for a long form
fn long_form_first(text: &str, patterns: &AnchorPatterns, rules: &CompiledRules, pairs: &mut AbbreviationMap) {
    let mut window = String::new();

    for hit in patterns.scan(AnchorPass::LongFormFirst, text) {
        let Some(abbreviation) = hit.group(1) else {
            continue;
        };
        if pairs.contains(abbreviation) {
            continue;
        }

        let paren = hit.span().start;
        let window_start = lookback_start(text, paren, rules.lookback_chars);
        collapse_whitespace_into(&text[window_start..paren], &mut window);

        let fragment = window.rsplit(FRAGMENT_BREAKS).next().unwrap_or("").trim();
        if fragment.is_empty() {
            continue;
        }

        let mut words: Vec<&str> = fragment.split_whitespace().collect();
        if words.len() > rules.max_phrase_words {
            words.drain(..words.len() - rules.max_phrase_words);
        }

        let key = AbbreviationKey::new(abbreviation);
        let Some(best_words) = shortest_matching_suffix(&words, &key, rules) else {
            continue;
        };

        let mut phrase = trim_phrase(&best_words.join(" ")).to_string();
        if phrase.is_empty() {
            continue;
        }
        if key.is_two_letter_ampersand() {
            let kept = truncate_for_ampersand(best_words, &key.letters_only, rules);
            phrase = trim_phrase(&kept.join(" ")).to_string();
        }

        record(pairs, abbreviation, &phrase, rules);
    }
}

/// Try every suffix from the longest down, keeping the last one that matches
///
/// No early exit: a later (shorter) matching suffix replaces an earlier one,
/// so the result is the shortest trailing word run that satisfies the matcher.
fn shortest_matching_suffix<'w, 'a>(
    words: &'w [&'a str],
    key: &AbbreviationKey,
    rules: &CompiledRules,
) -> Option<&'w [&'a str]> {
    let mut best = None;
    for start in 0..words.len() {
        let candidate = &words[start..];
        if phrase_matches_key(candidate, key, rules) {
            best = Some(candidate);
        }
    }
    best
}

/// Byte offset where a window of at most `max_chars` characters ending at `end` begins
fn lookback_start(text: &str, end: usize, max_chars: usize) -> usize {
    if max_chars == 0 {
        return end;
    }
    text[..end]
        .char_indices()
        .rev()
        .nth(max_chars - 1)
        .map(|(idx, _)| idx)
        .unwrap_or(0)
}
