// WHY: standalone normalization helpers shared by the extraction passes
// Whitespace collapsing for lookback windows and display capitalization for long forms

use super::char_class::{has_digit, is_all_upper, is_dash, is_word_char};
use super::rules::CompiledRules;

/// Collapse every whitespace run (including \r\n) into a single space and trim the ends
pub fn collapse_whitespace(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    collapse_whitespace_into(text, &mut result);
    result
}

/// Collapse whitespace into supplied buffer to avoid allocation
pub fn collapse_whitespace_into(text: &str, buffer: &mut String) {
    buffer.clear();
    buffer.reserve(text.len());

    let mut prev_was_space = false;
    for ch in text.chars() {
        if ch.is_whitespace() {
            if !prev_was_space {
                buffer.push(' ');
                prev_was_space = true;
            }
        } else {
            buffer.push(ch);
            prev_was_space = false;
        }
    }

    let trimmed = buffer.trim();
    if trimmed.len() != buffer.len() {
        let trimmed_content = trimmed.to_string();
        buffer.clear();
        buffer.push_str(&trimmed_content);
    }
}

/// Re-case a long-form phrase for display
///
/// Word count never changes. Uppercase cores are kept, stop words after the
/// first word are lowercased, everything else is title-cased per hyphen
/// segment (segments holding digits are kept as written). A trailing
/// possessive is dropped from the last word.
pub fn normalize_phrase_caps(phrase: &str, rules: &CompiledRules) -> String {
    let words: Vec<&str> = phrase.split_whitespace().collect();
    let mut result = Vec::with_capacity(words.len());

    for (i, word) in words.iter().enumerate() {
        let is_first = i == 0;
        let is_last = i + 1 == words.len();

        let Some((start, end)) = core_bounds(word) else {
            result.push(word.to_string());
            continue;
        };

        let (prefix, core, suffix) = (&word[..start], &word[start..end], &word[end..]);
        let new_core = normalize_core(core, is_first, rules);

        let mut word_final = format!("{prefix}{new_core}{suffix}");
        if is_last {
            strip_possessive(&mut word_final);
        }
        result.push(word_final);
    }

    result.join(" ")
}

/// Byte range of the word between its leading and trailing non-word runs
fn core_bounds(word: &str) -> Option<(usize, usize)> {
    let start = word.find(is_word_char)?;
    let (last_idx, last_ch) = word.char_indices().rev().find(|&(_, ch)| is_word_char(ch))?;
    Some((start, last_idx + last_ch.len_utf8()))
}

fn normalize_core(core: &str, is_first: bool, rules: &CompiledRules) -> String {
    if is_all_upper(core) {
        return core.to_string();
    }
    if has_digit(core) && !core.chars().any(is_dash) {
        return core.to_string();
    }

    let core_lower = core.to_lowercase();
    if !is_first && rules.is_lowercase_word(&core_lower) {
        return core_lower;
    }

    let mut out = String::with_capacity(core.len());
    let mut segment = String::new();
    for ch in core.chars() {
        if is_dash(ch) {
            out.push_str(&capitalize_segment(&segment));
            out.push(ch);
            segment.clear();
        } else {
            segment.push(ch);
        }
    }
    out.push_str(&capitalize_segment(&segment));
    out
}

/// First character upper, rest lower; digit-bearing segments ("4" in "4-digit") stay as written
fn capitalize_segment(segment: &str) -> String {
    if has_digit(segment) {
        return segment.to_string();
    }
    let mut chars = segment.chars();
    match chars.next() {
        Some(first) => {
            let mut out: String = first.to_uppercase().collect();
            out.push_str(&chars.as_str().to_lowercase());
            out
        }
        None => String::new(),
    }
}

/// Remove "'s" / "\u{2019}s" sitting just before the word's trailing punctuation
fn strip_possessive(word: &mut String) {
    let Some((_, end)) = core_bounds(word) else {
        return;
    };
    let body = &word[..end];
    let cut = ["'s", "\u{2019}s"]
        .iter()
        .find(|marker| body.ends_with(*marker))
        .map(|marker| end - marker.len());
    if let Some(cut) = cut {
        word.replace_range(cut..end, "");
    }
}
