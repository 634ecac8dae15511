// WHY: single character classifier shared by initials building, matching and normalization
// Every "is this a letter / an uppercase word / a dash" decision goes through here

/// Hyphen and en-dash both separate compound segments
pub fn is_dash(ch: char) -> bool {
    matches!(ch, '-' | '\u{2013}')
}

pub fn is_alpha(ch: char) -> bool {
    ch.is_alphabetic()
}

/// Decimal digits only; fractions and roman numerals are not digits
pub fn is_digit(ch: char) -> bool {
    ch.is_ascii_digit()
}

/// Word characters as understood by `\w`: letters, digits and underscore
pub fn is_word_char(ch: char) -> bool {
    ch.is_alphanumeric() || ch == '_'
}

/// First alphabetic character of a string, if any
pub fn first_alpha(s: &str) -> Option<char> {
    s.chars().find(|&ch| is_alpha(ch))
}

/// Uppercase a single character, keeping the first char of multi-char mappings
pub fn upper(ch: char) -> char {
    ch.to_uppercase().next().unwrap_or(ch)
}

/// True when the string has at least one cased letter and no lowercase letters
/// WHY: "IPC4" and "R&D" count as uppercase, "4" does not
pub fn is_all_upper(s: &str) -> bool {
    let mut saw_upper = false;
    for ch in s.chars() {
        if ch.is_lowercase() {
            return false;
        }
        if ch.is_uppercase() {
            saw_upper = true;
        }
    }
    saw_upper
}

pub fn has_digit(s: &str) -> bool {
    s.chars().any(is_digit)
}

/// Boundary punctuation stripped from word tokens before any comparison
pub const BOUNDARY_PUNCTUATION: &[char] = &['.', ',', ';', ':', '(', ')', '[', ']'];

/// Strip boundary punctuation from both ends of a word token
pub fn trim_boundary(word: &str) -> &str {
    word.trim_matches(BOUNDARY_PUNCTUATION)
}

/// Characters trimmed from a whole candidate phrase
pub const PHRASE_TRIM: &[char] = &[' ', ',', '.', ';', ':'];

pub fn trim_phrase(phrase: &str) -> &str {
    phrase.trim_matches(PHRASE_TRIM)
}
