// WHY: the four anchor patterns that locate abbreviation candidates
// Compiled once per extractor with regex-automata meta regexes

use anyhow::Result;
use regex_automata::{meta::Regex, util::captures::Captures};
use std::ops::Range;
use tracing::debug;

/// "4-digit IPC (IPC4)": group 1 = long form, group 3 = digit-suffixed abbreviation
const DIGIT_LONG_FIRST: &str = r"\b(\d+-digit\s+([A-Z]{2,}))\s*\(([A-Z]{2,}\d+)\)";

/// "IPC4 (4-digit IPC)": group 1 = abbreviation, group 2 = parenthetical
const DIGIT_SHORT_FIRST: &str = r"\b([A-Z]{2,}\d+)\s*\(([^)]+)\)";

/// "AF (Atrial Fibrillation)": group 1 = abbreviation, group 2 = parenthetical
const ABBREVIATION_FIRST: &str = r"\b([A-Z&]{2,}[sS]?)\s*\(([^)]+)\)";

/// "(AF)" or "(AF; see below)": group 1 = abbreviation opening the parenthetical
const LONG_FORM_FIRST: &str = r"\(([A-Z&]{2,}[sS]?)[^)]*\)";

/// Scan passes in priority order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AnchorPass {
    DigitLongFirst,
    DigitShortFirst,
    AbbreviationFirst,
    LongFormFirst,
}

impl AnchorPass {
    /// Earlier passes win when several resolve the same abbreviation
    pub const ALL: [AnchorPass; 4] = [
        AnchorPass::DigitLongFirst,
        AnchorPass::DigitShortFirst,
        AnchorPass::AbbreviationFirst,
        AnchorPass::LongFormFirst,
    ];

    fn pattern(self) -> &'static str {
        match self {
            AnchorPass::DigitLongFirst => DIGIT_LONG_FIRST,
            AnchorPass::DigitShortFirst => DIGIT_SHORT_FIRST,
            AnchorPass::AbbreviationFirst => ABBREVIATION_FIRST,
            AnchorPass::LongFormFirst => LONG_FORM_FIRST,
        }
    }
}

/// One pattern hit with its capture groups resolved against the haystack
#[derive(Debug)]
pub struct AnchorMatch<'h> {
    haystack: &'h str,
    caps: Captures,
}

impl<'h> AnchorMatch<'h> {
    /// Byte range of the whole match
    pub fn span(&self) -> Range<usize> {
        self.caps.get_match().map(|m| m.range()).unwrap_or(0..0)
    }

    /// Text of capture group `index`, if it participated
    pub fn group(&self, index: usize) -> Option<&'h str> {
        self.caps.get_group(index).map(|span| &self.haystack[span.start..span.end])
    }
}

/// Compiled anchor patterns, one per pass
#[derive(Debug)]
pub struct AnchorPatterns {
    digit_long_first: Regex,
    digit_short_first: Regex,
    abbreviation_first: Regex,
    long_form_first: Regex,
}

impl AnchorPatterns {
    pub fn new() -> Result<Self> {
        let compile = |pass: AnchorPass| -> Result<Regex> {
            let regex = Regex::new(pass.pattern())?;
            debug!("Compiled {:?} pattern: {}", pass, pass.pattern());
            Ok(regex)
        };

        Ok(Self {
            digit_long_first: compile(AnchorPass::DigitLongFirst)?,
            digit_short_first: compile(AnchorPass::DigitShortFirst)?,
            abbreviation_first: compile(AnchorPass::AbbreviationFirst)?,
            long_form_first: compile(AnchorPass::LongFormFirst)?,
        })
    }

    fn regex(&self, pass: AnchorPass) -> &Regex {
        match pass {
            AnchorPass::DigitLongFirst => &self.digit_long_first,
            AnchorPass::DigitShortFirst => &self.digit_short_first,
            AnchorPass::AbbreviationFirst => &self.abbreviation_first,
            AnchorPass::LongFormFirst => &self.long_form_first,
        }
    }

    /// Lazily yield non-overlapping matches of one pass, left to right
    pub fn scan<'r, 'h>(&'r self, pass: AnchorPass, text: &'h str) -> impl Iterator<Item = AnchorMatch<'h>> + 'r
    where
        'h: 'r,
    {
        self.regex(pass)
            .captures_iter(text)
            .map(move |caps| AnchorMatch { haystack: text, caps })
    }
}
