// WHY: display adapters for an extracted abbreviation map
// Every renderer lists keys alphabetically and has a distinct "none found" form

use anyhow::Result;
use clap::ValueEnum;

use crate::abbreviation_detector::AbbreviationMap;

pub const NONE_FOUND: &str = "No abbreviations were found in the document.";

/// Output formats offered by the CLI
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Html,
    Json,
}

/// Render `pairs` in the requested format
pub fn render(pairs: &AbbreviationMap, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Text => Ok(render_text(pairs)),
        OutputFormat::Html => Ok(render_html(pairs)),
        OutputFormat::Json => render_json(pairs),
    }
}

/// One "ABBR: Long Form" line per pair
pub fn render_text(pairs: &AbbreviationMap) -> String {
    if pairs.is_empty() {
        return NONE_FOUND.to_string();
    }
    pairs
        .iter()
        .map(|(abbreviation, long_form)| format!("{}: {}", abbreviation, long_form.trim()))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Unordered HTML list with each abbreviation highlighted
pub fn render_html(pairs: &AbbreviationMap) -> String {
    if pairs.is_empty() {
        return format!("<p>{NONE_FOUND}</p>");
    }

    let items: Vec<String> = pairs
        .iter()
        .map(|(abbreviation, long_form)| {
            format!(
                "<li><span style='color: blue; font-weight: bold;'>{}</span>: {}</li>",
                escape_html(abbreviation),
                escape_html(long_form.trim())
            )
        })
        .collect();

    format!("<ul>\n{}\n</ul>", items.join("\n"))
}

/// Pretty JSON object keyed by abbreviation
pub fn render_json(pairs: &AbbreviationMap) -> Result<String> {
    Ok(serde_json::to_string_pretty(pairs)?)
}

fn escape_html(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> AbbreviationMap {
        let mut pairs = AbbreviationMap::new();
        pairs.insert_if_absent("R&D", "Research and Development".to_string());
        pairs.insert_if_absent("AF", "Atrial Fibrillation".to_string());
        pairs
    }

    #[test]
    fn test_text_rendering_sorted() {
        assert_eq!(render_text(&sample()), "AF: Atrial Fibrillation\nR&D: Research and Development");
        assert_eq!(render_text(&AbbreviationMap::new()), NONE_FOUND);
    }

    #[test]
    fn test_html_rendering_escapes_and_highlights() {
        let html = render_html(&sample());
        assert!(html.starts_with("<ul>\n<li><span style='color: blue; font-weight: bold;'>AF</span>"));
        assert!(html.contains(">R&amp;D</span>: Research and Development</li>"));
        assert!(html.ends_with("\n</ul>"));
        assert_eq!(
            render_html(&AbbreviationMap::new()),
            "<p>No abbreviations were found in the document.</p>"
        );
    }

    #[test]
    fn test_json_rendering() {
        let json = render(&sample(), OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["AF"], "Atrial Fibrillation");
        assert_eq!(value["R&D"], "Research and Development");
        assert_eq!(render_json(&AbbreviationMap::new()).unwrap(), "{}");
    }
}
