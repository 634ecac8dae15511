use anyhow::{Context, Result};
use quick_xml::events::Event;
use quick_xml::Reader;
use std::io::{Cursor, Read};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Configuration for document loading behavior
#[derive(Debug, Clone)]
pub struct ReaderConfig {
    /// Whether to fail fast on first error or continue processing
    pub fail_fast: bool,
    /// Documents larger than this are rejected before decoding
    pub max_bytes: u64,
}

impl Default for ReaderConfig {
    fn default() -> Self {
        Self {
            fail_fast: false,
            max_bytes: 64 * 1024 * 1024,
        }
    }
}

/// Supported document formats, detected from the file extension
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentKind {
    Text,
    Html,
    Docx,
    Pdf,
}

impl DocumentKind {
    pub fn from_path(path: &Path) -> Option<Self> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        match ext.as_str() {
            "txt" => Some(Self::Text),
            "html" | "htm" => Some(Self::Html),
            "docx" => Some(Self::Docx),
            "pdf" => Some(Self::Pdf),
            _ => None,
        }
    }

    pub fn is_supported(path: &Path) -> bool {
        Self::from_path(path).is_some()
    }
}

/// A document decoded to plain text
#[derive(Debug, Clone)]
pub struct LoadedDocument {
    pub path: PathBuf,
    /// `None` for unsupported extensions, which yield empty text
    pub kind: Option<DocumentKind>,
    pub text: String,
    pub bytes_read: u64,
}

impl LoadedDocument {
    /// True when there is nothing but whitespace to scan
    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }
}

/// Load a document and decode it to plain text
///
/// Unsupported extensions produce empty text with a warning. Unreadable or
/// corrupt files are errors; partial text is never returned.
pub async fn load_document<P: AsRef<Path>>(path: P, config: &ReaderConfig) -> Result<LoadedDocument> {
    let path = path.as_ref();
    let start_time = std::time::Instant::now();

    let Some(kind) = DocumentKind::from_path(path) else {
        warn!("Unsupported document type, no text extracted: {}", path.display());
        return Ok(LoadedDocument {
            path: path.to_path_buf(),
            kind: None,
            text: String::new(),
            bytes_read: 0,
        });
    };

    debug!("Starting {:?} read of file: {}", kind, path.display());

    let metadata = tokio::fs::metadata(path)
        .await
        .with_context(|| format!("Failed to open file {}", path.display()))?;
    if metadata.len() > config.max_bytes {
        anyhow::bail!(
            "File too large: {} ({} bytes, limit {} bytes)",
            path.display(),
            metadata.len(),
            config.max_bytes
        );
    }

    let bytes = tokio::fs::read(path)
        .await
        .with_context(|| format!("Failed to read file {}", path.display()))?;
    let bytes_read = bytes.len() as u64;

    let text = match kind {
        DocumentKind::Text => decode_text(&bytes),
        DocumentKind::Html => html_visible_text(&decode_text(&bytes))
            .with_context(|| format!("Failed to parse HTML {}", path.display()))?,
        DocumentKind::Docx => tokio::task::spawn_blocking(move || docx_text(&bytes))
            .await?
            .with_context(|| format!("Failed to extract Word text from {}", path.display()))?,
        DocumentKind::Pdf => tokio::task::spawn_blocking(move || pdf_text(&bytes))
            .await?
            .with_context(|| format!("Failed to extract PDF text from {}", path.display()))?,
    };

    info!(
        "Loaded {}: {} bytes -> {} chars in {}ms",
        path.display(),
        bytes_read,
        text.chars().count(),
        start_time.elapsed().as_millis()
    );

    Ok(LoadedDocument {
        path: path.to_path_buf(),
        kind: Some(kind),
        text,
        bytes_read,
    })
}

/// Decode bytes as UTF-8, dropping invalid sequences
pub fn decode_text(bytes: &[u8]) -> String {
    match std::str::from_utf8(bytes) {
        Ok(text) => text.to_string(),
        Err(_) => {
            let mut text = String::with_capacity(bytes.len());
            for chunk in bytes.utf8_chunks() {
                text.push_str(chunk.valid());
            }
            text
        }
    }
}

/// Elements whose raw content is never visible; removed before tokenizing
const RAW_TEXT_ELEMENTS: &[&str] = &["script", "style", "title", "noscript", "template"];

/// Visible text of an HTML document, one text node per line
pub fn html_visible_text(html: &str) -> Result<String> {
    let prepared = strip_raw_html(html);
    let mut reader = Reader::from_str(&prepared);
    let config = reader.config_mut();
    config.check_end_names = false;
    config.allow_unmatched_ends = true;
    config.check_comments = false;
    config.allow_dangling_amp = true;

    let mut pieces: Vec<String> = Vec::new();
    let mut current = String::new();

    loop {
        match reader.read_event() {
            Ok(Event::Start(_)) | Ok(Event::End(_)) | Ok(Event::Empty(_)) => {
                flush_piece(&mut current, &mut pieces);
            }
            Ok(Event::Text(e)) => current.push_str(&e.decode()?),
            Ok(Event::CData(e)) => current.push_str(&e.decode()?),
            Ok(Event::GeneralRef(e)) => push_entity(&mut current, &e.decode()?),
            Ok(Event::Eof) => break,
            Err(e) => {
                anyhow::bail!("HTML syntax error at position {}: {}", reader.buffer_position(), e);
            }
            _ => {}
        }
    }
    flush_piece(&mut current, &mut pieces);

    Ok(pieces.join("\n"))
}

/// Rewrite HTML into something the XML tokenizer can walk
///
/// Comments and raw-text elements are dropped by scanning the raw bytes for
/// their terminators, so markup-like content inside a script never reaches
/// the tokenizer. A `<` that cannot open a tag, or whose tag never closes,
/// is escaped and stays text.
fn strip_raw_html(html: &str) -> String {
    let bytes = html.as_bytes();
    let mut out = String::with_capacity(html.len());
    let mut pos = 0;

    while let Some(offset) = html[pos..].find('<') {
        let lt = pos + offset;
        out.push_str(&html[pos..lt]);

        if html[lt..].starts_with("<!--") {
            pos = match html[lt + 4..].find("-->") {
                Some(end) => lt + 4 + end + 3,
                None => html.len(),
            };
            continue;
        }

        let tag_end = if opens_markup(bytes, lt) { find_tag_end(bytes, lt + 1) } else { None };
        let Some(tag_end) = tag_end else {
            out.push_str("&lt;");
            pos = lt + 1;
            continue;
        };

        let tag = &html[lt..=tag_end];
        pos = tag_end + 1;
        match raw_text_element(tag) {
            Some(name) => {
                pos = skip_raw_text(html, pos, name);
                out.push('\n');
            }
            None => out.push_str(tag),
        }
    }
    out.push_str(&html[pos..]);
    out
}

fn opens_markup(bytes: &[u8], lt: usize) -> bool {
    match bytes.get(lt + 1).copied() {
        Some(b'/') => bytes.get(lt + 2).is_some_and(u8::is_ascii_alphabetic),
        Some(b'!') | Some(b'?') => true,
        Some(b) => b.is_ascii_alphabetic(),
        None => false,
    }
}

/// Index of the `>` closing the tag, ignoring any inside quoted attribute values
fn find_tag_end(bytes: &[u8], from: usize) -> Option<usize> {
    let mut quote: Option<u8> = None;
    let mut last = 0u8;
    for (i, &b) in bytes.iter().enumerate().skip(from) {
        match quote {
            Some(q) => {
                if b == q {
                    quote = None;
                    last = b;
                }
            }
            None if b == b'>' => return Some(i),
            None if (b == b'"' || b == b'\'') && last == b'=' => quote = Some(b),
            None if !b.is_ascii_whitespace() => last = b,
            None => {}
        }
    }
    None
}

/// Name of the raw-text element opened by `tag`; self-closing tags open nothing
fn raw_text_element(tag: &str) -> Option<&'static str> {
    if tag.ends_with("/>") {
        return None;
    }
    let name_len = tag[1..]
        .bytes()
        .take_while(|b| b.is_ascii_alphanumeric())
        .count();
    let name = &tag[1..1 + name_len];
    RAW_TEXT_ELEMENTS
        .iter()
        .copied()
        .find(|element| element.eq_ignore_ascii_case(name))
}

/// Offset just past `</name ...>`, matched case-insensitively; unterminated content runs to the end
fn skip_raw_text(html: &str, from: usize, name: &str) -> usize {
    let bytes = html.as_bytes();
    let mut search = from;
    while let Some(offset) = html[search..].find("</") {
        let start = search + offset;
        let name_end = start + 2 + name.len();
        let name_matches = bytes
            .get(start + 2..name_end)
            .is_some_and(|candidate| candidate.eq_ignore_ascii_case(name.as_bytes()));
        if name_matches && !bytes.get(name_end).is_some_and(u8::is_ascii_alphanumeric) {
            return match html[name_end..].find('>') {
                Some(gt) => name_end + gt + 1,
                None => html.len(),
            };
        }
        search = start + 2;
    }
    html.len()
}

fn flush_piece(current: &mut String, pieces: &mut Vec<String>) {
    if !current.trim().is_empty() {
        pieces.push(current.clone());
    }
    current.clear();
}

/// Resolve `&name;` / `&#NN;` references; unknown names are kept verbatim
fn push_entity(out: &mut String, name: &str) {
    if let Some(resolved) = quick_xml::escape::resolve_predefined_entity(name) {
        out.push_str(resolved);
        return;
    }
    let code = if let Some(hex) = name.strip_prefix("#x").or_else(|| name.strip_prefix("#X")) {
        u32::from_str_radix(hex, 16).ok()
    } else if let Some(dec) = name.strip_prefix('#') {
        dec.parse::<u32>().ok()
    } else {
        match name {
            "nbsp" => Some(0xA0),
            "ndash" => Some(0x2013),
            "mdash" => Some(0x2014),
            "rsquo" => Some(0x2019),
            "lsquo" => Some(0x2018),
            "rdquo" => Some(0x201D),
            "ldquo" => Some(0x201C),
            _ => None,
        }
    };
    match code.and_then(char::from_u32) {
        Some(ch) => out.push(ch),
        None => {
            out.push('&');
            out.push_str(name);
            out.push(';');
        }
    }
}

/// Text of `word/document.xml` inside a .docx container
pub fn docx_text(bytes: &[u8]) -> Result<String> {
    let mut archive = zip::ZipArchive::new(Cursor::new(bytes)).context("Not a valid .docx (zip) container")?;
    let mut xml = String::new();
    archive
        .by_name("word/document.xml")
        .context("Missing word/document.xml")?
        .read_to_string(&mut xml)
        .context("Failed to read word/document.xml")?;

    let mut reader = Reader::from_str(&xml);
    let mut text = String::new();
    let mut in_text_run = false;

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) if e.name().as_ref() == b"w:t" => in_text_run = true,
            Ok(Event::End(e)) => match e.name().as_ref() {
                b"w:t" => in_text_run = false,
                b"w:p" => text.push('\n'),
                _ => {}
            },
            Ok(Event::Empty(e)) => match e.name().as_ref() {
                b"w:tab" => text.push('\t'),
                b"w:br" | b"w:cr" => text.push('\n'),
                b"w:p" => text.push('\n'),
                _ => {}
            },
            Ok(Event::Text(e)) if in_text_run => text.push_str(&e.decode()?),
            Ok(Event::GeneralRef(e)) if in_text_run => push_entity(&mut text, &e.decode()?),
            Ok(Event::Eof) => break,
            Err(e) => {
                anyhow::bail!("Malformed document.xml at position {}: {}", reader.buffer_position(), e);
            }
            _ => {}
        }
    }

    Ok(text)
}

/// Text of every PDF page, pages separated by newlines
pub fn pdf_text(bytes: &[u8]) -> Result<String> {
    let text = pdf_extract::extract_text_from_mem(bytes)?;
    Ok(text)
}
