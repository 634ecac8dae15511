pub mod abbreviation_detector;
pub mod discovery;
pub mod reader;
pub mod render;
pub mod report;

// Re-export main types for convenient access
pub use abbreviation_detector::{
    extract,
    AbbreviationExtractor,
    AbbreviationMap,
    MatchRules
};

// Re-export document loading and rendering entry points
pub use reader::{load_document, DocumentKind, LoadedDocument, ReaderConfig};
pub use render::{render, render_html, render_text, OutputFormat};
