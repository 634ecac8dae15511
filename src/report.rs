// WHY: Per-document and per-run statistics written by --stats-out
// Adapted from the per-file stats collected during batch processing

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tokio::io::{AsyncWriteExt, BufWriter};

/// Per-document processing statistics
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct DocumentStats {
    /// Document path as given or discovered
    pub path: String,
    /// Detected document format, if supported
    pub kind: Option<String>,
    /// Number of characters scanned
    pub chars_processed: u64,
    /// Number of abbreviation pairs found
    pub abbreviations_found: u64,
    /// Load plus extraction time in milliseconds
    pub processing_time_ms: u64,
    /// Processing status (success, empty, failed)
    pub status: String,
    /// Error message if processing failed
    pub error: Option<String>,
}

impl DocumentStats {
    pub fn success(path: &Path, kind: Option<String>, chars: u64, found: u64, elapsed_ms: u64) -> Self {
        Self {
            path: path.display().to_string(),
            kind,
            chars_processed: chars,
            abbreviations_found: found,
            processing_time_ms: elapsed_ms,
            status: if chars == 0 { "empty" } else { "success" }.to_string(),
            error: None,
        }
    }

    pub fn failed(path: &Path, error: &anyhow::Error, elapsed_ms: u64) -> Self {
        Self {
            path: path.display().to_string(),
            kind: None,
            chars_processed: 0,
            abbreviations_found: 0,
            processing_time_ms: elapsed_ms,
            status: "failed".to_string(),
            error: Some(format!("{error:#}")),
        }
    }
}

/// Aggregate statistics for one CLI run
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct RunStats {
    pub total_processing_time_ms: u64,
    pub total_chars_processed: u64,
    pub total_abbreviations_found: u64,
    pub documents_processed: u64,
    pub documents_failed: u64,
    pub document_stats: Vec<DocumentStats>,
}

impl RunStats {
    pub fn record(&mut self, stats: DocumentStats) {
        if stats.status == "failed" {
            self.documents_failed += 1;
        } else {
            self.documents_processed += 1;
        }
        self.total_chars_processed += stats.chars_processed;
        self.total_abbreviations_found += stats.abbreviations_found;
        self.document_stats.push(stats);
    }

    /// Write run statistics as pretty JSON
    pub async fn write_json(&self, path: &Path) -> Result<()> {
        let file = tokio::fs::File::create(path).await?;
        let mut writer = BufWriter::new(file);
        writer.write_all(serde_json::to_string_pretty(self)?.as_bytes()).await?;
        writer.write_all(b"\n").await?;
        writer.flush().await?;
        Ok(())
    }
}
