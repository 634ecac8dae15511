use anyhow::Result;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};
use walkdir::WalkDir;

use crate::reader::DocumentKind;

/// Configuration for document discovery behavior
#[derive(Debug, Clone, Default)]
pub struct DiscoveryConfig {
    /// Whether to fail fast on first error or continue processing
    pub fail_fast: bool,
}

/// Expand command-line paths into a list of documents to scan
///
/// Files are taken as given, whatever their extension. Directories are walked
/// recursively and only files with a supported extension are collected, in
/// sorted order per directory argument.
pub async fn discover_documents(paths: &[PathBuf], config: DiscoveryConfig) -> Result<Vec<PathBuf>> {
    let paths = paths.to_vec();
    tokio::task::spawn_blocking(move || discover_documents_blocking(&paths, &config)).await?
}

fn discover_documents_blocking(paths: &[PathBuf], config: &DiscoveryConfig) -> Result<Vec<PathBuf>> {
    let mut documents = Vec::new();

    for path in paths {
        if path.is_file() {
            debug!("Using document: {}", path.display());
            documents.push(path.clone());
        } else if path.is_dir() {
            let found = walk_directory(path, config)?;
            info!("Found {} documents under {}", found.len(), path.display());
            documents.extend(found);
        } else {
            let error_msg = format!("Path does not exist: {}", path.display());
            if config.fail_fast {
                anyhow::bail!(error_msg);
            }
            warn!("{}", error_msg);
        }
    }

    Ok(documents)
}

fn walk_directory(root: &Path, config: &DiscoveryConfig) -> Result<Vec<PathBuf>> {
    let mut found = Vec::new();

    for entry in WalkDir::new(root).follow_links(false).sort_by_file_name() {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                if config.fail_fast {
                    return Err(e.into());
                }
                warn!("Skipping unreadable entry under {}: {}", root.display(), e);
                continue;
            }
        };

        if entry.file_type().is_file() && DocumentKind::is_supported(entry.path()) {
            debug!("Found matching file: {}", entry.path().display());
            found.push(entry.into_path());
        }
    }

    Ok(found)
}
