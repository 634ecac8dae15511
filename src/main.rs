use abbrex::discovery::{self, DiscoveryConfig};
use abbrex::reader::{self, ReaderConfig};
use abbrex::render::{self, OutputFormat};
use abbrex::report::{DocumentStats, RunStats};
use abbrex::{AbbreviationExtractor, AbbreviationMap, MatchRules};
use anyhow::Result;
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;
use std::path::PathBuf;
use std::time::Instant;
use tracing::{info, warn, Level};

const NO_TEXT_NOTICE: &str =
    "No document was given or no readable text was found, so abbreviations cannot be extracted.";

#[derive(Parser, Debug)]
#[command(name = "abbrex")]
#[command(about = "Extract abbreviation and long-form pairs from text, HTML, Word and PDF documents")]
#[command(version)]
struct Args {
    /// Documents or directories to scan (.txt, .html, .htm, .docx, .pdf)
    #[arg(required = true)]
    paths: Vec<PathBuf>,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// JSON file overriding stop words, prefixes and window limits
    #[arg(long)]
    rules: Option<PathBuf>,

    /// Abort on first error
    #[arg(long)]
    fail_fast: bool,

    /// Suppress console progress bar
    #[arg(long)]
    no_progress: bool,

    /// Write run statistics as JSON to this path
    #[arg(long)]
    stats_out: Option<PathBuf>,

    /// Only log warnings and errors
    #[arg(long)]
    quiet: bool,
}

/// One entry of the JSON output array
#[derive(Serialize)]
struct DocumentResult {
    path: String,
    abbreviations: AbbreviationMap,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // stdout carries the rendered results, logs go to stderr
    tracing_subscriber::fmt()
        .with_target(false)
        .with_writer(std::io::stderr)
        .with_max_level(if args.quiet { Level::WARN } else { Level::INFO })
        .json()
        .init();

    info!(?args, "Parsed CLI arguments");

    let rules = match &args.rules {
        Some(path) => MatchRules::from_json_file(path)?,
        None => MatchRules::default(),
    };
    let extractor = AbbreviationExtractor::new(&rules)?;

    let discovery_config = DiscoveryConfig {
        fail_fast: args.fail_fast,
    };
    let documents = discovery::discover_documents(&args.paths, discovery_config).await?;
    if documents.is_empty() {
        anyhow::bail!("No supported documents found in the given paths");
    }
    info!("Processing {} documents", documents.len());

    let reader_config = ReaderConfig {
        fail_fast: args.fail_fast,
        ..ReaderConfig::default()
    };

    let progress = if documents.len() > 1 && !args.no_progress {
        let bar = ProgressBar::new(documents.len() as u64);
        bar.set_style(
            ProgressStyle::with_template("{bar:40} {pos}/{len} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_bar()),
        );
        bar
    } else {
        ProgressBar::hidden()
    };

    let run_start = Instant::now();
    let mut run_stats = RunStats::default();
    let mut json_results = Vec::new();
    let show_headers = documents.len() > 1;

    for path in &documents {
        progress.set_message(path.display().to_string());
        let start = Instant::now();

        let document = match reader::load_document(path, &reader_config).await {
            Ok(document) => document,
            Err(e) => {
                if reader_config.fail_fast {
                    progress.abandon();
                    return Err(e);
                }
                warn!("Failed to load {}: {:#}", path.display(), e);
                run_stats.record(DocumentStats::failed(path, &e, start.elapsed().as_millis() as u64));
                progress.inc(1);
                continue;
            }
        };

        let pairs = if document.is_blank() {
            AbbreviationMap::new()
        } else {
            extractor.extract(&document.text)
        };
        info!("Found {} abbreviations in {}", pairs.len(), path.display());

        run_stats.record(DocumentStats::success(
            path,
            document.kind.map(|kind| format!("{kind:?}").to_lowercase()),
            document.text.chars().count() as u64,
            pairs.len() as u64,
            start.elapsed().as_millis() as u64,
        ));

        if args.format == OutputFormat::Json {
            json_results.push(DocumentResult {
                path: path.display().to_string(),
                abbreviations: pairs,
            });
        } else {
            let body = if document.is_blank() {
                NO_TEXT_NOTICE.to_string()
            } else {
                render::render(&pairs, args.format)?
            };
            progress.suspend(|| {
                if show_headers {
                    println!("== {} ==", path.display());
                }
                println!("{body}");
            });
        }

        progress.inc(1);
    }
    progress.finish_and_clear();

    if args.format == OutputFormat::Json {
        println!("{}", serde_json::to_string_pretty(&json_results)?);
    }

    run_stats.total_processing_time_ms = run_start.elapsed().as_millis() as u64;
    info!(
        "Run complete: {} processed, {} failed, {} abbreviations",
        run_stats.documents_processed, run_stats.documents_failed, run_stats.total_abbreviations_found
    );

    if let Some(stats_path) = &args.stats_out {
        run_stats.write_json(stats_path).await?;
        info!("Wrote run statistics to {}", stats_path.display());
    }

    if run_stats.documents_failed > 0 {
        anyhow::bail!(
            "{} of {} documents could not be read",
            run_stats.documents_failed,
            documents.len()
        );
    }

    Ok(())
}
