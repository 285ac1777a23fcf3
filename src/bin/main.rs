//! cvc - apply canonical vocabulary compression to a text file.
//!
//! Stdout carries the `Label: value` report that wrapper scripts parse;
//! logs go to stderr.

use anyhow::{Context, Result};
use clap::Parser;
use cvc_core::persistence::{load_mapping, load_mapping_cached};
use cvc_core::report::{self, JsonReport};
use cvc_core::{BatchOptions, Canonicalizer, FileProcessor, DEFAULT_MAPPING_PATH, VERSION};
use std::io::{self, Write};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{debug, warn, Level};
use tracing_subscriber::FmtSubscriber;

#[derive(Parser, Debug)]
#[command(name = "cvc")]
#[command(about = "Canonical Vocabulary Compression (CVC) CLI Tool")]
#[command(version)]
struct Args {
    /// Path to synonym-to-canonical mapping file
    #[arg(short, long, env = "CVC_MAPPING", default_value = DEFAULT_MAPPING_PATH)]
    mapping: PathBuf,

    /// Input text file to process
    #[arg(short, long)]
    input: PathBuf,

    /// Output file for processed text
    #[arg(short, long)]
    output: PathBuf,

    /// Print vocabulary statistics
    #[arg(long)]
    stats: bool,

    /// Preserve original capitalization (the default)
    #[arg(long, overrides_with = "no_preserve_case")]
    preserve_case: bool,

    /// Emit canonical forms exactly as stored in the mapping
    #[arg(long, overrides_with = "preserve_case")]
    no_preserve_case: bool,

    /// Canonicalize lines in parallel
    #[arg(long)]
    parallel: bool,

    /// Also write the statistics as JSON to this path
    #[arg(long)]
    json_report: Option<PathBuf>,

    /// Compiled mapping snapshot, reused while newer than the mapping file
    #[arg(long)]
    snapshot: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn setup_logging(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::INFO };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_writer(io::stderr)
        .compact()
        .finish();
    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Warning: logging unavailable: {}", e);
    }
}

fn main() -> Result<()> {
    let args = Args::parse();
    setup_logging(args.verbose);
    debug!("cvc v{}", VERSION);

    let table = match &args.snapshot {
        Some(snapshot) => load_mapping_cached(&args.mapping, snapshot),
        None => load_mapping(&args.mapping),
    }
    .context("Failed to initialize CVC processor")?;

    let options = BatchOptions {
        preserve_case: args.preserve_case || !args.no_preserve_case,
        parallel: args.parallel,
    };
    let processor = FileProcessor::new(Canonicalizer::new(Arc::new(table)), options);

    let stdout = io::stdout();
    let mut out = stdout.lock();

    writeln!(out, "Processing {}...", args.input.display())?;
    let file_stats = processor
        .process_file(&args.input, &args.output)
        .context("Failed to process file")?;

    writeln!(out, "\nProcessing complete!")?;
    report::write_file_report(&mut out, &file_stats)?;

    let mut vocabulary = None;
    if args.stats {
        writeln!(out, "\nVocabulary Statistics:")?;
        match processor.canonicalizer().vocabulary_stats(&args.input) {
            Ok(vocab_stats) => {
                report::write_vocabulary_report(&mut out, &vocab_stats)?;
                vocabulary = Some(vocab_stats);
            }
            Err(e) => warn!("Failed to compute vocabulary statistics: {}", e),
        }
    }
    out.flush()?;

    if let Some(path) = &args.json_report {
        let json = JsonReport {
            file: file_stats,
            vocabulary,
        };
        report::write_json_report(path, &json)
            .with_context(|| format!("Failed to write JSON report {}", path.display()))?;
    }

    Ok(())
}
