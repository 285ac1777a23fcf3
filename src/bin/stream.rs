// Line filter for inference-time normalization: stdin -> stdout.
// Each input line is canonicalized and written back immediately, so a
// caller can keep the process open and feed it one query at a time.
use anyhow::{Context, Result};
use clap::Parser;
use cvc_core::core::stats::FileTotals;
use cvc_core::report::format_percent;
use cvc_core::{Canonicalizer, DEFAULT_MAPPING_PATH};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use tracing::{debug, info, Level};
use tracing_subscriber::FmtSubscriber;

#[derive(Parser, Debug)]
#[command(name = "cvc_stream")]
#[command(about = "Canonicalize stdin line by line")]
#[command(version)]
struct Args {
    /// Path to synonym-to-canonical mapping file
    #[arg(short, long, env = "CVC_MAPPING", default_value = DEFAULT_MAPPING_PATH)]
    mapping: PathBuf,

    /// Emit canonical forms exactly as stored in the mapping
    #[arg(long)]
    no_preserve_case: bool,

    /// Log every replacement
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

    let engine = Canonicalizer::from_mapping_file(&args.mapping)
        .context("Failed to initialize CVC processor")?;
    let preserve_case = !args.no_preserve_case;

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut out = stdout.lock();
    let mut totals = FileTotals::new();

    for line in stdin.lock().lines() {
        let line = line.context("Failed to read stdin")?;
        let (processed, stats) = engine.process_text(&line, preserve_case);
        for r in &stats.replacements {
            debug!(position = r.position, original = %r.original, canonical = %r.canonical, "replaced");
        }
        totals.add_line(&stats);

        writeln!(out, "{}", processed)?;
        out.flush()?;
    }

    info!(
        lines = totals.total_lines,
        words = totals.total_words,
        replacements = totals.total_replacements,
        rate = %format_percent(totals.replacement_rate()),
        "input closed"
    );
    Ok(())
}
