// Walkthrough of the engine over a mapping file.
// Run with: cargo run --bin cvc_demo -- --mapping mappings/synonym_to_canonical.json
use anyhow::{Context, Result};
use clap::Parser;
use crossterm::style::Stylize;
use cvc_core::report::format_percent;
use cvc_core::{vocabulary, Canonicalizer, DEFAULT_MAPPING_PATH};
use std::collections::BTreeSet;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "cvc_demo")]
#[command(about = "Demonstrate canonical vocabulary compression")]
struct Args {
    /// Path to synonym-to-canonical mapping file
    #[arg(short, long, env = "CVC_MAPPING", default_value = DEFAULT_MAPPING_PATH)]
    mapping: PathBuf,

    /// Text file for the vocabulary section (defaults to the example sentences)
    #[arg(short, long)]
    input: Option<PathBuf>,
}

const EXAMPLES: &[&str] = &[
    "The enormous building stood tall in the city.",
    "She felt elated about the excellent news.",
    "The intelligent scientist presented brilliant findings.",
    "They strolled through the gorgeous garden.",
    "The rapid changes transformed our lives significantly.",
];

const USER_INPUTS: &[&str] = &[
    "Show me enormous buildings",
    "Show me huge buildings",
    "Show me massive buildings",
    "Show me gigantic buildings",
    "Show me big buildings",
];

const CASE_EXAMPLES: &[&str] = &[
    "Enormous buildings dominate the skyline.",
    "The ENORMOUS building is huge.",
    "enormous buildings everywhere",
];

fn section(title: &str) {
    let rule = "=".repeat(60);
    println!("\n{}", rule.as_str().dark_grey());
    println!("{}", format!("{:^60}", title).bold().cyan());
    println!("{}\n", rule.as_str().dark_grey());
}

fn basic_transformation(engine: &Canonicalizer) {
    section("Basic CVC Transformation");
    for original in EXAMPLES {
        let (canonical, stats) = engine.process_text(original, true);
        println!("{}  {}", "Original: ".dim(), original);
        println!("{}  {}", "Canonical:".green(), canonical);
        println!("Replacements: {}/{}\n", stats.replacements_made, stats.total_words);
    }
}

fn inference_normalization(engine: &Canonicalizer) {
    section("Inference-Time Input Normalization");
    let mut forms = BTreeSet::new();
    for input in USER_INPUTS {
        let (canonical, _) = engine.process_text(input, true);
        println!("User types:     \"{}\"", input);
        println!("Model receives: \"{}\"\n", canonical.as_str().green());
        forms.insert(canonical);
    }
    println!("Unique canonical forms: {}", forms.len().to_string().bold());
}

fn vocabulary_analysis(engine: &Canonicalizer, input: Option<&PathBuf>) -> Result<()> {
    section("Vocabulary Reduction Analysis");
    let stats = match input {
        Some(path) => engine
            .vocabulary_stats(path)
            .with_context(|| format!("Failed to analyze {}", path.display()))?,
        None => {
            let raw = EXAMPLES.join("\n");
            let (processed, _) = engine.process_text(&raw, true);
            vocabulary::analyze(&raw, &processed)
        }
    };
    println!("Original vocabulary size:   {} unique words", stats.original_vocabulary_size);
    println!("Canonical vocabulary size:  {} unique words", stats.processed_vocabulary_size);
    println!("Vocabulary reduction:       {} words", stats.vocabulary_reduction);
    println!("Reduction rate:             {}", format_percent(stats.reduction_rate).bold());
    println!("Total words processed:      {}", stats.total_words);
    Ok(())
}

fn replacement_details(engine: &Canonicalizer) {
    section("Detailed Replacement Analysis");
    let example = "The enormous building has numerous beautiful rooms with excellent furniture.";
    let (canonical, stats) = engine.process_text(example, true);
    println!("Original text:\n  {}\n", example);
    println!("Canonical text:\n  {}\n", canonical);
    println!("Replacements made:");
    for r in &stats.replacements {
        println!("  Position {}: {} → {}", r.position, r.original.as_str().yellow(), r.canonical.as_str().green());
    }
    println!(
        "\nTotal: {} replacements out of {} words ({:.1}% replacement rate)",
        stats.replacements_made,
        stats.total_words,
        stats.replacement_rate * 100.0
    );
}

fn mapping_lookup(engine: &Canonicalizer) {
    section("Synonym Mapping Lookup");
    let table = engine.table();
    if let Some(version) = &table.metadata().version {
        println!("Mapping version {}", version);
    }
    println!(
        "{} categories, {} synonyms, {} canonical forms\n",
        table.entries().len(),
        table.len(),
        table.canonical_forms().len()
    );
    for entry in table.entries().iter().take(5) {
        println!("{}:", entry.category.as_str().bold());
        println!("  Canonical: {}", entry.canonical);
        let shown: Vec<&str> = entry.synonyms.iter().take(5).map(String::as_str).collect();
        println!("  Synonyms:  {}", shown.join(", "));
        if entry.synonyms.len() > 5 {
            println!("             ... and {} more", entry.synonyms.len() - 5);
        }
        println!();
    }
}

fn case_preservation(engine: &Canonicalizer) {
    section("Case Preservation");
    for example in CASE_EXAMPLES {
        let (canonical, _) = engine.process_text(example, true);
        println!("Original:  {}", example);
        println!("Canonical: {}\n", canonical.as_str().green());
    }
}

fn main() -> Result<()> {
    let args = Args::parse();
    let engine = Canonicalizer::from_mapping_file(&args.mapping)
        .with_context(|| format!("Could not load mapping file {}", args.mapping.display()))?;

    basic_transformation(&engine);
    inference_normalization(&engine);
    vocabulary_analysis(&engine, args.input.as_ref())?;
    replacement_details(&engine);
    mapping_lookup(&engine);
    case_preservation(&engine);

    section("Demonstration Complete");
    Ok(())
}
