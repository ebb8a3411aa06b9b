//! Flagged-term report tool
//!
//! Loads a corpus of abstracts and a term list, scans the corpus and prints
//! the resulting report, either as a human-readable summary or as JSON for a
//! presentation layer.
//!
//! ## Usage
//!
//! ```bash
//! # Text summary
//! ./target/release/flagscan --corpus abstracts.json --terms flagged_words.txt
//!
//! # Report against a reference population of 1000 from a sample of 488
//! ./target/release/flagscan --corpus abstracts.json --terms flagged_words.txt \
//!     --scale-reference 1000 --scale-sample 488
//!
//! # JSON for the charts
//! ./target/release/flagscan --corpus abstracts.json --terms flagged_words.txt --format json
//! ```
//!
//! Set `RUST_LOG=debug` to see load and scan timings.
//!
//! ## Example Output
//!
//! ```text
//! === Corpus ===
//! --------------------------------
//! 488 docs, 61 flagged, 25.61% (scaled, raw 12.50%)
//! --------------------------------
//! ```

use std::io::{self, Write};
use std::path::PathBuf;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use log::info;

use flagscan_core::loader::{load_config, load_corpus, load_terms};
use flagscan_core::{Analysis, AnalysisConfig, Scale, Scanner, TermList};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    Text,
    Json,
}

#[derive(Parser, Debug)]
#[command(name = "flagscan", about = "Scan research abstracts for flagged terms")]
struct Args {
    /// JSON corpus: object of id -> {title, abstract, theme} or array of records
    #[arg(short, long)]
    corpus: PathBuf,

    /// Term list, one term per line; `# ` starts a comment line, `#tag` is a term
    #[arg(short, long)]
    terms: PathBuf,

    /// JSON analysis configuration; flags below override it
    #[arg(long)]
    config: Option<PathBuf>,

    /// Reference population size for the scaled fraction
    #[arg(long, requires = "scale_sample")]
    scale_reference: Option<f64>,

    /// Sample size the reference population is compared against
    #[arg(long, requires = "scale_reference")]
    scale_sample: Option<f64>,

    /// Titles shown per term
    #[arg(long)]
    title_limit: Option<usize>,

    /// Keep documents with an unknown theme in the theme breakdown
    #[arg(long)]
    include_unknown: bool,

    /// Match on the calling thread only
    #[arg(long)]
    sequential: bool,

    #[arg(short, long, value_enum, default_value = "text")]
    format: Format,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let config = build_config(&args)?;

    let start = Instant::now();
    let corpus = load_corpus(&args.corpus)
        .with_context(|| format!("loading corpus {}", args.corpus.display()))?;
    let raw_terms = load_terms(&args.terms)
        .with_context(|| format!("loading terms {}", args.terms.display()))?;
    info!(
        "loaded {} documents and {} raw terms in {:?}",
        corpus.len(),
        raw_terms.len(),
        start.elapsed()
    );

    let scanner = Scanner::with_config(TermList::normalize(&raw_terms), config)?;
    let start = Instant::now();
    let analysis = scanner.scan(&corpus);
    info!("scan finished in {:?}", start.elapsed());

    let stdout = io::stdout();
    let mut out = stdout.lock();
    match args.format {
        Format::Json => {
            serde_json::to_writer_pretty(&mut out, &analysis)?;
            writeln!(out)?;
        }
        Format::Text => print_text(&mut out, &analysis, &scanner)?,
    }

    Ok(())
}

fn build_config(args: &Args) -> Result<AnalysisConfig> {
    let mut config = match &args.config {
        Some(path) => load_config(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => AnalysisConfig::default(),
    };

    if let (Some(reference), Some(sample)) = (args.scale_reference, args.scale_sample) {
        config.scale = Scale::ratio(reference, sample)?;
    }
    if let Some(limit) = args.title_limit {
        config.title_limit = limit;
    }
    if args.include_unknown {
        config.include_unknown_theme = true;
    }
    if args.sequential {
        config.parallel = false;
    }

    config.validate()?;
    Ok(config)
}

fn print_text(out: &mut impl Write, analysis: &Analysis, scanner: &Scanner) -> io::Result<()> {
    writeln!(out, "=== Corpus ===")?;
    writeln!(out, "--------------------------------")?;
    writeln!(out, "{}", analysis.stats)?;
    writeln!(out, "Terms       : {}", fmt_count(scanner.terms().len() as u64))?;
    writeln!(out, "--------------------------------\n")?;

    writeln!(out, "=== Flagged terms ===")?;
    writeln!(out, "--------------------------------")?;
    if analysis.frequencies.is_empty() {
        writeln!(out, "(no flagged terms found)")?;
    }
    for freq in &analysis.frequencies {
        writeln!(out, "{:<24} {:>6}", freq.term, fmt_count(freq.count as u64))?;
        for title in &freq.titles {
            writeln!(out, "    - {}", title)?;
        }
        if freq.is_truncated() {
            writeln!(out, "    ... {} more", freq.count - freq.titles.len())?;
        }
    }
    writeln!(out, "--------------------------------\n")?;

    writeln!(out, "=== Themes ===")?;
    writeln!(out, "--------------------------------")?;
    for theme in &analysis.themes {
        writeln!(
            out,
            "{:<24} flagged {:>5} / {:>5}",
            theme.theme,
            theme.flagged,
            theme.total()
        )?;
    }
    writeln!(out, "--------------------------------")?;

    Ok(())
}

fn fmt_count(n: u64) -> String {
    let s = n.to_string();
    let mut out = String::with_capacity(s.len() + s.len() / 3);

    for (i, ch) in s.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            out.push('_');
        }
        out.push(ch);
    }

    out.chars().rev().collect()
}
