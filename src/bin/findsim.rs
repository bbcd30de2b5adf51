//! findsim CLI
//!
//! Prints the words closest to a query word, one space-separated line on stdout.
//! Diagnostics go to stderr.

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use findsim::{format_for_printing, DuplicatePolicy, Lexicon, LexiconConfig, DEFAULT_TOP_K};
use tracing::debug;
use tracing_subscriber::{fmt, EnvFilter};

/// findsim - Determine most similar words in terms of their word embeddings
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// Path to word embeddings file
    #[arg(value_parser = existing_file)]
    embeddings: PathBuf,

    /// Word to look up
    word: String,

    /// Word whose vector is added to the query (requires --minus)
    #[arg(long, requires = "minus")]
    plus: Option<String>,

    /// Word whose vector is subtracted from the query (requires --plus)
    #[arg(long, requires = "plus")]
    minus: Option<String>,

    /// Number of words to print
    #[arg(short = 'k', long, default_value_t = DEFAULT_TOP_K, value_parser = positive)]
    top_k: usize,

    /// Keep the first row of a repeated word instead of failing
    #[arg(long)]
    keep_first_duplicates: bool,

    /// Show debug diagnostics
    #[arg(short, long, conflicts_with = "quiet")]
    verbose: bool,

    /// Only show warnings and errors
    #[arg(short, long)]
    quiet: bool,
}

impl Args {
    fn log_level(&self) -> &'static str {
        if self.verbose {
            "debug"
        } else if self.quiet {
            "warn"
        } else {
            "info"
        }
    }

    fn config(&self) -> LexiconConfig {
        let duplicates = if self.keep_first_duplicates {
            DuplicatePolicy::KeepFirst
        } else {
            DuplicatePolicy::Reject
        };
        LexiconConfig::default()
            .with_top_k(self.top_k)
            .with_duplicate_policy(duplicates)
    }
}

/// Validate that the path names a regular file
fn existing_file(path: &str) -> Result<PathBuf, String> {
    let path = PathBuf::from(path);
    if path.is_file() {
        Ok(path)
    } else {
        Err(format!("{} is not a file of embeddings", path.display()))
    }
}

fn positive(value: &str) -> Result<usize, String> {
    match value.parse::<usize>() {
        Ok(0) => Err("must be at least 1".to_string()),
        Ok(n) => Ok(n),
        Err(e) => Err(e.to_string()),
    }
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // Initialize logging
    fmt()
        .with_env_filter(
            EnvFilter::from_default_env()
                .add_directive(format!("findsim={}", args.log_level()).parse()?),
        )
        .with_writer(std::io::stderr)
        .init();

    let lexicon = Lexicon::load_with_config(&args.embeddings, args.config())
        .with_context(|| format!("failed to load {}", args.embeddings.display()))?;

    let scored = lexicon.find_similar_scored(
        &args.word,
        args.plus.as_deref(),
        args.minus.as_deref(),
    )?;
    debug!(?scored, "Ranked neighbours");

    let words: Vec<&str> = scored.iter().map(|(word, _)| *word).collect();
    println!("{}", format_for_printing(&words));

    Ok(())
}
