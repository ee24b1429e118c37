use anyhow::Result;
use clap::{Parser, Subcommand};
use kidx::config::Limits;
use kidx::format::OutputFormat;
use kidx::{charmap, phrase, stats, tree};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "kidx")]
#[command(about = "Offline keystroke-index compiler for input-method dictionaries")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the forward and reverse character indexes from a keyboard mapping
    Charmap {
        /// *.cin keyboard-mapping file
        mapping: PathBuf,

        /// Working directory holding the dictionaries and indexes
        #[arg(short, long, default_value = ".")]
        dir: PathBuf,

        /// Index file encoding
        #[arg(long, value_enum, default_value = "binary")]
        format: OutputFormat,
    },
    /// Expand the phrase dictionary into sorted keystroke-sequence indexes
    Phrases {
        #[arg(short, long, default_value = ".")]
        dir: PathBuf,

        #[arg(long, value_enum, default_value = "binary")]
        format: OutputFormat,
    },
    /// Compile the keystroke-sequence stream into the phrase tree
    Tree {
        #[arg(short, long, default_value = ".")]
        dir: PathBuf,

        #[arg(long, value_enum, default_value = "binary")]
        format: OutputFormat,
    },
    /// Run all three stages in order
    All {
        /// *.cin keyboard-mapping file
        mapping: PathBuf,

        #[arg(short, long, default_value = ".")]
        dir: PathBuf,

        #[arg(long, value_enum, default_value = "binary")]
        format: OutputFormat,
    },
    /// Show statistics of the last compile
    Stats {
        #[arg(short, long, default_value = ".")]
        dir: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let limits = Limits::default();

    match cli.command {
        Commands::Charmap {
            mapping,
            dir,
            format,
        } => run_charmap(&dir, &mapping, format, &limits)?,
        Commands::Phrases { dir, format } => run_phrases(&dir, format, &limits)?,
        Commands::Tree { dir, format } => run_tree(&dir, format, &limits)?,
        Commands::All {
            mapping,
            dir,
            format,
        } => {
            run_charmap(&dir, &mapping, format, &limits)?;
            run_phrases(&dir, format, &limits)?;
            run_tree(&dir, format, &limits)?;
        }
        Commands::Stats { dir } => stats::show_stats(&dir)?,
    }

    Ok(())
}

fn run_charmap(dir: &Path, mapping: &Path, format: OutputFormat, limits: &Limits) -> Result<()> {
    let summary = charmap::build(dir, mapping, format, limits)?;
    println!(
        "charmap: {} entries, {} distinct characters ({} not in dictionary)",
        summary.entries, summary.distinct_words, summary.skipped_words
    );
    Ok(())
}

fn run_phrases(dir: &Path, format: OutputFormat, limits: &Limits) -> Result<()> {
    let summary = phrase::run(dir, format, limits)?;
    println!(
        "phrases: {} records -> {} phrases ({} unsupported), {} variants over {} sequences",
        summary.records,
        summary.merged,
        summary.unsupported,
        summary.variants,
        summary.distinct_sequences
    );
    Ok(())
}

fn run_tree(dir: &Path, format: OutputFormat, limits: &Limits) -> Result<()> {
    let summary = tree::compile(dir, format, limits)?;
    println!("tree: {} sequences, {} nodes", summary.sequences, summary.nodes);
    Ok(())
}
