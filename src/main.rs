use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use transclean::{
    adjust_corpus_english, adjust_corpus_french, clean_corpus, corpus_classes, CleaningConfig,
    OutputLayout, UniversalTagMap, io::write_measures_csv,
};

#[derive(Parser)]
#[command(name = "transclean")]
#[command(author, version, about = "Clinical transcript cleaning and POS adjustment toolkit", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Clean and normalize a corpus of raw transcripts
    Clean {
        /// Directory containing the transcripts (.cha or .txt)
        corpus_path: PathBuf,

        /// Synonym reduction config (JSON, canonical word to variants)
        #[arg(short, long)]
        synonyms: Option<PathBuf>,

        /// Interjection word list, one literal per line
        #[arg(short, long)]
        interjections: Option<PathBuf>,

        /// Expression word list, one literal per line
        #[arg(short, long)]
        expressions: Option<PathBuf>,

        /// Output path for the per-file measures table (CSV)
        #[arg(short = 'f', long, default_value = "out/markers_distribution.csv")]
        features_output: PathBuf,

        /// Root directory for cleaned dialog output
        #[arg(short, long, default_value = "out")]
        output_dir: PathBuf,

        /// Verbose output
        #[arg(short, long)]
        verbose: bool,
    },

    /// Adjust English POS tagger output over a tagged corpus
    AdjustEn {
        /// Directory containing the tagged transcripts
        corpus_path: PathBuf,

        /// Two-column native-to-universal tag mapping file
        #[arg(short, long)]
        universal_map: Option<PathBuf>,

        /// Root directory for adjusted tag output
        #[arg(short, long, default_value = "out")]
        output_dir: PathBuf,

        /// Verbose output
        #[arg(short, long)]
        verbose: bool,
    },

    /// Adjust French POS tagger output over a tagged corpus
    AdjustFr {
        /// Directory containing the tagged transcripts
        corpus_path: PathBuf,

        /// Two-column native-to-universal tag mapping file
        #[arg(short, long)]
        universal_map: Option<PathBuf>,

        /// Root directory for adjusted tag output
        #[arg(short, long, default_value = "out")]
        output_dir: PathBuf,

        /// Verbose output
        #[arg(short, long)]
        verbose: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Clean {
            corpus_path,
            synonyms,
            interjections,
            expressions,
            features_output,
            output_dir,
            verbose,
        } => {
            setup_logging(verbose);
            run_clean(
                corpus_path,
                synonyms,
                interjections,
                expressions,
                features_output,
                output_dir,
            )
        }
        Commands::AdjustEn {
            corpus_path,
            universal_map,
            output_dir,
            verbose,
        } => {
            setup_logging(verbose);
            run_adjust_en(corpus_path, universal_map, output_dir)
        }
        Commands::AdjustFr {
            corpus_path,
            universal_map,
            output_dir,
            verbose,
        } => {
            setup_logging(verbose);
            run_adjust_fr(corpus_path, universal_map, output_dir)
        }
    }
}

fn setup_logging(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::INFO };
    let subscriber = FmtSubscriber::builder().with_max_level(level).finish();
    tracing::subscriber::set_global_default(subscriber).ok();
}

fn check_corpus_dir(corpus_path: &Path) -> Result<()> {
    if !corpus_path.is_dir() {
        bail!("corpus path {:?} is not a directory", corpus_path);
    }
    Ok(())
}

fn load_tag_map(path: Option<&Path>) -> Result<Option<UniversalTagMap>> {
    match path {
        Some(path) => {
            let map = UniversalTagMap::from_path(path)
                .context("Failed to load universal tag mapping")?;
            info!("Loaded {} native tag mappings", map.len());
            Ok(Some(map))
        }
        None => Ok(None),
    }
}

fn run_clean(
    corpus_path: PathBuf,
    synonyms: Option<PathBuf>,
    interjections: Option<PathBuf>,
    expressions: Option<PathBuf>,
    features_output: PathBuf,
    output_dir: PathBuf,
) -> Result<()> {
    check_corpus_dir(&corpus_path)?;

    let config = CleaningConfig::from_paths(
        interjections.as_deref(),
        expressions.as_deref(),
        synonyms.as_deref(),
    )
    .context("Failed to load cleaning configuration")?;

    let classes = corpus_classes(&corpus_path)?;
    info!("Corpus classes: {:?}", classes);

    let layout = OutputLayout::rooted(&output_dir);
    let records = clean_corpus(&corpus_path, &config, &layout)
        .context("Failed to clean corpus")?;

    write_measures_csv(&features_output, &records)
        .context("Failed to write measures table")?;

    println!("Cleaning Results");
    println!("================");
    println!("Files processed: {}", records.len());
    let total_words: u32 = records.iter().map(|r| r.measures.total_word_count).sum();
    println!("Total words: {}", total_words);
    println!("Measures written to {:?}", features_output);
    println!("Cleaned dialogs written under {:?}", output_dir);

    Ok(())
}

fn run_adjust_en(
    corpus_path: PathBuf,
    universal_map: Option<PathBuf>,
    output_dir: PathBuf,
) -> Result<()> {
    check_corpus_dir(&corpus_path)?;
    let tag_map = load_tag_map(universal_map.as_deref())?;

    let layout = OutputLayout::rooted(&output_dir);
    let counts = adjust_corpus_english(&corpus_path, &layout, tag_map.as_ref())
        .context("Failed to adjust English corpus")?;

    println!("English Adjustment Results");
    println!("==========================");
    println!("Compose repairs: {}", counts.compose_count);
    println!("Looks-like deletions: {}", counts.looks_like_count);
    println!("Auxiliary retags: {}", counts.aux_verb_count);
    println!("Total adjustments: {}", counts.total());
    println!("Adjusted tags written under {:?}", layout.adjusted_tags);

    Ok(())
}

fn run_adjust_fr(
    corpus_path: PathBuf,
    universal_map: Option<PathBuf>,
    output_dir: PathBuf,
) -> Result<()> {
    check_corpus_dir(&corpus_path)?;
    let tag_map = load_tag_map(universal_map.as_deref())?;

    let layout = OutputLayout::rooted(&output_dir);
    let count = adjust_corpus_french(&corpus_path, &layout, tag_map.as_ref())
        .context("Failed to adjust French corpus")?;

    println!("French Adjustment Results");
    println!("=========================");
    println!("Total adjustments: {}", count);
    println!("Adjusted tags written under {:?}", layout.adjusted_tags);

    Ok(())
}
