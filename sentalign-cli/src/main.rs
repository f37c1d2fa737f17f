use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

mod commands;
mod config;
mod dictionary;
mod error;
mod similarity;

use config::Config;
use error::{print_error_and_exit, CliError};

#[derive(Parser)]
#[command(name = "sentalign")]
#[command(about = "sentalign - word-level sentence alignment")]
#[command(version)]
#[command(long_about = "
sentalign aligns sentences word by word. The global mode aligns two sentences
end to end; the local mode reports every well-scoring shared region, reduced
to a set of non-overlapping fragments.

Examples:
  sentalign global 'the old man walked home' 'the man walked slowly home'
  sentalign local 'a b c x y z' 'x y z q a b c' --keyword c
  sentalign local --pairs corpus.tsv --format json --threads 8
")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Configuration file path
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Number of threads to use
    #[arg(short, long, global = true)]
    pub threads: Option<usize>,

    /// Verbose output
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Quiet mode (suppress non-error output)
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

/// Where the sentence pairs come from, and how results are written
#[derive(Args, Debug, Clone)]
pub struct PairArgs {
    /// First sentence
    #[arg(required_unless_present = "pairs", conflicts_with = "pairs")]
    pub sent_a: Option<String>,

    /// Second sentence
    #[arg(required_unless_present = "pairs", conflicts_with = "pairs")]
    pub sent_b: Option<String>,

    /// File of tab-separated sentence pairs, one pair per line
    #[arg(long)]
    pub pairs: Option<PathBuf>,

    /// Output format
    #[arg(long, value_enum, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Align two sentences end to end (Needleman-Wunsch)
    Global {
        #[command(flatten)]
        input: PairArgs,

        /// Penalty per gap column (negative)
        #[arg(long, allow_negative_numbers = true)]
        gap_penalty: Option<f64>,
    },

    /// Report all non-overlapping locally similar regions (Smith-Waterman)
    Local {
        #[command(flatten)]
        input: PairArgs,

        /// Keyword whose exact matches are boosted; may be repeated
        #[arg(short = 'k', long = "keyword")]
        keywords: Vec<String>,

        /// Insertion/deletion score (negative)
        #[arg(long, allow_negative_numbers = true)]
        indel_score: Option<f64>,

        /// Minimum cell score for a candidate match
        #[arg(long)]
        threshold: Option<f64>,

        /// Maximum number of fragments per pair
        #[arg(long)]
        max_fragments: Option<usize>,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

fn setup_logging(verbose: u8, quiet: bool) -> Result<()> {
    let level = if quiet {
        "error"
    } else {
        match verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    };

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp_secs()
        .try_init()
        .context("Failed to initialize logging")?;

    Ok(())
}

fn run(cli: Cli) -> Result<()> {
    setup_logging(cli.verbose, cli.quiet)?;

    let mut config = Config::load(cli.config.as_deref())?;

    // Command line overrides the configured thread count
    if let Some(threads) = cli.threads {
        config.general.threads = threads;
    }
    if config.general.threads == 0 {
        return Err(CliError::config("thread count must be at least 1").into());
    }
    rayon::ThreadPoolBuilder::new()
        .num_threads(config.general.threads)
        .build_global()
        .context("Failed to set thread count")?;
    log::debug!("Using {} threads", config.general.threads);

    match cli.command {
        Commands::Global { input, gap_penalty } => {
            if let Some(gap_penalty) = gap_penalty {
                config.global.gap_penalty = gap_penalty;
            }
            commands::global::execute(&config, &input)?;
        }

        Commands::Local {
            input,
            keywords,
            indel_score,
            threshold,
            max_fragments,
        } => {
            if let Some(indel_score) = indel_score {
                config.local.indel_score = indel_score;
            }
            if let Some(threshold) = threshold {
                config.local.threshold = threshold;
            }
            if max_fragments.is_some() {
                config.local.max_fragments = max_fragments;
            }
            commands::local::execute(&config, &input, &keywords)?;
        }
    }

    Ok(())
}

fn main() {
    if let Err(err) = run(Cli::parse()) {
        match err.downcast_ref::<CliError>() {
            Some(cli_err) => print_error_and_exit(cli_err),
            None => {
                eprintln!("Error: {:#}", err);
                std::process::exit(1);
            }
        }
    }
}
