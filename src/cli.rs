use clap::{Args, Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about = "MTGGoldfish tournament deck scraper")]
pub struct Cli {
    #[command(flatten)]
    pub options: GlobalOptions,

    /// Command
    #[clap(subcommand)]
    pub command: Command,
}

/// Overrides for the default settings, shared by every command
#[derive(Args, Debug, Clone, PartialEq, Default)]
pub struct GlobalOptions {
    /// Tournament id list file
    #[arg(long, global = true, env = "GOLDFISH_IDS_FILE")]
    pub ids_file: Option<PathBuf>,

    /// Deck corpus file (newline-delimited JSON, appended to)
    #[arg(long, global = true, env = "GOLDFISH_CORPUS_FILE")]
    pub corpus_file: Option<PathBuf>,

    /// Pause between consecutive requests, in milliseconds
    #[arg(long, global = true, env = "GOLDFISH_DELAY_MS")]
    pub delay_ms: Option<u64>,

    /// Site root, e.g. a local mirror
    #[arg(long, global = true, env = "GOLDFISH_BASE_URL")]
    pub base_url: Option<String>,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
#[clap(rename_all = "lower_case")]
pub enum Command {
    /// Rebuild the tournament id list from scratch
    Rebuild,
    /// Extend the tournament id list with tournaments published since the last run
    Update,
    /// Append every deck of the listed tournaments to the corpus
    Corpus {
        /// Only visit the first N tournaments of the list
        #[arg(short, long)]
        limit: Option<usize>,

        /// Log and skip decks whose page cannot be extracted instead of stopping
        #[arg(long = "skip-failures")]
        skip_failures: bool,
    },
    /// Build the corpus over the first few tournaments only
    Smoke,
    /// Print the tournament ids of a search, one per line
    Search {
        /// Format name (legacy, modern, standard, ...)
        #[arg(short, long, default_value = "legacy")]
        format: String,

        /// First day of the range, YYYY-MM-DD
        #[arg(long)]
        from: String,

        /// Last day of the range, YYYY-MM-DD
        #[arg(long)]
        to: String,

        /// Words the tournament name must contain
        #[arg(short, long)]
        keywords: Option<String>,
    },
    /// Print one deck record as JSON
    Deck {
        /// Deck id as used in /deck/<id>
        id: String,
    },
    /// Generate shell completions
    Completions {
        #[arg(value_enum)]
        shell: Shell,
    },
}
