use anyhow::Result;
use colored::Colorize;

use goldfish_corpus::cli::Command;
use goldfish_corpus::config::AppConfig;
use goldfish_corpus::{
    build_config, handle_completions, handle_corpus, handle_deck, handle_rebuild, handle_search,
    handle_smoke, handle_update, interpret,
};

fn main() {
    setup_logging();
    parse_and_execute().unwrap_or_else(|e| {
        eprintln!("{} {e:#}", "Error:".red().bold());
        std::process::exit(1);
    });
}

fn setup_logging() {
    sensible_env_logger::init!();
}

fn parse_and_execute() -> Result<()> {
    let cli = interpret();
    let config = build_config(&cli.options);
    execute_command(&cli.command, &config)
}

fn execute_command(command: &Command, config: &AppConfig) -> Result<()> {
    match command {
        Command::Rebuild => handle_rebuild(config),
        Command::Update => handle_update(config),
        Command::Corpus { limit, skip_failures } => handle_corpus(config, *limit, *skip_failures),
        Command::Smoke => handle_smoke(config),
        Command::Search {
            format,
            from,
            to,
            keywords,
        } => handle_search(config, format, from, to, keywords.as_deref()),
        Command::Deck { id } => handle_deck(config, id),
        Command::Completions { shell } => handle_completions(*shell),
    }
}
