pub mod api;
pub mod cli;
pub mod config;
pub mod domain;
pub mod errors;
pub mod fetchers;
pub mod http;
pub mod pagination;
pub mod parsers;
pub mod rate_limiter;
pub mod services;
pub mod storage;

use anyhow::Result;
use chrono::{Local, NaiveDate};
use clap::{CommandFactory, Parser};
use clap_complete::{Shell, generate};
use log::info;

use crate::api::GoldfishClient;
use crate::cli::{Cli, GlobalOptions};
use crate::config::{AppConfig, FailurePolicy};
use crate::domain::SearchQuery;
use crate::fetchers::{fetch_deck, search};
use crate::services::{CorpusService, TournamentListService};

pub fn interpret() -> Cli {
    Cli::parse()
}

/// Default settings with the command line overrides applied
pub fn build_config(options: &GlobalOptions) -> AppConfig {
    let mut config = AppConfig::new();
    if let Some(path) = &options.ids_file {
        config.storage.tournament_ids_path = path.clone();
    }
    if let Some(path) = &options.corpus_file {
        config.storage.corpus_path = path.clone();
    }
    if let Some(delay_ms) = options.delay_ms {
        config.scraper.rate_limit_ms = delay_ms;
    }
    if let Some(base_url) = &options.base_url {
        config.scraper.base_url = base_url.clone();
    }
    config
}

pub fn handle_rebuild(config: &AppConfig) -> Result<()> {
    let mut service = TournamentListService::new(config)?;
    let ids = service.rebuild(today())?;
    info!("Saved {} tournament ids to {}", ids.len(), config.storage.tournament_ids_path.display());
    Ok(())
}

pub fn handle_update(config: &AppConfig) -> Result<()> {
    let mut service = TournamentListService::new(config)?;
    let ids = service.update(today())?;
    info!("Saved {} tournament ids to {}", ids.len(), config.storage.tournament_ids_path.display());
    Ok(())
}

pub fn handle_corpus(config: &AppConfig, limit: Option<usize>, skip_failures: bool) -> Result<()> {
    let mut config = config.clone();
    if skip_failures {
        config.corpus.failure_policy = FailurePolicy::Skip;
    }
    let mut service = CorpusService::new(&config)?;
    service.run(limit)?;
    Ok(())
}

pub fn handle_smoke(config: &AppConfig) -> Result<()> {
    handle_corpus(config, Some(config.corpus.smoke_test_limit), false)
}

pub fn handle_search(
    config: &AppConfig,
    format: &str,
    from: &str,
    to: &str,
    keywords: Option<&str>,
) -> Result<()> {
    let query = SearchQuery::new(format, from, to, keywords)?;
    let mut client = GoldfishClient::new(&config.scraper)?;
    for id in search(&mut client, &query) {
        println!("{}", id?);
    }
    Ok(())
}

pub fn handle_deck(config: &AppConfig, deck_id: &str) -> Result<()> {
    let mut client = GoldfishClient::new(&config.scraper)?;
    let record = fetch_deck(&mut client, deck_id)?;
    println!("{}", serde_json::to_string_pretty(&record)?);
    Ok(())
}

pub fn handle_completions(shell: Shell) -> Result<()> {
    let mut command = Cli::command();
    let name = command.get_name().to_string();
    generate(shell, &mut command, name, &mut std::io::stdout());
    Ok(())
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}
