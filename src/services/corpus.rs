use anyhow::{Error, Result};
use log::{info, warn};
use std::path::PathBuf;

use crate::api::GoldfishClient;
use crate::config::settings::CorpusSettings;
use crate::config::{AppConfig, FailurePolicy};
use crate::domain::{CorpusProgress, TournamentId};
use crate::errors::ExtractionError;
use crate::fetchers::{fetch_deck, list_decks};
use crate::http::{Fetcher, HttpFetcher};
use crate::storage::{CorpusWriter, TournamentIdStore};

/// Crawls tournaments deck by deck and appends every record to the corpus
pub struct CorpusService<F = HttpFetcher> {
    client: GoldfishClient<F>,
    store: TournamentIdStore,
    corpus_path: PathBuf,
    settings: CorpusSettings,
}

impl CorpusService<HttpFetcher> {
    pub fn new(config: &AppConfig) -> Result<Self> {
        Ok(Self::with_client(
            GoldfishClient::new(&config.scraper)?,
            TournamentIdStore::new(&config.storage.tournament_ids_path),
            config.storage.corpus_path.clone(),
            config.corpus.clone(),
        ))
    }
}

impl<F: Fetcher> CorpusService<F> {
    pub fn with_client(
        client: GoldfishClient<F>,
        store: TournamentIdStore,
        corpus_path: PathBuf,
        settings: CorpusSettings,
    ) -> Self {
        Self {
            client,
            store,
            corpus_path,
            settings,
        }
    }

    /// Build from the persisted tournament list, optionally only its first
    /// `limit` entries
    pub fn run(&mut self, limit: Option<usize>) -> Result<CorpusProgress> {
        let tournaments = self.store.load()?;
        self.build(&tournaments, limit)
    }

    pub fn build(&mut self, tournaments: &[TournamentId], limit: Option<usize>) -> Result<CorpusProgress> {
        let count = limit.map_or(tournaments.len(), |limit| limit.min(tournaments.len()));
        let selected = &tournaments[..count];

        info!("=== Building corpus from {} tournaments ===\n", selected.len());

        let mut writer = CorpusWriter::open(&self.corpus_path)?;
        let mut progress = CorpusProgress::new(selected.len());

        for &tournament in selected {
            self.add_tournament(tournament, &mut writer, &mut progress)?;
            progress.finish_tournament();
        }

        info!(
            "=== Corpus Complete: {} decks written, {} skipped, in {} ===",
            progress.written(),
            progress.skipped(),
            writer.path().display()
        );
        Ok(progress)
    }

    pub fn client(&self) -> &GoldfishClient<F> {
        &self.client
    }

    fn add_tournament(
        &mut self,
        tournament: TournamentId,
        writer: &mut CorpusWriter,
        progress: &mut CorpusProgress,
    ) -> Result<()> {
        info!("Looking at tournament {}!", tournament);

        for deck_id in list_decks(&mut self.client, &tournament.to_string())? {
            match fetch_deck(&mut self.client, &deck_id) {
                Ok(record) => {
                    writer.append(&record)?;
                    progress.increment_written();
                    info!("    Added deck {} from tournament {} to file.", deck_id, tournament);
                }
                Err(e) => {
                    self.handle_failure(e, &deck_id, tournament)?;
                    progress.increment_skipped();
                }
            }
        }
        Ok(())
    }

    /// Only extraction failures are ever skipped; transport and storage
    /// errors always end the run.
    fn handle_failure(&self, error: Error, deck_id: &str, tournament: TournamentId) -> Result<()> {
        let skippable = self.settings.failure_policy == FailurePolicy::Skip
            && error.downcast_ref::<ExtractionError>().is_some();

        if !skippable {
            return Err(error.context(format!(
                "Corpus build stopped at deck {} of tournament {}",
                deck_id, tournament
            )));
        }

        warn!("    Skipped deck {} from tournament {}: {:#}", deck_id, tournament, error);
        Ok(())
    }
}
