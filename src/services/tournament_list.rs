use anyhow::{Context, Result};
use chrono::NaiveDate;
use log::info;
use std::collections::BTreeSet;

use crate::api::GoldfishClient;
use crate::config::AppConfig;
use crate::config::settings::ListSettings;
use crate::domain::search::parse_date;
use crate::domain::{SearchQuery, TournamentId};
use crate::errors::PersistenceError;
use crate::fetchers::search;
use crate::http::{Fetcher, HttpFetcher};
use crate::parsers::tournament::trailing_date;
use crate::storage::TournamentIdStore;

/// Tournaments near the end of the list can show up slightly out of order,
/// so updates resume from a few entries back.
const ANCHOR_OFFSET: usize = 3;

/// Keeps the persisted tournament id list in step with the site
pub struct TournamentListService<F = HttpFetcher> {
    client: GoldfishClient<F>,
    store: TournamentIdStore,
    settings: ListSettings,
}

impl TournamentListService<HttpFetcher> {
    pub fn new(config: &AppConfig) -> Result<Self> {
        Ok(Self::with_client(
            GoldfishClient::new(&config.scraper)?,
            TournamentIdStore::new(&config.storage.tournament_ids_path),
            config.list.clone(),
        ))
    }
}

impl<F: Fetcher> TournamentListService<F> {
    pub fn with_client(client: GoldfishClient<F>, store: TournamentIdStore, settings: ListSettings) -> Self {
        Self {
            client,
            store,
            settings,
        }
    }

    /// Search everything from the epoch to `today` and overwrite the list
    pub fn rebuild(&mut self, today: NaiveDate) -> Result<Vec<TournamentId>> {
        info!("=== Rebuilding tournament list from scratch ===\n");

        let query = SearchQuery::from_dates(self.settings.format, self.settings.epoch, today)?;
        let mut found = self.collect_ids(&query)?;
        info!("  → Found {} unique tournaments", found.len());

        for excluded in &self.settings.excluded_ids {
            if found.remove(excluded) {
                info!("  → Dropped excluded tournament {}", excluded);
            }
        }

        let ids: Vec<TournamentId> = found.into_iter().collect();
        self.store.save(&ids)?;

        info!("=== Rebuild Complete ===");
        Ok(ids)
    }

    /// Search from the date of a recent known tournament to `today` and
    /// merge the results into the list
    pub fn update(&mut self, today: NaiveDate) -> Result<Vec<TournamentId>> {
        info!("=== Updating tournament list ===\n");

        let existing = self.store.load()?;
        let anchor = anchor_id(&existing)?;
        let resume_from = self.resume_date(anchor)?;
        info!("  → Resuming from tournament {} dated {}", anchor, resume_from);

        let query = SearchQuery::from_dates(self.settings.format, resume_from, today)?;
        let found = self.collect_ids(&query)?;

        let mut merged: BTreeSet<TournamentId> = existing.iter().copied().collect();
        let before = merged.len();
        merged.extend(found);
        info!("  → Added {} new tournaments", merged.len() - before);

        let ids: Vec<TournamentId> = merged.into_iter().collect();
        self.store.save(&ids)?;

        info!("=== Update Complete ===");
        Ok(ids)
    }

    pub fn client(&self) -> &GoldfishClient<F> {
        &self.client
    }

    fn collect_ids(&mut self, query: &SearchQuery) -> Result<BTreeSet<TournamentId>> {
        search(&mut self.client, query).collect()
    }

    /// Date of a tournament, read from the first `Date:` line of its raw page
    fn resume_date(&mut self, tournament: TournamentId) -> Result<NaiveDate> {
        let url = self.client.tournament_url(&tournament.to_string());

        for line in self.client.fetch_lines(&url)? {
            let line = line?;
            if let Some(date) = trailing_date(&line) {
                return parse_date(date)
                    .with_context(|| format!("Unreadable date on tournament {} page", tournament));
            }
        }

        Err(PersistenceError::MissingResumeDate(tournament.value()).into())
    }
}

fn anchor_id(existing: &[TournamentId]) -> Result<TournamentId, PersistenceError> {
    let index = existing.len().saturating_sub(ANCHOR_OFFSET);
    existing.get(index).copied().ok_or(PersistenceError::EmptyIdList)
}
