use chrono::NaiveDate;
use std::path::PathBuf;

use crate::domain::{Format, TournamentId};

/// Tournament 10 shows up in every legacy search but is not a real event.
pub const ANOMALOUS_TOURNAMENT_ID: TournamentId = TournamentId(10);

#[derive(Debug, Clone)]
pub struct ScraperSettings {
    pub rate_limit_ms: u64,
    pub user_agent: String,
    pub timeout_secs: u64,
    pub base_url: String,
}

impl Default for ScraperSettings {
    fn default() -> Self {
        Self {
            rate_limit_ms: 100, // 10 req/sec
            user_agent: "GoldfishCorpus/0.1".to_string(),
            timeout_secs: 30,
            base_url: "https://www.mtggoldfish.com".to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct StorageSettings {
    pub tournament_ids_path: PathBuf,
    pub corpus_path: PathBuf,
}

impl Default for StorageSettings {
    fn default() -> Self {
        Self {
            tournament_ids_path: PathBuf::from("legacy_tournamentids.csv"),
            corpus_path: PathBuf::from("legacy_decks"),
        }
    }
}

/// What the corpus builder does when a deck page cannot be extracted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FailurePolicy {
    /// Stop the whole run on the first bad deck
    #[default]
    Abort,
    /// Log the bad deck and carry on
    Skip,
}

#[derive(Debug, Clone)]
pub struct CorpusSettings {
    pub failure_policy: FailurePolicy,
    pub smoke_test_limit: usize,
}

impl Default for CorpusSettings {
    fn default() -> Self {
        Self {
            failure_policy: FailurePolicy::Abort,
            smoke_test_limit: 10,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ListSettings {
    pub format: Format,
    pub epoch: NaiveDate,
    pub excluded_ids: Vec<TournamentId>,
}

impl Default for ListSettings {
    fn default() -> Self {
        Self {
            format: Format::Legacy,
            // The oldest tournaments MTGGoldfish lists are from 2011
            epoch: NaiveDate::from_ymd_opt(2011, 1, 1).unwrap_or_default(),
            excluded_ids: vec![ANOMALOUS_TOURNAMENT_ID],
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct AppConfig {
    pub scraper: ScraperSettings,
    pub storage: StorageSettings,
    pub corpus: CorpusSettings,
    pub list: ListSettings,
}

impl AppConfig {
    pub fn new() -> Self {
        Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_the_legacy_crawl() {
        let config = AppConfig::new();
        assert_eq!(config.scraper.rate_limit_ms, 100);
        assert_eq!(config.list.format, Format::Legacy);
        assert_eq!(config.list.epoch.to_string(), "2011-01-01");
        assert_eq!(config.list.excluded_ids, vec![TournamentId(10)]);
        assert_eq!(config.corpus.failure_policy, FailurePolicy::Abort);
        assert_eq!(config.corpus.smoke_test_limit, 10);
    }
}
