use anyhow::Result;
use scraper::Html;

use crate::config::settings::ScraperSettings;
use crate::http::{Fetcher, HttpFetcher, Lines, RateLimitedClient};

/// MTGGoldfish site client
///
/// Every page of a run goes through one instance, so the delay applies
/// between all consecutive requests, whatever page kind they are for.
pub struct GoldfishClient<F = HttpFetcher> {
    client: RateLimitedClient<F>,
    base_url: String,
}

impl GoldfishClient<HttpFetcher> {
    pub fn new(settings: &ScraperSettings) -> Result<Self> {
        let client = RateLimitedClient::new(settings)?;
        Ok(Self::with_client(client, settings.base_url.as_str()))
    }
}

impl<F: Fetcher> GoldfishClient<F> {
    pub fn with_client(client: RateLimitedClient<F>, base_url: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn deck_url(&self, deck_id: &str) -> String {
        format!("{}/deck/{}", self.base_url, deck_id)
    }

    /// Tournament page URL; full URLs are passed through untouched
    pub fn tournament_url(&self, tournament: &str) -> String {
        if is_tournament_id(tournament) {
            format!("{}/tournament/{}", self.base_url, tournament)
        } else {
            tournament.to_string()
        }
    }

    pub fn fetch_html(&mut self, url: &str) -> Result<Html> {
        self.client.get_html(url)
    }

    pub fn fetch_lines(&mut self, url: &str) -> Result<Lines<'_>> {
        self.client.get_lines(url)
    }

    pub fn http(&self) -> &RateLimitedClient<F> {
        &self.client
    }
}

fn is_tournament_id(text: &str) -> bool {
    !text.is_empty() && text.bytes().all(|b| b.is_ascii_digit())
}
