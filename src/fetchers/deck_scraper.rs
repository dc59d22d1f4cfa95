use anyhow::{Context, Result};

use crate::api::GoldfishClient;
use crate::domain::DeckRecord;
use crate::errors::parse_context;
use crate::http::Fetcher;
use crate::parsers::deck;

/// Fetch one deck page and extract its record
pub fn fetch_deck<F: Fetcher>(client: &mut GoldfishClient<F>, deck_id: &str) -> Result<DeckRecord> {
    let url = client.deck_url(deck_id);
    let html = client.fetch_html(&url)?;
    deck::extract(&html, deck_id).with_context(|| parse_context("deck", deck_id))
}
