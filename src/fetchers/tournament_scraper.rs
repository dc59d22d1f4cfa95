use anyhow::Result;
use log::info;

use crate::api::GoldfishClient;
use crate::http::Fetcher;
use crate::parsers::tournament;

/// Deck ids listed on a tournament page
///
/// `tournament` is either a numeric tournament id or a full page URL.
/// Tournament pages are never paginated, so this is a single request.
pub fn list_decks<F: Fetcher>(
    client: &mut GoldfishClient<F>,
    tournament: &str,
) -> Result<std::vec::IntoIter<String>> {
    let url = client.tournament_url(tournament);
    let html = client.fetch_html(&url)?;
    let deck_ids = tournament::deck_ids(&html);
    info!("  → Tournament {} lists {} decks", tournament, deck_ids.len());
    Ok(deck_ids.into_iter())
}
