use anyhow::{Context, Result};
use log::{info, warn};
use scraper::Html;
use std::collections::VecDeque;

use crate::api::GoldfishClient;
use crate::domain::{SearchQuery, TournamentId};
use crate::errors::parse_context;
use crate::http::Fetcher;
use crate::pagination::PageIterator;
use crate::parsers::search;

/// Tournament ids of every result page of a search, fetched lazily
///
/// Ids come out in page order, then link order, duplicates included. Each
/// page costs exactly one request; page 1 is requested up front to learn the
/// page count and then reused. Calling `search` again starts over.
pub struct SearchResults<'c, F: Fetcher> {
    client: &'c mut GoldfishClient<F>,
    query: SearchQuery,
    pages: Option<PageIterator>,
    first_page: Option<Html>,
    pending: VecDeque<TournamentId>,
    finished: bool,
}

pub fn search<'c, F: Fetcher>(client: &'c mut GoldfishClient<F>, query: &SearchQuery) -> SearchResults<'c, F> {
    SearchResults {
        client,
        query: query.clone(),
        pages: None,
        first_page: None,
        pending: VecDeque::new(),
        finished: false,
    }
}

impl<F: Fetcher> SearchResults<'_, F> {
    fn load_next_page(&mut self) -> Result<()> {
        if self.pages.is_none() {
            self.pages = Some(self.discover_pages()?);
        }

        let Some(pages) = self.pages.as_mut() else {
            return Ok(());
        };
        if pages.has_reached_max() {
            self.finished = true;
            return Ok(());
        }
        let page = pages.current_page();
        let total = pages.total_pages();
        pages.advance();

        let html = match self.first_page.take() {
            Some(html) if page == 1 => html,
            _ => self.fetch_page(page)?,
        };

        info!("  → Search page {}/{}...", page, total);
        match search::tournament_ids(&html).with_context(|| parse_context("search page", &page.to_string()))? {
            Some(ids) => self.pending.extend(ids),
            None => warn!("There are no tournaments listed on search page {}", page),
        }
        Ok(())
    }

    fn discover_pages(&mut self) -> Result<PageIterator> {
        let html = self.fetch_page(1)?;
        let total = search::number_of_pages(&html).context("Failed to read search page count")?;
        info!(
            "Searching {} tournaments from {} to {}: {} page(s)",
            self.query.format(),
            self.query.begin_date(),
            self.query.end_date(),
            total
        );
        self.first_page = Some(html);
        Ok(PageIterator::new(total))
    }

    fn fetch_page(&mut self, page: usize) -> Result<Html> {
        let url = self.query.page_url(self.client.base_url(), page);
        self.client.fetch_html(&url)
    }
}

impl<F: Fetcher> Iterator for SearchResults<'_, F> {
    type Item = Result<TournamentId>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(id) = self.pending.pop_front() {
                return Some(Ok(id));
            }
            if self.finished {
                return None;
            }
            if let Err(e) = self.load_next_page() {
                self.finished = true;
                return Some(Err(e));
            }
        }
    }
}
