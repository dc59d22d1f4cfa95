use anyhow::{Result, bail};
use std::collections::HashMap;

use super::client::{Fetcher, Lines, RateLimitedClient};
use crate::rate_limiter::Unthrottled;

/// In-memory fetcher serving canned pages and recording every request
#[derive(Debug, Default)]
pub struct ScriptedFetcher {
    pages: HashMap<String, String>,
    requests: Vec<String>,
}

impl ScriptedFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_page(mut self, url: impl Into<String>, body: impl Into<String>) -> Self {
        self.pages.insert(url.into(), body.into());
        self
    }

    pub fn requests(&self) -> &[String] {
        &self.requests
    }

    pub fn into_client(self) -> RateLimitedClient<ScriptedFetcher> {
        RateLimitedClient::with_fetcher(self, Box::new(Unthrottled))
    }

    fn serve(&mut self, url: &str) -> Result<String> {
        self.requests.push(url.to_string());
        match self.pages.get(url) {
            Some(body) => Ok(body.clone()),
            None => bail!("no page scripted for {}", url),
        }
    }
}

impl Fetcher for ScriptedFetcher {
    fn fetch(&mut self, url: &str) -> Result<String> {
        self.serve(url)
    }

    fn fetch_lines(&mut self, url: &str) -> Result<Lines<'_>> {
        let body = self.serve(url)?;
        let lines: Vec<String> = body.lines().map(str::to_string).collect();
        Ok(Box::new(lines.into_iter().map(Ok)))
    }
}
