use anyhow::{Context, Result};
use log::debug;
use reqwest::blocking::Client;
use scraper::Html;
use std::io::{BufRead, BufReader};
use std::time::Duration;

use crate::config::settings::ScraperSettings;
use crate::errors::fetch_context;
use crate::rate_limiter::{RateLimiter, Throttle};

pub type Lines<'a> = Box<dyn Iterator<Item = Result<String>> + 'a>;

/// Source of raw documents; the network in production, fixtures in tests
pub trait Fetcher {
    /// Whole document text
    fn fetch(&mut self, url: &str) -> Result<String>;

    /// Document text one line at a time, read as the caller consumes it
    fn fetch_lines(&mut self, url: &str) -> Result<Lines<'_>>;
}

/// Blocking HTTP fetcher
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new(user_agent: &str, timeout_secs: u64) -> Result<Self> {
        let client = Client::builder()
            .user_agent(user_agent)
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .context("Failed to build HTTP client")?;
        Ok(Self { client })
    }

    fn send_get_request(&self, url: &str) -> Result<reqwest::blocking::Response> {
        let response = self
            .client
            .get(url)
            .send()
            .context("Failed to send GET request")?;

        if !response.status().is_success() {
            anyhow::bail!("HTTP error: {}", response.status());
        }
        Ok(response)
    }
}

impl Fetcher for HttpFetcher {
    fn fetch(&mut self, url: &str) -> Result<String> {
        self.send_get_request(url)?
            .text()
            .context("Failed to extract HTML text")
    }

    fn fetch_lines(&mut self, url: &str) -> Result<Lines<'_>> {
        let response = self.send_get_request(url)?;
        let lines = BufReader::new(response)
            .lines()
            .map(|line| line.context("Failed to read response line"));
        Ok(Box::new(lines))
    }
}

/// Fetcher wrapper that paces every request through a delay strategy
pub struct RateLimitedClient<F = HttpFetcher> {
    fetcher: F,
    rate_limiter: Box<dyn Throttle>,
}

impl RateLimitedClient<HttpFetcher> {
    pub fn new(settings: &ScraperSettings) -> Result<Self> {
        let fetcher = HttpFetcher::new(&settings.user_agent, settings.timeout_secs)?;
        let rate_limiter = RateLimiter::new(settings.rate_limit_ms);
        Ok(Self::with_fetcher(fetcher, Box::new(rate_limiter)))
    }
}

impl<F: Fetcher> RateLimitedClient<F> {
    pub fn with_fetcher(fetcher: F, rate_limiter: Box<dyn Throttle>) -> Self {
        Self {
            fetcher,
            rate_limiter,
        }
    }

    pub fn get_text(&mut self, url: &str) -> Result<String> {
        self.rate_limiter.wait();
        debug!("GET {}", url);
        self.fetcher.fetch(url).with_context(|| fetch_context(url))
    }

    pub fn get_html(&mut self, url: &str) -> Result<Html> {
        let text = self.get_text(url)?;
        Ok(Html::parse_document(&text))
    }

    pub fn get_lines(&mut self, url: &str) -> Result<Lines<'_>> {
        self.rate_limiter.wait();
        debug!("GET (streaming) {}", url);
        self.fetcher
            .fetch_lines(url)
            .with_context(|| fetch_context(url))
    }

    pub fn fetcher(&self) -> &F {
        &self.fetcher
    }
}
