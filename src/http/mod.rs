mod client;
#[cfg(test)]
pub mod scripted;

pub use client::{Fetcher, HttpFetcher, Lines, RateLimitedClient};
