//! In-memory session cache for the full country list.
//!
//! The list is fetched once and reused until it is older than the staleness window
//! (one hour by default). A failed refresh keeps the previous entry.

use crate::api::{Client, FetchError};
use crate::models::Country;
use chrono::{DateTime, Duration, Utc};

pub const DEFAULT_TTL_SECS: i64 = 60 * 60;

#[derive(Debug, Clone)]
struct Entry {
    fetched_at: DateTime<Utc>,
    countries: Vec<Country>,
}

#[derive(Debug, Clone)]
pub struct CountryCache {
    ttl: Duration,
    entry: Option<Entry>,
}

impl Default for CountryCache {
    fn default() -> Self {
        Self::with_ttl(Duration::seconds(DEFAULT_TTL_SECS))
    }
}

impl CountryCache {
    pub fn with_ttl(ttl: Duration) -> Self {
        Self { ttl, entry: None }
    }

    /// Seed the cache, e.g. from a previously saved JSON export.
    pub fn insert(&mut self, countries: Vec<Country>, fetched_at: DateTime<Utc>) {
        self.entry = Some(Entry {
            fetched_at,
            countries,
        });
    }

    pub fn fetched_at(&self) -> Option<DateTime<Utc>> {
        self.entry.as_ref().map(|e| e.fetched_at)
    }

    /// Cached list regardless of age.
    pub fn peek(&self) -> Option<&[Country]> {
        self.entry.as_ref().map(|e| e.countries.as_slice())
    }

    /// True when empty or when the entry is at least `ttl` old at `now`.
    pub fn is_stale_at(&self, now: DateTime<Utc>) -> bool {
        match &self.entry {
            Some(e) => now - e.fetched_at >= self.ttl,
            None => true,
        }
    }

    pub fn is_stale(&self) -> bool {
        self.is_stale_at(Utc::now())
    }

    pub fn invalidate(&mut self) {
        self.entry = None;
    }

    /// Return the cached list while fresh, otherwise fetch through `client`.
    pub fn get_or_fetch(&mut self, client: &Client) -> Result<&[Country], FetchError> {
        self.get_or_fetch_with(|| client.fetch_all_countries())
    }

    /// Same as `get_or_fetch`, with the fetch supplied by the caller.
    pub fn get_or_fetch_with<F>(&mut self, fetch: F) -> Result<&[Country], FetchError>
    where
        F: FnOnce() -> Result<Vec<Country>, FetchError>,
    {
        if self.is_stale() {
            log::debug!("country cache stale, refetching");
            let countries = fetch()?;
            self.insert(countries, Utc::now());
        }
        // Non-empty after a successful insert above, or fresh.
        Ok(self.peek().unwrap_or_default())
    }
}
