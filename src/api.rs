//! Synchronous client for the **REST Countries API (v3.1)**.
//!
//! The full country list is fetched as two partial responses because the API caps the
//! length of the `fields` query parameter. Both halves are requested concurrently and
//! joined by the three-letter country code (`cca3`).
//!
//! ### Notes
//! - No retries. Any transport error or non-2xx status fails the whole call.
//! - Requests time out after 10s; adjust via `Client::with_http`.
//!
//! Typical usage:
//! ```no_run
//! # use worldpulse::Client;
//! let client = Client::default();
//! let countries = client.fetch_all_countries()?;
//! println!("{} countries", countries.len());
//! # Ok::<(), worldpulse::api::FetchError>(())
//! ```
use crate::models::{Country, CountryCore, CountryExtra, Region};
use percent_encoding::{AsciiSet, NON_ALPHANUMERIC};
use reqwest::blocking::Client as HttpClient;
use reqwest::redirect::Policy;
use serde::de::DeserializeOwned;
use std::collections::HashMap;
use std::time::Duration;
use thiserror::Error;

pub const DEFAULT_BASE_URL: &str = "https://restcountries.com/v3.1";

/// Field subsets for the two halves of `fetch_all_countries`. Both carry `cca3`, the join key.
pub const CORE_FIELDS: &str = "name,cca2,cca3,region,subregion,latlng,area,population,capital,flags";
pub const EXTRA_FIELDS: &str = "name,cca3,languages,currencies,continents,capitalInfo";

/// Failure of a country fetch. The message always starts with the operation that failed.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("{context}: {source}")]
    Transport {
        context: &'static str,
        #[source]
        source: reqwest::Error,
    },
    #[error("{context}: request to {url} failed with HTTP {status}")]
    Status {
        context: &'static str,
        url: String,
        status: reqwest::StatusCode,
    },
    #[error("{context}: could not decode response from {url}: {source}")]
    Decode {
        context: &'static str,
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("failed to fetch countries: {cca3} is missing from the {missing_from} response")]
    Unmatched {
        cca3: String,
        missing_from: &'static str,
    },
    #[error("failed to fetch countries: a request worker panicked")]
    WorkerPanicked,
}

const ALL_CONTEXT: &str = "failed to fetch countries";
const NAME_CONTEXT: &str = "failed to fetch country";
const REGION_CONTEXT: &str = "failed to fetch countries by region";

#[derive(Debug, Clone)]
pub struct Client {
    pub base_url: String,
    http: HttpClient,
}

impl Default for Client {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

// Allow -, _, . unescaped in path segments
const SAFE: &AsciiSet = &NON_ALPHANUMERIC.remove(b'-').remove(b'_').remove(b'.');

fn enc_segment(s: &str) -> String {
    percent_encoding::utf8_percent_encode(s.trim(), SAFE).to_string()
}

impl Client {
    /// Client against a custom base URL (no trailing slash), e.g. a mirror or a test server.
    pub fn new(base_url: impl Into<String>) -> Self {
        let http = HttpClient::builder()
            .timeout(Duration::from_secs(10)) // total request timeout
            .connect_timeout(Duration::from_secs(5)) // connect timeout
            .redirect(Policy::limited(5)) // cap redirects
            .user_agent(concat!("worldpulse/", env!("CARGO_PKG_VERSION"))) // set user agent
            .build()
            .expect("reqwest client build");
        Self::with_http(base_url, http)
    }

    /// Client with a caller-configured `reqwest` blocking client.
    pub fn with_http(base_url: impl Into<String>, http: HttpClient) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { base_url, http }
    }

    fn get_json<T: DeserializeOwned>(
        &self,
        context: &'static str,
        url: &str,
    ) -> Result<T, FetchError> {
        log::debug!("GET {}", url);
        let resp = self
            .http
            .get(url)
            .send()
            .map_err(|source| FetchError::Transport { context, source })?;
        let status = resp.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                context,
                url: url.to_string(),
                status,
            });
        }
        resp.json().map_err(|source| FetchError::Decode {
            context,
            url: url.to_string(),
            source,
        })
    }

    /// Fetch every country as a composite record.
    ///
    /// ### Errors
    /// - Transport error or non-2xx status from either request
    /// - JSON decoding error (including a region outside the six known values)
    /// - A `cca3` present in one response but not the other (`FetchError::Unmatched`)
    pub fn fetch_all_countries(&self) -> Result<Vec<Country>, FetchError> {
        let core_url = format!("{}/all?fields={}", self.base_url, CORE_FIELDS);
        let extra_url = format!("{}/all?fields={}", self.base_url, EXTRA_FIELDS);

        let (core, extra) = std::thread::scope(|s| {
            let core = s.spawn(|| self.get_json::<Vec<CountryCore>>(ALL_CONTEXT, &core_url));
            let extra = s.spawn(|| self.get_json::<Vec<CountryExtra>>(ALL_CONTEXT, &extra_url));
            (core.join(), extra.join())
        });
        let core = core.map_err(|_| FetchError::WorkerPanicked)??;
        let extra = extra.map_err(|_| FetchError::WorkerPanicked)??;

        let merged = merge_partials(core, extra)?;
        log::info!("fetched {} countries", merged.len());
        Ok(merged)
    }

    /// Countries whose name matches `name` (`GET /name/{name}`).
    pub fn fetch_country_by_name(&self, name: &str) -> Result<Vec<Country>, FetchError> {
        let url = format!("{}/name/{}", self.base_url, enc_segment(name));
        self.get_json(NAME_CONTEXT, &url)
    }

    /// Countries of a single region (`GET /region/{region}`).
    pub fn fetch_countries_by_region(&self, region: Region) -> Result<Vec<Country>, FetchError> {
        let url = format!("{}/region/{}", self.base_url, enc_segment(region.as_str()));
        self.get_json(REGION_CONTEXT, &url)
    }
}

/// Join the two partial responses by `cca3`, keeping the order of `core`.
///
/// Every code must appear in both lists; the first one missing from either side is reported.
pub fn merge_partials(
    core: Vec<CountryCore>,
    extra: Vec<CountryExtra>,
) -> Result<Vec<Country>, FetchError> {
    let mut by_code: HashMap<String, CountryExtra> = extra
        .into_iter()
        .map(|e| (e.cca3.clone(), e))
        .collect();

    let mut out = Vec::with_capacity(core.len());
    for c in core {
        let Some(e) = by_code.remove(&c.cca3) else {
            return Err(FetchError::Unmatched {
                cca3: c.cca3,
                missing_from: "languages/currencies",
            });
        };
        out.push(Country::from_parts(c, e));
    }

    // Anything left over had no counterpart in the core response.
    if let Some(cca3) = by_code.into_keys().min() {
        return Err(FetchError::Unmatched {
            cca3,
            missing_from: "name/region/population",
        });
    }
    Ok(out)
}
