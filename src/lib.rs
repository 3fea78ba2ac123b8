//! worldpulse
//!
//! A lightweight Rust library for fetching country data from the REST Countries API,
//! filtering it, and computing dashboard statistics. Pairs with the `worldpulse` CLI.
//!
//! ### Features
//! - Fetch every country in one call (two concurrent partial requests joined by `cca3`)
//! - Filter by search text, regions, population and area ranges
//! - Aggregates: per-region, per-language, top-N by population, population vs. area, totals
//! - Save as CSV or JSON
//!
//! ### Example
//! ```no_run
//! use worldpulse::{Client, FilterStore, Region};
//!
//! let client = Client::default();
//! let countries = client.fetch_all_countries()?;
//!
//! let mut filters = FilterStore::new();
//! filters.toggle_region(Region::Europe);
//! filters.set_search("ger");
//! let filtered = filters.apply(&countries);
//!
//! let stats = worldpulse::stats::statistics(&filtered);
//! println!("{:#?}", stats);
//! worldpulse::storage::save_csv(&filtered, "europe.csv")?;
//! # Ok::<(), anyhow::Error>(())
//! ```

pub mod api;
pub mod cache;
pub mod dashboard;
pub mod filters;
pub mod format;
pub mod models;
pub mod stats;
pub mod storage;

pub use api::{Client, FetchError};
pub use cache::CountryCache;
pub use filters::{Chart, ChartVisibility, FilterState, FilterStore, NumericRange};
pub use models::{Country, Region};
