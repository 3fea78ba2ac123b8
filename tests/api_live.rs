//! Live API tests. Run with: `cargo test --features online -- --nocapture`
#![cfg(feature = "online")]

use worldpulse::stats::{region_data, statistics};
use worldpulse::{Client, Region};

#[test]
fn fetch_all_countries_merges_everything() {
    let cli = Client::default();
    let countries = cli.fetch_all_countries().unwrap();
    assert!(countries.len() > 200);

    // Both halves landed on the same record.
    let de = countries.iter().find(|c| c.cca3 == "DEU").unwrap();
    assert_eq!(de.region, Region::Europe);
    assert!(de.population > 0);
    assert!(de.languages.as_ref().unwrap().values().any(|l| l == "German"));

    let s = statistics(&countries);
    assert_eq!(s.total_countries, countries.len());
    assert_eq!(
        region_data(&countries).iter().map(|g| g.count).sum::<usize>(),
        countries.len()
    );
}

#[test]
fn fetch_by_region() {
    let cli = Client::default();
    let pts = cli.fetch_countries_by_region(Region::Oceania).unwrap();
    assert!(!pts.is_empty());
    assert!(pts.iter().all(|c| c.region == Region::Oceania));
}

#[test]
fn fetch_by_name() {
    let cli = Client::default();
    let found = cli.fetch_country_by_name("germany").unwrap();
    assert!(found.iter().any(|c| c.cca3 == "DEU"));
}
