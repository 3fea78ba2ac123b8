use crate::models::{
    ChartDataPoint, Country, LanguageData, MapMarker, Region, RegionData, RegionShare,
    ScatterDataPoint, Statistics,
};
use std::collections::{BTreeSet, HashMap};

pub const TOP_LANGUAGES: usize = 15;
pub const DEFAULT_TOP_COUNTRIES: usize = 20;

/// Marker radius bounds for the point map.
pub const MIN_MARKER_RADIUS: f64 = 3.0;
pub const MAX_MARKER_RADIUS: f64 = 20.0;

/// Hex color per region, shared by every chart.
pub const REGION_COLORS: [(Region, &str); 6] = [
    (Region::Africa, "#f59e0b"),
    (Region::Americas, "#10b981"),
    (Region::Asia, "#ef4444"),
    (Region::Europe, "#3b82f6"),
    (Region::Oceania, "#8b5cf6"),
    (Region::Antarctic, "#6b7280"),
];

pub fn region_color(region: Region) -> &'static str {
    REGION_COLORS
        .iter()
        .find(|(r, _)| *r == region)
        .map(|(_, c)| *c)
        .unwrap_or("#6b7280")
}

/// Group by region in order of first appearance.
///
/// `average_area` is maintained incrementally (`(mean * (n - 1) + area) / n`) so results
/// match a running accumulation bit for bit.
pub fn region_data(countries: &[Country]) -> Vec<RegionData> {
    let mut out: Vec<RegionData> = Vec::new();
    let mut index: HashMap<Region, usize> = HashMap::new();

    for c in countries {
        match index.get(&c.region) {
            Some(&i) => {
                let g = &mut out[i];
                g.count += 1;
                g.total_population += c.population;
                let n = g.count as f64;
                g.average_area = (g.average_area * (n - 1.0) + c.area) / n;
            }
            None => {
                index.insert(c.region, out.len());
                out.push(RegionData {
                    region: c.region,
                    count: 1,
                    total_population: c.population,
                    average_area: c.area,
                    color: region_color(c.region),
                });
            }
        }
    }
    out
}

/// Language frequency table, most spoken first, truncated to the top 15.
///
/// Counts language display names (not codes). Ties keep encounter order.
pub fn language_data(countries: &[Country]) -> Vec<LanguageData> {
    let mut out: Vec<LanguageData> = Vec::new();
    let mut index: HashMap<String, usize> = HashMap::new();

    for c in countries {
        let Some(languages) = &c.languages else {
            continue;
        };
        for language in languages.values() {
            match index.get(language) {
                Some(&i) => {
                    out[i].count += 1;
                    out[i].countries.push(c.name.common.clone());
                }
                None => {
                    index.insert(language.clone(), out.len());
                    out.push(LanguageData {
                        language: language.clone(),
                        count: 1,
                        countries: vec![c.name.common.clone()],
                    });
                }
            }
        }
    }

    // `sort_by` is stable.
    out.sort_by(|a, b| b.count.cmp(&a.count));
    out.truncate(TOP_LANGUAGES);
    out
}

/// The `limit` most populous countries, descending. Ties keep input order.
pub fn top_countries_by_population(countries: &[Country], limit: usize) -> Vec<ChartDataPoint> {
    let mut sorted: Vec<&Country> = countries.iter().collect();
    sorted.sort_by(|a, b| b.population.cmp(&a.population));
    sorted
        .into_iter()
        .take(limit)
        .map(|c| ChartDataPoint {
            name: c.name.common.clone(),
            value: c.population,
            color: Some(region_color(c.region)),
        })
        .collect()
}

/// One point per country: area on x, population on y.
pub fn population_vs_area(countries: &[Country]) -> Vec<ScatterDataPoint> {
    countries
        .iter()
        .map(|c| ScatterDataPoint {
            name: c.name.common.clone(),
            x: c.area,
            y: c.population,
            region: c.region,
        })
        .collect()
}

/// Totals, means and the number of distinct regions present.
///
/// Means are `None` for an empty list.
pub fn statistics(countries: &[Country]) -> Statistics {
    let total_countries = countries.len();
    let total_population: u64 = countries.iter().map(|c| c.population).sum();
    let total_area: f64 = countries.iter().map(|c| c.area).sum();
    let regions: BTreeSet<Region> = countries.iter().map(|c| c.region).collect();

    let mean = |total: f64| {
        if total_countries > 0 {
            Some(total / total_countries as f64)
        } else {
            None
        }
    };

    Statistics {
        total_countries,
        total_population,
        average_population: mean(total_population as f64),
        total_area,
        average_area: mean(total_area),
        region_count: regions.len(),
    }
}

/// `sqrt(population) / 1000`, clamped to `[3, 20]`.
pub fn marker_radius(population: u64) -> f64 {
    ((population as f64).sqrt() / 1000.0).clamp(MIN_MARKER_RADIUS, MAX_MARKER_RADIUS)
}

/// Map markers for every country with a two-component coordinate; others are skipped.
pub fn map_markers(countries: &[Country]) -> Vec<MapMarker> {
    countries
        .iter()
        .filter_map(|c| {
            let (lat, lng) = c.coordinates()?;
            Some(MapMarker {
                name: c.name.common.clone(),
                cca3: c.cca3.clone(),
                lat,
                lng,
                radius: marker_radius(c.population),
                color: region_color(c.region),
            })
        })
        .collect()
}

/// Region slices for a pie chart, in `region_data` order. Percentages sum to 100
/// unless the list is empty.
pub fn region_shares(countries: &[Country]) -> Vec<RegionShare> {
    let total = countries.len();
    region_data(countries)
        .into_iter()
        .map(|g| RegionShare {
            region: g.region,
            count: g.count,
            percent: g.count as f64 / total as f64 * 100.0,
        })
        .collect()
}
