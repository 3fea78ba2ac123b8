//! Filter state, chart visibility, and the filtering pipeline.
//!
//! `FilterStore` is an owned container: the caller creates it and passes it by reference,
//! so the pipeline can be exercised without any UI.
//!
//! Rules worth knowing:
//! - An **empty region selection means no region restriction**; every region passes.
//! - Ranges are inclusive on both ends and are not validated. An inverted range
//!   (`min > max`) is accepted and simply matches nothing.

use crate::models::{Country, Region};
use serde::{Deserialize, Serialize};

pub const DEFAULT_POPULATION_RANGE: NumericRange = NumericRange::new(0.0, 1_500_000_000.0);
pub const DEFAULT_AREA_RANGE: NumericRange = NumericRange::new(0.0, 17_100_000.0);

/// Minimum query length before suggestions are produced.
pub const SUGGESTION_MIN_CHARS: usize = 2;
pub const DEFAULT_SUGGESTION_LIMIT: usize = 8;

/// Inclusive numeric bounds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NumericRange {
    pub min: f64,
    pub max: f64,
}

impl NumericRange {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    #[inline]
    pub fn contains(&self, v: f64) -> bool {
        self.min <= v && v <= self.max
    }

    pub fn is_inverted(&self) -> bool {
        self.min > self.max
    }
}

/// User-controlled predicates narrowing the country list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilterState {
    pub search: String,
    /// Selected regions, without duplicates, in selection order.
    pub regions: Vec<Region>,
    pub population_range: NumericRange,
    pub area_range: NumericRange,
}

impl Default for FilterState {
    fn default() -> Self {
        Self {
            search: String::new(),
            regions: Vec::new(),
            population_range: DEFAULT_POPULATION_RANGE,
            area_range: DEFAULT_AREA_RANGE,
        }
    }
}

/// Charts whose visibility can be toggled independently.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Chart {
    WorldMap,
    PopulationChart,
    AreaChart,
    RegionDistribution,
    LanguageChart,
}

impl Chart {
    pub const ALL: [Chart; 5] = [
        Chart::WorldMap,
        Chart::PopulationChart,
        Chart::AreaChart,
        Chart::RegionDistribution,
        Chart::LanguageChart,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Chart::WorldMap => "World Map",
            Chart::PopulationChart => "Population Chart",
            Chart::AreaChart => "Area Chart",
            Chart::RegionDistribution => "Region Distribution",
            Chart::LanguageChart => "Language Chart",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChartVisibility {
    pub world_map: bool,
    pub population_chart: bool,
    pub area_chart: bool,
    pub region_distribution: bool,
    pub language_chart: bool,
}

impl Default for ChartVisibility {
    fn default() -> Self {
        Self {
            world_map: true,
            population_chart: true,
            area_chart: true,
            region_distribution: true,
            language_chart: true,
        }
    }
}

impl ChartVisibility {
    fn flag_mut(&mut self, chart: Chart) -> &mut bool {
        match chart {
            Chart::WorldMap => &mut self.world_map,
            Chart::PopulationChart => &mut self.population_chart,
            Chart::AreaChart => &mut self.area_chart,
            Chart::RegionDistribution => &mut self.region_distribution,
            Chart::LanguageChart => &mut self.language_chart,
        }
    }

    pub fn is_visible(&self, chart: Chart) -> bool {
        match chart {
            Chart::WorldMap => self.world_map,
            Chart::PopulationChart => self.population_chart,
            Chart::AreaChart => self.area_chart,
            Chart::RegionDistribution => self.region_distribution,
            Chart::LanguageChart => self.language_chart,
        }
    }

    /// Flip one flag; the others are untouched.
    pub fn toggle(&mut self, chart: Chart) {
        let flag = self.flag_mut(chart);
        *flag = !*flag;
    }
}

/// Owned filter + chart visibility state with its mutators.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterStore {
    state: FilterState,
    chart_visibility: ChartVisibility,
}

impl FilterStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &FilterState {
        &self.state
    }

    pub fn chart_visibility(&self) -> &ChartVisibility {
        &self.chart_visibility
    }

    pub fn set_search(&mut self, search: impl Into<String>) {
        self.state.search = search.into();
    }

    /// Replace the selection. Duplicates are dropped, first occurrence wins.
    pub fn set_regions(&mut self, regions: impl IntoIterator<Item = Region>) {
        let mut out: Vec<Region> = Vec::new();
        for r in regions {
            if !out.contains(&r) {
                out.push(r);
            }
        }
        self.state.regions = out;
    }

    /// Remove `region` if selected, otherwise append it.
    pub fn toggle_region(&mut self, region: Region) {
        let regions = &mut self.state.regions;
        if let Some(pos) = regions.iter().position(|r| *r == region) {
            regions.remove(pos);
        } else {
            regions.push(region);
        }
    }

    pub fn set_population_range(&mut self, range: NumericRange) {
        if range.is_inverted() {
            log::debug!("inverted population range {:?} will match nothing", range);
        }
        self.state.population_range = range;
    }

    pub fn set_area_range(&mut self, range: NumericRange) {
        if range.is_inverted() {
            log::debug!("inverted area range {:?} will match nothing", range);
        }
        self.state.area_range = range;
    }

    pub fn toggle_chart(&mut self, chart: Chart) {
        self.chart_visibility.toggle(chart);
    }

    /// Restore every filter field and chart flag to its default.
    pub fn reset_filters(&mut self) {
        self.state = FilterState::default();
        self.chart_visibility = ChartVisibility::default();
    }

    /// `filter_countries` against this store's current state.
    pub fn apply(&self, countries: &[Country]) -> Vec<Country> {
        filter_countries(countries, &self.state)
    }
}

/// Case-insensitive substring match on common name, official name, or any capital.
pub fn matches_search(country: &Country, needle_lower: &str) -> bool {
    country.name.common.to_lowercase().contains(needle_lower)
        || country.name.official.to_lowercase().contains(needle_lower)
        || country
            .capital
            .as_ref()
            .is_some_and(|caps| caps.iter().any(|c| c.to_lowercase().contains(needle_lower)))
}

/// Narrow `countries` by search, region, population range, then area range.
///
/// Pure and order-preserving; the result is always recomputed from the full list.
pub fn filter_countries(countries: &[Country], state: &FilterState) -> Vec<Country> {
    let needle = state.search.to_lowercase();

    countries
        .iter()
        .filter(|c| state.search.is_empty() || matches_search(c, &needle))
        // Empty selection: no region restriction.
        .filter(|c| state.regions.is_empty() || state.regions.contains(&c.region))
        .filter(|c| state.population_range.contains(c.population as f64))
        .filter(|c| state.area_range.contains(c.area))
        .cloned()
        .collect()
}

/// Up to `limit` countries matching `query`, for type-ahead. Queries shorter than
/// two characters yield nothing.
pub fn search_suggestions<'a>(
    countries: &'a [Country],
    query: &str,
    limit: usize,
) -> Vec<&'a Country> {
    if query.chars().count() < SUGGESTION_MIN_CHARS {
        return Vec::new();
    }
    let needle = query.to_lowercase();
    countries
        .iter()
        .filter(|c| matches_search(c, &needle))
        .take(limit)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn range_bounds_are_inclusive() {
        let r = NumericRange::new(10.0, 20.0);
        assert!(r.contains(10.0));
        assert!(r.contains(20.0));
        assert!(!r.contains(20.5));
        assert!(!NumericRange::new(5.0, 1.0).contains(3.0));
    }

    #[test]
    fn toggle_chart_only_flips_one_flag() {
        let mut vis = ChartVisibility::default();
        vis.toggle(Chart::AreaChart);
        for chart in Chart::ALL {
            assert_eq!(vis.is_visible(chart), chart != Chart::AreaChart, "{:?}", chart);
        }
        vis.toggle(Chart::AreaChart);
        assert_eq!(vis, ChartVisibility::default());
    }

    #[test]
    fn set_regions_drops_duplicates() {
        let mut store = FilterStore::new();
        store.set_regions([Region::Asia, Region::Europe, Region::Asia]);
        assert_eq!(store.state().regions, vec![Region::Asia, Region::Europe]);
    }
}
