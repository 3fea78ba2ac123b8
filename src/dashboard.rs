//! Dashboard assembly: filter the raw list, then compute every visible section.

use crate::filters::{Chart, FilterStore};
use crate::models::{
    ChartDataPoint, Country, LanguageData, MapMarker, RegionShare, ScatterDataPoint, Statistics,
};
use crate::stats;
use serde::Serialize;

/// Everything the dashboard shows for one filter state. Hidden charts are `None`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardReport {
    pub showing: usize,
    pub total: usize,
    pub statistics: Statistics,
    pub world_map: Option<Vec<MapMarker>>,
    pub population_chart: Option<Vec<ChartDataPoint>>,
    pub area_chart: Option<Vec<ScatterDataPoint>>,
    pub region_distribution: Option<Vec<RegionShare>>,
    pub language_chart: Option<Vec<LanguageData>>,
}

/// Build the report for `store` over the full country list.
pub fn build_report(raw: &[Country], store: &FilterStore, top_n: usize) -> DashboardReport {
    let filtered = store.apply(raw);
    log::debug!("{} of {} countries pass the filters", filtered.len(), raw.len());
    let vis = store.chart_visibility();
    let visible = |chart: Chart| vis.is_visible(chart);

    DashboardReport {
        showing: filtered.len(),
        total: raw.len(),
        statistics: stats::statistics(&filtered),
        world_map: visible(Chart::WorldMap).then(|| stats::map_markers(&filtered)),
        population_chart: visible(Chart::PopulationChart)
            .then(|| stats::top_countries_by_population(&filtered, top_n)),
        area_chart: visible(Chart::AreaChart).then(|| stats::population_vs_area(&filtered)),
        region_distribution: visible(Chart::RegionDistribution)
            .then(|| stats::region_shares(&filtered)),
        language_chart: visible(Chart::LanguageChart).then(|| stats::language_data(&filtered)),
    }
}
