use crate::dashboard::DashboardReport;
use crate::models::Country;
use anyhow::Result;
use csv::WriterBuilder;
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Save countries as flat CSV with header. Lists are joined with `;`.
pub fn save_csv<P: AsRef<Path>>(countries: &[Country], path: P) -> Result<()> {
    let mut wtr = WriterBuilder::new().from_path(path)?;
    wtr.serialize((
        "cca3", "cca2", "name", "official_name", "region", "subregion", "population", "area",
        "lat", "lng", "capitals", "languages",
    ))?;
    for c in countries {
        let (lat, lng) = match c.coordinates() {
            Some((lat, lng)) => (Some(lat), Some(lng)),
            None => (None, None),
        };
        let capitals = c.capital.as_ref().map(|caps| caps.join(";")).unwrap_or_default();
        let languages = c
            .languages
            .as_ref()
            .map(|l| l.values().cloned().collect::<Vec<_>>().join(";"))
            .unwrap_or_default();
        wtr.serialize((
            &c.cca3,
            &c.cca2,
            &c.name.common,
            &c.name.official,
            c.region.as_str(),
            &c.subregion,
            c.population,
            c.area,
            lat,
            lng,
            capitals,
            languages,
        ))?;
    }
    wtr.flush()?;
    Ok(())
}

/// Save countries as a pretty JSON array (same shape the API returns, so it can be reloaded).
pub fn save_json<P: AsRef<Path>>(countries: &[Country], path: P) -> Result<()> {
    let mut f = File::create(path)?;
    let s = serde_json::to_string_pretty(countries)?;
    f.write_all(s.as_bytes())?;
    Ok(())
}

/// Load countries previously written by `save_json`.
pub fn load_json<P: AsRef<Path>>(path: P) -> Result<Vec<Country>> {
    let f = File::open(path)?;
    Ok(serde_json::from_reader(std::io::BufReader::new(f))?)
}

/// Save a dashboard report as pretty JSON.
pub fn save_report_json<P: AsRef<Path>>(report: &DashboardReport, path: P) -> Result<()> {
    let mut f = File::create(path)?;
    let s = serde_json::to_string_pretty(report)?;
    f.write_all(s.as_bytes())?;
    Ok(())
}
