use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// One of the six fixed geographic groupings used by the REST Countries API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Region {
    Africa,
    Americas,
    Asia,
    Europe,
    Oceania,
    Antarctic,
}

impl Region {
    /// Every region, in the API's canonical order.
    pub const ALL: [Region; 6] = [
        Region::Africa,
        Region::Americas,
        Region::Asia,
        Region::Europe,
        Region::Oceania,
        Region::Antarctic,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Region::Africa => "Africa",
            Region::Americas => "Americas",
            Region::Asia => "Asia",
            Region::Europe => "Europe",
            Region::Oceania => "Oceania",
            Region::Antarctic => "Antarctic",
        }
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for Region {
    type Err = String;

    /// Case-insensitive: `"europe"`, `"Europe"` and `"EUROPE"` all parse.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Region::ALL
            .into_iter()
            .find(|r| r.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| {
                format!(
                    "unknown region '{}', expected one of: Africa, Americas, Asia, Europe, Oceania, Antarctic",
                    s
                )
            })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CountryName {
    pub common: String,
    pub official: String,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Flags {
    #[serde(default)]
    pub svg: String,
    #[serde(default)]
    pub png: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Currency {
    pub name: String,
    #[serde(default)]
    pub symbol: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CapitalInfo {
    #[serde(default)]
    pub latlng: Option<Vec<f64>>,
}

/// Composite country record, assembled from the two partial API responses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Country {
    pub name: CountryName,
    pub cca2: String,
    pub cca3: String,
    pub region: Region,
    #[serde(default)]
    pub subregion: Option<String>,
    /// `[lat, lng]`. Some territories ship an empty vector.
    #[serde(default)]
    pub latlng: Vec<f64>,
    #[serde(deserialize_with = "de_non_negative_f64")]
    pub area: f64,
    #[serde(deserialize_with = "de_u64_from_number")]
    pub population: u64,
    #[serde(default)]
    pub capital: Option<Vec<String>>,
    /// Language code -> display name (e.g. `"deu" -> "German"`).
    #[serde(default)]
    pub languages: Option<BTreeMap<String, String>>,
    #[serde(default)]
    pub currencies: Option<BTreeMap<String, Currency>>,
    #[serde(default)]
    pub flags: Flags,
    #[serde(default)]
    pub continents: Vec<String>,
    #[serde(default)]
    pub capital_info: Option<CapitalInfo>,
}

impl Country {
    /// Join the two partial records fetched for the same country.
    ///
    /// Display names come from `core`; both halves are expected to share `cca3`.
    pub fn from_parts(core: CountryCore, extra: CountryExtra) -> Self {
        Self {
            name: core.name,
            cca2: core.cca2,
            cca3: core.cca3,
            region: core.region,
            subregion: core.subregion,
            latlng: core.latlng,
            area: core.area,
            population: core.population,
            capital: core.capital,
            languages: extra.languages,
            currencies: extra.currencies,
            flags: core.flags,
            continents: extra.continents,
            capital_info: extra.capital_info,
        }
    }

    /// `(lat, lng)` when the record carries exactly two coordinate components.
    pub fn coordinates(&self) -> Option<(f64, f64)> {
        match self.latlng.as_slice() {
            [lat, lng] => Some((*lat, *lng)),
            _ => None,
        }
    }

    /// First listed capital, if any.
    pub fn primary_capital(&self) -> Option<&str> {
        self.capital
            .as_ref()
            .and_then(|caps| caps.first())
            .map(String::as_str)
    }
}

/// First field subset (`name,cca2,cca3,region,subregion,latlng,area,population,capital,flags`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CountryCore {
    pub name: CountryName,
    pub cca2: String,
    pub cca3: String,
    pub region: Region,
    #[serde(default)]
    pub subregion: Option<String>,
    #[serde(default)]
    pub latlng: Vec<f64>,
    #[serde(deserialize_with = "de_non_negative_f64")]
    pub area: f64,
    #[serde(deserialize_with = "de_u64_from_number")]
    pub population: u64,
    #[serde(default)]
    pub capital: Option<Vec<String>>,
    #[serde(default)]
    pub flags: Flags,
}

/// Second field subset (`name,cca3,languages,currencies,continents,capitalInfo`).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CountryExtra {
    pub name: CountryName,
    pub cca3: String,
    #[serde(default)]
    pub languages: Option<BTreeMap<String, String>>,
    #[serde(default)]
    pub currencies: Option<BTreeMap<String, Currency>>,
    #[serde(default)]
    pub continents: Vec<String>,
    #[serde(default)]
    pub capital_info: Option<CapitalInfo>,
}

/// Serde helper: parse a non-negative integer from a JSON integer or an integral float.
fn de_u64_from_number<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: serde::Deserializer<'de>,
{
    use serde::de::{self, Visitor};
    struct U64Visitor;

    impl<'de> Visitor<'de> for U64Visitor {
        type Value = u64;

        fn expecting(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
            write!(f, "a non-negative number")
        }

        fn visit_u64<E>(self, v: u64) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(v)
        }

        fn visit_i64<E>(self, v: i64) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            u64::try_from(v).map_err(|_| E::custom("negative population"))
        }

        fn visit_f64<E>(self, v: f64) -> Result<Self::Value, E>
        where
            E: de::Error,
        {
            if !v.is_finite() || v < 0.0 {
                return Err(E::custom("population must be a finite, non-negative number"));
            }
            Ok(v.round() as u64)
        }
    }

    deserializer.deserialize_any(U64Visitor)
}

/// Serde helper: areas are km² and must not be negative.
fn de_non_negative_f64<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let v = f64::deserialize(deserializer)?;
    if !v.is_finite() || v < 0.0 {
        return Err(serde::de::Error::custom(format!(
            "area must be a finite, non-negative number, got {}",
            v
        )));
    }
    Ok(v)
}

/// Per-region aggregate.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RegionData {
    pub region: Region,
    pub count: usize,
    pub total_population: u64,
    pub average_area: f64,
    pub color: &'static str,
}

/// Per-language frequency entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LanguageData {
    pub language: String,
    pub count: usize,
    /// Common names of the countries speaking it, in encounter order.
    pub countries: Vec<String>,
}

/// Named value for bar charts.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartDataPoint {
    pub name: String,
    pub value: u64,
    pub color: Option<&'static str>,
}

/// Area (x) vs population (y).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScatterDataPoint {
    pub name: String,
    pub x: f64,
    pub y: u64,
    pub region: Region,
}

/// Global summary over a list of countries.
///
/// Averages are `None` for an empty list rather than NaN.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Statistics {
    pub total_countries: usize,
    pub total_population: u64,
    pub average_population: Option<f64>,
    pub total_area: f64,
    pub average_area: Option<f64>,
    pub region_count: usize,
}

/// One circle on the point map.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapMarker {
    pub name: String,
    pub cca3: String,
    pub lat: f64,
    pub lng: f64,
    pub radius: f64,
    pub color: &'static str,
}

/// Slice of the region pie chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegionShare {
    pub region: Region,
    pub count: usize,
    pub percent: f64,
}
