//! Human-readable number formatting for the dashboard output.
//!
//! Presentation only: nothing here feeds back into aggregation.

use num_format::{Locale, ToFormattedString};

/// Abbreviate large values: `1.23B`, `45.60M`, `7.00K`; below 1000 a rounded integer.
///
/// Ties round up (`1125` -> `1.13K`), not to even.
pub fn format_number(num: f64) -> String {
    if num >= 1.0e9 {
        format!("{:.2}B", round2(num / 1.0e9))
    } else if num >= 1.0e6 {
        format!("{:.2}M", round2(num / 1.0e6))
    } else if num >= 1.0e3 {
        format!("{:.2}K", round2(num / 1.0e3))
    } else {
        // round half away from zero; `{:.0}` alone would round half to even
        format!("{:.0}", num.round())
    }
}

fn round2(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}

/// `format_number` with a km² suffix.
pub fn format_area_short(area: f64) -> String {
    format!("{} km²", format_number(area))
}

/// Full population with en-US digit grouping, e.g. `83,240,525`.
pub fn format_population(population: u64) -> String {
    population.to_formatted_string(&Locale::en)
}

/// Full area with en-US grouping and up to three fraction digits, e.g. `357,114.5 km²`.
pub fn format_area(area: f64) -> String {
    let rounded = (area * 1000.0).round() / 1000.0;
    let whole = rounded.trunc();
    let frac = ((rounded - whole) * 1000.0).round() as u64;
    let mut s = (whole as u64).to_formatted_string(&Locale::en);
    if frac > 0 {
        let digits = format!("{:03}", frac);
        s.push('.');
        s.push_str(digits.trim_end_matches('0'));
    }
    s.push_str(" km²");
    s
}

/// `value / total` as a percentage with one decimal. A zero total yields `0.0%`.
pub fn format_percent(value: f64, total: f64) -> String {
    if total == 0.0 {
        return "0.0%".to_string();
    }
    format!("{:.1}%", value / total * 100.0)
}
