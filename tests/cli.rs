use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::process::Command;
use tempfile::tempdir;

const FIXTURE: &str = r#"[
  {"name":{"common":"France","official":"French Republic"},"cca2":"FR","cca3":"FRA",
   "region":"Europe","latlng":[46.0,2.0],"area":551695.0,"population":67391582,
   "capital":["Paris"],"languages":{"fra":"French"},"flags":{"png":"","svg":""},"continents":["Europe"]},
  {"name":{"common":"Botswana","official":"Republic of Botswana"},"cca2":"BW","cca3":"BWA",
   "region":"Africa","latlng":[-22.0,24.0],"area":582000.0,"population":2351625,
   "capital":["Gaborone"],"languages":{"eng":"English","tsn":"Tswana"},"flags":{"png":"","svg":""},"continents":["Africa"]},
  {"name":{"common":"Japan","official":"Japan"},"cca2":"JP","cca3":"JPN",
   "region":"Asia","latlng":[36.0,138.0],"area":377930.0,"population":125836021,
   "capital":["Tokyo"],"languages":{"jpn":"Japanese"},"flags":{"png":"","svg":""},"continents":["Asia"]}
]"#;

#[test]
fn cli_shows_help() {
    let mut cmd = Command::cargo_bin("worldpulse").unwrap();
    cmd.arg("--help");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("worldpulse"));
}

#[test]
fn dashboard_from_saved_file() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("countries.json");
    std::fs::write(&input, FIXTURE).unwrap();

    let mut cmd = Command::cargo_bin("worldpulse").unwrap();
    cmd.args(["dashboard", "--input"]).arg(&input);
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Total Countries: 3"))
        .stdout(predicate::str::contains("Regions: 3"))
        .stdout(predicate::str::contains("125,836,021"))
        .stdout(predicate::str::contains("Total Area: 1.51M km²"))
        .stdout(predicate::str::contains("Showing 3 of 3 countries"));
}

#[test]
fn dashboard_filters_hides_and_exports() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("countries.json");
    let out = dir.path().join("filtered.csv");
    let report = dir.path().join("report.json");
    std::fs::write(&input, FIXTURE).unwrap();

    let mut cmd = Command::cargo_bin("worldpulse").unwrap();
    cmd.args(["dashboard", "--region", "europe", "--region", "Africa", "--hide", "languages"])
        .arg("--input")
        .arg(&input)
        .arg("--out")
        .arg(&out)
        .arg("--report")
        .arg(&report);
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Showing 2 of 3 countries"))
        .stdout(predicate::str::contains("Language Chart").not());

    let csv = std::fs::read_to_string(&out).unwrap();
    assert_eq!(csv.lines().count(), 3);
    assert!(csv.contains("FRA"));
    assert!(!csv.contains("JPN"));

    let v: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&report).unwrap()).unwrap();
    assert_eq!(v["showing"], 2);
    assert_eq!(v["statistics"]["region_count"], 2);
    assert!(v["language_chart"].is_null());
}

#[test]
fn capital_search_via_suggest() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("countries.json");
    std::fs::write(&input, FIXTURE).unwrap();

    let mut cmd = Command::cargo_bin("worldpulse").unwrap();
    cmd.args(["suggest", "gabo", "--input"]).arg(&input);
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("BWA  Botswana (Africa)"));
}

#[test]
fn unknown_region_is_a_usage_error() {
    let mut cmd = Command::cargo_bin("worldpulse").unwrap();
    cmd.args(["region", "Atlantis"]);
    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("unknown region"));
}

// Live test (opt-in): cargo test --features online
#[cfg(feature = "online")]
#[test]
fn dashboard_online() {
    let mut cmd = Command::cargo_bin("worldpulse").unwrap();
    cmd.args(["dashboard", "--region", "Oceania", "--top", "5"]);
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("Showing"));
}

#[cfg(feature = "online")]
#[test]
fn country_online_prints_full_area() {
    let mut cmd = Command::cargo_bin("worldpulse").unwrap();
    cmd.args(["country", "germany"]);
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("DEU"))
        .stdout(predicate::str::is_match(r"area=[0-9,.]+ km²").unwrap());
}
