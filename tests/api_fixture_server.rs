//! Exercise the HTTP adapter against a loopback server with canned responses.

use std::io::{BufRead, BufReader, Write};
use std::net::TcpListener;
use std::thread;
use worldpulse::api::FetchError;
use worldpulse::{Client, CountryCache, Region};

const CORE: &str = r#"[
  {"name":{"common":"Japan","official":"Japan"},"cca2":"JP","cca3":"JPN","region":"Asia",
   "latlng":[36.0,138.0],"area":377930.0,"population":125836021,"capital":["Tokyo"],
   "flags":{"png":"p","svg":"s"}},
  {"name":{"common":"France","official":"French Republic"},"cca2":"FR","cca3":"FRA","region":"Europe",
   "latlng":[46.0,2.0],"area":551695.0,"population":67391582,"capital":["Paris"],
   "flags":{"png":"p","svg":"s"}}
]"#;

const EXTRA: &str = r#"[
  {"name":{"common":"France","official":"French Republic"},"cca3":"FRA",
   "languages":{"fra":"French"},"continents":["Europe"]},
  {"name":{"common":"Japan","official":"Japan"},"cca3":"JPN",
   "languages":{"jpn":"Japanese"},"continents":["Asia"]}
]"#;

/// Serve every connection with `route(path) -> (status, body)`. Returns the base URL.
fn serve(route: fn(&str) -> (u16, String)) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    thread::spawn(move || {
        for stream in listener.incoming() {
            let Ok(mut stream) = stream else { continue };
            thread::spawn(move || {
                let mut reader = BufReader::new(stream.try_clone().unwrap());
                let mut request_line = String::new();
                reader.read_line(&mut request_line).unwrap();
                // drain headers
                loop {
                    let mut line = String::new();
                    if reader.read_line(&mut line).unwrap() == 0 || line == "\r\n" {
                        break;
                    }
                }
                let path = request_line.split_whitespace().nth(1).unwrap_or("/").to_string();
                let (status, body) = route(&path);
                let resp = format!(
                    "HTTP/1.1 {} X\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                    status,
                    body.len(),
                    body
                );
                let _ = stream.write_all(resp.as_bytes());
            });
        }
    });
    format!("http://{}/v3.1", addr)
}

/// Loopback client that ignores any proxy configured in the environment.
fn local_client(base_url: String) -> Client {
    let http = reqwest::blocking::Client::builder()
        .no_proxy()
        .build()
        .unwrap();
    Client::with_http(base_url, http)
}

fn happy_route(path: &str) -> (u16, String) {
    if path.starts_with("/v3.1/all?fields=name,cca2,") {
        (200, CORE.to_string())
    } else if path.starts_with("/v3.1/all?fields=name,cca3,languages") {
        (200, EXTRA.to_string())
    } else if path == "/v3.1/name/United%20Kingdom" || path == "/v3.1/region/Asia" {
        // reuse the core shape; full records are a superset
        (200, CORE.to_string())
    } else {
        (404, r#"{"status":404,"message":"Not Found"}"#.to_string())
    }
}

#[test]
fn fetch_all_merges_both_halves() {
    let client = local_client(serve(happy_route));
    let countries = client.fetch_all_countries().unwrap();
    assert_eq!(countries.len(), 2);
    assert_eq!(countries[0].cca3, "JPN");
    assert_eq!(
        countries[0].languages.as_ref().unwrap()["jpn"],
        "Japanese".to_string()
    );
    assert_eq!(countries[1].cca3, "FRA");
    assert_eq!(countries[1].continents, vec!["Europe"]);
}

#[test]
fn auxiliary_endpoints_encode_their_segment() {
    let client = local_client(serve(happy_route));
    assert_eq!(client.fetch_country_by_name("United Kingdom").unwrap().len(), 2);
    assert_eq!(client.fetch_countries_by_region(Region::Asia).unwrap().len(), 2);

    let err = client.fetch_countries_by_region(Region::Oceania).unwrap_err();
    assert!(matches!(err, FetchError::Status { .. }));
    assert!(err.to_string().starts_with("failed to fetch countries by region"));
}

fn half_broken_route(path: &str) -> (u16, String) {
    if path.contains("languages") {
        (500, "oops".to_string())
    } else {
        (200, CORE.to_string())
    }
}

#[test]
fn one_failing_half_fails_the_whole_fetch() {
    let client = local_client(serve(half_broken_route));
    let err = client.fetch_all_countries().unwrap_err();
    match &err {
        FetchError::Status { status, .. } => assert_eq!(status.as_u16(), 500),
        other => panic!("expected Status, got {}", other),
    }
    assert!(err.to_string().starts_with("failed to fetch countries"));
}

fn garbage_route(_path: &str) -> (u16, String) {
    (200, "not json".to_string())
}

#[test]
fn undecodable_body_is_a_decode_error() {
    let client = local_client(serve(garbage_route));
    let err = client.fetch_all_countries().unwrap_err();
    assert!(matches!(err, FetchError::Decode { .. }));
}

#[test]
fn cache_fetches_once_while_fresh() {
    let client = local_client(serve(happy_route));
    let mut cache = CountryCache::default();
    assert_eq!(cache.get_or_fetch(&client).unwrap().len(), 2);
    let first = cache.fetched_at();

    // Point at a dead server: a fresh cache must not hit the network.
    let dead = local_client(serve(garbage_route));
    assert_eq!(cache.get_or_fetch(&dead).unwrap().len(), 2);
    assert_eq!(cache.fetched_at(), first);
}
