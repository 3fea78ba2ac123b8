use anyhow::Result;
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use worldpulse::api::DEFAULT_BASE_URL;
use worldpulse::dashboard::{DashboardReport, build_report};
use worldpulse::format::{
    format_area, format_area_short, format_number, format_percent, format_population,
};
use worldpulse::{Chart, Client, Country, CountryCache, FilterStore, NumericRange, Region};
use worldpulse::{filters, storage};

#[derive(Parser, Debug)]
#[command(
    name = "worldpulse",
    version,
    about = "Fetch, filter & summarize country data from the REST Countries API"
)]
struct Cli {
    /// API base URL.
    #[arg(long, global = true, default_value = DEFAULT_BASE_URL)]
    base_url: String,
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Fetch all countries, apply filters, and print the dashboard (optionally save data).
    Dashboard(DashboardArgs),
    /// Look up countries by name.
    Country {
        /// Full or partial country name (e.g., "germany").
        name: String,
    },
    /// List the countries of one region.
    Region {
        /// Africa, Americas, Asia, Europe, Oceania or Antarctic.
        region: Region,
    },
    /// Type-ahead suggestions: countries whose name or capital contains QUERY.
    Suggest {
        query: String,
        /// Maximum number of suggestions.
        #[arg(long, default_value_t = filters::DEFAULT_SUGGESTION_LIMIT)]
        limit: usize,
        /// Read countries from a JSON file written by --out instead of the API.
        #[arg(long)]
        input: Option<PathBuf>,
    },
}

#[derive(ValueEnum, Clone, Debug)]
enum OutFormat {
    Csv,
    Json,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum ChartArg {
    Map,
    Population,
    Area,
    Regions,
    Languages,
}

impl From<ChartArg> for Chart {
    fn from(c: ChartArg) -> Self {
        match c {
            ChartArg::Map => Chart::WorldMap,
            ChartArg::Population => Chart::PopulationChart,
            ChartArg::Area => Chart::AreaChart,
            ChartArg::Regions => Chart::RegionDistribution,
            ChartArg::Languages => Chart::LanguageChart,
        }
    }
}

#[derive(Args, Debug)]
struct DashboardArgs {
    /// Case-insensitive match on common name, official name, or capital.
    #[arg(short, long)]
    search: Option<String>,
    /// Restrict to a region; repeat to select several. No --region means all regions.
    #[arg(short, long = "region")]
    regions: Vec<Region>,
    #[arg(long)]
    min_population: Option<f64>,
    #[arg(long)]
    max_population: Option<f64>,
    /// Minimum area in km².
    #[arg(long)]
    min_area: Option<f64>,
    /// Maximum area in km².
    #[arg(long)]
    max_area: Option<f64>,
    /// Hide a chart section; repeatable.
    #[arg(long, value_enum)]
    hide: Vec<ChartArg>,
    /// Number of countries in the population ranking (default 20).
    #[arg(long, default_value_t = worldpulse::stats::DEFAULT_TOP_COUNTRIES)]
    top: usize,
    /// Read countries from a JSON file written by --out instead of the API.
    #[arg(long)]
    input: Option<PathBuf>,
    /// Save the filtered countries (format inferred by --format or extension).
    #[arg(long)]
    out: Option<PathBuf>,
    /// Output format (csv or json). If omitted, inferred from --out extension.
    #[arg(long, value_enum)]
    format: Option<OutFormat>,
    /// Save the dashboard report as JSON.
    #[arg(long)]
    report: Option<PathBuf>,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    let client = Client::new(&cli.base_url);
    match cli.cmd {
        Command::Dashboard(args) => cmd_dashboard(&client, args),
        Command::Country { name } => {
            let found = client.fetch_country_by_name(&name)?;
            print_country_lines(&found);
            Ok(())
        }
        Command::Region { region } => {
            let found = client.fetch_countries_by_region(region)?;
            print_country_lines(&found);
            Ok(())
        }
        Command::Suggest {
            query,
            limit,
            input,
        } => {
            let raw = load_countries(&client, input.as_ref())?;
            for c in filters::search_suggestions(&raw, &query, limit) {
                println!("{}  {} ({})", c.cca3, c.name.common, c.region);
            }
            Ok(())
        }
    }
}

fn load_countries(client: &Client, input: Option<&PathBuf>) -> Result<Vec<Country>> {
    match input {
        Some(path) => storage::load_json(path),
        None => {
            let mut cache = CountryCache::default();
            Ok(cache.get_or_fetch(client)?.to_vec())
        }
    }
}

fn build_store(args: &DashboardArgs) -> FilterStore {
    let mut store = FilterStore::new();
    if let Some(s) = &args.search {
        store.set_search(s.as_str());
    }
    store.set_regions(args.regions.iter().copied());

    let pop = store.state().population_range;
    store.set_population_range(NumericRange::new(
        args.min_population.unwrap_or(pop.min),
        args.max_population.unwrap_or(pop.max),
    ));
    let area = store.state().area_range;
    store.set_area_range(NumericRange::new(
        args.min_area.unwrap_or(area.min),
        args.max_area.unwrap_or(area.max),
    ));

    for chart in &args.hide {
        let chart = Chart::from(*chart);
        if store.chart_visibility().is_visible(chart) {
            store.toggle_chart(chart);
        }
    }
    store
}

fn cmd_dashboard(client: &Client, args: DashboardArgs) -> Result<()> {
    let raw = load_countries(client, args.input.as_ref())?;
    log::info!("loaded {} countries", raw.len());

    let store = build_store(&args);
    let report = build_report(&raw, &store, args.top);
    print_report(&report);

    if let Some(path) = args.out.as_ref() {
        let filtered = store.apply(&raw);
        let fmt = match args.format {
            Some(OutFormat::Csv) => "csv",
            Some(OutFormat::Json) => "json",
            None => path.extension().and_then(|e| e.to_str()).unwrap_or("csv"),
        }
        .to_ascii_lowercase();
        match fmt.as_str() {
            "csv" => storage::save_csv(&filtered, path)?,
            "json" => storage::save_json(&filtered, path)?,
            other => anyhow::bail!("unsupported format: {}", other),
        }
        eprintln!("Saved {} countries to {}", filtered.len(), path.display());
    }

    if let Some(path) = args.report.as_ref() {
        storage::save_report_json(&report, path)?;
        eprintln!("Wrote report to {}", path.display());
    }

    Ok(())
}

fn print_report(r: &DashboardReport) {
    let s = &r.statistics;
    println!("Total Countries: {}", s.total_countries);
    println!("Total Population: {}", format_number(s.total_population as f64));
    println!("Total Area: {}", format_area_short(s.total_area));
    println!("Regions: {}", s.region_count);

    if let Some(markers) = &r.world_map {
        println!();
        println!("== {} ==", Chart::WorldMap.label());
        println!("{} markers", markers.len());
    }

    if let Some(top) = &r.population_chart {
        println!();
        println!("== {} ==", Chart::PopulationChart.label());
        for (i, p) in top.iter().enumerate() {
            println!("{:>3}. {:<32} {:>15}", i + 1, p.name, format_population(p.value));
        }
    }

    if let Some(points) = &r.area_chart {
        println!();
        println!("== {} ==", Chart::AreaChart.label());
        println!("{} points (area vs population)", points.len());
    }

    if let Some(shares) = &r.region_distribution {
        println!();
        println!("== {} ==", Chart::RegionDistribution.label());
        for sh in shares {
            println!(
                "{:<10} {:>4}  {}",
                sh.region,
                sh.count,
                format_percent(sh.count as f64, r.showing as f64)
            );
        }
    }

    if let Some(langs) = &r.language_chart {
        println!();
        println!("== {} ==", Chart::LanguageChart.label());
        for l in langs {
            println!("{:<24} {:>4}", l.language, l.count);
        }
    }

    println!();
    println!("Showing {} of {} countries", r.showing, r.total);
}

fn print_country_lines(countries: &[Country]) {
    for c in countries {
        println!(
            "{}  {:<32} {:<9} pop={} area={} capital={}",
            c.cca3,
            c.name.common,
            c.region,
            format_population(c.population),
            format_area(c.area),
            c.primary_capital().unwrap_or("-")
        );
    }
    if countries.is_empty() {
        eprintln!("no countries found");
    }
}
