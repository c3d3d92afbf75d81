use std::path::PathBuf;
use std::thread;
use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use tracing::{info, warn, Level};

use leilao_scout::config::Config;
use leilao_scout::models::{CityContext, CityEntry, CityUrlIndex, CityUrls, PropertyRecord};
use leilao_scout::output;
use leilao_scout::scrapers::{collector, extractor, navigator, Session};

/// Pause between detail-page visits; the auction site is quick to throttle
/// faster clients.
const DETAIL_PACING: Duration = Duration::from_millis(1500);

#[derive(Parser, Debug)]
#[clap(author, version, about = "Leilão Scout - foreclosure property crawler")]
struct Args {
    /// Two-letter region (state) code to crawl
    #[clap(short, long, default_value = "SP")]
    region: String,

    /// Directory where the city index and spreadsheet are written
    #[clap(short, long, default_value = ".")]
    output_dir: PathBuf,

    /// Maximum result pages to walk per city (all pages if not set)
    #[clap(long)]
    max_pages: Option<usize>,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_max_level(Level::INFO)
        .init();

    let args = Args::parse();
    let config = Config::from_env();
    let region = args.region.to_uppercase();

    info!("Leilão Scout - crawling region {}", region);

    let session = Session::launch(&config)?;

    // Collection phase: enumerate cities, then gather every city's URLs.
    navigator::open_search(&session)?;
    navigator::select_region(&session, &region)?;
    let cities = navigator::list_cities(&session)?;
    info!("Found {} cities in {}", cities.len(), region);

    let mut index: CityUrlIndex = CityUrlIndex::new();
    for city in &cities {
        let urls = match collect_city(&session, &region, city, args.max_pages) {
            Ok(urls) => {
                info!("{}: {} listings", city.display_name, urls.len());
                urls
            }
            Err(e) => {
                // Fatal for this city only; it is recorded with no URLs.
                warn!("Skipping city {} ({}): {:#}", city.display_name, city.code, e);
                Vec::new()
            }
        };
        index.insert(
            city.code.clone(),
            CityUrls {
                city_name: city.display_name.clone(),
                urls,
            },
        );
    }

    output::write_city_index(&args.output_dir, &region, &index)?;

    // Detail phase: visit every collected URL sequentially.
    let total: usize = index.values().map(|c| c.urls.len()).sum();
    info!("Visiting {} detail pages...", total);

    let mut records: Vec<PropertyRecord> = Vec::new();
    for (code, entry) in &index {
        let ctx = CityContext {
            region: region.clone(),
            city_code: code.clone(),
            city_name: entry.city_name.clone(),
        };
        for url in &entry.urls {
            if let Some(record) = extractor::fetch_detail(&session, url, &ctx) {
                records.push(record);
            }
            thread::sleep(DETAIL_PACING);
        }
    }

    output::write_spreadsheet(&args.output_dir, &region, &records)?;

    info!(
        "Done: {} of {} listings extracted across {} cities",
        records.len(),
        total,
        index.len()
    );

    Ok(())
}

/// Re-drive the search wizard for one city and collect its listing URLs.
fn collect_city(
    session: &Session,
    region: &str,
    city: &CityEntry,
    max_pages: Option<usize>,
) -> Result<Vec<String>> {
    navigator::open_search(session)?;
    navigator::select_region(session, region)?;
    navigator::select_city(session, &city.code)?;
    collector::collect_city_urls(session, max_pages)
}
