use anyhow::{Context, Result};
use clap::Parser;
use estate_scout::config::Settings;
use estate_scout::models::catalog::format_price;
use estate_scout::search::{SearchSession, SortOrder};
use estate_scout::sources::{JsonFileSource, ListingSource, RestSource};
use std::time::Duration;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "estate-scout")]
#[command(about = "Search property listings with a shareable query string", long_about = None)]
struct Cli {
    /// Search query string, e.g. "type=Residential&beds=5%2B&amenity=Gymnasium"
    #[arg(default_value = "")]
    query: String,
    /// Override the sort order (relevance, price_asc, price_desc, newest)
    #[arg(long)]
    sort: Option<SortOrder>,
    /// Read listings from this JSON file instead of the configured source
    #[arg(long)]
    listings: Option<String>,
    /// Write the matching listings to this JSON file
    #[arg(long)]
    output: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let settings = Settings::new().context("Failed to load settings")?;

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&settings.log_level)),
        )
        .init();

    let source: Box<dyn ListingSource> = match (&cli.listings, &settings.backend_url) {
        (None, Some(url)) => Box::new(RestSource::with_timeout(
            url,
            settings.backend_key.as_deref().unwrap_or_default(),
            Duration::from_secs(settings.request_timeout_secs),
        )?),
        (path, _) => Box::new(JsonFileSource::new(
            path.as_deref().unwrap_or(&settings.listings_path),
        )),
    };

    info!("Loading listings from {} source", source.source_name());
    let listings = source.fetch().await?;

    let mut session = SearchSession::with_query(listings, &cli.query);
    if let Some(sort) = cli.sort {
        session.set_sort(sort);
    }

    let total = session.listings().len();
    let active = session.active_filter_count();
    let sort = session.sort();
    let tags: Vec<String> = session.tags().into_iter().map(|t| t.label).collect();
    let share = session.query_string();
    let results = session.results();

    info!(
        "{} of {} listings match ({} active filters, sorted by {})",
        results.len(),
        total,
        active,
        sort.label()
    );
    if !tags.is_empty() {
        println!("Filters: {}", tags.join(" | "));
    }
    println!("Share: ?{}", share);
    println!();

    for (i, listing) in results.iter().enumerate() {
        println!("{}. {} ({})", i + 1, listing.title, format_price(listing.price));
        println!(
            "   {} · {} · {} {}",
            listing.category, listing.subtype, listing.area, listing.area_unit
        );
        println!(
            "   {} beds, {} baths, {} balconies, {} parking",
            listing.beds, listing.baths, listing.balconies, listing.parking
        );
        println!("   Location: {}", listing.location);
        if !listing.amenities.is_empty() {
            println!("   Amenities: {}", listing.amenities.join(", "));
        }
        if listing.is_validated {
            println!("   Validated");
        }
        println!("   ID: {}", listing.id);
        println!();
    }

    if let Some(path) = &cli.output {
        let json = serde_json::to_string_pretty(&results)?;
        tokio::fs::write(path, json)
            .await
            .with_context(|| format!("Failed to write {}", path))?;
        info!("Saved {} listings to {}", results.len(), path);
    }

    Ok(())
}
