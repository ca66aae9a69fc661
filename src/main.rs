use clap::Parser;
use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};
use std::fs::File;

use placefinder::config;
use placefinder::search::{SearchBundle, SearchManager};

#[derive(Parser)]
#[command(name = "placefinder", about = "Concurrent UK place and coordinate search")]
struct Args {
    /// The place name, grid reference, or lat/lon to search for
    query: String,

    /// Open Names API key (overrides config file and env)
    #[arg(long)]
    opennames_key: Option<String>,

    /// Places API key for address search (overrides config file and env)
    #[arg(long)]
    places_key: Option<String>,

    /// Print the raw bundle as JSON instead of formatted sections
    #[arg(long)]
    json: bool,
}

#[tokio::main]
async fn main() -> std::io::Result<()> {
    let args = Args::parse();
    dotenv::dotenv().ok();

    // Initialize file logger - writes to placefinder.log in current directory
    let log_config = ConfigBuilder::new()
        .set_time_format_rfc3339()
        .build();

    if let Ok(log_file) = File::create("placefinder.log") {
        let _ = WriteLogger::init(LevelFilter::Debug, log_config, log_file);
    }

    log::info!("Placefinder starting up, query: {}", args.query);

    let file_config = match config::load_config() {
        Ok(c) => c,
        Err(e) => {
            log::warn!("Ignoring unreadable config: {}", e);
            config::PlacefinderConfig::default()
        }
    };
    let resolved = config::resolve(
        &file_config,
        args.opennames_key.as_deref(),
        args.places_key.as_deref(),
    );

    let mut builder = SearchManager::builder();
    match resolved.opennames_api_key {
        Some(key) => {
            builder = builder.add_open_names(key, Some(resolved.opennames_base_url));
        }
        None => {
            log::info!("No Open Names API key configured, gazetteer search disabled");
        }
    }
    match resolved.places_api_key {
        Some(key) => {
            builder = builder.add_places(key, Some(resolved.places_base_url));
        }
        None => {
            log::info!("No Places API key configured, address search disabled");
        }
    }
    let manager = builder.build();

    let bundle = manager.query(&args.query).await;

    if args.json {
        match serde_json::to_string_pretty(&bundle) {
            Ok(json) => println!("{json}"),
            Err(e) => eprintln!("Failed to render bundle: {e}"),
        }
    } else {
        print_bundle(&bundle);
    }

    Ok(())
}

fn print_bundle(bundle: &SearchBundle) {
    for response in std::iter::once(&bundle.recents).chain(bundle.remaining.iter()) {
        // The placeholder recents slot is noise in a one-shot run.
        if response.source == "none" {
            continue;
        }
        println!("[{}]", response.source);
        match &response.error {
            Some(error) => println!("  error: {error}"),
            None if response.results.is_empty() => println!("  no results"),
            None => {
                for result in &response.results {
                    if result.context.is_empty() {
                        println!("  {}", result.name);
                    } else {
                        println!("  {} ({})", result.name, result.context);
                    }
                }
            }
        }
        println!();
    }
}
