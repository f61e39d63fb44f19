mod cli;
mod logging;
mod report;

use std::process;

use clap::Parser;
use colored::*;
use dotenv::dotenv;
use tracing::{error, info};
use wastearr_core::pipeline::{self, SelectionOptions};
use wastearr_core::{AnalysisEngine, ItemType, RatingCache};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv().ok();

    let _guard = logging::init_logger();

    let args = cli::Cli::parse();

    let config = match wastearr_core::config::load_configuration() {
        Ok(config) => config,
        Err(err) => {
            error!("Error loading configuration: {}", err);
            process::exit(1);
        }
    };

    if args.clear_cache {
        if let Some(path) = RatingCache::default_path() {
            RatingCache::clear(&path);
        }
    }

    // An unparseable size filter aborts before any catalog fetch.
    let min_size_bytes = match args.min_size.as_deref() {
        Some(raw) => match wastearr_core::units::parse_size(raw) {
            Ok(size) => Some(size),
            Err(err) => {
                error!("Error: {}", err);
                process::exit(1);
            }
        },
        None => None,
    };

    let requested: Vec<ItemType> = match args.item_type {
        Some(catalog) => vec![catalog.item_type()],
        None => ItemType::ALL.to_vec(),
    };

    let mut engine = AnalysisEngine::new(config);
    if args.no_cache {
        engine = engine.without_cache();
    }

    let result = match engine.run(&requested) {
        Ok(result) => result,
        Err(err) => {
            error!("Error: {}", err);
            process::exit(1);
        }
    };

    let options = SelectionOptions {
        min_waste_score: args.waste_score,
        min_size_bytes,
        max_rating: args.ratings,
        top: args.top_waste,
    };

    let selected = pipeline::select(result.items, &options);
    let summary = pipeline::summarize(&selected);

    report::print_report(&selected, &summary, &requested, &options);

    println!();
    info!(
        "Fetch completed in {}",
        format!("{:.2}s", result.fetch_duration.as_secs_f64()).green()
    );

    if result.cache_stats.any() {
        info!(
            "Cache stats: {} hits, {} misses",
            format!("{}", result.cache_stats.hits).cyan(),
            format!("{}", result.cache_stats.misses).cyan(),
        );
    }

    Ok(())
}
