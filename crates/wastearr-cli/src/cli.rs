use clap::{Parser, ValueEnum};
use wastearr_core::ItemType;

#[derive(Debug, Parser)]
#[command(name = "wastearr")]
#[command(
    about = "Analyze Sonarr/Radarr collections with ratings and waste scores",
    long_about = None
)]
pub struct Cli {
    /// Catalog to analyze (default: both)
    #[arg(value_enum)]
    pub item_type: Option<Catalog>,

    /// Show only the N items with highest waste scores
    #[arg(short = 't', long, value_name = "N")]
    pub top_waste: Option<usize>,

    /// Show only items with waste score >= SCORE
    #[arg(short = 's', long, value_name = "SCORE")]
    pub waste_score: Option<i32>,

    /// Show only items with size >= SIZE (e.g., 12M, 3GB, 500MB)
    #[arg(short = 'm', long, value_name = "SIZE")]
    pub min_size: Option<String>,

    /// Show only items with rating <= RATING (e.g., 6.2, 7.5)
    #[arg(short = 'r', long, value_name = "RATING")]
    pub ratings: Option<f64>,

    /// Clear cache and regenerate all ratings
    #[arg(long)]
    pub clear_cache: bool,

    /// Bypass cache entirely (slower but always fresh)
    #[arg(long)]
    pub no_cache: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Catalog {
    /// TV series tracked by Sonarr
    Sonarr,
    /// Movies tracked by Radarr
    Radarr,
}

impl Catalog {
    pub fn item_type(self) -> ItemType {
        match self {
            Catalog::Sonarr => ItemType::Tv,
            Catalog::Radarr => ItemType::Movie,
        }
    }
}
