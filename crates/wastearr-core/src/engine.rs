use std::path::PathBuf;
use std::time::{Duration, Instant};

use tracing::{info, warn};

use crate::cache::RatingCache;
use crate::config::AppConfig;
use crate::error::Error;
use crate::fetch::CatalogClient;
use crate::model::{Item, ItemType};
use crate::normalize::{self, CacheStats};
use crate::score;

pub struct AnalysisEngine {
    config: AppConfig,
    cache_path: Option<PathBuf>,
    use_cache: bool,
}

#[derive(Debug)]
pub struct AnalysisResult {
    pub items: Vec<Item>,
    pub cache_stats: CacheStats,
    pub fetch_duration: Duration,
}

impl AnalysisEngine {
    pub fn new(config: AppConfig) -> Self {
        Self {
            config,
            cache_path: None,
            use_cache: true,
        }
    }

    pub fn with_cache_path(mut self, path: PathBuf) -> Self {
        self.cache_path = Some(path);
        self
    }

    /// Bypass mode: every rating lookup is a miss and nothing is persisted.
    pub fn without_cache(mut self) -> Self {
        self.use_cache = false;
        self
    }

    /// Run the full analysis pipeline for the requested item types:
    /// 1. Load the rating cache once (or bypass it)
    /// 2. Fetch and normalize each catalog sequentially
    /// 3. Save the cache once
    /// 4. Score every surviving item
    ///
    /// A catalog that cannot be reached contributes zero items and never
    /// fails the run.
    pub fn run(&self, requested: &[ItemType]) -> Result<AnalysisResult, Error> {
        let client = CatalogClient::new(self.config.clone())?;

        let cache_path = self
            .cache_path
            .clone()
            .or_else(RatingCache::default_path)
            .unwrap_or_else(|| PathBuf::from("wastearr_cache.json"));

        let mut cache = if self.use_cache {
            RatingCache::load(cache_path)
        } else {
            info!("Bypassing cache - fetching fresh ratings");
            RatingCache::bypass(cache_path)
        };

        let mut items = Vec::new();
        let mut stats = CacheStats::default();
        let fetch_start = Instant::now();

        for &item_type in requested {
            info!("Fetching {} data from API", item_type.catalog());
            items.extend(self.collect(item_type, &client, &mut cache, &mut stats));
        }

        let fetch_duration = fetch_start.elapsed();

        cache.save();

        info!("Processing {} items", items.len());
        score::score_items(&mut items);

        Ok(AnalysisResult {
            items,
            cache_stats: stats,
            fetch_duration,
        })
    }

    fn collect(
        &self,
        item_type: ItemType,
        client: &CatalogClient,
        cache: &mut RatingCache,
        stats: &mut CacheStats,
    ) -> Vec<Item> {
        match item_type {
            ItemType::Tv => match client.fetch_series() {
                Ok(records) => records
                    .into_iter()
                    .filter_map(|record| normalize::normalize_series(record, cache, stats))
                    .collect(),
                Err(e) => {
                    warn!("Sonarr fetch failed, continuing without series: {}", e);
                    Vec::new()
                }
            },
            ItemType::Movie => match client.fetch_movies() {
                Ok(records) => records
                    .into_iter()
                    .filter_map(|record| normalize::normalize_movie(record, cache, stats))
                    .collect(),
                Err(e) => {
                    warn!("Radarr fetch failed, continuing without movies: {}", e);
                    Vec::new()
                }
            },
        }
    }
}
