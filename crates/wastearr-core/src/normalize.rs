use tracing::debug;

use crate::cache::RatingCache;
use crate::fetch::{MovieRecord, SeriesRecord};
use crate::model::{Item, ItemType, Rating};

/// Cache hit/miss counters for one run. Bypass mode counts nothing, so the
/// stats line only appears when a real cache was in play.
#[derive(Debug, Default, Clone, Copy)]
pub struct CacheStats {
    pub hits: usize,
    pub misses: usize,
}

impl CacheStats {
    pub fn any(&self) -> bool {
        self.hits > 0 || self.misses > 0
    }
}

/// Convert one series record into an `Item`, resolving the rating through
/// the cache. Series without files on disk are discarded.
pub fn normalize_series(
    record: SeriesRecord,
    cache: &mut RatingCache,
    stats: &mut CacheStats,
) -> Option<Item> {
    let embedded = Rating::from_embedded(Some(record.ratings.value));
    build_item(
        ItemType::Tv,
        record.title,
        record.year,
        record.statistics.size_on_disk,
        record.id,
        embedded,
        cache,
        stats,
    )
}

/// Convert one movie record into an `Item`. Radarr nests the rating under
/// the TMDB provider.
pub fn normalize_movie(
    record: MovieRecord,
    cache: &mut RatingCache,
    stats: &mut CacheStats,
) -> Option<Item> {
    let embedded = Rating::from_embedded(Some(record.ratings.tmdb.value));
    build_item(
        ItemType::Movie,
        record.title,
        record.year,
        record.size_on_disk,
        record.id,
        embedded,
        cache,
        stats,
    )
}

#[allow(clippy::too_many_arguments)]
fn build_item(
    item_type: ItemType,
    name: String,
    year: i32,
    size_bytes: u64,
    identifier: Option<i64>,
    embedded: Rating,
    cache: &mut RatingCache,
    stats: &mut CacheStats,
) -> Option<Item> {
    let key = cache_key(&name, year, identifier);

    let rating = if let Some(cached) = cache.get(item_type, &key) {
        stats.hits += 1;
        cached
    } else {
        if cache.is_enabled() {
            stats.misses += 1;
            cache.insert(item_type, key, embedded);
        }
        embedded
    };

    // Only items that occupy disk space are meaningful for waste analysis.
    if size_bytes == 0 {
        debug!("Discarding {} '{}' with no size on disk", item_type, name);
        return None;
    }

    Some(Item::new(name, year, size_bytes, rating, item_type, identifier))
}

/// Cache key: the catalog id when present, otherwise a name+year composite
/// for entries resolved without an identifier.
fn cache_key(name: &str, year: i32, identifier: Option<i64>) -> String {
    match identifier {
        Some(id) => id.to_string(),
        None => format!("{}_{}", name, year),
    }
}
