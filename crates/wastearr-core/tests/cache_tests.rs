use std::fs;
use std::path::PathBuf;

use chrono::Utc;
use serde_json::json;
use tempfile::TempDir;
use wastearr_core::cache::{RatingCache, CACHE_TTL_SECS};
use wastearr_core::{ItemType, Rating};

fn cache_path(dir: &TempDir) -> PathBuf {
    dir.path().join("cache.json")
}

#[test]
fn missing_file_loads_empty_enabled_namespaces() {
    let dir = TempDir::new().unwrap();
    let cache = RatingCache::load(cache_path(&dir));

    assert!(cache.is_enabled());
    assert!(cache.is_empty());
    assert_eq!(cache.get(ItemType::Tv, "1"), None);
}

#[test]
fn save_then_load_round_trips_within_ttl() {
    let dir = TempDir::new().unwrap();
    let path = cache_path(&dir);

    let mut cache = RatingCache::load(path.clone());
    cache.insert(ItemType::Tv, "12".to_string(), Rating::Known(7.5));
    cache.insert(ItemType::Tv, "13".to_string(), Rating::Unknown);
    cache.insert(ItemType::Movie, "12".to_string(), Rating::Known(6.1));
    cache.save();

    let reloaded = RatingCache::load(path);
    assert_eq!(reloaded.len(), 3);
    assert_eq!(reloaded.get(ItemType::Tv, "12"), Some(Rating::Known(7.5)));
    assert_eq!(reloaded.get(ItemType::Tv, "13"), Some(Rating::Unknown));
    assert_eq!(reloaded.get(ItemType::Movie, "12"), Some(Rating::Known(6.1)));
}

#[test]
fn save_writes_current_namespace_field_names() {
    let dir = TempDir::new().unwrap();
    let path = cache_path(&dir);

    let mut cache = RatingCache::load(path.clone());
    cache.insert(ItemType::Tv, "1".to_string(), Rating::Known(8.0));
    cache.save();

    let raw: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
    assert!(raw.get("sonarr_ratings").is_some());
    assert!(raw.get("radarr_ratings").is_some());
    assert!(raw.get("timestamp").is_some());
    assert!(raw.get("tv_ratings").is_none());
}

#[test]
fn legacy_namespace_field_names_are_accepted() {
    let dir = TempDir::new().unwrap();
    let path = cache_path(&dir);

    let legacy = json!({
        "timestamp": Utc::now().timestamp(),
        "tv_ratings": { "5": "7.2" },
        "movie_ratings": { "9": "N/A" }
    });
    fs::write(&path, legacy.to_string()).unwrap();

    let cache = RatingCache::load(path);
    assert_eq!(cache.get(ItemType::Tv, "5"), Some(Rating::Known(7.2)));
    assert_eq!(cache.get(ItemType::Movie, "9"), Some(Rating::Unknown));
}

#[test]
fn expired_cache_loads_empty_and_removes_the_file() {
    let dir = TempDir::new().unwrap();
    let path = cache_path(&dir);

    let stale = Utc::now().timestamp() - CACHE_TTL_SECS as i64 - 60;
    let contents = json!({
        "timestamp": stale,
        "sonarr_ratings": { "5": "7.2" },
        "radarr_ratings": {}
    });
    fs::write(&path, contents.to_string()).unwrap();

    let cache = RatingCache::load(path.clone());
    assert!(cache.is_empty());
    assert!(!path.exists(), "expired cache file should be removed");
}

#[test]
fn corrupt_cache_loads_empty_and_removes_the_file() {
    let dir = TempDir::new().unwrap();
    let path = cache_path(&dir);

    fs::write(&path, "not json {{{").unwrap();

    let cache = RatingCache::load(path.clone());
    assert!(cache.is_enabled());
    assert!(cache.is_empty());
    assert!(!path.exists(), "corrupt cache file should be removed");
}

#[test]
fn bypass_cache_never_reads_writes_or_persists() {
    let dir = TempDir::new().unwrap();
    let path = cache_path(&dir);

    let mut primed = RatingCache::load(path.clone());
    primed.insert(ItemType::Tv, "5".to_string(), Rating::Known(9.0));
    primed.save();

    let mut bypass = RatingCache::bypass(path.clone());
    assert!(!bypass.is_enabled());
    // The persisted entry is invisible in bypass mode.
    assert_eq!(bypass.get(ItemType::Tv, "5"), None);

    bypass.insert(ItemType::Tv, "6".to_string(), Rating::Known(1.0));
    assert_eq!(bypass.len(), 0);

    let before = fs::read_to_string(&path).unwrap();
    bypass.save();
    let after = fs::read_to_string(&path).unwrap();
    assert_eq!(before, after, "bypass save must not touch the file");
}

#[test]
fn clear_is_idempotent() {
    let dir = TempDir::new().unwrap();
    let path = cache_path(&dir);

    let mut cache = RatingCache::load(path.clone());
    cache.insert(ItemType::Movie, "1".to_string(), Rating::Known(4.0));
    cache.save();
    assert!(path.exists());

    RatingCache::clear(&path);
    assert!(!path.exists());

    // Second clear with no file present must not panic or error.
    RatingCache::clear(&path);
    assert!(!path.exists());
}

#[test]
fn save_creates_missing_parent_directories() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("nested").join("deeper").join("cache.json");

    let mut cache = RatingCache::load(path.clone());
    cache.insert(ItemType::Tv, "1".to_string(), Rating::Known(7.0));
    cache.save();

    assert!(path.exists());
}
