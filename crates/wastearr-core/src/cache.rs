use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::model::{ItemType, Rating};

/// Whole-file time-to-live, measured from the persisted write timestamp.
/// Entries are never aged individually; a cache older than this is discarded
/// in one piece so stale and fresh ratings are never mixed.
pub const CACHE_TTL_SECS: u64 = 72 * 60 * 60;

const CACHE_DIR: &str = "wastearr";
const CACHE_FILE: &str = "cache.json";

/// On-disk layout. Reads accept the pre-rename namespace field names
/// (`tv_ratings` / `movie_ratings`); writes always use the current ones.
#[derive(Debug, Default, Serialize, Deserialize)]
struct CacheFile {
    timestamp: f64,
    #[serde(default, rename = "sonarr_ratings", alias = "tv_ratings")]
    tv: HashMap<String, Rating>,
    #[serde(default, rename = "radarr_ratings", alias = "movie_ratings")]
    movie: HashMap<String, Rating>,
}

impl CacheFile {
    fn is_expired(&self, now: f64) -> bool {
        now - self.timestamp > CACHE_TTL_SECS as f64
    }
}

#[derive(Debug, Default)]
struct Namespaces {
    tv: HashMap<String, Rating>,
    movie: HashMap<String, Rating>,
}

impl Namespaces {
    fn for_type(&self, item_type: ItemType) -> &HashMap<String, Rating> {
        match item_type {
            ItemType::Tv => &self.tv,
            ItemType::Movie => &self.movie,
        }
    }

    fn for_type_mut(&mut self, item_type: ItemType) -> &mut HashMap<String, Rating> {
        match item_type {
            ItemType::Tv => &mut self.tv,
            ItemType::Movie => &mut self.movie,
        }
    }

    fn len(&self) -> usize {
        self.tv.len() + self.movie.len()
    }
}

/// Persisted rating lookups, one namespace per item type.
///
/// A `None` state is bypass mode: the cache is neither read nor written.
/// That is distinct from an enabled cache that happens to be empty, which
/// records misses as they are discovered.
#[derive(Debug)]
pub struct RatingCache {
    path: PathBuf,
    state: Option<Namespaces>,
}

impl RatingCache {
    pub fn default_path() -> Option<PathBuf> {
        dirs::cache_dir().map(|dir| dir.join(CACHE_DIR).join(CACHE_FILE))
    }

    /// Load persisted ratings. Missing, expired, and corrupt cache files all
    /// yield empty enabled namespaces; expiry and corruption also remove the
    /// file. Loading never fails the run — the cache is an optimization, not
    /// a correctness dependency.
    pub fn load(path: PathBuf) -> Self {
        let state = Some(read_namespaces(&path));
        RatingCache { path, state }
    }

    /// Disabled cache: `get` never hits, `insert` and `save` are no-ops.
    pub fn bypass(path: PathBuf) -> Self {
        RatingCache { path, state: None }
    }

    pub fn is_enabled(&self) -> bool {
        self.state.is_some()
    }

    pub fn get(&self, item_type: ItemType, key: &str) -> Option<Rating> {
        self.state.as_ref()?.for_type(item_type).get(key).copied()
    }

    pub fn insert(&mut self, item_type: ItemType, key: String, rating: Rating) {
        if let Some(state) = self.state.as_mut() {
            state.for_type_mut(item_type).insert(key, rating);
        }
    }

    pub fn len(&self) -> usize {
        self.state.as_ref().map(Namespaces::len).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Persist both namespaces with a fresh timestamp, overwriting any prior
    /// content. Write failures are logged and swallowed; the report still
    /// completes from memory.
    pub fn save(&self) {
        let Some(state) = self.state.as_ref() else {
            return;
        };

        let file = CacheFile {
            timestamp: Utc::now().timestamp() as f64,
            tv: state.tv.clone(),
            movie: state.movie.clone(),
        };

        info!("Saving cache with {} ratings", state.len());

        if let Some(parent) = self.path.parent() {
            if let Err(e) = fs::create_dir_all(parent) {
                warn!(
                    "Could not create cache directory {}: {}",
                    parent.display(),
                    e
                );
                return;
            }
        }

        match serde_json::to_string(&file) {
            Ok(json) => {
                if let Err(e) = fs::write(&self.path, json) {
                    warn!("Could not write cache {}: {}", self.path.display(), e);
                }
            }
            Err(e) => warn!("Could not serialize cache: {}", e),
        }
    }

    /// Remove the persisted cache unconditionally. Idempotent when no file
    /// exists.
    pub fn clear(path: &Path) {
        match fs::remove_file(path) {
            Ok(()) => info!("Cleared cache: {}", path.display()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                info!("No cache file to clear")
            }
            Err(e) => warn!("Could not remove cache {}: {}", path.display(), e),
        }
    }
}

fn read_namespaces(path: &Path) -> Namespaces {
    if !path.exists() {
        debug!("No existing cache found");
        return Namespaces::default();
    }

    let contents = match fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(e) => {
            warn!("Could not read cache {}: {}", path.display(), e);
            let _ = fs::remove_file(path);
            return Namespaces::default();
        }
    };

    match serde_json::from_str::<CacheFile>(&contents) {
        Ok(file) => {
            if file.is_expired(Utc::now().timestamp() as f64) {
                info!("Cache expired, removing old cache file");
                let _ = fs::remove_file(path);
                return Namespaces::default();
            }
            debug!("Loaded cache from {}", path.display());
            Namespaces {
                tv: file.tv,
                movie: file.movie,
            }
        }
        Err(e) => {
            warn!("Cache corrupted, starting fresh: {}", e);
            let _ = fs::remove_file(path);
            Namespaces::default()
        }
    }
}
