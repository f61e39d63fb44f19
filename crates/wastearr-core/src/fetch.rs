use std::time::Duration;

use reqwest::blocking::Client;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;
use tracing::{info, warn};

use crate::config::AppConfig;
use crate::error::Error;
use crate::model::ItemType;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Raw Sonarr series record. Decoded at the wire boundary so untyped JSON
/// maps never reach the scoring core. An absent `id` means the entry can
/// only be resolved by name and year.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeriesRecord {
    #[serde(default)]
    pub id: Option<i64>,
    pub title: String,
    #[serde(default)]
    pub year: i32,
    #[serde(default)]
    pub statistics: SeriesStatistics,
    #[serde(default)]
    pub ratings: EmbeddedRating,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeriesStatistics {
    #[serde(default)]
    pub size_on_disk: u64,
}

/// Sonarr exposes the rating directly; Radarr nests it per provider.
#[derive(Debug, Default, Deserialize)]
pub struct EmbeddedRating {
    #[serde(default)]
    pub value: f64,
}

/// Raw Radarr movie record.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MovieRecord {
    #[serde(default)]
    pub id: Option<i64>,
    pub title: String,
    #[serde(default)]
    pub year: i32,
    #[serde(default)]
    pub size_on_disk: u64,
    #[serde(default)]
    pub ratings: MovieRatings,
}

#[derive(Debug, Default, Deserialize)]
pub struct MovieRatings {
    #[serde(default)]
    pub tmdb: EmbeddedRating,
}

/// Blocking catalog API client. One instance serves both services.
pub struct CatalogClient {
    http: Client,
    config: AppConfig,
}

impl CatalogClient {
    pub fn new(config: AppConfig) -> Result<Self, Error> {
        let http = Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(CatalogClient { http, config })
    }

    pub fn fetch_series(&self) -> Result<Vec<SeriesRecord>, Error> {
        let raw = self.fetch_raw(ItemType::Tv, "series")?;
        Ok(decode_records(raw, "series"))
    }

    pub fn fetch_movies(&self) -> Result<Vec<MovieRecord>, Error> {
        let raw = self.fetch_raw(ItemType::Movie, "movie")?;
        Ok(decode_records(raw, "movie"))
    }

    fn fetch_raw(&self, item_type: ItemType, resource: &str) -> Result<Vec<Value>, Error> {
        let api_key = self
            .config
            .api_key(item_type)
            .ok_or(Error::MissingApiKey(item_type.api_key_var()))?;

        let base = self.config.base_url(item_type);
        let url = format!("{}/api/v3/{}", base, resource);

        let response = self
            .http
            .get(&url)
            .header("X-Api-Key", api_key)
            .header("Content-Type", "application/json")
            .send()?;

        if !response.status().is_success() {
            return Err(Error::ApiStatus(item_type.catalog(), response.status()));
        }

        let records: Vec<Value> = response.json()?;
        info!("Fetched {} {} records from {}", records.len(), resource, base);
        Ok(records)
    }
}

/// Decode each record individually: one malformed record is skipped with a
/// diagnostic and never aborts the batch.
fn decode_records<T: DeserializeOwned>(raw: Vec<Value>, resource: &str) -> Vec<T> {
    let mut records = Vec::with_capacity(raw.len());

    for value in raw {
        match serde_json::from_value::<T>(value) {
            Ok(record) => records.push(record),
            Err(e) => warn!("Skipping malformed {} record: {}", resource, e),
        }
    }

    records
}
