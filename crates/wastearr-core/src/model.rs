use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Closed content-type tag. Each variant maps to one catalog service and one
/// cache namespace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ItemType {
    Tv,
    Movie,
}

impl ItemType {
    pub const ALL: [ItemType; 2] = [ItemType::Tv, ItemType::Movie];

    /// Name of the catalog service tracking this content type.
    pub fn catalog(&self) -> &'static str {
        match self {
            ItemType::Tv => "sonarr",
            ItemType::Movie => "radarr",
        }
    }

    /// Environment variable holding the catalog API key.
    pub fn api_key_var(&self) -> &'static str {
        match self {
            ItemType::Tv => "SONARR_API_KEY",
            ItemType::Movie => "RADARR_API_KEY",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ItemType::Tv => "Tv",
            ItemType::Movie => "Movie",
        }
    }
}

impl fmt::Display for ItemType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ItemType::Tv => write!(f, "tv"),
            ItemType::Movie => write!(f, "movie"),
        }
    }
}

/// External quality rating. `Unknown` is an explicit state rather than a raw
/// missing value, so filters and statistics can treat unrated items
/// deliberately.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Rating {
    Known(f64),
    Unknown,
}

impl Rating {
    /// Build a rating from a catalog-embedded value. Zero or absent means
    /// the catalog has no rating; positive values are kept at one-decimal
    /// precision, matching what the cache persists.
    pub fn from_embedded(value: Option<f64>) -> Self {
        match value {
            Some(v) if v > 0.0 => Rating::Known((v * 10.0).round() / 10.0),
            _ => Rating::Unknown,
        }
    }

    pub fn value(&self) -> Option<f64> {
        match self {
            Rating::Known(v) => Some(*v),
            Rating::Unknown => None,
        }
    }

    pub fn is_known(&self) -> bool {
        matches!(self, Rating::Known(_))
    }
}

impl fmt::Display for Rating {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Rating::Known(v) => write!(f, "{:.1}", v),
            Rating::Unknown => write!(f, "N/A"),
        }
    }
}

// The cache stores ratings as strings ("7.5" or "N/A") for compatibility
// with existing cache files, so serde goes through the display form.
impl Serialize for Rating {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Rating {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(match raw.trim() {
            "" | "N/A" => Rating::Unknown,
            other => match other.parse::<f64>() {
                Ok(v) => Rating::from_embedded(Some(v)),
                Err(_) => Rating::Unknown,
            },
        })
    }
}

/// One normalized library entry, derived from a raw catalog record.
#[derive(Debug, Clone)]
pub struct Item {
    pub name: String,
    pub year: i32,
    pub size_bytes: u64,
    pub rating: Rating,
    pub item_type: ItemType,
    pub identifier: Option<i64>,
    /// Derived on every run from size, rating, and type; never persisted.
    pub waste_score: i32,
}

impl Item {
    pub fn new(
        name: String,
        year: i32,
        size_bytes: u64,
        rating: Rating,
        item_type: ItemType,
        identifier: Option<i64>,
    ) -> Self {
        Item {
            name,
            year,
            size_bytes,
            rating,
            item_type,
            identifier,
            waste_score: 0,
        }
    }
}
