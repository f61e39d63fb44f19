pub mod cache;
pub mod config;
pub mod engine;
pub mod error;
pub mod fetch;
pub mod model;
pub mod normalize;
pub mod pipeline;
pub mod score;
pub mod units;

pub use cache::RatingCache;
pub use config::AppConfig;
pub use engine::{AnalysisEngine, AnalysisResult};
pub use error::Error;
pub use model::{Item, ItemType, Rating};
pub use normalize::CacheStats;
pub use pipeline::{RatingStats, SelectionOptions, Summary};
