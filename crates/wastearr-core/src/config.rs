use config::{Config, ConfigError, Environment, File as ConfigFile};
use serde::Deserialize;

use crate::model::ItemType;

/// Catalog endpoints and credentials, resolved once at process start and
/// passed by parameter from there on. The scoring core itself takes no
/// configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub sonarr_url: String,
    pub sonarr_api_key: Option<String>,
    pub radarr_url: String,
    pub radarr_api_key: Option<String>,
}

impl AppConfig {
    pub fn base_url(&self, item_type: ItemType) -> &str {
        match item_type {
            ItemType::Tv => &self.sonarr_url,
            ItemType::Movie => &self.radarr_url,
        }
    }

    pub fn api_key(&self, item_type: ItemType) -> Option<&str> {
        match item_type {
            ItemType::Tv => self.sonarr_api_key.as_deref(),
            ItemType::Movie => self.radarr_api_key.as_deref(),
        }
    }
}

/// Layered configuration: defaults, then a user-level config file, then a
/// `Config` file in the working directory, then environment variables
/// (which `.env` feeds via dotenv in the binary).
pub fn load_configuration() -> Result<AppConfig, ConfigError> {
    let mut builder = Config::builder()
        .set_default("sonarr_url", "http://localhost:8989")?
        .set_default("radarr_url", "http://localhost:7878")?;

    if let Some(config_dir) = dirs::config_dir() {
        let user_config = config_dir.join("wastearr").join("config");
        builder = builder.add_source(ConfigFile::from(user_config).required(false));
    }

    builder = builder
        .add_source(ConfigFile::with_name("Config").required(false))
        .add_source(Environment::default());

    builder.build()?.try_deserialize::<AppConfig>()
}
