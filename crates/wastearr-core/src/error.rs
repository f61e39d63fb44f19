use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("{0} environment variable not set")]
    MissingApiKey(&'static str),

    #[error("{0} API returned HTTP {1}")]
    ApiStatus(&'static str, reqwest::StatusCode),

    #[error("Invalid size format: {0}")]
    InvalidSize(String),
}
