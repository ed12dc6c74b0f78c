use thiserror::Error;

/// Configuration-related errors with structured variants.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("missing required field: {field}")]
    MissingField { field: &'static str },

    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },

    #[error("failed to read config file: {0}")]
    ReadFile(#[source] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[source] toml::de::Error),
}

/// Failures fetching market or catalog data.
///
/// All of these are recoverable: the dashboard falls back to an empty
/// snapshot for the failing source and retries on the next cycle.
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("market API reported an unsuccessful response")]
    Unsuccessful,

    #[error("failed to decode {source_name}: {reason}")]
    Decode {
        source_name: &'static str,
        reason: String,
    },

    #[error("invalid catalog location '{location}': {reason}")]
    InvalidLocation { location: String, reason: String },
}

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("URL parse error: {0}")]
    Url(#[from] url::ParseError),
}

pub type Result<T> = std::result::Result<T, Error>;
