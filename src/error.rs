use thiserror::Error;

#[derive(Error, Debug)]
pub enum SmartFarmError {
    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Data source unavailable: {0}")]
    DataSourceUnavailable(String),

    #[error("Incomplete observation: {0}")]
    IncompleteObservation(String),

    #[error("Invalid rule: {0}")]
    InvalidRule(String),

    #[error("Location unavailable: {0}")]
    LocationUnavailable(String),

    #[error("Not found: {0}")]
    NotFound(String),
}

pub type Result<T> = std::result::Result<T, SmartFarmError>;
