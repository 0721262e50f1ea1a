use thiserror::Error;

#[derive(Error, Debug)]
pub enum SuggesterError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Failed to parse calendar feed: {reason}")]
    Parse { reason: String },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Exchange rate unavailable: {reason}")]
    ExchangeRate { reason: String },

    #[error("Invalid pricing input: {reason}")]
    InvalidPricing { reason: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yml::Error),

    #[error("URL parse error: {0}")]
    Url(#[from] url::ParseError),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

pub type Result<T> = std::result::Result<T, SuggesterError>;
