use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("RunningAhead API error: {0}")]
    RunningAhead(String),

    #[error("Google Sheets API error: {0}")]
    Sheets(String),

    #[error("OAuth2 authentication error: {0}")]
    Auth(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Configuration error: secret '{0}' is not set in the credentials file")]
    MissingSecret(String),

    #[error("Invalid date '{input}': {source}")]
    DateFormat {
        input: String,
        source: chrono::ParseError,
    },

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, AppError>;
