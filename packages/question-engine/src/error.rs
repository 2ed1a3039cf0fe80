/// Error types for the question generation engine
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GeneratorError {
    #[error("No API key configured for the remote generator")]
    MissingApiKey,

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Remote API returned status {status}")]
    ApiStatus { status: u16 },

    #[error("Malformed model response: {0}")]
    MalformedResponse(String),

    #[error("Invalid configuration: {0}")]
    ConfigError(String),
}

pub type Result<T> = std::result::Result<T, GeneratorError>;
