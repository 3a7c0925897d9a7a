use thiserror::Error;

/// Errors surfaced by [`Receiver`](crate::Receiver) intents and navigation
#[derive(Error, Debug)]
pub enum SdkError {
    #[error("API error: {0}")]
    ApiError(#[from] yamaha_api::ApiError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Unknown source: {0}")]
    UnknownSource(String),

    #[error("Invalid navigation path: {0}")]
    InvalidPath(String),

    #[error("No entry {segment:?} found at menu layer {layer} after {attempts} attempts")]
    NavigationExhausted {
        segment: String,
        layer: usize,
        attempts: u32,
    },

    #[error("A menu navigation is already in progress")]
    NavigationInProgress,

    #[error("Operation cancelled")]
    Cancelled,

    #[error("Unsupported media type: {0}")]
    UnsupportedMediaType(String),
}

/// Invalid or unreadable receiver configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("Invalid source mapping: {0}")]
    Sources(#[from] yamaha_state::StateError),

    #[error("Failed to parse configuration: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Failed to read configuration: {0}")]
    Io(#[from] std::io::Error),
}
