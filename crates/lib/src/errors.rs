use thiserror::Error;

/// Errors raised while talking to the generation service.
#[derive(Error, Debug)]
pub enum GenerateError {
    #[error("Failed to build Reqwest client: {0}")]
    ClientBuild(reqwest::Error),
    #[error("Invalid API base URL '{url}': {source}")]
    InvalidBaseUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },
    #[error("Failed to send request to the generation service: {0}")]
    Request(#[from] reqwest::Error),
    #[error("Generation service responded with {status}: {body}")]
    Status { status: u16, body: String },
    #[error("Failed to deserialize generation response: {0}")]
    Deserialization(#[from] serde_json::Error),
}

impl GenerateError {
    /// Returns `true` for failures of a single generation attempt (network,
    /// status or body), as opposed to client setup problems.
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            GenerateError::Request(_)
                | GenerateError::Status { .. }
                | GenerateError::Deserialization(_)
        )
    }
}

/// Errors raised while resolving the client configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration error: {0}")]
    General(#[from] config::ConfigError),
}

/// Errors raised when moving the selected version.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum SelectError {
    #[error("No generation result to select from")]
    NoResult,
    #[error("Version {index} is out of range ({len} versions available)")]
    OutOfRange { index: usize, len: usize },
}
