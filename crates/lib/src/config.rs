//! # Client Configuration
//!
//! Resolves where the generation service lives. Values come from environment
//! variables (optionally seeded from a `.env` file) layered over defaults:
//!
//! - `API_URL`: the base path prefix. Unset or blank means `/api`.
//! - `API_ORIGIN`: the origin a relative base is resolved against.

use crate::errors::{ConfigError, GenerateError};
use config::{Config as ConfigBuilder, Environment};
use serde::Deserialize;
use tracing::{debug, info};
use url::Url;

pub const DEFAULT_API_URL: &str = "/api";
pub const DEFAULT_API_ORIGIN: &str = "http://localhost:8000";

/// Where to send generation requests.
#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Loaded from the `API_URL` env var.
    #[serde(default = "default_api_url")]
    pub api_url: String,
    /// Loaded from the `API_ORIGIN` env var.
    #[serde(default = "default_api_origin")]
    pub api_origin: String,
}

fn default_api_url() -> String {
    DEFAULT_API_URL.to_string()
}

fn default_api_origin() -> String {
    DEFAULT_API_ORIGIN.to_string()
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            api_origin: default_api_origin(),
        }
    }
}

impl ClientConfig {
    pub fn new(api_url: impl Into<String>) -> Self {
        Self {
            api_url: api_url.into(),
            ..Default::default()
        }
    }

    pub fn with_origin(mut self, api_origin: impl Into<String>) -> Self {
        self.api_origin = api_origin.into();
        self
    }

    /// The absolute URL of the generate endpoint.
    ///
    /// An absolute `http(s)` base is used verbatim. Anything else is treated as
    /// a path prefix under `api_origin`, in the same way a relative path is
    /// resolved against the page it was served from.
    pub fn generate_url(&self) -> Result<Url, GenerateError> {
        self.endpoint("generate")
    }

    /// The origin root, where the service exposes its liveness route.
    pub fn health_url(&self) -> Result<Url, GenerateError> {
        let origin = parse_url(&self.api_origin)?;
        origin.join("/").map_err(|source| GenerateError::InvalidBaseUrl {
            url: self.api_origin.clone(),
            source,
        })
    }

    /// The configured base, or `/api` when it is blank.
    pub fn effective_api_url(&self) -> &str {
        if self.api_url.trim().is_empty() {
            DEFAULT_API_URL
        } else {
            &self.api_url
        }
    }

    // A trailing `/` on the base is dropped so `/api/` and `/api` both hit `/api/generate`.
    fn endpoint(&self, name: &str) -> Result<Url, GenerateError> {
        let base = self.effective_api_url().trim_end_matches('/');
        let raw = format!("{base}/{name}");
        if is_absolute(base) {
            return parse_url(&raw);
        }

        let origin = parse_url(&self.api_origin)?;
        origin
            .join(&raw)
            .map_err(|source| GenerateError::InvalidBaseUrl { url: raw, source })
    }
}

fn is_absolute(url: &str) -> bool {
    let lower = url.to_ascii_lowercase();
    lower.starts_with("http://") || lower.starts_with("https://")
}

fn parse_url(raw: &str) -> Result<Url, GenerateError> {
    Url::parse(raw).map_err(|source| GenerateError::InvalidBaseUrl {
        url: raw.to_string(),
        source,
    })
}

/// Loads the client configuration once, at process start.
///
/// A `.env` file in the working directory is honoured but never required.
pub fn load_config() -> Result<ClientConfig, ConfigError> {
    if let Ok(path) = dotenvy::dotenv() {
        debug!("Loaded environment from '{}'.", path.display());
    }

    let settings = ConfigBuilder::builder()
        .set_default("api_url", DEFAULT_API_URL)?
        .set_default("api_origin", DEFAULT_API_ORIGIN)?
        .add_source(Environment::default().ignore_empty(true))
        .build()?;

    let config: ClientConfig = settings.try_deserialize()?;
    info!(
        "Using generation service at '{}' (origin '{}').",
        config.api_url, config.api_origin
    );
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_relative_base_resolves_against_origin() {
        let config = ClientConfig::default();
        assert_eq!(
            config.generate_url().unwrap().as_str(),
            "http://localhost:8000/api/generate"
        );

        let config = ClientConfig::new("/v2/content/").with_origin("https://example.com/app/");
        assert_eq!(
            config.generate_url().unwrap().as_str(),
            "https://example.com/v2/content/generate"
        );
    }

    #[test]
    fn test_absolute_base_used_verbatim() {
        let config = ClientConfig::new("https://gen.example.com/api");
        assert_eq!(
            config.generate_url().unwrap().as_str(),
            "https://gen.example.com/api/generate"
        );
    }

    #[test]
    fn test_bare_prefix_without_leading_slash() {
        let config = ClientConfig::new("api").with_origin("http://127.0.0.1:9000");
        assert_eq!(
            config.generate_url().unwrap().as_str(),
            "http://127.0.0.1:9000/api/generate"
        );
    }

    #[test]
    fn test_blank_base_falls_back_to_default() {
        for blank in ["", "   "] {
            let config = ClientConfig::new(blank);
            assert_eq!(config.effective_api_url(), DEFAULT_API_URL);
            assert_eq!(
                config.generate_url().unwrap().as_str(),
                "http://localhost:8000/api/generate"
            );
        }
    }

    #[test]
    fn test_trailing_slash_is_dropped() {
        let config = ClientConfig::new("/api/");
        assert_eq!(
            config.generate_url().unwrap().as_str(),
            "http://localhost:8000/api/generate"
        );
    }

    #[test]
    fn test_invalid_origin() {
        let config = ClientConfig::default().with_origin("not a url");
        let err = config.generate_url().unwrap_err();
        assert!(matches!(err, GenerateError::InvalidBaseUrl { .. }));
        assert!(!err.is_transport());
    }

    #[test]
    fn test_health_url_is_origin_root() {
        let config = ClientConfig::default().with_origin("http://localhost:8000/some/path");
        assert_eq!(
            config.health_url().unwrap().as_str(),
            "http://localhost:8000/"
        );
    }
}
