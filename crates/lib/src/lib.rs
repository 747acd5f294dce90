//! # contentgen: Content Generation Client
//!
//! This crate sends a user's draft text to a remote content generation service
//! and tracks the UI-facing state of that request: whether it is in flight,
//! the last result received, and which generated version is selected.

pub mod client;
pub mod config;
pub mod errors;
pub mod handler;
pub mod notify;
pub mod types;

pub use client::{ApiClient, GenerationBackend};
pub use config::{load_config, ClientConfig};
pub use errors::{ConfigError, GenerateError, SelectError};
pub use handler::{GenerationRequestHandler, GenerationState, Invocation, Outcome, SkipReason};
pub use notify::{NoopNotifier, Notifier, GENERATION_FAILED_MESSAGE};
pub use types::{
    ContentResponse, ContentVersion, HealthStatus, ImageSuggestion, RequestPayload, ResultPayload,
};
