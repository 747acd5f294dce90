//! # Wire Types
//!
//! The request body sent to `POST {base}/generate` and the result it returns.
//! The result is kept as an opaque JSON value; typed views are derived on demand.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// The JSON body of a generation request.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct RequestPayload {
    pub user_input: String,
    /// Reserved by the service for per-user personalization.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
}

impl RequestPayload {
    pub fn new(user_input: impl Into<String>) -> Self {
        Self {
            user_input: user_input.into(),
            user_id: None,
        }
    }

    pub fn with_user_id(mut self, user_id: impl Into<String>) -> Self {
        self.user_id = Some(user_id.into());
        self
    }
}

/// The generation service's response, stored verbatim.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(transparent)]
pub struct ResultPayload(Value);

impl ResultPayload {
    pub fn new(value: Value) -> Self {
        Self(value)
    }

    pub fn as_value(&self) -> &Value {
        &self.0
    }

    pub fn into_value(self) -> Value {
        self.0
    }

    /// The collection that `selected_version` indexes into.
    ///
    /// Looks for `refined_versions` first, then `versions`. Anything else
    /// yields an empty slice.
    pub fn versions(&self) -> &[Value] {
        ["refined_versions", "versions"]
            .iter()
            .find_map(|key| self.0.get(*key).and_then(Value::as_array))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Attempts to read the payload as a full content response.
    pub fn as_content(&self) -> Option<ContentResponse> {
        serde_json::from_value(self.0.clone()).ok()
    }
}

impl From<Value> for ResultPayload {
    fn from(value: Value) -> Self {
        Self(value)
    }
}

/// One rewritten variant of the user's post.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ContentVersion {
    pub style: String,
    pub content: String,
    pub description: String,
}

/// A suggested illustration for the post.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ImageSuggestion {
    pub description: String,
    pub keywords: String,
    pub style: String,
}

/// The response shape produced by the content generation service.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ContentResponse {
    pub refined_versions: Vec<ContentVersion>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub image_suggestions: Vec<ImageSuggestion>,
}

/// The body of the service's liveness route.
#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct HealthStatus {
    pub status: String,
    #[serde(default)]
    pub message: String,
}
