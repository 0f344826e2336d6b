//! Response schemas, one per endpoint family.

use serde::{Deserialize, Deserializer, Serialize};

/// Which listing a collection read targets.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ListScope {
    /// `/projects/featured`, `/testimonials/featured`.
    #[default]
    Featured,
    /// `/projects`, `/testimonials`.
    All,
}

/// Envelope of every list endpoint: `{ "data": [...] }`.
///
/// A missing or `null` `data` decodes as an empty list; any other shape
/// mismatch is a decode error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub struct ListEnvelope<T> {
    #[serde(default = "Vec::new", deserialize_with = "null_as_empty")]
    pub data: Vec<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<usize>,
}

fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

/// Body of a mutation response: `{ "success": true, "message": "...", "data": {...} }`.
///
/// Every field is optional since the backend is inconsistent about what it echoes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Acknowledgement<T> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub success: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T> Default for Acknowledgement<T> {
    fn default() -> Self {
        Self {
            success: None,
            message: None,
            data: None,
        }
    }
}

/// `/auth/login` and `/auth/register` response.
#[derive(Clone, Serialize, Deserialize)]
pub struct AuthResponse {
    #[serde(alias = "accessToken")]
    pub token: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<serde_json::Value>,
}

impl std::fmt::Debug for AuthResponse {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthResponse")
            .field("token", &"<redacted>")
            .field("message", &self.message)
            .field("user", &self.user)
            .finish()
    }
}

/// `/health` response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    #[serde(flatten)]
    pub details: serde_json::Map<String, serde_json::Value>,
}

/// Error body the backend sends with non-2xx statuses.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct ErrorBody {
    pub message: Option<String>,
    pub error: Option<String>,
}

impl ErrorBody {
    pub(crate) fn into_message(self) -> Option<String> {
        self.message.or(self.error)
    }
}
