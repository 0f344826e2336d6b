//! Wire-level domain model shared by the REST client, the store and the forms.
//!
//! All types use camelCase field names on the wire, matching the backend.
//!
//! # Types
//!
//! - [`Project`]: a showcased portfolio entry
//! - [`Testimonial`]: a client quote
//! - [`ContactSubmission`]: an inquiry sent from the contact page (write-only)
//! - [`Credentials`] / [`Registration`]: admin authentication payloads

mod contact;
mod project;
mod testimonial;

pub use contact::{BudgetRange, ContactSubmission, ProjectType, Timeline, UnknownLabel};
pub use project::{Project, ProjectCategory, ProjectDraft};
pub use testimonial::{DEFAULT_RATING, Testimonial, TestimonialDraft};

use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque server-assigned identifier.
///
/// The backend may hand out numeric ids or string ids (e.g. document ids), so
/// both are accepted and echoed back verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ResourceId {
    /// Numeric identifier.
    Number(u64),
    /// String identifier.
    Text(String),
}

impl fmt::Display for ResourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

impl From<u64> for ResourceId {
    fn from(value: u64) -> Self {
        Self::Number(value)
    }
}

impl From<&str> for ResourceId {
    fn from(value: &str) -> Self {
        value
            .parse::<u64>()
            .map_or_else(|_| Self::Text(value.to_string()), Self::Number)
    }
}

/// Admin login payload for `/auth/login`.
#[derive(Clone, Serialize, Deserialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Admin registration payload for `/auth/register`.
#[derive(Clone, Serialize, Deserialize)]
pub struct Registration {
    pub name: String,
    pub email: String,
    pub password: String,
}

impl fmt::Debug for Registration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registration")
            .field("name", &self.name)
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}
