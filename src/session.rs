//! Admin session token storage.
//!
//! The backend's `/auth/login` endpoint hands out an opaque bearer token. The
//! session keeps it for the lifetime of the process and the REST client
//! attaches it to every `/admin/*` call. Nothing is persisted.

use std::sync::{Arc, RwLock};

/// Shared, cloneable holder for the admin bearer token.
///
/// Clones share the same token, so a login through one handle is visible to
/// every client built from it.
#[derive(Clone, Default)]
pub struct AdminSession {
    token: Arc<RwLock<Option<String>>>,
}

impl std::fmt::Debug for AdminSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdminSession")
            .field("authenticated", &self.is_authenticated())
            .finish()
    }
}

impl AdminSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from a token obtained elsewhere (e.g. configuration).
    pub fn with_token(token: impl Into<String>) -> Self {
        let session = Self::new();
        session.set_token(token);
        session
    }

    pub fn set_token(&self, token: impl Into<String>) {
        let mut guard = self
            .token
            .write()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        *guard = Some(token.into());
    }

    pub fn clear(&self) {
        let mut guard = self
            .token
            .write()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        *guard = None;
    }

    pub fn token(&self) -> Option<String> {
        self.token
            .read()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.token().is_some()
    }
}
