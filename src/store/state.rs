//! Observable store state.

use serde::Serialize;
use std::fmt;

use crate::domain::{Project, Testimonial};

/// Shown for any fetch rejected with HTTP 429.
pub const RATE_LIMIT_MESSAGE: &str = "Too many requests. Please wait a moment and refresh.";

/// One of the server-backed lists the store tracks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Collection {
    Projects,
    Testimonials,
}

impl Collection {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Projects => "projects",
            Self::Testimonials => "testimonials",
        }
    }

    /// Generic message stored when a fetch fails for any reason but rate limiting.
    pub fn load_failure_message(self) -> String {
        format!("Failed to load {}", self.as_str())
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Where a collection is in its fetch lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CollectionStatus {
    /// Never fetched.
    Empty,
    /// A request is in flight.
    Loading,
    /// Data present, no request in flight.
    Ready,
    /// Last request failed; earlier data, if any, is retained.
    Failed,
}

/// The (data, loading, error) triple tracked per collection.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FetchState<T> {
    pub data: Vec<T>,
    pub loading: bool,
    pub error: Option<String>,
    #[serde(skip)]
    pub(crate) loaded: bool,
    /// A refresh was requested while a fetch was in flight.
    #[serde(skip)]
    pub(crate) refresh_queued: bool,
}

impl<T> Default for FetchState<T> {
    fn default() -> Self {
        Self {
            data: Vec::new(),
            loading: false,
            error: None,
            loaded: false,
            refresh_queued: false,
        }
    }
}

impl<T> FetchState<T> {
    pub fn status(&self) -> CollectionStatus {
        if self.loading {
            CollectionStatus::Loading
        } else if self.error.is_some() {
            CollectionStatus::Failed
        } else if self.loaded {
            CollectionStatus::Ready
        } else {
            CollectionStatus::Empty
        }
    }

    /// Whether at least one fetch has ever succeeded.
    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    pub(crate) fn begin(&mut self) {
        self.loading = true;
        self.error = None;
    }

    pub(crate) fn succeed(&mut self, data: Vec<T>) {
        self.data = data;
        self.loaded = true;
        self.error = None;
    }

    /// Record a failure. `data` is left as it was.
    pub(crate) fn fail(&mut self, message: String) {
        self.error = Some(message);
    }
}

/// Everything subscribers can observe, published as one value per change.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct StoreSnapshot {
    pub projects: FetchState<Project>,
    pub testimonials: FetchState<Testimonial>,
    /// Most recent failure message from any store operation.
    pub error: Option<String>,
    /// Mutations currently awaiting the backend.
    pub submitting: usize,
}

impl StoreSnapshot {
    /// True while any fetch or mutation is in flight.
    pub fn loading(&self) -> bool {
        self.projects.loading || self.testimonials.loading || self.submitting > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_transitions() {
        let mut state = FetchState::<u32>::default();
        assert_eq!(state.status(), CollectionStatus::Empty);

        state.begin();
        assert_eq!(state.status(), CollectionStatus::Loading);

        state.succeed(vec![1, 2]);
        state.loading = false;
        assert_eq!(state.status(), CollectionStatus::Ready);

        state.begin();
        state.fail("Failed to load projects".into());
        state.loading = false;
        assert_eq!(state.status(), CollectionStatus::Failed);
        assert_eq!(state.data, vec![1, 2]);
    }

    #[test]
    fn test_failure_messages() {
        assert_eq!(
            Collection::Testimonials.load_failure_message(),
            "Failed to load testimonials"
        );
    }
}
