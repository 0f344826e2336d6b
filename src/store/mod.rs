//! Application state container.
//!
//! [`AppStore`] is the single source of truth for the collections the site
//! renders. It owns one [`FetchState`] per collection, suppresses duplicate
//! fetches while one is in flight, and refreshes a collection after an admin
//! creates an item in it.
//!
//! # Architecture
//!
//! - [`AppStore`]: cheap-to-clone handle; every clone shares the same state
//! - [`StoreSnapshot`]: the observable state, published through a
//!   [`tokio::sync::watch`] channel on every change
//! - [`MutationResult`]: tagged outcome of a mutation, never an `Err`
//!
//! # Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use devfolio::{api::ApiClient, store::AppStore};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = ApiClient::new("http://localhost:3003/api")?;
//! let store = AppStore::new(Arc::new(client));
//!
//! store.fetch_projects().await;
//! let titles = store.select(|s| {
//!     s.projects.data.iter().map(|p| p.title.clone()).collect::<Vec<_>>()
//! });
//! # Ok(())
//! # }
//! ```

pub mod selectors;
mod state;

pub use state::{
    Collection, CollectionStatus, FetchState, RATE_LIMIT_MESSAGE, StoreSnapshot,
};

use std::future::Future;
use std::marker::PhantomData;
use std::pin::Pin;
use std::sync::Arc;

use serde::Serialize;
use serde::ser::SerializeStruct;
use tokio::sync::watch;
use tracing::{debug, info, warn};

use crate::api::{Acknowledgement, ListScope, PortfolioBackend};
use crate::domain::{ContactSubmission, Project, ProjectDraft, Testimonial, TestimonialDraft};
use crate::error::{ApiError, Result};

/// Construction options.
#[derive(Debug, Clone, Copy, Default)]
pub struct StoreOptions {
    /// Listing the collection fetches read from.
    pub scope: ListScope,
}

/// Outcome of a store mutation, returned instead of an error.
#[derive(Debug, Clone, PartialEq)]
pub enum MutationResult<T> {
    Success { data: T },
    Failure { error: String },
}

impl<T> MutationResult<T> {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    pub fn data(&self) -> Option<&T> {
        match self {
            Self::Success { data } => Some(data),
            Self::Failure { .. } => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Success { .. } => None,
            Self::Failure { error } => Some(error),
        }
    }

    pub fn into_result(self) -> std::result::Result<T, String> {
        match self {
            Self::Success { data } => Ok(data),
            Self::Failure { error } => Err(error),
        }
    }
}

/// Serializes as `{"success":true,"data":..}` or `{"success":false,"error":".."}`.
impl<T: Serialize> Serialize for MutationResult<T> {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let mut out = serializer.serialize_struct("MutationResult", 2)?;
        match self {
            Self::Success { data } => {
                out.serialize_field("success", &true)?;
                out.serialize_field("data", data)?;
            }
            Self::Failure { error } => {
                out.serialize_field("success", &false)?;
                out.serialize_field("error", error)?;
            }
        }
        out.end()
    }
}

type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Ties an item type to its slot in the snapshot and its backend listing.
trait CollectionItem: Send + Sized + 'static {
    const COLLECTION: Collection;

    fn slot(snapshot: &mut StoreSnapshot) -> &mut FetchState<Self>;

    fn load(backend: &dyn PortfolioBackend, scope: ListScope) -> BoxFuture<'_, Result<Vec<Self>>>;
}

impl CollectionItem for Project {
    const COLLECTION: Collection = Collection::Projects;

    fn slot(snapshot: &mut StoreSnapshot) -> &mut FetchState<Self> {
        &mut snapshot.projects
    }

    fn load(backend: &dyn PortfolioBackend, scope: ListScope) -> BoxFuture<'_, Result<Vec<Self>>> {
        backend.list_projects(scope)
    }
}

impl CollectionItem for Testimonial {
    const COLLECTION: Collection = Collection::Testimonials;

    fn slot(snapshot: &mut StoreSnapshot) -> &mut FetchState<Self> {
        &mut snapshot.testimonials
    }

    fn load(backend: &dyn PortfolioBackend, scope: ListScope) -> BoxFuture<'_, Result<Vec<Self>>> {
        backend.list_testimonials(scope)
    }
}

/// Clears a collection's in-flight flag if its fetch unwinds before completing.
struct InFlight<'a, T: CollectionItem> {
    store: &'a AppStore,
    armed: bool,
    _item: PhantomData<fn() -> T>,
}

impl<'a, T: CollectionItem> InFlight<'a, T> {
    fn new(store: &'a AppStore) -> Self {
        Self {
            store,
            armed: true,
            _item: PhantomData,
        }
    }

    /// The completion already cleared the flag.
    fn release(&mut self) {
        self.armed = false;
    }
}

impl<T: CollectionItem> Drop for InFlight<'_, T> {
    fn drop(&mut self) {
        if !self.armed {
            return;
        }
        self.store.inner.state.send_if_modified(|s| {
            let slot = T::slot(s);
            let was_loading = slot.loading;
            slot.loading = false;
            slot.refresh_queued = false;
            was_loading
        });
    }
}

/// Shared fetch/cache store for the site's collections.
///
/// Construct one per application root and hand clones to consumers. State
/// lives until the last clone is dropped; nothing is persisted.
#[derive(Clone)]
pub struct AppStore {
    inner: Arc<StoreInner>,
}

struct StoreInner {
    backend: Arc<dyn PortfolioBackend>,
    state: watch::Sender<StoreSnapshot>,
    options: StoreOptions,
}

impl std::fmt::Debug for AppStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.inner.state.borrow();
        f.debug_struct("AppStore")
            .field("scope", &self.inner.options.scope)
            .field("projects", &state.projects.status())
            .field("testimonials", &state.testimonials.status())
            .field("subscribers", &self.inner.state.receiver_count())
            .finish()
    }
}

impl AppStore {
    pub fn new(backend: Arc<dyn PortfolioBackend>) -> Self {
        Self::with_options(backend, StoreOptions::default())
    }

    pub fn with_options(backend: Arc<dyn PortfolioBackend>, options: StoreOptions) -> Self {
        let (state, _) = watch::channel(StoreSnapshot::default());
        Self {
            inner: Arc::new(StoreInner {
                backend,
                state,
                options,
            }),
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Observation
    // ─────────────────────────────────────────────────────────────────────────

    /// Receive every state change from now on.
    pub fn subscribe(&self) -> watch::Receiver<StoreSnapshot> {
        self.inner.state.subscribe()
    }

    pub fn snapshot(&self) -> StoreSnapshot {
        self.inner.state.borrow().clone()
    }

    /// Project a value out of the current state without cloning all of it.
    pub fn select<R>(&self, selector: impl FnOnce(&StoreSnapshot) -> R) -> R {
        selector(&self.inner.state.borrow())
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Fetches
    // ─────────────────────────────────────────────────────────────────────────

    /// Load projects unless a projects fetch is already in flight.
    ///
    /// Failures land in `projects.error`; nothing is returned.
    pub async fn fetch_projects(&self) {
        self.fetch::<Project>(false).await;
    }

    /// Load testimonials unless a testimonials fetch is already in flight.
    pub async fn fetch_testimonials(&self) {
        self.fetch::<Testimonial>(false).await;
    }

    /// Start a fetch, or with `queue_if_busy` ask the in-flight one to run again.
    async fn fetch<T: CollectionItem>(&self, queue_if_busy: bool) {
        let collection = T::COLLECTION;
        let mut started = false;
        self.inner.state.send_if_modified(|s| {
            let slot = T::slot(s);
            if slot.loading {
                if queue_if_busy {
                    slot.refresh_queued = true;
                }
                return false;
            }
            slot.begin();
            s.error = None;
            started = true;
            true
        });

        if !started {
            if queue_if_busy {
                debug!(
                    name: "store.refresh.queued",
                    %collection,
                    "Refresh queued behind in-flight fetch"
                );
            } else {
                debug!(name: "store.fetch.suppressed", %collection, "Fetch already in flight");
            }
            return;
        }

        // The request runs on its own task so the in-flight flag is released
        // even when the caller's future is dropped before the response lands.
        let store = self.clone();
        let task = tokio::spawn(async move { store.run_fetch::<T>().await });
        if let Err(err) = task.await {
            warn!(
                name: "store.fetch.aborted",
                %collection,
                error = %err,
                "Fetch task ended without completing"
            );
        }
    }

    /// Issue the request, then once more per queued refresh. The caller holds the flag.
    async fn run_fetch<T: CollectionItem>(&self) {
        let collection = T::COLLECTION;
        let mut in_flight = InFlight::<T>::new(self);

        loop {
            info!(
                name: "store.fetch.started",
                %collection,
                scope = ?self.inner.options.scope,
                "Fetching collection"
            );
            let result = T::load(self.inner.backend.as_ref(), self.inner.options.scope).await;

            let mut again = false;
            self.inner.state.send_modify(|s| {
                match result {
                    Ok(data) => {
                        info!(
                            name: "store.fetch.completed",
                            %collection,
                            count = data.len(),
                            "Collection loaded"
                        );
                        T::slot(s).succeed(data);
                    }
                    Err(err) => {
                        warn!(
                            name: "store.fetch.failed",
                            %collection,
                            error = %err,
                            "Collection fetch failed"
                        );
                        let message = fetch_failure_message(collection, &err);
                        T::slot(s).fail(message.clone());
                        s.error = Some(message);
                    }
                }
                let slot = T::slot(s);
                if slot.refresh_queued {
                    slot.refresh_queued = false;
                    slot.error = None;
                    s.error = None;
                    again = true;
                } else {
                    slot.loading = false;
                }
            });

            if !again {
                in_flight.release();
                break;
            }
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Mutations
    // ─────────────────────────────────────────────────────────────────────────

    /// Send a contact inquiry. Collections are not touched.
    pub async fn submit_contact(
        &self,
        contact: &ContactSubmission,
    ) -> MutationResult<Acknowledgement<serde_json::Value>> {
        self.mutate(
            "submit_contact",
            "Failed to send message",
            self.inner.backend.submit_contact(contact),
        )
        .await
    }

    /// Create a project, then refresh `projects` so subscribers see it.
    ///
    /// If a projects fetch is already in flight the refresh is queued behind
    /// it rather than dropped.
    pub async fn create_project(
        &self,
        draft: &ProjectDraft,
    ) -> MutationResult<Acknowledgement<Project>> {
        let outcome = self
            .mutate(
                "create_project",
                "Failed to create project",
                self.inner.backend.create_project(draft),
            )
            .await;
        if outcome.is_success() {
            self.fetch::<Project>(true).await;
        }
        outcome
    }

    /// Create a testimonial, then refresh `testimonials`.
    pub async fn create_testimonial(
        &self,
        draft: &TestimonialDraft,
    ) -> MutationResult<Acknowledgement<Testimonial>> {
        let outcome = self
            .mutate(
                "create_testimonial",
                "Failed to create testimonial",
                self.inner.backend.create_testimonial(draft),
            )
            .await;
        if outcome.is_success() {
            self.fetch::<Testimonial>(true).await;
        }
        outcome
    }

    pub async fn create_contact(
        &self,
        contact: &ContactSubmission,
    ) -> MutationResult<Acknowledgement<serde_json::Value>> {
        self.mutate(
            "create_contact",
            "Failed to create contact",
            self.inner.backend.create_contact(contact),
        )
        .await
    }

    /// Drop every error message. Data and loading flags stay as they are.
    pub fn clear_error(&self) {
        self.inner.state.send_if_modified(|s| {
            let had_error =
                s.error.is_some() || s.projects.error.is_some() || s.testimonials.error.is_some();
            s.error = None;
            s.projects.error = None;
            s.testimonials.error = None;
            had_error
        });
    }

    async fn mutate<T>(
        &self,
        operation: &'static str,
        fallback: &'static str,
        call: impl Future<Output = Result<T>>,
    ) -> MutationResult<T> {
        self.inner.state.send_modify(|s| s.submitting += 1);
        debug!(name: "store.mutation.started", operation, "Mutation started");

        let outcome = match call.await {
            Ok(data) => {
                info!(name: "store.mutation.completed", operation, "Mutation succeeded");
                MutationResult::Success { data }
            }
            Err(err) => {
                warn!(name: "store.mutation.failed", operation, error = %err, "Mutation failed");
                MutationResult::Failure {
                    error: err
                        .server_message()
                        .map_or_else(|| fallback.to_string(), String::from),
                }
            }
        };

        self.inner.state.send_modify(|s| {
            s.submitting = s.submitting.saturating_sub(1);
            if let MutationResult::Failure { error } = &outcome {
                s.error = Some(error.clone());
            }
        });
        outcome
    }
}

fn fetch_failure_message(collection: Collection, err: &ApiError) -> String {
    if err.is_rate_limited() {
        RATE_LIMIT_MESSAGE.to_string()
    } else {
        collection.load_failure_message()
    }
}
