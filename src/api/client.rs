//! HTTP client for the portfolio backend.

use std::time::Duration;

use reqwest::{Method, RequestBuilder, header};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};
use url::Url;

use super::types::{
    Acknowledgement, AuthResponse, ErrorBody, HealthStatus, ListEnvelope, ListScope,
};
use crate::domain::{
    ContactSubmission, Credentials, Project, ProjectDraft, Registration, ResourceId, Testimonial,
    TestimonialDraft,
};
use crate::error::{ApiError, FailureClass, Result};
use crate::session::AdminSession;

/// Bound on every request, from connect to the last body byte.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// HTTP client for the backend REST API.
///
/// # Example
///
/// ```rust,no_run
/// use devfolio::api::ApiClient;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let client = ApiClient::new("http://localhost:3003/api")?;
///
/// let featured = client.get_featured_projects().await?;
/// for project in featured.data {
///     println!("{} ({})", project.title, project.category);
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct ApiClient {
    base_url: Url,
    http: reqwest::Client,
    session: AdminSession,
}

impl ApiClient {
    /// Create a new client with the fixed [`REQUEST_TIMEOUT`].
    ///
    /// # Arguments
    ///
    /// * `base_url` - The API root including its `/api` prefix (e.g. "http://localhost:3003/api")
    pub fn new(base_url: impl AsRef<str>) -> Result<Self> {
        let mut headers = header::HeaderMap::new();
        headers.insert(
            header::ACCEPT,
            header::HeaderValue::from_static("application/json"),
        );
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .default_headers(headers)
            .build()?;
        Self::with_client(base_url, http)
    }

    /// Create a new client with a custom reqwest client.
    pub fn with_client(base_url: impl AsRef<str>, http: reqwest::Client) -> Result<Self> {
        let mut base_url = Url::parse(base_url.as_ref())?;
        // `Url::join` replaces the last segment unless the base ends in a slash.
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }
        Ok(Self {
            base_url,
            http,
            session: AdminSession::new(),
        })
    }

    /// Share an existing admin session with this client.
    #[must_use]
    pub fn with_session(mut self, session: AdminSession) -> Self {
        self.session = session;
        self
    }

    /// Get the base URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn session(&self) -> &AdminSession {
        &self.session
    }

    /// Access the admin API.
    pub fn admin(&self) -> AdminApi<'_> {
        AdminApi { client: self }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Public endpoints
    // ─────────────────────────────────────────────────────────────────────────

    /// List every project.
    pub async fn get_projects(&self) -> Result<ListEnvelope<Project>> {
        self.call(Method::GET, "projects", NO_BODY).await
    }

    /// List featured projects only.
    pub async fn get_featured_projects(&self) -> Result<ListEnvelope<Project>> {
        self.call(Method::GET, "projects/featured", NO_BODY).await
    }

    pub async fn get_testimonials(&self) -> Result<ListEnvelope<Testimonial>> {
        self.call(Method::GET, "testimonials", NO_BODY).await
    }

    pub async fn get_featured_testimonials(&self) -> Result<ListEnvelope<Testimonial>> {
        self.call(Method::GET, "testimonials/featured", NO_BODY).await
    }

    /// Projects for the given listing.
    pub async fn list_projects(&self, scope: ListScope) -> Result<ListEnvelope<Project>> {
        match scope {
            ListScope::Featured => self.get_featured_projects().await,
            ListScope::All => self.get_projects().await,
        }
    }

    /// Testimonials for the given listing.
    pub async fn list_testimonials(&self, scope: ListScope) -> Result<ListEnvelope<Testimonial>> {
        match scope {
            ListScope::Featured => self.get_featured_testimonials().await,
            ListScope::All => self.get_testimonials().await,
        }
    }

    /// Post a contact inquiry. Validation is the caller's job.
    pub async fn submit_contact(
        &self,
        contact: &ContactSubmission,
    ) -> Result<Acknowledgement<serde_json::Value>> {
        self.call(Method::POST, "contact", Some(contact)).await
    }

    /// Liveness check.
    pub async fn check_health(&self) -> Result<HealthStatus> {
        self.call(Method::GET, "health", NO_BODY).await
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Internal helpers
    // ─────────────────────────────────────────────────────────────────────────

    fn url(&self, path: &str) -> Result<Url> {
        Ok(self.base_url.join(path.trim_start_matches('/'))?)
    }

    fn request(&self, method: Method, path: &str) -> Result<RequestBuilder> {
        Ok(self.http.request(method, self.url(path)?))
    }

    fn authorized(&self, builder: RequestBuilder) -> RequestBuilder {
        match self.session.token() {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    async fn call<B, T>(&self, method: Method, path: &str, body: Option<&B>) -> Result<T>
    where
        B: serde::Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let builder = self.request(method.clone(), path)?;
        self.send(method, path, builder, body).await
    }

    async fn send<B, T>(
        &self,
        method: Method,
        path: &str,
        mut builder: RequestBuilder,
        body: Option<&B>,
    ) -> Result<T>
    where
        B: serde::Serialize + ?Sized,
        T: DeserializeOwned,
    {
        if let Some(body) = body {
            builder = builder.json(body);
        }
        debug!(name: "api.request.sent", method = %method, path, "Sending request");

        Self::handle_response(builder)
            .await
            .map_err(|err| observe_failure(&method, path, err))
    }

    async fn handle_response<T: DeserializeOwned>(builder: RequestBuilder) -> Result<T> {
        let response = builder.send().await.map_err(transport_error)?;
        let status = response.status();
        let bytes = response.bytes().await.map_err(transport_error)?;

        if status.is_success() {
            // 204 and friends decode as if the server sent an empty object.
            let body: &[u8] = if bytes.is_empty() { b"{}" } else { &bytes };
            Ok(serde_json::from_slice(body)?)
        } else {
            let message = serde_json::from_slice::<ErrorBody>(&bytes)
                .ok()
                .and_then(ErrorBody::into_message);
            Err(ApiError::Status {
                status: status.as_u16(),
                message,
            })
        }
    }
}

const NO_BODY: Option<&()> = None;

fn transport_error(err: reqwest::Error) -> ApiError {
    if err.is_timeout() {
        ApiError::Timeout
    } else {
        ApiError::Http(err)
    }
}

/// Response interceptor: logs timeouts and rate limiting, returns the error untouched.
fn observe_failure(method: &Method, path: &str, err: ApiError) -> ApiError {
    match err.class() {
        FailureClass::Timeout => warn!(
            name: "api.request.timeout",
            method = %method,
            path,
            timeout_secs = REQUEST_TIMEOUT.as_secs(),
            "Request timed out"
        ),
        FailureClass::RateLimited => warn!(
            name: "api.request.rate_limited",
            method = %method,
            path,
            "Rate limited by backend"
        ),
        FailureClass::Other => debug!(
            name: "api.request.failed",
            method = %method,
            path,
            error = %err,
            "Request failed"
        ),
    }
    err
}

// =============================================================================
// Admin API
// =============================================================================

/// Admin API client. Calls carry the session's bearer token when one is held.
#[derive(Debug)]
pub struct AdminApi<'a> {
    client: &'a ApiClient,
}

impl AdminApi<'_> {
    async fn call<B, T>(&self, method: Method, path: &str, body: Option<&B>) -> Result<T>
    where
        B: serde::Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let builder = self
            .client
            .authorized(self.client.request(method.clone(), path)?);
        self.client.send(method, path, builder, body).await
    }

    pub async fn create_project(&self, draft: &ProjectDraft) -> Result<Acknowledgement<Project>> {
        self.call(Method::POST, "admin/projects", Some(draft)).await
    }

    pub async fn update_project(
        &self,
        id: &ResourceId,
        draft: &ProjectDraft,
    ) -> Result<Acknowledgement<Project>> {
        self.call(Method::PUT, &format!("admin/projects/{id}"), Some(draft))
            .await
    }

    pub async fn delete_project(
        &self,
        id: &ResourceId,
    ) -> Result<Acknowledgement<serde_json::Value>> {
        self.call(Method::DELETE, &format!("admin/projects/{id}"), NO_BODY)
            .await
    }

    pub async fn create_testimonial(
        &self,
        draft: &TestimonialDraft,
    ) -> Result<Acknowledgement<Testimonial>> {
        self.call(Method::POST, "admin/testimonials", Some(draft))
            .await
    }

    pub async fn update_testimonial(
        &self,
        id: &ResourceId,
        draft: &TestimonialDraft,
    ) -> Result<Acknowledgement<Testimonial>> {
        self.call(Method::PUT, &format!("admin/testimonials/{id}"), Some(draft))
            .await
    }

    pub async fn delete_testimonial(
        &self,
        id: &ResourceId,
    ) -> Result<Acknowledgement<serde_json::Value>> {
        self.call(Method::DELETE, &format!("admin/testimonials/{id}"), NO_BODY)
            .await
    }

    /// Exchange credentials for a token and keep it in the client's session.
    pub async fn login(&self, credentials: &Credentials) -> Result<AuthResponse> {
        let auth: AuthResponse = self
            .call(Method::POST, "auth/login", Some(credentials))
            .await?;
        self.client.session.set_token(auth.token.clone());
        debug!(name: "api.session.opened", email = %credentials.email, "Admin session opened");
        Ok(auth)
    }

    /// Register a new admin account. The session is left as it was.
    pub async fn register(&self, registration: &Registration) -> Result<AuthResponse> {
        self.call(Method::POST, "auth/register", Some(registration))
            .await
    }

    /// Forget the held token. Purely local; the backend is not contacted.
    pub fn logout(&self) {
        self.client.session.clear();
    }
}
