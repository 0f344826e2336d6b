//! REST client for the portfolio backend.
//!
//! Every backend operation is one request/response round trip against a fixed
//! base URL. No retries are attempted; failures surface as [`ApiError`](crate::error::ApiError)
//! after being classified and logged (timeouts and rate limiting at WARN).
//!
//! # Endpoints
//!
//! | Method | Path | Client call |
//! |---|---|---|
//! | GET | `/projects` | [`ApiClient::get_projects`] |
//! | GET | `/projects/featured` | [`ApiClient::get_featured_projects`] |
//! | GET | `/testimonials` | [`ApiClient::get_testimonials`] |
//! | GET | `/testimonials/featured` | [`ApiClient::get_featured_testimonials`] |
//! | POST | `/contact` | [`ApiClient::submit_contact`] |
//! | GET | `/health` | [`ApiClient::check_health`] |
//! | POST/PUT/DELETE | `/admin/projects[/:id]` | [`AdminApi`] |
//! | POST/PUT/DELETE | `/admin/testimonials[/:id]` | [`AdminApi`] |
//! | POST | `/auth/login`, `/auth/register` | [`AdminApi::login`], [`AdminApi::register`] |

pub mod client;
pub mod types;

pub use client::{AdminApi, ApiClient, REQUEST_TIMEOUT};
pub use types::{Acknowledgement, AuthResponse, HealthStatus, ListEnvelope, ListScope};

use async_trait::async_trait;

use crate::domain::{ContactSubmission, Project, ProjectDraft, Testimonial, TestimonialDraft};
use crate::error::Result;

/// The slice of the backend the store depends on.
///
/// [`ApiClient`] is the production implementation; tests substitute their own.
#[async_trait]
pub trait PortfolioBackend: Send + Sync {
    async fn list_projects(&self, scope: ListScope) -> Result<Vec<Project>>;

    async fn list_testimonials(&self, scope: ListScope) -> Result<Vec<Testimonial>>;

    async fn submit_contact(
        &self,
        contact: &ContactSubmission,
    ) -> Result<Acknowledgement<serde_json::Value>>;

    async fn create_project(&self, draft: &ProjectDraft) -> Result<Acknowledgement<Project>>;

    async fn create_testimonial(
        &self,
        draft: &TestimonialDraft,
    ) -> Result<Acknowledgement<Testimonial>>;

    /// Record an inquiry on behalf of a client (admin data entry).
    async fn create_contact(
        &self,
        contact: &ContactSubmission,
    ) -> Result<Acknowledgement<serde_json::Value>>;
}

#[async_trait]
impl PortfolioBackend for ApiClient {
    async fn list_projects(&self, scope: ListScope) -> Result<Vec<Project>> {
        Ok(ApiClient::list_projects(self, scope).await?.data)
    }

    async fn list_testimonials(&self, scope: ListScope) -> Result<Vec<Testimonial>> {
        Ok(ApiClient::list_testimonials(self, scope).await?.data)
    }

    async fn submit_contact(
        &self,
        contact: &ContactSubmission,
    ) -> Result<Acknowledgement<serde_json::Value>> {
        ApiClient::submit_contact(self, contact).await
    }

    async fn create_project(&self, draft: &ProjectDraft) -> Result<Acknowledgement<Project>> {
        self.admin().create_project(draft).await
    }

    async fn create_testimonial(
        &self,
        draft: &TestimonialDraft,
    ) -> Result<Acknowledgement<Testimonial>> {
        self.admin().create_testimonial(draft).await
    }

    // The backend exposes no admin contact route; inquiries entered by an
    // admin go through the public endpoint.
    async fn create_contact(
        &self,
        contact: &ContactSubmission,
    ) -> Result<Acknowledgement<serde_json::Value>> {
        ApiClient::submit_contact(self, contact).await
    }
}
