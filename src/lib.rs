//! Devfolio
//!
//! Data layer for a freelancer's portfolio site: a typed REST client for the
//! backend plus the shared store the public pages and the admin panel read
//! from and write through.
//!
//! # Architecture
//!
//! - **REST client**: one call per backend endpoint, fixed 30 s timeout,
//!   failures classified (timeout, rate limit) and logged
//! - **Store**: per-collection fetch state with an in-flight guard,
//!   mutation results returned as tagged values, refresh after create
//! - **Forms**: validation that runs before anything touches the network
//!
//! # Modules
//!
//! - [`api`]: REST client, response schemas and the [`api::PortfolioBackend`] seam
//! - [`domain`]: projects, testimonials and contact inquiries
//! - [`forms`]: form-layer validation
//! - [`session`]: admin bearer token holder
//! - [`store`]: application state container

// Allow pedantic clippy warnings that don't add value for this codebase
#![allow(clippy::missing_fields_in_debug)]
#![allow(clippy::match_same_arms)]

pub mod api;
pub mod config;
pub mod domain;
pub mod error;
pub mod forms;
pub mod session;
pub mod store;
pub mod telemetry;

pub use api::ApiClient;
pub use error::ApiError;
pub use store::AppStore;
