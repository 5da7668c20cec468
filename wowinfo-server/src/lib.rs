//! HTTP surface for the wowinfo retrieval-augmented QA service.
//!
//! Routes, request/response schemas, HTTP Basic auth for admin routes,
//! and the error-code mapping live here; all actual behavior is
//! delegated to [`wowinfo_rag`].

pub mod auth;
pub mod config;
pub mod error;
pub mod handlers;
pub mod routes;
pub mod schemas;
pub mod state;

pub use config::{AdminCredentials, ServerConfig};
pub use error::ApiError;
pub use routes::router;
pub use state::AppState;
