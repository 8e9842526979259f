//! Bearer-token authentication and scope-based authorization for axum services.
//!
//! - [`middleware::auth::access`] verifies `Authorization: Bearer <jwt>` (HMAC) and
//!   attaches an [`services::auth::Authentication`] to every request.
//! - [`middleware::auth::guards`] reject requests that are unauthenticated (401)
//!   or lack the required scopes (403).
//! - [`services::scopes`] registers the app's scopes with the identity service.

pub mod api;
pub mod app;
pub mod config;
pub mod error;
pub mod middleware;
pub mod services;
pub mod state;
