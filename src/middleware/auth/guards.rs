//! Scope-based access guards.
//!
//! Each guard reads the `Authentication` attached by [`super::access`] and either
//! forwards the request or short-circuits:
//! - not authenticated (absent / invalid) → 401
//! - authenticated but the scope check fails → 403
//!
//! Guards are installed with `route_layer`, so they only run for matched routes
//! and must be applied after the routes they protect.

use std::sync::Arc;

use axum::{
    Router,
    body::Body,
    extract::State,
    http::Request,
    middleware::{self, Next},
    response::Response,
};

use crate::error::AppError;
use crate::services::auth::Authentication;

/// Access policy evaluated against the request's `Authentication`.
///
/// Scope names compare by exact string equality; order does not matter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScopePolicy {
    Authenticated,
    /// At least one of the scopes. An empty list never matches.
    AnyOf(Vec<String>),
    /// Every one of the scopes. An empty list always matches.
    AllOf(Vec<String>),
}

impl ScopePolicy {
    pub fn any_of<I, T>(scopes: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        Self::AnyOf(scopes.into_iter().map(Into::into).collect())
    }

    pub fn all_of<I, T>(scopes: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        Self::AllOf(scopes.into_iter().map(Into::into).collect())
    }

    pub fn evaluate(&self, auth: &Authentication) -> Result<(), AppError> {
        let identity = auth.identity().ok_or(AppError::Unauthorized)?;

        let allowed = match self {
            ScopePolicy::Authenticated => true,
            ScopePolicy::AnyOf(required) => required.iter().any(|s| identity.has_scope(s)),
            ScopePolicy::AllOf(required) => required.iter().all(|s| identity.has_scope(s)),
        };

        if allowed {
            Ok(())
        } else {
            tracing::debug!(
                subject = %identity.subject(),
                policy = ?self,
                "scope check failed"
            );
            Err(AppError::Forbidden)
        }
    }
}

/// Reject requests without a verified token (401).
pub fn must_be_authenticated<S>(router: Router<S>) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    apply(router, ScopePolicy::Authenticated)
}

/// Require at least one of `scopes` (401 if unauthenticated, else 403).
pub fn must_have_any_scope<S, I, T>(router: Router<S>, scopes: I) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
    I: IntoIterator<Item = T>,
    T: Into<String>,
{
    apply(router, ScopePolicy::any_of(scopes))
}

/// Require every one of `scopes` (401 if unauthenticated, else 403).
pub fn must_have_all_scopes<S, I, T>(router: Router<S>, scopes: I) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
    I: IntoIterator<Item = T>,
    T: Into<String>,
{
    apply(router, ScopePolicy::all_of(scopes))
}

pub fn apply<S>(router: Router<S>, policy: ScopePolicy) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    router.route_layer(middleware::from_fn_with_state(
        Arc::new(policy),
        guard_middleware,
    ))
}

async fn guard_middleware(
    State(policy): State<Arc<ScopePolicy>>,
    req: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    policy.evaluate(Authentication::of(req.extensions()))?;
    Ok(next.run(req).await)
}
