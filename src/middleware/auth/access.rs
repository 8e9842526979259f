//! access token（HMAC JWT）検証 → Authentication を extensions に入れる
//!
//! This layer never rejects on its own. Every request leaves it carrying an
//! `Authentication` (absent / invalid / authenticated); the guards in
//! [`super::guards`] decide what to refuse.

use std::sync::Arc;

use axum::{
    Router,
    body::Body,
    extract::State,
    http::{Request, header},
    middleware::{self, Next},
    response::Response,
};

use crate::services::auth::{AuthService, Authentication};

/// Apply the authentication middleware to every route of `router`.
///
/// 例：
/// ```ignore
/// let v1 = api::v1::routes();
/// let v1 = middleware::auth::access::apply(v1, state.auth.clone());
/// app = app.nest("/api/v1", v1);
/// ```
pub fn apply<S>(router: Router<S>, auth: Arc<AuthService>) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    router.layer(middleware::from_fn_with_state(auth, access_middleware))
}

async fn access_middleware(
    State(auth): State<Arc<AuthService>>,
    req: Request<Body>,
    next: Next,
) -> Response {
    let outcome = auth.authenticate(req.headers().get(header::AUTHORIZATION));

    // middleware → guard / extractor への受け渡し
    next.run(attach(req, outcome)).await
}

/// Attach `outcome` to the request, consuming it and handing back the derived request.
///
/// A previously attached outcome is replaced, never merged.
pub fn attach<B>(mut req: Request<B>, outcome: Authentication) -> Request<B> {
    req.extensions_mut().insert(outcome);
    req
}
