use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use crate::error::AppError;
use crate::services::auth::{Authentication, Identity};

/// Handler で Identity を受け取るための extractor
/// access middleware が Authentication を request.extensions() に insert 済みである前提
/// 認証されていない（middleware 未設定を含む）場合は 401 を返す
#[derive(Debug, Clone)]
pub struct CurrentIdentity(pub Identity);

impl<S> FromRequestParts<S> for CurrentIdentity
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Authentication::of(&parts.extensions)
            .identity()
            .cloned()
            .map(CurrentIdentity)
            .ok_or(AppError::Unauthorized)
    }
}
