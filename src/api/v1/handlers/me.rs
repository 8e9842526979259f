/*
 * Responsibility
 * - GET /me: 認証済み caller の subject / scopes を返す
 */
use axum::Json;

use crate::api::v1::{dto::identity::IdentityResponse, extractors::CurrentIdentity};

pub async fn me(CurrentIdentity(identity): CurrentIdentity) -> Json<IdentityResponse> {
    Json(IdentityResponse::from(&identity))
}
