/*
 * Responsibility
 * - GET /me の response DTO
 * - subject は UUID 文字列、scopes は token の順序のまま返す
 */
use serde::Serialize;
use uuid::Uuid;

use crate::services::auth::Identity;

#[derive(Debug, Serialize)]
pub struct IdentityResponse {
    pub subject: Uuid,
    pub scopes: Vec<String>,
}

impl From<&Identity> for IdentityResponse {
    fn from(identity: &Identity) -> Self {
        Self {
            subject: identity.subject(),
            scopes: identity.scopes().to_vec(),
        }
    }
}
