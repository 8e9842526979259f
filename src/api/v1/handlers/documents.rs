/*
 * Responsibility
 * - /documents 系 handler (scope guard の動作確認用)
 * - 認可は routes 側の guard で済んでいる前提。ここでは Identity を読むだけ
 */
use axum::Json;

use crate::api::v1::{
    dto::documents::{DocumentListResponse, DocumentsPurgedResponse},
    extractors::CurrentIdentity,
};

pub async fn list_documents(
    CurrentIdentity(identity): CurrentIdentity,
) -> Json<DocumentListResponse> {
    Json(DocumentListResponse {
        owner: identity.subject(),
        documents: Vec::new(),
    })
}

pub async fn purge_documents(
    CurrentIdentity(identity): CurrentIdentity,
) -> Json<DocumentsPurgedResponse> {
    tracing::info!(subject = %identity.subject(), "documents purged");
    Json(DocumentsPurgedResponse {
        purged_by: identity.subject(),
    })
}
