/*
 * Responsibility
 * - v1 の URL 構造を定義
 * - 各 route group に必要な guard (認証 / scope) をここで route_layer として掛ける
 * - access middleware (token 検証) は app 側で v1 全体に掛ける
 */
use axum::{
    Router,
    routing::{delete, get},
};

use crate::api::v1::handlers::{
    documents::{list_documents, purge_documents},
    health::health,
    me::me,
};
use crate::api::v1::scopes::{DOCUMENTS_ADMIN, DOCUMENTS_READ, DOCUMENTS_WRITE};
use crate::middleware::auth::guards;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    let profile = guards::must_be_authenticated(Router::new().route("/me", get(me)));

    let documents = guards::must_have_any_scope(
        Router::new().route("/documents", get(list_documents)),
        [DOCUMENTS_READ, DOCUMENTS_WRITE],
    );

    let admin = guards::must_have_all_scopes(
        Router::new().route("/admin/documents", delete(purge_documents)),
        [DOCUMENTS_WRITE, DOCUMENTS_ADMIN],
    );

    Router::new()
        .route("/health", get(health))
        .merge(profile)
        .merge(documents)
        .merge(admin)
}
