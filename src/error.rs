/*
 * Responsibility
 * - アプリ共通の AppError 定義
 * - IntoResponse 実装 (HTTP status / plain-text body)
 * - 認証・認可の失敗理由はログにだけ残し、レスポンスには汎用メッセージのみ返す
 */
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

pub const UNAUTHORIZED_BODY: &str = "Token not provided or invalid";
pub const FORBIDDEN_BODY: &str = "Forbidden";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum AppError {
    #[error("unauthorized")]
    Unauthorized,
    #[error("forbidden")]
    Forbidden,
    #[error("internal server error")]
    Internal,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // &'static str bodies are served as `text/plain; charset=utf-8`
        let (status, body) = match self {
            AppError::Unauthorized => (StatusCode::UNAUTHORIZED, UNAUTHORIZED_BODY),
            AppError::Forbidden => (StatusCode::FORBIDDEN, FORBIDDEN_BODY),
            AppError::Internal => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal Server Error",
            ),
        };

        (status, body).into_response()
    }
}
