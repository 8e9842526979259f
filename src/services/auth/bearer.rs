//! `Authorization` header → bearer token 文字列の切り出し
//!
//! Accepts exactly `Bearer <token>`: case-sensitive scheme, one space, one
//! non-empty segment with no further spaces.

use axum::http::HeaderValue;
use thiserror::Error;

const SCHEME: &str = "Bearer";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum BearerError {
    #[error("authorization header is not valid UTF-8")]
    NotUtf8,
    #[error("authorization scheme is not Bearer")]
    WrongScheme,
    #[error("authorization header must be `Bearer <token>`")]
    Malformed,
}

/// Isolates the token from a raw `Authorization` header value.
///
/// - `Ok(None)`: no header at all
/// - `Ok(Some(token))`: well-formed bearer header
/// - `Err(_)`: header present but unusable
pub fn extract_bearer(header: Option<&HeaderValue>) -> Result<Option<&str>, BearerError> {
    let Some(header) = header else {
        return Ok(None);
    };

    let value = header.to_str().map_err(|_| BearerError::NotUtf8)?;
    parse_bearer(value).map(Some)
}

pub fn parse_bearer(value: &str) -> Result<&str, BearerError> {
    if !value.starts_with(SCHEME) {
        return Err(BearerError::WrongScheme);
    }

    let mut parts = value.split(' ');
    match (parts.next(), parts.next(), parts.next()) {
        (Some(SCHEME), Some(token), None) if !token.is_empty() => Ok(token),
        _ => Err(BearerError::Malformed),
    }
}
