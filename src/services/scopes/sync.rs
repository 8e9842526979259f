//! Scope registration against the identity service.
//!
//! One `POST {host}/apps/scopes` at startup. No retries: a failure here is
//! meant to stop the process.

use std::time::Duration;

use serde::Serialize;
use thiserror::Error;
use tokio_util::sync::CancellationToken;
use url::Url;

use crate::config::ScopeSyncConfig;
use crate::services::scopes::ScopeDefinition;

#[derive(Debug, Error)]
pub enum ScopeSyncError {
    #[error("invalid scope sync endpoint: {0}")]
    Endpoint(#[from] url::ParseError),
    #[error("scope sync request failed: {0}")]
    Transport(#[source] reqwest::Error),
    #[error("scope sync rejected with status {0}")]
    Status(reqwest::StatusCode),
    #[error("scope sync cancelled")]
    Cancelled,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ScopeSyncRequest<'a> {
    secret: &'a str,
    scopes: &'a [ScopeDefinition],
    owner_id: &'a str,
}

#[derive(Clone)]
pub struct ScopeSyncClient {
    http: reqwest::Client,
    endpoint: Url,
    secret: String,
    owner_id: String,
}

impl std::fmt::Debug for ScopeSyncClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Do not print the app secret
        f.debug_struct("ScopeSyncClient")
            .field("endpoint", &self.endpoint.as_str())
            .field("owner_id", &self.owner_id)
            .finish()
    }
}

impl ScopeSyncClient {
    pub fn new(
        host: &Url,
        secret: impl Into<String>,
        owner_id: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, ScopeSyncError> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(ScopeSyncError::Transport)?;

        Self::with_http_client(http, host, secret, owner_id)
    }

    /// Use a caller-provided `reqwest::Client` (proxies, custom TLS, ...).
    pub fn with_http_client(
        http: reqwest::Client,
        host: &Url,
        secret: impl Into<String>,
        owner_id: impl Into<String>,
    ) -> Result<Self, ScopeSyncError> {
        Ok(Self {
            http,
            endpoint: endpoint_for(host)?,
            secret: secret.into(),
            owner_id: owner_id.into(),
        })
    }

    pub fn from_config(config: &ScopeSyncConfig, secret: &str) -> Result<Self, ScopeSyncError> {
        Self::new(&config.host, secret, config.owner_id.clone(), config.timeout)
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Register `scopes`. Any 2xx is success; everything else is an error.
    pub async fn sync(
        &self,
        scopes: &[ScopeDefinition],
        cancel: &CancellationToken,
    ) -> Result<(), ScopeSyncError> {
        let body = ScopeSyncRequest {
            secret: &self.secret,
            scopes,
            owner_id: &self.owner_id,
        };

        let request = self.http.post(self.endpoint.clone()).json(&body).send();

        let response = tokio::select! {
            _ = cancel.cancelled() => return Err(ScopeSyncError::Cancelled),
            res = request => res.map_err(ScopeSyncError::Transport)?,
        };

        let status = response.status();
        if !status.is_success() {
            tracing::error!(endpoint = %self.endpoint, %status, "scope sync rejected");
            return Err(ScopeSyncError::Status(status));
        }

        tracing::info!(
            endpoint = %self.endpoint,
            count = scopes.len(),
            "scopes synced"
        );
        Ok(())
    }
}

// `{host}/apps/scopes`, keeping any base path the host already has.
fn endpoint_for(host: &Url) -> Result<Url, url::ParseError> {
    Url::parse(&format!(
        "{}/apps/scopes",
        host.as_str().trim_end_matches('/')
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_appends_path() {
        let cases = [
            ("https://login.local", "https://login.local/apps/scopes"),
            ("https://login.local/", "https://login.local/apps/scopes"),
            ("https://example.com/login", "https://example.com/login/apps/scopes"),
        ];
        for (host, expected) in cases {
            let host = Url::parse(host).unwrap();
            assert_eq!(endpoint_for(&host).unwrap().as_str(), expected);
        }
    }

    #[test]
    fn request_body_uses_wire_names() {
        let scopes = [ScopeDefinition::new("scope_1", "scope 1")];
        let body = ScopeSyncRequest {
            secret: "s3cret",
            scopes: &scopes,
            owner_id: "owner",
        };

        assert_eq!(
            serde_json::to_value(&body).unwrap(),
            serde_json::json!({
                "secret": "s3cret",
                "scopes": [{"scope": "scope_1", "description": "scope 1"}],
                "ownerId": "owner",
            })
        );
    }

    #[test]
    fn debug_output_hides_the_secret() {
        let host = Url::parse("https://login.local").unwrap();
        let client =
            ScopeSyncClient::new(&host, "very-secret", "owner", Duration::from_secs(1)).unwrap();
        assert!(!format!("{client:?}").contains("very-secret"));
    }
}
