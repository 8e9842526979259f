#![allow(clippy::unwrap_used, clippy::expect_used)]

//! Scope sync against a stub identity service bound to 127.0.0.1:0.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::{
    Json, Router,
    extract::State,
    http::{HeaderMap, StatusCode, header},
    routing::post,
};
use serde_json::{Value, json};
use tokio_util::sync::CancellationToken;
use url::Url;

use scope_gate::services::scopes::{ScopeDefinition, ScopeSyncClient, ScopeSyncError};

#[derive(Clone, Default)]
struct Received {
    bodies: Arc<Mutex<Vec<Value>>>,
    content_types: Arc<Mutex<Vec<String>>>,
}

/// Start a stub that answers `POST /apps/scopes` with `status`.
async fn stub(status: StatusCode, delay: Duration) -> (Url, Received) {
    let received = Received::default();

    async fn handler(
        State((received, status, delay)): State<(Received, StatusCode, Duration)>,
        headers: HeaderMap,
        Json(body): Json<Value>,
    ) -> StatusCode {
        if let Some(ct) = headers.get(header::CONTENT_TYPE) {
            received
                .content_types
                .lock()
                .unwrap()
                .push(ct.to_str().unwrap().to_string());
        }
        received.bodies.lock().unwrap().push(body);
        tokio::time::sleep(delay).await;
        status
    }

    let app = Router::new()
        .route("/apps/scopes", post(handler))
        .with_state((received.clone(), status, delay));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (Url::parse(&format!("http://{addr}")).unwrap(), received)
}

fn scopes() -> Vec<ScopeDefinition> {
    vec![
        ScopeDefinition::new("scope_1", "scope 1"),
        ScopeDefinition::new("scope_2", "scope 2"),
    ]
}

fn client(host: &Url) -> ScopeSyncClient {
    ScopeSyncClient::new(host, "app-secret", "owner-1", Duration::from_secs(5)).unwrap()
}

#[tokio::test]
async fn posts_scopes_as_json() {
    let (host, received) = stub(StatusCode::CREATED, Duration::ZERO).await;

    client(&host)
        .sync(&scopes(), &CancellationToken::new())
        .await
        .expect("sync should succeed on 2xx");

    let bodies = received.bodies.lock().unwrap();
    assert_eq!(bodies.len(), 1);
    assert_eq!(
        bodies[0],
        json!({
            "secret": "app-secret",
            "scopes": [
                {"scope": "scope_1", "description": "scope 1"},
                {"scope": "scope_2", "description": "scope 2"},
            ],
            "ownerId": "owner-1",
        })
    );

    let content_types = received.content_types.lock().unwrap();
    assert!(content_types[0].starts_with("application/json"));
}

#[tokio::test]
async fn non_success_status_is_an_error() {
    let (host, _) = stub(StatusCode::INTERNAL_SERVER_ERROR, Duration::ZERO).await;

    let err = client(&host)
        .sync(&scopes(), &CancellationToken::new())
        .await
        .unwrap_err();

    match err {
        ScopeSyncError::Status(status) => assert_eq!(status.as_u16(), 500),
        other => panic!("expected status error, got {other:?}"),
    }
}

#[tokio::test]
async fn redirect_status_is_an_error() {
    let (host, _) = stub(StatusCode::NOT_MODIFIED, Duration::ZERO).await;

    let err = client(&host)
        .sync(&scopes(), &CancellationToken::new())
        .await
        .unwrap_err();

    assert!(matches!(err, ScopeSyncError::Status(_)));
}

#[tokio::test]
async fn cancellation_aborts_the_call() {
    let (host, _) = stub(StatusCode::OK, Duration::from_secs(30)).await;
    let cancel = CancellationToken::new();

    let trigger = cancel.clone();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(50)).await;
        trigger.cancel();
    });

    let err = client(&host).sync(&scopes(), &cancel).await.unwrap_err();
    assert!(matches!(err, ScopeSyncError::Cancelled));
}

#[tokio::test]
async fn unreachable_host_is_a_transport_error() {
    // Bind then drop to get a port with nothing listening.
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let host = Url::parse(&format!("http://{addr}")).unwrap();
    let err = client(&host)
        .sync(&scopes(), &CancellationToken::new())
        .await
        .unwrap_err();

    assert!(matches!(err, ScopeSyncError::Transport(_)));
}

#[tokio::test]
async fn timeout_is_a_transport_error() {
    let (host, _) = stub(StatusCode::OK, Duration::from_secs(30)).await;
    let client =
        ScopeSyncClient::new(&host, "app-secret", "owner-1", Duration::from_millis(100)).unwrap();

    let err = client
        .sync(&scopes(), &CancellationToken::new())
        .await
        .unwrap_err();

    assert!(matches!(err, ScopeSyncError::Transport(_)));
}
