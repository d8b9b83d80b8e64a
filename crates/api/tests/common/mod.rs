//! Shared wiring for the HTTP integration tests.

#![allow(dead_code)]

use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Method, Request, Response};
use axum::Router;
use callguard_api::auth::jwt::{issue_token, JwtConfig};
use callguard_api::config::ServerConfig;
use callguard_api::router::build_app_router;
use callguard_api::state::AppState;
use callguard_core::delivery::{DeliveryResult, NotificationMessage, TargetDelivery};
use callguard_core::error::GatewayError;
use callguard_core::ports::NotificationGateway;
use callguard_core::threshold::ThresholdGate;
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;

const TEST_SECRET: &str = "test-secret-that-is-long-enough-for-hmac";

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        jwt: JwtConfig {
            secret: TEST_SECRET.to_string(),
        },
        alert_gate: ThresholdGate::default(),
    }
}

/// Bearer header value for `user_id`.
pub fn bearer(user_id: &str) -> String {
    let token = issue_token(user_id, 900, &test_config().jwt).unwrap();
    format!("Bearer {token}")
}

// ---------------------------------------------------------------------------
// Push gateway fake
// ---------------------------------------------------------------------------

/// Gateway that delivers to every token except those marked dead.
#[derive(Default)]
pub struct FakeGateway {
    dead: Mutex<HashSet<String>>,
    down: AtomicBool,
    sent: Mutex<Vec<NotificationMessage>>,
}

impl FakeGateway {
    pub fn mark_dead(&self, token: &str) {
        self.dead.lock().unwrap().insert(token.to_string());
    }

    pub fn take_down(&self) {
        self.down.store(true, Ordering::SeqCst);
    }

    pub fn sent(&self) -> Vec<NotificationMessage> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl NotificationGateway for FakeGateway {
    async fn send(&self, message: &NotificationMessage) -> Result<DeliveryResult, GatewayError> {
        message.validate()?;
        if self.down.load(Ordering::SeqCst) {
            return Err(GatewayError::Transport("connection refused".into()));
        }
        self.sent.lock().unwrap().push(message.clone());

        let dead = self.dead.lock().unwrap();
        let deliveries = message
            .targets
            .iter()
            .enumerate()
            .map(|(i, token)| {
                if dead.contains(token) {
                    TargetDelivery::failed(token, "UNREGISTERED", None)
                } else {
                    TargetDelivery::delivered(token, format!("projects/test/messages/{i}"))
                }
            })
            .collect();
        Ok(DeliveryResult::from_deliveries(deliveries))
    }
}

// ---------------------------------------------------------------------------
// App
// ---------------------------------------------------------------------------

/// Build the full application router against `pool` and a fake gateway.
///
/// Uses the same [`build_app_router`] as the binary so tests exercise the
/// production middleware stack.
pub fn build_test_app(pool: PgPool) -> (Router, Arc<FakeGateway>) {
    let gateway = Arc::new(FakeGateway::default());
    let state = AppState::new(pool, test_config(), gateway.clone());
    (build_app_router(state), gateway)
}

// ---------------------------------------------------------------------------
// Requests
// ---------------------------------------------------------------------------

async fn send(app: Router, request: Request<Body>) -> Response<Body> {
    app.oneshot(request).await.unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    send(app, request).await
}

pub async fn get_auth(app: Router, uri: &str, user_id: &str) -> Response<Body> {
    let request = Request::builder()
        .uri(uri)
        .header("authorization", bearer(user_id))
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, request).await
}

pub async fn post_json_auth(
    app: Router,
    uri: &str,
    body: serde_json::Value,
    user_id: &str,
) -> Response<Body> {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header("content-type", "application/json")
        .header("authorization", bearer(user_id))
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, request).await
}

pub async fn delete_auth(app: Router, uri: &str, user_id: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::DELETE)
        .uri(uri)
        .header("authorization", bearer(user_id))
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}
