//! Shared helpers for HTTP-level integration tests.
//!
//! Builds the application through [`build_app_router`] so tests exercise
//! the same middleware stack (CORS, request ID, timeout, tracing, panic
//! recovery) that production uses, with the SMTP transport replaced by an
//! in-memory recorder.

#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, Response, StatusCode};
use axum::Router;
use sqlx::PgPool;
use tower::ServiceExt;

use taxtrack_api::auth::jwt::{generate_access_token, JwtConfig};
use taxtrack_api::config::ServerConfig;
use taxtrack_api::notify::Notifier;
use taxtrack_api::router::build_app_router;
use taxtrack_api::state::AppState;
use taxtrack_core::types::DbId;
use taxtrack_db::models::user::CreateUser;
use taxtrack_db::repositories::UserRepo;
use taxtrack_mailer::{MailError, MailTransport};

/// Cron secret used by [`test_config`].
pub const TEST_CRON_SECRET: &str = "test-cron-secret";

/// Fallback recipient used by [`test_config`].
pub const TEST_FALLBACK_EMAIL: &str = "fallback@example.com";

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        jwt: JwtConfig {
            secret: "test-secret-that-is-long-enough-for-hmac".to_string(),
            access_token_expiry_mins: 60,
        },
        cron_secret: Some(TEST_CRON_SECRET.to_string()),
        fallback_email: TEST_FALLBACK_EMAIL.to_string(),
        sweep_interval_secs: None,
    }
}

// ---------------------------------------------------------------------------
// Recording mail transport
// ---------------------------------------------------------------------------

/// One message accepted by the [`RecordingMailer`].
#[derive(Debug, Clone)]
pub struct SentMail {
    pub to: String,
    pub subject: String,
    pub body: String,
}

/// In-memory [`MailTransport`] that records accepted messages and can be
/// told to fail for subjects containing a marker string.
#[derive(Default)]
pub struct RecordingMailer {
    sent: Mutex<Vec<SentMail>>,
    fail_marker: Option<String>,
}

impl RecordingMailer {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// A mailer that rejects any message whose subject contains `marker`.
    pub fn failing_on(marker: &str) -> Arc<Self> {
        Arc::new(Self {
            sent: Mutex::new(Vec::new()),
            fail_marker: Some(marker.to_string()),
        })
    }

    pub fn sent(&self) -> Vec<SentMail> {
        self.sent.lock().unwrap().clone()
    }

    pub fn count(&self) -> usize {
        self.sent.lock().unwrap().len()
    }
}

#[async_trait]
impl MailTransport for RecordingMailer {
    async fn send(&self, to: &str, subject: &str, html: &str) -> Result<String, MailError> {
        if let Some(marker) = &self.fail_marker {
            if subject.contains(marker) {
                return Err(MailError::Build("injected transport failure".to_string()));
            }
        }
        let mut sent = self.sent.lock().unwrap();
        sent.push(SentMail {
            to: to.to_string(),
            subject: subject.to_string(),
            body: html.to_string(),
        });
        Ok(format!("<test-{}@taxtrack.test>", sent.len()))
    }
}

// ---------------------------------------------------------------------------
// App construction and seeding
// ---------------------------------------------------------------------------

/// Build the full application router over the given pool and mail transport.
pub fn build_test_app(pool: PgPool, mailer: Arc<RecordingMailer>) -> Router {
    let config = test_config();
    let notifier = Arc::new(Notifier::new(mailer, config.fallback_email.clone()));

    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        notifier,
    };

    build_app_router(state, &config)
}

/// Insert an account and return its id.
pub async fn seed_user(pool: &PgPool, email: &str) -> DbId {
    UserRepo::create(
        pool,
        &CreateUser {
            email: email.to_string(),
            display_name: None,
        },
    )
    .await
    .expect("seeding user should succeed")
    .id
}

/// Mint a valid access token for the given account.
pub fn auth_token(user_id: DbId) -> String {
    generate_access_token(user_id, &test_config().jwt).expect("token generation should succeed")
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    app.oneshot(
        Request::builder()
            .method("GET")
            .uri(uri)
            .body(Body::empty())
            .unwrap(),
    )
    .await
    .unwrap()
}

pub async fn get_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    app.oneshot(
        Request::builder()
            .method("GET")
            .uri(uri)
            .header("authorization", format!("Bearer {token}"))
            .body(Body::empty())
            .unwrap(),
    )
    .await
    .unwrap()
}

pub async fn get_bearer(app: Router, uri: &str, bearer: &str) -> Response<Body> {
    // Same as get_auth but named for non-JWT bearer secrets.
    get_auth(app, uri, bearer).await
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    app.oneshot(
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
    )
    .await
    .unwrap()
}

pub async fn post_json_auth(
    app: Router,
    uri: &str,
    token: &str,
    body: serde_json::Value,
) -> Response<Body> {
    app.oneshot(
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .header("authorization", format!("Bearer {token}"))
            .body(Body::from(body.to_string()))
            .unwrap(),
    )
    .await
    .unwrap()
}

pub async fn patch_json_auth(
    app: Router,
    uri: &str,
    token: &str,
    body: serde_json::Value,
) -> Response<Body> {
    app.oneshot(
        Request::builder()
            .method("PATCH")
            .uri(uri)
            .header("content-type", "application/json")
            .header("authorization", format!("Bearer {token}"))
            .body(Body::from(body.to_string()))
            .unwrap(),
    )
    .await
    .unwrap()
}

pub async fn delete_auth(app: Router, uri: &str, token: &str) -> Response<Body> {
    app.oneshot(
        Request::builder()
            .method("DELETE")
            .uri(uri)
            .header("authorization", format!("Bearer {token}"))
            .body(Body::empty())
            .unwrap(),
    )
    .await
    .unwrap()
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    use http_body_util::BodyExt;
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// Assert a response has the expected status, with the body in the failure
/// message for easier debugging.
pub async fn assert_status(response: Response<Body>, expected: StatusCode) -> serde_json::Value {
    let status = response.status();
    let json = body_json(response).await;
    assert_eq!(status, expected, "unexpected status, body: {json}");
    json
}
