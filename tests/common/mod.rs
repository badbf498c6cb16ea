#![allow(dead_code)]

use std::sync::{Arc, Mutex};
use std::time::Duration;

use anyhow::{Context, Result};
use axum::body::Bytes;
use axum::extract::State;
use axum::http::{HeaderMap, Method, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use axum::{Json, Router};
use serde_json::{json, Value};
use tokio::task::JoinHandle;

use uniclub_client::config::ClientConfig;
use uniclub_client::session::RecordingNavigator;
use uniclub_client::storage::{MemoryStore, TokenStorage};
use uniclub_client::UniClub;

/// One request as the backend saw it. Paths are relative to `/api`.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: String,
    pub path: String,
    pub query: Option<String>,
    pub authorization: Option<String>,
    pub body: Option<Value>,
}

#[derive(Clone)]
struct CannedResponse {
    method: String,
    path: String,
    status: u16,
    body: Value,
    delay: Option<Duration>,
}

#[derive(Default)]
struct Shared {
    routes: Vec<CannedResponse>,
    requests: Vec<RecordedRequest>,
}

type SharedState = Arc<Mutex<Shared>>;

/// In-process stand-in for the UniClub API on an unused port.
pub struct MockBackend {
    pub port: u16,
    pub base_url: String,
    state: SharedState,
    task: JoinHandle<()>,
}

impl MockBackend {
    pub async fn start() -> Result<Self> {
        let port = portpicker::pick_unused_port().context("failed to pick free port")?;
        let base_url = format!("http://127.0.0.1:{}/api", port);
        let state: SharedState = Arc::new(Mutex::new(Shared::default()));

        let app = Router::new().fallback(handle).with_state(state.clone());
        let listener = tokio::net::TcpListener::bind(("127.0.0.1", port))
            .await
            .context("failed to bind mock backend")?;
        let task = tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });

        Ok(Self {
            port,
            base_url,
            state,
            task,
        })
    }

    /// Registers a canned response. Later registrations for the same route win.
    pub fn respond(&self, method: &str, path: &str, status: u16, body: Value) -> &Self {
        self.push(method, path, status, body, None)
    }

    pub fn respond_slow(&self, method: &str, path: &str, status: u16, body: Value, delay: Duration) -> &Self {
        self.push(method, path, status, body, Some(delay))
    }

    fn push(&self, method: &str, path: &str, status: u16, body: Value, delay: Option<Duration>) -> &Self {
        self.state.lock().unwrap().routes.push(CannedResponse {
            method: method.to_uppercase(),
            path: path.to_string(),
            status,
            body,
            delay,
        });
        self
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.state.lock().unwrap().requests.clone()
    }

    pub fn hits(&self, method: &str, path: &str) -> usize {
        self.requests()
            .iter()
            .filter(|r| r.method == method && r.path == path)
            .count()
    }

    pub fn last(&self, method: &str, path: &str) -> Option<RecordedRequest> {
        self.requests()
            .into_iter()
            .filter(|r| r.method == method && r.path == path)
            .last()
    }

    pub fn config(&self) -> ClientConfig {
        ClientConfig::for_base_url(self.base_url.clone())
    }

    /// Client over the given stores, with a navigator the test can inspect.
    pub fn client_with(&self, tokens: TokenStorage) -> Result<(UniClub, Arc<RecordingNavigator>)> {
        let navigator = Arc::new(RecordingNavigator::new());
        let client = UniClub::new(self.config(), tokens, navigator.clone())?;
        Ok((client, navigator))
    }

    pub fn client(&self) -> Result<(UniClub, Arc<RecordingNavigator>)> {
        self.client_with(TokenStorage::in_memory())
    }
}

impl Drop for MockBackend {
    fn drop(&mut self) {
        self.task.abort();
    }
}

async fn handle(
    State(state): State<SharedState>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let path = uri.path().strip_prefix("/api").unwrap_or(uri.path()).to_string();
    let recorded = RecordedRequest {
        method: method.as_str().to_string(),
        path: path.clone(),
        query: uri.query().map(str::to_string),
        authorization: headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .map(str::to_string),
        body: serde_json::from_slice(&body).ok(),
    };

    let canned = {
        let mut shared = state.lock().unwrap();
        shared.requests.push(recorded);
        shared
            .routes
            .iter()
            .rev()
            .find(|r| r.method == method.as_str() && r.path == path)
            .cloned()
    };

    match canned {
        Some(canned) => {
            if let Some(delay) = canned.delay {
                tokio::time::sleep(delay).await;
            }
            let status = StatusCode::from_u16(canned.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
            (status, Json(canned.body)).into_response()
        }
        None => (StatusCode::NOT_FOUND, Json(failure("Not found"))).into_response(),
    }
}

pub fn ok(data: Value) -> Value {
    json!({ "success": true, "data": data })
}

pub fn failure(message: &str) -> Value {
    json!({ "success": false, "error": { "message": message } })
}

pub fn user_json(id: i64, email: &str) -> Value {
    json!({
        "userId": id,
        "email": email,
        "name": "Kim Student",
        "role": "STUDENT",
        "school": { "schoolId": 1, "name": "Hanbit University" }
    })
}

pub fn club_json(id: i64, members: u32, category: &str) -> Value {
    json!({
        "groupId": id,
        "name": format!("Club {}", id),
        "description": "weekly meetings",
        "category": category,
        "memberCount": members
    })
}

/// Token storage over caller-owned stores, for reload and new-tab scenarios.
pub fn storage(local: &Arc<MemoryStore>, session: &Arc<MemoryStore>) -> TokenStorage {
    TokenStorage::new(local.clone(), session.clone())
}
