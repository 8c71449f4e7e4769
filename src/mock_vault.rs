//! In-process stand-in for the Obsidian Local REST API used by tests.
//!
//! Spawns an axum server on an ephemeral port that stores notes in memory
//! and records every request it receives.

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

use axum::Router;
use axum::extract::State;
use axum::http::{HeaderMap, Method, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use serde_json::{Value, json};
use tokio::net::TcpListener;

use crate::vault::VaultClient;

pub const TEST_API_KEY: &str = "test-api-key";

#[derive(Debug, Clone, PartialEq)]
pub struct RecordedRequest {
    pub method: String,
    /// Decoded note path for `/vault/...` requests, raw path otherwise
    pub path: String,
    pub query: Option<String>,
    pub body: String,
    pub authorization: Option<String>,
    pub content_type: Option<String>,
}

#[derive(Default)]
struct Inner {
    notes: BTreeMap<String, String>,
    requests: Vec<RecordedRequest>,
    search_results: Vec<Value>,
    failure: Option<(u16, String)>,
}

type Shared = Arc<Mutex<Inner>>;

#[derive(Clone)]
pub struct MockVault {
    inner: Shared,
    pub url: String,
}

impl MockVault {
    pub async fn spawn() -> Self {
        let _ = rustls::crypto::ring::default_provider().install_default();

        let inner: Shared = Arc::new(Mutex::new(Inner::default()));
        let app = Router::new().fallback(handle).with_state(Arc::clone(&inner));

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let url = format!("http://{}", listener.local_addr().unwrap());

        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self { inner, url }
    }

    pub fn client(&self) -> VaultClient {
        VaultClient::new(self.url.clone(), TEST_API_KEY).unwrap()
    }

    pub fn insert_note(&self, path: &str, content: &str) {
        self.inner
            .lock()
            .unwrap()
            .notes
            .insert(path.to_string(), content.to_string());
    }

    pub fn note(&self, path: &str) -> Option<String> {
        self.inner.lock().unwrap().notes.get(path).cloned()
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.inner.lock().unwrap().requests.clone()
    }

    pub fn set_search_results(&self, results: Vec<Value>) {
        self.inner.lock().unwrap().search_results = results;
    }

    /// Answer every subsequent request with `status` and `body`.
    pub fn fail_with(&self, status: u16, body: &str) {
        self.inner.lock().unwrap().failure = Some((status, body.to_string()));
    }
}

fn header(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
}

async fn handle(
    State(inner): State<Shared>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: String,
) -> Response {
    let raw_path = uri.path().to_string();
    let decoded = urlencoding::decode(&raw_path)
        .map(|p| p.into_owned())
        .unwrap_or_else(|_| raw_path.clone());
    let note_path = decoded.strip_prefix("/vault/").map(str::to_string);

    let mut inner = inner.lock().unwrap();
    inner.requests.push(RecordedRequest {
        method: method.to_string(),
        path: note_path.clone().unwrap_or_else(|| decoded.clone()),
        query: uri.query().map(str::to_string),
        body: body.clone(),
        authorization: header(&headers, "authorization"),
        content_type: header(&headers, "content-type"),
    });

    if let Some((status, text)) = inner.failure.clone() {
        let status = StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        return (status, text).into_response();
    }

    let not_found = || {
        (
            StatusCode::NOT_FOUND,
            json!({"errorCode": 40400, "message": "File does not exist"}).to_string(),
        )
            .into_response()
    };

    match (method.as_str(), note_path) {
        ("GET", None) if decoded == "/" => json!({
            "status": "OK",
            "service": "Obsidian Local REST API",
            "authenticated": true,
        })
        .to_string()
        .into_response(),
        ("GET", None) if decoded == "/search/simple" => {
            Value::Array(inner.search_results.clone())
                .to_string()
                .into_response()
        }
        ("GET", Some(folder)) if folder.is_empty() || folder.ends_with('/') => {
            let prefix = folder.trim_start_matches('/');
            let files: Vec<&String> = inner
                .notes
                .keys()
                .filter(|path| path.starts_with(prefix))
                .collect();
            json!({ "files": files }).to_string().into_response()
        }
        ("GET", Some(path)) => match inner.notes.get(&path) {
            Some(content) => content.clone().into_response(),
            None => not_found(),
        },
        ("PUT", Some(path)) => {
            inner.notes.insert(path, body);
            StatusCode::NO_CONTENT.into_response()
        }
        ("DELETE", Some(path)) => match inner.notes.remove(&path) {
            Some(_) => StatusCode::NO_CONTENT.into_response(),
            None => not_found(),
        },
        _ => not_found(),
    }
}
