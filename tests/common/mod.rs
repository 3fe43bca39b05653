use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::routing::post;
use axum::{Json, Router};
use reqwest::Client;
use serde_json::{json, Value};
use uuid::Uuid;

use form2notion::config::{Config, NotionConfig};

pub const API_KEY: &str = "secret_test_key";
pub const DATABASE_ID: &str = "test-database-id";

/// How the fake Notion API answers `POST /v1/pages`.
#[derive(Clone, Copy)]
#[allow(dead_code)]
pub enum NotionBehavior {
    /// Echo the properties back as a created page.
    Accept,
    /// Answer with a Notion validation error object.
    Reject,
    /// Sleep longer than the client timeout before answering.
    Hang,
}

/// A request the fake Notion API received.
#[derive(Clone, Debug)]
pub struct CapturedRequest {
    pub authorization: Option<String>,
    pub notion_version: Option<String>,
    pub body: Value,
}

pub struct FakeNotion {
    pub addr: SocketAddr,
    pub calls: Arc<AtomicUsize>,
    pub requests: Arc<Mutex<Vec<CapturedRequest>>>,
}

#[allow(dead_code)]
impl FakeNotion {
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn requests(&self) -> Vec<CapturedRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[derive(Clone)]
struct FakeState {
    behavior: NotionBehavior,
    calls: Arc<AtomicUsize>,
    requests: Arc<Mutex<Vec<CapturedRequest>>>,
}

async fn create_page(
    State(state): State<FakeState>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    state.calls.fetch_add(1, Ordering::SeqCst);
    let header = |name: &str| {
        headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(|s| s.to_string())
    };
    state.requests.lock().unwrap().push(CapturedRequest {
        authorization: header("authorization"),
        notion_version: header("notion-version"),
        body: body.clone(),
    });

    match state.behavior {
        NotionBehavior::Accept => (
            StatusCode::OK,
            Json(json!({
                "object": "page",
                "id": Uuid::now_v7().to_string(),
                "parent": body["parent"],
                "properties": body["properties"],
            })),
        ),
        NotionBehavior::Reject => (
            StatusCode::BAD_REQUEST,
            Json(json!({
                "object": "error",
                "status": 400,
                "code": "validation_error",
                "message": "Gender is expected to be select.",
            })),
        ),
        NotionBehavior::Hang => {
            tokio::time::sleep(Duration::from_secs(10)).await;
            (StatusCode::OK, Json(json!({ "object": "page" })))
        }
    }
}

/// Spawn a fake Notion API on a random port.
pub async fn spawn_notion(behavior: NotionBehavior) -> FakeNotion {
    let calls = Arc::new(AtomicUsize::new(0));
    let requests = Arc::new(Mutex::new(Vec::new()));

    let app = Router::new()
        .route("/v1/pages", post(create_page))
        .with_state(FakeState {
            behavior,
            calls: calls.clone(),
            requests: requests.clone(),
        });

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind fake Notion");
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("Fake Notion failed");
    });

    FakeNotion {
        addr,
        calls,
        requests,
    }
}

/// A running test server instance.
pub struct TestApp {
    pub addr: SocketAddr,
    pub client: Client,
}

#[allow(dead_code)]
impl TestApp {
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    /// Submit a JSON form, return (body, status).
    pub async fn submit_json(&self, data: &Value) -> (Value, reqwest::StatusCode) {
        let resp = self
            .client
            .post(self.url("/api/submit-to-notion"))
            .json(data)
            .send()
            .await
            .expect("submit json failed");
        let status = resp.status();
        let body: Value = resp.json().await.unwrap_or(json!(null));
        (body, status)
    }

    /// Submit form-urlencoded data, return (body, status).
    pub async fn submit_form(&self, data: &[(&str, &str)]) -> (Value, reqwest::StatusCode) {
        let resp = self
            .client
            .post(self.url("/api/submit-to-notion"))
            .form(data)
            .send()
            .await
            .expect("submit form failed");
        let status = resp.status();
        let body: Value = resp.json().await.unwrap_or(json!(null));
        (body, status)
    }
}

pub fn test_config(notion_url: String) -> Config {
    Config {
        host: "127.0.0.1".parse().unwrap(),
        port: 0, // unused, we bind to random port
        notion: NotionConfig {
            api_key: API_KEY.to_string(),
            database_id: DATABASE_ID.to_string(),
            api_url: notion_url,
            version: "2022-06-28".to_string(),
            timeout: Duration::from_secs(2),
        },
        cors_origins: vec![],
        max_body_size: 1_048_576,
        log_level: "warn".to_string(),
    }
}

/// Spawn the app pointed at the given Notion base URL.
pub async fn spawn_app_with(config: Config) -> TestApp {
    let app = form2notion::build_app(config).expect("Failed to build app");

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind to random port");
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("Server failed");
    });

    TestApp {
        addr,
        client: Client::new(),
    }
}

/// Spawn a fake Notion with the given behavior and the app in front of it.
pub async fn spawn_app(behavior: NotionBehavior) -> (TestApp, FakeNotion) {
    let notion = spawn_notion(behavior).await;
    let app = spawn_app_with(test_config(format!("http://{}", notion.addr))).await;
    (app, notion)
}
