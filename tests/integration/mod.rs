//! Integration tests for the sample service.
//!
//! Each test boots the real server on an ephemeral port and talks to it over HTTP.
//! Run with: cargo test --test integration

use std::net::SocketAddr;

use pipeline_sample::api::AppState;
use pipeline_sample::config::Config;
use pipeline_sample::server::{bind, serve_on};
use serde_json::Value;
use time::format_description::well_known::Rfc3339;
use time::OffsetDateTime;
use tokio::task::JoinHandle;

/// Running server under test.
struct TestServer {
    addr: SocketAddr,
    handle: JoinHandle<pipeline_sample::Result<()>>,
}

impl TestServer {
    async fn start(config: Config) -> Self {
        let listener = bind(0).await.expect("bind ephemeral port");
        let port = listener.local_addr().unwrap().port();
        let addr = SocketAddr::from(([127, 0, 0, 1], port));
        let handle = tokio::spawn(serve_on(listener, AppState::new(config)));
        Self { addr, handle }
    }

    fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    async fn get(&self, path: &str) -> reqwest::Response {
        reqwest::get(self.url(path)).await.expect("request should succeed")
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

#[tokio::test]
async fn test_health() {
    let server = TestServer::start(Config::default()).await;

    let response = server.get("/health").await;
    assert_eq!(response.status(), 200);
    assert_eq!(
        response.headers()["content-type"].to_str().unwrap(),
        "application/json"
    );

    let body: Value = response.json().await.unwrap();
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["version"], "1.0.0");
    let timestamp = body["timestamp"].as_str().unwrap();
    assert!(OffsetDateTime::parse(timestamp, &Rfc3339).is_ok(), "{timestamp}");
}

#[tokio::test]
async fn test_root_uses_configured_environment() {
    let config = Config::from_iter(vec![("NODE_ENV".to_string(), "staging".to_string())]).unwrap();
    let server = TestServer::start(config).await;

    let body: Value = server.get("/").await.json().await.unwrap();
    assert_eq!(body["message"], "AWS CodePipeline Sample Application");
    assert_eq!(body["environment"], "staging");
}

#[tokio::test]
async fn test_status_uptime_grows() {
    let server = TestServer::start(Config::default()).await;

    let first: Value = server.get("/api/status").await.json().await.unwrap();
    tokio::time::sleep(std::time::Duration::from_millis(20)).await;
    let second: Value = server.get("/api/status").await.json().await.unwrap();

    assert_eq!(first["api"], "running");
    let first_uptime = first["uptime"].as_f64().unwrap();
    let second_uptime = second["uptime"].as_f64().unwrap();
    assert!(first_uptime >= 0.0);
    assert!(second_uptime >= first_uptime);
    assert!(second["memory"]["rss"].is_u64());
}

#[tokio::test]
async fn test_unknown_route_is_not_found() {
    let server = TestServer::start(Config::default()).await;

    let response = server.get("/nope").await;
    assert_eq!(response.status(), 404);
}

#[tokio::test]
async fn test_requests_are_served_concurrently() {
    let server = TestServer::start(Config::default()).await;

    let requests = (0..8).map(|_| reqwest::get(server.url("/health")));
    for response in spawn_all(requests).await {
        assert_eq!(response.expect("request should succeed").status(), 200);
    }
}

/// Spawn each request onto the runtime, then collect results in order.
async fn spawn_all<F>(requests: impl Iterator<Item = F>) -> Vec<reqwest::Result<reqwest::Response>>
where
    F: std::future::Future<Output = reqwest::Result<reqwest::Response>> + Send + 'static,
{
    let handles: Vec<_> = requests.map(tokio::spawn).collect();
    let mut responses = Vec::with_capacity(handles.len());
    for handle in handles {
        responses.push(handle.await.expect("request task panicked"));
    }
    responses
}
