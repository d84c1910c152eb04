//! CLI tests against a mock ThinkTank server.
//!
//! These cover the commands that run without an API key (`status`, `keygen`
//! and the `demo` bootstrap) and the exit status when the service is down.
//! The binary is driven from a blocking task so the wiremock server keeps
//! serving on the test runtime.

use assert_cmd::Command;
use assert_cmd::assert::{Assert, OutputAssertExt};
use predicates::prelude::*;
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Get a command for the thinktank binary with a clean environment.
fn thinktank() -> Command {
    let mut cmd = Command::cargo_bin("thinktank").unwrap();
    cmd.env_remove("THINKTANK_API_KEY")
        .env_remove("THINKTANK_API_URL")
        .env_remove("RUST_LOG");
    cmd
}

/// Run the binary with `args` against `api_url`, off the async runtime.
async fn run(api_url: String, args: &[&str]) -> Assert {
    let args: Vec<String> = args.iter().map(|a| a.to_string()).collect();
    let output = tokio::task::spawn_blocking(move || {
        thinktank()
            .arg("--api-url")
            .arg(api_url)
            .args(&args)
            .output()
    })
    .await
    .unwrap()
    .unwrap();
    output.assert()
}

async fn mount_status(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/api/status"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "operational",
            "service": "ThinkTank",
            "version": "2.1.0"
        })))
        .mount(server)
        .await;
}

/// A local address with nothing listening on it.
fn closed_address() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{}/api", addr)
}

// ─────────────────────────────────────────────────────────────────────────────
// Status
// ─────────────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_status_without_api_key() {
    let server = MockServer::start().await;
    mount_status(&server).await;

    run(format!("{}/api", server.uri()), &["status"])
        .await
        .success()
        .stdout(predicate::str::contains("operational"))
        .stdout(predicate::str::contains("2.1.0"));

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    assert!(requests[0].headers.get("x-api-key").is_none());
}

#[tokio::test]
async fn test_status_unreachable_exits_nonzero() {
    run(closed_address(), &["status"])
        .await
        .failure()
        .stdout(predicate::str::contains("unreachable"))
        .stderr(predicate::str::contains("unreachable"));
}

#[tokio::test]
async fn test_status_unreachable_json_reports_and_succeeds() {
    run(closed_address(), &["--json", "status"])
        .await
        .success()
        .stdout(predicate::str::contains("\"reachable\": false"));
}

// ─────────────────────────────────────────────────────────────────────────────
// Keygen
// ─────────────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_keygen_without_api_key() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/api-keys/generate"))
        .and(body_json(json!({
            "agent_name": "Scout",
            "role": "analyst",
            "description": ""
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "api_key": "tt_generated_0123456789",
            "agent_id": "agent-42"
        })))
        .expect(1)
        .mount(&server)
        .await;

    run(
        format!("{}/api", server.uri()),
        &["keygen", "Scout", "--role", "analyst"],
    )
    .await
    .success()
    .stdout(predicate::str::contains("tt_generated_0123456789"))
    .stdout(predicate::str::contains("agent-42"))
    .stdout(predicate::str::contains("export THINKTANK_API_KEY="));

    let requests = server.received_requests().await.unwrap();
    assert!(requests[0].headers.get("x-api-key").is_none());
}

// ─────────────────────────────────────────────────────────────────────────────
// Demo
// ─────────────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_demo_generates_key_when_none_configured() {
    let server = MockServer::start().await;
    mount_status(&server).await;
    Mock::given(method("POST"))
        .and(path("/api/api-keys/generate"))
        .and(body_json(json!({
            "agent_name": "RustExampleAgent",
            "role": "researcher",
            "description": "Testing the Rust API client"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "api_key": "tt_demo_fresh_key_abcdef",
            "agent_id": "agent-7"
        })))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/agents"))
        .and(header("x-api-key", "tt_demo_fresh_key_abcdef"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "agents": [{"id": "agent-7", "name": "RustExampleAgent", "role": "researcher"}]
        })))
        .expect(1)
        .mount(&server)
        .await;

    run(format!("{}/api", server.uri()), &["demo", "--no-send"])
        .await
        .success()
        .stdout(predicate::str::contains("Generating API key"))
        .stdout(predicate::str::contains("tt_demo_fresh_key_abcdef"))
        .stdout(predicate::str::contains("agent-7"))
        .stdout(predicate::str::contains(
            "export THINKTANK_API_KEY='tt_demo_fresh_key_abcdef'",
        ))
        .stdout(predicate::str::contains("Found 1 agents"));

    let generate = server
        .received_requests()
        .await
        .unwrap()
        .into_iter()
        .find(|r| r.url.path() == "/api/api-keys/generate")
        .unwrap();
    assert!(generate.headers.get("x-api-key").is_none());
}

#[tokio::test]
async fn test_demo_with_key_skips_generation() {
    let server = MockServer::start().await;
    mount_status(&server).await;
    Mock::given(method("POST"))
        .and(path("/api/api-keys/generate"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/agents"))
        .and(header("x-api-key", "tt_existing_key_0123456789"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"agents": []})))
        .expect(1)
        .mount(&server)
        .await;

    run(
        format!("{}/api", server.uri()),
        &["--api-key", "tt_existing_key_0123456789", "demo"],
    )
    .await
    .success()
    .stdout(predicate::str::contains(
        "Using existing API key: tt_existing_key_0123...",
    ))
    .stdout(predicate::str::contains("Generating API key").not());
}

#[tokio::test]
async fn test_demo_stops_when_key_generation_fails() {
    let server = MockServer::start().await;
    mount_status(&server).await;
    Mock::given(method("POST"))
        .and(path("/api/api-keys/generate"))
        .respond_with(
            ResponseTemplate::new(500).set_body_json(json!({"message": "registry offline"})),
        )
        .mount(&server)
        .await;

    run(format!("{}/api", server.uri()), &["demo"])
        .await
        .failure()
        .stderr(predicate::str::contains("API key generation failed"));

    let requests = server.received_requests().await.unwrap();
    assert!(requests.iter().all(|r| r.url.path() != "/api/agents"));
}
