//! Command-line smoke tests for the `serenity` binary

use assert_cmd::prelude::*;
use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

mod common;

const QUIET_CONFIG: &str = "server:\n  timeout_seconds: 2\n";

fn serenity() -> Command {
    let mut cmd = Command::cargo_bin("serenity").unwrap();
    for var in [
        "SERENITY_SERVER_URL",
        "SERENITY_FAQ_PATH",
        "SERENITY_TIMEOUT_SECONDS",
        "SERENITY_SESSION_COOKIE",
    ] {
        cmd.env_remove(var);
    }
    cmd
}

/// Run a command off the async runtime so the mock server keeps serving
async fn run(mut cmd: Command) -> std::process::Output {
    tokio::task::spawn_blocking(move || cmd.output().expect("run serenity"))
        .await
        .expect("join")
}

#[test]
fn test_help_lists_commands() {
    serenity()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("history"))
        .stdout(predicate::str::contains("faqs"));
}

#[test]
fn test_faqs_falls_back_when_server_unreachable() {
    let (_dir, config_path) = common::temp_config_file(QUIET_CONFIG);

    serenity()
        .arg("--config")
        .arg(config_path)
        .args(["--server", "http://127.0.0.1:9", "faqs"])
        .assert()
        .success()
        .stdout(predicate::str::contains("built-in"))
        .stdout(predicate::str::contains(
            "I feel stressed. Can you help me calm down?",
        ));
}

#[test]
fn test_invalid_timeout_is_rejected() {
    let (_dir, config_path) = common::temp_config_file("server:\n  timeout_seconds: 0\n");

    serenity()
        .arg("--config")
        .arg(config_path)
        .arg("faqs")
        .assert()
        .failure()
        .stderr(predicate::str::contains("must be greater than 0"));
}

#[test]
fn test_non_http_server_is_rejected() {
    let (_dir, config_path) = common::temp_config_file(QUIET_CONFIG);

    serenity()
        .arg("--config")
        .arg(config_path)
        .args(["--server", "ftp://example.com", "faqs"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("http or https"));
}

#[tokio::test]
async fn test_history_list_json_is_sorted_and_filtered() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/history"))
        .respond_with(ResponseTemplate::new(200).set_body_json(common::sample_history()))
        .mount(&server)
        .await;
    let (_dir, config_path) = common::temp_config_file(QUIET_CONFIG);

    let mut cmd = serenity();
    cmd.arg("--config")
        .arg(&config_path)
        .arg("--server")
        .arg(server.uri())
        .args(["history", "list", "--json"]);
    let output = run(cmd).await;
    output.clone().assert().success();

    let rows: serde_json::Value = serde_json::from_slice(&output.stdout).expect("json");
    let ids: Vec<i64> = rows
        .as_array()
        .expect("array")
        .iter()
        .map(|r| r["id"].as_i64().unwrap())
        .collect();
    assert_eq!(ids, vec![3, 2, 1]);

    let mut cmd = serenity();
    cmd.arg("--config")
        .arg(&config_path)
        .arg("--server")
        .arg(server.uri())
        .args(["history", "list", "--json", "--search", "sleep"]);
    let output = run(cmd).await;
    let rows: serde_json::Value = serde_json::from_slice(&output.stdout).expect("json");
    assert_eq!(rows.as_array().map(Vec::len), Some(1));
}

#[tokio::test]
async fn test_history_delete_with_yes_skips_prompt() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/delete_chat/3"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/history"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;
    let (_dir, config_path) = common::temp_config_file(QUIET_CONFIG);

    let mut cmd = serenity();
    cmd.arg("--config")
        .arg(&config_path)
        .arg("--server")
        .arg(server.uri())
        .args(["history", "delete", "3", "--yes"]);
    run(cmd)
        .await
        .assert()
        .success()
        .stdout(predicate::str::contains("Deleted chat 3"));
}

#[tokio::test]
async fn test_history_delete_declined_sends_nothing() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;
    let (_dir, config_path) = common::temp_config_file(QUIET_CONFIG);

    let mut cmd = serenity();
    cmd.arg("--config")
        .arg(&config_path)
        .arg("--server")
        .arg(server.uri())
        .args(["history", "delete", "3"])
        .write_stdin("n\n");
    run(cmd)
        .await
        .assert()
        .failure()
        .stderr(predicate::str::contains("Cancelled"));
}

#[tokio::test]
async fn test_send_prints_reply() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"reply": "I'm here."})))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/history"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;
    let (_dir, config_path) = common::temp_config_file(QUIET_CONFIG);

    let mut cmd = serenity();
    cmd.arg("--config")
        .arg(&config_path)
        .arg("--server")
        .arg(server.uri())
        .args(["send", "Hello"]);
    run(cmd)
        .await
        .assert()
        .success()
        .stdout(predicate::str::contains("I'm here."));
}
