use serde_json::{json, Value};
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;
use serenity_chat::config::ServerConfig;

/// Server config pointing at a mock server
#[allow(dead_code)]
pub fn server_config(base_url: &str) -> ServerConfig {
    ServerConfig {
        base_url: base_url.to_string(),
        timeout_seconds: 5,
        ..Default::default()
    }
}

#[allow(dead_code)]
pub fn temp_config_file(contents: &str) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().expect("failed to create tempdir");
    let config_path = temp_dir.path().join("serenity.yaml");
    fs::write(&config_path, contents).expect("failed to write config file");
    (temp_dir, config_path)
}

/// One history record in the server's wire format
#[allow(dead_code)]
pub fn record(id: i64, title: Option<&str>, message: &str, timestamp: &str) -> Value {
    json!({
        "id": id,
        "title": title,
        "message": message,
        "response": format!("re: {}", message),
        "timestamp": timestamp,
    })
}

/// Three records, deliberately out of order
#[allow(dead_code)]
pub fn sample_history() -> Value {
    json!([
        record(1, Some("Sleep"), "I can't sleep", "2024-03-01 08:00:00"),
        record(3, None, "Exams are coming up", "2024-03-03 08:00:00"),
        record(2, Some("Work stress"), "My boss is demanding", "2024-03-02 08:00:00"),
    ])
}
