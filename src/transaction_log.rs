// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Jason Ish

//! JSON-lines log of API exchanges.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::{OnceLock, RwLock};

use chrono::Utc;
use serde::Serialize;

use crate::api::types::KEY_KEY;

pub const DEFAULT_PATH: &str = "eircode-transactions.json";
const REDACTED: &str = "<redacted>";

#[derive(Debug, Serialize)]
pub(crate) struct Transaction {
    pub timestamp: String,
    pub host: String,
    pub path: String,
    pub query: Vec<(String, String)>,
    pub status: u16,
    pub response_body: serde_json::Value,
}

struct LogState {
    active: bool,
    path: PathBuf,
}

static STATE: OnceLock<RwLock<LogState>> = OnceLock::new();

fn get_state() -> &'static RwLock<LogState> {
    STATE.get_or_init(|| {
        RwLock::new(LogState {
            active: false,
            path: PathBuf::from(DEFAULT_PATH),
        })
    })
}

/// Start logging transactions, returning the log file path.
pub fn start(path: Option<PathBuf>) -> PathBuf {
    let mut state = get_state().write().unwrap_or_else(|e| e.into_inner());
    state.active = true;
    if let Some(p) = path {
        state.path = p;
    }
    state.path.clone()
}

pub fn stop() {
    let mut state = get_state().write().unwrap_or_else(|e| e.into_inner());
    state.active = false;
}

pub fn is_active() -> bool {
    get_state()
        .read()
        .unwrap_or_else(|e| e.into_inner())
        .active
}

pub(crate) fn build_transaction(
    url: &url::Url,
    status: u16,
    response_body: serde_json::Value,
) -> Transaction {
    let query = url
        .query_pairs()
        .map(|(k, v)| {
            let value = if k == KEY_KEY {
                REDACTED.to_string()
            } else {
                v.into_owned()
            };
            (k.into_owned(), value)
        })
        .collect();

    Transaction {
        timestamp: Utc::now().to_rfc3339(),
        host: url.host_str().unwrap_or_default().to_string(),
        path: url.path().to_string(),
        query,
        status,
        response_body,
    }
}

/// Append to the process-wide log, if it has been started.
pub(crate) fn log(url: &url::Url, status: u16, response_body: serde_json::Value) {
    if !is_active() {
        return;
    }

    let state = get_state().read().unwrap_or_else(|e| e.into_inner());
    log_to(&state.path, url, status, response_body);
}

/// Append to a specific file, regardless of the process-wide state.
pub(crate) fn log_to(path: &Path, url: &url::Url, status: u16, response_body: serde_json::Value) {
    let transaction = build_transaction(url, status, response_body);

    if let Ok(mut file) = OpenOptions::new().create(true).append(true).open(path)
        && let Ok(line) = serde_json::to_string(&transaction)
    {
        let _ = writeln!(file, "{}", line);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_is_redacted() {
        let url = url::Url::parse(
            "https://api.autoaddress.ie/2.0/postcodelookup?key=secret&postcode=A65F4E2",
        )
        .unwrap();
        let tx = build_transaction(&url, 200, serde_json::json!({}));
        assert_eq!(tx.host, "api.autoaddress.ie");
        assert_eq!(tx.path, "/2.0/postcodelookup");
        assert_eq!(
            tx.query,
            vec![
                ("key".to_string(), "<redacted>".to_string()),
                ("postcode".to_string(), "A65F4E2".to_string()),
            ]
        );
        let line = serde_json::to_string(&tx).unwrap();
        assert!(!line.contains("secret"));
    }

    #[test]
    fn test_log_to_appends_lines() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let path = temp_dir.path().join("tx.json");
        let url = url::Url::parse("http://localhost/2.0/getEcadData?key=k&ecadId=1").unwrap();

        log_to(&path, &url, 200, serde_json::json!({ "n": 1 }));
        log_to(&path, &url, 500, serde_json::json!({ "n": 2 }));

        let content = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<serde_json::Value> = content
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0]["status"], 200);
        assert_eq!(lines[1]["response_body"]["n"], 2);
    }

    #[test]
    fn test_start_and_stop() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let path = temp_dir.path().join("global.json");
        let url =
            url::Url::parse("http://localhost/2.0/postcodelookup?postcode=T12X0Y1").unwrap();

        assert_eq!(start(Some(path.clone())), path);
        assert!(is_active());
        log(&url, 200, serde_json::json!({}));
        stop();
        assert!(!is_active());
        log(&url, 201, serde_json::json!({}));

        let content = std::fs::read_to_string(&path).unwrap();
        let statuses: Vec<u64> = content
            .lines()
            .filter(|line| line.contains("T12X0Y1"))
            .map(|line| {
                let tx: serde_json::Value = serde_json::from_str(line).unwrap();
                tx["status"].as_u64().unwrap()
            })
            .collect();
        assert_eq!(statuses, vec![200]);
    }
}
