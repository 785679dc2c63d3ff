// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Jason Ish

use reqwest::StatusCode;
use serde_json::Value;

use crate::error::{Error, Result};

/// Extract the first service error from a response document, if any.
pub(crate) fn extract_error(document: &Value) -> Option<Error> {
    let first = document.get("errors")?.as_array()?.first()?;

    let message = first
        .get("message")
        .and_then(|m| m.as_str())
        .unwrap_or("Unknown error")
        .to_string();
    let code = first
        .get("type")
        .and_then(|t| t.get("code"))
        .and_then(|c| c.as_i64());

    Some(Error::Service { code, message })
}

fn http_error(status: StatusCode, body: &[u8]) -> Error {
    Error::Api {
        status: status.as_u16(),
        message: String::from_utf8_lossy(body).into_owned(),
    }
}

/// Decode a response body into a JSON object, surfacing service and HTTP
/// errors. Service errors win over the HTTP status, which wins over the
/// shape of the body.
pub(crate) fn parse_body(status: StatusCode, body: &[u8]) -> Result<Value> {
    let document: Value = match serde_json::from_slice(body) {
        Ok(document) => document,
        Err(_) if !status.is_success() => return Err(http_error(status, body)),
        Err(err) => return Err(Error::InvalidJson(err)),
    };

    if let Some(err) = extract_error(&document) {
        return Err(err);
    }

    if !status.is_success() {
        return Err(http_error(status, body));
    }

    if !document.is_object() {
        return Err(Error::UnexpectedResponse(format!(
            "expected a JSON object, got: {}",
            document
        )));
    }

    Ok(document)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_extract_error() {
        let doc = json!({
            "errors": [
                { "message": "Invalid key", "type": { "code": 2, "text": "InvalidKey" } },
                { "message": "second" }
            ]
        });
        match extract_error(&doc) {
            Some(Error::Service { code, message }) => {
                assert_eq!(code, Some(2));
                assert_eq!(message, "Invalid key");
            }
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[test]
    fn test_extract_error_without_type() {
        let doc = json!({ "errors": [ { "message": "Bad request" } ] });
        match extract_error(&doc) {
            Some(Error::Service { code, message }) => {
                assert_eq!(code, None);
                assert_eq!(message, "Bad request");
            }
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[test]
    fn test_extract_error_none() {
        assert!(extract_error(&json!({ "postcode": "A65F4E2" })).is_none());
        assert!(extract_error(&json!({ "errors": [] })).is_none());
        assert!(extract_error(&json!({ "errors": null })).is_none());
    }

    #[test]
    fn test_parse_body_ok() {
        let body = br#"{"result":{"code":100,"text":"PostcodeAppended"}}"#;
        let doc = parse_body(StatusCode::OK, body).unwrap();
        assert_eq!(doc["result"]["text"], "PostcodeAppended");
    }

    #[test]
    fn test_parse_body_invalid_json() {
        let err = parse_body(StatusCode::OK, b"<html>").unwrap_err();
        assert!(matches!(err, Error::InvalidJson(_)));
        assert_eq!(err.code(), Some(100));
    }

    #[test]
    fn test_parse_body_not_object() {
        let err = parse_body(StatusCode::OK, b"[1,2,3]").unwrap_err();
        assert!(matches!(err, Error::UnexpectedResponse(_)));
    }

    #[test]
    fn test_parse_body_service_error_wins_over_status() {
        let body = br#"{"errors":[{"message":"Invalid key","type":{"code":2}}]}"#;
        let err = parse_body(StatusCode::UNAUTHORIZED, body).unwrap_err();
        assert!(matches!(err, Error::Service { code: Some(2), .. }));
    }

    #[test]
    fn test_parse_body_http_error() {
        let err = parse_body(StatusCode::SERVICE_UNAVAILABLE, b"Service Unavailable").unwrap_err();
        match err {
            Error::Api { status, ref message } => {
                assert_eq!(status, 503);
                assert_eq!(message, "Service Unavailable");
            }
            ref other => panic!("unexpected: {:?}", other),
        }
        assert!(err.is_retryable());
    }

    #[test]
    fn test_parse_body_http_error_keeps_raw_body() {
        let body = br#"{"zeta":1, "alpha":2}"#;
        match parse_body(StatusCode::SERVICE_UNAVAILABLE, body).unwrap_err() {
            Error::Api { status, message } => {
                assert_eq!(status, 503);
                assert_eq!(message, r#"{"zeta":1, "alpha":2}"#);
            }
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[test]
    fn test_parse_body_http_error_with_non_object_json() {
        let bodies: [&[u8]; 3] = [br#""Service Unavailable""#, b"null", b"[]"];
        for body in bodies {
            let err = parse_body(StatusCode::SERVICE_UNAVAILABLE, body).unwrap_err();
            assert!(matches!(err, Error::Api { status: 503, .. }), "{:?}", err);
            assert_eq!(err.code(), Some(503));
            assert!(err.is_retryable());
        }

        let err = parse_body(StatusCode::TOO_MANY_REQUESTS, b"null").unwrap_err();
        assert!(err.is_retryable());
    }
}
