// SPDX-License-Identifier: MIT
// Copyright (c) 2025 Jason Ish

use thiserror::Error;

/// Error code reported for response bodies that are not valid JSON.
pub const INVALID_JSON_CODE: i64 = 100;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Config error: {0}")]
    Config(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Invalid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),

    #[error("Unexpected response: {0}")]
    UnexpectedResponse(String),

    #[error("Service error{}: {message}", .code.map(|c| format!(" {}", c)).unwrap_or_default())]
    Service { code: Option<i64>, message: String },

    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    #[error("URL error: {0}")]
    Url(#[from] url::ParseError),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Numeric code associated with this error, if any.
    ///
    /// Service errors carry the code reported by Autoaddress, undecodable
    /// bodies report [`INVALID_JSON_CODE`], and HTTP failures report the
    /// status.
    pub fn code(&self) -> Option<i64> {
        match self {
            Error::Service { code, .. } => *code,
            Error::InvalidJson(_) => Some(INVALID_JSON_CODE),
            Error::Api { status, .. } => Some(i64::from(*status)),
            _ => None,
        }
    }

    /// Check if this error is retryable (server overloaded, timeout, etc.)
    pub fn is_retryable(&self) -> bool {
        match self {
            Error::Http(_) => true,
            Error::Api { status, .. } => *status == 429 || (500..600).contains(status),
            _ => false,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
