//! Client errors. Returned by every port and use case.
//!
//! Adapters map infrastructure errors into these.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ApiError {
    /// Non-2xx response. Displays as the server's `detail` (or the per-operation fallback).
    #[error("{detail}")]
    Http { status: u16, detail: String },

    #[error("HTTP request failed: {0}")]
    Transport(String),

    #[error("Failed to parse API response: {0}")]
    Decode(String),

    #[error("Failed to encode request body: {0}")]
    Encode(String),

    #[error("Invalid request URL: {0}")]
    InvalidUrl(String),
}

impl ApiError {
    /// HTTP status for server-side failures; `None` for client-side ones.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Http { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Server-provided message, if the failure came from the server.
    pub fn detail(&self) -> Option<&str> {
        match self {
            ApiError::Http { detail, .. } => Some(detail),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }
}
