use std::path::PathBuf;

use reqwest::StatusCode;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("cannot read config file {path}: {source}")]
    ConfigRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("malformed config file {path}: {source}")]
    ConfigParse {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("missing configuration item: {0}")]
    MissingField(&'static str),

    #[error("invalid configuration item {field}: {reason}")]
    InvalidField { field: &'static str, reason: String },

    #[error("cannot read private key {path}: {source}")]
    KeyRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("cannot sign token: {0}")]
    Signing(#[from] jsonwebtoken::errors::Error),

    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("api rejected request: {0}")]
    Api(#[from] ApiError),

    #[error("cannot write report to {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
}

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("not authorized (401): {body}")]
    Unauthorized { body: String },

    #[error("forbidden (403): {body}")]
    Forbidden { body: String },

    #[error("report not found (404): {body}")]
    NotFound { body: String },

    #[error("rate limited (429): {body}")]
    RateLimited { body: String },

    #[error("unexpected status {status}: {body}")]
    UnexpectedStatus { status: StatusCode, body: String },
}

impl ApiError {
    pub fn from_status(status: StatusCode, body: String) -> Self {
        match status {
            StatusCode::UNAUTHORIZED => ApiError::Unauthorized { body },
            StatusCode::FORBIDDEN => ApiError::Forbidden { body },
            StatusCode::NOT_FOUND => ApiError::NotFound { body },
            StatusCode::TOO_MANY_REQUESTS => ApiError::RateLimited { body },
            _ => ApiError::UnexpectedStatus { status, body },
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Unauthorized { .. } => StatusCode::UNAUTHORIZED,
            ApiError::Forbidden { .. } => StatusCode::FORBIDDEN,
            ApiError::NotFound { .. } => StatusCode::NOT_FOUND,
            ApiError::RateLimited { .. } => StatusCode::TOO_MANY_REQUESTS,
            ApiError::UnexpectedStatus { status, .. } => *status,
        }
    }

    /// Response body exactly as the API returned it.
    pub fn body(&self) -> &str {
        match self {
            ApiError::Unauthorized { body }
            | ApiError::Forbidden { body }
            | ApiError::NotFound { body }
            | ApiError::RateLimited { body }
            | ApiError::UnexpectedStatus { body, .. } => body,
        }
    }
}
