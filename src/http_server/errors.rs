//! # HTTP Server Errors
//!
//! `RestError` covers the request path and renders as a JSON body.
//! `ServerError` covers startup: config, store, rewrite rules, bind.

use std::io;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;

use crate::observability::{log_event_with_fields, Event};
use crate::rewrite::RewriteError;
use crate::store::StoreError;

/// Result type for request handlers
pub type RestResult<T> = Result<T, RestError>;

/// Result type for server startup
pub type ServerResult<T> = Result<T, ServerError>;

/// Request-path errors
#[derive(Debug, Clone, Error)]
pub enum RestError {
    // ==================
    // Client Errors (4xx)
    // ==================
    /// No resource with this name
    #[error("Resource not found: {0}")]
    ResourceNotFound(String),

    /// The collection exists but holds no record with this id
    #[error("Record not found: {resource}/{id}")]
    RecordNotFound { resource: String, id: String },

    /// An id or nested path was used against a singular resource
    #[error("Not a collection: {0}")]
    NotACollection(String),

    // ==================
    // Server Errors (5xx)
    // ==================
    /// A response header could not be built
    #[error("Internal error: {0}")]
    Internal(String),
}

impl RestError {
    /// Get HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            RestError::ResourceNotFound(_) => StatusCode::NOT_FOUND,
            RestError::RecordNotFound { .. } => StatusCode::NOT_FOUND,
            RestError::NotACollection(_) => StatusCode::NOT_FOUND,
            RestError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            RestError::ResourceNotFound(_) => "MOCKREST_REST_RESOURCE_NOT_FOUND",
            RestError::RecordNotFound { .. } => "MOCKREST_REST_RECORD_NOT_FOUND",
            RestError::NotACollection(_) => "MOCKREST_REST_NOT_A_COLLECTION",
            RestError::Internal(_) => "MOCKREST_REST_INTERNAL",
        }
    }
}

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: u16,
}

impl From<RestError> for ErrorResponse {
    fn from(err: RestError) -> Self {
        Self {
            code: err.status_code().as_u16(),
            error: err.to_string(),
        }
    }
}

impl IntoResponse for RestError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status == StatusCode::NOT_FOUND {
            log_event_with_fields(
                Event::ResourceNotFound,
                &[("code", self.code()), ("error", &self.to_string())],
            );
        }
        let body = Json(ErrorResponse::from(self));
        (status, body).into_response()
    }
}

/// Startup errors
#[derive(Debug, Error)]
pub enum ServerError {
    #[error("Failed to read config {path}: {source}")]
    ConfigIo {
        path: String,
        #[source]
        source: io::Error,
    },

    #[error("Invalid config JSON: {0}")]
    ConfigJson(#[from] serde_json::Error),

    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Rewrite(#[from] RewriteError),

    #[error("Failed to bind {addr}: {source}")]
    Bind {
        addr: String,
        #[source]
        source: io::Error,
    },

    #[error("HTTP server failed: {0}")]
    Serve(#[source] io::Error),
}

impl ServerError {
    pub fn code(&self) -> &'static str {
        match self {
            ServerError::ConfigIo { .. } => "MOCKREST_CONFIG_IO",
            ServerError::ConfigJson(_) => "MOCKREST_CONFIG_INVALID_JSON",
            ServerError::InvalidConfig(_) => "MOCKREST_CONFIG_INVALID",
            ServerError::Store(e) => e.code(),
            ServerError::Rewrite(e) => e.code(),
            ServerError::Bind { .. } => "MOCKREST_SERVER_BIND",
            ServerError::Serve(_) => "MOCKREST_SERVER_FAILED",
        }
    }
}
