//! Request-level error taxonomy.
//!
//! Every variant is terminal for the current connection and maps to exactly
//! one response status. None of them escape the connection task.

use std::path::PathBuf;
use thiserror::Error;

use crate::http::parser::ParseError;
use crate::http::request::Method;
use crate::http::response::{Response, StatusCode};
use crate::storage::StorageError;

#[derive(Debug, Error)]
pub enum HttpError {
    #[error("malformed request: {0}")]
    MalformedRequest(ParseError),

    #[error("no route for {method} {path}")]
    NoRouteFound { method: String, path: String },

    #[error("file not found: {0}")]
    FileNotFound(String),

    #[error("filesystem error on {path}: {source}")]
    Filesystem {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("no serving directory configured")]
    MissingServingDirectory,

    #[error("failed to encode response: {0}")]
    Encode(#[from] std::io::Error),
}

impl HttpError {
    pub fn no_route(method: Method, path: &str) -> Self {
        HttpError::NoRouteFound {
            method: method.as_str().to_string(),
            path: path.to_string(),
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            HttpError::NoRouteFound { .. } | HttpError::FileNotFound(_) => StatusCode::NotFound,
            HttpError::MalformedRequest(_)
            | HttpError::Filesystem { .. }
            | HttpError::MissingServingDirectory
            | HttpError::Encode(_) => StatusCode::InternalServerError,
        }
    }

    /// The body-less response sent to the client for this error.
    pub fn to_response(&self) -> Response {
        Response::empty(self.status())
    }
}

impl From<ParseError> for HttpError {
    fn from(err: ParseError) -> Self {
        match err {
            // Any method other than GET/POST has no route.
            ParseError::UnsupportedMethod(method) => HttpError::NoRouteFound {
                method,
                path: String::new(),
            },
            other => HttpError::MalformedRequest(other),
        }
    }
}

impl From<StorageError> for HttpError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::NotFound(name) | StorageError::InvalidName(name) => {
                HttpError::FileNotFound(name)
            }
            StorageError::Io { path, source } => HttpError::Filesystem { path, source },
        }
    }
}
