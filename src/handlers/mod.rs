//! Route handlers and the per-request dispatch that drives them.

pub mod basic;
pub mod files;

use tracing::{debug, warn};

use crate::config::Config;
use crate::error::HttpError;
use crate::http::parser::parse_http_request;
use crate::http::request::Request;
use crate::http::response::{Response, StatusCode};
use crate::routing::{Handler, Router};
use crate::storage::FileStore;

/// Everything a connection needs to answer a request.
///
/// Built once from the configuration and shared by all connection tasks.
#[derive(Debug, Clone)]
pub struct Service {
    router: Router,
    store: Option<FileStore>,
}

impl Service {
    pub fn new(config: &Config) -> Self {
        let store = config.serving_directory().map(FileStore::new);
        Self {
            router: Router::standard(store.is_some()),
            store,
        }
    }

    /// Parses a raw request buffer and produces the response to send.
    ///
    /// Never fails: every error becomes a body-less 404 or 500.
    pub async fn respond(&self, buf: &[u8]) -> Response {
        let result = match parse_http_request(buf) {
            Ok(request) => self.handle(&request).await,
            Err(e) => Err(HttpError::from(e)),
        };

        result.unwrap_or_else(|err| {
            match err.status() {
                StatusCode::NotFound => debug!(error = %err, "Responding 404"),
                _ => warn!(error = %err, "Request failed"),
            }
            err.to_response()
        })
    }

    /// Routes an already-parsed request to its handler.
    pub async fn handle(&self, request: &Request) -> Result<Response, HttpError> {
        let matched = self.router.resolve(request.method, &request.path)?;

        debug!(
            method = ?request.method,
            path = %request.path,
            handler = ?matched.handler,
            "Route matched"
        );

        match matched.handler {
            Handler::Root => Ok(basic::root()),
            Handler::UserAgent => basic::user_agent(request),
            Handler::Echo => basic::echo(request, matched.param()),
            Handler::FileGet => files::file_get(self.store()?, matched.param()).await,
            Handler::FilePost => {
                files::file_post(self.store()?, matched.param(), &request.body).await
            }
        }
    }

    fn store(&self) -> Result<&FileStore, HttpError> {
        self.store.as_ref().ok_or(HttpError::MissingServingDirectory)
    }
}
