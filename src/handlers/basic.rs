//! Handlers that need nothing beyond the request itself.

use crate::error::HttpError;
use crate::http::request::Request;
use crate::http::response::{Response, ResponseBuilder, StatusCode};

/// `GET /`
pub fn root() -> Response {
    Response::ok()
}

/// `GET /user-agent` echoes the `User-Agent` header. A missing header gives
/// an empty body, not an error.
pub fn user_agent(request: &Request) -> Result<Response, HttpError> {
    let agent = request.header("User-Agent").unwrap_or_default();

    Ok(ResponseBuilder::new(StatusCode::Ok)
        .header("Content-Type", "text/plain")
        .body(agent)
        .build()?)
}

/// `GET /echo/{text}` returns `text`, gzipped when the client accepts it.
pub fn echo(request: &Request, text: &str) -> Result<Response, HttpError> {
    Ok(ResponseBuilder::new(StatusCode::Ok)
        .header("Content-Type", "text/plain")
        .body(text)
        .gzip(request.accepts_gzip())
        .build()?)
}
