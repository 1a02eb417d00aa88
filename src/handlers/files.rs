//! Handlers for `/files/{name}` under the serving directory.

use std::io::ErrorKind;

use crate::error::HttpError;
use crate::http::response::{Response, ResponseBuilder, StatusCode};
use crate::storage::{FileStore, StorageError};

/// `GET /files/{name}`: 404 when the file is missing, 500 when it exists
/// but cannot be read.
pub async fn file_get(store: &FileStore, name: &str) -> Result<Response, HttpError> {
    let size = store.stat(name).await?;
    let contents = store.read_all(name).await?;

    tracing::debug!(file = %name, size, "Serving file");

    Ok(ResponseBuilder::new(StatusCode::Ok)
        .header("Content-Type", "application/octet-stream")
        .body(contents)
        .build()?)
}

/// `POST /files/{name}`: writes the body, replacing any existing file.
pub async fn file_post(store: &FileStore, name: &str, body: &[u8]) -> Result<Response, HttpError> {
    store.write_all(name, body).await.map_err(|err| match err {
        StorageError::InvalidName(name) => HttpError::Filesystem {
            path: name.into(),
            source: std::io::Error::new(ErrorKind::InvalidInput, "invalid file name"),
        },
        other => other.into(),
    })?;

    tracing::debug!(file = %name, bytes = body.len(), "Stored file");

    Ok(Response::created())
}
