use flate2::Compression;
use flate2::write::GzEncoder;
use std::io::Write;

/// HTTP status codes supported by the server.
///
/// - `Ok` (200): Request successful
/// - `Created` (201): Resource created successfully
/// - `NotFound` (404): No route, or the requested file does not exist
/// - `InternalServerError` (500): Malformed request or filesystem failure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusCode {
    /// 200 OK
    Ok,
    /// 201 Created
    Created,
    /// 404 Not Found
    NotFound,
    /// 500 Internal Server Error
    InternalServerError,
}

impl StatusCode {
    /// Returns the numeric HTTP status code.
    ///
    /// # Example
    ///
    /// ```
    /// # use lantern::http::response::StatusCode;
    /// assert_eq!(StatusCode::Ok.as_u16(), 200);
    /// assert_eq!(StatusCode::NotFound.as_u16(), 404);
    /// ```
    pub fn as_u16(&self) -> u16 {
        match self {
            StatusCode::Ok => 200,
            StatusCode::Created => 201,
            StatusCode::NotFound => 404,
            StatusCode::InternalServerError => 500,
        }
    }

    /// Returns the standard HTTP reason phrase for this status code.
    pub fn reason_phrase(&self) -> &'static str {
        match self {
            StatusCode::Ok => "OK",
            StatusCode::Created => "Created",
            StatusCode::NotFound => "Not Found",
            StatusCode::InternalServerError => "Internal Server Error",
        }
    }
}

/// Represents a complete HTTP response ready to be sent to a client.
///
/// Headers keep the order they were added in, duplicates included. The
/// `Content-Length` header always matches `body.len()`, and `body` holds the
/// bytes that go on the wire (compressed if gzip was applied).
#[derive(Debug)]
pub struct Response {
    /// The HTTP status code
    pub status: StatusCode,
    /// HTTP headers in wire order
    pub headers: Vec<(String, String)>,
    /// Response body as bytes
    pub body: Vec<u8>,
}

/// Builder for constructing HTTP responses in a fluent style.
///
/// # Example
///
/// ```ignore
/// let response = ResponseBuilder::new(StatusCode::Ok)
///     .header("Content-Type", "text/plain")
///     .body(b"hello".to_vec())
///     .gzip(true)
///     .build()?;
/// ```
pub struct ResponseBuilder {
    status: StatusCode,
    headers: Vec<(String, String)>,
    body: Vec<u8>,
    gzip: bool,
}

impl ResponseBuilder {
    /// Creates a new response builder with the specified status code.
    pub fn new(status: StatusCode) -> Self {
        Self {
            status,
            headers: Vec::new(),
            body: Vec::new(),
            gzip: false,
        }
    }

    /// Appends a header. Adding the same name twice emits it twice.
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((key.into(), value.into()));
        self
    }

    /// Sets the response body.
    pub fn body(mut self, body: impl Into<Vec<u8>>) -> Self {
        self.body = body.into();
        self
    }

    /// Gzip-compresses the body at build time when `enabled` is true.
    pub fn gzip(mut self, enabled: bool) -> Self {
        self.gzip = enabled;
        self
    }

    /// Builds the final Response.
    ///
    /// Compression runs first and the length is measured afterwards, so
    /// `Content-Length` counts the compressed bytes. Any caller supplied
    /// `Content-Length` or `Content-Encoding` is replaced.
    pub fn build(self) -> std::io::Result<Response> {
        let ResponseBuilder {
            status,
            mut headers,
            mut body,
            gzip,
        } = self;

        headers.retain(|(k, _)| {
            !k.eq_ignore_ascii_case("Content-Length") && !k.eq_ignore_ascii_case("Content-Encoding")
        });

        if gzip {
            body = gzip_bytes(&body)?;
            headers.push(("Content-Encoding".to_string(), "gzip".to_string()));
        }

        headers.push(("Content-Length".to_string(), body.len().to_string()));

        Ok(Response {
            status,
            headers,
            body,
        })
    }
}

fn gzip_bytes(data: &[u8]) -> std::io::Result<Vec<u8>> {
    let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(data)?;
    encoder.finish()
}

impl Response {
    /// Creates an empty-bodied response with the given status.
    pub fn empty(status: StatusCode) -> Self {
        Self {
            status,
            headers: vec![("Content-Length".to_string(), "0".to_string())],
            body: Vec::new(),
        }
    }

    /// Creates a 200 OK response with no body.
    pub fn ok() -> Self {
        Self::empty(StatusCode::Ok)
    }

    /// Creates a 201 Created response with no body.
    pub fn created() -> Self {
        Self::empty(StatusCode::Created)
    }

    /// Creates a 404 Not Found response with no body.
    pub fn not_found() -> Self {
        Self::empty(StatusCode::NotFound)
    }

    /// Creates a 500 Internal Server Error response with no body.
    pub fn internal_error() -> Self {
        Self::empty(StatusCode::InternalServerError)
    }

    /// Returns the first header with the given name (ASCII case-insensitive).
    pub fn header(&self, key: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(key))
            .map(|(_, v)| v.as_str())
    }
}
