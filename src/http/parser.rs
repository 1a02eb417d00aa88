use crate::http::request::{Method, Request};
use std::collections::HashMap;
use thiserror::Error;

const CRLF: &[u8] = b"\r\n";
const HEADERS_END: &[u8] = b"\r\n\r\n";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("no CRLF-terminated request line")]
    MissingRequestLine,
    #[error("request line is not `METHOD PATH VERSION`")]
    InvalidRequestLine,
    #[error("unsupported method `{0}`")]
    UnsupportedMethod(String),
    #[error("request path must start with '/'")]
    InvalidPath,
    #[error("Content-Length declared but no header/body separator found")]
    MissingBodySeparator,
}

/// Request line and headers, without the body.
#[derive(Debug, Clone)]
pub struct RequestHead {
    pub method: Method,
    pub path: String,
    pub version: String,
    pub headers: HashMap<String, String>,
}

/// Parses a raw connection buffer into a full request.
pub fn parse_http_request(buf: &[u8]) -> Result<Request, ParseError> {
    let head = parse_head(buf)?;
    let body = extract_body(buf, &head.headers)?;

    Ok(Request {
        method: head.method,
        path: head.path,
        version: head.version,
        headers: head.headers,
        body,
    })
}

/// Parses the request line and every complete header line.
///
/// Header parsing stops at the first empty line. If the buffer ends before
/// the blank line, the complete lines read so far are returned and a trailing
/// partial line is dropped. Lines without a colon are skipped, and a repeated
/// header name overwrites the earlier value.
pub fn parse_head(buf: &[u8]) -> Result<RequestHead, ParseError> {
    let line_end = find(buf, CRLF).ok_or(ParseError::MissingRequestLine)?;
    let request_line =
        std::str::from_utf8(&buf[..line_end]).map_err(|_| ParseError::InvalidRequestLine)?;

    let mut parts = request_line.split(' ');
    let (Some(method_str), Some(path), Some(version), None) =
        (parts.next(), parts.next(), parts.next(), parts.next())
    else {
        return Err(ParseError::InvalidRequestLine);
    };

    if method_str.is_empty() || path.is_empty() || version.is_empty() {
        return Err(ParseError::InvalidRequestLine);
    }

    let method = Method::from_str(method_str)
        .ok_or_else(|| ParseError::UnsupportedMethod(method_str.to_string()))?;

    if !path.starts_with('/') {
        return Err(ParseError::InvalidPath);
    }

    let mut headers = HashMap::new();
    let mut rest = &buf[line_end + CRLF.len()..];

    while let Some(end) = find(rest, CRLF) {
        let line = &rest[..end];
        rest = &rest[end + CRLF.len()..];

        if line.is_empty() {
            break;
        }

        let line = String::from_utf8_lossy(line);
        if let Some((key, value)) = line.split_once(':') {
            headers.insert(key.trim().to_string(), value.trim().to_string());
        }
    }

    Ok(RequestHead {
        method,
        path: path.to_string(),
        version: version.to_string(),
        headers,
    })
}

/// Slices the body out of the raw buffer using the declared Content-Length.
///
/// A missing or unparseable Content-Length means no body, whatever trails the
/// headers. When fewer bytes than declared are buffered (the read buffer is
/// full or the client stopped sending), the body is truncated to what is
/// available.
pub fn extract_body(buf: &[u8], headers: &HashMap<String, String>) -> Result<Vec<u8>, ParseError> {
    let Some(declared) = declared_length(headers) else {
        return Ok(Vec::new());
    };

    let headers_end = find_headers_end(buf).ok_or(ParseError::MissingBodySeparator)?;
    let available = &buf[headers_end + HEADERS_END.len()..];

    if available.len() < declared {
        tracing::debug!(
            declared,
            available = available.len(),
            "Request body truncated to buffered bytes"
        );
    }

    let len = declared.min(available.len());
    Ok(available[..len].to_vec())
}

/// Total number of bytes the request occupies, once the header block is in.
///
/// Returns `None` while the CRLF-CRLF boundary has not been received yet.
/// A declared length too large to add up saturates at `usize::MAX`, so
/// reading ends on EOF or a full buffer instead.
pub fn expected_len(buf: &[u8]) -> Option<usize> {
    let headers_end = find_headers_end(buf)?;
    let declared = parse_head(buf)
        .ok()
        .and_then(|head| declared_length(&head.headers))
        .unwrap_or(0);

    Some(
        (headers_end + HEADERS_END.len())
            .checked_add(declared)
            .unwrap_or(usize::MAX),
    )
}

fn declared_length(headers: &HashMap<String, String>) -> Option<usize> {
    let value = headers.get("Content-Length")?;
    match value.parse::<usize>() {
        Ok(len) => Some(len),
        Err(_) => {
            tracing::debug!(value = %value, "Ignoring unparseable Content-Length");
            None
        }
    }
}

pub fn find_headers_end(buf: &[u8]) -> Option<usize> {
    find(buf, HEADERS_END)
}

fn find(buf: &[u8], needle: &[u8]) -> Option<usize> {
    buf.windows(needle.len()).position(|w| w == needle)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_simple_get() {
        let req = b"GET / HTTP/1.1\r\nHost: example.com\r\n\r\n";

        let parsed = parse_http_request(req).unwrap();

        assert_eq!(parsed.path, "/");
        assert_eq!(parsed.headers.get("Host").unwrap(), "example.com");
        assert!(parsed.body.is_empty());
    }

    #[test]
    fn expected_len_waits_for_declared_body() {
        let req = b"POST /files/a HTTP/1.1\r\nContent-Length: 5\r\n\r\nhel";

        assert_eq!(expected_len(req), Some(req.len() + 2));
        assert_eq!(expected_len(b"GET / HTTP/1.1\r\nHost: x\r\n"), None);
    }

    #[test]
    fn expected_len_saturates_on_huge_content_length() {
        let req = format!(
            "POST /files/a HTTP/1.1\r\nContent-Length: {}\r\n\r\nabc",
            usize::MAX
        );

        assert_eq!(expected_len(req.as_bytes()), Some(usize::MAX));
    }
}
