use lantern::http::parser::{ParseError, expected_len, extract_body, parse_head, parse_http_request};
use lantern::http::request::Method;
use std::collections::HashMap;

#[test]
fn test_parse_simple_get_request() {
    let req = b"GET / HTTP/1.1\r\nHost: example.com\r\n\r\n";
    let parsed = parse_http_request(req).unwrap();

    assert_eq!(parsed.method, Method::GET);
    assert_eq!(parsed.path, "/");
    assert_eq!(parsed.version, "HTTP/1.1");
    assert_eq!(parsed.headers.get("Host").unwrap(), "example.com");
}

#[test]
fn test_parse_post_request_with_body() {
    let req = b"POST /files/a HTTP/1.1\r\nHost: localhost\r\nContent-Length: 5\r\n\r\nhello";
    let parsed = parse_http_request(req).unwrap();

    assert_eq!(parsed.method, Method::POST);
    assert_eq!(parsed.path, "/files/a");
    assert_eq!(parsed.body, b"hello".to_vec());
}

#[test]
fn test_parse_multiple_headers() {
    let req = b"GET /path HTTP/1.1\r\nHost: example.com\r\nUser-Agent: test-client\r\nAccept: */*\r\n\r\n";
    let parsed = parse_http_request(req).unwrap();

    assert_eq!(parsed.headers.len(), 3);
    assert_eq!(parsed.headers.get("User-Agent").unwrap(), "test-client");
    assert_eq!(parsed.headers.get("Accept").unwrap(), "*/*");
}

#[test]
fn test_parse_trims_key_and_value() {
    let req = b"GET / HTTP/1.1\r\n  X-Padded  :   spaced out  \r\nNoSpace:tight\r\n\r\n";
    let parsed = parse_http_request(req).unwrap();

    assert_eq!(parsed.headers.get("X-Padded").unwrap(), "spaced out");
    assert_eq!(parsed.headers.get("NoSpace").unwrap(), "tight");
}

#[test]
fn test_parse_splits_on_first_colon_only() {
    let req = b"GET / HTTP/1.1\r\nHost: localhost:4221\r\n\r\n";
    let parsed = parse_http_request(req).unwrap();

    assert_eq!(parsed.headers.get("Host").unwrap(), "localhost:4221");
}

#[test]
fn test_parse_duplicate_header_last_wins() {
    let req = b"GET / HTTP/1.1\r\nX-Dup: first\r\nX-Dup: second\r\n\r\n";
    let parsed = parse_http_request(req).unwrap();

    assert_eq!(parsed.headers.get("X-Dup").unwrap(), "second");
}

#[test]
fn test_parse_header_case_preservation() {
    let req = b"GET / HTTP/1.1\r\nuser-agent: lower\r\n\r\n";
    let parsed = parse_http_request(req).unwrap();

    assert!(parsed.headers.contains_key("user-agent"));
    assert!(!parsed.headers.contains_key("User-Agent"));
}

#[test]
fn test_parse_skips_header_without_colon() {
    let req = b"GET / HTTP/1.1\r\nBrokenHeader\r\nHost: example.com\r\n\r\n";
    let parsed = parse_http_request(req).unwrap();

    assert_eq!(parsed.headers.len(), 1);
    assert_eq!(parsed.headers.get("Host").unwrap(), "example.com");
}

#[test]
fn test_parse_stops_at_blank_line() {
    let req = b"POST /files/x HTTP/1.1\r\nContent-Length: 11\r\n\r\nKey: value\r\n";
    let parsed = parse_http_request(req).unwrap();

    assert!(!parsed.headers.contains_key("Key"));
    assert_eq!(parsed.body, b"Key: value\r".to_vec());
}

#[test]
fn test_parse_without_blank_line_keeps_complete_headers() {
    let req = b"GET / HTTP/1.1\r\nHost: example.com\r\nUser-Ag";
    let head = parse_head(req).unwrap();

    assert_eq!(head.headers.len(), 1);
    assert_eq!(head.headers.get("Host").unwrap(), "example.com");
}

#[test]
fn test_parse_request_line_without_crlf() {
    let result = parse_http_request(b"GET / HTTP/1.1");
    assert_eq!(result.unwrap_err(), ParseError::MissingRequestLine);

    let result = parse_http_request(b"");
    assert_eq!(result.unwrap_err(), ParseError::MissingRequestLine);
}

#[test]
fn test_parse_request_line_wrong_token_count() {
    for line in ["GET /\r\n\r\n", "GET / HTTP/1.1 extra\r\n\r\n", "GET  / HTTP/1.1\r\n\r\n"] {
        let result = parse_http_request(line.as_bytes());
        assert_eq!(result.unwrap_err(), ParseError::InvalidRequestLine, "{line:?}");
    }
}

#[test]
fn test_parse_unsupported_method() {
    let result = parse_http_request(b"DELETE /files/a HTTP/1.1\r\n\r\n");

    assert_eq!(
        result.unwrap_err(),
        ParseError::UnsupportedMethod("DELETE".to_string())
    );
}

#[test]
fn test_parse_path_must_start_with_slash() {
    let result = parse_http_request(b"GET echo/abc HTTP/1.1\r\n\r\n");

    assert_eq!(result.unwrap_err(), ParseError::InvalidPath);
}

#[test]
fn test_parse_request_with_path_and_query_string() {
    let req = b"GET /search?q=rust HTTP/1.1\r\nHost: example.com\r\n\r\n";
    let parsed = parse_http_request(req).unwrap();

    assert_eq!(parsed.path, "/search?q=rust");
}

#[test]
fn test_parse_request_with_binary_body() {
    let req = b"POST /upload HTTP/1.1\r\nContent-Length: 4\r\n\r\n\x00\x01\x02\x03";
    let parsed = parse_http_request(req).unwrap();

    assert_eq!(parsed.body, vec![0, 1, 2, 3]);
}

#[test]
fn test_body_absent_without_content_length() {
    let req = b"POST /files/a HTTP/1.1\r\nHost: x\r\n\r\ntrailing bytes";
    let parsed = parse_http_request(req).unwrap();

    assert!(parsed.body.is_empty());
}

#[test]
fn test_body_absent_with_unparseable_content_length() {
    let req = b"POST /files/a HTTP/1.1\r\nContent-Length: -3\r\n\r\nabc";
    let parsed = parse_http_request(req).unwrap();

    assert!(parsed.body.is_empty());
}

#[test]
fn test_body_takes_exactly_content_length_bytes() {
    let req = b"POST /files/a HTTP/1.1\r\nContent-Length: 3\r\n\r\nabcdef";
    let parsed = parse_http_request(req).unwrap();

    assert_eq!(parsed.body, b"abc".to_vec());
}

#[test]
fn test_body_truncated_when_fewer_bytes_buffered() {
    let req = b"POST /files/a HTTP/1.1\r\nContent-Length: 10\r\n\r\nhello";
    let parsed = parse_http_request(req).unwrap();

    assert_eq!(parsed.body, b"hello".to_vec());
}

#[test]
fn test_body_missing_separator_is_malformed() {
    let mut headers = HashMap::new();
    headers.insert("Content-Length".to_string(), "5".to_string());

    let result = extract_body(b"POST /files/a HTTP/1.1\r\nContent-Length: 5\r\n", &headers);

    assert_eq!(result.unwrap_err(), ParseError::MissingBodySeparator);
}

#[test]
fn test_body_extraction_ignores_parser_state() {
    let mut headers = HashMap::new();
    headers.insert("Content-Length".to_string(), "2".to_string());

    let body = extract_body(b"anything\r\n\r\nhi there", &headers).unwrap();

    assert_eq!(body, b"hi".to_vec());
}

#[test]
fn test_huge_content_length_truncates_to_buffer() {
    let req = format!(
        "POST /files/a HTTP/1.1\r\nContent-Length: {}\r\n\r\nabc",
        usize::MAX
    );

    assert_eq!(expected_len(req.as_bytes()), Some(usize::MAX));

    let parsed = parse_http_request(req.as_bytes()).unwrap();
    assert_eq!(parsed.body, b"abc".to_vec());
}
