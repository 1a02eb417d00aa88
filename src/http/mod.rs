//! HTTP protocol implementation.
//!
//! A deliberately narrow HTTP/1.1: one request per connection, GET and POST
//! only, `Content-Length` framing only.
//!
//! - **`connection`**: per-connection state machine
//! - **`parser`**: request line and header parsing, body extraction
//! - **`request`**: parsed request representation
//! - **`response`**: response representation and builder (gzip, Content-Length)
//! - **`writer`**: serializes and writes responses to the client
//!
//! # Connection State Machine
//!
//! ```text
//!        ┌─────────────┐
//!        │   Reading   │ ← Buffer until headers + body are in
//!        └──────┬──────┘
//!               │ Request buffered (or EOF / buffer full / timeout)
//!               ▼
//!        ┌──────────────────┐
//!        │   Processing     │ ← Parse, route, run handler
//!        └──────┬───────────┘
//!               │ Response ready
//!               ▼
//!        ┌──────────────────┐
//!        │    Writing       │ ← Send response to client
//!        └──────┬───────────┘
//!               │ Response sent (or write failed)
//!               ▼
//!            Closed
//! ```

pub mod connection;
pub mod parser;
pub mod request;
pub mod response;
pub mod writer;
