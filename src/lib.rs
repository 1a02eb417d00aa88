//! Lantern - a minimal HTTP/1.1 server
//!
//! Parses one request per connection, routes it to a small set of handlers
//! (root, user-agent, echo, file get/post) and writes a single response.

pub mod config;
pub mod error;
pub mod handlers;
pub mod http;
pub mod routing;
pub mod server;
pub mod storage;
