//! Request routing.
//!
//! Routing looks at the method and path only, never at headers or body.
//! Routes live in an ordered table and the first match wins.

pub mod router;

pub use router::{Handler, PathMatcher, Route, RouteMatch, Router};
