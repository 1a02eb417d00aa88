use crate::error::HttpError;
use crate::http::request::Method;

/// The handler a route dispatches to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Handler {
    Root,
    UserAgent,
    Echo,
    FileGet,
    FilePost,
}

/// How a route matches a request path and which parameters it captures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathMatcher {
    /// Whole path equals the pattern. No parameters.
    Exact(&'static str),
    /// Path starts with the pattern. No parameters.
    Prefix(&'static str),
    /// Path starts with the pattern; captures the text after it up to the
    /// next `/` or the end of the path. Later segments are ignored.
    Segment(&'static str),
    /// Path starts with the pattern; captures everything after it, slashes
    /// included.
    Remainder(&'static str),
}

impl PathMatcher {
    /// Returns the captured parameters if `path` matches.
    pub fn capture(&self, path: &str) -> Option<Vec<String>> {
        match self {
            PathMatcher::Exact(pattern) => (path == *pattern).then(Vec::new),
            PathMatcher::Prefix(prefix) => path.starts_with(prefix).then(Vec::new),
            PathMatcher::Segment(prefix) => {
                let rest = path.strip_prefix(prefix)?;
                let segment = rest.split('/').next().unwrap_or_default();
                Some(vec![segment.to_string()])
            }
            PathMatcher::Remainder(prefix) => {
                let rest = path.strip_prefix(prefix)?;
                Some(vec![rest.to_string()])
            }
        }
    }
}

#[derive(Debug, Clone)]
pub struct Route {
    pub method: Method,
    pub matcher: PathMatcher,
    pub handler: Handler,
}

/// Result of a successful lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteMatch {
    pub handler: Handler,
    pub params: Vec<String>,
}

impl RouteMatch {
    /// First captured parameter, or "" for routes that capture nothing.
    pub fn param(&self) -> &str {
        self.params.first().map(String::as_str).unwrap_or_default()
    }
}

/// Ordered routing table. Earlier routes take priority.
#[derive(Debug, Clone, Default)]
pub struct Router {
    routes: Vec<Route>,
}

impl Router {
    pub fn new() -> Self {
        Self { routes: Vec::new() }
    }

    /// Appends a route at the lowest priority.
    pub fn route(mut self, method: Method, matcher: PathMatcher, handler: Handler) -> Self {
        self.routes.push(Route {
            method,
            matcher,
            handler,
        });
        self
    }

    /// The server's routing table.
    ///
    /// The two `/files/` routes are only registered when a serving
    /// directory is configured; without one they fall through to 404.
    pub fn standard(serve_files: bool) -> Self {
        let router = Router::new()
            .route(Method::GET, PathMatcher::Exact("/"), Handler::Root)
            .route(Method::GET, PathMatcher::Prefix("/user-agent"), Handler::UserAgent)
            .route(Method::GET, PathMatcher::Segment("/echo/"), Handler::Echo);

        if !serve_files {
            return router;
        }

        router
            .route(Method::GET, PathMatcher::Remainder("/files/"), Handler::FileGet)
            .route(Method::POST, PathMatcher::Remainder("/files/"), Handler::FilePost)
    }

    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    /// Finds the first route matching `method` and `path`.
    pub fn resolve(&self, method: Method, path: &str) -> Result<RouteMatch, HttpError> {
        self.routes
            .iter()
            .filter(|route| route.method == method)
            .find_map(|route| {
                route.matcher.capture(path).map(|params| RouteMatch {
                    handler: route.handler,
                    params,
                })
            })
            .ok_or_else(|| HttpError::no_route(method, path))
    }
}
