use crate::dispatcher::{Handler, HandlerResult};
use crate::server::Request;
use regex::Regex;
use tracing::{debug, info};

/// One registered route: a compiled pattern and the handler it selects
struct Route {
    pattern: Regex,
    handler: Box<dyn Handler>,
}

/// Ordered, append-only route table.
///
/// Patterns are regular expression bodies compiled as `^(?:pattern)$`, so a
/// pattern must match the whole request path, never a substring or prefix of
/// it, even when it contains a top-level alternation. Resolution scans in
/// registration order and the earliest match wins, which makes registration
/// order load-bearing: more
/// specific patterns must be registered before overlapping general ones
/// (a `/.*` catch-all goes last).
///
/// The table is owned by the server it is built for and is populated fully
/// before serving begins; nothing mutates it during request handling.
#[derive(Default)]
pub struct Router {
    routes: Vec<Route>,
}

impl Router {
    /// Create an empty route table
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Compile `pattern` and append it with its handler function.
    ///
    /// No uniqueness check is performed; duplicate and overlapping patterns
    /// are allowed, and the earliest registered match wins.
    ///
    /// # Errors
    ///
    /// Returns the regex compilation error for an invalid pattern.
    pub fn register<F>(&mut self, pattern: &str, handler: F) -> Result<(), regex::Error>
    where
        F: Fn(&Request) -> HandlerResult + Send + Sync + 'static,
    {
        // The non-capturing group keeps the anchors binding the whole
        // pattern; a bare `^/a|/b$` would anchor each alternative separately.
        let compiled = Regex::new(&format!("^(?:{pattern})$"))?;
        info!(
            pattern = %compiled.as_str(),
            total_routes = self.routes.len() + 1,
            "route registered"
        );
        self.routes.push(Route {
            pattern: compiled,
            handler: Box::new(handler),
        });
        Ok(())
    }

    /// Return the handler of the first registered pattern matching `path`
    #[must_use]
    pub fn resolve(&self, path: &str) -> Option<&dyn Handler> {
        debug!(path = %path, "route match attempt");
        self.routes
            .iter()
            .find(|route| route.pattern.is_match(path))
            .map(|route| route.handler.as_ref())
    }

    /// Number of registered routes
    #[must_use]
    pub fn len(&self) -> usize {
        self.routes.len()
    }

    /// Whether the table has no routes
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    /// Print all registered patterns to stdout, in registration order
    pub fn dump_routes(&self) {
        println!("[routes] count={}", self.routes.len());
        for route in &self.routes {
            println!("[route] {}", route.pattern.as_str());
        }
    }
}
