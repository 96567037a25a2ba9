//! # Router Module
//!
//! Path matching and route resolution. Routes are registered as regular
//! expression bodies (without anchors of their own); the router compiles
//! each as `^(?:pattern)$` and scans the table in registration order,
//! returning the first full-path match.
//!
//! ## Matching policy
//!
//! First-match-wins, regardless of specificity. Registration order is the
//! only precedence mechanism, so applications register specific patterns
//! before general overlapping ones and a `/.*` catch-all last.
//!
//! ## Example
//!
//! ```rust,ignore
//! use microframe::{Request, Response, Router};
//!
//! let mut router = Router::new();
//! router.register("/user/[^/]*/posts", |req: &Request| {
//!     Ok(Response::new("posts").status(201))
//! })?;
//! assert!(router.resolve("/user/42/posts").is_some());
//! assert!(router.resolve("/user/42/posts/extra").is_none());
//! ```

mod core;
#[cfg(test)]
mod tests;

pub use core::Router;
