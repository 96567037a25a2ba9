//! # Dispatcher Module
//!
//! Handler invocation and error translation. The dispatcher resolves a
//! parsed request's path against the [`Router`](crate::router::Router) and
//! invokes the matched handler, turning every possible outcome into a
//! response the server can write.
//!
//! ## Error model
//!
//! Handlers return `Result<Response, HandlerError>` rather than throwing:
//!
//! - [`ApiError`] is the deliberate early-abort path. It carries a status
//!   code and body of its own and reaches the client unmodified; the
//!   dispatcher treats it as a normal outcome and does not log it.
//! - [`HandlerError::Internal`] wraps any unexpected failure
//!   (`anyhow::Error`, so `?` works on anything). The detail is logged for
//!   the operator and the client sees only the fixed generic 500 body.
//! - Handler panics are caught and treated like internal failures, so one
//!   misbehaving handler can never take the serving loop down.
//!
//! ## Registration
//!
//! ```rust,ignore
//! let mut router = Router::new();
//! router.register("/pets", |req: &Request| {
//!     Ok(Response::json(serde_json::json!({"pets": []})))
//! })?;
//! let dispatcher = Dispatcher::new(router);
//! ```

mod core;

pub use core::{ApiError, Dispatcher, Handler, HandlerError, HandlerResult};
