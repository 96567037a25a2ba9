//! # Microframe
//!
//! **Microframe** is a minimal regex-routed HTTP micro-framework. It accepts
//! raw TCP connections one at a time, parses them into structured requests,
//! dispatches on the request path against an ordered table of regular
//! expression patterns, and serializes the handler's result back into raw
//! HTTP/1.1 response bytes.
//!
//! ## Architecture
//!
//! The crate is organized into three modules, leaves first:
//!
//! - **[`router`]** - ordered route table mapping regex path patterns to
//!   handlers, first-match-wins
//! - **[`dispatcher`]** - handler invocation and error-to-response
//!   translation
//! - **[`server`]** - request parsing, response serialization, and the
//!   sequential accept loop
//!
//! ## Request Flow
//!
//! 1. The server accepts a connection and reads one bounded buffer
//! 2. [`server::parse_request`] produces a [`Request`]
//! 3. The [`Dispatcher`] resolves the path against the [`Router`] and invokes
//!    the matched handler
//! 4. The resulting [`Response`] is serialized and written back, then the
//!    write half of the socket is shut down and the connection closed
//!
//! A handler aborts early by returning an [`ApiError`], which reaches the
//! client unmodified; any other failure (including a panic) is logged
//! server-side and mapped to a fixed generic 500 response.
//!
//! ## Example
//!
//! ```rust,no_run
//! use microframe::{Dispatcher, HttpServer, Request, Response, Router};
//!
//! fn main() -> anyhow::Result<()> {
//!     let mut router = Router::new();
//!     router.register("/", |_req: &Request| Ok(Response::new("Hello World")))?;
//!     HttpServer::new(Dispatcher::new(router)).run("0.0.0.0", 8080)
//! }
//! ```
//!
//! ## Limitations
//!
//! One connection at a time, no keep-alive, no read timeout (a silent client
//! blocks the server), and requests are read into a single 4096-byte buffer;
//! anything longer is truncated.

pub mod dispatcher;
pub mod router;
pub mod server;

pub use dispatcher::{ApiError, Dispatcher, Handler, HandlerError, HandlerResult};
pub use router::Router;
pub use server::{parse_request, HttpServer, ParseError, Request, Response, ServerHandle};
