//! # Server Module
//!
//! Everything that touches the wire: the request parser, the response
//! serializer, and the connection server that drives one connection at a
//! time through **accept → read → parse → dispatch → serialize → write →
//! shutdown-write → close**.
//!
//! The server is deliberately sequential. One connection is fully processed
//! and closed before the next `accept`, so request and response values are
//! exclusively owned by one loop iteration and the route table needs no
//! locking during serving.

pub mod http_server;
pub mod request;
pub mod response;

pub use http_server::{HttpServer, ServerHandle, READ_BUFFER_SIZE};
pub use request::{parse_request, ParseError, Request};
pub use response::Response;
