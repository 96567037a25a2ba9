use crate::router::Router;
use crate::server::{Request, Response};
use serde_json::Value;
use std::panic::{catch_unwind, AssertUnwindSafe};
use thiserror::Error;
use tracing::{error, warn};

/// Client-facing error a handler returns to abort early.
///
/// Carries the same shape as a [`Response`] (body and status code) and is
/// converted into one unmodified, so a handler can fail a request
/// deliberately without building the response itself. Returning an
/// `ApiError` is an expected outcome and is never logged as a failure.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiError {
    /// Status code sent to the client
    pub status_code: u16,
    /// Body sent to the client, same string/JSON semantics as a response body
    pub body: Value,
}

impl ApiError {
    /// Create an error with the given body and status code
    #[must_use]
    pub fn new(body: impl Into<Value>, status_code: u16) -> Self {
        Self {
            status_code,
            body: body.into(),
        }
    }

    /// Convert into the response sent on the wire, status and body unmodified
    #[must_use]
    pub fn into_response(self) -> Response {
        Response::new(self.body).status(self.status_code)
    }
}

/// Error type handlers return.
///
/// `Api` is a deliberate client-facing outcome; `Internal` is anything
/// unexpected, which the dispatcher logs and maps to a fixed 500 so no
/// failure detail ever reaches the client.
#[derive(Debug, Error)]
pub enum HandlerError {
    /// Deliberate early abort with a client-facing status and body
    #[error("handler aborted with status {}", .0.status_code)]
    Api(ApiError),
    /// Unexpected handler failure
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl From<ApiError> for HandlerError {
    fn from(err: ApiError) -> Self {
        HandlerError::Api(err)
    }
}

/// Result a handler produces for one request
pub type HandlerResult = Result<Response, HandlerError>;

/// A route handler: one request in, one response (or error) out.
///
/// Implemented for any `Fn(&Request) -> HandlerResult`, so plain closures
/// register directly.
pub trait Handler: Send + Sync {
    /// Handle one request
    fn handle(&self, req: &Request) -> HandlerResult;
}

impl<F> Handler for F
where
    F: Fn(&Request) -> HandlerResult + Send + Sync,
{
    fn handle(&self, req: &Request) -> HandlerResult {
        self(req)
    }
}

/// Resolves requests against a [`Router`] and invokes the matched handler,
/// translating every failure into a response.
///
/// `dispatch` is total: whatever a handler does, including panicking, the
/// caller gets a response back and the serving loop keeps running.
pub struct Dispatcher {
    router: Router,
}

impl Dispatcher {
    /// Create a dispatcher over a fully populated route table
    #[must_use]
    pub fn new(router: Router) -> Self {
        Self { router }
    }

    /// Resolve the request path and invoke the matched handler.
    ///
    /// Outcomes:
    /// - no route matches: fixed 404 response
    /// - handler returns a response: returned as-is
    /// - handler returns an [`ApiError`]: its payload, unmodified and unlogged
    /// - handler fails or panics: detail logged server-side, fixed 500 response
    pub fn dispatch(&self, req: &Request) -> Response {
        let Some(handler) = self.router.resolve(&req.path) else {
            warn!(method = %req.method, path = %req.path, "no route matched");
            return Response::not_found();
        };

        match catch_unwind(AssertUnwindSafe(|| handler.handle(req))) {
            Ok(Ok(response)) => response,
            Ok(Err(HandlerError::Api(api_error))) => api_error.into_response(),
            Ok(Err(HandlerError::Internal(err))) => {
                error!(
                    method = %req.method,
                    path = %req.path,
                    error = ?err,
                    "handler failed"
                );
                Response::server_error()
            }
            Err(panic) => {
                let detail = panic
                    .downcast_ref::<&str>()
                    .copied()
                    .or_else(|| panic.downcast_ref::<String>().map(String::as_str))
                    .unwrap_or("non-string panic payload");
                error!(
                    method = %req.method,
                    path = %req.path,
                    panic = %detail,
                    "handler panicked"
                );
                Response::server_error()
            }
        }
    }
}
