use serde_json::{json, Value};

/// Response value returned by a handler or built internally on error.
///
/// A `Value::String` body goes on the wire verbatim; any other body is
/// serialized to JSON text.
#[derive(Debug, Clone, PartialEq)]
pub struct Response {
    /// Response body, sent verbatim when it is a string
    pub body: Value,
    /// HTTP status code, 200 by default
    pub status_code: u16,
    /// Content type, `text/html` by default
    pub content_type: String,
}

impl Response {
    /// Create a 200 response with the default `text/html` content type
    #[must_use]
    pub fn new(body: impl Into<Value>) -> Self {
        Self {
            body: body.into(),
            status_code: 200,
            content_type: "text/html".to_string(),
        }
    }

    /// Create a 200 response with the `application/json` content type
    #[must_use]
    pub fn json(body: impl Into<Value>) -> Self {
        Self {
            content_type: "application/json".to_string(),
            ..Self::new(body)
        }
    }

    /// Replace the status code, builder style
    #[must_use]
    pub fn status(mut self, status_code: u16) -> Self {
        self.status_code = status_code;
        self
    }

    /// Fixed response for a path no route matches
    #[must_use]
    pub fn not_found() -> Self {
        Self::new(json!({"msg": "404 - not found"})).status(404)
    }

    /// Fixed generic response for any internal failure; carries no detail
    /// of the failure itself
    #[must_use]
    pub fn server_error() -> Self {
        Self::new(json!({"msg": "500 - server error"})).status(500)
    }

    /// The body as it goes on the wire: strings verbatim, everything else
    /// as JSON text
    #[must_use]
    pub fn body_text(&self) -> String {
        match &self.body {
            Value::String(text) => text.clone(),
            other => other.to_string(),
        }
    }

    /// Serialize into the exact raw HTTP/1.1 response bytes.
    ///
    /// Status line without a reason phrase, then `Content-Type`,
    /// `Content-Length`, and an unconditional `Connection: close` (the server
    /// never keeps a connection alive), a blank line, and the body with no
    /// trailing terminator.
    #[must_use]
    pub fn to_bytes(&self) -> Vec<u8> {
        let body = self.body_text();
        format!(
            "HTTP/1.1 {}\r\nContent-Type: {}; charset=utf-8\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
            self.status_code,
            self.content_type,
            body.len(),
            body
        )
        .into_bytes()
    }
}
