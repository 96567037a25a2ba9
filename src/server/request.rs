use serde_json::Value;
use std::collections::HashMap;
use thiserror::Error;
use tracing::debug;

/// Parsed HTTP request, produced once per connection.
///
/// Contains everything extracted from the raw request text: method, headers,
/// path, query parameters, and body.
#[derive(Debug, Clone, PartialEq)]
pub struct Request {
    /// HTTP method, verbatim from the request line (no validation against a
    /// known method set)
    pub method: String,
    /// HTTP headers with uppercased names; a repeated header keeps its last value
    pub headers: HashMap<String, String>,
    /// Request path with the query string stripped
    pub path: String,
    /// Query string parameters; a key may carry several values in order
    pub query_params: HashMap<String, Vec<String>>,
    /// Request body: a JSON value when the body text parses as JSON, the raw
    /// text as a JSON string otherwise, `Null` when absent
    pub body: Value,
}

impl Request {
    /// Get a header by name (case-insensitive, since stored names are uppercased)
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(&name.to_uppercase()).map(String::as_str)
    }

    /// Get the first value of a query parameter by name
    #[must_use]
    pub fn query_param(&self, name: &str) -> Option<&str> {
        self.query_params
            .get(name)
            .and_then(|values| values.first())
            .map(String::as_str)
    }
}

/// Structural failure while parsing raw request text.
///
/// Only the request line can fail the parse; header lines without a colon are
/// skipped rather than rejected.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    /// The request line did not have exactly three space-separated tokens
    #[error("malformed request line: {0:?}")]
    MalformedRequestLine(String),
}

/// Parse the raw text of one HTTP message into a [`Request`].
///
/// The head is split from the body at the first blank line; the body is kept
/// as the exact text span after the separator, so CRLF sequences inside it
/// survive. The protocol version in the request line is parsed but discarded.
///
/// # Errors
///
/// Returns [`ParseError::MalformedRequestLine`] when the first line does not
/// have exactly three space-separated tokens.
pub fn parse_request(raw: &str) -> Result<Request, ParseError> {
    let (head, raw_body) = raw.split_once("\r\n\r\n").unwrap_or((raw, ""));
    let mut lines = head.split("\r\n");

    let request_line = lines.next().unwrap_or("");
    let (method, uri) = match request_line.split(' ').collect::<Vec<_>>().as_slice() {
        [method, uri, _version] => (method.to_string(), *uri),
        _ => {
            return Err(ParseError::MalformedRequestLine(request_line.to_string()));
        }
    };

    let mut headers = HashMap::new();
    for line in lines {
        if line.is_empty() {
            continue;
        }
        let Some((name, rest)) = line.split_once(':') else {
            // Nothing to key on without a colon; skip the line.
            debug!(line = %line, "skipping header line without a colon");
            continue;
        };
        let value = rest.strip_prefix(' ').unwrap_or(rest);
        headers.insert(name.to_uppercase(), value.to_string());
    }

    let (path, query) = uri.split_once('?').unwrap_or((uri, ""));
    let mut query_params: HashMap<String, Vec<String>> = HashMap::new();
    for (key, value) in url::form_urlencoded::parse(query.as_bytes()) {
        query_params
            .entry(key.into_owned())
            .or_default()
            .push(value.into_owned());
    }

    let body = if raw_body.is_empty() {
        Value::Null
    } else {
        serde_json::from_str(raw_body).unwrap_or_else(|_| Value::String(raw_body.to_string()))
    };

    debug!(
        method = %method,
        path = %path,
        header_count = headers.len(),
        query_param_count = query_params.len(),
        "request parsed"
    );

    Ok(Request {
        method,
        headers,
        path: path.to_string(),
        query_params,
        body,
    })
}
