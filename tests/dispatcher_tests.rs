//! Tests for handler dispatch and error translation
//!
//! Validates the dispatcher's core responsibilities:
//! - Routing a request to the handler whose pattern matches first
//! - Returning `ApiError` payloads to the client unmodified
//! - Mapping internal failures and panics to the fixed generic 500
//! - Producing the fixed 404 when no route matches

use anyhow::anyhow;
use microframe::{ApiError, Dispatcher, Request, Response, Router};
use serde::Deserialize;
use serde_json::{json, Value};
use std::collections::HashMap;

fn get(path: &str) -> Request {
    Request {
        method: "GET".to_string(),
        headers: HashMap::new(),
        path: path.to_string(),
        query_params: HashMap::new(),
        body: Value::Null,
    }
}

fn post(path: &str, body: Value) -> Request {
    Request {
        method: "POST".to_string(),
        body,
        ..get(path)
    }
}

#[derive(Debug, Deserialize)]
struct NamePayload {
    name: String,
}

fn build_dispatcher() -> Dispatcher {
    let mut router = Router::new();
    router
        .register("/", |_req: &Request| Ok(Response::new("Hello World")))
        .unwrap();
    router
        .register("/echo-name/", |req: &Request| {
            let payload: NamePayload = serde_json::from_value(req.body.clone())
                .map_err(|_| ApiError::new(json!({"msg": "name field required"}), 400))?;
            Ok(Response::json(json!({"request__name": payload.name})))
        })
        .unwrap();
    router
        .register("/forbidden/", |_req: &Request| {
            Err(ApiError::new(json!({"msg": "Un authorized"}), 403).into())
        })
        .unwrap();
    router
        .register("/broken/", |_req: &Request| {
            Err(anyhow!("database exploded: credentials leaked here").into())
        })
        .unwrap();
    router
        .register("/panicking/", |_req: &Request| panic!("handler bug"))
        .unwrap();
    Dispatcher::new(router)
}

#[test]
fn test_dispatch_returns_handler_response() {
    let dispatcher = build_dispatcher();
    let response = dispatcher.dispatch(&get("/"));
    assert_eq!(response.status_code, 200);
    assert_eq!(response.body, Value::String("Hello World".to_string()));
    assert_eq!(response.content_type, "text/html");
}

#[test]
fn test_dispatch_typed_body() {
    let dispatcher = build_dispatcher();
    let response = dispatcher.dispatch(&post("/echo-name/", json!({"name": "alice"})));
    assert_eq!(response.status_code, 200);
    assert_eq!(response.body, json!({"request__name": "alice"}));
    assert_eq!(response.content_type, "application/json");
}

#[test]
fn test_dispatch_missing_body_field_is_client_error() {
    let dispatcher = build_dispatcher();
    let response = dispatcher.dispatch(&post("/echo-name/", Value::Null));
    assert_eq!(response.status_code, 400);
    assert_eq!(response.body, json!({"msg": "name field required"}));
}

#[test]
fn test_api_error_payload_unmodified() {
    let dispatcher = build_dispatcher();
    let response = dispatcher.dispatch(&get("/forbidden/"));
    assert_eq!(response.status_code, 403);
    assert_eq!(response.body, json!({"msg": "Un authorized"}));
}

#[test]
fn test_internal_error_becomes_generic_500() {
    let dispatcher = build_dispatcher();
    let response = dispatcher.dispatch(&get("/broken/"));
    assert_eq!(response.status_code, 500);
    assert_eq!(response.body, json!({"msg": "500 - server error"}));
    // The failure detail must never leak into the response.
    assert!(!response.body_text().contains("credentials"));
}

#[test]
fn test_panicking_handler_becomes_generic_500() {
    let dispatcher = build_dispatcher();
    let response = dispatcher.dispatch(&get("/panicking/"));
    assert_eq!(response.status_code, 500);
    assert_eq!(response.body, json!({"msg": "500 - server error"}));
}

#[test]
fn test_unmatched_path_becomes_404() {
    let dispatcher = build_dispatcher();
    let response = dispatcher.dispatch(&get("/no/such/route"));
    assert_eq!(response.status_code, 404);
    assert_eq!(response.body, json!({"msg": "404 - not found"}));
}

#[test]
fn test_dispatch_survives_repeated_failures() {
    let dispatcher = build_dispatcher();
    for _ in 0..3 {
        assert_eq!(dispatcher.dispatch(&get("/panicking/")).status_code, 500);
        assert_eq!(dispatcher.dispatch(&get("/broken/")).status_code, 500);
    }
    assert_eq!(dispatcher.dispatch(&get("/")).status_code, 200);
}
