use super::Router;
use crate::dispatcher::HandlerResult;
use crate::server::{Request, Response};
use serde_json::Value;
use std::collections::HashMap;

fn request_for(path: &str) -> Request {
    Request {
        method: "GET".to_string(),
        headers: HashMap::new(),
        path: path.to_string(),
        query_params: HashMap::new(),
        body: Value::Null,
    }
}

fn tagged(tag: &'static str) -> impl Fn(&Request) -> HandlerResult + Send + Sync {
    move |_req: &Request| Ok(Response::new(tag))
}

fn resolved_tag(router: &Router, path: &str) -> Option<String> {
    let handler = router.resolve(path)?;
    let response = handler.handle(&request_for(path)).unwrap();
    match response.body {
        Value::String(tag) => Some(tag),
        other => panic!("unexpected body {other:?}"),
    }
}

#[test]
fn test_register_and_resolve() {
    let mut router = Router::new();
    router.register("/pets", tagged("pets")).unwrap();
    assert_eq!(router.len(), 1);
    assert_eq!(resolved_tag(&router, "/pets").as_deref(), Some("pets"));
}

#[test]
fn test_first_match_wins() {
    let mut router = Router::new();
    router.register("/user/[^/]*/posts", tagged("posts")).unwrap();
    router.register("/.*", tagged("catch_all")).unwrap();
    assert_eq!(
        resolved_tag(&router, "/user/7/posts").as_deref(),
        Some("posts")
    );
    assert_eq!(
        resolved_tag(&router, "/anything/else").as_deref(),
        Some("catch_all")
    );
}

#[test]
fn test_duplicate_patterns_keep_earliest() {
    let mut router = Router::new();
    router.register("/dup", tagged("first")).unwrap();
    router.register("/dup", tagged("second")).unwrap();
    assert_eq!(resolved_tag(&router, "/dup").as_deref(), Some("first"));
}

#[test]
fn test_full_path_match_only() {
    let mut router = Router::new();
    router.register("/pets", tagged("pets")).unwrap();
    // Neither a prefix nor a substring of the path may match.
    assert!(router.resolve("/pets/1").is_none());
    assert!(router.resolve("/api/pets").is_none());
}

#[test]
fn test_alternation_pattern_still_matches_full_path_only() {
    let mut router = Router::new();
    router.register("/a|/b", tagged("either")).unwrap();
    assert_eq!(resolved_tag(&router, "/a").as_deref(), Some("either"));
    assert_eq!(resolved_tag(&router, "/b").as_deref(), Some("either"));
    // The anchors must bind the whole alternation, not one branch each.
    assert!(router.resolve("/x/b").is_none());
    assert!(router.resolve("/a/y").is_none());
}

#[test]
fn test_empty_router_resolves_nothing() {
    let router = Router::new();
    assert!(router.is_empty());
    assert!(router.resolve("/").is_none());
}

#[test]
fn test_invalid_pattern_rejected() {
    let mut router = Router::new();
    assert!(router.register("/pets/(", tagged("broken")).is_err());
    assert!(router.is_empty());
}
