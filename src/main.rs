//! Demo server exercising every framework feature: plain and JSON responses,
//! method and status handling, early aborts, body/query/header access, a
//! variable path segment, and a trailing catch-all route.

use anyhow::Result;
use clap::Parser;
use microframe::{ApiError, Dispatcher, HttpServer, Request, Response, Router};
use serde_json::json;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "microframe", about = "Minimal regex-routed HTTP demo server")]
struct Args {
    /// Address to bind
    #[arg(long, default_value = "0.0.0.0")]
    address: String,
    /// Port to bind
    #[arg(long, default_value_t = 8080)]
    port: u16,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();
    let router = build_router()?;
    router.dump_routes();

    HttpServer::new(Dispatcher::new(router)).run(&args.address, args.port)
}

fn build_router() -> Result<Router> {
    let mut router = Router::new();

    router.register("/", |_req: &Request| Ok(Response::new("Hello World")))?;

    router.register("/json-response/", |_req: &Request| {
        Ok(Response::json(json!({"msg": "Hello World"})))
    })?;

    router.register("/method-handling/", |req: &Request| match req.method.as_str() {
        "GET" => Ok(Response::new("Your method is GET")),
        "POST" => Ok(Response::new("Your method is POST")),
        other => Err(ApiError::new(json!({"msg": format!("method {other} not handled")}), 405).into()),
    })?;

    router.register("/status-code/", |_req: &Request| {
        Ok(Response::new("Different status code").status(202))
    })?;

    router.register("/raise-exception/", |_req: &Request| {
        Err(ApiError::new(json!({"msg": "custom_exception"}), 400).into())
    })?;

    router.register("/body-handle/", |req: &Request| {
        let name = req
            .body
            .get("name")
            .and_then(|v| v.as_str())
            .ok_or_else(|| ApiError::new(json!({"msg": "name field required"}), 400))?;
        Ok(Response::json(json!({"request__name": name})))
    })?;

    router.register("/query-param-handling/", |req: &Request| {
        let q = req
            .query_param("q")
            .ok_or_else(|| ApiError::new(json!({"msg": "q query parameter required"}), 400))?;
        Ok(Response::json(json!({"your_q_parameter": q})))
    })?;

    router.register("/header-handling/", |req: &Request| {
        let token = req
            .header("X-Token")
            .ok_or_else(|| ApiError::new(json!({"msg": "Un authorized"}), 403))?;
        Ok(Response::new(format!("your token {token}")))
    })?;

    router.register("/user/[^/]*/posts", |req: &Request| {
        let user_id = req
            .path
            .strip_prefix("/user/")
            .and_then(|rest| rest.strip_suffix("/posts"))
            .unwrap_or("");
        Ok(Response::new(format!("posts for {user_id}")).status(201))
    })?;

    // Catch-all; must stay last or it shadows everything after it.
    router.register("/.*", |_req: &Request| Ok(Response::new("404").status(404)))?;

    Ok(router)
}
