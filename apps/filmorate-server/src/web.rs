use std::time::Duration;

use anyhow::Result;
use axum::{middleware::from_fn, response::Json, routing::get, Router};
use serde_json::{json, Value};
use tower_http::{
    cors::CorsLayer,
    limit::RequestBodyLimitLayer,
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
};

use filmorate::Filmorate;
use runtime::ServerConfig;

use crate::request_id;

const BODY_LIMIT_BYTES: usize = 1024 * 1024;

pub async fn health_check() -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339()
    }))
}

/// Full HTTP surface: health probe, module routes and the middleware stack.
pub fn build_router(server: &ServerConfig, filmorate: &Filmorate) -> Result<Router> {
    let router = Router::new().route("/health", get(health_check));
    let mut router = filmorate.register_rest(router)?;

    let x_request_id = request_id::header();

    // Echo the client's x-request-id, otherwise the generated one
    router = router.layer(PropagateRequestIdLayer::new(x_request_id.clone()));
    router = router.layer(SetRequestIdLayer::new(
        x_request_id,
        request_id::MakeReqId,
    ));
    router = router.layer(from_fn(request_id::push_req_id_to_extensions));
    router = router.layer(request_id::create_trace_layer());

    if server.timeout_sec > 0 {
        router = router.layer(TimeoutLayer::new(Duration::from_secs(server.timeout_sec)));
    }
    if server.cors_enabled {
        router = router.layer(CorsLayer::permissive());
    }
    router = router.layer(RequestBodyLimitLayer::new(BODY_LIMIT_BYTES));

    Ok(router)
}
