use crate::{handlers, registry::ClusterRegistry};
use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

/// Builds the console's router over a cluster registry.
pub fn app(registry: Arc<ClusterRegistry>) -> Router {
    Router::new()
        .route("/healthz", get(handlers::health::healthz))
        .route("/readyz", get(handlers::health::readyz))
        .route("/clusters", get(handlers::clusters::list))
        .route("/gateways", get(handlers::gateways::list))
        .route("/routes", get(handlers::routes::list))
        .route(
            "/routes/{namespace}/{name}/simulate",
            post(handlers::routes::simulate),
        )
        .route("/topology", get(handlers::topology::full))
        .route("/topology/gateway/{name}", get(handlers::topology::gateway))
        .route("/global/gateways", get(handlers::global::gateways))
        .route("/global/httproutes", get(handlers::global::http_routes))
        .with_state(registry)
}
