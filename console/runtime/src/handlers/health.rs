use crate::{error::ApiError, registry::ClusterRegistry};
use axum::{extract::State, Json};
use serde_json::{json, Value};
use std::sync::Arc;

pub async fn healthz() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

/// Ready once at least one cluster is registered.
pub async fn readyz(State(registry): State<Arc<ClusterRegistry>>) -> Result<Json<Value>, ApiError> {
    registry.default_cluster()?;
    Ok(Json(json!({ "status": "ok" })))
}
