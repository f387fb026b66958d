use super::NamespaceQuery;
use crate::{error::ApiError, registry::ClusterRegistry};
use axum::{
    extract::{Path, Query, State},
    Json,
};
use gateway_console_core::{evaluate, routes as model, SimulateRequest, SimulateResponse};
use serde::Serialize;
use std::sync::Arc;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteView {
    pub name: String,
    pub namespace: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub hostnames: Vec<String>,
    pub parent_refs: Vec<ParentRefView>,
}

#[derive(Debug, Serialize)]
pub struct ParentRefView {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,
}

pub(crate) fn view(route: &model::Route) -> RouteView {
    RouteView {
        name: route.name.clone(),
        namespace: route.namespace.clone(),
        hostnames: route.hostnames.clone(),
        parent_refs: route
            .parent_refs
            .iter()
            .map(|parent| ParentRefView {
                name: parent.name.clone(),
                namespace: parent.namespace.clone(),
            })
            .collect(),
    }
}

pub async fn list(
    State(registry): State<Arc<ClusterRegistry>>,
    Query(query): Query<NamespaceQuery>,
) -> Result<Json<Vec<RouteView>>, ApiError> {
    let cluster = registry.default_cluster()?;
    let snapshot = cluster.inventory.snapshot(query.namespace.as_deref()).await?;
    Ok(Json(snapshot.routes.iter().map(view).collect()))
}

/// Replays a synthetic request against one HTTPRoute's rules and reports
/// per-rule diagnostics.
pub async fn simulate(
    State(registry): State<Arc<ClusterRegistry>>,
    Path((namespace, name)): Path<(String, String)>,
    Json(request): Json<SimulateRequest>,
) -> Result<Json<SimulateResponse>, ApiError> {
    let cluster = registry.default_cluster()?;
    let route = cluster
        .inventory
        .find_http_route(&namespace, &name)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("httproute {namespace}/{name}")))?;
    Ok(Json(evaluate(&route, &request)))
}
