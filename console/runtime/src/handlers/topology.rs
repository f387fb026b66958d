use super::NamespaceQuery;
use crate::{error::ApiError, registry::ClusterRegistry};
use axum::{
    extract::{Path, Query, State},
    Json,
};
use gateway_console_core::{topology, Edge, GraphBuilder, Node};
use serde::Serialize;
use std::sync::Arc;

#[derive(Debug, Serialize)]
pub struct TopologyResponse {
    pub nodes: Vec<Node>,
    pub edges: Vec<Edge>,
}

/// The full gateway/route/service graph, optionally limited to one namespace.
pub async fn full(
    State(registry): State<Arc<ClusterRegistry>>,
    Query(query): Query<NamespaceQuery>,
) -> Result<Json<TopologyResponse>, ApiError> {
    let cluster = registry.default_cluster()?;
    let snapshot = cluster.inventory.snapshot(query.namespace.as_deref()).await?;
    let (nodes, edges) =
        GraphBuilder::build(&snapshot.gateways, &snapshot.routes, &snapshot.services);
    Ok(Json(TopologyResponse { nodes, edges }))
}

/// The two-hop neighborhood of a single gateway: its routes, and the services
/// those routes send to.
pub async fn gateway(
    State(registry): State<Arc<ClusterRegistry>>,
    Path(name): Path<String>,
    Query(query): Query<NamespaceQuery>,
) -> Result<Json<TopologyResponse>, ApiError> {
    let cluster = registry.default_cluster()?;
    let snapshot = cluster.inventory.snapshot(None).await?;
    let (nodes, edges) =
        GraphBuilder::build(&snapshot.gateways, &snapshot.routes, &snapshot.services);
    let (nodes, edges) = topology::scope(&nodes, &edges, &name, query.namespace.as_deref())
        .ok_or_else(|| ApiError::NotFound(format!("gateway {name}")))?;
    Ok(Json(TopologyResponse { nodes, edges }))
}
