use super::{gateways, routes, NamespaceQuery};
use crate::{aggregate, registry::ClusterRegistry};
use axum::{
    extract::{Query, State},
    Json,
};
use serde::Serialize;
use std::sync::Arc;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClusterGateway {
    pub cluster_name: String,
    pub cluster_region: String,
    pub gateway: gateways::GatewayView,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClusterRoute {
    pub cluster_name: String,
    pub cluster_region: String,
    pub route: routes::RouteView,
}

/// Lists gateways from every cluster in parallel, tagging each with its
/// source cluster. Unreachable clusters are skipped.
pub async fn gateways(
    State(registry): State<Arc<ClusterRegistry>>,
    Query(query): Query<NamespaceQuery>,
) -> Json<Vec<ClusterGateway>> {
    let slices = aggregate::fan_out(registry.clusters(), |cluster| {
        let namespace = query.namespace.clone();
        async move { cluster.inventory.snapshot(namespace.as_deref()).await }
    })
    .await;

    let mut all = Vec::new();
    for slice in slices {
        for gateway in &slice.value.gateways {
            all.push(ClusterGateway {
                cluster_name: slice.cluster_name.clone(),
                cluster_region: slice.cluster_region.clone(),
                gateway: gateways::view(gateway),
            });
        }
    }
    Json(all)
}

/// Lists HTTPRoutes from every cluster in parallel, tagging each with its
/// source cluster.
pub async fn http_routes(
    State(registry): State<Arc<ClusterRegistry>>,
    Query(query): Query<NamespaceQuery>,
) -> Json<Vec<ClusterRoute>> {
    let slices = aggregate::fan_out(registry.clusters(), |cluster| {
        let namespace = query.namespace.clone();
        async move { cluster.inventory.snapshot(namespace.as_deref()).await }
    })
    .await;

    let mut all = Vec::new();
    for slice in slices {
        for route in &slice.value.routes {
            all.push(ClusterRoute {
                cluster_name: slice.cluster_name.clone(),
                cluster_region: slice.cluster_region.clone(),
                route: routes::view(route),
            });
        }
    }
    Json(all)
}
