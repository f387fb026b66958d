use super::NamespaceQuery;
use crate::{error::ApiError, registry::ClusterRegistry};
use axum::{
    extract::{Query, State},
    Json,
};
use gateway_console_core::routes as model;
use serde::Serialize;
use std::sync::Arc;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GatewayView {
    pub name: String,
    pub namespace: String,
    pub gateway_class_name: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub addresses: Vec<String>,
}

pub(crate) fn view(gateway: &model::Gateway) -> GatewayView {
    GatewayView {
        name: gateway.name.clone(),
        namespace: gateway.namespace.clone(),
        gateway_class_name: gateway.class_name.clone(),
        addresses: gateway.addresses.clone(),
    }
}

pub async fn list(
    State(registry): State<Arc<ClusterRegistry>>,
    Query(query): Query<NamespaceQuery>,
) -> Result<Json<Vec<GatewayView>>, ApiError> {
    let cluster = registry.default_cluster()?;
    let snapshot = cluster.inventory.snapshot(query.namespace.as_deref()).await?;
    Ok(Json(snapshot.gateways.iter().map(view).collect()))
}
