use crate::registry::ClusterRegistry;
use axum::{extract::State, Json};
use serde::Serialize;
use std::sync::Arc;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClusterView {
    pub name: String,
    pub region: String,
    pub default: bool,
}

pub async fn list(State(registry): State<Arc<ClusterRegistry>>) -> Json<Vec<ClusterView>> {
    let clusters = registry
        .clusters()
        .iter()
        .enumerate()
        .map(|(index, cluster)| ClusterView {
            name: cluster.name.clone(),
            region: cluster.region.clone(),
            default: index == 0,
        })
        .collect();
    Json(clusters)
}
