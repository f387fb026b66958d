use crate::error::ApiError;
use gateway_console_k8s_index::Inventory;
use std::sync::Arc;

/// One connected cluster: its display identity plus an inventory handle.
#[derive(Clone)]
pub struct ClusterHandle {
    pub name: String,
    pub region: String,
    pub inventory: Arc<dyn Inventory>,
}

/// The set of clusters the console serves, in registration order.
///
/// The first registered cluster is the default for the single-cluster
/// endpoints; the `/global/*` endpoints fan out over all of them.
#[derive(Clone, Default)]
pub struct ClusterRegistry {
    clusters: Vec<ClusterHandle>,
}

impl ClusterRegistry {
    pub fn new(clusters: Vec<ClusterHandle>) -> Self {
        Self { clusters }
    }

    pub fn clusters(&self) -> &[ClusterHandle] {
        &self.clusters
    }

    pub fn default_cluster(&self) -> Result<&ClusterHandle, ApiError> {
        self.clusters.first().ok_or(ApiError::NoClusterContext)
    }
}
