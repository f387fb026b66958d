use crate::registry::ClusterHandle;
use anyhow::Result;
use futures::future;
use std::future::Future;
use tokio::time;

/// Upper bound on any single cluster's query during a global fan-out.
pub const CLUSTER_QUERY_TIMEOUT: time::Duration = time::Duration::from_secs(10);

/// One cluster's contribution to an aggregated response.
pub struct ClusterSlice<T> {
    pub cluster_name: String,
    pub cluster_region: String,
    pub value: T,
}

/// Queries every registered cluster in parallel and collects the successes in
/// registration order.
///
/// A cluster that errors or exceeds [`CLUSTER_QUERY_TIMEOUT`] is logged and
/// dropped from the result. All clusters failing yields an empty list, not an
/// error.
pub async fn fan_out<T, F, Fut>(clusters: &[ClusterHandle], query: F) -> Vec<ClusterSlice<T>>
where
    F: Fn(ClusterHandle) -> Fut,
    Fut: Future<Output = Result<T>>,
{
    let queries = clusters.iter().map(|cluster| {
        let cluster = cluster.clone();
        let query = query(cluster.clone());
        async move {
            match time::timeout(CLUSTER_QUERY_TIMEOUT, query).await {
                Ok(Ok(value)) => Some(ClusterSlice {
                    cluster_name: cluster.name,
                    cluster_region: cluster.region,
                    value,
                }),
                Ok(Err(error)) => {
                    tracing::warn!(cluster = %cluster.name, %error, "cluster query failed");
                    None
                }
                Err(_) => {
                    tracing::warn!(
                        cluster = %cluster.name,
                        timeout = ?CLUSTER_QUERY_TIMEOUT,
                        "cluster query timed out"
                    );
                    None
                }
            }
        }
    });

    future::join_all(queries)
        .await
        .into_iter()
        .flatten()
        .collect()
}
