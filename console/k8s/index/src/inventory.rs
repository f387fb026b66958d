use anyhow::Result;
use async_trait::async_trait;
use gateway_console_core::routes as model;
use gateway_console_k8s_api::{gateway, httproute, Service};
use kube::{api::ListParams, Api, Client};

/// One cluster's Gateway API resources, listed and lowered to the core model.
#[derive(Clone, Debug, Default)]
pub struct ClusterSnapshot {
    pub gateways: Vec<model::Gateway>,
    pub routes: Vec<model::Route>,
    pub services: Vec<model::Service>,
}

/// Read access to one cluster's gateways, routes, and services.
///
/// The HTTP layer works only against this trait so that handlers can be
/// exercised with canned snapshots.
#[async_trait]
pub trait Inventory: Send + Sync {
    /// Lists the cluster's Gateways, HTTPRoutes, and Services, optionally
    /// limited to a single namespace.
    async fn snapshot(&self, namespace: Option<&str>) -> Result<ClusterSnapshot>;

    /// Fetches a single HTTPRoute, or `None` if it does not exist.
    async fn find_http_route(&self, namespace: &str, name: &str) -> Result<Option<model::Route>>;
}

/// Inventory backed by a live API server connection.
#[derive(Clone)]
pub struct KubeInventory {
    client: Client,
}

impl KubeInventory {
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Inventory for KubeInventory {
    async fn snapshot(&self, namespace: Option<&str>) -> Result<ClusterSnapshot> {
        let params = ListParams::default();

        let gateways: Api<gateway::Gateway> = match namespace {
            Some(ns) => Api::namespaced(self.client.clone(), ns),
            None => Api::all(self.client.clone()),
        };
        let routes: Api<httproute::HttpRoute> = match namespace {
            Some(ns) => Api::namespaced(self.client.clone(), ns),
            None => Api::all(self.client.clone()),
        };
        let services: Api<Service> = match namespace {
            Some(ns) => Api::namespaced(self.client.clone(), ns),
            None => Api::all(self.client.clone()),
        };

        let gateways = gateways
            .list(&params)
            .await?
            .items
            .into_iter()
            .map(crate::convert::gateway)
            .collect();
        let routes = routes
            .list(&params)
            .await?
            .items
            .into_iter()
            .map(crate::convert::route)
            .collect();
        let services = services
            .list(&params)
            .await?
            .items
            .into_iter()
            .map(crate::convert::service)
            .collect();

        Ok(ClusterSnapshot {
            gateways,
            routes,
            services,
        })
    }

    async fn find_http_route(
        &self,
        namespace: &str,
        name: &str,
    ) -> Result<Option<model::Route>> {
        let api: Api<httproute::HttpRoute> = Api::namespaced(self.client.clone(), namespace);
        Ok(api.get_opt(name).await?.map(crate::convert::route))
    }
}
