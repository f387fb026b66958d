pub mod clusters;
pub mod gateways;
pub mod global;
pub mod health;
pub mod routes;
pub mod topology;

use serde::Deserialize;

/// Optional `?namespace=` filter shared by the listing endpoints.
#[derive(Debug, Default, Deserialize)]
pub struct NamespaceQuery {
    pub namespace: Option<String>,
}
