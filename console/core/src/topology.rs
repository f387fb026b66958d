//! Topology graph construction and scoped queries.
//!
//! [`GraphBuilder::build`] reconstructs a node/edge graph from point-in-time
//! inventories of Gateways, HTTPRoutes, and Services. [`scope`] extracts the
//! two-hop subgraph anchored at one gateway. Both are deterministic given
//! deterministic input ordering and share no state across invocations.

use crate::routes::{Condition, Gateway, Route, Service};
use ahash::AHashSet as HashSet;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    Gateway,
    HttpRoute,
    Service,
}

impl NodeKind {
    fn as_str(self) -> &'static str {
        match self {
            Self::Gateway => "gateway",
            Self::HttpRoute => "httproute",
            Self::Service => "service",
        }
    }

    /// Node ids are the only join key in the graph.
    pub fn id(self, namespace: &str, name: &str) -> String {
        format!("{}/{}/{}", self.as_str(), namespace, name)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeStatus {
    Healthy,
    Degraded,
    Error,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum EdgeKind {
    #[serde(rename = "parentRef")]
    ParentRef,
    #[serde(rename = "backendRef")]
    BackendRef,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Node {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: NodeKind,
    pub name: String,
    pub namespace: String,
    pub status: NodeStatus,
    pub metadata: BTreeMap<String, String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Edge {
    pub id: String,
    pub source: String,
    pub target: String,
    #[serde(rename = "type")]
    pub kind: EdgeKind,
}

/// Derives a node status from a condition list: a false `degraded_type`
/// condition downgrades to degraded, a false `error_type` condition overrides
/// to error. Shared by gateway (Accepted/Programmed) and route
/// (Accepted/ResolvedRefs) derivation.
fn status_from_conditions(
    conditions: &[Condition],
    degraded_type: &str,
    error_type: &str,
) -> NodeStatus {
    let mut status = NodeStatus::Healthy;
    if conditions
        .iter()
        .any(|c| c.type_ == degraded_type && c.status != "True")
    {
        status = NodeStatus::Degraded;
    }
    if conditions
        .iter()
        .any(|c| c.type_ == error_type && c.status != "True")
    {
        status = NodeStatus::Error;
    }
    status
}

/// Accumulates nodes and edges for one build invocation. The edge-id counter
/// and the seen-set for missing-service synthesis are owned by the builder so
/// concurrent builds never interfere.
#[derive(Debug, Default)]
pub struct GraphBuilder {
    nodes: Vec<Node>,
    edges: Vec<Edge>,
    seen_services: HashSet<String>,
    next_edge_id: u64,
}

impl GraphBuilder {
    /// Builds the complete graph. Services are emitted first so that
    /// missing-service synthesis during route processing can consult the
    /// seen-set; gateways and routes follow, in input order.
    pub fn build(
        gateways: &[Gateway],
        routes: &[Route],
        services: &[Service],
    ) -> (Vec<Node>, Vec<Edge>) {
        let mut builder = Self::default();
        for service in services {
            builder.add_service(service);
        }
        for gateway in gateways {
            builder.add_gateway(gateway);
        }
        for route in routes {
            builder.add_route(route);
        }
        (builder.nodes, builder.edges)
    }

    fn next_edge_id(&mut self) -> String {
        let id = format!("edge-{}", self.next_edge_id);
        self.next_edge_id += 1;
        id
    }

    fn add_service(&mut self, service: &Service) {
        let id = NodeKind::Service.id(&service.namespace, &service.name);
        let mut metadata = BTreeMap::new();
        if let Some(cluster_ip) = &service.cluster_ip {
            metadata.insert("clusterIP".to_string(), cluster_ip.clone());
        }
        if let Some(type_) = &service.type_ {
            metadata.insert("type".to_string(), type_.clone());
        }
        self.seen_services.insert(id.clone());
        self.nodes.push(Node {
            id,
            kind: NodeKind::Service,
            name: service.name.clone(),
            namespace: service.namespace.clone(),
            status: NodeStatus::Healthy,
            metadata,
        });
    }

    fn add_gateway(&mut self, gateway: &Gateway) {
        let mut metadata = BTreeMap::new();
        metadata.insert("gatewayClassName".to_string(), gateway.class_name.clone());
        if let Some(address) = gateway.addresses.first() {
            metadata.insert("address".to_string(), address.clone());
        }
        self.nodes.push(Node {
            id: NodeKind::Gateway.id(&gateway.namespace, &gateway.name),
            kind: NodeKind::Gateway,
            name: gateway.name.clone(),
            namespace: gateway.namespace.clone(),
            status: status_from_conditions(&gateway.conditions, "Accepted", "Programmed"),
            metadata,
        });
    }

    fn add_route(&mut self, route: &Route) {
        let route_id = NodeKind::HttpRoute.id(&route.namespace, &route.name);
        let mut metadata = BTreeMap::new();
        if let Some(hostname) = route.hostnames.first() {
            metadata.insert("hostname".to_string(), hostname.clone());
        }
        self.nodes.push(Node {
            id: route_id.clone(),
            kind: NodeKind::HttpRoute,
            name: route.name.clone(),
            namespace: route.namespace.clone(),
            status: status_from_conditions(&route.status_conditions, "Accepted", "ResolvedRefs"),
            metadata,
        });

        // Parent gateways are never synthesized: a parentRef edge may point at
        // a node id that does not exist in the graph.
        for parent in &route.parent_refs {
            let namespace = parent.namespace.as_deref().unwrap_or(&route.namespace);
            let target = NodeKind::Gateway.id(namespace, &parent.name);
            let id = self.next_edge_id();
            self.edges.push(Edge {
                id,
                source: route_id.clone(),
                target,
                kind: EdgeKind::ParentRef,
            });
        }

        for rule in &route.rules {
            for backend in &rule.backend_refs {
                let namespace = backend.namespace.as_deref().unwrap_or(&route.namespace);
                let target = NodeKind::Service.id(namespace, &backend.name);
                if !self.seen_services.contains(&target) {
                    self.seen_services.insert(target.clone());
                    self.nodes.push(Node {
                        id: target.clone(),
                        kind: NodeKind::Service,
                        name: backend.name.clone(),
                        namespace: namespace.to_string(),
                        status: NodeStatus::Error,
                        metadata: BTreeMap::from([(
                            "reason".to_string(),
                            "service not found".to_string(),
                        )]),
                    });
                }
                let id = self.next_edge_id();
                self.edges.push(Edge {
                    id,
                    source: route_id.clone(),
                    target,
                    kind: EdgeKind::BackendRef,
                });
            }
        }
    }
}

/// Extracts the subgraph reachable from one gateway in exactly two directed
/// hops: routes bound to the gateway via parentRef edges, then services those
/// routes reference via backendRef edges.
///
/// Without a namespace the first gateway node in input order with a matching
/// name is used; this is ambiguous when multiple namespaces share a gateway
/// name. Returns `None` when the gateway cannot be resolved.
pub fn scope(
    nodes: &[Node],
    edges: &[Edge],
    name: &str,
    namespace: Option<&str>,
) -> Option<(Vec<Node>, Vec<Edge>)> {
    let gateway_id = match namespace {
        Some(namespace) => NodeKind::Gateway.id(namespace, name),
        None => nodes
            .iter()
            .find(|node| node.kind == NodeKind::Gateway && node.name == name)?
            .id
            .clone(),
    };
    if !nodes.iter().any(|node| node.id == gateway_id) {
        return None;
    }

    let routes: HashSet<&str> = edges
        .iter()
        .filter(|edge| edge.kind == EdgeKind::ParentRef && edge.target == gateway_id)
        .map(|edge| edge.source.as_str())
        .collect();
    let services: HashSet<&str> = edges
        .iter()
        .filter(|edge| edge.kind == EdgeKind::BackendRef && routes.contains(edge.source.as_str()))
        .map(|edge| edge.target.as_str())
        .collect();

    let mut retained: HashSet<&str> = HashSet::with_capacity(1 + routes.len() + services.len());
    retained.insert(gateway_id.as_str());
    retained.extend(routes.iter().copied());
    retained.extend(services.iter().copied());

    let scoped_nodes = nodes
        .iter()
        .filter(|node| retained.contains(node.id.as_str()))
        .cloned()
        .collect();
    let scoped_edges = edges
        .iter()
        .filter(|edge| {
            retained.contains(edge.source.as_str()) && retained.contains(edge.target.as_str())
        })
        .cloned()
        .collect();
    Some((scoped_nodes, scoped_edges))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routes::{BackendRef, ParentRef, RouteRule};

    fn gateway(name: &str, namespace: &str) -> Gateway {
        Gateway {
            name: name.to_string(),
            namespace: namespace.to_string(),
            class_name: "nginx".to_string(),
            ..Default::default()
        }
    }

    fn service(name: &str, namespace: &str) -> Service {
        Service {
            name: name.to_string(),
            namespace: namespace.to_string(),
            cluster_ip: Some("10.0.0.1".to_string()),
            type_: Some("ClusterIP".to_string()),
        }
    }

    fn route(name: &str, namespace: &str, parent: &str, backend: &str) -> Route {
        Route {
            name: name.to_string(),
            namespace: namespace.to_string(),
            parent_refs: vec![ParentRef {
                name: parent.to_string(),
                namespace: Some(namespace.to_string()),
            }],
            rules: vec![RouteRule {
                backend_refs: vec![BackendRef {
                    name: backend.to_string(),
                    namespace: Some(namespace.to_string()),
                    port: Some(80),
                    ..Default::default()
                }],
                ..Default::default()
            }],
            ..Default::default()
        }
    }

    #[test]
    fn empty_inputs_build_empty_graph() {
        let (nodes, edges) = GraphBuilder::build(&[], &[], &[]);
        assert!(nodes.is_empty());
        assert!(edges.is_empty());
    }

    #[test]
    fn connected_resources_build_full_graph() {
        let (nodes, edges) = GraphBuilder::build(
            &[gateway("test-gw", "default")],
            &[route("test-route", "default", "test-gw", "test-svc")],
            &[service("test-svc", "default")],
        );

        assert_eq!(nodes.len(), 3);
        assert_eq!(edges.len(), 2);

        let ids: Vec<&str> = nodes.iter().map(|n| n.id.as_str()).collect();
        assert!(ids.contains(&"gateway/default/test-gw"));
        assert!(ids.contains(&"httproute/default/test-route"));
        assert!(ids.contains(&"service/default/test-svc"));

        let parent_ref = edges.iter().find(|e| e.kind == EdgeKind::ParentRef).unwrap();
        assert_eq!(parent_ref.source, "httproute/default/test-route");
        assert_eq!(parent_ref.target, "gateway/default/test-gw");

        let backend_ref = edges.iter().find(|e| e.kind == EdgeKind::BackendRef).unwrap();
        assert_eq!(backend_ref.target, "service/default/test-svc");

        let svc = nodes.iter().find(|n| n.kind == NodeKind::Service).unwrap();
        assert_eq!(svc.status, NodeStatus::Healthy);
        assert_eq!(svc.metadata["clusterIP"], "10.0.0.1");
        assert_eq!(svc.metadata["type"], "ClusterIP");
    }

    #[test]
    fn missing_service_synthesized_once() {
        let (nodes, edges) = GraphBuilder::build(
            &[gateway("test-gw", "default")],
            &[
                route("route-1", "default", "test-gw", "svc-missing"),
                route("route-2", "default", "test-gw", "svc-missing"),
            ],
            &[],
        );

        let placeholders: Vec<&Node> = nodes
            .iter()
            .filter(|n| n.id == "service/default/svc-missing")
            .collect();
        assert_eq!(placeholders.len(), 1);
        assert_eq!(placeholders[0].status, NodeStatus::Error);
        assert_eq!(placeholders[0].metadata["reason"], "service not found");

        let backend_edges: Vec<&Edge> = edges
            .iter()
            .filter(|e| e.kind == EdgeKind::BackendRef && e.target == "service/default/svc-missing")
            .collect();
        assert_eq!(backend_edges.len(), 2);
    }

    #[test]
    fn missing_gateway_is_not_synthesized() {
        let (nodes, edges) = GraphBuilder::build(
            &[],
            &[route("test-route", "default", "absent-gw", "svc")],
            &[service("svc", "default")],
        );

        assert!(!nodes.iter().any(|n| n.kind == NodeKind::Gateway));
        let parent_ref = edges.iter().find(|e| e.kind == EdgeKind::ParentRef).unwrap();
        assert_eq!(parent_ref.target, "gateway/default/absent-gw");
    }

    #[test]
    fn parent_ref_without_namespace_uses_route_namespace() {
        let mut rt = route("test-route", "prod", "gw", "svc");
        rt.parent_refs[0].namespace = None;
        let (_, edges) = GraphBuilder::build(&[], &[rt], &[]);
        assert_eq!(edges[0].target, "gateway/prod/gw");
    }

    #[test]
    fn gateway_conditions_downgrade_status() {
        let mut gw = gateway("gw", "default");
        gw.conditions = vec![Condition::new("Accepted", "False")];
        let (nodes, _) = GraphBuilder::build(&[gw.clone()], &[], &[]);
        assert_eq!(nodes[0].status, NodeStatus::Degraded);

        // Programmed=False overrides degraded regardless of condition order.
        gw.conditions = vec![
            Condition::new("Programmed", "False"),
            Condition::new("Accepted", "False"),
        ];
        let (nodes, _) = GraphBuilder::build(&[gw], &[], &[]);
        assert_eq!(nodes[0].status, NodeStatus::Error);
    }

    #[test]
    fn healthy_gateway_keeps_metadata() {
        let mut gw = gateway("gw", "default");
        gw.conditions = vec![
            Condition::new("Accepted", "True"),
            Condition::new("Programmed", "True"),
        ];
        gw.addresses = vec!["203.0.113.10".to_string(), "203.0.113.11".to_string()];
        let (nodes, _) = GraphBuilder::build(&[gw], &[], &[]);
        assert_eq!(nodes[0].status, NodeStatus::Healthy);
        assert_eq!(nodes[0].metadata["gatewayClassName"], "nginx");
        assert_eq!(nodes[0].metadata["address"], "203.0.113.10");
    }

    #[test]
    fn route_conditions_downgrade_status() {
        let mut rt = route("rt", "default", "gw", "svc");
        rt.status_conditions = vec![Condition::new("Accepted", "False")];
        let (nodes, _) = GraphBuilder::build(&[], &[rt.clone()], &[]);
        let node = nodes.iter().find(|n| n.kind == NodeKind::HttpRoute).unwrap();
        assert_eq!(node.status, NodeStatus::Degraded);

        rt.status_conditions.push(Condition::new("ResolvedRefs", "False"));
        let (nodes, _) = GraphBuilder::build(&[], &[rt], &[]);
        let node = nodes.iter().find(|n| n.kind == NodeKind::HttpRoute).unwrap();
        assert_eq!(node.status, NodeStatus::Error);
    }

    #[test]
    fn edge_ids_are_unique_within_a_build() {
        let (_, edges) = GraphBuilder::build(
            &[gateway("gw", "default")],
            &[
                route("r1", "default", "gw", "s1"),
                route("r2", "default", "gw", "s2"),
            ],
            &[],
        );
        let mut ids: Vec<&str> = edges.iter().map(|e| e.id.as_str()).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), edges.len());
    }

    #[test]
    fn scope_returns_two_hop_subgraph_only() {
        let (nodes, edges) = GraphBuilder::build(
            &[gateway("gw-a", "default"), gateway("gw-b", "default")],
            &[
                route("route-a", "default", "gw-a", "svc-a"),
                route("route-b", "default", "gw-b", "svc-b"),
            ],
            &[service("svc-a", "default"), service("svc-b", "default")],
        );

        let (scoped_nodes, scoped_edges) =
            scope(&nodes, &edges, "gw-a", Some("default")).unwrap();
        assert_eq!(scoped_nodes.len(), 3);
        assert_eq!(scoped_edges.len(), 2);
        for node in &scoped_nodes {
            assert!(
                !["gw-b", "route-b", "svc-b"].contains(&node.name.as_str()),
                "unexpected node {} in scoped subgraph",
                node.id
            );
        }
    }

    #[test]
    fn scope_excludes_edges_with_unretained_endpoints() {
        // route-b shares svc-a but is not bound to gw-a; its backendRef edge
        // must not survive scoping even though svc-a does.
        let mut route_b = route("route-b", "default", "gw-b", "svc-a");
        route_b.rules[0].backend_refs[0].name = "svc-a".to_string();
        let (nodes, edges) = GraphBuilder::build(
            &[gateway("gw-a", "default")],
            &[route("route-a", "default", "gw-a", "svc-a"), route_b],
            &[service("svc-a", "default")],
        );

        let (scoped_nodes, scoped_edges) =
            scope(&nodes, &edges, "gw-a", Some("default")).unwrap();
        assert!(scoped_nodes.iter().all(|n| n.name != "route-b"));
        assert!(scoped_edges
            .iter()
            .all(|e| e.source != "httproute/default/route-b"));
    }

    #[test]
    fn scope_without_namespace_picks_first_match_in_input_order() {
        let (nodes, edges) = GraphBuilder::build(
            &[gateway("shared", "team-a"), gateway("shared", "team-b")],
            &[route("route-b", "team-b", "shared", "svc-b")],
            &[service("svc-b", "team-b")],
        );

        // team-a's gateway comes first in input order and has no routes.
        let (scoped_nodes, scoped_edges) = scope(&nodes, &edges, "shared", None).unwrap();
        assert_eq!(scoped_nodes.len(), 1);
        assert_eq!(scoped_nodes[0].id, "gateway/team-a/shared");
        assert!(scoped_edges.is_empty());
    }

    #[test]
    fn scope_unknown_gateway_is_none() {
        let (nodes, edges) = GraphBuilder::build(&[gateway("gw", "default")], &[], &[]);
        assert!(scope(&nodes, &edges, "absent", Some("default")).is_none());
        assert!(scope(&nodes, &edges, "absent", None).is_none());
        // Resolution by id requires the node to exist even when the id can be
        // formed directly.
        assert!(scope(&nodes, &edges, "gw", Some("other")).is_none());
    }

    #[test]
    fn nodes_and_edges_serialize_with_fixed_field_names() {
        let (nodes, edges) = GraphBuilder::build(
            &[gateway("gw", "default")],
            &[route("rt", "default", "gw", "svc")],
            &[],
        );
        let node = serde_json::to_value(&nodes[0]).unwrap();
        assert_eq!(node["type"], "gateway");
        assert_eq!(node["status"], "healthy");
        let edge = serde_json::to_value(&edges[0]).unwrap();
        assert_eq!(edge["type"], "parentRef");
        assert!(edge["id"].as_str().unwrap().starts_with("edge-"));

        let synthetic = nodes.iter().find(|n| n.kind == NodeKind::Service).unwrap();
        let value = serde_json::to_value(synthetic).unwrap();
        assert_eq!(value["type"], "service");
        assert_eq!(value["status"], "error");
        assert_eq!(value["metadata"]["reason"], "service not found");
    }
}
