//! Cluster-independent views of Gateway API resources.
//!
//! These are built from listed Kubernetes objects by the `k8s/index` crate and
//! consumed by the match evaluator and the topology builder. Optional fields
//! are carried through unset rather than defaulted so that responses reflect
//! what the source configuration actually declared.

use serde::{Deserialize, Serialize};

/// An HTTPRoute reduced to the parts the console reasons about: ordered rules,
/// parent bindings, and the status conditions its parents reported.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Route {
    pub name: String,
    pub namespace: String,
    pub hostnames: Vec<String>,
    pub parent_refs: Vec<ParentRef>,
    pub rules: Vec<RouteRule>,

    /// Status conditions flattened across all parents, in parent order.
    pub status_conditions: Vec<Condition>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RouteRule {
    /// Match blocks are ORed together; an empty list matches every request.
    pub matches: Vec<RouteMatch>,
    pub backend_refs: Vec<BackendRef>,
}

/// One AND-combined set of path/method/header conditions inside a rule.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RouteMatch {
    pub path: Option<PathMatch>,
    pub method: Option<String>,
    pub headers: Vec<HeaderMatch>,
}

/// Regex values are kept as source text and compiled at evaluation time: a
/// malformed pattern must degrade to a diagnostic, not a construction error.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PathMatch {
    Exact(String),
    Prefix(String),
    Regex(String),
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum HeaderMatch {
    Exact(String, String),
    Regex(String, String),
}

impl HeaderMatch {
    pub fn name(&self) -> &str {
        match self {
            Self::Exact(name, _) | Self::Regex(name, _) => name,
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BackendRef {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub port: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weight: Option<i32>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ParentRef {
    pub name: String,
    /// Explicit namespace override; `None` binds to the route's own namespace.
    pub namespace: Option<String>,
}

/// A Kubernetes-style `{type, status}` condition pair.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Condition {
    pub type_: String,
    pub status: String,
}

impl Condition {
    pub fn new(type_: impl Into<String>, status: impl Into<String>) -> Self {
        Self {
            type_: type_.into(),
            status: status.into(),
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Gateway {
    pub name: String,
    pub namespace: String,
    pub class_name: String,
    /// Addresses reported on status, in reported order.
    pub addresses: Vec<String>,
    pub conditions: Vec<Condition>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Service {
    pub name: String,
    pub namespace: String,
    pub cluster_ip: Option<String>,
    pub type_: Option<String>,
}
