#![deny(warnings, rust_2018_idioms)]
#![forbid(unsafe_code)]

pub mod routes;
pub mod simulate;
pub mod topology;

pub use self::routes::{
    BackendRef, Condition, Gateway, HeaderMatch, ParentRef, PathMatch, Route, RouteMatch,
    RouteRule, Service,
};
pub use self::simulate::{evaluate, MatchDetail, SimulateRequest, SimulateResponse};
pub use self::topology::{scope, Edge, EdgeKind, GraphBuilder, Node, NodeKind, NodeStatus};
