//! HTTP runtime for the gateway console: cluster registry, route handlers,
//! and the multi-cluster aggregation layer.

#![deny(warnings, rust_2018_idioms)]
#![forbid(unsafe_code)]

pub use gateway_console_core as core;
pub use gateway_console_k8s_index as index;

mod aggregate;
mod args;
mod error;
mod handlers;
mod registry;
mod server;

pub use self::args::Args;
pub use self::error::ApiError;
pub use self::registry::{ClusterHandle, ClusterRegistry};
pub use self::server::app;
