#![deny(warnings, rust_2018_idioms)]
#![forbid(unsafe_code)]

//! The typed Kubernetes surface the console consumes, behind one import path.

pub mod gateway;
pub mod httproute;

pub use k8s_openapi::api::core::v1::{Service, ServiceSpec};
pub use k8s_openapi::apimachinery::pkg::apis::meta::v1::Condition;
pub use kube::api::{Api, ListParams, ObjectMeta};
pub use kube::{Client, Resource, ResourceExt};
