#![deny(warnings, rust_2018_idioms)]
#![forbid(unsafe_code)]

//! Converts listed Kubernetes objects into the console's core model and
//! defines the inventory boundary the handlers consume.

mod convert;
mod inventory;

pub use self::convert::{gateway, route, service};
pub use self::inventory::{ClusterSnapshot, Inventory, KubeInventory};
