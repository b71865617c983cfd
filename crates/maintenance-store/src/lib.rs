//! :wrench: The maintenance request service.
//!
//! The service consists of the [store] holding all maintenance requests and
//! the [service] answering routed requests from it. Startup optionally
//! [seeds][seed] the store with demonstration data.

#![allow(rustdoc::private_intra_doc_links)]
use std::sync::Arc;

use maintenance_core::Config;
use tracing::info;

mod seed;
mod service;
mod store;

pub use seed::seed_demo_data;
pub use service::Service;
pub use store::RequestStore;

/// Entrypoint of the service
///
/// Constructs a fresh store, seeds it if `config` asks for it and returns the
/// request handler that the surrounding infrastructure serves requests to.
pub fn launch(config: &Config) -> Service {
    let store = Arc::new(RequestStore::new());
    if config.seed_demo_data {
        seed_demo_data(&store);
    }
    info!(requests = store.len(), "maintenance service launched");
    Service::new(store)
}
