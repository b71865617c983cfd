//! 🏗 Infrastructure for handling maintenance requests
//!
//! This crate is transport-agnostic: it knows what a maintenance request looks
//! like, how an HTTP call is routed to an operation and how the answer is
//! formatted, but not how bytes travel over the wire.
#![warn(missing_docs)]

mod error;
mod model;
mod request;
mod response;
mod routing;

pub use error::{ApiError, ApiResult};
pub use model::{
    MaintenanceRequest, RequestId, RequestPayload, STATUS_COMPLETED, STATUS_IN_PROGRESS,
    STATUS_PENDING,
};
pub use request::{RawRequest, Request, RequestHandler, RequestKind, RequestMethod};
pub use response::{Reply, CONTENT_TYPE, CORS_HEADERS};
pub use routing::{route, Route};

/// Configuration of the maintenance request service
#[derive(Clone, Copy, Debug)]
pub struct Config {
    /// Populate the store with demonstration records on launch
    pub seed_demo_data: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            seed_demo_data: true,
        }
    }
}
