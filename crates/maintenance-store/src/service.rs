//! Request handler dispatching routed requests to the store
use std::sync::Arc;

use maintenance_core::{ApiError, Request, RequestHandler, RequestKind};
use tracing::{debug, info, warn};

use crate::store::RequestStore;

/// The maintenance request service
///
/// This struct implements the [`RequestHandler`] trait: transports hand it
/// requests that have already been routed, and it answers them from its
/// [`RequestStore`].
pub struct Service {
    store: Arc<RequestStore>,
}

impl Service {
    /// Create a new [`Service`] answering from `store`
    pub fn new(store: Arc<RequestStore>) -> Self {
        Self { store }
    }

    /// Get the store backing this service
    pub fn store(&self) -> &Arc<RequestStore> {
        &self.store
    }
}

/// Answer `rq` with `err`
fn reject(rq: Request, err: ApiError) {
    warn!(kind = ?rq.kind(), status = err.status_code(), "{err}");
    rq.respond_with_err(&err);
}

impl RequestHandler for Service {
    fn handle(&self, mut rq: Request) {
        match *rq.kind() {
            RequestKind::ListRequests => {
                let requests = self.store.list();
                debug!(count = requests.len(), "listed requests");
                rq.respond_with_list(&requests);
            }
            RequestKind::CreateRequest => {
                match rq.read_payload().and_then(|payload| self.store.create(payload)) {
                    Ok(created) => {
                        info!(id = created.id, asset = %created.asset, "created request");
                        rq.respond_with_request(201, &created);
                    }
                    Err(err) => reject(rq, err),
                }
            }
            RequestKind::GetRequest(id) => match self.store.get(id) {
                Ok(request) => {
                    debug!(id, "fetched request");
                    rq.respond_with_request(200, &request);
                }
                Err(err) => reject(rq, err),
            },
            RequestKind::UpdateRequest(id) => {
                match rq
                    .read_payload()
                    .and_then(|payload| self.store.update(id, payload))
                {
                    Ok(updated) => {
                        info!(id, status = %updated.status, "updated request");
                        rq.respond_with_request(200, &updated);
                    }
                    Err(err) => reject(rq, err),
                }
            }
            RequestKind::DeleteRequest(id) => match self.store.delete(id) {
                Ok(()) => {
                    info!(id, "deleted request");
                    rq.respond_with_no_content();
                }
                Err(err) => reject(rq, err),
            },
        }
    }

    fn shutdown(self) {
        info!(remaining = self.store.len(), "maintenance service shut down");
    }
}
