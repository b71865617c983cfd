//! Implementation of the central store for maintenance requests

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use maintenance_core::{
    ApiError, ApiResult, MaintenanceRequest, RequestId, RequestPayload, STATUS_PENDING,
};
use parking_lot::RwLock;

struct StoreInner {
    /// All live requests by id
    requests: HashMap<RequestId, MaintenanceRequest>,

    /// Id handed out to the next created request
    next_id: RequestId,
}

impl StoreInner {
    fn insert(
        &mut self,
        payload: RequestPayload,
        created_at: DateTime<Utc>,
    ) -> ApiResult<MaintenanceRequest> {
        if !payload.is_complete() {
            return Err(ApiError::Validation);
        }

        let id = self.next_id;
        self.next_id += 1;

        let status = payload.status_or(STATUS_PENDING).to_owned();
        let request = MaintenanceRequest {
            id,
            asset: payload.asset,
            description: payload.description,
            status,
            created_at,
        };
        self.requests.insert(id, request.clone());
        Ok(request)
    }
}

/// Implementation of the central store for maintenance requests
///
/// The requests and the id counter sit behind a single reader/writer lock.
/// [`list()`][Self::list] and [`get()`][Self::get] share it; every mutating
/// operation validates and applies its change under one exclusive
/// acquisition, so a rejected call leaves no trace (not even a consumed id).
pub struct RequestStore {
    inner: RwLock<StoreInner>,
}

impl Default for RequestStore {
    fn default() -> Self {
        Self::new()
    }
}

impl RequestStore {
    /// Create a new, empty [`RequestStore`]. The first id handed out is 1.
    pub fn new() -> Self {
        let inner = StoreInner {
            requests: HashMap::new(),
            next_id: 1,
        };
        Self {
            inner: RwLock::new(inner),
        }
    }

    /// Get all requests, newest first.
    ///
    /// Requests created at the same instant are ordered by descending id.
    pub fn list(&self) -> Vec<MaintenanceRequest> {
        let mut requests: Vec<_> = self.inner.read().requests.values().cloned().collect();
        requests.sort_unstable_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| b.id.cmp(&a.id))
        });
        requests
    }

    /// Create a request from `payload`.
    ///
    /// The status defaults to [`STATUS_PENDING`] if the payload has none.
    pub fn create(&self, payload: RequestPayload) -> ApiResult<MaintenanceRequest> {
        let mut inner = self.inner.write();
        // Taking the time under the lock keeps `created_at` in id order.
        inner.insert(payload, Utc::now())
    }

    /// Create a request with a given creation time.
    pub(crate) fn create_at(
        &self,
        payload: RequestPayload,
        created_at: DateTime<Utc>,
    ) -> ApiResult<MaintenanceRequest> {
        self.inner.write().insert(payload, created_at)
    }

    /// Get the request with the given id.
    pub fn get(&self, id: RequestId) -> ApiResult<MaintenanceRequest> {
        self.inner
            .read()
            .requests
            .get(&id)
            .cloned()
            .ok_or(ApiError::NotFound)
    }

    /// Replace asset, description and status of the request with the given
    /// id.
    ///
    /// An empty status keeps the current one. `id` and `created_at` never
    /// change.
    pub fn update(&self, id: RequestId, payload: RequestPayload) -> ApiResult<MaintenanceRequest> {
        let mut inner = self.inner.write();
        let request = inner.requests.get_mut(&id).ok_or(ApiError::NotFound)?;
        if !payload.is_complete() {
            return Err(ApiError::Validation);
        }

        request.status = payload.status_or(&request.status).to_owned();
        request.asset = payload.asset;
        request.description = payload.description;
        Ok(request.clone())
    }

    /// Remove the request with the given id permanently.
    pub fn delete(&self, id: RequestId) -> ApiResult<()> {
        match self.inner.write().requests.remove(&id) {
            Some(_) => Ok(()),
            None => Err(ApiError::NotFound),
        }
    }

    /// Get the number of stored requests.
    pub fn len(&self) -> usize {
        self.inner.read().requests.len()
    }

    /// Whether the store holds no requests.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
