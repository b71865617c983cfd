//! Demonstration records created at startup

use chrono::{Duration, Utc};
use maintenance_core::{RequestPayload, STATUS_IN_PROGRESS, STATUS_PENDING};
use tracing::{error, info};

use crate::store::RequestStore;

/// Populate `store` with an HVAC and an elevator ticket.
///
/// Both are backdated so that requests created afterwards list first.
pub fn seed_demo_data(store: &RequestStore) {
    let now = Utc::now();
    let demo = [
        (
            RequestPayload::new(
                "HVAC Unit 3B",
                "Unit is making a loud rattling noise and not cooling properly",
                STATUS_PENDING,
            ),
            now - Duration::days(2),
        ),
        (
            RequestPayload::new(
                "Elevator A",
                "Doors close too slowly and sometimes reopen",
                STATUS_IN_PROGRESS,
            ),
            now - Duration::days(1),
        ),
    ];

    for (payload, created_at) in demo {
        match store.create_at(payload, created_at) {
            Ok(request) => info!(id = request.id, asset = %request.asset, "seeded request"),
            Err(err) => error!("could not seed demo request: {err}"),
        }
    }
}
