use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// Identifier of a maintenance request, assigned by the store
pub type RequestId = u64;

/// Status assigned to new requests that do not name one
pub const STATUS_PENDING: &str = "Pending";
/// Work on the request has started
pub const STATUS_IN_PROGRESS: &str = "In Progress";
/// The request has been dealt with
pub const STATUS_COMPLETED: &str = "Completed";

/// A maintenance request as stored and as sent to clients
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MaintenanceRequest {
    /// Unique id, never reused
    pub id: RequestId,
    /// Equipment or location the request is about
    pub asset: String,
    /// What is wrong
    pub description: String,
    /// Free-form status, usually one of [`STATUS_PENDING`],
    /// [`STATUS_IN_PROGRESS`] or [`STATUS_COMPLETED`]
    pub status: String,
    /// Time of creation, preserved across updates
    pub created_at: DateTime<Utc>,
}

/// Body of a create or update call
///
/// Missing and `null` fields decode as empty strings so that they are
/// reported as validation errors rather than parse errors. `id` and
/// `createdAt` are not part of the payload; a client sending them has them
/// ignored.
#[derive(Clone, PartialEq, Eq, Default, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct RequestPayload {
    /// Equipment or location
    #[serde(deserialize_with = "null_as_empty")]
    pub asset: String,
    /// What is wrong
    #[serde(deserialize_with = "null_as_empty")]
    pub description: String,
    /// Requested status, empty if not given
    #[serde(deserialize_with = "null_as_empty")]
    pub status: String,
}

fn null_as_empty<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

impl RequestPayload {
    /// Create a payload from its fields
    pub fn new(
        asset: impl Into<String>,
        description: impl Into<String>,
        status: impl Into<String>,
    ) -> Self {
        Self {
            asset: asset.into(),
            description: description.into(),
            status: status.into(),
        }
    }

    /// Whether both required fields carry something besides whitespace
    pub fn is_complete(&self) -> bool {
        !self.asset.trim().is_empty() && !self.description.trim().is_empty()
    }

    /// The status to store, falling back to `current` when none was given
    pub fn status_or<'a>(&'a self, current: &'a str) -> &'a str {
        if self.status.is_empty() {
            current
        } else {
            &self.status
        }
    }
}
