//! Mapping of method and path to an operation

use crate::error::ApiError;
use crate::model::RequestId;
use crate::request::{RequestKind, RequestMethod};

/// Name of the only resource served
const RESOURCE: &str = "requests";

/// Outcome of routing a call
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum Route {
    /// Cross-origin preflight, answered without consulting the store
    Preflight,
    /// A store operation
    Dispatch(RequestKind),
    /// The call is invalid and must be answered with this error
    Reject(ApiError),
}

/// Route a call to `url` with `method`
///
/// The query string is ignored. `/requests` is the collection endpoint;
/// `/requests/{id}` is the item endpoint, where `{id}` must be a positive
/// decimal integer and nothing may follow it.
pub fn route(method: RequestMethod, url: &str) -> Route {
    use RequestMethod::*;

    if method == Options {
        return Route::Preflight;
    }

    let path = url.split_once('?').map_or(url, |(path, _)| path);
    let mut segments = path.split('/');
    if segments.next() != Some("") || segments.next() != Some(RESOURCE) {
        return Route::Reject(ApiError::RouteNotFound);
    }

    let Some(id) = segments.next() else {
        return match method {
            Get => Route::Dispatch(RequestKind::ListRequests),
            Post => Route::Dispatch(RequestKind::CreateRequest),
            _ => Route::Reject(ApiError::MethodNotAllowed),
        };
    };

    let id = match (parse_id(id), segments.next()) {
        (Some(id), None) => id,
        _ => return Route::Reject(ApiError::INVALID_ID),
    };
    match method {
        Get => Route::Dispatch(RequestKind::GetRequest(id)),
        Put => Route::Dispatch(RequestKind::UpdateRequest(id)),
        Delete => Route::Dispatch(RequestKind::DeleteRequest(id)),
        _ => Route::Reject(ApiError::MethodNotAllowed),
    }
}

fn parse_id(segment: &str) -> Option<RequestId> {
    // `u64::from_str` accepts a leading `+`
    if !segment.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    segment.parse().ok().filter(|&id| id > 0)
}
