//! Uniform envelope for every response

use serde::Serialize;
use tracing::error;

use crate::error::ApiError;

/// Content type declared by every response, including empty ones
pub const CONTENT_TYPE: (&str, &str) = ("Content-Type", "application/json");

/// Cross-origin headers attached to every response
pub const CORS_HEADERS: [(&str, &str); 3] = [
    ("Access-Control-Allow-Origin", "*"),
    (
        "Access-Control-Allow-Methods",
        "POST, GET, OPTIONS, PUT, DELETE",
    ),
    (
        "Access-Control-Allow-Headers",
        "Accept, Content-Type, Content-Length, Accept-Encoding, X-CSRF-Token, Authorization",
    ),
];

#[derive(Serialize)]
struct ErrorBody<'a> {
    error: &'a str,
}

/// A formatted response, ready to be written by the transport
///
/// The headers are not part of the reply: they are the same for every
/// response ([`CONTENT_TYPE`] and [`CORS_HEADERS`]).
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Reply {
    /// HTTP status code
    pub status: u16,
    /// Body bytes, empty for 204 and preflight answers
    pub body: Vec<u8>,
}

impl Reply {
    /// Serialize `value` as the body
    pub fn json<T: Serialize + ?Sized>(status: u16, value: &T) -> Self {
        match serde_json::to_vec(value) {
            Ok(body) => Self { status, body },
            Err(err) => {
                error!("could not serialize response body: {err}");
                let err = ApiError::Internal;
                Self {
                    status: err.status_code(),
                    body: format!(r#"{{"error":"{err}"}}"#).into_bytes(),
                }
            }
        }
    }

    /// A reply without body
    pub fn empty(status: u16) -> Self {
        Self {
            status,
            body: Vec::new(),
        }
    }

    /// The `{"error": ...}` reply for `err`
    pub fn error(err: &ApiError) -> Self {
        let message = err.to_string();
        Self::json(err.status_code(), &ErrorBody { error: &message })
    }

    /// Answer to a cross-origin preflight request
    pub fn preflight() -> Self {
        Self::empty(200)
    }
}
