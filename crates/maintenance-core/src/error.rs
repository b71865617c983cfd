use thiserror::Error;

/// Errors that end a request before it produced a result
///
/// Every variant maps to exactly one HTTP status code and one message, which
/// is sent to the client as `{"error": "<message>"}`.
#[derive(Clone, PartialEq, Eq, Debug, Error)]
pub enum ApiError {
    /// A required field is missing or blank
    #[error("Asset and description are required")]
    Validation,
    /// The body or the path could not be decoded
    #[error("{0}")]
    Parse(&'static str),
    /// No request with the given id exists
    #[error("Request not found")]
    NotFound,
    /// The endpoint exists but does not support the method
    #[error("Method not allowed")]
    MethodNotAllowed,
    /// Nothing is served under the path
    #[error("Not found")]
    RouteNotFound,
    /// The result could not be encoded
    #[error("Internal server error")]
    Internal,
}

/// Result of an operation on the request store
pub type ApiResult<T> = Result<T, ApiError>;

impl ApiError {
    /// Message for a body that is not a request payload
    pub const INVALID_BODY: Self = Self::Parse("Invalid request body");
    /// Message for a path whose id segment is not a positive integer
    pub const INVALID_ID: Self = Self::Parse("Invalid request ID");

    /// HTTP status code for this error
    pub fn status_code(&self) -> u16 {
        match self {
            ApiError::Validation | ApiError::Parse(_) => 400,
            ApiError::NotFound | ApiError::RouteNotFound => 404,
            ApiError::MethodNotAllowed => 405,
            ApiError::Internal => 500,
        }
    }
}
