use std::io;

use serde::Serialize;

use crate::error::ApiError;
use crate::model::{MaintenanceRequest, RequestId, RequestPayload};
use crate::response::Reply;

/// Operation requested by a client, as determined by the router
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub enum RequestKind {
    /// `GET /requests`: list all requests, newest first
    ListRequests,
    /// `POST /requests`: create a request from the payload
    CreateRequest,
    /// `GET /requests/{id}`: fetch one request
    GetRequest(RequestId),
    /// `PUT /requests/{id}`: replace the mutable fields of a request
    UpdateRequest(RequestId),
    /// `DELETE /requests/{id}`: remove a request permanently
    DeleteRequest(RequestId),
}

impl RequestKind {
    /// Whether the operation carries a JSON payload
    pub fn has_payload(&self) -> bool {
        matches!(self, Self::CreateRequest | Self::UpdateRequest(_))
    }
}

/// HTTP request method
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub enum RequestMethod {
    /// GET request
    Get,
    /// POST request, has a payload
    Post,
    /// PUT request, has a payload
    Put,
    /// DELETE request
    Delete,
    /// OPTIONS request, sent by browsers as cross-origin preflight
    Options,
    /// Any method the service does not know about
    Other,
}

/// Request sent from a web browser, already routed to an operation
pub struct Request {
    kind: RequestKind,
    raw: Box<dyn RawRequest + Send>,
}

impl std::fmt::Debug for Request {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Request")
            .field("kind", &self.kind)
            .field("raw", &format_args!(".."))
            .finish()
    }
}

/// Interface for handling requests from a web browser
pub trait RequestHandler {
    /// Handle a request from a web browser
    ///
    /// This method may be called concurrently from different threads.
    fn handle(&self, request: Request);

    /// Shut the service down
    fn shutdown(self);
}

/// A raw request, implemented by the transport (the HTTP server or a test
/// harness)
pub trait RawRequest {
    /// Get the URL
    fn url(&self) -> &str;
    /// Get the request method
    fn method(&self) -> RequestMethod;

    /// Read the request body as bytes
    fn read_bytes(&mut self) -> io::Result<Vec<u8>>;

    /// Send `reply` together with the headers every response carries
    fn respond(self: Box<Self>, reply: Reply);
}

impl Request {
    /// Get the request's kind
    #[inline]
    pub fn kind(&self) -> &RequestKind {
        &self.kind
    }

    /// Get the request URL
    #[inline]
    pub fn url(&self) -> &str {
        self.raw.url()
    }

    /// Get the request method
    #[inline]
    pub fn method(&self) -> RequestMethod {
        self.raw.method()
    }

    /// Read and decode the JSON payload of a create or update call
    ///
    /// A body that cannot be read or is not a JSON object yields
    /// [`ApiError::INVALID_BODY`]. This method has side effects and should be
    /// called only once per request.
    pub fn read_payload(&mut self) -> Result<RequestPayload, ApiError> {
        let bytes = self.raw.read_bytes().map_err(|_| ApiError::INVALID_BODY)?;
        serde_json::from_slice(&bytes).map_err(|_| ApiError::INVALID_BODY)
    }

    /// Respond with a single maintenance request
    #[inline]
    pub fn respond_with_request(self, status: u16, request: &MaintenanceRequest) {
        self.respond_with_json(status, request);
    }

    /// Respond with a list of maintenance requests (status 200)
    #[inline]
    pub fn respond_with_list(self, requests: &[MaintenanceRequest]) {
        self.respond_with_json(200, requests);
    }

    /// Respond with 204 and an empty body
    #[inline]
    pub fn respond_with_no_content(self) {
        self.respond(Reply::empty(204));
    }

    /// Respond with the error envelope for `err`
    #[inline]
    pub fn respond_with_err(self, err: &ApiError) {
        self.respond(Reply::error(err));
    }

    /// Respond with any serializable value
    #[inline]
    pub fn respond_with_json<T: Serialize + ?Sized>(self, status: u16, value: &T) {
        self.respond(Reply::json(status, value));
    }

    /// Send a preformatted reply
    ///
    /// This method blocks until the response has been sent.
    #[inline]
    pub fn respond(self, reply: Reply) {
        self.raw.respond(reply);
    }

    /// Create a new request from a [`RawRequest`] that has been routed to
    /// `kind`
    #[inline]
    pub fn from_raw(kind: RequestKind, raw: Box<dyn RawRequest + Send>) -> Self {
        Self { kind, raw }
    }
}
