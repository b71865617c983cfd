use std::sync::Arc;

use eyre::{eyre, Result};
use flume::Sender;
use maintenance_core::{MaintenanceRequest, Reply, RequestId, RequestMethod};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::sync::oneshot;

pub mod mock;

#[derive(Debug, Error)]
#[error("Error {status}: {message}")]
pub struct ApiError {
    pub status: u16,
    pub message: String,
}

pub type ApiResult<T> = std::result::Result<T, ApiError>;

#[derive(Deserialize)]
struct ErrorBody {
    error: String,
}

struct RequestMsg {
    method: RequestMethod,
    url: String,
    body: Vec<u8>,
    response_channel: oneshot::Sender<Reply>,
}

pub struct Api {
    /// One channel per worker thread
    channels: Arc<Vec<Sender<RequestMsg>>>,

    my_channel: Sender<RequestMsg>,
    my_index: usize,
}

impl Api {
    fn new(channels: Vec<Sender<RequestMsg>>) -> Self {
        let my_channel = channels[0].clone();
        Self {
            channels: Arc::new(channels),
            my_channel,
            my_index: 0,
        }
    }
}

impl Clone for Api {
    fn clone(&self) -> Self {
        let my_index = (self.my_index + 1) % self.channels.len();
        Self {
            channels: self.channels.clone(),
            my_channel: self.channels[my_index].clone(),
            my_index,
        }
    }
}

impl Api {
    /// Send an arbitrary call and return the raw reply
    pub async fn send(
        &self,
        method: RequestMethod,
        url: impl Into<String>,
        body: Vec<u8>,
    ) -> Result<Reply> {
        let (sender, receiver) = oneshot::channel();
        let msg = RequestMsg {
            method,
            url: url.into(),
            body,
            response_channel: sender,
        };
        self.my_channel.send_async(msg).await?;
        Ok(receiver.await?)
    }

    async fn call<T: DeserializeOwned>(
        &self,
        method: RequestMethod,
        url: impl Into<String>,
        body: Vec<u8>,
    ) -> Result<ApiResponse<T>> {
        ApiResponse::decode(self.send(method, url, body).await?)
    }

    pub async fn list_requests(&self) -> Result<ApiResponse<Vec<MaintenanceRequest>>> {
        self.call(RequestMethod::Get, "/requests", Vec::new()).await
    }

    /// Create a request; `payload` may be any JSON value
    pub async fn create_request<P: Serialize + ?Sized>(
        &self,
        payload: &P,
    ) -> Result<ApiResponse<MaintenanceRequest>> {
        let body = serde_json::to_vec(payload)?;
        self.call(RequestMethod::Post, "/requests", body).await
    }

    pub async fn get_request(&self, id: RequestId) -> Result<ApiResponse<MaintenanceRequest>> {
        self.call(RequestMethod::Get, format!("/requests/{id}"), Vec::new())
            .await
    }

    /// Update a request; `payload` may be any JSON value
    pub async fn update_request<P: Serialize + ?Sized>(
        &self,
        id: RequestId,
        payload: &P,
    ) -> Result<ApiResponse<MaintenanceRequest>> {
        let body = serde_json::to_vec(payload)?;
        self.call(RequestMethod::Put, format!("/requests/{id}"), body)
            .await
    }

    pub async fn delete_request(&self, id: RequestId) -> Result<ApiResponse<()>> {
        self.call(RequestMethod::Delete, format!("/requests/{id}"), Vec::new())
            .await
    }
}

pub struct ApiResponse<T> {
    pub status: u16,
    /// Raw response body
    pub body: Vec<u8>,
    pub result: ApiResult<T>,
}

impl<T: DeserializeOwned> ApiResponse<T> {
    fn decode(reply: Reply) -> Result<Self> {
        let result = match reply.status {
            200..=299 => {
                // An empty body stands for the unit value.
                let body: &[u8] = if reply.body.is_empty() {
                    b"null"
                } else {
                    &reply.body
                };
                Ok(serde_json::from_slice(body)?)
            }
            status => {
                let ErrorBody { error } = serde_json::from_slice(&reply.body)
                    .map_err(|err| eyre!("error reply without error envelope: {err}"))?;
                Err(ApiError {
                    status,
                    message: error,
                })
            }
        };
        Ok(ApiResponse {
            status: reply.status,
            body: reply.body,
            result,
        })
    }
}
