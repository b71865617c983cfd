//! Mock API implementation directly using the `maintenance-store` crate
//!
//! Calls are routed exactly like the HTTP server routes them, but travel over
//! channels instead of sockets.

use std::sync::Arc;

use eyre::{eyre, Result};
use maintenance_core::{
    route, RawRequest, Reply, Request, RequestHandler, RequestMethod, Route,
};
use maintenance_store::{RequestStore, Service};
use tokio::sync::oneshot;
use tokio::task::{self, JoinHandle};

use super::{Api, RequestMsg};

pub struct MockService {
    service: Arc<Service>,
    join_handles: Vec<JoinHandle<()>>,
}

struct MockRawRequest {
    method: RequestMethod,
    url: String,
    body: Option<Vec<u8>>,
    response_channel: oneshot::Sender<Reply>,
}

pub async fn start(threads: u16, config: maintenance_core::Config) -> Result<(MockService, Api)> {
    let service = Arc::new(task::spawn_blocking(move || maintenance_store::launch(&config)).await?);

    let it = (0..threads).map(|_| {
        let (sender, receiver) = flume::bounded::<RequestMsg>(65536);
        let service = service.clone();
        let handle = task::spawn_blocking(move || {
            let service = &*service;
            for msg in receiver.into_iter() {
                let raw = Box::new(MockRawRequest {
                    method: msg.method,
                    url: msg.url,
                    body: Some(msg.body),
                    response_channel: msg.response_channel,
                });
                match route(raw.method, &raw.url) {
                    Route::Preflight => raw.respond(Reply::preflight()),
                    Route::Reject(err) => raw.respond(Reply::error(&err)),
                    Route::Dispatch(kind) => service.handle(Request::from_raw(kind, raw)),
                }
            }
        });
        (sender, handle)
    });
    let (senders, join_handles) = it.unzip();

    let mock_service = MockService {
        service,
        join_handles,
    };
    Ok((mock_service, Api::new(senders)))
}

impl MockService {
    pub fn store(&self) -> &RequestStore {
        self.service.store()
    }

    pub async fn shutdown(self) -> Result<()> {
        for handle in self.join_handles {
            handle.await?;
        }
        let service = Arc::into_inner(self.service)
            .ok_or_else(|| eyre!("service still referenced after all workers finished"))?;
        task::spawn_blocking(move || service.shutdown()).await?;
        Ok(())
    }
}

impl RawRequest for MockRawRequest {
    fn url(&self) -> &str {
        &self.url
    }

    fn method(&self) -> RequestMethod {
        self.method
    }

    fn read_bytes(&mut self) -> std::io::Result<Vec<u8>> {
        Ok(self.body.take().unwrap_or_default())
    }

    fn respond(self: Box<Self>, reply: Reply) {
        // The test may have given up on the answer already.
        let _ = self.response_channel.send(reply);
    }
}
