//! Blocking Client
//!
//! Each call is spawned onto a runtime owned by the client, and the calling thread waits
//! on a single-slot channel until the worker reports the outcome. The runtime is sized by
//! `ClientConfig::worker_threads` so blocked callers never occupy a scheduler thread of
//! some other runtime.
//!
//! Do not use a `BlockingClient` from inside an async context; use [`Client`] there.

use super::client::{Client, QueryOptions};
use super::config::ClientConfig;
use super::response::QueryResponse;
use crate::cluster::HostSet;
use crate::error::{Error, Result};
use crate::orm::{Frame, Index};
use crate::query::Query;
use std::future::Future;
use std::sync::Arc;
use tokio::runtime::Runtime;
use tokio::sync::oneshot;

pub struct BlockingClient {
    client: Client,
    runtime: Runtime,
}

impl BlockingClient {
    pub fn new(config: ClientConfig) -> Result<Self> {
        let worker_threads = config.worker_threads;
        let client = Client::new(config)?;
        Self::with_client(client, worker_threads)
    }

    /// Client for a single host.
    pub fn connect(address: &str) -> Result<Self> {
        let client = Client::connect(address)?;
        Self::with_client(client, super::config::DEFAULT_WORKER_THREADS)
    }

    pub fn with_client(client: Client, worker_threads: usize) -> Result<Self> {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(worker_threads.max(1))
            .thread_name("pilosa-client")
            .enable_all()
            .build()?;
        Ok(Self { client, runtime })
    }

    /// The async client this wraps.
    pub fn client(&self) -> &Client {
        &self.client
    }

    pub fn hosts(&self) -> &Arc<HostSet> {
        self.client.hosts()
    }

    fn wait<T, Fut>(&self, future: Fut) -> Result<T>
    where
        Fut: Future<Output = Result<T>> + Send + 'static,
        T: Send + 'static,
    {
        let (tx, rx) = oneshot::channel();
        self.runtime.spawn(async move {
            let _ = tx.send(future.await);
        });
        rx.blocking_recv()
            .map_err(|_| Error::Other("request worker stopped before completing".to_string()))?
    }

    pub fn status(&self) -> Result<String> {
        let client = self.client.clone();
        self.wait(async move { client.status().await })
    }

    pub fn create_index(&self, index: &Index) -> Result<()> {
        let (client, index) = (self.client.clone(), index.clone());
        self.wait(async move { client.create_index(&index).await })
    }

    pub fn ensure_index(&self, index: &Index) -> Result<()> {
        let (client, index) = (self.client.clone(), index.clone());
        self.wait(async move { client.ensure_index(&index).await })
    }

    pub fn delete_index(&self, index: &Index) -> Result<()> {
        let (client, index) = (self.client.clone(), index.clone());
        self.wait(async move { client.delete_index(&index).await })
    }

    pub fn create_frame(&self, frame: &Frame) -> Result<()> {
        let (client, frame) = (self.client.clone(), frame.clone());
        self.wait(async move { client.create_frame(&frame).await })
    }

    pub fn ensure_frame(&self, frame: &Frame) -> Result<()> {
        let (client, frame) = (self.client.clone(), frame.clone());
        self.wait(async move { client.ensure_frame(&frame).await })
    }

    pub fn delete_frame(&self, frame: &Frame) -> Result<()> {
        let (client, frame) = (self.client.clone(), frame.clone());
        self.wait(async move { client.delete_frame(&frame).await })
    }

    pub fn query(&self, query: impl Into<Query>, options: QueryOptions) -> Result<QueryResponse> {
        let (client, query) = (self.client.clone(), query.into());
        self.wait(async move { client.query(query, options).await })
    }
}
