use super::config::ClientConfig;
use super::protocol::{
    self, ENDPOINT_STATUS, QueryRequest, QueryResponseMessage, frame_path, index_path, query_path,
    time_quantum_path,
};
use super::response::QueryResponse;
use crate::cluster::{Dispatcher, Endpoint, HostSet, HttpMethod, HttpTransport, Resource, Transport};
use crate::error::{Error, Result};
use crate::orm::{Frame, Index, TimeQuantum};
use crate::query::Query;
use std::sync::Arc;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct QueryOptions {
    /// Return column attributes with the results.
    pub columns: bool,
    pub time_quantum: TimeQuantum,
}

/// Async client for a cluster of bitmap index servers.
///
/// Cloning is cheap; clones share the same host set, so an eviction seen by one
/// clone applies to all of them.
#[derive(Clone)]
pub struct Client {
    dispatcher: Arc<Dispatcher>,
}

impl Client {
    pub fn new(config: ClientConfig) -> Result<Self> {
        let transport = HttpTransport::new(&config.user_agent)?;
        Ok(Self::with_transport(config.hosts, Arc::new(transport)))
    }

    /// Client for a single host.
    pub fn connect(address: &str) -> Result<Self> {
        Self::new(ClientConfig::with_hosts(vec![Endpoint::parse(address)?]))
    }

    pub fn with_transport(hosts: Vec<Endpoint>, transport: Arc<dyn Transport>) -> Self {
        tracing::info!("Client created with {} host(s)", hosts.len());
        let hosts = Arc::new(HostSet::new(hosts));
        Self {
            dispatcher: Arc::new(Dispatcher::new(hosts, transport)),
        }
    }

    pub fn hosts(&self) -> &Arc<HostSet> {
        self.dispatcher.hosts()
    }

    /// Raw status document of the current host.
    pub async fn status(&self) -> Result<String> {
        self.dispatcher
            .request(
                HttpMethod::Get,
                |endpoint| {
                    Resource::new(endpoint.url(ENDPOINT_STATUS), |response| {
                        String::from_utf8(response.body.clone()).map_err(|e| Error::DecodeFailed {
                            status: response.status,
                            reason: e.to_string(),
                        })
                    })
                },
                None,
            )
            .await
    }

    /// Creates the index, then sets its time quantum when it has one.
    pub async fn create_index(&self, index: &Index) -> Result<()> {
        let path = index_path(index.name());
        let payload = protocol::encode_json(&index.options_json())?;
        self.dispatcher
            .request(
                HttpMethod::Post,
                |endpoint| Resource::reference(endpoint.url(&path)),
                Some(payload),
            )
            .await?;

        if index.time_quantum().is_none() {
            return Ok(());
        }

        let path = time_quantum_path(index.name());
        let payload = protocol::encode_json(&index.time_quantum_json())?;
        self.dispatcher
            .request(
                HttpMethod::Patch,
                |endpoint| Resource::reference(endpoint.url(&path)),
                Some(payload),
            )
            .await
    }

    /// Creates the index unless it already exists.
    pub async fn ensure_index(&self, index: &Index) -> Result<()> {
        match self.create_index(index).await {
            Err(Error::IndexAlreadyExists) => {
                tracing::debug!("Index {} already exists", index.name());
                Ok(())
            }
            other => other,
        }
    }

    pub async fn delete_index(&self, index: &Index) -> Result<()> {
        let path = index_path(index.name());
        self.dispatcher
            .request(
                HttpMethod::Delete,
                |endpoint| Resource::reference(endpoint.url(&path)),
                None,
            )
            .await
    }

    pub async fn create_frame(&self, frame: &Frame) -> Result<()> {
        let path = frame_path(frame.index().name(), frame.name());
        let payload = protocol::encode_json(&frame.options_json())?;
        self.dispatcher
            .request(
                HttpMethod::Post,
                |endpoint| Resource::reference(endpoint.url(&path)),
                Some(payload),
            )
            .await
    }

    /// Creates the frame unless it already exists.
    pub async fn ensure_frame(&self, frame: &Frame) -> Result<()> {
        match self.create_frame(frame).await {
            Err(Error::FrameAlreadyExists) => {
                tracing::debug!("Frame {} already exists", frame.name());
                Ok(())
            }
            other => other,
        }
    }

    pub async fn delete_frame(&self, frame: &Frame) -> Result<()> {
        let path = frame_path(frame.index().name(), frame.name());
        self.dispatcher
            .request(
                HttpMethod::Delete,
                |endpoint| Resource::reference(endpoint.url(&path)),
                None,
            )
            .await
    }

    /// Runs a query (or a builder, which is finalized first) against its index.
    pub async fn query(
        &self,
        query: impl Into<Query>,
        options: QueryOptions,
    ) -> Result<QueryResponse> {
        let query = query.into();
        let request = QueryRequest {
            query: query.serialize().to_string(),
            column_attrs: options.columns,
            quantum: options.time_quantum.as_str().to_string(),
        };
        let payload = protocol::encode(&request)?;
        let path = query_path(query.index());

        self.dispatcher
            .request(
                HttpMethod::Post,
                |endpoint| {
                    Resource::new(endpoint.url(&path), |response| {
                        let message: QueryResponseMessage =
                            protocol::decode(response.status, &response.body)?;
                        QueryResponse::try_from(message)
                    })
                },
                Some(payload),
            )
            .await
    }
}
