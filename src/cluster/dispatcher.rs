use super::endpoint::Endpoint;
use super::host_set::HostSet;
use super::resource::Resource;
use super::transport::{HttpMethod, RawRequest, Transport};
use crate::error::{Error, Result};
use std::sync::Arc;

/// Issues one request at a time against the currently selected host.
pub struct Dispatcher {
    hosts: Arc<HostSet>,
    transport: Arc<dyn Transport>,
}

impl Dispatcher {
    pub fn new(hosts: Arc<HostSet>, transport: Arc<dyn Transport>) -> Self {
        Self { hosts, transport }
    }

    pub fn hosts(&self) -> &Arc<HostSet> {
        &self.hosts
    }

    /// Resolves a resource against the current host, sends it and parses the outcome.
    ///
    /// # Flow
    /// 1. Fails with [`Error::NoHosts`] before any network activity if the host set is empty.
    /// 2. Sends the request through the transport and waits for it to complete.
    /// 3. Non-2xx responses become server errors; 2xx bodies go through the resource's parser.
    /// 4. On a host-unreachable failure the host is evicted, and this call still returns
    ///    that failure, unless the eviction emptied the set, in which case it returns `NoHosts`.
    pub async fn request<T, F>(
        &self,
        method: HttpMethod,
        resource_for: F,
        payload: Option<Vec<u8>>,
    ) -> Result<T>
    where
        F: FnOnce(&Endpoint) -> Resource<T>,
    {
        let endpoint = self.hosts.current().await.ok_or(Error::NoHosts)?;
        let resource = resource_for(&endpoint);

        let outcome = self.execute(method, resource, payload).await;

        if let Err(err) = &outcome
            && err.is_host_unreachable()
        {
            tracing::warn!("Evicting unreachable host {}: {}", endpoint, err);
            if let Err(exhausted) = self.hosts.remove(&endpoint).await {
                tracing::error!("Last host {} evicted, cluster has no hosts left", endpoint);
                return Err(exhausted);
            }
        }

        outcome
    }

    async fn execute<T>(
        &self,
        method: HttpMethod,
        resource: Resource<T>,
        payload: Option<Vec<u8>>,
    ) -> Result<T> {
        tracing::debug!("{} {}", method, resource.url());

        let request = RawRequest {
            method,
            url: resource.url().to_string(),
            body: payload,
        };
        let response = self.transport.send(request).await?;

        if !response.is_success() {
            let status = response.status;
            return Err(match String::from_utf8(response.body) {
                Ok(body) => Error::from_status(status, &body),
                Err(e) => Error::DecodeFailed {
                    status,
                    reason: e.to_string(),
                },
            });
        }

        resource.parse(&response)
    }
}
