use super::endpoint::Endpoint;
use crate::error::{Error, Result};
use tokio::sync::RwLock;

struct HostState {
    hosts: Vec<Endpoint>,
    current: usize,
}

/// Ordered candidate hosts with one current selection.
///
/// Hosts only leave the set through eviction and only join it through [`HostSet::add`].
/// `current` always indexes into `hosts` while the set is non-empty.
pub struct HostSet {
    state: RwLock<HostState>,
}

impl HostSet {
    pub fn new(hosts: Vec<Endpoint>) -> Self {
        let mut unique: Vec<Endpoint> = Vec::with_capacity(hosts.len());
        for host in hosts {
            if !unique.contains(&host) {
                unique.push(host);
            }
        }

        Self {
            state: RwLock::new(HostState {
                hosts: unique,
                current: 0,
            }),
        }
    }

    /// The host the next request will be sent to.
    pub async fn current(&self) -> Option<Endpoint> {
        let state = self.state.read().await;
        state.hosts.get(state.current).cloned()
    }

    pub async fn hosts(&self) -> Vec<Endpoint> {
        self.state.read().await.hosts.clone()
    }

    pub async fn len(&self) -> usize {
        self.state.read().await.hosts.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.state.read().await.hosts.is_empty()
    }

    /// Adds a host unless it is already present. Returns whether it was added.
    pub async fn add(&self, endpoint: Endpoint) -> bool {
        let mut state = self.state.write().await;
        if state.hosts.contains(&endpoint) {
            return false;
        }
        state.hosts.push(endpoint);
        true
    }

    /// Evicts `endpoint`. Removing an absent host is a no-op.
    ///
    /// Fails with [`Error::NoHosts`] when the set is empty afterwards.
    pub async fn remove(&self, endpoint: &Endpoint) -> Result<()> {
        let mut state = self.state.write().await;

        if let Some(position) = state.hosts.iter().position(|h| h == endpoint) {
            state.hosts.remove(position);
            if position < state.current {
                state.current -= 1;
            }
            if state.current >= state.hosts.len() {
                state.current = 0;
            }
        }

        if state.hosts.is_empty() {
            return Err(Error::NoHosts);
        }
        Ok(())
    }
}
