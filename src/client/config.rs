use crate::cluster::Endpoint;
use crate::error::{Error, Result};

/// Comma-separated host addresses, e.g. `http://node1:10101,node2`.
pub const ENV_HOSTS: &str = "PILOSA_HOSTS";
/// Worker threads of the blocking client's runtime.
pub const ENV_WORKER_THREADS: &str = "PILOSA_WORKER_THREADS";

pub const DEFAULT_USER_AGENT: &str = concat!("pilosa-client-rust/", env!("CARGO_PKG_VERSION"));
pub const DEFAULT_WORKER_THREADS: usize = 2;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Candidate hosts in preference order.
    pub hosts: Vec<Endpoint>,
    pub user_agent: String,
    /// Size of the dedicated runtime used by `BlockingClient`.
    pub worker_threads: usize,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            hosts: vec![Endpoint::default()],
            user_agent: DEFAULT_USER_AGENT.to_string(),
            worker_threads: DEFAULT_WORKER_THREADS,
        }
    }
}

impl ClientConfig {
    pub fn with_hosts(hosts: Vec<Endpoint>) -> Self {
        Self {
            hosts,
            ..Self::default()
        }
    }

    /// Reads `PILOSA_HOSTS` and `PILOSA_WORKER_THREADS`, keeping defaults for unset variables.
    pub fn from_env() -> Result<Self> {
        Self::from_vars(|key| std::env::var(key).ok())
    }

    pub(crate) fn from_vars(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut config = Self::default();

        if let Some(list) = lookup(ENV_HOSTS)
            && !list.trim().is_empty()
        {
            config.hosts = parse_hosts(&list)?;
        }

        if let Some(threads) = lookup(ENV_WORKER_THREADS) {
            config.worker_threads = threads
                .trim()
                .parse::<usize>()
                .ok()
                .filter(|n| *n > 0)
                .ok_or_else(|| {
                    Error::Validation(format!("Invalid {} value {}", ENV_WORKER_THREADS, threads))
                })?;
        }

        Ok(config)
    }
}

/// Parses a comma-separated list of host addresses, skipping empty entries.
pub fn parse_hosts(list: &str) -> Result<Vec<Endpoint>> {
    list.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(Endpoint::parse)
        .collect()
}
