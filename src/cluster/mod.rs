//! Cluster Dispatch Module
//!
//! Sends each request to exactly one host of the cluster and heals the host list
//! when a host stops accepting connections.
//!
//! ## Core Concepts
//! - **Endpoint**: A `scheme://host:port` server address.
//! - **HostSet**: The ordered candidate hosts with one current selection, guarded by a lock.
//! - **Resource**: A URL on the selected host paired with the parser for its response.
//! - **Transport**: The seam to the network; `HttpTransport` is the reqwest-backed implementation.
//! - **Dispatcher**: Resolves a resource against the current host, sends it, and evicts that host
//!   when the transport reports it unreachable. The failing call still reports its own error;
//!   only later calls see the shrunken host set. No call is ever retried.

pub mod dispatcher;
pub mod endpoint;
pub mod host_set;
pub mod resource;
pub mod transport;

pub use dispatcher::Dispatcher;
pub use endpoint::Endpoint;
pub use host_set::HostSet;
pub use resource::Resource;
pub use transport::{HttpMethod, HttpTransport, RawRequest, RawResponse, Transport};

#[cfg(test)]
pub(crate) mod mock;
