//! Cluster-Aware Client for a Distributed Bitmap Index
//!
//! This library talks to a cluster of bitmap index servers over HTTP and composes the
//! textual queries those servers execute.
//!
//! ## Architecture Modules
//! The crate is split into four layers plus a shared error type:
//!
//! - **`query`**: The query algebra. Leaf queries combine through union, intersection and
//!   difference into flat n-ary expressions (`Union(a, b, c)` rather than nested pairs).
//! - **`orm`**: Indexes and frames. Validates names, renders leaf queries (`Bitmap`,
//!   `SetBit`, `TopN`, ...) and the JSON payloads used to create schema objects.
//! - **`cluster`**: Host addressing and request dispatch. Keeps the set of candidate hosts,
//!   sends each call to the current one and evicts hosts that cannot be reached.
//! - **`client`**: The public façade. An async `Client`, a `BlockingClient` for synchronous
//!   callers, configuration and response decoding.
//! - **`error`**: The `Error` enum shared by every layer.

pub mod client;
pub mod cluster;
pub mod error;
pub mod orm;
pub mod query;

pub use client::{BlockingClient, Client, ClientConfig, QueryOptions, QueryResponse};
pub use cluster::Endpoint;
pub use error::{Error, Result};
pub use orm::{AttributeValue, Attributes, Frame, FrameOptions, Index, IndexOptions, TimeQuantum};
pub use query::{BatchQuery, Operation, Query, QueryBuilder};
