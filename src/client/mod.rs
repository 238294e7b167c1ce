//! Client Module
//!
//! The public entry point for talking to a bitmap index cluster.
//!
//! ## Submodules
//! - **`client`**: The async `Client`: schema management (indexes, frames) and query execution.
//! - **`blocking`**: `BlockingClient`, which runs the async client on its own runtime and lets
//!   ordinary threads wait for each call.
//! - **`config`**: `ClientConfig`, built from code or from environment variables.
//! - **`protocol`**: Endpoint paths and the binary request/response envelopes.
//! - **`response`**: Decoded query results handed back to callers.

pub mod blocking;
pub mod client;
pub mod config;
pub mod protocol;
pub mod response;

pub use blocking::BlockingClient;
pub use client::{Client, QueryOptions};
pub use config::ClientConfig;
pub use response::{BitmapResult, ColumnItem, CountResultItem, QueryResponse, QueryResult};

#[cfg(test)]
mod tests;
