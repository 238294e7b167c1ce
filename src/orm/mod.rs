//! Index & Frame Entities
//!
//! Typed descriptions of the server-side schema and the leaf queries they produce.
//!
//! ## Submodules
//! - **`index`**: `Index` and the index-scoped query helpers (`union`, `count`, `batch`, ...).
//! - **`frame`**: `Frame` and row-level leaf queries (`bitmap`, `set_bit`, `top_n`, ...).
//! - **`attributes`**: Typed attribute dictionaries and their rendering into query text.
//! - **`validator`**: Name and label validation, run before anything reaches the network.
//! - **`types`**: Time quantum and cache type enumerations.

pub mod attributes;
pub mod frame;
pub mod index;
pub mod types;
pub mod validator;

pub use attributes::{AttributeValue, Attributes};
pub use frame::{Frame, FrameOptions};
pub use index::{Index, IndexOptions};
pub use types::{CacheType, TimeQuantum};
