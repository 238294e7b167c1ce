//! Query Composition Module
//!
//! Builds boolean set-algebra expressions over frame rows without needless nesting.
//!
//! ## Core Concepts
//! - **Query**: An immutable leaf holding a textual expression scoped to one index.
//! - **QueryBuilder**: A single Union / Intersect / Difference node accumulating child queries.
//! - **Merging**: `union`, `intersect` and `difference` accept either operand type on either side.
//!   Matching operations are flattened (`Union(a, b, c)`), mismatched ones are wrapped exactly once
//!   (`Intersect(Union(a, b), c)`). Difference keeps its base set as the leftmost child.
//! - **Batching**: `BatchQuery` ships several independent queries in one request.
//!
//! Queries never span indexes; merging operands of two different indexes panics.

pub mod batch;
pub mod builder;
pub mod types;

pub use batch::BatchQuery;
pub use builder::{Operand, QueryBuilder};
pub use types::{Operation, Query};
