//! Backend response metadata for the sharding proxy.
//!
//! Statement execution against a physical shard yields physical result
//! metadata; this crate reconstructs the logical column headers the client
//! must see, consulting the active logical schema's sharding rule and
//! metadata registry.

pub mod query_header;
pub mod schema;

pub use query_header::{resolve_headers, PhysicalColumnMeta, QueryHeader};
pub use schema::{LogicalSchema, SchemaHolder};
