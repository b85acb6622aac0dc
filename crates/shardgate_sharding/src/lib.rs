//! Sharding rule model: data nodes, per-table rules, and the mapping from
//! physical table names back to logical ones.
//!
//! Rule *evaluation* (deciding which shard a statement routes to) belongs
//! to the routing engine, not this crate. What lives here is the static
//! rule configuration and the reverse lookup the header resolver needs.

pub mod data_node;
pub mod rule;

pub use data_node::DataNode;
pub use rule::{ShardingRule, TableRule};
