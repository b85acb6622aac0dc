use std::fmt;

use serde::{Deserialize, Serialize};
use shardgate_common::error::ShardingError;

/// One physical table on one physical data source, written
/// `<data_source>.<table>` in configuration (e.g. "ds_0.t_order_0").
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataNode {
    pub data_source: String,
    pub table: String,
}

impl DataNode {
    /// Parse the `<data_source>.<table>` form. Exactly one separator, both
    /// halves non-empty.
    pub fn parse(expr: &str) -> Result<Self, ShardingError> {
        let malformed = || ShardingError::MalformedDataNode(expr.to_string());
        let mut parts = expr.split('.');
        let (data_source, table) = match (parts.next(), parts.next(), parts.next()) {
            (Some(ds), Some(table), None) => (ds, table),
            _ => return Err(malformed()),
        };
        if data_source.is_empty() || table.is_empty() {
            return Err(malformed());
        }
        Ok(Self {
            data_source: data_source.to_string(),
            table: table.to_string(),
        })
    }
}

impl fmt::Display for DataNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.data_source, self.table)
    }
}
