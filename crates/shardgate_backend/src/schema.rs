//! The active logical schema and its construct-once, swap-on-reload holder.

use std::sync::Arc;

use parking_lot::RwLock;
use shardgate_common::config::ProxyConfig;
use shardgate_common::error::ProxyResult;
use shardgate_common::schema::{DataSourceMetaData, DataSourceMetas, SchemaMetaData, TableMetas};
use shardgate_sharding::ShardingRule;

/// One logical schema as clients see it: its name, the metadata registry,
/// and the sharding rule governing its tables. Immutable after assembly.
#[derive(Debug)]
pub struct LogicalSchema {
    name: String,
    meta_data: SchemaMetaData,
    sharding_rule: ShardingRule,
}

impl LogicalSchema {
    pub fn new(
        name: impl Into<String>,
        meta_data: SchemaMetaData,
        sharding_rule: ShardingRule,
    ) -> Self {
        Self {
            name: name.into(),
            meta_data,
            sharding_rule,
        }
    }

    /// Assemble from proxy configuration plus the table metadata the schema
    /// loader collected from the backing databases.
    pub fn from_config(config: &ProxyConfig, tables: TableMetas) -> ProxyResult<Self> {
        let mut data_sources = DataSourceMetas::new();
        for ds in &config.schema.data_sources {
            data_sources.add(ds.id.clone(), DataSourceMetaData::parse(&ds.url)?);
        }
        let sharding_rule = ShardingRule::build(&config.sharding, &data_sources)?;
        Ok(Self::new(
            config.schema.name.clone(),
            SchemaMetaData::new(tables, data_sources),
            sharding_rule,
        ))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn meta_data(&self) -> &SchemaMetaData {
        &self.meta_data
    }

    pub fn sharding_rule(&self) -> &ShardingRule {
        &self.sharding_rule
    }
}

/// Shares the current schema snapshot across all connections.
///
/// Readers take an `Arc` once per statement and hold it for that
/// statement's duration; a reload publishes a brand-new snapshot and never
/// mutates the one in-flight statements still hold.
#[derive(Debug)]
pub struct SchemaHolder {
    current: RwLock<Arc<LogicalSchema>>,
}

impl SchemaHolder {
    pub fn new(schema: LogicalSchema) -> Self {
        Self {
            current: RwLock::new(Arc::new(schema)),
        }
    }

    /// The current snapshot.
    pub fn current(&self) -> Arc<LogicalSchema> {
        self.current.read().clone()
    }

    /// Swap in a freshly loaded schema. Returns the retired snapshot, which
    /// stays alive until the last in-flight statement drops it.
    pub fn reload(&self, schema: LogicalSchema) -> Arc<LogicalSchema> {
        let fresh = Arc::new(schema);
        let retired = std::mem::replace(&mut *self.current.write(), fresh.clone());
        tracing::info!(
            schema = %fresh.name(),
            tables = fresh.meta_data().tables.table_count(),
            "logical schema metadata reloaded"
        );
        retired
    }
}
