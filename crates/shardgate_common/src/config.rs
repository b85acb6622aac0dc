//! Proxy configuration: logical schema identity, physical data sources,
//! and sharding table rules. Loaded from `shardgate.toml`.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, ProxyResult};

/// Top-level proxy configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProxyConfig {
    pub schema: SchemaConfig,
    #[serde(default)]
    pub sharding: ShardingConfig,
}

/// The logical schema presented to clients and the physical data sources
/// backing it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SchemaConfig {
    /// Logical schema name clients connect to.
    pub name: String,
    #[serde(default)]
    pub data_sources: Vec<DataSourceConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DataSourceConfig {
    /// Data source id referenced by data nodes (e.g. "ds_0").
    pub id: String,
    /// Connection info in `host:port/catalog` form.
    pub url: String,
}

/// Sharding rule section in shardgate.toml.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ShardingConfig {
    #[serde(default)]
    pub tables: Vec<TableRuleConfig>,
}

/// One logical table and the physical data nodes it is sharded across.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableRuleConfig {
    pub logic_table: String,
    /// Data nodes in `<data_source>.<table>` form (e.g. "ds_0.t_order_0").
    /// Order is significant: the first configured mapping wins when a
    /// physical table maps back to more than one logic table.
    pub actual_data_nodes: Vec<String>,
}

impl Default for ProxyConfig {
    fn default() -> Self {
        Self {
            schema: SchemaConfig {
                name: "logic_db".to_string(),
                data_sources: Vec::new(),
            },
            sharding: ShardingConfig::default(),
        }
    }
}

impl ProxyConfig {
    /// Parse and validate a TOML config document.
    pub fn from_toml_str(text: &str) -> ProxyResult<Self> {
        let config: ProxyConfig =
            toml::from_str(text).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a config file.
    pub fn load(path: impl AsRef<Path>) -> ProxyResult<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.schema.name.trim().is_empty() {
            return Err(ConfigError::MissingSchemaName);
        }
        for rule in &self.sharding.tables {
            if rule.actual_data_nodes.is_empty() {
                return Err(ConfigError::EmptyTableRule(rule.logic_table.clone()));
            }
        }
        Ok(())
    }
}
