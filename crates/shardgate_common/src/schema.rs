//! Logical schema metadata: column, table, and data-source descriptors.
//!
//! Built once per logical schema at load time, read-only thereafter, and
//! shared by all concurrent statement executions. A schema reload produces
//! a brand-new registry; nothing here is mutated in place once published.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::MetadataError;

/// One logical column definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnMetaData {
    pub name: String,
    /// Declared type as reported by the backing database (e.g. "int").
    pub data_type: String,
    pub primary_key: bool,
}

impl ColumnMetaData {
    pub fn new(name: impl Into<String>, data_type: impl Into<String>, primary_key: bool) -> Self {
        Self {
            name: name.into(),
            data_type: data_type.into(),
            primary_key,
        }
    }
}

/// Column layout and key information for one logical table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableMetaData {
    columns: Vec<ColumnMetaData>,
    primary_key_columns: Vec<String>,
}

impl TableMetaData {
    /// Every primary-key name must refer to a declared column.
    pub fn new(
        table: &str,
        columns: Vec<ColumnMetaData>,
        primary_key_columns: Vec<String>,
    ) -> Result<Self, MetadataError> {
        for pk in &primary_key_columns {
            if !columns.iter().any(|c| c.name.eq_ignore_ascii_case(pk)) {
                return Err(MetadataError::UnknownPrimaryKeyColumn {
                    table: table.to_string(),
                    column: pk.clone(),
                });
            }
        }
        Ok(Self {
            columns,
            primary_key_columns,
        })
    }

    /// Columns in declaration order.
    pub fn columns(&self) -> &[ColumnMetaData] {
        &self.columns
    }

    pub fn primary_key_columns(&self) -> &[String] {
        &self.primary_key_columns
    }

    /// Find a column by name (case-insensitive).
    pub fn find_column(&self, name: &str) -> Option<&ColumnMetaData> {
        self.columns.iter().find(|c| c.name.eq_ignore_ascii_case(name))
    }

    /// Whether the named column is part of the table's primary key
    /// (case-insensitive).
    pub fn is_primary_key(&self, column_name: &str) -> bool {
        self.primary_key_columns
            .iter()
            .any(|pk| pk.eq_ignore_ascii_case(column_name))
    }
}

/// All logical tables of one schema, keyed by lowercase logic table name.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TableMetas {
    tables: HashMap<String, TableMetaData>,
}

impl TableMetas {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_table(
        &mut self,
        logic_table: impl Into<String>,
        meta: TableMetaData,
    ) -> Result<(), MetadataError> {
        let name = logic_table.into();
        let key = name.to_lowercase();
        if self.tables.contains_key(&key) {
            return Err(MetadataError::DuplicateTable(name));
        }
        self.tables.insert(key, meta);
        Ok(())
    }

    pub fn get(&self, logic_table: &str) -> Option<&TableMetaData> {
        self.tables.get(&logic_table.to_lowercase())
    }

    pub fn contains_table(&self, logic_table: &str) -> bool {
        self.tables.contains_key(&logic_table.to_lowercase())
    }

    pub fn contains_column(&self, logic_table: &str, column: &str) -> bool {
        self.get(logic_table)
            .map(|t| t.find_column(column).is_some())
            .unwrap_or(false)
    }

    pub fn table_count(&self) -> usize {
        self.tables.len()
    }

    /// Registered logic table names (lowercased keys, arbitrary order).
    pub fn table_names(&self) -> impl Iterator<Item = &str> {
        self.tables.keys().map(|k| k.as_str())
    }
}

/// Connection-level metadata for one physical data source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataSourceMetaData {
    pub host: String,
    pub port: u16,
    /// Physical catalog/database name on that instance.
    pub catalog: String,
}

impl DataSourceMetaData {
    /// Parse the `host:port/catalog` form used in proxy configuration,
    /// e.g. `"127.0.0.1:3306/demo_ds_0"`.
    pub fn parse(url: &str) -> Result<Self, MetadataError> {
        let invalid = || MetadataError::InvalidDataSourceUrl(url.to_string());
        let (addr, catalog) = url.split_once('/').ok_or_else(invalid)?;
        let (host, port) = addr.split_once(':').ok_or_else(invalid)?;
        if host.is_empty() || catalog.is_empty() {
            return Err(invalid());
        }
        let port: u16 = port.parse().map_err(|_| invalid())?;
        Ok(Self {
            host: host.to_string(),
            port,
            catalog: catalog.to_string(),
        })
    }
}

/// All physical data sources backing one schema, keyed by data source id.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DataSourceMetas {
    data_sources: HashMap<String, DataSourceMetaData>,
}

impl DataSourceMetas {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, id: impl Into<String>, meta: DataSourceMetaData) {
        self.data_sources.insert(id.into(), meta);
    }

    pub fn get(&self, id: &str) -> Option<&DataSourceMetaData> {
        self.data_sources.get(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.data_sources.contains_key(id)
    }

    /// All data source ids, sorted for deterministic iteration.
    pub fn all_instance_ids(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = self.data_sources.keys().map(|k| k.as_str()).collect();
        ids.sort_unstable();
        ids
    }

    pub fn len(&self) -> usize {
        self.data_sources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data_sources.is_empty()
    }
}

/// The full metadata registry handed to the header resolver: table layouts
/// plus data-source connection info. Shared via `Arc`, never mutated after
/// construction.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SchemaMetaData {
    pub tables: TableMetas,
    pub data_sources: DataSourceMetas,
}

impl SchemaMetaData {
    pub fn new(tables: TableMetas, data_sources: DataSourceMetas) -> Self {
        Self {
            tables,
            data_sources,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn order_table() -> TableMetaData {
        TableMetaData::new(
            "t_logic_order",
            vec![
                ColumnMetaData::new("order_id", "int", true),
                ColumnMetaData::new("user_id", "int", false),
                ColumnMetaData::new("status", "varchar", false),
            ],
            vec!["order_id".to_string()],
        )
        .unwrap()
    }

    #[test]
    fn test_table_meta_data_rejects_undeclared_primary_key() {
        let result = TableMetaData::new(
            "t_order",
            vec![ColumnMetaData::new("order_id", "int", true)],
            vec!["user_id".to_string()],
        );
        match result {
            Err(MetadataError::UnknownPrimaryKeyColumn { table, column }) => {
                assert_eq!(table, "t_order");
                assert_eq!(column, "user_id");
            }
            other => panic!("Expected UnknownPrimaryKeyColumn, got {other:?}"),
        }
    }

    #[test]
    fn test_find_column_is_case_insensitive() {
        let table = order_table();
        assert!(table.find_column("ORDER_ID").is_some());
        assert!(table.find_column("missing").is_none());
    }

    #[test]
    fn test_is_primary_key() {
        let table = order_table();
        assert!(table.is_primary_key("order_id"));
        assert!(table.is_primary_key("Order_Id"));
        assert!(!table.is_primary_key("user_id"));
        assert!(!table.is_primary_key("missing"));
    }

    #[test]
    fn test_table_metas_lookup_is_case_insensitive() {
        let mut metas = TableMetas::new();
        metas.add_table("t_logic_order", order_table()).unwrap();
        assert!(metas.contains_table("T_LOGIC_ORDER"));
        assert!(metas.get("t_logic_order").is_some());
        assert!(metas.get("t_other").is_none());
        assert_eq!(metas.table_count(), 1);
    }

    #[test]
    fn test_table_metas_rejects_duplicate() {
        let mut metas = TableMetas::new();
        metas.add_table("t_logic_order", order_table()).unwrap();
        let result = metas.add_table("T_Logic_Order", order_table());
        assert!(matches!(result, Err(MetadataError::DuplicateTable(_))));
    }

    #[test]
    fn test_contains_column() {
        let mut metas = TableMetas::new();
        metas.add_table("t_logic_order", order_table()).unwrap();
        assert!(metas.contains_column("t_logic_order", "status"));
        assert!(!metas.contains_column("t_logic_order", "missing"));
        assert!(!metas.contains_column("t_missing", "status"));
    }

    #[test]
    fn test_data_source_meta_data_parse() {
        let meta = DataSourceMetaData::parse("127.0.0.1:3306/demo_ds_0").unwrap();
        assert_eq!(meta.host, "127.0.0.1");
        assert_eq!(meta.port, 3306);
        assert_eq!(meta.catalog, "demo_ds_0");
    }

    #[test]
    fn test_data_source_meta_data_parse_rejects_malformed() {
        for url in ["127.0.0.1:3306", "127.0.0.1/db", ":3306/db", "host:abc/db", "host:1/"] {
            assert!(
                DataSourceMetaData::parse(url).is_err(),
                "expected rejection of {url}"
            );
        }
    }

    #[test]
    fn test_data_source_metas_lookup() {
        let mut metas = DataSourceMetas::new();
        metas.add("ds_1", DataSourceMetaData::parse("db1:3306/shard_1").unwrap());
        metas.add("ds_0", DataSourceMetaData::parse("db0:3306/shard_0").unwrap());
        assert!(metas.get("ds_0").is_some());
        assert!(metas.get("ds_9").is_none());
        assert_eq!(metas.all_instance_ids(), vec!["ds_0", "ds_1"]);
    }
}
