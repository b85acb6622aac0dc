use thiserror::Error;

/// Convenience alias for `Result<T, ProxyError>`.
pub type ProxyResult<T> = Result<T, ProxyError>;

/// Top-level error type that all crate-specific errors convert into.
///
/// Every variant here belongs to schema *load* time (config parse, registry
/// build, rule build). Column header resolution is a total function and
/// never produces one of these.
#[derive(Error, Debug)]
pub enum ProxyError {
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    #[error("Metadata error: {0}")]
    Metadata(#[from] MetadataError),

    #[error("Sharding error: {0}")]
    Sharding(#[from] ShardingError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Schema name must not be empty")]
    MissingSchemaName,

    #[error("Table rule for {0} declares no actual data nodes")]
    EmptyTableRule(String),
}

/// Schema metadata registry errors (registry build time only).
#[derive(Error, Debug)]
pub enum MetadataError {
    #[error("Primary key column {column} is not declared in table {table}")]
    UnknownPrimaryKeyColumn { table: String, column: String },

    #[error("Invalid data source URL {0}: expected host:port/catalog")]
    InvalidDataSourceUrl(String),

    #[error("Table already registered: {0}")]
    DuplicateTable(String),
}

/// Sharding rule errors.
#[derive(Error, Debug)]
pub enum ShardingError {
    #[error("Malformed data node {0}: expected <data_source>.<table>")]
    MalformedDataNode(String),

    #[error("Data node {node} references unknown data source {data_source}")]
    UnknownDataSource { node: String, data_source: String },
}

impl ProxyError {
    /// True for errors caused by operator-supplied input (configuration and
    /// rule definitions) rather than proxy internals. IO failures while
    /// reading a config file are the only non-user case today.
    pub fn is_user_error(&self) -> bool {
        !matches!(self, ProxyError::Io(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_error_is_user_error() {
        let e = ProxyError::Config(ConfigError::MissingSchemaName);
        assert!(e.is_user_error());
    }

    #[test]
    fn test_sharding_error_is_user_error() {
        let e = ProxyError::Sharding(ShardingError::MalformedDataNode("ds_0".into()));
        assert!(e.is_user_error());
    }

    #[test]
    fn test_io_error_is_not_user_error() {
        let e = ProxyError::Io(std::io::Error::new(std::io::ErrorKind::NotFound, "gone"));
        assert!(!e.is_user_error());
    }

    #[test]
    fn test_from_metadata_error() {
        let e: ProxyError = MetadataError::DuplicateTable("t_order".into()).into();
        assert!(matches!(e, ProxyError::Metadata(_)));
        assert!(e.to_string().contains("t_order"));
    }

    #[test]
    fn test_unknown_primary_key_message_names_table_and_column() {
        let e = MetadataError::UnknownPrimaryKeyColumn {
            table: "t_order".into(),
            column: "order_id".into(),
        };
        let msg = e.to_string();
        assert!(msg.contains("t_order"));
        assert!(msg.contains("order_id"));
    }
}
