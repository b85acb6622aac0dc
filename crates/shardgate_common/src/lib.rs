//! Shared foundation for the shardgate metadata-resolution core:
//! error taxonomy, proxy configuration, and the logical schema
//! metadata registry.

pub mod config;
pub mod error;
pub mod schema;

pub use config::ProxyConfig;
pub use error::{ProxyError, ProxyResult};
pub use schema::{
    ColumnMetaData, DataSourceMetaData, DataSourceMetas, SchemaMetaData, TableMetaData, TableMetas,
};
