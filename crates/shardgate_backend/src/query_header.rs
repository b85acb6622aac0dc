//! Logical column header resolution.
//!
//! For every column of a physical result set, reconstruct what the column
//! means in the logical schema: the logical table name, the true column
//! name (as opposed to a query-local alias), type metadata, and whether it
//! is a primary key. Three sources are reconciled per column:
//!
//! - physical result metadata reported by the executing driver,
//! - the statement's projection index, when the binder produced one,
//! - the schema metadata registry.
//!
//! Resolution is total. It sits on the hot path of every query response,
//! so incomplete metadata degrades to documented fallbacks and never fails
//! the query.

use shardgate_sql_frontend::{Projection, ProjectionsContext};

use crate::schema::LogicalSchema;

/// Metadata for one column of a physical result set, as reported by the
/// backend driver for the shard that executed the statement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhysicalColumnMeta {
    /// Physical table the column came from; empty when the driver cannot
    /// attribute it (e.g. a computed column).
    pub table_name: String,
    /// Label the client requested, e.g. a `SELECT x AS y` alias.
    pub column_label: String,
    pub column_name: String,
    /// Standard numeric SQL type code.
    pub column_type: i32,
    pub display_size: u32,
    pub scale: u32,
    pub signed: bool,
    pub auto_increment: bool,
    pub nullable: bool,
}

/// One finalized logical column header, consumed by the protocol encoder
/// to build the client-facing result-set description. Constructed once per
/// physical column per execution and never cached across statements.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryHeader {
    pub schema: String,
    pub table: String,
    pub column_label: String,
    pub column_name: String,
    pub column_length: u32,
    pub column_type: i32,
    pub decimals: u32,
    pub signed: bool,
    pub primary_key: bool,
    pub not_null: bool,
    pub auto_increment: bool,
}

impl QueryHeader {
    /// Resolve the header for the column at the given 1-based ordinal.
    ///
    /// `projections` is the statement's projection index when the query
    /// path ran full binding; without one, every lookup degrades to the
    /// physical metadata directly.
    pub fn resolve(
        column: &PhysicalColumnMeta,
        schema: &LogicalSchema,
        ordinal: usize,
        projections: Option<&ProjectionsContext>,
    ) -> Self {
        let column_name = resolve_column_name(column, ordinal, projections);
        let table = schema
            .sharding_rule()
            .logic_table_name(&column.table_name)
            .to_string();
        let primary_key = match schema.meta_data().tables.get(&table) {
            Some(table_meta) => table_meta.is_primary_key(&column_name),
            None => {
                tracing::debug!(
                    table = %table,
                    column = %column_name,
                    "table absent from metadata registry, primary-key flag disabled"
                );
                false
            }
        };
        Self {
            schema: schema.name().to_string(),
            table,
            column_label: column.column_label.clone(),
            column_name,
            column_length: column.display_size,
            column_type: column.column_type,
            decimals: column.scale,
            signed: column.signed,
            primary_key,
            not_null: !column.nullable,
            auto_increment: column.auto_increment,
        }
    }
}

/// The true column identity, distinct from the label.
///
/// A column projection at this ordinal knows the real source column even
/// when the client-visible label is an alias. A computed projection has no
/// single source column, so the physical name (typically the expression's
/// generated label) stands.
fn resolve_column_name(
    column: &PhysicalColumnMeta,
    ordinal: usize,
    projections: Option<&ProjectionsContext>,
) -> String {
    match projections.and_then(|p| p.projection_at(ordinal)) {
        Some(Projection::Column(c)) => c.name.clone(),
        Some(Projection::Expression(_)) | None => column.column_name.clone(),
    }
}

/// Resolve headers for a whole physical result, in physical column order.
/// Downstream protocol encoding assumes positional correspondence with row
/// data, so the output has no gaps and no reordering.
pub fn resolve_headers(
    columns: &[PhysicalColumnMeta],
    schema: &LogicalSchema,
    projections: Option<&ProjectionsContext>,
) -> Vec<QueryHeader> {
    columns
        .iter()
        .enumerate()
        .map(|(i, column)| QueryHeader::resolve(column, schema, i + 1, projections))
        .collect()
}
