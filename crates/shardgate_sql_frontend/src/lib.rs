//! Binder output consumed by the metadata core: the ordered projection
//! index of a single executed statement.
//!
//! Parsing SQL and constructing these from an AST is the binder's job and
//! happens upstream; this crate only defines the statement-scoped types.

pub mod projection;

pub use projection::{ColumnProjection, ExpressionProjection, Projection, ProjectionsContext};
