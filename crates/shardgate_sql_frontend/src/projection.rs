//! Projections of one SELECT statement, one entry per output column.
//!
//! Position in the sequence corresponds 1:1 to the physical result column
//! index (1-based). Created fresh per statement, immutable, discarded when
//! the statement's result is fully consumed.

/// A plain column reference in the projection list, possibly qualified and
/// possibly aliased: `o.order_id AS id`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnProjection {
    /// Owner qualifier (table name or alias) if the column was qualified.
    pub owner: Option<String>,
    /// The real source column name, independent of any alias.
    pub name: String,
    pub alias: Option<String>,
}

impl ColumnProjection {
    pub fn new(owner: Option<&str>, name: &str, alias: Option<&str>) -> Self {
        Self {
            owner: owner.map(str::to_string),
            name: name.to_string(),
            alias: alias.map(str::to_string),
        }
    }

    /// The client-visible label: alias when present, else the column name.
    pub fn label(&self) -> &str {
        self.alias.as_deref().unwrap_or(&self.name)
    }

    /// The projection as it appeared in SQL text, e.g. `o.order_id`.
    pub fn expression(&self) -> String {
        match &self.owner {
            Some(owner) => format!("{owner}.{}", self.name),
            None => self.name.clone(),
        }
    }
}

/// A computed projection: any expression that is not a plain column
/// reference, e.g. `o.order_id + 1 AS expr`. There is no single source
/// column behind it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpressionProjection {
    /// Raw expression text as written by the client.
    pub expression: String,
    pub alias: Option<String>,
}

impl ExpressionProjection {
    pub fn new(expression: &str, alias: Option<&str>) -> Self {
        Self {
            expression: expression.to_string(),
            alias: alias.map(str::to_string),
        }
    }

    /// The client-visible label: alias when present, else the expression
    /// text itself.
    pub fn label(&self) -> &str {
        self.alias.as_deref().unwrap_or(&self.expression)
    }
}

/// One entry of a statement's projection list. A closed two-variant sum:
/// the header resolver only ever branches on column vs. computed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Projection {
    Column(ColumnProjection),
    Expression(ExpressionProjection),
}

impl Projection {
    pub fn label(&self) -> &str {
        match self {
            Projection::Column(c) => c.label(),
            Projection::Expression(e) => e.label(),
        }
    }
}

/// The ordered projection index of one executed statement.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProjectionsContext {
    projections: Vec<Projection>,
}

impl ProjectionsContext {
    pub fn new(projections: Vec<Projection>) -> Self {
        Self { projections }
    }

    /// Projection at the given 1-based ordinal, matching the physical
    /// result column position. `None` for ordinal 0 or past the end.
    pub fn projection_at(&self, ordinal: usize) -> Option<&Projection> {
        if ordinal == 0 {
            return None;
        }
        self.projections.get(ordinal - 1)
    }

    pub fn projections(&self) -> &[Projection] {
        &self.projections
    }

    pub fn len(&self) -> usize {
        self.projections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.projections.is_empty()
    }

    /// Client-visible labels in output order.
    pub fn labels(&self) -> Vec<&str> {
        self.projections.iter().map(Projection::label).collect()
    }
}
