//! INSERT statement builder.

use crate::error::{SqlError, SqlResult};
use crate::ident::{Identifier, IntoIdentifier};
use crate::monitor::StatementKind;
use crate::qb::columns::ColumnMap;
use crate::qb::literal::Literal;
use crate::qb::param::SqlWriter;
use crate::qb::traits::{MutationStatement, SqlStatement};

/// INSERT query builder for a single row.
///
/// The column mapping may be filled in after construction; an empty mapping
/// only fails when the statement is rendered.
#[derive(Clone, Debug, PartialEq)]
pub struct InsertionQuery {
    table: Identifier,
    mapping: ColumnMap,
}

impl InsertionQuery {
    /// Create a new INSERT builder for `table` with no columns yet.
    pub fn new(table: impl IntoIdentifier) -> SqlResult<Self> {
        Ok(Self {
            table: table.into_identifier()?,
            mapping: ColumnMap::new(),
        })
    }

    pub fn table(&self) -> &Identifier {
        &self.table
    }

    pub fn mapping(&self) -> &ColumnMap {
        &self.mapping
    }

    pub fn mapping_mut(&mut self) -> &mut ColumnMap {
        &mut self.mapping
    }

    /// Add a column value, keeping insertion order.
    pub fn value(
        mut self,
        column: impl IntoIdentifier,
        value: impl Into<Literal>,
    ) -> SqlResult<Self> {
        self.mapping.set(column, value)?;
        Ok(self)
    }

    /// In-place variant of [`InsertionQuery::value`].
    pub fn set_value(
        &mut self,
        column: impl IntoIdentifier,
        value: impl Into<Literal>,
    ) -> SqlResult<&mut Self> {
        self.mapping.set(column, value)?;
        Ok(self)
    }

    /// Replace the whole mapping.
    pub fn with_mapping(mut self, mapping: ColumnMap) -> Self {
        self.mapping = mapping;
        self
    }

    pub fn set_mapping(&mut self, mapping: ColumnMap) -> &mut Self {
        self.mapping = mapping;
        self
    }
}

impl SqlStatement for InsertionQuery {
    fn kind(&self) -> StatementKind {
        StatementKind::Insert
    }

    fn write_sql(&self, w: &mut SqlWriter) -> SqlResult<()> {
        if self.mapping.is_empty() {
            return Err(SqlError::EmptyMapping {
                statement: StatementKind::Insert.as_str(),
            });
        }
        w.push("INSERT INTO ").push_ident(&self.table).push(" (");
        w.push_list(self.mapping.columns(), |w, col| {
            w.push_ident(col);
        });
        w.push(") VALUES (");
        w.push_list(self.mapping.values(), |w, val| {
            w.push_literal(val);
        });
        w.push(")");
        Ok(())
    }
}

impl MutationStatement for InsertionQuery {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_columns_and_values_in_order() {
        let q = InsertionQuery::new("users")
            .unwrap()
            .value("id", Literal::new(1, false))
            .unwrap()
            .value("name", Literal::new("a", true))
            .unwrap();
        assert_eq!(
            q.render().unwrap(),
            "INSERT INTO users (id, name) VALUES (1, 'a')"
        );
    }

    #[test]
    fn empty_mapping_fails_at_render_only() {
        let mut q = InsertionQuery::new("users").unwrap();
        let err = q.render().unwrap_err();
        assert!(err.is_empty_mapping());

        q.set_value("id", Literal::int(7)).unwrap();
        assert_eq!(q.render().unwrap(), "INSERT INTO users (id) VALUES (7)");
    }

    #[test]
    fn null_value_renders_keyword() {
        let q = InsertionQuery::new("t")
            .unwrap()
            .value("note", Literal::null())
            .unwrap();
        assert_eq!(q.render().unwrap(), "INSERT INTO t (note) VALUES (NULL)");
    }

    #[test]
    fn bound_render_numbers_values() {
        let q = InsertionQuery::new("t")
            .unwrap()
            .value("a", Literal::int(1))
            .unwrap()
            .value("b", Literal::text("x"))
            .unwrap();
        let bound = q.render_bound().unwrap();
        assert_eq!(bound.sql(), "INSERT INTO t (a, b) VALUES ($1, $2)");
        assert_eq!(bound.params().len(), 2);
    }
}
