//! UPDATE statement builder.

use crate::error::{SqlError, SqlResult};
use crate::ident::{Identifier, IntoIdentifier};
use crate::monitor::StatementKind;
use crate::qb::columns::ColumnMap;
use crate::qb::expr::Expression;
use crate::qb::literal::Literal;
use crate::qb::param::SqlWriter;
use crate::qb::traits::{MutationStatement, SqlStatement};
use crate::qb::write_filter;

/// UPDATE query builder.
///
/// Assignments render as `col=val` without surrounding spaces. Without a
/// filter the statement touches every row of the table.
#[derive(Clone, Debug, PartialEq)]
pub struct UpdateQuery {
    table: Identifier,
    mapping: ColumnMap,
    filter: Option<Expression>,
}

impl UpdateQuery {
    pub fn new(table: impl IntoIdentifier) -> SqlResult<Self> {
        Ok(Self {
            table: table.into_identifier()?,
            mapping: ColumnMap::new(),
            filter: None,
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

    pub fn filter_expression(&self) -> Option<&Expression> {
        self.filter.as_ref()
    }

    // ==================== SET ====================

    /// Assign `column = value`.
    pub fn set(
        mut self,
        column: impl IntoIdentifier,
        value: impl Into<Literal>,
    ) -> SqlResult<Self> {
        self.mapping.set(column, value)?;
        Ok(self)
    }

    /// In-place variant of [`UpdateQuery::set`].
    pub fn set_value(
        &mut self,
        column: impl IntoIdentifier,
        value: impl Into<Literal>,
    ) -> SqlResult<&mut Self> {
        self.mapping.set(column, value)?;
        Ok(self)
    }

    pub fn with_mapping(mut self, mapping: ColumnMap) -> Self {
        self.mapping = mapping;
        self
    }

    pub fn set_mapping(&mut self, mapping: ColumnMap) -> &mut Self {
        self.mapping = mapping;
        self
    }

    // ==================== WHERE ====================

    pub fn filter(mut self, expr: Expression) -> Self {
        self.filter = Some(expr);
        self
    }

    pub fn set_filter(&mut self, expr: Expression) -> &mut Self {
        self.filter = Some(expr);
        self
    }

    pub fn clear_filter(&mut self) -> &mut Self {
        self.filter = None;
        self
    }
}

impl SqlStatement for UpdateQuery {
    fn kind(&self) -> StatementKind {
        StatementKind::Update
    }

    fn write_sql(&self, w: &mut SqlWriter) -> SqlResult<()> {
        if self.mapping.is_empty() {
            return Err(SqlError::EmptyMapping {
                statement: StatementKind::Update.as_str(),
            });
        }
        w.push("UPDATE ").push_ident(&self.table).push(" SET ");
        w.push_list(&self.mapping, |w, (col, val)| {
            w.push_ident(col).push("=").push_literal(val);
        });
        write_filter(w, self.filter.as_ref());
        Ok(())
    }
}

impl MutationStatement for UpdateQuery {}

#[cfg(test)]
mod tests {
    use super::*;

    fn col(name: &str) -> Expression {
        Expression::column(name).unwrap()
    }

    #[test]
    fn renders_assignments_without_spaces() {
        let q = UpdateQuery::new("users")
            .unwrap()
            .set("name", Literal::text("bob"))
            .unwrap()
            .set("age", Literal::int(30))
            .unwrap()
            .filter(Expression::eq(col("id"), Literal::int(5)));
        assert_eq!(
            q.render().unwrap(),
            "UPDATE users SET name='bob', age=30 WHERE id = 5"
        );
    }

    #[test]
    fn no_filter_omits_where() {
        let q = UpdateQuery::new("users")
            .unwrap()
            .set("active", Literal::bool(false))
            .unwrap();
        assert_eq!(q.render().unwrap(), "UPDATE users SET active=false");
    }

    #[test]
    fn empty_mapping_fails_at_render() {
        let q = UpdateQuery::new("users")
            .unwrap()
            .filter(Expression::eq(col("id"), Literal::int(1)));
        match q.render() {
            Err(SqlError::EmptyMapping { statement }) => assert_eq!(statement, "UPDATE"),
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn reassignment_keeps_first_position() {
        let mut q = UpdateQuery::new("t").unwrap();
        q.set_value("a", Literal::int(1)).unwrap();
        q.set_value("b", Literal::int(2)).unwrap();
        q.set_value("a", Literal::int(3)).unwrap();
        assert_eq!(q.render().unwrap(), "UPDATE t SET a=3, b=2");
    }
}
