//! DELETE statement builder.

use crate::error::SqlResult;
use crate::ident::{Identifier, IntoIdentifier};
use crate::monitor::StatementKind;
use crate::qb::expr::Expression;
use crate::qb::param::SqlWriter;
use crate::qb::traits::{MutationStatement, SqlStatement};
use crate::qb::write_filter;

/// DELETE query builder.
///
/// No filter means `DELETE FROM <table>`, which removes every row.
#[derive(Clone, Debug, PartialEq)]
pub struct DeletionQuery {
    table: Identifier,
    filter: Option<Expression>,
}

impl DeletionQuery {
    pub fn new(table: impl IntoIdentifier) -> SqlResult<Self> {
        Ok(Self {
            table: table.into_identifier()?,
            filter: None,
        })
    }

    pub fn table(&self) -> &Identifier {
        &self.table
    }

    pub fn filter_expression(&self) -> Option<&Expression> {
        self.filter.as_ref()
    }

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

impl SqlStatement for DeletionQuery {
    fn kind(&self) -> StatementKind {
        StatementKind::Delete
    }

    fn write_sql(&self, w: &mut SqlWriter) -> SqlResult<()> {
        w.push("DELETE FROM ").push_ident(&self.table);
        write_filter(w, self.filter.as_ref());
        Ok(())
    }
}

impl MutationStatement for DeletionQuery {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::qb::literal::Literal;

    #[test]
    fn without_filter() {
        let q = DeletionQuery::new("sessions").unwrap();
        assert_eq!(q.render().unwrap(), "DELETE FROM sessions");
    }

    #[test]
    fn with_filter() {
        let q = DeletionQuery::new("T").unwrap().filter(Expression::gt(
            Expression::column("age").unwrap(),
            Literal::new(18, false),
        ));
        assert_eq!(q.render().unwrap(), "DELETE FROM T WHERE age > 18");
    }

    #[test]
    fn schema_qualified_table() {
        let q = DeletionQuery::new("public.sessions").unwrap();
        assert_eq!(q.render().unwrap(), "DELETE FROM public.sessions");
    }
}
