//! SELECT statement builder.

use crate::client::StatementExecutor;
use crate::config::ExecConfig;
use crate::error::SqlResult;
use crate::ident::{Identifier, IntoIdentifier};
use crate::monitor::{self, StatementKind};
use crate::qb::expr::{Expression, Selectable};
use crate::qb::param::SqlWriter;
use crate::qb::traits::SqlStatement;
use crate::qb::write_filter;

/// SELECT query builder.
///
/// ```
/// use ezsql::{Expression, Literal, SelectionQuery, SqlStatement};
///
/// let query = SelectionQuery::new("users")?
///     .columns(["id", "name"])?
///     .filter(Expression::gt(Expression::column("age")?, Literal::int(18)));
/// assert_eq!(query.render()?, "SELECT id, name FROM users WHERE age > 18");
/// # Ok::<(), ezsql::SqlError>(())
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct SelectionQuery {
    table: Identifier,
    /// Projection list; empty means `*`
    selections: Vec<Expression>,
    filter: Option<Expression>,
}

impl SelectionQuery {
    /// Create a new SELECT builder for `table`.
    pub fn new(table: impl IntoIdentifier) -> SqlResult<Self> {
        Ok(Self {
            table: table.into_identifier()?,
            selections: Vec::new(),
            filter: None,
        })
    }

    pub fn table(&self) -> &Identifier {
        &self.table
    }

    pub fn selections(&self) -> &[Expression] {
        &self.selections
    }

    pub fn filter_expression(&self) -> Option<&Expression> {
        self.filter.as_ref()
    }

    // ==================== Projection ====================

    /// Append one item to the projection list.
    pub fn select(mut self, item: impl Selectable) -> Self {
        self.selections.push(item.into_selection());
        self
    }

    /// Append columns by name.
    pub fn columns<I, C>(mut self, names: I) -> SqlResult<Self>
    where
        I: IntoIterator<Item = C>,
        C: IntoIdentifier,
    {
        for name in names {
            self.selections.push(Expression::Identifier(name.into_identifier()?));
        }
        Ok(self)
    }

    /// Replace the projection list.
    pub fn with_selections<I, S>(mut self, items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Selectable,
    {
        self.set_selections(items);
        self
    }

    /// Replace the projection list in place. An empty list selects `*`.
    pub fn set_selections<I, S>(&mut self, items: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Selectable,
    {
        self.selections = items.into_iter().map(Selectable::into_selection).collect();
        self
    }

    /// Append one item in place.
    pub fn add_selection(&mut self, item: impl Selectable) -> &mut Self {
        self.selections.push(item.into_selection());
        self
    }

    // ==================== WHERE ====================

    /// Set the WHERE filter, replacing any previous one.
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

    // ==================== Execute ====================

    /// Render and run as a read query.
    ///
    /// The returned cursor borrows `executor`; close it (or drain it with
    /// [`Cursor::for_each_row`](crate::Cursor::for_each_row)) when done.
    pub fn execute<'e, E>(&self, executor: &'e E) -> SqlResult<E::Cursor<'e>>
    where
        E: StatementExecutor + ?Sized,
    {
        self.execute_with(executor, &ExecConfig::default())
    }

    /// [`SelectionQuery::execute`] with explicit logging and render settings.
    pub fn execute_with<'e, E>(
        &self,
        executor: &'e E,
        config: &ExecConfig,
    ) -> SqlResult<E::Cursor<'e>>
    where
        E: StatementExecutor + ?Sized,
    {
        let sql = self.render_with(&config.render)?;
        monitor::log_statement(config, StatementKind::Select, &sql);
        executor.run_query(&sql)
    }
}

impl SqlStatement for SelectionQuery {
    fn kind(&self) -> StatementKind {
        StatementKind::Select
    }

    fn write_sql(&self, w: &mut SqlWriter) -> SqlResult<()> {
        w.push("SELECT ");
        if self.selections.is_empty() {
            w.push("*");
        } else {
            w.push_list(&self.selections, |w, item| item.write_sql(w));
        }
        w.push(" FROM ").push_ident(&self.table);
        write_filter(w, self.filter.as_ref());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::qb::literal::Literal;

    #[test]
    fn empty_selection_is_wildcard() {
        let q = SelectionQuery::new("users").unwrap();
        assert_eq!(q.render().unwrap(), "SELECT * FROM users");
    }

    #[test]
    fn selections_keep_order() {
        let q = SelectionQuery::new("users")
            .unwrap()
            .columns(["name", "id"])
            .unwrap();
        assert_eq!(q.render().unwrap(), "SELECT name, id FROM users");
    }

    #[test]
    fn expression_in_projection() {
        let flag = Expression::gt(Expression::column("age").unwrap(), Literal::int(18));
        let q = SelectionQuery::new("users")
            .unwrap()
            .select(Identifier::new("id").unwrap())
            .select(flag);
        assert_eq!(q.render().unwrap(), "SELECT id, age > 18 FROM users");
    }

    #[test]
    fn set_selections_to_empty_restores_wildcard() {
        let mut q = SelectionQuery::new("t").unwrap().columns(["a"]).unwrap();
        q.set_selections(Vec::<Expression>::new());
        assert_eq!(q.render().unwrap(), "SELECT * FROM t");
    }

    #[test]
    fn filter_can_be_replaced_and_cleared() {
        let mut q = SelectionQuery::new("t").unwrap();
        q.set_filter(Expression::eq(Expression::column("a").unwrap(), Literal::int(1)));
        assert_eq!(q.render().unwrap(), "SELECT * FROM t WHERE a = 1");
        q.set_filter(Expression::eq(Expression::column("b").unwrap(), Literal::int(2)));
        assert_eq!(q.render().unwrap(), "SELECT * FROM t WHERE b = 2");
        q.clear_filter();
        assert_eq!(q.render().unwrap(), "SELECT * FROM t");
    }

    #[test]
    fn invalid_table_rejected() {
        assert!(SelectionQuery::new("").unwrap_err().is_validation());
        let q = SelectionQuery::new("users").unwrap();
        assert!(q.columns(["ok", "not ok"]).is_err());
    }

    #[test]
    fn kind_is_select() {
        assert_eq!(
            SelectionQuery::new("t").unwrap().kind(),
            StatementKind::Select
        );
    }
}
