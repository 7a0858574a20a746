//! Statement builders and the expression tree they render.
//!
//! Every builder owns a validated table [`Identifier`](crate::Identifier) and
//! renders to a single line of SQL: upper-case keywords, single spaces, no
//! trailing semicolon. Literals are inlined by default; [`SqlStatement::render_bound`]
//! produces the same statement with `$n` placeholders instead.
//!
//! # Usage
//!
//! ```
//! use ezsql::qb;
//! use ezsql::{Expression, Literal, SqlStatement};
//!
//! let sql = qb::select("users")?
//!     .columns(["id", "name"])?
//!     .filter(Expression::gt(Expression::column("age")?, Literal::int(18)))
//!     .render()?;
//! assert_eq!(sql, "SELECT id, name FROM users WHERE age > 18");
//!
//! let sql = qb::insert_into("users")?
//!     .value("id", Literal::int(1))?
//!     .value("name", Literal::text("a"))?
//!     .render()?;
//! assert_eq!(sql, "INSERT INTO users (id, name) VALUES (1, 'a')");
//!
//! let sql = qb::update("users")?
//!     .set("name", Literal::text("b"))?
//!     .filter(Expression::eq(Expression::column("id")?, Literal::int(1)))
//!     .render()?;
//! assert_eq!(sql, "UPDATE users SET name='b' WHERE id = 1");
//!
//! let sql = qb::delete_from("users")?.render()?;
//! assert_eq!(sql, "DELETE FROM users");
//! # Ok::<(), ezsql::SqlError>(())
//! ```

mod columns;
mod delete;
mod expr;
mod insert;
mod literal;
mod op;
mod param;
mod select;
mod traits;
mod update;


pub use columns::ColumnMap;
pub use delete::DeletionQuery;
pub use expr::{BinaryExpression, Expression, Selectable, UnaryExpression};
pub use insert::InsertionQuery;
pub use literal::{Literal, QuotePolicy};
pub use op::{Arity, Operator};
pub use param::{BoundStatement, ParamList};
pub use select::SelectionQuery;
pub use traits::{MutationStatement, SqlStatement};
pub use update::UpdateQuery;

use crate::error::SqlResult;
use crate::ident::IntoIdentifier;
use crate::monitor::StatementKind;
use param::SqlWriter;

/// Create a SELECT builder for `table`.
pub fn select(table: impl IntoIdentifier) -> SqlResult<SelectionQuery> {
    SelectionQuery::new(table)
}

/// Create an INSERT builder for `table`.
pub fn insert_into(table: impl IntoIdentifier) -> SqlResult<InsertionQuery> {
    InsertionQuery::new(table)
}

/// Create an UPDATE builder for `table`.
pub fn update(table: impl IntoIdentifier) -> SqlResult<UpdateQuery> {
    UpdateQuery::new(table)
}

/// Create a DELETE builder for `table`.
///
/// Without a filter the statement removes every row.
pub fn delete_from(table: impl IntoIdentifier) -> SqlResult<DeletionQuery> {
    DeletionQuery::new(table)
}

/// Append `" WHERE <filter>"`, or nothing when there is no filter.
pub(crate) fn write_filter(w: &mut SqlWriter, filter: Option<&Expression>) {
    if let Some(expr) = filter {
        w.push(" WHERE ");
        expr.write_sql(w);
    }
}

/// Any one of the four statement builders.
#[derive(Clone, Debug, PartialEq)]
pub enum Statement {
    Select(SelectionQuery),
    Insert(InsertionQuery),
    Update(UpdateQuery),
    Delete(DeletionQuery),
}

impl SqlStatement for Statement {
    fn kind(&self) -> StatementKind {
        match self {
            Statement::Select(_) => StatementKind::Select,
            Statement::Insert(_) => StatementKind::Insert,
            Statement::Update(_) => StatementKind::Update,
            Statement::Delete(_) => StatementKind::Delete,
        }
    }

    fn write_sql(&self, w: &mut SqlWriter) -> SqlResult<()> {
        match self {
            Statement::Select(q) => q.write_sql(w),
            Statement::Insert(q) => q.write_sql(w),
            Statement::Update(q) => q.write_sql(w),
            Statement::Delete(q) => q.write_sql(w),
        }
    }
}

impl From<SelectionQuery> for Statement {
    fn from(q: SelectionQuery) -> Self {
        Statement::Select(q)
    }
}

impl From<InsertionQuery> for Statement {
    fn from(q: InsertionQuery) -> Self {
        Statement::Insert(q)
    }
}

impl From<UpdateQuery> for Statement {
    fn from(q: UpdateQuery) -> Self {
        Statement::Update(q)
    }
}

impl From<DeletionQuery> for Statement {
    fn from(q: DeletionQuery) -> Self {
        Statement::Delete(q)
    }
}
