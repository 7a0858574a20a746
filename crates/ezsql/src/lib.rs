//! # ezsql
//!
//! Build SQL statements from typed parts instead of string concatenation.
//!
//! ## Features
//!
//! - **Validated identifiers**: table and column names are checked once, then rendered verbatim
//! - **Expression trees**: literals, columns, unary/binary operators and explicit groups
//! - **Four builders**: SELECT, INSERT, UPDATE and DELETE with a fixed, predictable grammar
//! - **Inline or bound**: `render()` inlines literals; `render_bound()` emits `$n` placeholders
//! - **Pluggable execution**: any [`StatementExecutor`] runs the rendered SQL; `PgExecutor`
//!   ships behind the `postgres` feature
//!
//! ## Query Builder (qb)
//!
//! ```
//! use ezsql::{Expression, Literal, SqlStatement, qb};
//!
//! let adults = Expression::gt(Expression::column("age")?, Literal::int(18));
//! let sql = qb::select("users")?
//!     .columns(["id", "name"])?
//!     .filter(adults)
//!     .render()?;
//! assert_eq!(sql, "SELECT id, name FROM users WHERE age > 18");
//!
//! let sql = qb::update("users")?
//!     .set("status", Literal::text("inactive"))?
//!     .filter(Expression::eq(Expression::column("id")?, Literal::int(7)))
//!     .render()?;
//! assert_eq!(sql, "UPDATE users SET status='inactive' WHERE id = 7");
//! # Ok::<(), ezsql::SqlError>(())
//! ```
//!
//! ## Quoting
//!
//! Quoted literals are emitted verbatim by default, so a value containing `'`
//! produces broken (or injectable) SQL. Render with
//! [`RenderOptions::escape_quotes`] or use `render_bound()` for untrusted input.

pub mod client;
pub mod config;
pub mod error;
pub mod ident;
pub mod monitor;
pub mod prelude;
pub mod qb;
pub mod value;

#[cfg(feature = "postgres")]
pub mod pg_client;

pub use client::{Cursor, StatementExecutor};
pub use config::{ExecConfig, RenderOptions};
pub use error::{SqlError, SqlResult};
pub use ident::{Identifier, IntoIdentifier};
pub use monitor::StatementKind;
pub use value::Value;

// Re-export qb module for easy access
pub use qb::{
    Arity, BinaryExpression, BoundStatement, ColumnMap, DeletionQuery, Expression, InsertionQuery,
    Literal, MutationStatement, Operator, ParamList, QuotePolicy, Selectable, SelectionQuery,
    SqlStatement, Statement, UnaryExpression, UpdateQuery, delete_from, insert_into, select,
    update,
};

#[cfg(feature = "postgres")]
pub use pg_client::{PgCursor, PgExecutor};
