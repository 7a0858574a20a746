//! Convenient imports for typical `ezsql` usage.
//!
//! ```
//! use ezsql::prelude::*;
//! ```

pub use crate::{
    ColumnMap, Cursor, Expression, Identifier, Literal, MutationStatement, Operator,
    SelectionQuery, SqlError, SqlResult, SqlStatement, StatementExecutor, Value,
};
pub use crate::{DeletionQuery, InsertionQuery, UpdateQuery};

#[cfg(feature = "postgres")]
pub use crate::PgExecutor;
