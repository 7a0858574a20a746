//! The execution interface consumed by statement builders.
//!
//! The builders never talk to a database themselves. [`SelectionQuery::execute`]
//! and the modification builders' `execute` hand their rendered SQL to a
//! [`StatementExecutor`], which needs exactly two capabilities:
//!
//! - `run_query` for read statements, returning a forward-only [`Cursor`]
//! - `run_update` for write statements, returning the affected row count
//!
//! Both calls block until the executor answers. Timeouts, retries and
//! cancellation belong to the executor implementation.
//!
//! [`SelectionQuery::execute`]: crate::SelectionQuery::execute

use crate::error::SqlResult;
use crate::value::Value;

/// Something that can run SQL text.
///
/// A cursor borrows its executor, so the executor (and whatever connection it
/// owns) stays alive for as long as rows are being read.
pub trait StatementExecutor {
    /// Cursor over the rows of one read statement.
    type Cursor<'a>: Cursor
    where
        Self: 'a;

    /// Run a read statement and return a cursor positioned before the first row.
    fn run_query(&self, sql: &str) -> SqlResult<Self::Cursor<'_>>;

    /// Run a write statement and return the number of affected rows.
    fn run_update(&self, sql: &str) -> SqlResult<u64>;
}

impl<E: StatementExecutor + ?Sized> StatementExecutor for &E {
    type Cursor<'a>
        = E::Cursor<'a>
    where
        Self: 'a;

    fn run_query(&self, sql: &str) -> SqlResult<Self::Cursor<'_>> {
        (**self).run_query(sql)
    }

    fn run_update(&self, sql: &str) -> SqlResult<u64> {
        (**self).run_update(sql)
    }
}

/// A forward-only iterator over result rows.
///
/// Dropping a cursor releases it; [`Cursor::close`] does the same but reports
/// errors from the release itself.
pub trait Cursor {
    /// Move to the next row. Returns `false` once the rows are exhausted.
    fn advance(&mut self) -> SqlResult<bool>;

    /// Read a column of the current row by label.
    fn value_of(&self, label: &str) -> SqlResult<Value>;

    /// Release the cursor and its statement.
    fn close(self) -> SqlResult<()>
    where
        Self: Sized;

    /// Call `f` for every remaining row, then close the cursor.
    ///
    /// The cursor is closed on every path. An error from `advance` or from `f`
    /// stops iteration and is returned in preference to a close error.
    fn for_each_row<F>(mut self, mut f: F) -> SqlResult<()>
    where
        Self: Sized,
        F: FnMut(&Self) -> SqlResult<()>,
    {
        let mut outcome = Ok(());
        loop {
            match self.advance() {
                Ok(true) => {
                    if let Err(e) = f(&self) {
                        outcome = Err(e);
                        break;
                    }
                }
                Ok(false) => break,
                Err(e) => {
                    outcome = Err(e);
                    break;
                }
            }
        }
        let closed = self.close();
        outcome.and(closed)
    }

    /// Read the given columns of every remaining row, then close the cursor.
    fn collect_rows(self, labels: &[&str]) -> SqlResult<Vec<Vec<Value>>>
    where
        Self: Sized,
    {
        let mut rows = Vec::new();
        self.for_each_row(|cursor| {
            let row = labels
                .iter()
                .map(|label| cursor.value_of(label))
                .collect::<SqlResult<Vec<_>>>()?;
            rows.push(row);
            Ok(())
        })?;
        Ok(rows)
    }
}
