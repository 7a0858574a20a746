//! Trait definitions for statement builders.

use crate::client::StatementExecutor;
use crate::config::{ExecConfig, RenderOptions};
use crate::error::SqlResult;
use crate::monitor::{self, StatementKind};
use crate::qb::param::{BoundStatement, SqlWriter};

/// Base trait for all statement builders.
///
/// Rendering is pure: it reads the builder state and never mutates it, so the
/// same builder renders to the same text until one of its setters is called.
pub trait SqlStatement {
    /// Which statement this builder produces.
    fn kind(&self) -> StatementKind;

    /// Write the statement into `w`. Fails if the builder state cannot render.
    #[doc(hidden)]
    fn write_sql(&self, w: &mut SqlWriter) -> SqlResult<()>;

    /// Render SQL text with literals inlined verbatim.
    fn render(&self) -> SqlResult<String> {
        self.render_with(&RenderOptions::default())
    }

    /// Render SQL text with explicit options.
    fn render_with(&self, options: &RenderOptions) -> SqlResult<String> {
        let mut w = SqlWriter::inline(options);
        self.write_sql(&mut w)?;
        Ok(w.finish())
    }

    /// Render SQL with every literal replaced by a `$n` placeholder.
    fn render_bound(&self) -> SqlResult<BoundStatement> {
        let mut w = SqlWriter::bound();
        self.write_sql(&mut w)?;
        Ok(w.finish_bound())
    }
}

/// Statements that change rows: INSERT, UPDATE and DELETE.
pub trait MutationStatement: SqlStatement {
    /// Render, run through `run_update`, and return the affected row count.
    ///
    /// Nothing is sent to the executor if rendering fails.
    fn execute<E: StatementExecutor + ?Sized>(&self, executor: &E) -> SqlResult<u64> {
        self.execute_with(executor, &ExecConfig::default())
    }

    /// [`MutationStatement::execute`] with explicit logging and render settings.
    fn execute_with<E: StatementExecutor + ?Sized>(
        &self,
        executor: &E,
        config: &ExecConfig,
    ) -> SqlResult<u64> {
        let kind = self.kind();
        let sql = self.render_with(&config.render)?;
        monitor::log_statement(config, kind, &sql);
        let rows = executor.run_update(&sql)?;
        monitor::log_affected(config, kind, rows);
        Ok(rows)
    }
}
