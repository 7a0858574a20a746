//! SQL logging around the `execute` hooks.
//!
//! Events are emitted under the `ezsql.sql` target at the level configured in
//! [`ExecConfig`], before the statement reaches the executor. Modification
//! statements emit a second event with the affected row count.

use crate::config::ExecConfig;
use std::fmt;
use tracing::Level;

const TARGET: &str = "ezsql.sql";

/// The four statement shapes this crate renders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatementKind {
    Select,
    Insert,
    Update,
    Delete,
}

impl StatementKind {
    pub fn as_str(self) -> &'static str {
        match self {
            StatementKind::Select => "SELECT",
            StatementKind::Insert => "INSERT",
            StatementKind::Update => "UPDATE",
            StatementKind::Delete => "DELETE",
        }
    }

    /// Whether the statement is run through `run_update`.
    pub fn is_modification(self) -> bool {
        !matches!(self, StatementKind::Select)
    }
}

impl fmt::Display for StatementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Cut `sql` to at most `max_bytes`, backing off to a char boundary.
pub(crate) fn truncate_sql_bytes(sql: &str, max_bytes: usize) -> &str {
    if sql.len() <= max_bytes {
        return sql;
    }
    let mut end = max_bytes;
    while end > 0 && !sql.is_char_boundary(end) {
        end -= 1;
    }
    &sql[..end]
}

fn display_sql(config: &ExecConfig, sql: &str) -> String {
    match config.max_logged_sql_length {
        Some(max) if sql.len() > max => format!("{}...", truncate_sql_bytes(sql, max)),
        _ => sql.to_string(),
    }
}

/// Dispatch a tracing event at a runtime-determined level.
macro_rules! emit_at_level {
    ($level:expr, $($field:tt)*) => {
        match $level {
            Level::ERROR => tracing::error!($($field)*),
            Level::WARN  => tracing::warn!($($field)*),
            Level::INFO  => tracing::info!($($field)*),
            Level::DEBUG => tracing::debug!($($field)*),
            Level::TRACE => tracing::trace!($($field)*),
        }
    };
}

/// Log a statement that is about to run.
pub(crate) fn log_statement(config: &ExecConfig, kind: StatementKind, sql: &str) {
    if !config.log_sql {
        return;
    }
    let sql = display_sql(config, sql);
    emit_at_level!(
        config.level,
        target: TARGET,
        statement = %kind,
        sql = %sql,
        "executing statement"
    );
}

/// Log the outcome of a modification statement.
pub(crate) fn log_affected(config: &ExecConfig, kind: StatementKind, rows: u64) {
    if !config.log_sql {
        return;
    }
    emit_at_level!(
        config.level,
        target: TARGET,
        statement = %kind,
        rows_affected = rows,
        "statement finished"
    );
}
