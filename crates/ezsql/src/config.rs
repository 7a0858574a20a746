//! Rendering and execution settings.

use crate::qb::QuotePolicy;
use tracing::Level;

/// Options for [`SqlStatement::render_with`](crate::SqlStatement::render_with).
///
/// The default matches plain `render()`: quoted literals are emitted verbatim.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenderOptions {
    /// How single quotes inside quoted literals are handled.
    pub quote_policy: QuotePolicy,
}

impl RenderOptions {
    /// Create options with defaults (verbatim literals).
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the quote policy.
    pub fn with_quote_policy(mut self, policy: QuotePolicy) -> Self {
        self.quote_policy = policy;
        self
    }

    /// Shorthand for `with_quote_policy(QuotePolicy::Escape)`.
    pub fn escape_quotes(self) -> Self {
        self.with_quote_policy(QuotePolicy::Escape)
    }
}

/// Settings for the `execute` hooks on the statement builders.
///
/// Logging is on by default; SQL is logged at `DEBUG` under the `ezsql.sql`
/// target and truncated to 200 bytes.
#[derive(Debug, Clone)]
pub struct ExecConfig {
    /// Emit a tracing event for every executed statement.
    pub log_sql: bool,
    /// Tracing event level to emit at.
    pub level: Level,
    /// Truncate logged SQL (in bytes). `None` means no truncation.
    pub max_logged_sql_length: Option<usize>,
    /// Options used to render the statement before it is handed to the executor.
    pub render: RenderOptions,
}

impl Default for ExecConfig {
    fn default() -> Self {
        Self {
            log_sql: true,
            level: Level::DEBUG,
            max_logged_sql_length: Some(200),
            render: RenderOptions::default(),
        }
    }
}

impl ExecConfig {
    /// Create a new configuration with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Disable SQL logging.
    pub fn without_logging(mut self) -> Self {
        self.log_sql = false;
        self
    }

    /// Override the tracing event level.
    pub fn level(mut self, level: Level) -> Self {
        self.level = level;
        self
    }

    /// Set maximum SQL length to log.
    pub fn max_logged_sql_length(mut self, len: usize) -> Self {
        self.max_logged_sql_length = Some(len);
        self
    }

    /// Disable SQL truncation.
    pub fn no_truncate(mut self) -> Self {
        self.max_logged_sql_length = None;
        self
    }

    /// Render options used before execution.
    pub fn with_render_options(mut self, render: RenderOptions) -> Self {
        self.render = render;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let cfg = ExecConfig::default();
        assert!(cfg.log_sql);
        assert_eq!(cfg.level, Level::DEBUG);
        assert_eq!(cfg.max_logged_sql_length, Some(200));
        assert_eq!(cfg.render.quote_policy, QuotePolicy::Verbatim);
    }

    #[test]
    fn builder_chain() {
        let cfg = ExecConfig::new()
            .without_logging()
            .no_truncate()
            .with_render_options(RenderOptions::new().escape_quotes());
        assert!(!cfg.log_sql);
        assert_eq!(cfg.max_logged_sql_length, None);
        assert_eq!(cfg.render.quote_policy, QuotePolicy::Escape);
    }
}
