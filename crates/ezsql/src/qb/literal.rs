//! Literals: a value plus a quoting directive.

use crate::value::Value;
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use uuid::Uuid;

const SQL_NULL: &str = "NULL";
const QUOTE: char = '\'';

/// What to do with single quotes inside a quoted literal.
///
/// `Verbatim` is the plain `render()` behavior and leaves the text untouched,
/// so `O'Brien` renders as `'O'Brien'`. Use `Escape` (doubling `'` to `''`)
/// or bound parameters when values come from untrusted input.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum QuotePolicy {
    #[default]
    Verbatim,
    Escape,
}

/// A constant value and whether it is wrapped in single quotes when rendered.
///
/// The caller picks the quoting; nothing checks that it matches the column type.
#[derive(Debug, Clone, PartialEq)]
pub struct Literal {
    value: Value,
    requires_quotes: bool,
}

impl Literal {
    /// Create a literal with an explicit quoting directive.
    pub fn new(value: impl Into<Value>, requires_quotes: bool) -> Self {
        Self {
            value: value.into(),
            requires_quotes,
        }
    }

    /// `NULL`. Renders the same whether quoted or not.
    pub fn null() -> Self {
        Self::new(Value::Null, false)
    }

    /// Integer literal, unquoted.
    pub fn int(value: impl Into<i64>) -> Self {
        Self::new(Value::Int(value.into()), false)
    }

    /// Floating point literal, unquoted.
    pub fn float(value: f64) -> Self {
        Self::new(Value::Float(value), false)
    }

    /// Boolean literal, unquoted.
    pub fn bool(value: bool) -> Self {
        Self::new(Value::Bool(value), false)
    }

    /// Text literal, quoted.
    pub fn text(value: impl Into<String>) -> Self {
        Self::new(Value::Text(value.into()), true)
    }

    /// Date literal, quoted (`'2024-01-31'`).
    pub fn date(value: NaiveDate) -> Self {
        Self::new(Value::Date(value), true)
    }

    /// Time literal, quoted.
    pub fn time(value: NaiveTime) -> Self {
        Self::new(Value::Time(value), true)
    }

    /// Timestamp literal, quoted (`'2024-01-31 12:00:00'`).
    pub fn timestamp(value: NaiveDateTime) -> Self {
        Self::new(Value::Timestamp(value), true)
    }

    /// UUID literal, quoted.
    pub fn uuid(value: Uuid) -> Self {
        Self::new(Value::Uuid(value), true)
    }

    pub fn value(&self) -> &Value {
        &self.value
    }

    pub fn requires_quotes(&self) -> bool {
        self.requires_quotes
    }

    /// Render with the default (verbatim) quote policy.
    pub fn render(&self) -> String {
        self.render_with(QuotePolicy::Verbatim)
    }

    /// Render with an explicit quote policy.
    pub fn render_with(&self, policy: QuotePolicy) -> String {
        let mut out = String::new();
        self.write_sql(&mut out, policy);
        out
    }

    pub(crate) fn write_sql(&self, out: &mut String, policy: QuotePolicy) {
        let Some(raw) = self.value.to_text() else {
            out.push_str(SQL_NULL);
            return;
        };

        // NaN and the infinities are only valid SQL as quoted strings.
        let non_finite = matches!(self.value, Value::Float(v) if !v.is_finite());
        if !self.requires_quotes && !non_finite {
            out.push_str(&raw);
            return;
        }

        out.push(QUOTE);
        match policy {
            QuotePolicy::Verbatim => out.push_str(&raw),
            QuotePolicy::Escape => {
                for ch in raw.chars() {
                    if ch == QUOTE {
                        out.push(QUOTE);
                    }
                    out.push(ch);
                }
            }
        }
        out.push(QUOTE);
    }
}

impl From<Value> for Literal {
    /// Text and temporal values are quoted; numbers, booleans and NULL are not.
    fn from(value: Value) -> Self {
        let requires_quotes = matches!(
            value,
            Value::Text(_) | Value::Date(_) | Value::Time(_) | Value::Timestamp(_) | Value::Uuid(_)
        );
        Self {
            value,
            requires_quotes,
        }
    }
}
