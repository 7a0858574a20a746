//! Output buffer shared by every renderer, plus the bound-parameter form.

use crate::config::RenderOptions;
use crate::ident::Identifier;
use crate::qb::literal::{Literal, QuotePolicy};
use crate::value::Value;

/// A collection of bound values in placeholder order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ParamList {
    params: Vec<Value>,
}

impl ParamList {
    /// Create a new empty parameter list.
    pub fn new() -> Self {
        Self { params: Vec::new() }
    }

    /// Add a value and return its 1-based index.
    pub fn push(&mut self, value: Value) -> usize {
        self.params.push(value);
        self.params.len()
    }

    pub fn len(&self) -> usize {
        self.params.len()
    }

    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    pub fn as_slice(&self) -> &[Value] {
        &self.params
    }

    pub fn into_vec(self) -> Vec<Value> {
        self.params
    }
}

/// SQL text with `$n` placeholders and the values that fill them.
#[derive(Clone, Debug, PartialEq)]
pub struct BoundStatement {
    pub sql: String,
    pub params: ParamList,
}

impl BoundStatement {
    pub fn sql(&self) -> &str {
        &self.sql
    }

    pub fn params(&self) -> &[Value] {
        self.params.as_slice()
    }
}

/// Where literals go while a statement is written out.
#[derive(Debug)]
enum LiteralSink {
    Inline(QuotePolicy),
    Bound(ParamList),
}

/// Accumulates rendered SQL.
///
/// Literals are either inlined as text or replaced by `$n` placeholders,
/// depending on how the writer was created.
#[derive(Debug)]
pub struct SqlWriter {
    sql: String,
    literals: LiteralSink,
}

impl SqlWriter {
    pub(crate) fn inline(options: &RenderOptions) -> Self {
        Self {
            sql: String::new(),
            literals: LiteralSink::Inline(options.quote_policy),
        }
    }

    pub(crate) fn bound() -> Self {
        Self {
            sql: String::new(),
            literals: LiteralSink::Bound(ParamList::new()),
        }
    }

    pub(crate) fn push(&mut self, sql: &str) -> &mut Self {
        self.sql.push_str(sql);
        self
    }

    pub(crate) fn push_ident(&mut self, ident: &Identifier) -> &mut Self {
        ident.write_sql(&mut self.sql);
        self
    }

    pub(crate) fn push_literal(&mut self, literal: &Literal) -> &mut Self {
        match &mut self.literals {
            LiteralSink::Inline(policy) => literal.write_sql(&mut self.sql, *policy),
            LiteralSink::Bound(params) => {
                let idx = params.push(literal.value().clone());
                self.sql.push('$');
                self.sql.push_str(&idx.to_string());
            }
        }
        self
    }

    /// Write `items` separated by `", "`.
    pub(crate) fn push_list<T>(
        &mut self,
        items: impl IntoIterator<Item = T>,
        mut write: impl FnMut(&mut Self, T),
    ) -> &mut Self {
        for (i, item) in items.into_iter().enumerate() {
            if i > 0 {
                self.sql.push_str(", ");
            }
            write(&mut *self, item);
        }
        self
    }

    pub(crate) fn finish(self) -> String {
        self.sql
    }

    pub(crate) fn finish_bound(self) -> BoundStatement {
        let params = match self.literals {
            LiteralSink::Bound(params) => params,
            LiteralSink::Inline(_) => ParamList::new(),
        };
        BoundStatement {
            sql: self.sql,
            params,
        }
    }
}
