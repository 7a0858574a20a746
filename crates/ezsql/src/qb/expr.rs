//! Expression trees for projections and WHERE filters.
//!
//! [`Expression`] is a closed set of node kinds rendered by one exhaustive match:
//! - identifier and literal leaves
//! - unary and binary operator nodes, validated against the operator's arity
//! - explicit groups, rendered inside parentheses
//!
//! Rendering never adds parentheses on its own. `a OR b AND c` is emitted exactly
//! as built; wrap sub-trees with [`Expression::group`] when mixing `AND` and `OR`.

use crate::config::RenderOptions;
use crate::error::{SqlError, SqlResult};
use crate::ident::{Identifier, IntoIdentifier};
use crate::qb::literal::Literal;
use crate::qb::op::{Arity, Operator};
use crate::qb::param::{BoundStatement, SqlWriter};

/// Expression node.
#[derive(Clone, Debug, PartialEq)]
pub enum Expression {
    /// Bare column or table name.
    Identifier(Identifier),

    /// Constant value.
    Literal(Literal),

    /// `<op> <operand>`
    Unary(UnaryExpression),

    /// `<left> <op> <right>`
    Binary(BinaryExpression),

    /// `(<inner>)`
    Group(Box<Expression>),
}

/// A prefix operator applied to one operand.
///
/// Only obtainable through [`Expression::unary`] (or the `not` shorthand),
/// so the operator is always unary.
#[derive(Clone, Debug, PartialEq)]
pub struct UnaryExpression {
    op: Operator,
    operand: Box<Expression>,
}

impl UnaryExpression {
    pub fn operator(&self) -> Operator {
        self.op
    }

    pub fn operand(&self) -> &Expression {
        &self.operand
    }
}

/// An infix operator applied to two operands.
///
/// Only obtainable through [`Expression::binary`] and the comparison shorthands,
/// so the operator is always binary.
#[derive(Clone, Debug, PartialEq)]
pub struct BinaryExpression {
    left: Box<Expression>,
    op: Operator,
    right: Box<Expression>,
}

impl BinaryExpression {
    pub fn left(&self) -> &Expression {
        &self.left
    }

    pub fn operator(&self) -> Operator {
        self.op
    }

    pub fn right(&self) -> &Expression {
        &self.right
    }
}

fn check_arity(op: Operator, found: Arity) -> SqlResult<()> {
    let expected = op.arity();
    if expected == found {
        Ok(())
    } else {
        Err(SqlError::ArityMismatch {
            operator: op.syntax(),
            expected: expected.as_str(),
            found: found.as_str(),
        })
    }
}

impl Expression {
    /// Identifier leaf from a name, validated.
    pub fn column(name: impl IntoIdentifier) -> SqlResult<Self> {
        Ok(Expression::Identifier(name.into_identifier()?))
    }

    /// Literal leaf.
    pub fn literal(literal: Literal) -> Self {
        Expression::Literal(literal)
    }

    /// Unary node. Fails with `ArityMismatch` unless `op` is unary.
    pub fn unary(op: Operator, operand: impl Into<Expression>) -> SqlResult<Self> {
        check_arity(op, Arity::Unary)?;
        Ok(Expression::Unary(UnaryExpression {
            op,
            operand: Box::new(operand.into()),
        }))
    }

    /// Binary node. Fails with `ArityMismatch` unless `op` is binary.
    pub fn binary(
        left: impl Into<Expression>,
        op: Operator,
        right: impl Into<Expression>,
    ) -> SqlResult<Self> {
        check_arity(op, Arity::Binary)?;
        Ok(Self::binary_unchecked(left.into(), op, right.into()))
    }

    fn binary_unchecked(left: Expression, op: Operator, right: Expression) -> Self {
        Expression::Binary(BinaryExpression {
            left: Box::new(left),
            op,
            right: Box::new(right),
        })
    }

    /// `left = right`
    pub fn equal_to(left: impl Into<Expression>, right: impl Into<Expression>) -> Self {
        Self::binary_unchecked(left.into(), Operator::EqualTo, right.into())
    }

    /// `left <> right`
    pub fn not_equal_to(left: impl Into<Expression>, right: impl Into<Expression>) -> Self {
        Self::binary_unchecked(left.into(), Operator::NotEqualTo, right.into())
    }

    /// `left > right`
    pub fn greater_than(left: impl Into<Expression>, right: impl Into<Expression>) -> Self {
        Self::binary_unchecked(left.into(), Operator::GreaterThan, right.into())
    }

    /// `left >= right`
    pub fn greater_than_or_equal_to(
        left: impl Into<Expression>,
        right: impl Into<Expression>,
    ) -> Self {
        Self::binary_unchecked(left.into(), Operator::GreaterThanOrEqualTo, right.into())
    }

    /// `left < right`
    pub fn less_than(left: impl Into<Expression>, right: impl Into<Expression>) -> Self {
        Self::binary_unchecked(left.into(), Operator::LessThan, right.into())
    }

    /// `left <= right`
    pub fn less_than_or_equal_to(
        left: impl Into<Expression>,
        right: impl Into<Expression>,
    ) -> Self {
        Self::binary_unchecked(left.into(), Operator::LessThanOrEqualTo, right.into())
    }

    /// Shorthand for [`Expression::equal_to`].
    pub fn eq(left: impl Into<Expression>, right: impl Into<Expression>) -> Self {
        Self::equal_to(left, right)
    }

    /// Shorthand for [`Expression::not_equal_to`].
    pub fn ne(left: impl Into<Expression>, right: impl Into<Expression>) -> Self {
        Self::not_equal_to(left, right)
    }

    pub fn gt(left: impl Into<Expression>, right: impl Into<Expression>) -> Self {
        Self::greater_than(left, right)
    }

    pub fn gte(left: impl Into<Expression>, right: impl Into<Expression>) -> Self {
        Self::greater_than_or_equal_to(left, right)
    }

    pub fn lt(left: impl Into<Expression>, right: impl Into<Expression>) -> Self {
        Self::less_than(left, right)
    }

    pub fn lte(left: impl Into<Expression>, right: impl Into<Expression>) -> Self {
        Self::less_than_or_equal_to(left, right)
    }

    /// `self AND rhs`
    pub fn and(self, rhs: impl Into<Expression>) -> Self {
        Self::binary_unchecked(self, Operator::And, rhs.into())
    }

    /// `self OR rhs`
    pub fn or(self, rhs: impl Into<Expression>) -> Self {
        Self::binary_unchecked(self, Operator::Or, rhs.into())
    }

    /// `NOT operand`
    pub fn not(operand: impl Into<Expression>) -> Self {
        Expression::Unary(UnaryExpression {
            op: Operator::Not,
            operand: Box::new(operand.into()),
        })
    }

    /// Wrap in parentheses.
    pub fn group(self) -> Self {
        Expression::Group(Box::new(self))
    }

    /// Render with the default (verbatim) quote policy.
    pub fn render(&self) -> String {
        self.render_with(&RenderOptions::default())
    }

    /// Render with explicit options.
    pub fn render_with(&self, options: &RenderOptions) -> String {
        let mut w = SqlWriter::inline(options);
        self.write_sql(&mut w);
        w.finish()
    }

    /// Render with literals replaced by `$n` placeholders.
    pub fn render_bound(&self) -> BoundStatement {
        let mut w = SqlWriter::bound();
        self.write_sql(&mut w);
        w.finish_bound()
    }

    pub(crate) fn write_sql(&self, w: &mut SqlWriter) {
        // Long AND/OR chains built in a loop nest one level per term, so the
        // tree is walked with an explicit stack instead of recursion.
        let mut stack = vec![Step::Node(self)];
        while let Some(step) = stack.pop() {
            let expr = match step {
                Step::Text(sql) => {
                    w.push(sql);
                    continue;
                }
                Step::Node(expr) => expr,
            };
            match expr {
                Expression::Identifier(ident) => {
                    w.push_ident(ident);
                }
                Expression::Literal(literal) => {
                    w.push_literal(literal);
                }
                Expression::Unary(node) => {
                    w.push(node.op.syntax()).push(" ");
                    stack.push(Step::Node(&node.operand));
                }
                Expression::Binary(node) => {
                    stack.push(Step::Node(&node.right));
                    stack.push(Step::Text(" "));
                    stack.push(Step::Text(node.op.syntax()));
                    stack.push(Step::Text(" "));
                    stack.push(Step::Node(&node.left));
                }
                Expression::Group(inner) => {
                    w.push("(");
                    stack.push(Step::Text(")"));
                    stack.push(Step::Node(inner));
                }
            }
        }
    }

    /// Number of literal leaves, i.e. how many parameters `render_bound` extracts.
    pub fn literal_count(&self) -> usize {
        let mut count = 0;
        let mut stack = vec![self];
        while let Some(expr) = stack.pop() {
            match expr {
                Expression::Identifier(_) => {}
                Expression::Literal(_) => count += 1,
                Expression::Unary(node) => stack.push(&node.operand),
                Expression::Binary(node) => {
                    stack.push(&node.right);
                    stack.push(&node.left);
                }
                Expression::Group(inner) => stack.push(inner),
            }
        }
        count
    }

    /// Move the children of `self` onto `out`, leaving NULL literals behind.
    fn detach_children(&mut self, out: &mut Vec<Expression>) {
        fn take(slot: &mut Expression) -> Expression {
            std::mem::replace(slot, Expression::Literal(Literal::null()))
        }
        match self {
            Expression::Identifier(_) | Expression::Literal(_) => {}
            Expression::Unary(node) => out.push(take(&mut node.operand)),
            Expression::Binary(node) => {
                out.push(take(&mut node.left));
                out.push(take(&mut node.right));
            }
            Expression::Group(inner) => out.push(take(inner)),
        }
    }
}

/// Pending work while writing an expression.
enum Step<'a> {
    Node(&'a Expression),
    Text(&'static str),
}

impl Drop for Expression {
    fn drop(&mut self) {
        let mut pending = Vec::new();
        self.detach_children(&mut pending);
        while let Some(mut expr) = pending.pop() {
            expr.detach_children(&mut pending);
        }
    }
}

impl From<Identifier> for Expression {
    fn from(ident: Identifier) -> Self {
        Expression::Identifier(ident)
    }
}

impl From<&Identifier> for Expression {
    fn from(ident: &Identifier) -> Self {
        Expression::Identifier(ident.clone())
    }
}

impl From<Literal> for Expression {
    fn from(literal: Literal) -> Self {
        Expression::Literal(literal)
    }
}

/// Anything usable in a SELECT projection list.
pub trait Selectable {
    fn into_selection(self) -> Expression;
}

impl<T: Into<Expression>> Selectable for T {
    fn into_selection(self) -> Expression {
        self.into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::Value;

    fn id(name: &str) -> Identifier {
        Identifier::new(name).unwrap()
    }

    #[test]
    fn binary_renders_with_single_spaces() {
        let expr = Expression::binary(id("age"), Operator::GreaterThan, Literal::new(18, false))
            .unwrap();
        assert_eq!(expr.render(), "age > 18");
    }

    #[test]
    fn unary_renders_prefix() {
        let expr = Expression::unary(Operator::Not, id("banned")).unwrap();
        assert_eq!(expr.render(), "NOT banned");
    }

    #[test]
    fn binary_rejects_unary_operator() {
        let err = Expression::binary(id("a"), Operator::Not, id("b")).unwrap_err();
        assert!(err.is_arity_mismatch());
    }

    #[test]
    fn unary_rejects_binary_operator() {
        let err = Expression::unary(Operator::And, id("a")).unwrap_err();
        match err {
            SqlError::ArityMismatch {
                operator,
                expected,
                found,
            } => {
                assert_eq!(operator, "AND");
                assert_eq!(expected, "binary");
                assert_eq!(found, "unary");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn no_automatic_parentheses() {
        let a = Expression::equal_to(id("a"), Literal::int(1));
        let b = Expression::equal_to(id("b"), Literal::int(2));
        let c = Expression::equal_to(id("c"), Literal::int(3));
        assert_eq!(a.or(b).and(c).render(), "a = 1 OR b = 2 AND c = 3");
    }

    #[test]
    fn explicit_group() {
        let a = Expression::equal_to(id("a"), Literal::int(1));
        let b = Expression::equal_to(id("b"), Literal::int(2));
        let c = Expression::equal_to(id("c"), Literal::int(3));
        assert_eq!(
            a.or(b).group().and(c).render(),
            "(a = 1 OR b = 2) AND c = 3"
        );
    }

    #[test]
    fn not_of_group() {
        let inner = Expression::less_than_or_equal_to(id("score"), Literal::float(0.5));
        assert_eq!(
            Expression::not(inner.group()).render(),
            "NOT (score <= 0.5)"
        );
    }

    #[test]
    fn comparison_tokens() {
        let cases = [
            (Expression::not_equal_to(id("x"), Literal::int(1)), "x <> 1"),
            (Expression::greater_than_or_equal_to(id("x"), Literal::int(1)), "x >= 1"),
            (Expression::less_than(id("x"), Literal::int(1)), "x < 1"),
        ];
        for (expr, sql) in cases {
            assert_eq!(expr.render(), sql);
        }
    }

    #[test]
    fn render_with_escape_policy() {
        let expr = Expression::equal_to(id("name"), Literal::text("O'Brien"));
        assert_eq!(expr.render(), "name = 'O'Brien'");
        assert_eq!(
            expr.render_with(&RenderOptions::new().escape_quotes()),
            "name = 'O''Brien'"
        );
    }

    #[test]
    fn render_bound_extracts_literals() {
        let expr = Expression::greater_than(id("age"), Literal::int(18))
            .and(Expression::equal_to(id("name"), Literal::text("bob")));
        let bound = expr.render_bound();
        assert_eq!(bound.sql(), "age > $1 AND name = $2");
        assert_eq!(bound.params(), &[Value::Int(18), Value::Text("bob".into())]);
        assert_eq!(expr.literal_count(), 2);
    }

    #[test]
    fn shorthand_constructors() {
        assert_eq!(Expression::eq(id("a"), Literal::int(1)).render(), "a = 1");
        assert_eq!(Expression::ne(id("a"), Literal::int(1)).render(), "a <> 1");
        assert_eq!(Expression::gt(id("a"), id("b")).render(), "a > b");
        assert_eq!(
            Expression::lte(id("a"), Literal::null()).render(),
            "a <= NULL"
        );
    }

    #[test]
    fn deep_or_chain_renders_and_drops() {
        let mut expr = Expression::eq(id("a"), Literal::int(0));
        for i in 1..100_000 {
            expr = expr.or(Expression::eq(id("a"), Literal::int(i)));
        }
        let sql = expr.render();
        assert!(sql.starts_with("a = 0 OR a = 1 OR "));
        assert!(sql.ends_with(" OR a = 99999"));
        assert_eq!(expr.literal_count(), 100_000);
        assert_eq!(expr.render_bound().params().len(), 100_000);
        drop(expr);
    }

    #[test]
    fn deep_nesting_of_not_and_group() {
        let mut expr = Expression::from(id("flag"));
        for _ in 0..100_000 {
            expr = Expression::not(expr.group());
        }
        let sql = expr.render();
        assert!(sql.starts_with("NOT (NOT (NOT ("));
        assert!(sql.ends_with("(flag)))"));
        assert_eq!(sql.matches('(').count(), 100_000);
    }

    #[test]
    fn column_validates_name() {
        assert!(Expression::column("ok_name").is_ok());
        assert!(Expression::column("bad name").is_err());
    }
}
