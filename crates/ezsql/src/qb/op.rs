//! The closed operator catalog.

use std::fmt;

/// How many operands an operator takes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arity {
    Unary,
    Binary,
}

impl Arity {
    pub fn as_str(self) -> &'static str {
        match self {
            Arity::Unary => "unary",
            Arity::Binary => "binary",
        }
    }
}

/// Logical and comparison operators.
///
/// Each operator has a fixed surface syntax and arity; `Not` is the only unary one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operator {
    And,
    Or,
    Not,
    EqualTo,
    NotEqualTo,
    GreaterThan,
    GreaterThanOrEqualTo,
    LessThan,
    LessThanOrEqualTo,
}

impl Operator {
    /// Every operator, in declaration order.
    pub const ALL: [Operator; 9] = [
        Operator::And,
        Operator::Or,
        Operator::Not,
        Operator::EqualTo,
        Operator::NotEqualTo,
        Operator::GreaterThan,
        Operator::GreaterThanOrEqualTo,
        Operator::LessThan,
        Operator::LessThanOrEqualTo,
    ];

    /// The SQL token for this operator.
    pub const fn syntax(self) -> &'static str {
        match self {
            Operator::And => "AND",
            Operator::Or => "OR",
            Operator::Not => "NOT",
            Operator::EqualTo => "=",
            Operator::NotEqualTo => "<>",
            Operator::GreaterThan => ">",
            Operator::GreaterThanOrEqualTo => ">=",
            Operator::LessThan => "<",
            Operator::LessThanOrEqualTo => "<=",
        }
    }

    pub const fn arity(self) -> Arity {
        match self {
            Operator::Not => Arity::Unary,
            _ => Arity::Binary,
        }
    }

    pub const fn is_unary(self) -> bool {
        matches!(self.arity(), Arity::Unary)
    }

    pub const fn is_binary(self) -> bool {
        matches!(self.arity(), Arity::Binary)
    }

    /// `AND`/`OR`/`NOT`, as opposed to comparisons.
    pub const fn is_logical(self) -> bool {
        matches!(self, Operator::And | Operator::Or | Operator::Not)
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.syntax())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_not_is_unary() {
        for op in Operator::ALL {
            assert_eq!(op.is_unary(), op == Operator::Not, "{op:?}");
            assert_eq!(op.is_binary(), !op.is_unary());
        }
    }

    #[test]
    fn syntax_tokens() {
        assert_eq!(Operator::NotEqualTo.syntax(), "<>");
        assert_eq!(Operator::GreaterThanOrEqualTo.syntax(), ">=");
        assert_eq!(Operator::And.to_string(), "AND");
    }

    #[test]
    fn logical_classes() {
        assert!(Operator::Or.is_logical());
        assert!(!Operator::LessThan.is_logical());
    }
}
