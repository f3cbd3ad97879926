//! Shorthand constructors for predicate leaves.

use crate::ast::{Operator, Predicate};

fn leaf(column: &str, op: Operator) -> Predicate {
    Predicate::new(column).op(op)
}

/// `column=?`
pub fn eq(column: &str) -> Predicate {
    leaf(column, Operator::Eq)
}

/// `column!=?`
pub fn ne(column: &str) -> Predicate {
    leaf(column, Operator::Ne)
}

/// `column>?`
pub fn gt(column: &str) -> Predicate {
    leaf(column, Operator::Gt)
}

/// `column>=?`
pub fn gte(column: &str) -> Predicate {
    leaf(column, Operator::Gte)
}

/// `column<?`
pub fn lt(column: &str) -> Predicate {
    leaf(column, Operator::Lt)
}

/// `column<=?`
pub fn lte(column: &str) -> Predicate {
    leaf(column, Operator::Lte)
}

/// Case-insensitive equality: `lower(column)=?`.
pub fn eq_ignore_case(column: &str) -> Predicate {
    eq(column).lowercase()
}
