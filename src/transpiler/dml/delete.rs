//! DELETE SQL generation.

use crate::ast::Predicate;
use crate::transpiler::conditions::where_clause;

/// Generate DELETE SQL. Without a filter the row is matched on `id`.
pub fn remove(table: &str, filter: Option<&Predicate>) -> String {
    let default_filter;
    let filter = match filter {
        Some(f) => f,
        None => {
            default_filter = Predicate::default_filter();
            &default_filter
        }
    };
    format!("DELETE FROM {} {};", table, where_clause(filter))
}
