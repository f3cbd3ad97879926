//! EXISTS probe generation.

use crate::ast::Predicate;
use crate::transpiler::conditions::where_clause;

/// Name of the single output column of [`exists`].
pub const EXISTS_COLUMN: &str = "exists_value";

/// `SELECT EXISTS(SELECT 1 FROM t WHERE ...) AS exists_value;`
///
/// The result is one row with `exists_value` of 0 or 1.
pub fn exists(table: &str, filter: Option<&Predicate>) -> String {
    let where_sql = match filter {
        Some(f) => where_clause(f),
        None => where_clause(&Predicate::default_filter()),
    };
    format!(
        "SELECT EXISTS(SELECT 1 FROM {} {}) AS {};",
        table, where_sql, EXISTS_COLUMN
    )
}
