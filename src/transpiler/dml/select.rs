//! SELECT SQL generation.

use crate::ast::*;
use crate::transpiler::clauses::{inner_joins, order_by, select_columns};
use crate::transpiler::conditions::where_clause;

/// Generate SELECT SQL.
///
/// Clause order is fixed:
/// `SELECT [DISTINCT] cols FROM table [joins] [WHERE] [ORDER BY] [LIMIT [OFFSET]]`,
/// and empty clauses are left out entirely.
pub fn select(table: &str, columns: &[SelectColumn], options: Option<&SelectOptions>) -> String {
    let mut sql = String::from("SELECT ");

    let Some(options) = options else {
        sql.push_str(&select_columns(columns));
        sql.push_str(" FROM ");
        sql.push_str(table);
        sql.push(';');
        return sql;
    };

    if options.distinct {
        sql.push_str("DISTINCT ");
    }
    sql.push_str(&select_columns(columns));
    sql.push_str(" FROM ");
    sql.push_str(table);

    let limit = options.limit.map(|n| match options.offset {
        Some(m) => format!("LIMIT {} OFFSET {}", n, m),
        None => format!("LIMIT {}", n),
    });

    let clauses = [
        inner_joins(&options.inner_joins),
        options.filter.as_ref().map(where_clause).unwrap_or_default(),
        order_by(&options.order_by),
        limit.unwrap_or_default(),
    ];
    for clause in clauses.iter().filter(|c| !c.is_empty()) {
        sql.push(' ');
        sql.push_str(clause);
    }

    sql.push(';');
    sql
}
