//! UPDATE SQL generation.

use crate::ast::*;
use crate::transpiler::conditions::where_clause;

fn assignment_sql(column: &UpdateColumn) -> String {
    match column {
        UpdateColumn::Name(name) | UpdateColumn::Op { column: name, op: None } => {
            format!("{}=?", name)
        }
        UpdateColumn::Op {
            column,
            op: Some(op),
        } => format!("{}={}{}?", column, column, op.symbol()),
    }
}

/// Generate UPDATE SQL. Without a filter the row is matched on `id`.
///
/// Parameters bind SET values first, then the filter leaves.
pub fn update(table: &str, columns: &[UpdateColumn], filter: Option<&Predicate>) -> String {
    let set_clauses: Vec<String> = columns.iter().map(assignment_sql).collect();
    let where_sql = match filter {
        Some(f) => where_clause(f),
        None => where_clause(&Predicate::default_filter()),
    };
    format!("UPDATE {} SET {} {};", table, set_clauses.join(","), where_sql)
}
