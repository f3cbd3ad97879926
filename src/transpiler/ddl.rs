//! DDL statement builders (tables, views, indexes).

use crate::ast::*;
use crate::transpiler::clauses::{column_definition, references, table_elements};
use crate::transpiler::conditions::where_clause;
use crate::transpiler::dml::select;

fn if_not_exists_sql(flag: bool) -> &'static str {
    if flag { "IF NOT EXISTS " } else { "" }
}

fn drop_sql(kind: &str, name: &str, if_exists: bool) -> String {
    format!(
        "DROP {} {}{};",
        kind,
        if if_exists { "IF EXISTS " } else { "" },
        name
    )
}

/// Generate CREATE TABLE SQL.
///
/// Primary key columns are collected into one trailing `PRIMARY KEY (...)`
/// clause, followed by one `FOREIGN KEY` clause per referencing column.
pub fn create_table(table: &str, columns: &[ColumnDef], if_not_exists: bool) -> String {
    format!(
        "CREATE TABLE {}{} ({});",
        if_not_exists_sql(if_not_exists),
        table,
        table_elements(columns)
    )
}

/// Generate ALTER TABLE SQL for a single operation.
pub fn alter_table(table: &str, op: &AlterOp) -> String {
    let op_sql = match op {
        AlterOp::AddColumn(column) => {
            let column = column.def();
            let mut def = column_definition(column);
            // ADD COLUMN only accepts column constraints
            if let Some(foreign) = &column.foreign {
                def.push(' ');
                def.push_str(&references(foreign));
            }
            format!("ADD COLUMN {}", def)
        }
        AlterOp::DropColumn(name) => format!("DROP COLUMN {}", name),
        AlterOp::RenameTable(name) => format!("RENAME TO {}", name),
        AlterOp::RenameColumn { from, to } => format!("RENAME COLUMN {} TO {}", from, to),
    };
    format!("ALTER TABLE {} {};", table, op_sql)
}

/// Generate DROP TABLE SQL.
pub fn drop_table(table: &str, if_exists: bool) -> String {
    drop_sql("TABLE", table, if_exists)
}

/// Generate CREATE VIEW SQL over a SELECT of `table`.
pub fn create_view(
    view: &str,
    table: &str,
    columns: &[SelectColumn],
    options: Option<&SelectOptions>,
    if_not_exists: bool,
) -> String {
    format!(
        "CREATE VIEW {}{} AS {}",
        if_not_exists_sql(if_not_exists),
        view,
        select(table, columns, options)
    )
}

/// Generate DROP VIEW SQL.
pub fn drop_view(view: &str, if_exists: bool) -> String {
    drop_sql("VIEW", view, if_exists)
}

/// Generate CREATE INDEX SQL, partial when a filter is given.
pub fn create_index<S: AsRef<str>>(
    index: &str,
    table: &str,
    columns: &[S],
    if_not_exists: bool,
    filter: Option<&Predicate>,
) -> String {
    let cols: Vec<&str> = columns.iter().map(AsRef::as_ref).collect();
    let mut sql = format!(
        "CREATE INDEX {}{} ON {} ({})",
        if_not_exists_sql(if_not_exists),
        index,
        table,
        cols.join(",")
    );
    if let Some(filter) = filter {
        sql.push(' ');
        sql.push_str(&where_clause(filter));
    }
    sql.push(';');
    sql
}

/// Generate DROP INDEX SQL.
pub fn drop_index(index: &str, if_exists: bool) -> String {
    drop_sql("INDEX", index, if_exists)
}
