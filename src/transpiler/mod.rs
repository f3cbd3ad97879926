//! SQL Transpiler for sqlq statement descriptions.
//!
//! Every builder is a pure function returning SQLite text with `?`
//! placeholders. Values are never embedded; bind them in the order the
//! placeholders appear.

pub mod clauses;
pub mod conditions;
pub mod ddl;
pub mod dml;

#[cfg(test)]
mod tests;

pub use clauses::row_number_over;
pub use conditions::where_clause;
pub use ddl::{
    alter_table, create_index, create_table, create_view, drop_index, drop_table, drop_view,
};
pub use dml::{EXISTS_COLUMN, exists, insert, remove, select, update};

use crate::ast::*;

/// Trait for converting AST nodes to SQL.
pub trait ToSql {
    /// Convert this node to a SQL string.
    fn to_sql(&self) -> String;
}

impl ToSql for Statement {
    fn to_sql(&self) -> String {
        match self {
            Statement::Select {
                table,
                columns,
                options,
            } => select(table, columns, Some(options)),
            Statement::Insert { table, columns } => insert(table, columns.as_slice()),
            Statement::Update {
                table,
                columns,
                filter,
            } => update(table, columns, filter.as_ref()),
            Statement::Delete { table, filter } => remove(table, filter.as_ref()),
            Statement::Exists { table, filter } => exists(table, filter.as_ref()),
            Statement::CreateTable {
                table,
                columns,
                if_not_exists,
            } => create_table(table, columns, *if_not_exists),
            Statement::AlterTable { table, alter } => alter_table(table, alter),
            Statement::DropTable { table, if_exists } => drop_table(table, *if_exists),
            Statement::CreateView {
                view,
                table,
                columns,
                options,
                if_not_exists,
            } => create_view(view, table, columns, Some(options), *if_not_exists),
            Statement::DropView { view, if_exists } => drop_view(view, *if_exists),
            Statement::CreateIndex {
                index,
                table,
                columns,
                if_not_exists,
                filter,
            } => create_index(
                index,
                table,
                columns.as_slice(),
                *if_not_exists,
                filter.as_ref(),
            ),
            Statement::DropIndex { index, if_exists } => drop_index(index, *if_exists),
        }
    }
}

impl ToSql for Predicate {
    fn to_sql(&self) -> String {
        where_clause(self)
    }
}
