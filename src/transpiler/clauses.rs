//! Clause fragments shared by the statement builders.

use crate::ast::*;

/// `table.column`, or `column` when unqualified.
pub fn qualified(table: Option<&str>, column: &str) -> String {
    match table {
        Some(t) => format!("{}.{}", t, column),
        None => column.to_string(),
    }
}

/// Comma-joined SELECT list.
pub fn select_columns(columns: &[SelectColumn]) -> String {
    columns
        .iter()
        .map(|col| match col {
            SelectColumn::Raw(expr) => expr.clone(),
            SelectColumn::Ref(c) => {
                let mut entry = qualified(c.table.as_deref(), &c.column);
                if let Some(alias) = &c.alias {
                    entry.push_str(" AS ");
                    entry.push_str(alias);
                }
                entry
            }
        })
        .collect::<Vec<_>>()
        .join(",")
}

/// `ORDER BY a ASC,t.b DESC`, or an empty string for no terms.
pub fn order_by(terms: &[OrderBy]) -> String {
    if terms.is_empty() {
        return String::new();
    }
    let terms: Vec<String> = terms
        .iter()
        .map(|t| {
            format!(
                "{} {}",
                qualified(t.table.as_deref(), &t.column),
                if t.ascending { "ASC" } else { "DESC" }
            )
        })
        .collect();
    format!("ORDER BY {}", terms.join(","))
}

/// Space-joined `INNER JOIN other ON other.col=this_col` terms.
pub fn inner_joins(joins: &[InnerJoin]) -> String {
    joins
        .iter()
        .map(|j| {
            format!(
                "INNER JOIN {} ON {}.{}={}",
                j.other_table, j.other_table, j.other_column, j.this_column
            )
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Row number window expression, e.g. for a ranked view column.
///
/// ```
/// use sqlq::ast::OrderBy;
/// use sqlq::transpiler::row_number_over;
///
/// assert_eq!(
///     row_number_over(&[OrderBy::desc("count")]),
///     "ROW_NUMBER () OVER (ORDER BY count DESC)"
/// );
/// ```
pub fn row_number_over(terms: &[OrderBy]) -> String {
    format!("ROW_NUMBER () OVER ({})", order_by(terms))
}

/// Inline modifiers in fixed order: UNIQUE, NOT NULL, DEFAULT.
fn column_modifiers(options: &ColumnOptions) -> String {
    let mut mods: Vec<String> = Vec::new();
    if options.unique {
        mods.push("UNIQUE".to_string());
    }
    if options.not_null {
        mods.push("NOT NULL".to_string());
    }
    if let Some(default) = &options.default {
        mods.push(format!("DEFAULT {}", default));
    }
    mods.iter().map(|m| format!(" {}", m)).collect()
}

/// `name TYPE[ UNIQUE][ NOT NULL][ DEFAULT v]`. PRIMARY KEY is table-level.
pub fn column_definition(column: &ColumnDef) -> String {
    format!(
        "{} {}{}",
        column.name,
        column.ty,
        column_modifiers(&column.options)
    )
}

/// `PRIMARY KEY (a,b)` over every primary key column, in declaration order.
pub fn primary_key_clause(columns: &[ColumnDef]) -> Option<String> {
    let keys: Vec<&str> = columns
        .iter()
        .filter(|c| c.options.primary_key)
        .map(|c| c.name.as_str())
        .collect();
    if keys.is_empty() {
        None
    } else {
        Some(format!("PRIMARY KEY ({})", keys.join(",")))
    }
}

/// `REFERENCES table (column)[ options]`.
pub fn references(foreign: &ForeignKey) -> String {
    let mut sql = format!("REFERENCES {} ({})", foreign.table, foreign.column);
    if !foreign.options.is_empty() {
        sql.push(' ');
        sql.push_str(&foreign.options.join(" "));
    }
    sql
}

/// `FOREIGN KEY (column) REFERENCES table (column)[ options]`.
pub fn foreign_key_clause(column: &str, foreign: &ForeignKey) -> String {
    format!("FOREIGN KEY ({}) {}", column, references(foreign))
}

/// Column definitions, the composite primary key, then the foreign keys.
pub fn table_elements(columns: &[ColumnDef]) -> String {
    let mut elements: Vec<String> = columns.iter().map(column_definition).collect();
    elements.extend(primary_key_clause(columns));
    elements.extend(
        columns
            .iter()
            .filter_map(|c| c.foreign.as_ref().map(|f| foreign_key_clause(&c.name, f))),
    );
    elements.join(",")
}
