use serde::{Deserialize, Serialize};

use crate::ast::ColumnDef;
use crate::error::{QueryError, QueryResult};

/// A single `ALTER TABLE` operation.
///
/// Documents describe it with four optional fields ([`AlterOptions`]); the
/// conversion fails unless exactly one of them is set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "AlterOptions", into = "AlterOptions")]
pub enum AlterOp {
    /// `ADD COLUMN <def>`, built through [`AlterOp::add_column`].
    AddColumn(NewColumn),
    /// `DROP COLUMN <name>`
    DropColumn(String),
    /// `RENAME TO <name>`
    RenameTable(String),
    /// `RENAME COLUMN <from> TO <to>`
    RenameColumn { from: String, to: String },
}

impl AlterOp {
    /// Checked `ADD COLUMN`: SQLite refuses PRIMARY KEY and UNIQUE on added columns.
    pub fn add_column(column: ColumnDef) -> QueryResult<Self> {
        if column.options.primary_key {
            return Err(QueryError::InvalidAddColumn {
                column: column.name,
                reason: "PRIMARY KEY is not allowed",
            });
        }
        if column.options.unique {
            return Err(QueryError::InvalidAddColumn {
                column: column.name,
                reason: "UNIQUE is not allowed",
            });
        }
        Ok(AlterOp::AddColumn(NewColumn(column)))
    }

    pub fn drop_column(name: impl Into<String>) -> Self {
        AlterOp::DropColumn(name.into())
    }

    pub fn rename_table(new_name: impl Into<String>) -> Self {
        AlterOp::RenameTable(new_name.into())
    }

    pub fn rename_column(from: impl Into<String>, to: impl Into<String>) -> Self {
        AlterOp::RenameColumn {
            from: from.into(),
            to: to.into(),
        }
    }
}

/// A column definition accepted by `ADD COLUMN`: no PRIMARY KEY, no UNIQUE.
///
/// Only [`AlterOp::add_column`] builds one:
///
/// ```compile_fail
/// use sqlq::ast::{AlterOp, ColumnDef, ColumnType, NewColumn};
///
/// let def = ColumnDef::new("id", ColumnType::Integer).primary_key();
/// let op = AlterOp::AddColumn(NewColumn(def));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct NewColumn(ColumnDef);

impl NewColumn {
    pub fn def(&self) -> &ColumnDef {
        &self.0
    }

    pub fn into_inner(self) -> ColumnDef {
        self.0
    }
}

/// `RENAME COLUMN` payload of [`AlterOptions`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenameColumn {
    pub column_name: String,
    pub new_column_name: String,
}

/// Loose form of [`AlterOp`]: one field per operation, all optional.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AlterOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub add_column: Option<ColumnDef>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub drop_column_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub new_table_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rename_column: Option<RenameColumn>,
}

impl TryFrom<AlterOptions> for AlterOp {
    type Error = QueryError;

    fn try_from(opts: AlterOptions) -> Result<Self, Self::Error> {
        let populated: Vec<&'static str> = [
            ("add_column", opts.add_column.is_some()),
            ("drop_column_name", opts.drop_column_name.is_some()),
            ("new_table_name", opts.new_table_name.is_some()),
            ("rename_column", opts.rename_column.is_some()),
        ]
        .into_iter()
        .filter_map(|(name, set)| set.then_some(name))
        .collect();

        if populated.len() > 1 {
            return Err(QueryError::AmbiguousAlter(populated));
        }

        if let Some(column) = opts.add_column {
            AlterOp::add_column(column)
        } else if let Some(name) = opts.drop_column_name {
            Ok(AlterOp::DropColumn(name))
        } else if let Some(name) = opts.new_table_name {
            Ok(AlterOp::RenameTable(name))
        } else if let Some(rename) = opts.rename_column {
            Ok(AlterOp::RenameColumn {
                from: rename.column_name,
                to: rename.new_column_name,
            })
        } else {
            Err(QueryError::EmptyAlter)
        }
    }
}

impl From<AlterOp> for AlterOptions {
    fn from(op: AlterOp) -> Self {
        let mut opts = AlterOptions::default();
        match op {
            AlterOp::AddColumn(column) => opts.add_column = Some(column.into_inner()),
            AlterOp::DropColumn(name) => opts.drop_column_name = Some(name),
            AlterOp::RenameTable(name) => opts.new_table_name = Some(name),
            AlterOp::RenameColumn { from, to } => {
                opts.rename_column = Some(RenameColumn {
                    column_name: from,
                    new_column_name: to,
                })
            }
        }
        opts
    }
}
