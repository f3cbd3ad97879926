use serde::{Deserialize, Serialize};

use crate::ast::{AlterOp, ColumnDef, Predicate, SelectColumn, SelectOptions, UpdateColumn};
use crate::error::{QueryError, QueryResult};

/// One statement description, as found in statement documents.
///
/// ```toml
/// [[statements]]
/// kind = "select"
/// table = "contacts"
/// columns = ["name", "email"]
/// options = { filter = { column = "name", lower = true }, limit = 10 }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Statement {
    Select {
        table: String,
        columns: Vec<SelectColumn>,
        #[serde(default)]
        options: SelectOptions,
    },
    Insert {
        table: String,
        columns: Vec<String>,
    },
    Update {
        table: String,
        columns: Vec<UpdateColumn>,
        #[serde(default)]
        filter: Option<Predicate>,
    },
    Delete {
        table: String,
        #[serde(default)]
        filter: Option<Predicate>,
    },
    Exists {
        table: String,
        #[serde(default)]
        filter: Option<Predicate>,
    },
    CreateTable {
        table: String,
        columns: Vec<ColumnDef>,
        #[serde(default)]
        if_not_exists: bool,
    },
    AlterTable {
        table: String,
        alter: AlterOp,
    },
    DropTable {
        table: String,
        #[serde(default)]
        if_exists: bool,
    },
    CreateView {
        view: String,
        table: String,
        columns: Vec<SelectColumn>,
        #[serde(default)]
        options: SelectOptions,
        #[serde(default)]
        if_not_exists: bool,
    },
    DropView {
        view: String,
        #[serde(default)]
        if_exists: bool,
    },
    CreateIndex {
        index: String,
        table: String,
        columns: Vec<String>,
        #[serde(default)]
        if_not_exists: bool,
        #[serde(default)]
        filter: Option<Predicate>,
    },
    DropIndex {
        index: String,
        #[serde(default)]
        if_exists: bool,
    },
}

impl Statement {
    /// Whether running the statement yields rows rather than a change count.
    pub fn is_query(&self) -> bool {
        matches!(self, Statement::Select { .. } | Statement::Exists { .. })
    }

    /// Number of parameters the rendered statement expects.
    pub fn placeholder_count(&self) -> usize {
        let filter_count =
            |f: &Option<Predicate>| f.as_ref().map_or(1, Predicate::placeholder_count);
        match self {
            Statement::Select { options, .. } | Statement::CreateView { options, .. } => options
                .filter
                .as_ref()
                .map_or(0, Predicate::placeholder_count),
            Statement::Insert { columns, .. } => columns.len(),
            Statement::Update {
                columns, filter, ..
            } => columns.len() + filter_count(filter),
            Statement::Delete { filter, .. } | Statement::Exists { filter, .. } => {
                filter_count(filter)
            }
            Statement::CreateIndex { filter, .. } => {
                filter.as_ref().map_or(0, Predicate::placeholder_count)
            }
            Statement::CreateTable { .. }
            | Statement::AlterTable { .. }
            | Statement::DropTable { .. }
            | Statement::DropView { .. }
            | Statement::DropIndex { .. } => 0,
        }
    }
}

/// A file of statements: `[[statements]]` in TOML, `{"statements": [...]}` in JSON.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StatementFile {
    #[serde(default)]
    pub statements: Vec<Statement>,
}

impl StatementFile {
    /// Parse a TOML statement document.
    pub fn from_toml(doc: &str) -> QueryResult<Self> {
        toml::from_str(doc).map_err(|e| QueryError::Serialization(e.to_string()))
    }

    /// Parse a JSON statement document.
    pub fn from_json(doc: &str) -> QueryResult<Self> {
        serde_json::from_str(doc).map_err(|e| QueryError::Serialization(e.to_string()))
    }
}
