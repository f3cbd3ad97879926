//! Schema documents: tables, views and indexes described together.
//!
//! ```toml
//! [[tables]]
//! name = "element_counter"
//! columns = [
//!     { name = "user_name", type = "TEXT", options = { not_null = true, primary_key = true } },
//!     { name = "element_count", type = "INTEGER", options = { default = 0, not_null = true } },
//! ]
//!
//! [[views]]
//! name = "leaderboard"
//! table = "element_counter"
//! columns = ["user_name", "element_count"]
//! options = { order_by = [{ column = "element_count", ascending = false }] }
//! ```

use serde::{Deserialize, Serialize};

use crate::ast::{ColumnDef, Predicate, SelectColumn, SelectOptions};
use crate::error::{QueryError, QueryResult};
use crate::transpiler::{create_index, create_table, create_view, drop_index, drop_table, drop_view};

/// A table and its columns, in declaration order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Table {
    pub name: String,
    pub columns: Vec<ColumnDef>,
}

impl Table {
    /// Look up a column definition by name.
    pub fn column(&self, name: &str) -> Option<&ColumnDef> {
        self.columns.iter().find(|c| c.name == name)
    }
}

/// A view over a single table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct View {
    pub name: String,
    pub table: String,
    pub columns: Vec<SelectColumn>,
    #[serde(default)]
    pub options: Option<SelectOptions>,
}

/// An index, partial when `filter` is set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Index {
    pub name: String,
    pub table: String,
    pub columns: Vec<String>,
    #[serde(default, alias = "where")]
    pub filter: Option<Predicate>,
}

/// Everything needed to create (or drop) a database layout.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Schema {
    pub tables: Vec<Table>,
    pub views: Vec<View>,
    pub indexes: Vec<Index>,
}

impl Schema {
    /// Parse a TOML schema document.
    pub fn from_toml(doc: &str) -> QueryResult<Self> {
        toml::from_str(doc).map_err(|e| QueryError::Serialization(e.to_string()))
    }

    /// Parse a JSON schema document.
    pub fn from_json(doc: &str) -> QueryResult<Self> {
        serde_json::from_str(doc).map_err(|e| QueryError::Serialization(e.to_string()))
    }

    pub fn table(&self, name: &str) -> Option<&Table> {
        self.tables.iter().find(|t| t.name == name)
    }

    /// CREATE statements: tables, then views, then indexes.
    pub fn create_statements(&self, if_not_exists: bool) -> Vec<String> {
        let tables = self
            .tables
            .iter()
            .map(|t| create_table(&t.name, &t.columns, if_not_exists));
        let views = self.views.iter().map(|v| {
            create_view(
                &v.name,
                &v.table,
                &v.columns,
                v.options.as_ref(),
                if_not_exists,
            )
        });
        let indexes = self.indexes.iter().map(|i| {
            create_index(
                &i.name,
                &i.table,
                i.columns.as_slice(),
                if_not_exists,
                i.filter.as_ref(),
            )
        });
        tables.chain(views).chain(indexes).collect()
    }

    /// DROP statements in the reverse dependency order of [`Schema::create_statements`].
    pub fn drop_statements(&self, if_exists: bool) -> Vec<String> {
        let indexes = self.indexes.iter().rev().map(|i| drop_index(&i.name, if_exists));
        let views = self.views.iter().rev().map(|v| drop_view(&v.name, if_exists));
        let tables = self.tables.iter().rev().map(|t| drop_table(&t.name, if_exists));
        indexes.chain(views).chain(tables).collect()
    }
}
