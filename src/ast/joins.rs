use serde::{Deserialize, Serialize};

use crate::ast::Predicate;

/// `INNER JOIN other_table ON other_table.other_column=this_column`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InnerJoin {
    pub this_column: String,
    #[serde(alias = "other_table_name")]
    pub other_table: String,
    pub other_column: String,
}

impl InnerJoin {
    pub fn new(
        this_column: impl Into<String>,
        other_table: impl Into<String>,
        other_column: impl Into<String>,
    ) -> Self {
        Self {
            this_column: this_column.into(),
            other_table: other_table.into(),
            other_column: other_column.into(),
        }
    }
}

/// One ORDER BY term.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderBy {
    pub column: String,
    #[serde(default, alias = "table_name", skip_serializing_if = "Option::is_none")]
    pub table: Option<String>,
    #[serde(default = "default_true")]
    pub ascending: bool,
}

fn default_true() -> bool {
    true
}

impl OrderBy {
    pub fn asc(column: impl Into<String>) -> Self {
        Self {
            column: column.into(),
            table: None,
            ascending: true,
        }
    }

    pub fn desc(column: impl Into<String>) -> Self {
        Self {
            column: column.into(),
            table: None,
            ascending: false,
        }
    }

    pub fn table(mut self, table: impl Into<String>) -> Self {
        self.table = Some(table.into());
        self
    }
}

/// Optional clauses of a SELECT.
///
/// `limit`/`offset` of `Some(0)` are real values and render `LIMIT 0` /
/// `OFFSET 0`; `offset` is ignored without `limit`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SelectOptions {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub inner_joins: Vec<InnerJoin>,
    #[serde(alias = "where", skip_serializing_if = "Option::is_none")]
    pub filter: Option<Predicate>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub order_by: Vec<OrderBy>,
    /// `SELECT DISTINCT`.
    #[serde(alias = "unique")]
    pub distinct: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u64>,
    #[serde(alias = "limit_offset", skip_serializing_if = "Option::is_none")]
    pub offset: Option<u64>,
}

impl SelectOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn join(mut self, join: InnerJoin) -> Self {
        self.inner_joins.push(join);
        self
    }

    pub fn filter(mut self, predicate: Predicate) -> Self {
        self.filter = Some(predicate);
        self
    }

    pub fn order_by(mut self, term: OrderBy) -> Self {
        self.order_by.push(term);
        self
    }

    pub fn distinct(mut self) -> Self {
        self.distinct = true;
        self
    }

    pub fn limit(mut self, limit: u64) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn offset(mut self, offset: u64) -> Self {
        self.offset = Some(offset);
        self
    }
}
