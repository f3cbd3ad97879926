use serde::{Deserialize, Serialize};

use crate::ast::{ColumnType, UpdateOperator};
use crate::error::QueryError;

/// A column in a SELECT list, optionally qualified and aliased.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnRef {
    #[serde(alias = "column_name")]
    pub column: String,
    #[serde(default, alias = "table_name", skip_serializing_if = "Option::is_none")]
    pub table: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alias: Option<String>,
}

impl ColumnRef {
    pub fn new(column: impl Into<String>) -> Self {
        Self {
            column: column.into(),
            table: None,
            alias: None,
        }
    }

    pub fn table(mut self, table: impl Into<String>) -> Self {
        self.table = Some(table.into());
        self
    }

    pub fn alias(mut self, alias: impl Into<String>) -> Self {
        self.alias = Some(alias.into());
        self
    }
}

/// An entry of a SELECT list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SelectColumn {
    /// Rendered verbatim (`count(*)`, `ROW_NUMBER () OVER (...)`).
    Raw(String),
    Ref(ColumnRef),
}

impl From<&str> for SelectColumn {
    fn from(s: &str) -> Self {
        SelectColumn::Raw(s.to_string())
    }
}

impl From<String> for SelectColumn {
    fn from(s: String) -> Self {
        SelectColumn::Raw(s)
    }
}

impl From<ColumnRef> for SelectColumn {
    fn from(c: ColumnRef) -> Self {
        SelectColumn::Ref(c)
    }
}

/// Value of a `DEFAULT` column modifier, rendered verbatim.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DefaultValue {
    Integer(i64),
    Real(f64),
    /// Any SQL expression: `'text'`, `CURRENT_TIMESTAMP`, `(round(julianday('now')))`.
    Expr(String),
}

impl std::fmt::Display for DefaultValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DefaultValue::Integer(n) => write!(f, "{}", n),
            DefaultValue::Real(n) => write!(f, "{}", n),
            DefaultValue::Expr(s) => write!(f, "{}", s),
        }
    }
}

impl From<i64> for DefaultValue {
    fn from(v: i64) -> Self {
        DefaultValue::Integer(v)
    }
}

impl From<i32> for DefaultValue {
    fn from(v: i32) -> Self {
        DefaultValue::Integer(v as i64)
    }
}

impl From<f64> for DefaultValue {
    fn from(v: f64) -> Self {
        DefaultValue::Real(v)
    }
}

impl From<&str> for DefaultValue {
    fn from(v: &str) -> Self {
        DefaultValue::Expr(v.to_string())
    }
}

/// Column modifiers. Without a default SQLite stores NULL.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColumnOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<DefaultValue>,
    pub not_null: bool,
    /// Collected into the table-level `PRIMARY KEY (...)` clause.
    pub primary_key: bool,
    pub unique: bool,
}

/// `FOREIGN KEY (col) REFERENCES table (column) [options]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForeignKey {
    #[serde(alias = "table_name")]
    pub table: String,
    pub column: String,
    /// Referential actions, e.g. `ON DELETE CASCADE ON UPDATE NO ACTION`.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<String>,
}

impl ForeignKey {
    pub fn new(table: impl Into<String>, column: impl Into<String>) -> Self {
        Self {
            table: table.into(),
            column: column.into(),
            options: Vec::new(),
        }
    }

    pub fn option(mut self, action: impl Into<String>) -> Self {
        self.options.push(action.into());
        self
    }
}

/// A column of `CREATE TABLE` or `ALTER TABLE ... ADD COLUMN`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnDef {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: ColumnType,
    #[serde(default)]
    pub options: ColumnOptions,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub foreign: Option<ForeignKey>,
}

impl ColumnDef {
    pub fn new(name: impl Into<String>, ty: ColumnType) -> Self {
        Self {
            name: name.into(),
            ty,
            options: ColumnOptions::default(),
            foreign: None,
        }
    }

    pub fn not_null(mut self) -> Self {
        self.options.not_null = true;
        self
    }

    pub fn primary_key(mut self) -> Self {
        self.options.primary_key = true;
        self
    }

    pub fn unique(mut self) -> Self {
        self.options.unique = true;
        self
    }

    pub fn default_value(mut self, value: impl Into<DefaultValue>) -> Self {
        self.options.default = Some(value.into());
        self
    }

    pub fn references(mut self, foreign: ForeignKey) -> Self {
        self.foreign = Some(foreign);
        self
    }
}

/// A `SET` assignment of an UPDATE.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged, try_from = "RawUpdateColumn")]
pub enum UpdateColumn {
    /// `col=?`
    Name(String),
    /// `col=?`, or `col=col+?` / `col=col-?` with an operator.
    Op {
        #[serde(alias = "column_name")]
        column: String,
        #[serde(default, alias = "operator", skip_serializing_if = "Option::is_none")]
        op: Option<UpdateOperator>,
    },
}

/// Document form of [`UpdateColumn`]; the operator is checked after matching.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawUpdateColumn {
    Name(String),
    Op {
        #[serde(alias = "column_name")]
        column: String,
        #[serde(default, alias = "operator")]
        op: Option<String>,
    },
}

impl TryFrom<RawUpdateColumn> for UpdateColumn {
    type Error = QueryError;

    fn try_from(raw: RawUpdateColumn) -> Result<Self, Self::Error> {
        match raw {
            RawUpdateColumn::Name(column) => Ok(UpdateColumn::Name(column)),
            RawUpdateColumn::Op { column, op } => Ok(UpdateColumn::Op {
                column,
                op: op.map(|s| s.parse()).transpose()?,
            }),
        }
    }
}

impl UpdateColumn {
    pub fn increment(column: impl Into<String>) -> Self {
        UpdateColumn::Op {
            column: column.into(),
            op: Some(UpdateOperator::Add),
        }
    }

    pub fn decrement(column: impl Into<String>) -> Self {
        UpdateColumn::Op {
            column: column.into(),
            op: Some(UpdateOperator::Sub),
        }
    }

    pub fn column(&self) -> &str {
        match self {
            UpdateColumn::Name(c) => c,
            UpdateColumn::Op { column, .. } => column,
        }
    }
}

impl From<&str> for UpdateColumn {
    fn from(s: &str) -> Self {
        UpdateColumn::Name(s.to_string())
    }
}

impl From<String> for UpdateColumn {
    fn from(s: String) -> Self {
        UpdateColumn::Name(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_value_display() {
        assert_eq!(DefaultValue::from(0).to_string(), "0");
        assert_eq!(DefaultValue::from(72.934).to_string(), "72.934");
        assert_eq!(DefaultValue::from("'default'").to_string(), "'default'");
    }

    #[test]
    fn test_select_column_untagged() {
        let cols: Vec<SelectColumn> =
            serde_json::from_str(r#"["count(*)", {"column":"name","alias":"n"}]"#).unwrap();
        assert_eq!(cols[0], SelectColumn::Raw("count(*)".into()));
        assert_eq!(cols[1], SelectColumn::Ref(ColumnRef::new("name").alias("n")));
    }

    #[test]
    fn test_column_def_from_json() {
        let def: ColumnDef = serde_json::from_str(
            r#"{"name":"id","type":"INTEGER","options":{"primary_key":true,"default":3}}"#,
        )
        .unwrap();
        assert_eq!(def.ty, ColumnType::Integer);
        assert!(def.options.primary_key);
        assert_eq!(def.options.default, Some(DefaultValue::Integer(3)));
    }

    #[test]
    fn test_update_column_from_json() {
        let cols: Vec<UpdateColumn> =
            serde_json::from_str(r#"["name", {"column": "count", "op": "-="}]"#).unwrap();
        assert_eq!(
            cols,
            vec![UpdateColumn::from("name"), UpdateColumn::decrement("count")]
        );

        let err = serde_json::from_str::<UpdateColumn>(r#"{"column": "count", "op": "*="}"#)
            .unwrap_err();
        assert!(err.to_string().contains("Invalid update operator: '*='"), "{err}");
    }
}
