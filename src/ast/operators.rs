use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::QueryError;

/// Comparison operator of a predicate leaf.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String")]
pub enum Operator {
    #[default]
    #[serde(rename = "=")]
    Eq,
    #[serde(rename = "!=")]
    Ne,
    #[serde(rename = ">")]
    Gt,
    #[serde(rename = ">=")]
    Gte,
    #[serde(rename = "<")]
    Lt,
    #[serde(rename = "<=")]
    Lte,
}

impl Operator {
    /// SQL symbol of the operator.
    pub fn symbol(self) -> &'static str {
        match self {
            Operator::Eq => "=",
            Operator::Ne => "!=",
            Operator::Gt => ">",
            Operator::Gte => ">=",
            Operator::Lt => "<",
            Operator::Lte => "<=",
        }
    }
}

impl std::fmt::Display for Operator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.symbol())
    }
}

impl FromStr for Operator {
    type Err = QueryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "=" => Ok(Operator::Eq),
            "!=" => Ok(Operator::Ne),
            ">" => Ok(Operator::Gt),
            ">=" => Ok(Operator::Gte),
            "<" => Ok(Operator::Lt),
            "<=" => Ok(Operator::Lte),
            other => Err(QueryError::InvalidOperator(other.to_string())),
        }
    }
}

impl TryFrom<String> for Operator {
    type Error = QueryError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

/// In-place arithmetic for `UPDATE ... SET col=col+?`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String")]
pub enum UpdateOperator {
    #[serde(rename = "+=")]
    Add,
    #[serde(rename = "-=")]
    Sub,
}

impl UpdateOperator {
    pub fn symbol(self) -> &'static str {
        match self {
            UpdateOperator::Add => "+",
            UpdateOperator::Sub => "-",
        }
    }
}

impl FromStr for UpdateOperator {
    type Err = QueryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "+=" => Ok(UpdateOperator::Add),
            "-=" => Ok(UpdateOperator::Sub),
            other => Err(QueryError::InvalidUpdateOperator(other.to_string())),
        }
    }
}

impl TryFrom<String> for UpdateOperator {
    type Error = QueryError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

/// Declared column type, one per SQLite type affinity.
///
/// | Affinity | Declared type |
/// |----------|---------------|
/// | TEXT     | `TEXT`        |
/// | NUMERIC  | `NUMERIC`     |
/// | INTEGER  | `INTEGER`     |
/// | REAL     | `REAL`        |
/// | BLOB     | `BLOB`        |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ColumnType {
    Blob,
    Integer,
    Numeric,
    Real,
    Text,
}

impl std::fmt::Display for ColumnType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ColumnType::Blob => write!(f, "BLOB"),
            ColumnType::Integer => write!(f, "INTEGER"),
            ColumnType::Numeric => write!(f, "NUMERIC"),
            ColumnType::Real => write!(f, "REAL"),
            ColumnType::Text => write!(f, "TEXT"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_operator_from_str() {
        assert_eq!(">=".parse::<Operator>().unwrap(), Operator::Gte);
        assert_eq!("!=".parse::<Operator>().unwrap(), Operator::Ne);
        assert!(matches!(
            "LIKE".parse::<Operator>(),
            Err(QueryError::InvalidOperator(op)) if op == "LIKE"
        ));
    }

    #[test]
    fn test_update_operator_from_str() {
        assert_eq!("+=".parse::<UpdateOperator>().unwrap(), UpdateOperator::Add);
        assert!("*=".parse::<UpdateOperator>().is_err());
    }

    #[test]
    fn test_operator_serde_uses_symbols() {
        let op: Operator = serde_json::from_str(r#"">=""#).unwrap();
        assert_eq!(op, Operator::Gte);
        assert_eq!(serde_json::to_string(&Operator::Ne).unwrap(), r#""!=""#);

        let err = serde_json::from_str::<Operator>(r#""LIKE""#).unwrap_err();
        assert!(err.to_string().contains("Invalid operator: 'LIKE'"), "{err}");

        let err = serde_json::from_str::<UpdateOperator>(r#""*=""#).unwrap_err();
        assert!(err.to_string().contains("Invalid update operator: '*='"), "{err}");
    }
}
