//! Error types for sqlq.

use thiserror::Error;

/// The main error type for sqlq operations.
#[derive(Debug, Error)]
pub enum QueryError {
    /// Failed to parse a predicate expression.
    #[error("Parse error at position {position}: {message}")]
    Parse { position: usize, message: String },

    /// Unknown comparison operator.
    #[error("Invalid operator: '{0}'. Expected one of: =, !=, >, >=, <, <=")]
    InvalidOperator(String),

    /// Unknown update operator.
    #[error("Invalid update operator: '{0}'. Expected: += or -=")]
    InvalidUpdateOperator(String),

    /// An alter description with no populated field.
    #[error("Alter table: no operation given")]
    EmptyAlter,

    /// An alter description with more than one populated field.
    #[error("Alter table: exactly one operation expected, got {}", .0.join(", "))]
    AmbiguousAlter(Vec<&'static str>),

    /// A column definition that cannot be added to an existing table.
    #[error("Cannot add column '{column}': {reason}")]
    InvalidAddColumn {
        column: String,
        reason: &'static str,
    },

    /// A constraint was violated (UNIQUE, NOT NULL, FOREIGN KEY, CHECK, PRIMARY KEY).
    #[error("Constraint violation: {0}")]
    Constraint(String),

    /// The statement was rejected (bad SQL, missing table or column).
    #[error("Statement error: {0}")]
    Statement(String),

    /// Connection error.
    #[error("Connection error: {0}")]
    Connection(String),

    /// Driver failure that did not come from the database itself.
    #[error("Execution error: {0}")]
    Execution(String),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Statement or schema document could not be decoded.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// SQLite primary result code for constraint failures.
const SQLITE_CONSTRAINT: i32 = 19;

impl QueryError {
    /// Create a parse error at the given position.
    pub fn parse(position: usize, message: impl Into<String>) -> Self {
        Self::Parse {
            position,
            message: message.into(),
        }
    }

    /// Classify a driver error into a constraint violation or a statement error.
    ///
    /// SQLite reports extended result codes; the low byte is the primary code,
    /// so every `SQLITE_CONSTRAINT_*` variant maps to [`QueryError::Constraint`].
    pub fn from_sqlx(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::Database(db_err) => {
                let code = db_err
                    .code()
                    .and_then(|c| c.parse::<i32>().ok())
                    .unwrap_or_default();
                if code & 0xff == SQLITE_CONSTRAINT {
                    Self::Constraint(db_err.message().to_string())
                } else {
                    Self::Statement(db_err.message().to_string())
                }
            }
            sqlx::Error::Io(e) => Self::Io(e),
            sqlx::Error::Configuration(e) => Self::Config(e.to_string()),
            sqlx::Error::PoolTimedOut => Self::Connection("connection pool timed out".into()),
            sqlx::Error::PoolClosed => Self::Connection("connection pool closed".into()),
            other => Self::Execution(other.to_string()),
        }
    }

    /// Check if this is a constraint violation.
    pub fn is_constraint_violation(&self) -> bool {
        matches!(self, Self::Constraint(_))
    }

    /// Check if this is a statement error.
    pub fn is_statement_error(&self) -> bool {
        matches!(self, Self::Statement(_))
    }
}

/// Result type alias for sqlq operations.
pub type QueryResult<T> = Result<T, QueryError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = QueryError::parse(5, "unexpected character");
        assert_eq!(
            err.to_string(),
            "Parse error at position 5: unexpected character"
        );
    }

    #[test]
    fn test_ambiguous_alter_display() {
        let err = QueryError::AmbiguousAlter(vec!["add_column", "new_table_name"]);
        assert_eq!(
            err.to_string(),
            "Alter table: exactly one operation expected, got add_column, new_table_name"
        );
    }

    #[test]
    fn test_classification_helpers() {
        assert!(QueryError::Constraint("UNIQUE".into()).is_constraint_violation());
        assert!(QueryError::Statement("no such table".into()).is_statement_error());
        assert!(!QueryError::EmptyAlter.is_constraint_violation());
    }
}
