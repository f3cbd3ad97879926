//! # sqlq: parameterized SQLite statements
//!
//! > **Describe the statement. Bind the values.**
//!
//! sqlq turns structured statement descriptions into SQLite text with `?`
//! placeholders. Values are never embedded in the SQL; bind them in the
//! order the placeholders appear.
//!
//! ## Quick Example
//!
//! ```
//! use sqlq::prelude::*;
//!
//! let filter = Predicate::new("name").lowercase().or(Predicate::new("email"));
//! let options = SelectOptions::new().filter(filter).limit(10);
//! let columns = [SelectColumn::from("name"), SelectColumn::from("email")];
//! let sql = sqlq::select("contacts", &columns, Some(&options));
//!
//! assert_eq!(
//!     sql,
//!     "SELECT name,email FROM contacts WHERE (lower(name)=? OR email=?) LIMIT 10;"
//! );
//! ```
//!
//! ## Predicate expressions
//!
//! | Symbol      | Meaning                      |
//! |-------------|------------------------------|
//! | `&`         | AND group, bound to the leaf |
//! | `\|`        | OR group, wraps the AND group |
//! | `( , )`     | group of several nodes       |
//! | `lower()`   | case fold                    |
//! | `t.col`     | qualified column             |

pub mod ast;
pub mod config;
pub mod engine;
pub mod error;
pub mod parser;
pub mod schema;
pub mod transpiler;

pub mod prelude {
    pub use crate::ast::*;
    pub use crate::config::{Config, DatabaseConfig};
    pub use crate::engine::{Executor, Outcome, Row, RunResult, SqliteDb, Value};
    pub use crate::error::*;
    pub use crate::parser::parse_predicate;
    pub use crate::schema::{Index, Schema, Table, View};
    pub use crate::transpiler::ToSql;
}

pub use transpiler::{
    alter_table, create_index, create_table, create_view, drop_index, drop_table, drop_view,
    exists, insert, remove, select, update, where_clause,
};

/// Parse a predicate expression into a predicate tree.
///
/// # Example
///
/// ```
/// use sqlq::parse;
///
/// let filter = parse("x|(y&z)").unwrap();
/// assert_eq!(sqlq::where_clause(&filter), "WHERE (x=? OR (y=? AND z=?))");
/// ```
pub fn parse(input: &str) -> Result<ast::Predicate, error::QueryError> {
    parser::parse_predicate(input)
}
