//! Execution engine for generated statements.
//!
//! Runs SQL text from the builders against SQLite through a `sqlx` pool.
//! Parameters are bound positionally, in placeholder order.

use std::path::Path;
use std::str::FromStr;

use async_trait::async_trait;
use sqlx::query::Query;
use sqlx::sqlite::{
    Sqlite, SqliteArguments, SqliteConnectOptions, SqlitePool, SqlitePoolOptions, SqliteRow,
};
use sqlx::{Column, Row as _, TypeInfo, ValueRef};
use tracing::{debug, error};

use crate::ast::Statement;
use crate::config::DatabaseConfig;
use crate::error::{QueryError, QueryResult};
use crate::schema::Schema;
use crate::transpiler::{EXISTS_COLUMN, ToSql};

/// A decoded row: column name to value, in result column order.
pub type Row = serde_json::Map<String, serde_json::Value>;

/// Dynamic value type for parameter bindings.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Integer(i64),
    Real(f64),
    Text(String),
    Blob(Vec<u8>),
}

impl Value {
    /// Interpret a command-line argument: integer, then real, then text.
    /// `null` binds NULL and `true`/`false` bind 1/0.
    pub fn parse_arg(arg: &str) -> Self {
        if let Ok(n) = arg.parse::<i64>() {
            Value::Integer(n)
        } else if let Ok(f) = arg.parse::<f64>() {
            Value::Real(f)
        } else {
            match arg {
                "null" | "NULL" => Value::Null,
                "true" => Value::Integer(1),
                "false" => Value::Integer(0),
                _ => Value::Text(arg.to_string()),
            }
        }
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Integer(v as i64)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Value::Integer(v as i64)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Integer(v)
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Real(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Text(v.to_string())
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Text(v)
    }
}

impl From<Vec<u8>> for Value {
    fn from(v: Vec<u8>) -> Self {
        Value::Blob(v)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Value::Null, Into::into)
    }
}

/// Outcome of a statement that does not return rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RunResult {
    /// Rows changed by INSERT, UPDATE or DELETE.
    pub changes: u64,
    pub last_insert_rowid: i64,
}

/// Outcome of [`Executor::run`].
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Rows(Vec<Row>),
    Run(RunResult),
}

/// Runs SQL text with positional parameters.
#[async_trait]
pub trait Executor: Send + Sync {
    /// Run a statement that returns no rows.
    async fn execute(&self, sql: &str, params: &[Value]) -> QueryResult<RunResult>;

    /// First result row, or `None` when nothing matches.
    async fn fetch_first(&self, sql: &str, params: &[Value]) -> QueryResult<Option<Row>>;

    /// Every result row; empty when nothing matches.
    async fn fetch_all(&self, sql: &str, params: &[Value]) -> QueryResult<Vec<Row>>;

    /// Run an [`exists`](crate::transpiler::exists) probe.
    async fn exists(&self, sql: &str, params: &[Value]) -> QueryResult<bool> {
        let row = self.fetch_first(sql, params).await?;
        Ok(row
            .and_then(|r| r.get(EXISTS_COLUMN).and_then(serde_json::Value::as_i64))
            .is_some_and(|v| v != 0))
    }

    /// Render and run a statement description.
    async fn run(&self, statement: &Statement, params: &[Value]) -> QueryResult<Outcome> {
        let sql = statement.to_sql();
        if statement.is_query() {
            Ok(Outcome::Rows(self.fetch_all(&sql, params).await?))
        } else {
            Ok(Outcome::Run(self.execute(&sql, params).await?))
        }
    }
}

/// A SQLite database behind a connection pool.
#[derive(Clone)]
pub struct SqliteDb {
    pool: SqlitePool,
}

impl SqliteDb {
    /// Open the database described by `config`.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// let config = DatabaseConfig::builder().url("sqlite://counter.db").build();
    /// let db = SqliteDb::open(&config).await?;
    /// ```
    pub async fn open(config: &DatabaseConfig) -> QueryResult<Self> {
        let url = config
            .url
            .as_deref()
            .ok_or_else(|| QueryError::Config("no database url configured".to_string()))?;

        let options = SqliteConnectOptions::from_str(url)
            .map_err(QueryError::from_sqlx)?
            .read_only(config.read_only)
            .create_if_missing(config.create_if_missing);

        debug!(url, read_only = config.read_only, "opening database");

        let pool = SqlitePoolOptions::new()
            .max_connections(config.max_connections.max(1))
            .connect_with(options)
            .await
            .map_err(|e| QueryError::Connection(e.to_string()))?;

        Ok(Self { pool })
    }

    /// Wrap an existing pool.
    pub fn from_pool(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Get a reference to the underlying connection pool.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Create every table, view and index of `schema`, in order.
    pub async fn apply(&self, schema: &Schema) -> QueryResult<()> {
        for sql in schema.create_statements(true) {
            self.execute(&sql, &[]).await?;
        }
        Ok(())
    }

    /// Close the pool, waiting for connections to be released.
    pub async fn close(&self) {
        self.pool.close().await;
    }

    /// Delete a database file and its `-wal`, `-shm` and `-journal` siblings.
    ///
    /// A missing file is not an error. Close every pool on the file first.
    pub async fn remove_file(path: impl AsRef<Path>) -> QueryResult<()> {
        let path = path.as_ref();
        debug!(path = %path.display(), "removing database file");

        let mut targets = vec![path.to_path_buf()];
        for suffix in ["-wal", "-shm", "-journal"] {
            let mut sibling = path.as_os_str().to_owned();
            sibling.push(suffix);
            targets.push(sibling.into());
        }

        for target in &targets {
            match tokio::fs::remove_file(target).await {
                Ok(()) => {}
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
                Err(e) => {
                    error!(path = %target.display(), %e, "remove failed");
                    return Err(e.into());
                }
            }
        }

        if Self::file_exists(path).await {
            return Err(QueryError::Execution(format!(
                "database file still exists: {}",
                path.display()
            )));
        }
        Ok(())
    }

    /// Whether a database file exists at `path`.
    pub async fn file_exists(path: impl AsRef<Path>) -> bool {
        let path = path.as_ref();
        debug!(path = %path.display(), "checking database file");
        tokio::fs::try_exists(path).await.unwrap_or(false)
    }
}

fn bind_params<'q>(
    sql: &'q str,
    params: &[Value],
) -> Query<'q, Sqlite, SqliteArguments<'q>> {
    let mut query = sqlx::query(sql);
    for param in params {
        query = match param {
            Value::Null => query.bind(None::<i64>),
            Value::Integer(v) => query.bind(*v),
            Value::Real(v) => query.bind(*v),
            Value::Text(v) => query.bind(v.clone()),
            Value::Blob(v) => query.bind(v.clone()),
        };
    }
    query
}

fn log_failure(sql: &str, params: &[Value], err: sqlx::Error) -> QueryError {
    let err = QueryError::from_sqlx(err);
    error!(sql, ?params, %err, "statement failed");
    err
}

#[async_trait]
impl Executor for SqliteDb {
    async fn execute(&self, sql: &str, params: &[Value]) -> QueryResult<RunResult> {
        debug!(sql, "execute");
        let result = bind_params(sql, params)
            .execute(&self.pool)
            .await
            .map_err(|e| log_failure(sql, params, e))?;

        let run = RunResult {
            changes: result.rows_affected(),
            last_insert_rowid: result.last_insert_rowid(),
        };
        debug!(changes = run.changes, last_insert_rowid = run.last_insert_rowid, "executed");
        Ok(run)
    }

    async fn fetch_first(&self, sql: &str, params: &[Value]) -> QueryResult<Option<Row>> {
        debug!(sql, "fetch_first");
        let row = bind_params(sql, params)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| log_failure(sql, params, e))?;

        debug!(found = row.is_some(), "fetched");
        row.as_ref().map(row_to_map).transpose()
    }

    async fn fetch_all(&self, sql: &str, params: &[Value]) -> QueryResult<Vec<Row>> {
        debug!(sql, "fetch_all");
        let rows = bind_params(sql, params)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| log_failure(sql, params, e))?;

        debug!(rows = rows.len(), "fetched");
        rows.iter().map(row_to_map).collect()
    }
}

/// Decode a row by the storage class of each value.
fn row_to_map(row: &SqliteRow) -> QueryResult<Row> {
    let mut map = Row::new();

    for (i, column) in row.columns().iter().enumerate() {
        let raw = row.try_get_raw(i).map_err(QueryError::from_sqlx)?;
        let storage = if raw.is_null() {
            "NULL".to_string()
        } else {
            raw.type_info().name().to_string()
        };

        let value = match storage.as_str() {
            "NULL" => serde_json::Value::Null,
            "INTEGER" => row
                .try_get::<i64, _>(i)
                .map(serde_json::Value::from)
                .map_err(QueryError::from_sqlx)?,
            "REAL" => row
                .try_get::<f64, _>(i)
                .map(|v| {
                    serde_json::Number::from_f64(v)
                        .map(serde_json::Value::Number)
                        .unwrap_or(serde_json::Value::Null)
                })
                .map_err(QueryError::from_sqlx)?,
            "BLOB" => row
                .try_get::<Vec<u8>, _>(i)
                .map(serde_json::Value::from)
                .map_err(QueryError::from_sqlx)?,
            _ => row
                .try_get::<String, _>(i)
                .map(serde_json::Value::String)
                .map_err(QueryError::from_sqlx)?,
        };

        map.insert(column.name().to_string(), value);
    }

    Ok(map)
}
