//! sqlq: render and run parameterized SQLite statements
//!
//! # Usage
//!
//! ```bash
//! # Render every statement of a file (no database configured)
//! sqlq run statements.toml
//!
//! # Execute against a database, binding values in placeholder order
//! sqlq --database-url sqlite://counter.db run statements.toml --bind alice,3
//!
//! # Inspect a predicate expression
//! sqlq where 'lower(name)&age>=|email'
//!
//! # Print (or apply) schema DDL
//! sqlq schema schema.toml --apply
//! ```

use std::path::{Path, PathBuf};

use anyhow::{Context, bail};
use clap::{Parser, Subcommand, ValueEnum};
use colored::*;
use sqlq::prelude::*;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "sqlq")]
#[command(version)]
#[command(about = "Parameterized SQLite statement builder", long_about = None)]
#[command(after_help = "EXAMPLES:
    sqlq run statements.toml --dry-run
    sqlq --database-url sqlite://counter.db run statements.toml --bind alice,3
    sqlq where 'x|(y&z)'
    sqlq schema schema.toml --drop")]
struct Cli {
    /// Config file (defaults to <config dir>/sqlq/config.toml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Database connection URL
    #[arg(long, env = "SQLQ_DATABASE_URL", global = true)]
    database_url: Option<String>,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, ValueEnum)]
enum OutputFormat {
    Table,
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// Render the statements of a TOML or JSON file, and run them
    Run {
        /// Statement file
        file: PathBuf,

        /// Parameter bindings, consumed in placeholder order across statements
        #[arg(short, long, value_delimiter = ',')]
        bind: Vec<String>,

        /// Don't execute, just show the generated SQL
        #[arg(short, long)]
        dry_run: bool,

        /// Output format
        #[arg(short, long, value_enum, default_value = "table")]
        format: OutputFormat,
    },
    /// Parse a predicate expression and show its WHERE clause
    Where {
        /// Predicate expression, e.g. `lower(name)&age>=|email`
        expr: String,
    },
    /// Print the DDL of a schema file
    Schema {
        /// Schema file
        file: PathBuf,

        /// Emit DROP statements instead of CREATE
        #[arg(long)]
        drop: bool,

        /// Execute the statements against the database
        #[arg(long)]
        apply: bool,
    },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if let Err(e) = dispatch(cli).await {
        eprintln!("{} {:#}", "Error:".red().bold(), e);
        std::process::exit(1);
    }
}

async fn dispatch(cli: Cli) -> anyhow::Result<()> {
    let mut config = Config::load(cli.config.as_deref()).context("loading config")?;
    if let Some(url) = &cli.database_url {
        config.database.url = Some(url.clone());
    }
    init_tracing(&config, cli.verbose)?;

    match &cli.command {
        Commands::Run {
            file,
            bind,
            dry_run,
            format,
        } => run_statements(&config, file, bind, *dry_run, format).await,
        Commands::Where { expr } => explain_predicate(expr),
        Commands::Schema { file, drop, apply } => {
            print_schema(&config, file, *drop, *apply).await
        }
    }
}

fn init_tracing(config: &Config, verbose: bool) -> anyhow::Result<()> {
    let filter = if verbose {
        EnvFilter::new("sqlq=debug")
    } else {
        EnvFilter::try_from_default_env()
            .or_else(|_| EnvFilter::try_new(&config.log_level))
            .context("invalid log level")?
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
    Ok(())
}

fn is_json(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == "json")
}

fn load_statements(path: &Path) -> anyhow::Result<StatementFile> {
    let doc = std::fs::read_to_string(path)
        .with_context(|| format!("reading {}", path.display()))?;
    let file = if is_json(path) {
        StatementFile::from_json(&doc)?
    } else {
        StatementFile::from_toml(&doc)?
    };
    Ok(file)
}

fn load_schema(path: &Path) -> anyhow::Result<Schema> {
    let doc = std::fs::read_to_string(path)
        .with_context(|| format!("reading {}", path.display()))?;
    let schema = if is_json(path) {
        Schema::from_json(&doc)?
    } else {
        Schema::from_toml(&doc)?
    };
    Ok(schema)
}

async fn run_statements(
    config: &Config,
    file: &Path,
    bind: &[String],
    dry_run: bool,
    format: &OutputFormat,
) -> anyhow::Result<()> {
    let statements = load_statements(file)?.statements;
    let values: Vec<Value> = bind.iter().map(|b| Value::parse_arg(b)).collect();

    let db = match (&config.database.url, dry_run) {
        (Some(_), false) => Some(SqliteDb::open(&config.database).await?),
        _ => None,
    };

    let mut remaining = values.as_slice();
    for statement in &statements {
        let sql = statement.to_sql();
        let wanted = statement.placeholder_count();
        let params = match remaining.get(..wanted) {
            Some(params) => params,
            // a dry run can still show the SQL without values
            None if db.is_none() => remaining,
            None => bail!(
                "{} expects {} parameter(s), {} left",
                sql,
                wanted,
                remaining.len()
            ),
        };
        remaining = &remaining[params.len()..];

        println!("{}", sql.white());
        for (i, v) in params.iter().enumerate() {
            println!("  {} = {}", format!("?{}", i + 1).cyan(), value_to_string(v).yellow());
        }

        let Some(db) = &db else { continue };
        match db.run(statement, params).await? {
            Outcome::Rows(rows) => format_output(&rows, format),
            Outcome::Run(run) => {
                println!("{} {} row(s) affected", "✓".green(), run.changes);
            }
        }
        println!();
    }

    if !remaining.is_empty() {
        println!(
            "{}",
            format!("⚠ {} unused binding(s)", remaining.len()).yellow()
        );
    }

    match db {
        Some(db) => db.close().await,
        None if !dry_run => {
            println!(
                "{}",
                "⚠ No database URL. Use --database-url or set SQLQ_DATABASE_URL".yellow()
            );
        }
        None => {}
    }
    Ok(())
}

fn explain_predicate(expr: &str) -> anyhow::Result<()> {
    let predicate = parse_predicate(expr)?;

    println!("{}", "Generated SQL:".green().bold());
    println!("  {}", predicate.to_sql().white());
    println!();
    println!("{}", "Bind order:".cyan());
    for (i, column) in predicate.placeholder_columns().iter().enumerate() {
        println!("  ?{} {}", i + 1, column.white());
    }
    Ok(())
}

async fn print_schema(config: &Config, file: &Path, drop: bool, apply: bool) -> anyhow::Result<()> {
    let schema = load_schema(file)?;
    let statements = if drop {
        schema.drop_statements(true)
    } else {
        schema.create_statements(true)
    };

    for sql in &statements {
        println!("{}", sql);
    }

    if apply {
        let db = SqliteDb::open(&config.database).await?;
        for sql in &statements {
            db.execute(sql, &[]).await?;
        }
        db.close().await;
        println!("{} {} statement(s) applied", "✓".green(), statements.len());
    }
    Ok(())
}

fn format_output(rows: &[Row], format: &OutputFormat) {
    if rows.is_empty() {
        println!("{}", "(no results)".dimmed());
        return;
    }

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(rows).unwrap_or_default());
        }
        OutputFormat::Table => {
            let columns: Vec<&String> = rows[0].keys().collect();

            let widths: Vec<usize> = columns
                .iter()
                .map(|c| {
                    rows.iter()
                        .filter_map(|row| row.get(*c))
                        .map(|v| json_to_string(v).chars().count())
                        .fold(c.chars().count(), usize::max)
                })
                .collect();

            let header: Vec<String> = columns
                .iter()
                .zip(&widths)
                .map(|(c, w)| format!("{:width$}", c, width = *w))
                .collect();
            println!("{}", header.join(" │ ").white().bold());

            let sep: Vec<String> = widths.iter().map(|w| "─".repeat(*w)).collect();
            println!("{}", sep.join("─┼─").dimmed());

            for row in rows {
                let cells: Vec<String> = columns
                    .iter()
                    .zip(&widths)
                    .map(|(c, w)| {
                        let val = row.get(*c).map(json_to_string).unwrap_or_default();
                        format!("{:width$}", val, width = *w)
                    })
                    .collect();
                println!("{}", cells.join(" │ "));
            }

            println!();
            println!("{} row(s) returned", rows.len().to_string().cyan());
        }
    }
}

fn json_to_string(val: &serde_json::Value) -> String {
    match val {
        serde_json::Value::Null => "NULL".to_string(),
        serde_json::Value::String(s) => s.clone(),
        _ => val.to_string(),
    }
}

fn value_to_string(val: &Value) -> String {
    match val {
        Value::Null => "NULL".to_string(),
        Value::Integer(n) => n.to_string(),
        Value::Real(f) => f.to_string(),
        Value::Text(s) => format!("'{}'", s),
        Value::Blob(b) => format!("<{} bytes>", b.len()),
    }
}
