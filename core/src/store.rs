//! SQLite persistence layer.
//!
//! RULE: Only store.rs talks to the database.
//! Pipeline stages call store methods — they never execute SQL directly.

use crate::{clean::TableSpec, dataset::Table, error::PipelineResult};
use rusqlite::{params_from_iter, Connection};
use serde_json::Value;
use std::path::Path;

/// Result of provisioning the sink database file. "Already exists" is
/// informational and execution continues; any other provisioning failure
/// propagates as an error instead of being swallowed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProvisionOutcome {
    Created,
    AlreadyExists,
}

pub struct SinkStore {
    conn: Connection,
}

impl SinkStore {
    /// Open (or create) the sink database at `path`, reporting whether it
    /// had to be created.
    pub fn provision(path: &str) -> PipelineResult<(Self, ProvisionOutcome)> {
        let outcome = if Path::new(path).exists() {
            ProvisionOutcome::AlreadyExists
        } else {
            ProvisionOutcome::Created
        };
        Ok((Self::open(path)?, outcome))
    }

    pub fn open(path: &str) -> PipelineResult<Self> {
        let conn = Connection::open(path)?;
        // WAL mode: better concurrent read performance for consumers.
        conn.execute_batch("PRAGMA journal_mode=WAL;")?;
        Ok(Self { conn })
    }

    /// Open an in-memory database (used in tests).
    pub fn in_memory() -> PipelineResult<Self> {
        Ok(Self {
            conn: Connection::open_in_memory()?,
        })
    }

    /// Create the table for one entity and load the cleaned rows into it,
    /// replacing any previous contents wholesale. Declared numerical
    /// columns become REAL, everything else TEXT. No incremental or
    /// append semantics, no schema versioning.
    pub fn replace_table(&self, spec: &TableSpec, rows: &Table) -> PipelineResult<()> {
        let columns = spec.columns();

        self.conn
            .execute_batch(&format!("DROP TABLE IF EXISTS {};", spec.table))?;
        let decls: Vec<String> = columns
            .iter()
            .map(|col| {
                let sql_type = if spec.numerical.contains(col) {
                    "REAL"
                } else {
                    "TEXT"
                };
                format!("{col} {sql_type}")
            })
            .collect();
        self.conn.execute_batch(&format!(
            "CREATE TABLE {} ({});",
            spec.table,
            decls.join(", ")
        ))?;

        let placeholders: Vec<String> = (1..=columns.len()).map(|i| format!("?{i}")).collect();
        let mut stmt = self.conn.prepare(&format!(
            "INSERT INTO {} ({}) VALUES ({})",
            spec.table,
            columns.join(", "),
            placeholders.join(", ")
        ))?;
        for row in rows {
            let cells: Vec<rusqlite::types::Value> = columns
                .iter()
                .map(|col| to_sql_value(row.get(*col)))
                .collect();
            stmt.execute(params_from_iter(cells))?;
        }
        Ok(())
    }

    /// Row count for one entity table (test helper).
    pub fn row_count(&self, table: &str) -> PipelineResult<i64> {
        Ok(self
            .conn
            .query_row(&format!("SELECT COUNT(*) FROM {table}"), [], |r| r.get(0))?)
    }

    /// All values of one TEXT column, in insertion order (test helper).
    pub fn text_column(&self, table: &str, column: &str) -> PipelineResult<Vec<String>> {
        let mut stmt = self
            .conn
            .prepare(&format!("SELECT {column} FROM {table} ORDER BY rowid"))?;
        let values = stmt
            .query_map([], |r| r.get(0))?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(values)
    }

    /// All values of one REAL column, in insertion order (test helper).
    pub fn real_column(&self, table: &str, column: &str) -> PipelineResult<Vec<f64>> {
        let mut stmt = self
            .conn
            .prepare(&format!("SELECT {column} FROM {table} ORDER BY rowid"))?;
        let values = stmt
            .query_map([], |r| r.get(0))?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(values)
    }
}

fn to_sql_value(cell: Option<&Value>) -> rusqlite::types::Value {
    use rusqlite::types::Value as Sql;
    match cell {
        Some(Value::String(s)) => Sql::Text(s.clone()),
        Some(Value::Number(n)) => n.as_f64().map(Sql::Real).unwrap_or(Sql::Null),
        Some(Value::Bool(b)) => Sql::Integer(*b as i64),
        _ => Sql::Null,
    }
}
