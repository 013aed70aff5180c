//! SQLite storage gateway for weather records.
//!
//! Owns all write access to the `weather` table. Append-only: records are
//! never updated or deleted, and the core exposes no queries (analysis
//! consumers read the database file directly).

use std::path::Path;

use rusqlite::Connection;
use rusqlite::types::Value;

use crate::error::PipelineError;
use crate::model::{CurrentField, Measurement};
use crate::record::WeatherRecord;

const TABLE: &str = "weather";

#[derive(Debug)]
pub struct WeatherStore {
    conn: Connection,
}

impl WeatherStore {
    pub fn open(path: &Path) -> Result<Self, PipelineError> {
        Ok(Self { conn: Connection::open(path)? })
    }

    pub fn open_in_memory() -> Result<Self, PipelineError> {
        Ok(Self { conn: Connection::open_in_memory()? })
    }

    /// Create the weather table if it does not exist. Safe to call on every
    /// run; existing rows are never touched.
    pub fn ensure_schema(&self) -> Result<(), PipelineError> {
        self.conn.execute(&schema_sql(), [])?;
        Ok(())
    }

    /// Insert exactly one row. `captured_at` is filled in by SQLite.
    pub fn append(&self, record: &WeatherRecord) -> Result<(), PipelineError> {
        let mut values: Vec<Value> = Vec::with_capacity(3 + CurrentField::ALL.len());
        values.push(record.location_name.clone().into());
        values.push(record.latitude.into());
        values.push(record.longitude.into());
        for field in CurrentField::ALL {
            values.push(match record.measurement(field) {
                Measurement::Real(v) => v.into(),
                Measurement::Integer(v) => v.into(),
            });
        }

        self.conn.execute(&insert_sql(), rusqlite::params_from_iter(values))?;
        Ok(())
    }
}

/// Measurement columns are generated from `CurrentField::ALL`, the same
/// enumeration the fetch requests, so schema order cannot drift from the
/// request order.
fn schema_sql() -> String {
    let mut columns = vec![
        "location_name TEXT NOT NULL".to_string(),
        "latitude REAL".to_string(),
        "longitude REAL".to_string(),
    ];
    columns.extend(CurrentField::ALL.iter().map(|f| {
        let sql_type = if f.is_integer() { "INTEGER" } else { "REAL" };
        format!("{} {}", f.column(), sql_type)
    }));
    columns.push("captured_at DATETIME DEFAULT CURRENT_TIMESTAMP".to_string());

    format!(
        "CREATE TABLE IF NOT EXISTS {TABLE} (\n    {}\n)",
        columns.join(",\n    ")
    )
}

fn insert_sql() -> String {
    let mut columns = vec!["location_name", "latitude", "longitude"];
    columns.extend(CurrentField::ALL.iter().map(|f| f.column()));

    let placeholders: Vec<String> = (1..=columns.len()).map(|i| format!("?{i}")).collect();

    format!(
        "INSERT INTO {TABLE} ({}) VALUES ({})",
        columns.join(", "),
        placeholders.join(", ")
    )
}

#[cfg(test)]
impl WeatherStore {
    pub(crate) fn row_count(&self) -> i64 {
        self.conn
            .query_row(&format!("SELECT COUNT(*) FROM {TABLE}"), [], |row| row.get(0))
            .unwrap()
    }

    pub(crate) fn location_names(&self) -> Vec<String> {
        let mut stmt = self
            .conn
            .prepare(&format!("SELECT location_name FROM {TABLE} ORDER BY rowid"))
            .unwrap();
        let rows = stmt.query_map([], |row| row.get(0)).unwrap();
        rows.collect::<Result<Vec<String>, _>>().unwrap()
    }
}
