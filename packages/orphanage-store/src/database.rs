//! In-memory SQLite database holding the employee and child tables.

use std::time::Instant;

use rusqlite::types::Value as SqlValue;
use rusqlite::{params_from_iter, Connection, OptionalExtension, Statement};
use serde_json::{Map, Value};

use crate::error::StoreResult;
use crate::schema::{Table, SCHEMA_SQL};
use crate::value::{json_to_sql, sql_to_json};

/// A stored row rendered as a JSON object, keys in column order.
pub type Row = Map<String, Value>;

/// Synchronous database handle.
///
/// Every method executes exactly one statement against one table.
#[derive(Debug)]
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Opens a fresh in-memory database and creates the fixed schema.
    pub fn open_in_memory() -> StoreResult<Self> {
        let started_at = Instant::now();
        let conn = Connection::open_in_memory()?;
        conn.execute_batch(SCHEMA_SQL)?;
        tracing::info!(
            duration_ms = started_at.elapsed().as_millis() as u64,
            "Opened in-memory store"
        );
        Ok(Self { conn })
    }

    /// Returns every row of `table`, ordered by id.
    pub fn list_all(&self, table: Table) -> StoreResult<Vec<Row>> {
        let mut stmt = self.conn.prepare_cached(table.select_all_sql())?;
        let names = column_names(&stmt);
        let rows = stmt
            .query_map([], |row| read_row(row, &names))?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(rows)
    }

    /// Returns the row with the given id, or `None` if no row matches.
    pub fn get_by_id(&self, table: Table, id: &str) -> StoreResult<Option<Row>> {
        let mut stmt = self.conn.prepare_cached(table.select_by_id_sql())?;
        let names = column_names(&stmt);
        let row = stmt
            .query_row([id], |row| read_row(row, &names))
            .optional()?;
        Ok(row)
    }

    /// Inserts a row and returns the id assigned by the store.
    ///
    /// `values` are bound in `table.columns()` order; missing trailing
    /// values bind as NULL.
    pub fn insert(&self, table: Table, values: &[Value]) -> StoreResult<i64> {
        let mut stmt = self.conn.prepare_cached(table.insert_sql())?;
        stmt.execute(params_from_iter(bind_columns(table, values)))?;
        Ok(self.conn.last_insert_rowid())
    }

    /// Replaces all non-id columns of the row with the given id.
    ///
    /// Returns the number of rows affected (0 or 1).
    pub fn update(&self, table: Table, id: &str, values: &[Value]) -> StoreResult<usize> {
        let mut params = bind_columns(table, values);
        params.push(SqlValue::Text(id.to_string()));
        let mut stmt = self.conn.prepare_cached(table.update_sql())?;
        Ok(stmt.execute(params_from_iter(params))?)
    }

    /// Deletes the row with the given id.
    ///
    /// Returns the number of rows affected (0 or 1).
    pub fn delete(&self, table: Table, id: &str) -> StoreResult<usize> {
        let mut stmt = self.conn.prepare_cached(table.delete_sql())?;
        Ok(stmt.execute([id])?)
    }
}

fn bind_columns(table: Table, values: &[Value]) -> Vec<SqlValue> {
    (0..table.columns().len())
        .map(|i| values.get(i).map(json_to_sql).unwrap_or(SqlValue::Null))
        .collect()
}

fn column_names(stmt: &Statement<'_>) -> Vec<String> {
    stmt.column_names().into_iter().map(String::from).collect()
}

fn read_row(row: &rusqlite::Row<'_>, names: &[String]) -> rusqlite::Result<Row> {
    let mut out = Map::with_capacity(names.len());
    for (idx, name) in names.iter().enumerate() {
        out.insert(name.clone(), sql_to_json(row.get_ref(idx)?));
    }
    Ok(out)
}
