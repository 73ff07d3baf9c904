//! Execution boundary: register the aggregate and run compiled statements
//! against a caller-owned SQLite connection.
//!
//! Failures are propagated as-is; there is no retry.

use crate::{aggregate, config::StoreConfig, error::Error, query::CompiledQuery};
use rusqlite::{Connection, types::ValueRef};

/// Result rows as plain text cells, in select-list order.
pub type Rows = Vec<Vec<String>>;

/// Register every function the compiled statements depend on.
pub fn register_functions(conn: &Connection, store: &StoreConfig) -> Result<(), Error> {
    aggregate::register(conn, &store.aggregate)?;

    Ok(())
}

/// Run a compiled statement. NULL cells become empty strings.
pub fn run(conn: &Connection, query: &CompiledQuery) -> Result<Rows, Error> {
    let mut stmt = conn.prepare(&query.sql)?;
    let width = stmt.column_count();

    let rows = stmt
        .query_map([], |row| {
            (0..width)
                .map(|idx| row.get_ref(idx).map(|value| value_text(value).unwrap_or_default()))
                .collect::<rusqlite::Result<Vec<_>>>()
        })?
        .collect::<rusqlite::Result<Rows>>()?;

    tracing::debug!(rows = rows.len(), "data table: query executed");

    Ok(rows)
}

/// Text form of a SQLite value; `None` for NULL.
pub(crate) fn value_text(value: ValueRef<'_>) -> Option<String> {
    match value {
        ValueRef::Null => None,
        ValueRef::Integer(n) => Some(n.to_string()),
        ValueRef::Real(f) => Some(f.to_string()),
        ValueRef::Text(bytes) | ValueRef::Blob(bytes) => {
            Some(String::from_utf8_lossy(bytes).into_owned())
        }
    }
}
