use std::path::Path;
use std::sync::{Mutex, MutexGuard};

use rusqlite::types::ValueRef;
use rusqlite::{Connection, ErrorCode};
use tracing::debug;

use crate::error::SQLError;
use crate::traits::{Row, SQLStore, Value};

/// SqliteStore is a SQLStore implementation backed by rusqlite (bundled SQLite).
///
/// A single connection is shared behind a mutex; every call holds the lock
/// for the duration of one statement.
pub struct SqliteStore {
    conn: Mutex<Connection>,
}

impl SqliteStore {
    /// Open or create a SQLite database at the given path.
    pub fn open(path: &Path) -> Result<Self, SQLError> {
        if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
            std::fs::create_dir_all(dir).map_err(|e| SQLError::Connection(e.to_string()))?;
        }

        let conn = Connection::open(path).map_err(|e| SQLError::Connection(e.to_string()))?;

        // WAL keeps readers from blocking on the writer.
        conn.execute_batch("PRAGMA journal_mode=WAL;")
            .map_err(|e| SQLError::Connection(e.to_string()))?;

        debug!("opened sqlite database at {}", path.display());
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Create an in-memory SQLite database (useful for tests).
    pub fn open_in_memory() -> Result<Self, SQLError> {
        let conn = Connection::open_in_memory().map_err(|e| SQLError::Connection(e.to_string()))?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn lock(&self) -> Result<MutexGuard<'_, Connection>, SQLError> {
        self.conn
            .lock()
            .map_err(|e| SQLError::Connection(format!("connection lock poisoned: {}", e)))
    }
}

/// Convert our Value enum to rusqlite's ToSql.
fn bind_params(params: &[Value]) -> Vec<&dyn rusqlite::types::ToSql> {
    params.iter().map(to_sql).collect()
}

fn to_sql(v: &Value) -> &dyn rusqlite::types::ToSql {
    match v {
        Value::Null => &rusqlite::types::Null,
        Value::Integer(i) => i,
        Value::Real(f) => f,
        Value::Text(s) => s,
        Value::Blob(b) => b,
    }
}

/// Map a rusqlite error, keeping constraint violations distinguishable.
fn exec_error(e: rusqlite::Error) -> SQLError {
    if e.sqlite_error_code() == Some(ErrorCode::ConstraintViolation) {
        SQLError::Constraint(e.to_string())
    } else {
        SQLError::Execution(e.to_string())
    }
}

impl SQLStore for SqliteStore {
    fn query(&self, sql: &str, params: &[Value]) -> Result<Vec<Row>, SQLError> {
        let conn = self.lock()?;
        let bound = bind_params(params);

        let mut stmt = conn
            .prepare(sql)
            .map_err(|e| SQLError::Query(e.to_string()))?;

        let column_names: Vec<String> = stmt
            .column_names()
            .iter()
            .map(|s| s.to_string())
            .collect();

        let rows = stmt
            .query_map(bound.as_slice(), |row| {
                let mut columns = Vec::with_capacity(column_names.len());
                for (i, name) in column_names.iter().enumerate() {
                    columns.push((name.clone(), row_value_at(row, i)?));
                }
                Ok(Row { columns })
            })
            .map_err(|e| SQLError::Query(e.to_string()))?;

        let mut result = Vec::new();
        for row in rows {
            result.push(row.map_err(|e| SQLError::Query(e.to_string()))?);
        }
        Ok(result)
    }

    fn exec(&self, sql: &str, params: &[Value]) -> Result<u64, SQLError> {
        let conn = self.lock()?;
        let bound = bind_params(params);

        let affected = conn.execute(sql, bound.as_slice()).map_err(exec_error)?;

        Ok(affected as u64)
    }

    fn insert(&self, sql: &str, params: &[Value]) -> Result<i64, SQLError> {
        let conn = self.lock()?;
        let bound = bind_params(params);

        conn.execute(sql, bound.as_slice()).map_err(exec_error)?;

        // Read under the same lock so a concurrent insert can't interleave.
        Ok(conn.last_insert_rowid())
    }
}

/// Extract a Value from a rusqlite row at a given column index.
fn row_value_at(row: &rusqlite::Row, idx: usize) -> rusqlite::Result<Value> {
    Ok(match row.get_ref(idx)? {
        ValueRef::Null => Value::Null,
        ValueRef::Integer(i) => Value::Integer(i),
        ValueRef::Real(f) => Value::Real(f),
        ValueRef::Text(t) => Value::Text(String::from_utf8_lossy(t).into_owned()),
        ValueRef::Blob(b) => Value::Blob(b.to_vec()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store_with_table() -> SqliteStore {
        let store = SqliteStore::open_in_memory().unwrap();
        store
            .exec(
                "CREATE TABLE item (id INTEGER PRIMARY KEY AUTOINCREMENT, name TEXT UNIQUE, score REAL)",
                &[],
            )
            .unwrap();
        store
    }

    #[test]
    fn insert_returns_rowid() {
        let store = store_with_table();
        let a = store
            .insert("INSERT INTO item (name) VALUES (?1)", &["a".into()])
            .unwrap();
        let b = store
            .insert("INSERT INTO item (name) VALUES (?1)", &["b".into()])
            .unwrap();
        assert_eq!(a, 1);
        assert_eq!(b, 2);
    }

    #[test]
    fn query_preserves_column_types() {
        let store = store_with_table();
        store
            .insert(
                "INSERT INTO item (name, score) VALUES (?1, ?2)",
                &["a".into(), Value::Real(1.5)],
            )
            .unwrap();

        let rows = store
            .query("SELECT id, name, score, NULL AS \"nothing\" FROM item", &[])
            .unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].get_i64("id"), Some(1));
        assert_eq!(rows[0].get_str("name"), Some("a"));
        assert_eq!(rows[0].get("score"), Some(&Value::Real(1.5)));
        assert_eq!(rows[0].get("nothing"), Some(&Value::Null));
    }

    #[test]
    fn unique_violation_is_constraint_error() {
        let store = store_with_table();
        store
            .insert("INSERT INTO item (name) VALUES (?1)", &["dup".into()])
            .unwrap();
        let err = store
            .insert("INSERT INTO item (name) VALUES (?1)", &["dup".into()])
            .unwrap_err();
        assert!(err.is_constraint(), "unexpected error: {err}");
    }

    #[test]
    fn exec_reports_affected_rows() {
        let store = store_with_table();
        for name in ["a", "b", "c"] {
            store
                .insert("INSERT INTO item (name) VALUES (?1)", &[name.into()])
                .unwrap();
        }
        let n = store
            .exec("DELETE FROM item WHERE name <> ?1", &["a".into()])
            .unwrap();
        assert_eq!(n, 2);
    }

    #[test]
    fn open_creates_file_backed_database() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("test.db");
        {
            let store = SqliteStore::open(&path).unwrap();
            store.exec("CREATE TABLE t (x INTEGER)", &[]).unwrap();
            store.insert("INSERT INTO t (x) VALUES (?1)", &[Value::Integer(5)]).unwrap();
        }
        let reopened = SqliteStore::open(&path).unwrap();
        let rows = reopened.query("SELECT x FROM t", &[]).unwrap();
        assert_eq!(rows[0].get_i64("x"), Some(5));
    }
}
