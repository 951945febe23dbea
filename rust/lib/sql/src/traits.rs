use crate::error::SQLError;

/// A dynamically-typed SQL parameter value.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Integer(i64),
    Real(f64),
    Text(String),
    Blob(Vec<u8>),
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Value::Integer(v)
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

/// A row returned from a SQL query — column name to value.
#[derive(Debug, Clone)]
pub struct Row {
    pub columns: Vec<(String, Value)>,
}

impl Row {
    /// Get a column value by name.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.columns.iter().find(|(n, _)| n == name).map(|(_, v)| v)
    }

    /// Get a text column value by name.
    pub fn get_str(&self, name: &str) -> Option<&str> {
        match self.get(name) {
            Some(Value::Text(s)) => Some(s.as_str()),
            _ => None,
        }
    }

    /// Get an integer column value by name.
    pub fn get_i64(&self, name: &str) -> Option<i64> {
        match self.get(name) {
            Some(Value::Integer(i)) => Some(*i),
            _ => None,
        }
    }

    /// Get a text column, failing with a query error when it is absent or not text.
    pub fn require_str(&self, name: &str) -> Result<String, SQLError> {
        self.get_str(name)
            .map(str::to_string)
            .ok_or_else(|| SQLError::Query(format!("missing text column '{}'", name)))
    }

    /// Get an integer column, failing with a query error when it is absent or not an integer.
    pub fn require_i64(&self, name: &str) -> Result<i64, SQLError> {
        self.get_i64(name)
            .ok_or_else(|| SQLError::Query(format!("missing integer column '{}'", name)))
    }
}

/// SQLStore provides a SQL execution interface backed by an embedded database.
///
/// Implementations must be safe to share across request tasks.
pub trait SQLStore: Send + Sync {
    /// Execute a query and return rows.
    fn query(&self, sql: &str, params: &[Value]) -> Result<Vec<Row>, SQLError>;

    /// Execute a statement (UPDATE/DELETE/DDL) and return affected row count.
    fn exec(&self, sql: &str, params: &[Value]) -> Result<u64, SQLError>;

    /// Execute an INSERT and return the rowid of the inserted row.
    fn insert(&self, sql: &str, params: &[Value]) -> Result<i64, SQLError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Row {
        Row {
            columns: vec![
                ("id".to_string(), Value::Integer(7)),
                ("name".to_string(), Value::Text("alice".to_string())),
                ("gone".to_string(), Value::Null),
            ],
        }
    }

    #[test]
    fn typed_getters() {
        let row = sample();
        assert_eq!(row.get_i64("id"), Some(7));
        assert_eq!(row.get_str("name"), Some("alice"));
        assert_eq!(row.get_str("id"), None);
        assert_eq!(row.get("gone"), Some(&Value::Null));
        assert!(row.get("missing").is_none());
    }

    #[test]
    fn require_reports_missing_column() {
        let row = sample();
        assert_eq!(row.require_i64("id").unwrap(), 7);
        assert!(row.require_str("gone").is_err());
        assert!(row.require_i64("name").is_err());
    }

    #[test]
    fn value_conversions() {
        assert_eq!(Value::from(3i64), Value::Integer(3));
        assert_eq!(Value::from("x"), Value::Text("x".into()));
        assert_eq!(Value::from(String::from("y")), Value::Text("y".into()));
    }
}
