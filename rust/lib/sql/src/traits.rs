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

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Text(s)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Integer(i)
    }
}

/// A row returned from a SQL query: column name to value.
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

    /// Like [`Row::get_str`], but a missing or non-text column is an error.
    pub fn text(&self, name: &str) -> Result<String, SQLError> {
        self.get_str(name)
            .map(str::to_string)
            .ok_or_else(|| SQLError::Decode(format!("missing text column '{}'", name)))
    }

    /// Like [`Row::get_i64`], but a missing or non-integer column is an error.
    pub fn int(&self, name: &str) -> Result<i64, SQLError> {
        self.get_i64(name)
            .ok_or_else(|| SQLError::Decode(format!("missing integer column '{}'", name)))
    }
}

/// SQLStore provides a SQL execution interface backed by an embedded database.
///
/// Callers always bind user input through `params`; statements are static
/// strings so nothing user-controlled is ever spliced into SQL text.
pub trait SQLStore: Send + Sync {
    /// Execute a query and return rows.
    ///
    /// Also used for `INSERT ... RETURNING` statements.
    fn query(&self, sql: &str, params: &[Value]) -> Result<Vec<Row>, SQLError>;

    /// Execute a statement (INSERT/UPDATE/DELETE) and return affected row count.
    fn exec(&self, sql: &str, params: &[Value]) -> Result<u64, SQLError>;

    /// Execute a query expected to yield at most one row.
    fn query_one(&self, sql: &str, params: &[Value]) -> Result<Option<Row>, SQLError> {
        Ok(self.query(sql, params)?.into_iter().next())
    }
}
