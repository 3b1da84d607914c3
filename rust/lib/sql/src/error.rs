use thiserror::Error;

#[derive(Error, Debug)]
pub enum SQLError {
    #[error("query error: {0}")]
    Query(String),

    #[error("execution error: {0}")]
    Execution(String),

    #[error("connection error: {0}")]
    Connection(String),

    /// A row did not carry the column (or column type) the caller expected.
    #[error("decode error: {0}")]
    Decode(String),
}

impl SQLError {
    /// Whether the underlying SQLite error was a UNIQUE constraint violation.
    pub fn is_unique_violation(&self) -> bool {
        match self {
            SQLError::Execution(msg) | SQLError::Query(msg) => msg.contains("UNIQUE constraint"),
            _ => false,
        }
    }
}
