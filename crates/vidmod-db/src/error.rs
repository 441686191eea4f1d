//! Error types for vidmod-db

use thiserror::Error;

/// Schema storage errors
#[derive(Error, Debug)]
pub enum DbError {
    /// Connection error (D001)
    #[error("[D001] Database connection failed: {0}")]
    ConnectionError(String),

    /// Statement execution error (D002)
    #[error("[D002] SQL execution failed: {0}")]
    ExecutionError(String),

    /// Table not found (D003)
    #[error("[D003] Table not found: {0}")]
    TableNotFound(String),

    /// Column not found (D004)
    #[error("[D004] Column not found: {table}.{column}")]
    ColumnNotFound { table: String, column: String },

    /// Column already exists (D005)
    #[error("[D005] Column already exists: {table}.{column}")]
    ColumnExists { table: String, column: String },

    /// Table already exists (D006)
    #[error("[D006] Table already exists: {0}")]
    TableExists(String),

    /// Transaction management error (D007)
    #[error("[D007] Transaction failed: {0}")]
    TransactionError(String),
}

/// Result type alias for DbError
pub type DbResult<T> = Result<T, DbError>;

impl From<duckdb::Error> for DbError {
    fn from(err: duckdb::Error) -> Self {
        // duckdb::Error does not expose structured variants, so the
        // catalog errors we care about are recognised by message.
        let msg = err.to_string();
        if msg.contains("Table with name") && msg.contains("does not exist") {
            DbError::TableNotFound(msg)
        } else {
            DbError::ExecutionError(msg)
        }
    }
}
