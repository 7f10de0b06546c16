//! # Store Error Types
//!
//! Error types for store and ledger operations.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Propagation                                    │
//! │                                                                         │
//! │  sqlx::Error / MigrateError / serde_json::Error                        │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  StoreError ← Adds context and categorization                          │
//! │       │                                                                 │
//! │       │            CoreError (not found, bad transition)                │
//! │       │                 │                                               │
//! │       ▼                 ▼                                               │
//! │  LedgerError::Persistence  LedgerError::Core                           │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  AppError (in CLI) ← Exit code + user message                          │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use matolinha_core::CoreError;
use thiserror::Error;

// =============================================================================
// Store Error
// =============================================================================

/// Key-value store errors.
///
/// These errors wrap sqlx errors and provide additional context
/// for debugging and user feedback.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Store connection failed.
    ///
    /// ## When This Occurs
    /// - Database file can't be created (missing directory, permissions)
    /// - Disk full
    /// - Pool already closed
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// Migration failed.
    ///
    /// ## When This Occurs
    /// - Invalid SQL in migration
    /// - Database was written by a newer version
    #[error("Migration failed: {0}")]
    MigrationFailed(String),

    /// Query execution failed.
    #[error("Query failed: {0}")]
    QueryFailed(String),

    /// Pool exhausted (all connections in use).
    #[error("Connection pool exhausted")]
    PoolExhausted,

    /// A stored value could not be decoded.
    ///
    /// ## When This Occurs
    /// - The sales entry is not a JSON array of sales
    /// - A sale has an unknown `tipo` or a malformed `data` timestamp
    #[error("Stored data is corrupt: {0}")]
    CorruptData(String),

    /// Internal store error.
    #[error("Internal store error: {0}")]
    Internal(String),
}

/// Convert sqlx errors to StoreError.
///
/// ## Error Mapping
/// ```text
/// sqlx::Error::Database       → StoreError::QueryFailed
/// sqlx::Error::PoolTimedOut   → StoreError::PoolExhausted
/// sqlx::Error::PoolClosed     → StoreError::ConnectionFailed
/// Other                       → StoreError::Internal
/// ```
impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::Database(db_err) => StoreError::QueryFailed(db_err.message().to_string()),
            sqlx::Error::PoolTimedOut => StoreError::PoolExhausted,
            sqlx::Error::PoolClosed => StoreError::ConnectionFailed("Pool is closed".to_string()),
            _ => StoreError::Internal(err.to_string()),
        }
    }
}

impl From<sqlx::migrate::MigrateError> for StoreError {
    fn from(err: sqlx::migrate::MigrateError) -> Self {
        StoreError::MigrationFailed(err.to_string())
    }
}

/// JSON errors only arise when decoding a stored value.
impl From<serde_json::Error> for StoreError {
    fn from(err: serde_json::Error) -> Self {
        StoreError::CorruptData(err.to_string())
    }
}

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

// =============================================================================
// Ledger Error
// =============================================================================

/// Outcome of a failed ledger operation.
///
/// `Core` errors leave the ledger untouched. A `Persistence` error means the
/// in-memory change was applied but could not be saved, so memory and store
/// differ until the next successful save.
#[derive(Debug, Error)]
pub enum LedgerError {
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("Could not save sales: {0}")]
    Persistence(#[from] StoreError),
}

impl LedgerError {
    /// True when the target sale does not exist.
    pub fn is_not_found(&self) -> bool {
        matches!(self, LedgerError::Core(err) if err.is_not_found())
    }

    /// True when the change is in memory but not in the store.
    pub fn is_persistence(&self) -> bool {
        matches!(self, LedgerError::Persistence(_))
    }
}

/// Result type for ledger operations.
pub type LedgerResult<T> = Result<T, LedgerError>;

// =============================================================================
// Unit Tests
// =============================================================================
