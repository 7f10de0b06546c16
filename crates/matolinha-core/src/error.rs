//! # Error Types
//!
//! Domain-specific error types for matolinha-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  matolinha-core errors (this file)                                     │
//! │  ├── CoreError        - Ledger rule violations                         │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  matolinha-store errors (separate crate)                               │
//! │  ├── StoreError       - Key-value store failures                       │
//! │  └── LedgerError      - CoreError | StoreError                         │
//! │                                                                         │
//! │  CLI errors (in app)                                                   │
//! │  └── AppError         - What the user sees                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

use crate::types::SaleKind;

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
///
/// Both variants are local, non-fatal outcomes: the caller decides what to
/// tell the user.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    /// No sale with this id exists in the ledger.
    #[error("Sale not found: {0}")]
    SaleNotFound(String),

    /// The sale's current kind does not allow the requested transition.
    ///
    /// ## When This Occurs
    /// - Marking a cash sale as repaid
    /// - Marking an already repaid loan as repaid again
    #[error("Sale {sale_id} is {current_kind}, only loans can be marked as repaid")]
    InvalidKindTransition {
        sale_id: String,
        current_kind: SaleKind,
    },

    /// The draft itself was rejected.
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

impl CoreError {
    /// True for [`CoreError::SaleNotFound`].
    pub fn is_not_found(&self) -> bool {
        matches!(self, CoreError::SaleNotFound(_))
    }
}

// =============================================================================
// Validation Error
// =============================================================================

/// Rejected sale input.
///
/// Raised while building a [`SaleDraft`](crate::SaleDraft) or parsing
/// command-line values, so a bad draft never reaches the ledger.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Blank client name or sale id.
    #[error("{field} is required")]
    Required { field: String },

    /// Client name longer than `MAX_CLIENT_NAME_LEN`.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Quantity or unit price above its cap.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Zero or negative quantity or unit price.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Amount text that is not a decimal number.
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// Unknown sale kind.
    #[error("{field} must be one of: {allowed:?}")]
    NotAllowed { field: String, allowed: Vec<String> },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Result of a ledger rule check.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
