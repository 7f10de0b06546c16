//! # Validation Module
//!
//! Input validation for sale fields.
//!
//! ## Where Validation Happens
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Front end (CLI argument parsing)                             │
//! │  ├── Numbers parse, kind is a known value                              │
//! │  └── Immediate user feedback                                           │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: SaleDraft::new                                               │
//! │  └── THIS MODULE: business rules on each field                         │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Ledger                                                       │
//! │  └── Accepts only drafts, so every stored sale passed Layer 2          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use matolinha_core::validation::{validate_client_name, validate_quantity};
//!
//! assert_eq!(validate_client_name("  Dona Rosa ").unwrap(), "Dona Rosa");
//! assert!(validate_quantity(0).is_err());
//! ```

use crate::error::ValidationError;
use crate::money::Money;
use crate::{MAX_CLIENT_NAME_LEN, MAX_SALE_QUANTITY, MAX_UNIT_PRICE};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// String Validators
// =============================================================================

/// Validates a client name.
///
/// ## Rules
/// - Must not be empty after trimming
/// - At most [`MAX_CLIENT_NAME_LEN`] characters
///
/// ## Returns
/// The trimmed name.
pub fn validate_client_name(name: &str) -> ValidationResult<String> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: "client".to_string(),
        });
    }

    if name.chars().count() > MAX_CLIENT_NAME_LEN {
        return Err(ValidationError::TooLong {
            field: "client".to_string(),
            max: MAX_CLIENT_NAME_LEN,
        });
    }

    Ok(name.to_string())
}

/// Validates a sale id given on the command line.
///
/// Any non-blank string is accepted: new ids are UUIDs but ids loaded from
/// older data are millisecond timestamps.
pub fn validate_sale_id(id: &str) -> ValidationResult<String> {
    let id = id.trim();

    if id.is_empty() {
        return Err(ValidationError::Required {
            field: "id".to_string(),
        });
    }

    Ok(id.to_string())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a quantity of loaves.
///
/// ## Rules
/// - Must be positive (> 0)
/// - Must not exceed [`MAX_SALE_QUANTITY`]
pub fn validate_quantity(qty: i64) -> ValidationResult<()> {
    if qty <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }

    if qty > MAX_SALE_QUANTITY {
        return Err(ValidationError::OutOfRange {
            field: "quantity".to_string(),
            min: 1,
            max: MAX_SALE_QUANTITY,
        });
    }

    Ok(())
}

/// Validates a unit price.
///
/// ## Rules
/// - Must be positive (> 0), free loaves are not sales
/// - Must not exceed [`MAX_UNIT_PRICE`]
///
/// ## Example
/// ```rust
/// use matolinha_core::money::Money;
/// use matolinha_core::validation::validate_unit_price;
///
/// assert!(validate_unit_price(Money::from_cents(500)).is_ok());
/// assert!(validate_unit_price(Money::zero()).is_err());
/// ```
pub fn validate_unit_price(price: Money) -> ValidationResult<()> {
    if !price.is_positive() {
        return Err(ValidationError::MustBePositive {
            field: "unit price".to_string(),
        });
    }

    if price > MAX_UNIT_PRICE {
        return Err(ValidationError::OutOfRange {
            field: "unit price".to_string(),
            min: 1,
            max: MAX_UNIT_PRICE.cents(),
        });
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
