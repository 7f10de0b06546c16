//! # matolinha-core: Pure Business Logic for the Pão Matolinha Ledger
//!
//! Everything about a bakery sale that can be decided without touching a
//! disk: the types, their validation, the daily totals and the report text.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Matolinha Architecture                              │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    apps/cli (`matolinha`)                       │   │
//! │  │     add ──► edit ──► pay ──► today ──► summary ──► report       │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │              matolinha-store (Ledger + KV store)                │   │
//! │  │           in-memory sales, persisted as one JSON entry          │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │            ★ matolinha-core (THIS CRATE) ★                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │   money   │  │  summary  │  │  report   │  │   │
//! │  │   │   Sale    │  │   Money   │  │  Daily    │  │ WhatsApp  │  │   │
//! │  │   │ SaleDraft │  │ centavos  │  │  Summary  │  │   text    │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - `Sale`, `SaleDraft`, `SaleKind`
//! - [`money`] - Money type with integer arithmetic
//! - [`summary`] - Daily summary and dashboard figures
//! - [`report`] - WhatsApp daily report text
//! - [`error`] - Domain error types
//! - [`validation`] - Field rules applied by `SaleDraft::new`
//!
//! ## Example Usage
//!
//! ```rust
//! use chrono::Utc;
//! use matolinha_core::{daily_summary, Money, Sale, SaleDraft, SaleKind};
//!
//! let price: Money = "5.50".parse().unwrap();
//! let draft = SaleDraft::new("Ana", 3, price, SaleKind::Cash).unwrap();
//! let sale = Sale::from_draft("1", &draft, Utc::now());
//!
//! assert_eq!(sale.total.to_string(), "16.50");
//! assert_eq!(daily_summary([&sale]).units_cash, 3);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod money;
pub mod report;
pub mod summary;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use report::{whatsapp_report, ReportOptions};
pub use summary::{daily_summary, dashboard_stats, DailySummary, DashboardStats};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Longest accepted client name, in characters.
pub const MAX_CLIENT_NAME_LEN: usize = 100;

/// Most loaves in a single sale.
///
/// Catches a mistyped quantity (1000 instead of 10) before it lands in the
/// day's totals.
pub const MAX_SALE_QUANTITY: i64 = 9_999;

/// Highest accepted unit price (1 000 000.00).
pub const MAX_UNIT_PRICE: Money = Money::from_cents(100_000_000);

/// Unit price offered when none is given.
pub const DEFAULT_UNIT_PRICE: Money = Money::from_cents(500);

pub const DEFAULT_STORE_NAME: &str = "Pão Matolinha";

pub const DEFAULT_CURRENCY: &str = "MZN";
