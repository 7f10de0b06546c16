//! # matolinha-store: Persistence for the Matolinha Ledger
//!
//! A SQLite key-value store and the sales [`Ledger`] that lives on top of it.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Matolinha Data Flow                              │
//! │                                                                         │
//! │  CLI command (matolinha add Ana 2)                                     │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                matolinha-store (THIS CRATE)                     │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐  │   │
//! │  │   │    Ledger     │    │  Repository   │    │  Migrations  │  │   │
//! │  │   │  (ledger.rs)  │    │   (kv.rs)     │    │  (embedded)  │  │   │
//! │  │   │               │    │               │    │              │  │   │
//! │  │   │  Vec<Sale>    │───►│ KeyValueRepo  │    │ 0001_kv_     │  │   │
//! │  │   │  in memory    │    │ get/set/...   │    │ store.sql    │  │   │
//! │  │   └───────────────┘    └───────┬───────┘    └──────────────┘  │   │
//! │  │                                │  Store (pool.rs)              │   │
//! │  └────────────────────────────────┼────────────────────────────────┘   │
//! │                                   ▼                                     │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │   SQLite file: kv_store("vendas") = JSON array of sales         │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`pool`] - Store configuration and connection pool
//! - [`migrations`] - Embedded migrations
//! - [`error`] - Store and ledger error types
//! - [`repository`] - Key-value repository
//! - [`ledger`] - The sales ledger
//!
//! ## Usage
//!
//! ```rust,no_run
//! use matolinha_core::{Money, SaleDraft, SaleKind};
//! use matolinha_store::{Ledger, Store, StoreConfig};
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let store = Store::open(StoreConfig::new("vendas.db")).await?;
//! let mut ledger = Ledger::open(store.kv()).await?;
//!
//! let draft = SaleDraft::new("Ana", 2, Money::from_cents(500), SaleKind::Cash)?;
//! let sale = ledger.add(&draft).await?;
//! assert_eq!(sale.total.cents(), 1000);
//! # Ok(())
//! # }
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod ledger;
pub mod migrations;
pub mod pool;
pub mod repository;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{LedgerError, LedgerResult, StoreError, StoreResult};
pub use ledger::{Ledger, SALES_KEY};
pub use pool::{Store, StoreConfig, StoreLocation};
pub use repository::kv::KeyValueRepository;
