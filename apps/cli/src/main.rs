//! # Matolinha Entry Point
//!
//! `matolinha` records the bakery's bread sales from the terminal.
//!
//! ## Application Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                          matolinha (binary)                             │
//! │                                                                         │
//! │  main.rs ────► Starts the runtime, hands argv to lib.rs                 │
//! │                                                                         │
//! │  lib.rs ─────► Logging, config, store, command dispatch                 │
//! │                                                                         │
//! │  commands/ ──► add, edit, remove, pay, today, summary, stats, report    │
//! │                                 │                                       │
//! │                                 ▼                                       │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │                         SQLite Database                          │  │
//! │  │  vendas.db (local file, WAL mode, key "vendas")                  │  │
//! │  └──────────────────────────────────────────────────────────────────┘  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::process::ExitCode;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    // The actual setup is in lib.rs for testability
    matolinha_cli::run(std::env::args().skip(1)).await
}
