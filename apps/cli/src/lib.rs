//! # Matolinha CLI
//!
//! Command-line front end for the Pão Matolinha sales ledger.
//!
//! ## Module Organization
//! ```text
//! matolinha_cli/
//! ├── lib.rs          ◄─── You are here (startup & run)
//! ├── cli.rs          ◄─── Argument parsing
//! ├── config.rs       ◄─── AppConfig (defaults, TOML file, env)
//! ├── commands/
//! │   ├── mod.rs      ◄─── Output type and dispatch
//! │   ├── sale.rs     ◄─── add / edit / remove / pay / show / today
//! │   └── report.rs   ◄─── summary / stats / report
//! └── error.rs        ◄─── AppError for commands
//! ```

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;

use std::io::{self, BufRead, Write};
use std::process::ExitCode;

use matolinha_core::Sale;
use matolinha_store::{Ledger, Store, StoreConfig};
use tracing::{debug, error};
use tracing_subscriber::EnvFilter;

use cli::{parse_args, Command, USAGE};
use config::AppConfig;
use error::AppError;

/// Log filter when `RUST_LOG` is unset. Store lifecycle lines are `debug`.
const DEFAULT_LOG_FILTER: &str = "warn";

/// Runs one invocation and returns the process exit code.
///
/// ## Startup Sequence
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │                       Invocation                                        │
/// │                                                                         │
/// │  1. Initialize Logging ── tracing-subscriber on stderr, RUST_LOG        │
/// │  2. Parse Arguments ───── `help` stops here                             │
/// │  3. Load Config ───────── defaults → matolinha.toml → MATOLINHA_*       │
/// │  4. Open Store ────────── SQLite file, WAL, migrations                  │
/// │  5. Load Ledger ───────── key "vendas", empty if missing                │
/// │  6. Run Command ───────── print output on stdout                        │
/// │  7. Close Store                                                         │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub async fn run<I>(args: I) -> ExitCode
where
    I: IntoIterator<Item = String>,
{
    init_tracing();

    match try_run(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!(code = err.code.as_str(), "{}", err.message);
            eprintln!("❌ {}", err.message);
            err.exit_code()
        }
    }
}

async fn try_run<I>(args: I) -> Result<(), AppError>
where
    I: IntoIterator<Item = String>,
{
    let cli = parse_args(args)?;

    if cli.command == Command::Help {
        print!("{USAGE}");
        return Ok(());
    }

    let config = AppConfig::load(cli.config_path)?;
    let db_path = match cli.db_path {
        Some(path) => path,
        None => config.database_path()?,
    };
    if let Some(parent) = db_path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    debug!(?db_path, "Database path determined");

    let store = Store::open(StoreConfig::new(db_path)).await?;
    let result = match Ledger::open(store.kv()).await {
        Ok(mut ledger) => {
            commands::execute(cli.command, &mut ledger, &config, confirm_on_terminal).await
        }
        Err(e) => Err(e.into()),
    };
    store.close().await;

    let output = result?;
    println!("{}", output.render());
    Ok(())
}

/// Initializes the tracing subscriber for structured logging.
///
/// Logs go to stderr so command output on stdout stays clean.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=matolinha_store=debug` - Store lifecycle and ledger mutations
/// - Default: warnings and errors only
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    // A second init (tests) is not an error worth reporting.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();
}

/// Asks on the terminal before removing a sale.
fn confirm_on_terminal(sale: &Sale) -> io::Result<bool> {
    let mut stdout = io::stdout().lock();
    write!(
        stdout,
        "Tem certeza que deseja remover a venda de {}? [s/N] ",
        sale.client
    )?;
    stdout.flush()?;

    let mut answer = String::new();
    io::stdin().lock().read_line(&mut answer)?;
    debug!(answer = %answer.trim(), "Removal confirmation");
    Ok(is_yes(&answer))
}

fn is_yes(answer: &str) -> bool {
    matches!(
        answer.trim().to_lowercase().as_str(),
        "s" | "sim" | "y" | "yes"
    )
}
