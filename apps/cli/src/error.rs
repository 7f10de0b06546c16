//! # CLI Error Type
//!
//! The single error type every command returns.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in the CLI                                │
//! │                                                                         │
//! │  Command Function → Result<Output, AppError>                           │
//! │         │                                                               │
//! │         ├── bad arguments?       parse_args      → Usage      (exit 2) │
//! │         ├── ValidationError?     bad draft       → Validation (exit 1) │
//! │         ├── LedgerError::Core?   missing / kind  → NotFound   (exit 1) │
//! │         │                                          BusinessLogic       │
//! │         ├── LedgerError::Persistence / StoreError → Storage   (exit 1) │
//! │         └── ConfigError?                          → Config     (exit 1) │
//! │                                                                         │
//! │  main prints `❌ {message}` on stderr and logs the code.                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Messages are in Portuguese, the language the bakery staff work in.

use std::process::ExitCode;

use matolinha_core::{CoreError, ValidationError};
use matolinha_store::{LedgerError, StoreError};

use crate::config::ConfigError;

/// Error returned from commands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppError {
    /// Machine-readable code, logged alongside the message.
    pub code: ErrorCode,

    /// Human-readable message for display.
    pub message: String,
}

/// Error categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    /// Command line could not be understood
    Usage,

    /// Sale id does not exist
    NotFound,

    /// Sale fields failed validation
    ValidationError,

    /// Operation not allowed for this sale (e.g. repaying a cash sale)
    BusinessLogic,

    /// Store could not be opened, read or written
    StorageError,

    /// Config file or environment is invalid
    ConfigError,

    /// Anything else
    Internal,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::Usage => "USAGE",
            ErrorCode::NotFound => "NOT_FOUND",
            ErrorCode::ValidationError => "VALIDATION_ERROR",
            ErrorCode::BusinessLogic => "BUSINESS_LOGIC",
            ErrorCode::StorageError => "STORAGE_ERROR",
            ErrorCode::ConfigError => "CONFIG_ERROR",
            ErrorCode::Internal => "INTERNAL",
        }
    }
}

impl AppError {
    /// Creates a new error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        AppError {
            code,
            message: message.into(),
        }
    }

    /// Creates a usage error.
    pub fn usage(message: impl Into<String>) -> Self {
        AppError::new(ErrorCode::Usage, message)
    }

    /// Creates a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        AppError::new(ErrorCode::ValidationError, message)
    }

    /// Creates an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        AppError::new(ErrorCode::Internal, message)
    }

    /// Process exit status: 2 for usage errors, 1 otherwise.
    pub fn exit_status(&self) -> u8 {
        match self.code {
            ErrorCode::Usage => 2,
            _ => 1,
        }
    }

    pub fn exit_code(&self) -> ExitCode {
        ExitCode::from(self.exit_status())
    }
}

impl From<ValidationError> for AppError {
    fn from(err: ValidationError) -> Self {
        let message = match &err {
            ValidationError::Required { .. } => "Preencha todos os campos!".to_string(),
            ValidationError::MustBePositive { field } if field == "quantity" => {
                "A quantidade deve ser pelo menos 1!".to_string()
            }
            ValidationError::MustBePositive { field } if field == "unit price" => {
                "O preço unitário deve ser maior que zero!".to_string()
            }
            ValidationError::TooLong { field, max } if field == "client" => {
                format!("O nome do cliente pode ter no máximo {max} caracteres!")
            }
            ValidationError::OutOfRange { field, max, .. } if field == "quantity" => {
                format!("A quantidade não pode passar de {max}!")
            }
            _ => format!("Valor inválido: {err}"),
        };
        AppError::validation(message)
    }
}

impl From<CoreError> for AppError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::SaleNotFound(id) => {
                AppError::new(ErrorCode::NotFound, format!("Venda não encontrada: {id}"))
            }
            CoreError::InvalidKindTransition {
                sale_id,
                current_kind,
            } => AppError::new(
                ErrorCode::BusinessLogic,
                format!(
                    "A venda {sale_id} é \"{}\": só empréstimos podem ser marcados como pagos",
                    current_kind.label()
                ),
            ),
            CoreError::Validation(e) => e.into(),
        }
    }
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::CorruptData(e) => {
                tracing::error!("Stored sales could not be decoded: {}", e);
                AppError::new(
                    ErrorCode::StorageError,
                    "Os dados guardados estão corrompidos e não foram carregados",
                )
            }
            StoreError::ConnectionFailed(e) | StoreError::MigrationFailed(e) => {
                tracing::error!("Store unavailable: {}", e);
                AppError::new(ErrorCode::StorageError, "Não foi possível abrir os dados de vendas")
            }
            other => {
                tracing::error!("Store operation failed: {}", other);
                AppError::new(ErrorCode::StorageError, "Falha ao aceder aos dados de vendas")
            }
        }
    }
}

impl From<LedgerError> for AppError {
    fn from(err: LedgerError) -> Self {
        match err {
            LedgerError::Core(e) => e.into(),
            LedgerError::Persistence(e) => {
                tracing::error!("Sale changed in memory but not saved: {}", e);
                AppError::new(
                    ErrorCode::StorageError,
                    "A alteração não pôde ser guardada. Tente novamente.",
                )
            }
        }
    }
}

impl From<ConfigError> for AppError {
    fn from(err: ConfigError) -> Self {
        AppError::new(ErrorCode::ConfigError, err.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::internal(err.to_string())
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.code.as_str(), self.message)
    }
}

impl std::error::Error for AppError {}
