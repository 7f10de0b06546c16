//! # Commands
//!
//! One function per CLI command. Each returns an [`Output`] (or an
//! `AppError`), and the caller decides how to print it.
//!
//! ## Module Organization
//! ```text
//! commands/
//! ├── mod.rs      ◄─── Output type, dispatch, shared formatting
//! ├── sale.rs     ◄─── add, edit, remove, pay, show, today
//! └── report.rs   ◄─── summary, stats, report
//! ```

pub mod report;
pub mod sale;

use chrono::{Local, NaiveDate};
use matolinha_core::Sale;
use matolinha_store::Ledger;
use serde::Serialize;

use crate::cli::{Command, USAGE};
use crate::config::AppConfig;
use crate::error::AppError;

// =============================================================================
// Output
// =============================================================================

/// How an outcome is shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notice {
    Success,
    Warning,
    Info,
}

/// Text produced by a command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Output {
    pub notice: Notice,
    pub text: String,
}

impl Output {
    pub fn success(text: impl Into<String>) -> Self {
        Output {
            notice: Notice::Success,
            text: text.into(),
        }
    }

    pub fn warning(text: impl Into<String>) -> Self {
        Output {
            notice: Notice::Warning,
            text: text.into(),
        }
    }

    pub fn info(text: impl Into<String>) -> Self {
        Output {
            notice: Notice::Info,
            text: text.into(),
        }
    }

    /// Pretty JSON of `value` as plain output.
    pub fn json<T: Serialize + ?Sized>(value: &T) -> Result<Self, AppError> {
        serde_json::to_string_pretty(value)
            .map(Output::info)
            .map_err(|e| AppError::internal(format!("JSON encoding failed: {e}")))
    }

    /// Text with its notice marker.
    pub fn render(&self) -> String {
        match self.notice {
            Notice::Success => format!("✅ {}", self.text),
            Notice::Warning => format!("⚠️  {}", self.text),
            Notice::Info => self.text.clone(),
        }
    }
}

// =============================================================================
// Dispatch
// =============================================================================

/// Runs one command against the ledger.
///
/// `confirm` is asked before a sale is removed without `--yes`.
pub async fn execute<F>(
    command: Command,
    ledger: &mut Ledger,
    config: &AppConfig,
    confirm: F,
) -> Result<Output, AppError>
where
    F: FnOnce(&Sale) -> std::io::Result<bool>,
{
    let today = Local::now().date_naive();

    match command {
        Command::Add {
            client,
            quantity,
            unit_price,
            kind,
        } => {
            let unit_price = unit_price.unwrap_or(config.store.default_price);
            sale::add(ledger, config, &client, quantity, unit_price, kind).await
        }
        Command::Edit {
            id,
            client,
            quantity,
            unit_price,
            kind,
        } => sale::edit(ledger, config, &id, &client, quantity, unit_price, kind).await,
        Command::Remove { id, assume_yes } => {
            if assume_yes {
                sale::remove(ledger, &id, |_| Ok(true)).await
            } else {
                sale::remove(ledger, &id, confirm).await
            }
        }
        Command::Pay { id } => sale::pay(ledger, config, &id).await,
        Command::Show { id, json } => sale::show(ledger, config, &id, json),
        Command::Today { date, json } => {
            sale::list_day(ledger, config, date.unwrap_or(today), json)
        }
        Command::Summary { date, json } => {
            report::summary(ledger, config, date.unwrap_or(today), json)
        }
        Command::Stats { date, json } => report::stats(ledger, config, date.unwrap_or(today), json),
        Command::Report { date } => report::whatsapp(ledger, config, date.unwrap_or(today)),
        Command::Help => Ok(Output::info(USAGE)),
    }
}

// =============================================================================
// Formatting
// =============================================================================

/// One-line listing: `Ana • 2 pães • À Vista • 10.00 MZN  [id]`.
pub fn sale_line(sale: &Sale, currency: &str) -> String {
    format!(
        "{} • {} pães • {} • {} {}  [{}]",
        sale.client,
        sale.quantity,
        sale.kind.label(),
        sale.total,
        currency,
        sale.id
    )
}

/// "Nothing recorded" line naming `day`, or "hoje" when it is today.
pub fn no_sales_message(day: NaiveDate) -> String {
    if day == Local::now().date_naive() {
        "Nenhuma venda registrada hoje".to_string()
    } else {
        format!("Nenhuma venda registrada em {}", day.format("%d/%m/%Y"))
    }
}

/// Multi-line view of a single sale.
pub fn sale_details(sale: &Sale, currency: &str) -> String {
    let created = sale.created_at.with_timezone(&Local);
    format!(
        "Venda {id}\n\
         \x20 Cliente:        {client}\n\
         \x20 Quantidade:     {qty} pães\n\
         \x20 Preço unitário: {price} {cur}\n\
         \x20 Tipo:           {kind}\n\
         \x20 Total:          {total} {cur}\n\
         \x20 Data:           {date}",
        id = sale.id,
        client = sale.client,
        qty = sale.quantity,
        price = sale.unit_price,
        kind = sale.kind.label(),
        total = sale.total,
        cur = currency,
        date = created.format("%d/%m/%Y %H:%M"),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use matolinha_core::{Money, SaleDraft, SaleKind};

    #[test]
    fn test_render_markers() {
        assert_eq!(Output::success("ok").render(), "✅ ok");
        assert_eq!(Output::info("olá").render(), "olá");
        assert!(Output::warning("cuidado").render().ends_with("cuidado"));
    }

    #[test]
    fn test_sale_line() {
        let draft = SaleDraft::new("Ana", 2, Money::from_cents(500), SaleKind::Loan).unwrap();
        let sale = Sale::from_draft("42", &draft, Utc::now());

        assert_eq!(sale_line(&sale, "MZN"), "Ana • 2 pães • Empréstimo • 10.00 MZN  [42]");
    }

    #[test]
    fn test_no_sales_message_names_past_day() {
        let today = Local::now().date_naive();
        assert_eq!(no_sales_message(today), "Nenhuma venda registrada hoje");

        let day = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
        assert_eq!(no_sales_message(day), "Nenhuma venda registrada em 01/01/2025");
    }

    #[test]
    fn test_sale_details() {
        let draft = SaleDraft::new("Ana", 2, Money::from_cents(550), SaleKind::Cash).unwrap();
        let sale = Sale::from_draft("42", &draft, Utc::now());

        let text = sale_details(&sale, "MZN");

        assert!(text.starts_with("Venda 42\n"));
        assert!(text.contains("  Preço unitário: 5.50 MZN\n"));
        assert!(text.contains("  Total:          11.00 MZN\n"));
    }
}
