//! # WhatsApp Report
//!
//! Renders the end-of-day message the bakery sends over WhatsApp.
//!
//! ## Message Layout
//! ```text
//! 🍞 *RELATÓRIO DIÁRIO - PÃO MATOLINHA*
//! 📅 01/03/2025
//!
//! 📊 *RESUMO DO DIA:*
//! 🍞 Pães Vendidos: 2
//! 📝 Pães Emprestados: 3
//! 📦 Total de Pães: 5
//! 💰 Dinheiro de Vendas: 10.00 MZN
//! 💳 Dinheiro de Empréstimos: 15.00 MZN
//! 💎 Total Geral: 25.00 MZN
//!
//! 📋 *DETALHES DAS VENDAS:*
//! 📝 Bento - 3 pães - 15.00 MZN
//! 💰 Ana - 2 pães - 10.00 MZN
//!
//! _Relatório gerado automaticamente pelo Sistema Pão Matolinha_
//! ```
//!
//! `*bold*` and `_italic_` are WhatsApp markup. Turning the text into a
//! `wa.me` link is left to the caller.

use chrono::NaiveDate;
use std::fmt::{self, Write};

use crate::summary::daily_summary;
use crate::types::{Sale, SaleKind};
use crate::{DEFAULT_CURRENCY, DEFAULT_STORE_NAME};

/// Names printed in the report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportOptions {
    /// Shown upper-cased in the title and as-is in the footer.
    pub store_name: String,
    /// Currency code appended to every amount.
    pub currency: String,
}

impl Default for ReportOptions {
    fn default() -> Self {
        ReportOptions {
            store_name: DEFAULT_STORE_NAME.to_string(),
            currency: DEFAULT_CURRENCY.to_string(),
        }
    }
}

/// Icon at the start of a detail line.
fn kind_icon(kind: SaleKind) -> &'static str {
    match kind {
        SaleKind::Cash => "💰",
        SaleKind::LoanPaid => "✅",
        SaleKind::Loan => "📝",
    }
}

/// Renders the report for `day`.
///
/// `sales` are listed in the order given; pass them most recent first.
/// The summary block follows [`daily_summary`], so repaid loans are left
/// out of the totals but still get a detail line marked `(PAGO)`.
///
/// Returns `None` when `sales` is empty: there is nothing to report.
pub fn whatsapp_report(day: NaiveDate, sales: &[&Sale], options: &ReportOptions) -> Option<String> {
    if sales.is_empty() {
        return None;
    }
    render(day, sales, options).ok()
}

fn render(day: NaiveDate, sales: &[&Sale], options: &ReportOptions) -> Result<String, fmt::Error> {
    let summary = daily_summary(sales.iter().copied());
    let cur = &options.currency;
    let mut msg = String::new();

    writeln!(msg, "🍞 *RELATÓRIO DIÁRIO - {}*", options.store_name.to_uppercase())?;
    writeln!(msg, "📅 {}", day.format("%d/%m/%Y"))?;
    writeln!(msg)?;

    writeln!(msg, "📊 *RESUMO DO DIA:*")?;
    writeln!(msg, "🍞 Pães Vendidos: {}", summary.units_cash)?;
    writeln!(msg, "📝 Pães Emprestados: {}", summary.units_loan)?;
    writeln!(msg, "📦 Total de Pães: {}", summary.units_total)?;
    writeln!(msg, "💰 Dinheiro de Vendas: {} {}", summary.money_cash, cur)?;
    writeln!(msg, "💳 Dinheiro de Empréstimos: {} {}", summary.money_loan, cur)?;
    writeln!(msg, "💎 Total Geral: {} {}", summary.money_total, cur)?;
    writeln!(msg)?;

    writeln!(msg, "📋 *DETALHES DAS VENDAS:*")?;
    for sale in sales {
        let status = if sale.kind == SaleKind::LoanPaid { " (PAGO)" } else { "" };
        writeln!(
            msg,
            "{} {} - {} pães - {} {}{}",
            kind_icon(sale.kind),
            sale.client,
            sale.quantity,
            sale.total,
            cur,
            status
        )?;
    }

    write!(
        msg,
        "\n_Relatório gerado automaticamente pelo Sistema {}_",
        options.store_name
    )?;

    Ok(msg)
}

// =============================================================================
// Unit Tests
// =============================================================================
