//! Day figures: summary, dashboard stats and the WhatsApp report.

use chrono::NaiveDate;
use matolinha_core::{daily_summary, dashboard_stats, whatsapp_report};
use matolinha_store::Ledger;

use super::{no_sales_message, Output};
use crate::config::AppConfig;
use crate::error::AppError;

/// Six-figure daily summary (repaid loans left out).
pub fn summary(
    ledger: &Ledger,
    config: &AppConfig,
    day: NaiveDate,
    json: bool,
) -> Result<Output, AppError> {
    let summary = daily_summary(ledger.sales_on(day));

    if json {
        return Output::json(&summary);
    }

    let cur = &config.store.currency;
    Ok(Output::info(format!(
        "Resumo de {day}\n\
         \x20 Pães vendidos:            {}\n\
         \x20 Pães emprestados:         {}\n\
         \x20 Total de pães:            {}\n\
         \x20 Dinheiro de vendas:       {} {cur}\n\
         \x20 Dinheiro de empréstimos:  {} {cur}\n\
         \x20 Total geral:              {} {cur}",
        summary.units_cash,
        summary.units_loan,
        summary.units_total,
        summary.money_cash,
        summary.money_loan,
        summary.money_total,
        day = day.format("%d/%m/%Y"),
    )))
}

/// Dashboard header figures, repaid loans included in the total.
pub fn stats(
    ledger: &Ledger,
    config: &AppConfig,
    day: NaiveDate,
    json: bool,
) -> Result<Output, AppError> {
    let stats = dashboard_stats(ledger.sales_on(day));

    if json {
        return Output::json(&stats);
    }

    let cur = &config.store.currency;
    Ok(Output::info(format!(
        "Painel de {day}\n\
         \x20 Total de vendas:       {} {cur}\n\
         \x20 Vendas à vista:        {} {cur}\n\
         \x20 Total em empréstimos:  {} {cur}\n\
         \x20 Vendas registadas:     {}",
        stats.total_takings,
        stats.cash_takings,
        stats.outstanding_loans,
        stats.sale_count,
        day = day.format("%d/%m/%Y"),
    )))
}

/// WhatsApp message for `day`, or a warning when there is nothing to send.
pub fn whatsapp(ledger: &Ledger, config: &AppConfig, day: NaiveDate) -> Result<Output, AppError> {
    let sales = ledger.sales_on(day);

    match whatsapp_report(day, &sales, &config.report_options()) {
        Some(text) => Ok(Output::info(text)),
        None => Ok(Output::warning(format!("{}!", no_sales_message(day)))),
    }
}
