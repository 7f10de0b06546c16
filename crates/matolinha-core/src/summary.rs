//! # Daily Summary
//!
//! Aggregates a set of sales into the figures shown for a day.
//!
//! ## What Counts Where
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    daily_summary vs dashboard_stats                     │
//! │                                                                         │
//! │   kind         daily_summary            dashboard_stats                 │
//! │   ──────────   ──────────────────────   ──────────────────────────      │
//! │   vista        units_cash, money_cash   total_takings, cash_takings     │
//! │   emprestimo   units_loan, money_loan   total_takings, outstanding      │
//! │   pago         (excluded)               total_takings                   │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! A repaid loan no longer belongs to the day's cash or loan columns, but the
//! money did come in, so the dashboard's total takings still include it.

use serde::Serialize;
use ts_rs::TS;

use crate::money::Money;
use crate::types::{Sale, SaleKind};

// =============================================================================
// Daily Summary
// =============================================================================

/// Units and money by kind for one day.
///
/// Invariants: `units_total = units_cash + units_loan` and
/// `money_total = money_cash + money_loan`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
pub struct DailySummary {
    /// Loaves sold for cash.
    pub units_cash: i64,
    /// Loaves given on credit and not yet repaid.
    pub units_loan: i64,
    pub units_total: i64,
    #[ts(type = "number")]
    pub money_cash: Money,
    #[ts(type = "number")]
    pub money_loan: Money,
    #[ts(type = "number")]
    pub money_total: Money,
}

/// Aggregates `sales` into a [`DailySummary`].
///
/// Repaid loans are skipped entirely. The caller picks the day by choosing
/// which sales to pass.
///
/// ## Example
/// ```rust
/// use chrono::Utc;
/// use matolinha_core::{daily_summary, Money, Sale, SaleDraft, SaleKind};
///
/// let cash = SaleDraft::new("Ana", 2, Money::from_cents(500), SaleKind::Cash).unwrap();
/// let loan = SaleDraft::new("Bento", 3, Money::from_cents(500), SaleKind::Loan).unwrap();
/// let sales = vec![
///     Sale::from_draft("1", &cash, Utc::now()),
///     Sale::from_draft("2", &loan, Utc::now()),
/// ];
///
/// let summary = daily_summary(&sales);
/// assert_eq!(summary.units_total, 5);
/// assert_eq!(summary.money_loan.cents(), 1500);
/// ```
pub fn daily_summary<'a, I>(sales: I) -> DailySummary
where
    I: IntoIterator<Item = &'a Sale>,
{
    let mut summary = DailySummary::default();

    for sale in sales {
        match sale.kind {
            SaleKind::Cash => {
                summary.units_cash += sale.quantity;
                summary.money_cash += sale.total;
            }
            SaleKind::Loan => {
                summary.units_loan += sale.quantity;
                summary.money_loan += sale.total;
            }
            SaleKind::LoanPaid => {}
        }
    }

    summary.units_total = summary.units_cash + summary.units_loan;
    summary.money_total = summary.money_cash + summary.money_loan;
    summary
}

// =============================================================================
// Dashboard Stats
// =============================================================================

/// Header figures of the sales dashboard.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
pub struct DashboardStats {
    /// Sum of every sale's total, repaid loans included.
    #[ts(type = "number")]
    pub total_takings: Money,
    #[ts(type = "number")]
    pub cash_takings: Money,
    /// Loans not yet repaid.
    #[ts(type = "number")]
    pub outstanding_loans: Money,
    pub sale_count: usize,
}

pub fn dashboard_stats<'a, I>(sales: I) -> DashboardStats
where
    I: IntoIterator<Item = &'a Sale>,
{
    let mut stats = DashboardStats::default();

    for sale in sales {
        stats.total_takings += sale.total;
        stats.sale_count += 1;
        match sale.kind {
            SaleKind::Cash => stats.cash_takings += sale.total,
            SaleKind::Loan => stats.outstanding_loans += sale.total,
            SaleKind::LoanPaid => {}
        }
    }

    stats
}

// =============================================================================
// Unit Tests
// =============================================================================
