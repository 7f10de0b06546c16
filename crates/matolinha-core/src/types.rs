//! # Domain Types
//!
//! Core domain types used throughout Matolinha.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │   SaleDraft     │──►│      Sale       │   │    SaleKind     │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  client         │   │  id             │   │  Cash  (vista)  │       │
//! │  │  quantity       │   │  client         │   │  Loan  (empr.)  │       │
//! │  │  unit_price     │   │  quantity       │   │  LoanPaid (pago)│       │
//! │  │  kind           │   │  unit_price     │   └─────────────────┘       │
//! │  │  (validated)    │   │  kind, total    │                             │
//! │  └─────────────────┘   │  created_at     │                             │
//! │                        └─────────────────┘                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Stored Layout
//! A `Sale` serializes with the field names the bakery's browser app used,
//! so existing data keeps loading:
//! ```json
//! {"id":"1718000000000","cliente":"Ana","quantidade":2,"precoUnitario":5,
//!  "tipo":"vista","total":10,"data":"2024-06-10T06:13:20.000Z"}
//! ```

use chrono::{DateTime, Local, NaiveDate, SubsecRound, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use ts_rs::TS;

use crate::error::ValidationError;
use crate::money::Money;
use crate::validation::{
    validate_client_name, validate_quantity, validate_sale_id, validate_unit_price,
    ValidationResult,
};

// =============================================================================
// Sale Kind
// =============================================================================

/// How a sale was settled.
///
/// ## Transitions
/// ```text
/// Cash ──────────────────────── (terminal)
/// Loan ──── mark repaid ────► LoanPaid (terminal)
/// ```
/// A generic edit may still overwrite the kind with any value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum SaleKind {
    /// Paid on the spot.
    #[serde(rename = "vista")]
    Cash,
    /// Taken on credit, still owed.
    #[serde(rename = "emprestimo")]
    Loan,
    /// A loan that has since been repaid.
    #[serde(rename = "pago")]
    LoanPaid,
}

impl SaleKind {
    /// Stored value (`vista`, `emprestimo`, `pago`).
    pub const fn as_str(&self) -> &'static str {
        match self {
            SaleKind::Cash => "vista",
            SaleKind::Loan => "emprestimo",
            SaleKind::LoanPaid => "pago",
        }
    }

    /// Label shown to the bakery staff.
    pub const fn label(&self) -> &'static str {
        match self {
            SaleKind::Cash => "À Vista",
            SaleKind::Loan => "Empréstimo",
            SaleKind::LoanPaid => "Dívida Paga",
        }
    }
}

impl Default for SaleKind {
    fn default() -> Self {
        SaleKind::Cash
    }
}

impl fmt::Display for SaleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SaleKind {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "vista" | "avista" | "cash" => Ok(SaleKind::Cash),
            "emprestimo" | "empréstimo" | "loan" => Ok(SaleKind::Loan),
            "pago" | "paid" | "loan_paid" => Ok(SaleKind::LoanPaid),
            _ => Err(ValidationError::NotAllowed {
                field: "kind".to_string(),
                allowed: vec![
                    SaleKind::Cash.as_str().to_string(),
                    SaleKind::Loan.as_str().to_string(),
                    SaleKind::LoanPaid.as_str().to_string(),
                ],
            }),
        }
    }
}

// =============================================================================
// Sale Draft
// =============================================================================

/// Caller-supplied fields of a sale, validated on construction.
///
/// The ledger only accepts drafts, so every sale it writes has a non-empty
/// client, a positive quantity and a positive unit price.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaleDraft {
    client: String,
    quantity: i64,
    unit_price: Money,
    kind: SaleKind,
}

impl SaleDraft {
    /// Validates and builds a draft. The client name is trimmed.
    ///
    /// ## Example
    /// ```rust
    /// use matolinha_core::{Money, SaleDraft, SaleKind};
    ///
    /// let draft = SaleDraft::new(" Ana ", 2, Money::from_cents(500), SaleKind::Cash).unwrap();
    /// assert_eq!(draft.client(), "Ana");
    /// assert_eq!(draft.total().cents(), 1000);
    ///
    /// assert!(SaleDraft::new("", 2, Money::from_cents(500), SaleKind::Cash).is_err());
    /// ```
    pub fn new(
        client: impl Into<String>,
        quantity: i64,
        unit_price: Money,
        kind: SaleKind,
    ) -> ValidationResult<Self> {
        let client = validate_client_name(&client.into())?;
        validate_quantity(quantity)?;
        validate_unit_price(unit_price)?;

        Ok(SaleDraft {
            client,
            quantity,
            unit_price,
            kind,
        })
    }

    pub fn client(&self) -> &str {
        &self.client
    }

    pub fn quantity(&self) -> i64 {
        self.quantity
    }

    pub fn unit_price(&self) -> Money {
        self.unit_price
    }

    pub fn kind(&self) -> SaleKind {
        self.kind
    }

    /// `quantity × unit_price`.
    pub fn total(&self) -> Money {
        self.unit_price.multiply_quantity(self.quantity)
    }
}

// =============================================================================
// Sale
// =============================================================================

/// One recorded bakery transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Sale {
    /// Unique, assigned at creation.
    pub id: String,

    /// Customer display name.
    #[serde(rename = "cliente")]
    pub client: String,

    /// Loaves sold.
    #[serde(rename = "quantidade")]
    pub quantity: i64,

    /// Price per loaf.
    #[serde(rename = "precoUnitario")]
    #[ts(type = "number")]
    pub unit_price: Money,

    #[serde(rename = "tipo")]
    pub kind: SaleKind,

    /// Always `quantity × unit_price` as of the last write.
    #[ts(type = "number")]
    pub total: Money,

    /// Set once at creation, millisecond precision.
    #[serde(rename = "data", with = "timestamp_millis")]
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
}

impl Sale {
    /// Builds a new sale from a draft.
    ///
    /// `created_at` is truncated to milliseconds, the precision of the
    /// stored timestamp.
    pub fn from_draft(id: impl Into<String>, draft: &SaleDraft, created_at: DateTime<Utc>) -> Self {
        Sale {
            id: id.into(),
            client: draft.client.clone(),
            quantity: draft.quantity,
            unit_price: draft.unit_price,
            kind: draft.kind,
            total: draft.total(),
            created_at: created_at.trunc_subsecs(3),
        }
    }

    /// Overwrites every field except `id` and `created_at`, then recomputes
    /// the total.
    pub fn apply_draft(&mut self, draft: &SaleDraft) {
        self.client = draft.client.clone();
        self.quantity = draft.quantity;
        self.unit_price = draft.unit_price;
        self.kind = draft.kind;
        self.total = draft.total();
    }

    /// Checks a sale read back from storage against the rules every draft
    /// passes: non-blank id, valid client, quantity and unit price.
    ///
    /// `total` is not checked here; see [`Sale::recompute_total`].
    pub fn check(&self) -> ValidationResult<()> {
        validate_sale_id(&self.id)?;
        validate_client_name(&self.client)?;
        validate_quantity(self.quantity)?;
        validate_unit_price(self.unit_price)?;
        Ok(())
    }

    /// Resets `total` to `quantity × unit_price`. Returns the previous total
    /// when it differed.
    pub fn recompute_total(&mut self) -> Option<Money> {
        let expected = self.unit_price.multiply_quantity(self.quantity);
        if self.total == expected {
            return None;
        }
        Some(std::mem::replace(&mut self.total, expected))
    }

    /// Calendar date of creation in the given time zone.
    pub fn date_in<Tz: TimeZone>(&self, tz: &Tz) -> NaiveDate {
        self.created_at.with_timezone(tz).date_naive()
    }

    /// Calendar date of creation in the local time zone.
    pub fn local_date(&self) -> NaiveDate {
        self.date_in(&Local)
    }

    /// True while the sale is an unpaid loan.
    #[inline]
    pub fn is_outstanding_loan(&self) -> bool {
        self.kind == SaleKind::Loan
    }
}

/// RFC 3339 timestamps with millisecond precision and a `Z` suffix, the
/// format `Date.prototype.toISOString` produces.
mod timestamp_millis {
    use chrono::{DateTime, SecondsFormat, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(ts: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&ts.to_rfc3339_opts(SecondsFormat::Millis, true))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<DateTime<Utc>, D::Error> {
        let raw = String::deserialize(deserializer)?;
        DateTime::parse_from_rfc3339(&raw)
            .map(|ts| ts.with_timezone(&Utc))
            .map_err(serde::de::Error::custom)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::FixedOffset;

    fn draft(client: &str, quantity: i64, cents: i64, kind: SaleKind) -> SaleDraft {
        SaleDraft::new(client, quantity, Money::from_cents(cents), kind).unwrap()
    }

    #[test]
    fn test_sale_kind_default() {
        assert_eq!(SaleKind::default(), SaleKind::Cash);
    }

    #[test]
    fn test_sale_kind_parsing() {
        assert_eq!("vista".parse::<SaleKind>().unwrap(), SaleKind::Cash);
        assert_eq!("Empréstimo".parse::<SaleKind>().unwrap(), SaleKind::Loan);
        assert_eq!("loan_paid".parse::<SaleKind>().unwrap(), SaleKind::LoanPaid);
        assert!(matches!(
            "fiado".parse::<SaleKind>(),
            Err(ValidationError::NotAllowed { .. })
        ));
    }

    #[test]
    fn test_sale_kind_labels() {
        assert_eq!(SaleKind::Cash.label(), "À Vista");
        assert_eq!(SaleKind::Loan.label(), "Empréstimo");
        assert_eq!(SaleKind::LoanPaid.label(), "Dívida Paga");
        assert_eq!(SaleKind::Loan.to_string(), "emprestimo");
    }

    #[test]
    fn test_from_draft_computes_total() {
        let created = Utc.with_ymd_and_hms(2025, 3, 1, 7, 30, 0).unwrap();
        let sale = Sale::from_draft("1", &draft("Ana", 3, 550, SaleKind::Loan), created);

        assert_eq!(sale.total, Money::from_cents(1650));
        assert_eq!(sale.client, "Ana");
        assert!(sale.is_outstanding_loan());
    }

    #[test]
    fn test_from_draft_truncates_to_millis() {
        let created = Utc.timestamp_opt(1_700_000_000, 123_456_789).unwrap();
        let sale = Sale::from_draft("1", &draft("Ana", 1, 500, SaleKind::Cash), created);
        assert_eq!(sale.created_at.timestamp_subsec_nanos(), 123_000_000);
    }

    #[test]
    fn test_apply_draft_keeps_identity() {
        let created = Utc.with_ymd_and_hms(2025, 3, 1, 7, 30, 0).unwrap();
        let mut sale = Sale::from_draft("abc", &draft("Ana", 2, 500, SaleKind::Cash), created);

        sale.apply_draft(&draft("Bento", 4, 600, SaleKind::Loan));

        assert_eq!(sale.id, "abc");
        assert_eq!(sale.created_at, created);
        assert_eq!(sale.client, "Bento");
        assert_eq!(sale.kind, SaleKind::Loan);
        assert_eq!(sale.total, Money::from_cents(2400));
    }

    #[test]
    fn test_date_follows_time_zone() {
        // 23:30 UTC is already the next day two hours east.
        let created = Utc.with_ymd_and_hms(2025, 3, 1, 23, 30, 0).unwrap();
        let sale = Sale::from_draft("1", &draft("Ana", 1, 500, SaleKind::Cash), created);

        let maputo = FixedOffset::east_opt(2 * 3600).unwrap();
        assert_eq!(sale.date_in(&Utc), NaiveDate::from_ymd_opt(2025, 3, 1).unwrap());
        assert_eq!(sale.date_in(&maputo), NaiveDate::from_ymd_opt(2025, 3, 2).unwrap());
    }

    #[test]
    fn test_stored_layout() {
        let created = Utc.with_ymd_and_hms(2024, 6, 10, 6, 13, 20).unwrap();
        let sale = Sale::from_draft("1718000000000", &draft("Ana", 2, 500, SaleKind::Cash), created);

        let value = serde_json::to_value(&sale).unwrap();
        assert_eq!(value["id"], "1718000000000");
        assert_eq!(value["cliente"], "Ana");
        assert_eq!(value["quantidade"], 2);
        assert_eq!(value["precoUnitario"], 5.0);
        assert_eq!(value["tipo"], "vista");
        assert_eq!(value["total"], 10.0);
        assert_eq!(value["data"], "2024-06-10T06:13:20.000Z");
    }

    #[test]
    fn test_check_rejects_broken_sales() {
        let created = Utc.with_ymd_and_hms(2025, 3, 1, 7, 30, 0).unwrap();
        let good = Sale::from_draft("1", &draft("Ana", 2, 500, SaleKind::Cash), created);
        assert!(good.check().is_ok());

        let mut sale = good.clone();
        sale.client = "  ".to_string();
        assert!(matches!(sale.check(), Err(ValidationError::Required { .. })));

        let mut sale = good.clone();
        sale.quantity = -4;
        assert!(matches!(sale.check(), Err(ValidationError::MustBePositive { .. })));

        let mut sale = good.clone();
        sale.quantity = 5_000_000_000_000_000_000;
        assert!(matches!(sale.check(), Err(ValidationError::OutOfRange { .. })));

        let mut sale = good.clone();
        sale.unit_price = Money::zero();
        assert!(sale.check().is_err());

        let mut sale = good;
        sale.id = String::new();
        assert!(sale.check().is_err());
    }

    #[test]
    fn test_recompute_total() {
        let created = Utc.with_ymd_and_hms(2025, 3, 1, 7, 30, 0).unwrap();
        let mut sale = Sale::from_draft("1", &draft("Ana", 2, 500, SaleKind::Cash), created);
        assert_eq!(sale.recompute_total(), None);

        sale.total = Money::from_cents(99_900);
        assert_eq!(sale.recompute_total(), Some(Money::from_cents(99_900)));
        assert_eq!(sale.total, Money::from_cents(1000));
    }

    #[test]
    fn test_reads_browser_written_sale() {
        let json = r#"{
            "cliente": "Dona Rosa",
            "quantidade": 3,
            "precoUnitario": 5,
            "tipo": "emprestimo",
            "total": 15,
            "id": "1718000000000",
            "data": "2024-06-10T06:13:20.512Z"
        }"#;

        let sale: Sale = serde_json::from_str(json).unwrap();
        assert_eq!(sale.client, "Dona Rosa");
        assert_eq!(sale.kind, SaleKind::Loan);
        assert_eq!(sale.total, Money::from_cents(1500));
        assert_eq!(sale.created_at.timestamp_subsec_millis(), 512);
    }
}
