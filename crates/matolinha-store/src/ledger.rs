//! # Sales Ledger
//!
//! The authoritative, ordered sequence of all sales, mirrored into a single
//! store entry.
//!
//! ## Mutation Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  add / update / remove / mark_repaid                                   │
//! │       │                                                                 │
//! │       ├── target missing?        → LedgerError::Core (nothing changed) │
//! │       ├── not a loan (repay)?    → LedgerError::Core (nothing changed) │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  1. Change the in-memory Vec<Sale>                                     │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  2. Rewrite the whole array under key "vendas"                         │
//! │       │                                                                 │
//! │       └── write failed?          → LedgerError::Persistence            │
//! │                                    (memory keeps the change)           │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The ledger has a single owner and every mutation takes `&mut self`, so
//! there is never more than one write in flight.

use chrono::{DateTime, Local, NaiveDate, Utc};
use std::collections::HashSet;
use matolinha_core::{CoreError, Sale, SaleDraft, SaleKind};
use tracing::{debug, warn};
use uuid::Uuid;

use crate::error::{LedgerResult, StoreError, StoreResult};
use crate::repository::kv::KeyValueRepository;

/// Store key holding the sales array.
pub const SALES_KEY: &str = "vendas";

/// In-memory sales backed by the key-value store.
#[derive(Debug)]
pub struct Ledger {
    kv: KeyValueRepository,
    sales: Vec<Sale>,
}

impl Ledger {
    /// Opens the ledger, loading whatever the store holds.
    ///
    /// A missing, empty or `null` entry yields an empty ledger. A sale that
    /// breaks the draft rules, or a repeated id, fails with
    /// [`StoreError::CorruptData`]. Stored totals are recomputed.
    pub async fn open(kv: KeyValueRepository) -> StoreResult<Self> {
        let sales = read_sales(&kv).await?;
        debug!(count = sales.len(), "Ledger loaded");
        Ok(Ledger { kv, sales })
    }

    /// Replaces the in-memory sequence with the stored one.
    pub async fn load(&mut self) -> StoreResult<()> {
        self.sales = read_sales(&self.kv).await?;
        debug!(count = self.sales.len(), "Ledger reloaded");
        Ok(())
    }

    /// Writes the full sequence to the store.
    pub async fn persist(&self) -> StoreResult<()> {
        let json = serde_json::to_string(&self.sales)
            .map_err(|e| StoreError::Internal(format!("encoding sales: {e}")))?;
        self.kv.set(SALES_KEY, &json).await
    }

    // =========================================================================
    // Mutations
    // =========================================================================

    /// Records a new sale created now.
    pub async fn add(&mut self, draft: &SaleDraft) -> LedgerResult<Sale> {
        self.add_at(draft, Utc::now()).await
    }

    async fn add_at(&mut self, draft: &SaleDraft, created_at: DateTime<Utc>) -> LedgerResult<Sale> {
        let sale = Sale::from_draft(Uuid::now_v7().to_string(), draft, created_at);

        debug!(
            sale_id = %sale.id,
            client = %sale.client,
            quantity = sale.quantity,
            kind = %sale.kind,
            total = %sale.total,
            "Adding sale"
        );

        self.sales.push(sale.clone());
        self.save().await?;
        Ok(sale)
    }

    /// Replaces client, quantity, unit price and kind of a sale.
    ///
    /// `id` and `created_at` are kept. Any kind may be set here, including
    /// turning a repaid loan back into an open one.
    pub async fn update(&mut self, id: &str, draft: &SaleDraft) -> LedgerResult<Sale> {
        let sale = self
            .sales
            .iter_mut()
            .find(|s| s.id == id)
            .ok_or_else(|| CoreError::SaleNotFound(id.to_string()))?;

        sale.apply_draft(draft);
        let updated = sale.clone();

        debug!(sale_id = %id, kind = %updated.kind, total = %updated.total, "Updated sale");

        self.save().await?;
        Ok(updated)
    }

    /// Deletes a sale and returns it.
    pub async fn remove(&mut self, id: &str) -> LedgerResult<Sale> {
        let index = self
            .sales
            .iter()
            .position(|s| s.id == id)
            .ok_or_else(|| CoreError::SaleNotFound(id.to_string()))?;

        let removed = self.sales.remove(index);
        debug!(sale_id = %id, client = %removed.client, "Removed sale");

        self.save().await?;
        Ok(removed)
    }

    /// Marks an open loan as repaid.
    ///
    /// ## Errors
    /// - `SaleNotFound` if no sale has this id
    /// - `InvalidKindTransition` unless the sale is currently a loan
    pub async fn mark_repaid(&mut self, id: &str) -> LedgerResult<Sale> {
        let sale = self
            .sales
            .iter_mut()
            .find(|s| s.id == id)
            .ok_or_else(|| CoreError::SaleNotFound(id.to_string()))?;

        if sale.kind != SaleKind::Loan {
            return Err(CoreError::InvalidKindTransition {
                sale_id: id.to_string(),
                current_kind: sale.kind,
            }
            .into());
        }

        sale.kind = SaleKind::LoanPaid;
        let repaid = sale.clone();
        debug!(sale_id = %id, "Loan marked as repaid");

        self.save().await?;
        Ok(repaid)
    }

    async fn save(&self) -> StoreResult<()> {
        self.persist().await.map_err(|e| {
            warn!(error = %e, "Failed to persist sales, in-memory ledger is ahead of the store");
            e
        })
    }

    // =========================================================================
    // Queries
    // =========================================================================

    pub fn get_by_id(&self, id: &str) -> Option<&Sale> {
        self.sales.iter().find(|s| s.id == id)
    }

    /// Every sale in insertion order.
    pub fn sales(&self) -> &[Sale] {
        &self.sales
    }

    pub fn len(&self) -> usize {
        self.sales.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sales.is_empty()
    }

    /// Sales created on `day` (local calendar date), most recent first.
    pub fn sales_on(&self, day: NaiveDate) -> Vec<&Sale> {
        self.sales
            .iter()
            .rev()
            .filter(|s| s.local_date() == day)
            .collect()
    }

    /// Sales created today in local time, most recent first.
    pub fn sales_for_today(&self) -> Vec<&Sale> {
        self.sales_on(Local::now().date_naive())
    }
}

async fn read_sales(kv: &KeyValueRepository) -> StoreResult<Vec<Sale>> {
    let Some(raw) = kv.get(SALES_KEY).await? else {
        return Ok(Vec::new());
    };
    if raw.trim().is_empty() {
        return Ok(Vec::new());
    }

    let sales: Option<Vec<Sale>> = serde_json::from_str(&raw)?;
    let mut sales = sales.unwrap_or_default();

    let mut seen = HashSet::with_capacity(sales.len());
    for sale in &mut sales {
        sale.check()
            .map_err(|e| StoreError::CorruptData(format!("sale {:?}: {e}", sale.id)))?;

        if !seen.insert(sale.id.clone()) {
            return Err(StoreError::CorruptData(format!(
                "duplicate sale id {:?}",
                sale.id
            )));
        }

        if let Some(stored) = sale.recompute_total() {
            warn!(
                sale_id = %sale.id,
                stored = %stored,
                total = %sale.total,
                "Stored total did not match, recomputed"
            );
        }
    }

    Ok(sales)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::LedgerError;
    use crate::pool::{Store, StoreConfig};
    use chrono::Duration;
    use matolinha_core::{daily_summary, Money};

    async fn open_ledger() -> (Store, Ledger) {
        let store = Store::open(StoreConfig::in_memory()).await.unwrap();
        let ledger = Ledger::open(store.kv()).await.unwrap();
        (store, ledger)
    }

    fn draft(client: &str, quantity: i64, cents: i64, kind: SaleKind) -> SaleDraft {
        SaleDraft::new(client, quantity, Money::from_cents(cents), kind).unwrap()
    }

    #[tokio::test]
    async fn test_empty_store_opens_empty() {
        let (_store, ledger) = open_ledger().await;
        assert!(ledger.is_empty());
        assert!(ledger.sales_for_today().is_empty());
    }

    #[tokio::test]
    async fn test_null_and_blank_entries_open_empty() {
        let store = Store::open(StoreConfig::in_memory()).await.unwrap();

        store.kv().set(SALES_KEY, "null").await.unwrap();
        assert!(Ledger::open(store.kv()).await.unwrap().is_empty());

        store.kv().set(SALES_KEY, "").await.unwrap();
        assert!(Ledger::open(store.kv()).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_corrupt_entry_fails_to_open() {
        let store = Store::open(StoreConfig::in_memory()).await.unwrap();
        store.kv().set(SALES_KEY, r#"[{"id":"1"}]"#).await.unwrap();

        let result = Ledger::open(store.kv()).await;
        assert!(matches!(result, Err(StoreError::CorruptData(_))));
    }

    #[tokio::test]
    async fn test_add_computes_total_and_persists() {
        let (store, mut ledger) = open_ledger().await;

        let sale = ledger.add(&draft("Ana", 3, 550, SaleKind::Cash)).await.unwrap();

        assert_eq!(sale.total, Money::from_cents(1650));
        assert_eq!(ledger.len(), 1);
        assert_eq!(ledger.get_by_id(&sale.id), Some(&sale));

        let reopened = Ledger::open(store.kv()).await.unwrap();
        assert_eq!(reopened.sales(), ledger.sales());
    }

    #[tokio::test]
    async fn test_add_assigns_unique_ids() {
        let (_store, mut ledger) = open_ledger().await;

        let a = ledger.add(&draft("Ana", 1, 500, SaleKind::Cash)).await.unwrap();
        let b = ledger.add(&draft("Ana", 1, 500, SaleKind::Cash)).await.unwrap();

        assert_ne!(a.id, b.id);
    }

    #[tokio::test]
    async fn test_update_keeps_id_and_created_at() {
        let (_store, mut ledger) = open_ledger().await;
        let original = ledger.add(&draft("Ana", 2, 500, SaleKind::Cash)).await.unwrap();

        let updated = ledger
            .update(&original.id, &draft("Ana Maria", 5, 600, SaleKind::Loan))
            .await
            .unwrap();

        assert_eq!(updated.id, original.id);
        assert_eq!(updated.created_at, original.created_at);
        assert_eq!(updated.client, "Ana Maria");
        assert_eq!(updated.kind, SaleKind::Loan);
        assert_eq!(updated.total, Money::from_cents(3000));
        assert_eq!(ledger.get_by_id(&original.id), Some(&updated));
    }

    #[tokio::test]
    async fn test_update_may_set_any_kind() {
        let (_store, mut ledger) = open_ledger().await;
        let sale = ledger.add(&draft("Ana", 2, 500, SaleKind::Cash)).await.unwrap();

        let updated = ledger
            .update(&sale.id, &draft("Ana", 2, 500, SaleKind::LoanPaid))
            .await
            .unwrap();

        assert_eq!(updated.kind, SaleKind::LoanPaid);
    }

    #[tokio::test]
    async fn test_update_missing_is_not_found() {
        let (_store, mut ledger) = open_ledger().await;

        let err = ledger
            .update("nope", &draft("Ana", 1, 500, SaleKind::Cash))
            .await
            .unwrap_err();

        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_remove() {
        let (store, mut ledger) = open_ledger().await;
        let keep = ledger.add(&draft("Ana", 1, 500, SaleKind::Cash)).await.unwrap();
        let gone = ledger.add(&draft("Bento", 2, 500, SaleKind::Loan)).await.unwrap();

        let removed = ledger.remove(&gone.id).await.unwrap();

        assert_eq!(removed, gone);
        assert_eq!(ledger.sales(), &[keep][..]);
        assert_eq!(Ledger::open(store.kv()).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_remove_missing_leaves_ledger_unchanged() {
        let (_store, mut ledger) = open_ledger().await;
        ledger.add(&draft("Ana", 1, 500, SaleKind::Cash)).await.unwrap();
        let before = ledger.sales().to_vec();

        let err = ledger.remove("missing").await.unwrap_err();

        assert!(err.is_not_found());
        assert_eq!(ledger.sales(), before.as_slice());
    }

    #[tokio::test]
    async fn test_mark_repaid_succeeds_once_per_loan() {
        let (_store, mut ledger) = open_ledger().await;
        let loan = ledger.add(&draft("Bento", 3, 500, SaleKind::Loan)).await.unwrap();

        let repaid = ledger.mark_repaid(&loan.id).await.unwrap();
        assert_eq!(repaid.kind, SaleKind::LoanPaid);

        let err = ledger.mark_repaid(&loan.id).await.unwrap_err();
        assert!(matches!(
            err,
            LedgerError::Core(CoreError::InvalidKindTransition {
                current_kind: SaleKind::LoanPaid,
                ..
            })
        ));
    }

    #[tokio::test]
    async fn test_mark_repaid_rejects_cash_and_missing() {
        let (_store, mut ledger) = open_ledger().await;
        let cash = ledger.add(&draft("Ana", 2, 500, SaleKind::Cash)).await.unwrap();

        let err = ledger.mark_repaid(&cash.id).await.unwrap_err();
        assert!(matches!(
            err,
            LedgerError::Core(CoreError::InvalidKindTransition { .. })
        ));
        assert_eq!(ledger.get_by_id(&cash.id).unwrap().kind, SaleKind::Cash);

        assert!(ledger.mark_repaid("missing").await.unwrap_err().is_not_found());
    }

    #[tokio::test]
    async fn test_repaid_loan_leaves_daily_summary() {
        let (_store, mut ledger) = open_ledger().await;
        ledger.add(&draft("Ana", 2, 500, SaleKind::Cash)).await.unwrap();
        let loan = ledger.add(&draft("Bento", 3, 500, SaleKind::Loan)).await.unwrap();

        ledger.mark_repaid(&loan.id).await.unwrap();
        let summary = daily_summary(ledger.sales());

        assert_eq!(summary.units_cash, 2);
        assert_eq!(summary.units_loan, 0);
        assert_eq!(summary.money_cash, Money::from_cents(1000));
        assert_eq!(summary.money_loan, Money::zero());
    }

    #[tokio::test]
    async fn test_sales_for_today_most_recent_first() {
        let (_store, mut ledger) = open_ledger().await;
        let a = ledger.add(&draft("A", 1, 500, SaleKind::Cash)).await.unwrap();
        let b = ledger.add(&draft("B", 1, 500, SaleKind::Loan)).await.unwrap();
        let c = ledger.add(&draft("C", 1, 500, SaleKind::Cash)).await.unwrap();

        let ids: Vec<&str> = ledger.sales_for_today().iter().map(|s| s.id.as_str()).collect();

        assert_eq!(ids, vec![c.id.as_str(), b.id.as_str(), a.id.as_str()]);
    }

    #[tokio::test]
    async fn test_sales_for_today_excludes_other_days() {
        let (_store, mut ledger) = open_ledger().await;
        let old = ledger
            .add_at(&draft("Ontem", 4, 500, SaleKind::Cash), Utc::now() - Duration::days(2))
            .await
            .unwrap();
        let today = ledger.add(&draft("Hoje", 1, 500, SaleKind::Cash)).await.unwrap();

        let todays: Vec<&Sale> = ledger.sales_for_today();
        assert_eq!(todays, vec![&today]);

        let that_day: Vec<&Sale> = ledger.sales_on(old.local_date());
        assert_eq!(that_day, vec![&old]);
    }

    #[tokio::test]
    async fn test_persist_load_round_trip() {
        let (store, mut ledger) = open_ledger().await;
        ledger.add(&draft("Ana", 2, 550, SaleKind::Cash)).await.unwrap();
        ledger.add(&draft("Bento", 7, 1025, SaleKind::Loan)).await.unwrap();
        let loan = ledger.add(&draft("Carla", 1, 5, SaleKind::Loan)).await.unwrap();
        ledger.mark_repaid(&loan.id).await.unwrap();

        let mut other = Ledger::open(store.kv()).await.unwrap();
        assert_eq!(other.sales(), ledger.sales());

        ledger.remove(&loan.id).await.unwrap();
        other.load().await.unwrap();
        assert_eq!(other.sales(), ledger.sales());
    }

    #[tokio::test]
    async fn test_loads_browser_written_sales() {
        let store = Store::open(StoreConfig::in_memory()).await.unwrap();
        let stored = r#"[
            {"cliente":"Dona Rosa","quantidade":3,"precoUnitario":5,"tipo":"emprestimo",
             "total":15,"id":"1718000000000","data":"2024-06-10T06:13:20.512Z"},
            {"cliente":"Zé","quantidade":3,"precoUnitario":0.1,"tipo":"vista",
             "total":0.30000000000000004,"id":"1718000000999","data":"2024-06-10T06:13:21.000Z"}
        ]"#;
        store.kv().set(SALES_KEY, stored).await.unwrap();

        let mut ledger = Ledger::open(store.kv()).await.unwrap();

        assert_eq!(ledger.len(), 2);
        let ze = ledger.get_by_id("1718000000999").unwrap();
        assert_eq!(ze.total, Money::from_cents(30));

        let repaid = ledger.mark_repaid("1718000000000").await.unwrap();
        assert_eq!(repaid.kind, SaleKind::LoanPaid);
    }

    #[tokio::test]
    async fn test_persistence_failure_is_reported() {
        let (store, mut ledger) = open_ledger().await;
        ledger.add(&draft("Ana", 1, 500, SaleKind::Cash)).await.unwrap();

        store.close().await;
        let err = ledger
            .add(&draft("Bento", 1, 500, SaleKind::Cash))
            .await
            .unwrap_err();

        assert!(err.is_persistence());
        // The change stays in memory.
        assert_eq!(ledger.len(), 2);
    }

    #[tokio::test]
    async fn test_failed_writes_keep_every_mutation_in_memory() {
        let (store, mut ledger) = open_ledger().await;
        let edited = ledger.add(&draft("Ana", 1, 500, SaleKind::Cash)).await.unwrap();
        let loan = ledger.add(&draft("Bento", 2, 500, SaleKind::Loan)).await.unwrap();
        let gone = ledger.add(&draft("Carla", 3, 500, SaleKind::Cash)).await.unwrap();
        store.close().await;

        let err = ledger
            .update(&edited.id, &draft("Ana Maria", 4, 500, SaleKind::Cash))
            .await
            .unwrap_err();
        assert!(err.is_persistence());
        assert_eq!(ledger.get_by_id(&edited.id).unwrap().quantity, 4);

        let err = ledger.mark_repaid(&loan.id).await.unwrap_err();
        assert!(err.is_persistence());
        assert_eq!(ledger.get_by_id(&loan.id).unwrap().kind, SaleKind::LoanPaid);

        let err = ledger.remove(&gone.id).await.unwrap_err();
        assert!(err.is_persistence());
        assert!(ledger.get_by_id(&gone.id).is_none());
        assert_eq!(ledger.len(), 2);
    }

    async fn open_with_entry(entry: &str) -> StoreResult<Ledger> {
        let store = Store::open(StoreConfig::in_memory()).await.unwrap();
        store.kv().set(SALES_KEY, entry).await.unwrap();
        Ledger::open(store.kv()).await
    }

    fn stored_sale(id: &str, client: &str, quantity: &str, price: &str, total: &str) -> String {
        format!(
            r#"{{"cliente":"{client}","quantidade":{quantity},"precoUnitario":{price},"tipo":"vista","total":{total},"id":"{id}","data":"2024-06-10T06:13:20.512Z"}}"#
        )
    }

    #[tokio::test]
    async fn test_blank_client_is_corrupt() {
        let entry = format!("[{}]", stored_sale("1", " ", "2", "5", "10"));
        assert!(matches!(
            open_with_entry(&entry).await,
            Err(StoreError::CorruptData(_))
        ));
    }

    #[tokio::test]
    async fn test_non_positive_quantity_is_corrupt() {
        for quantity in ["0", "-4"] {
            let entry = format!("[{}]", stored_sale("1", "Ana", quantity, "5", "10"));
            assert!(matches!(
                open_with_entry(&entry).await,
                Err(StoreError::CorruptData(_))
            ));
        }
    }

    #[tokio::test]
    async fn test_oversized_quantity_is_corrupt() {
        let entry = format!(
            "[{},{}]",
            stored_sale("1", "Ana", "5000000000000000000", "5", "10"),
            stored_sale("2", "Bento", "5000000000000000000", "5", "10")
        );
        assert!(matches!(
            open_with_entry(&entry).await,
            Err(StoreError::CorruptData(_))
        ));
    }

    #[tokio::test]
    async fn test_non_positive_price_is_corrupt() {
        let entry = format!("[{}]", stored_sale("1", "Ana", "2", "0", "0"));
        assert!(matches!(
            open_with_entry(&entry).await,
            Err(StoreError::CorruptData(_))
        ));
    }

    #[tokio::test]
    async fn test_duplicate_ids_are_corrupt() {
        let entry = format!(
            "[{},{}]",
            stored_sale("1", "Ana", "2", "5", "10"),
            stored_sale("1", "Bento", "1", "5", "5")
        );
        match open_with_entry(&entry).await {
            Err(StoreError::CorruptData(msg)) => assert!(msg.contains("duplicate")),
            other => panic!("expected corrupt data, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_mismatched_total_is_recomputed() {
        let entry = format!(
            "[{},{}]",
            stored_sale("1", "Ana", "2", "5", "999"),
            stored_sale("2", "Zé", "3", "0.1", "0.30000000000000004")
        );

        let ledger = open_with_entry(&entry).await.unwrap();

        assert_eq!(ledger.get_by_id("1").unwrap().total, Money::from_cents(1000));
        assert_eq!(ledger.get_by_id("2").unwrap().total, Money::from_cents(30));
    }
}
