//! Sale commands: add, edit, remove, pay, show and the day listing.

use chrono::NaiveDate;
use matolinha_core::{Money, Sale, SaleDraft, SaleKind};
use matolinha_store::Ledger;
use tracing::info;

use super::{no_sales_message, sale_details, sale_line, Output};
use crate::config::AppConfig;
use crate::error::AppError;

/// Registers a new sale.
pub async fn add(
    ledger: &mut Ledger,
    config: &AppConfig,
    client: &str,
    quantity: i64,
    unit_price: Money,
    kind: SaleKind,
) -> Result<Output, AppError> {
    let draft = SaleDraft::new(client, quantity, unit_price, kind)?;
    let sale = ledger.add(&draft).await?;

    info!(sale_id = %sale.id, "Sale registered");
    Ok(Output::success(format!(
        "Venda registrada com sucesso!\n{}",
        sale_line(&sale, &config.store.currency)
    )))
}

/// Replaces every editable field of a sale.
pub async fn edit(
    ledger: &mut Ledger,
    config: &AppConfig,
    id: &str,
    client: &str,
    quantity: i64,
    unit_price: Money,
    kind: SaleKind,
) -> Result<Output, AppError> {
    let draft = SaleDraft::new(client, quantity, unit_price, kind)?;
    let sale = ledger.update(id, &draft).await?;

    Ok(Output::success(format!(
        "Venda atualizada com sucesso!\n{}",
        sale_line(&sale, &config.store.currency)
    )))
}

/// Removes a sale once `confirm` agrees.
pub async fn remove<F>(ledger: &mut Ledger, id: &str, confirm: F) -> Result<Output, AppError>
where
    F: FnOnce(&Sale) -> std::io::Result<bool>,
{
    let target = ledger
        .get_by_id(id)
        .ok_or_else(|| AppError::from(matolinha_core::CoreError::SaleNotFound(id.to_string())))?;

    if !confirm(target)? {
        return Ok(Output::info("Remoção cancelada."));
    }

    let removed = ledger.remove(id).await?;
    info!(sale_id = %removed.id, "Sale removed");
    Ok(Output::success(format!(
        "Venda removida com sucesso! ({})",
        removed.client
    )))
}

/// Marks a loan as repaid.
pub async fn pay(ledger: &mut Ledger, config: &AppConfig, id: &str) -> Result<Output, AppError> {
    let sale = ledger.mark_repaid(id).await?;

    Ok(Output::success(format!(
        "Dívida marcada como paga!\n{}",
        sale_line(&sale, &config.store.currency)
    )))
}

pub fn show(ledger: &Ledger, config: &AppConfig, id: &str, json: bool) -> Result<Output, AppError> {
    let sale = ledger
        .get_by_id(id)
        .ok_or_else(|| AppError::from(matolinha_core::CoreError::SaleNotFound(id.to_string())))?;

    if json {
        return Output::json(sale);
    }
    Ok(Output::info(sale_details(sale, &config.store.currency)))
}

/// Sales of `day`, most recent first.
pub fn list_day(
    ledger: &Ledger,
    config: &AppConfig,
    day: NaiveDate,
    json: bool,
) -> Result<Output, AppError> {
    let sales = ledger.sales_on(day);

    if json {
        return Output::json(&sales);
    }
    if sales.is_empty() {
        return Ok(Output::info(no_sales_message(day)));
    }

    let mut text = format!("Vendas de {} ({})", day.format("%d/%m/%Y"), sales.len());
    for sale in &sales {
        text.push('\n');
        text.push_str(&sale_line(sale, &config.store.currency));
    }
    Ok(Output::info(text))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::Notice;
    use crate::error::ErrorCode;
    use chrono::Local;
    use matolinha_store::{Store, StoreConfig};

    async fn setup() -> (Store, Ledger, AppConfig) {
        let store = Store::open(StoreConfig::in_memory()).await.unwrap();
        let ledger = Ledger::open(store.kv()).await.unwrap();
        (store, ledger, AppConfig::default())
    }

    #[tokio::test]
    async fn test_add_reports_success() {
        let (_store, mut ledger, config) = setup().await;

        let out = add(&mut ledger, &config, "Ana", 2, Money::from_cents(500), SaleKind::Cash)
            .await
            .unwrap();

        assert_eq!(out.notice, Notice::Success);
        assert!(out.text.starts_with("Venda registrada com sucesso!\n"));
        assert!(out.text.contains("10.00 MZN"));
        assert_eq!(ledger.len(), 1);
    }

    #[tokio::test]
    async fn test_add_rejects_invalid_draft() {
        let (_store, mut ledger, config) = setup().await;

        let err = add(&mut ledger, &config, "Ana", 0, Money::from_cents(500), SaleKind::Cash)
            .await
            .unwrap_err();

        assert_eq!(err.code, ErrorCode::ValidationError);
        assert!(ledger.is_empty());
    }

    #[tokio::test]
    async fn test_edit_and_pay() {
        let (_store, mut ledger, config) = setup().await;
        add(&mut ledger, &config, "Ana", 2, Money::from_cents(500), SaleKind::Cash)
            .await
            .unwrap();
        let id = ledger.sales()[0].id.clone();

        let out = edit(&mut ledger, &config, &id, "Ana", 3, Money::from_cents(500), SaleKind::Loan)
            .await
            .unwrap();
        assert!(out.text.starts_with("Venda atualizada com sucesso!"));

        let out = pay(&mut ledger, &config, &id).await.unwrap();
        assert!(out.text.starts_with("Dívida marcada como paga!"));

        let err = pay(&mut ledger, &config, &id).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::BusinessLogic);
    }

    #[tokio::test]
    async fn test_remove_needs_confirmation() {
        let (_store, mut ledger, config) = setup().await;
        add(&mut ledger, &config, "Ana", 2, Money::from_cents(500), SaleKind::Cash)
            .await
            .unwrap();
        let id = ledger.sales()[0].id.clone();

        let out = remove(&mut ledger, &id, |sale| {
            assert_eq!(sale.client, "Ana");
            Ok(false)
        })
        .await
        .unwrap();
        assert_eq!(out.text, "Remoção cancelada.");
        assert_eq!(ledger.len(), 1);

        let out = remove(&mut ledger, &id, |_| Ok(true)).await.unwrap();
        assert_eq!(out.notice, Notice::Success);
        assert!(ledger.is_empty());
    }

    #[tokio::test]
    async fn test_remove_missing_does_not_prompt() {
        let (_store, mut ledger, _config) = setup().await;

        let err = remove(&mut ledger, "nope", |_| panic!("should not prompt"))
            .await
            .unwrap_err();

        assert_eq!(err.code, ErrorCode::NotFound);
    }

    #[tokio::test]
    async fn test_list_today() {
        let (_store, mut ledger, config) = setup().await;
        let today = Local::now().date_naive();

        let out = list_day(&ledger, &config, today, false).unwrap();
        assert_eq!(out.text, "Nenhuma venda registrada hoje");

        add(&mut ledger, &config, "Ana", 2, Money::from_cents(500), SaleKind::Cash)
            .await
            .unwrap();
        add(&mut ledger, &config, "Bento", 1, Money::from_cents(500), SaleKind::Loan)
            .await
            .unwrap();

        let out = list_day(&ledger, &config, today, false).unwrap();
        let lines: Vec<&str> = out.text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[1].starts_with("Bento"));
        assert!(lines[2].starts_with("Ana"));

        let out = list_day(&ledger, &config, today, true).unwrap();
        let value: serde_json::Value = serde_json::from_str(&out.text).unwrap();
        assert_eq!(value.as_array().map(Vec::len), Some(2));
        assert_eq!(value[0]["cliente"], "Bento");
    }

    #[tokio::test]
    async fn test_list_past_day() {
        let (_store, mut ledger, config) = setup().await;
        add(&mut ledger, &config, "Ana", 2, Money::from_cents(500), SaleKind::Cash)
            .await
            .unwrap();
        let day = NaiveDate::from_ymd_opt(2025, 3, 1).unwrap();

        let out = list_day(&ledger, &config, day, false).unwrap();

        assert_eq!(out.text, "Nenhuma venda registrada em 01/03/2025");
    }

    #[tokio::test]
    async fn test_show() {
        let (_store, mut ledger, config) = setup().await;
        add(&mut ledger, &config, "Ana", 2, Money::from_cents(500), SaleKind::Cash)
            .await
            .unwrap();
        let id = ledger.sales()[0].id.clone();

        let out = show(&ledger, &config, &id, false).unwrap();
        assert!(out.text.contains("Cliente:        Ana"));

        let err = show(&ledger, &config, "missing", false).unwrap_err();
        assert_eq!(err.code, ErrorCode::NotFound);
    }
}
