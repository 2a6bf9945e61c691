//! # Item Commands
//!
//! Items of one list, manual entry and removal.
//!
//! Items are numbered from 1 in the order `ustock items` prints them;
//! `ustock remove` takes that number.

use chrono::NaiveDate;
use serde::Serialize;
use tracing::debug;
use ustock_core::format::format_date;
use ustock_core::{ExpirationStatus, Item, Quantity};

use super::{Notice, Render};
use crate::cli::ItemDetails;
use crate::error::{ApiError, ApiResult};
use crate::state::{AddProductForm, AppState};

/// One row of `ustock items`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemView {
    pub index: usize,
    pub display: String,
    pub name: String,
    pub code: String,
    pub quantity: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub brand: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expiration: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<ExpirationStatus>,
}

impl ItemView {
    fn new(index: usize, item: &Item, today: NaiveDate, soon_days: i64) -> Self {
        ItemView {
            index,
            display: item.display(),
            name: item.name.clone(),
            code: item.code.clone(),
            quantity: item.quantity.get(),
            brand: item.brand.clone(),
            expiration: item.expiration.map(format_date),
            status: item.expiration_status(today, soon_days),
        }
    }
}

impl Render for ItemView {
    fn render(&self) -> String {
        let mut line = format!("{:>3}. {}", self.index, self.display);
        if let Some(brand) = &self.brand {
            line.push_str(&format!(" ({})", brand));
        }
        if let Some(status) = self.status.filter(ExpirationStatus::needs_attention) {
            line.push_str(&format!("  [{}]", status));
        }
        line
    }
}

/// The items of `list`, numbered from 1.
///
/// ## Errors
/// - `NotFound` if the list does not exist
pub async fn list_items(state: &AppState, list: &str) -> ApiResult<Vec<ItemView>> {
    let items = load_items(state, list).await?;
    let soon_days = state.config.display.expiring_days;

    Ok(items
        .iter()
        .enumerate()
        .map(|(i, item)| ItemView::new(i + 1, item, state.today, soon_days))
        .collect())
}

/// Adds a product typed in by hand.
pub async fn add_item(
    state: &AppState,
    list: &str,
    name: &str,
    code: &str,
    details: &ItemDetails,
) -> ApiResult<Notice> {
    let mut form = AddProductForm::open(code, state.today);
    form.set_name(name);
    form.select_list(list);
    apply_details(&mut form, details)?;

    save_form(state, &form).await
}

/// Removes item number `index` (as printed by `ustock items`).
///
/// ## Errors
/// - `NotFound` if the list does not exist or has no such item
pub async fn remove_item(state: &AppState, list: &str, index: usize) -> ApiResult<Notice> {
    let list = list.trim();
    let items = load_items(state, list).await?;

    let item = index
        .checked_sub(1)
        .and_then(|i| items.get(i))
        .ok_or_else(|| ApiError::not_found("Item", &index.to_string()))?;

    if !state.store.lists().remove_item(list, item).await? {
        return Err(ApiError::not_found("Item", &index.to_string()));
    }
    Ok(Notice::new(format!("{} retiré de {}", item.name, list)))
}

// =============================================================================
// Shared with scan
// =============================================================================

/// Copies `--qty`, `--expires` and `--no-expiration` onto the form.
pub(crate) fn apply_details(form: &mut AddProductForm, details: &ItemDetails) -> ApiResult<()> {
    form.set_quantity(Quantity::new(details.qty)?);

    if details.no_expiration {
        form.set_expiration_enabled(false);
    } else if let Some(date) = details.expires {
        form.set_expiration(date);
    }

    Ok(())
}

/// Validates the form and writes its item.
pub(crate) async fn save_form(state: &AppState, form: &AddProductForm) -> ApiResult<Notice> {
    let (list, item) = form.build()?;

    let inserted = state.store.lists().add_item(&list, &item).await?;
    if !inserted {
        debug!(list = %list, item = %item.display(), "Identical item already present");
    }

    Ok(Notice::new(format!("Produit ajouté à {}", list)))
}

async fn load_items(state: &AppState, list: &str) -> ApiResult<Vec<Item>> {
    let list = list.trim();
    let lists = state.store.lists();

    if !lists.exists(list).await? {
        return Err(ApiError::not_found("List", list));
    }

    Ok(lists.list_items(list).await?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::testing::{state, today};
    use crate::error::{ErrorCode, REQUIRED_FIELDS_NOTICE};

    fn details(qty: u32) -> ItemDetails {
        ItemDetails {
            qty,
            ..ItemDetails::default()
        }
    }

    async fn with_fridge() -> AppState {
        let state = state().await;
        state.store.lists().create_list("Fridge").await.unwrap();
        state
    }

    #[tokio::test]
    async fn test_add_then_list() {
        let state = with_fridge().await;

        let notice = add_item(&state, "Fridge", "Milk", "111", &details(2))
            .await
            .unwrap();
        assert_eq!(notice.message, "Produit ajouté à Fridge");

        let items = list_items(&state, "Fridge").await.unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].index, 1);
        assert_eq!(
            items[0].display,
            "Milk | Code: 111 | Quantité: 2 | Expiration: 05/03/2025"
        );
        assert_eq!(items[0].status, Some(ExpirationStatus::ExpiresToday));
    }

    #[tokio::test]
    async fn test_add_without_expiration() {
        let state = with_fridge().await;
        let details = ItemDetails {
            no_expiration: true,
            ..ItemDetails::default()
        };

        add_item(&state, "Fridge", "Rice", "", &details)
            .await
            .unwrap();

        let items = list_items(&state, "Fridge").await.unwrap();
        assert_eq!(items[0].display, "Rice | Code:  | Quantité: 1");
        assert_eq!(items[0].status, None);
        assert_eq!(items[0].render(), "  1. Rice | Code:  | Quantité: 1");
    }

    #[tokio::test]
    async fn test_add_requires_name() {
        let state = with_fridge().await;

        let err = add_item(&state, "Fridge", "  ", "111", &details(1))
            .await
            .unwrap_err();

        assert_eq!(err.message, REQUIRED_FIELDS_NOTICE);
    }

    #[tokio::test]
    async fn test_add_zero_quantity_rejected() {
        let state = with_fridge().await;

        let err = add_item(&state, "Fridge", "Milk", "111", &details(0))
            .await
            .unwrap_err();

        assert_eq!(err.code, ErrorCode::ValidationError);
    }

    #[tokio::test]
    async fn test_add_to_unknown_list() {
        let state = state().await;

        let err = add_item(&state, "Nope", "Milk", "111", &details(1))
            .await
            .unwrap_err();

        assert_eq!(err.code, ErrorCode::NotFound);
    }

    #[tokio::test]
    async fn test_remove_by_index() {
        let state = with_fridge().await;
        add_item(&state, "Fridge", "Milk", "111", &details(1))
            .await
            .unwrap();
        add_item(&state, "Fridge", "Eggs", "222", &details(6))
            .await
            .unwrap();

        let before = list_items(&state, "Fridge").await.unwrap();
        let removed = before[0].name.clone();

        let notice = remove_item(&state, "Fridge", 1).await.unwrap();
        assert_eq!(notice.message, format!("{} retiré de Fridge", removed));

        let after = list_items(&state, "Fridge").await.unwrap();
        assert_eq!(after.len(), 1);
        assert_ne!(after[0].name, removed);
        assert_eq!(after[0].index, 1);
    }

    #[tokio::test]
    async fn test_remove_non_canonical_member() {
        let state = with_fridge().await;
        let members = std::collections::BTreeSet::from([
            r#"{"name":"Milk","code":"111","quantity":1,"brand":null}"#.to_string(),
        ]);
        state
            .store
            .inner()
            .kv()
            .put_set("Fridge", &members)
            .await
            .unwrap();

        let notice = remove_item(&state, "Fridge", 1).await.unwrap();

        assert_eq!(notice.message, "Milk retiré de Fridge");
        assert!(list_items(&state, "Fridge").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_brand_tells_identical_rows_apart() {
        let state = with_fridge().await;
        let bread = Item::new("Bread", "333").with_expiration(Some(today()));
        let lists = state.store.lists();
        lists
            .add_item("Fridge", &bread.clone().with_brand(Some("Acme".into())))
            .await
            .unwrap();
        lists.add_item("Fridge", &bread).await.unwrap();

        let items = list_items(&state, "Fridge").await.unwrap();

        assert_eq!(items.len(), 2);
        assert_eq!(items[0].display, items[1].display);
        assert_ne!(items[0].render(), items[1].render());
        assert!(items
            .iter()
            .any(|row| row.brand.as_deref() == Some("Acme") && row.render().contains("(Acme)")));
    }

    #[tokio::test]
    async fn test_remove_bad_index() {
        let state = with_fridge().await;
        add_item(&state, "Fridge", "Milk", "111", &details(1))
            .await
            .unwrap();

        for index in [0, 2] {
            let err = remove_item(&state, "Fridge", index).await.unwrap_err();
            assert_eq!(err.code, ErrorCode::NotFound);
        }
    }

    #[tokio::test]
    async fn test_expired_item_is_flagged() {
        let state = with_fridge().await;
        let details = ItemDetails {
            expires: today().pred_opt(),
            ..ItemDetails::default()
        };
        add_item(&state, "Fridge", "Yogurt", "333", &details)
            .await
            .unwrap();

        let items = list_items(&state, "Fridge").await.unwrap();
        assert_eq!(
            items[0].status,
            Some(ExpirationStatus::Expired { days_ago: 1 })
        );
        assert!(items[0].render().ends_with(']'));
    }
}
