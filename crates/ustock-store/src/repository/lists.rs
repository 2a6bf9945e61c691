//! # List Registry
//!
//! User lists kept in the key-value store.
//!
//! ## Layout
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  userLists ──► { "Cellier", "Fridge" }          (registry of names)    │
//! │                     │          │                                        │
//! │                     │          ▼                                        │
//! │                     │    Fridge ──► { Item(Milk), Item(Eggs) }         │
//! │                     ▼                                                   │
//! │               Cellier ──► { }                                          │
//! │                                                                         │
//! │  Every registered name has a key of its own. A key without a           │
//! │  registry entry is adopted (not wiped) by the next create_list.        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Write Order
//! ```text
//! create_list:  list key  → registry
//! delete_list:  registry  → list key
//! ```
//! A crash between the two writes leaves at worst an unregistered key, never
//! a registered name without a key.
//!
//! Writes are last-writer-wins per key. Two concurrent `add_item` calls on
//! the same list may lose one insert; callers on one device serialize them.

use std::collections::BTreeSet;

use chrono::NaiveDate;
use serde::Serialize;
use tracing::{debug, info, warn};

use ustock_core::validation::{validate_item, validate_list_name};
use ustock_core::{Item, USER_LISTS_KEY};

use crate::error::{StoreError, StoreResult};
use crate::kv::KeyValueStore;

/// An item close to (or past) its expiration date, with the list it lives in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExpiringItem {
    pub list: String,
    pub item: Item,
    /// Negative once expired.
    pub days_left: i64,
}

/// Repository for user lists.
#[derive(Debug, Clone)]
pub struct ListRegistry {
    kv: KeyValueStore,
}

impl ListRegistry {
    /// Creates a new ListRegistry.
    pub fn new(kv: KeyValueStore) -> Self {
        ListRegistry { kv }
    }

    // =========================================================================
    // Lists
    // =========================================================================

    /// Returns every registered list name, sorted.
    pub async fn list_names(&self) -> StoreResult<Vec<String>> {
        let names = self.kv.get_set_or_default(USER_LISTS_KEY).await?;
        Ok(names.into_iter().collect())
    }

    /// Returns whether `name` is a registered list.
    pub async fn exists(&self, name: &str) -> StoreResult<bool> {
        let names = self.kv.get_set_or_default(USER_LISTS_KEY).await?;
        Ok(names.contains(name.trim()))
    }

    /// Creates a list and returns its (trimmed) name.
    ///
    /// ## Errors
    /// - `Validation(Required | TooLong | Reserved)` for a bad name
    /// - `Validation(Duplicate)` if the list already exists
    ///
    /// ## Example
    /// ```rust,ignore
    /// let name = store.lists().create_list("  Fridge ").await?;
    /// assert_eq!(name, "Fridge");
    /// ```
    pub async fn create_list(&self, name: &str) -> StoreResult<String> {
        let name = validate_list_name(name)?;

        let mut names = self.kv.get_set_or_default(USER_LISTS_KEY).await?;
        if names.contains(&name) {
            return Err(StoreError::duplicate("list", name));
        }

        if self.kv.contains(&name).await? {
            debug!(list = %name, "Adopting existing list key");
        } else {
            self.kv.put_set(&name, &BTreeSet::new()).await?;
        }

        names.insert(name.clone());
        self.kv.put_set(USER_LISTS_KEY, &names).await?;

        info!(list = %name, "List created");
        Ok(name)
    }

    /// Deletes a list and every item in it.
    ///
    /// ## Errors
    /// - `NotFound` if neither a registry entry nor a key exists for `name`
    pub async fn delete_list(&self, name: &str) -> StoreResult<()> {
        let name = name.trim();
        if name == USER_LISTS_KEY {
            return Err(StoreError::not_found("List", name));
        }

        let mut names = self.kv.get_set_or_default(USER_LISTS_KEY).await?;
        let registered = names.remove(name);
        if registered {
            self.kv.put_set(USER_LISTS_KEY, &names).await?;
        }

        let had_key = self.kv.remove(name).await?;

        if !registered && !had_key {
            return Err(StoreError::not_found("List", name));
        }

        info!(list = %name, "List deleted");
        Ok(())
    }

    // =========================================================================
    // Items
    // =========================================================================

    /// Adds `item` to `list`. Returns false if an identical item was
    /// already there.
    ///
    /// The name and code are stored trimmed, so `" Milk "` and `"Milk"` are
    /// the same member.
    ///
    /// ## Errors
    /// - `Validation` if the item has no name or a malformed code
    /// - `NotFound` if the list is not registered
    pub async fn add_item(&self, list: &str, item: &Item) -> StoreResult<bool> {
        let item = &normalize(item);
        validate_item(item)?;
        let list = list.trim();

        if !self.exists(list).await? {
            return Err(StoreError::not_found("List", list));
        }

        let mut members = self.kv.get_set_or_default(list).await?;
        let inserted = members.insert(encode_item(item)?);
        self.kv.put_set(list, &members).await?;

        debug!(list = %list, item = %item.name, inserted, "Item added");
        Ok(inserted)
    }

    /// Removes `item` from `list`. Returns whether it was present.
    ///
    /// Members are matched by decoded value, not by stored text, so a record
    /// written with extra or explicit null fields is still found.
    /// Removing an absent item (or from an unknown list) is not an error.
    pub async fn remove_item(&self, list: &str, item: &Item) -> StoreResult<bool> {
        let list = list.trim();
        if list == USER_LISTS_KEY {
            return Ok(false);
        }

        let Some(mut members) = self.kv.get_set(list).await? else {
            return Ok(false);
        };

        let item = normalize(item);
        let before = members.len();
        members.retain(|raw| match serde_json::from_str::<Item>(raw) {
            Ok(stored) => normalize(&stored) != item,
            Err(_) => true,
        });
        let removed = members.len() < before;
        self.kv.put_set(list, &members).await?;

        debug!(list = %list, item = %item.name, removed, "Item removed");
        Ok(removed)
    }

    /// Returns the items of `list`. An unknown list has no items.
    ///
    /// Members that no longer decode are skipped with a warning.
    pub async fn list_items(&self, list: &str) -> StoreResult<Vec<Item>> {
        let list = list.trim();
        if list == USER_LISTS_KEY {
            return Ok(Vec::new());
        }
        let members = self.kv.get_set_or_default(list).await?;

        let items = members
            .iter()
            .filter_map(|raw| match serde_json::from_str::<Item>(raw) {
                Ok(item) => Some(item),
                Err(e) => {
                    warn!(list = %list, error = %e, "Skipping undecodable item");
                    None
                }
            })
            .collect();

        Ok(items)
    }

    /// Returns items from every list that expire within `within_days` of
    /// `today`, expired ones included, soonest first.
    pub async fn expiring_items(
        &self,
        today: NaiveDate,
        within_days: i64,
    ) -> StoreResult<Vec<ExpiringItem>> {
        let mut expiring = Vec::new();

        for list in self.list_names().await? {
            for item in self.list_items(&list).await? {
                let Some(days_left) = item.days_until_expiration(today) else {
                    continue;
                };
                if days_left <= within_days {
                    expiring.push(ExpiringItem {
                        list: list.clone(),
                        item,
                        days_left,
                    });
                }
            }
        }

        expiring.sort_by(|a, b| {
            a.days_left
                .cmp(&b.days_left)
                .then_with(|| a.list.cmp(&b.list))
                .then_with(|| a.item.cmp(&b.item))
        });

        Ok(expiring)
    }
}

/// Item as stored: name and code trimmed.
fn normalize(item: &Item) -> Item {
    let mut item = item.clone();
    item.name = item.name.trim().to_string();
    item.code = item.code.trim().to_string();
    item
}

/// Storage encoding of an item: its JSON record.
fn encode_item(item: &Item) -> StoreResult<String> {
    Ok(serde_json::to_string(item)?)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Store, StoreConfig};
    use ustock_core::{Quantity, ValidationError};

    async fn setup() -> Store {
        Store::new(StoreConfig::in_memory()).await.unwrap()
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[tokio::test]
    async fn test_create_list_registers_and_creates_key() {
        let store = setup().await;
        let lists = store.lists();

        assert_eq!(lists.create_list("  Fridge ").await.unwrap(), "Fridge");

        assert_eq!(lists.list_names().await.unwrap(), vec!["Fridge"]);
        assert_eq!(
            store.kv().get_set("Fridge").await.unwrap(),
            Some(BTreeSet::new())
        );
        assert!(lists.list_items("Fridge").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_create_list_rejects_bad_names() {
        let lists = setup().await.lists();
        lists.create_list("Fridge").await.unwrap();

        assert!(matches!(
            lists.create_list("Fridge").await,
            Err(StoreError::Validation(ValidationError::Duplicate { .. }))
        ));
        assert!(matches!(
            lists.create_list("   ").await,
            Err(StoreError::Validation(ValidationError::Required { .. }))
        ));
        assert!(matches!(
            lists.create_list(USER_LISTS_KEY).await,
            Err(StoreError::Validation(ValidationError::Reserved { .. }))
        ));

        assert_eq!(lists.list_names().await.unwrap(), vec!["Fridge"]);
    }

    #[tokio::test]
    async fn test_create_list_adopts_unregistered_key() {
        let store = setup().await;
        let lists = store.lists();
        let milk = encode_item(&Item::new("Milk", "111")).unwrap();
        store
            .kv()
            .put_set("Fridge", &BTreeSet::from([milk]))
            .await
            .unwrap();

        lists.create_list("Fridge").await.unwrap();

        assert_eq!(
            lists.list_items("Fridge").await.unwrap(),
            vec![Item::new("Milk", "111")]
        );
    }

    #[tokio::test]
    async fn test_list_names_sorted() {
        let lists = setup().await.lists();
        for name in ["Garage", "Cellier", "Fridge"] {
            lists.create_list(name).await.unwrap();
        }

        assert_eq!(
            lists.list_names().await.unwrap(),
            vec!["Cellier", "Fridge", "Garage"]
        );
    }

    #[tokio::test]
    async fn test_delete_list() {
        let store = setup().await;
        let lists = store.lists();
        lists.create_list("Fridge").await.unwrap();
        lists
            .add_item("Fridge", &Item::new("Milk", "111"))
            .await
            .unwrap();

        lists.delete_list("Fridge").await.unwrap();

        assert!(lists.list_names().await.unwrap().is_empty());
        assert!(!store.kv().contains("Fridge").await.unwrap());
        assert!(matches!(
            lists.delete_list("Fridge").await,
            Err(StoreError::NotFound { .. })
        ));
    }

    #[tokio::test]
    async fn test_delete_registry_key_is_refused() {
        let lists = setup().await.lists();
        lists.create_list("Fridge").await.unwrap();

        assert!(lists.delete_list(USER_LISTS_KEY).await.is_err());
        assert_eq!(lists.list_names().await.unwrap(), vec!["Fridge"]);
    }

    #[tokio::test]
    async fn test_add_item_is_set_insert() {
        let lists = setup().await.lists();
        lists.create_list("Fridge").await.unwrap();
        let milk = Item::new("Milk", "111").with_quantity(Quantity::new(2).unwrap());

        assert!(lists.add_item("Fridge", &milk).await.unwrap());
        assert!(!lists.add_item("Fridge", &milk).await.unwrap());

        assert_eq!(lists.list_items("Fridge").await.unwrap(), vec![milk]);
    }

    #[tokio::test]
    async fn test_add_item_to_unknown_list() {
        let store = setup().await;

        assert!(matches!(
            store
                .lists()
                .add_item("Nowhere", &Item::new("Milk", "111"))
                .await,
            Err(StoreError::NotFound { .. })
        ));
        assert!(!store.kv().contains("Nowhere").await.unwrap());
    }

    #[tokio::test]
    async fn test_add_item_rejects_invalid_item() {
        let lists = setup().await.lists();
        lists.create_list("Fridge").await.unwrap();

        assert!(matches!(
            lists.add_item("Fridge", &Item::new("", "111")).await,
            Err(StoreError::Validation(_))
        ));
    }

    #[tokio::test]
    async fn test_items_differing_by_expiration_are_distinct() {
        let lists = setup().await.lists();
        lists.create_list("Fridge").await.unwrap();
        let fresh = Item::new("Milk", "111").with_expiration(Some(date(2025, 3, 7)));
        let older = Item::new("Milk", "111").with_expiration(Some(date(2025, 3, 1)));

        assert!(lists.add_item("Fridge", &fresh).await.unwrap());
        assert!(lists.add_item("Fridge", &older).await.unwrap());

        assert_eq!(lists.list_items("Fridge").await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_remove_item_is_idempotent() {
        let lists = setup().await.lists();
        lists.create_list("Fridge").await.unwrap();
        let milk = Item::new("Milk", "111");
        let eggs = Item::new("Eggs", "222");
        lists.add_item("Fridge", &milk).await.unwrap();
        lists.add_item("Fridge", &eggs).await.unwrap();

        assert!(lists.remove_item("Fridge", &milk).await.unwrap());
        assert!(!lists.remove_item("Fridge", &milk).await.unwrap());
        assert!(!lists.remove_item("Nowhere", &milk).await.unwrap());

        assert_eq!(lists.list_items("Fridge").await.unwrap(), vec![eggs]);
    }

    #[tokio::test]
    async fn test_remove_matches_non_canonical_member() {
        let store = setup().await;
        let lists = store.lists();
        lists.create_list("Fridge").await.unwrap();

        let members = BTreeSet::from([
            r#"{"name":"Milk","code":"111","quantity":1,"brand":null}"#.to_string(),
            r#"{"name":"Eggs","code":"222","quantity":6,"origin":"farm"}"#.to_string(),
        ]);
        store.kv().put_set("Fridge", &members).await.unwrap();

        let items = lists.list_items("Fridge").await.unwrap();
        assert_eq!(items.len(), 2);

        for item in &items {
            assert!(lists.remove_item("Fridge", item).await.unwrap());
        }
        assert!(lists.list_items("Fridge").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_add_item_trims_name_and_code() {
        let lists = setup().await.lists();
        lists.create_list("Fridge").await.unwrap();

        assert!(lists
            .add_item("Fridge", &Item::new(" Milk ", " 111 "))
            .await
            .unwrap());
        assert!(!lists
            .add_item("Fridge", &Item::new("Milk", "111"))
            .await
            .unwrap());

        assert_eq!(
            lists.list_items("Fridge").await.unwrap(),
            vec![Item::new("Milk", "111")]
        );
        assert!(lists
            .remove_item("Fridge", &Item::new("Milk ", "111"))
            .await
            .unwrap());
    }

    #[tokio::test]
    async fn test_list_items_skips_undecodable_members() {
        let store = setup().await;
        let lists = store.lists();
        lists.create_list("Fridge").await.unwrap();
        lists
            .add_item("Fridge", &Item::new("Milk", "111"))
            .await
            .unwrap();

        let mut members = store.kv().get_set("Fridge").await.unwrap().unwrap();
        members.insert("Milk | Code: 111 | Quantité: 1".to_string());
        store.kv().put_set("Fridge", &members).await.unwrap();

        assert_eq!(
            lists.list_items("Fridge").await.unwrap(),
            vec![Item::new("Milk", "111")]
        );
    }

    #[tokio::test]
    async fn test_unknown_list_has_no_items() {
        let lists = setup().await.lists();

        assert!(lists.list_items("Nowhere").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_expiring_items_across_lists() {
        let lists = setup().await.lists();
        let today = date(2025, 3, 5);
        lists.create_list("Fridge").await.unwrap();
        lists.create_list("Cellier").await.unwrap();

        let yogurt = Item::new("Yogurt", "1").with_expiration(Some(date(2025, 3, 4)));
        let milk = Item::new("Milk", "2").with_expiration(Some(date(2025, 3, 7)));
        let rice = Item::new("Rice", "3").with_expiration(Some(date(2026, 1, 1)));
        let salt = Item::new("Salt", "4");

        lists.add_item("Fridge", &milk).await.unwrap();
        lists.add_item("Fridge", &yogurt).await.unwrap();
        lists.add_item("Cellier", &rice).await.unwrap();
        lists.add_item("Cellier", &salt).await.unwrap();

        let expiring = lists.expiring_items(today, 3).await.unwrap();

        assert_eq!(expiring.len(), 2);
        assert_eq!(expiring[0].item, yogurt);
        assert_eq!(expiring[0].days_left, -1);
        assert_eq!(expiring[1].item, milk);
        assert_eq!(expiring[1].list, "Fridge");
        assert_eq!(expiring[1].days_left, 2);
    }
}
