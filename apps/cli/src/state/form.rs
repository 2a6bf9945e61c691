//! # Add-Product Screen State
//!
//! Everything the add-product screen holds between opening and saving.
//!
//! ## Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  open(code, today) ──► qty 1, expiration on, dated today               │
//! │       │                                                                 │
//! │       ├── user edits: quantity ±, expiration toggle/date, list         │
//! │       ├── lookup result: apply_product()  (ignored once closed)        │
//! │       │                                                                 │
//! │       ├── build() ──► (list, Item)  or  "required fields" notice       │
//! │       └── close() ──► later lookup results are dropped                 │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::NaiveDate;
use ustock_core::validation::{validate_code, validate_product_name};
use ustock_core::{Item, Quantity, ValidationError};
use ustock_resolver::ProductRecord;

/// State of one add-product screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddProductForm {
    code: String,
    name: String,
    brand: Option<String>,
    quantity: Quantity,
    has_expiration: bool,
    expiration: Option<NaiveDate>,
    list: Option<String>,
    today: NaiveDate,
    active: bool,
}

impl AddProductForm {
    /// Opens the screen for `code` (empty for manual entry).
    pub fn open(code: impl Into<String>, today: NaiveDate) -> Self {
        AddProductForm {
            code: code.into().trim().to_string(),
            name: String::new(),
            brand: None,
            quantity: Quantity::ONE,
            has_expiration: true,
            expiration: Some(today),
            list: None,
            today,
            active: true,
        }
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn quantity(&self) -> Quantity {
        self.quantity
    }

    /// The expiration date, `None` while tracking is off.
    pub fn expiration(&self) -> Option<NaiveDate> {
        if self.has_expiration {
            self.expiration
        } else {
            None
        }
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    // =========================================================================
    // Edits
    // =========================================================================

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn select_list(&mut self, list: impl Into<String>) {
        self.list = Some(list.into());
    }

    pub fn set_quantity(&mut self, quantity: Quantity) {
        self.quantity = quantity;
    }

    pub fn increment_quantity(&mut self) {
        self.quantity.increment();
    }

    /// No-op at 1.
    pub fn decrement_quantity(&mut self) {
        self.quantity.decrement();
    }

    /// Turns expiration tracking on or off. Off clears the date; on again
    /// starts from today.
    pub fn set_expiration_enabled(&mut self, enabled: bool) {
        self.has_expiration = enabled;
        if !enabled {
            self.expiration = None;
        } else if self.expiration.is_none() {
            self.expiration = Some(self.today);
        }
    }

    /// Picks a date, turning tracking on.
    pub fn set_expiration(&mut self, date: NaiveDate) {
        self.has_expiration = true;
        self.expiration = Some(date);
    }

    /// Fills the name (and brand) from a lookup result.
    ///
    /// Returns false, changing nothing, once the screen is closed.
    pub fn apply_product(&mut self, product: &ProductRecord) -> bool {
        if !self.active {
            return false;
        }
        self.name = product.product_name.clone();
        self.brand = product.brand.clone();
        true
    }

    /// Closes the screen.
    pub fn close(&mut self) {
        self.active = false;
    }

    // =========================================================================
    // Save
    // =========================================================================

    /// Builds the item to save and the list to save it in.
    ///
    /// ## Errors
    /// - `Required` when the name or the list is missing
    /// - other validation errors for an oversized name or a malformed code
    pub fn build(&self) -> Result<(String, Item), ValidationError> {
        let name = validate_product_name(&self.name)?;

        let list = self
            .list
            .as_deref()
            .map(str::trim)
            .filter(|list| !list.is_empty())
            .ok_or_else(|| ValidationError::Required {
                field: "list".to_string(),
            })?;

        validate_code(&self.code)?;

        let item = Item::new(name, self.code.clone())
            .with_quantity(self.quantity)
            .with_expiration(self.expiration())
            .with_brand(self.brand.clone());

        Ok((list.to_string(), item))
    }
}
