//! # Domain Types
//!
//! ## Type Overview
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────────┐   ┌─────────────────┐   ┌──────────────────┐  │
//! │  │        Item         │   │    Quantity     │   │ ExpirationStatus │  │
//! │  │  ─────────────────  │   │  ─────────────  │   │  ──────────────  │  │
//! │  │  name               │   │  u32, floor 1   │   │  Expired         │  │
//! │  │  code (barcode)     │   │  +1 saturating  │   │  ExpiresToday    │  │
//! │  │  quantity           │   │  -1 ignored at 1│   │  ExpiresSoon     │  │
//! │  │  expiration?        │   └─────────────────┘   │  Fresh           │  │
//! │  │  brand?             │                         └──────────────────┘  │
//! │  └─────────────────────┘                                               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Identity
//! An item has no id: two items are the same entry when every field is
//! equal. Lists are sets, so adding an equal item again changes nothing.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::ValidationError;
use crate::format;

// =============================================================================
// Quantity
// =============================================================================

/// How many units of a product an entry stands for.
///
/// Never below 1. [`Quantity::decrement`] at 1 is ignored rather than
/// clamped or reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct Quantity(u32);

impl Quantity {
    /// The smallest (and default) quantity.
    pub const ONE: Quantity = Quantity(1);

    /// Creates a quantity, rejecting zero.
    pub fn new(value: u32) -> Result<Self, ValidationError> {
        if value == 0 {
            return Err(ValidationError::MustBePositive {
                field: "quantity".to_string(),
            });
        }
        Ok(Quantity(value))
    }

    /// Returns the raw count.
    #[inline]
    pub const fn get(&self) -> u32 {
        self.0
    }

    /// Adds one unit.
    pub fn increment(&mut self) {
        self.0 = self.0.saturating_add(1);
    }

    /// Removes one unit unless already at 1.
    ///
    /// Returns `true` when the quantity changed.
    pub fn decrement(&mut self) -> bool {
        if self.0 > 1 {
            self.0 -= 1;
            true
        } else {
            false
        }
    }
}

impl Default for Quantity {
    fn default() -> Self {
        Quantity::ONE
    }
}

impl TryFrom<u32> for Quantity {
    type Error = ValidationError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        Quantity::new(value)
    }
}

impl From<Quantity> for u32 {
    fn from(q: Quantity) -> Self {
        q.0
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// =============================================================================
// Item
// =============================================================================

/// One product occurrence in a list.
///
/// Stored as a structured record; the flattened display string only exists
/// at the presentation edge (see [`Item::display`]).
/// The brand is part of identity but not of [`Item::display`], so
/// listings print it next to the row.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Item {
    /// Product name as shown to the user.
    pub name: String,

    /// Scanned or typed barcode. Empty for manual entries.
    #[serde(default)]
    pub code: String,

    /// Number of units.
    #[serde(default)]
    pub quantity: Quantity,

    /// Expiration date, when the user tracks one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expiration: Option<NaiveDate>,

    /// Brand reported by the lookup service, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brand: Option<String>,
}

impl Item {
    /// Creates an item with quantity 1 and no expiration.
    pub fn new(name: impl Into<String>, code: impl Into<String>) -> Self {
        Item {
            name: name.into(),
            code: code.into(),
            quantity: Quantity::ONE,
            expiration: None,
            brand: None,
        }
    }

    /// Sets the quantity.
    pub fn with_quantity(mut self, quantity: Quantity) -> Self {
        self.quantity = quantity;
        self
    }

    /// Sets (or clears) the expiration date.
    pub fn with_expiration(mut self, expiration: Option<NaiveDate>) -> Self {
        self.expiration = expiration;
        self
    }

    /// Sets (or clears) the brand.
    pub fn with_brand(mut self, brand: Option<String>) -> Self {
        self.brand = brand;
        self
    }

    /// The flattened display string:
    /// `"<name> | Code: <code> | Quantité: <qty>[ | Expiration: dd/mm/yyyy]"`.
    pub fn display(&self) -> String {
        format::format_item(&self.name, &self.code, self.quantity, self.expiration)
    }

    /// Days left before expiration, relative to `today`.
    pub fn days_until_expiration(&self, today: NaiveDate) -> Option<i64> {
        self.expiration.map(|date| days_until(date, today))
    }

    /// Classifies the expiration date relative to `today`.
    ///
    /// `None` when the item has no expiration date.
    pub fn expiration_status(&self, today: NaiveDate, soon_days: i64) -> Option<ExpirationStatus> {
        self.days_until_expiration(today)
            .map(|days| ExpirationStatus::classify(days, soon_days))
    }
}

impl fmt::Display for Item {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display())
    }
}

// =============================================================================
// Expiration
// =============================================================================

/// Whole days from `today` to `date` (negative once `date` has passed).
pub fn days_until(date: NaiveDate, today: NaiveDate) -> i64 {
    (date - today).num_days()
}

/// Where an item stands relative to its expiration date.
///
/// ## Thresholds
/// ```text
///   days < 0            → Expired
///   days == 0           → ExpiresToday
///   1 ..= soon_days     → ExpiresSoon
///   days > soon_days    → Fresh
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "status")]
pub enum ExpirationStatus {
    /// The date has passed.
    Expired { days_ago: i64 },
    /// Expires at the end of today.
    ExpiresToday,
    /// Expires within the "soon" window.
    ExpiresSoon { days: i64 },
    /// Further out than the "soon" window.
    Fresh { days: i64 },
}

impl ExpirationStatus {
    /// Classifies a day count produced by [`days_until`].
    pub fn classify(days: i64, soon_days: i64) -> Self {
        if days < 0 {
            ExpirationStatus::Expired { days_ago: -days }
        } else if days == 0 {
            ExpirationStatus::ExpiresToday
        } else if days <= soon_days {
            ExpirationStatus::ExpiresSoon { days }
        } else {
            ExpirationStatus::Fresh { days }
        }
    }

    /// True for everything the user should act on.
    pub fn needs_attention(&self) -> bool {
        !matches!(self, ExpirationStatus::Fresh { .. })
    }
}

impl fmt::Display for ExpirationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExpirationStatus::Expired { days_ago: 1 } => write!(f, "Périmé depuis 1 jour"),
            ExpirationStatus::Expired { days_ago } => write!(f, "Périmé depuis {} jours", days_ago),
            ExpirationStatus::ExpiresToday => write!(f, "Expire aujourd'hui"),
            ExpirationStatus::ExpiresSoon { days: 1 } => write!(f, "Expire demain"),
            ExpirationStatus::ExpiresSoon { days } | ExpirationStatus::Fresh { days } => {
                write!(f, "Expire dans {} jours", days)
            }
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
