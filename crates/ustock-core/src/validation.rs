//! # Validation Module
//!
//! Input validation run before anything reaches the store or the network.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: CLI arguments (clap)                                         │
//! │  ├── Types (numbers, flags)                                            │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE                                                  │
//! │  ├── Empty / too long / reserved names                                 │
//! │  └── Barcode shape                                                     │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: ListRegistry (ustock-store)                                  │
//! │  └── Uniqueness, list existence                                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use ustock_core::validation::{validate_list_name, validate_barcode};
//!
//! assert_eq!(validate_list_name("  Fridge ").unwrap(), "Fridge");
//! assert!(validate_list_name("userLists").is_err());
//! assert!(validate_barcode("").is_err());
//! ```

use crate::error::ValidationError;
use crate::types::Item;
use crate::{MAX_CODE_LEN, MAX_LIST_NAME_LEN, MAX_PRODUCT_NAME_LEN, USER_LISTS_KEY};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// String Validators
// =============================================================================

/// Validates a list name and returns it trimmed.
///
/// ## Rules
/// - Must not be empty after trimming
/// - At most 100 characters
/// - Must not be the registry key (`userLists`)
pub fn validate_list_name(name: &str) -> ValidationResult<String> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: "list name".to_string(),
        });
    }

    if name.chars().count() > MAX_LIST_NAME_LEN {
        return Err(ValidationError::TooLong {
            field: "list name".to_string(),
            max: MAX_LIST_NAME_LEN,
        });
    }

    if name == USER_LISTS_KEY {
        return Err(ValidationError::Reserved {
            field: "list name".to_string(),
            value: name.to_string(),
        });
    }

    Ok(name.to_string())
}

/// Validates a product name and returns it trimmed.
///
/// ## Example
/// ```rust
/// use ustock_core::validation::validate_product_name;
///
/// assert!(validate_product_name("Lait demi-écrémé").is_ok());
/// assert!(validate_product_name("   ").is_err());
/// ```
pub fn validate_product_name(name: &str) -> ValidationResult<String> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: "name".to_string(),
        });
    }

    if name.chars().count() > MAX_PRODUCT_NAME_LEN {
        return Err(ValidationError::TooLong {
            field: "name".to_string(),
            max: MAX_PRODUCT_NAME_LEN,
        });
    }

    Ok(name.to_string())
}

/// Validates an item code. Empty is allowed (manual entries have none).
pub fn validate_code(code: &str) -> ValidationResult<()> {
    if code.chars().count() > MAX_CODE_LEN {
        return Err(ValidationError::TooLong {
            field: "code".to_string(),
            max: MAX_CODE_LEN,
        });
    }

    if code.chars().any(|c| c.is_whitespace() || c == '/') {
        return Err(ValidationError::InvalidFormat {
            field: "code".to_string(),
            reason: "must not contain whitespace or '/'".to_string(),
        });
    }

    Ok(())
}

/// Validates a scanned barcode before it is sent to the lookup service.
///
/// Same as [`validate_code`], but the code is required.
pub fn validate_barcode(code: &str) -> ValidationResult<()> {
    if code.is_empty() {
        return Err(ValidationError::Required {
            field: "code".to_string(),
        });
    }
    validate_code(code)
}

/// Validates an item right before it is written to a list.
pub fn validate_item(item: &Item) -> ValidationResult<()> {
    validate_product_name(&item.name)?;
    validate_code(&item.code)?;
    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
