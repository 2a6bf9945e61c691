//! # Scan Command
//!
//! Looks a barcode up, then adds the product to a list.
//!
//! ## Scan Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  ustock scan 3017620422003 --list Fridge [--name "Pâte à tartiner"]    │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  AddProductForm::open(code, today) + --qty / --expires                 │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ResolveTask::spawn(resolver, code) ──► GET / POST / GET in background │
//! │       │                                                                 │
//! │       ├── Ctrl-C ──► form.close(), handle dropped ──► "Saisie annulée" │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  product found?  ── yes ──► name + brand from the service              │
//! │       │ no                                                              │
//! │       ├── --name given ──► use it                                      │
//! │       └── otherwise ──► "Erreur de récupération des informations"      │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  save ──► "Produit ajouté à Fridge"                                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::future::Future;

use tracing::{info, warn};
use ustock_resolver::ResolveTask;

use super::items::{apply_details, save_form};
use super::Notice;
use crate::cli::ItemDetails;
use crate::error::{ApiError, ApiResult};
use crate::state::{AddProductForm, AppState};

/// Scans `code` into `list`. Ctrl-C abandons the screen.
pub async fn scan(
    state: &AppState,
    code: &str,
    list: &str,
    fallback_name: Option<&str>,
    details: &ItemDetails,
) -> ApiResult<Notice> {
    let interrupt = async {
        if tokio::signal::ctrl_c().await.is_err() {
            // No signal handler: never interrupt.
            std::future::pending::<()>().await;
        }
    };
    scan_until(state, code, list, fallback_name, details, interrupt).await
}

/// Same as [`scan`], abandoned when `interrupt` completes first.
pub async fn scan_until(
    state: &AppState,
    code: &str,
    list: &str,
    fallback_name: Option<&str>,
    details: &ItemDetails,
    interrupt: impl Future<Output = ()>,
) -> ApiResult<Notice> {
    let mut form = AddProductForm::open(code, state.today);
    form.select_list(list.trim());
    apply_details(&mut form, details)?;

    let list = list.trim();
    if !state.store.lists().exists(list).await? {
        return Err(ApiError::not_found("List", list));
    }

    info!(code = %form.code(), list = %list, "Looking up product");
    let handle = ResolveTask::spawn(state.resolver.clone(), form.code());

    let outcome = tokio::select! {
        outcome = handle.outcome() => outcome,
        _ = interrupt => {
            form.close();
            info!(code = %form.code(), "Scan abandoned");
            return Err(ApiError::cancelled());
        }
    };

    let mut lookup_error = None;
    match outcome {
        Some(Ok(product)) => {
            form.apply_product(&product);
        }
        Some(Err(err)) => {
            warn!(code = %form.code(), error = %err, "Lookup failed");
            lookup_error = Some(err);
        }
        None => warn!(code = %form.code(), "Lookup ended without a result"),
    }

    if form.name().trim().is_empty() {
        match fallback_name.map(str::trim).filter(|name| !name.is_empty()) {
            Some(name) => form.set_name(name),
            None => {
                return Err(lookup_error
                    .map(ApiError::from)
                    .unwrap_or_else(ApiError::lookup_failed));
            }
        }
    }

    save_form(state, &form).await
}
