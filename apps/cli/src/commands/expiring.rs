//! # Expiring Command
//!
//! Items across all lists that expire within a window, expired ones
//! included, soonest first.

use serde::Serialize;
use ustock_core::ExpirationStatus;
use ustock_store::ExpiringItem;

use super::Render;
use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

/// One row of `ustock expiring`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpiringView {
    pub list: String,
    pub display: String,
    pub days_left: i64,
    pub status: ExpirationStatus,
}

impl ExpiringView {
    fn new(entry: ExpiringItem, soon_days: i64) -> Self {
        ExpiringView {
            display: entry.item.display(),
            status: ExpirationStatus::classify(entry.days_left, soon_days),
            days_left: entry.days_left,
            list: entry.list,
        }
    }
}

impl Render for ExpiringView {
    fn render(&self) -> String {
        format!("[{}] {}  ({})", self.list, self.display, self.status)
    }
}

/// Items expiring within `days` (default: `display.expiring_days`).
pub async fn expiring(state: &AppState, days: Option<i64>) -> ApiResult<Vec<ExpiringView>> {
    let soon_days = state.config.display.expiring_days;
    let days = days.unwrap_or(soon_days);
    if days < 0 {
        return Err(ApiError::validation("days must not be negative"));
    }

    let entries = state
        .store
        .lists()
        .expiring_items(state.today, days)
        .await?;

    Ok(entries
        .into_iter()
        .map(|entry| ExpiringView::new(entry, soon_days))
        .collect())
}
