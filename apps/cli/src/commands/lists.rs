//! # List Commands
//!
//! Overview, creation and deletion of lists.

use serde::Serialize;

use super::{Notice, Render};
use crate::error::ApiResult;
use crate::state::AppState;

/// One row of `ustock lists`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListSummary {
    pub name: String,
    pub item_count: usize,
}

impl Render for ListSummary {
    fn render(&self) -> String {
        format!("{} ({})", self.name, self.item_count)
    }
}

/// All lists, sorted by name, with their item counts.
pub async fn list_lists(state: &AppState) -> ApiResult<Vec<ListSummary>> {
    let lists = state.store.lists();

    let mut summaries = Vec::new();
    for name in lists.list_names().await? {
        let item_count = lists.list_items(&name).await?.len();
        summaries.push(ListSummary { name, item_count });
    }

    Ok(summaries)
}

/// Creates an empty list.
pub async fn create_list(state: &AppState, name: &str) -> ApiResult<Notice> {
    let name = state.store.lists().create_list(name).await?;
    Ok(Notice::new(format!("Liste {} créée", name)))
}

/// Deletes a list with everything in it.
pub async fn delete_list(state: &AppState, name: &str) -> ApiResult<Notice> {
    let name = name.trim();
    state.store.lists().delete_list(name).await?;
    Ok(Notice::new(format!("Liste {} supprimée", name)))
}
