//! # Commands Module
//!
//! One function per subcommand. Each returns a serializable value that is
//! printed either as text or, with `--json`, as JSON.
//!
//! ## Command Organization
//! ```text
//! commands/
//! ├── mod.rs       ◄─── You are here (dispatch & output)
//! ├── lists.rs     ◄─── List overview, create, delete
//! ├── items.rs     ◄─── Items of a list, manual add, remove
//! ├── scan.rs      ◄─── Barcode lookup, then add
//! ├── expiring.rs  ◄─── Items expiring soon across lists
//! └── config.rs    ◄─── Effective configuration
//! ```
//!
//! ## How Commands Work
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  ustock items Fridge --json                                            │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  dispatch(&state, Command::Items { list }, json)                       │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  items::list_items(&state, "Fridge") -> ApiResult<Vec<ItemView>>       │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  emit(): json ? serde_json : Render::render()  ──►  stdout             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod config;
pub mod expiring;
pub mod items;
pub mod lists;
pub mod scan;

use serde::Serialize;

use crate::cli::{Command, ListsAction};
use crate::error::{ApiError, ApiResult};
use crate::state::AppState;

/// Text form of a command result.
pub trait Render {
    fn render(&self) -> String;
}

/// One-line confirmation shown after a change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notice {
    pub message: String,
}

impl Notice {
    pub fn new(message: impl Into<String>) -> Self {
        Notice {
            message: message.into(),
        }
    }
}

impl Render for Notice {
    fn render(&self) -> String {
        self.message.clone()
    }
}

impl<T: Render> Render for Vec<T> {
    fn render(&self) -> String {
        self.iter()
            .map(Render::render)
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Runs one subcommand and prints its result.
pub async fn dispatch(state: &AppState, command: Command, json: bool) -> ApiResult<()> {
    match command {
        Command::Lists { action: None } => emit(&lists::list_lists(state).await?, json),
        Command::Lists {
            action: Some(ListsAction::New { name }),
        } => emit(&lists::create_list(state, &name).await?, json),
        Command::Lists {
            action: Some(ListsAction::Delete { name }),
        } => emit(&lists::delete_list(state, &name).await?, json),
        Command::Items { list } => emit(&items::list_items(state, &list).await?, json),
        Command::Add {
            list,
            name,
            code,
            details,
        } => emit(
            &items::add_item(state, &list, &name, &code, &details).await?,
            json,
        ),
        Command::Remove { list, index } => {
            emit(&items::remove_item(state, &list, index).await?, json)
        }
        Command::Scan {
            code,
            list,
            name,
            details,
        } => emit(
            &scan::scan(state, &code, &list, name.as_deref(), &details).await?,
            json,
        ),
        Command::Expiring { days } => emit(&expiring::expiring(state, days).await?, json),
        Command::Config { write } => emit(&config::show_config(state, write).await?, json),
    }
}

fn emit<T: Serialize + Render>(value: &T, json: bool) -> ApiResult<()> {
    if json {
        let out = serde_json::to_string_pretty(value)
            .map_err(|e| ApiError::internal(format!("Failed to encode output: {}", e)))?;
        println!("{}", out);
    } else {
        let out = value.render();
        if !out.is_empty() {
            println!("{}", out);
        }
    }
    Ok(())
}
