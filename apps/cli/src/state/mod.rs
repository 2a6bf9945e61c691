//! # State Module
//!
//! What a command gets to work with.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         AppState                                        │
//! │                                                                         │
//! │  ┌──────────────┐  ┌──────────────────┐  ┌──────────────────────────┐  │
//! │  │  StoreState  │  │ ProductResolver  │  │  AppConfig               │  │
//! │  │              │  │                  │  │                          │  │
//! │  │  SQLite pool │  │  HTTP client     │  │  [api] [storage]         │  │
//! │  │  ListRegistry│  │  GET→POST→GET    │  │  [display]               │  │
//! │  └──────────────┘  └──────────────────┘  └──────────────────────────┘  │
//! │                                                                         │
//! │  today: fixed once per run, so every command sees the same date        │
//! │                                                                         │
//! │  AddProductForm: created per add/scan, never shared                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod config;
mod db;
mod form;

use std::path::PathBuf;

use chrono::NaiveDate;
use ustock_resolver::ProductResolver;

pub use config::{AppConfig, ConfigError, DisplaySettings, StorageSettings};
pub use db::StoreState;
pub use form::AddProductForm;

/// Everything commands need, built once at startup.
#[derive(Debug, Clone)]
pub struct AppState {
    pub store: StoreState,
    pub resolver: ProductResolver,
    pub config: AppConfig,
    /// Config file this run was loaded from (or would be written to).
    pub config_path: Option<PathBuf>,
    /// Database file behind `store`.
    pub database_path: PathBuf,
    pub today: NaiveDate,
}
