//! # UStock Entry Point
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                           ustock (binary)                               │
//! │                                                                         │
//! │  main.rs ────► parses arguments, hands off to lib.rs                   │
//! │  lib.rs ─────► logging, configuration, store, dispatch                 │
//! │  commands/ ──► lists, items, add, remove, scan, expiring, config       │
//! │  state/ ─────► StoreState, AppConfig, AddProductForm                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Startup failures (bad config, unreadable database) surface through
//! `anyhow`. Command failures are printed as notices and exit with status 1.

use std::process::ExitCode;

use clap::Parser;
use ustock_cli::cli::Cli;

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    ustock_cli::run(Cli::parse()).await
}
