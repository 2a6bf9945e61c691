//! # UStock CLI Library
//!
//! Configures logging, opens the store and runs one command.
//!
//! ## Module Organization
//! ```text
//! ustock_cli/
//! ├── lib.rs          ◄─── You are here (startup & run)
//! ├── cli.rs          ◄─── clap argument definitions
//! ├── state/
//! │   ├── mod.rs      ◄─── AppState
//! │   ├── db.rs       ◄─── Store wrapper
//! │   ├── config.rs   ◄─── AppConfig (TOML + USTOCK_* env)
//! │   └── form.rs     ◄─── Add-product screen state
//! ├── commands/
//! │   ├── mod.rs      ◄─── dispatch & output
//! │   ├── lists.rs    ◄─── lists, lists new, lists delete
//! │   ├── items.rs    ◄─── items, add, remove
//! │   ├── scan.rs     ◄─── scan
//! │   ├── expiring.rs ◄─── expiring
//! │   └── config.rs   ◄─── config
//! └── error.rs        ◄─── ApiError shown to the user
//! ```

pub mod cli;
pub mod commands;
pub mod error;
pub mod state;

use std::process::ExitCode;

use anyhow::Context;
use chrono::Local;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;
use ustock_resolver::{ProductApi, ProductResolver};

use cli::Cli;
use state::{AppConfig, AppState, StoreState};

/// Runs one invocation.
///
/// ## Startup Sequence
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │                                                                         │
/// │  1. Logging ──► stderr, filter from RUST_LOG or -v / -vv               │
/// │  2. Config ───► --config or platform config dir, then USTOCK_* env     │
/// │  3. Store ────► SQLite file (WAL), pending migrations applied          │
/// │  4. Resolver ─► HTTP client for the product service                    │
/// │  5. Dispatch ─► one command, result on stdout                          │
/// │                                                                         │
/// │  Command failure: notice on stderr (or JSON on stdout), exit 1         │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub async fn run(cli: Cli) -> anyhow::Result<ExitCode> {
    init_tracing(cli.verbose);

    let config_path = cli.config.clone().or_else(AppConfig::default_config_path);
    let config = AppConfig::load(config_path.as_deref()).context("Failed to load configuration")?;
    debug!(?config, "Configuration loaded");

    let database_path = config
        .database_path()
        .context("Failed to determine the database path")?;
    let store = StoreState::open(&database_path)
        .await
        .with_context(|| format!("Failed to open {}", database_path.display()))?;

    let api = ProductApi::new(&config.api).context("Invalid product service settings")?;

    let state = AppState {
        store,
        resolver: ProductResolver::new(api),
        config,
        config_path,
        database_path,
        today: Local::now().date_naive(),
    };

    let result = commands::dispatch(&state, cli.command, cli.json).await;
    state.store.inner().close().await;

    match result {
        Ok(()) => Ok(ExitCode::SUCCESS),
        Err(err) => {
            info!(code = ?err.code, "Command failed");
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&err)?);
            } else {
                eprintln!("{}", err);
            }
            Ok(ExitCode::FAILURE)
        }
    }
}

/// Initializes the tracing subscriber.
///
/// ## Log Levels
/// - default: `warn`
/// - `-v`: `info,ustock=debug,sqlx=warn`
/// - `-vv`: `debug,ustock=trace`
/// - `RUST_LOG` wins over all of them
fn init_tracing(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "info,ustock=debug,sqlx=warn",
        _ => "debug,ustock=trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
