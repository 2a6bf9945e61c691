//! # Config Command
//!
//! Shows the effective configuration (file + environment + defaults) and
//! optionally writes it back to the config file.

use serde::Serialize;
use tracing::debug;
use ustock_store::migrations::migration_status;

use super::Render;
use crate::error::{ApiError, ApiResult};
use crate::state::{AppConfig, AppState};

/// Output of `ustock config`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigView {
    pub config_file: Option<String>,
    pub written: bool,
    pub database: String,
    pub migrations_applied: usize,
    pub migrations_total: usize,
    pub settings: AppConfig,
}

impl Render for ConfigView {
    fn render(&self) -> String {
        let file = match (&self.config_file, self.written) {
            (Some(path), true) => format!("{} (written)", path),
            (Some(path), false) => path.clone(),
            (None, _) => "(none)".to_string(),
        };
        let settings = toml::to_string_pretty(&self.settings)
            .unwrap_or_else(|e| format!("# unprintable: {}", e));

        format!(
            "# config file: {}\n# database: {} (migrations {}/{})\n\n{}",
            file,
            self.database,
            self.migrations_applied,
            self.migrations_total,
            settings.trim_end()
        )
    }
}

/// Reports the effective configuration. With `write`, saves it to the
/// config file first.
pub async fn show_config(state: &AppState, write: bool) -> ApiResult<ConfigView> {
    debug!(write, "config command");

    if write {
        let path = state
            .config_path
            .as_deref()
            .ok_or_else(|| ApiError::validation("No config file location; pass --config"))?;
        state.config.save(path)?;
    }

    let (migrations_total, migrations_applied) =
        migration_status(state.store.inner().pool()).await?;

    Ok(ConfigView {
        config_file: state
            .config_path
            .as_ref()
            .map(|path| path.display().to_string()),
        written: write,
        database: state.database_path.display().to_string(),
        migrations_applied,
        migrations_total,
        settings: state.config.clone(),
    })
}
