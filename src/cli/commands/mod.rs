pub mod add;
pub mod config;
pub mod del;
pub mod edit;
pub mod init;
pub mod list;
pub mod log;
pub mod widget;

use crate::config::Config;
use crate::core::repository::Repository;
use crate::errors::{AppError, AppResult};
use crate::utils::date;
use crate::widget::bindings::BindingTable;
use chrono::{DateTime, Utc};
use std::path::Path;
use std::sync::Arc;

/// Open the binding table and repository for a command invocation.
pub fn open_engine(cfg: &Config) -> AppResult<(Arc<Repository>, Arc<BindingTable>)> {
    let bindings = Arc::new(BindingTable::load(Path::new(&cfg.widget_prefs)));
    let repo = Arc::new(Repository::open(&cfg.database, Arc::clone(&bindings))?);
    Ok((repo, bindings))
}

/// Resolve an optional `--at` override into a reference instant.
pub fn resolve_at(at: &Option<String>) -> AppResult<DateTime<Utc>> {
    match at {
        Some(s) => date::parse_instant(s).ok_or_else(|| AppError::InvalidInstant(s.clone())),
        None => Ok(date::now()),
    }
}
