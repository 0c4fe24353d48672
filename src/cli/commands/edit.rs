use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::viewmodel::ViewModel;
use crate::errors::{AppError, AppResult};
use crate::ui::messages::success;
use crate::utils::colors::parse_argb;
use crate::utils::date::parse_instant;
use crate::widget::coordinator::Coordinator;
use std::sync::Arc;

/// Edit an existing TimeFlow: partial update over a full-record replace.
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Edit {
        id,
        title,
        from,
        to,
        color,
    } = cmd
    {
        let (repo, bindings) = super::open_engine(cfg)?;

        let mut item = repo.get(*id)?.ok_or(AppError::ItemNotFound(*id))?;

        if let Some(t) = title {
            item.title = t.clone();
        }
        if let Some(f) = from {
            item.from_instant =
                parse_instant(f).ok_or_else(|| AppError::InvalidInstant(f.clone()))?;
        }
        if let Some(t) = to {
            item.to_instant = parse_instant(t).ok_or_else(|| AppError::InvalidInstant(t.clone()))?;
        }
        if let Some(c) = color {
            item.color = parse_argb(c).ok_or_else(|| AppError::InvalidColor(c.clone()))?;
        }

        let coordinator = Arc::new(Coordinator::new(Arc::clone(&repo), bindings));
        let vm = ViewModel::new(repo, coordinator);
        vm.edit(&item)?;

        success(format!("Updated TimeFlow #{}: {}", item.id, item.title));
    }

    Ok(())
}
