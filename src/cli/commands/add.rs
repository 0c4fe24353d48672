use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::viewmodel::ViewModel;
use crate::errors::{AppError, AppResult};
use crate::models::item::DEFAULT_COLOR;
use crate::ui::messages::success;
use crate::utils::colors::parse_argb;
use crate::utils::date::parse_instant;
use crate::widget::coordinator::Coordinator;
use std::sync::Arc;

/// Add a new TimeFlow.
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Add {
        title,
        from,
        to,
        color,
    } = cmd
    {
        //
        // 1. Parse the window bounds (mandatory)
        //
        let from_instant =
            parse_instant(from).ok_or_else(|| AppError::InvalidInstant(from.clone()))?;
        let to_instant = parse_instant(to).ok_or_else(|| AppError::InvalidInstant(to.clone()))?;

        //
        // 2. Parse the color (optional, default opaque blue)
        //
        let color_final = match color {
            Some(c) => parse_argb(c).ok_or_else(|| AppError::InvalidColor(c.clone()))?,
            None => DEFAULT_COLOR,
        };

        //
        // 3. Open the engine and run the intent
        //
        let (repo, bindings) = super::open_engine(cfg)?;
        let coordinator = Arc::new(Coordinator::new(Arc::clone(&repo), bindings));
        let vm = ViewModel::new(repo, coordinator);

        let id = vm.add(title, from_instant, to_instant, color_final)?;

        success(format!("Added TimeFlow #{}: {}", id, title));
    }

    Ok(())
}
