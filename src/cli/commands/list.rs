use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::window;
use crate::errors::AppResult;
use crate::models::item::TimeFlowItem;
use crate::utils::table::{Column, Table, progress_bar};
use chrono::{DateTime, Utc};

/// List all TimeFlows, ordered by window start, with their progress.
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::List { at } = cmd {
        let now = super::resolve_at(at)?;

        let (repo, _bindings) = super::open_engine(cfg)?;
        let items = repo.load_all()?;

        if items.is_empty() {
            println!("No TimeFlows yet. Add one with `timeflow add`.");
            return Ok(());
        }

        print_items(&items, now);
    }

    Ok(())
}

fn print_items(items: &[TimeFlowItem], now: DateTime<Utc>) {
    let mut table = Table::new(vec![
        Column::new("ID", 4),
        Column::new("TITLE", 20),
        Column::new("WINDOW", 22),
        Column::new("PROGRESS", 12),
        Column::new("%", 4),
        Column::new("LEFT", 8),
        Column::new("STATE", 7),
    ]);

    for item in items {
        let state = if window::is_past(item, now) {
            "past"
        } else if window::is_future(item, now) {
            "future"
        } else {
            "active"
        };

        table.add_row(vec![
            item.id.to_string(),
            item.title.clone(),
            format!(
                "{} → {}",
                window::format_date(item.from_instant, &Utc),
                window::format_date(item.to_instant, &Utc)
            ),
            progress_bar(window::progress(item, now), 10),
            format!("{}%", window::percent(item, now)),
            window::days_remaining_label(item, now),
            state.to_string(),
        ]);
    }

    print!("{}", table.render());
}
