use crate::cli::parser::{Commands, WidgetCmd};
use crate::config::Config;
use crate::errors::{AppError, AppResult};
use crate::models::widget_state::{WidgetState, WidgetView};
use crate::ui::messages::success;
use crate::utils::colors::format_argb;
use crate::utils::table::progress_bar;
use crate::widget::coordinator::{Coordinator, RefreshCommand};
use std::sync::Arc;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Widget { action } = cmd {
        let (repo, bindings) = super::open_engine(cfg)?;
        let coordinator = Coordinator::new(Arc::clone(&repo), Arc::clone(&bindings));

        match action {
            WidgetCmd::Bind { widget_id, item_id } => {
                // The configuration flow only offers existing items.
                if repo.get(*item_id)?.is_none() {
                    return Err(AppError::ItemNotFound(*item_id));
                }

                coordinator.handle(
                    RefreshCommand::Configured {
                        widget_id: *widget_id,
                        item_id: *item_id,
                    },
                    crate::utils::date::now(),
                );

                success(format!("Widget {} bound to TimeFlow #{}", widget_id, item_id));
            }

            WidgetCmd::Unbind { widget_id } => {
                bindings.unbind(*widget_id);
                success(format!("Widget {} unbound", widget_id));
            }

            WidgetCmd::Show { widget_id, at } => {
                let now = super::resolve_at(at)?;
                let state = coordinator.refresh_instance(*widget_id, now);
                print_instance(*widget_id, &state);
            }

            WidgetCmd::Stacked { at } => {
                let now = super::resolve_at(at)?;
                let rows = coordinator.render_stacked(now)?;

                if rows.is_empty() {
                    println!("No TimeFlows available");
                } else {
                    println!("TimeFlows (soonest to expire first)");
                    for row in rows {
                        print_view(&row.view);
                    }
                }
            }

            WidgetCmd::Refresh { ids, at } => {
                let now = super::resolve_at(at)?;

                let command = match ids {
                    Some(raw) => RefreshCommand::Instances(parse_id_list(raw)?),
                    None => RefreshCommand::All,
                };
                coordinator.handle(command.clone(), now);

                let refreshed = match command {
                    RefreshCommand::Instances(ids) => ids,
                    _ => bindings.widget_ids(),
                };
                for w in refreshed {
                    if let Some(state) = coordinator.state_of(w) {
                        print_instance(w, &state);
                    }
                }
            }
        }
    }

    Ok(())
}

fn parse_id_list(raw: &str) -> AppResult<Vec<i64>> {
    raw.split(',')
        .map(|part| {
            part.trim()
                .parse::<i64>()
                .map_err(|_| AppError::InvalidIdList(raw.to_string()))
        })
        .collect()
}

fn print_instance(widget_id: i64, state: &WidgetState) {
    match state {
        WidgetState::Loading => println!("Widget {}: loading", widget_id),
        WidgetState::Empty => println!("Widget {}: no TimeFlow selected", widget_id),
        WidgetState::Error => println!("Widget {}: render error", widget_id),
        WidgetState::Rendered(view) => {
            println!("Widget {}: rendered", widget_id);
            print_view(view);
        }
    }
}

fn print_view(view: &WidgetView) {
    println!(
        "  {:<20} {}  {:>4}  {:<8}  ends {}  {}",
        view.title,
        progress_bar(view.percent as f64 / 100.0, 10),
        format!("{}%", view.percent),
        view.days_left,
        view.end_date,
        format_argb(view.color),
    );
}
