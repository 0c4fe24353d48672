//! Widget refresh coordinator.
//!
//! Passive component driven by `RefreshCommand`s over a channel (the host's
//! "please redraw" entry points) or called synchronously by the CLI. Each
//! widget instance walks `Loading -> Rendered | Empty | Error` per refresh;
//! failures are contained per instance and never reach the host shell or
//! other instances. A newer refresh for the same instance supersedes the
//! previous rendered view (last-write-wins, no queueing).

use crate::core::repository::Repository;
use crate::core::window;
use crate::errors::AppResult;
use crate::models::item::TimeFlowItem;
use crate::models::widget_state::{WidgetState, WidgetView};
use crate::widget::bindings::BindingTable;
use chrono::{DateTime, Utc};
use crossbeam_channel::{Sender, unbounded};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::thread;

/// Maximum rows in the stacked aggregate widget.
pub const MAX_ITEMS_TO_SHOW: usize = 5;

/// Inbound refresh triggers, modeled as a command queue.
#[derive(Debug, Clone)]
pub enum RefreshCommand {
    /// "Update these widget instance ids" — explicit list.
    Instances(Vec<i64>),
    /// "Configuration changed for this instance, now bound to this item."
    Configured { widget_id: i64, item_id: i64 },
    /// Refresh every known instance (post-mutation policy).
    All,
    /// Periodic host-driven tick.
    Tick,
}

/// One row of the stacked aggregate widget.
#[derive(Debug, Clone, PartialEq)]
pub struct StackedRow {
    pub view: WidgetView,
}

pub struct Coordinator {
    repo: Arc<Repository>,
    bindings: Arc<BindingTable>,
    states: Mutex<HashMap<i64, WidgetState>>,
}

impl Coordinator {
    pub fn new(repo: Arc<Repository>, bindings: Arc<BindingTable>) -> Self {
        Self {
            repo,
            bindings,
            states: Mutex::new(HashMap::new()),
        }
    }

    /// Spawn the worker loop and return the command sender. Commands are
    /// fire-and-forget: senders never wait for rendering to finish, and the
    /// loop ends when the last sender is dropped.
    pub fn spawn(self: &Arc<Self>) -> Sender<RefreshCommand> {
        let (tx, rx) = unbounded::<RefreshCommand>();
        let me = Arc::clone(self);
        thread::spawn(move || {
            for cmd in rx {
                me.handle(cmd, Utc::now());
            }
        });
        tx
    }

    /// Process one refresh command. `now` is injectable for tests and for
    /// the CLI's `--at` flag.
    pub fn handle(&self, cmd: RefreshCommand, now: DateTime<Utc>) {
        match cmd {
            RefreshCommand::Instances(ids) => {
                for id in ids {
                    self.refresh_instance(id, now);
                }
            }
            RefreshCommand::Configured { widget_id, item_id } => {
                self.bindings.bind(widget_id, item_id);
                self.refresh_instance(widget_id, now);
            }
            RefreshCommand::All | RefreshCommand::Tick => {
                for id in self.bindings.widget_ids() {
                    self.refresh_instance(id, now);
                }
            }
        }
    }

    /// Refresh a single widget instance: publish `Loading` immediately, then
    /// the resolved final state. Errors render as `Error` and stop here.
    pub fn refresh_instance(&self, widget_id: i64, now: DateTime<Utc>) -> WidgetState {
        self.states
            .lock()
            .unwrap()
            .insert(widget_id, WidgetState::Loading);

        let state = match self.resolve_instance(widget_id, now) {
            Ok(s) => s,
            Err(_) => WidgetState::Error,
        };

        self.states.lock().unwrap().insert(widget_id, state.clone());
        state
    }

    fn resolve_instance(&self, widget_id: i64, now: DateTime<Utc>) -> AppResult<WidgetState> {
        // Absent binding is a normal state, not an error.
        let Some(item_id) = self.bindings.resolve(widget_id) else {
            return Ok(WidgetState::Empty);
        };

        // Dangling reference: the item was deleted without cascading.
        let Some(item) = self.repo.get(item_id)? else {
            return Ok(WidgetState::Empty);
        };

        Ok(WidgetState::Rendered(render_view(&item, now)))
    }

    /// Last published state for an instance, if it was ever refreshed.
    pub fn state_of(&self, widget_id: i64) -> Option<WidgetState> {
        self.states.lock().unwrap().get(&widget_id).cloned()
    }

    /// Render the stacked aggregate: full set read once, sorted by ascending
    /// days remaining with past items last, capped at `MAX_ITEMS_TO_SHOW`.
    /// An empty result means the caller should show the placeholder row.
    pub fn render_stacked(&self, now: DateTime<Utc>) -> AppResult<Vec<StackedRow>> {
        let items = self.repo.load_all()?;
        Ok(stacked_rows(&items, now))
    }
}

/// Compute the rendered content for one item.
pub fn render_view(item: &TimeFlowItem, now: DateTime<Utc>) -> WidgetView {
    WidgetView {
        title: item.title.clone(),
        percent: window::percent(item, now),
        days_left: window::days_remaining_label(item, now),
        end_date: window::format_date(item.to_instant, &Utc),
        color: item.color,
    }
}

/// Sort by soonest-to-expire and cap at `MAX_ITEMS_TO_SHOW`. Past items sort
/// last; ties break by id (insertion order).
pub fn stacked_rows(items: &[TimeFlowItem], now: DateTime<Utc>) -> Vec<StackedRow> {
    let mut sorted: Vec<&TimeFlowItem> = items.iter().collect();
    sorted.sort_by_key(|it| {
        let past = window::is_past(it, now);
        (past, window::days_remaining(it, now), it.id)
    });

    sorted
        .into_iter()
        .take(MAX_ITEMS_TO_SHOW)
        .map(|it| StackedRow {
            view: render_view(it, now),
        })
        .collect()
}
