//! ViewModel shim: the UI-facing reactive surface plus the three intents.
//!
//! Intents validate at this boundary (blank titles, inverted windows),
//! perform the mutation, then unconditionally request a refresh of every
//! known widget instance plus the stacked aggregate — the simplest-correct
//! policy, no per-item targeting. Mutation failures surface as `AppResult`
//! errors; the feed keeps its last-known-good emission.

use crate::core::feed::ItemsReceiver;
use crate::core::repository::Repository;
use crate::errors::{AppError, AppResult};
use crate::models::item::TimeFlowItem;
use crate::widget::coordinator::{Coordinator, RefreshCommand};
use chrono::{DateTime, Utc};
use crossbeam_channel::Sender;
use std::sync::Arc;

pub struct ViewModel {
    repo: Arc<Repository>,
    commands: Sender<RefreshCommand>,
}

impl ViewModel {
    /// Wires the repository to the coordinator's worker loop.
    pub fn new(repo: Arc<Repository>, coordinator: Arc<Coordinator>) -> Self {
        let commands = coordinator.spawn();
        Self { repo, commands }
    }

    /// Hot latest-value subscription to the current full ordered list.
    pub fn current_items(&self) -> ItemsReceiver {
        self.repo.observe_all()
    }

    pub fn add(
        &self,
        title: &str,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
        color: u32,
    ) -> AppResult<i64> {
        if title.trim().is_empty() {
            return Err(AppError::EmptyTitle);
        }
        if to <= from {
            return Err(AppError::InvalidWindow);
        }

        let item = TimeFlowItem::new(title, from, to, color);
        let id = self.repo.insert(&item)?;
        self.refresh_all();
        Ok(id)
    }

    pub fn edit(&self, item: &TimeFlowItem) -> AppResult<()> {
        if item.title.trim().is_empty() {
            return Err(AppError::EmptyTitle);
        }
        if item.to_instant <= item.from_instant {
            return Err(AppError::InvalidWindow);
        }

        self.repo.update(item)?;
        self.refresh_all();
        Ok(())
    }

    /// Remove an item; returns the widget instances whose binding was
    /// cascaded away.
    pub fn remove(&self, item: &TimeFlowItem) -> AppResult<Vec<i64>> {
        let affected = self.repo.delete(item)?;
        self.refresh_all();
        Ok(affected)
    }

    /// Fire-and-forget: the mutation never waits for widget rendering.
    fn refresh_all(&self) {
        let _ = self.commands.send(RefreshCommand::All);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::widget::bindings::BindingTable;
    use chrono::TimeZone;
    use std::env;
    use std::fs;

    fn ts(y: i32, m: u32, d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, 0, 0, 0).unwrap()
    }

    fn setup(name: &str) -> ViewModel {
        let mut db = env::temp_dir();
        db.push(format!("{}_timeflow_vm.sqlite", name));
        fs::remove_file(&db).ok();
        let mut prefs = env::temp_dir();
        prefs.push(format!("{}_timeflow_vm.json", name));
        fs::remove_file(&prefs).ok();

        let bindings = Arc::new(BindingTable::load(&prefs));
        let repo = Arc::new(
            Repository::open(&db.to_string_lossy(), Arc::clone(&bindings)).unwrap(),
        );
        let coord = Arc::new(Coordinator::new(Arc::clone(&repo), bindings));
        ViewModel::new(repo, coord)
    }

    #[test]
    fn add_rejects_blank_titles() {
        let vm = setup("blank_title");
        let err = vm.add("   ", ts(2026, 1, 1), ts(2026, 1, 2), 0).unwrap_err();
        assert!(matches!(err, AppError::EmptyTitle));
    }

    #[test]
    fn add_rejects_inverted_windows() {
        let vm = setup("inverted");
        let err = vm.add("x", ts(2026, 1, 2), ts(2026, 1, 1), 0).unwrap_err();
        assert!(matches!(err, AppError::InvalidWindow));
    }

    #[test]
    fn intents_drive_the_reactive_list() {
        let vm = setup("intents");
        let rx = vm.current_items();
        assert!(rx.recv().unwrap().is_empty());

        let id = vm.add("visible", ts(2026, 1, 1), ts(2026, 1, 11), 0).unwrap();

        let after_add = rx.recv().unwrap();
        assert_eq!(after_add.len(), 1);

        let mut item = after_add[0].clone();
        assert_eq!(item.id, id);

        item.title = "renamed".to_string();
        vm.edit(&item).unwrap();
        vm.remove(&item).unwrap();

        let mut last = Vec::new();
        while let Ok(v) = rx.try_recv() {
            last = v;
        }
        assert!(last.is_empty());
    }
}
