//! Repository: adapts the record store into the engine's reactive surface.
//!
//! Mutations go through the store, then the full ordered list is republished
//! on the items feed. `delete` additionally cascades into the widget binding
//! table — a deliberate cross-component call, since no transaction spans the
//! SQLite store and the preferences file.

use crate::core::feed::{ItemsFeed, ItemsReceiver};
use crate::db::log::ttlog;
use crate::db::pool::DbPool;
use crate::db::{initialize, queries};
use crate::errors::AppResult;
use crate::models::item::TimeFlowItem;
use crate::widget::bindings::BindingTable;
use std::sync::{Arc, Mutex};

pub struct Repository {
    pool: Mutex<DbPool>,
    feed: ItemsFeed,
    bindings: Arc<BindingTable>,
}

impl Repository {
    /// Open the database (running pending migrations) and prime the feed
    /// with the current contents.
    pub fn open(db_path: &str, bindings: Arc<BindingTable>) -> AppResult<Self> {
        let pool = DbPool::new(db_path)?;
        initialize::init_db(&pool.conn)?;

        let repo = Self {
            pool: Mutex::new(pool),
            feed: ItemsFeed::new(),
            bindings,
        };
        repo.republish()?;
        Ok(repo)
    }

    /// Subscribe to the "current full ordered list" stream
    /// (latest-value replay).
    pub fn observe_all(&self) -> ItemsReceiver {
        self.feed.subscribe()
    }

    /// Latest published list without subscribing.
    pub fn snapshot(&self) -> Vec<TimeFlowItem> {
        self.feed.latest()
    }

    /// Read the full set straight from the store, bypassing the feed.
    /// Used by the stacked widget, which re-reads once per refresh trigger.
    pub fn load_all(&self) -> AppResult<Vec<TimeFlowItem>> {
        let pool = self.pool.lock().unwrap();
        queries::load_all_items(&pool.conn)
    }

    pub fn get(&self, id: i64) -> AppResult<Option<TimeFlowItem>> {
        let pool = self.pool.lock().unwrap();
        queries::get_item_by_id(&pool.conn, id)
    }

    pub fn insert(&self, item: &TimeFlowItem) -> AppResult<i64> {
        let id = {
            let pool = self.pool.lock().unwrap();
            let id = queries::insert_item(&pool.conn, item)?;
            ttlog(&pool.conn, "insert", &id.to_string(), &item.title)?;
            id
        };
        self.republish()?;
        Ok(id)
    }

    pub fn update(&self, item: &TimeFlowItem) -> AppResult<()> {
        {
            let pool = self.pool.lock().unwrap();
            queries::update_item(&pool.conn, item)?;
            ttlog(&pool.conn, "update", &item.id.to_string(), &item.title)?;
        }
        self.republish()?;
        Ok(())
    }

    /// Delete an item and cascade its widget bindings. Returns the widget
    /// instance ids that were bound to it, so the caller can refresh exactly
    /// those surfaces.
    pub fn delete(&self, item: &TimeFlowItem) -> AppResult<Vec<i64>> {
        {
            let pool = self.pool.lock().unwrap();
            queries::delete_item(&pool.conn, item.id)?;
            ttlog(&pool.conn, "delete", &item.id.to_string(), &item.title)?;
        }

        let affected = self.bindings.unbind_all_for_item(item.id);
        self.republish()?;
        Ok(affected)
    }

    pub fn bindings(&self) -> &Arc<BindingTable> {
        &self.bindings
    }

    fn republish(&self) -> AppResult<()> {
        let items = {
            let pool = self.pool.lock().unwrap();
            queries::load_all_items(&pool.conn)?
        };
        self.feed.publish(items);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use std::env;
    use std::fs;
    use std::path::PathBuf;

    fn temp_path(name: &str, ext: &str) -> PathBuf {
        let mut p = env::temp_dir();
        p.push(format!("{}_timeflow_repo.{}", name, ext));
        fs::remove_file(&p).ok();
        p
    }

    fn open_repo(name: &str) -> Repository {
        let db = temp_path(name, "sqlite");
        let prefs = temp_path(name, "json");
        let bindings = Arc::new(BindingTable::load(&prefs));
        Repository::open(&db.to_string_lossy(), bindings).unwrap()
    }

    fn sample(title: &str) -> TimeFlowItem {
        TimeFlowItem::new(
            title,
            Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap(),
            Utc.with_ymd_and_hms(2026, 1, 11, 0, 0, 0).unwrap(),
            0xFF00_FF00,
        )
    }

    #[test]
    fn mutations_republish_the_full_list() {
        let repo = open_repo("republish");
        let rx = repo.observe_all();
        assert!(rx.recv().unwrap().is_empty());

        let id = repo.insert(&sample("one")).unwrap();

        let after_insert = rx.recv().unwrap();
        assert_eq!(after_insert.len(), 1);
        assert_eq!(after_insert[0].id, id);
    }

    #[test]
    fn add_then_remove_converges_to_absent() {
        let repo = open_repo("converge");
        let rx = repo.observe_all();

        let id = repo.insert(&sample("ephemeral")).unwrap();
        let mut item = sample("ephemeral");
        item.id = id;
        repo.delete(&item).unwrap();

        let mut last = None;
        while let Ok(v) = rx.try_recv() {
            last = Some(v);
        }
        let final_state = last.unwrap();
        assert!(!final_state.iter().any(|i| i.title == "ephemeral"));
    }

    #[test]
    fn delete_cascades_bindings_and_reports_instances() {
        let repo = open_repo("cascade");
        let id = repo.insert(&sample("bound")).unwrap();

        repo.bindings().bind(101, id);
        repo.bindings().bind(102, id);
        repo.bindings().bind(103, 999); // unrelated

        let mut item = sample("bound");
        item.id = id;
        let mut affected = repo.delete(&item).unwrap();
        affected.sort_unstable();

        assert_eq!(affected, vec![101, 102]);
        assert_eq!(repo.bindings().resolve(101), None);
        assert_eq!(repo.bindings().resolve(102), None);
        assert_eq!(repo.bindings().resolve(103), Some(999));
        assert!(repo.get(id).unwrap().is_none());
    }

    #[test]
    fn failed_update_keeps_the_last_good_state() {
        let repo = open_repo("last_good");
        repo.insert(&sample("keeper")).unwrap();
        let before = repo.snapshot();

        let mut ghost = sample("ghost");
        ghost.id = 12345;
        assert!(repo.update(&ghost).is_err());

        assert_eq!(repo.snapshot(), before);
    }
}
