//! Persisted widget-instance → item bindings.
//!
//! The binding table is a separate key-value namespace (`widgets.json`),
//! deliberately not transactionally linked to the item store. Keys follow the
//! `appwidget_<instance>` scheme. All operations fail closed: an unreadable
//! or corrupt preferences file behaves like an empty table, and persistence
//! is best-effort — a widget misconfiguration must never crash the process.

use crate::ui::messages::warning;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

const PREF_PREFIX: &str = "appwidget_";

pub struct BindingTable {
    path: PathBuf,
    // Single-writer discipline: every mutation holds this lock for the full
    // read-modify-persist cycle, so bind and cascade cannot interleave.
    map: Mutex<BTreeMap<i64, i64>>,
}

impl BindingTable {
    /// Load bindings from the preferences file; missing or corrupt content
    /// loads as an empty table.
    pub fn load(path: &Path) -> Self {
        let map = fs::read_to_string(path)
            .ok()
            .and_then(|raw| serde_json::from_str::<BTreeMap<String, i64>>(&raw).ok())
            .map(|raw| {
                raw.into_iter()
                    .filter_map(|(k, v)| {
                        k.strip_prefix(PREF_PREFIX)
                            .and_then(|id| id.parse::<i64>().ok())
                            .map(|id| (id, v))
                    })
                    .collect()
            })
            .unwrap_or_default();

        Self {
            path: path.to_path_buf(),
            map: Mutex::new(map),
        }
    }

    /// Best-effort persistence; failures are reported but never propagated.
    fn persist(&self, map: &BTreeMap<i64, i64>) {
        let raw: BTreeMap<String, i64> = map
            .iter()
            .map(|(k, v)| (format!("{}{}", PREF_PREFIX, k), *v))
            .collect();

        let write = serde_json::to_string_pretty(&raw)
            .map_err(std::io::Error::other)
            .and_then(|json| fs::write(&self.path, json));

        if let Err(e) = write {
            warning(format!(
                "Could not save widget preferences to {}: {}",
                self.path.display(),
                e
            ));
        }
    }

    /// Upsert: overwrites any prior binding for this widget instance.
    pub fn bind(&self, widget_id: i64, item_id: i64) {
        let mut map = self.map.lock().unwrap();
        map.insert(widget_id, item_id);
        self.persist(&map);
    }

    pub fn resolve(&self, widget_id: i64) -> Option<i64> {
        self.map.lock().unwrap().get(&widget_id).copied()
    }

    /// Idempotent delete.
    pub fn unbind(&self, widget_id: i64) {
        let mut map = self.map.lock().unwrap();
        if map.remove(&widget_id).is_some() {
            self.persist(&map);
        }
    }

    /// Remove every binding pointing at `item_id`; returns the affected
    /// widget instance ids so the caller can refresh exactly those.
    pub fn unbind_all_for_item(&self, item_id: i64) -> Vec<i64> {
        let mut map = self.map.lock().unwrap();

        let affected: Vec<i64> = map
            .iter()
            .filter(|(_, bound)| **bound == item_id)
            .map(|(w, _)| *w)
            .collect();

        if !affected.is_empty() {
            for w in &affected {
                map.remove(w);
            }
            self.persist(&map);
        }

        affected
    }

    /// All currently bound widget instance ids, ascending.
    pub fn widget_ids(&self) -> Vec<i64> {
        self.map.lock().unwrap().keys().copied().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;

    fn temp_prefs(name: &str) -> PathBuf {
        let mut p = env::temp_dir();
        p.push(format!("{}_timeflow_widgets.json", name));
        fs::remove_file(&p).ok();
        p
    }

    #[test]
    fn bind_resolve_unbind() {
        let path = temp_prefs("bind_resolve");
        let table = BindingTable::load(&path);

        assert_eq!(table.resolve(7), None);

        table.bind(7, 42);
        assert_eq!(table.resolve(7), Some(42));

        // Upsert overwrites.
        table.bind(7, 43);
        assert_eq!(table.resolve(7), Some(43));

        table.unbind(7);
        table.unbind(7); // idempotent
        assert_eq!(table.resolve(7), None);
    }

    #[test]
    fn bindings_survive_a_reload() {
        let path = temp_prefs("reload");
        {
            let table = BindingTable::load(&path);
            table.bind(1, 10);
            table.bind(2, 20);
        }

        let table = BindingTable::load(&path);
        assert_eq!(table.resolve(1), Some(10));
        assert_eq!(table.resolve(2), Some(20));
    }

    #[test]
    fn unbind_all_for_item_returns_exactly_the_affected_instances() {
        let path = temp_prefs("cascade");
        let table = BindingTable::load(&path);

        table.bind(1, 42);
        table.bind(2, 42);
        table.bind(3, 42);
        table.bind(4, 99); // unrelated

        let mut affected = table.unbind_all_for_item(42);
        affected.sort_unstable();
        assert_eq!(affected, vec![1, 2, 3]);

        assert_eq!(table.resolve(1), None);
        assert_eq!(table.resolve(2), None);
        assert_eq!(table.resolve(3), None);
        assert_eq!(table.resolve(4), Some(99));
    }

    #[test]
    fn corrupt_prefs_file_loads_as_empty() {
        let path = temp_prefs("corrupt");
        fs::write(&path, "{ not json at all").unwrap();

        let table = BindingTable::load(&path);
        assert_eq!(table.resolve(1), None);
        assert!(table.widget_ids().is_empty());

        // And the table is still usable afterwards.
        table.bind(1, 5);
        assert_eq!(table.resolve(1), Some(5));
    }

    #[test]
    fn keys_use_the_appwidget_prefix_on_disk() {
        let path = temp_prefs("prefix");
        let table = BindingTable::load(&path);
        table.bind(12, 3);

        let raw = fs::read_to_string(&path).unwrap();
        assert!(raw.contains("appwidget_12"));
    }
}
