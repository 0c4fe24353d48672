//! Record store adapter: CRUD over the `timeflow_items` table.
//!
//! Instants are stored as epoch milliseconds (INTEGER columns); `color` is a
//! packed ARGB value stored as a plain integer.

use crate::errors::{AppError, AppResult};
use crate::models::item::TimeFlowItem;
use chrono::{TimeZone, Utc};
use rusqlite::{Connection, Result, Row, params};

pub fn map_row(row: &Row) -> Result<TimeFlowItem> {
    let from_ms: i64 = row.get("from_instant")?;
    let to_ms: i64 = row.get("to_instant")?;

    let from_instant = Utc.timestamp_millis_opt(from_ms).single().ok_or_else(|| {
        rusqlite::Error::FromSqlConversionFailure(
            0,
            rusqlite::types::Type::Integer,
            Box::new(AppError::InvalidInstant(from_ms.to_string())),
        )
    })?;

    let to_instant = Utc.timestamp_millis_opt(to_ms).single().ok_or_else(|| {
        rusqlite::Error::FromSqlConversionFailure(
            0,
            rusqlite::types::Type::Integer,
            Box::new(AppError::InvalidInstant(to_ms.to_string())),
        )
    })?;

    Ok(TimeFlowItem {
        id: row.get("id")?,
        title: row.get("title")?,
        from_instant,
        to_instant,
        color: row.get::<_, i64>("color")? as u32,
    })
}

/// Load the full set, ordered by ascending window start (id as tie-break).
pub fn load_all_items(conn: &Connection) -> AppResult<Vec<TimeFlowItem>> {
    let mut stmt = conn.prepare(
        "SELECT * FROM timeflow_items
         ORDER BY from_instant ASC, id ASC",
    )?;

    let rows = stmt.query_map([], map_row)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

pub fn get_item_by_id(conn: &Connection, id: i64) -> AppResult<Option<TimeFlowItem>> {
    let mut stmt = conn.prepare("SELECT * FROM timeflow_items WHERE id = ?1")?;

    let mut rows = stmt.query_map([id], map_row)?;

    match rows.next() {
        Some(r) => Ok(Some(r?)),
        None => Ok(None),
    }
}

/// Insert a new item and return the store-assigned id.
pub fn insert_item(conn: &Connection, item: &TimeFlowItem) -> AppResult<i64> {
    conn.execute(
        "INSERT INTO timeflow_items (title, from_instant, to_instant, color)
         VALUES (?1, ?2, ?3, ?4)",
        params![
            item.title,
            item.from_instant.timestamp_millis(),
            item.to_instant.timestamp_millis(),
            item.color as i64,
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

/// Full-record replace; errors when the id does not exist.
pub fn update_item(conn: &Connection, item: &TimeFlowItem) -> AppResult<()> {
    let changed = conn.execute(
        "UPDATE timeflow_items
         SET title = ?1, from_instant = ?2, to_instant = ?3, color = ?4
         WHERE id = ?5",
        params![
            item.title,
            item.from_instant.timestamp_millis(),
            item.to_instant.timestamp_millis(),
            item.color as i64,
            item.id,
        ],
    )?;

    if changed == 0 {
        return Err(AppError::ItemNotFound(item.id));
    }
    Ok(())
}

/// Delete by id; no-op when the id does not exist (idempotent).
pub fn delete_item(conn: &Connection, id: i64) -> AppResult<()> {
    conn.execute("DELETE FROM timeflow_items WHERE id = ?", [id])?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::initialize::init_db;

    fn open_test_db() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        init_db(&conn).unwrap();
        conn
    }

    fn sample(title: &str) -> TimeFlowItem {
        TimeFlowItem::new(
            title,
            Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap(),
            Utc.with_ymd_and_hms(2026, 1, 11, 0, 0, 0).unwrap(),
            0xFF11_2233,
        )
    }

    #[test]
    fn insert_then_get_round_trips() {
        let conn = open_test_db();
        let item = sample("Marathon");

        let id = insert_item(&conn, &item).unwrap();
        assert!(id > 0);

        let loaded = get_item_by_id(&conn, id).unwrap().unwrap();
        assert_eq!(loaded.id, id);
        assert_eq!(loaded.title, item.title);
        assert_eq!(loaded.from_instant, item.from_instant);
        assert_eq!(loaded.to_instant, item.to_instant);
        assert_eq!(loaded.color, item.color);
    }

    #[test]
    fn load_all_orders_by_window_start() {
        let conn = open_test_db();

        let mut late = sample("late");
        late.from_instant = Utc.with_ymd_and_hms(2026, 6, 1, 0, 0, 0).unwrap();
        let early = sample("early");

        insert_item(&conn, &late).unwrap();
        insert_item(&conn, &early).unwrap();

        let all = load_all_items(&conn).unwrap();
        let titles: Vec<&str> = all.iter().map(|i| i.title.as_str()).collect();
        assert_eq!(titles, ["early", "late"]);
    }

    #[test]
    fn update_missing_id_errors() {
        let conn = open_test_db();
        let mut item = sample("ghost");
        item.id = 999;

        let err = update_item(&conn, &item).unwrap_err();
        assert!(matches!(err, AppError::ItemNotFound(999)));
    }

    #[test]
    fn delete_is_idempotent() {
        let conn = open_test_db();
        let id = insert_item(&conn, &sample("once")).unwrap();

        delete_item(&conn, id).unwrap();
        delete_item(&conn, id).unwrap();
        assert!(get_item_by_id(&conn, id).unwrap().is_none());
    }
}
