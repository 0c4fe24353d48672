use rusqlite::{Connection, OptionalExtension, Result};

/// Ensure that the `log` table exists.
fn ensure_log_table(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS log (
            id        INTEGER PRIMARY KEY AUTOINCREMENT,
            date      TEXT NOT NULL,
            operation TEXT NOT NULL,
            target    TEXT DEFAULT '',
            message   TEXT NOT NULL
        );
        "#,
    )?;
    Ok(())
}

/// Check if the `timeflow_items` table exists.
fn items_table_exists(conn: &Connection) -> Result<bool> {
    let mut stmt = conn
        .prepare("SELECT name FROM sqlite_master WHERE type='table' AND name='timeflow_items'")?;
    let exists: Option<String> = stmt.query_row([], |row| row.get(0)).optional()?;
    Ok(exists.is_some())
}

/// Check if the `timeflow_items` table has a `color` column.
fn items_has_color_column(conn: &Connection) -> Result<bool> {
    let mut stmt = conn.prepare("PRAGMA table_info('timeflow_items')")?;
    let cols = stmt.query_map([], |row| row.get::<_, String>(1))?;

    for c in cols {
        if c? == "color" {
            return Ok(true);
        }
    }
    Ok(false)
}

/// Create the `timeflow_items` table with the modern schema (including `color`).
fn create_items_table(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS timeflow_items (
            id           INTEGER PRIMARY KEY AUTOINCREMENT,
            title        TEXT NOT NULL,
            from_instant INTEGER NOT NULL,
            to_instant   INTEGER NOT NULL,
            color        INTEGER NOT NULL DEFAULT 4280391411
        );

        CREATE INDEX IF NOT EXISTS idx_items_from ON timeflow_items(from_instant);
        "#,
    )?;
    Ok(())
}

/// Add the `color` column to databases created before colors existed.
/// Marked as applied in the `log` table so it only runs once.
fn migrate_add_color_column(conn: &Connection) -> Result<()> {
    let version = "20260110_0001_add_item_color";

    let mut chk = conn.prepare(
        "SELECT 1 FROM log
         WHERE operation = 'migration_applied' AND target = ?1
         LIMIT 1",
    )?;
    if chk.query_row([version], |_| Ok(())).optional()?.is_some() {
        return Ok(());
    }

    if !items_has_color_column(conn)? {
        conn.execute(
            "ALTER TABLE timeflow_items ADD COLUMN color INTEGER NOT NULL DEFAULT 4280391411;",
            [],
        )?;
    }

    conn.execute(
        "INSERT INTO log (date, operation, target, message)
         VALUES (datetime('now'), 'migration_applied', ?1, 'Added color column to timeflow_items')",
        [version],
    )?;

    Ok(())
}

/// Public entry point: run all pending migrations.
///
/// Invoked from db::initialize::init_db().
pub fn run_pending_migrations(conn: &Connection) -> Result<()> {
    // 1) Ensure log table
    ensure_log_table(conn)?;

    // 2) Create the items table if missing, otherwise upgrade it
    if !items_table_exists(conn)? {
        create_items_table(conn)?;
    } else {
        conn.execute_batch(
            "CREATE INDEX IF NOT EXISTS idx_items_from ON timeflow_items(from_instant);",
        )?;

        migrate_add_color_column(conn)?;
    }

    Ok(())
}
