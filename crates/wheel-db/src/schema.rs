//! Database schema definitions and migrations.

use rusqlite::Connection;

use crate::DbError;

pub fn run_migrations(conn: &Connection) -> Result<(), DbError> {
    conn.execute_batch(SCHEMA)?;
    migrate_legacy_tables(conn)?;
    Ok(())
}

/// Upgrade win_history tables created before soft deletion existed.
fn migrate_legacy_tables(conn: &Connection) -> Result<(), DbError> {
    if !column_exists(conn, "win_history", "is_active")? {
        tracing::info!("Adding is_active column to win_history");
        conn.execute_batch(
            "ALTER TABLE win_history ADD COLUMN is_active BOOLEAN NOT NULL DEFAULT true;",
        )?;
    }
    if !column_exists(conn, "win_history", "modified_at")? {
        tracing::info!("Adding modified_at column to win_history");
        conn.execute_batch("ALTER TABLE win_history ADD COLUMN modified_at TIMESTAMP;")?;
    }
    Ok(())
}

fn column_exists(conn: &Connection, table: &str, column: &str) -> Result<bool, DbError> {
    let mut stmt = conn.prepare(&format!("PRAGMA table_info({})", table))?;
    let exists = stmt
        .query_map([], |row| row.get::<_, String>(1))?
        .any(|name| name.as_deref() == Ok(column));
    Ok(exists)
}

const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS settings (
    key TEXT PRIMARY KEY,
    value TEXT NOT NULL,
    setting_type TEXT NOT NULL DEFAULT 'normal',
    is_required BOOLEAN NOT NULL DEFAULT false,
    description TEXT,
    updated_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP
);

CREATE TABLE IF NOT EXISTS participants (
    id TEXT PRIMARY KEY,
    name TEXT NOT NULL,
    image TEXT DEFAULT '',
    is_active BOOLEAN NOT NULL DEFAULT true,
    created_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP,
    updated_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP
);

CREATE TABLE IF NOT EXISTS win_history (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    participant_id TEXT NOT NULL,
    created_at TIMESTAMP NOT NULL,
    is_active BOOLEAN NOT NULL DEFAULT true,
    modified_at TIMESTAMP
);

CREATE INDEX IF NOT EXISTS idx_win_history_created_at
    ON win_history(created_at DESC);

CREATE INDEX IF NOT EXISTS idx_win_history_participant_id
    ON win_history(participant_id);

CREATE TABLE IF NOT EXISTS wheel_settings (
    id INTEGER PRIMARY KEY CHECK (id = 1),
    decay REAL NOT NULL DEFAULT 0.2,
    rotations INTEGER NOT NULL DEFAULT 6,
    spin_duration_ms INTEGER NOT NULL DEFAULT 4000,
    item_width REAL NOT NULL DEFAULT 160,
    item_gap REAL NOT NULL DEFAULT 24,
    viewport_max_width REAL NOT NULL DEFAULT 900,
    updated_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP
);
"#;
