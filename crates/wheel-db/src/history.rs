//! Win history storage.

use std::collections::HashMap;

use crate::{Database, DbError};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct WinRecord {
    pub id: i64,
    pub participant_id: String,
    pub created_at: String,
    pub is_active: bool,
    pub modified_at: String,
}

impl Database {
    /// Record a completed draw. An empty `created_at` is stamped with the
    /// current UTC time; timestamps are RFC 3339 so windowed range queries
    /// compare correctly as text.
    pub fn record_win(&self, participant_id: &str, created_at: &str) -> Result<i64, DbError> {
        if participant_id.trim().is_empty() {
            return Err(DbError::InvalidData("participant id is empty".into()));
        }
        let created_at = if created_at.trim().is_empty() {
            chrono::Utc::now().to_rfc3339()
        } else {
            created_at.to_string()
        };
        self.with_conn(|conn| {
            conn.execute(
                "INSERT INTO win_history (participant_id, created_at, is_active)
                 VALUES (?1, ?2, true)",
                rusqlite::params![participant_id, created_at],
            )?;
            Ok(conn.last_insert_rowid())
        })
    }

    /// Active records with `created_at` in `[start, end]`, newest first.
    /// `limit <= 0` returns everything.
    pub fn wins_between(
        &self,
        start: &str,
        end: &str,
        limit: i64,
    ) -> Result<Vec<WinRecord>, DbError> {
        self.with_conn(|conn| {
            let query = "SELECT id, participant_id, created_at, is_active, COALESCE(modified_at, '')
                 FROM win_history
                 WHERE is_active = true AND created_at >= ?1 AND created_at <= ?2
                 ORDER BY created_at DESC, id DESC";

            if limit > 0 {
                let mut stmt = conn.prepare(&(query.to_string() + " LIMIT ?3"))?;
                let rows = stmt.query_map(rusqlite::params![start, end, limit], map_win_record)?;
                rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
            } else {
                let mut stmt = conn.prepare(query)?;
                let rows = stmt.query_map(rusqlite::params![start, end], map_win_record)?;
                rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
            }
        })
    }

    /// Active win counts per participant within `[start, end]`.
    pub fn win_counts_between(
        &self,
        start: &str,
        end: &str,
    ) -> Result<HashMap<String, i64>, DbError> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(
                "SELECT participant_id, COUNT(*) FROM win_history
                 WHERE is_active = true AND created_at >= ?1 AND created_at <= ?2
                 GROUP BY participant_id",
            )?;
            let rows = stmt.query_map([start, end], |row| {
                Ok((row.get::<_, String>(0)?, row.get::<_, i64>(1)?))
            })?;
            let mut counts = HashMap::new();
            for row in rows {
                let (id, count) = row?;
                counts.insert(id, count);
            }
            Ok(counts)
        })
    }

    /// Active win counts per participant across all time, most wins first.
    pub fn win_counts_all_time(&self) -> Result<Vec<(String, i64)>, DbError> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(
                "SELECT participant_id, COUNT(*) AS wins FROM win_history
                 WHERE is_active = true
                 GROUP BY participant_id
                 ORDER BY wins DESC, participant_id ASC",
            )?;
            let rows = stmt.query_map([], |row| {
                Ok((row.get::<_, String>(0)?, row.get::<_, i64>(1)?))
            })?;
            rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
        })
    }

    /// Soft delete one record. Returns the number of rows touched (0 or 1).
    pub fn deactivate_win(&self, id: i64) -> Result<usize, DbError> {
        self.with_conn(|conn| {
            let changed = conn.execute(
                "UPDATE win_history SET is_active = false, modified_at = CURRENT_TIMESTAMP
                 WHERE id = ?1 AND is_active = true",
                [id],
            )?;
            Ok(changed)
        })
    }

    /// Soft delete every active record with `created_at` in `[start, end]`.
    pub fn deactivate_wins_between(&self, start: &str, end: &str) -> Result<usize, DbError> {
        self.with_conn(|conn| {
            let changed = conn.execute(
                "UPDATE win_history SET is_active = false, modified_at = CURRENT_TIMESTAMP
                 WHERE is_active = true AND created_at >= ?1 AND created_at <= ?2",
                [start, end],
            )?;
            Ok(changed)
        })
    }

    /// Purge soft-deleted records older than `cutoff`. Active records are
    /// never touched so all-time standings survive the weekly rollover.
    pub fn purge_inactive_before(&self, cutoff: &str) -> Result<usize, DbError> {
        self.with_conn(|conn| {
            let purged = conn.execute(
                "DELETE FROM win_history WHERE is_active = false AND created_at < ?1",
                [cutoff],
            )?;
            Ok(purged)
        })
    }
}

fn map_win_record(row: &rusqlite::Row<'_>) -> Result<WinRecord, rusqlite::Error> {
    Ok(WinRecord {
        id: row.get(0)?,
        participant_id: row.get(1)?,
        created_at: row.get(2)?,
        is_active: row.get(3)?,
        modified_at: row.get(4)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_db() -> Database {
        Database::open_in_memory().expect("failed to create test db")
    }

    #[test]
    fn record_and_list_wins() {
        let db = test_db();
        db.record_win("u1", "2025-01-06T09:00:00+00:00").unwrap();
        db.record_win("u2", "2025-01-07T09:00:00+00:00").unwrap();

        let rows = db
            .wins_between("2025-01-06T00:00:00+00:00", "2025-01-10T23:59:59+00:00", 0)
            .unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].participant_id, "u2");
        assert_eq!(rows[1].participant_id, "u1");

        let limited = db
            .wins_between("2025-01-06T00:00:00+00:00", "2025-01-10T23:59:59+00:00", 1)
            .unwrap();
        assert_eq!(limited.len(), 1);
        assert_eq!(limited[0].participant_id, "u2");
    }

    #[test]
    fn record_win_stamps_missing_timestamp() {
        let db = test_db();
        let id = db.record_win("u1", "").unwrap();
        assert!(id > 0);

        let now = chrono::Utc::now().to_rfc3339();
        let rows = db.wins_between("2000-01-01T00:00:00+00:00", &now, 0).unwrap();
        assert_eq!(rows.len(), 1);
        assert!(!rows[0].created_at.is_empty());
    }

    #[test]
    fn rejects_empty_participant_id() {
        let db = test_db();
        assert!(db.record_win("  ", "").is_err());
    }

    #[test]
    fn deactivated_records_are_hidden_everywhere() {
        let db = test_db();
        let id = db.record_win("u1", "2025-01-06T09:00:00+00:00").unwrap();
        db.record_win("u1", "2025-01-07T09:00:00+00:00").unwrap();

        assert_eq!(db.deactivate_win(id).unwrap(), 1);
        let rows = db
            .wins_between("2025-01-06T00:00:00+00:00", "2025-01-10T23:59:59+00:00", 0)
            .unwrap();
        assert_eq!(rows.len(), 1);

        let counts = db
            .win_counts_between("2025-01-06T00:00:00+00:00", "2025-01-10T23:59:59+00:00")
            .unwrap();
        assert_eq!(counts.get("u1").copied(), Some(1));

        let all_time = db.win_counts_all_time().unwrap();
        assert_eq!(all_time, vec![("u1".to_string(), 1)]);

        // Deactivating twice is a no-op
        assert_eq!(db.deactivate_win(id).unwrap(), 0);
    }

    #[test]
    fn clear_window_and_purge() {
        let db = test_db();
        db.record_win("u1", "2024-12-30T09:00:00+00:00").unwrap();
        db.record_win("u2", "2025-01-06T09:00:00+00:00").unwrap();

        let changed = db
            .deactivate_wins_between("2024-12-30T00:00:00+00:00", "2025-01-03T23:59:59+00:00")
            .unwrap();
        assert_eq!(changed, 1);

        // Purge only removes rows that are both inactive and old
        let purged = db.purge_inactive_before("2025-01-06T00:00:00+00:00").unwrap();
        assert_eq!(purged, 1);
        let purged = db.purge_inactive_before("2025-01-06T00:00:00+00:00").unwrap();
        assert_eq!(purged, 0);

        let all_time = db.win_counts_all_time().unwrap();
        assert_eq!(all_time, vec![("u2".to_string(), 1)]);
    }
}
