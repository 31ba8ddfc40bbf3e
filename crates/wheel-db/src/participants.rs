//! Participant directory storage.

use crate::{Database, DbError};
use rusqlite::OptionalExtension;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Participant {
    pub id: String,
    pub name: String,
    pub image: String,
}

impl Database {
    /// Insert or refresh a participant. Re-adding a soft-deleted id revives it.
    pub fn add_participant(&self, p: &Participant) -> Result<(), DbError> {
        if p.id.trim().is_empty() {
            return Err(DbError::InvalidData("participant id is empty".into()));
        }
        self.with_conn(|conn| {
            conn.execute(
                "INSERT INTO participants (id, name, image, is_active, updated_at)
                 VALUES (?1, ?2, ?3, true, CURRENT_TIMESTAMP)
                 ON CONFLICT(id) DO UPDATE SET
                    name = excluded.name,
                    image = excluded.image,
                    is_active = true,
                    updated_at = CURRENT_TIMESTAMP",
                rusqlite::params![p.id, p.name, p.image],
            )?;
            Ok(())
        })
    }

    pub fn get_participants(&self) -> Result<Vec<Participant>, DbError> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(
                "SELECT id, name, image FROM participants
                 WHERE is_active = true
                 ORDER BY created_at ASC, id ASC",
            )?;
            let rows = stmt.query_map([], |row| {
                Ok(Participant {
                    id: row.get(0)?,
                    name: row.get(1)?,
                    image: row.get::<_, Option<String>>(2)?.unwrap_or_default(),
                })
            })?;
            rows.collect::<Result<Vec<_>, _>>().map_err(Into::into)
        })
    }

    pub fn get_participant(&self, id: &str) -> Result<Option<Participant>, DbError> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(
                "SELECT id, name, image FROM participants
                 WHERE id = ?1 AND is_active = true",
            )?;
            let participant = stmt
                .query_row([id], |row| {
                    Ok(Participant {
                        id: row.get(0)?,
                        name: row.get(1)?,
                        image: row.get::<_, Option<String>>(2)?.unwrap_or_default(),
                    })
                })
                .optional()?;
            Ok(participant)
        })
    }

    /// Soft delete; win records referencing the id are kept and render as "(unknown)".
    pub fn remove_participant(&self, id: &str) -> Result<(), DbError> {
        self.with_conn(|conn| {
            conn.execute(
                "UPDATE participants SET is_active = false, updated_at = CURRENT_TIMESTAMP
                 WHERE id = ?1",
                [id],
            )?;
            Ok(())
        })
    }
}
