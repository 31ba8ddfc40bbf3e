//! Draw parameter storage.

use crate::{Database, DbError};
use rusqlite::OptionalExtension;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WheelSettings {
    pub id: i64,
    /// Per-win multiplicative penalty, in (0, 1).
    pub decay: f64,
    /// Full pseudo-rotations before the strip lands.
    pub rotations: i32,
    /// Length of the scroll transition.
    pub spin_duration_ms: i64,
    pub item_width: f64,
    pub item_gap: f64,
    pub viewport_max_width: f64,
    pub updated_at: String,
}

impl WheelSettings {
    /// Distance from one item's left edge to the next.
    pub fn item_step(&self) -> f64 {
        self.item_width + self.item_gap
    }
}

impl Default for WheelSettings {
    fn default() -> Self {
        Self {
            id: 1,
            decay: crate::engine::DEFAULT_DECAY,
            rotations: crate::strip::DEFAULT_ROTATIONS as i32,
            spin_duration_ms: 4000,
            item_width: 160.0,
            item_gap: 24.0,
            viewport_max_width: 900.0,
            updated_at: chrono::Utc::now().to_rfc3339(),
        }
    }
}

impl Database {
    pub fn get_wheel_settings(&self) -> Result<WheelSettings, DbError> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(
                "SELECT id, decay, rotations, spin_duration_ms, item_width, item_gap,
                        viewport_max_width, updated_at
                 FROM wheel_settings
                 WHERE id = 1",
            )?;

            let settings = stmt
                .query_row([], |row| {
                    Ok(WheelSettings {
                        id: row.get(0)?,
                        decay: row.get(1)?,
                        rotations: row.get(2)?,
                        spin_duration_ms: row.get(3)?,
                        item_width: row.get(4)?,
                        item_gap: row.get(5)?,
                        viewport_max_width: row.get(6)?,
                        updated_at: row.get::<_, Option<String>>(7)?.unwrap_or_default(),
                    })
                })
                .optional()?;

            Ok(settings.unwrap_or_default())
        })
    }

    /// Upsert the singleton row, clamping out-of-range values back to their
    /// defaults so a bad write can never wedge the draw.
    pub fn update_wheel_settings(&self, settings: &WheelSettings) -> Result<(), DbError> {
        self.with_conn(|conn| {
            let defaults = WheelSettings::default();
            let decay = if settings.decay > 0.0 && settings.decay < 1.0 {
                settings.decay
            } else {
                defaults.decay
            };
            let rotations = if settings.rotations >= 1 {
                settings.rotations
            } else {
                defaults.rotations
            };
            let spin_duration_ms = settings.spin_duration_ms.clamp(500, 60_000);
            let item_width = if settings.item_width > 0.0 {
                settings.item_width
            } else {
                defaults.item_width
            };
            let item_gap = settings.item_gap.max(0.0);
            let viewport_max_width = settings.viewport_max_width.max(item_width + item_gap);

            conn.execute(
                "INSERT INTO wheel_settings
                    (id, decay, rotations, spin_duration_ms, item_width, item_gap,
                     viewport_max_width, updated_at)
                 VALUES (1, ?1, ?2, ?3, ?4, ?5, ?6, CURRENT_TIMESTAMP)
                 ON CONFLICT(id) DO UPDATE SET
                    decay = excluded.decay,
                    rotations = excluded.rotations,
                    spin_duration_ms = excluded.spin_duration_ms,
                    item_width = excluded.item_width,
                    item_gap = excluded.item_gap,
                    viewport_max_width = excluded.viewport_max_width,
                    updated_at = CURRENT_TIMESTAMP",
                rusqlite::params![
                    decay,
                    rotations,
                    spin_duration_ms,
                    item_width,
                    item_gap,
                    viewport_max_width,
                ],
            )?;
            Ok(())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_db() -> Database {
        Database::open_in_memory().expect("failed to create test db")
    }

    #[test]
    fn returns_defaults_when_row_does_not_exist() {
        let db = test_db();
        let settings = db.get_wheel_settings().unwrap();

        assert_eq!(settings.id, 1);
        assert!((settings.decay - 0.2).abs() < f64::EPSILON);
        assert_eq!(settings.rotations, 6);
        assert_eq!(settings.spin_duration_ms, 4000);
        assert!((settings.item_step() - 184.0).abs() < f64::EPSILON);
    }

    #[test]
    fn update_and_get_settings() {
        let db = test_db();
        let settings = WheelSettings {
            decay: 0.1,
            rotations: 8,
            spin_duration_ms: 2500,
            item_width: 120.0,
            item_gap: 16.0,
            viewport_max_width: 720.0,
            ..WheelSettings::default()
        };

        db.update_wheel_settings(&settings).unwrap();
        let got = db.get_wheel_settings().unwrap();

        assert!((got.decay - 0.1).abs() < f64::EPSILON);
        assert_eq!(got.rotations, 8);
        assert_eq!(got.spin_duration_ms, 2500);
        assert!((got.item_step() - 136.0).abs() < f64::EPSILON);
    }

    #[test]
    fn out_of_range_values_are_clamped() {
        let db = test_db();
        let settings = WheelSettings {
            decay: 1.5,
            rotations: 0,
            spin_duration_ms: 10,
            item_width: -5.0,
            item_gap: -1.0,
            viewport_max_width: 1.0,
            ..WheelSettings::default()
        };

        db.update_wheel_settings(&settings).unwrap();
        let got = db.get_wheel_settings().unwrap();

        assert!((got.decay - 0.2).abs() < f64::EPSILON);
        assert_eq!(got.rotations, 6);
        assert_eq!(got.spin_duration_ms, 500);
        assert!((got.item_width - 160.0).abs() < f64::EPSILON);
        assert_eq!(got.item_gap, 0.0);
        assert!((got.viewport_max_width - 160.0).abs() < f64::EPSILON);
    }
}
