//! SettingsManager: DB-backed settings with defaults and env migration.

use std::collections::HashMap;

use wheel_db::Database;

use super::defaults::DEFAULT_SETTINGS;
use super::validation::validate_setting;
use super::{SettingInfo, SettingType};

/// Wraps [`Database`] to provide high-level settings operations.
pub struct SettingsManager {
    db: Database,
}

impl SettingsManager {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    /// Get a setting value. Falls back to default if not in DB.
    pub fn get_setting(&self, key: &str) -> Result<String, anyhow::Error> {
        if let Some(val) = self.db.get_setting(key)? {
            return Ok(val);
        }
        if let Some(def) = DEFAULT_SETTINGS.get(key) {
            return Ok(def.default.to_string());
        }
        anyhow::bail!("setting not found: {key}");
    }

    /// Set a setting value with validation.
    pub fn set_setting(&self, key: &str, value: &str) -> Result<(), anyhow::Error> {
        let def = DEFAULT_SETTINGS
            .get(key)
            .ok_or_else(|| anyhow::anyhow!("unknown setting key: {key}"))?;

        validate_setting(key, value)
            .map_err(|e| anyhow::anyhow!("validation error for {key}: {e}"))?;

        let type_str = if def.secret { "secret" } else { "normal" };
        self.db.set_setting(key, value, type_str)?;
        Ok(())
    }

    /// Get all settings, filling in defaults for missing keys.
    pub fn get_all_settings(&self) -> Result<HashMap<String, SettingInfo>, anyhow::Error> {
        let db_settings = self.db.get_all_settings()?;
        let mut result = HashMap::new();

        // Add DB settings (type determined from defaults map)
        for (key, value) in &db_settings {
            let def = DEFAULT_SETTINGS.get(key.as_str());
            let setting_type = match def {
                Some(d) if d.secret => SettingType::Secret,
                _ => SettingType::Normal,
            };
            result.insert(
                key.clone(),
                SettingInfo {
                    key: key.clone(),
                    value: value.clone(),
                    setting_type,
                    required: def.is_some_and(|d| d.required),
                    description: def.map_or(String::new(), |d| d.description.to_string()),
                    has_value: !value.is_empty(),
                },
            );
        }

        // Fill defaults for missing keys
        for (key, def) in DEFAULT_SETTINGS.iter() {
            if !result.contains_key(*key) {
                result.insert(
                    key.to_string(),
                    SettingInfo {
                        key: key.to_string(),
                        value: def.default.to_string(),
                        setting_type: if def.secret {
                            SettingType::Secret
                        } else {
                            SettingType::Normal
                        },
                        required: def.required,
                        description: def.description.to_string(),
                        has_value: !def.default.is_empty(),
                    },
                );
            }
        }

        Ok(result)
    }

    /// Initialize default settings in DB (skip existing).
    pub fn initialize_defaults(&self) -> Result<(), anyhow::Error> {
        for (key, def) in DEFAULT_SETTINGS.iter() {
            if self.db.get_setting(key)?.is_some() {
                continue;
            }
            let type_str = if def.secret { "secret" } else { "normal" };
            self.db.set_setting(key, def.default, type_str)?;
        }
        Ok(())
    }

    /// Migrate settings from environment variables to DB (one-time).
    pub fn migrate_from_env(&self) -> Result<u32, anyhow::Error> {
        let mut migrated = 0u32;
        for key in DEFAULT_SETTINGS.keys() {
            if self.db.get_setting(key)?.is_some() {
                continue;
            }
            if let Ok(env_val) = std::env::var(key) {
                if !env_val.is_empty() {
                    let def = &DEFAULT_SETTINGS[key];
                    let type_str = if def.secret { "secret" } else { "normal" };
                    self.db.set_setting(key, &env_val, type_str)?;
                    tracing::info!("Migrated setting from env: {key}");
                    migrated += 1;
                }
            }
        }
        if migrated > 0 {
            tracing::info!("Migration completed: {migrated} settings migrated");
        }
        Ok(migrated)
    }

    pub fn db(&self) -> &Database {
        &self.db
    }
}
