//! Runtime application configuration loaded from DB + environment overrides.

use super::manager::SettingsManager;

/// Runtime configuration populated from the settings DB.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub server_port: u16,
    pub timezone: String,
    pub history_fetch_limit: i64,
    pub rollover_interval_secs: u64,
    pub default_avatar_url: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server_port: 8080,
            timezone: "Asia/Ho_Chi_Minh".into(),
            history_fetch_limit: 200,
            rollover_interval_secs: 3600,
            default_avatar_url: String::new(),
        }
    }
}

impl AppConfig {
    /// Load configuration from the settings manager (DB-first, env overrides).
    pub fn load(sm: &SettingsManager) -> Result<Self, anyhow::Error> {
        let g = |key: &str| -> String { sm.get_setting(key).unwrap_or_default() };

        let mut server_port = parse_u16(&g("SERVER_PORT"), 8080);

        // Environment variable override for quick local runs
        if let Ok(v) = std::env::var("SERVER_PORT") {
            if let Ok(p) = v.parse::<u16>() {
                server_port = p;
            }
        }

        Ok(Self {
            server_port,
            timezone: {
                let tz = g("TIMEZONE");
                if tz.is_empty() { "Asia/Ho_Chi_Minh".into() } else { tz }
            },
            history_fetch_limit: parse_i64(&g("HISTORY_FETCH_LIMIT"), 200).max(1),
            rollover_interval_secs: parse_i64(&g("ROLLOVER_INTERVAL_SECS"), 3600).max(60) as u64,
            default_avatar_url: g("DEFAULT_AVATAR_URL"),
        })
    }

    /// Reload config from the settings manager.
    pub fn reload(&mut self, sm: &SettingsManager) -> Result<(), anyhow::Error> {
        *self = Self::load(sm)?;
        Ok(())
    }
}

fn parse_i64(s: &str, default: i64) -> i64 {
    if s.is_empty() {
        return default;
    }
    s.parse().unwrap_or(default)
}

fn parse_u16(s: &str, default: u16) -> u16 {
    if s.is_empty() {
        return default;
    }
    s.parse().unwrap_or(default)
}
