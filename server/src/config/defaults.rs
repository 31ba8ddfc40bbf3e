//! All setting definitions with their default values.

use std::collections::HashMap;
use std::sync::LazyLock;

/// (key, default, secret, required, description)
const DEFS: &[(&str, &str, bool, bool, &str)] = &[
    ("SERVER_PORT", "8080", false, false, "HTTP/WebSocket listen port"),
    (
        "TIMEZONE",
        "Asia/Ho_Chi_Minh",
        false,
        false,
        "Display timezone hint sent to clients",
    ),
    (
        "HISTORY_FETCH_LIMIT",
        "200",
        false,
        false,
        "Maximum history rows returned per request",
    ),
    (
        "ROLLOVER_INTERVAL_SECS",
        "3600",
        false,
        false,
        "How often the win-history rollover runs",
    ),
    (
        "DEFAULT_AVATAR_URL",
        "",
        false,
        false,
        "Fallback avatar for players added without an image",
    ),
];

/// A single setting definition.
#[derive(Debug, Clone)]
pub struct SettingDef {
    pub key: &'static str,
    pub default: &'static str,
    pub secret: bool,
    pub required: bool,
    pub description: &'static str,
}

/// Global setting definitions indexed by key.
pub static DEFAULT_SETTINGS: LazyLock<HashMap<&'static str, SettingDef>> = LazyLock::new(|| {
    DEFS.iter()
        .map(|&(key, default, secret, required, description)| {
            (
                key,
                SettingDef {
                    key,
                    default,
                    secret,
                    required,
                    description,
                },
            )
        })
        .collect()
});

/// Get the default value for a setting key, or `None` if not defined.
#[allow(dead_code)]
pub fn get_default(key: &str) -> Option<&'static str> {
    DEFAULT_SETTINGS.get(key).map(|d| d.default)
}
