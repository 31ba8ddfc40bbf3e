//! Setting value validation.

/// Validate a setting value. Returns `Ok(())` if valid, or an error message.
pub fn validate_setting(key: &str, value: &str) -> Result<(), String> {
    match key {
        "SERVER_PORT" => {
            let v: u32 = value.parse().map_err(|_| "must be an integer")?;
            if !(1..=65535).contains(&v) {
                return Err("must be between 1 and 65535".into());
            }
        }
        "HISTORY_FETCH_LIMIT" => validate_int_range(value, 1, 1000)?,
        "ROLLOVER_INTERVAL_SECS" => validate_int_range(value, 60, 86_400)?,
        "TIMEZONE" => {
            if value.trim().is_empty() || value.len() > 64 {
                return Err("must be a timezone name of 1-64 characters".into());
            }
        }
        "DEFAULT_AVATAR_URL" => {
            if value.len() > 2048 {
                return Err("must be at most 2048 characters".into());
            }
        }
        _ => {}
    }
    Ok(())
}

fn validate_int_range(value: &str, min: i64, max: i64) -> Result<(), String> {
    let v: i64 = value.parse().map_err(|_| "must be an integer")?;
    if !(min..=max).contains(&v) {
        return Err(format!("must be between {min} and {max}"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn port_range_is_enforced() {
        assert!(validate_setting("SERVER_PORT", "8080").is_ok());
        assert!(validate_setting("SERVER_PORT", "0").is_err());
        assert!(validate_setting("SERVER_PORT", "70000").is_err());
        assert!(validate_setting("SERVER_PORT", "abc").is_err());
    }

    #[test]
    fn unknown_keys_pass_through() {
        assert!(validate_setting("SOMETHING_ELSE", "anything").is_ok());
    }

    #[test]
    fn history_limit_bounds() {
        assert!(validate_setting("HISTORY_FETCH_LIMIT", "200").is_ok());
        assert!(validate_setting("HISTORY_FETCH_LIMIT", "0").is_err());
        assert!(validate_setting("HISTORY_FETCH_LIMIT", "5000").is_err());
    }
}
