use std::{sync::LazyLock, time::Duration};

use regex::Regex;

static BRACKETED: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[\[(].*?[\])]").unwrap());

/// Removes every `(...)` and `[...]` segment from a title and trims the rest.
///
/// `"Song (Remastered 2011) [Live]"` becomes `"Song"`. Applying it twice
/// yields the same result as applying it once.
pub fn strip_brackets(title: &str) -> String {
    BRACKETED.replace_all(title, "").trim().to_string()
}

/// Case-insensitive containment check.
pub fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

/// Parses a number of seconds (e.g. `0.5`) for the `--track-sleep` flag.
pub fn parse_seconds(value: &str) -> Result<Duration, String> {
    let secs: f64 = value
        .trim()
        .parse()
        .map_err(|_| format!("'{}' is not a number of seconds", value))?;
    if !secs.is_finite() || secs < 0.0 {
        return Err(format!("'{}' must be a positive number of seconds", value));
    }
    Ok(Duration::from_secs_f64(secs))
}

/// Strips the `VL` prefix YouTube Music puts in front of playlist browse ids.
pub fn playlist_id_from_browse_id(browse_id: &str) -> String {
    browse_id
        .strip_prefix("VL")
        .unwrap_or(browse_id)
        .to_string()
}
