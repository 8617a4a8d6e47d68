//! Utility functions for infotree

use std::time::Duration;

/// Parse duration string (e.g., "500ms", "30s", "5m", "1h", "7d")
pub fn parse_duration(s: &str) -> crate::Result<Duration> {
    let s = s.trim();
    if s.is_empty() {
        return Err(crate::Error::InvalidConfig("empty duration".into()));
    }

    let (num_str, unit) = match s.strip_suffix("ms") {
        Some(num) => (num, "ms"),
        None => {
            let split = s.char_indices().last().map(|(i, _)| i).unwrap_or(0);
            s.split_at(split)
        }
    };

    let num: u64 = num_str
        .parse()
        .map_err(|_| crate::Error::InvalidConfig(format!("invalid duration: {}", s)))?;

    let secs_per_unit = match unit {
        "ms" => return Ok(Duration::from_millis(num)),
        "s" => 1,
        "m" => 60,
        "h" => 3600,
        "d" => 86400,
        _ => {
            return Err(crate::Error::InvalidConfig(format!(
                "unknown duration unit: {}",
                unit
            )))
        }
    };

    num.checked_mul(secs_per_unit)
        .map(Duration::from_secs)
        .ok_or_else(|| crate::Error::InvalidConfig(format!("duration out of range: {}", s)))
}

/// Rendered width of `s` in characters.
///
/// Tree prefixes contain box-drawing characters and hostnames may be
/// non-ASCII, so byte length is never used for alignment.
pub fn display_width(s: &str) -> usize {
    s.chars().count()
}

/// A run of spaces exactly as wide as `prefix`.
pub fn pad_to_width(prefix: &str) -> String {
    " ".repeat(display_width(prefix))
}
