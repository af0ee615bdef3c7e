//! Display formatting for sizes and timestamps

/// Human readable size in binary units, e.g. `1.5 KiB`
pub fn human_file_size(bytes: u64) -> String {
    const UNITS: [&str; 8] = ["KiB", "MiB", "GiB", "TiB", "PiB", "EiB", "ZiB", "YiB"];
    const THRESH: f64 = 1024.0;

    if (bytes as f64) < THRESH {
        return format!("{} B", bytes);
    }

    let mut value = bytes as f64;
    let mut unit = 0;
    value /= THRESH;
    while value >= THRESH && unit < UNITS.len() - 1 {
        value /= THRESH;
        unit += 1;
    }

    format!("{:.1} {}", value, UNITS[unit])
}

/// Local `YYYY-MM-DD HH:MM` for a unix timestamp, empty when unknown
pub fn format_timestamp(timestamp: Option<i64>) -> String {
    timestamp
        .and_then(|ts| chrono::DateTime::from_timestamp(ts, 0))
        .map(|dt| dt.with_timezone(&chrono::Local).format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_human_file_size() {
        assert_eq!(human_file_size(0), "0 B");
        assert_eq!(human_file_size(1023), "1023 B");
        assert_eq!(human_file_size(1024), "1.0 KiB");
        assert_eq!(human_file_size(1536), "1.5 KiB");
        assert_eq!(human_file_size(5 * 1024 * 1024), "5.0 MiB");
    }

    #[test]
    fn test_format_timestamp_unknown() {
        assert_eq!(format_timestamp(None), "");
        assert_eq!(format_timestamp(Some(0)).len(), "1970-01-01 00:00".len());
    }
}
