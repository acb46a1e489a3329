//! Shared formatting utilities used by both CLI and TUI

use crate::models::SparkTime;

/// Memory size constants (in bytes)
pub mod size {
    pub const KB: u64 = 1024;
    pub const MB: u64 = KB * 1024;
    pub const GB: u64 = MB * 1024;
}

/// Truncate a string to a maximum length (in characters), adding "..." at the
/// end if truncated.
#[must_use]
pub fn truncate_string(s: &str, max_len: usize) -> String {
    let char_count = s.chars().count();
    if char_count <= max_len {
        s.to_string()
    } else if max_len <= 3 {
        s.chars().take(max_len).collect()
    } else {
        let truncated: String = s.chars().take(max_len - 3).collect();
        format!("{truncated}...")
    }
}

/// Format a byte count using binary units.
#[must_use]
pub fn format_bytes(bytes: u64) -> String {
    if bytes >= size::GB {
        format!("{:.1} GiB", bytes as f64 / size::GB as f64)
    } else if bytes >= size::MB {
        format!("{:.1} MiB", bytes as f64 / size::MB as f64)
    } else if bytes >= size::KB {
        format!("{:.1} KiB", bytes as f64 / size::KB as f64)
    } else {
        format!("{bytes} B")
    }
}

/// Format seconds as H:MM:SS.
#[must_use]
pub fn format_duration_hms(total_seconds: u64) -> String {
    let hours = total_seconds / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let seconds = total_seconds % 60;
    format!("{hours}:{minutes:02}:{seconds:02}")
}

/// Task progress as "done/total".
#[must_use]
pub fn format_task_progress(completed: u64, total: u64) -> String {
    format!("{completed}/{total}")
}

/// Wall-clock duration between two attempt timestamps as H:MM:SS.
///
/// `None` when either timestamp fails to parse or the pair is reversed.
#[must_use]
pub fn attempt_duration(start: &SparkTime, end: &SparkTime) -> Option<String> {
    let start = start.as_datetime()?;
    let end = end.as_datetime()?;
    if end < start {
        return None;
    }
    Some(format_duration_hms((end - start).num_seconds().max(0) as u64))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_string() {
        assert_eq!(truncate_string("short", 10), "short");
        assert_eq!(truncate_string("a very long name", 9), "a very...");
        assert_eq!(truncate_string("abc", 2), "ab");
    }

    #[test]
    fn test_format_bytes() {
        assert_eq!(format_bytes(512), "512 B");
        assert_eq!(format_bytes(2048), "2.0 KiB");
        assert_eq!(format_bytes(5 * size::MB), "5.0 MiB");
        assert_eq!(format_bytes(3 * size::GB), "3.0 GiB");
    }

    #[test]
    fn test_format_duration_hms() {
        assert_eq!(format_duration_hms(0), "0:00:00");
        assert_eq!(format_duration_hms(61), "0:01:01");
        assert_eq!(format_duration_hms(3661), "1:01:01");
    }

    #[test]
    fn test_attempt_duration() {
        let start = SparkTime::new("2017-01-01T00:00:00.000GMT");
        let end = SparkTime::new("2017-01-01T01:30:05.000GMT");
        assert_eq!(attempt_duration(&start, &end).as_deref(), Some("1:30:05"));
        assert_eq!(attempt_duration(&end, &start), None);
        assert_eq!(attempt_duration(&SparkTime::new("garbage"), &end), None);
    }
}
