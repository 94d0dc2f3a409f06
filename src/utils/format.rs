//! Countdown display formatting

const MS_PER_HOUR: i64 = 3_600_000;
const MS_PER_MINUTE: i64 = 60_000;
const MS_PER_SECOND: i64 = 1_000;

/// Format a millisecond duration as `MM:SS`, or `H:MM:SS` once it reaches an hour.
///
/// Negative input is clamped to zero so a late tick never shows `-00:01`.
pub fn format_remaining(ms: i64) -> String {
    let ms = ms.max(0);
    let hours = ms / MS_PER_HOUR;
    let minutes = (ms / MS_PER_MINUTE) % 60;
    let seconds = (ms / MS_PER_SECOND) % 60;

    if hours > 0 {
        format!("{}:{:02}:{:02}", hours, minutes, seconds)
    } else {
        format!("{:02}:{:02}", minutes, seconds)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::format_remaining;

    #[test]
    fn formats_minutes_and_seconds_below_an_hour() {
        assert_eq!(format_remaining(0), "00:00");
        assert_eq!(format_remaining(61_000), "01:01");
        assert_eq!(format_remaining(59 * 60_000 + 59_999), "59:59");
    }

    #[test]
    fn switches_to_unpadded_hours() {
        assert_eq!(format_remaining(3_661_000), "1:01:01");
        assert_eq!(format_remaining(3_600_000), "1:00:00");
        assert_eq!(format_remaining(25 * 3_600_000 + 5_000), "25:00:05");
    }

    #[test]
    fn truncates_partial_seconds() {
        assert_eq!(format_remaining(999), "00:00");
        assert_eq!(format_remaining(1_999), "00:01");
    }

    #[test]
    fn clamps_negative_input() {
        assert_eq!(format_remaining(-500), "00:00");
        assert_eq!(format_remaining(i64::MIN), "00:00");
    }
}
