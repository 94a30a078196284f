//! Modification time rendering for long listings

use std::fmt::Display;

use chrono::{Local, TimeZone, Utc};

/// Average Gregorian year (365.25 days) in seconds.
pub const RECENT_WINDOW_SECS: i64 = 31_556_952;

const RECENT_FORMAT: &str = "%b %e %H:%M";
const DATED_FORMAT: &str = "%b %e %Y";

/// Render `mtime` (seconds since the epoch) in the local time zone.
pub fn format_mtime(mtime: i64) -> String {
    format_mtime_in(mtime, Utc::now().timestamp(), &Local)
}

/// Render `mtime` relative to `now` in the given time zone.
///
/// Times in the future and times older than [`RECENT_WINDOW_SECS`] show the
/// year; anything else shows the time of day.
pub fn format_mtime_in<Tz>(mtime: i64, now: i64, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let pattern = if now < mtime || now - mtime >= RECENT_WINDOW_SECS {
        DATED_FORMAT
    } else {
        RECENT_FORMAT
    };
    match tz.timestamp_opt(mtime, 0).earliest() {
        Some(dt) => dt.format(pattern).to_string(),
        None => mtime.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // 2024-03-05 14:07:00 UTC
    const MTIME: i64 = 1_709_647_620;

    #[test]
    fn test_recent_shows_time_of_day() {
        let now = MTIME + 3600;
        assert_eq!(format_mtime_in(MTIME, now, &Utc), "Mar  5 14:07");
    }

    #[test]
    fn test_same_second_is_recent() {
        assert_eq!(format_mtime_in(MTIME, MTIME, &Utc), "Mar  5 14:07");
    }

    #[test]
    fn test_old_shows_year() {
        let now = MTIME + RECENT_WINDOW_SECS;
        assert_eq!(format_mtime_in(MTIME, now, &Utc), "Mar  5 2024");
    }

    #[test]
    fn test_just_inside_window_is_recent() {
        let now = MTIME + RECENT_WINDOW_SECS - 1;
        assert_eq!(format_mtime_in(MTIME, now, &Utc), "Mar  5 14:07");
    }

    #[test]
    fn test_future_shows_year() {
        let now = MTIME - 1;
        assert_eq!(format_mtime_in(MTIME, now, &Utc), "Mar  5 2024");
    }

    #[test]
    fn test_two_digit_day_is_not_padded() {
        // 2023-11-21 08:30:00 UTC
        let mtime = 1_700_555_400;
        assert_eq!(format_mtime_in(mtime, mtime + 60, &Utc), "Nov 21 08:30");
    }
}
