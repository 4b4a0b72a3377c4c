//! Countdown display formatting.

/// Splits a millisecond count into zero-padded minutes and seconds.
///
/// Partial seconds are truncated, so `1999` reads as `00:01`.
pub fn format_time(millis: u64) -> (String, String) {
    let minutes = millis / 60_000;
    let seconds = (millis % 60_000) / 1_000;
    (format!("{minutes:02}"), format!("{seconds:02}"))
}

/// Formats a millisecond count as `MM:SS`.
pub fn format_clock(millis: u64) -> String {
    let (minutes, seconds) = format_time(millis);
    format!("{minutes}:{seconds}")
}
