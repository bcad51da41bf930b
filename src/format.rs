use chrono::{DateTime, Local, TimeZone, Timelike, Utc};

pub const JUST_NOW: &str = "less than a minute ago";

/// "less than a minute ago" within a minute of `now` (timestamps from the
/// future included), otherwise a zero-padded 12-hour `HH:MM` in `ts`'s own
/// timezone.
pub fn format_timestamp<Tz: TimeZone>(ts: &DateTime<Tz>, now: DateTime<Utc>) -> String {
    let elapsed = now.signed_duration_since(ts.with_timezone(&Utc));
    if elapsed.num_milliseconds() <= 60_000 {
        return JUST_NOW.to_string();
    }
    let hours = match ts.hour() % 12 {
        0 => 12,
        h => h,
    };
    format!("{hours:02}:{:02}", ts.minute())
}

/// Formats epoch milliseconds in local time. `None` if out of range.
pub fn format_epoch_millis(ms: i64, now: DateTime<Utc>) -> Option<String> {
    let ts = Local.timestamp_millis_opt(ms).single()?;
    Some(format_timestamp(&ts, now))
}
