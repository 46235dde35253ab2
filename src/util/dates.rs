// Civil-date helpers.
// Parses and formats "Y-m-d" / "Y-m-d H:i:s" tokens in a fixed UTC+08:00 calendar.

use chrono::{
    DateTime, Datelike, FixedOffset, NaiveDate, Offset, TimeDelta, TimeZone, Timelike, Utc,
};

/// Offset of the civil calendar used by every token (UTC+08:00).
pub const CIVIL_OFFSET_SECS: i32 = 8 * 3600;

const MILLIS_PER_DAY: i64 = 86_400_000;

const MONTH_DAYS: [u32; 12] = [31, 28, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31];

/// A point in time expressed in the civil calendar.
pub type CivilDateTime = DateTime<FixedOffset>;

pub fn civil_offset() -> FixedOffset {
    FixedOffset::east_opt(CIVIL_OFFSET_SECS).unwrap_or_else(|| Utc.fix())
}

/// Parse a civil-day token.
///
/// Accepts `Y-M-D` and `Y-M-D H:i:s` with or without zero padding. Missing
/// minutes or seconds count as zero. Returns `None` for anything else,
/// including out-of-range fields.
pub fn date_parse(token: &str) -> Option<CivilDateTime> {
    let token = token.trim();
    if token.is_empty() {
        return None;
    }

    let mut chunks = token.split_whitespace();
    let date = chunks.next()?;
    let time = chunks.next();
    if chunks.next().is_some() {
        return None;
    }

    let mut date_parts = date.split('-');
    let year: i32 = date_parts.next()?.parse().ok()?;
    let month: u32 = date_parts.next()?.parse().ok()?;
    let day: u32 = date_parts.next()?.parse().ok()?;
    if date_parts.next().is_some() {
        return None;
    }

    let (mut hour, mut minute, mut second) = (0, 0, 0);
    if let Some(time) = time {
        let mut time_parts = time.split(':');
        hour = time_parts.next()?.parse().ok()?;
        if let Some(m) = time_parts.next() {
            minute = m.parse().ok()?;
        }
        if let Some(s) = time_parts.next() {
            second = s.parse().ok()?;
        }
        if time_parts.next().is_some() {
            return None;
        }
    }

    let naive = NaiveDate::from_ymd_opt(year, month, day)?.and_hms_opt(hour, minute, second)?;
    civil_offset().from_local_datetime(&naive).single()
}

/// Current instant in the civil calendar, truncated to whole seconds.
pub fn date_now() -> CivilDateTime {
    let now = Utc::now().with_timezone(&civil_offset());
    now.with_nanosecond(0).unwrap_or(now)
}

/// Midnight of the current civil day.
pub fn date_today() -> CivilDateTime {
    let now = date_now();
    now.date_naive()
        .and_hms_opt(0, 0, 0)
        .and_then(|midnight| civil_offset().from_local_datetime(&midnight).single())
        .unwrap_or(now)
}

/// Format a civil date.
///
/// Each placeholder is replaced once, left to right in this order:
/// `Y` year, `m` month, `M` zero-padded month, `d` day, `D` zero-padded day,
/// `H` hour, `i` minute, `s` second (the last three zero-padded).
/// Defaults to `Y-m-d`.
pub fn date_format(v: &CivilDateTime, format: Option<&str>) -> String {
    let format = format.unwrap_or("Y-m-d");
    format
        .replacen('Y', &v.year().to_string(), 1)
        .replacen('m', &v.month().to_string(), 1)
        .replacen('M', &pad2(v.month()), 1)
        .replacen('d', &v.day().to_string(), 1)
        .replacen('D', &pad2(v.day()), 1)
        .replacen('H', &pad2(v.hour()), 1)
        .replacen('i', &pad2(v.minute()), 1)
        .replacen('s', &pad2(v.second()), 1)
}

/// Render an instant as a full civil token (`Y-m-d H:i:s`).
pub fn civil_token(v: &CivilDateTime) -> String {
    date_format(v, Some("Y-m-d H:i:s"))
}

/// Whole days from `v` to `c`, rounded down.
pub fn date_diff(v: &CivilDateTime, c: &CivilDateTime) -> i64 {
    (*c - *v).num_milliseconds().div_euclid(MILLIS_PER_DAY)
}

/// Shift a date by a number of days (negative moves backwards).
pub fn date_offset(v: &CivilDateTime, days: i64) -> Option<CivilDateTime> {
    v.checked_add_signed(TimeDelta::try_days(days)?)
}

pub fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

/// Number of days in `month` (1-12) of `year`.
pub fn month_days(year: i32, month: u32) -> Option<u32> {
    if month == 2 && is_leap_year(year) {
        return Some(29);
    }
    MONTH_DAYS.get(month.checked_sub(1)? as usize).copied()
}

fn pad2(n: u32) -> String {
    format!("{:02}", n)
}
