use chrono::{DateTime, Local, TimeZone, Utc};

pub const UNKNOWN_LABEL: &str = "unknown";

const MINUTE_SECS: i64 = 60;
const HOUR_SECS: i64 = 60 * MINUTE_SECS;
const DAY_SECS: i64 = 24 * HOUR_SECS;

fn format_millis_in<Tz: TimeZone>(millis: i64, tz: &Tz, pattern: &str) -> String
where
    Tz::Offset: std::fmt::Display,
{
    if millis <= 0 {
        return UNKNOWN_LABEL.to_string();
    }
    match DateTime::<Utc>::from_timestamp_millis(millis) {
        Some(instant) => instant.with_timezone(tz).format(pattern).to_string(),
        None => UNKNOWN_LABEL.to_string(),
    }
}

pub fn format_timestamp_in<Tz: TimeZone>(millis: i64, tz: &Tz) -> String
where
    Tz::Offset: std::fmt::Display,
{
    format_millis_in(millis, tz, "%Y-%m-%d %H:%M")
}

pub fn format_date_in<Tz: TimeZone>(millis: i64, tz: &Tz) -> String
where
    Tz::Offset: std::fmt::Display,
{
    format_millis_in(millis, tz, "%Y-%m-%d")
}

pub fn format_time_in<Tz: TimeZone>(millis: i64, tz: &Tz) -> String
where
    Tz::Offset: std::fmt::Display,
{
    format_millis_in(millis, tz, "%H:%M")
}

pub fn format_for_filename_in<Tz: TimeZone>(millis: i64, tz: &Tz) -> String
where
    Tz::Offset: std::fmt::Display,
{
    format_millis_in(millis, tz, "%Y%m%d_%H%M%S")
}

pub fn format_timestamp(millis: i64) -> String {
    format_timestamp_in(millis, &Local)
}

pub fn format_date(millis: i64) -> String {
    format_date_in(millis, &Local)
}

pub fn format_time(millis: i64) -> String {
    format_time_in(millis, &Local)
}

pub fn format_for_filename(millis: i64) -> String {
    format_for_filename_in(millis, &Local)
}

/// Human readable age of `millis` relative to `now_millis`.
pub fn relative_time(millis: i64, now_millis: i64) -> String {
    if millis <= 0 {
        return UNKNOWN_LABEL.to_string();
    }
    let diff = now_millis - millis;
    if diff < 0 {
        return "in the future".to_string();
    }

    let seconds = diff / 1000;
    let minutes = seconds / MINUTE_SECS;
    let hours = seconds / HOUR_SECS;
    let days = seconds / DAY_SECS;
    let weeks = days / 7;
    let months = days / 30;
    let years = days / 365;

    if seconds < MINUTE_SECS {
        "just now".to_string()
    } else if minutes < 60 {
        plural(minutes, "minute")
    } else if hours < 24 {
        plural(hours, "hour")
    } else if days < 7 {
        plural(days, "day")
    } else if weeks < 4 {
        plural(weeks, "week")
    } else if months < 12 {
        plural(months, "month")
    } else {
        plural(years, "year")
    }
}

fn plural(count: i64, unit: &str) -> String {
    if count == 1 {
        format!("1 {unit} ago")
    } else {
        format!("{count} {unit}s ago")
    }
}
