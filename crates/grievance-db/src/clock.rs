//! Identifier and timestamp assignment.

use std::fmt::Display;

use chrono::{DateTime, Local, TimeZone, Utc};
use grievance_core::models::grievance::{Grievance, GrievanceId};

/// Format in the `M/D/YYYY, h:mm:ss AM` shape used for every stored
/// timestamp.
pub fn locale_timestamp<Tz>(at: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    at.format("%-m/%-d/%Y, %-I:%M:%S %p").to_string()
}

/// Current local time, locale formatted.
pub fn now_locale() -> String {
    locale_timestamp(&Local::now())
}

/// Next identifier for a collection: the current epoch milliseconds,
/// bumped past the largest stored id so ids never repeat or go
/// backwards within one store. `None` when the largest stored id
/// leaves no room above it.
pub fn next_id(now_millis: i64, existing: &[Grievance]) -> Option<GrievanceId> {
    match existing.iter().map(|g| g.id).max() {
        Some(last) if last >= now_millis => last.checked_add(1),
        _ => Some(now_millis),
    }
}

pub fn now_millis() -> i64 {
    Utc::now().timestamp_millis()
}
