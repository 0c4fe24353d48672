//! Pure time-window math over a `TimeFlowItem` and an injectable "now".
//!
//! All functions are total: a malformed window (`to_instant <= from_instant`)
//! never produces NaN or a panic. A degenerate window counts as complete.

use crate::models::item::TimeFlowItem;
use chrono::{DateTime, TimeZone, Utc};

const MILLIS_PER_DAY: i64 = 86_400_000;

/// Fraction of elapsed time within the window, clamped to [0, 1].
pub fn progress(item: &TimeFlowItem, now: DateTime<Utc>) -> f64 {
    if item.to_instant <= item.from_instant {
        // Degenerate window: treat as already complete.
        return 1.0;
    }
    if now < item.from_instant {
        return 0.0;
    }
    if now > item.to_instant {
        return 1.0;
    }

    let total = (item.to_instant.timestamp_millis() - item.from_instant.timestamp_millis()) as f64;
    let elapsed = (now.timestamp_millis() - item.from_instant.timestamp_millis()) as f64;

    (elapsed / total).clamp(0.0, 1.0)
}

/// Progress expressed as a whole percentage, 0-100.
pub fn percent(item: &TimeFlowItem, now: DateTime<Utc>) -> u8 {
    (progress(item, now) * 100.0).round() as u8
}

pub fn is_active(item: &TimeFlowItem, now: DateTime<Utc>) -> bool {
    item.from_instant <= now && now <= item.to_instant
}

pub fn is_past(item: &TimeFlowItem, now: DateTime<Utc>) -> bool {
    now > item.to_instant
}

pub fn is_future(item: &TimeFlowItem, now: DateTime<Utc>) -> bool {
    now < item.from_instant
}

/// Whole days until the window ends; 0 once past.
///
/// Convention: the partially elapsed current day counts as a remaining day,
/// so an item ending later today reports 1, never 0. A result of 0 therefore
/// always means "the window is over".
pub fn days_remaining(item: &TimeFlowItem, now: DateTime<Utc>) -> i64 {
    if now > item.to_instant {
        return 0;
    }
    let diff = item.to_instant.timestamp_millis() - now.timestamp_millis();
    diff / MILLIS_PER_DAY + 1
}

/// Short days-left label used by the widget surfaces.
pub fn days_remaining_label(item: &TimeFlowItem, now: DateTime<Utc>) -> String {
    match days_remaining(item, now) {
        0 => "done".to_string(),
        d => format!("{}d left", d),
    }
}

/// Render an instant as DD.MM.YY in the given zone.
pub fn format_date<Tz: TimeZone>(instant: DateTime<Utc>, zone: &Tz) -> String
where
    Tz::Offset: std::fmt::Display,
{
    instant.with_timezone(zone).format("%d.%m.%y").to_string()
}

/// Render an instant as DD.MM.YY HH:MM in the given zone.
pub fn format_datetime<Tz: TimeZone>(instant: DateTime<Utc>, zone: &Tz) -> String
where
    Tz::Offset: std::fmt::Display,
{
    instant.with_timezone(zone).format("%d.%m.%y %H:%M").to_string()
}
