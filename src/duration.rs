//! ISO 8601 calendar-duration parsing for recipe cook times.
//!
//! Recipe schema blocks encode times as compact durations such as `PT30M`
//! or `PT1H30M`. Anything a site puts there that we cannot read counts as
//! the 30-minute floor rather than an error.

/// Minimum number of minutes any parsed duration normalizes to.
pub const MINIMUM_MINUTES: i64 = 30;

/// Parse an ISO 8601 duration string (e.g. `PT30M`, `PT1H30M`) into minutes.
///
/// Total: malformed input and values under the floor both yield
/// [`MINIMUM_MINUTES`].
pub fn parse_iso_duration(raw: &str) -> i64 {
    match duration_minutes(raw) {
        Some(minutes) => minutes.max(MINIMUM_MINUTES),
        None => MINIMUM_MINUTES,
    }
}

fn duration_minutes(raw: &str) -> Option<i64> {
    let mut rest = raw.trim().to_uppercase().replace("PT", "");
    let mut minutes = 0i64;

    if let Some((hours, tail)) = rest.split_once('H') {
        if !hours.is_empty() {
            minutes += hours.trim().parse::<i64>().ok()? * 60;
        }
        rest = tail.to_string();
    }

    if let Some((mins, _)) = rest.split_once('M') {
        if !mins.is_empty() {
            minutes += mins.trim().parse::<i64>().ok()?;
        }
    }

    Some(minutes)
}
