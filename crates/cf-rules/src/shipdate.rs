use cf_schemas::Load;
use chrono::{DateTime, NaiveDate, NaiveDateTime};

/// Calendar-date portion of a legacy `truck_time` timestamp string.
///
/// Accepted formats, in order: RFC 3339, `%Y-%m-%d %H:%M:%S`,
/// `%Y-%m-%dT%H:%M:%S`. Anything else yields `None`: an unparsable legacy
/// value silently excludes the load from date-filtered queries rather than
/// failing the whole query.
pub fn legacy_timestamp_date(raw: &str) -> Option<NaiveDate> {
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Some(ts.date_naive());
    }
    for fmt in ["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S"] {
        if let Ok(ts) = NaiveDateTime::parse_from_str(raw, fmt) {
            return Some(ts.date());
        }
    }
    None
}

/// Resolve the shipping date of a load.
///
/// `ship_date` is authoritative when present; otherwise the legacy
/// `truck_time` timestamp is parsed and its date portion used. A load with
/// neither field (or an unparsable legacy value) has no resolvable date.
pub fn resolved_ship_date(load: &Load) -> Option<NaiveDate> {
    if let Some(date) = load.ship_date {
        return Some(date);
    }
    load.truck_time
        .as_deref()
        .and_then(legacy_timestamp_date)
}

/// True when the load's resolved shipping date equals `date`.
pub fn ships_on(load: &Load, date: NaiveDate) -> bool {
    resolved_ship_date(load) == Some(date)
}
