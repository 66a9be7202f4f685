/// Marker character appended to a location code to flag a coil as ready from
/// its current spot (e.g. `30302*`).
const READY_MARKER: char = '*';

/// A parsed location input: the bare code plus whether the trailing marker
/// was present.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocationInput {
    pub code: String,
    pub marker: bool,
}

impl LocationInput {
    /// Strip one trailing `*` from a raw location string.
    ///
    /// The marker toggles the coil's ready-from-current-location flag; its
    /// absence says nothing (the caller decides whether that means "false"
    /// on create or "unchanged" on update).
    pub fn parse(raw: &str) -> Self {
        match raw.strip_suffix(READY_MARKER) {
            Some(code) => LocationInput {
                code: code.to_string(),
                marker: true,
            },
            None => LocationInput {
                code: raw.to_string(),
                marker: false,
            },
        }
    }
}

/// Storage-area codes are `S` followed by a digit (S1, S2, S3, ...).
/// Everything else is an ad-hoc bay code.
pub fn is_storage_area(code: &str) -> bool {
    code.strip_prefix('S')
        .and_then(|rest| rest.chars().next())
        .is_some_and(|c| c.is_ascii_digit())
}

/// Default capacity assigned when a location is lazily auto-created on first
/// reference: storage areas are large, ad-hoc bays are small.
pub fn default_capacity(code: &str) -> i32 {
    if is_storage_area(code) {
        50
    } else {
        20
    }
}

/// Apply a delta to an occupancy counter, clamping at zero. Occupancy never
/// goes negative regardless of decrement ordering.
pub fn clamped_occupancy(occupied: i32, delta: i32) -> i32 {
    (occupied + delta).max(0)
}
