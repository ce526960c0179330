//! Server timestamp helpers.

#[cfg(test)]
#[path = "timestamp_test.rs"]
mod timestamp_test;

/// Broken-down `YYYY-MM-DD HH:MM:SS` timestamp as sent by the server.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timestamp {
    pub year: u16,
    pub month: u8,
    pub day: u8,
    pub hour: u8,
    pub minute: u8,
    pub second: u8,
}

/// Split a `YYYY-MM-DD HH:MM:SS` string into its fields.
///
/// Returns `None` when any field is missing or not a number.
#[must_use]
pub fn decode_timestamp(ts: &str) -> Option<Timestamp> {
    let field = |start: usize, len: usize| ts.get(start..start + len).and_then(|s| s.parse::<u16>().ok());
    let narrow = |start: usize| field(start, 2).and_then(|v| u8::try_from(v).ok());
    Some(Timestamp {
        year: field(0, 4)?,
        month: narrow(5)?,
        day: narrow(8)?,
        hour: narrow(11)?,
        minute: narrow(14)?,
        second: narrow(17)?,
    })
}

/// Whole seconds from `from_ms` to `to_ms`, rounded half up.
#[must_use]
pub fn time_diff(from_ms: i64, to_ms: i64) -> i64 {
    (to_ms - from_ms + 500).div_euclid(1000)
}
