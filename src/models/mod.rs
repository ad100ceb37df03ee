use chrono::{DateTime, SecondsFormat, Utc};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Note {
    pub id: i64,
    pub title: String,
    pub content: String,
    pub created: DateTime<Utc>,
    pub changed: DateTime<Utc>,
}

/// Formats a timestamp the way it is stored and sent over the wire:
/// UTC, millisecond precision, `Z` suffix (`2024-05-01T12:00:00.000Z`).
pub fn format_timestamp(ts: &DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Millis, true)
}

#[cfg(test)]
mod tests {
    use super::*;

    use chrono::TimeZone;

    #[test]
    fn timestamp_has_millis_and_z_suffix() {
        let ts = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
        assert_eq!(format_timestamp(&ts), "2024-05-01T12:00:00.000Z");
    }

    #[test]
    fn formatted_timestamps_sort_in_time_order() {
        let earlier = Utc.with_ymd_and_hms(2024, 5, 1, 9, 59, 59).unwrap();
        let later = Utc.with_ymd_and_hms(2024, 5, 1, 10, 0, 0).unwrap();
        assert!(format_timestamp(&earlier) < format_timestamp(&later));
    }
}
