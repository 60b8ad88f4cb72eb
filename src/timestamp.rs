//! Repair of the inconsistent timestamps Abucoins emits.
//!
//! The exchange sends ISO-8601-like strings with zero to six fractional
//! digits and an optional trailing `Z`. Every observed variant is padded or
//! truncated to the fixed 23-character form `yyyy-MM-ddTHH:mm:ss.SSS` and
//! then parsed strictly as UTC.

use std::sync::Arc;

use chrono::{DateTime, NaiveDateTime, Utc};

use crate::diagnostics::{Diagnostics, TracingDiagnostics};
use crate::error::TimestampParseFailure;

const CANONICAL_LEN: usize = 23;
const CANONICAL_FORMAT: &str = "%Y-%m-%dT%H:%M:%S.%3f";

/// Pad or truncate `raw` into the canonical width.
///
/// Strings that match none of the known shapes are returned unchanged and
/// will be rejected by the parser.
pub fn repair(raw: &str) -> String {
    let len = raw.chars().count();

    if len > CANONICAL_LEN {
        return prefix(raw, CANONICAL_LEN);
    }

    if raw.ends_with('Z') {
        match len {
            20 => prefix(raw, 19) + ".000",
            22 => prefix(raw, 21) + "00",
            23 => prefix(raw, 22) + "0",
            _ => raw.to_owned(),
        }
    } else {
        match len {
            19 => format!("{raw}.000"),
            21 => format!("{raw}00"),
            22 => format!("{raw}0"),
            _ => raw.to_owned(),
        }
    }
}

fn prefix(s: &str, chars: usize) -> String {
    s.chars().take(chars).collect()
}

/// Turns raw exchange timestamps into UTC instants.
///
/// Rejections are reported to the installed [`Diagnostics`] sink and
/// returned to the caller, who decides whether they are fatal.
#[derive(Clone)]
pub struct TimestampNormalizer {
    diagnostics: Arc<dyn Diagnostics>,
}

impl TimestampNormalizer {
    pub fn new(diagnostics: Arc<dyn Diagnostics>) -> Self {
        Self { diagnostics }
    }

    pub fn normalize(&self, raw: &str) -> Result<DateTime<Utc>, TimestampParseFailure> {
        let modified = repair(raw);
        match parse_canonical(&modified) {
            Ok(instant) => Ok(instant),
            Err(reason) => {
                let failure = TimestampParseFailure {
                    raw: raw.to_owned(),
                    modified,
                    reason,
                };
                self.diagnostics.timestamp_rejected(&failure);
                Err(failure)
            }
        }
    }
}

impl Default for TimestampNormalizer {
    fn default() -> Self {
        Self::new(Arc::new(TracingDiagnostics))
    }
}

fn parse_canonical(modified: &str) -> Result<DateTime<Utc>, String> {
    let len = modified.chars().count();
    if len != CANONICAL_LEN {
        return Err(format!("expected {CANONICAL_LEN} characters, found {len}"));
    }

    NaiveDateTime::parse_from_str(modified, CANONICAL_FORMAT)
        .map(|naive| naive.and_utc())
        .map_err(|e| e.to_string())
}

#[cfg(test)]
mod tests {
    use chrono::{TimeDelta, TimeZone};

    use super::*;
    use crate::diagnostics::RecordingDiagnostics;

    fn at(h: u32, m: u32, s: u32, millis: i64) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2021, 5, 4, h, m, s).unwrap() + TimeDelta::milliseconds(millis)
    }

    fn recording() -> (Arc<RecordingDiagnostics>, TimestampNormalizer) {
        let sink = Arc::new(RecordingDiagnostics::new());
        let normalizer = TimestampNormalizer::new(sink.clone());
        (sink, normalizer)
    }

    #[test]
    fn repair_zulu_shapes() {
        assert_eq!(repair("2021-05-04T12:00:00Z"), "2021-05-04T12:00:00.000");
        assert_eq!(repair("2021-05-04T12:00:00.1Z"), "2021-05-04T12:00:00.100");
        assert_eq!(repair("2021-05-04T12:00:00.12Z"), "2021-05-04T12:00:00.120");
    }

    #[test]
    fn repair_plain_shapes() {
        assert_eq!(repair("2021-05-04T12:00:00"), "2021-05-04T12:00:00.000");
        assert_eq!(repair("2021-05-04T12:00:00.1"), "2021-05-04T12:00:00.100");
        assert_eq!(repair("2021-05-04T12:00:00.12"), "2021-05-04T12:00:00.120");
        assert_eq!(repair("2021-05-04T12:00:00.123"), "2021-05-04T12:00:00.123");
    }

    #[test]
    fn repair_truncates_long_input() {
        assert_eq!(repair("2021-05-04T12:00:00.123Z"), "2021-05-04T12:00:00.123");
        assert_eq!(
            repair("2021-05-04T12:00:00.123456Z"),
            "2021-05-04T12:00:00.123"
        );
    }

    #[test]
    fn repair_leaves_unknown_shapes_alone() {
        assert_eq!(repair("2021-05-04"), "2021-05-04");
        assert_eq!(repair("2021-05-04T12:00:00."), "2021-05-04T12:00:00.");
        assert_eq!(repair("2021-05-04T12:00:0Z"), "2021-05-04T12:00:0Z");
    }

    #[test]
    fn repair_counts_characters_not_bytes() {
        // 19 chars, 20 bytes: padded as a 19-character string
        let raw = "2021-05-04T12:00:0é";
        assert_eq!(repair(raw), format!("{raw}.000"));
    }

    #[test]
    fn normalize_every_known_width() {
        let (sink, normalizer) = recording();
        let cases = [
            ("2021-05-04T12:00:00", at(12, 0, 0, 0)),
            ("2021-05-04T12:00:00Z", at(12, 0, 0, 0)),
            ("2021-05-04T12:00:00.5", at(12, 0, 0, 500)),
            ("2021-05-04T12:00:00.5Z", at(12, 0, 0, 500)),
            ("2021-05-04T12:00:00.12", at(12, 0, 0, 120)),
            ("2021-05-04T12:00:00.12Z", at(12, 0, 0, 120)),
            ("2021-05-04T12:00:00.123", at(12, 0, 0, 123)),
            ("2021-05-04T12:00:00.123Z", at(12, 0, 0, 123)),
            ("2021-05-04T12:00:00.123987Z", at(12, 0, 0, 123)),
        ];
        for (raw, expected) in cases {
            assert_eq!(normalizer.normalize(raw), Ok(expected), "raw = {raw}");
        }
        assert!(sink.rejected().is_empty());
    }

    #[test]
    fn normalize_is_idempotent_on_canonical_input() {
        let normalizer = TimestampNormalizer::default();
        let once = normalizer.normalize("2021-05-04T23:59:59.999").unwrap();
        let canonical = once.format("%Y-%m-%dT%H:%M:%S%.3f").to_string();
        let twice = normalizer.normalize(&canonical).unwrap();
        assert_eq!(once, twice);
        assert_eq!(once, at(23, 59, 59, 999));
    }

    #[test]
    fn normalize_rejects_and_reports_garbage() {
        let (sink, normalizer) = recording();
        let failure = normalizer.normalize("not a timestamp").unwrap_err();
        assert_eq!(failure.raw, "not a timestamp");
        assert_eq!(failure.modified, "not a timestamp");

        let seen = sink.rejected();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0], failure);
    }

    #[test]
    fn normalize_rejects_out_of_range_fields() {
        let (sink, normalizer) = recording();
        let failure = normalizer.normalize("2021-13-04T12:00:00Z").unwrap_err();
        assert_eq!(failure.modified, "2021-13-04T12:00:00.000");
        assert_eq!(sink.rejected().len(), 1);
    }

    #[test]
    fn normalize_rejects_zone_offsets() {
        let (_, normalizer) = recording();
        // truncated to "2021-05-04T12:00:00+02:", which has no fraction
        let failure = normalizer.normalize("2021-05-04T12:00:00+02:00").unwrap_err();
        assert_eq!(failure.modified, "2021-05-04T12:00:00+02:");
    }
}
