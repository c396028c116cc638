/// Cutoff resolution — the single instant every entry is compared against.
///
/// The cutoff is computed exactly once, before traversal starts, so the
/// definition of "recent" is stable for the whole scan.
pub mod duration;

pub use duration::{parse_duration, DurationError, SignedDuration};

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use std::time::SystemTime;
use tracing::warn;

/// Format used for `--time` when none is given.
pub const DEFAULT_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// What the user asked the cutoff to be.
///
/// With neither `instant` nor `duration` set the cutoff is "now".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CutoffRequest {
    /// Absolute time, parsed with `format`.
    pub instant: Option<String>,
    /// chrono `strftime`-style format for `instant`.
    pub format: String,
    /// Relative duration subtracted from "now".
    pub duration: Option<String>,
}

impl Default for CutoffRequest {
    fn default() -> Self {
        Self {
            instant: None,
            format: DEFAULT_TIME_FORMAT.to_string(),
            duration: None,
        }
    }
}

/// A cutoff that could not be resolved. Both variants are fatal to a run.
#[derive(Debug, thiserror::Error)]
pub enum CutoffError {
    #[error("error parsing time \"{input}\": {source}")]
    Instant {
        input: String,
        #[source]
        source: chrono::ParseError,
    },

    #[error("error parsing duration \"{input}\": {source}")]
    Duration {
        input: String,
        #[source]
        source: DurationError,
    },
}

impl CutoffError {
    /// Process exit status for this failure class.
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::Instant { .. } => 1,
            Self::Duration { .. } => 2,
        }
    }
}

/// Resolve `request` against `now`.
///
/// An absolute instant takes precedence over a duration when both are given.
pub fn resolve_cutoff(now: SystemTime, request: &CutoffRequest) -> Result<SystemTime, CutoffError> {
    if let Some(input) = request.instant.as_deref() {
        if let Some(ignored) = request.duration.as_deref() {
            warn!("both a time and a duration were given; ignoring duration \"{ignored}\"");
        }
        return parse_instant(input, &request.format)
            .map(SystemTime::from)
            .map_err(|source| CutoffError::Instant {
                input: input.to_string(),
                source,
            });
    }

    if let Some(input) = request.duration.as_deref() {
        let parsed = parse_duration(input).map_err(|source| CutoffError::Duration {
            input: input.to_string(),
            source,
        })?;
        return parsed.before(now).ok_or_else(|| CutoffError::Duration {
            input: input.to_string(),
            source: DurationError::OutOfRange,
        });
    }

    Ok(now)
}

/// Parse an absolute time.
///
/// Formats carrying an offset (`%z`, `%:z`) are honoured; anything else is
/// read as UTC, and a date-only format means midnight.
pub fn parse_instant(input: &str, format: &str) -> Result<DateTime<Utc>, chrono::ParseError> {
    if let Ok(dt) = DateTime::parse_from_str(input, format) {
        return Ok(dt.with_timezone(&Utc));
    }
    match NaiveDateTime::parse_from_str(input, format) {
        Ok(naive) => Ok(naive.and_utc()),
        Err(err) => NaiveDate::parse_from_str(input, format)
            .map(|date| date.and_time(NaiveTime::MIN).and_utc())
            .map_err(|_| err),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use std::time::Duration;

    fn at(y: i32, mo: u32, d: u32, h: u32, mi: u32, s: u32) -> SystemTime {
        SystemTime::from(Utc.with_ymd_and_hms(y, mo, d, h, mi, s).unwrap())
    }

    #[test]
    fn empty_request_is_now() {
        let now = at(2024, 6, 1, 12, 0, 0);
        assert_eq!(resolve_cutoff(now, &CutoffRequest::default()).unwrap(), now);
    }

    #[test]
    fn instant_with_default_format_is_utc() {
        let request = CutoffRequest {
            instant: Some("2021-01-01 00:00:00".into()),
            ..Default::default()
        };
        let when = resolve_cutoff(SystemTime::now(), &request).unwrap();
        assert_eq!(when, at(2021, 1, 1, 0, 0, 0));
    }

    #[test]
    fn instant_with_offset_format() {
        let request = CutoffRequest {
            instant: Some("2021-01-01 02:00:00 +0200".into()),
            format: "%Y-%m-%d %H:%M:%S %z".into(),
            duration: None,
        };
        let when = resolve_cutoff(SystemTime::now(), &request).unwrap();
        assert_eq!(when, at(2021, 1, 1, 0, 0, 0));
    }

    #[test]
    fn date_only_format_is_midnight() {
        let when = parse_instant("2020-02-29", "%Y-%m-%d").unwrap();
        assert_eq!(SystemTime::from(when), at(2020, 2, 29, 0, 0, 0));
    }

    #[test]
    fn bad_instant_is_exit_code_one() {
        let request = CutoffRequest {
            instant: Some("yesterday".into()),
            ..Default::default()
        };
        let err = resolve_cutoff(SystemTime::now(), &request).unwrap_err();
        assert!(matches!(err, CutoffError::Instant { ref input, .. } if input == "yesterday"));
        assert_eq!(err.exit_code(), 1);
        assert!(err.to_string().contains("\"yesterday\""));
    }

    #[test]
    fn duration_is_subtracted_from_now() {
        let now = at(2024, 6, 1, 12, 0, 0);
        let request = CutoffRequest {
            duration: Some("24h".into()),
            ..Default::default()
        };
        let when = resolve_cutoff(now, &request).unwrap();
        assert_eq!(when, now - Duration::from_secs(24 * 3_600));

        // T - 1h is recent, T - 48h is not.
        assert!(now - Duration::from_secs(3_600) > when);
        assert!(now - Duration::from_secs(48 * 3_600) <= when);
    }

    #[test]
    fn bad_duration_is_exit_code_two() {
        let request = CutoffRequest {
            duration: Some("a week".into()),
            ..Default::default()
        };
        let err = resolve_cutoff(SystemTime::now(), &request).unwrap_err();
        assert!(matches!(err, CutoffError::Duration { .. }));
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn instant_takes_precedence_over_duration() {
        let request = CutoffRequest {
            instant: Some("2021-01-01 00:00:00".into()),
            duration: Some("not a duration".into()),
            ..Default::default()
        };
        let when = resolve_cutoff(SystemTime::now(), &request).unwrap();
        assert_eq!(when, at(2021, 1, 1, 0, 0, 0));
    }
}
