//! Time intervals, as used for availability, clock and path visibility.
//!

use std::fmt::{Display, Formatter};

use chrono::{DateTime, SecondsFormat, TimeDelta, Utc};
use tracing::{trace, warn};

use crate::CzmlError;

/// ISO-8601 form of a timestamp, in UTC with fractional seconds only when needed.
///
#[inline]
pub fn iso(t: &DateTime<Utc>) -> String {
    t.to_rfc3339_opts(SecondsFormat::AutoSi, true)
}

/// A closed time interval with `start < end`.
///
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Interval {
    start: DateTime<Utc>,
    end: DateTime<Utc>,
}

impl Interval {
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Result<Self, CzmlError> {
        if start >= end {
            return Err(CzmlError::BadInterval { start, end });
        }
        Ok(Interval { start, end })
    }

    #[inline]
    pub fn start(&self) -> DateTime<Utc> {
        self.start
    }

    #[inline]
    pub fn end(&self) -> DateTime<Utc> {
        self.end
    }

    /// Length of the interval in seconds, microsecond precision.
    ///
    pub fn duration_secs(&self) -> f64 {
        let d = self.end - self.start;
        match d.num_microseconds() {
            Some(us) => us as f64 / 1_000_000.,
            None => d.num_milliseconds() as f64 / 1_000.,
        }
    }

    /// Absolute timestamp of an offset (in seconds) from the start.
    ///
    pub fn at(&self, offset: f64) -> Result<DateTime<Utc>, CzmlError> {
        if !offset.is_finite() {
            return Err(CzmlError::BadOffset(offset));
        }
        let us = (offset * 1_000_000.).round();
        if us.abs() >= i64::MAX as f64 {
            return Err(CzmlError::BadOffset(offset));
        }
        self.start
            .checked_add_signed(TimeDelta::microseconds(us as i64))
            .ok_or(CzmlError::BadOffset(offset))
    }

    /// Is `other` entirely inside us?
    ///
    pub fn contains(&self, other: &Interval) -> bool {
        self.start <= other.start && other.end <= self.end
    }
}

impl Display for Interval {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", iso(&self.start), iso(&self.end))
    }
}

/// Compute the window covering all the given spans.
///
/// `start` and `end`, when given, win unconditionally even if they do not cover everything;
/// this is only reported in the logs.
///
#[tracing::instrument(skip(spans))]
pub fn document_window<I>(
    spans: I,
    start: Option<DateTime<Utc>>,
    end: Option<DateTime<Utc>>,
) -> Result<Interval, CzmlError>
where
    I: IntoIterator<Item = Interval>,
{
    let spans: Vec<Interval> = spans.into_iter().collect();
    if spans.is_empty() {
        return Err(CzmlError::NoEntities);
    }

    let start = match start {
        Some(start) => start,
        None => spans.iter().map(Interval::start).min().ok_or(CzmlError::NoEntities)?,
    };
    let end = match end {
        Some(end) => end,
        None => spans.iter().map(Interval::end).max().ok_or(CzmlError::NoEntities)?,
    };
    let window = Interval::new(start, end)?;
    trace!("window = {window}");

    spans
        .iter()
        .filter(|span| !window.contains(span))
        .for_each(|span| warn!("{span} is outside of document window {window}"));
    Ok(window)
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 14, 10, 0, 0).unwrap()
    }

    fn span(from: i64, to: i64) -> Interval {
        Interval::new(
            t0() + TimeDelta::seconds(from),
            t0() + TimeDelta::seconds(to),
        )
        .unwrap()
    }

    #[test]
    fn test_interval_display() {
        let i = span(0, 3600);
        assert_eq!("2024-06-14T10:00:00Z/2024-06-14T11:00:00Z", i.to_string());
    }

    #[test]
    fn test_iso_fraction() {
        let t = t0() + TimeDelta::milliseconds(1500);
        assert_eq!("2024-06-14T10:00:01.500Z", iso(&t));
    }

    #[test]
    fn test_interval_bad() {
        assert!(matches!(
            Interval::new(t0(), t0()),
            Err(CzmlError::BadInterval { .. })
        ));
        assert!(Interval::new(t0() + TimeDelta::seconds(1), t0()).is_err());
    }

    #[test]
    fn test_interval_duration_and_at() {
        let i = span(0, 100);
        assert_eq!(100., i.duration_secs());
        assert_eq!(t0() + TimeDelta::seconds(50), i.at(50.).unwrap());
        assert_eq!(t0() + TimeDelta::milliseconds(250), i.at(0.25).unwrap());
        assert!(i.at(f64::NAN).is_err());
        assert!(i.at(f64::MAX).is_err());
    }

    #[test]
    fn test_document_window_computed() {
        let w = document_window(vec![span(0, 3600), span(0, 1800), span(-60, 60)], None, None)
            .unwrap();
        assert_eq!(t0() - TimeDelta::seconds(60), w.start());
        assert_eq!(t0() + TimeDelta::seconds(3600), w.end());
    }

    #[test]
    fn test_document_window_override_wins() {
        let w = document_window(
            vec![span(0, 3600)],
            Some(t0() + TimeDelta::seconds(10)),
            Some(t0() + TimeDelta::seconds(20)),
        )
        .unwrap();
        assert_eq!(span(10, 20), w);
    }

    #[test]
    fn test_document_window_partial_override() {
        let w = document_window(vec![span(0, 3600)], None, Some(t0() + TimeDelta::seconds(7200)))
            .unwrap();
        assert_eq!(span(0, 7200), w);
    }

    #[test]
    fn test_document_window_empty() {
        let r = document_window(Vec::<Interval>::new(), Some(t0()), None);
        assert!(matches!(r, Err(CzmlError::NoEntities)));
    }
}
