//! Module handling time windows given on the command line
//!
//! A window is `BEGIN..END`, `BEGIN..` or `..END`, each side in any format understood by
//! `dateparser`.  A missing side means "computed from the data".
//!

use chrono::{DateTime, Utc};
use eyre::{eyre, Result};
use tracing::trace;

/// Split a window string into its optional begin and end parts.
///
pub fn parse_range(window: &str) -> Result<(Option<String>, Option<String>)> {
    let intv: Vec<&str> = window.split("..").collect();
    let (start, end) = match intv.len() {
        2 => (intv[0].trim(), intv[1].trim()),
        _ => {
            return Err(eyre!("Bad window {window}, need BEGIN..END, BEGIN.. or ..END"));
        }
    };
    if start.is_empty() && end.is_empty() {
        return Err(eyre!("Empty window, need at least one date"));
    }
    let side = |s: &str| (!s.is_empty()).then(|| s.to_string());
    Ok((side(start), side(end)))
}

/// Parse a window into actual timestamps.
///
pub fn parse_window(window: &str) -> Result<(Option<DateTime<Utc>>, Option<DateTime<Utc>>)> {
    let (start, end) = parse_range(window)?;

    let parse = |s: Option<String>| -> Result<Option<DateTime<Utc>>> {
        match s {
            Some(s) => dateparser::parse(&s)
                .map(Some)
                .map_err(|e| eyre!("bad date {s}: {e}")),
            None => Ok(None),
        }
    };
    let start = parse(start)?;
    let end = parse(end)?;
    trace!("window = {start:?} .. {end:?}");

    if let (Some(start), Some(end)) = (start, end) {
        if start >= end {
            return Err(eyre!("Window must end after it begins ({start} >= {end})"));
        }
    }
    Ok((start, end))
}
