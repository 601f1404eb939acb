use crate::constants::DATE_FORMAT;
use crate::errors::{AppError, AppResult};
use chrono::{Duration, Local, NaiveDate};

/// Literal accepted by [`date_range`] for "start from the current date".
pub const TODAY: &str = "today";

/// Parses a `dd-mm-yyyy` date string strictly.
///
/// A failure here is a hard error, not a skip: a malformed date on either
/// side of a comparison means the site changed its format and silently
/// dropping entries would hide that.
pub fn parse_day(value: &str) -> AppResult<NaiveDate> {
    NaiveDate::parse_from_str(value, DATE_FORMAT).map_err(|e| AppError::DateFormatError {
        value: value.to_string(),
        detail: e.to_string(),
    })
}

fn format_day(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// Keeps the dates strictly earlier than `cutoff`, preserving input order.
///
/// Note the literal semantics: entries *before* the cutoff are the
/// interesting ones, so callers pick the cutoff accordingly (the watcher uses
/// the last acceptable travel date).
pub fn filter_before(dates: &[String], cutoff: &str) -> AppResult<Vec<String>> {
    let cutoff_day = parse_day(cutoff)?;

    let mut kept = Vec::new();
    for date in dates {
        if parse_day(date)? < cutoff_day {
            kept.push(date.clone());
        }
    }
    Ok(kept)
}

/// Produces every calendar day from `from` through `until`, inclusive, in
/// ascending `dd-mm-yyyy` strings.
///
/// `from` may be the literal `"today"`, resolved against the local clock.
/// When `until` precedes `from` the result is empty, not an error.
pub fn date_range(from: &str, until: &str) -> AppResult<Vec<String>> {
    let start = if from == TODAY {
        Local::now().date_naive()
    } else {
        parse_day(from)?
    };
    let end = parse_day(until)?;

    if end < start {
        return Ok(Vec::new());
    }

    let days = (end - start).num_days();
    let mut range = Vec::with_capacity(days as usize + 1);
    for offset in 0..=days {
        range.push(format_day(start + Duration::days(offset)));
    }
    Ok(range)
}
