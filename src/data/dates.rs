use std::fmt;

use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime, NaiveTime};

// ---------------------------------------------------------------------------
// Parsing – exports mix several date layouts
// ---------------------------------------------------------------------------

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%m/%d/%y, %I:%M %p",
    "%m/%d/%Y, %I:%M %p",
    "%m/%d/%y %H:%M",
    "%m/%d/%Y %H:%M",
];

// `%Y` also accepts two digits, so every `%y` layout comes before its `%Y` twin.
const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%d %b %y",
    "%d %b %Y",
    "%d %B %y",
    "%d %B %Y",
    "%m/%d/%y",
    "%m/%d/%Y",
];

/// Parse a date or date-time cell. Returns `None` for anything unrecognised,
/// the caller drops such rows.
///
/// Times are kept as written (no timezone conversion); a trailing ` UTC`
/// marker is ignored.
pub fn parse_datetime(raw: &str) -> Option<NaiveDateTime> {
    let s = raw.trim();
    if s.is_empty() {
        return None;
    }
    let s = s.strip_suffix(" UTC").unwrap_or(s);

    for fmt in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt);
        }
    }
    if let Ok(dt) = chrono::DateTime::parse_from_rfc3339(s) {
        return Some(dt.naive_local());
    }
    parse_date(s).map(|d| d.and_time(NaiveTime::MIN))
}

/// Parse a date cell, accepting the same layouts as [`parse_datetime`] plus
/// month-year (`Mar 2024`) and bare years (`2019`).
pub fn parse_date(raw: &str) -> Option<NaiveDate> {
    let s = raw.trim();
    if s.is_empty() {
        return None;
    }

    for fmt in DATE_FORMATS {
        if let Ok(d) = NaiveDate::parse_from_str(s, fmt) {
            return Some(d);
        }
    }

    // Month-year: chrono needs a day to build a date.
    let with_day = format!("01 {s}");
    for fmt in ["%d %b %y", "%d %b %Y", "%d %B %y", "%d %B %Y"] {
        if let Ok(d) = NaiveDate::parse_from_str(&with_day, fmt) {
            return Some(d);
        }
    }

    if s.len() == 4 && s.chars().all(|c| c.is_ascii_digit()) {
        let year: i32 = s.parse().ok()?;
        return NaiveDate::from_ymd_opt(year, 1, 1);
    }

    // Date-times in a date column: keep the date part.
    DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
        .map(|dt| dt.date())
}

// ---------------------------------------------------------------------------
// YearMonth – monthly bucket key
// ---------------------------------------------------------------------------

/// A calendar month, ordered chronologically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct YearMonth {
    pub year: i32,
    pub month: u32,
}

impl YearMonth {
    pub fn new(year: i32, month: u32) -> Self {
        debug_assert!((1..=12).contains(&month));
        YearMonth { year, month }
    }

    pub fn of<D: Datelike>(date: &D) -> Self {
        YearMonth::new(date.year(), date.month())
    }

    pub fn first_day(&self) -> NaiveDate {
        NaiveDate::from_ymd_opt(self.year, self.month, 1).unwrap_or(NaiveDate::MIN)
    }

    /// The following month.
    pub fn succ(&self) -> Self {
        if self.month == 12 {
            YearMonth::new(self.year + 1, 1)
        } else {
            YearMonth::new(self.year, self.month + 1)
        }
    }

    /// Fractional x-axis value used by the plots: days since the Unix epoch.
    pub fn plot_x(&self) -> f64 {
        day_number(self.first_day())
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

// ---------------------------------------------------------------------------
// Other bucket helpers
// ---------------------------------------------------------------------------

/// Monday of the week containing `date` (weeks run Monday to Sunday).
pub fn week_start(date: NaiveDate) -> NaiveDate {
    date - Duration::days(date.weekday().num_days_from_monday() as i64)
}

/// Days since 1970-01-01, the x unit for time-series plots.
pub fn day_number(date: NaiveDate) -> f64 {
    let epoch = NaiveDate::from_ymd_opt(1970, 1, 1).unwrap_or(NaiveDate::MIN);
    (date - epoch).num_days() as f64
}

/// Fractional day number including the time of day.
pub fn datetime_number(dt: NaiveDateTime) -> f64 {
    day_number(dt.date()) + dt.time().signed_duration_since(NaiveTime::MIN).num_seconds() as f64 / 86_400.0
}

/// Inverse of [`day_number`] for axis labels.
pub fn date_from_number(x: f64) -> Option<NaiveDate> {
    let epoch = NaiveDate::from_ymd_opt(1970, 1, 1)?;
    epoch.checked_add_signed(Duration::days(x.floor() as i64))
}
