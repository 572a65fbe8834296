//! Calendar classification of reading dates.
//!
//! Reading dates are plain `YYYY-MM-DD` strings with no time zone. They are
//! parsed from their literal components so that "2025-12-29" is always the
//! 29th, independent of the host's local offset.

use chrono::{Datelike, NaiveDate, Weekday};
use serde::Serialize;

/// Full English weekday names, Monday first.
pub const DAYS_OF_WEEK: [&str; 7] = [
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
    "Sunday",
];

/// Weekday label used when a reading's date cannot be parsed.
pub const UNKNOWN_DAY: &str = "Unknown";

/// Tariff season a reading is billed under.
///
/// # Examples
///
/// ```
/// use campus_energy::tariff::calendar::Season;
///
/// assert_eq!(Season::from_month(4), Season::Summer);
/// assert_eq!(Season::from_month(11), Season::Winter);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Season {
    /// April through October.
    Summer,
    /// November through March.
    Winter,
}

impl Season {
    /// Classifies a 1-based month number.
    pub fn from_month(month: u32) -> Self {
        if (4..=10).contains(&month) {
            Self::Summer
        } else {
            Self::Winter
        }
    }

    /// Hours of the 21:00–10:00 overnight block that fall inside the true
    /// peak window for this season.
    pub fn overnight_peak_hours(self) -> f64 {
        match self {
            Self::Summer => 1.5,
            Self::Winter => 1.0,
        }
    }

    /// Human-readable peak window used in reports and prompts.
    pub fn peak_window(self) -> &'static str {
        match self {
            Self::Summer => "6:30PM-10:30PM",
            Self::Winter => "6:00PM-10:00PM",
        }
    }
}

/// Calendar facts derived from a reading's raw `date` field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReadingDay {
    /// Parsed calendar date, `None` when the raw string is not a valid date.
    pub date: Option<NaiveDate>,
    /// Billing season.
    pub season: Season,
    /// Saturday or Sunday.
    pub is_weekend: bool,
    /// Full English weekday name.
    pub day_of_week: String,
    /// Display date such as `"29 Dec 2025"`.
    pub formatted: String,
}

impl ReadingDay {
    /// Classifies a raw date string.
    ///
    /// Unparseable dates fall back to winter, weekday, [`UNKNOWN_DAY`] and the
    /// raw string as the display date.
    ///
    /// # Examples
    ///
    /// ```
    /// use campus_energy::tariff::calendar::ReadingDay;
    ///
    /// let day = ReadingDay::from_raw("2025-12-29");
    /// assert_eq!(day.day_of_week, "Monday");
    /// assert_eq!(day.formatted, "29 Dec 2025");
    /// ```
    pub fn from_raw(raw: &str) -> Self {
        match parse_calendar_date(raw) {
            Some(date) => Self::from_date(date),
            None => Self {
                date: None,
                season: Season::Winter,
                is_weekend: false,
                day_of_week: UNKNOWN_DAY.to_string(),
                formatted: raw.to_string(),
            },
        }
    }

    /// Classifies an already-parsed calendar date.
    pub fn from_date(date: NaiveDate) -> Self {
        Self {
            date: Some(date),
            season: Season::from_month(date.month()),
            is_weekend: matches!(date.weekday(), Weekday::Sat | Weekday::Sun),
            day_of_week: weekday_name(date.weekday()).to_string(),
            formatted: format_display_date(date),
        }
    }
}

/// Parses `YYYY-MM-DD` from its literal components.
///
/// Each component contributes its leading digits only, so a trailing time
/// such as `2025-12-29T00:00:00` still yields December 29.
pub fn parse_calendar_date(raw: &str) -> Option<NaiveDate> {
    let mut parts = raw.trim().splitn(3, '-');
    let year = i32::try_from(leading_number(parts.next()?)?).ok()?;
    let month = leading_number(parts.next()?)?;
    let day = leading_number(parts.next()?)?;
    NaiveDate::from_ymd_opt(year, month, day)
}

fn leading_number(part: &str) -> Option<u32> {
    let end = part
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(part.len());
    part[..end].parse().ok()
}

/// Full English weekday name, independent of the host locale.
pub fn weekday_name(weekday: Weekday) -> &'static str {
    DAYS_OF_WEEK[weekday.num_days_from_monday() as usize]
}

/// Returns `true` if `name` is one of [`DAYS_OF_WEEK`].
pub fn is_weekday_name(name: &str) -> bool {
    DAYS_OF_WEEK.contains(&name)
}

/// Formats as `"<day> <abbreviated month> <year>"`.
///
/// chrono's `%b` is always English, so output is stable across hosts.
pub fn format_display_date(date: NaiveDate) -> String {
    date.format("%-d %b %Y").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_literal_components() {
        let date = parse_calendar_date("2025-12-29");
        assert_eq!(date, NaiveDate::from_ymd_opt(2025, 12, 29));
    }

    #[test]
    fn ignores_trailing_time() {
        let date = parse_calendar_date("2026-01-05T00:00:00.000Z");
        assert_eq!(date, NaiveDate::from_ymd_opt(2026, 1, 5));
    }

    #[test]
    fn rejects_impossible_dates() {
        assert_eq!(parse_calendar_date("2026-02-30"), None);
        assert_eq!(parse_calendar_date("not a date"), None);
        assert_eq!(parse_calendar_date(""), None);
    }

    #[test]
    fn season_boundaries() {
        assert_eq!(Season::from_month(3), Season::Winter);
        assert_eq!(Season::from_month(4), Season::Summer);
        assert_eq!(Season::from_month(10), Season::Summer);
        assert_eq!(Season::from_month(11), Season::Winter);
    }

    #[test]
    fn monday_display_is_stable() {
        let day = ReadingDay::from_raw("2025-12-29");
        assert_eq!(day.day_of_week, "Monday");
        assert_eq!(day.formatted, "29 Dec 2025");
        assert!(!day.is_weekend);
        assert_eq!(day.season, Season::Winter);
    }

    #[test]
    fn single_digit_day_is_not_padded() {
        let day = ReadingDay::from_raw("2026-01-03");
        assert_eq!(day.formatted, "3 Jan 2026");
        assert_eq!(day.day_of_week, "Saturday");
        assert!(day.is_weekend);
    }

    #[test]
    fn sunday_is_weekend() {
        let day = ReadingDay::from_raw("2026-01-04");
        assert_eq!(day.day_of_week, "Sunday");
        assert!(day.is_weekend);
    }

    #[test]
    fn invalid_date_uses_placeholders() {
        let day = ReadingDay::from_raw("2026-13-01");
        assert_eq!(day.date, None);
        assert_eq!(day.season, Season::Winter);
        assert!(!day.is_weekend);
        assert_eq!(day.day_of_week, UNKNOWN_DAY);
        assert_eq!(day.formatted, "2026-13-01");
    }

    #[test]
    fn weekday_names_cover_the_week() {
        assert!(is_weekday_name("Wednesday"));
        assert!(!is_weekday_name("wednesday"));
        assert!(!is_weekday_name(UNKNOWN_DAY));
    }
}
