use chrono::{Duration, NaiveDate, NaiveDateTime, Weekday};

use crate::data::dates::YearMonth;

const MONTHS: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// `1..=12` → English month name.
pub fn month_name(month: u32) -> &'static str {
    month
        .checked_sub(1)
        .and_then(|i| MONTHS.get(i as usize))
        .copied()
        .unwrap_or("?")
}

pub fn weekday_name(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}

/// `05 March 2024`
pub fn format_date(date: NaiveDate) -> String {
    date.format("%d %B %Y").to_string()
}

/// `05 March 2024 at 9h05`
pub fn format_datetime(dt: NaiveDateTime) -> String {
    dt.format("%d %B %Y at %-Hh%M").to_string()
}

/// `March 2024`
pub fn format_month(month: YearMonth) -> String {
    format!("{} {}", month_name(month.month), month.year)
}

/// `3 days 04:12:00`
pub fn format_duration(d: Duration) -> String {
    let total = d.num_seconds();
    let sign = if total < 0 { "-" } else { "" };
    let total = total.abs();
    let days = total / 86_400;
    let rem = total % 86_400;
    let unit = if days == 1 { "day" } else { "days" };
    format!(
        "{sign}{days} {unit} {:02}:{:02}:{:02}",
        rem / 3600,
        (rem % 3600) / 60,
        rem % 60
    )
}

/// `1 interaction`, `2 interactions`
pub fn plural(n: usize, singular: &str) -> String {
    if n == 1 {
        format!("{n} {singular}")
    } else {
        format!("{n} {singular}s")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dates_read_naturally() {
        let dt = NaiveDate::from_ymd_opt(2024, 3, 5)
            .unwrap()
            .and_hms_opt(9, 5, 0)
            .unwrap();
        assert_eq!(format_date(dt.date()), "05 March 2024");
        assert_eq!(format_datetime(dt), "05 March 2024 at 9h05");
        assert_eq!(format_month(YearMonth::new(2023, 12)), "December 2023");
    }

    #[test]
    fn durations_include_days() {
        assert_eq!(format_duration(Duration::minutes(10)), "0 days 00:10:00");
        assert_eq!(
            format_duration(Duration::days(1) + Duration::seconds(3661)),
            "1 day 01:01:01"
        );
        assert_eq!(
            format_duration(Duration::days(3) + Duration::hours(4) + Duration::minutes(12)),
            "3 days 04:12:00"
        );
    }

    #[test]
    fn names() {
        assert_eq!(month_name(1), "January");
        assert_eq!(month_name(12), "December");
        assert_eq!(month_name(13), "?");
        assert_eq!(weekday_name(Weekday::Sun), "Sunday");
        assert_eq!(plural(1, "offer"), "1 offer");
        assert_eq!(plural(3, "offer"), "3 offers");
    }
}
