//! Date helpers shared by the schedule view, the date picker and the calendar.
//!
//! All user-facing strings are Russian; dates travel to the backend as ISO
//! `YYYY-MM-DD`.

use chrono::{Datelike, NaiveDate, Weekday};

const WEEKDAYS: [&str; 7] = [
    "Понедельник",
    "Вторник",
    "Среда",
    "Четверг",
    "Пятница",
    "Суббота",
    "Воскресенье",
];

const MONTHS: [&str; 12] = [
    "Январь", "Февраль", "Март", "Апрель", "Май", "Июнь",
    "Июль", "Август", "Сентябрь", "Октябрь", "Ноябрь", "Декабрь",
];

const MONTHS_GENITIVE: [&str; 12] = [
    "января", "февраля", "марта", "апреля", "мая", "июня",
    "июля", "августа", "сентября", "октября", "ноября", "декабря",
];

/// Capitalized weekday name, e.g. "Пятница"
pub fn weekday_name(weekday: Weekday) -> &'static str {
    WEEKDAYS[weekday.num_days_from_monday() as usize]
}

/// Month name in the nominative case (1-based month), e.g. "Март"
pub fn month_name(month: u32) -> &'static str {
    MONTHS
        .get(month.wrapping_sub(1) as usize)
        .copied()
        .unwrap_or(MONTHS[0])
}

/// Fallback schedule header, e.g. "Пятница 15.03.2024"
pub fn format_day_label(date: NaiveDate) -> String {
    format!("{} {}", weekday_name(date.weekday()), date.format("%d.%m.%Y"))
}

/// Today line in the page header, e.g. "Пятница, 15.03.2024"
pub fn format_today_label(date: NaiveDate) -> String {
    format!("{}, {}", weekday_name(date.weekday()), date.format("%d.%m.%Y"))
}

/// Long form used in calendar aria labels, e.g. "15 марта 2024 (пятница)"
pub fn format_readable(date: NaiveDate) -> String {
    format!(
        "{} {} {} ({})",
        date.day(),
        MONTHS_GENITIVE[date.month0() as usize],
        date.year(),
        weekday_name(date.weekday()).to_lowercase()
    )
}

/// ISO form used in URLs
pub fn to_iso(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Parse a `YYYY-MM-DD` string
pub fn parse_iso(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").ok()
}

pub fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || (year % 400 == 0)
}

/// Get days in a month (accounting for leap years)
pub fn days_in_month(year: i32, month: u32) -> u32 {
    match month {
        2 => {
            if is_leap_year(year) { 29 } else { 28 }
        }
        4 | 6 | 9 | 11 => 30,
        _ => 31,
    }
}

/// Build a date from picker wheels; a day past the month end clamps to the
/// last day of that month.
pub fn clamped_date(year: i32, month: u32, day: u32) -> Option<NaiveDate> {
    if !(1..=12).contains(&month) || day == 0 {
        return None;
    }
    let day = day.min(days_in_month(year, month));
    NaiveDate::from_ymd_opt(year, month, day)
}

/// Mon-Fri
pub fn is_weekday(date: NaiveDate) -> bool {
    date.weekday().num_days_from_monday() < 5
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_labels() {
        let friday = date(2024, 3, 15);
        assert_eq!(format_day_label(friday), "Пятница 15.03.2024");
        assert_eq!(format_today_label(friday), "Пятница, 15.03.2024");
        assert_eq!(format_readable(friday), "15 марта 2024 (пятница)");
        assert_eq!(month_name(3), "Март");
        assert_eq!(month_name(13), "Январь");
    }

    #[test]
    fn test_iso_round_trip() {
        assert_eq!(to_iso(date(2024, 1, 5)), "2024-01-05");
        assert_eq!(parse_iso("2024-01-05"), Some(date(2024, 1, 5)));
        assert_eq!(parse_iso("2024-02-30"), None);
        assert_eq!(parse_iso("tomorrow"), None);
    }

    #[test]
    fn test_clamped_date() {
        assert_eq!(clamped_date(2024, 2, 31), Some(date(2024, 2, 29)));
        assert_eq!(clamped_date(2023, 2, 31), Some(date(2023, 2, 28)));
        assert_eq!(clamped_date(2024, 4, 31), Some(date(2024, 4, 30)));
        assert_eq!(clamped_date(2024, 13, 1), None);
        assert_eq!(clamped_date(2024, 1, 0), None);
    }

    #[test]
    fn test_weekdays() {
        assert!(is_weekday(date(2024, 3, 15)));
        assert!(!is_weekday(date(2024, 3, 16)));
        assert!(!is_weekday(date(2024, 3, 17)));
        assert!(is_leap_year(2000));
        assert!(!is_leap_year(1900));
    }
}
