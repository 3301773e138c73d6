//! Month grid for the calendar page.
//!
//! Pure date arithmetic; the calendar never talks to the backend. Days link
//! back to the schedule page through `/?date=YYYY-MM-DD`.

use crate::dates::{days_in_month, format_readable, is_weekday, month_name, to_iso};
use chrono::{Datelike, Duration, NaiveDate};

/// 6 weeks × 7 days
pub const GRID_CELLS: usize = 42;

pub const WEEKDAY_HEADERS: [&str; 7] = ["Пн", "Вт", "Ср", "Чт", "Пт", "Сб", "Вс"];

/// Link to the schedule page for a given date
pub fn schedule_href(date: NaiveDate) -> String {
    format!("/?date={}", to_iso(date))
}

/// Month currently shown by the calendar
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthCursor {
    pub year: i32,
    /// 1-based
    pub month: u32,
}

impl MonthCursor {
    pub fn containing(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    pub fn previous(self) -> Self {
        if self.month == 1 {
            Self { year: self.year - 1, month: 12 }
        } else {
            Self { month: self.month - 1, ..self }
        }
    }

    pub fn next(self) -> Self {
        if self.month == 12 {
            Self { year: self.year + 1, month: 1 }
        } else {
            Self { month: self.month + 1, ..self }
        }
    }

    /// e.g. "Март 2024"
    pub fn title(self) -> String {
        format!("{} {}", month_name(self.month), self.year)
    }

    fn first_day(self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month, 1)
    }
}

/// Type of calendar cell for explicit rendering logic
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CalendarDayType {
    /// Inert cell before the first day of the month
    PaddingBefore,
    /// Actual day within the month
    MonthDay,
    /// Inert cell filling the grid after the last day
    PaddingAfter,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CalendarDay {
    pub day_type: CalendarDayType,
    /// `None` for padding cells
    pub date: Option<NaiveDate>,
    pub is_today: bool,
    /// Mon-Fri; classes are never scheduled on weekends
    pub has_schedule: bool,
}

impl CalendarDay {
    fn padding(day_type: CalendarDayType) -> Self {
        Self {
            day_type,
            date: None,
            is_today: false,
            has_schedule: false,
        }
    }

    pub fn href(&self) -> Option<String> {
        self.date.map(schedule_href)
    }

    pub fn aria_label(&self) -> Option<String> {
        self.date.map(|date| format!("Расписание на {}", format_readable(date)))
    }

    pub fn css_class(&self) -> String {
        let mut class = String::from("calendar-day");
        if self.day_type != CalendarDayType::MonthDay {
            class.push_str(" other-month");
        }
        if self.is_today {
            class.push_str(" today");
        }
        if self.has_schedule {
            class.push_str(" has-schedule");
        }
        class
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CalendarMonth {
    pub cursor: MonthCursor,
    /// Always [`GRID_CELLS`] entries, Monday first
    pub days: Vec<CalendarDay>,
}

impl CalendarMonth {
    /// Generate the grid for `cursor`, marking `today` if it falls inside
    pub fn generate(cursor: MonthCursor, today: NaiveDate) -> Self {
        let mut days = Vec::with_capacity(GRID_CELLS);

        let Some(first) = cursor.first_day() else {
            days.resize(GRID_CELLS, CalendarDay::padding(CalendarDayType::PaddingBefore));
            return Self { cursor, days };
        };

        let leading = first.weekday().num_days_from_monday() as usize;
        days.extend((0..leading).map(|_| CalendarDay::padding(CalendarDayType::PaddingBefore)));

        for day in 1..=days_in_month(cursor.year, cursor.month) {
            let Some(date) = NaiveDate::from_ymd_opt(cursor.year, cursor.month, day) else {
                continue;
            };
            days.push(CalendarDay {
                day_type: CalendarDayType::MonthDay,
                date: Some(date),
                is_today: date == today,
                has_schedule: is_weekday(date),
            });
        }

        while days.len() < GRID_CELLS {
            days.push(CalendarDay::padding(CalendarDayType::PaddingAfter));
        }

        Self { cursor, days }
    }
}

/// Shortcut links shown under the grid
#[derive(Debug, Clone, PartialEq)]
pub struct QuickLinks {
    pub tomorrow: NaiveDate,
    /// Monday of the current week
    pub this_week: NaiveDate,
    /// Monday of the next week
    pub next_week: NaiveDate,
}

impl QuickLinks {
    pub fn for_today(today: NaiveDate) -> Self {
        let monday = today - Duration::days(i64::from(today.weekday().num_days_from_monday()));
        Self {
            tomorrow: today + Duration::days(1),
            this_week: monday,
            next_week: monday + Duration::days(7),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScheduleLink {
    pub href: String,
    pub text: String,
    pub date: NaiveDate,
}

/// Links to every weekday in the `days` days starting at `today`
pub fn upcoming_weekday_links(today: NaiveDate, days: u32) -> Vec<ScheduleLink> {
    (0..i64::from(days))
        .map(|offset| today + Duration::days(offset))
        .filter(|date| is_weekday(*date))
        .map(|date| ScheduleLink {
            href: schedule_href(date),
            text: format!("Расписание на {}", format_readable(date)),
            date,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn month_days(month: &CalendarMonth) -> impl Iterator<Item = &CalendarDay> {
        month
            .days
            .iter()
            .filter(|day| day.day_type == CalendarDayType::MonthDay)
    }

    #[test]
    fn test_grid_layout_for_march_2024() {
        // 1 March 2024 is a Friday
        let month = CalendarMonth::generate(MonthCursor { year: 2024, month: 3 }, date(2024, 3, 15));

        assert_eq!(month.days.len(), GRID_CELLS);
        assert!(month.days[..4]
            .iter()
            .all(|d| d.day_type == CalendarDayType::PaddingBefore && d.href().is_none()));
        assert_eq!(month.days[4].date, Some(date(2024, 3, 1)));
        assert_eq!(month_days(&month).count(), 31);
        assert!(month.days[35..]
            .iter()
            .all(|d| d.day_type == CalendarDayType::PaddingAfter));

        let today: Vec<_> = month.days.iter().filter(|d| d.is_today).collect();
        assert_eq!(today.len(), 1);
        assert_eq!(today[0].href().as_deref(), Some("/?date=2024-03-15"));
    }

    #[test]
    fn test_weekends_have_no_schedule() {
        let month = CalendarMonth::generate(MonthCursor { year: 2024, month: 3 }, date(2000, 1, 1));
        for day in month_days(&month) {
            let weekday = day.date.unwrap().weekday().num_days_from_monday();
            assert_eq!(day.has_schedule, weekday < 5);
        }
        assert!(month.days.iter().all(|d| !d.is_today));
    }

    #[test]
    fn test_month_starting_on_monday_has_no_leading_padding() {
        // 1 April 2024 is a Monday
        let month = CalendarMonth::generate(MonthCursor { year: 2024, month: 4 }, date(2024, 4, 1));
        assert_eq!(month.days[0].date, Some(date(2024, 4, 1)));
        assert_eq!(month.days.len(), GRID_CELLS);
    }

    #[test]
    fn test_cursor_navigation_wraps_years() {
        let january = MonthCursor { year: 2024, month: 1 };
        assert_eq!(january.previous(), MonthCursor { year: 2023, month: 12 });
        assert_eq!(january.previous().next(), january);
        assert_eq!(MonthCursor { year: 2024, month: 12 }.next().title(), "Январь 2025");
    }

    #[test]
    fn test_day_presentation() {
        let month = CalendarMonth::generate(MonthCursor { year: 2024, month: 3 }, date(2024, 3, 15));
        let friday = month_days(&month).find(|d| d.is_today).unwrap();
        assert_eq!(friday.css_class(), "calendar-day today has-schedule");
        assert_eq!(
            friday.aria_label().as_deref(),
            Some("Расписание на 15 марта 2024 (пятница)")
        );
        assert_eq!(month.days[0].css_class(), "calendar-day other-month");
    }

    #[test]
    fn test_quick_links() {
        // Sunday
        let links = QuickLinks::for_today(date(2024, 3, 17));
        assert_eq!(links.tomorrow, date(2024, 3, 18));
        assert_eq!(links.this_week, date(2024, 3, 11));
        assert_eq!(links.next_week, date(2024, 3, 18));
    }

    #[test]
    fn test_upcoming_weekday_links() {
        let links = upcoming_weekday_links(date(2024, 3, 15), 7);
        let dates: Vec<_> = links.iter().map(|l| l.date.day()).collect();
        assert_eq!(dates, vec![15, 18, 19, 20, 21]);
        assert_eq!(links[0].href, "/?date=2024-03-15");
    }
}
