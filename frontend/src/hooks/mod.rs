pub mod use_activate;
pub mod use_calendar;
pub mod use_schedule;
