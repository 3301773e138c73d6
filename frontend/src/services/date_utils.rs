use chrono::NaiveDate;

/// Today's date in the browser's local time zone
pub fn today() -> NaiveDate {
    use js_sys::Date;
    let now = Date::new_0();
    let year = now.get_full_year() as i32;
    let month = now.get_month() + 1; // JavaScript months are 0-indexed
    let day = now.get_date();

    NaiveDate::from_ymd_opt(year, month, day).unwrap_or_default()
}

/// Milliseconds since the epoch, for activation debouncing
pub fn now_ms() -> f64 {
    js_sys::Date::now()
}
