use chrono::NaiveDate;

/// Today's date in the browser's local timezone
pub fn today() -> NaiveDate {
    use js_sys::Date;
    let now = Date::new_0();
    NaiveDate::from_ymd_opt(
        now.get_full_year() as i32,
        now.get_month() + 1, // JavaScript months are 0-indexed
        now.get_date(),
    )
    .expect("browser clock yields a valid date")
}

/// Format a date for display (e.g., "June 15, 2024")
pub fn format_date_for_display(date: NaiveDate) -> String {
    use chrono::Datelike;
    format!("{} {}, {}", month_name(date.month()), date.day(), date.year())
}

pub fn month_name(month: u32) -> &'static str {
    match month {
        1 => "January", 2 => "February", 3 => "March", 4 => "April",
        5 => "May", 6 => "June", 7 => "July", 8 => "August",
        9 => "September", 10 => "October", 11 => "November", 12 => "December",
        _ => "January",
    }
}
