use chrono::NaiveDate;

/// The standard way of turning a day into the date segment of a storage key, `2026-10-16`.
pub fn date_to_key(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// Day label stored under `dailyContentDate`, `Fri Oct 16 2026`.
pub fn day_label(date: NaiveDate) -> String {
    date.format("%a %b %d %Y").to_string()
}

/// Date shown under the dashboard greeting, `Friday, October 16, 2026`.
pub fn long_date(date: NaiveDate) -> String {
    date.format("%A, %B %-d, %Y").to_string()
}

/// Formats remaining seconds as `MM:SS`. Minutes are not wrapped at an hour.
pub fn format_countdown(seconds: u32) -> String {
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    #[test]
    fn formats_dates() {
        let date = NaiveDate::from_ymd_opt(2026, 10, 6).unwrap();
        assert_eq!(date_to_key(date), "2026-10-06");
        assert_eq!(day_label(date), "Tue Oct 06 2026");
        assert_eq!(long_date(date), "Tuesday, October 6, 2026");
    }

    #[test]
    fn formats_countdown() {
        assert_eq!(format_countdown(25 * 60), "25:00");
        assert_eq!(format_countdown(61), "01:01");
        assert_eq!(format_countdown(0), "00:00");
    }
}
