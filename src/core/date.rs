use chrono::{Datelike, Duration, NaiveDate, Weekday};

/// Canonical date-key format used for event marks and "is today" checks.
/// Keys are `YYYY-MM-DD`; anything else is treated as unparseable.
const DATE_KEY_FORMAT: &str = "%Y-%m-%d";

/// First calendar day of the month containing `date`.
pub fn start_of_month(date: NaiveDate) -> NaiveDate {
    NaiveDate::from_ymd_opt(date.year(), date.month(), 1).unwrap_or(date)
}

/// Last calendar day of the month containing `date`.
pub fn end_of_month(date: NaiveDate) -> NaiveDate {
    let first = start_of_month(date);
    first
        .checked_add_months(chrono::Months::new(1))
        .and_then(|d| d.pred_opt())
        .unwrap_or(date)
}

/// Weekday index remapped so Monday=0 .. Sunday=6.
fn monday_offset(weekday: Weekday) -> usize {
    match weekday {
        Weekday::Mon => 0,
        Weekday::Tue => 1,
        Weekday::Wed => 2,
        Weekday::Thu => 3,
        Weekday::Fri => 4,
        Weekday::Sat => 5,
        Weekday::Sun => 6,
    }
}

/// Build the Monday-first week matrix for the month containing `date`.
///
/// Leading slots before the 1st and trailing slots after the last day are
/// `None`; every day of the month appears exactly once, in order.
pub fn month_matrix(date: NaiveDate) -> Vec<[Option<NaiveDate>; 7]> {
    let first = start_of_month(date);
    let last = end_of_month(date);

    let lead = monday_offset(first.weekday());
    let days_in_month = last.day() as usize;

    let mut cells: Vec<Option<NaiveDate>> = vec![None; lead];
    for offset in 0..days_in_month {
        cells.push(Some(first + Duration::days(offset as i64)));
    }
    while cells.len() % 7 != 0 {
        cells.push(None);
    }

    cells
        .chunks_exact(7)
        .map(|week| {
            let mut row = [None; 7];
            row.copy_from_slice(week);
            row
        })
        .collect()
}

/// Encode a date as its canonical key.
pub fn date_key(date: NaiveDate) -> String {
    date.format(DATE_KEY_FORMAT).to_string()
}

/// Decode a canonical key back to a date. Returns `None` for any other
/// format, including `DD-MM-YYYY` keys from older data.
pub fn parse_date_key(key: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(key, DATE_KEY_FORMAT).ok()
}
