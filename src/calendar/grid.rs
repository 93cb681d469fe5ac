//! Month grid arithmetic.
//!
//! Weeks start on Monday. A grid always covers whole weeks, so it spans the
//! displayed month plus the leading and trailing days of its first and last week.

use chrono::{Datelike, Days, Months, NaiveDate};

/// The production year this calendar is published for. Today's date is only
/// highlighted inside it.
pub const CALENDAR_YEAR: i32 = 2026;

/// A derived view of one grid position. Rebuilt on every render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarCell {
    pub date: NaiveDate,
    pub key: String,
    pub in_month: bool,
    pub selected: bool,
    pub today: bool,
}

pub fn date_key(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

pub fn first_of_month(date: NaiveDate) -> NaiveDate {
    date - Days::new(u64::from(date.day0()))
}

pub fn days_in_month(year: i32, month: u32) -> u32 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        _ if is_leap_year(year) => 29,
        _ => 28,
    }
}

fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

/// Shift by whole months, clamping the day to the target month's length.
pub fn add_months(date: NaiveDate, months: i32) -> NaiveDate {
    let shifted = if months >= 0 {
        date.checked_add_months(Months::new(months.unsigned_abs()))
    } else {
        date.checked_sub_months(Months::new(months.unsigned_abs()))
    };
    shifted.unwrap_or(date)
}

pub fn last_of_month(date: NaiveDate) -> NaiveDate {
    let first = first_of_month(date);
    first + Days::new(u64::from(days_in_month(first.year(), first.month()) - 1))
}

pub fn same_month(a: NaiveDate, b: NaiveDate) -> bool {
    a.year() == b.year() && a.month() == b.month()
}

/// Every date from the Monday on/before the 1st to the Sunday on/after the
/// last day of `anchor`'s month, inclusive.
pub fn month_grid(anchor: NaiveDate) -> Vec<NaiveDate> {
    let first = first_of_month(anchor);
    let last = last_of_month(anchor);
    let start = first - Days::new(u64::from(first.weekday().num_days_from_monday()));
    let end = last + Days::new(u64::from(6 - last.weekday().num_days_from_monday()));

    start.iter_days().take_while(|d| *d <= end).collect()
}

pub fn cells(anchor: NaiveDate, selected: NaiveDate, today: NaiveDate) -> Vec<CalendarCell> {
    month_grid(anchor)
        .into_iter()
        .map(|date| CalendarCell {
            key: date_key(date),
            in_month: same_month(date, anchor),
            selected: date == selected,
            today: date == today && date.year() == CALENDAR_YEAR,
            date,
        })
        .collect()
}

/// Whether `date` is one of the cells of `anchor`'s grid.
pub fn grid_contains(anchor: NaiveDate, date: NaiveDate) -> bool {
    let grid = month_grid(anchor);
    match (grid.first(), grid.last()) {
        (Some(start), Some(end)) => *start <= date && date <= *end,
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Weekday;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn grid_is_whole_weeks_covering_the_month() {
        for year in [2024, 2025, 2026, 2027] {
            for month in 1..=12 {
                let anchor = ymd(year, month, 15);
                let grid = month_grid(anchor);

                assert_eq!(grid.len() % 7, 0, "{year}-{month}");
                assert!((28..=42).contains(&grid.len()));
                assert_eq!(grid[0].weekday(), Weekday::Mon);
                assert_eq!(grid[grid.len() - 1].weekday(), Weekday::Sun);
                for day in 1..=days_in_month(year, month) {
                    assert!(grid.contains(&ymd(year, month, day)));
                }
                assert!(grid.windows(2).all(|w| w[1] == w[0].succ_opt().unwrap()));
            }
        }
    }

    #[test]
    fn january_2026_starts_on_the_previous_monday() {
        // 2026-01-01 is a Thursday.
        let grid = month_grid(ymd(2026, 1, 1));
        assert_eq!(grid[0], ymd(2025, 12, 29));
        assert_eq!(*grid.last().unwrap(), ymd(2026, 2, 1));
        assert_eq!(grid.len(), 35);
    }

    #[test]
    fn month_starting_on_monday_has_no_leading_days() {
        // February 2021: Monday the 1st, 28 days.
        let grid = month_grid(ymd(2021, 2, 10));
        assert_eq!(grid.len(), 28);
        assert_eq!(grid[0], ymd(2021, 2, 1));
    }

    #[test]
    fn six_week_month() {
        // March 2026 starts on Sunday and has 31 days.
        assert_eq!(month_grid(ymd(2026, 3, 1)).len(), 42);
    }

    #[test]
    fn add_months_clamps_day() {
        assert_eq!(add_months(ymd(2026, 1, 31), 1), ymd(2026, 2, 28));
        assert_eq!(add_months(ymd(2024, 1, 31), 1), ymd(2024, 2, 29));
        assert_eq!(add_months(ymd(2026, 1, 1), -1), ymd(2025, 12, 1));
        assert_eq!(add_months(ymd(2026, 12, 5), 1), ymd(2027, 1, 5));
    }

    #[test]
    fn cells_flag_month_selection_and_today() {
        let anchor = ymd(2026, 1, 1);
        let cells = cells(anchor, ymd(2026, 1, 5), ymd(2026, 1, 7));

        assert!(!cells[0].in_month);
        assert_eq!(cells[0].key, "2025-12-29");
        assert_eq!(cells.iter().filter(|c| c.selected).count(), 1);
        assert_eq!(cells.iter().filter(|c| c.today).count(), 1);
        assert_eq!(cells.iter().filter(|c| c.in_month).count(), 31);
    }

    #[test]
    fn today_outside_the_calendar_year_is_not_highlighted() {
        let cells = cells(ymd(2025, 12, 1), ymd(2025, 12, 1), ymd(2025, 12, 10));
        assert!(cells.iter().all(|c| !c.today));

        // A January 2026 grid still marks today when it is one of its 2026 days.
        let cells = cells_in_january(ymd(2026, 1, 2));
        assert_eq!(cells.iter().filter(|c| c.today).count(), 1);
        // The December 2025 fill days of that grid are not.
        let cells = cells_in_january(ymd(2025, 12, 30));
        assert!(cells.iter().all(|c| !c.today));
    }

    fn cells_in_january(today: NaiveDate) -> Vec<CalendarCell> {
        cells(ymd(2026, 1, 1), ymd(2026, 1, 1), today)
    }

    #[test]
    fn grid_contains_fill_days() {
        let anchor = ymd(2026, 1, 1);
        assert!(grid_contains(anchor, ymd(2025, 12, 29)));
        assert!(grid_contains(anchor, ymd(2026, 2, 1)));
        assert!(!grid_contains(anchor, ymd(2026, 2, 2)));
    }
}
