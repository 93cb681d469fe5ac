//! Russian calendar names.

use chrono::{Datelike, NaiveDate, Weekday};

pub const WEEKDAY_SHORT: [&str; 7] = ["Пн", "Вт", "Ср", "Чт", "Пт", "Сб", "Вс"];

const MONTHS: [&str; 12] = [
    "январь", "февраль", "март", "апрель", "май", "июнь",
    "июль", "август", "сентябрь", "октябрь", "ноябрь", "декабрь",
];

const MONTHS_GENITIVE: [&str; 12] = [
    "января", "февраля", "марта", "апреля", "мая", "июня",
    "июля", "августа", "сентября", "октября", "ноября", "декабря",
];

/// Lowercase nominative month name, `month` in 1..=12.
pub fn month_name(month: u32) -> &'static str {
    month
        .checked_sub(1)
        .and_then(|i| MONTHS.get(i as usize))
        .copied()
        .unwrap_or("")
}

pub fn month_name_genitive(month: u32) -> &'static str {
    month
        .checked_sub(1)
        .and_then(|i| MONTHS_GENITIVE.get(i as usize))
        .copied()
        .unwrap_or("")
}

pub fn weekday_name(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Mon => "понедельник",
        Weekday::Tue => "вторник",
        Weekday::Wed => "среда",
        Weekday::Thu => "четверг",
        Weekday::Fri => "пятница",
        Weekday::Sat => "суббота",
        Weekday::Sun => "воскресенье",
    }
}

pub fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// "Январь 2026"
pub fn month_title(date: NaiveDate) -> String {
    format!("{} {}", capitalize(month_name(date.month())), date.year())
}

/// "1 января, четверг"
pub fn day_title(date: NaiveDate) -> String {
    format!(
        "{} {}, {}",
        date.day(),
        month_name_genitive(date.month()),
        weekday_name(date.weekday())
    )
}
