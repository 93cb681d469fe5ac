pub mod day_view;
pub mod header;
pub mod layout;
pub mod month_view;
pub mod status_bar;

pub use day_view::DayView;
pub use header::Header;
pub use month_view::MonthView;
pub use status_bar::StatusBar;

const SPINNER: [&str; 8] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧"];

pub fn spinner(tick: u64) -> &'static str {
    SPINNER[(tick % SPINNER.len() as u64) as usize]
}

/// Cut `s` to at most `width` characters, marking the cut with an ellipsis.
pub fn truncate(s: &str, width: usize) -> String {
    if s.chars().count() <= width {
        return s.to_string();
    }
    if width == 0 {
        return String::new();
    }
    let mut out: String = s.chars().take(width - 1).collect();
    out.push('…');
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncate_counts_characters_not_bytes() {
        assert_eq!(truncate("2-ТП (воздух)", 20), "2-ТП (воздух)");
        assert_eq!(truncate("2-ТП (воздух)", 6), "2-ТП …");
        assert_eq!(truncate("abc", 0), "");
    }

    #[test]
    fn spinner_cycles() {
        assert_eq!(spinner(0), spinner(8));
        assert_ne!(spinner(0), spinner(1));
    }
}
