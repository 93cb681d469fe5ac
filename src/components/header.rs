use ratatui::{
    layout::{Alignment, Position, Rect},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::calendar::locale::month_title;
use crate::theme;

const NAV: &str = "[◀  ▶] ";
/// Columns from the right edge covered by each arrow button.
const PREV_COLS: std::ops::RangeInclusive<u16> = 5..=7;
const NEXT_COLS: std::ops::RangeInclusive<u16> = 2..=4;

/// Month-navigation arrow under the cursor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Nav {
    Prev,
    Next,
}

pub struct Header;

impl Header {
    pub fn render(frame: &mut Frame, area: Rect, displayed_month: chrono::NaiveDate) {
        let theme = theme::current();

        let lines = vec![
            Line::from(""),
            Line::from(vec![
                Span::styled(" ▣ ", theme.action.patch(theme.subtitle)),
                Span::styled(month_title(displayed_month), theme.header),
                Span::styled("  ПРОИЗВОДСТВЕННЫЙ КАЛЕНДАРЬ ЭКОЛОГА", theme.subtitle),
            ]),
            Line::from(""),
        ];
        frame.render_widget(Paragraph::new(lines).style(theme.subtitle), area);

        if let Some(row) = nav_row(area) {
            let nav = Paragraph::new(Line::from(Span::styled(NAV, theme.header)))
                .alignment(Alignment::Right);
            frame.render_widget(nav, row);
        }
    }

    /// Which arrow, if any, sits at a terminal position.
    pub fn nav_at(area: Rect, column: u16, row: u16) -> Option<Nav> {
        let nav = nav_row(area)?;
        if !nav.contains(Position::new(column, row)) {
            return None;
        }
        let from_right = nav.right() - column;
        if PREV_COLS.contains(&from_right) {
            Some(Nav::Prev)
        } else if NEXT_COLS.contains(&from_right) {
            Some(Nav::Next)
        } else {
            None
        }
    }
}

/// The header row carrying the arrows, when the header is wide enough for them.
fn nav_row(area: Rect) -> Option<Rect> {
    (area.width >= 70 && area.height >= 2).then(|| Rect::new(area.x, area.y + 1, area.width, 1))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn arrows_are_hit_tested_from_the_right_edge() {
        let area = Rect::new(0, 0, 130, 3);
        // "[◀  ▶] " occupies columns 123..=129.
        assert_eq!(Header::nav_at(area, 123, 1), Some(Nav::Prev));
        assert_eq!(Header::nav_at(area, 124, 1), Some(Nav::Prev));
        assert_eq!(Header::nav_at(area, 127, 1), Some(Nav::Next));
        assert_eq!(Header::nav_at(area, 129, 1), None);
        assert_eq!(Header::nav_at(area, 124, 0), None);
        assert_eq!(Header::nav_at(area, 10, 1), None);
    }

    #[test]
    fn narrow_header_has_no_arrows() {
        assert_eq!(Header::nav_at(Rect::new(0, 0, 60, 3), 55, 1), None);
    }
}
