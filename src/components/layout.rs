use ratatui::layout::{Constraint, Layout, Rect};

/// Screen regions, shared by rendering and mouse hit-testing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Panes {
    pub header: Rect,
    pub grid: Rect,
    pub detail: Rect,
    pub status: Rect,
}

pub fn split(area: Rect) -> Panes {
    let rows = Layout::vertical([
        Constraint::Length(3),
        Constraint::Min(1),
        Constraint::Length(1),
    ])
    .split(area);
    let body = rows[1];

    let (grid, detail) = if area.width >= 80 {
        let detail_w = if area.width >= 120 { 44 } else { 36 };
        let cols = Layout::horizontal([Constraint::Min(40), Constraint::Length(detail_w)]).split(body);
        (cols[0], cols[1])
    } else {
        // Narrow terminals stack the detail panel under the grid.
        let parts = Layout::vertical([Constraint::Percentage(60), Constraint::Percentage(40)]).split(body);
        (parts[0], parts[1])
    };

    Panes {
        header: rows[0],
        grid,
        detail,
        status: rows[2],
    }
}
