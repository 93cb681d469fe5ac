use chrono::Datelike;
use ratatui::{
    layout::{Alignment, Position, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::app::App;
use crate::calendar::locale::WEEKDAY_SHORT;
use crate::calendar::{BinKind, CalendarCell, EventStore};
use crate::theme;

use super::{spinner, truncate};

/// Grid position that shows the spinner while the month's events load.
const LOADING_CELL: usize = 10;

pub struct MonthView;

impl MonthView {
    pub fn render(frame: &mut Frame, area: Rect, app: &App) {
        let theme = theme::current();
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(theme.border);
        let inner = block.inner(area);
        frame.render_widget(block, area);

        if inner.width < 14 || inner.height < 2 {
            return;
        }

        let col_w = inner.width / 7;
        let header: Vec<Span> = WEEKDAY_SHORT
            .iter()
            .enumerate()
            .map(|(i, name)| {
                let style = if i >= 5 { theme.weekend } else { theme.weekday };
                Span::styled(format!("{:^w$}", name, w = col_w as usize), style)
            })
            .collect();
        frame.render_widget(
            Paragraph::new(Line::from(header)),
            Rect::new(inner.x, inner.y, inner.width, 1),
        );

        let cells = app.cells();
        for (i, rect) in cell_rects(area, cells.len()).into_iter().enumerate() {
            if let Some(cell) = cells.get(i) {
                let loading = app.events_loading && cell.in_month && i == LOADING_CELL;
                render_cell(frame, rect, cell, &app.store, loading, app.tick);
            }
        }
    }

    /// Index into the grid cells under a terminal position, if any.
    pub fn cell_index_at(area: Rect, cell_count: usize, column: u16, row: u16) -> Option<usize> {
        cell_rects(area, cell_count)
            .iter()
            .position(|r| r.contains(Position::new(column, row)))
    }
}

/// Screen rectangles of the day cells for a grid drawn into `area`.
pub fn cell_rects(area: Rect, cell_count: usize) -> Vec<Rect> {
    let inner = Block::default().borders(Borders::ALL).inner(area);
    let body = Rect::new(
        inner.x,
        inner.y.saturating_add(1),
        inner.width,
        inner.height.saturating_sub(1),
    );
    if body.is_empty() {
        return Vec::new();
    }

    let weeks = (cell_count / 7).max(1) as u16;
    let row_h = (body.height / weeks).max(1);
    let col_w = (body.width / 7).max(1);

    (0..cell_count)
        .map(|i| {
            let r = (i / 7) as u16;
            let c = (i % 7) as u16;
            Rect::new(
                body.x.saturating_add(c * col_w),
                body.y.saturating_add(r * row_h),
                col_w,
                row_h,
            )
            .intersection(body)
        })
        .collect()
}

fn render_cell(
    frame: &mut Frame,
    rect: Rect,
    cell: &CalendarCell,
    store: &EventStore,
    loading: bool,
    tick: u64,
) {
    if rect.is_empty() {
        return;
    }
    let theme = theme::current();
    // Leave a column between neighbouring cells.
    let text_w = rect.width.saturating_sub(1) as usize;
    let bin = store.bin(cell.date);

    let number_style = if cell.selected {
        theme.selected
    } else if cell.today {
        theme.today
    } else if !cell.in_month {
        theme.dim
    } else if bin.kind == BinKind::Reporting {
        theme.reporting_day
    } else {
        theme.day
    };

    let room = rect.height.saturating_sub(1) as usize;
    let title_rows = bin.shown.len().min(room);
    let overflow_row = bin.overflow && room > title_rows;
    let hidden = title_rows < bin.shown.len() || (bin.overflow && !overflow_row);

    let mut number = vec![Span::styled(format!("{:>2}", cell.date.day()), number_style)];
    if hidden && !loading {
        number.push(Span::styled("*", theme.dim));
    }
    let mut lines = vec![Line::from(number)];

    if loading {
        if room > 0 {
            lines.push(Line::from(Span::styled(spinner(tick), theme.dim)).alignment(Alignment::Center));
        }
    } else {
        for ev in bin.shown.iter().take(title_rows) {
            let style = if cell.in_month {
                theme.category(ev.category)
            } else {
                theme.dim
            };
            lines.push(Line::from(Span::styled(truncate(&ev.title, text_w), style)));
        }
        if overflow_row {
            lines.push(
                Line::from(Span::styled("•••", theme.dim.add_modifier(Modifier::BOLD)))
                    .alignment(Alignment::Center),
            );
        }
    }

    let mut para = Paragraph::new(lines);
    if cell.selected {
        para = para.style(Style::default().add_modifier(Modifier::UNDERLINED));
    }
    frame.render_widget(para, Rect::new(rect.x, rect.y, text_w.max(1) as u16, rect.height));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cells_tile_the_grid_body() {
        let area = Rect::new(0, 0, 72, 32);
        let rects = cell_rects(area, 35);
        assert_eq!(rects.len(), 35);
        // Border + weekday header row.
        assert_eq!(rects[0], Rect::new(1, 2, 10, 5));
        assert_eq!(rects[8], Rect::new(11, 7, 10, 5));
    }

    #[test]
    fn hit_testing_finds_the_cell_under_the_cursor() {
        let area = Rect::new(0, 3, 72, 32);
        assert_eq!(MonthView::cell_index_at(area, 35, 1, 5), Some(0));
        assert_eq!(MonthView::cell_index_at(area, 35, 25, 11), Some(9));
        // Weekday header and border are not cells.
        assert_eq!(MonthView::cell_index_at(area, 35, 5, 4), None);
        assert_eq!(MonthView::cell_index_at(area, 35, 0, 10), None);
    }

    #[test]
    fn tiny_area_has_no_cells() {
        assert!(cell_rects(Rect::new(0, 0, 2, 2), 35).is_empty());
    }
}
