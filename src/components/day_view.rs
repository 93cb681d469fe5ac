use chrono::Datelike;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use crate::app::App;
use crate::calendar::locale::{capitalize, day_title};
use crate::calendar::{DailyTip, EcoEvent};
use crate::theme;

use super::spinner;

/// The right-hand panel: the selected day's events and the expert tip.
pub struct DayView;

impl DayView {
    pub fn render(frame: &mut Frame, area: Rect, app: &App) {
        let theme = theme::current();
        let date = app.selected_date;

        let block = Block::default()
            .title(format!(" {} ", date.year()))
            .title_style(theme.dim)
            .borders(Borders::ALL)
            .border_style(theme.border);
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let width = inner.width as usize;
        let section = Style::default().add_modifier(Modifier::BOLD);

        let mut lines: Vec<Line> = vec![
            Line::from(Span::styled(
                capitalize(&day_title(date)),
                theme.day.add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            Line::from(Span::styled("СОБЫТИЯ И ДЕДЛАЙНЫ", section.patch(theme.dim))),
            Line::from(""),
        ];

        let events = app.selected_events();
        if app.events_loading {
            lines.push(Line::from(Span::styled(
                format!("{} Загрузка событий…", spinner(app.tick)),
                theme.dim,
            )));
        } else if events.is_empty() {
            lines.push(Line::from(Span::styled(
                "На этот день нет отчетности и праздников",
                theme.dim,
            )));
        } else {
            for ev in events {
                lines.extend(event_lines(ev));
            }
        }

        lines.push(Line::from(""));
        let mut tip_header = vec![Span::styled("✦ Совет эксперта", theme.action)];
        if app.tip_loading {
            tip_header.push(Span::styled(format!(" {}", spinner(app.tick)), theme.dim));
        }
        lines.push(Line::from(tip_header));
        lines.push(Line::from(Span::styled("─".repeat(width), theme.border)));

        if app.tip_loading {
            lines.extend(skeleton(width));
        } else if let Some(tip) = &app.tip {
            lines.extend(tip_lines(tip));
        } else {
            lines.push(Line::from(Span::styled("Совет недоступен", theme.dim)));
        }

        let para = Paragraph::new(lines)
            .wrap(Wrap { trim: false })
            .scroll((app.detail_scroll, 0));
        frame.render_widget(para, inner);
    }
}

fn event_lines(ev: &EcoEvent) -> Vec<Line<'static>> {
    let theme = theme::current();
    let style = theme.category(ev.category);
    let mut lines = vec![
        Line::from(Span::styled(format!("▌{}", ev.category.label().to_uppercase()), style)),
        Line::from(Span::styled(ev.title.clone(), style.add_modifier(Modifier::BOLD))),
    ];
    if !ev.description.is_empty() {
        lines.push(Line::from(ev.description.clone()));
    }
    lines.push(Line::from(""));
    lines
}

fn tip_lines(tip: &DailyTip) -> Vec<Line<'static>> {
    let theme = theme::current();
    vec![
        Line::from(Span::styled(format!("«{}»", tip.tip), theme.tip)),
        Line::from(""),
        Line::from(Span::styled("☑ ДЕЙСТВИЕ", theme.action)),
        Line::from(tip.action_item.clone()),
    ]
}

/// Placeholder bars shown while the tip loads.
fn skeleton(width: usize) -> Vec<Line<'static>> {
    let dim = theme::current().dim;
    [width * 3 / 4, width, width * 5 / 6]
        .into_iter()
        .map(|w| Line::from(Span::styled("░".repeat(w), dim)))
        .collect()
}
