use ratatui::{
    layout::Rect,
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::app::App;
use crate::theme;

use super::spinner;

pub struct StatusBar;

impl StatusBar {
    pub fn render(frame: &mut Frame, area: Rect, app: &App) {
        let theme = theme::current();
        let w = area.width as usize;

        let left = if app.events_loading || app.tip_loading {
            format!(" {} загрузка ", spinner(app.tick))
        } else {
            let n = app.store.len();
            format!(" {} {} ", n, events_word(n))
        };

        let right = if let Some(msg) = app.status_text() {
            format!(" {} ", msg)
        } else if w >= 90 {
            " hjkl:День/неделя [/]:Месяц t:Сегодня r:Обновить J/K:Прокрутка ?:Справка q:Выход "
                .to_string()
        } else if w >= 50 {
            " [/]:Месяц t:Сегодня ?:Справка q:Выход ".to_string()
        } else {
            " ?:Справка q:Выход ".to_string()
        };

        let used = left.chars().count() + right.chars().count();
        let padding = " ".repeat(w.saturating_sub(used));

        let line = Line::from(vec![
            Span::styled(left, theme.status),
            Span::styled(padding, theme.status),
            Span::styled(right, theme.status),
        ]);
        frame.render_widget(Paragraph::new(line).style(theme.status), area);
    }
}

/// Russian plural of "событие" for `n`.
fn events_word(n: usize) -> &'static str {
    match (n % 10, n % 100) {
        (1, r) if r != 11 => "событие",
        (2..=4, r) if !(12..=14).contains(&r) => "события",
        _ => "событий",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn russian_plural_forms() {
        assert_eq!(events_word(1), "событие");
        assert_eq!(events_word(21), "событие");
        assert_eq!(events_word(11), "событий");
        assert_eq!(events_word(3), "события");
        assert_eq!(events_word(13), "событий");
        assert_eq!(events_word(0), "событий");
        assert_eq!(events_word(25), "событий");
    }
}
