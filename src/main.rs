mod app;
mod calendar;
mod components;
mod config;
mod event;
mod gateway;
mod logging;
mod theme;
mod tui;

use std::sync::Arc;
use std::time::Duration;

use app::{App, Effect, Message};
use chrono::{Datelike, Local};
use components::header::Nav;
use color_eyre::Result;
use crossterm::event::{KeyCode, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use event::Input;
use gateway::client::GeminiClient;
use gateway::Gateway;
use ratatui::layout::Rect;
use tokio::sync::mpsc;
use tracing::info;

const TICK: Duration = Duration::from_millis(50);

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    color_eyre::install()?;

    let config = config::Config::load()?;
    let log_path = config.logging.path();
    logging::init(&log_path)?;
    theme::init(theme::Theme::from_config(&config.theme));

    let client = GeminiClient::new(&config.completion);
    let has_credential = client.has_credential();
    info!(
        model = %config.completion.model,
        anchor = %config.calendar.anchor,
        has_credential,
        "starting eco-calendar"
    );
    let gateway = Arc::new(Gateway::new(
        Box::new(client),
        config.completion.events_temperature,
    ));

    let mut app = App::new(
        config.calendar.anchor,
        Local::now().date_naive(),
        has_credential,
    );

    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = tui::restore();
        original_hook(panic_info);
    }));

    let mut terminal = tui::init()?;
    let result = run(&mut terminal, &mut app, gateway).await;
    tui::restore()?;
    eprintln!("Log written to {}", log_path.display());
    result
}

async fn run(terminal: &mut tui::Tui, app: &mut App, gateway: Arc<Gateway>) -> Result<()> {
    let (tx, mut rx) = mpsc::unbounded_channel();
    dispatch(app.start(), &gateway, &tx);

    while app.running {
        while let Ok(message) = rx.try_recv() {
            app.apply(message);
        }

        terminal.draw(|frame| draw(frame, app))?;

        while let Some(input) = event::next_input()? {
            let size = terminal.size()?;
            let area = Rect::new(0, 0, size.width, size.height);
            let effects = handle_input(app, input, area);
            dispatch(effects, &gateway, &tx);
        }

        app.on_tick();
        // Yield so in-flight fetches make progress on this thread.
        tokio::time::sleep(TICK).await;
    }

    Ok(())
}

/// Spawn one task per effect. Each task reports back through `tx` and never
/// fails: the gateway already turned errors into empty results.
fn dispatch(effects: Vec<Effect>, gateway: &Arc<Gateway>, tx: &mpsc::UnboundedSender<Message>) {
    for effect in effects {
        let gateway = Arc::clone(gateway);
        let tx = tx.clone();
        match effect {
            Effect::FetchEvents { month } => tokio::spawn(async move {
                let events = gateway
                    .fetch_monthly_events(month.year(), month.month())
                    .await
                    .unwrap_or_default();
                let _ = tx.send(Message::EventsLoaded { month, events });
            }),
            Effect::FetchTip { date } => tokio::spawn(async move {
                let key = calendar::grid::date_key(date);
                let tip = gateway.generate_daily_tip(&key).await.into_option();
                let _ = tx.send(Message::TipLoaded { date, tip });
            }),
        };
    }
}

fn draw(frame: &mut ratatui::Frame, app: &App) {
    let panes = components::layout::split(frame.area());

    components::Header::render(frame, panes.header, app.displayed_month);
    components::MonthView::render(frame, panes.grid, app);
    components::DayView::render(frame, panes.detail, app);
    components::StatusBar::render(frame, panes.status, app);

    if app.show_help {
        render_help(frame, frame.area());
    }
}

fn handle_input(app: &mut App, input: Input, area: Rect) -> Vec<Effect> {
    match input {
        Input::Key(key) => {
            // Clear status message on any key
            app.status_message = None;

            if app.show_help {
                if matches!(key.code, KeyCode::Esc | KeyCode::Char('?') | KeyCode::Char('q')) {
                    app.show_help = false;
                }
                return Vec::new();
            }
            handle_key(app, key.code, key.modifiers)
        }
        Input::Mouse(mouse) => handle_mouse(app, mouse, area),
    }
}

fn handle_key(app: &mut App, code: KeyCode, modifiers: KeyModifiers) -> Vec<Effect> {
    match (code, modifiers) {
        (KeyCode::Char('q'), _) | (KeyCode::Esc, _) | (KeyCode::Char('c'), KeyModifiers::CONTROL) => {
            app.running = false;
            Vec::new()
        }
        (KeyCode::Left, _) | (KeyCode::Char('h'), _) => app.move_selection(-1),
        (KeyCode::Right, _) | (KeyCode::Char('l'), _) => app.move_selection(1),
        (KeyCode::Up, _) | (KeyCode::Char('k'), _) => app.move_selection(-7),
        (KeyCode::Down, _) | (KeyCode::Char('j'), _) => app.move_selection(7),
        (KeyCode::Char('['), _) | (KeyCode::Char('p'), _) => app.prev_month(),
        (KeyCode::Char(']'), _) | (KeyCode::Char('n'), _) => app.next_month(),
        (KeyCode::Char('t'), _) => app.go_to_today(Local::now().date_naive()),
        (KeyCode::Char('r'), _) => app.refresh(),
        (KeyCode::Char('J'), _) | (KeyCode::PageDown, _) => {
            app.scroll_detail_down();
            Vec::new()
        }
        (KeyCode::Char('K'), _) | (KeyCode::PageUp, _) => {
            app.scroll_detail_up();
            Vec::new()
        }
        (KeyCode::Char('?'), _) => {
            app.show_help = true;
            Vec::new()
        }
        _ => Vec::new(),
    }
}

fn handle_mouse(app: &mut App, mouse: MouseEvent, area: Rect) -> Vec<Effect> {
    let panes = components::layout::split(area);
    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => {
            match components::Header::nav_at(panes.header, mouse.column, mouse.row) {
                Some(Nav::Prev) => return app.prev_month(),
                Some(Nav::Next) => return app.next_month(),
                None => {}
            }
            let cells = app.cells();
            match components::MonthView::cell_index_at(panes.grid, cells.len(), mouse.column, mouse.row) {
                Some(i) => app.select_date(cells[i].date),
                None => Vec::new(),
            }
        }
        MouseEventKind::ScrollDown => {
            app.scroll_detail_down();
            Vec::new()
        }
        MouseEventKind::ScrollUp => {
            app.scroll_detail_up();
            Vec::new()
        }
        _ => Vec::new(),
    }
}

fn render_help(frame: &mut ratatui::Frame, area: Rect) {
    use ratatui::style::{Modifier, Style};
    use ratatui::text::{Line, Span};
    use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};

    let t = theme::current();
    let popup_w = area.width.clamp(30, 50);
    let popup_h = area.height.clamp(12, 18);
    let x = area.x + (area.width.saturating_sub(popup_w)) / 2;
    let y = area.y + (area.height.saturating_sub(popup_h)) / 2;
    let popup_area = Rect::new(x, y, popup_w, popup_h).intersection(area);

    frame.render_widget(Clear, popup_area);

    let block = Block::default()
        .title(" Клавиши ")
        .title_style(t.action)
        .borders(Borders::ALL)
        .border_style(t.action);

    let inner = block.inner(popup_area);
    frame.render_widget(block, popup_area);

    let key_style = t.action;
    let section_style = Style::default().add_modifier(Modifier::BOLD | Modifier::UNDERLINED);
    let row = |keys: &'static str, desc: &'static str| {
        Line::from(vec![
            Span::styled(format!("  {:<10}", keys), key_style),
            Span::raw(desc),
        ])
    };

    let lines = vec![
        Line::from(Span::styled("Навигация", section_style)),
        row("h/l ←/→", "Предыдущий/следующий день"),
        row("j/k ↓/↑", "Следующая/предыдущая неделя"),
        row("[ ] p/n", "Предыдущий/следующий месяц"),
        row("t", "Сегодня"),
        row("мышь", "Выбрать день"),
        Line::from(""),
        Line::from(Span::styled("Действия", section_style)),
        row("r", "Обновить события и совет"),
        row("J/K PgDn", "Прокрутить панель дня"),
        Line::from(""),
        row("q / Esc", "Выход / закрыть справку"),
    ];

    let para = Paragraph::new(lines).wrap(Wrap { trim: false });
    frame.render_widget(para, inner);
}
