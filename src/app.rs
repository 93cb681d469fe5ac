use chrono::{Datelike, Days, NaiveDate};
use tracing::debug;

use crate::calendar::grid::{self, add_months, first_of_month, grid_contains, same_month};
use crate::calendar::locale;
use crate::calendar::{CalendarCell, DailyTip, EcoEvent, EventStore};

const NO_CREDENTIAL: &str = "API-ключ не задан: укажите GEMINI_API_KEY или API_KEY";

/// Work the UI loop must start on behalf of a state transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    FetchEvents { month: NaiveDate },
    FetchTip { date: NaiveDate },
}

/// Completed gateway work, tagged with what it was requested for.
#[derive(Debug, Clone, PartialEq)]
pub enum Message {
    EventsLoaded {
        month: NaiveDate,
        events: Vec<EcoEvent>,
    },
    TipLoaded {
        date: NaiveDate,
        tip: Option<DailyTip>,
    },
}

pub struct App {
    pub running: bool,
    /// First day of the month shown in the grid.
    pub displayed_month: NaiveDate,
    pub selected_date: NaiveDate,
    pub today: NaiveDate,
    pub store: EventStore,
    pub events_loading: bool,
    pub tip: Option<DailyTip>,
    pub tip_loading: bool,
    pub detail_scroll: u16,
    pub show_help: bool,
    pub status_message: Option<String>,
    pub has_credential: bool,
    pub tick: u64,
}

impl App {
    pub fn new(anchor: NaiveDate, today: NaiveDate, has_credential: bool) -> Self {
        Self {
            running: true,
            displayed_month: first_of_month(anchor),
            selected_date: anchor,
            today,
            store: EventStore::default(),
            events_loading: false,
            tip: None,
            tip_loading: false,
            detail_scroll: 0,
            show_help: false,
            status_message: None,
            has_credential,
            tick: 0,
        }
    }

    pub fn start(&mut self) -> Vec<Effect> {
        vec![self.begin_events_fetch(), self.begin_tip_fetch()]
    }

    /// Text for the status bar. Without an API key every fetch comes back
    /// empty, so the missing key is reported instead of "no data".
    pub fn status_text(&self) -> Option<&str> {
        self.status_message
            .as_deref()
            .or((!self.has_credential).then_some(NO_CREDENTIAL))
    }

    pub fn next_month(&mut self) -> Vec<Effect> {
        self.show_month(add_months(self.displayed_month, 1))
    }

    pub fn prev_month(&mut self) -> Vec<Effect> {
        self.show_month(add_months(self.displayed_month, -1))
    }

    fn show_month(&mut self, month: NaiveDate) -> Vec<Effect> {
        self.displayed_month = first_of_month(month);
        vec![self.begin_events_fetch()]
    }

    /// Selection changes never wait on in-flight fetches.
    pub fn select_date(&mut self, date: NaiveDate) -> Vec<Effect> {
        if date == self.selected_date {
            return Vec::new();
        }
        self.selected_date = date;
        vec![self.begin_tip_fetch()]
    }

    /// Move the selection by `days` within the displayed grid. A selection that
    /// is not on the grid (the month was changed under it) jumps to the 1st.
    pub fn move_selection(&mut self, days: i64) -> Vec<Effect> {
        if !grid_contains(self.displayed_month, self.selected_date) {
            return self.select_date(self.displayed_month);
        }

        let target = if days >= 0 {
            self.selected_date.checked_add_days(Days::new(days.unsigned_abs()))
        } else {
            self.selected_date.checked_sub_days(Days::new(days.unsigned_abs()))
        };

        match target {
            Some(date) if grid_contains(self.displayed_month, date) => self.select_date(date),
            _ => Vec::new(),
        }
    }

    pub fn go_to_today(&mut self, today: NaiveDate) -> Vec<Effect> {
        self.today = today;
        let mut effects = Vec::new();
        if !same_month(self.displayed_month, today) {
            effects.extend(self.show_month(today));
        }
        effects.extend(self.select_date(today));
        effects
    }

    pub fn refresh(&mut self) -> Vec<Effect> {
        self.status_message = Some("Обновление…".to_string());
        vec![self.begin_events_fetch(), self.begin_tip_fetch()]
    }

    /// Old events are dropped before the new month's fetch resolves.
    fn begin_events_fetch(&mut self) -> Effect {
        self.store.clear();
        self.events_loading = true;
        Effect::FetchEvents {
            month: self.displayed_month,
        }
    }

    fn begin_tip_fetch(&mut self) -> Effect {
        self.tip = None;
        self.tip_loading = true;
        self.detail_scroll = 0;
        Effect::FetchTip {
            date: self.selected_date,
        }
    }

    /// Apply a finished fetch. Responses for a month or date that is no longer
    /// current are discarded.
    pub fn apply(&mut self, message: Message) {
        match message {
            Message::EventsLoaded { month, events } => {
                if month != self.displayed_month {
                    debug!(%month, displayed = %self.displayed_month, "dropping stale events");
                    return;
                }
                self.store.replace(month, events);
                self.events_loading = false;
                self.status_message = if self.store.is_empty() && self.has_credential {
                    Some(format!(
                        "Нет данных за {} {}",
                        locale::month_name(month.month()),
                        month.year()
                    ))
                } else {
                    None
                };
            }
            Message::TipLoaded { date, tip } => {
                if date != self.selected_date {
                    debug!(%date, selected = %self.selected_date, "dropping stale tip");
                    return;
                }
                self.tip = tip;
                self.tip_loading = false;
            }
        }
    }

    pub fn cells(&self) -> Vec<CalendarCell> {
        grid::cells(self.displayed_month, self.selected_date, self.today)
    }

    pub fn selected_events(&self) -> Vec<&EcoEvent> {
        self.store.for_date(self.selected_date)
    }

    pub fn scroll_detail_down(&mut self) {
        self.detail_scroll = self.detail_scroll.saturating_add(1);
    }

    pub fn scroll_detail_up(&mut self) {
        self.detail_scroll = self.detail_scroll.saturating_sub(1);
    }

    pub fn on_tick(&mut self) {
        self.tick = self.tick.wrapping_add(1);
    }
}
