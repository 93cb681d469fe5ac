use chrono::NaiveDate;

use super::event::EcoEvent;
use super::grid::{date_key, first_of_month, grid_contains};

/// Most titles a single grid cell lists before falling back to the overflow marker.
pub const MAX_SHOWN: usize = 2;

/// Events for the displayed month, in the order the service returned them.
#[derive(Debug, Clone, Default)]
pub struct EventStore {
    month: Option<NaiveDate>,
    events: Vec<EcoEvent>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinKind {
    Reporting,
    NonReporting,
}

/// What a grid cell shows for one day.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayBin<'a> {
    pub kind: BinKind,
    pub shown: Vec<&'a EcoEvent>,
    pub overflow: bool,
}

impl DayBin<'_> {
    pub fn is_empty(&self) -> bool {
        self.shown.is_empty()
    }
}

impl EventStore {
    pub fn month(&self) -> Option<NaiveDate> {
        self.month
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Replace everything with the events fetched for `month`. Events dated
    /// outside that month's grid, or not dated `YYYY-MM-DD` at all, are dropped.
    pub fn replace(&mut self, month: NaiveDate, events: Vec<EcoEvent>) {
        let month = first_of_month(month);
        self.month = Some(month);
        self.events = events
            .into_iter()
            .filter(|e| {
                NaiveDate::parse_from_str(&e.date, "%Y-%m-%d")
                    .is_ok_and(|d| grid_contains(month, d))
            })
            .collect();
    }

    pub fn clear(&mut self) {
        self.month = None;
        self.events.clear();
    }

    pub fn for_date(&self, date: NaiveDate) -> Vec<&EcoEvent> {
        let key = date_key(date);
        self.events.iter().filter(|e| e.date == key).collect()
    }

    /// Reporting deadlines win the cell. Holidays and notes are listed only on
    /// days without any reporting event. The marker is set whenever some event
    /// of the day is not listed, including non-reporting ones hidden behind a
    /// deadline.
    pub fn bin(&self, date: NaiveDate) -> DayBin<'_> {
        let day_events = self.for_date(date);
        let reporting: Vec<&EcoEvent> = day_events
            .iter()
            .copied()
            .filter(|e| e.is_reporting())
            .collect();

        let (kind, pool) = if reporting.is_empty() {
            (BinKind::NonReporting, day_events.clone())
        } else {
            (BinKind::Reporting, reporting)
        };

        let shown: Vec<&EcoEvent> = pool.into_iter().take(MAX_SHOWN).collect();
        let overflow = day_events.len() > shown.len();

        DayBin {
            kind,
            shown,
            overflow,
        }
    }
}
