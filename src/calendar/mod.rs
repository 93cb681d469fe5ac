pub mod event;
pub mod grid;
pub mod locale;
pub mod store;

pub use event::{Category, DailyTip, EcoEvent};
pub use grid::CalendarCell;
pub use store::{BinKind, EventStore};
