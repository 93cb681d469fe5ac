use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Reporting,
    Holiday,
    /// Also catches category strings the service invents outside the schema.
    #[serde(other)]
    Other,
}

impl Category {
    pub fn label(&self) -> &'static str {
        match self {
            Category::Reporting => "Срок сдачи отчетности",
            Category::Holiday => "Праздник / Событие",
            Category::Other => "Заметка",
        }
    }
}

/// A deadline or observance as returned by the completion service.
///
/// `date` stays the raw `YYYY-MM-DD` string from the response. Cells match it
/// against their own date key, so a malformed date never shows up anywhere.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EcoEvent {
    pub date: String,
    pub title: String,
    pub description: String,
    pub category: Category,
}

impl EcoEvent {
    pub fn is_reporting(&self) -> bool {
        self.category == Category::Reporting
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyTip {
    pub date: String,
    pub tip: String,
    #[serde(rename = "actionItem")]
    pub action_item: String,
}
