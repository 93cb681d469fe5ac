//! Completion-service gateway.
//!
//! Both calls treat the response body as untrusted: transport failures, error
//! statuses, empty bodies and bodies that do not parse into the expected shape
//! are logged and collapse to [`Fetched::Empty`]. Parsed field values are used
//! as-is.

pub mod client;
pub mod error;
pub mod prompt;

use serde::de::DeserializeOwned;
use tracing::{info, warn};

use crate::calendar::{DailyTip, EcoEvent};
use client::{CompletionClient, CompletionRequest};
use error::{GatewayError, GatewayResult};

/// Outcome of a gateway call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Fetched<T> {
    Payload(T),
    Empty,
}

impl<T> Fetched<T> {
    pub fn into_option(self) -> Option<T> {
        match self {
            Fetched::Payload(value) => Some(value),
            Fetched::Empty => None,
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Fetched::Empty)
    }
}

impl<T: Default> Fetched<T> {
    pub fn unwrap_or_default(self) -> T {
        self.into_option().unwrap_or_default()
    }
}

impl<T> From<GatewayResult<T>> for Fetched<T> {
    fn from(result: GatewayResult<T>) -> Self {
        match result {
            Ok(value) => Fetched::Payload(value),
            Err(_) => Fetched::Empty,
        }
    }
}

pub struct Gateway {
    client: Box<dyn CompletionClient>,
    events_temperature: f32,
}

impl Gateway {
    pub fn new(client: Box<dyn CompletionClient>, events_temperature: f32) -> Self {
        Self {
            client,
            events_temperature,
        }
    }

    /// Deadlines and observances for `month` (1..=12) of `year`.
    pub async fn fetch_monthly_events(&self, year: i32, month: u32) -> Fetched<Vec<EcoEvent>> {
        let request = CompletionRequest {
            prompt: prompt::monthly_events_prompt(year, month),
            schema: prompt::events_schema(),
            temperature: Some(self.events_temperature),
        };

        let result = self.call::<Vec<EcoEvent>>(&request).await;
        match &result {
            Ok(events) => info!(year, month, count = events.len(), "monthly events loaded"),
            Err(e) => warn!(year, month, error = %e, "monthly events unavailable"),
        }
        result.into()
    }

    /// An expert tip for the day identified by `date_key` (`YYYY-MM-DD`).
    pub async fn generate_daily_tip(&self, date_key: &str) -> Fetched<DailyTip> {
        let request = CompletionRequest {
            prompt: prompt::daily_tip_prompt(date_key),
            schema: prompt::tip_schema(),
            temperature: None,
        };

        let result = self.call::<DailyTip>(&request).await;
        match &result {
            Ok(_) => info!(date = date_key, "daily tip loaded"),
            Err(e) => warn!(date = date_key, error = %e, "daily tip unavailable"),
        }
        result.into()
    }

    async fn call<T: DeserializeOwned>(&self, request: &CompletionRequest) -> GatewayResult<T> {
        let text = self.client.complete(request).await?;
        let text = text.trim();
        if text.is_empty() {
            return Err(GatewayError::EmptyBody);
        }
        Ok(serde_json::from_str(text)?)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use async_trait::async_trait;

    use super::*;
    use crate::calendar::Category;

    enum Reply {
        Text(&'static str),
        Status(u16),
        Missing,
    }

    struct FakeClient {
        reply: Reply,
        seen: Mutex<Vec<CompletionRequest>>,
    }

    impl FakeClient {
        fn new(reply: Reply) -> Self {
            Self {
                reply,
                seen: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl CompletionClient for FakeClient {
        async fn complete(&self, request: &CompletionRequest) -> GatewayResult<String> {
            self.seen.lock().unwrap().push(request.clone());
            match &self.reply {
                Reply::Text(text) => Ok(text.to_string()),
                Reply::Status(status) => Err(GatewayError::Status {
                    status: *status,
                    body: "quota exceeded".to_string(),
                }),
                Reply::Missing => Err(GatewayError::MissingCredential),
            }
        }
    }

    fn gateway(reply: Reply) -> Gateway {
        Gateway::new(Box::new(FakeClient::new(reply)), 0.2)
    }

    #[tokio::test]
    async fn parses_monthly_events() {
        let gw = gateway(Reply::Text(
            r#"[
                {"date":"2026-01-10","title":"Отчет о ПЭК","description":"Росприроднадзор","category":"reporting"},
                {"date":"2026-01-11","title":"День заповедников","description":"","category":"holiday"}
            ]"#,
        ));

        let events = gw.fetch_monthly_events(2026, 1).await.unwrap_or_default();
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].category, Category::Reporting);
        assert_eq!(events[1].title, "День заповедников");
    }

    #[tokio::test]
    async fn empty_array_is_a_payload_but_incomplete_tip_is_not() {
        let gw = gateway(Reply::Text("[]"));
        assert_eq!(gw.fetch_monthly_events(2026, 3).await, Fetched::Payload(vec![]));

        let tip_gw = gateway(Reply::Text("{}"));
        assert!(tip_gw.generate_daily_tip("2026-03-01").await.is_empty());
    }

    #[tokio::test]
    async fn transport_level_failure_degrades_to_empty() {
        let gw = gateway(Reply::Status(429));
        assert_eq!(gw.fetch_monthly_events(2026, 1).await, Fetched::Empty);

        let gw = gateway(Reply::Missing);
        assert_eq!(gw.generate_daily_tip("2026-01-01").await, Fetched::Empty);
    }

    #[tokio::test]
    async fn unparsable_body_degrades_to_empty() {
        let gw = gateway(Reply::Text("Конечно! Вот ваш календарь:"));
        assert!(gw.fetch_monthly_events(2026, 1).await.unwrap_or_default().is_empty());

        let gw = gateway(Reply::Text(r#"{"date":"2026-01-01","title":"no array"}"#));
        assert_eq!(gw.fetch_monthly_events(2026, 1).await, Fetched::Empty);
    }

    #[tokio::test]
    async fn empty_body_yields_no_tip() {
        let gw = gateway(Reply::Text("   \n"));
        assert_eq!(gw.generate_daily_tip("2026-01-01").await.into_option(), None);
    }

    #[tokio::test]
    async fn parses_daily_tip() {
        let gw = gateway(Reply::Text(
            r#"{"date":"2026-01-01","tip":"Проверьте срок действия ЭЦП.","actionItem":"Зайти в ЛКП"}"#,
        ));

        let tip = gw.generate_daily_tip("2026-01-01").await.into_option().unwrap();
        assert_eq!(tip.action_item, "Зайти в ЛКП");
    }

    #[tokio::test]
    async fn prompts_and_temperatures_reach_the_client() {
        let client = std::sync::Arc::new(FakeClient::new(Reply::Text("[]")));
        let gw = Gateway::new(Box::new(SharedClient(client.clone())), 0.2);

        gw.fetch_monthly_events(2026, 2).await;
        gw.generate_daily_tip("2026-02-09").await;

        let seen = client.seen.lock().unwrap();
        assert_eq!(seen.len(), 2);
        assert!(seen[0].prompt.contains("февраль 2026"));
        assert_eq!(seen[0].temperature, Some(0.2));
        assert_eq!(seen[0].schema["type"], "ARRAY");
        assert!(seen[1].prompt.contains("2026-02-09"));
        assert_eq!(seen[1].temperature, None);
        assert_eq!(seen[1].schema["type"], "OBJECT");
    }

    struct SharedClient(std::sync::Arc<FakeClient>);

    #[async_trait]
    impl CompletionClient for SharedClient {
        async fn complete(&self, request: &CompletionRequest) -> GatewayResult<String> {
            self.0.complete(request).await
        }
    }
}
