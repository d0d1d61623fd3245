#![allow(dead_code)]

use async_trait::async_trait;
use kalshi_climate::{ApiError, ApiResult, KalshiApi};
use parking_lot::Mutex;
use serde_json::{json, Value};
use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Call {
    pub endpoint: String,
    pub params: Vec<(String, String)>,
}

impl Call {
    pub fn param(&self, key: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

/// Scripted [`KalshiApi`]: `/series` answers are keyed by category, `/events`
/// answers by series ticker. Unscripted keys answer with an empty list.
#[derive(Default)]
pub struct RecordingApi {
    calls: Mutex<Vec<Call>>,
    series: Mutex<HashMap<String, ApiResult<Value>>>,
    events: Mutex<HashMap<String, ApiResult<Value>>>,
}

impl RecordingApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_series(self, category: &str, tickers: &[&str]) -> Self {
        let series: Vec<Value> = tickers
            .iter()
            .map(|t| json!({"ticker": t, "title": format!("{} series", t), "category": category}))
            .collect();
        self.series.lock().insert(category.to_string(), Ok(json!({ "series": series })));
        self
    }

    pub fn with_series_error(self, category: &str, error: ApiError) -> Self {
        self.series.lock().insert(category.to_string(), Err(error));
        self
    }

    pub fn with_series_payload(self, category: &str, payload: Value) -> Self {
        self.series.lock().insert(category.to_string(), Ok(payload));
        self
    }

    pub fn with_events(self, series_ticker: &str, ids: &[&str]) -> Self {
        let events: Vec<Value> = ids
            .iter()
            .map(|id| json!({"id": id, "ticker": id, "series_ticker": series_ticker, "title": format!("Event {}", id)}))
            .collect();
        self.events.lock().insert(series_ticker.to_string(), Ok(json!({ "events": events })));
        self
    }

    pub fn with_events_payload(self, series_ticker: &str, payload: Value) -> Self {
        self.events.lock().insert(series_ticker.to_string(), Ok(payload));
        self
    }

    pub fn with_events_error(self, series_ticker: &str, error: ApiError) -> Self {
        self.events.lock().insert(series_ticker.to_string(), Err(error));
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().clone()
    }

    pub fn calls_to(&self, endpoint: &str) -> Vec<Call> {
        self.calls().into_iter().filter(|c| c.endpoint == endpoint).collect()
    }
}

#[async_trait]
impl KalshiApi for RecordingApi {
    async fn get_value(&self, endpoint: &str, params: &[(&str, Option<&str>)]) -> ApiResult<Value> {
        let call = Call {
            endpoint: endpoint.to_string(),
            params: params
                .iter()
                .filter_map(|(k, v)| v.map(|v| (k.to_string(), v.to_string())))
                .collect(),
        };
        self.calls.lock().push(call.clone());

        match endpoint {
            "/series" => {
                let key = call.param("category").unwrap_or_default();
                self.series
                    .lock()
                    .get(key)
                    .cloned()
                    .unwrap_or_else(|| Ok(json!({ "series": [] })))
            }
            "/events" => {
                let key = call.param("series_ticker").unwrap_or_default();
                self.events
                    .lock()
                    .get(key)
                    .cloned()
                    .unwrap_or_else(|| Ok(json!({ "events": [] })))
            }
            other => Err(ApiError::new(format!("no route for {}", other), "404")),
        }
    }

    async fn post_value(&self, endpoint: &str, _body: &Value) -> ApiResult<Value> {
        Err(ApiError::new(format!("no route for {}", endpoint), "404"))
    }
}

pub fn pairs(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}
