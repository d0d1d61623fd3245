//! Category → series → events aggregation.
//!
//! Every fan-out is strictly sequential and emits results in nested-loop
//! order: registry category, then series within the category, then event
//! within the series. Nothing is sorted or deduplicated. A failed call is
//! recorded in the returned [`Aggregation`] and contributes no items; the
//! remaining calls still run.

use crate::api::{get_typed, KalshiApi};
use crate::categories::{ClimateCategory, CLIMATE_CATEGORIES};
use crate::error::{ApiError, ApiResult};
use crate::types::{Event, EventsResponse, Series, SeriesResponse};
use log::{debug, info, warn};
use std::fmt;

pub const DEFAULT_EVENT_STATUS: &str = "open";

/// Which fan-out call failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchScope {
    /// `/series` for a category.
    Category(String),
    /// `/events` for a series ticker.
    Series(String),
    /// `/events` without a series filter.
    Events,
}

impl fmt::Display for FetchScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FetchScope::Category(category) => write!(f, "{} series", category),
            FetchScope::Series(ticker) => write!(f, "events for series {}", ticker),
            FetchScope::Events => f.write_str("events"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FetchFailure {
    pub scope: FetchScope,
    pub error: ApiError,
}

/// Items gathered by a fan-out plus the calls that failed along the way.
#[derive(Debug, Clone, PartialEq)]
pub struct Aggregation<T> {
    pub items: Vec<T>,
    pub failures: Vec<FetchFailure>,
}

impl<T> Aggregation<T> {
    pub fn new() -> Self {
        Self {
            items: Vec::new(),
            failures: Vec::new(),
        }
    }

    /// True when no call failed. An empty but complete result is still complete.
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn into_items(self) -> Vec<T> {
        self.items
    }

    fn append(&mut self, mut other: Aggregation<T>) {
        self.items.append(&mut other.items);
        self.failures.append(&mut other.failures);
    }

    fn record(&mut self, scope: FetchScope, error: ApiError) {
        warn!("Error fetching {}: {}", scope, error);
        self.failures.push(FetchFailure { scope, error });
    }
}

impl<T> Default for Aggregation<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Climate contract queries over any [`KalshiApi`] implementation.
pub struct ClimateContracts<A> {
    api: A,
}

impl<A: KalshiApi> ClimateContracts<A> {
    pub fn new(api: A) -> Self {
        Self { api }
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    /// `/series` for one category, product metadata included.
    pub async fn fetch_series_for_category(&self, category: &str) -> ApiResult<Vec<Series>> {
        let response: SeriesResponse = get_typed(
            &self.api,
            "/series",
            &[("category", Some(category)), ("include_product_metadata", Some("true"))],
        )
        .await?;
        Ok(response.series.unwrap_or_default())
    }

    /// `/events` with nested markets, optionally filtered by series and status.
    /// Empty filters are omitted from the query.
    pub async fn fetch_events(&self, series_ticker: Option<&str>, status: Option<&str>) -> ApiResult<Vec<Event>> {
        let series_ticker = series_ticker.filter(|s| !s.is_empty());
        let status = status.filter(|s| !s.is_empty());
        let response: EventsResponse = get_typed(
            &self.api,
            "/events",
            &[
                ("series_ticker", series_ticker),
                ("status", status),
                ("with_nested_markets", Some("true")),
            ],
        )
        .await?;
        Ok(response.events.unwrap_or_default())
    }

    /// Every series of every registry category, one `/series` call per category.
    pub async fn get_climate_series(&self) -> Aggregation<Series> {
        let mut result = Aggregation::new();
        for category in CLIMATE_CATEGORIES {
            match self.fetch_series_for_category(category.as_str()).await {
                Ok(series) => {
                    debug!("{}: {} series", category, series.len());
                    result.items.extend(series);
                }
                Err(e) => result.record(FetchScope::Category(category.to_string()), e),
            }
        }
        info!(
            "Fetched {} climate series ({} failed categories)",
            result.len(),
            result.failures.len()
        );
        result
    }

    pub async fn get_climate_events(&self, series_ticker: Option<&str>, status: Option<&str>) -> Aggregation<Event> {
        let mut result = Aggregation::new();
        match self.fetch_events(series_ticker, status).await {
            Ok(events) => result.items = events,
            Err(e) => {
                let scope = match series_ticker.filter(|s| !s.is_empty()) {
                    Some(ticker) => FetchScope::Series(ticker.to_string()),
                    None => FetchScope::Events,
                };
                result.record(scope, e);
            }
        }
        result
    }

    /// Open events of every `daily_temperature` series.
    pub async fn get_daily_climate_contracts(&self) -> Aggregation<Event> {
        self.contracts_for_category(ClimateCategory::DailyTemperature.as_str(), DEFAULT_EVENT_STATUS)
            .await
    }

    /// Open events across the whole registry, category order outermost.
    pub async fn get_all_open_climate_contracts(&self) -> Aggregation<Event> {
        let mut result = Aggregation::new();
        for category in CLIMATE_CATEGORIES {
            let part = self
                .contracts_for_category(category.as_str(), DEFAULT_EVENT_STATUS)
                .await;
            result.append(part);
        }
        info!(
            "Fetched {} open climate contracts ({} failed calls)",
            result.len(),
            result.failures.len()
        );
        result
    }

    /// Events of one category with the given status, `open` when `None`.
    pub async fn get_climate_contracts_by_category(&self, category: &str, status: Option<&str>) -> Aggregation<Event> {
        self.contracts_for_category(category, status.unwrap_or(DEFAULT_EVENT_STATUS))
            .await
    }

    async fn contracts_for_category(&self, category: &str, status: &str) -> Aggregation<Event> {
        let mut result = Aggregation::new();

        let series = match self.fetch_series_for_category(category).await {
            Ok(series) => series,
            Err(e) => {
                result.record(FetchScope::Category(category.to_string()), e);
                return result;
            }
        };

        for s in &series {
            let events = self.get_climate_events(Some(s.ticker.as_str()), Some(status)).await;
            result.append(events);
        }

        debug!(
            "{}: {} series, {} {} events",
            category,
            series.len(),
            result.len(),
            status
        );
        result
    }
}
