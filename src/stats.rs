use crate::format::current_price;
use crate::types::Event;
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::Serialize;

/// Summary of one batch of events, recomputed from scratch for every fetch.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryStatistics {
    pub total_events: usize,
    pub total_markets: usize,
    /// Mean current price over markets that have one; 0 when none do.
    pub average_price: f64,
    /// Largest `volume_24h`; 0 when no market reports one.
    pub highest_volume: f64,
    /// Raw `settlement_date` of the earliest event settling after now.
    pub nearest_settlement: Option<String>,
}

impl Default for CategoryStatistics {
    fn default() -> Self {
        Self {
            total_events: 0,
            total_markets: 0,
            average_price: 0.0,
            highest_volume: 0.0,
            nearest_settlement: None,
        }
    }
}

pub fn compute_category_statistics(events: &[Event]) -> CategoryStatistics {
    compute_category_statistics_at(events, Utc::now())
}

/// Same as [`compute_category_statistics`] with an explicit notion of "now".
pub fn compute_category_statistics_at(events: &[Event], now: DateTime<Utc>) -> CategoryStatistics {
    let mut total_markets = 0;
    let mut price_sum = 0.0;
    let mut price_count = 0usize;
    let mut highest_volume = 0.0_f64;
    let mut nearest: Option<(DateTime<Utc>, &str)> = None;

    for event in events {
        let markets = event.markets();
        total_markets += markets.len();

        for market in markets {
            if let Some(price) = current_price(market) {
                price_sum += price;
                price_count += 1;
            }
            if let Some(volume) = market.volume_24h {
                if volume > highest_volume {
                    highest_volume = volume;
                }
            }
        }

        if let Some(date) = parse_settlement_date(&event.settlement_date) {
            // Strict comparison: on equal dates the first event seen wins.
            let closer = match nearest {
                Some((best, _)) => date < best,
                None => true,
            };
            if date > now && closer {
                nearest = Some((date, event.settlement_date.as_str()));
            }
        }
    }

    CategoryStatistics {
        total_events: events.len(),
        total_markets,
        average_price: if price_count > 0 {
            price_sum / price_count as f64
        } else {
            0.0
        },
        highest_volume,
        nearest_settlement: nearest.map(|(_, raw)| raw.to_string()),
    }
}

/// Accepts RFC 3339 timestamps, bare `YYYY-MM-DD` dates (midnight UTC) and
/// zone-less `YYYY-MM-DDTHH:MM:SS` timestamps (read as UTC).
pub fn parse_settlement_date(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return date.and_hms_opt(0, 0, 0).map(|dt| dt.and_utc());
    }
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .map(|dt| dt.and_utc())
}
