//! Display helpers shared by the dashboard renderers.

use crate::stats::parse_settlement_date;
use crate::types::{Event, Market};
use std::collections::HashMap;
use std::convert::Infallible;
use std::str::FromStr;

pub const NOT_AVAILABLE: &str = "N/A";

/// Probability as a whole percentage, `"75%"`.
pub fn format_price(price: Option<f64>) -> String {
    match price {
        // `+ 0.0` folds a rounded -0 into 0
        Some(p) => format!("{:.0}%", (p * 100.0).round() + 0.0),
        None => NOT_AVAILABLE.to_string(),
    }
}

/// `"Apr 11, 2025"`, or `"Invalid Date"` when the input does not parse.
pub fn format_date(raw: &str) -> String {
    match parse_settlement_date(raw) {
        Some(dt) => dt.format("%b %-d, %Y").to_string(),
        None => "Invalid Date".to_string(),
    }
}

/// Last traded price, falling back to the yes ask.
pub fn current_price(market: &Market) -> Option<f64> {
    market.last_price.or(market.yes_ask)
}

pub fn price_change(market: &Market) -> Option<f64> {
    match (market.last_price, market.previous_price) {
        (Some(last), Some(previous)) => Some(last - previous),
        _ => None,
    }
}

/// Relative change against the previous price, `"+50.00%"` / `"-20.00%"`.
pub fn price_change_percentage(market: &Market) -> String {
    let (change, previous) = match (price_change(market), market.previous_price) {
        (Some(change), Some(previous)) if previous != 0.0 => (change, previous),
        _ => return NOT_AVAILABLE.to_string(),
    };
    let percentage = change / previous * 100.0;
    let sign = if percentage > 0.0 { "+" } else { "" };
    format!("{}{:.2}%", sign, percentage)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PriceTrend {
    Up,
    Down,
    Unknown,
}

/// A flat price counts as `Up`.
pub fn price_trend(market: &Market) -> PriceTrend {
    match price_change(market) {
        Some(change) if change >= 0.0 => PriceTrend::Up,
        Some(_) => PriceTrend::Down,
        None => PriceTrend::Unknown,
    }
}

pub fn group_events_by_category(events: &[Event]) -> HashMap<String, Vec<Event>> {
    let mut grouped: HashMap<String, Vec<Event>> = HashMap::new();
    for event in events {
        grouped
            .entry(event.category.clone())
            .or_default()
            .push(event.clone());
    }
    grouped
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CategoryFilter {
    All,
    Only(String),
}

impl FromStr for CategoryFilter {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() || s.eq_ignore_ascii_case("all") {
            Ok(CategoryFilter::All)
        } else {
            Ok(CategoryFilter::Only(s.to_string()))
        }
    }
}

pub fn filter_events_by_category<'a>(events: &'a [Event], filter: &CategoryFilter) -> Vec<&'a Event> {
    match filter {
        CategoryFilter::All => events.iter().collect(),
        CategoryFilter::Only(category) => events.iter().filter(|e| &e.category == category).collect(),
    }
}

/// `"daily_temperature"` → `"Daily Temperature"`.
pub fn format_category_name(category: &str) -> String {
    category
        .split('_')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}

/// Whole-dollar volume with thousands separators; `"N/A"` for zero.
pub fn format_volume(volume: f64) -> String {
    if volume <= 0.0 {
        return NOT_AVAILABLE.to_string();
    }
    let digits = format!("{:.0}", volume.round());
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    format!("${}", out)
}
