use serde::{Deserialize, Deserializer, Serialize};

/// Decode `null` the same as a missing key.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Settlement value as reported by the API: either free text or a number.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SettlementValue {
    Number(f64),
    Text(String),
}

/// A recurring product grouping, e.g. "daily high temperature in NYC".
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Series {
    #[serde(deserialize_with = "null_as_default")]
    pub ticker: String,
    #[serde(deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(deserialize_with = "null_as_default")]
    pub category: String,
    #[serde(deserialize_with = "null_as_default")]
    pub settlement_sources: Vec<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub settlement_date: String,
    #[serde(deserialize_with = "null_as_default")]
    pub settlement_value_type: String,
    pub settlement_value: Option<SettlementValue>,
    #[serde(deserialize_with = "null_as_default")]
    pub status: String,
    #[serde(deserialize_with = "null_as_default")]
    pub created_time: String,
    #[serde(deserialize_with = "null_as_default")]
    pub last_updated_time: String,
}

/// One tradeable occurrence of a series, optionally with its markets nested.
///
/// `series_ticker` points back at the producing series; nothing checks it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Event {
    #[serde(deserialize_with = "null_as_default")]
    pub id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub ticker: String,
    #[serde(deserialize_with = "null_as_default")]
    pub series_ticker: String,
    #[serde(deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(deserialize_with = "null_as_default")]
    pub subtitle: String,
    #[serde(deserialize_with = "null_as_default")]
    pub description: String,
    #[serde(deserialize_with = "null_as_default")]
    pub category: String,
    #[serde(deserialize_with = "null_as_default")]
    pub settlement_sources: Vec<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub settlement_date: String,
    #[serde(deserialize_with = "null_as_default")]
    pub settlement_value_type: String,
    pub settlement_value: Option<SettlementValue>,
    #[serde(deserialize_with = "null_as_default")]
    pub status: String,
    #[serde(deserialize_with = "null_as_default")]
    pub created_time: String,
    #[serde(deserialize_with = "null_as_default")]
    pub last_updated_time: String,
    pub markets: Option<Vec<Market>>,
}

impl Event {
    pub fn markets(&self) -> &[Market] {
        self.markets.as_deref().unwrap_or(&[])
    }

    pub fn market_count(&self) -> usize {
        self.markets().len()
    }
}

/// A single binary-outcome instrument. Prices are probabilities in `0..=1`;
/// a missing number means unknown, never zero.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Market {
    #[serde(deserialize_with = "null_as_default")]
    pub ticker: String,
    #[serde(deserialize_with = "null_as_default")]
    pub event_ticker: String,
    #[serde(deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(deserialize_with = "null_as_default")]
    pub subtitle: String,
    pub settlement_value: Option<SettlementValue>,
    #[serde(deserialize_with = "null_as_default")]
    pub status: String,
    #[serde(deserialize_with = "null_as_default")]
    pub open_time: String,
    #[serde(deserialize_with = "null_as_default")]
    pub close_time: String,
    #[serde(deserialize_with = "null_as_default")]
    pub expiration_time: String,
    pub settlement_time: Option<String>,
    pub yes_bid: Option<f64>,
    pub yes_ask: Option<f64>,
    pub no_bid: Option<f64>,
    pub no_ask: Option<f64>,
    pub last_price: Option<f64>,
    pub previous_price: Option<f64>,
    pub volume: Option<f64>,
    pub volume_24h: Option<f64>,
    pub liquidity: Option<f64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SeriesResponse {
    #[serde(default)]
    pub series: Option<Vec<Series>>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EventsResponse {
    #[serde(default)]
    pub events: Option<Vec<Event>>,
}
