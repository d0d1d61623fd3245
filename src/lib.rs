pub mod api;
pub mod categories;
pub mod climate;
pub mod config;
pub mod error;
pub mod format;
pub mod stats;
pub mod types;

pub use api::{KalshiApi, KalshiClient};
pub use categories::{ClimateCategory, CLIMATE_CATEGORIES};
pub use climate::{Aggregation, ClimateContracts, FetchFailure, FetchScope};
pub use config::KalshiConfig;
pub use error::{ApiError, ApiResult, ClimateError, Result};
pub use stats::{compute_category_statistics, CategoryStatistics};
pub use types::{Event, Market, Series};
