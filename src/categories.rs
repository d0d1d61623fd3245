use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClimateCategory {
    ClimateChange,
    DailyTemperature,
    NaturalDisasters,
    ClimateGoals,
    Hurricanes,
    SnowAndRain,
}

/// Registry order. Fan-out results are emitted in this order.
pub const CLIMATE_CATEGORIES: [ClimateCategory; 6] = [
    ClimateCategory::ClimateChange,
    ClimateCategory::DailyTemperature,
    ClimateCategory::NaturalDisasters,
    ClimateCategory::ClimateGoals,
    ClimateCategory::Hurricanes,
    ClimateCategory::SnowAndRain,
];

impl ClimateCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            ClimateCategory::ClimateChange => "climate_change",
            ClimateCategory::DailyTemperature => "daily_temperature",
            ClimateCategory::NaturalDisasters => "natural_disasters",
            ClimateCategory::ClimateGoals => "climate_goals",
            ClimateCategory::Hurricanes => "hurricanes",
            ClimateCategory::SnowAndRain => "snow_and_rain",
        }
    }

    pub fn display_name(&self) -> String {
        crate::format::format_category_name(self.as_str())
    }
}

impl fmt::Display for ClimateCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ClimateCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CLIMATE_CATEGORIES
            .iter()
            .copied()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| format!("unknown climate category: {}", s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registry_order_is_fixed() {
        let names: Vec<&str> = CLIMATE_CATEGORIES.iter().map(|c| c.as_str()).collect();
        assert_eq!(
            names,
            [
                "climate_change",
                "daily_temperature",
                "natural_disasters",
                "climate_goals",
                "hurricanes",
                "snow_and_rain"
            ]
        );
    }

    #[test]
    fn parse_round_trips_every_category() {
        for category in CLIMATE_CATEGORIES {
            assert_eq!(category.to_string().parse::<ClimateCategory>(), Ok(category));
        }
        assert!("weather".parse::<ClimateCategory>().is_err());
    }

    #[test]
    fn display_name_is_title_cased() {
        assert_eq!(ClimateCategory::SnowAndRain.display_name(), "Snow And Rain");
    }
}
