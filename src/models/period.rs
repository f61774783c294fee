use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::SnowmanError;

/// Granularity a calculation request targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PeriodType {
    Day,
    Month,
    Year,
}

impl PeriodType {
    pub fn as_str(&self) -> &'static str {
        match self {
            PeriodType::Day => "day",
            PeriodType::Month => "month",
            PeriodType::Year => "year",
        }
    }
}

impl FromStr for PeriodType {
    type Err = SnowmanError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "day" => Ok(PeriodType::Day),
            "month" => Ok(PeriodType::Month),
            "year" => Ok(PeriodType::Year),
            _ => Err(SnowmanError::InvalidPeriod(s.to_string())),
        }
    }
}

impl std::fmt::Display for PeriodType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_period_from_str() {
        assert_eq!("day".parse::<PeriodType>().unwrap(), PeriodType::Day);
        assert_eq!("Month".parse::<PeriodType>().unwrap(), PeriodType::Month);
        assert_eq!(" year ".parse::<PeriodType>().unwrap(), PeriodType::Year);
    }

    #[test]
    fn test_unknown_period_is_rejected() {
        assert!(matches!(
            "week".parse::<PeriodType>(),
            Err(SnowmanError::InvalidPeriod(ref p)) if p == "week"
        ));
        assert!("".parse::<PeriodType>().is_err());
    }
}
