use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Average snow depth for one region on one day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct DailyMeasurement {
    pub date: NaiveDate,
    pub region_code: i64,
    /// Centimetres.
    pub avg_depth: f64,
}

impl DailyMeasurement {
    pub fn new(date: NaiveDate, region_code: i64, avg_depth: f64) -> Self {
        Self {
            date,
            region_code,
            avg_depth,
        }
    }

    pub fn status(&self) -> DateStatus {
        DateStatus::from_depth(self.avg_depth)
    }
}

/// Average snowfall for one region in one month.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct MonthlyMeasurement {
    /// Always the first day of the month.
    pub month: NaiveDate,
    pub region_code: i64,
    /// Centimetres.
    pub avg_snowfall: f64,
}

impl MonthlyMeasurement {
    pub fn new(month: NaiveDate, region_code: i64, avg_snowfall: f64) -> Self {
        Self {
            month,
            region_code,
            avg_snowfall,
        }
    }
}

/// Whether snow was lying on a recorded date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DateStatus {
    Zero,
    Positive,
}

impl DateStatus {
    pub fn from_depth(avg_depth: f64) -> Self {
        if avg_depth > 0.0 {
            DateStatus::Positive
        } else {
            DateStatus::Zero
        }
    }

    /// Combine two statuses recorded for the same date; positive wins.
    pub fn merge(self, other: DateStatus) -> DateStatus {
        self.max(other)
    }
}
