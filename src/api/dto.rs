//! Request and response bodies

use serde::{Deserialize, Serialize};

use crate::analyzers::Calculation;

#[derive(Debug, Deserialize)]
pub struct AvailableDatesQuery {
    pub pref_id: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalculateRequest {
    pub prefecture_id: i64,
    pub target_date: String,
    pub period_type: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalculateResponse {
    pub prefecture: String,
    pub volume_m3: f64,
    pub height_m: f64,
    pub message: String,
}

impl From<Calculation> for CalculateResponse {
    fn from(calc: Calculation) -> Self {
        let message = calc.message();
        Self {
            prefecture: calc.region.name,
            volume_m3: calc.size.volume_m3,
            height_m: calc.size.height_m,
            message,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}
