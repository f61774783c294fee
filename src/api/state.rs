//! Application state for the API server

use crate::analyzers::SnowmanCalculator;
use crate::store::SnowStore;

#[derive(Clone)]
pub struct AppState {
    pub calculator: SnowmanCalculator,
    pub version: String,
}

impl AppState {
    pub fn new(store: SnowStore) -> Self {
        Self {
            calculator: SnowmanCalculator::new(store),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}
