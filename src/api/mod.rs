//! Snowfall HTTP API
//!
//! ## Endpoints
//!
//! - GET /prefectures - Regions ordered by code
//! - GET /available_dates?pref_id=<code> - Recorded dates with snow status
//! - POST /calculate - Snowman size for a region and period
//! - GET /health - Liveness

pub mod dto;
pub mod error;
pub mod routes;
pub mod server;
pub mod state;

pub use dto::*;
pub use error::{ApiError, ApiResult};
pub use routes::create_router;
pub use server::{create_server, run_server};
pub use state::AppState;
