pub mod constants;
pub mod dates;
pub mod logging;
pub mod progress;

pub use constants::*;
pub use dates::{first_of_month, parse_date, parse_iso_date, parse_month};
pub use logging::init_logging;
pub use progress::ProgressReporter;
