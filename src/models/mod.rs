pub mod measurement;
pub mod period;
pub mod region;

pub use measurement::{DailyMeasurement, DateStatus, MonthlyMeasurement};
pub use period::PeriodType;
pub use region::{Region, RegionCodeTable};
