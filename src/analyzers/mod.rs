pub mod calculator;
pub mod snowman;

pub use calculator::{Calculation, SnowmanCalculator};
pub use snowman::{snowman_size, SnowmanSize};
