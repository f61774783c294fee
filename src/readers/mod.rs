pub mod snow_reader;

pub use snow_reader::{AveragedRow, SnowReader, SnowTable};
