use thiserror::Error;

pub type Result<T> = std::result::Result<T, SnowmanError>;

#[derive(Error, Debug)]
pub enum SnowmanError {
    #[error("File I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV parsing error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Configuration error: {0}")]
    ConfigLoad(#[from] config::ConfigError),

    #[error("Validation error: {0}")]
    Validation(#[from] validator::ValidationErrors),

    #[error("Unknown region '{name}': no code registered for this name")]
    UnknownRegion { name: String },

    #[error("Invalid date: '{0}'")]
    InvalidDate(String),

    #[error("Region {code} not found")]
    RegionNotFound { code: i64 },

    #[error("No {period} data for {region} at {date}")]
    DataNotFound {
        region: String,
        period: &'static str,
        date: String,
    },

    #[error("Invalid period type: '{0}' (expected day, month or year)")]
    InvalidPeriod(String),

    #[error("Import of {region} failed: {message}")]
    ImportFailed { region: String, message: String },

    #[error("Unsupported text encoding: {0}")]
    Encoding(String),

    #[error("Invalid data format: {0}")]
    InvalidFormat(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

impl SnowmanError {
    /// Wrap any error raised while importing `region` as an import failure.
    pub fn import_failed(region: &str, err: impl std::fmt::Display) -> Self {
        SnowmanError::ImportFailed {
            region: region.to_string(),
            message: err.to_string(),
        }
    }
}
