//! SQLite schema definition

/// Created on every connect; existing tables are left untouched.
pub const SCHEMA_SQL: &str = r#"
-- Regions: externally coded geographic areas
CREATE TABLE IF NOT EXISTS regions (
    code INTEGER PRIMARY KEY,
    name TEXT NOT NULL UNIQUE,
    area REAL NOT NULL
);

-- Daily average snow depth (cm)
CREATE TABLE IF NOT EXISTS daily_snow (
    date TEXT NOT NULL,
    region_code INTEGER NOT NULL REFERENCES regions(code),
    avg_depth REAL NOT NULL DEFAULT 0.0,
    PRIMARY KEY (date, region_code)
);

-- Monthly average snowfall (cm), keyed by the first day of the month
CREATE TABLE IF NOT EXISTS monthly_snow (
    month TEXT NOT NULL,
    region_code INTEGER NOT NULL REFERENCES regions(code),
    avg_snowfall REAL NOT NULL DEFAULT 0.0,
    PRIMARY KEY (month, region_code)
);

CREATE INDEX IF NOT EXISTS idx_daily_region ON daily_snow(region_code);
CREATE INDEX IF NOT EXISTS idx_monthly_region ON monthly_snow(region_code);
"#;
