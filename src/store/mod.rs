//! Snowfall storage using SQLite
//!
//! Three tables: regions, daily snow depth and monthly snowfall. Measurement
//! rows are keyed by (date, region code) and written with explicit
//! insert-or-overwrite statements, so re-importing a file replaces rather
//! than duplicates.

mod schema;

pub use schema::SCHEMA_SQL;

use chrono::NaiveDate;
use sqlx::sqlite::{
    SqliteConnectOptions, SqliteConnection, SqliteJournalMode, SqlitePool, SqlitePoolOptions,
    SqliteSynchronous,
};
use sqlx::{Sqlite, Transaction};
use std::path::Path;
use tracing::{debug, info};

use crate::config::DatabaseConfig;
use crate::error::Result;
use crate::models::{DailyMeasurement, MonthlyMeasurement, Region};

/// Snowfall database handle
#[derive(Clone)]
pub struct SnowStore {
    pool: SqlitePool,
}

impl SnowStore {
    /// Open (creating if needed) the database file and ensure the schema exists.
    pub async fn connect(path: &Path, max_connections: u32) -> Result<Self> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let options = SqliteConnectOptions::new()
            .filename(path)
            .create_if_missing(true)
            .foreign_keys(true)
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Normal);

        debug!("Connecting to SQLite database at {:?}", path);

        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections)
            .connect_with(options)
            .await?;

        let store = Self { pool };
        store.init_schema().await?;
        Ok(store)
    }

    pub async fn from_config(config: &DatabaseConfig) -> Result<Self> {
        Self::connect(&config.path, config.max_connections).await
    }

    pub async fn init_schema(&self) -> Result<()> {
        info!("Initializing database schema");
        sqlx::raw_sql(SCHEMA_SQL).execute(&self.pool).await?;
        Ok(())
    }

    /// Start a write transaction; dropped without `commit` it rolls back.
    pub async fn begin(&self) -> Result<Transaction<'static, Sqlite>> {
        Ok(self.pool.begin().await?)
    }

    pub async fn close(&self) {
        self.pool.close().await;
    }

    // ===== Region Operations =====

    pub async fn find_region(conn: &mut SqliteConnection, code: i64) -> Result<Option<Region>> {
        let region =
            sqlx::query_as::<_, Region>("SELECT code, name, area FROM regions WHERE code = ?")
                .bind(code)
                .fetch_optional(conn)
                .await?;
        Ok(region)
    }

    pub async fn insert_region(conn: &mut SqliteConnection, region: &Region) -> Result<()> {
        sqlx::query("INSERT INTO regions (code, name, area) VALUES (?, ?, ?)")
            .bind(region.code)
            .bind(&region.name)
            .bind(region.area)
            .execute(conn)
            .await?;
        Ok(())
    }

    pub async fn update_region_area(
        conn: &mut SqliteConnection,
        code: i64,
        area: f64,
    ) -> Result<()> {
        sqlx::query("UPDATE regions SET area = ? WHERE code = ?")
            .bind(area)
            .bind(code)
            .execute(conn)
            .await?;
        Ok(())
    }

    pub async fn get_region(&self, code: i64) -> Result<Option<Region>> {
        let mut conn = self.pool.acquire().await?;
        Self::find_region(&mut conn, code).await
    }

    /// All regions ordered by code.
    pub async fn list_regions(&self) -> Result<Vec<Region>> {
        let regions =
            sqlx::query_as::<_, Region>("SELECT code, name, area FROM regions ORDER BY code ASC")
                .fetch_all(&self.pool)
                .await?;
        Ok(regions)
    }

    // ===== Measurement Operations =====

    pub async fn upsert_daily(conn: &mut SqliteConnection, row: &DailyMeasurement) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO daily_snow (date, region_code, avg_depth)
            VALUES (?, ?, ?)
            ON CONFLICT(date, region_code) DO UPDATE SET
                avg_depth = excluded.avg_depth
            "#,
        )
        .bind(row.date)
        .bind(row.region_code)
        .bind(row.avg_depth)
        .execute(conn)
        .await?;
        Ok(())
    }

    pub async fn upsert_monthly(
        conn: &mut SqliteConnection,
        row: &MonthlyMeasurement,
    ) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO monthly_snow (month, region_code, avg_snowfall)
            VALUES (?, ?, ?)
            ON CONFLICT(month, region_code) DO UPDATE SET
                avg_snowfall = excluded.avg_snowfall
            "#,
        )
        .bind(row.month)
        .bind(row.region_code)
        .bind(row.avg_snowfall)
        .execute(conn)
        .await?;
        Ok(())
    }

    pub async fn get_daily(&self, code: i64, date: NaiveDate) -> Result<Option<DailyMeasurement>> {
        let row = sqlx::query_as::<_, DailyMeasurement>(
            "SELECT date, region_code, avg_depth FROM daily_snow WHERE date = ? AND region_code = ?",
        )
        .bind(date)
        .bind(code)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }

    pub async fn get_monthly(
        &self,
        code: i64,
        month: NaiveDate,
    ) -> Result<Option<MonthlyMeasurement>> {
        let row = sqlx::query_as::<_, MonthlyMeasurement>(
            "SELECT month, region_code, avg_snowfall FROM monthly_snow WHERE month = ? AND region_code = ?",
        )
        .bind(month)
        .bind(code)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }

    /// Every daily row for a region, oldest first.
    pub async fn list_daily(&self, code: i64) -> Result<Vec<DailyMeasurement>> {
        let rows = sqlx::query_as::<_, DailyMeasurement>(
            "SELECT date, region_code, avg_depth FROM daily_snow WHERE region_code = ? ORDER BY date ASC",
        )
        .bind(code)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    /// Every monthly row for a region, oldest first.
    pub async fn list_monthly(&self, code: i64) -> Result<Vec<MonthlyMeasurement>> {
        let rows = sqlx::query_as::<_, MonthlyMeasurement>(
            "SELECT month, region_code, avg_snowfall FROM monthly_snow WHERE region_code = ? ORDER BY month ASC",
        )
        .bind(code)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    /// Sum of monthly snowfall with `start <= month < end`; 0.0 when no rows match.
    pub async fn sum_monthly_between(
        &self,
        code: i64,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<f64> {
        let total: f64 = sqlx::query_scalar(
            r#"
            SELECT COALESCE(SUM(avg_snowfall), 0.0) FROM monthly_snow
            WHERE region_code = ? AND month >= ? AND month < ?
            "#,
        )
        .bind(code)
        .bind(start)
        .bind(end)
        .fetch_one(&self.pool)
        .await?;
        Ok(total)
    }
}
