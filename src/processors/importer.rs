use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::{error, info};

use crate::error::{Result, SnowmanError};
use crate::models::{DailyMeasurement, MonthlyMeasurement};
use crate::processors::RegionRegistry;
use crate::readers::SnowReader;
use crate::store::SnowStore;
use crate::utils::ProgressReporter;

/// One region's worth of source files.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ImportRequest {
    pub name: String,
    pub area: f64,
    pub daily: PathBuf,
    pub monthly: PathBuf,
}

impl ImportRequest {
    pub fn new(name: &str, area: f64, daily: &Path, monthly: &Path) -> Self {
        Self {
            name: name.to_string(),
            area,
            daily: daily.to_path_buf(),
            monthly: monthly.to_path_buf(),
        }
    }

    /// Read a `name,area,daily,monthly` manifest; relative paths are resolved
    /// against the manifest's directory.
    pub fn read_manifest(path: &Path) -> Result<Vec<ImportRequest>> {
        let base = path.parent().unwrap_or_else(|| Path::new(""));
        let mut reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_path(path)?;

        reader
            .deserialize::<ImportRequest>()
            .map(|row| -> Result<ImportRequest> {
                let mut request = row?;
                if request.daily.is_relative() {
                    request.daily = base.join(&request.daily);
                }
                if request.monthly.is_relative() {
                    request.monthly = base.join(&request.monthly);
                }
                Ok(request)
            })
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ImportReport {
    pub region: String,
    pub code: i64,
    pub daily_rows: usize,
    pub monthly_rows: usize,
    pub skipped_rows: usize,
}

impl ImportReport {
    pub fn summary(&self) -> String {
        format!(
            "{} (code {}): {} daily rows, {} monthly rows, {} rows skipped",
            self.region, self.code, self.daily_rows, self.monthly_rows, self.skipped_rows
        )
    }
}

#[derive(Debug, Default)]
pub struct BatchOutcome {
    pub imported: Vec<ImportReport>,
    pub failed: Vec<SnowmanError>,
}

impl BatchOutcome {
    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Loads regional snowfall CSV files into the store.
///
/// Each import is all-or-nothing: both files are parsed in full before the
/// first write, and the region row plus every measurement row are committed
/// in a single transaction.
pub struct Importer {
    registry: RegionRegistry,
    reader: SnowReader,
}

impl Importer {
    pub fn new(registry: RegionRegistry) -> Self {
        Self {
            registry,
            reader: SnowReader::new(),
        }
    }

    pub fn with_reader(mut self, reader: SnowReader) -> Self {
        self.reader = reader;
        self
    }

    pub async fn import_region(
        &self,
        name: &str,
        area: f64,
        daily_csv: &Path,
        monthly_csv: &Path,
    ) -> Result<ImportReport> {
        info!("Importing {} from {} and {}", name, daily_csv.display(), monthly_csv.display());

        // Fail fast on an unknown name before touching the files
        let code = self.registry.codes().code_for(name)?;

        let daily = self.reader.read_daily(daily_csv)?;
        let monthly = self.reader.read_monthly(monthly_csv)?;

        let mut tx = self.registry.store().begin().await?;
        self.registry.resolve_or_create_in(&mut tx, name, area).await?;

        for row in &daily.rows {
            SnowStore::upsert_daily(&mut tx, &DailyMeasurement::new(row.date, code, row.average))
                .await?;
        }
        for row in &monthly.rows {
            SnowStore::upsert_monthly(
                &mut tx,
                &MonthlyMeasurement::new(row.date, code, row.average),
            )
            .await?;
        }

        tx.commit().await?;

        let report = ImportReport {
            region: name.to_string(),
            code,
            daily_rows: daily.rows.len(),
            monthly_rows: monthly.rows.len(),
            skipped_rows: daily.skipped_rows + monthly.skipped_rows,
        };
        info!("Imported {}", report.summary());
        Ok(report)
    }

    pub async fn import(&self, request: &ImportRequest) -> Result<ImportReport> {
        self.import_region(&request.name, request.area, &request.daily, &request.monthly)
            .await
    }

    /// Import each request independently; a failing region is logged and the
    /// batch moves on.
    pub async fn import_all(
        &self,
        requests: &[ImportRequest],
        progress: &ProgressReporter,
    ) -> BatchOutcome {
        let mut outcome = BatchOutcome::default();

        for request in requests {
            progress.set_message(&format!("Importing {}", request.name));
            match self.import(request).await {
                Ok(report) => outcome.imported.push(report),
                Err(e) => {
                    let failure = SnowmanError::import_failed(&request.name, e);
                    error!("{}", failure);
                    outcome.failed.push(failure);
                }
            }
            progress.increment(1);
        }

        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::RegionCodeTable;
    use chrono::NaiveDate;
    use pretty_assertions::assert_eq;
    use std::io::Write;
    use tempfile::TempDir;

    struct Fixture {
        importer: Importer,
        store: SnowStore,
        dir: TempDir,
    }

    impl Fixture {
        async fn new() -> Self {
            let dir = TempDir::new().unwrap();
            let store = SnowStore::connect(&dir.path().join("snow.db"), 1)
                .await
                .unwrap();
            let codes: RegionCodeTable = vec![("A".to_string(), 1), ("B".to_string(), 2)]
                .into_iter()
                .collect();
            let importer = Importer::new(RegionRegistry::new(store.clone(), codes));
            Self {
                importer,
                store,
                dir,
            }
        }

        fn write(&self, name: &str, contents: &str) -> PathBuf {
            let path = self.dir.path().join(name);
            let mut file = std::fs::File::create(&path).unwrap();
            file.write_all(contents.as_bytes()).unwrap();
            path
        }
    }

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[tokio::test]
    async fn test_import_region() {
        let fx = Fixture::new().await;
        let daily = fx.write("a.csv", "Date,S1,S2\n2024-01-10,50,30\n2024-01-11,0,0\n");
        let monthly = fx.write("a-mon.csv", "month,S1,S2\n2024-01,120,80\n2024-02,60,40\n");

        let report = fx
            .importer
            .import_region("A", 100.0, &daily, &monthly)
            .await
            .unwrap();

        assert_eq!(
            report,
            ImportReport {
                region: "A".to_string(),
                code: 1,
                daily_rows: 2,
                monthly_rows: 2,
                skipped_rows: 0,
            }
        );
        assert_eq!(
            fx.store.list_daily(1).await.unwrap(),
            vec![
                DailyMeasurement::new(ymd(2024, 1, 10), 1, 40.0),
                DailyMeasurement::new(ymd(2024, 1, 11), 1, 0.0),
            ]
        );
        assert_eq!(
            fx.store.list_monthly(1).await.unwrap(),
            vec![
                MonthlyMeasurement::new(ymd(2024, 1, 1), 1, 100.0),
                MonthlyMeasurement::new(ymd(2024, 2, 1), 1, 50.0),
            ]
        );
    }

    #[tokio::test]
    async fn test_reimport_is_idempotent_and_updates_area() {
        let fx = Fixture::new().await;
        let daily = fx.write("a.csv", "Date,S1\n2024-01-10,50\n");
        let monthly = fx.write("a-mon.csv", "month,S1\n2024-01,120\n");

        fx.importer
            .import_region("A", 100.0, &daily, &monthly)
            .await
            .unwrap();
        let first_daily = fx.store.list_daily(1).await.unwrap();
        let first_monthly = fx.store.list_monthly(1).await.unwrap();

        fx.importer
            .import_region("A", 250.0, &daily, &monthly)
            .await
            .unwrap();

        assert_eq!(fx.store.list_daily(1).await.unwrap(), first_daily);
        assert_eq!(fx.store.list_monthly(1).await.unwrap(), first_monthly);
        let regions = fx.store.list_regions().await.unwrap();
        assert_eq!(regions.len(), 1);
        assert_eq!(regions[0].area, 250.0);
    }

    #[tokio::test]
    async fn test_missing_and_short_cells_still_import() {
        let fx = Fixture::new().await;
        let daily = fx.write(
            "a.csv",
            "Date,S1,S2\n2024-01-10,50,NaN\n2024-01-11,20,NA\n2024-01-12,6\n",
        );
        let monthly = fx.write("a-mon.csv", "month,S1,S2\n2024-01,120,-\n");

        let report = fx
            .importer
            .import_region("A", 100.0, &daily, &monthly)
            .await
            .unwrap();

        assert_eq!(report.daily_rows, 3);
        assert_eq!(
            fx.store.list_daily(1).await.unwrap(),
            vec![
                DailyMeasurement::new(ymd(2024, 1, 10), 1, 50.0),
                DailyMeasurement::new(ymd(2024, 1, 11), 1, 20.0),
                DailyMeasurement::new(ymd(2024, 1, 12), 1, 6.0),
            ]
        );
        assert_eq!(
            fx.store.list_monthly(1).await.unwrap(),
            vec![MonthlyMeasurement::new(ymd(2024, 1, 1), 1, 120.0)]
        );
    }

    #[tokio::test]
    async fn test_failed_import_leaves_store_untouched() {
        let fx = Fixture::new().await;
        let daily = fx.write("b.csv", "Date,S1\n2024-01-10,50\n");
        let monthly = fx.write("b-mon.csv", "month,S1\n2024-01,10\nsomeday,20\n");

        let result = fx.importer.import_region("B", 10.0, &daily, &monthly).await;

        assert!(matches!(result, Err(SnowmanError::InvalidDate(_))));
        assert!(fx.store.list_regions().await.unwrap().is_empty());
        assert!(fx.store.list_daily(2).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_unknown_region_fails_import() {
        let fx = Fixture::new().await;
        let daily = fx.write("z.csv", "Date,S1\n2024-01-10,50\n");
        let monthly = fx.write("z-mon.csv", "month,S1\n2024-01,10\n");

        let result = fx.importer.import_region("Z", 10.0, &daily, &monthly).await;

        assert!(matches!(result, Err(SnowmanError::UnknownRegion { .. })));
        assert!(fx.store.list_regions().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_batch_continues_after_failure() {
        let fx = Fixture::new().await;
        fx.write("a.csv", "Date,S1\n2024-01-10,50\n");
        fx.write("a-mon.csv", "month,S1\n2024-01,10\n");
        let manifest = fx.write(
            "manifest.csv",
            "name,area,daily,monthly\n\
             Z,5.0,a.csv,a-mon.csv\n\
             A,100.0,a.csv,a-mon.csv\n",
        );

        let requests = ImportRequest::read_manifest(&manifest).unwrap();
        assert_eq!(requests[1].daily, fx.dir.path().join("a.csv"));

        let progress = ProgressReporter::new(requests.len() as u64, "Importing", true);
        let outcome = fx.importer.import_all(&requests, &progress).await;

        assert!(!outcome.is_success());
        assert_eq!(outcome.imported.len(), 1);
        assert_eq!(outcome.imported[0].code, 1);
        assert_eq!(outcome.failed.len(), 1);
        assert!(matches!(
            outcome.failed[0],
            SnowmanError::ImportFailed { ref region, .. } if region == "Z"
        ));
    }
}
