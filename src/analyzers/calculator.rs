use chrono::{Datelike, NaiveDate};
use std::collections::BTreeMap;

use crate::analyzers::snowman::{snowman_size, SnowmanSize};
use crate::error::{Result, SnowmanError};
use crate::models::{DateStatus, PeriodType, Region};
use crate::store::SnowStore;
use crate::utils::dates::{first_of_month, parse_iso_date, year_bounds};

#[derive(Debug, Clone, PartialEq)]
pub struct Calculation {
    pub region: Region,
    pub period: PeriodType,
    pub date: NaiveDate,
    /// Snow depth (day) or snowfall (month, year) in centimetres.
    pub snow_cm: f64,
    pub size: SnowmanSize,
}

impl Calculation {
    pub fn message(&self) -> String {
        let place = format!("{} (area {} km²)", self.region.name, self.region.area);
        let observed = match self.period {
            PeriodType::Day => format!(
                "{} had an average snow depth of {:.1} cm on {}.",
                place,
                self.snow_cm,
                self.date.format("%Y-%m-%d")
            ),
            PeriodType::Month => format!(
                "{} received an average of {:.1} cm of snowfall in {}.",
                place,
                self.snow_cm,
                self.date.format("%Y-%m")
            ),
            PeriodType::Year => format!(
                "{} received a total of {:.1} cm of snowfall in {}.",
                place,
                self.snow_cm,
                self.date.year()
            ),
        };

        if self.size.volume_m3 > 0.0 {
            format!(
                "{} Rolled into one snowman it would stand {:.1} m tall.",
                observed, self.size.height_m
            )
        } else {
            format!("{} Not enough snow for a snowman.", observed)
        }
    }
}

/// Read-only queries over the snowfall store.
#[derive(Clone)]
pub struct SnowmanCalculator {
    store: SnowStore,
}

impl SnowmanCalculator {
    pub fn new(store: SnowStore) -> Self {
        Self { store }
    }

    pub async fn list_regions(&self) -> Result<Vec<Region>> {
        self.store.list_regions().await
    }

    /// Every recorded date for the region, marked positive when snow was lying.
    pub async fn list_available_dates(&self, code: i64) -> Result<BTreeMap<String, DateStatus>> {
        let mut dates = BTreeMap::new();
        for row in self.store.list_daily(code).await? {
            let status = row.status();
            dates
                .entry(row.date.format("%Y-%m-%d").to_string())
                .and_modify(|s: &mut DateStatus| *s = s.merge(status))
                .or_insert(status);
        }
        Ok(dates)
    }

    /// Validate the request fields in order (date, region, period) and calculate.
    pub async fn calculate_request(
        &self,
        code: i64,
        target_date: &str,
        period_type: &str,
    ) -> Result<Calculation> {
        let date = parse_iso_date(target_date)?;
        let region = self.find_region(code).await?;
        let period: PeriodType = period_type.parse()?;
        self.calculate_for(region, date, period).await
    }

    pub async fn calculate(
        &self,
        code: i64,
        date: NaiveDate,
        period: PeriodType,
    ) -> Result<Calculation> {
        let region = self.find_region(code).await?;
        self.calculate_for(region, date, period).await
    }

    async fn find_region(&self, code: i64) -> Result<Region> {
        self.store
            .get_region(code)
            .await?
            .ok_or(SnowmanError::RegionNotFound { code })
    }

    async fn calculate_for(
        &self,
        region: Region,
        date: NaiveDate,
        period: PeriodType,
    ) -> Result<Calculation> {
        let code = region.code;
        let snow_cm = match period {
            PeriodType::Day => {
                self.store
                    .get_daily(code, date)
                    .await?
                    .ok_or_else(|| SnowmanError::DataNotFound {
                        region: region.name.clone(),
                        period: "daily",
                        date: date.format("%Y-%m-%d").to_string(),
                    })?
                    .avg_depth
            }
            PeriodType::Month => {
                let month = first_of_month(date);
                self.store
                    .get_monthly(code, month)
                    .await?
                    .ok_or_else(|| SnowmanError::DataNotFound {
                        region: region.name.clone(),
                        period: "monthly",
                        date: month.format("%Y-%m").to_string(),
                    })?
                    .avg_snowfall
            }
            PeriodType::Year => {
                // Missing months count as zero; a year with no rows is not an error
                let (start, end) = year_bounds(date.year())?;
                self.store.sum_monthly_between(code, start, end).await?
            }
        };

        let size = snowman_size(snow_cm, region.area);

        Ok(Calculation {
            region,
            period,
            date,
            snow_cm,
            size,
        })
    }
}
