use sqlx::sqlite::SqliteConnection;
use tracing::debug;
use validator::Validate;

use crate::error::Result;
use crate::models::{Region, RegionCodeTable};
use crate::store::SnowStore;

/// Resolves region names to their fixed codes and keeps the region rows current.
#[derive(Clone)]
pub struct RegionRegistry {
    codes: RegionCodeTable,
    store: SnowStore,
}

impl RegionRegistry {
    pub fn new(store: SnowStore, codes: RegionCodeTable) -> Self {
        Self { codes, store }
    }

    pub fn codes(&self) -> &RegionCodeTable {
        &self.codes
    }

    pub fn store(&self) -> &SnowStore {
        &self.store
    }

    /// Look up `name`'s code, then create the region row or update its area,
    /// committing before returning.
    pub async fn resolve_or_create(&self, name: &str, area: f64) -> Result<i64> {
        let mut tx = self.store.begin().await?;
        let code = self.resolve_or_create_in(&mut tx, name, area).await?;
        tx.commit().await?;
        Ok(code)
    }

    /// Same as [`resolve_or_create`](Self::resolve_or_create) but inside the
    /// caller's transaction.
    pub async fn resolve_or_create_in(
        &self,
        conn: &mut SqliteConnection,
        name: &str,
        area: f64,
    ) -> Result<i64> {
        let code = self.codes.code_for(name)?;
        let region = Region::new(code, name.to_string(), area);
        region.validate()?;

        match SnowStore::find_region(conn, code).await? {
            Some(_) => {
                debug!("Region {} ({}) exists, updating area to {}", code, name, area);
                SnowStore::update_region_area(conn, code, area).await?;
            }
            None => {
                debug!("Registering region {} ({})", code, name);
                SnowStore::insert_region(conn, &region).await?;
            }
        }

        Ok(code)
    }
}
