use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::collections::BTreeMap;
use validator::Validate;

use crate::error::{Result, SnowmanError};
use crate::utils::constants::JIS_PREFECTURE_CODES;

/// A geographic region whose code is assigned externally, never generated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, Validate)]
pub struct Region {
    pub code: i64,

    #[validate(length(min = 1))]
    pub name: String,

    /// Square kilometres.
    #[validate(range(min = 0.0))]
    pub area: f64,
}

impl Region {
    pub fn new(code: i64, name: String, area: f64) -> Self {
        Self { code, name, area }
    }
}

/// Fixed mapping from region name to region code.
///
/// Handed to the registry at construction so deployments and tests can
/// supply their own table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegionCodeTable {
    codes: BTreeMap<String, i64>,
}

impl RegionCodeTable {
    pub fn new(codes: BTreeMap<String, i64>) -> Self {
        Self { codes }
    }

    /// The 47 Japanese prefectures keyed by JIS X 0401 code.
    pub fn jis_prefectures() -> Self {
        let codes = JIS_PREFECTURE_CODES
            .iter()
            .map(|(name, code)| (name.to_string(), *code))
            .collect();
        Self { codes }
    }

    pub fn code_for(&self, name: &str) -> Result<i64> {
        self.codes
            .get(name)
            .copied()
            .ok_or_else(|| SnowmanError::UnknownRegion {
                name: name.to_string(),
            })
    }

    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }
}

impl FromIterator<(String, i64)> for RegionCodeTable {
    fn from_iter<I: IntoIterator<Item = (String, i64)>>(iter: I) -> Self {
        Self {
            codes: iter.into_iter().collect(),
        }
    }
}
