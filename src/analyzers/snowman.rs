use serde::Serialize;

use crate::utils::constants::{
    CENTIMETRES_PER_METRE, COMPACTION_FACTOR, SNOWMAN_HEIGHT_RATIO, SQUARE_METRES_PER_SQUARE_KM,
};

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SnowmanSize {
    pub height_m: f64,
    pub volume_m3: f64,
}

impl SnowmanSize {
    pub const NONE: SnowmanSize = SnowmanSize {
        height_m: 0.0,
        volume_m3: 0.0,
    };
}

/// Size of the snowman built from `snow_cm` of snow lying over `area_km2`.
///
/// The snow is compacted to 40% of its volume and shaped into an 8:10
/// head:body snowman. No snow (including NaN) means no snowman.
pub fn snowman_size(snow_cm: f64, area_km2: f64) -> SnowmanSize {
    if snow_cm.is_nan() || snow_cm <= 0.0 {
        return SnowmanSize::NONE;
    }

    let area_m2 = area_km2 * SQUARE_METRES_PER_SQUARE_KM;
    let depth_m = snow_cm / CENTIMETRES_PER_METRE;
    let volume_m3 = area_m2 * depth_m * COMPACTION_FACTOR;
    let height_m = SNOWMAN_HEIGHT_RATIO * volume_m3.cbrt();

    SnowmanSize {
        height_m,
        volume_m3,
    }
}
