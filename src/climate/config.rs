//! Derivation configuration parameters.

use serde::{Deserialize, Serialize};

/// Tunable constants for the derivation pipeline.
///
/// Units:
/// - lapse rate: °C per km of elevation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClimateConfig {
    /// Temperature drop per km of mean elevation.
    pub lapse_rate_c_per_km: f64,
}

impl Default for ClimateConfig {
    fn default() -> Self {
        // Standard environmental lapse rate.
        Self {
            lapse_rate_c_per_km: 6.5,
        }
    }
}

impl ClimateConfig {
    pub fn earth_like() -> Self {
        Self::default()
    }
}
