//! Climate inputs and the first derivation steps.
//!
//! Raw worldbuilding inputs are classified into coarse categorical fields
//! (latitude band, seasonality, continentality, current bias, rain shadow,
//! humidity bracket) and a lapse-rate temperature correction.

pub(crate) mod labels;

mod classify;
mod config;
mod humidity;
mod inputs;

use thiserror::Error;

pub use classify::{
    band_from_lat, continentality_from_distance, current_bias_from_current, humidity_from_precip,
    lapse_adjust_c, rain_shadow_factor, seasonality_from_tilt, Continentality, CurrentBias,
    Humidity, LatBand, RainShadow, Seasonality,
};
pub use config::ClimateConfig;
pub use humidity::adjust_humidity;
pub use inputs::{
    ClimateInputs, DaylengthOverride, DiurnalSwing, Hemisphere, MoisturePattern, OceanCurrent,
    OceanDistance, OrographyPosition, PrevailingWind, Tilt, Topography, DUST_QUIRK, FLASH_FLOODS,
    KNOWN_ATMO_QUIRKS, KNOWN_BUILDING_USES, KNOWN_EXTREMES, SAND_DUST_STORMS,
};

/// Errors raised while reading or validating climate inputs.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ClimateError {
    /// A field holds a value outside its finite domain or numeric range.
    #[error("invalid {field}: {value:?} (expected {expected})")]
    InvalidInput {
        field: &'static str,
        value: String,
        expected: String,
    },
}
