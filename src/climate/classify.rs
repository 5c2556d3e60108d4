//! Single-input classifiers.
//!
//! Each function is total over its closed input domain.

use super::inputs::{DaylengthOverride, OceanCurrent, OceanDistance, OrographyPosition, Tilt, Topography};
use super::labels::labeled_enum;

labeled_enum! {
    /// Latitude-derived macro-climate zone.
    pub enum LatBand("lat_band") {
        Tropical => "tropical",
        Subtropical => "subtropical",
        Temperate => "temperate",
        Subpolar => "subpolar",
        Polar => "polar",
    }
}

labeled_enum! {
    pub enum Seasonality("seasonality_index") {
        Low => "low",
        Medium => "medium",
        High => "high",
    }
}

labeled_enum! {
    /// Temperature-swing amplification from distance to the ocean.
    pub enum Continentality("continentality_index") {
        Low => "low",
        Medium => "medium",
        High => "high",
    }
}

labeled_enum! {
    pub enum CurrentBias("current_bias") {
        Warm => "warm",
        Cold => "cold",
        None => "none",
    }
}

labeled_enum! {
    /// Precipitation suppression from mountain position.
    pub enum RainShadow("rain_shadow_factor") {
        None => "none",
        Moderate => "moderate",
        Strong => "strong",
    }
}

labeled_enum! {
    /// Ordered precipitation regime, driest first.
    pub enum Humidity("humidity_regime") {
        Arid => "arid",
        SemiArid => "semi-arid",
        Temperate => "temperate",
        Humid => "humid",
    }
}

impl Humidity {
    /// One bracket wetter, clamped at `Humid`.
    pub fn wetter(self) -> Self {
        let idx = (self as usize + 1).min(Self::ALL.len() - 1);
        Self::ALL[idx]
    }

    /// One bracket drier, clamped at `Arid`.
    pub fn drier(self) -> Self {
        Self::ALL[(self as usize).saturating_sub(1)]
    }
}

/// Latitude band thresholds; each bound is inclusive.
pub fn band_from_lat(lat_deg: f64) -> LatBand {
    if lat_deg <= 10.0 {
        LatBand::Tropical
    } else if lat_deg <= 23.0 {
        LatBand::Subtropical
    } else if lat_deg <= 45.0 {
        LatBand::Temperate
    } else if lat_deg <= 66.0 {
        LatBand::Subpolar
    } else {
        LatBand::Polar
    }
}

pub fn seasonality_from_tilt(tilt: Tilt, day_override: Option<DaylengthOverride>) -> Seasonality {
    match day_override {
        Some(DaylengthOverride::Lower) => return Seasonality::Low,
        Some(DaylengthOverride::Higher) => return Seasonality::High,
        None => {}
    }
    match tilt {
        Tilt::Mild => Seasonality::Low,
        Tilt::EarthLike => Seasonality::Medium,
        Tilt::Strong => Seasonality::High,
    }
}

pub fn continentality_from_distance(distance: OceanDistance) -> Continentality {
    match distance {
        OceanDistance::Coastal => Continentality::Low,
        OceanDistance::NearCoastal => Continentality::Medium,
        OceanDistance::Interior => Continentality::High,
    }
}

pub fn current_bias_from_current(current: OceanCurrent) -> CurrentBias {
    match current {
        OceanCurrent::Warm => CurrentBias::Warm,
        OceanCurrent::Cold => CurrentBias::Cold,
        OceanCurrent::Neutral => CurrentBias::None,
    }
}

/// Rain shadow only exists for mountain ranges.
pub fn rain_shadow_factor(topography: Topography, position: OrographyPosition) -> RainShadow {
    if topography != Topography::MountainRange {
        return RainShadow::None;
    }
    match position {
        OrographyPosition::Windward => RainShadow::None,
        OrographyPosition::Leeward => RainShadow::Strong,
        OrographyPosition::CrossValley => RainShadow::Moderate,
    }
}

pub fn humidity_from_precip(precip_mm: u32) -> Humidity {
    match precip_mm {
        0..=250 => Humidity::Arid,
        251..=500 => Humidity::SemiArid,
        501..=1000 => Humidity::Temperate,
        _ => Humidity::Humid,
    }
}

/// Elevation temperature correction in °C, rounded to one decimal.
///
/// Always `<= 0`; negative zero is normalized so it prints as `+0.0`.
pub fn lapse_adjust_c(elevation_m: u32, lapse_rate_c_per_km: f64) -> f64 {
    let raw = -(lapse_rate_c_per_km / 1000.0) * elevation_m as f64;
    // Round on the exact binary value, as `{:.1}` does: 300 m gives -1.9, not -2.0.
    let rounded: f64 = format!("{raw:.1}").parse().unwrap_or(raw);
    if rounded == 0.0 {
        0.0
    } else {
        rounded
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn band_boundaries_are_inclusive() {
        assert_eq!(band_from_lat(0.0), LatBand::Tropical);
        assert_eq!(band_from_lat(10.0), LatBand::Tropical);
        assert_eq!(band_from_lat(10.01), LatBand::Subtropical);
        assert_eq!(band_from_lat(23.0), LatBand::Subtropical);
        assert_eq!(band_from_lat(45.0), LatBand::Temperate);
        assert_eq!(band_from_lat(66.0), LatBand::Subpolar);
        assert_eq!(band_from_lat(66.5), LatBand::Polar);
        assert_eq!(band_from_lat(85.0), LatBand::Polar);
    }

    #[test]
    fn whole_tropical_range_is_tropical() {
        let mut lat = 0.0;
        while lat <= 10.0 {
            assert_eq!(band_from_lat(lat), LatBand::Tropical, "lat {lat}");
            lat += 0.25;
        }
    }

    #[test]
    fn daylength_override_wins_over_tilt() {
        assert_eq!(seasonality_from_tilt(Tilt::EarthLike, None), Seasonality::Medium);
        assert_eq!(
            seasonality_from_tilt(Tilt::Strong, Some(DaylengthOverride::Lower)),
            Seasonality::Low
        );
        assert_eq!(
            seasonality_from_tilt(Tilt::Mild, Some(DaylengthOverride::Higher)),
            Seasonality::High
        );
    }

    #[test]
    fn rain_shadow_requires_mountains() {
        for topo in Topography::ALL {
            for pos in OrographyPosition::ALL {
                let shadow = rain_shadow_factor(*topo, *pos);
                if *topo != Topography::MountainRange {
                    assert_eq!(shadow, RainShadow::None);
                }
            }
        }
        assert_eq!(
            rain_shadow_factor(Topography::MountainRange, OrographyPosition::Leeward),
            RainShadow::Strong
        );
        assert_eq!(
            rain_shadow_factor(Topography::MountainRange, OrographyPosition::CrossValley),
            RainShadow::Moderate
        );
    }

    #[test]
    fn precip_brackets() {
        assert_eq!(humidity_from_precip(0), Humidity::Arid);
        assert_eq!(humidity_from_precip(250), Humidity::Arid);
        assert_eq!(humidity_from_precip(251), Humidity::SemiArid);
        assert_eq!(humidity_from_precip(500), Humidity::SemiArid);
        assert_eq!(humidity_from_precip(1000), Humidity::Temperate);
        assert_eq!(humidity_from_precip(1001), Humidity::Humid);
    }

    #[test]
    fn lapse_adjustment_rounds_to_one_decimal() {
        assert_eq!(lapse_adjust_c(350, 6.5), -2.3);
        assert_eq!(lapse_adjust_c(1000, 6.5), -6.5);
        assert_eq!(lapse_adjust_c(300, 6.5), -1.9);
        let zero = lapse_adjust_c(0, 6.5);
        assert_eq!(zero, 0.0);
        assert!(zero.is_sign_positive());
    }

    #[test]
    fn humidity_shifts_clamp() {
        assert_eq!(Humidity::Humid.wetter(), Humidity::Humid);
        assert_eq!(Humidity::Arid.drier(), Humidity::Arid);
        assert_eq!(Humidity::SemiArid.wetter(), Humidity::Temperate);
    }
}
