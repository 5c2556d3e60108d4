//! Raw worldbuilding inputs.

use serde::{Deserialize, Serialize};

use super::labels::labeled_enum;
use super::ClimateError;

/// Atmospheric quirk that adds dust haze to the sky palette.
pub const DUST_QUIRK: &str = "High dust/aerosol";
/// Extreme flag that adds sand baffles to openings.
pub const SAND_DUST_STORMS: &str = "Sand/dust storms";
/// Extreme flag that adds flood detailing to urban guidance.
pub const FLASH_FLOODS: &str = "Flash floods";

pub const KNOWN_ATMO_QUIRKS: [&str; 4] = [
    DUST_QUIRK,
    "Volcanic ash periods",
    "High humidity haze",
    "Thin air",
];

pub const KNOWN_EXTREMES: [&str; 7] = [
    SAND_DUST_STORMS,
    "Cyclones/Typhoons",
    FLASH_FLOODS,
    "Heatwaves",
    "Blizzards",
    "Hail",
    "Rare",
];

pub const KNOWN_BUILDING_USES: [&str; 5] = ["Residential", "Civic", "Industrial", "Sacred", "Market"];

const MAX_LATITUDE_DEG: f64 = 85.0;
const MAX_ELEVATION_M: u32 = 5000;
const MAX_PRECIP_MM: u32 = 3000;

labeled_enum! {
    pub enum Hemisphere("hemisphere") {
        North => "N" | "North",
        South => "S" | "South",
    }
}

labeled_enum! {
    /// Axial tilt severity; drives seasonality.
    pub enum Tilt("tilt") {
        Mild => "Mild",
        EarthLike => "Earth-like" | "Earthlike",
        Strong => "Strong",
    }
}

labeled_enum! {
    /// Optional daylength bias that overrides tilt-derived seasonality.
    pub enum DaylengthOverride("daylength_override") {
        Lower => "Lower" | "Lower than default",
        Higher => "Higher" | "Higher than default",
    }
}

impl DaylengthOverride {
    /// Parses an optional override; empty text, "none" and "Use latitude default" mean no override.
    pub fn parse_optional(s: &str) -> Result<Option<Self>, ClimateError> {
        let t = s.trim();
        if t.is_empty() || t.eq_ignore_ascii_case("none") || t.eq_ignore_ascii_case("Use latitude default") {
            return Ok(None);
        }
        t.parse().map(Some)
    }
}

labeled_enum! {
    pub enum Topography("topography") {
        CoastalPlain => "Coastal plain",
        Plateau => "Plateau",
        Basin => "Basin",
        MountainRange => "Mountain range",
        Archipelago => "Archipelago",
    }
}

labeled_enum! {
    /// Distance-to-ocean bracket.
    pub enum OceanDistance("ocean_distance") {
        /// Within about 50 km.
        Coastal => "Coastal" | "Coastal (≤50 km)",
        /// About 50 to 200 km.
        NearCoastal => "Near-coastal" | "Near-coastal (50–200 km)",
        /// Beyond about 200 km.
        Interior => "Interior" | "Interior (>200 km)",
    }
}

labeled_enum! {
    /// Dominant ocean current along the nearest coast.
    pub enum OceanCurrent("ocean_current") {
        Warm => "Warm",
        Cold => "Cold",
        Neutral => "Neutral",
    }
}

labeled_enum! {
    /// Prevailing wind regime. Advisory only.
    pub enum PrevailingWind("prevailing_wind") {
        Trade => "Trade" | "Trade (E→W)",
        Westerly => "Westerly" | "Westerly (W→E)",
        PolarEasterly => "Polar easterly",
        LocalMonsoon => "Local/Monsoon",
    }
}

labeled_enum! {
    /// Position relative to a mountain range; ignored for other topography.
    pub enum OrographyPosition("orography_position") {
        Windward => "Windward",
        Leeward => "Leeward",
        CrossValley => "Cross-valley mixed" | "Cross-valley",
    }
}

labeled_enum! {
    /// Moisture source pattern. Advisory only.
    pub enum MoisturePattern("moisture_pattern") {
        YearRoundMaritime => "Year-round maritime",
        SummerMonsoon => "Summer monsoon",
        WinterWesterlies => "Winter westerlies",
        ConvectionalStorms => "Convectional storms only",
        RainShadowed => "Rain-shadowed",
    }
}

labeled_enum! {
    /// Day/night temperature swing.
    pub enum DiurnalSwing("diurnal_swing") {
        Low => "Low" | "Low (coastal/cloudy)",
        Medium => "Medium",
        High => "High" | "High (desert/clear)",
    }
}

impl DiurnalSwing {
    /// Lowercase form used in tags (`#diurnal-high`).
    pub fn tag_suffix(self) -> &'static str {
        match self {
            DiurnalSwing::Low => "low",
            DiurnalSwing::Medium => "medium",
            DiurnalSwing::High => "high",
        }
    }
}

/// Full input record for one derivation.
///
/// Field names match the `inputs` object of exported snapshots.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ClimateInputs {
    pub world_name: String,
    /// Absolute latitude, 0–85°.
    pub latitude_deg: f64,
    pub hemisphere: Hemisphere,
    pub tilt: Tilt,
    pub daylength_override: Option<DaylengthOverride>,
    /// Mean elevation, 0–5000 m.
    pub elevation_m: u32,
    pub topography: Topography,
    pub ocean_distance: OceanDistance,
    pub ocean_current: OceanCurrent,
    pub prevailing_wind: PrevailingWind,
    pub orography_position: OrographyPosition,
    pub atmo_quirks: Vec<String>,
    pub moisture_pattern: MoisturePattern,
    /// Annual precipitation, 0–3000 mm.
    pub precip_mm: u32,
    pub t_warm_high_c: f64,
    pub t_cool_low_c: f64,
    pub diurnal_swing: DiurnalSwing,
    pub extremes: Vec<String>,
    pub building_uses: Vec<String>,
}

impl Default for ClimateInputs {
    fn default() -> Self {
        Self {
            world_name: "Untitled".to_string(),
            latitude_deg: 18.0,
            hemisphere: Hemisphere::North,
            tilt: Tilt::EarthLike,
            daylength_override: None,
            elevation_m: 350,
            topography: Topography::CoastalPlain,
            ocean_distance: OceanDistance::Interior,
            ocean_current: OceanCurrent::Neutral,
            prevailing_wind: PrevailingWind::Trade,
            orography_position: OrographyPosition::Windward,
            atmo_quirks: Vec::new(),
            moisture_pattern: MoisturePattern::YearRoundMaritime,
            precip_mm: 320,
            t_warm_high_c: 38.0,
            t_cool_low_c: 6.0,
            diurnal_swing: DiurnalSwing::High,
            extremes: vec![SAND_DUST_STORMS.to_string(), FLASH_FLOODS.to_string()],
            building_uses: vec!["Residential".to_string(), "Market".to_string()],
        }
    }
}

impl ClimateInputs {
    /// Checks numeric fields against their documented ranges.
    ///
    /// Enumerated fields are already closed by construction.
    pub fn validate(&self) -> Result<(), ClimateError> {
        if !self.latitude_deg.is_finite() || !(0.0..=MAX_LATITUDE_DEG).contains(&self.latitude_deg) {
            return Err(out_of_range("latitude_deg", self.latitude_deg, "0–85 degrees"));
        }
        if self.elevation_m > MAX_ELEVATION_M {
            return Err(out_of_range("elevation_m", self.elevation_m, "0–5000 m"));
        }
        if self.precip_mm > MAX_PRECIP_MM {
            return Err(out_of_range("precip_mm", self.precip_mm, "0–3000 mm"));
        }
        if !self.t_warm_high_c.is_finite() {
            return Err(out_of_range("t_warm_high_c", self.t_warm_high_c, "a finite °C value"));
        }
        if !self.t_cool_low_c.is_finite() {
            return Err(out_of_range("t_cool_low_c", self.t_cool_low_c, "a finite °C value"));
        }
        Ok(())
    }

    /// Trimmed world name, or "Untitled" when blank.
    pub fn world_label(&self) -> &str {
        let name = self.world_name.trim();
        if name.is_empty() {
            "Untitled"
        } else {
            name
        }
    }

    pub fn has_dust(&self) -> bool {
        self.atmo_quirks.iter().any(|q| q == DUST_QUIRK)
    }

    pub fn has_extreme(&self, flag: &str) -> bool {
        self.extremes.iter().any(|e| e == flag)
    }

    /// Extreme flags with blank and "None" entries removed, in input order.
    pub fn cleaned_extremes(&self) -> Vec<&str> {
        self.extremes
            .iter()
            .map(String::as_str)
            .filter(|e| !e.is_empty() && *e != "None")
            .collect()
    }
}

fn out_of_range(field: &'static str, value: impl ToString, expected: &str) -> ClimateError {
    ClimateError::InvalidInput {
        field,
        value: value.to_string(),
        expected: expected.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        assert!(ClimateInputs::default().validate().is_ok());
    }

    #[test]
    fn latitude_outside_range_is_rejected() {
        let mut inputs = ClimateInputs::default();
        inputs.latitude_deg = 86.0;
        assert!(matches!(
            inputs.validate(),
            Err(ClimateError::InvalidInput { field: "latitude_deg", .. })
        ));

        inputs.latitude_deg = f64::NAN;
        assert!(inputs.validate().is_err());

        inputs.latitude_deg = -1.0;
        assert!(inputs.validate().is_err());
    }

    #[test]
    fn elevation_and_precip_limits() {
        let mut inputs = ClimateInputs::default();
        inputs.elevation_m = 5000;
        inputs.precip_mm = 3000;
        assert!(inputs.validate().is_ok());

        inputs.precip_mm = 3001;
        assert!(matches!(
            inputs.validate(),
            Err(ClimateError::InvalidInput { field: "precip_mm", .. })
        ));
    }

    #[test]
    fn cleaned_extremes_drop_blank_and_none() {
        let mut inputs = ClimateInputs::default();
        inputs.extremes = vec!["None".into(), "Hail".into(), String::new(), FLASH_FLOODS.into()];
        assert_eq!(inputs.cleaned_extremes(), vec!["Hail", FLASH_FLOODS]);
    }

    #[test]
    fn blank_world_name_falls_back() {
        let mut inputs = ClimateInputs::default();
        inputs.world_name = "   ".into();
        assert_eq!(inputs.world_label(), "Untitled");
        inputs.world_name = " Founders Basin ".into();
        assert_eq!(inputs.world_label(), "Founders Basin");
    }

    #[test]
    fn daylength_override_accepts_form_labels() {
        assert_eq!(DaylengthOverride::parse_optional("Use latitude default").unwrap(), None);
        assert_eq!(DaylengthOverride::parse_optional("").unwrap(), None);
        assert_eq!(
            DaylengthOverride::parse_optional("Higher than default").unwrap(),
            Some(DaylengthOverride::Higher)
        );
        assert!(DaylengthOverride::parse_optional("Sideways").is_err());
    }

    #[test]
    fn unknown_input_keys_are_rejected() {
        let mut value = serde_json::to_value(ClimateInputs::default()).unwrap();
        value["season_count"] = serde_json::json!(4);
        assert!(serde_json::from_value::<ClimateInputs>(value).is_err());
    }
}
