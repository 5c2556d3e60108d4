//! Derived profile assembly and the `derive` entry point.

use serde::{Deserialize, Serialize};
use tracing::info;

use super::stage::{DerivationState, Pipeline, PipelineError};
use crate::adaptation::AdaptationPack;
use crate::biomes::Biome;
use crate::climate::{
    ClimateConfig, ClimateInputs, Continentality, CurrentBias, DiurnalSwing, Humidity, LatBand,
    RainShadow, Seasonality,
};
use crate::render::{render_prompt, render_syntax};

/// Everything derived from one set of inputs.
///
/// Serialized with the key names of the `derived` object in snapshots.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DerivedProfile {
    pub lat_band: LatBand,
    #[serde(rename = "seasonality_index")]
    pub seasonality: Seasonality,
    #[serde(rename = "continentality_index")]
    pub continentality: Continentality,
    /// Signed °C correction from elevation, one decimal.
    #[serde(rename = "elevation_lapse_adjust", with = "lapse_text")]
    pub elevation_lapse_adjust_c: f64,
    pub current_bias: CurrentBias,
    #[serde(rename = "rain_shadow_factor")]
    pub rain_shadow: RainShadow,
    #[serde(rename = "humidity_regime")]
    pub humidity: Humidity,
    #[serde(rename = "biome_guess")]
    pub biome: Biome,
    pub palette: String,
    pub tags: Vec<String>,
}

impl DerivedProfile {
    /// Lapse adjustment with explicit sign and unit, e.g. `-2.3C`.
    pub fn lapse_text(&self) -> String {
        lapse_text::format(self.elevation_lapse_adjust_c)
    }
}

/// Result of one derivation: inputs, derived profile, adaptations and both renders.
#[derive(Debug, Clone, PartialEq)]
pub struct Generation {
    pub inputs: ClimateInputs,
    pub derived: DerivedProfile,
    pub adaptations: AdaptationPack,
    pub prompt: String,
    pub syntax: String,
}

/// Ordered tag list: humidity, band, continentality, diurnal swing, then
/// rain shadow and current bias when present.
pub fn build_tags(
    humidity: Humidity,
    band: LatBand,
    continentality: Continentality,
    diurnal: DiurnalSwing,
    rain_shadow: RainShadow,
    current_bias: CurrentBias,
) -> Vec<String> {
    let mut tags = vec![
        format!("#{humidity}"),
        format!("#{band}"),
        format!("#{continentality}"),
        format!("#diurnal-{}", diurnal.tag_suffix()),
    ];
    if rain_shadow != RainShadow::None {
        tags.push("#rainshadow".to_string());
    }
    if current_bias != CurrentBias::None {
        tags.push(format!("#current-{current_bias}"));
    }
    tags
}

impl DerivationState<'_> {
    /// Assemble the derived profile and adaptation pack from completed stages.
    pub fn finish(&self) -> Result<(DerivedProfile, AdaptationPack), PipelineError> {
        let c = self.classification()?;
        let humidity = self.humidity()?;
        let biome = self.biome()?;
        let palette = self.palette()?.to_string();
        let adaptations = self.adaptations()?.clone();

        let tags = build_tags(
            humidity,
            c.lat_band,
            c.continentality,
            self.inputs.diurnal_swing,
            c.rain_shadow,
            c.current_bias,
        );

        let derived = DerivedProfile {
            lat_band: c.lat_band,
            seasonality: c.seasonality,
            continentality: c.continentality,
            elevation_lapse_adjust_c: c.elevation_lapse_adjust_c,
            current_bias: c.current_bias,
            rain_shadow: c.rain_shadow,
            humidity,
            biome,
            palette,
            tags,
        };
        Ok((derived, adaptations))
    }
}

/// Derive the full profile with the default configuration.
pub fn derive(inputs: &ClimateInputs) -> Result<Generation, PipelineError> {
    derive_with(inputs, &ClimateConfig::default())
}

/// Derive the full profile: validate, run every stage, render both texts.
///
/// Pure: the same inputs and config always give the same result.
pub fn derive_with(inputs: &ClimateInputs, config: &ClimateConfig) -> Result<Generation, PipelineError> {
    inputs.validate()?;

    let mut state = DerivationState::new(inputs);
    Pipeline::standard(config.clone()).run(&mut state)?;
    let (derived, adaptations) = state.finish()?;

    let syntax = render_syntax(inputs, &derived, &adaptations);
    let prompt = render_prompt(inputs, &derived, &adaptations);

    info!(
        world = inputs.world_label(),
        biome = %derived.biome,
        humidity = %derived.humidity,
        "climate profile derived"
    );

    Ok(Generation {
        inputs: inputs.clone(),
        derived,
        adaptations,
        prompt,
        syntax,
    })
}

/// Text form of the lapse adjustment: `{:+.1}` followed by `C`.
mod lapse_text {
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn format(value: f64) -> String {
        format!("{value:+.1}C")
    }

    pub fn serialize<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&format(*value))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
        let text = String::deserialize(deserializer)?;
        text.trim()
            .strip_suffix('C')
            .and_then(|n| n.parse::<f64>().ok())
            .filter(|v| v.is_finite())
            .ok_or_else(|| serde::de::Error::custom(format!("invalid lapse adjustment {text:?}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::climate::{
        ClimateError, OceanCurrent, OceanDistance, OrographyPosition, Tilt, Topography,
    };

    fn hot_desert_inputs() -> ClimateInputs {
        ClimateInputs {
            latitude_deg: 18.0,
            tilt: Tilt::EarthLike,
            daylength_override: None,
            topography: Topography::MountainRange,
            elevation_m: 350,
            ocean_distance: OceanDistance::Interior,
            ocean_current: OceanCurrent::Neutral,
            orography_position: OrographyPosition::Leeward,
            precip_mm: 320,
            diurnal_swing: DiurnalSwing::High,
            ..ClimateInputs::default()
        }
    }

    #[test]
    fn leeward_subtropical_scenario() {
        let g = derive(&hot_desert_inputs()).unwrap();
        let d = &g.derived;
        assert_eq!(d.lat_band, LatBand::Subtropical);
        assert_eq!(d.seasonality, Seasonality::Medium);
        assert_eq!(d.continentality, Continentality::High);
        assert_eq!(d.current_bias, CurrentBias::None);
        assert_eq!(d.rain_shadow, RainShadow::Strong);
        assert_eq!(d.humidity, Humidity::Arid);
        assert_eq!(d.biome, Biome::HotDesert);
        assert_eq!(d.lapse_text(), "-2.3C");
        assert_eq!(
            d.tags,
            vec!["#arid", "#subtropical", "#high", "#diurnal-high", "#rainshadow"]
        );
    }

    #[test]
    fn wet_tropical_scenario() {
        let inputs = ClimateInputs {
            latitude_deg: 5.0,
            precip_mm: 2500,
            ocean_current: OceanCurrent::Warm,
            topography: Topography::CoastalPlain,
            ..ClimateInputs::default()
        };
        let g = derive(&inputs).unwrap();
        assert_eq!(g.derived.lat_band, LatBand::Tropical);
        assert_eq!(g.derived.rain_shadow, RainShadow::None);
        assert_eq!(g.derived.humidity, Humidity::Humid);
        assert_eq!(g.derived.biome, Biome::TropicalRainMonsoon);
        assert!(g.derived.tags.contains(&"#current-warm".to_string()));
    }

    #[test]
    fn derive_is_deterministic() {
        let inputs = hot_desert_inputs();
        let a = derive(&inputs).unwrap();
        let b = derive(&inputs).unwrap();
        assert_eq!(a.syntax, b.syntax);
        assert_eq!(a.prompt, b.prompt);
        assert_eq!(a, b);
    }

    #[test]
    fn out_of_range_input_fails_the_call() {
        let inputs = ClimateInputs {
            latitude_deg: 90.0,
            ..ClimateInputs::default()
        };
        match derive(&inputs) {
            Err(PipelineError::Input(ClimateError::InvalidInput { field, .. })) => {
                assert_eq!(field, "latitude_deg")
            }
            other => panic!("expected invalid input, got {other:?}"),
        }
    }

    #[test]
    fn lapse_text_round_trips_through_json() {
        let g = derive(&hot_desert_inputs()).unwrap();
        let json = serde_json::to_value(&g.derived).unwrap();
        assert_eq!(json["elevation_lapse_adjust"], "-2.3C");
        assert_eq!(json["biome_guess"], "Hot Desert");
        let back: DerivedProfile = serde_json::from_value(json).unwrap();
        assert_eq!(back, g.derived);
    }

    #[test]
    fn finish_reports_first_missing_stage_output() {
        use crate::pipeline::{BiomeStage, ClassifyStage, HumidityStage, StageId};

        let inputs = ClimateInputs::default();
        let mut state = DerivationState::new(&inputs);
        assert_eq!(
            state.finish().unwrap_err(),
            PipelineError::MissingOutput(StageId::Classify.name())
        );

        let mut pipeline = Pipeline::new(ClimateConfig::default());
        pipeline
            .add_stage(ClassifyStage)
            .add_stage(HumidityStage)
            .add_stage(BiomeStage);
        pipeline.run(&mut state).unwrap();
        assert_eq!(
            state.finish().unwrap_err(),
            PipelineError::MissingOutput(StageId::Palette.name())
        );
    }

    #[test]
    fn sea_level_lapse_is_positive_zero() {
        let inputs = ClimateInputs {
            elevation_m: 0,
            ..ClimateInputs::default()
        };
        assert_eq!(derive(&inputs).unwrap().derived.lapse_text(), "+0.0C");
    }
}
