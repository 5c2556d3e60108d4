//! Derivation stage trait and pipeline orchestration.

use thiserror::Error;
use tracing::debug;

use crate::adaptation::{build_adaptation_pack, AdaptationPack};
use crate::biomes::{resolve_biome, Biome};
use crate::climate::{
    adjust_humidity, band_from_lat, continentality_from_distance, current_bias_from_current,
    humidity_from_precip, lapse_adjust_c, rain_shadow_factor, seasonality_from_tilt, ClimateConfig,
    ClimateError, ClimateInputs, Continentality, CurrentBias, Humidity, LatBand, RainShadow,
    Seasonality,
};
use crate::palette::sky_palette;

/// Unique identifier for derivation stages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StageId {
    /// Independent single-input classifiers.
    Classify,
    /// Humidity bracket adjustment.
    Humidity,
    /// Biome resolution.
    Biome,
    /// Sky palette synthesis.
    Palette,
    /// Adaptation pack assembly.
    Adaptations,
}

impl StageId {
    /// Returns the name of the stage.
    pub fn name(&self) -> &'static str {
        match self {
            StageId::Classify => "classify",
            StageId::Humidity => "humidity",
            StageId::Biome => "biome",
            StageId::Palette => "palette",
            StageId::Adaptations => "adaptations",
        }
    }
}

/// Errors that can occur during derivation.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PipelineError {
    #[error(transparent)]
    Input(#[from] ClimateError),
    #[error("Missing dependency: stage '{0}' requires '{1}'")]
    MissingDependency(String, String),
    #[error("Stage '{0}' did not produce its output")]
    MissingOutput(&'static str),
}

/// Output of the classify stage.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Classification {
    pub lat_band: LatBand,
    pub seasonality: Seasonality,
    pub continentality: Continentality,
    pub current_bias: CurrentBias,
    pub rain_shadow: RainShadow,
    pub base_humidity: Humidity,
    pub elevation_lapse_adjust_c: f64,
}

/// Intermediate results for one derivation, filled in stage by stage.
///
/// Created fresh per request and consumed when the profile is assembled.
#[derive(Debug)]
pub struct DerivationState<'a> {
    pub inputs: &'a ClimateInputs,
    pub classification: Option<Classification>,
    pub humidity: Option<Humidity>,
    pub biome: Option<Biome>,
    pub palette: Option<String>,
    pub adaptations: Option<AdaptationPack>,
}

impl<'a> DerivationState<'a> {
    pub fn new(inputs: &'a ClimateInputs) -> Self {
        Self {
            inputs,
            classification: None,
            humidity: None,
            biome: None,
            palette: None,
            adaptations: None,
        }
    }

    pub(super) fn classification(&self) -> Result<Classification, PipelineError> {
        self.classification
            .ok_or(PipelineError::MissingOutput(StageId::Classify.name()))
    }

    pub(super) fn humidity(&self) -> Result<Humidity, PipelineError> {
        self.humidity.ok_or(PipelineError::MissingOutput(StageId::Humidity.name()))
    }

    pub(super) fn biome(&self) -> Result<Biome, PipelineError> {
        self.biome.ok_or(PipelineError::MissingOutput(StageId::Biome.name()))
    }

    pub(super) fn palette(&self) -> Result<&str, PipelineError> {
        self.palette
            .as_deref()
            .ok_or(PipelineError::MissingOutput(StageId::Palette.name()))
    }

    pub(super) fn adaptations(&self) -> Result<&AdaptationPack, PipelineError> {
        self.adaptations
            .as_ref()
            .ok_or(PipelineError::MissingOutput(StageId::Adaptations.name()))
    }
}

/// Trait for implementing derivation stages.
///
/// Each stage reads the inputs and earlier stage outputs from the state and
/// records its own output.
pub trait DerivationStage: Send + Sync {
    /// Returns the unique identifier for this stage.
    fn id(&self) -> StageId;

    /// Returns a human-readable name for the stage.
    fn name(&self) -> &str;

    /// Returns the stage IDs that must be executed before this stage.
    fn dependencies(&self) -> &[StageId] {
        &[]
    }

    /// Executes the stage, recording its output in `state`.
    fn execute(&self, state: &mut DerivationState<'_>, config: &ClimateConfig) -> Result<(), PipelineError>;
}

/// Orchestrates derivation stages in order.
pub struct Pipeline {
    stages: Vec<Box<dyn DerivationStage>>,
    config: ClimateConfig,
}

impl Pipeline {
    /// Creates a new empty pipeline with the given configuration.
    pub fn new(config: ClimateConfig) -> Self {
        Self {
            stages: Vec::new(),
            config,
        }
    }

    /// The full derivation: classify, humidity, biome, palette, adaptations.
    pub fn standard(config: ClimateConfig) -> Self {
        let mut pipeline = Self::new(config);
        pipeline
            .add_stage(ClassifyStage)
            .add_stage(HumidityStage)
            .add_stage(BiomeStage)
            .add_stage(PaletteStage)
            .add_stage(AdaptationStage);
        pipeline
    }

    /// Adds a stage to the pipeline.
    pub fn add_stage<S: DerivationStage + 'static>(&mut self, stage: S) -> &mut Self {
        self.stages.push(Box::new(stage));
        self
    }

    /// Returns the number of stages in the pipeline.
    pub fn stage_count(&self) -> usize {
        self.stages.len()
    }

    /// Executes all stages in order.
    pub fn run(&self, state: &mut DerivationState<'_>) -> Result<(), PipelineError> {
        let mut completed: Vec<StageId> = Vec::new();

        for stage in &self.stages {
            for dep in stage.dependencies() {
                if !completed.contains(dep) {
                    return Err(PipelineError::MissingDependency(
                        stage.name().to_string(),
                        dep.name().to_string(),
                    ));
                }
            }

            stage.execute(state, &self.config)?;
            debug!(stage = stage.id().name(), "stage complete");
            completed.push(stage.id());
        }

        Ok(())
    }
}

/// Runs every single-input classifier.
pub struct ClassifyStage;

impl DerivationStage for ClassifyStage {
    fn id(&self) -> StageId {
        StageId::Classify
    }

    fn name(&self) -> &str {
        "Classification"
    }

    fn execute(&self, state: &mut DerivationState<'_>, config: &ClimateConfig) -> Result<(), PipelineError> {
        let inputs = state.inputs;
        let classification = Classification {
            lat_band: band_from_lat(inputs.latitude_deg),
            seasonality: seasonality_from_tilt(inputs.tilt, inputs.daylength_override),
            continentality: continentality_from_distance(inputs.ocean_distance),
            current_bias: current_bias_from_current(inputs.ocean_current),
            rain_shadow: rain_shadow_factor(inputs.topography, inputs.orography_position),
            base_humidity: humidity_from_precip(inputs.precip_mm),
            elevation_lapse_adjust_c: lapse_adjust_c(inputs.elevation_m, config.lapse_rate_c_per_km),
        };
        debug!(
            lat_band = %classification.lat_band,
            base_humidity = %classification.base_humidity,
            rain_shadow = %classification.rain_shadow,
            "classified inputs"
        );
        state.classification = Some(classification);
        Ok(())
    }
}

/// Refines the base humidity bracket.
pub struct HumidityStage;

impl DerivationStage for HumidityStage {
    fn id(&self) -> StageId {
        StageId::Humidity
    }

    fn name(&self) -> &str {
        "Humidity Adjustment"
    }

    fn dependencies(&self) -> &[StageId] {
        &[StageId::Classify]
    }

    fn execute(&self, state: &mut DerivationState<'_>, _config: &ClimateConfig) -> Result<(), PipelineError> {
        let c = state.classification()?;
        state.humidity = Some(adjust_humidity(c.base_humidity, c.current_bias, c.rain_shadow));
        Ok(())
    }
}

/// Resolves the biome label.
pub struct BiomeStage;

impl DerivationStage for BiomeStage {
    fn id(&self) -> StageId {
        StageId::Biome
    }

    fn name(&self) -> &str {
        "Biome Resolution"
    }

    fn dependencies(&self) -> &[StageId] {
        &[StageId::Classify, StageId::Humidity]
    }

    fn execute(&self, state: &mut DerivationState<'_>, _config: &ClimateConfig) -> Result<(), PipelineError> {
        let c = state.classification()?;
        let humidity = state.humidity()?;
        state.biome = Some(resolve_biome(c.lat_band, humidity, c.seasonality, c.continentality));
        Ok(())
    }
}

/// Synthesizes the sky palette.
pub struct PaletteStage;

impl DerivationStage for PaletteStage {
    fn id(&self) -> StageId {
        StageId::Palette
    }

    fn name(&self) -> &str {
        "Palette Synthesis"
    }

    fn dependencies(&self) -> &[StageId] {
        &[StageId::Classify, StageId::Humidity]
    }

    fn execute(&self, state: &mut DerivationState<'_>, _config: &ClimateConfig) -> Result<(), PipelineError> {
        let c = state.classification()?;
        let humidity = state.humidity()?;
        let inputs = state.inputs;
        state.palette = Some(sky_palette(
            humidity,
            inputs.has_dust(),
            c.current_bias,
            inputs.diurnal_swing,
        ));
        Ok(())
    }
}

/// Assembles the adaptation pack.
pub struct AdaptationStage;

impl DerivationStage for AdaptationStage {
    fn id(&self) -> StageId {
        StageId::Adaptations
    }

    fn name(&self) -> &str {
        "Adaptation Pack"
    }

    fn dependencies(&self) -> &[StageId] {
        &[StageId::Biome]
    }

    fn execute(&self, state: &mut DerivationState<'_>, _config: &ClimateConfig) -> Result<(), PipelineError> {
        let biome = state.biome()?;
        let inputs = state.inputs;
        state.adaptations = Some(build_adaptation_pack(
            biome,
            inputs.diurnal_swing,
            &inputs.extremes,
        ));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_pipeline_fills_every_output() {
        let inputs = ClimateInputs::default();
        let mut state = DerivationState::new(&inputs);
        let pipeline = Pipeline::standard(ClimateConfig::default());
        assert_eq!(pipeline.stage_count(), 5);

        pipeline.run(&mut state).unwrap();
        assert!(state.classification.is_some());
        assert!(state.humidity.is_some());
        assert!(state.biome.is_some());
        assert!(state.palette.is_some());
        assert!(state.adaptations.is_some());
    }

    #[test]
    fn missing_dependency_is_reported() {
        let inputs = ClimateInputs::default();
        let mut state = DerivationState::new(&inputs);
        let mut pipeline = Pipeline::new(ClimateConfig::default());
        pipeline.add_stage(ClassifyStage).add_stage(BiomeStage);

        let err = pipeline.run(&mut state).unwrap_err();
        assert_eq!(
            err,
            PipelineError::MissingDependency("Biome Resolution".to_string(), "humidity".to_string())
        );
        assert!(state.biome.is_none());
    }

    #[test]
    fn lapse_rate_comes_from_config() {
        let inputs = ClimateInputs {
            elevation_m: 1000,
            ..ClimateInputs::default()
        };
        let mut state = DerivationState::new(&inputs);
        let mut pipeline = Pipeline::new(ClimateConfig { lapse_rate_c_per_km: 5.0 });
        pipeline.add_stage(ClassifyStage);
        pipeline.run(&mut state).unwrap();
        assert_eq!(state.classification.unwrap().elevation_lapse_adjust_c, -5.0);
    }
}
