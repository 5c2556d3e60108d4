//! Pipeline module for orchestrating the derivation.
//!
//! Provides a trait-based architecture for the derivation stages, composed
//! into the standard classify → humidity → biome → palette → adaptations
//! pipeline, plus the `derive` entry point that renders both texts.

mod profile;
mod stage;

pub use profile::{build_tags, derive, derive_with, DerivedProfile, Generation};
pub use stage::{
    AdaptationStage, BiomeStage, Classification, ClassifyStage, DerivationStage, DerivationState,
    HumidityStage, PaletteStage, Pipeline, PipelineError, StageId,
};
