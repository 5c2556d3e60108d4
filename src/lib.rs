//! Physics-lite climate builder for worldbuilding.
//!
//! Turns a handful of inputs (latitude, tilt, terrain, currents,
//! precipitation, temperature character, extreme-weather flags) into a
//! climate classification, biome, sky palette, architectural adaptation
//! notes, and two rendered texts: a prose prompt and a `CLIMATE { ... }`
//! syntax block. Every output is a pure function of the inputs.

pub mod adaptation;
pub mod biomes;
pub mod climate;
pub mod export;
pub mod palette;
pub mod pipeline;
pub mod render;

pub use climate::{ClimateConfig, ClimateError, ClimateInputs};
pub use pipeline::{derive, derive_with, DerivedProfile, Generation, PipelineError};
