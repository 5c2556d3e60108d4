//! Natural-language prompt paragraph.

use crate::adaptation::{AdaptationKey, AdaptationPack};
use crate::climate::ClimateInputs;
use crate::pipeline::DerivedProfile;

const NO_EXTREMES: &str = "rare extremes";
const MISSING_ADAPTATION: &str = "n/a";

/// Render the prompt paragraph.
///
/// Missing adaptation keys read `n/a`; an empty extremes list reads
/// `rare extremes`.
pub fn render_prompt(inputs: &ClimateInputs, derived: &DerivedProfile, adaptations: &AdaptationPack) -> String {
    let extremes = inputs.cleaned_extremes();
    let extremes = if extremes.is_empty() {
        NO_EXTREMES.to_string()
    } else {
        extremes.join(", ")
    };

    let field = |key: AdaptationKey| {
        adaptations
            .text(key)
            .unwrap_or_else(|| MISSING_ADAPTATION.to_string())
    };

    format!(
        "A {biome} region at {lat:?}°{hemi} with {humidity} humidity and {cont} continentality. \
         Seasonality is {season}; diurnal swing is {diurnal}. \
         Ocean current bias: {bias}; rain shadow: {shadow}. \
         Sky: {palette}. Extremes: {extremes}. \
         Architectural adaptations include: envelope [{envelope}], openings [{openings}], \
         ventilation [{ventilation}], roof [{roof}], urban [{urban}].",
        biome = derived.biome,
        lat = inputs.latitude_deg,
        hemi = inputs.hemisphere,
        humidity = derived.humidity,
        cont = derived.continentality,
        season = derived.seasonality,
        diurnal = inputs.diurnal_swing,
        bias = derived.current_bias,
        shadow = derived.rain_shadow,
        palette = derived.palette,
        extremes = extremes,
        envelope = field(AdaptationKey::Envelope),
        openings = field(AdaptationKey::Openings),
        ventilation = field(AdaptationKey::Ventilation),
        roof = field(AdaptationKey::Roof),
        urban = field(AdaptationKey::Urban),
    )
}
