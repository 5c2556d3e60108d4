//! Structured `CLIMATE { ... }` block.

use super::{quote, quote_list};
use crate::adaptation::AdaptationPack;
use crate::climate::ClimateInputs;
use crate::pipeline::DerivedProfile;

/// Render the syntax block.
///
/// Field order is fixed; the adaptations sub-block lists populated keys in
/// insertion order.
pub fn render_syntax(inputs: &ClimateInputs, derived: &DerivedProfile, adaptations: &AdaptationPack) -> String {
    let mut lines = vec![
        "CLIMATE {".to_string(),
        format!("  world: {}", quote(inputs.world_label())),
        format!("  lat_band: {}", derived.lat_band),
        format!("  seasonality: {}", derived.seasonality),
        format!("  continentality: {}", derived.continentality),
        format!("  humidity: {}", derived.humidity),
        format!("  biome: {}", quote(derived.biome.label())),
        format!("  current_bias: {}", derived.current_bias),
        format!("  rain_shadow: {}", derived.rain_shadow),
        format!("  elevation_lapse_adjust: {}", derived.lapse_text()),
        format!("  diurnal: {}", inputs.diurnal_swing),
        format!("  extremes: {}", quote_list(inputs.cleaned_extremes())),
        format!("  palette: {}", quote(&derived.palette)),
        "  adaptations: {".to_string(),
    ];
    for (key, text) in adaptations.iter_text() {
        lines.push(format!("    {key}: {}", quote(&text)));
    }
    lines.push("  }".to_string());
    lines.push(format!(
        "  tags: {}",
        quote_list(derived.tags.iter().map(String::as_str))
    ));
    lines.push("}".to_string());
    lines.join("\n")
}
