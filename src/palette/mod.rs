//! Sky and light palette synthesis.

use crate::climate::{CurrentBias, DiurnalSwing, Humidity};

/// Ordered palette clauses: base light, dust haze, cold-current overcast, twilight.
pub fn palette_clauses(
    humidity: Humidity,
    dust: bool,
    bias: CurrentBias,
    diurnal: DiurnalSwing,
) -> Vec<&'static str> {
    let mut parts = Vec::with_capacity(4);

    parts.push(match humidity {
        Humidity::Arid | Humidity::SemiArid => "clear high-contrast light",
        Humidity::Humid => "diffuse, saturated light",
        Humidity::Temperate => "tempered daylight",
    });

    if dust {
        parts.push("frequent dust haze");
    }
    if bias == CurrentBias::Cold {
        parts.push("milk-blue overcast episodes");
    }
    match diurnal {
        DiurnalSwing::High => parts.push("indigo-violet twilight, strong golden hour"),
        DiurnalSwing::Low => parts.push("soft transitions, narrow golden hour"),
        DiurnalSwing::Medium => {}
    }

    parts
}

/// Palette text, clauses joined with ", ".
pub fn sky_palette(humidity: Humidity, dust: bool, bias: CurrentBias, diurnal: DiurnalSwing) -> String {
    palette_clauses(humidity, dust, bias, diurnal).join(", ")
}
