//! Biome resolution from the classified climate fields.
//!
//! A priority-ordered decision list over latitude band, humidity bracket,
//! seasonality and continentality. The first matching rule wins and every
//! combination resolves to exactly one [`Biome`].

use crate::climate::labels::labeled_enum;
use crate::climate::{Continentality, Humidity, LatBand, Seasonality};

labeled_enum! {
    /// Biome label. Parsing also accepts the v0.2 labels with Köppen codes.
    pub enum Biome("biome_guess") {
        TundraIce => "Tundra / Ice" | "Tundra / Ice (ET/EF)",
        BorealSubpolar => "Boreal / Subpolar" | "Boreal / Subpolar (Dfc/Dfd)",
        HotDesert => "Hot Desert" | "Hot Desert (BWh)",
        ColdDesert => "Cold Desert" | "Cold Desert (BWk)",
        SteppeWarm => "Steppe (warm variant)" | "Steppe (BSh)",
        SteppeCold => "Steppe (cold variant)" | "Steppe (BSk)",
        TropicalRainMonsoon => "Tropical Rain/Monsoon" | "Tropical Rain/Monsoon (Af/Am/Aw)",
        MarineTemperate => "Marine Temperate" | "Marine Temperate (Cfb/Csb)",
        HumidContinental => "Humid Continental" | "Humid Continental (Dfa/Dfb)",
        WarmTemperate => "Warm Temperate" | "Warm Temperate (Cfa/Cwa)",
        /// Fallback when no rule matches.
        MixedTransitional => "Mixed / Transitional",
    }
}

impl Biome {
    /// Köppen–Geiger code hint, if the biome maps to one.
    pub fn koppen(self) -> Option<&'static str> {
        match self {
            Biome::TundraIce => Some("ET/EF"),
            Biome::BorealSubpolar => Some("Dfc/Dfd"),
            Biome::HotDesert => Some("BWh"),
            Biome::ColdDesert => Some("BWk"),
            Biome::SteppeWarm => Some("BSh"),
            Biome::SteppeCold => Some("BSk"),
            Biome::TropicalRainMonsoon => Some("Af/Am/Aw"),
            Biome::MarineTemperate => Some("Cfb/Csb"),
            Biome::HumidContinental => Some("Dfa/Dfb"),
            Biome::WarmTemperate => Some("Cfa/Cwa"),
            Biome::MixedTransitional => None,
        }
    }
}

/// Resolve a biome; first matching rule wins.
///
/// `MixedTransitional` is reachable for a tropical band with a temperate
/// bracket, and is kept as a fallback.
pub fn resolve_biome(
    band: LatBand,
    humidity: Humidity,
    seasonality: Seasonality,
    continentality: Continentality,
) -> Biome {
    match band {
        LatBand::Polar => return Biome::TundraIce,
        LatBand::Subpolar => return Biome::BorealSubpolar,
        _ => {}
    }

    let warm_band = matches!(band, LatBand::Tropical | LatBand::Subtropical);

    match humidity {
        Humidity::Arid if warm_band => return Biome::HotDesert,
        Humidity::Arid => return Biome::ColdDesert,
        Humidity::SemiArid if warm_band || band == LatBand::Temperate => return Biome::SteppeWarm,
        Humidity::SemiArid => return Biome::SteppeCold,
        Humidity::Humid if band == LatBand::Tropical => return Biome::TropicalRainMonsoon,
        _ => {}
    }

    if matches!(band, LatBand::Temperate | LatBand::Subtropical) {
        if continentality == Continentality::Low {
            return Biome::MarineTemperate;
        }
        if seasonality == Seasonality::High && continentality == Continentality::High {
            return Biome::HumidContinental;
        }
        return Biome::WarmTemperate;
    }

    Biome::MixedTransitional
}
