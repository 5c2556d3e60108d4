//! Humidity bracket adjustment for currents and rain shadow.

use super::classify::{CurrentBias, Humidity, RainShadow};

/// Shift the precipitation-derived bracket for ocean current and rain shadow.
///
/// Steps run in order and each sees the previous result:
/// 1. warm current: one bracket wetter
/// 2. cold current: unchanged
/// 3. strong rain shadow: one bracket drier
/// 4. moderate rain shadow: one bracket drier if still temperate or humid
pub fn adjust_humidity(base: Humidity, bias: CurrentBias, shadow: RainShadow) -> Humidity {
    let mut humidity = base;

    if bias == CurrentBias::Warm {
        humidity = humidity.wetter();
    }
    // Cold currents keep the bracket as is.

    match shadow {
        RainShadow::Strong => humidity = humidity.drier(),
        RainShadow::Moderate if humidity >= Humidity::Temperate => humidity = humidity.drier(),
        RainShadow::Moderate | RainShadow::None => {}
    }

    humidity
}
