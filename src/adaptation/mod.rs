//! Architectural adaptation packs.
//!
//! A pack maps building subsystems to ordered guidance clauses. Clauses stay
//! separate until rendering, where they are joined with `"; "`.

use std::fmt;

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::biomes::Biome;
use crate::climate::labels::labeled_enum;
use crate::climate::{DiurnalSwing, FLASH_FLOODS, SAND_DUST_STORMS};

/// Separator between clauses in rendered guidance.
pub const CLAUSE_SEPARATOR: &str = "; ";

labeled_enum! {
    /// Building subsystem addressed by a guidance entry.
    pub enum AdaptationKey("adaptation_key") {
        Envelope => "envelope",
        Openings => "openings",
        Ventilation => "ventilation",
        Roof => "roof",
        Urban => "urban",
    }
}

/// Template family selected from the biome.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TemplateFamily {
    /// Hot Desert and both Steppe variants.
    AridHot,
    Tropical,
    /// Marine Temperate and Warm Temperate.
    Temperate,
    /// Humid Continental and Boreal / Subpolar.
    ColdContinental,
    Tundra,
}

impl TemplateFamily {
    /// Family for `biome`. Cold Desert and Mixed / Transitional have no template.
    pub fn for_biome(biome: Biome) -> Option<Self> {
        match biome {
            Biome::HotDesert | Biome::SteppeWarm | Biome::SteppeCold => Some(Self::AridHot),
            Biome::TropicalRainMonsoon => Some(Self::Tropical),
            Biome::MarineTemperate | Biome::WarmTemperate => Some(Self::Temperate),
            Biome::HumidContinental | Biome::BorealSubpolar => Some(Self::ColdContinental),
            Biome::TundraIce => Some(Self::Tundra),
            Biome::ColdDesert | Biome::MixedTransitional => None,
        }
    }

    /// Base guidance for every key, in key order.
    fn template(self) -> [(AdaptationKey, &'static [&'static str]); 5] {
        use AdaptationKey::*;
        match self {
            Self::AridHot => [
                (Envelope, &["thick mass walls", "light exterior albedo", "exterior shading"]),
                (Openings, &["small recessed windows", "shutters", "dust seals/filters"]),
                (Ventilation, &["stack effect + courtyards", "optional wind-catchers"]),
                (Roof, &["moderate pitch", "reflective", "oversized scuppers for cloudbursts"]),
                (Urban, &["narrow shaded streets", "arcades", "retention basins in wadis"]),
            ],
            Self::Tropical => [
                (Envelope, &["lightweight, permeable walls", "mould-resistant finishes"]),
                (Openings, &["large operable windows", "screens", "deep overhangs"]),
                (Ventilation, &["cross-ventilation", "ventilated ridges"]),
                (Roof, &["steep roof", "rain-screens", "generous gutters"]),
                (Urban, &["permeable grid", "shaded walkways", "storm channels"]),
            ],
            Self::Temperate => [
                (Envelope, &["moderate insulation", "rain-screen facades", "capillary breaks"]),
                (Openings, &["balanced glazing", "wind-bracing details"]),
                (Ventilation, &["mixed-mode (natural + mechanical fallback)"]),
                (Roof, &["30–45° pitched", "robust flashing"]),
                (Urban, &["rain gardens", "bioswales", "salt-resistant metals near coast"]),
            ],
            Self::ColdContinental => [
                (Envelope, &["super-insulation", "thermal bridges minimised"]),
                (Openings, &["compact window-to-wall", "triple glazing", "vestibules"]),
                (Ventilation, &["mechanical with heat recovery"]),
                (Roof, &["steep roofs for snow shed", "dark absorptive finishes"]),
                (Urban, &["windbreaks", "compact massing", "enclosed links"]),
            ],
            Self::Tundra => [
                (Envelope, &["elevated structures", "permafrost-compatible foundations"]),
                (Openings, &["small apertures", "storm shutters"]),
                (Ventilation, &["mechanical with heat recovery"]),
                (Roof, &["low wind profiles", "snow fencing"]),
                (Urban, &["enclosed walkways", "service tunnels"]),
            ],
        }
    }
}

/// Ordered key → clause-list mapping. Keys keep insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AdaptationPack {
    entries: Vec<(AdaptationKey, Vec<String>)>,
}

impl AdaptationPack {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pack pre-filled with the template for `family`.
    pub fn from_template(family: TemplateFamily) -> Self {
        let mut pack = Self::new();
        for (key, clauses) in family.template() {
            for clause in clauses {
                pack.push(key, *clause);
            }
        }
        pack
    }

    /// Append a clause, creating the key at the end if it is missing.
    pub fn push(&mut self, key: AdaptationKey, clause: impl Into<String>) {
        let clause = clause.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some((_, clauses)) => clauses.push(clause),
            None => self.entries.push((key, vec![clause])),
        }
    }

    pub fn clauses(&self, key: AdaptationKey) -> Option<&[String]> {
        self.entries
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, clauses)| clauses.as_slice())
    }

    /// Guidance text for `key`, clauses joined with `"; "`.
    pub fn text(&self, key: AdaptationKey) -> Option<String> {
        self.clauses(key).map(|c| c.join(CLAUSE_SEPARATOR))
    }

    /// Populated keys with their joined text, in insertion order.
    pub fn iter_text(&self) -> impl Iterator<Item = (AdaptationKey, String)> + '_ {
        self.entries
            .iter()
            .map(|(k, clauses)| (*k, clauses.join(CLAUSE_SEPARATOR)))
    }

    pub fn keys(&self) -> impl Iterator<Item = AdaptationKey> + '_ {
        self.entries.iter().map(|(k, _)| *k)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Build the adaptation pack for a biome.
///
/// Modifiers apply on top of the template independently of each other:
/// sand/dust storms add sand baffles to openings, flash floods add flood
/// detailing to urban, and a high diurnal swing adds internal thermal mass to
/// the envelope.
pub fn build_adaptation_pack(biome: Biome, diurnal: DiurnalSwing, extremes: &[String]) -> AdaptationPack {
    let mut pack = match TemplateFamily::for_biome(biome) {
        Some(family) => AdaptationPack::from_template(family),
        None => AdaptationPack::new(),
    };

    let has = |flag: &str| extremes.iter().any(|e| e == flag);

    if has(SAND_DUST_STORMS) {
        pack.push(AdaptationKey::Openings, "sand baffles");
    }
    if has(FLASH_FLOODS) {
        pack.push(AdaptationKey::Urban, "raised thresholds");
        pack.push(AdaptationKey::Urban, "flood routing");
    }
    if diurnal == DiurnalSwing::High {
        pack.push(AdaptationKey::Envelope, "internal thermal mass");
    }

    pack
}

impl Serialize for AdaptationPack {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, text) in self.iter_text() {
            map.serialize_entry(key.label(), &text)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for AdaptationPack {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct PackVisitor;

        impl<'de> Visitor<'de> for PackVisitor {
            type Value = AdaptationPack;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a map of adaptation key to guidance text")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
                let mut pack = AdaptationPack::new();
                while let Some((key, text)) = access.next_entry::<AdaptationKey, String>()? {
                    if pack.clauses(key).is_some() {
                        return Err(serde::de::Error::custom(format!("duplicate adaptation key `{key}`")));
                    }
                    for clause in text.split(CLAUSE_SEPARATOR) {
                        pack.push(key, clause);
                    }
                }
                Ok(pack)
            }
        }

        deserializer.deserialize_map(PackVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extremes(flags: &[&str]) -> Vec<String> {
        flags.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn hot_desert_with_all_modifiers() {
        let pack = build_adaptation_pack(
            Biome::HotDesert,
            DiurnalSwing::High,
            &extremes(&[SAND_DUST_STORMS, FLASH_FLOODS]),
        );
        assert_eq!(pack.len(), 5);
        assert_eq!(
            pack.text(AdaptationKey::Envelope).unwrap(),
            "thick mass walls; light exterior albedo; exterior shading; internal thermal mass"
        );
        assert_eq!(
            pack.text(AdaptationKey::Openings).unwrap(),
            "small recessed windows; shutters; dust seals/filters; sand baffles"
        );
        assert_eq!(
            pack.text(AdaptationKey::Urban).unwrap(),
            "narrow shaded streets; arcades; retention basins in wadis; raised thresholds; flood routing"
        );
    }

    #[test]
    fn template_keys_in_fixed_order() {
        let pack = build_adaptation_pack(Biome::TundraIce, DiurnalSwing::Medium, &[]);
        let keys: Vec<_> = pack.keys().collect();
        assert_eq!(keys, AdaptationKey::ALL.to_vec());
    }

    #[test]
    fn untemplated_biomes_start_empty() {
        assert!(build_adaptation_pack(Biome::ColdDesert, DiurnalSwing::Low, &[]).is_empty());
        assert!(build_adaptation_pack(Biome::MixedTransitional, DiurnalSwing::Medium, &[]).is_empty());
    }

    #[test]
    fn modifiers_create_missing_keys_without_separator() {
        let pack = build_adaptation_pack(
            Biome::MixedTransitional,
            DiurnalSwing::High,
            &extremes(&[FLASH_FLOODS, SAND_DUST_STORMS]),
        );
        let keys: Vec<_> = pack.keys().collect();
        assert_eq!(
            keys,
            vec![AdaptationKey::Openings, AdaptationKey::Urban, AdaptationKey::Envelope]
        );
        assert_eq!(pack.text(AdaptationKey::Openings).unwrap(), "sand baffles");
        assert_eq!(pack.text(AdaptationKey::Envelope).unwrap(), "internal thermal mass");
        assert!(pack.text(AdaptationKey::Roof).is_none());
    }

    #[test]
    fn json_keeps_insertion_order() {
        let pack = build_adaptation_pack(Biome::ColdDesert, DiurnalSwing::High, &extremes(&[FLASH_FLOODS]));
        let json = serde_json::to_string(&pack).unwrap();
        assert_eq!(
            json,
            r#"{"urban":"raised thresholds; flood routing","envelope":"internal thermal mass"}"#
        );
        let back: AdaptationPack = serde_json::from_str(&json).unwrap();
        assert_eq!(back, pack);
    }

    #[test]
    fn unknown_keys_are_rejected() {
        assert!(serde_json::from_str::<AdaptationPack>(r#"{"plumbing":"copper"}"#).is_err());
        assert!(serde_json::from_str::<AdaptationPack>(r#"{"roof":1}"#).is_err());
    }

    #[test]
    fn unknown_key_label_names_the_field() {
        match "plumbing".parse::<AdaptationKey>().unwrap_err() {
            crate::climate::ClimateError::InvalidInput { field, value, .. } => {
                assert_eq!(field, "adaptation_key");
                assert_eq!(value, "plumbing");
            }
        }
    }
}
