//! # Environment Module
//!
//! Location types ("dark", "narrow", ...) and the environmental effect resolver.
//!
//! A location lists `(type, stage)` pairs. Each stage may carry multiplicative
//! penalties on named combat statistics. The resolver stacks those penalties
//! into two views: the raw environmental severity and the severity as felt by
//! a hero whose related skill attenuates it.

use crate::{config, Catalog, SkillLevel, SkillProvider, UmbralError, UmbralResult};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Multiplicative effects of one stage.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StageEffects {
    /// Stat name to multiplier in `(0, 1]`
    #[serde(default)]
    pub multipliers: BTreeMap<String, f64>,
}

/// One severity level of a location type.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LocationTypeStage {
    #[serde(default)]
    pub description: String,
    /// Skill that attenuates this stage; falls back to the type's skill
    #[serde(default)]
    pub related_skill: Option<String>,
    #[serde(default)]
    pub effects: Option<StageEffects>,
}

impl LocationTypeStage {
    /// Creates a stage with no skill and no effects.
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            related_skill: None,
            effects: None,
        }
    }

    pub fn with_skill(mut self, skill: impl Into<String>) -> Self {
        self.related_skill = Some(skill.into());
        self
    }

    /// Adds a multiplier to the stage's effects.
    pub fn with_multiplier(mut self, stat: impl Into<String>, multiplier: f64) -> Self {
        self.effects
            .get_or_insert_with(StageEffects::default)
            .multipliers
            .insert(stat.into(), multiplier);
        self
    }
}

/// A named environmental property with 1 to 3 ordered stages.
///
/// # Examples
///
/// ```
/// use umbral::{LocationType, LocationTypeStage};
///
/// let narrow = LocationType::new("narrow").with_stage(
///     1,
///     LocationTypeStage::new("Not much place for maneuvering")
///         .with_skill("Tight maneuvers")
///         .with_multiplier("evasion_points", 0.333),
/// );
/// assert!(narrow.stage(1).is_some());
/// assert!(narrow.stage(2).is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationType {
    pub name: String,
    #[serde(default)]
    pub related_skill: Option<String>,
    pub stages: BTreeMap<u8, LocationTypeStage>,
}

impl LocationType {
    /// Creates a location type with no stages.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            related_skill: None,
            stages: BTreeMap::new(),
        }
    }

    pub fn with_skill(mut self, skill: impl Into<String>) -> Self {
        self.related_skill = Some(skill.into());
        self
    }

    pub fn with_stage(mut self, number: u8, stage: LocationTypeStage) -> Self {
        self.stages.insert(number, stage);
        self
    }

    /// Gets a stage by number.
    pub fn stage(&self, number: u8) -> Option<&LocationTypeStage> {
        self.stages.get(&number)
    }

    /// Skill attenuating the given stage, if any.
    pub fn stage_skill(&self, number: u8) -> Option<&str> {
        self.stage(number)?
            .related_skill
            .as_deref()
            .or(self.related_skill.as_deref())
    }

    /// Validates stage numbering, multipliers and skill references.
    pub fn validate(&self, is_known_skill: impl Fn(&str) -> bool) -> UmbralResult<()> {
        if self.stages.is_empty() {
            return Err(UmbralError::InvalidContent(format!(
                "Location type \"{}\" has no stages",
                self.name
            )));
        }
        if let Some(skill) = &self.related_skill {
            if !is_known_skill(skill) {
                return Err(UmbralError::UnknownSkill(skill.clone()));
            }
        }
        for (number, stage) in &self.stages {
            if *number == 0 || *number > config::MAX_LOCATION_STAGES {
                return Err(UmbralError::InvalidContent(format!(
                    "Location type \"{}\" has stage {} outside 1..={}",
                    self.name,
                    number,
                    config::MAX_LOCATION_STAGES
                )));
            }
            if let Some(skill) = &stage.related_skill {
                if !is_known_skill(skill) {
                    return Err(UmbralError::UnknownSkill(skill.clone()));
                }
            }
            let multipliers = stage.effects.iter().flat_map(|e| e.multipliers.iter());
            for (stat, multiplier) in multipliers {
                if !(*multiplier > 0.0 && *multiplier <= 1.0) {
                    return Err(UmbralError::InvalidContent(format!(
                        "Location type \"{}\" stage {} has {} multiplier {} outside (0, 1]",
                        self.name, number, stat, multiplier
                    )));
                }
            }
        }
        Ok(())
    }
}

fn default_stage() -> u8 {
    1
}

/// A `(type, stage)` reference as written in location content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ZoneTypeEntry {
    #[serde(rename = "type")]
    pub type_name: String,
    #[serde(default = "default_stage")]
    pub stage: u8,
    /// Skill xp gained per tick spent in the location
    #[serde(default)]
    pub xp_gain: u32,
}

impl ZoneTypeEntry {
    pub fn new(type_name: impl Into<String>, stage: u8, xp_gain: u32) -> Self {
        Self {
            type_name: type_name.into(),
            stage,
            xp_gain,
        }
    }
}

/// A profile entry resolved against the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResolvedStage {
    pub type_name: String,
    pub stage: u8,
    pub xp_gain: u32,
    pub related_skill: Option<String>,
    pub multipliers: Option<BTreeMap<String, f64>>,
}

/// Skill xp gained per tick in a location.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillGain {
    pub skill: String,
    pub xp: u32,
}

/// Ambient light of a location, derived from its types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LightLevel {
    Bright,
    Normal,
    Dark,
}

/// Stat multipliers; stats never mentioned read as 1.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Multipliers(BTreeMap<String, f64>);

impl Multipliers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Multiplier for a stat, 1 when no stage affects it.
    pub fn get(&self, stat: &str) -> f64 {
        self.0.get(stat).copied().unwrap_or(1.0)
    }

    /// Stacks another multiplier onto a stat.
    pub fn apply(&mut self, stat: &str, multiplier: f64) {
        *self.0.entry(stat.to_string()).or_insert(1.0) *= multiplier;
    }

    /// Iterates over the stats affected by at least one stage.
    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.0.iter().map(|(stat, value)| (stat.as_str(), *value))
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Combined environmental penalty of a location.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TotalEffect {
    /// Unconditional environmental severity
    pub base_penalty: Multipliers,
    /// Severity after the hero's skills are taken into account
    pub hero_penalty: Multipliers,
}

/// Attenuates a stage multiplier by skill: `k ^ (1 - level / max_level)`.
///
/// # Examples
///
/// ```
/// use umbral::{stage_penalty, SkillLevel};
///
/// assert_eq!(stage_penalty(0.5, SkillLevel::new(0, 10)), 0.5);
/// assert_eq!(stage_penalty(0.5, SkillLevel::new(10, 10)), 1.0);
/// ```
pub fn stage_penalty(multiplier: f64, skill: SkillLevel) -> f64 {
    multiplier.powf(1.0 - skill.progress())
}

/// Ordered environmental profile of a location, validated against a catalog.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EnvironmentalProfile {
    stages: Vec<ResolvedStage>,
}

impl EnvironmentalProfile {
    /// Resolves every entry against the catalog's location types.
    ///
    /// An unknown type or a stage the type does not declare is a content error.
    pub fn new(entries: &[ZoneTypeEntry], catalog: &Catalog) -> UmbralResult<Self> {
        let stages = entries
            .iter()
            .map(|entry| {
                let unknown = || UmbralError::UnknownLocationStage {
                    type_name: entry.type_name.clone(),
                    stage: entry.stage,
                };
                let location_type = catalog.location_type(&entry.type_name).ok_or_else(unknown)?;
                let stage = location_type.stage(entry.stage).ok_or_else(unknown)?;

                Ok(ResolvedStage {
                    type_name: entry.type_name.clone(),
                    stage: entry.stage,
                    xp_gain: entry.xp_gain,
                    related_skill: location_type.stage_skill(entry.stage).map(str::to_string),
                    multipliers: stage.effects.as_ref().map(|e| e.multipliers.clone()),
                })
            })
            .collect::<UmbralResult<Vec<_>>>()?;

        Ok(Self { stages })
    }

    /// Resolved stages in profile order.
    pub fn stages(&self) -> &[ResolvedStage] {
        &self.stages
    }

    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }

    /// Checks if any entry is of the named type.
    pub fn has_type(&self, type_name: &str) -> bool {
        self.stages.iter().any(|s| s.type_name == type_name)
    }

    /// Computes the stacked base and hero penalties.
    ///
    /// Stages without a related skill or without effects contribute nothing.
    pub fn total_effect<S: SkillProvider + ?Sized>(&self, skills: &S) -> UmbralResult<TotalEffect> {
        let mut effect = TotalEffect::default();

        for stage in &self.stages {
            let (Some(skill), Some(multipliers)) = (&stage.related_skill, &stage.multipliers)
            else {
                continue;
            };
            let level = skills.get_skill(skill)?;

            for (stat, multiplier) in multipliers {
                effect.base_penalty.apply(stat, *multiplier);
                effect
                    .hero_penalty
                    .apply(stat, stage_penalty(*multiplier, level));
            }
        }

        log::trace!(
            "Resolved environmental effect: base {:?}, hero {:?}",
            effect.base_penalty,
            effect.hero_penalty
        );
        Ok(effect)
    }

    /// Skill xp gained per tick from stages with a related skill.
    pub fn gained_skills(&self) -> Vec<SkillGain> {
        self.stages
            .iter()
            .filter_map(|stage| {
                stage.related_skill.as_ref().map(|skill| SkillGain {
                    skill: skill.clone(),
                    xp: stage.xp_gain,
                })
            })
            .collect()
    }

    /// Bright wins over dark; everything else is normal.
    pub fn light_level(&self) -> LightLevel {
        if self.has_type("bright") {
            LightLevel::Bright
        } else if self.has_type("dark") {
            LightLevel::Dark
        } else {
            LightLevel::Normal
        }
    }
}
