//! # Activities Module
//!
//! Location activities and the gathering efficiency curve.
//!
//! A gathering activity interpolates its timing, drop chances and yields
//! between a "no skill" endpoint and a "max skill" endpoint. The position
//! between the two is the aggregate skill modifier `m` in `[0, 1]`, and every
//! quantity moves geometrically: `base * (max / base) ^ m`.

use crate::{config, Catalog, CountRange, SkillProvider, UmbralError, UmbralResult};
use serde::{Deserialize, Serialize};

/// An activity kind shared by many locations, e.g. "woodcutting".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityDefinition {
    pub name: String,
    /// Skills whose levels drive the activity's efficiency
    #[serde(default)]
    pub base_skills: Vec<String>,
}

impl ActivityDefinition {
    pub fn new(name: impl Into<String>, base_skills: &[&str]) -> Self {
        Self {
            name: name.into(),
            base_skills: base_skills.iter().map(|s| s.to_string()).collect(),
        }
    }
}

/// Skill levels over which an activity's efficiency scales.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillWindow {
    pub min_required_level: u32,
    pub max_useful_level: u32,
}

impl SkillWindow {
    pub fn new(min_required_level: u32, max_useful_level: u32) -> Self {
        Self {
            min_required_level,
            max_useful_level,
        }
    }

    /// Number of levels in the window, both ends included.
    pub fn size(&self) -> u32 {
        self.max_useful_level - self.min_required_level + 1
    }

    /// Normalized standing of a skill level inside the window, in `[0, 1]`.
    ///
    /// # Examples
    ///
    /// ```
    /// use umbral::SkillWindow;
    ///
    /// let window = SkillWindow::new(1, 10);
    /// assert_eq!(window.standing(0), 0.0);
    /// assert_eq!(window.standing(5), 0.5);
    /// assert_eq!(window.standing(30), 1.0);
    /// ```
    pub fn standing(&self, level: u32) -> f64 {
        let size = self.size() as i64;
        let reached = (level as i64 - self.min_required_level as i64 + 1).clamp(0, size);
        reached as f64 / size as f64
    }

    fn validate(&self) -> UmbralResult<()> {
        if self.max_useful_level <= self.min_required_level {
            return Err(UmbralError::InvalidContent(format!(
                "Skill window [{}, {}] must have max above min",
                self.min_required_level, self.max_useful_level
            )));
        }
        Ok(())
    }
}

/// A quantity's value at the no-skill and max-skill ends.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScalingPair {
    pub base: f64,
    pub max: f64,
}

impl ScalingPair {
    pub fn new(base: f64, max: f64) -> Self {
        Self { base, max }
    }

    /// Value at modifier `m`, hitting both endpoints exactly.
    pub fn at(&self, m: f64) -> f64 {
        geometric_interpolate(self.base, self.max, m)
    }

    fn validate(&self, what: &str) -> UmbralResult<()> {
        let positive = |v: f64| v.is_finite() && v > 0.0;
        if !positive(self.base) || !positive(self.max) {
            return Err(UmbralError::InvalidContent(format!(
                "{} endpoints ({}, {}) must be strictly positive",
                what, self.base, self.max
            )));
        }
        Ok(())
    }
}

/// Interpolates geometrically between `base` (m = 0) and `max` (m = 1).
///
/// # Examples
///
/// ```
/// use umbral::geometric_interpolate;
///
/// assert_eq!(geometric_interpolate(2.0, 8.0, 0.0), 2.0);
/// assert_eq!(geometric_interpolate(2.0, 8.0, 0.5), 4.0);
/// assert_eq!(geometric_interpolate(2.0, 8.0, 1.0), 8.0);
/// ```
pub fn geometric_interpolate(base: f64, max: f64, m: f64) -> f64 {
    if m <= 0.0 {
        base
    } else if m >= 1.0 {
        max
    } else {
        base * (max / base).powf(m)
    }
}

/// One resource a gathering activity can yield.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResourceYield {
    /// Item identifier of the resource
    pub name: String,
    /// Chance per gathering cycle
    pub chance: ScalingPair,
    /// Yield range with no skill
    pub count_low: CountRange,
    /// Yield range at max skill
    pub count_high: CountRange,
}

impl ResourceYield {
    fn validate(&self) -> UmbralResult<()> {
        self.chance.validate(&format!("Chance of \"{}\"", self.name))?;
        if self.chance.base > 1.0 || self.chance.max > 1.0 {
            return Err(UmbralError::InvalidContent(format!(
                "Chance of \"{}\" exceeds 1",
                self.name
            )));
        }
        for range in [&self.count_low, &self.count_high] {
            range.validate(&self.name)?;
            if range.min == 0 {
                return Err(UmbralError::InvalidContent(format!(
                    "Yield of \"{}\" must be strictly positive",
                    self.name
                )));
            }
        }
        Ok(())
    }
}

/// Skill-scaling configuration of a gathering activity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GatheringConfig {
    #[serde(default)]
    pub scales_with_skill: bool,
    pub skill_required: SkillWindow,
    /// Ticks needed per gathering cycle
    pub time_period: ScalingPair,
    pub resources: Vec<ResourceYield>,
}

/// Expected yield of one resource at the current skill standing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResourceOutlook {
    pub name: String,
    pub count: CountRange,
    pub chance: f64,
}

/// Skill-scaled timing and yield profile of a gathering activity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GatheringEfficiency {
    pub time_needed: u32,
    pub resources: Vec<ResourceOutlook>,
}

impl GatheringConfig {
    /// Fails on an inverted skill window or any non-positive endpoint.
    pub fn validate(&self) -> UmbralResult<()> {
        self.skill_required.validate()?;
        self.time_period.validate("Gathering time")?;
        for resource in &self.resources {
            resource.validate()?;
        }
        Ok(())
    }

    /// Aggregate skill modifier `m` in `[0, 1]`.
    ///
    /// Non-scaling activities always sit at the base endpoint.
    pub fn skill_modifier<S: SkillProvider + ?Sized>(
        &self,
        base_skills: &[String],
        skills: &S,
    ) -> UmbralResult<f64> {
        if !self.scales_with_skill || base_skills.is_empty() {
            return Ok(0.0);
        }
        let mut sum = 0.0;
        for name in base_skills {
            let level = skills.get_skill(name)?;
            sum += self.skill_required.standing(level.current_level);
        }
        Ok(sum / base_skills.len() as f64)
    }

    /// Efficiency at a given skill modifier.
    pub fn efficiency_at(&self, m: f64) -> GatheringEfficiency {
        let resources = self
            .resources
            .iter()
            .map(|resource| {
                let count = |low: u32, high: u32| {
                    geometric_interpolate(low as f64, high as f64, m).round() as u32
                };
                ResourceOutlook {
                    name: resource.name.clone(),
                    count: CountRange::new(
                        count(resource.count_low.min, resource.count_high.min),
                        count(resource.count_low.max, resource.count_high.max),
                    ),
                    chance: resource.chance.at(m),
                }
            })
            .collect();

        GatheringEfficiency {
            time_needed: self.time_period.at(m).floor() as u32,
            resources,
        }
    }

    /// Efficiency for the activity's base skills at their current levels.
    pub fn efficiency<S: SkillProvider + ?Sized>(
        &self,
        definition: &ActivityDefinition,
        skills: &S,
    ) -> UmbralResult<GatheringEfficiency> {
        let m = self.skill_modifier(&definition.base_skills, skills)?;
        log::debug!("Gathering modifier for \"{}\": {:.3}", definition.name, m);
        Ok(self.efficiency_at(m))
    }
}

/// Hours of the game day during which an activity is available.
///
/// Windows with `start_hour > end_hour` wrap past midnight. A window with
/// `start_hour == end_hour` is empty and rejected when an activity is validated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AvailabilityWindow {
    pub start_hour: u8,
    pub end_hour: u8,
}

impl AvailabilityWindow {
    pub fn new(start_hour: u8, end_hour: u8) -> Self {
        Self {
            start_hour,
            end_hour,
        }
    }

    /// Checks if the window is open at the given hour.
    pub fn contains(&self, hour: u8) -> bool {
        if self.start_hour <= self.end_hour {
            hour >= self.start_hour && hour < self.end_hour
        } else {
            hour >= self.start_hour || hour < self.end_hour
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_working_period() -> u32 {
    config::DEFAULT_WORKING_PERIOD
}

fn default_skill_xp_per_tick() -> u32 {
    config::DEFAULT_SKILL_XP_PER_TICK
}

/// An activity offered at a location.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationActivity {
    /// Name of the [`ActivityDefinition`] this is an instance of
    pub activity_name: String,
    /// Text of the option that starts the activity
    pub starting_text: String,
    #[serde(default = "default_true")]
    pub is_unlocked: bool,
    #[serde(default)]
    pub unlock_text: Option<String>,
    /// Minutes that must be worked to earn anything; jobs only
    #[serde(default = "default_working_period")]
    pub working_period: u32,
    /// Available around the clock
    #[serde(default)]
    pub infinite: bool,
    #[serde(default)]
    pub availability: Option<AvailabilityWindow>,
    #[serde(default = "default_skill_xp_per_tick")]
    pub skill_xp_per_tick: u32,
    #[serde(default = "default_true")]
    pub require_tool: bool,
    #[serde(default)]
    pub gathering: Option<GatheringConfig>,
}

impl LocationActivity {
    /// Creates an unlocked, always-available activity with default settings.
    pub fn new(activity_name: impl Into<String>, starting_text: impl Into<String>) -> Self {
        Self {
            activity_name: activity_name.into(),
            starting_text: starting_text.into(),
            is_unlocked: true,
            unlock_text: None,
            working_period: default_working_period(),
            infinite: true,
            availability: None,
            skill_xp_per_tick: default_skill_xp_per_tick(),
            require_tool: true,
            gathering: None,
        }
    }

    /// Restricts the activity to an availability window.
    pub fn available_between(mut self, start_hour: u8, end_hour: u8) -> Self {
        self.infinite = false;
        self.availability = Some(AvailabilityWindow::new(start_hour, end_hour));
        self
    }

    pub fn with_gathering(mut self, gathering: GatheringConfig) -> Self {
        self.gathering = Some(gathering);
        self
    }

    /// Validates the activity against the catalog.
    pub fn into_validated(mut self, catalog: &Catalog) -> UmbralResult<Self> {
        let definition = catalog.require_activity(&self.activity_name)?;

        if self.infinite && self.availability.is_some() {
            log::warn!(
                "Activity \"{}\" is available all the time, its availability window will be ignored",
                self.activity_name
            );
            self.availability = None;
        }
        if !self.infinite {
            let window = self.availability.ok_or_else(|| {
                UmbralError::InvalidContent(format!(
                    "Activity \"{}\" is not infinitely available and requires an availability window",
                    self.activity_name
                ))
            })?;
            if window.start_hour > 23 || window.end_hour > 24 {
                return Err(UmbralError::InvalidContent(format!(
                    "Activity \"{}\" has availability hours outside the day",
                    self.activity_name
                )));
            }
            if window.start_hour == window.end_hour {
                return Err(UmbralError::InvalidContent(format!(
                    "Activity \"{}\" has an empty availability window, use infinite availability instead",
                    self.activity_name
                )));
            }
        }

        if let Some(gathering) = &self.gathering {
            gathering.validate()?;
            if gathering.scales_with_skill && definition.base_skills.is_empty() {
                return Err(UmbralError::InvalidContent(format!(
                    "Activity \"{}\" scales with skill but has no base skills",
                    self.activity_name
                )));
            }
        }
        Ok(self)
    }

    /// Checks if the activity can be started at the given game hour.
    pub fn is_available(&self, hour: u8) -> bool {
        self.infinite || self.availability.is_some_and(|w| w.contains(hour))
    }

    /// Gathering efficiency for the player's current skills, if this is a gathering activity.
    pub fn gathering_efficiency<S: SkillProvider + ?Sized>(
        &self,
        catalog: &Catalog,
        skills: &S,
    ) -> UmbralResult<Option<GatheringEfficiency>> {
        let Some(gathering) = &self.gathering else {
            return Ok(None);
        };
        let definition = catalog.require_activity(&self.activity_name)?;
        gathering.efficiency(definition, skills).map(Some)
    }
}
