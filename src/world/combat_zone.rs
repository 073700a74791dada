//! # Combat Zones
//!
//! Locations that produce enemy encounters and track how often they were cleared.

use crate::{
    config, Atlas, Catalog, EncounterGenerator, EnemyInstance, EnvironmentalProfile, LightLevel,
    Reward, SkillGain, SkillProvider, StaticText, TextProvider, TotalEffect, Unlock,
    UnlockProvider, UmbralError, UmbralResult, ZoneTypeEntry,
};
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::sync::Arc;

fn default_true() -> bool {
    true
}

fn default_group_size() -> (i32, i32) {
    (1, 1)
}

fn default_clear_target() -> u32 {
    config::DEFAULT_CLEAR_TARGET
}

/// Content definition of a combat zone.
///
/// | Field | Required | Default |
/// |---|---|---|
/// | `name` | yes | |
/// | `parent_location` | yes | |
/// | `id` | no | the name |
/// | `description` | no | empty |
/// | `is_unlocked` | no | `true` |
/// | `is_finished` | no | `false` |
/// | `types` | no | none |
/// | `enemy_groups_list` | one of the two lists | empty |
/// | `enemies_list` | one of the two lists | empty |
/// | `enemy_group_size` | no | `(1, 1)`, clamped to `[1, 8]` |
/// | `enemy_count` | no | 30 |
/// | `enemy_stat_variation` | no | 0, clamped to `>= 0` |
/// | `first_reward`, `repeatable_reward` | no | nothing |
/// | `is_challenge` | no | `false` |
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CombatZoneConfig {
    pub name: String,
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub description: String,
    #[serde(default = "default_true")]
    pub is_unlocked: bool,
    #[serde(default)]
    pub is_finished: bool,
    #[serde(default)]
    pub types: Vec<ZoneTypeEntry>,
    /// Predefined enemy teams, names only
    #[serde(default)]
    pub enemy_groups_list: Vec<Vec<String>>,
    /// Loose roster, used when there are no predefined teams
    #[serde(default)]
    pub enemies_list: Vec<String>,
    #[serde(default = "default_group_size")]
    pub enemy_group_size: (i32, i32),
    /// Groups to defeat for one clear
    #[serde(default = "default_clear_target")]
    pub enemy_count: u32,
    #[serde(default)]
    pub enemy_stat_variation: f64,
    pub parent_location: String,
    #[serde(default)]
    pub leave_text: Option<String>,
    #[serde(default)]
    pub unlock_text: Option<String>,
    #[serde(default)]
    pub first_reward: Reward,
    #[serde(default)]
    pub repeatable_reward: Reward,
    #[serde(default)]
    pub is_challenge: bool,
    #[serde(default)]
    pub tags: BTreeSet<String>,
}

impl CombatZoneConfig {
    /// Creates a repeatable zone config with every optional field at its default.
    pub fn new(name: impl Into<String>, parent_location: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            id: None,
            description: String::new(),
            is_unlocked: true,
            is_finished: false,
            types: Vec::new(),
            enemy_groups_list: Vec::new(),
            enemies_list: Vec::new(),
            enemy_group_size: default_group_size(),
            enemy_count: default_clear_target(),
            enemy_stat_variation: 0.0,
            parent_location: parent_location.into(),
            leave_text: None,
            unlock_text: None,
            first_reward: Reward::default(),
            repeatable_reward: Reward::default(),
            is_challenge: false,
            tags: BTreeSet::new(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Creates a challenge zone config: clearable once, no stat variation.
    pub fn challenge(name: impl Into<String>, parent_location: impl Into<String>) -> Self {
        Self {
            is_challenge: true,
            ..Self::new(name, parent_location)
        }
    }
}

/// Inclusive group size range of a loose roster.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupSize {
    pub min: u32,
    pub max: u32,
}

impl GroupSize {
    /// Clamps both bounds to the legal range, warning about every correction.
    pub fn clamped(raw: (i32, i32), zone: &str) -> Self {
        let legal = config::MIN_GROUP_SIZE as i32..=config::MAX_GROUP_SIZE as i32;
        let clamp = |value: i32, which: &str| {
            let corrected = value.clamp(*legal.start(), *legal.end());
            if corrected != value {
                log::warn!(
                    "{} enemy group size in zone \"{}\" is set to unallowed value of {} and was corrected to {}",
                    which,
                    zone,
                    value,
                    corrected
                );
            }
            corrected as u32
        };
        let min = clamp(raw.0, "Minimum");
        let mut max = clamp(raw.1, "Maximum");
        if max < min {
            log::warn!(
                "Maximum enemy group size in zone \"{}\" is below the minimum of {} and was raised to it",
                zone,
                min
            );
            max = min;
        }
        Self { min, max }
    }
}

/// Where a zone's enemies come from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum EnemyPool {
    /// Predefined groups, one picked at random per encounter
    Groups(Vec<Vec<String>>),
    /// Loose roster drawn from with replacement
    Roster {
        enemies: Vec<String>,
        group_size: GroupSize,
    },
}

/// What a completed clear grants.
#[derive(Debug, Clone, PartialEq)]
pub struct ClearOutcome {
    /// Present only on the first clear
    pub first_reward: Option<Reward>,
    /// Granted on every clear, the first included
    pub repeatable_reward: Reward,
    /// Extra unlocks from the zone's unlock provider
    pub unlocks: Vec<Unlock>,
    /// The zone accepts no further encounters
    pub zone_finished: bool,
}

/// A validated combat zone.
#[derive(Debug, Clone)]
pub struct CombatZone {
    pub name: String,
    pub id: String,
    pub parent_location: String,
    description: Arc<dyn TextProvider>,
    other_unlocks: Option<Arc<dyn UnlockProvider>>,
    pub is_unlocked: bool,
    is_finished: bool,
    pub environment: EnvironmentalProfile,
    enemy_pool: EnemyPool,
    stat_variation: f64,
    clear_target: u32,
    groups_defeated: u32,
    pub first_reward: Reward,
    pub repeatable_reward: Reward,
    /// False for challenge zones, which can be cleared only once
    pub repeatable: bool,
    pub leave_text: Option<String>,
    pub unlock_text: Option<String>,
    pub tags: BTreeSet<String>,
}

impl CombatZone {
    /// Validates a zone definition against the catalog and the registered locations.
    pub fn new(config: CombatZoneConfig, catalog: &Catalog, atlas: &Atlas) -> UmbralResult<Self> {
        let name = config.name;

        if !atlas.contains_location(&config.parent_location) {
            return Err(UmbralError::UnknownLocation(config.parent_location));
        }
        if config.enemy_groups_list.is_empty() && config.enemies_list.is_empty() {
            return Err(UmbralError::InvalidContent(format!(
                "No enemies provided for zone \"{}\"",
                name
            )));
        }
        if config.enemy_groups_list.iter().any(Vec::is_empty) {
            return Err(UmbralError::InvalidContent(format!(
                "Zone \"{}\" has an empty predefined group",
                name
            )));
        }
        let all_enemies = config
            .enemy_groups_list
            .iter()
            .flatten()
            .chain(config.enemies_list.iter());
        for enemy in all_enemies {
            catalog.require_enemy(enemy)?;
        }
        if config.enemy_count == 0 {
            return Err(UmbralError::InvalidContent(format!(
                "Zone \"{}\" needs at least one defeated group per clear",
                name
            )));
        }

        let enemy_pool = if config.enemy_groups_list.is_empty() {
            EnemyPool::Roster {
                enemies: config.enemies_list,
                group_size: GroupSize::clamped(config.enemy_group_size, &name),
            }
        } else {
            EnemyPool::Groups(config.enemy_groups_list)
        };

        let mut stat_variation = config.enemy_stat_variation;
        if stat_variation.is_nan() || stat_variation < 0.0 {
            log::warn!(
                "Stat variation for enemies in zone \"{}\" is set to unallowed value and was corrected to a default 0",
                name
            );
            stat_variation = 0.0;
        }
        if config.is_challenge && stat_variation != 0.0 {
            log::warn!(
                "Challenge zone \"{}\" cannot vary enemy stats, variation was set to 0",
                name
            );
            stat_variation = 0.0;
        }

        let environment = EnvironmentalProfile::new(&config.types, catalog)?;
        let mut tags = config.tags;
        tags.insert("Combat zone".to_string());

        Ok(Self {
            id: config.id.unwrap_or_else(|| name.clone()),
            name,
            parent_location: config.parent_location,
            description: Arc::new(StaticText(config.description)),
            other_unlocks: None,
            is_unlocked: config.is_unlocked,
            is_finished: config.is_finished,
            environment,
            enemy_pool,
            stat_variation,
            clear_target: config.enemy_count,
            groups_defeated: 0,
            first_reward: config.first_reward,
            repeatable_reward: config.repeatable_reward,
            repeatable: !config.is_challenge,
            leave_text: config.leave_text,
            unlock_text: config.unlock_text,
            tags,
        })
    }

    /// Replaces the static description with a dynamic one.
    pub fn with_description_provider(mut self, provider: Arc<dyn TextProvider>) -> Self {
        self.description = provider;
        self
    }

    /// Adds unlocks granted on every clear beyond the reward tables.
    pub fn with_unlock_provider(mut self, provider: Arc<dyn UnlockProvider>) -> Self {
        self.other_unlocks = Some(provider);
        self
    }

    pub fn description(&self) -> String {
        self.description.text()
    }

    pub fn is_challenge(&self) -> bool {
        !self.repeatable
    }

    pub fn is_finished(&self) -> bool {
        self.is_finished
    }

    /// Where this zone's enemies come from.
    pub fn enemy_pool(&self) -> &EnemyPool {
        &self.enemy_pool
    }

    /// Stat variation tolerance after clamping.
    pub fn stat_variation(&self) -> f64 {
        self.stat_variation
    }

    /// Defeated groups needed for one clear, never 0.
    pub fn clear_target(&self) -> u32 {
        self.clear_target
    }

    pub fn groups_defeated(&self) -> u32 {
        self.groups_defeated
    }

    /// Number of completed clears.
    pub fn times_cleared(&self) -> u32 {
        self.groups_defeated / self.clear_target
    }

    /// Generates the enemy group for the next encounter.
    pub fn next_group(&self, catalog: &Catalog, rng: &mut StdRng) -> UmbralResult<Vec<EnemyInstance>> {
        if self.is_finished {
            return Err(UmbralError::ZoneFinished(self.name.clone()));
        }
        EncounterGenerator::new(self, catalog).generate_group(rng)
    }

    /// Environmental penalties with and without the hero's skills.
    pub fn total_effect<S: SkillProvider + ?Sized>(&self, skills: &S) -> UmbralResult<TotalEffect> {
        self.environment.total_effect(skills)
    }

    /// Skill xp gained per tick spent fighting here.
    pub fn gained_skills(&self) -> Vec<SkillGain> {
        self.environment.gained_skills()
    }

    pub fn light_level(&self) -> LightLevel {
        self.environment.light_level()
    }

    /// Records a fully defeated group, returning the rewards if it completed a clear.
    ///
    /// Challenge zones are finished by their first clear. Defeats recorded on
    /// a finished zone are ignored.
    pub fn record_group_defeated(&mut self) -> Option<ClearOutcome> {
        if self.is_finished {
            return None;
        }
        self.groups_defeated += 1;
        if self.groups_defeated % self.clear_target != 0 {
            return None;
        }

        let first_clear = self.groups_defeated == self.clear_target;
        if self.is_challenge() {
            self.is_finished = true;
        }
        log::info!(
            "Zone \"{}\" cleared ({} time{})",
            self.name,
            self.times_cleared(),
            if self.times_cleared() == 1 { "" } else { "s" }
        );

        Some(ClearOutcome {
            first_reward: first_clear.then(|| self.first_reward.clone()),
            repeatable_reward: self.repeatable_reward.clone(),
            unlocks: self
                .other_unlocks
                .as_ref()
                .map(|provider| provider.unlocks())
                .unwrap_or_default(),
            zone_finished: self.is_finished,
        })
    }
}
