//! # Enemies Module
//!
//! Enemy templates registered at startup and the per-encounter instances
//! built from them.
//!
//! Templates are immutable once registered in the catalog. Every encounter
//! gets fresh [`EnemyInstance`] values, so combat never touches a template.

use crate::{
    CountRange, GenerationConfig, Generator, LootDrop, LootGenerator, UmbralError, UmbralResult,
};
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Size classification of an enemy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EnemySize {
    #[default]
    Small,
    Medium,
    Large,
}

impl EnemySize {
    /// Returns the lowercase name, also used as the size tag.
    pub fn as_str(self) -> &'static str {
        match self {
            EnemySize::Small => "small",
            EnemySize::Medium => "medium",
            EnemySize::Large => "large",
        }
    }
}

impl fmt::Display for EnemySize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EnemySize {
    type Err = UmbralError;

    /// # Examples
    ///
    /// ```
    /// use umbral::EnemySize;
    ///
    /// assert_eq!("medium".parse::<EnemySize>().unwrap(), EnemySize::Medium);
    /// assert!("huge".parse::<EnemySize>().is_err());
    /// ```
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "small" => Ok(EnemySize::Small),
            "medium" => Ok(EnemySize::Medium),
            "large" => Ok(EnemySize::Large),
            other => Err(UmbralError::InvalidContent(format!(
                "No such enemy size option as \"{}\"",
                other
            ))),
        }
    }
}

/// Base combat statistics of an enemy.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EnemyStats {
    pub health: u32,
    pub attack: u32,
    pub agility: u32,
    pub dexterity: u32,
    pub intuition: u32,
    pub magic: u32,
    pub attack_speed: f64,
    pub defense: u32,
}

impl EnemyStats {
    /// Fails if any stat other than magic and defense is not strictly positive.
    pub fn validate(&self, enemy: &str) -> UmbralResult<()> {
        let required = [
            ("health", self.health),
            ("attack", self.attack),
            ("agility", self.agility),
            ("dexterity", self.dexterity),
            ("intuition", self.intuition),
        ];
        if let Some((stat, _)) = required.iter().find(|(_, value)| *value == 0) {
            return Err(UmbralError::InvalidContent(format!(
                "Enemy \"{}\" has non-positive {}",
                enemy, stat
            )));
        }
        if !(self.attack_speed.is_finite() && self.attack_speed > 0.0) {
            return Err(UmbralError::InvalidContent(format!(
                "Enemy \"{}\" has non-positive attack_speed",
                enemy
            )));
        }
        Ok(())
    }
}

/// One entry of an enemy's loot table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LootEntry {
    /// Identifier of the dropped item
    pub item_id: String,
    /// Drop chance in `[0, 1]`
    pub chance: f64,
    /// Quantity range; a single item drops if absent
    #[serde(default)]
    pub count: Option<CountRange>,
}

impl LootEntry {
    /// Creates a loot entry that drops a single item.
    pub fn new(item_id: impl Into<String>, chance: f64) -> Self {
        Self {
            item_id: item_id.into(),
            chance,
            count: None,
        }
    }

    /// Sets the quantity range.
    pub fn with_count(mut self, count: CountRange) -> Self {
        self.count = Some(count);
        self
    }

    fn validate(&self, enemy: &str) -> UmbralResult<()> {
        if !(0.0..=1.0).contains(&self.chance) {
            return Err(UmbralError::InvalidContent(format!(
                "Loot \"{}\" of enemy \"{}\" has chance {} outside [0, 1]",
                self.item_id, enemy, self.chance
            )));
        }
        if let Some(count) = &self.count {
            count.validate(&self.item_id)?;
        }
        Ok(())
    }
}

fn default_xp_value() -> u32 {
    1
}

fn default_true() -> bool {
    true
}

/// Immutable enemy definition, identified by name.
///
/// # Examples
///
/// ```
/// use umbral::{EnemySize, EnemyStats, EnemyTemplate};
///
/// let stats = EnemyStats {
///     health: 40, attack: 10, agility: 8, dexterity: 6,
///     intuition: 7, magic: 0, attack_speed: 1.0, defense: 6,
/// };
/// let skeleton = EnemyTemplate::new("Skeleton", stats, EnemySize::Medium)
///     .with_xp_value(10)
///     .into_validated()
///     .unwrap();
/// assert!(skeleton.has_tag("medium"));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnemyTemplate {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default = "default_xp_value")]
    pub xp_value: u32,
    /// Bestiary ordering; higher ranks are listed first
    #[serde(default)]
    pub rank: u32,
    pub stats: EnemyStats,
    #[serde(default)]
    pub size: EnemySize,
    #[serde(default)]
    pub tags: BTreeSet<String>,
    #[serde(default)]
    pub loot_list: Vec<LootEntry>,
    #[serde(default = "default_true")]
    pub add_to_bestiary: bool,
}

impl EnemyTemplate {
    /// Creates a template with default description, xp value and rank.
    pub fn new(name: impl Into<String>, stats: EnemyStats, size: EnemySize) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            xp_value: default_xp_value(),
            rank: 0,
            stats,
            size,
            tags: BTreeSet::new(),
            loot_list: Vec::new(),
            add_to_bestiary: true,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_xp_value(mut self, xp_value: u32) -> Self {
        self.xp_value = xp_value;
        self
    }

    pub fn with_rank(mut self, rank: u32) -> Self {
        self.rank = rank;
        self
    }

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.insert(tag.into());
        self
    }

    pub fn with_loot(mut self, entry: LootEntry) -> Self {
        self.loot_list.push(entry);
        self
    }

    /// Hides the enemy from the bestiary.
    pub fn hidden_from_bestiary(mut self) -> Self {
        self.add_to_bestiary = false;
        self
    }

    /// Checks if the template carries a tag.
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.contains(tag)
    }

    /// Validates the template and adds its size to the tag set.
    pub fn into_validated(mut self) -> UmbralResult<Self> {
        if self.name.trim().is_empty() {
            return Err(UmbralError::InvalidContent(
                "Enemy template has an empty name".to_string(),
            ));
        }
        self.stats.validate(&self.name)?;
        for entry in &self.loot_list {
            entry.validate(&self.name)?;
        }
        self.tags.insert(self.size.as_str().to_string());
        Ok(self)
    }
}

/// A concrete enemy taking part in one encounter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnemyInstance {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub xp_value: u32,
    pub stats: EnemyStats,
    pub max_health: u32,
    pub size: EnemySize,
    pub tags: BTreeSet<String>,
    pub loot_list: Vec<LootEntry>,
    pub add_to_bestiary: bool,
    pub is_alive: bool,
}

impl EnemyInstance {
    /// Builds an instance with the template's stats copied verbatim.
    pub fn from_template(template: &EnemyTemplate) -> Self {
        Self::with_stats(template, template.stats)
    }

    /// Builds an instance from a template with replacement stats.
    pub fn with_stats(template: &EnemyTemplate, stats: EnemyStats) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: template.name.clone(),
            description: template.description.clone(),
            xp_value: template.xp_value,
            stats,
            max_health: stats.health,
            size: template.size,
            tags: template.tags.clone(),
            loot_list: template.loot_list.clone(),
            add_to_bestiary: template.add_to_bestiary,
            is_alive: true,
        }
    }

    /// Applies damage, returning true if this blow killed the enemy.
    pub fn take_damage(&mut self, amount: u32) -> bool {
        if !self.is_alive {
            return false;
        }
        self.stats.health = self.stats.health.saturating_sub(amount);
        if self.stats.health == 0 {
            self.is_alive = false;
            return true;
        }
        false
    }

    /// Checks if the instance carries a tag.
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.contains(tag)
    }

    /// Rolls this enemy's loot table.
    pub fn loot(&self, config: &GenerationConfig, rng: &mut StdRng) -> UmbralResult<Vec<LootDrop>> {
        LootGenerator::for_enemy(self).generate(config, rng)
    }
}
