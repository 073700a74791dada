//! # Catalog Module
//!
//! Read-only registry of enemy templates, location types and activity kinds.
//!
//! A catalog is assembled once at startup through a [`CatalogBuilder`], either
//! in code or from a JSON [`ContentPack`], and is then only read. Zones and
//! activities are validated against it when they are constructed.

pub mod builtin;

use crate::{ActivityDefinition, EnemyTemplate, LocationType, UmbralError, UmbralResult};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};
use std::path::Path;

/// Write-once registry of static content.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    skills: BTreeSet<String>,
    enemies: HashMap<String, EnemyTemplate>,
    location_types: HashMap<String, LocationType>,
    activities: HashMap<String, ActivityDefinition>,
}

impl Catalog {
    /// Builds a catalog from a content pack.
    pub fn from_pack(pack: ContentPack) -> UmbralResult<Self> {
        let mut builder = CatalogBuilder::new();
        pack.register_into(&mut builder)?;
        Ok(builder.build())
    }

    /// Checks if a skill name is known.
    pub fn is_known_skill(&self, name: &str) -> bool {
        self.skills.contains(name)
    }

    pub fn skills(&self) -> impl Iterator<Item = &str> {
        self.skills.iter().map(String::as_str)
    }

    pub fn enemy(&self, name: &str) -> Option<&EnemyTemplate> {
        self.enemies.get(name)
    }

    /// Gets an enemy template, failing if it is not registered.
    pub fn require_enemy(&self, name: &str) -> UmbralResult<&EnemyTemplate> {
        self.enemy(name)
            .ok_or_else(|| UmbralError::UnknownEnemy(name.to_string()))
    }

    pub fn location_type(&self, name: &str) -> Option<&LocationType> {
        self.location_types.get(name)
    }

    pub fn activity(&self, name: &str) -> Option<&ActivityDefinition> {
        self.activities.get(name)
    }

    /// Gets an activity kind, failing if it is not registered.
    pub fn require_activity(&self, name: &str) -> UmbralResult<&ActivityDefinition> {
        self.activity(name)
            .ok_or_else(|| UmbralError::UnknownActivity(name.to_string()))
    }

    /// Enemies shown in the bestiary, highest rank first, then by name.
    pub fn bestiary(&self) -> Vec<&EnemyTemplate> {
        let mut entries: Vec<_> = self
            .enemies
            .values()
            .filter(|enemy| enemy.add_to_bestiary)
            .collect();
        entries.sort_by(|a, b| b.rank.cmp(&a.rank).then_with(|| a.name.cmp(&b.name)));
        entries
    }
}

/// Assembles a [`Catalog`], validating every entry as it is registered.
///
/// Skills must be registered before the content that references them.
///
/// # Examples
///
/// ```
/// use umbral::{ActivityDefinition, CatalogBuilder};
///
/// let mut builder = CatalogBuilder::new();
/// builder.register_skill("Woodcutting");
/// builder
///     .register_activity(ActivityDefinition::new("woodcutting", &["Woodcutting"]))
///     .unwrap();
/// let catalog = builder.build();
/// assert!(catalog.activity("woodcutting").is_some());
/// ```
#[derive(Debug, Default)]
pub struct CatalogBuilder {
    catalog: Catalog,
}

impl CatalogBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a skill name.
    pub fn register_skill(&mut self, name: impl Into<String>) {
        self.catalog.skills.insert(name.into());
    }

    /// Validates and registers an enemy template.
    pub fn register_enemy(&mut self, template: EnemyTemplate) -> UmbralResult<()> {
        let template = template.into_validated()?;
        if self.catalog.enemies.contains_key(&template.name) {
            return Err(UmbralError::InvalidContent(format!(
                "Enemy \"{}\" is registered twice",
                template.name
            )));
        }
        self.catalog.enemies.insert(template.name.clone(), template);
        Ok(())
    }

    /// Validates and registers a location type.
    pub fn register_location_type(&mut self, location_type: LocationType) -> UmbralResult<()> {
        let skills = &self.catalog.skills;
        location_type.validate(|skill| skills.contains(skill))?;
        if self.catalog.location_types.contains_key(&location_type.name) {
            return Err(UmbralError::InvalidContent(format!(
                "Location type \"{}\" is registered twice",
                location_type.name
            )));
        }
        self.catalog
            .location_types
            .insert(location_type.name.clone(), location_type);
        Ok(())
    }

    /// Registers a new activity kind whose base skills are all known.
    pub fn register_activity(&mut self, activity: ActivityDefinition) -> UmbralResult<()> {
        if let Some(skill) = activity
            .base_skills
            .iter()
            .find(|skill| !self.catalog.skills.contains(*skill))
        {
            return Err(UmbralError::UnknownSkill(skill.clone()));
        }
        if self.catalog.activities.contains_key(&activity.name) {
            return Err(UmbralError::InvalidContent(format!(
                "Activity \"{}\" is registered twice",
                activity.name
            )));
        }
        self.catalog
            .activities
            .insert(activity.name.clone(), activity);
        Ok(())
    }

    /// Finishes building. The catalog is read-only from here on.
    pub fn build(self) -> Catalog {
        log::debug!(
            "Catalog built: {} skills, {} enemies, {} location types, {} activities",
            self.catalog.skills.len(),
            self.catalog.enemies.len(),
            self.catalog.location_types.len(),
            self.catalog.activities.len()
        );
        self.catalog
    }
}

/// Serialized content, as loaded from a JSON file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContentPack {
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default)]
    pub enemies: Vec<EnemyTemplate>,
    #[serde(default)]
    pub location_types: Vec<LocationType>,
    #[serde(default)]
    pub activities: Vec<ActivityDefinition>,
}

impl ContentPack {
    /// Parses a content pack from a JSON string.
    pub fn from_json_str(json: &str) -> UmbralResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Reads a content pack from a JSON file.
    pub fn from_path(path: impl AsRef<Path>) -> UmbralResult<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    /// Registers everything in the pack, skills first.
    pub fn register_into(self, builder: &mut CatalogBuilder) -> UmbralResult<()> {
        for skill in self.skills {
            builder.register_skill(skill);
        }
        for enemy in self.enemies {
            builder.register_enemy(enemy)?;
        }
        for location_type in self.location_types {
            builder.register_location_type(location_type)?;
        }
        for activity in self.activities {
            builder.register_activity(activity)?;
        }
        Ok(())
    }
}
