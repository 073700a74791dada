//! # Locations
//!
//! Safe locations: places to rest, talk and work, connected to each other and
//! parenting the combat zones around them.

use crate::{
    Catalog, EnvironmentalProfile, LightLevel, LocationActivity, SkillGain, StaticText,
    TextProvider, UmbralResult, ZoneTypeEntry,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::sync::Arc;

fn default_true() -> bool {
    true
}

/// A link from one location to another.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Connection {
    pub location: String,
    /// Text of the travel option, if not the default
    #[serde(default)]
    pub custom_text: Option<String>,
}

/// A place where the hero can sleep.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SleepingSpot {
    pub text: String,
    pub xp: u32,
}

/// Content definition of a safe location.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationConfig {
    pub name: String,
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub connected_locations: Vec<Connection>,
    #[serde(default = "default_true")]
    pub is_unlocked: bool,
    #[serde(default)]
    pub is_finished: bool,
    #[serde(default)]
    pub dialogues: Vec<String>,
    #[serde(default)]
    pub traders: Vec<String>,
    #[serde(default)]
    pub types: Vec<ZoneTypeEntry>,
    #[serde(default)]
    pub sleeping: Option<SleepingSpot>,
    #[serde(default)]
    pub activities: Vec<LocationActivity>,
    #[serde(default)]
    pub tags: BTreeSet<String>,
}

impl LocationConfig {
    /// Creates an unlocked location config with every optional field at its default.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            id: None,
            description: String::new(),
            connected_locations: Vec::new(),
            is_unlocked: true,
            is_finished: false,
            dialogues: Vec::new(),
            traders: Vec::new(),
            types: Vec::new(),
            sleeping: None,
            activities: Vec::new(),
            tags: BTreeSet::new(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_activity(mut self, activity: LocationActivity) -> Self {
        self.activities.push(activity);
        self
    }
}

/// A validated safe location.
#[derive(Debug, Clone)]
pub struct Location {
    pub name: String,
    pub id: String,
    description: Arc<dyn TextProvider>,
    pub connected_locations: Vec<Connection>,
    /// Names of the combat zones parented by this location
    pub combat_zones: Vec<String>,
    pub is_unlocked: bool,
    pub is_finished: bool,
    pub dialogues: Vec<String>,
    pub traders: Vec<String>,
    pub environment: EnvironmentalProfile,
    pub sleeping: Option<SleepingSpot>,
    pub activities: Vec<LocationActivity>,
    pub tags: BTreeSet<String>,
}

impl Location {
    /// Validates a location definition against the catalog.
    ///
    /// Connections are checked by the [`crate::Atlas`] when the location is registered.
    pub fn new(config: LocationConfig, catalog: &Catalog) -> UmbralResult<Self> {
        let environment = EnvironmentalProfile::new(&config.types, catalog)?;
        let activities = config
            .activities
            .into_iter()
            .map(|activity| activity.into_validated(catalog))
            .collect::<UmbralResult<Vec<_>>>()?;

        let mut tags = config.tags;
        tags.insert("Safe zone".to_string());

        Ok(Self {
            id: config.id.unwrap_or_else(|| config.name.clone()),
            name: config.name,
            description: Arc::new(StaticText(config.description)),
            connected_locations: config.connected_locations,
            combat_zones: Vec::new(),
            is_unlocked: config.is_unlocked,
            is_finished: config.is_finished,
            dialogues: config.dialogues,
            traders: config.traders,
            environment,
            sleeping: config.sleeping,
            activities,
            tags,
        })
    }

    /// Replaces the static description with a dynamic one.
    pub fn with_description_provider(mut self, provider: Arc<dyn TextProvider>) -> Self {
        self.description = provider;
        self
    }

    pub fn description(&self) -> String {
        self.description.text()
    }

    /// Gets an activity by its activity name.
    pub fn activity(&self, activity_name: &str) -> Option<&LocationActivity> {
        self.activities
            .iter()
            .find(|activity| activity.activity_name == activity_name)
    }

    /// Checks if this location links to another.
    pub fn is_connected_to(&self, location: &str) -> bool {
        self.connected_locations
            .iter()
            .any(|connection| connection.location == location)
    }

    /// Skill xp gained per tick spent here.
    pub fn gained_skills(&self) -> Vec<SkillGain> {
        self.environment.gained_skills()
    }

    pub fn light_level(&self) -> LightLevel {
        self.environment.light_level()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ActivityDefinition, CatalogBuilder, LocationType, LocationTypeStage};

    fn test_catalog() -> Catalog {
        let mut builder = CatalogBuilder::new();
        builder.register_skill("Dazzle resistance");
        builder.register_skill("Woodcutting");
        builder
            .register_location_type(
                LocationType::new("bright").with_stage(1, LocationTypeStage::new("always lit")),
            )
            .unwrap();
        builder
            .register_activity(ActivityDefinition::new("woodcutting", &["Woodcutting"]))
            .unwrap();
        builder.build()
    }

    #[test]
    fn test_location_creation() {
        let catalog = test_catalog();
        let mut config = LocationConfig::new("Village").with_description("A small village");
        config.types = vec![ZoneTypeEntry::new("bright", 1, 0)];
        config.sleeping = Some(SleepingSpot {
            text: "Take a nap".to_string(),
            xp: 1,
        });

        let location = Location::new(config, &catalog).unwrap();
        assert_eq!(location.id, "Village");
        assert_eq!(location.description(), "A small village");
        assert!(location.tags.contains("Safe zone"));
        assert_eq!(location.light_level(), LightLevel::Bright);
        // Stage without a related skill trains nothing
        assert!(location.gained_skills().is_empty());
    }

    #[test]
    fn test_location_with_bad_stage_rejected() {
        let catalog = test_catalog();
        let mut config = LocationConfig::new("Village");
        config.types = vec![ZoneTypeEntry::new("bright", 3, 0)];
        assert!(Location::new(config, &catalog).is_err());
    }

    #[test]
    fn test_location_activities_validated() {
        let catalog = test_catalog();
        let config = LocationConfig::new("Forest")
            .with_activity(LocationActivity::new("woodcutting", "Cut trees"));
        let location = Location::new(config, &catalog).unwrap();
        assert!(location.activity("woodcutting").is_some());

        let config = LocationConfig::new("Lake").with_activity(LocationActivity::new("fishing", "Fish"));
        assert!(Location::new(config, &catalog).is_err());
    }
}
