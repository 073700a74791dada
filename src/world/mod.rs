//! # World Module
//!
//! Registry of the locations and combat zones the player can visit.
//!
//! Content is registered in dependency order: a location's connections and a
//! zone's parent must already be present, otherwise registration fails.

pub mod combat_zone;
pub mod location;

pub use combat_zone::*;
pub use location::*;

use crate::{Catalog, UmbralError, UmbralResult};
use std::collections::HashMap;

/// All registered locations and combat zones.
#[derive(Debug, Clone, Default)]
pub struct Atlas {
    locations: HashMap<String, Location>,
    zones: HashMap<String, CombatZone>,
}

impl Atlas {
    pub fn new() -> Self {
        Self::default()
    }

    /// Checks if a location with the given name is registered.
    pub fn contains_location(&self, name: &str) -> bool {
        self.locations.contains_key(name)
    }

    pub fn location(&self, name: &str) -> Option<&Location> {
        self.locations.get(name)
    }

    pub fn location_mut(&mut self, name: &str) -> Option<&mut Location> {
        self.locations.get_mut(name)
    }

    pub fn zone(&self, name: &str) -> Option<&CombatZone> {
        self.zones.get(name)
    }

    pub fn zone_mut(&mut self, name: &str) -> Option<&mut CombatZone> {
        self.zones.get_mut(name)
    }

    /// Iterates over the combat zones of a location.
    pub fn zones_of<'a>(&'a self, location: &str) -> impl Iterator<Item = &'a CombatZone> + 'a {
        self.locations
            .get(location)
            .into_iter()
            .flat_map(|l| l.combat_zones.iter())
            .filter_map(|name| self.zones.get(name))
    }

    fn ensure_unique(&self, name: &str) -> UmbralResult<()> {
        if self.locations.contains_key(name) || self.zones.contains_key(name) {
            return Err(UmbralError::InvalidContent(format!(
                "Location \"{}\" is registered twice",
                name
            )));
        }
        Ok(())
    }

    /// Validates and registers a location, linking back every location it connects to.
    pub fn add_location(&mut self, config: LocationConfig, catalog: &Catalog) -> UmbralResult<&Location> {
        self.ensure_unique(&config.name)?;
        if let Some(missing) = config
            .connected_locations
            .iter()
            .find(|c| !self.locations.contains_key(&c.location))
        {
            return Err(UmbralError::UnknownLocation(missing.location.clone()));
        }

        let location = Location::new(config, catalog)?;
        let name = location.name.clone();
        for connection in &location.connected_locations {
            if let Some(other) = self.locations.get_mut(&connection.location) {
                if !other.is_connected_to(&name) {
                    other.connected_locations.push(Connection {
                        location: name.clone(),
                        custom_text: None,
                    });
                }
            }
        }

        log::debug!("Registered location \"{}\"", name);
        Ok(&*self.locations.entry(name).or_insert(location))
    }

    /// Connects two registered locations both ways.
    pub fn connect(&mut self, from: &str, to: &str, custom_text: Option<String>) -> UmbralResult<()> {
        for name in [from, to] {
            if !self.locations.contains_key(name) {
                return Err(UmbralError::UnknownLocation(name.to_string()));
            }
        }
        if let Some(location) = self.locations.get_mut(from) {
            if !location.is_connected_to(to) {
                location.connected_locations.push(Connection {
                    location: to.to_string(),
                    custom_text,
                });
            }
        }
        if let Some(location) = self.locations.get_mut(to) {
            if !location.is_connected_to(from) {
                location.connected_locations.push(Connection {
                    location: from.to_string(),
                    custom_text: None,
                });
            }
        }
        Ok(())
    }

    /// Validates and registers a combat zone under its parent location.
    pub fn add_combat_zone(&mut self, config: CombatZoneConfig, catalog: &Catalog) -> UmbralResult<&CombatZone> {
        self.ensure_unique(&config.name)?;
        let zone = CombatZone::new(config, catalog, self)?;
        self.insert_zone(zone)
    }

    /// Registers a zone built elsewhere, e.g. one with custom providers.
    pub fn insert_zone(&mut self, zone: CombatZone) -> UmbralResult<&CombatZone> {
        self.ensure_unique(&zone.name)?;
        let parent = self
            .locations
            .get_mut(&zone.parent_location)
            .ok_or_else(|| UmbralError::UnknownLocation(zone.parent_location.clone()))?;
        parent.combat_zones.push(zone.name.clone());

        log::debug!(
            "Registered combat zone \"{}\" under \"{}\"",
            zone.name,
            zone.parent_location
        );
        Ok(&*self.zones.entry(zone.name.clone()).or_insert(zone))
    }
}
