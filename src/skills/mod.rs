//! # Skills Module
//!
//! The seam through which the engine reads the player's skill progression.
//!
//! Skill leveling itself lives outside the engine. The engine only ever asks
//! for the current and maximum level of a named skill.

use crate::{UmbralError, UmbralResult};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Current standing in a single skill.
///
/// # Examples
///
/// ```
/// use umbral::SkillLevel;
///
/// let level = SkillLevel::new(5, 10);
/// assert_eq!(level.progress(), 0.5);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkillLevel {
    /// Current level, never negative
    pub current_level: u32,
    /// Level cap, always positive
    pub max_level: u32,
}

impl SkillLevel {
    /// Creates a new skill level. A zero cap is raised to 1.
    pub fn new(current_level: u32, max_level: u32) -> Self {
        Self {
            current_level,
            max_level: max_level.max(1),
        }
    }

    /// Fraction of the cap reached, clamped to `[0, 1]`.
    pub fn progress(&self) -> f64 {
        (self.current_level as f64 / self.max_level as f64).clamp(0.0, 1.0)
    }
}

/// Lookup of skill levels by name.
///
/// An unknown skill name is a content error: every skill referenced by
/// content is validated when the content is loaded.
pub trait SkillProvider {
    /// Returns the current standing in the named skill.
    fn get_skill(&self, name: &str) -> UmbralResult<SkillLevel>;
}

impl<T: SkillProvider + ?Sized> SkillProvider for &T {
    fn get_skill(&self, name: &str) -> UmbralResult<SkillLevel> {
        (**self).get_skill(name)
    }
}

/// In-memory skill provider.
///
/// # Examples
///
/// ```
/// use umbral::{SkillBook, SkillProvider};
///
/// let mut skills = SkillBook::new();
/// skills.insert("Night vision", 10);
/// skills.set_level("Night vision", 3).unwrap();
/// assert_eq!(skills.get_skill("Night vision").unwrap().current_level, 3);
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SkillBook {
    skills: HashMap<String, SkillLevel>,
}

impl SkillBook {
    /// Creates an empty skill book.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a skill at level 0 with the given cap, replacing any previous entry.
    pub fn insert(&mut self, name: impl Into<String>, max_level: u32) {
        self.skills.insert(name.into(), SkillLevel::new(0, max_level));
    }

    /// Sets the current level of a known skill. Levels above the cap are clamped.
    pub fn set_level(&mut self, name: &str, level: u32) -> UmbralResult<()> {
        let skill = self
            .skills
            .get_mut(name)
            .ok_or_else(|| UmbralError::UnknownSkill(name.to_string()))?;
        skill.current_level = level.min(skill.max_level);
        Ok(())
    }

    /// Returns true if the skill is known.
    pub fn contains(&self, name: &str) -> bool {
        self.skills.contains_key(name)
    }

    /// Iterates over all skill names.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.skills.keys().map(String::as_str)
    }
}

impl SkillProvider for SkillBook {
    fn get_skill(&self, name: &str) -> UmbralResult<SkillLevel> {
        self.skills
            .get(name)
            .copied()
            .ok_or_else(|| UmbralError::UnknownSkill(name.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_skill_level_progress() {
        assert_eq!(SkillLevel::new(0, 10).progress(), 0.0);
        assert_eq!(SkillLevel::new(10, 10).progress(), 1.0);
        assert_eq!(SkillLevel::new(15, 10).progress(), 1.0);
    }

    #[test]
    fn test_zero_cap_is_raised() {
        let level = SkillLevel::new(0, 0);
        assert_eq!(level.max_level, 1);
    }

    #[test]
    fn test_skill_book_lookup() {
        let mut skills = SkillBook::new();
        skills.insert("Heat resistance", 20);

        let level = skills.get_skill("Heat resistance").unwrap();
        assert_eq!(level, SkillLevel::new(0, 20));

        assert!(matches!(
            skills.get_skill("Cooking"),
            Err(UmbralError::UnknownSkill(name)) if name == "Cooking"
        ));
    }

    #[test]
    fn test_set_level_clamps_to_cap() {
        let mut skills = SkillBook::new();
        skills.insert("Tight maneuvers", 10);
        skills.set_level("Tight maneuvers", 25).unwrap();
        assert_eq!(skills.get_skill("Tight maneuvers").unwrap().current_level, 10);

        assert!(skills.set_level("Swimming", 1).is_err());
    }
}
