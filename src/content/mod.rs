//! # Content Module
//!
//! Value types shared by all content definitions, and the capability traits
//! content entries implement to customise their text and unlocks.

use crate::{UmbralError, UmbralResult};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Inclusive integer range, used for item drop counts and gathering yields.
///
/// # Examples
///
/// ```
/// use umbral::CountRange;
///
/// let range = CountRange::new(1, 3);
/// assert!(range.contains(2));
/// assert!(!range.contains(4));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CountRange {
    pub min: u32,
    pub max: u32,
}

impl CountRange {
    /// Creates a new range.
    pub fn new(min: u32, max: u32) -> Self {
        Self { min, max }
    }

    /// A range containing exactly one value.
    pub fn single(count: u32) -> Self {
        Self::new(count, count)
    }

    /// Checks if a value lies inside the range.
    pub fn contains(&self, value: u32) -> bool {
        value >= self.min && value <= self.max
    }

    /// Fails if the bounds are inverted.
    pub fn validate(&self, context: &str) -> UmbralResult<()> {
        if self.min > self.max {
            return Err(UmbralError::InvalidContent(format!(
                "{}: count range [{}, {}] has min above max",
                context, self.min, self.max
            )));
        }
        Ok(())
    }
}

/// Something a reward or a finished piece of content makes available.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "target", rename_all = "snake_case")]
pub enum Unlock {
    Location(String),
    CombatZone(String),
    Dialogue(String),
    Textline { dialogue: String, textline: String },
    Activity { location: String, activity: String },
    Trader(String),
    Flag(String),
}

/// Reward granted when a zone is cleared.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Reward {
    /// Experience granted to the hero
    #[serde(default)]
    pub xp: u32,
    /// Content unlocked by the reward
    #[serde(default)]
    pub unlocks: Vec<Unlock>,
}

impl Reward {
    /// A reward granting only experience.
    pub fn xp(xp: u32) -> Self {
        Self {
            xp,
            unlocks: Vec::new(),
        }
    }

    /// Checks if the reward grants nothing.
    pub fn is_empty(&self) -> bool {
        self.xp == 0 && self.unlocks.is_empty()
    }
}

/// Capability of content entries that produce display text.
///
/// Entries whose text depends on game progress implement this themselves;
/// everything else uses [`StaticText`].
pub trait TextProvider: fmt::Debug + Send + Sync {
    /// Returns the text to display right now.
    fn text(&self) -> String;
}

/// Capability of content entries that grant unlocks beyond their reward tables.
pub trait UnlockProvider: fmt::Debug + Send + Sync {
    /// Returns the extra unlocks to apply.
    fn unlocks(&self) -> Vec<Unlock>;
}

/// Text that never changes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaticText(pub String);

impl TextProvider for StaticText {
    fn text(&self) -> String {
        self.0.clone()
    }
}

/// A fixed list of extra unlocks.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StaticUnlocks(pub Vec<Unlock>);

impl UnlockProvider for StaticUnlocks {
    fn unlocks(&self) -> Vec<Unlock> {
        self.0.clone()
    }
}
