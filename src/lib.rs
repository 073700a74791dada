//! # Umbral
//!
//! The mechanical core of a menu-driven role-playing game.
//!
//! ## Architecture Overview
//!
//! Static content definitions go in, randomized and skill-adjusted gameplay
//! values come out. The engine is organised around a handful of pieces:
//!
//! - **Catalog**: write-once registry of enemy templates, location types and activities
//! - **Skills**: the [`SkillProvider`] seam through which the engine reads player skill levels
//! - **Environment**: stacking of location type penalties, attenuated by skill
//! - **Generation**: enemy group generation with per-enemy stat variation, and loot rolls
//! - **World**: safe locations and combat zones, validated when they are registered
//! - **Activities**: the skill-scaled gathering efficiency curve
//!
//! All randomized operations take an explicit `StdRng`, so a fixed seed always
//! produces the same encounters.

pub mod activities;
pub mod catalog;
pub mod content;
pub mod enemies;
pub mod environment;
pub mod generation;
pub mod skills;
pub mod world;

// Core module re-exports
pub use activities::*;
pub use catalog::*;
pub use content::*;
pub use enemies::*;
pub use environment::*;
pub use generation::*;
pub use skills::*;
pub use world::*;

/// Core error type for the Umbral engine.
#[derive(thiserror::Error, Debug)]
pub enum UmbralError {
    /// I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    /// Content definition is malformed
    #[error("Invalid content: {0}")]
    InvalidContent(String),

    /// Enemy template is not registered
    #[error("No such enemy as \"{0}\"")]
    UnknownEnemy(String),

    /// Skill is not known to the skill provider or the catalog
    #[error("No such skill as \"{0}\"")]
    UnknownSkill(String),

    /// Location is not registered
    #[error("No such location as \"{0}\"")]
    UnknownLocation(String),

    /// Activity is not registered
    #[error("No such activity as \"{0}\"")]
    UnknownActivity(String),

    /// Location type or one of its stages is not registered
    #[error("No such location type stage as \"{type_name}\" stage {stage}")]
    UnknownLocationStage { type_name: String, stage: u8 },

    /// Zone can no longer produce encounters
    #[error("Zone \"{0}\" is finished")]
    ZoneFinished(String),

    /// Generation failed
    #[error("Generation failed: {0}")]
    GenerationFailed(String),
}

/// Result type used throughout the Umbral codebase.
pub type UmbralResult<T> = Result<T, UmbralError>;

/// Version information for the engine.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Engine configuration constants.
pub mod config {
    /// Smallest enemy group a loose roster may produce
    pub const MIN_GROUP_SIZE: u32 = 1;

    /// Largest enemy group a loose roster may produce
    pub const MAX_GROUP_SIZE: u32 = 8;

    /// Highest severity stage a location type may declare
    pub const MAX_LOCATION_STAGES: u8 = 3;

    /// Default number of defeated groups needed to clear a zone
    pub const DEFAULT_CLEAR_TARGET: u32 = 30;

    /// Default working period of a job activity, in game minutes
    pub const DEFAULT_WORKING_PERIOD: u32 = 60;

    /// Default skill xp gained per game tick while doing an activity
    pub const DEFAULT_SKILL_XP_PER_TICK: u32 = 1;

    /// Level cap given to skills that content defines without one
    pub const DEFAULT_SKILL_MAX_LEVEL: u32 = 10;
}
