//! # Builtin Content
//!
//! A small sample world: a village, the catacombs beneath it and the undead
//! wandering there. Used by the binary when no content file is given, and by
//! tests that need a realistic world.

use crate::{
    ActivityDefinition, Atlas, Catalog, CatalogBuilder, CombatZoneConfig, Connection, CountRange,
    EnemySize, EnemyStats, EnemyTemplate, GatheringConfig, LocationActivity, LocationConfig,
    LocationType, LocationTypeStage, LootEntry, ResourceYield, Reward, ScalingPair, SkillBook,
    SkillWindow, SleepingSpot, UmbralResult, Unlock, ZoneTypeEntry,
};

/// Skill names with their level caps.
const SKILLS: &[(&str, u32)] = &[
    ("Dazzle resistance", 10),
    ("Night vision", 10),
    ("Presence sensing", 20),
    ("Tight maneuvers", 10),
    ("Spatial awareness", 10),
    ("Heat resistance", 10),
    ("Cold resistance", 10),
    ("Woodcutting", 10),
];

/// A fresh skill book holding every builtin skill at level 0.
pub fn skills() -> SkillBook {
    let mut book = SkillBook::new();
    for (name, max_level) in SKILLS {
        book.insert(*name, *max_level);
    }
    book
}

fn skeleton() -> EnemyTemplate {
    let stats = EnemyStats {
        health: 40,
        attack: 10,
        agility: 8,
        dexterity: 6,
        intuition: 7,
        magic: 0,
        attack_speed: 1.0,
        defense: 6,
    };
    EnemyTemplate::new("Skeleton", stats, EnemySize::Medium)
        .with_description("Mindless, animated bones")
        .with_xp_value(10)
        .with_rank(1)
        .with_tag("unanimate")
        .with_loot(LootEntry::new("Bones", 0.6).with_count(CountRange::new(1, 2)))
}

fn location_types() -> Vec<LocationType> {
    vec![
        LocationType::new("bright")
            .with_stage(1, LocationTypeStage::new("Well lit, no trouble seeing"))
            .with_stage(
                2,
                LocationTypeStage::new("Very bright, hard to keep eyes open")
                    .with_skill("Dazzle resistance")
                    .with_multiplier("attack_points", 0.5)
                    .with_multiplier("evasion_points", 0.5),
            )
            .with_stage(
                3,
                LocationTypeStage::new("Blindingly bright")
                    .with_skill("Dazzle resistance")
                    .with_multiplier("attack_points", 0.1)
                    .with_multiplier("evasion_points", 0.1),
            ),
        LocationType::new("dark")
            .with_stage(
                1,
                LocationTypeStage::new("Dim, shapes are hard to make out").with_skill("Night vision"),
            )
            .with_stage(
                2,
                LocationTypeStage::new("Dark, hard to see anything")
                    .with_skill("Night vision")
                    .with_multiplier("attack_points", 0.8)
                    .with_multiplier("evasion_points", 0.8),
            )
            .with_stage(
                3,
                LocationTypeStage::new("Pitch black, eyes are useless")
                    .with_skill("Presence sensing")
                    .with_multiplier("attack_points", 0.15)
                    .with_multiplier("evasion_points", 0.15),
            ),
        LocationType::new("narrow").with_stage(
            1,
            LocationTypeStage::new("Not much place for maneuvering")
                .with_skill("Tight maneuvers")
                .with_multiplier("evasion_points", 0.333),
        ),
        LocationType::new("open")
            .with_skill("Spatial awareness")
            .with_stage(
                1,
                LocationTypeStage::new("Open space, attacks come from every side")
                    .with_multiplier("evasion_points", 0.75),
            )
            .with_stage(
                2,
                LocationTypeStage::new("Vast and exposed").with_multiplier("evasion_points", 0.5),
            ),
        LocationType::new("hot")
            .with_skill("Heat resistance")
            .with_stage(
                1,
                LocationTypeStage::new("High temperature")
                    .with_multiplier("attack_points", 0.5)
                    .with_multiplier("evasion_points", 0.5)
                    .with_multiplier("stamina", 0.8),
            )
            .with_stage(
                2,
                LocationTypeStage::new("Scorching heat")
                    .with_multiplier("attack_points", 0.3)
                    .with_multiplier("evasion_points", 0.3)
                    .with_multiplier("stamina", 0.5),
            )
            .with_stage(
                3,
                LocationTypeStage::new("Heat hot enough to melt metal")
                    .with_multiplier("attack_points", 0.1)
                    .with_multiplier("evasion_points", 0.1)
                    .with_multiplier("stamina", 0.3),
            ),
        LocationType::new("cold")
            .with_skill("Cold resistance")
            .with_stage(
                1,
                LocationTypeStage::new("Cold enough to sap your strength")
                    .with_multiplier("stamina", 0.5),
            )
            .with_stage(
                2,
                LocationTypeStage::new("Freezing cold")
                    .with_multiplier("attack_points", 0.7)
                    .with_multiplier("evasion_points", 0.7)
                    .with_multiplier("stamina", 0.2),
            )
            .with_stage(
                3,
                LocationTypeStage::new("Cold so extreme it freezes the air")
                    .with_multiplier("attack_points", 0.5)
                    .with_multiplier("evasion_points", 0.5)
                    .with_multiplier("stamina", 0.1),
            ),
    ]
}

/// Registers the builtin skills, the skeleton, six location types and woodcutting.
pub fn register_builtin(builder: &mut CatalogBuilder) -> UmbralResult<()> {
    for (name, _) in SKILLS {
        builder.register_skill(*name);
    }
    builder.register_enemy(skeleton())?;
    for location_type in location_types() {
        builder.register_location_type(location_type)?;
    }
    builder.register_activity(ActivityDefinition::new("woodcutting", &["Woodcutting"]))
}

/// The builtin catalog.
pub fn catalog() -> UmbralResult<Catalog> {
    let mut builder = CatalogBuilder::new();
    register_builtin(&mut builder)?;
    Ok(builder.build())
}

fn woodcutting() -> LocationActivity {
    let gathering = GatheringConfig {
        scales_with_skill: true,
        skill_required: SkillWindow::new(0, 10),
        time_period: ScalingPair::new(120.0, 45.0),
        resources: vec![ResourceYield {
            name: "Piece of wood".to_string(),
            chance: ScalingPair::new(0.7, 1.0),
            count_low: CountRange::new(1, 1),
            count_high: CountRange::new(1, 3),
        }],
    };
    LocationActivity::new("woodcutting", "Gather some wood").with_gathering(gathering)
}

/// The builtin world, validated against `catalog`.
pub fn atlas(catalog: &Catalog) -> UmbralResult<Atlas> {
    let mut atlas = Atlas::new();

    let village = LocationConfig::new("Village")
        .with_description("Medium-sized village, surrounded by many fields")
        .with_activity(woodcutting());
    atlas.add_location(village, catalog)?;

    let mut catacombs = LocationConfig::new("Catacombs")
        .with_description("A dismal place, full of restless dead");
    catacombs.types = vec![ZoneTypeEntry::new("dark", 2, 0)];
    catacombs.connected_locations = vec![Connection {
        location: "Village".to_string(),
        custom_text: Some("Go down to the catacombs".to_string()),
    }];
    atlas.add_location(catacombs, catalog)?;

    let mut chamber = LocationConfig::new("Burial Chamber")
        .with_description("A small room deep in the catacombs, surprisingly quiet");
    chamber.is_unlocked = false;
    chamber.types = vec![ZoneTypeEntry::new("dark", 3, 0)];
    chamber.sleeping = Some(SleepingSpot {
        text: "Take a nap".to_string(),
        xp: 1,
    });
    chamber.connected_locations = vec![Connection {
        location: "Catacombs".to_string(),
        custom_text: None,
    }];
    atlas.add_location(chamber, catalog)?;

    let mut undead = CombatZoneConfig::new("Wandering Undead", "Catacombs")
        .with_description("Skeletons shambling through the corridors");
    undead.enemy_count = 15;
    undead.enemies_list = vec!["Skeleton".to_string()];
    undead.types = vec![
        ZoneTypeEntry::new("narrow", 1, 6),
        ZoneTypeEntry::new("dark", 3, 3),
    ];
    undead.enemy_stat_variation = 0.1;
    undead.first_reward = Reward {
        xp: 10,
        unlocks: vec![Unlock::Location("Burial Chamber".to_string())],
    };
    undead.repeatable_reward = Reward::xp(5);
    atlas.add_combat_zone(undead, catalog)?;

    Ok(atlas)
}
