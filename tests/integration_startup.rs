//! Integration tests running the builtin world end to end.

use rand::SeedableRng;
use rand::rngs::StdRng;
use umbral::{
    builtin, Atlas, CatalogBuilder, CombatZoneConfig, EnemySize, EnemyStats, EnemyTemplate,
    GenerationConfig, Generator, LocationConfig, LocationType, LocationTypeStage, LootGenerator,
    Reward, SkillBook, UmbralError, UmbralResult, Unlock, ZoneTypeEntry,
};

fn skeleton_stats() -> EnemyStats {
    EnemyStats {
        health: 40,
        attack: 10,
        agility: 8,
        dexterity: 6,
        intuition: 7,
        magic: 0,
        attack_speed: 1.0,
        defense: 6,
    }
}

#[test]
fn test_builtin_world_starts() -> UmbralResult<()> {
    let catalog = builtin::catalog()?;
    let atlas = builtin::atlas(&catalog)?;

    assert!(atlas.location("Village").is_some());
    assert!(atlas.location("Catacombs").is_some());
    let zones: Vec<_> = atlas.zones_of("Catacombs").map(|z| z.name.clone()).collect();
    assert_eq!(zones, vec!["Wandering Undead".to_string()]);
    Ok(())
}

#[test]
fn test_single_skeleton_zone_copies_template() -> UmbralResult<()> {
    let mut builder = CatalogBuilder::new();
    builder.register_enemy(EnemyTemplate::new("Skeleton", skeleton_stats(), EnemySize::Medium))?;
    let catalog = builder.build();

    let mut atlas = Atlas::new();
    atlas.add_location(LocationConfig::new("Catacombs"), &catalog)?;
    let mut config = CombatZoneConfig::new("Crypt", "Catacombs");
    config.enemies_list = vec!["Skeleton".to_string()];
    config.enemy_group_size = (1, 1);
    config.enemy_stat_variation = 0.0;
    let zone = atlas.add_combat_zone(config, &catalog)?;

    let mut rng = StdRng::seed_from_u64(99);
    for _ in 0..50 {
        let group = zone.next_group(&catalog, &mut rng)?;
        assert_eq!(group.len(), 1);
        assert_eq!(group[0].name, "Skeleton");
        assert_eq!(group[0].stats, skeleton_stats());
    }
    Ok(())
}

#[test]
fn test_half_attack_stage_attenuated_by_skill() -> UmbralResult<()> {
    let mut builder = CatalogBuilder::new();
    builder.register_skill("Dazzle resistance");
    builder.register_location_type(
        LocationType::new("bright").with_stage(
            2,
            LocationTypeStage::new("Very bright")
                .with_skill("Dazzle resistance")
                .with_multiplier("attack_points", 0.5),
        ),
    )?;
    let catalog = builder.build();

    let mut atlas = Atlas::new();
    let mut square = LocationConfig::new("Sunlit Square");
    square.types = vec![ZoneTypeEntry::new("bright", 2, 0)];
    let square = atlas.add_location(square, &catalog)?;

    let mut skills = SkillBook::new();
    skills.insert("Dazzle resistance", 10);

    let effect = square.environment.total_effect(&skills)?;
    assert_eq!(effect.base_penalty.get("attack_points"), 0.5);
    assert_eq!(effect.hero_penalty.get("attack_points"), 0.5);

    skills.set_level("Dazzle resistance", 10)?;
    let effect = square.environment.total_effect(&skills)?;
    assert_eq!(effect.base_penalty.get("attack_points"), 0.5);
    assert_eq!(effect.hero_penalty.get("attack_points"), 1.0);
    Ok(())
}

#[test]
fn test_unknown_skill_is_fatal() -> UmbralResult<()> {
    let catalog = builtin::catalog()?;
    let atlas = builtin::atlas(&catalog)?;
    let zone = atlas.zone("Wandering Undead").unwrap();

    let result = zone.total_effect(&SkillBook::new());
    assert!(matches!(result, Err(UmbralError::UnknownSkill(_))));
    Ok(())
}

#[test]
fn test_clearing_the_wandering_undead() -> UmbralResult<()> {
    let catalog = builtin::catalog()?;
    let mut atlas = builtin::atlas(&catalog)?;
    let config = GenerationConfig::for_testing(5);
    let mut rng = umbral::generation::utils::create_rng(&config);

    let zone = atlas.zone_mut("Wandering Undead").unwrap();
    let mut outcomes = Vec::new();
    for _ in 0..30 {
        let group = zone.next_group(&catalog, &mut rng)?;
        for enemy in &group {
            // Every entry drops under the testing config
            let drops = LootGenerator::for_enemy(enemy).generate(&config, &mut rng)?;
            assert_eq!(drops.len(), enemy.loot_list.len());
        }
        if let Some(outcome) = zone.record_group_defeated() {
            outcomes.push(outcome);
        }
    }

    assert_eq!(outcomes.len(), 2);
    let first = outcomes[0].first_reward.as_ref().unwrap();
    assert_eq!(first.xp, 10);
    assert_eq!(first.unlocks, vec![Unlock::Location("Burial Chamber".to_string())]);
    assert_eq!(outcomes[1].first_reward, None);
    assert_eq!(outcomes[1].repeatable_reward, Reward::xp(5));
    assert!(!zone.is_finished());
    Ok(())
}

#[test]
fn test_finished_challenge_rejects_encounters() -> UmbralResult<()> {
    let catalog = builtin::catalog()?;
    let mut atlas = builtin::atlas(&catalog)?;

    let mut trial = CombatZoneConfig::challenge("Bone Trial", "Catacombs");
    trial.enemies_list = vec!["Skeleton".to_string()];
    trial.is_finished = true;
    let zone = atlas.add_combat_zone(trial, &catalog)?;

    let mut rng = StdRng::seed_from_u64(0);
    assert!(matches!(
        zone.next_group(&catalog, &mut rng),
        Err(UmbralError::ZoneFinished(_))
    ));
    Ok(())
}

#[test]
fn test_village_woodcutting_improves_with_skill() -> UmbralResult<()> {
    let catalog = builtin::catalog()?;
    let atlas = builtin::atlas(&catalog)?;
    let woodcutting = atlas
        .location("Village")
        .and_then(|v| v.activity("woodcutting"))
        .unwrap();

    let mut skills = builtin::skills();
    let novice = woodcutting.gathering_efficiency(&catalog, &skills)?.unwrap();
    skills.set_level("Woodcutting", 10)?;
    let master = woodcutting.gathering_efficiency(&catalog, &skills)?.unwrap();

    assert_eq!(master.time_needed, 45);
    assert!(novice.time_needed > master.time_needed);
    assert!(novice.resources[0].chance < master.resources[0].chance);
    assert_eq!(master.resources[0].chance, 1.0);
    Ok(())
}
