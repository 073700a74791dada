//! Content pack loading from JSON files.

use std::io::Write;

use tempfile::NamedTempFile;
use umbral::{
    builtin, CatalogBuilder, CombatZoneConfig, ContentPack, UmbralError, UmbralResult,
    ZoneTypeEntry,
};

const PACK: &str = r#"{
    "skills": ["Fog sight"],
    "enemies": [
        {
            "name": "Ghoul",
            "description": "Hungry and fast",
            "xp_value": 14,
            "rank": 2,
            "stats": {
                "health": 55, "attack": 12, "agility": 11, "dexterity": 7,
                "intuition": 5, "magic": 0, "attack_speed": 1.3, "defense": 4
            },
            "size": "medium",
            "tags": ["undead"],
            "loot_list": [
                { "item_id": "Rotten flesh", "chance": 0.5, "count": { "min": 1, "max": 3 } }
            ]
        }
    ],
    "location_types": [
        {
            "name": "foggy",
            "related_skill": "Fog sight",
            "stages": {
                "1": { "description": "Light mist", "effects": { "multipliers": { "attack_points": 0.9 } } }
            }
        }
    ]
}"#;

fn write_pack(json: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(json.as_bytes()).unwrap();
    file
}

#[test]
fn test_pack_extends_builtin_content() -> UmbralResult<()> {
    let file = write_pack(PACK);
    let pack = ContentPack::from_path(file.path())?;
    assert_eq!(pack.enemies.len(), 1);

    let mut builder = CatalogBuilder::new();
    builtin::register_builtin(&mut builder)?;
    pack.register_into(&mut builder)?;
    let catalog = builder.build();

    let ghoul = catalog.require_enemy("Ghoul")?;
    assert_eq!(ghoul.xp_value, 14);
    assert!(ghoul.has_tag("medium"));
    assert!(ghoul.has_tag("undead"));
    assert_eq!(catalog.bestiary()[0].name, "Ghoul");

    let mut atlas = builtin::atlas(&catalog)?;
    let mut config = CombatZoneConfig::new("Misty Tunnels", "Catacombs");
    config.enemies_list = vec!["Ghoul".to_string(), "Skeleton".to_string()];
    config.types = vec![ZoneTypeEntry::new("foggy", 1, 2)];
    let zone = atlas.add_combat_zone(config, &catalog)?;
    assert_eq!(zone.gained_skills()[0].skill, "Fog sight");
    Ok(())
}

#[test]
fn test_zone_config_from_json() -> UmbralResult<()> {
    let json = r#"{
        "name": "Wandering Undead",
        "parent_location": "Catacombs",
        "enemies_list": ["Skeleton"],
        "enemy_count": 15,
        "types": [{ "type": "narrow", "stage": 1, "xp_gain": 6 }]
    }"#;
    let config: CombatZoneConfig = serde_json::from_str(json)?;
    assert_eq!(config.enemy_group_size, (1, 1));
    assert!(config.is_unlocked);
    assert!(!config.is_challenge);
    assert_eq!(config.types[0].type_name, "narrow");
    Ok(())
}

#[test]
fn test_duplicate_enemy_in_pack_rejected() -> UmbralResult<()> {
    let file = write_pack(
        r#"{ "enemies": [{
            "name": "Skeleton",
            "stats": {
                "health": 1, "attack": 1, "agility": 1, "dexterity": 1,
                "intuition": 1, "magic": 0, "attack_speed": 1.0, "defense": 0
            }
        }] }"#,
    );
    let mut builder = CatalogBuilder::new();
    builtin::register_builtin(&mut builder)?;
    let result = ContentPack::from_path(file.path())?.register_into(&mut builder);
    assert!(matches!(result, Err(UmbralError::InvalidContent(_))));
    Ok(())
}

#[test]
fn test_duplicate_activity_in_pack_rejected() -> UmbralResult<()> {
    let file = write_pack(
        r#"{ "activities": [{ "name": "woodcutting", "base_skills": ["Woodcutting"] }] }"#,
    );
    let mut builder = CatalogBuilder::new();
    builtin::register_builtin(&mut builder)?;
    let result = ContentPack::from_path(file.path())?.register_into(&mut builder);
    assert!(matches!(result, Err(UmbralError::InvalidContent(_))));
    Ok(())
}

#[test]
fn test_missing_and_malformed_files() {
    assert!(matches!(
        ContentPack::from_path("/nonexistent/umbral/content.json"),
        Err(UmbralError::Io(_))
    ));

    let file = write_pack("{ \"enemies\": [ { \"name\": ");
    assert!(matches!(
        ContentPack::from_path(file.path()),
        Err(UmbralError::Serde(_))
    ));
}
