//! # Loot Generation
//!
//! Rolls an enemy's loot table. Only item identifiers and counts are produced;
//! turning them into items is up to the inventory layer.

use crate::{EnemyInstance, GenerationConfig, Generator, LootEntry, UmbralError, UmbralResult};
use rand::rngs::StdRng;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// One rolled drop.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LootDrop {
    pub item_id: String,
    pub count: u32,
}

/// Rolls drops from a loot table.
///
/// An entry drops when `chance * droprate_modifier >= u` for a uniform `u`
/// in `[0, 1)`; entries with a zero chance never drop. The count is drawn
/// from the entry's range, or is 1 when the entry has none. A dropped entry
/// with an inverted range fails with [`UmbralError::InvalidContent`].
#[derive(Debug, Clone, Copy)]
pub struct LootGenerator<'a> {
    loot_list: &'a [LootEntry],
}

impl<'a> LootGenerator<'a> {
    pub fn new(loot_list: &'a [LootEntry]) -> Self {
        Self { loot_list }
    }

    /// Loot generator for a defeated enemy.
    pub fn for_enemy(enemy: &'a EnemyInstance) -> Self {
        Self::new(&enemy.loot_list)
    }
}

impl Generator<Vec<LootDrop>> for LootGenerator<'_> {
    fn generate(&self, config: &GenerationConfig, rng: &mut StdRng) -> UmbralResult<Vec<LootDrop>> {
        let mut drops = Vec::new();

        for entry in self.loot_list {
            if entry.chance <= 0.0 || entry.chance * config.droprate_modifier < rng.gen::<f64>() {
                continue;
            }
            let count = match entry.count {
                Some(range) => {
                    range.validate(&entry.item_id)?;
                    let spread = range.max.saturating_sub(range.min) as f64;
                    (rng.gen::<f64>() * spread + range.min as f64).round() as u32
                }
                None => 1,
            };
            drops.push(LootDrop {
                item_id: entry.item_id.clone(),
                count,
            });
        }

        self.validate(&drops, config)?;
        Ok(drops)
    }

    fn validate(&self, content: &Vec<LootDrop>, _config: &GenerationConfig) -> UmbralResult<()> {
        for drop in content {
            let entry = self
                .loot_list
                .iter()
                .find(|entry| entry.item_id == drop.item_id)
                .ok_or_else(|| {
                    UmbralError::GenerationFailed(format!(
                        "Dropped \"{}\" which is not in the loot table",
                        drop.item_id
                    ))
                })?;
            let in_range = entry.count.map_or(drop.count == 1, |r| r.contains(drop.count));
            if !in_range {
                return Err(UmbralError::GenerationFailed(format!(
                    "Dropped {} of \"{}\", outside its count range",
                    drop.count, drop.item_id
                )));
            }
        }
        Ok(())
    }

    fn generator_type(&self) -> &'static str {
        "LootGenerator"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::CountRange;
    use rand::SeedableRng;

    #[test]
    fn test_guaranteed_drops() {
        let table = vec![
            LootEntry::new("Bones", 1.0),
            LootEntry::new("Rusty sword", 1.0).with_count(CountRange::new(2, 5)),
        ];
        let mut rng = StdRng::seed_from_u64(4);

        for _ in 0..50 {
            let drops = LootGenerator::new(&table)
                .generate(&GenerationConfig::default(), &mut rng)
                .unwrap();
            assert_eq!(drops.len(), 2);
            assert_eq!(drops[0], LootDrop { item_id: "Bones".to_string(), count: 1 });
            assert!(CountRange::new(2, 5).contains(drops[1].count));
        }
    }

    #[test]
    fn test_droprate_modifier() {
        let table = vec![LootEntry::new("Bones", 0.6)];
        let mut rng = StdRng::seed_from_u64(4);

        let never = GenerationConfig::default().with_droprate_modifier(0.0);
        let always = GenerationConfig::for_testing(0);
        for _ in 0..50 {
            let generator = LootGenerator::new(&table);
            // A zero chance only drops on an exact 0.0 roll
            assert!(generator.generate(&never, &mut rng).unwrap().len() <= 1);
            assert_eq!(generator.generate(&always, &mut rng).unwrap().len(), 1);
        }
    }

    #[test]
    fn test_enemy_loot() {
        use crate::{EnemyInstance, EnemySize, EnemyStats, EnemyTemplate};

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
        let template = EnemyTemplate::new("Skeleton", stats, EnemySize::Medium)
            .with_loot(LootEntry::new("Bones", 0.6))
            .with_loot(LootEntry::new("Skull", 0.0));
        let enemy = EnemyInstance::from_template(&template);
        let mut rng = StdRng::seed_from_u64(8);

        let drops = enemy.loot(&GenerationConfig::for_testing(0), &mut rng).unwrap();
        assert_eq!(drops, vec![LootDrop { item_id: "Bones".to_string(), count: 1 }]);
    }

    #[test]
    fn test_inverted_count_range_is_error() {
        // Tables built without validation can still reach the generator
        let table = vec![LootEntry::new("Bones", 1.0).with_count(CountRange::new(5, 2))];
        let mut rng = StdRng::seed_from_u64(4);
        let result = LootGenerator::new(&table).generate(&GenerationConfig::default(), &mut rng);
        assert!(matches!(result, Err(UmbralError::InvalidContent(_))));
    }

    #[test]
    fn test_drop_rate_roughly_matches_chance() {
        let table = vec![LootEntry::new("Bones", 0.5)];
        let mut rng = StdRng::seed_from_u64(21);
        let generator = LootGenerator::new(&table);

        let dropped = (0..2000)
            .filter(|_| {
                !generator
                    .generate(&GenerationConfig::default(), &mut rng)
                    .unwrap()
                    .is_empty()
            })
            .count();
        assert!((800..1200).contains(&dropped));
    }
}
