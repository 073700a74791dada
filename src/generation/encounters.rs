//! # Encounter Generation
//!
//! Draws the next enemy group of a combat zone and turns each drawn name into
//! a fresh [`EnemyInstance`], optionally with randomized stats.

use crate::{
    Catalog, CombatZone, EnemyInstance, EnemyPool, EnemyStats, EnemyTemplate, GenerationConfig,
    Generator, UmbralError, UmbralResult,
};
use rand::rngs::StdRng;
use rand::Rng;
use uuid::Builder;

/// Generates enemy groups for one combat zone.
///
/// # Examples
///
/// ```
/// use umbral::{builtin, EncounterGenerator, GenerationConfig};
///
/// let catalog = builtin::catalog().unwrap();
/// let atlas = builtin::atlas(&catalog).unwrap();
/// let zone = atlas.zone("Wandering Undead").unwrap();
///
/// let config = GenerationConfig::new(1);
/// let mut rng = umbral::generation::utils::create_rng(&config);
/// let group = EncounterGenerator::new(zone, &catalog).generate_group(&mut rng).unwrap();
/// assert!(!group.is_empty());
/// ```
#[derive(Debug, Clone, Copy)]
pub struct EncounterGenerator<'a> {
    zone: &'a CombatZone,
    catalog: &'a Catalog,
}

impl<'a> EncounterGenerator<'a> {
    pub fn new(zone: &'a CombatZone, catalog: &'a Catalog) -> Self {
        Self { zone, catalog }
    }

    /// Picks the names of the next group's members.
    ///
    /// Predefined groups are picked uniformly. Loose rosters draw a size
    /// uniformly from the inclusive group size range, then each member
    /// uniformly with replacement.
    pub fn draw_names(&self, rng: &mut StdRng) -> Vec<String> {
        match self.zone.enemy_pool() {
            EnemyPool::Groups(groups) => groups[rng.gen_range(0..groups.len())].clone(),
            EnemyPool::Roster {
                enemies,
                group_size,
            } => {
                let size = rng.gen_range(group_size.min..=group_size.max);
                (0..size)
                    .map(|_| enemies[rng.gen_range(0..enemies.len())].clone())
                    .collect()
            }
        }
    }

    /// Generates the next group of enemy instances.
    pub fn generate_group(&self, rng: &mut StdRng) -> UmbralResult<Vec<EnemyInstance>> {
        let names = self.draw_names(rng);
        let group = names
            .iter()
            .map(|name| {
                let template = self.catalog.require_enemy(name)?;
                Ok(instantiate(template, self.zone.stat_variation(), rng))
            })
            .collect::<UmbralResult<Vec<_>>>()?;

        log::debug!(
            "Zone \"{}\" generated group: {:?}",
            self.zone.name,
            group.iter().map(|e| e.name.as_str()).collect::<Vec<_>>()
        );
        Ok(group)
    }
}

impl Generator<Vec<EnemyInstance>> for EncounterGenerator<'_> {
    fn generate(
        &self,
        config: &GenerationConfig,
        rng: &mut StdRng,
    ) -> UmbralResult<Vec<EnemyInstance>> {
        let group = self.generate_group(rng)?;
        self.validate(&group, config)?;
        Ok(group)
    }

    fn validate(&self, content: &Vec<EnemyInstance>, _config: &GenerationConfig) -> UmbralResult<()> {
        if content.is_empty() {
            return Err(UmbralError::GenerationFailed(format!(
                "Zone \"{}\" produced an empty group",
                self.zone.name
            )));
        }
        if let EnemyPool::Roster { group_size, .. } = self.zone.enemy_pool() {
            let size = content.len() as u32;
            if size < group_size.min || size > group_size.max {
                return Err(UmbralError::GenerationFailed(format!(
                    "Zone \"{}\" produced a group of {} outside [{}, {}]",
                    self.zone.name, size, group_size.min, group_size.max
                )));
            }
        }
        Ok(())
    }

    fn generator_type(&self) -> &'static str {
        "EncounterGenerator"
    }
}

/// Builds a fresh instance of a template, varying its stats by up to `tolerance`.
pub fn instantiate(template: &EnemyTemplate, tolerance: f64, rng: &mut StdRng) -> EnemyInstance {
    let stats = vary_stats(&template.stats, tolerance, rng);
    let mut instance = EnemyInstance::with_stats(template, stats);
    instance.id = Builder::from_random_bytes(rng.gen()).into_uuid();
    instance
}

/// Randomizes stats around their base values.
///
/// One variation magnitude `r` in `[0, tolerance)` is drawn for the enemy, then
/// each stat is scaled independently by a factor drawn from `(1 - r, 1 + r]`.
/// Integer stats are rounded to the nearest integer and attack speed to two
/// decimals. A tolerance of 0 copies the stats verbatim.
///
/// # Examples
///
/// ```
/// use rand::SeedableRng;
/// use umbral::{vary_stats, EnemyStats};
///
/// let base = EnemyStats {
///     health: 100, attack: 10, agility: 8, dexterity: 6,
///     intuition: 7, magic: 0, attack_speed: 1.0, defense: 6,
/// };
/// let mut rng = rand::rngs::StdRng::seed_from_u64(3);
/// let varied = vary_stats(&base, 0.1, &mut rng);
/// assert!(varied.health >= 90 && varied.health <= 110);
/// assert_eq!(vary_stats(&base, 0.0, &mut rng), base);
/// ```
pub fn vary_stats<R: Rng + ?Sized>(stats: &EnemyStats, tolerance: f64, rng: &mut R) -> EnemyStats {
    if tolerance.is_nan() || tolerance <= 0.0 {
        return *stats;
    }
    let variation = rng.gen::<f64>() * tolerance;
    let base = 1.0 + variation;
    let spread = 2.0 * variation;

    EnemyStats {
        health: scale_stat(stats.health, base, spread, rng),
        attack: scale_stat(stats.attack, base, spread, rng),
        agility: scale_stat(stats.agility, base, spread, rng),
        dexterity: scale_stat(stats.dexterity, base, spread, rng),
        magic: scale_stat(stats.magic, base, spread, rng),
        intuition: scale_stat(stats.intuition, base, spread, rng),
        attack_speed: (stats.attack_speed * stat_factor(base, spread, rng) * 100.0).round() / 100.0,
        defense: scale_stat(stats.defense, base, spread, rng),
    }
}

fn stat_factor<R: Rng + ?Sized>(base: f64, spread: f64, rng: &mut R) -> f64 {
    (base - rng.gen::<f64>() * spread).max(0.0)
}

fn scale_stat<R: Rng + ?Sized>(value: u32, base: f64, spread: f64, rng: &mut R) -> u32 {
    (value as f64 * stat_factor(base, spread, rng)).round() as u32
}
