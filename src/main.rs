//! # Umbral Main Entry Point
//!
//! Loads content, runs a seeded series of encounters in one combat zone and
//! prints the generated groups, their loot and the zone's environmental effect.

use clap::Parser;
use log::{info, warn};
use umbral::{
    builtin, CatalogBuilder, ContentPack, GenerationConfig, SkillBook, UmbralError, UmbralResult,
};

/// Command line arguments for the Umbral encounter runner.
#[derive(Parser, Debug)]
#[command(name = "umbral")]
#[command(about = "Procedural encounter and environmental effect engine")]
#[command(version)]
struct Args {
    /// Random seed for encounter generation
    #[arg(short, long)]
    seed: Option<u64>,

    /// JSON content pack registered on top of the builtin content
    #[arg(short, long)]
    content: Option<std::path::PathBuf>,

    /// Combat zone to fight in
    #[arg(short, long, default_value = "Wandering Undead")]
    zone: String,

    /// Number of encounters to generate
    #[arg(short, long, default_value_t = 3)]
    encounters: u32,

    /// Level applied to every hero skill, for the environmental effect
    #[arg(long, default_value_t = 0)]
    skill_level: u32,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    log_level: String,
}

fn main() -> UmbralResult<()> {
    let args = Args::parse();

    initialize_logging(&args.log_level);
    info!("Starting Umbral v{}", umbral::VERSION);

    run(&args)
}

/// Initializes `env_logger`; `RUST_LOG` takes precedence over `--log-level`.
fn initialize_logging(log_level: &str) {
    env_logger::Builder::new()
        .parse_filters(log_level)
        .parse_default_env()
        .format_target(false)
        .init();
}

fn run(args: &Args) -> UmbralResult<()> {
    let mut builder = CatalogBuilder::new();
    builtin::register_builtin(&mut builder)?;
    if let Some(path) = &args.content {
        info!("Loading content pack from {}", path.display());
        ContentPack::from_path(path)?.register_into(&mut builder)?;
    }
    let catalog = builder.build();
    let mut atlas = builtin::atlas(&catalog)?;

    let seed = args.seed.unwrap_or_else(rand::random);
    let config = GenerationConfig::new(seed);
    let mut rng = umbral::generation::utils::create_rng(&config);
    info!("Using seed {}", seed);

    let skills = hero_skills(&catalog, args.skill_level)?;
    let zone = atlas
        .zone_mut(&args.zone)
        .ok_or_else(|| UmbralError::UnknownLocation(args.zone.clone()))?;

    println!("== {} ({}) ==", zone.name, zone.description());
    let effect = zone.total_effect(&skills)?;
    for (stat, base) in effect.base_penalty.iter() {
        println!(
            "  {:<16} base x{:.3}  hero x{:.3}",
            stat,
            base,
            effect.hero_penalty.get(stat)
        );
    }

    for encounter in 1..=args.encounters {
        let group = match zone.next_group(&catalog, &mut rng) {
            Ok(group) => group,
            Err(UmbralError::ZoneFinished(name)) => {
                warn!("Zone \"{}\" is finished, stopping", name);
                break;
            }
            Err(e) => return Err(e),
        };

        println!("Encounter {}:", encounter);
        for enemy in &group {
            let drops = enemy.loot(&config, &mut rng)?;
            println!(
                "  {} [hp {} atk {} agi {} dex {} def {} spd {:.2}] loot: {:?}",
                enemy.name,
                enemy.stats.health,
                enemy.stats.attack,
                enemy.stats.agility,
                enemy.stats.dexterity,
                enemy.stats.defense,
                enemy.stats.attack_speed,
                drops
                    .iter()
                    .map(|d| format!("{} x{}", d.item_id, d.count))
                    .collect::<Vec<_>>()
            );
        }

        if let Some(outcome) = zone.record_group_defeated() {
            println!("  Zone cleared: {:?}", outcome);
        }
    }

    if let Some(village) = atlas.location("Village") {
        for activity in &village.activities {
            if let Some(efficiency) = activity.gathering_efficiency(&catalog, &skills)? {
                println!(
                    "{} at {}: {} ticks per cycle, {:?}",
                    activity.activity_name, village.name, efficiency.time_needed, efficiency.resources
                );
            }
        }
    }

    Ok(())
}

/// A skill book with every catalog skill at the given level.
fn hero_skills(catalog: &umbral::Catalog, level: u32) -> UmbralResult<SkillBook> {
    let mut skills = builtin::skills();
    for name in catalog.skills() {
        if !skills.contains(name) {
            skills.insert(name, umbral::config::DEFAULT_SKILL_MAX_LEVEL);
        }
        skills.set_level(name, level)?;
    }
    Ok(skills)
}
