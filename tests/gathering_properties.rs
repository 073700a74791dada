//! Property tests for the gathering efficiency curve.

use proptest::prelude::*;
use umbral::{
    geometric_interpolate, ActivityDefinition, CountRange, GatheringConfig, ResourceYield,
    ScalingPair, SkillBook, SkillWindow,
};

fn gathering(
    time: (f64, f64),
    chance: (f64, f64),
    low: (u32, u32),
    high: (u32, u32),
    scales_with_skill: bool,
) -> GatheringConfig {
    GatheringConfig {
        scales_with_skill,
        skill_required: SkillWindow::new(1, 10),
        time_period: ScalingPair::new(time.0, time.1),
        resources: vec![ResourceYield {
            name: "Piece of wood".to_string(),
            chance: ScalingPair::new(chance.0, chance.1),
            count_low: CountRange::new(low.0, low.0 + low.1),
            count_high: CountRange::new(high.0, high.0 + high.1),
        }],
    }
}

proptest! {
    #[test]
    fn property_endpoints_are_exact(
        time in (1.0_f64..500.0, 1.0_f64..500.0),
        chance in (0.01_f64..=1.0, 0.01_f64..=1.0),
        low in (1_u32..20, 0_u32..5),
        high in (1_u32..20, 0_u32..5),
    ) {
        let config = gathering(time, chance, low, high, true);
        config.validate().unwrap();

        let at_base = config.efficiency_at(0.0);
        prop_assert_eq!(at_base.time_needed, time.0.floor() as u32);
        prop_assert_eq!(at_base.resources[0].chance, chance.0);
        prop_assert_eq!(at_base.resources[0].count, CountRange::new(low.0, low.0 + low.1));

        let at_max = config.efficiency_at(1.0);
        prop_assert_eq!(at_max.time_needed, time.1.floor() as u32);
        prop_assert_eq!(at_max.resources[0].chance, chance.1);
        prop_assert_eq!(at_max.resources[0].count, CountRange::new(high.0, high.0 + high.1));
    }

    #[test]
    fn property_skill_levels_reach_endpoints(
        time in (1.0_f64..500.0, 1.0_f64..500.0),
        chance in (0.01_f64..=1.0, 0.01_f64..=1.0),
        beyond in 10_u32..50,
    ) {
        let config = gathering(time, chance, (1, 0), (2, 1), true);
        let definition = ActivityDefinition::new("woodcutting", &["Woodcutting"]);
        let mut skills = SkillBook::new();
        skills.insert("Woodcutting", 50);

        // Below the window
        let novice = config.efficiency(&definition, &skills).unwrap();
        prop_assert_eq!(novice, config.efficiency_at(0.0));

        skills.set_level("Woodcutting", beyond).unwrap();
        let master = config.efficiency(&definition, &skills).unwrap();
        prop_assert_eq!(master, config.efficiency_at(1.0));
    }

    #[test]
    fn property_non_scaling_uses_base_endpoint(level in 0_u32..50) {
        let config = gathering((120.0, 45.0), (0.5, 1.0), (1, 0), (3, 2), false);
        let definition = ActivityDefinition::new("woodcutting", &["Woodcutting"]);
        let mut skills = SkillBook::new();
        skills.insert("Woodcutting", 50);
        skills.set_level("Woodcutting", level).unwrap();

        let efficiency = config.efficiency(&definition, &skills).unwrap();
        prop_assert_eq!(efficiency.clone(), config.efficiency_at(0.0));
        prop_assert_eq!(efficiency.time_needed, 120);
    }

    #[test]
    fn property_interpolation_stays_between_endpoints(
        base in 0.01_f64..1000.0,
        max in 0.01_f64..1000.0,
        m in 0.0_f64..=1.0,
    ) {
        let value = geometric_interpolate(base, max, m);
        let (lo, hi) = if base <= max { (base, max) } else { (max, base) };
        prop_assert!(value >= lo * (1.0 - 1e-12) && value <= hi * (1.0 + 1e-12));
    }
}

#[test]
fn test_window_midpoint() {
    let config = gathering((100.0, 25.0), (0.25, 1.0), (1, 0), (4, 0), true);
    let at_half = config.efficiency_at(0.5);
    assert_eq!(at_half.time_needed, 50);
    assert_eq!(at_half.resources[0].chance, 0.5);
    assert_eq!(at_half.resources[0].count, CountRange::new(2, 2));
}
