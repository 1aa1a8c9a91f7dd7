//! Leveling and stat growth.
//!
//! Pure computations over [`CharacterUnit`]: experience thresholds, stat
//! allocation on level-up, and the post-victory reward rule. Used both for
//! in-battle survivor rewards and for out-of-battle progression; nothing
//! here touches storage.

use crate::config::BalanceConfig;
use crate::unit::CharacterUnit;

/// One level gained by [`gain_experience`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[derive(serde::Serialize, serde::Deserialize)]
pub struct LevelUpEvent {
    pub old_level: u32,
    pub new_level: u32,
}

/// Experience required to clear the given level.
///
/// Zero at the level cap: experience is inert once a unit caps out.
pub fn next_level_threshold(level: u32) -> u32 {
    if level >= BalanceConfig::MAX_LEVEL {
        return 0;
    }
    level * BalanceConfig::EXP_PER_LEVEL_COEFF
}

/// Permanently raise stats for one gained level.
///
/// The grade's growth budget splits 60% into max_hp and 30% into atk, both
/// floor-divided; agi absorbs the rounding remainder so the three parts
/// always sum to the full budget. HP is restored to the new maximum.
fn apply_level_up(unit: &mut CharacterUnit) {
    let budget = unit.grade.growth_budget();
    let hp_gain = budget * 6 / 10;
    let atk_gain = budget * 3 / 10;
    let agi_gain = budget - hp_gain - atk_gain;

    unit.max_hp += hp_gain;
    unit.atk += atk_gain;
    unit.agi += agi_gain;
    unit.hp = unit.max_hp;
}

/// Add experience to a unit, levelling it up as thresholds are crossed.
///
/// Returns one event per level gained, in order. A unit already at the cap
/// gains nothing; a unit reaching the cap mid-grant has its remaining
/// experience discarded (exp forced to 0).
pub fn gain_experience(unit: &mut CharacterUnit, amount: u32) -> Vec<LevelUpEvent> {
    if unit.level >= BalanceConfig::MAX_LEVEL || amount == 0 {
        return Vec::new();
    }

    unit.exp += amount;

    let mut events = Vec::new();
    while unit.level < BalanceConfig::MAX_LEVEL {
        let threshold = next_level_threshold(unit.level);
        if unit.exp < threshold {
            break;
        }

        let old_level = unit.level;
        unit.exp -= threshold;
        unit.level += 1;
        apply_level_up(unit);
        events.push(LevelUpEvent {
            old_level,
            new_level: unit.level,
        });

        if unit.level >= BalanceConfig::MAX_LEVEL {
            unit.exp = 0;
            break;
        }
    }

    events
}

/// Post-victory experience for one survivor of the given level.
///
/// Base reward is `cleared_floor * 10`. A survivor whose level exceeds
/// `cleared_floor + 5` receives zero (anti-farming cap).
pub fn victory_reward(cleared_floor: u32, survivor_level: u32) -> u32 {
    if survivor_level > cleared_floor + BalanceConfig::LEVEL_PENALTY_THRESHOLD {
        return 0;
    }
    cleared_floor * BalanceConfig::BATTLE_EXP_REWARD_COEFF
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::unit::{Grade, Side};

    fn leveled_unit(grade: Grade, level: u32) -> CharacterUnit {
        CharacterUnit {
            name: "test".into(),
            grade,
            side: Side::Player,
            roster_id: Some(1),
            hp: 50,
            max_hp: 100,
            mp: 50,
            max_mp: 50,
            sp: 0,
            max_sp: 100,
            atk: 20,
            agi: 10,
            level,
            exp: 0,
            skill_name: String::new(),
            ultimate_name: String::new(),
        }
    }

    #[test]
    fn threshold_is_level_times_coeff_below_cap() {
        assert_eq!(next_level_threshold(1), 100);
        assert_eq!(next_level_threshold(49), 4900);
        assert_eq!(next_level_threshold(50), 0);
        assert_eq!(next_level_threshold(99), 0);
    }

    #[test]
    fn rare_grade_splits_six_points_as_3_1_2() {
        let mut unit = leveled_unit(Grade::Rare, 1);
        let events = gain_experience(&mut unit, 100);

        assert_eq!(events.len(), 1);
        assert_eq!(unit.max_hp, 103);
        assert_eq!(unit.atk, 21);
        assert_eq!(unit.agi, 12);
        // hp fully restored to new max
        assert_eq!(unit.hp, 103);
    }

    #[test]
    fn growth_parts_sum_to_budget_for_every_grade() {
        for grade in [
            Grade::Common,
            Grade::Rare,
            Grade::Special,
            Grade::Legend,
            Grade::Mythic,
        ] {
            let budget = grade.growth_budget();
            let hp = budget * 6 / 10;
            let atk = budget * 3 / 10;
            assert_eq!(hp + atk + (budget - hp - atk), budget);
        }
    }

    #[test]
    fn multi_level_gain_emits_one_event_per_level() {
        let mut unit = leveled_unit(Grade::Common, 1);
        let events = gain_experience(&mut unit, 250);

        assert_eq!(
            events,
            vec![
                LevelUpEvent {
                    old_level: 1,
                    new_level: 2
                },
                LevelUpEvent {
                    old_level: 2,
                    new_level: 3
                },
            ]
        );
        assert_eq!(unit.level, 3);
        assert_eq!(unit.exp, 50);
    }

    #[test]
    fn capped_unit_gains_nothing() {
        let mut unit = leveled_unit(Grade::Mythic, BalanceConfig::MAX_LEVEL);
        let before = unit.clone();
        assert!(gain_experience(&mut unit, 10_000).is_empty());
        assert_eq!(unit, before);
    }

    #[test]
    fn exp_is_forced_to_zero_on_reaching_cap() {
        let mut unit = leveled_unit(Grade::Common, BalanceConfig::MAX_LEVEL - 1);
        let threshold = next_level_threshold(unit.level);
        let events = gain_experience(&mut unit, threshold + 777);

        assert_eq!(events.len(), 1);
        assert_eq!(unit.level, BalanceConfig::MAX_LEVEL);
        assert_eq!(unit.exp, 0);
    }

    #[test]
    fn victory_reward_applies_anti_farming_cap() {
        assert_eq!(victory_reward(10, 1), 100);
        assert_eq!(victory_reward(10, 15), 100);
        assert_eq!(victory_reward(10, 16), 0);
        assert_eq!(victory_reward(10, 20), 0);
    }
}
