//! Combatant data model and its combat operations.
//!
//! A [`CharacterUnit`] holds one combatant's mutable stats. It has no
//! awareness of turn order or the battle state machine: the three
//! damage-producing operations return damage without applying it, and the
//! caller applies it to the target via [`CharacterUnit::take_damage`]. This
//! lets the combat engine decide fallbacks (insufficient resources at
//! execution time degrade to a normal attack) without duplicating damage
//! math.

use crate::config::BalanceConfig;
use crate::rng::RngOracle;

/// Handle into a battle's unit table.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[derive(serde::Serialize, serde::Deserialize)]
pub struct UnitId(pub u32);

impl std::fmt::Display for UnitId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "unit#{}", self.0)
    }
}

/// Which team a unit fights for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[derive(serde::Serialize, serde::Deserialize)]
pub enum Side {
    Player,
    Enemy,
}

impl Side {
    pub fn opposing(self) -> Side {
        match self {
            Side::Player => Side::Enemy,
            Side::Enemy => Side::Player,
        }
    }
}

/// Character rarity tier. Determines the growth-point budget on level-up.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[derive(strum::Display, strum::EnumString)]
#[derive(serde::Serialize, serde::Deserialize)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Grade {
    #[default]
    Common,
    Rare,
    Special,
    Legend,
    Mythic,
}

impl Grade {
    /// Total stat points granted per level gained.
    pub fn growth_budget(self) -> u32 {
        match self {
            Grade::Common => 4,
            Grade::Rare => 6,
            Grade::Special => 8,
            Grade::Legend => 10,
            Grade::Mythic => 15,
        }
    }
}

/// Raised when a skill or ultimate is requested without the resource to
/// pay for it. Distinct from state-machine errors so the presentation
/// layer can show a specific message.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ResourceError {
    #[error("insufficient mp: {current}/{required}")]
    InsufficientMp { current: u32, required: u32 },

    #[error("ultimate not charged: {current}/{required} sp")]
    UltimateNotCharged { current: u32, required: u32 },
}

/// One combatant's mutable stats and identity.
///
/// Invariant: `hp <= max_hp`, `mp <= max_mp`, `sp <= max_sp` after every
/// operation; damage and regeneration always clamp into range.
#[derive(Clone, Debug, PartialEq, Eq)]
#[derive(serde::Serialize, serde::Deserialize)]
pub struct CharacterUnit {
    // identity
    pub name: String,
    pub grade: Grade,
    pub side: Side,
    /// Roster-slot reference. Present for player units so terminal stats
    /// can be written back to storage; absent for ephemeral enemies.
    pub roster_id: Option<u32>,

    // resources
    pub hp: u32,
    pub max_hp: u32,
    pub mp: u32,
    pub max_mp: u32,
    pub sp: u32,
    pub max_sp: u32,

    // combat stats
    pub atk: u32,
    /// Speed. Used for turn ordering.
    pub agi: u32,

    // progression
    pub level: u32,
    pub exp: u32,

    // presentation metadata, not combat-relevant
    pub skill_name: String,
    pub ultimate_name: String,
}

impl CharacterUnit {
    /// A unit is alive exactly while hp > 0. Derived, never set directly.
    pub fn is_alive(&self) -> bool {
        self.hp > 0
    }

    /// Experience needed for the next level. Zero at the level cap.
    pub fn max_exp(&self) -> u32 {
        crate::growth::next_level_threshold(self.level)
    }

    /// Perform a normal attack: regenerates own MP and returns the damage
    /// to apply to the target. Does not touch the target.
    pub fn normal_attack(&mut self) -> u32 {
        self.mp = (self.mp + BalanceConfig::NORMAL_ATTACK_MP_REGEN).min(self.max_mp);
        self.atk
    }

    /// Cast the skill: deducts the fixed MP cost and returns the damage.
    pub fn use_skill(&mut self) -> Result<u32, ResourceError> {
        if self.mp < BalanceConfig::SKILL_MP_COST {
            return Err(ResourceError::InsufficientMp {
                current: self.mp,
                required: BalanceConfig::SKILL_MP_COST,
            });
        }
        self.mp -= BalanceConfig::SKILL_MP_COST;
        Ok(scale_damage(self.atk, BalanceConfig::SKILL_MULTIPLIER_PCT))
    }

    /// Unleash the ultimate: requires a full SP meter, drains it to zero
    /// and returns the damage.
    pub fn use_ultimate(&mut self) -> Result<u32, ResourceError> {
        if self.sp < self.max_sp {
            return Err(ResourceError::UltimateNotCharged {
                current: self.sp,
                required: self.max_sp,
            });
        }
        self.sp = 0;
        Ok(scale_damage(self.atk, BalanceConfig::ULTIMATE_MULTIPLIER_PCT))
    }

    /// Apply incoming damage, clamping hp at 0.
    ///
    /// Taking damage always feeds the SP meter, win or lose:
    /// `floor(max_sp / 10) + rand(1..=5)`, capped at max. The jitter is
    /// drawn from the injected oracle so combat stays reproducible.
    pub fn take_damage(&mut self, amount: u32, rng: &dyn RngOracle, seed: u64) {
        self.hp = self.hp.saturating_sub(amount);

        let charge = self.max_sp / 10 + rng.range(seed, 1, 5);
        self.sp = (self.sp + charge).min(self.max_sp);
    }

    /// Round-start SP regeneration, capped at max.
    pub fn regen_sp(&mut self, amount: u32) {
        self.sp = (self.sp + amount).min(self.max_sp);
    }
}

/// Damage scaled by a percent multiplier, rounded half up.
///
/// Both multipliers are halves (150%, 250%), so integer math is exact.
fn scale_damage(atk: u32, pct: u32) -> u32 {
    (atk * pct + 50) / 100
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::PcgRng;

    fn test_unit() -> CharacterUnit {
        CharacterUnit {
            name: "test".into(),
            grade: Grade::Common,
            side: Side::Player,
            roster_id: None,
            hp: 100,
            max_hp: 100,
            mp: 100,
            max_mp: 100,
            sp: 0,
            max_sp: 100,
            atk: 20,
            agi: 10,
            level: 1,
            exp: 0,
            skill_name: String::new(),
            ultimate_name: String::new(),
        }
    }

    #[test]
    fn normal_attack_returns_atk_and_regens_mp() {
        let mut unit = test_unit();
        unit.mp = 40;
        assert_eq!(unit.normal_attack(), 20);
        assert_eq!(unit.mp, 45);

        // regen caps at max_mp
        unit.mp = 98;
        unit.normal_attack();
        assert_eq!(unit.mp, 100);
    }

    #[test]
    fn skill_costs_mp_and_scales_damage() {
        let mut unit = test_unit();
        assert_eq!(unit.use_skill(), Ok(30));
        assert_eq!(unit.mp, 80);

        unit.mp = 19;
        assert_eq!(
            unit.use_skill(),
            Err(ResourceError::InsufficientMp {
                current: 19,
                required: 20
            })
        );
        assert_eq!(unit.mp, 19);
    }

    #[test]
    fn ultimate_requires_full_meter_and_drains_it() {
        let mut unit = test_unit();
        assert!(matches!(
            unit.use_ultimate(),
            Err(ResourceError::UltimateNotCharged { .. })
        ));

        unit.sp = unit.max_sp;
        assert_eq!(unit.use_ultimate(), Ok(50));
        assert_eq!(unit.sp, 0);
    }

    #[test]
    fn take_damage_clamps_at_zero_and_charges_sp() {
        let rng = PcgRng;
        let mut unit = test_unit();

        unit.take_damage(30, &rng, 1);
        assert_eq!(unit.hp, 70);
        // floor(100 / 10) + jitter in 1..=5
        assert!((11..=15).contains(&unit.sp));
        assert!(unit.is_alive());

        // lethal overkill clamps to 0 and kills
        unit.take_damage(1000, &rng, 2);
        assert_eq!(unit.hp, 0);
        assert!(!unit.is_alive());

        // repeated hits at 0 hp never go negative
        unit.take_damage(50, &rng, 3);
        assert_eq!(unit.hp, 0);
    }

    #[test]
    fn sp_charge_caps_at_max() {
        let rng = PcgRng;
        let mut unit = test_unit();
        unit.sp = 99;
        unit.take_damage(1, &rng, 7);
        assert_eq!(unit.sp, 100);
    }

    #[test]
    fn meters_stay_in_range_under_operation_sequences() {
        let rng = PcgRng;
        let mut unit = test_unit();
        unit.sp = unit.max_sp;

        for seed in 0..200u64 {
            match seed % 4 {
                0 => {
                    unit.normal_attack();
                }
                1 => {
                    let _ = unit.use_skill();
                }
                2 => {
                    let _ = unit.use_ultimate();
                }
                _ => unit.take_damage((seed % 17) as u32, &rng, seed),
            }
            assert!(unit.hp <= unit.max_hp);
            assert!(unit.mp <= unit.max_mp);
            assert!(unit.sp <= unit.max_sp);
            assert_eq!(unit.is_alive(), unit.hp > 0);
        }
    }
}
