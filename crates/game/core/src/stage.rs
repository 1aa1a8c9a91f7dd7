//! Floor-to-stage mapping for the 100-floor run.
//!
//! Phases 1-3 each cover 30 floors at tiers 1-3 and rotate through the
//! ordinary biomes in blocks of 10; phase 4 (floors 91-100) is a single
//! fixed final biome. Each phase's biome order is shuffled exactly once
//! when the generator is constructed, from the per-run seed, and never
//! re-rolled for the lifetime of the run.

use crate::rng::{RngOracle, compute_seed};

/// Ordinary biome rotation, shuffled per phase.
pub const BIOMES: [&str; 3] = ["Ember", "Frost", "Verdant"];
/// Biome of the final phase.
pub const FINAL_BIOME: &str = "Final";

/// Inclusive floor ranges per phase.
const PHASE_FLOORS: [(u32, u32); 4] = [(1, 30), (31, 60), (61, 90), (91, 100)];
const FLOORS_PER_BIOME: u32 = 10;

/// Floors with a fixed boss, independent of the biome shuffle.
const FIXED_BOSSES: [(u32, u32); 3] = [(91, 9090), (95, 9095), (100, 9100)];

/// Errors raised by stage derivation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum StageError {
    #[error("invalid floor {floor}: must be within 1-100")]
    FloorOutOfRange { floor: u32 },
}

/// Everything derived from a floor number. Pure value, no identity.
#[derive(Clone, Debug, PartialEq, Eq)]
#[derive(serde::Serialize, serde::Deserialize)]
pub struct StageInfo {
    pub floor: u32,
    pub phase: u8,
    pub biome: String,
    pub tier: u8,
    /// Set for the handful of floors with a scripted boss.
    pub fixed_boss_id: Option<u32>,
    pub is_boss_floor: bool,
}

/// Derives phase/biome/tier/boss metadata for every floor of one run.
///
/// Construction fixes the per-phase biome orders from the run seed; two
/// generators built from the same seed produce identical runs.
#[derive(Clone, Debug)]
pub struct StageGenerator {
    phase_orders: [Vec<&'static str>; 3],
}

impl StageGenerator {
    pub fn new(seed: u64, rng: &dyn RngOracle) -> Self {
        let mut draw = 0u64;
        let phase_orders = std::array::from_fn(|phase| {
            let mut order: Vec<&'static str> = BIOMES.to_vec();
            // Fisher-Yates over the per-run seed stream
            for i in (1..order.len()).rev() {
                let j = rng.range(compute_seed(seed, draw, phase as u32), 0, i as u32) as usize;
                order.swap(i, j);
                draw += 1;
            }
            order
        });

        Self { phase_orders }
    }

    /// Derive the full stage metadata for a floor.
    ///
    /// Floors outside 1-100 are a hard validation error.
    pub fn stage_info(&self, floor: u32) -> Result<StageInfo, StageError> {
        let (phase, tier) = phase_and_tier(floor)?;
        let biome = self.biome_for(floor, phase);
        let fixed_boss_id = fixed_boss_id(floor);

        Ok(StageInfo {
            floor,
            phase,
            biome: biome.to_string(),
            tier,
            fixed_boss_id,
            is_boss_floor: floor % FLOORS_PER_BIOME == 0 || fixed_boss_id.is_some(),
        })
    }

    /// Music track for a floor, derived from biome and tier.
    ///
    /// Presentation concern; lives here only because it shares the stage
    /// derivation.
    pub fn bgm_name(&self, floor: u32) -> Result<String, StageError> {
        let info = self.stage_info(floor)?;
        if info.biome == FINAL_BIOME {
            return Ok("bgm_final.mp3".to_string());
        }
        Ok(format!(
            "bgm_{}_t{}.mp3",
            info.biome.to_lowercase(),
            info.tier
        ))
    }

    fn biome_for(&self, floor: u32, phase: u8) -> &'static str {
        if phase == 4 {
            return FINAL_BIOME;
        }
        let order = &self.phase_orders[phase as usize - 1];
        let (start, _) = PHASE_FLOORS[phase as usize - 1];
        let idx = ((floor - start) / FLOORS_PER_BIOME) as usize;
        order[idx]
    }
}

fn phase_and_tier(floor: u32) -> Result<(u8, u8), StageError> {
    for (i, (start, end)) in PHASE_FLOORS.iter().enumerate() {
        if (*start..=*end).contains(&floor) {
            let phase = i as u8 + 1;
            // the final phase fights at tier 3
            let tier = if phase == 4 { 3 } else { phase };
            return Ok((phase, tier));
        }
    }
    Err(StageError::FloorOutOfRange { floor })
}

fn fixed_boss_id(floor: u32) -> Option<u32> {
    FIXED_BOSSES
        .iter()
        .find(|(f, _)| *f == floor)
        .map(|(_, id)| *id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::PcgRng;

    #[test]
    fn rejects_out_of_range_floors() {
        let generator = StageGenerator::new(1, &PcgRng);
        assert_eq!(
            generator.stage_info(0),
            Err(StageError::FloorOutOfRange { floor: 0 })
        );
        assert_eq!(
            generator.stage_info(101),
            Err(StageError::FloorOutOfRange { floor: 101 })
        );
    }

    #[test]
    fn phase_ranges_and_tiers() {
        let generator = StageGenerator::new(7, &PcgRng);
        for (floor, phase, tier) in [
            (1, 1, 1),
            (30, 1, 1),
            (31, 2, 2),
            (60, 2, 2),
            (61, 3, 3),
            (90, 3, 3),
            (91, 4, 3),
            (100, 4, 3),
        ] {
            let info = generator.stage_info(floor).unwrap();
            assert_eq!((info.phase, info.tier), (phase, tier), "floor {floor}");
        }
    }

    #[test]
    fn fixed_bosses_independent_of_shuffle_seed() {
        for seed in [0, 1, 42, u64::MAX] {
            let generator = StageGenerator::new(seed, &PcgRng);
            assert_eq!(generator.stage_info(91).unwrap().fixed_boss_id, Some(9090));
            assert_eq!(generator.stage_info(95).unwrap().fixed_boss_id, Some(9095));
            assert_eq!(generator.stage_info(100).unwrap().fixed_boss_id, Some(9100));
        }
    }

    #[test]
    fn floor_50_is_a_boss_floor_without_fixed_boss() {
        let generator = StageGenerator::new(3, &PcgRng);
        let info = generator.stage_info(50).unwrap();
        assert!(info.is_boss_floor);
        assert_eq!(info.fixed_boss_id, None);
    }

    #[test]
    fn fixed_boss_floors_are_boss_floors_even_off_multiples_of_ten() {
        let generator = StageGenerator::new(3, &PcgRng);
        assert!(generator.stage_info(91).unwrap().is_boss_floor);
        assert!(generator.stage_info(95).unwrap().is_boss_floor);
    }

    #[test]
    fn shuffle_is_fixed_per_run_not_per_call() {
        let generator = StageGenerator::new(11, &PcgRng);
        for floor in 1..=100 {
            let first = generator.stage_info(floor).unwrap();
            let second = generator.stage_info(floor).unwrap();
            assert_eq!(first, second);
        }
    }

    #[test]
    fn same_seed_produces_same_run() {
        let a = StageGenerator::new(99, &PcgRng);
        let b = StageGenerator::new(99, &PcgRng);
        for floor in 1..=100 {
            assert_eq!(a.stage_info(floor).unwrap(), b.stage_info(floor).unwrap());
        }
    }

    #[test]
    fn each_phase_covers_all_biomes_in_ten_floor_blocks() {
        let generator = StageGenerator::new(5, &PcgRng);
        for phase_start in [1u32, 31, 61] {
            let mut seen = Vec::new();
            for block in 0..3 {
                let info = generator.stage_info(phase_start + block * 10).unwrap();
                // constant within the block
                for offset in 0..10 {
                    let other = generator.stage_info(phase_start + block * 10 + offset).unwrap();
                    assert_eq!(other.biome, info.biome);
                }
                seen.push(info.biome);
            }
            seen.sort();
            let mut expected: Vec<String> = BIOMES.iter().map(|b| b.to_string()).collect();
            expected.sort();
            assert_eq!(seen, expected);
        }
    }

    #[test]
    fn final_phase_uses_the_fixed_final_biome() {
        let generator = StageGenerator::new(13, &PcgRng);
        for floor in 91..=100 {
            assert_eq!(generator.stage_info(floor).unwrap().biome, FINAL_BIOME);
        }
    }

    #[test]
    fn bgm_names_follow_biome_and_tier() {
        let generator = StageGenerator::new(17, &PcgRng);
        let info = generator.stage_info(1).unwrap();
        assert_eq!(
            generator.bgm_name(1).unwrap(),
            format!("bgm_{}_t1.mp3", info.biome.to_lowercase())
        );
        assert_eq!(generator.bgm_name(95).unwrap(), "bgm_final.mp3");
    }
}
