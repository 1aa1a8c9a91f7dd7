//! Deterministic combat and progression rules for the 100-floor run.
//!
//! `ascent-core` defines the canonical rules: the combat state machine,
//! the character data model and its combat operations, leveling/growth,
//! and the floor/stage derivation. Everything here is pure and
//! single-threaded; randomness comes from an injected [`rng::RngOracle`]
//! and presentation goes through the [`notifier::BattleNotifier`] trait,
//! so the same seed always replays the same run.
pub mod battle;
pub mod config;
pub mod growth;
pub mod notifier;
pub mod rng;
pub mod stage;
pub mod unit;

pub use battle::{ActionKind, BattlePhase, CombatEngine, CommandError, EngineSignal, Outcome};
pub use config::BalanceConfig;
pub use growth::{LevelUpEvent, gain_experience, next_level_threshold, victory_reward};
pub use notifier::{BattleNotifier, NoopNotifier};
pub use rng::{PcgRng, RngOracle, compute_seed};
pub use stage::{StageError, StageGenerator, StageInfo};
pub use unit::{CharacterUnit, Grade, ResourceError, Side, UnitId};
