//! Errors surfaced by the command methods of the combat engine.

use crate::unit::{ResourceError, UnitId};

use super::BattlePhase;

/// Rejection of a command call. State is left unchanged in every case.
///
/// Resource shortfalls are reported through the [`ResourceError`] variant,
/// distinct from illegal-state rejections, so the presentation layer can
/// show a specific message.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum CommandError {
    #[error("call not valid in phase {phase}")]
    IllegalState { phase: BattlePhase },

    #[error("{actor} is not in the commandable set")]
    NotCommandable { actor: UnitId },

    #[error("{target} is not a living enemy unit")]
    InvalidTarget { target: UnitId },

    #[error(transparent)]
    Resource(#[from] ResourceError),
}
