//! Player-facing command methods: actor selection, action choice,
//! targeting, and cancellation.

use crate::config::BalanceConfig;
use crate::unit::{ResourceError, Side, UnitId};

use super::errors::CommandError;
use super::{ActionKind, BattlePhase, CombatEngine, QueuedAction};

impl CombatEngine {
    /// Begin commanding one of this round's remaining player units.
    ///
    /// Valid only in `WaitForActor`, and only for actors still in the
    /// commandable set.
    pub fn select_actor(&mut self, actor: UnitId) -> Result<(), CommandError> {
        if self.phase != BattlePhase::WaitForActor {
            return Err(CommandError::IllegalState { phase: self.phase });
        }
        if !self.commandable.contains(&actor) {
            return Err(CommandError::NotCommandable { actor });
        }

        self.current_actor = Some(actor);
        self.phase = BattlePhase::CommandInput;
        Ok(())
    }

    /// Choose what the selected actor will do.
    ///
    /// Rejects `Skill` without the MP to pay for it and `Ultimate` without
    /// a full SP meter; both rejections leave the engine in `CommandInput`
    /// so the player can pick something else.
    pub fn choose_action(&mut self, kind: ActionKind) -> Result<(), CommandError> {
        if self.phase != BattlePhase::CommandInput {
            return Err(CommandError::IllegalState { phase: self.phase });
        }
        let Some(actor) = self.current_actor.and_then(|id| self.unit(id)) else {
            return Err(CommandError::IllegalState { phase: self.phase });
        };

        match kind {
            ActionKind::Skill if actor.mp < BalanceConfig::SKILL_MP_COST => {
                return Err(ResourceError::InsufficientMp {
                    current: actor.mp,
                    required: BalanceConfig::SKILL_MP_COST,
                }
                .into());
            }
            ActionKind::Ultimate if actor.sp < actor.max_sp => {
                return Err(ResourceError::UltimateNotCharged {
                    current: actor.sp,
                    required: actor.max_sp,
                }
                .into());
            }
            _ => {}
        }

        self.pending_kind = Some(kind);
        self.phase = BattlePhase::TargetSelection;
        Ok(())
    }

    /// Commit the pending action against a living enemy target.
    ///
    /// The actor leaves the commandable set; once the set is empty the
    /// round proceeds to execution, otherwise control returns to actor
    /// selection. Committed actions cannot be withdrawn.
    pub fn confirm_target(&mut self, target: UnitId) -> Result<(), CommandError> {
        if self.phase != BattlePhase::TargetSelection {
            return Err(CommandError::IllegalState { phase: self.phase });
        }
        let (Some(actor), Some(kind)) = (self.current_actor, self.pending_kind) else {
            return Err(CommandError::IllegalState { phase: self.phase });
        };
        let valid_target = self
            .unit(target)
            .is_some_and(|u| u.side == Side::Enemy && u.is_alive());
        if !valid_target {
            return Err(CommandError::InvalidTarget { target });
        }

        self.player_actions.push(QueuedAction {
            actor,
            kind,
            target,
        });
        self.commandable.retain(|id| *id != actor);
        self.current_actor = None;
        self.pending_kind = None;

        if self.commandable.is_empty() {
            self.begin_execution();
        } else {
            self.phase = BattlePhase::WaitForActor;
        }
        Ok(())
    }

    /// Step back exactly one selection state.
    ///
    /// `TargetSelection` rewinds to `CommandInput`, `CommandInput` to
    /// `WaitForActor`. Already-queued actions are untouched.
    pub fn cancel(&mut self) -> Result<(), CommandError> {
        match self.phase {
            BattlePhase::TargetSelection => {
                self.pending_kind = None;
                self.phase = BattlePhase::CommandInput;
                Ok(())
            }
            BattlePhase::CommandInput => {
                self.current_actor = None;
                self.phase = BattlePhase::WaitForActor;
                Ok(())
            }
            phase => Err(CommandError::IllegalState { phase }),
        }
    }
}
