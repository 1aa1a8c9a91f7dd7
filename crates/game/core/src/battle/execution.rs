//! Round internals: round start, enemy decision synthesis, queue ordering,
//! per-tick action resolution, and end-of-battle processing.

use crate::config::BalanceConfig;
use crate::growth;
use crate::unit::{Side, UnitId};

use super::{ActionKind, BattlePhase, CombatEngine, Outcome, QueuedAction};

// draw_seed contexts, so one tick's rolls stay independent
const CTX_ENEMY_TARGET: u32 = 0;
const CTX_ENEMY_ACTION: u32 = 1;
const CTX_RETARGET: u32 = 2;
const CTX_SP_JITTER: u32 = 3;

impl CombatEngine {
    /// Begin a command round: regenerate SP for every living unit and
    /// rebuild the commandable set. With no living player units the round
    /// skips straight to execution, carrying only enemy actions.
    pub(super) fn start_command_round(&mut self) {
        for unit in self.units.iter_mut().filter(|u| u.is_alive()) {
            unit.regen_sp(BalanceConfig::ROUND_SP_REGEN);
        }

        self.commandable = self.living_ids(Side::Player);
        self.current_actor = None;
        self.pending_kind = None;

        if self.commandable.is_empty() {
            self.begin_execution();
        } else {
            self.phase = BattlePhase::WaitForActor;
        }
    }

    /// Synthesize enemy actions and build this round's execution queue.
    ///
    /// Player actions keep their submission order, enemy actions follow in
    /// unit-table order, then the whole list is stable-sorted by agi
    /// descending. The stable sort makes players win agi ties against
    /// enemies and earlier submissions win ties against later ones.
    pub(super) fn begin_execution(&mut self) {
        self.phase = BattlePhase::BattleExecution;

        let mut actions = std::mem::take(&mut self.player_actions);

        let player_targets = self.living_ids(Side::Player);
        if !player_targets.is_empty() {
            for enemy in self.living_ids(Side::Enemy) {
                let target_seed = self.draw_seed(CTX_ENEMY_TARGET);
                let action_seed = self.draw_seed(CTX_ENEMY_ACTION);

                let target = match self.rng.pick_index(target_seed, player_targets.len()) {
                    Some(i) => player_targets[i],
                    None => continue,
                };

                // enemies cast their skill half the time when they can
                // afford it; they never use ultimates
                let can_cast = self
                    .unit(enemy)
                    .is_some_and(|u| u.mp >= BalanceConfig::SKILL_MP_COST);
                let kind = if can_cast
                    && self.rng.roll_d100(action_seed) <= BalanceConfig::AI_SKILL_CHANCE_PCT
                {
                    ActionKind::Skill
                } else {
                    ActionKind::Attack
                };

                actions.push(QueuedAction {
                    actor: enemy,
                    kind,
                    target,
                });
            }
        }

        let agi_of = |id: UnitId, units: &[crate::unit::CharacterUnit]| {
            units.get(id.0 as usize).map_or(0, |u| u.agi)
        };
        actions.sort_by(|a, b| agi_of(b.actor, &self.units).cmp(&agi_of(a.actor, &self.units)));

        self.queue = actions.into();
    }

    /// Resolve one queued action. Returns false when the entry is
    /// discarded without effect (dead actor, or no living target left on
    /// the opposing side).
    pub(super) fn execute_action(&mut self, action: QueuedAction) -> bool {
        let actor_idx = action.actor.0 as usize;
        if !self.units[actor_idx].is_alive() {
            return false;
        }

        // retarget if the queued target died since queuing
        let target = if self.units[action.target.0 as usize].is_alive() {
            action.target
        } else {
            let side = self.units[actor_idx].side.opposing();
            let candidates = self.living_ids(side);
            let seed = self.draw_seed(CTX_RETARGET);
            match self.rng.pick_index(seed, candidates.len()) {
                Some(i) => candidates[i],
                // nobody left to hit: a silent no-op, not a wasted turn
                None => return false,
            }
        };

        // resources may have drained between queuing and execution; a
        // higher-tier request whose precondition no longer holds steps
        // down to a normal attack
        let actor = &mut self.units[actor_idx];
        let (damage, resolved) = match action.kind {
            ActionKind::Attack => (actor.normal_attack(), ActionKind::Attack),
            ActionKind::Skill => match actor.use_skill() {
                Ok(damage) => (damage, ActionKind::Skill),
                Err(_) => (actor.normal_attack(), ActionKind::Attack),
            },
            ActionKind::Ultimate => match actor.use_ultimate() {
                Ok(damage) => (damage, ActionKind::Ultimate),
                Err(_) => (actor.normal_attack(), ActionKind::Attack),
            },
        };

        self.notifier
            .action_performed(&self.units[actor_idx], resolved);

        let jitter_seed = self.draw_seed(CTX_SP_JITTER);
        let target_idx = target.0 as usize;
        self.units[target_idx].take_damage(damage, self.rng.as_ref(), jitter_seed);
        self.notifier.damage_taken(&self.units[target_idx], damage);

        true
    }

    /// Check end conditions at round end. The outcome is sticky; once set
    /// the phase moves to `BattleEnded` and never leaves it.
    pub(super) fn check_battle_end(&mut self) -> bool {
        if self.outcome.is_none() {
            if self.living_ids(Side::Player).is_empty() {
                self.outcome = Some(Outcome::Loss);
            } else if self.living_ids(Side::Enemy).is_empty() {
                self.outcome = Some(Outcome::Win);
            }
        }

        match self.outcome {
            Some(outcome) => {
                self.phase = BattlePhase::BattleEnded;
                if outcome == Outcome::Win {
                    self.process_victory();
                }
                true
            }
            None => false,
        }
    }

    /// Distribute post-victory experience to surviving player units.
    fn process_victory(&mut self) {
        for id in self.living_ids(Side::Player) {
            let idx = id.0 as usize;
            let reward = growth::victory_reward(self.floor, self.units[idx].level);
            if reward == 0 {
                continue;
            }

            let events = growth::gain_experience(&mut self.units[idx], reward);
            for event in events {
                self.notifier.unit_leveled_up(&self.units[idx], &event);
                self.level_up_log.push((id, event));
            }
        }
    }
}
