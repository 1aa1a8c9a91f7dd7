/// Namespace for the balance constants of combat and progression.
pub struct BalanceConfig;

impl BalanceConfig {
    // ===== combat =====
    /// MP cost of a skill cast.
    pub const SKILL_MP_COST: u32 = 20;
    /// MP regenerated by performing a normal attack.
    pub const NORMAL_ATTACK_MP_REGEN: u32 = 5;
    /// SP regenerated by every living unit at the start of a round.
    pub const ROUND_SP_REGEN: u32 = 5;
    /// Skill damage = atk * 3/2, rounded half up.
    pub const SKILL_MULTIPLIER_PCT: u32 = 150;
    /// Ultimate damage = atk * 5/2, rounded half up.
    pub const ULTIMATE_MULTIPLIER_PCT: u32 = 250;
    /// Percent chance an enemy with enough MP casts its skill.
    pub const AI_SKILL_CHANCE_PCT: u32 = 50;

    // ===== progression =====
    /// Level cap. Experience is inert once a unit reaches it.
    pub const MAX_LEVEL: u32 = 50;
    /// Next-level threshold = level * EXP_PER_LEVEL_COEFF.
    pub const EXP_PER_LEVEL_COEFF: u32 = 100;
    /// Post-victory base reward = cleared floor * BATTLE_EXP_REWARD_COEFF.
    pub const BATTLE_EXP_REWARD_COEFF: u32 = 10;
    /// Survivors above cleared_floor + threshold receive no reward.
    pub const LEVEL_PENALTY_THRESHOLD: u32 = 5;
}
