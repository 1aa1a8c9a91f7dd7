//! Persisted run-state records.

/// Permanent stat totals for one roster character.
///
/// Written whenever a level-up fires; until then the entry carries no
/// totals and effective stats fall back to catalog base stats.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[derive(serde::Serialize, serde::Deserialize)]
pub struct StatTotals {
    pub max_hp: u32,
    pub atk: u32,
    pub agi: u32,
}

/// Last-known hp/mp/sp meters for one roster character, written on floor
/// transitions.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[derive(serde::Serialize, serde::Deserialize)]
pub struct TransientSnapshot {
    pub char_id: u32,
    pub hp: u32,
    pub mp: u32,
    pub sp: u32,
}

/// One roster character's persisted progression and run participation.
#[derive(Clone, Debug, PartialEq, Eq)]
#[derive(serde::Serialize, serde::Deserialize)]
pub struct RosterEntry {
    pub char_id: u32,
    pub level: u32,
    pub exp: u32,

    /// Permanent totals. `None` until the first level-up was recorded.
    pub total_max_hp: Option<u32>,
    pub total_atk: Option<u32>,
    pub total_agi: Option<u32>,

    /// Transient meters carried between floors. `None` when never saved
    /// or cleared by a new run.
    pub current_hp: Option<u32>,
    pub current_mp: Option<u32>,
    pub current_sp: Option<u32>,

    /// At most two roster characters are selected at a time.
    pub is_selected: bool,
}

impl RosterEntry {
    /// A fresh entry at level 1 with nothing recorded yet.
    pub fn new(char_id: u32) -> Self {
        Self {
            char_id,
            level: 1,
            exp: 0,
            total_max_hp: None,
            total_atk: None,
            total_agi: None,
            current_hp: None,
            current_mp: None,
            current_sp: None,
            is_selected: false,
        }
    }

    pub fn selected(mut self) -> Self {
        self.is_selected = true;
        self
    }

    /// Drop the carried hp/mp/sp meters.
    pub fn clear_transients(&mut self) {
        self.current_hp = None;
        self.current_mp = None;
        self.current_sp = None;
    }
}

/// The whole persisted run: floor progress, ticket currency, and roster.
#[derive(Clone, Debug, PartialEq, Eq)]
#[derive(serde::Serialize, serde::Deserialize)]
pub struct RunRecord {
    pub current_floor: u32,
    pub tickets: u32,
    pub roster: Vec<RosterEntry>,
}

impl RunRecord {
    pub fn new(roster: Vec<RosterEntry>) -> Self {
        Self {
            current_floor: 1,
            tickets: 0,
            roster,
        }
    }

    pub fn entry(&self, char_id: u32) -> Option<&RosterEntry> {
        self.roster.iter().find(|e| e.char_id == char_id)
    }

    pub fn entry_mut(&mut self, char_id: u32) -> Option<&mut RosterEntry> {
        self.roster.iter_mut().find(|e| e.char_id == char_id)
    }

    /// Roster entries flagged for the current run, in roster order.
    pub fn selected(&self) -> impl Iterator<Item = &RosterEntry> {
        self.roster.iter().filter(|e| e.is_selected)
    }
}
