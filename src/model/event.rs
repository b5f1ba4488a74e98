use serde::{Deserialize, Serialize};

use super::common::GrenadeKind;

/// A player killing an opponent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Kill {
    pub round: u32,
    pub tick: u32,
    pub killer_steam_id: u64,
    pub victim_steam_id: u64,
    pub weapon: String,
    pub is_headshot: bool,
    pub killer_is_jumping: bool,
    pub killer_is_crouching: bool,
}

/// A player dying. `killer_steam_id` is `None` for world damage or suicide.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Death {
    pub round: u32,
    pub tick: u32,
    pub victim_steam_id: u64,
    pub killer_steam_id: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assist {
    pub round: u32,
    pub tick: u32,
    pub assister_steam_id: u64,
    pub victim_steam_id: u64,
}

/// The first kill of a round's opening engagement, by the attacking player.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntryKill {
    pub round: u32,
    pub killer_steam_id: u64,
    pub victim_steam_id: u64,
    pub weapon: String,
    pub has_won: bool,
}

/// The first kill of a round's opening engagement, by the defending player
/// holding the position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntryHoldKill {
    pub round: u32,
    pub killer_steam_id: u64,
    pub victim_steam_id: u64,
    pub weapon: String,
    pub has_won: bool,
}

/// A player throwing a piece of utility.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GrenadeThrow {
    pub round: u32,
    pub tick: u32,
    pub kind: GrenadeKind,
}

/// Duel-type records carrying the outcome of the engagement.
pub trait DuelOutcome {
    fn has_won(&self) -> bool;
}

impl DuelOutcome for EntryKill {
    fn has_won(&self) -> bool {
        self.has_won
    }
}

impl DuelOutcome for EntryHoldKill {
    fn has_won(&self) -> bool {
        self.has_won
    }
}
