use super::{Assist, Death, EntryHoldKill, EntryKill, Kill};

pub fn kill(round: u32, jumping: bool, crouching: bool) -> Kill {
    Kill {
        round,
        tick: round * 1000,
        killer_steam_id: 1,
        victim_steam_id: 2,
        weapon: "ak47".to_owned(),
        is_headshot: false,
        killer_is_jumping: jumping,
        killer_is_crouching: crouching,
    }
}

pub fn entry_kill(round: u32, has_won: bool) -> EntryKill {
    EntryKill {
        round,
        killer_steam_id: 1,
        victim_steam_id: 2,
        weapon: "awp".to_owned(),
        has_won,
    }
}

pub fn entry_hold_kill(round: u32, has_won: bool) -> EntryHoldKill {
    EntryHoldKill {
        round,
        killer_steam_id: 1,
        victim_steam_id: 2,
        weapon: "m4a1".to_owned(),
        has_won,
    }
}

pub fn death(round: u32) -> Death {
    Death {
        round,
        tick: round * 1000,
        victim_steam_id: 1,
        killer_steam_id: Some(2),
    }
}

pub fn assist(round: u32) -> Assist {
    Assist {
        round,
        tick: round * 1000,
        assister_steam_id: 1,
        victim_steam_id: 2,
    }
}
