use std::rc::Rc;

use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::error::Result;
use crate::model::{
    Assist, Death, EntryHoldKill, EntryKill, Kill, Player, PlayerCounters, Team, TeamCounters,
};

/// Persisted form of a [`Team`]: its name and roster only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamSnapshot {
    #[serde(rename = "team_name")]
    pub name: String,
    #[serde(rename = "team_players", default)]
    pub players: Vec<PlayerSnapshot>,
}

/// Persisted form of a [`Player`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerSnapshot {
    pub name: String,
    pub steam_id: u64,
    pub team_name: String,
    #[serde(default)]
    pub kills: Vec<Kill>,
    #[serde(default)]
    pub deaths: Vec<Death>,
    #[serde(default)]
    pub assists: Vec<Assist>,
    #[serde(default)]
    pub entry_kills: Vec<EntryKill>,
    #[serde(default)]
    pub entry_hold_kills: Vec<EntryHoldKill>,
    #[serde(default)]
    pub counters: PlayerCounters,
}

impl Team {
    pub fn snapshot(&self) -> TeamSnapshot {
        TeamSnapshot {
            name: self.name().to_owned(),
            players: self.players().iter().map(|p| p.snapshot()).collect(),
        }
    }

    /// Rebuilds a team with default [`TeamCounters`] and a zero loss streak.
    pub fn from_snapshot(snapshot: TeamSnapshot) -> Team {
        Self::from_snapshot_with_counters(snapshot, TeamCounters::default())
    }

    /// Rebuilds a team and re-supplies the counters that are not persisted.
    pub fn from_snapshot_with_counters(snapshot: TeamSnapshot, counters: TeamCounters) -> Team {
        let team = Team::new(snapshot.name);
        team.set_counters(counters);
        team.set_players(
            snapshot
                .players
                .into_iter()
                .map(|p| Rc::new(Player::from_snapshot(p))),
        );
        team
    }

    #[instrument(skip(self), fields(team = %self.name()))]
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(&self.snapshot())?)
    }

    #[instrument(skip(self), fields(team = %self.name()))]
    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.snapshot())?)
    }

    #[instrument(skip(json))]
    pub fn from_json(json: &str) -> Result<Team> {
        Self::from_json_with_counters(json, TeamCounters::default())
    }

    #[instrument(skip(json))]
    pub fn from_json_with_counters(json: &str, counters: TeamCounters) -> Result<Team> {
        let snapshot: TeamSnapshot = serde_json::from_str(json)?;
        let team = Self::from_snapshot_with_counters(snapshot, counters);
        debug!(
            team = %team.name(),
            players = team.player_count(),
            "loaded team"
        );
        Ok(team)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::error::StatsError;
    use crate::model::{GrenadeKind, GrenadeThrow, Side};

    fn sample_team() -> Team {
        let team = Team::new("Alpha");
        let player = Rc::new(Player::new("s1mple", 76561198034202275, "Alpha"));
        player.kills().push(Kill {
            round: 1,
            tick: 2048,
            killer_steam_id: 76561198034202275,
            victim_steam_id: 76561197960287930,
            weapon: "awp".to_owned(),
            is_headshot: true,
            killer_is_jumping: false,
            killer_is_crouching: true,
        });
        player.entry_kills().push(EntryKill {
            round: 1,
            killer_steam_id: 76561198034202275,
            victim_steam_id: 76561197960287930,
            weapon: "awp".to_owned(),
            has_won: true,
        });
        player.record_grenade_throw(&GrenadeThrow {
            round: 1,
            tick: 1500,
            kind: GrenadeKind::Smoke,
        });
        team.add_player(player);
        team
    }

    #[test]
    fn test_only_name_and_players_are_written() {
        let team = sample_team();
        team.record_round(Side::Terrorist, false, None);

        let value: serde_json::Value = serde_json::from_str(&team.to_json().unwrap()).unwrap();
        let object = value.as_object().unwrap();

        assert_eq!(
            object.keys().cloned().collect::<Vec<_>>(),
            vec!["team_name".to_owned(), "team_players".to_owned()]
        );
        assert_eq!(object["team_name"], "Alpha");
        assert_eq!(object["team_players"][0]["kills"][0]["weapon"], "awp");
    }

    #[test]
    fn test_reload_restores_roster_and_defaults_counters() {
        let team = sample_team();
        team.update_counters(|c| {
            c.match_count = 3;
            c.win_round_count = 16;
        });
        team.set_loss_row_count(2);

        let loaded = Team::from_json(&team.to_json_pretty().unwrap()).unwrap();

        assert_eq!(loaded.snapshot(), team.snapshot());
        assert_eq!(loaded.kill_count(), 1);
        assert_eq!(loaded.ratio_entry_kill(), 100);
        assert_eq!(loaded.smoke_thrown_count(), 1);
        assert_eq!(loaded.counters(), TeamCounters::default());
        assert_eq!(loaded.loss_row_count(), 0);
    }

    #[test]
    fn test_reload_with_counters() {
        let team = sample_team();
        let mut counters = TeamCounters::default();
        counters.win_count = 1;

        let loaded = Team::from_json_with_counters(&team.to_json().unwrap(), counters).unwrap();

        assert_eq!(loaded.counters().win_count, 1);
        assert_eq!(loaded.counters().match_count, 1);
    }

    #[test]
    fn test_missing_collections_default_to_empty() {
        let json = r#"{"team_name":"Beta","team_players":[{"name":"b","steam_id":7,"team_name":"Beta"}]}"#;

        let team = Team::from_json(json).unwrap();

        assert_eq!(team.player_count(), 1);
        assert_eq!(team.death_count(), 0);
        assert_eq!(team.find_player(7).map(|p| p.name().to_owned()), Some("b".to_owned()));
    }

    #[test]
    fn test_invalid_json_is_an_error() {
        let err = Team::from_json("{\"team_players\": []}").unwrap_err();
        assert!(matches!(err, StatsError::Json(_)));
    }

    #[test]
    fn test_loaded_players_are_observed() {
        let team = Team::from_json(&sample_team().to_json().unwrap()).unwrap();
        team.death_count();

        team.players()[0].deaths().push(Death {
            round: 2,
            tick: 4000,
            victim_steam_id: 76561198034202275,
            killer_steam_id: None,
        });

        assert!(team.is_dirty(crate::propagation::Metric::DeathCount));
        assert_eq!(team.death_count(), 1);
    }
}
