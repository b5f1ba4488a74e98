use serde::{Deserialize, Serialize};

use super::common::{BombSite, GrenadeKind, RoundCategory, Side};
use crate::propagation::PlayerCounter;

/// Per-player tallies set by whatever resolves rounds.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerCounters {
    pub bomb_planted_count: u32,
    pub bomb_defused_count: u32,
    pub bomb_exploded_count: u32,
    pub one_kill_count: u32,
    pub two_kill_count: u32,
    pub three_kill_count: u32,
    pub four_kill_count: u32,
    pub five_kill_count: u32,
    pub trade_kill_count: u32,
    pub trade_death_count: u32,
    pub flashbang_thrown_count: u32,
    pub he_grenade_thrown_count: u32,
    pub smoke_thrown_count: u32,
    pub molotov_thrown_count: u32,
    pub incendiary_thrown_count: u32,
    pub decoy_thrown_count: u32,
}

impl PlayerCounters {
    pub fn get(&self, counter: PlayerCounter) -> u32 {
        match counter {
            PlayerCounter::BombPlanted => self.bomb_planted_count,
            PlayerCounter::BombDefused => self.bomb_defused_count,
            PlayerCounter::BombExploded => self.bomb_exploded_count,
            PlayerCounter::OneKill => self.one_kill_count,
            PlayerCounter::TwoKill => self.two_kill_count,
            PlayerCounter::ThreeKill => self.three_kill_count,
            PlayerCounter::FourKill => self.four_kill_count,
            PlayerCounter::FiveKill => self.five_kill_count,
            PlayerCounter::TradeKill => self.trade_kill_count,
            PlayerCounter::TradeDeath => self.trade_death_count,
            PlayerCounter::Thrown(kind) => self.thrown_count(kind),
        }
    }

    pub fn thrown_count(&self, kind: GrenadeKind) -> u32 {
        match kind {
            GrenadeKind::Flashbang => self.flashbang_thrown_count,
            GrenadeKind::HeGrenade => self.he_grenade_thrown_count,
            GrenadeKind::Smoke => self.smoke_thrown_count,
            GrenadeKind::Molotov => self.molotov_thrown_count,
            GrenadeKind::Incendiary => self.incendiary_thrown_count,
            GrenadeKind::Decoy => self.decoy_thrown_count,
        }
    }

    pub fn thrown_count_mut(&mut self, kind: GrenadeKind) -> &mut u32 {
        match kind {
            GrenadeKind::Flashbang => &mut self.flashbang_thrown_count,
            GrenadeKind::HeGrenade => &mut self.he_grenade_thrown_count,
            GrenadeKind::Smoke => &mut self.smoke_thrown_count,
            GrenadeKind::Molotov => &mut self.molotov_thrown_count,
            GrenadeKind::Incendiary => &mut self.incendiary_thrown_count,
            GrenadeKind::Decoy => &mut self.decoy_thrown_count,
        }
    }

    /// Counters whose value differs between `self` and `other`.
    pub fn diff(&self, other: &PlayerCounters) -> Vec<PlayerCounter> {
        PlayerCounter::all()
            .into_iter()
            .filter(|counter| self.get(*counter) != other.get(*counter))
            .collect()
    }
}

/// Team tallies written by round resolution. None of these are derived
/// from the roster and none of them are persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TeamCounters {
    pub match_count: u32,
    pub win_count: u32,
    pub lost_count: u32,
    pub round_count: u32,
    pub win_round_count: u32,
    pub lost_round_count: u32,
    pub win_round_ct_count: u32,
    pub lost_round_ct_count: u32,
    pub win_round_t_count: u32,
    pub lost_round_t_count: u32,
    pub win_pistol_round_count: u32,
    pub win_eco_round_count: u32,
    pub win_semi_eco_round_count: u32,
    pub win_force_buy_round_count: u32,
    pub bomb_planted_on_a_count: u32,
    pub bomb_planted_on_b_count: u32,
}

impl Default for TeamCounters {
    fn default() -> Self {
        Self {
            match_count: 1,
            win_count: 0,
            lost_count: 0,
            round_count: 0,
            win_round_count: 0,
            lost_round_count: 0,
            win_round_ct_count: 0,
            lost_round_ct_count: 0,
            win_round_t_count: 0,
            lost_round_t_count: 0,
            win_pistol_round_count: 0,
            win_eco_round_count: 0,
            win_semi_eco_round_count: 0,
            win_force_buy_round_count: 0,
            bomb_planted_on_a_count: 0,
            bomb_planted_on_b_count: 0,
        }
    }
}

impl TeamCounters {
    /// Tallies one finished round. `category` only matters for won rounds;
    /// full-buy wins have no dedicated counter.
    pub fn record_round(&mut self, side: Side, won: bool, category: Option<RoundCategory>) {
        self.round_count += 1;
        match (won, side) {
            (true, Side::CounterTerrorist) => self.win_round_ct_count += 1,
            (true, Side::Terrorist) => self.win_round_t_count += 1,
            (false, Side::CounterTerrorist) => self.lost_round_ct_count += 1,
            (false, Side::Terrorist) => self.lost_round_t_count += 1,
        }
        if !won {
            self.lost_round_count += 1;
            return;
        }

        self.win_round_count += 1;
        match category {
            Some(RoundCategory::Pistol) => self.win_pistol_round_count += 1,
            Some(RoundCategory::Eco) => self.win_eco_round_count += 1,
            Some(RoundCategory::SemiEco) => self.win_semi_eco_round_count += 1,
            Some(RoundCategory::ForceBuy) => self.win_force_buy_round_count += 1,
            Some(RoundCategory::FullBuy) | None => {}
        }
    }

    pub fn record_bomb_plant(&mut self, site: BombSite) {
        match site {
            BombSite::A => self.bomb_planted_on_a_count += 1,
            BombSite::B => self.bomb_planted_on_b_count += 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_team_counters_default_to_one_match() {
        let counters = TeamCounters::default();
        assert_eq!(counters.match_count, 1);
        assert_eq!(counters.win_count, 0);
        assert_eq!(counters.round_count, 0);
    }

    #[test]
    fn test_record_round() {
        let mut counters = TeamCounters::default();
        counters.record_round(Side::Terrorist, true, Some(RoundCategory::Pistol));
        counters.record_round(Side::Terrorist, false, Some(RoundCategory::Eco));
        counters.record_round(Side::CounterTerrorist, true, Some(RoundCategory::ForceBuy));
        counters.record_round(Side::CounterTerrorist, true, None);

        assert_eq!(counters.round_count, 4);
        assert_eq!(counters.win_round_count, 3);
        assert_eq!(counters.lost_round_count, 1);
        assert_eq!(counters.win_round_t_count, 1);
        assert_eq!(counters.lost_round_t_count, 1);
        assert_eq!(counters.win_round_ct_count, 2);
        assert_eq!(counters.win_pistol_round_count, 1);
        assert_eq!(counters.win_eco_round_count, 0);
        assert_eq!(counters.win_force_buy_round_count, 1);
    }

    #[test]
    fn test_record_bomb_plant() {
        let mut counters = TeamCounters::default();
        counters.record_bomb_plant(BombSite::B);
        counters.record_bomb_plant(BombSite::B);
        assert_eq!(counters.bomb_planted_on_a_count, 0);
        assert_eq!(counters.bomb_planted_on_b_count, 2);
    }

    #[test]
    fn test_player_counter_diff() {
        let before = PlayerCounters::default();
        let mut after = before;
        after.trade_kill_count = 2;
        *after.thrown_count_mut(GrenadeKind::Smoke) += 1;

        assert_eq!(
            before.diff(&after),
            vec![
                PlayerCounter::TradeKill,
                PlayerCounter::Thrown(GrenadeKind::Smoke)
            ]
        );
        assert!(after.diff(&after).is_empty());
    }
}
