use strum::IntoEnumIterator;

use crate::model::GrenadeKind;

/// Every derived team metric that can go stale when player data changes.
#[derive(
    Debug,
    Clone,
    Copy,
    Hash,
    Eq,
    PartialEq,
    Ord,
    PartialOrd,
    strum_macros::Display,
    strum_macros::EnumIter,
    strum_macros::EnumCount,
    strum_macros::AsRefStr,
)]
#[strum(serialize_all = "snake_case")]
pub enum Metric {
    KillCount,
    AssistCount,
    DeathCount,
    JumpKillCount,
    CrouchKillCount,
    EntryKillCount,
    EntryKillWonCount,
    EntryKillLossCount,
    RatioEntryKill,
    EntryHoldKillCount,
    EntryHoldKillWonCount,
    EntryHoldKillLossCount,
    RatioEntryHoldKill,
    FlashbangThrownCount,
    HeGrenadeThrownCount,
    SmokeThrownCount,
    MolotovThrownCount,
    IncendiaryThrownCount,
    DecoyThrownCount,
    TradeKillCount,
    TradeDeathCount,
    OneKillCount,
    TwoKillCount,
    ThreeKillCount,
    FourKillCount,
    FiveKillCount,
    BombPlantedCount,
    BombDefusedCount,
    BombExplodedCount,
}

impl Metric {
    /// All metrics; each one aggregates over the whole roster.
    pub fn all() -> Vec<Metric> {
        Metric::iter().collect()
    }

    /// Metrics that only count players whose team name matches the team.
    pub fn grenade_metrics() -> Vec<Metric> {
        GrenadeKind::iter().map(Metric::thrown_count).collect()
    }

    pub fn thrown_count(kind: GrenadeKind) -> Metric {
        match kind {
            GrenadeKind::Flashbang => Metric::FlashbangThrownCount,
            GrenadeKind::HeGrenade => Metric::HeGrenadeThrownCount,
            GrenadeKind::Smoke => Metric::SmokeThrownCount,
            GrenadeKind::Molotov => Metric::MolotovThrownCount,
            GrenadeKind::Incendiary => Metric::IncendiaryThrownCount,
            GrenadeKind::Decoy => Metric::DecoyThrownCount,
        }
    }
}

/// The observable event collections a player owns.
#[derive(
    Debug, Clone, Copy, Hash, Eq, PartialEq, strum_macros::Display, strum_macros::EnumIter,
)]
#[strum(serialize_all = "snake_case")]
pub enum EventCollection {
    Kills,
    Deaths,
    Assists,
    EntryKills,
    EntryHoldKills,
}

impl EventCollection {
    /// The exact set of team metrics computed from this collection.
    pub fn dependent_metrics(self) -> &'static [Metric] {
        match self {
            EventCollection::Kills => &[
                Metric::KillCount,
                Metric::JumpKillCount,
                Metric::CrouchKillCount,
            ],
            EventCollection::Deaths => &[Metric::DeathCount],
            EventCollection::Assists => &[Metric::AssistCount],
            EventCollection::EntryKills => &[
                Metric::EntryKillCount,
                Metric::EntryKillWonCount,
                Metric::EntryKillLossCount,
                Metric::RatioEntryKill,
            ],
            EventCollection::EntryHoldKills => &[
                Metric::EntryHoldKillCount,
                Metric::EntryHoldKillWonCount,
                Metric::EntryHoldKillLossCount,
                Metric::RatioEntryHoldKill,
            ],
        }
    }
}

/// Settable per-player counters that feed team metrics.
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, strum_macros::Display)]
#[strum(serialize_all = "snake_case")]
pub enum PlayerCounter {
    BombPlanted,
    BombDefused,
    BombExploded,
    OneKill,
    TwoKill,
    ThreeKill,
    FourKill,
    FiveKill,
    TradeKill,
    TradeDeath,
    Thrown(GrenadeKind),
}

impl PlayerCounter {
    /// Every counter, including one per grenade kind.
    pub fn all() -> Vec<PlayerCounter> {
        use PlayerCounter::*;
        [
            BombPlanted,
            BombDefused,
            BombExploded,
            OneKill,
            TwoKill,
            ThreeKill,
            FourKill,
            FiveKill,
            TradeKill,
            TradeDeath,
        ]
        .into_iter()
        .chain(GrenadeKind::iter().map(Thrown))
        .collect()
    }

    pub fn team_metric(self) -> Metric {
        match self {
            PlayerCounter::BombPlanted => Metric::BombPlantedCount,
            PlayerCounter::BombDefused => Metric::BombDefusedCount,
            PlayerCounter::BombExploded => Metric::BombExplodedCount,
            PlayerCounter::OneKill => Metric::OneKillCount,
            PlayerCounter::TwoKill => Metric::TwoKillCount,
            PlayerCounter::ThreeKill => Metric::ThreeKillCount,
            PlayerCounter::FourKill => Metric::FourKillCount,
            PlayerCounter::FiveKill => Metric::FiveKillCount,
            PlayerCounter::TradeKill => Metric::TradeKillCount,
            PlayerCounter::TradeDeath => Metric::TradeDeathCount,
            PlayerCounter::Thrown(kind) => Metric::thrown_count(kind),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use strum::EnumCount;

    use super::*;

    #[test]
    fn test_entry_kills_do_not_dirty_kill_count() {
        let metrics = EventCollection::EntryKills.dependent_metrics();
        assert!(metrics.contains(&Metric::RatioEntryKill));
        assert!(!metrics.contains(&Metric::KillCount));
    }

    #[test]
    fn test_counters_map_to_distinct_metrics() {
        let metrics: HashSet<Metric> = PlayerCounter::all()
            .into_iter()
            .map(PlayerCounter::team_metric)
            .collect();
        assert_eq!(metrics.len(), PlayerCounter::all().len());
    }

    #[test]
    fn test_every_metric_has_a_source() {
        let mut covered: HashSet<Metric> = EventCollection::iter()
            .flat_map(|c| c.dependent_metrics().iter().copied())
            .collect();
        covered.extend(PlayerCounter::all().into_iter().map(PlayerCounter::team_metric));
        assert_eq!(covered.len(), Metric::COUNT);
    }

    #[test]
    fn test_metric_names() {
        assert_eq!(Metric::RatioEntryHoldKill.to_string(), "ratio_entry_hold_kill");
        assert_eq!(Metric::HeGrenadeThrownCount.as_ref(), "he_grenade_thrown_count");
    }
}
