use serde::{Deserialize, Serialize};

/// The side a team plays in a round.
#[derive(
    Debug,
    Clone,
    Copy,
    Hash,
    Eq,
    PartialEq,
    Serialize,
    Deserialize,
    strum_macros::Display,
    strum_macros::EnumString,
    strum_macros::EnumIter,
)]
pub enum Side {
    #[strum(serialize = "CT")]
    CounterTerrorist,
    #[strum(serialize = "T")]
    Terrorist,
}

/// Round category derived from how much a team spent.
#[derive(
    Debug,
    Clone,
    Copy,
    Hash,
    Eq,
    PartialEq,
    Serialize,
    Deserialize,
    strum_macros::Display,
    strum_macros::EnumString,
    strum_macros::EnumIter,
)]
#[strum(serialize_all = "kebab-case")]
pub enum RoundCategory {
    Pistol,
    Eco,
    SemiEco,
    ForceBuy,
    FullBuy,
}

/// Bomb site a plant happened on.
#[derive(
    Debug,
    Clone,
    Copy,
    Hash,
    Eq,
    PartialEq,
    Serialize,
    Deserialize,
    strum_macros::Display,
    strum_macros::EnumString,
    strum_macros::EnumIter,
)]
pub enum BombSite {
    A,
    B,
}

/// Throwable utility tracked per player.
#[derive(
    Debug,
    Clone,
    Copy,
    Hash,
    Eq,
    PartialEq,
    Serialize,
    Deserialize,
    strum_macros::Display,
    strum_macros::EnumString,
    strum_macros::EnumIter,
)]
#[strum(serialize_all = "snake_case")]
pub enum GrenadeKind {
    Flashbang,
    HeGrenade,
    Smoke,
    Molotov,
    Incendiary,
    Decoy,
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::*;

    #[test]
    fn test_parse_names() {
        assert_eq!(Side::from_str("CT").unwrap(), Side::CounterTerrorist);
        assert_eq!(RoundCategory::from_str("force-buy").unwrap(), RoundCategory::ForceBuy);
        assert_eq!(GrenadeKind::HeGrenade.to_string(), "he_grenade");
        assert!(BombSite::from_str("C").is_err());
    }
}
