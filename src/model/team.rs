use std::cell::{Cell, RefCell};
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::rc::{Rc, Weak};

use itertools::Itertools;
use strum::IntoEnumIterator;
use tracing::debug;

use super::common::{GrenadeKind, RoundCategory, Side};
use super::counters::TeamCounters;
use super::player::{Player, PlayerChange};
use crate::propagation::{ChangeTracker, EventCollection, Metric, SubscriptionId};

/// A roster entry together with the handlers the team attached to the player.
struct RosterSlot {
    player: Rc<Player>,
    collections: Vec<(EventCollection, SubscriptionId)>,
    changes: SubscriptionId,
}

impl RosterSlot {
    fn attach(player: Rc<Player>, tracker: &Rc<ChangeTracker>) -> Self {
        let collections = EventCollection::iter()
            .map(|collection| {
                let tracker = Rc::downgrade(tracker);
                let id = player.subscribe_collection(collection, move |_| {
                    invalidate(&tracker, collection.dependent_metrics().iter().copied());
                });
                (collection, id)
            })
            .collect_vec();

        let weak = Rc::downgrade(tracker);
        let changes = player.subscribe(move |change| match change {
            PlayerChange::Counter(counter) => invalidate(&weak, [counter.team_metric()]),
            PlayerChange::TeamName => invalidate(&weak, Metric::grenade_metrics()),
        });

        Self {
            player,
            collections,
            changes,
        }
    }

    fn detach(self) -> Rc<Player> {
        for (collection, id) in self.collections {
            self.player.unsubscribe_collection(collection, id);
        }
        self.player.unsubscribe(self.changes);
        self.player
    }
}

fn invalidate(tracker: &Weak<ChangeTracker>, metrics: impl IntoIterator<Item = Metric>) {
    if let Some(tracker) = tracker.upgrade() {
        tracker.invalidate(metrics);
    }
}

/// A team and its roster for one match or aggregation period.
///
/// Two groups of data live here. [`TeamCounters`] and the loss streak are
/// plain values written by round resolution. Every other figure is a
/// read-only method computed from the current roster on each call, so a
/// reader never sees a stale value. Roster and player mutations mark the
/// affected metrics Dirty and observers registered with
/// [`Team::subscribe`] are told once per Clean to Dirty transition.
///
/// Equality and hashing use the case-folded team name.
pub struct Team {
    name: String,
    roster: RefCell<Vec<RosterSlot>>,
    counters: Cell<TeamCounters>,
    loss_row_count: Cell<u32>,
    tracker: Rc<ChangeTracker>,
}

impl Team {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            roster: RefCell::new(Vec::new()),
            counters: Cell::new(TeamCounters::default()),
            loss_row_count: Cell::new(0),
            tracker: Rc::new(ChangeTracker::new()),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn add_player(&self, player: Rc<Player>) {
        debug!(team = %self.name, player = %player.name(), "adding player");
        let slot = RosterSlot::attach(player, &self.tracker);
        self.roster.borrow_mut().push(slot);
        self.tracker.invalidate_all();
    }

    /// Removes the first roster entry holding this exact player instance.
    pub fn remove_player(&self, player: &Rc<Player>) -> bool {
        let index = self
            .roster
            .borrow()
            .iter()
            .find_position(|slot| Rc::ptr_eq(&slot.player, player))
            .map(|(index, _)| index);
        match index {
            Some(index) => self.remove_player_at(index).is_some(),
            None => false,
        }
    }

    pub fn remove_player_at(&self, index: usize) -> Option<Rc<Player>> {
        let slot = {
            let mut roster = self.roster.borrow_mut();
            if index >= roster.len() {
                return None;
            }
            roster.remove(index)
        };
        let player = slot.detach();
        debug!(team = %self.name, player = %player.name(), "removed player");
        self.tracker.invalidate_all();
        Some(player)
    }

    /// Replaces the whole roster in one step.
    pub fn set_players(&self, players: impl IntoIterator<Item = Rc<Player>>) {
        let slots = players
            .into_iter()
            .map(|player| RosterSlot::attach(player, &self.tracker))
            .collect_vec();
        let previous = self.roster.replace(slots);
        previous.into_iter().for_each(|slot| {
            slot.detach();
        });
        debug!(team = %self.name, players = self.player_count(), "replaced roster");
        self.tracker.invalidate_all();
    }

    pub fn players(&self) -> Vec<Rc<Player>> {
        self.roster
            .borrow()
            .iter()
            .map(|slot| Rc::clone(&slot.player))
            .collect_vec()
    }

    pub fn player_count(&self) -> usize {
        self.roster.borrow().len()
    }

    pub fn contains_player(&self, player: &Rc<Player>) -> bool {
        self.roster
            .borrow()
            .iter()
            .any(|slot| Rc::ptr_eq(&slot.player, player))
    }

    pub fn find_player(&self, steam_id: u64) -> Option<Rc<Player>> {
        self.roster
            .borrow()
            .iter()
            .find(|slot| slot.player.steam_id() == steam_id)
            .map(|slot| Rc::clone(&slot.player))
    }

    /// Empties the roster and resets the loss streak.
    ///
    /// [`TeamCounters`] are left untouched so that the match score survives a
    /// roster rebuild. Call [`Team::set_counters`] as well for a full reset.
    pub fn clear(&self) {
        let previous = self.roster.take();
        let removed = previous.len();
        previous.into_iter().for_each(|slot| {
            slot.detach();
        });
        self.loss_row_count.set(0);
        debug!(team = %self.name, removed, "cleared team");
        self.tracker.invalidate_all();
    }

    /// Copies name, counters and loss streak; the players themselves are
    /// shared with `self`.
    ///
    /// The copy has its own roster list and its own observers, but mutating
    /// a shared [`Player`] is visible through both teams. Adding or removing
    /// players on one team does not change the other's roster.
    pub fn shallow_clone(&self) -> Team {
        let team = self.duplicate_scalars();
        team.set_players(self.players());
        debug!(team = %self.name, players = team.player_count(), "shallow clone");
        team
    }

    /// Copies the team and rebuilds every player, so no state is shared.
    pub fn deep_clone(&self) -> Team {
        let team = self.duplicate_scalars();
        team.set_players(
            self.players()
                .iter()
                .map(|player| Rc::new(Player::from_snapshot(player.snapshot()))),
        );
        debug!(team = %self.name, players = team.player_count(), "deep clone");
        team
    }

    fn duplicate_scalars(&self) -> Team {
        let team = Team::new(self.name.clone());
        team.counters.set(self.counters());
        team.loss_row_count.set(self.loss_row_count());
        team
    }

    pub fn counters(&self) -> TeamCounters {
        self.counters.get()
    }

    pub fn set_counters(&self, counters: TeamCounters) {
        self.counters.set(counters);
    }

    pub fn update_counters(&self, update: impl FnOnce(&mut TeamCounters)) {
        let mut counters = self.counters();
        update(&mut counters);
        self.counters.set(counters);
    }

    /// Consecutive rounds lost, used for the loss bonus.
    pub fn loss_row_count(&self) -> u32 {
        self.loss_row_count.get()
    }

    pub fn set_loss_row_count(&self, count: u32) {
        self.loss_row_count.set(count);
    }

    /// Tallies a finished round and keeps the loss streak in step with it.
    pub fn record_round(&self, side: Side, won: bool, category: Option<RoundCategory>) {
        self.update_counters(|c| c.record_round(side, won, category));
        if won {
            self.loss_row_count.set(0);
        } else {
            self.loss_row_count.set(self.loss_row_count.get() + 1);
        }
    }

    /// Registers an observer told which metric went stale.
    ///
    /// Handlers run synchronously after the mutation was applied, so reading
    /// the team from inside a handler yields the new value.
    pub fn subscribe(&self, handler: impl Fn(&Metric) + 'static) -> SubscriptionId {
        self.tracker.subscribe(handler)
    }

    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.tracker.unsubscribe(id)
    }

    pub fn is_dirty(&self, metric: Metric) -> bool {
        self.tracker.is_dirty(metric)
    }

    pub fn dirty_metrics(&self) -> Vec<Metric> {
        self.tracker.dirty_metrics()
    }

    /// Computes `metric` from the current roster and marks it Clean.
    pub fn metric(&self, metric: Metric) -> u32 {
        let value = self.compute(metric);
        self.tracker.mark_clean(metric);
        value
    }

    fn compute(&self, metric: Metric) -> u32 {
        match metric {
            Metric::KillCount => self.sum(Player::kill_count),
            Metric::AssistCount => self.sum(Player::assist_count),
            Metric::DeathCount => self.sum(Player::death_count),
            Metric::JumpKillCount => self.sum(Player::jump_kill_count),
            Metric::CrouchKillCount => self.sum(Player::crouch_kill_count),
            Metric::EntryKillCount => self.sum(Player::entry_kill_count),
            Metric::EntryKillWonCount => self.sum(Player::entry_kill_won_count),
            Metric::EntryKillLossCount => self.sum(Player::entry_kill_loss_count),
            Metric::RatioEntryKill => win_ratio(
                self.sum(Player::entry_kill_won_count),
                self.sum(Player::entry_kill_loss_count),
            ),
            Metric::EntryHoldKillCount => self.sum(Player::entry_hold_kill_count),
            Metric::EntryHoldKillWonCount => self.sum(Player::entry_hold_kill_won_count),
            Metric::EntryHoldKillLossCount => self.sum(Player::entry_hold_kill_loss_count),
            Metric::RatioEntryHoldKill => win_ratio(
                self.sum(Player::entry_hold_kill_won_count),
                self.sum(Player::entry_hold_kill_loss_count),
            ),
            Metric::FlashbangThrownCount => self.thrown(GrenadeKind::Flashbang),
            Metric::HeGrenadeThrownCount => self.thrown(GrenadeKind::HeGrenade),
            Metric::SmokeThrownCount => self.thrown(GrenadeKind::Smoke),
            Metric::MolotovThrownCount => self.thrown(GrenadeKind::Molotov),
            Metric::IncendiaryThrownCount => self.thrown(GrenadeKind::Incendiary),
            Metric::DecoyThrownCount => self.thrown(GrenadeKind::Decoy),
            Metric::TradeKillCount => self.sum(|p| p.counters().trade_kill_count),
            Metric::TradeDeathCount => self.sum(|p| p.counters().trade_death_count),
            Metric::OneKillCount => self.sum(|p| p.counters().one_kill_count),
            Metric::TwoKillCount => self.sum(|p| p.counters().two_kill_count),
            Metric::ThreeKillCount => self.sum(|p| p.counters().three_kill_count),
            Metric::FourKillCount => self.sum(|p| p.counters().four_kill_count),
            Metric::FiveKillCount => self.sum(|p| p.counters().five_kill_count),
            Metric::BombPlantedCount => self.sum(|p| p.counters().bomb_planted_count),
            Metric::BombDefusedCount => self.sum(|p| p.counters().bomb_defused_count),
            Metric::BombExplodedCount => self.sum(|p| p.counters().bomb_exploded_count),
        }
    }

    fn sum(&self, value: impl Fn(&Player) -> u32) -> u32 {
        self.roster
            .borrow()
            .iter()
            .map(|slot| value(&slot.player))
            .sum()
    }

    /// Only players currently carrying this team's name count.
    fn thrown(&self, kind: GrenadeKind) -> u32 {
        self.roster
            .borrow()
            .iter()
            .filter(|slot| slot.player.is_on_team(&self.name))
            .map(|slot| slot.player.grenade_thrown_count(kind))
            .sum()
    }

    pub fn kill_count(&self) -> u32 {
        self.metric(Metric::KillCount)
    }

    pub fn assist_count(&self) -> u32 {
        self.metric(Metric::AssistCount)
    }

    pub fn death_count(&self) -> u32 {
        self.metric(Metric::DeathCount)
    }

    pub fn jump_kill_count(&self) -> u32 {
        self.metric(Metric::JumpKillCount)
    }

    pub fn crouch_kill_count(&self) -> u32 {
        self.metric(Metric::CrouchKillCount)
    }

    pub fn entry_kill_count(&self) -> u32 {
        self.metric(Metric::EntryKillCount)
    }

    pub fn entry_kill_won_count(&self) -> u32 {
        self.metric(Metric::EntryKillWonCount)
    }

    pub fn entry_kill_loss_count(&self) -> u32 {
        self.metric(Metric::EntryKillLossCount)
    }

    /// Percentage of entry duels won, see [`win_ratio`].
    pub fn ratio_entry_kill(&self) -> u32 {
        self.metric(Metric::RatioEntryKill)
    }

    pub fn entry_hold_kill_count(&self) -> u32 {
        self.metric(Metric::EntryHoldKillCount)
    }

    pub fn entry_hold_kill_won_count(&self) -> u32 {
        self.metric(Metric::EntryHoldKillWonCount)
    }

    pub fn entry_hold_kill_loss_count(&self) -> u32 {
        self.metric(Metric::EntryHoldKillLossCount)
    }

    /// Percentage of entry hold duels won, see [`win_ratio`].
    pub fn ratio_entry_hold_kill(&self) -> u32 {
        self.metric(Metric::RatioEntryHoldKill)
    }

    pub fn grenade_thrown_count(&self, kind: GrenadeKind) -> u32 {
        self.metric(Metric::thrown_count(kind))
    }

    pub fn flashbang_thrown_count(&self) -> u32 {
        self.grenade_thrown_count(GrenadeKind::Flashbang)
    }

    pub fn he_grenade_thrown_count(&self) -> u32 {
        self.grenade_thrown_count(GrenadeKind::HeGrenade)
    }

    pub fn smoke_thrown_count(&self) -> u32 {
        self.grenade_thrown_count(GrenadeKind::Smoke)
    }

    pub fn molotov_thrown_count(&self) -> u32 {
        self.grenade_thrown_count(GrenadeKind::Molotov)
    }

    pub fn incendiary_thrown_count(&self) -> u32 {
        self.grenade_thrown_count(GrenadeKind::Incendiary)
    }

    pub fn decoy_thrown_count(&self) -> u32 {
        self.grenade_thrown_count(GrenadeKind::Decoy)
    }

    pub fn trade_kill_count(&self) -> u32 {
        self.metric(Metric::TradeKillCount)
    }

    pub fn trade_death_count(&self) -> u32 {
        self.metric(Metric::TradeDeathCount)
    }

    pub fn one_kill_count(&self) -> u32 {
        self.metric(Metric::OneKillCount)
    }

    pub fn two_kill_count(&self) -> u32 {
        self.metric(Metric::TwoKillCount)
    }

    pub fn three_kill_count(&self) -> u32 {
        self.metric(Metric::ThreeKillCount)
    }

    pub fn four_kill_count(&self) -> u32 {
        self.metric(Metric::FourKillCount)
    }

    pub fn five_kill_count(&self) -> u32 {
        self.metric(Metric::FiveKillCount)
    }

    pub fn bomb_planted_count(&self) -> u32 {
        self.metric(Metric::BombPlantedCount)
    }

    pub fn bomb_defused_count(&self) -> u32 {
        self.metric(Metric::BombDefusedCount)
    }

    pub fn bomb_exploded_count(&self) -> u32 {
        self.metric(Metric::BombExplodedCount)
    }

    fn folded_name(&self) -> String {
        self.name.to_lowercase()
    }
}

/// Win percentage of a set of duels.
///
/// No wins gives 0 (this also covers an empty set) and no losses gives
/// exactly 100. Anything else is `won / (won + lost) * 100` rounded to the
/// nearest integer, ties to even.
pub fn win_ratio(won: u32, lost: u32) -> u32 {
    if won == 0 {
        return 0;
    }
    if lost == 0 {
        return 100;
    }

    let numerator = u64::from(won) * 100;
    let total = u64::from(won) + u64::from(lost);
    let quotient = numerator / total;
    let remainder = numerator % total;
    let rounded = match (remainder * 2).cmp(&total) {
        Ordering::Less => quotient,
        Ordering::Greater => quotient + 1,
        Ordering::Equal if quotient % 2 == 0 => quotient,
        Ordering::Equal => quotient + 1,
    };
    rounded as u32
}

impl Drop for Team {
    fn drop(&mut self) {
        for slot in self.roster.take() {
            slot.detach();
        }
    }
}

impl PartialEq for Team {
    fn eq(&self, other: &Self) -> bool {
        self.folded_name() == other.folded_name()
    }
}

impl Eq for Team {}

impl Hash for Team {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.folded_name().hash(state);
    }
}

impl fmt::Debug for Team {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Team")
            .field("name", &self.name)
            .field("players", &self.players())
            .field("counters", &self.counters.get())
            .field("loss_row_count", &self.loss_row_count.get())
            .finish()
    }
}
