use std::cell::{Cell, RefCell};
use std::fmt;

use tracing::trace;

use super::counters::PlayerCounters;
use super::event::{Assist, Death, DuelOutcome, EntryHoldKill, EntryKill, GrenadeThrow, Kill};
use super::GrenadeKind;
use crate::persist::PlayerSnapshot;
use crate::propagation::{
    CollectionChange, EventCollection, EventLog, Listeners, PlayerCounter, SubscriptionId,
};

/// A change to a player that is not a collection mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerChange {
    Counter(PlayerCounter),
    TeamName,
}

/// One player's recorded events and tallies.
///
/// All mutation goes through `&self` so a player can be shared between
/// teams (`Rc<Player>`) and observed while it changes. Every mutation
/// notifies after it has been applied.
pub struct Player {
    name: String,
    steam_id: u64,
    team_name: RefCell<String>,
    kills: EventLog<Kill>,
    deaths: EventLog<Death>,
    assists: EventLog<Assist>,
    entry_kills: EventLog<EntryKill>,
    entry_hold_kills: EventLog<EntryHoldKill>,
    counters: Cell<PlayerCounters>,
    listeners: Listeners<PlayerChange>,
}

impl Player {
    pub fn new(name: impl Into<String>, steam_id: u64, team_name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            steam_id,
            team_name: RefCell::new(team_name.into()),
            kills: EventLog::new(),
            deaths: EventLog::new(),
            assists: EventLog::new(),
            entry_kills: EventLog::new(),
            entry_hold_kills: EventLog::new(),
            counters: Cell::new(PlayerCounters::default()),
            listeners: Listeners::new(),
        }
    }

    pub fn from_snapshot(snapshot: PlayerSnapshot) -> Self {
        Self {
            name: snapshot.name,
            steam_id: snapshot.steam_id,
            team_name: RefCell::new(snapshot.team_name),
            kills: EventLog::from_vec(snapshot.kills),
            deaths: EventLog::from_vec(snapshot.deaths),
            assists: EventLog::from_vec(snapshot.assists),
            entry_kills: EventLog::from_vec(snapshot.entry_kills),
            entry_hold_kills: EventLog::from_vec(snapshot.entry_hold_kills),
            counters: Cell::new(snapshot.counters),
            listeners: Listeners::new(),
        }
    }

    pub fn snapshot(&self) -> PlayerSnapshot {
        PlayerSnapshot {
            name: self.name.clone(),
            steam_id: self.steam_id,
            team_name: self.team_name(),
            kills: self.kills.to_vec(),
            deaths: self.deaths.to_vec(),
            assists: self.assists.to_vec(),
            entry_kills: self.entry_kills.to_vec(),
            entry_hold_kills: self.entry_hold_kills.to_vec(),
            counters: self.counters(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn steam_id(&self) -> u64 {
        self.steam_id
    }

    pub fn team_name(&self) -> String {
        self.team_name.borrow().clone()
    }

    /// Exact, case-sensitive comparison against the player's current team name.
    pub fn is_on_team(&self, team_name: &str) -> bool {
        *self.team_name.borrow() == team_name
    }

    pub fn set_team_name(&self, team_name: impl Into<String>) {
        let team_name = team_name.into();
        if *self.team_name.borrow() == team_name {
            return;
        }
        trace!(player = %self.name, %team_name, "player switched team");
        *self.team_name.borrow_mut() = team_name;
        self.listeners.emit(&PlayerChange::TeamName);
    }

    pub fn kills(&self) -> &EventLog<Kill> {
        &self.kills
    }

    pub fn deaths(&self) -> &EventLog<Death> {
        &self.deaths
    }

    pub fn assists(&self) -> &EventLog<Assist> {
        &self.assists
    }

    pub fn entry_kills(&self) -> &EventLog<EntryKill> {
        &self.entry_kills
    }

    pub fn entry_hold_kills(&self) -> &EventLog<EntryHoldKill> {
        &self.entry_hold_kills
    }

    pub fn counters(&self) -> PlayerCounters {
        self.counters.get()
    }

    /// Replaces the counters and notifies once per counter whose value changed.
    pub fn set_counters(&self, counters: PlayerCounters) {
        let previous = self.counters.replace(counters);
        for counter in previous.diff(&counters) {
            self.listeners.emit(&PlayerChange::Counter(counter));
        }
    }

    pub fn update_counters(&self, update: impl FnOnce(&mut PlayerCounters)) {
        let mut counters = self.counters();
        update(&mut counters);
        self.set_counters(counters);
    }

    pub fn record_grenade_throw(&self, throw: &GrenadeThrow) {
        self.update_counters(|c| *c.thrown_count_mut(throw.kind) += 1);
    }

    /// Subscribes to counter and team-name changes.
    pub fn subscribe(&self, handler: impl Fn(&PlayerChange) + 'static) -> SubscriptionId {
        self.listeners.subscribe(handler)
    }

    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.listeners.unsubscribe(id)
    }

    pub fn subscribe_collection(
        &self,
        collection: EventCollection,
        handler: impl Fn(&CollectionChange) + 'static,
    ) -> SubscriptionId {
        match collection {
            EventCollection::Kills => self.kills.subscribe(handler),
            EventCollection::Deaths => self.deaths.subscribe(handler),
            EventCollection::Assists => self.assists.subscribe(handler),
            EventCollection::EntryKills => self.entry_kills.subscribe(handler),
            EventCollection::EntryHoldKills => self.entry_hold_kills.subscribe(handler),
        }
    }

    pub fn unsubscribe_collection(&self, collection: EventCollection, id: SubscriptionId) -> bool {
        match collection {
            EventCollection::Kills => self.kills.unsubscribe(id),
            EventCollection::Deaths => self.deaths.unsubscribe(id),
            EventCollection::Assists => self.assists.unsubscribe(id),
            EventCollection::EntryKills => self.entry_kills.unsubscribe(id),
            EventCollection::EntryHoldKills => self.entry_hold_kills.unsubscribe(id),
        }
    }

    /// Total handlers attached to this player, collections included.
    pub(crate) fn subscriber_count(&self) -> usize {
        self.listeners.len()
            + self.kills.subscriber_count()
            + self.deaths.subscriber_count()
            + self.assists.subscriber_count()
            + self.entry_kills.subscriber_count()
            + self.entry_hold_kills.subscriber_count()
    }

    pub fn kill_count(&self) -> u32 {
        self.kills.len() as u32
    }

    pub fn death_count(&self) -> u32 {
        self.deaths.len() as u32
    }

    pub fn assist_count(&self) -> u32 {
        self.assists.len() as u32
    }

    pub fn jump_kill_count(&self) -> u32 {
        self.kills.count_where(|k| k.killer_is_jumping) as u32
    }

    pub fn crouch_kill_count(&self) -> u32 {
        self.kills.count_where(|k| k.killer_is_crouching) as u32
    }

    pub fn entry_kill_count(&self) -> u32 {
        self.entry_kills.len() as u32
    }

    pub fn entry_kill_won_count(&self) -> u32 {
        won_count(&self.entry_kills)
    }

    pub fn entry_kill_loss_count(&self) -> u32 {
        lost_count(&self.entry_kills)
    }

    pub fn entry_hold_kill_count(&self) -> u32 {
        self.entry_hold_kills.len() as u32
    }

    pub fn entry_hold_kill_won_count(&self) -> u32 {
        won_count(&self.entry_hold_kills)
    }

    pub fn entry_hold_kill_loss_count(&self) -> u32 {
        lost_count(&self.entry_hold_kills)
    }

    pub fn grenade_thrown_count(&self, kind: GrenadeKind) -> u32 {
        self.counters().thrown_count(kind)
    }
}

fn won_count<T: DuelOutcome>(log: &EventLog<T>) -> u32 {
    log.count_where(|e| e.has_won()) as u32
}

fn lost_count<T: DuelOutcome>(log: &EventLog<T>) -> u32 {
    log.count_where(|e| !e.has_won()) as u32
}

impl fmt::Debug for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Player")
            .field("name", &self.name)
            .field("steam_id", &self.steam_id)
            .field("team_name", &*self.team_name.borrow())
            .field("kills", &self.kills.len())
            .field("deaths", &self.deaths.len())
            .field("assists", &self.assists.len())
            .field("entry_kills", &self.entry_kills.len())
            .field("entry_hold_kills", &self.entry_hold_kills.len())
            .field("counters", &self.counters.get())
            .finish()
    }
}
