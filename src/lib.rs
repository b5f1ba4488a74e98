//! Team and player match statistics with change tracking.
//!
//! Event records ([`Kill`], [`EntryKill`], ...) are appended to a
//! [`Player`]'s collections by whatever parses the match. A [`Team`] owns an
//! ordered roster of shared players and exposes derived metrics that are
//! always computed from the current roster. Observers registered with
//! [`Team::subscribe`] learn which [`Metric`] went stale after a mutation.
//!
//! ```
//! use std::rc::Rc;
//! use match_stats::{EntryKill, Player, Team};
//!
//! let team = Team::new("Alpha");
//! let player = Rc::new(Player::new("s1mple", 76561198034202275, "Alpha"));
//! team.add_player(Rc::clone(&player));
//!
//! player.entry_kills().push(EntryKill {
//!     round: 1,
//!     killer_steam_id: 76561198034202275,
//!     victim_steam_id: 76561197960287930,
//!     weapon: "awp".to_owned(),
//!     has_won: true,
//! });
//!
//! assert_eq!(team.entry_kill_count(), 1);
//! assert_eq!(team.ratio_entry_kill(), 100);
//! ```

pub mod error;
pub mod model;
pub mod persist;
pub mod propagation;

pub use error::{Result, StatsError};
pub use model::*;
pub use persist::{PlayerSnapshot, TeamSnapshot};
pub use propagation::{
    ChangeTracker, CollectionChange, EventCollection, EventLog, Metric, PlayerCounter,
    SubscriptionId,
};
