//! Observer plumbing that tells interested parties which derived metrics went stale.

mod event_log;
mod listeners;
mod metric;
mod tracker;

pub use event_log::{CollectionChange, EventLog};
pub use listeners::{Listeners, SubscriptionId};
pub use metric::{EventCollection, Metric, PlayerCounter};
pub use tracker::ChangeTracker;
