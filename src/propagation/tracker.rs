use std::cell::RefCell;
use std::collections::BTreeSet;

use tracing::trace;

use super::listeners::{Listeners, SubscriptionId};
use super::metric::Metric;

/// Clean/Dirty bookkeeping for derived metrics plus the observer channel
/// that announces Clean to Dirty transitions.
///
/// Values are never cached here. A metric is Dirty when one of its inputs
/// changed after the last read; observers hear about it once until somebody
/// reads the metric again.
#[derive(Debug, Default)]
pub struct ChangeTracker {
    dirty: RefCell<BTreeSet<Metric>>,
    observers: Listeners<Metric>,
}

impl ChangeTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks `metrics` Dirty and notifies observers for each one that was Clean,
    /// in the order given.
    pub fn invalidate<I>(&self, metrics: I)
    where
        I: IntoIterator<Item = Metric>,
    {
        for metric in metrics {
            let newly_dirty = self.dirty.borrow_mut().insert(metric);
            if newly_dirty {
                trace!(%metric, "metric became stale");
                self.observers.emit(&metric);
            }
        }
    }

    pub fn invalidate_all(&self) {
        self.invalidate(Metric::all());
    }

    /// Records that `metric` was just recomputed.
    pub fn mark_clean(&self, metric: Metric) {
        self.dirty.borrow_mut().remove(&metric);
    }

    pub fn is_dirty(&self, metric: Metric) -> bool {
        self.dirty.borrow().contains(&metric)
    }

    pub fn dirty_metrics(&self) -> Vec<Metric> {
        self.dirty.borrow().iter().copied().collect()
    }

    pub fn subscribe(&self, handler: impl Fn(&Metric) + 'static) -> SubscriptionId {
        self.observers.subscribe(handler)
    }

    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.observers.unsubscribe(id)
    }
}

#[cfg(test)]
mod tests {
    use std::rc::Rc;

    use super::*;

    fn recording_tracker() -> (ChangeTracker, Rc<RefCell<Vec<Metric>>>) {
        let tracker = ChangeTracker::new();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        tracker.subscribe(move |metric| sink.borrow_mut().push(*metric));
        (tracker, seen)
    }

    #[test]
    fn test_dirty_metrics_are_announced_once() {
        let (tracker, seen) = recording_tracker();

        tracker.invalidate([Metric::KillCount, Metric::JumpKillCount]);
        tracker.invalidate([Metric::KillCount]);

        assert_eq!(*seen.borrow(), vec![Metric::KillCount, Metric::JumpKillCount]);
        assert!(tracker.is_dirty(Metric::KillCount));
        assert!(!tracker.is_dirty(Metric::DeathCount));
    }

    #[test]
    fn test_clean_metric_is_announced_again() {
        let (tracker, seen) = recording_tracker();

        tracker.invalidate([Metric::DeathCount]);
        tracker.mark_clean(Metric::DeathCount);
        tracker.invalidate([Metric::DeathCount]);

        assert_eq!(*seen.borrow(), vec![Metric::DeathCount, Metric::DeathCount]);
    }

    #[test]
    fn test_invalidate_all() {
        let (tracker, seen) = recording_tracker();

        tracker.invalidate_all();

        assert_eq!(*seen.borrow(), Metric::all());
        assert_eq!(tracker.dirty_metrics(), Metric::all());
    }
}
