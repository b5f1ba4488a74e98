use std::cell::{Ref, RefCell};
use std::fmt;

use super::listeners::{Listeners, SubscriptionId};

/// A mutation applied to an [`EventLog`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollectionChange {
    Added { index: usize },
    Removed { index: usize },
    Cleared,
}

/// Ordered, observable collection of immutable event records.
///
/// Records can be appended, removed or cleared but never edited in place.
/// Observers are notified after the mutation has been applied, so a handler
/// reading the log sees the new contents.
pub struct EventLog<T> {
    items: RefCell<Vec<T>>,
    listeners: Listeners<CollectionChange>,
}

impl<T> EventLog<T> {
    pub fn new() -> Self {
        Self::from_vec(Vec::new())
    }

    pub fn from_vec(items: Vec<T>) -> Self {
        Self {
            items: RefCell::new(items),
            listeners: Listeners::new(),
        }
    }

    pub fn push(&self, item: T) {
        let index = {
            let mut items = self.items.borrow_mut();
            items.push(item);
            items.len() - 1
        };
        self.listeners.emit(&CollectionChange::Added { index });
    }

    /// Removes the record at `index`, returning `None` when out of bounds.
    pub fn remove(&self, index: usize) -> Option<T> {
        let removed = {
            let mut items = self.items.borrow_mut();
            if index < items.len() {
                Some(items.remove(index))
            } else {
                None
            }
        };
        if removed.is_some() {
            self.listeners.emit(&CollectionChange::Removed { index });
        }
        removed
    }

    /// Empties the log. An already empty log does not notify.
    pub fn clear(&self) {
        let had_items = {
            let mut items = self.items.borrow_mut();
            let had_items = !items.is_empty();
            items.clear();
            had_items
        };
        if had_items {
            self.listeners.emit(&CollectionChange::Cleared);
        }
    }

    pub fn len(&self) -> usize {
        self.items.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.borrow().is_empty()
    }

    /// Borrow the records. The borrow must be released before the log is mutated.
    pub fn items(&self) -> Ref<'_, [T]> {
        Ref::map(self.items.borrow(), |items| items.as_slice())
    }

    pub fn count_where(&self, predicate: impl Fn(&T) -> bool) -> usize {
        self.items.borrow().iter().filter(|item| predicate(item)).count()
    }

    pub fn subscribe(&self, handler: impl Fn(&CollectionChange) + 'static) -> SubscriptionId {
        self.listeners.subscribe(handler)
    }

    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.listeners.unsubscribe(id)
    }

    pub(crate) fn subscriber_count(&self) -> usize {
        self.listeners.len()
    }
}

impl<T: Clone> EventLog<T> {
    pub fn get(&self, index: usize) -> Option<T> {
        self.items.borrow().get(index).cloned()
    }

    pub fn to_vec(&self) -> Vec<T> {
        self.items.borrow().clone()
    }
}

impl<T> Default for EventLog<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> FromIterator<T> for EventLog<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::from_vec(iter.into_iter().collect())
    }
}

impl<T: fmt::Debug> fmt::Debug for EventLog<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.items.borrow().iter()).finish()
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;
    use std::rc::Rc;

    use super::*;

    #[test]
    fn test_changes_are_reported_in_order() {
        let log = EventLog::new();
        let changes = Rc::new(RefCell::new(Vec::new()));

        let sink = Rc::clone(&changes);
        log.subscribe(move |change| sink.borrow_mut().push(*change));

        log.push("a");
        log.push("b");
        assert_eq!(log.remove(0), Some("a"));
        assert_eq!(log.remove(5), None);
        log.clear();
        log.clear();

        assert_eq!(
            *changes.borrow(),
            vec![
                CollectionChange::Added { index: 0 },
                CollectionChange::Added { index: 1 },
                CollectionChange::Removed { index: 0 },
                CollectionChange::Cleared,
            ]
        );
    }

    #[test]
    fn test_handler_sees_new_contents() {
        let log = Rc::new(EventLog::new());
        let observed_len = Rc::new(Cell::new(0));

        let weak = Rc::downgrade(&log);
        let len = Rc::clone(&observed_len);
        log.subscribe(move |_| {
            if let Some(log) = weak.upgrade() {
                len.set(log.len());
            }
        });

        log.push(1);
        log.push(2);

        assert_eq!(observed_len.get(), 2);
        assert_eq!(log.count_where(|v| *v > 1), 1);
        assert_eq!(&*log.items(), &[1, 2]);
    }
}
