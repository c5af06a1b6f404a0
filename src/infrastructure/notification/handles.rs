//! Host handles of live notifications, keyed by our ids

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use crate::domain::notification::NotificationId;

/// Map from notification id to whatever the host returned for it.
///
/// Every method takes the lock for its own duration only, so callers can
/// talk to the host between a lookup and a record.
#[derive(Debug)]
pub struct HandleMap<H> {
    inner: Mutex<HashMap<NotificationId, H>>,
}

impl<H> HandleMap<H> {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(HashMap::new()),
        }
    }

    /// Read something out of the handle for `id`
    pub fn lookup<T>(&self, id: NotificationId, read: impl FnOnce(&H) -> T) -> Option<T> {
        self.lock().get(&id).map(read)
    }

    /// Remember `handle` for `id`. A finished notification is forgotten instead.
    pub fn record(&self, id: NotificationId, handle: H, finished: bool) {
        let mut map = self.lock();
        if finished {
            map.remove(&id);
        } else {
            map.insert(id, handle);
        }
    }

    pub fn remove(&self, id: NotificationId) -> Option<H> {
        self.lock().remove(&id)
    }

    /// Take every handle, leaving the map empty
    pub fn drain(&self) -> Vec<H> {
        self.lock().drain().map(|(_, handle)| handle).collect()
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<NotificationId, H>> {
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl<H> Default for HandleMap<H> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_replaces_previous_handle() {
        let map = HandleMap::new();
        let id = NotificationId::new(3);
        map.record(id, 10u32, false);
        assert_eq!(map.lookup(id, |h| *h), Some(10));

        map.record(id, 11, false);
        assert_eq!(map.lookup(id, |h| *h), Some(11));
    }

    #[test]
    fn finished_notification_is_forgotten() {
        let map = HandleMap::new();
        let id = NotificationId::new(1);
        map.record(id, 7u32, false);
        map.record(id, 7, true);
        assert_eq!(map.lookup(id, |h| *h), None);

        map.record(NotificationId::new(2), 8, true);
        assert!(map.drain().is_empty());
    }

    #[test]
    fn lookup_does_not_hold_the_lock() {
        let map = HandleMap::new();
        let id = NotificationId::new(5);
        map.record(id, 1u32, false);

        let previous = map.lookup(id, |h| *h);
        assert!(map.inner.try_lock().is_ok());
        map.record(id, previous.unwrap_or_default() + 1, false);
        assert_eq!(map.remove(id), Some(2));
        assert_eq!(map.remove(id), None);
    }

    #[test]
    fn drain_empties_the_map() {
        let map = HandleMap::new();
        map.record(NotificationId::new(1), 'a', false);
        map.record(NotificationId::new(2), 'b', false);

        let mut drained = map.drain();
        drained.sort();
        assert_eq!(drained, vec!['a', 'b']);
        assert!(map.drain().is_empty());
    }
}
