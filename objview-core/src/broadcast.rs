/// Synchronous "data changed" notifications
use std::rc::{Rc, Weak};

/// Something that wants to hear about changes
pub trait Subscriber {
    fn notify(&self);
}

/// Handle returned by [`ChangeBroadcaster::subscribe`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

/// Ordered list of subscribers, called back on the notifying thread
///
/// Subscribers are held weakly. One that has been dropped is skipped and
/// forgotten, so the broadcaster never keeps a view alive or calls into a
/// dead one.
#[derive(Default)]
pub struct ChangeBroadcaster {
    subscribers: Vec<(SubscriptionId, Weak<dyn Subscriber>)>,
    next_id: u64,
}

impl ChangeBroadcaster {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a subscriber. The same subscriber may be added more than
    /// once and is then notified once per registration.
    pub fn subscribe(&mut self, subscriber: &Rc<dyn Subscriber>) -> SubscriptionId {
        self.subscribers.retain(|(_, weak)| weak.strong_count() > 0);

        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.subscribers.push((id, Rc::downgrade(subscriber)));
        id
    }

    /// Returns false if `id` was not registered.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|(sub_id, _)| *sub_id != id);
        self.subscribers.len() != before
    }

    /// Number of live subscribers
    pub fn len(&self) -> usize {
        self.subscribers
            .iter()
            .filter(|(_, weak)| weak.strong_count() > 0)
            .count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Call every live subscriber once, in registration order
    ///
    /// The list is snapshotted before the first call. A panicking
    /// subscriber unwinds through here and later subscribers are not
    /// called.
    pub fn notify(&self) {
        let live: Vec<Rc<dyn Subscriber>> = self
            .subscribers
            .iter()
            .filter_map(|(_, weak)| weak.upgrade())
            .collect();
        for subscriber in live {
            subscriber.notify();
        }
    }
}

impl std::fmt::Debug for ChangeBroadcaster {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChangeBroadcaster")
            .field("subscribers", &self.subscribers.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    struct Recorder {
        name: &'static str,
        log: Rc<RefCell<Vec<&'static str>>>,
    }

    impl Subscriber for Recorder {
        fn notify(&self) {
            self.log.borrow_mut().push(self.name);
        }
    }

    fn recorder(name: &'static str, log: &Rc<RefCell<Vec<&'static str>>>) -> Rc<dyn Subscriber> {
        Rc::new(Recorder {
            name,
            log: log.clone(),
        })
    }

    #[test]
    fn test_notify_in_order() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let a = recorder("a", &log);
        let b = recorder("b", &log);
        let mut broadcaster = ChangeBroadcaster::new();
        broadcaster.subscribe(&a);
        broadcaster.subscribe(&b);

        broadcaster.notify();
        assert_eq!(*log.borrow(), vec!["a", "b"]);
    }

    #[test]
    fn test_duplicates_are_notified_twice() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let a = recorder("a", &log);
        let mut broadcaster = ChangeBroadcaster::new();
        broadcaster.subscribe(&a);
        broadcaster.subscribe(&a);

        broadcaster.notify();
        assert_eq!(*log.borrow(), vec!["a", "a"]);
        assert_eq!(broadcaster.len(), 2);
    }

    #[test]
    fn test_unsubscribe() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let a = recorder("a", &log);
        let b = recorder("b", &log);
        let mut broadcaster = ChangeBroadcaster::new();
        let id = broadcaster.subscribe(&a);
        broadcaster.subscribe(&b);

        assert!(broadcaster.unsubscribe(id));
        assert!(!broadcaster.unsubscribe(id));
        broadcaster.notify();
        assert_eq!(*log.borrow(), vec!["b"]);
    }

    #[test]
    fn test_dropped_subscriber_is_skipped() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let a = recorder("a", &log);
        let b = recorder("b", &log);
        let mut broadcaster = ChangeBroadcaster::new();
        broadcaster.subscribe(&a);
        broadcaster.subscribe(&b);

        drop(a);
        broadcaster.notify();
        assert_eq!(*log.borrow(), vec!["b"]);
        assert_eq!(broadcaster.len(), 1);
    }

    #[test]
    fn test_empty_broadcaster() {
        let broadcaster = ChangeBroadcaster::new();
        assert!(broadcaster.is_empty());
        broadcaster.notify();
    }
}
