//! Synchronous mutation observers.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

type Callback = Rc<RefCell<dyn FnMut()>>;

#[derive(Default)]
struct SubscriberList {
    next_id: u64,
    entries: Vec<(u64, Callback)>,
}

/// Registered callbacks, notified in registration order.
#[derive(Default)]
pub(crate) struct Subscribers {
    list: Rc<RefCell<SubscriberList>>,
}

impl Subscribers {
    pub(crate) fn subscribe(&self, callback: impl FnMut() + 'static) -> Subscription {
        let mut list = self.list.borrow_mut();
        let id = list.next_id;
        list.next_id += 1;
        list.entries.push((id, Rc::new(RefCell::new(callback))));
        Subscription {
            id,
            list: Rc::downgrade(&self.list),
        }
    }

    /// Calls every callback registered when notification starts.
    ///
    /// Callbacks may subscribe or unsubscribe while being notified; such
    /// changes take effect from the next notification.
    pub(crate) fn notify(&self) {
        let snapshot: Vec<Callback> = self
            .list
            .borrow()
            .entries
            .iter()
            .map(|(_, callback)| Rc::clone(callback))
            .collect();
        for callback in snapshot {
            // A callback already running further up the stack is skipped.
            if let Ok(mut callback) = callback.try_borrow_mut() {
                (&mut *callback)();
            }
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.list.borrow().entries.len()
    }
}

/// Handle returned by `NoteStore::subscribe`.
///
/// Dropping the handle keeps the callback registered.
#[derive(Debug)]
pub struct Subscription {
    id: u64,
    list: Weak<RefCell<SubscriberList>>,
}

impl Subscription {
    /// Removes exactly the callback this handle was created for.
    ///
    /// Returns `false` when the store is gone or the callback was already
    /// removed.
    pub fn unsubscribe(self) -> bool {
        let Some(list) = self.list.upgrade() else {
            return false;
        };
        let mut list = list.borrow_mut();
        let before = list.entries.len();
        list.entries.retain(|(id, _)| *id != self.id);
        list.entries.len() != before
    }
}

impl std::fmt::Debug for SubscriberList {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SubscriberList")
            .field("next_id", &self.next_id)
            .field("len", &self.entries.len())
            .finish()
    }
}
