//! Multicast notification channel
//!
//! Each channel keeps an ordered list of listeners. Emitting invokes every
//! listener in registration order. Subscribing returns a `Subscription`
//! whose `unsubscribe` removes the listener again.
//!
//! Listeners may subscribe or unsubscribe while a delivery is in progress.
//! Removals are applied once the current delivery completes, and listeners
//! added mid-delivery first hear the next emission. An emission raised from
//! inside a listener is queued and delivered to every listener after the
//! current round.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::fmt;
use std::rc::{Rc, Weak};

/// Boxed listener callback
pub type Listener<'a, T> = Box<dyn FnMut(&T) + 'a>;

struct Entry<'a, T> {
    id: u64,
    listener: Listener<'a, T>,
}

struct Listeners<'a, T> {
    entries: Vec<Entry<'a, T>>,
    next_id: u64,
    delivering: bool,
    queued: VecDeque<T>,
    pending_removals: Vec<u64>,
}

impl<'a, T> Listeners<'a, T> {
    fn remove(&mut self, id: u64) {
        if self.delivering {
            self.pending_removals.push(id);
        } else {
            self.entries.retain(|e| e.id != id);
        }
    }
}

/// Something that can drop a listener by id
trait Unsubscribe {
    fn unsubscribe(&self, id: u64);
}

impl<'a, T> Unsubscribe for RefCell<Listeners<'a, T>> {
    fn unsubscribe(&self, id: u64) {
        self.borrow_mut().remove(id);
    }
}

/// Ordered list of listeners for one kind of notification
pub struct EventChannel<'a, T> {
    inner: Rc<RefCell<Listeners<'a, T>>>,
}

impl<'a, T: 'a> EventChannel<'a, T> {
    pub fn new() -> Self {
        Self {
            inner: Rc::new(RefCell::new(Listeners {
                entries: Vec::new(),
                next_id: 0,
                delivering: false,
                queued: VecDeque::new(),
                pending_removals: Vec::new(),
            })),
        }
    }

    /// Register a listener; it stays registered until the handle unsubscribes
    pub fn subscribe(&self, listener: Listener<'a, T>) -> Subscription<'a> {
        let mut inner = self.inner.borrow_mut();
        let id = inner.next_id;
        inner.next_id += 1;
        inner.entries.push(Entry { id, listener });

        let weak: Weak<RefCell<Listeners<'a, T>>> = Rc::downgrade(&self.inner);
        Subscription {
            id,
            channel: weak,
        }
    }

    /// Deliver `event` to every listener, in registration order
    ///
    /// Called from inside a listener, the event is queued behind the
    /// delivery in progress and handed out once that round finishes.
    pub fn emit(&self, event: &T)
    where
        T: Clone,
    {
        {
            let mut inner = self.inner.borrow_mut();
            if inner.delivering {
                inner.queued.push_back(event.clone());
                return;
            }
            inner.delivering = true;
        }

        self.deliver(event);
        loop {
            let next = {
                let mut inner = self.inner.borrow_mut();
                let next = inner.queued.pop_front();
                if next.is_none() {
                    inner.delivering = false;
                }
                next
            };
            match next {
                Some(event) => self.deliver(&event),
                None => break,
            }
        }
    }

    /// One round over the listeners registered when it starts
    fn deliver(&self, event: &T) {
        let mut round = std::mem::take(&mut self.inner.borrow_mut().entries);

        for entry in round.iter_mut() {
            (entry.listener)(event);
        }

        let mut inner = self.inner.borrow_mut();
        let added = std::mem::replace(&mut inner.entries, round);
        inner.entries.extend(added);
        let removals = std::mem::take(&mut inner.pending_removals);
        if !removals.is_empty() {
            inner.entries.retain(|e| !removals.contains(&e.id));
        }
    }

    pub fn listener_count(&self) -> usize {
        self.inner.borrow().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listener_count() == 0
    }
}

impl<'a, T: 'a> Default for EventChannel<'a, T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a, T> fmt::Debug for EventChannel<'a, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.inner.try_borrow() {
            Ok(inner) => f
                .debug_struct("EventChannel")
                .field("listeners", &inner.entries.len())
                .field("delivering", &inner.delivering)
                .field("queued", &inner.queued.len())
                .finish(),
            Err(_) => f.debug_struct("EventChannel").finish_non_exhaustive(),
        }
    }
}

/// Handle returned by `subscribe`
///
/// Dropping the handle leaves the listener registered; call `unsubscribe`
/// to remove it. Unsubscribing after the channel is gone is a no-op.
#[must_use = "the listener stays registered until `unsubscribe` is called"]
pub struct Subscription<'a> {
    id: u64,
    channel: Weak<dyn Unsubscribe + 'a>,
}

impl<'a> Subscription<'a> {
    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn unsubscribe(self) {
        if let Some(channel) = self.channel.upgrade() {
            channel.unsubscribe(self.id);
        }
    }
}

impl<'a> fmt::Debug for Subscription<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription").field("id", &self.id).finish()
    }
}
