//! Named-event publish/subscribe.
//!
//! Handlers are keyed by event name and run synchronously, in subscription
//! order, when the name is emitted. The menu publishes the names in
//! [`events`] plus one name per confirmed item's slug and label.

use crate::item::MenuItem;
use std::fmt;

/// Event names published by a menu.
pub mod events {
    /// The menu opened. Carries no payload.
    pub const SHOW: &str = "show";
    /// The menu closed. Carries no payload.
    pub const HIDE: &str = "hide";
    /// Items left the menu. Carries [`Payload::Removed`](super::Payload::Removed).
    pub const REMOVE: &str = "remove";
    /// A selection was confirmed. Carries [`Payload::Item`](super::Payload::Item).
    pub const SELECT: &str = "select";
}

/// Data handed to subscribers.
#[derive(Debug, Clone, Copy)]
pub enum Payload<'a> {
    /// Lifecycle notification
    None,
    /// The item a selection event concerns
    Item(&'a MenuItem),
    /// Items that were removed
    Removed(&'a [MenuItem]),
}

impl<'a> Payload<'a> {
    /// The item, for [`Payload::Item`].
    #[must_use]
    pub const fn item(self) -> Option<&'a MenuItem> {
        match self {
            Self::Item(item) => Some(item),
            _ => None,
        }
    }

    /// The removed items, for [`Payload::Removed`].
    #[must_use]
    pub const fn removed(self) -> Option<&'a [MenuItem]> {
        match self {
            Self::Removed(items) => Some(items),
            _ => None,
        }
    }
}

/// Subscriber callback.
pub type Handler = Box<dyn FnMut(Payload<'_>)>;

/// Handle returned by [`Emitter::on`] and [`Emitter::once`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

struct Subscription {
    id: SubscriptionId,
    event: String,
    once: bool,
    handler: Handler,
}

/// Named-event dispatcher.
#[derive(Default)]
pub struct Emitter {
    next_id: u64,
    subscriptions: Vec<Subscription>,
}

impl Emitter {
    /// Create an emitter with no subscribers.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn subscribe(&mut self, event: &str, once: bool, handler: Handler) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.subscriptions.push(Subscription {
            id,
            event: event.to_string(),
            once,
            handler,
        });
        id
    }

    /// Run `handler` every time `event` is emitted.
    pub fn on(&mut self, event: &str, handler: impl FnMut(Payload<'_>) + 'static) -> SubscriptionId {
        self.subscribe(event, false, Box::new(handler))
    }

    /// Run `handler` the next time `event` is emitted, then drop it.
    pub fn once(
        &mut self,
        event: &str,
        handler: impl FnMut(Payload<'_>) + 'static,
    ) -> SubscriptionId {
        self.subscribe(event, true, Box::new(handler))
    }

    /// Drop a subscription. Returns false if it was already gone.
    pub fn off(&mut self, id: SubscriptionId) -> bool {
        let before = self.subscriptions.len();
        self.subscriptions.retain(|s| s.id != id);
        self.subscriptions.len() != before
    }

    /// Drop every subscription to `event`. Returns how many were removed.
    pub fn off_all(&mut self, event: &str) -> usize {
        let before = self.subscriptions.len();
        self.subscriptions.retain(|s| s.event != event);
        before - self.subscriptions.len()
    }

    /// Deliver `payload` to every subscriber of `event`. Returns the number
    /// of handlers run.
    pub fn emit(&mut self, event: &str, payload: Payload<'_>) -> usize {
        let mut fired = 0;
        for sub in self.subscriptions.iter_mut().filter(|s| s.event == event) {
            (sub.handler)(payload);
            fired += 1;
        }
        if fired > 0 {
            self.subscriptions.retain(|s| !(s.once && s.event == event));
        }
        fired
    }

    /// Number of subscribers to `event`.
    #[must_use]
    pub fn listener_count(&self, event: &str) -> usize {
        self.subscriptions.iter().filter(|s| s.event == event).count()
    }

    /// Whether anything subscribes to `event`.
    #[must_use]
    pub fn has_listeners(&self, event: &str) -> bool {
        self.subscriptions.iter().any(|s| s.event == event)
    }
}

impl fmt::Debug for Emitter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Emitter")
            .field("next_id", &self.next_id)
            .field("subscriptions", &self.subscriptions.len())
            .finish()
    }
}

/// Types that publish named events through an [`Emitter`].
pub trait Observable {
    /// The emitter backing this type.
    fn emitter_mut(&mut self) -> &mut Emitter;

    /// See [`Emitter::on`].
    fn on(&mut self, event: &str, handler: impl FnMut(Payload<'_>) + 'static) -> SubscriptionId
    where
        Self: Sized,
    {
        self.emitter_mut().on(event, handler)
    }

    /// See [`Emitter::once`].
    fn once(&mut self, event: &str, handler: impl FnMut(Payload<'_>) + 'static) -> SubscriptionId
    where
        Self: Sized,
    {
        self.emitter_mut().once(event, handler)
    }

    /// See [`Emitter::off`].
    fn off(&mut self, id: SubscriptionId) -> bool {
        self.emitter_mut().off(id)
    }
}
