//! Notification channel: a synchronous publish/subscribe primitive.
//!
//! Decouples producers of an event type from consumers. Listeners are
//! invoked on the publishing thread, in subscription order. `publish`
//! fans out over a snapshot of the listener list, so a listener that
//! subscribes or unsubscribes during its own invocation only affects the
//! next publish.

use crate::types::ListenerId;
use parking_lot::Mutex;
use std::sync::{Arc, Weak};

type Listener<E> = Arc<dyn Fn(&E) + Send + Sync>;

struct ChannelInner<E> {
    next_id: u64,
    /// Registered listeners, in subscription order.
    listeners: Vec<(ListenerId, Listener<E>)>,
}

/// A synchronous pub/sub channel for events of type `E`.
pub struct Channel<E> {
    inner: Arc<Mutex<ChannelInner<E>>>,
}

impl<E> Channel<E> {
    /// Create a new channel with no listeners.
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Mutex::new(ChannelInner {
                next_id: 1,
                listeners: Vec::new(),
            })),
        }
    }

    /// Register a listener. Returns a handle whose `unsubscribe` removes
    /// exactly this listener.
    pub fn subscribe(&self, listener: impl Fn(&E) + Send + Sync + 'static) -> SubscriptionHandle<E> {
        let mut inner = self.inner.lock();
        let id = ListenerId(inner.next_id);
        inner.next_id += 1;
        inner.listeners.push((id, Arc::new(listener)));
        tracing::trace!(id = id.0, "listener subscribed");

        SubscriptionHandle {
            id,
            channel: Arc::downgrade(&self.inner),
        }
    }

    /// Invoke every currently registered listener with `event`, in
    /// subscription order.
    ///
    /// Fan-out iterates a snapshot taken at publish start and runs outside
    /// the channel lock, so listeners may subscribe or unsubscribe freely.
    /// There is no isolation between listeners: a panicking listener
    /// unwinds into the publisher and later listeners do not run.
    pub fn publish(&self, event: &E) {
        let snapshot: Vec<Listener<E>> = {
            let inner = self.inner.lock();
            inner.listeners.iter().map(|(_, l)| Arc::clone(l)).collect()
        };

        for listener in snapshot {
            listener(event);
        }
    }

    /// Number of currently registered listeners.
    pub fn listener_count(&self) -> usize {
        self.inner.lock().listeners.len()
    }
}

impl<E> Default for Channel<E> {
    fn default() -> Self {
        Self::new()
    }
}

/// Handle returned by [`Channel::subscribe`].
///
/// Holds a weak reference to the channel, so it may outlive it; in that
/// case `unsubscribe` is a no-op.
pub struct SubscriptionHandle<E> {
    id: ListenerId,
    channel: Weak<Mutex<ChannelInner<E>>>,
}

impl<E> SubscriptionHandle<E> {
    /// Remove the listener this handle was created for. Safe to call more
    /// than once; repeated calls are no-ops.
    pub fn unsubscribe(&self) {
        if let Some(inner) = self.channel.upgrade() {
            let mut inner = inner.lock();
            inner.listeners.retain(|(id, _)| *id != self.id);
        }
    }
}
