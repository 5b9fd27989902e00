//! State listeners and the handles that keep them alive
//!
//! Every [`Store::select`](crate::Store::select) call registers a listener
//! here and hands back a [`Subscription`]. Dropping the subscription (or
//! calling [`Subscription::unsubscribe`]) removes the listener; a released
//! listener is never invoked again, even if a notification pass is already
//! in flight.
//!
//! Release is synchronous: if another thread is inside the listener when the
//! subscription is dropped, the drop blocks until that call returns. A
//! listener releasing itself (or a sibling) on its own thread does not wait.

use parking_lot::{Mutex, ReentrantMutex};
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Weak};

/// Callback invoked with the state after every reduction
pub(crate) type Listener<S> = Arc<dyn Fn(&S) + Send + Sync>;

/// Held for the duration of every call into a listener
type CallGate = Arc<ReentrantMutex<()>>;

struct Entry<S> {
    id: u64,
    active: Arc<AtomicBool>,
    gate: CallGate,
    listener: Listener<S>,
}

/// Registry of state listeners, notified in registration order
pub(crate) struct Listeners<S> {
    next_id: AtomicU64,
    entries: Mutex<Vec<Entry<S>>>,
}

impl<S: 'static> Listeners<S> {
    pub(crate) fn new() -> Self {
        Self {
            next_id: AtomicU64::new(0),
            entries: Mutex::new(Vec::new()),
        }
    }

    /// Register a listener and return the handle that owns it
    pub(crate) fn register(self: &Arc<Self>, listener: Listener<S>) -> Subscription {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let active = Arc::new(AtomicBool::new(true));
        let gate: CallGate = Arc::new(ReentrantMutex::new(()));

        let count = {
            let mut entries = self.entries.lock();
            entries.push(Entry {
                id,
                active: Arc::clone(&active),
                gate: Arc::clone(&gate),
                listener,
            });
            entries.len()
        };
        crate::metrics::store::record_subscriptions(count);
        tracing::trace!(subscription_id = id, "Listener registered");

        let registry: Weak<Self> = Arc::downgrade(self);
        Subscription {
            id,
            active,
            gate,
            release: Some(Box::new(move || {
                if let Some(registry) = registry.upgrade() {
                    registry.remove(id);
                }
            })),
        }
    }

    /// Invoke every active listener with `state`
    ///
    /// Listeners are collected first so a callback may register or release
    /// subscriptions without deadlocking the registry.
    pub(crate) fn notify(&self, state: &S) {
        let snapshot: Vec<(Arc<AtomicBool>, CallGate, Listener<S>)> = self
            .entries
            .lock()
            .iter()
            .map(|entry| {
                (
                    Arc::clone(&entry.active),
                    Arc::clone(&entry.gate),
                    Arc::clone(&entry.listener),
                )
            })
            .collect();

        for (active, gate, listener) in snapshot {
            let _call = gate.lock();
            if active.load(Ordering::Acquire) {
                listener(state);
            }
        }
    }

    /// Number of registered listeners
    pub(crate) fn len(&self) -> usize {
        self.entries.lock().len()
    }

    fn remove(&self, id: u64) {
        let count = {
            let mut entries = self.entries.lock();
            entries.retain(|entry| entry.id != id);
            entries.len()
        };
        crate::metrics::store::record_subscriptions(count);
        tracing::trace!(subscription_id = id, "Listener released");
    }
}

/// Handle to a registered state listener
///
/// The listener stays registered for as long as this value lives.
///
/// # Example
///
/// ```ignore
/// let subscription = store
///     .select(|state| state.library.comics.len(), |count| println!("{count} comics"))
///     .await;
///
/// // ...
///
/// subscription.unsubscribe();
/// ```
#[must_use = "dropping a Subscription releases its listener immediately"]
pub struct Subscription {
    id: u64,
    active: Arc<AtomicBool>,
    gate: CallGate,
    release: Option<Box<dyn FnOnce() + Send + Sync>>,
}

impl Subscription {
    /// Release the listener now
    pub fn unsubscribe(self) {
        drop(self);
    }

    /// Whether the listener is still registered
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.active.load(Ordering::Acquire)
    }

    /// Identifier of the listener, unique per store
    #[must_use]
    pub const fn id(&self) -> u64 {
        self.id
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        self.active.store(false, Ordering::Release);
        // waits out a call running on another thread
        drop(self.gate.lock());
        if let Some(release) = self.release.take() {
            release();
        }
    }
}

impl std::fmt::Debug for Subscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscription")
            .field("id", &self.id)
            .field("active", &self.is_active())
            .finish()
    }
}
