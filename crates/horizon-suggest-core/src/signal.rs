//! Signal/slot system for Horizon Suggest.
//!
//! A trimmed, single-threaded take on the Qt-style signal: slots are plain
//! closures invoked synchronously on the thread that emits. Everything in a
//! search field runs on one event loop, so connections live behind a
//! `RefCell` rather than a lock.
//!
//! # Key Types
//!
//! - [`Signal<Args>`] - The signal type for emitting notifications
//! - [`ConnectionId`] - Unique identifier returned when connecting a slot
//! - [`ConnectionGuard`] - Subscription handle that disconnects when dropped
//!
//! # Example
//!
//! ```
//! use horizon_suggest_core::Signal;
//!
//! let text_changed = Signal::<String>::new();
//!
//! let conn_id = text_changed.connect(|text| {
//!     println!("Text changed to: {}", text);
//! });
//!
//! text_changed.emit("Hello, World!".to_string());
//! text_changed.disconnect(conn_id);
//! ```

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use slotmap::{SlotMap, new_key_type};

new_key_type! {
    /// A unique identifier for a signal-slot connection.
    ///
    /// Use this ID to disconnect a specific connection via [`Signal::disconnect`].
    pub struct ConnectionId;
}

type Slot<Args> = Rc<dyn Fn(&Args)>;

struct SignalInner<Args> {
    connections: RefCell<SlotMap<ConnectionId, Slot<Args>>>,
}

/// A type-safe signal that can have multiple connected slots.
///
/// Cloning a `Signal` yields another handle to the same set of connections,
/// so a host can keep one clone for emitting while subscribers connect
/// through another.
pub struct Signal<Args> {
    inner: Rc<SignalInner<Args>>,
}

impl<Args: 'static> Default for Signal<Args> {
    fn default() -> Self {
        Self::new()
    }
}

impl<Args> Clone for Signal<Args> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<Args: 'static> Signal<Args> {
    /// Create a new signal with no connections.
    pub fn new() -> Self {
        Self {
            inner: Rc::new(SignalInner {
                connections: RefCell::new(SlotMap::with_key()),
            }),
        }
    }

    /// Connect a slot (closure) to this signal.
    ///
    /// Returns a `ConnectionId` that can be used to disconnect the slot later.
    pub fn connect<F>(&self, slot: F) -> ConnectionId
    where
        F: Fn(&Args) + 'static,
    {
        self.inner.connections.borrow_mut().insert(Rc::new(slot))
    }

    /// Connect a slot that is disconnected when the returned guard is dropped
    /// or explicitly released.
    ///
    /// The guard only holds a weak reference, so it never keeps the signal
    /// alive and is safe to drop after the signal is gone.
    pub fn connect_scoped<F>(&self, slot: F) -> ConnectionGuard<Args>
    where
        F: Fn(&Args) + 'static,
    {
        let id = self.connect(slot);
        ConnectionGuard {
            signal: Rc::downgrade(&self.inner),
            id: Some(id),
        }
    }

    /// Disconnect a specific slot by its connection ID.
    ///
    /// Returns `true` if the connection was found and removed, `false` otherwise.
    pub fn disconnect(&self, id: ConnectionId) -> bool {
        self.inner.connections.borrow_mut().remove(id).is_some()
    }

    /// Get the number of connected slots.
    pub fn connection_count(&self) -> usize {
        self.inner.connections.borrow().len()
    }

    /// Check whether any slot is connected.
    pub fn is_connected(&self) -> bool {
        self.connection_count() > 0
    }

    /// Emit the signal, invoking all connected slots.
    ///
    /// Slots are snapshotted before the first call, so a slot may connect or
    /// disconnect (including itself) without invalidating the iteration.
    #[tracing::instrument(skip_all, target = "horizon_suggest_core::signal", level = "trace")]
    pub fn emit(&self, args: Args) {
        let slots: Vec<Slot<Args>> = self
            .inner
            .connections
            .borrow()
            .values()
            .cloned()
            .collect();
        tracing::trace!(target: "horizon_suggest_core::signal", connection_count = slots.len(), "emitting signal");

        for slot in slots {
            slot(&args);
        }
    }
}

/// A subscription to a [`Signal`] that disconnects when dropped.
///
/// Owners that need a deterministic teardown point call
/// [`disconnect`](Self::disconnect); calling it more than once, or after the
/// signal has been dropped, is a no-op.
pub struct ConnectionGuard<Args> {
    signal: Weak<SignalInner<Args>>,
    id: Option<ConnectionId>,
}

impl<Args> ConnectionGuard<Args> {
    /// Whether the guard still holds a live connection.
    pub fn is_connected(&self) -> bool {
        match (self.id, self.signal.upgrade()) {
            (Some(id), Some(inner)) => inner.connections.borrow().contains_key(id),
            _ => false,
        }
    }

    /// Release the connection now.
    pub fn disconnect(&mut self) {
        if let Some(id) = self.id.take()
            && let Some(inner) = self.signal.upgrade()
        {
            inner.connections.borrow_mut().remove(id);
        }
    }
}

impl<Args> Drop for ConnectionGuard<Args> {
    fn drop(&mut self) {
        self.disconnect();
    }
}

impl<Args> std::fmt::Debug for ConnectionGuard<Args> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConnectionGuard")
            .field("id", &self.id)
            .field("signal_alive", &(self.signal.strong_count() > 0))
            .finish()
    }
}

// Signals are bound to the event loop that created them.
static_assertions::assert_not_impl_any!(Signal<()>: Send, Sync);
