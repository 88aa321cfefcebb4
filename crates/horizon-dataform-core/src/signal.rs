//! Signal/slot system for Horizon Dataform.
//!
//! Every form control announces its changes through a [`Signal`]. Composite
//! widgets (tuple groups, record widgets, record containers) connect slots to
//! their children's signals and re-emit a combined value.
//!
//! # Key Types
//!
//! - [`Signal<Args>`] - A list of slots invoked on every emission
//! - [`ConnectionId`] - Identifies one connection for later disconnection
//! - [`SignalBlocker`] - RAII guard that silences a signal during a bulk update
//!
//! # Invocation
//!
//! Slots run synchronously on the emitting thread, in connection order. The
//! slot list is copied out of the lock before any slot runs, so a slot may
//! emit further signals or connect new slots to the same signal.
//!
//! # Example
//!
//! ```
//! use horizon_dataform_core::{Signal, Value};
//!
//! let value_changed = Signal::<Value>::new();
//! let conn_id = value_changed.connect(|value| {
//!     println!("control now holds {}", value);
//! });
//!
//! value_changed.emit(Value::Int(3));
//! value_changed.disconnect(conn_id);
//! ```

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use parking_lot::Mutex;
use slotmap::{SlotMap, new_key_type};

use crate::logging::targets;

new_key_type! {
    /// Identifies a slot connected to a [`Signal`].
    ///
    /// Pass it to [`Signal::disconnect`] to remove the slot.
    pub struct ConnectionId;
}

type Slot<Args> = Arc<dyn Fn(&Args) + Send + Sync>;

/// A change notification with any number of connected slots.
///
/// `Args` is the payload handed to each slot by reference: a [`Value`](crate::Value)
/// for control changes, a [`RecordValue`](crate::RecordValue) for record
/// widgets, an index for page switches.
pub struct Signal<Args> {
    slots: Mutex<SlotMap<ConnectionId, Slot<Args>>>,
    blocked: AtomicBool,
}

impl<Args: 'static> Default for Signal<Args> {
    fn default() -> Self {
        Self::new()
    }
}

impl<Args: 'static> Signal<Args> {
    /// Create a signal with no slots.
    pub fn new() -> Self {
        Self {
            slots: Mutex::new(SlotMap::with_key()),
            blocked: AtomicBool::new(false),
        }
    }

    /// Connect a slot, returning the id needed to disconnect it.
    ///
    /// ```
    /// use horizon_dataform_core::Signal;
    ///
    /// let index_changed = Signal::<i32>::new();
    /// index_changed.connect(|index| println!("page {}", index));
    /// index_changed.emit(1);
    /// ```
    pub fn connect<F>(&self, slot: F) -> ConnectionId
    where
        F: Fn(&Args) + Send + Sync + 'static,
    {
        self.slots.lock().insert(Arc::new(slot))
    }

    /// Remove a slot. Returns `false` if it was already gone.
    pub fn disconnect(&self, id: ConnectionId) -> bool {
        self.slots.lock().remove(id).is_some()
    }

    /// Remove every slot.
    pub fn disconnect_all(&self) {
        self.slots.lock().clear();
    }

    /// Number of connected slots.
    pub fn connection_count(&self) -> usize {
        self.slots.lock().len()
    }

    /// Turn emission off or on, returning the previous state.
    pub fn set_blocked(&self, blocked: bool) -> bool {
        self.blocked.swap(blocked, Ordering::SeqCst)
    }

    /// Returns `true` while emission is turned off.
    pub fn is_blocked(&self) -> bool {
        self.blocked.load(Ordering::SeqCst)
    }

    /// Silence this signal until the returned guard is dropped.
    ///
    /// The guard restores whatever state it found, so guards nest.
    pub fn block(&self) -> SignalBlocker<'_, Args> {
        SignalBlocker {
            previous: self.set_blocked(true),
            signal: self,
        }
    }

    /// Invoke every connected slot with `args`. Does nothing while blocked.
    #[tracing::instrument(skip_all, target = "horizon_dataform_core::signal", level = "trace")]
    pub fn emit(&self, args: Args) {
        if self.is_blocked() {
            tracing::trace!(target: targets::SIGNAL, "blocked, emission dropped");
            return;
        }

        let slots: Vec<Slot<Args>> = self.slots.lock().values().cloned().collect();
        tracing::trace!(target: targets::SIGNAL, slots = slots.len(), "emitting");
        for slot in slots {
            slot(&args);
        }
    }
}

/// Keeps a signal blocked while alive. Created by [`Signal::block`].
///
/// ```
/// use horizon_dataform_core::{Signal, Value};
/// use std::sync::atomic::{AtomicUsize, Ordering};
/// use std::sync::Arc;
///
/// let value_changed = Signal::<Value>::new();
/// let count = Arc::new(AtomicUsize::new(0));
/// let count_clone = count.clone();
/// value_changed.connect(move |_| {
///     count_clone.fetch_add(1, Ordering::SeqCst);
/// });
///
/// {
///     let _blocker = value_changed.block();
///     value_changed.emit(Value::Bool(true)); // dropped
/// }
/// value_changed.emit(Value::Bool(false));
/// assert_eq!(count.load(Ordering::SeqCst), 1);
/// ```
pub struct SignalBlocker<'a, Args: 'static> {
    signal: &'a Signal<Args>,
    previous: bool,
}

impl<Args: 'static> Drop for SignalBlocker<'_, Args> {
    fn drop(&mut self) {
        self.signal.set_blocked(self.previous);
    }
}

static_assertions::assert_impl_all!(Signal<crate::Value>: Send, Sync);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{RecordValue, Value};

    fn collect<T: Clone + Send + 'static>(signal: &Signal<T>) -> Arc<Mutex<Vec<T>>> {
        let received = Arc::new(Mutex::new(Vec::new()));
        let received_clone = received.clone();
        signal.connect(move |value: &T| received_clone.lock().push(value.clone()));
        received
    }

    #[test]
    fn test_emit_reaches_slots_in_order() {
        let signal = Signal::<Value>::new();
        let order = Arc::new(Mutex::new(Vec::new()));
        for slot in 0..3 {
            let order = order.clone();
            signal.connect(move |_| order.lock().push(slot));
        }

        signal.emit(Value::Int(1));
        assert_eq!(*order.lock(), vec![0, 1, 2]);
        assert_eq!(signal.connection_count(), 3);
    }

    #[test]
    fn test_disconnect() {
        let signal = Signal::<Value>::new();
        let received = collect(&signal);
        let other = signal.connect(|_| {});

        assert!(signal.disconnect(other));
        assert!(!signal.disconnect(other));
        signal.emit(Value::Str("a".into()));
        signal.disconnect_all();
        signal.emit(Value::Str("b".into()));

        assert_eq!(*received.lock(), vec![Value::Str("a".into())]);
        assert_eq!(signal.connection_count(), 0);
    }

    #[test]
    fn test_set_blocked_returns_previous_state() {
        let signal = Signal::<i32>::new();
        let received = collect(&signal);

        assert!(!signal.set_blocked(true));
        signal.emit(1);
        assert!(signal.set_blocked(false));
        signal.emit(2);

        assert_eq!(*received.lock(), vec![2]);
    }

    #[test]
    fn test_nested_blockers() {
        let signal = Signal::<RecordValue>::new();
        let received = collect(&signal);

        {
            let _outer = signal.block();
            {
                let _inner = signal.block();
                signal.emit(RecordValue::new("Inner"));
            }
            // the outer guard still holds
            assert!(signal.is_blocked());
            signal.emit(RecordValue::new("Outer"));
        }

        assert!(!signal.is_blocked());
        signal.emit(RecordValue::new("After"));
        assert_eq!(*received.lock(), vec![RecordValue::new("After")]);
    }

    #[test]
    fn test_slot_may_reemit() {
        // A group re-emitting on its own signal from a slot must not deadlock
        let signal = Arc::new(Signal::<i32>::new());
        let received = collect(&signal);

        let weak = Arc::downgrade(&signal);
        signal.connect(move |&value| {
            if let Some(signal) = weak.upgrade()
                && value < 3
            {
                signal.connect(|_| {});
                signal.emit(value + 1);
            }
        });

        signal.emit(1);
        assert_eq!(*received.lock(), vec![1, 2, 3]);
    }
}
