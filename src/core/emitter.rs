//! Observable-by-event-name capability shared by states, transitions and machines.
//!
//! An [`Emitter`] maps event names to an ordered list of listeners. Emitting an
//! event calls every listener registered for that name, synchronously and in
//! registration order, before `emit` returns.

use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// A listener callback receiving the event payload.
pub type Listener<P> = Arc<dyn Fn(&P) + Send + Sync>;

/// Name-keyed registry of listeners with synchronous dispatch.
///
/// `P` is the payload type handed to every listener. It may be unsized, so
/// `Emitter<[Value]>` hands listeners a plain slice of arguments.
///
/// # Example
///
/// ```rust
/// use monster::core::Emitter;
/// use std::sync::atomic::{AtomicUsize, Ordering};
/// use std::sync::Arc;
///
/// let emitter: Emitter<str> = Emitter::new();
/// let seen = Arc::new(AtomicUsize::new(0));
///
/// let counter = Arc::clone(&seen);
/// emitter.on("ping", move |_msg: &str| {
///     counter.fetch_add(1, Ordering::SeqCst);
/// });
///
/// assert!(emitter.emit("ping", "hello"));
/// assert!(!emitter.emit("pong", "nobody listens"));
/// assert_eq!(seen.load(Ordering::SeqCst), 1);
/// ```
pub struct Emitter<P: ?Sized> {
    listeners: Mutex<HashMap<String, Vec<Listener<P>>>>,
}

impl<P: ?Sized> Emitter<P> {
    /// Create an emitter with no listeners.
    pub fn new() -> Self {
        Self {
            listeners: Mutex::new(HashMap::new()),
        }
    }

    /// Register a listener for `event`. Listeners run in registration order.
    pub fn on<F>(&self, event: impl Into<String>, listener: F)
    where
        F: Fn(&P) + Send + Sync + 'static,
    {
        self.lock()
            .entry(event.into())
            .or_default()
            .push(Arc::new(listener));
    }

    /// Dispatch `event` to its listeners. Returns `true` if any listener ran.
    ///
    /// The listener list is snapshotted first and the registry lock is not
    /// held while listeners run, so a listener may register further
    /// listeners; those only see later emissions.
    pub fn emit(&self, event: &str, payload: &P) -> bool {
        let snapshot: Vec<Listener<P>> = match self.lock().get(event) {
            Some(listeners) => listeners.clone(),
            None => return false,
        };

        tracing::trace!(event, listeners = snapshot.len(), "emitting event");

        for listener in &snapshot {
            listener(payload);
        }
        !snapshot.is_empty()
    }

    /// Number of listeners currently registered for `event`.
    pub fn listener_count(&self, event: &str) -> usize {
        self.lock().get(event).map_or(0, Vec::len)
    }

    /// Drop every listener registered for `event`.
    pub fn remove_all_listeners(&self, event: &str) {
        self.lock().remove(event);
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<String, Vec<Listener<P>>>> {
        // A panicking listener never runs under the lock, so the map is
        // always consistent.
        self.listeners.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<P: ?Sized> Default for Emitter<P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P: ?Sized> fmt::Debug for Emitter<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut events: Vec<(String, usize)> = self
            .lock()
            .iter()
            .map(|(name, listeners)| (name.clone(), listeners.len()))
            .collect();
        events.sort();
        f.debug_struct("Emitter").field("events", &events).finish()
    }
}
