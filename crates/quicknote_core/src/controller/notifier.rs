//! Single-slot state notification channel.
//!
//! # Invariants
//! - Setting a state never calls the observer; delivery happens only in
//!   [`StateNotifier::dispatch_pending`], run by the rendering context.
//! - At most one notification is pending. Setting again before a dispatch
//!   replaces it (last write wins).
//! - At most one observer is registered.

type Observer<'a, S> = Box<dyn FnMut(&S) + 'a>;

/// Holds the current state and delivers it to one observer on demand.
pub struct StateNotifier<'a, S> {
    state: S,
    pending: bool,
    observer: Option<Observer<'a, S>>,
}

impl<'a, S> StateNotifier<'a, S> {
    pub fn new(initial: S) -> Self {
        Self {
            state: initial,
            pending: false,
            observer: None,
        }
    }

    /// Registers the observer, replacing any previous one.
    pub fn subscribe(&mut self, observer: impl FnMut(&S) + 'a) {
        self.observer = Some(Box::new(observer));
    }

    pub fn unsubscribe(&mut self) {
        self.observer = None;
    }

    pub fn state(&self) -> &S {
        &self.state
    }

    /// Replaces the state and schedules one notification.
    pub fn set(&mut self, state: S) {
        self.state = state;
        self.pending = true;
    }

    pub fn has_pending(&self) -> bool {
        self.pending
    }

    /// Delivers the latest state if a notification is pending.
    ///
    /// Returns `true` when the observer was called. Without an observer the
    /// notification stays pending for the next subscriber.
    pub fn dispatch_pending(&mut self) -> bool {
        if !self.pending {
            return false;
        }
        let Some(observer) = self.observer.as_mut() else {
            return false;
        };
        self.pending = false;
        observer(&self.state);
        true
    }
}
