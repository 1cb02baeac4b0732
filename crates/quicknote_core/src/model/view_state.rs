//! Presentation state of list-driven screens.
//!
//! # Invariants
//! - The variant set is closed; renderers match exhaustively.
//! - Only the latest state matters; no history is kept.

/// Data-loading lifecycle of a screen.
///
/// `T` is a screen-specific success payload, `E` the failure reason.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewState<T, E> {
    /// Nothing loaded yet.
    Empty,
    /// A load is in flight.
    Loading,
    /// Data is available; the payload tells the renderer what changed.
    Ready(T),
    /// The last load failed.
    Error(E),
}

impl<T, E> Default for ViewState<T, E> {
    fn default() -> Self {
        Self::Empty
    }
}

impl<T, E> ViewState<T, E> {
    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    pub fn is_ready(&self) -> bool {
        matches!(self, Self::Ready(_))
    }

    /// Returns the failure reason when in the error state.
    pub fn error(&self) -> Option<&E> {
        match self {
            Self::Error(err) => Some(err),
            _ => None,
        }
    }
}
