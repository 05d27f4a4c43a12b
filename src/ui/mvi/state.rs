//! Marker trait for dialog state.

/// Dialog state: cloneable, comparable, with a hidden default.
pub trait UiState: Clone + PartialEq + Default + Send + 'static {}
