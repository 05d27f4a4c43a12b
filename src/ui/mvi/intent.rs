//! Marker trait for intents.

/// A user action (key press) or a system event (verification finished,
/// animation tick) fed to a reducer.
pub trait Intent: Send + 'static {}
