//! Platform abstraction layer
//!
//! The host UI recognizes gestures and lifecycle changes and forwards them to
//! the core as already-normalized input events.

use glam::Vec2;

use crate::settings::Settings;
use crate::sim::Rect;

/// A normalized input event from the host UI
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    /// Tap anywhere on the play field (launch / resume)
    Tap,
    /// Horizontal drag since the previous drag event, in points
    DragDelta(f32),
    /// Explicit pause (settings opened, view hidden)
    PauseRequested,
    /// Pause button: pause when moving, resume when paused
    PauseToggled,
    /// App moved to the background
    AppBackgrounded,
    /// Settings screen changed preferences
    SettingsChanged(Settings),
    /// Play field laid out with new bounds (rotation, split view)
    FieldResized(Rect),
    /// New gravity vector (device tilt), points/s²
    GravityChanged(Vec2),
}
