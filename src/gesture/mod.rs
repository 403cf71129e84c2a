pub mod controller;
pub mod deceleration;
pub mod velocity;

pub use controller::{GestureController, GestureOutcome, GestureSettings, GestureState};
pub use deceleration::Deceleration;
pub use velocity::{VelocitySample, VelocityTracker};

/// Pointer travel before a drag counts as a rotation.
pub const DRAG_THRESHOLD: f64 = 8.0;
pub const DEFAULT_FRICTION: f64 = 0.9;
pub const MAX_FRICTION: f64 = 0.999;
/// Friction is defined per frame at this rate, whatever the real refresh rate.
pub const DECAY_REFERENCE_HZ: f64 = 60.0;
/// Exit velocities at or below this (degrees per second) do not coast.
pub const MIN_DECELERATION_VELOCITY: f64 = 1.0;
/// Samples older than this, relative to the newest, are dropped.
pub const VELOCITY_WINDOW: f64 = 1.0;
