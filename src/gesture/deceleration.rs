use super::{DECAY_REFERENCE_HZ, MIN_DECELERATION_VELOCITY};
use crate::animation::Easing;

/// Inertial coast after a flick, expressed as a fixed-length animation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Deceleration {
    pub start_angle: f64,
    /// Signed, follows the exit velocity.
    pub total_rotation: f64,
    pub duration: f64,
}

impl Deceleration {
    pub const EASING: Easing = Easing::EaseOutExpo;

    /// Friction is the fraction of velocity kept per reference frame.
    /// Returns `None` when the flick is too slow to coast.
    pub fn from_velocity(velocity: f64, friction: f64, start_angle: f64) -> Option<Self> {
        if !velocity.is_finite() || velocity.abs() <= MIN_DECELERATION_VELOCITY {
            return None;
        }
        if friction <= 0.0 || friction >= 1.0 {
            return None;
        }

        let log_coef = DECAY_REFERENCE_HZ * friction.ln();
        let duration = (1.0 / velocity.abs()).ln() / log_coef;
        let total_rotation = velocity.signum() * (velocity / log_coef).abs();

        Some(Self {
            start_angle,
            total_rotation,
            duration,
        })
    }

    pub fn angle_at(&self, phase: f64) -> f64 {
        self.start_angle + self.total_rotation * phase
    }

    pub fn end_angle(&self) -> f64 {
        self.angle_at(1.0)
    }
}
