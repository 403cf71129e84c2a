use super::deceleration::Deceleration;
use super::velocity::VelocityTracker;
use super::{DEFAULT_FRICTION, DRAG_THRESHOLD, MAX_FRICTION};
use crate::animation::{Animator, AnimatorEvent, TickSource};
use crate::chart::Rotation;
use crate::chart::geometry::{Point, angle_for_point};
use std::cell::Cell;
use std::rc::Rc;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum GestureState {
    #[default]
    Idle,
    /// Pointer is down but has not travelled past the drag threshold.
    Pending { origin: Point },
    Rotating,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GestureSettings {
    pub rotation_enabled: bool,
    pub drag_deceleration_enabled: bool,
    pub drag_threshold: f64,
    friction: f64,
}

impl Default for GestureSettings {
    fn default() -> Self {
        Self {
            rotation_enabled: true,
            drag_deceleration_enabled: true,
            drag_threshold: DRAG_THRESHOLD,
            friction: DEFAULT_FRICTION,
        }
    }
}

impl GestureSettings {
    pub fn friction(&self) -> f64 {
        self.friction
    }

    pub fn set_friction(&mut self, friction: f64) {
        let clamped = if friction.is_nan() {
            DEFAULT_FRICTION
        } else {
            friction.clamp(0.0, MAX_FRICTION)
        };
        if clamped != friction {
            log::warn!("Friction {} clamped to {}", friction, clamped);
        }
        self.friction = clamped;
    }

    pub fn with_friction(mut self, friction: f64) -> Self {
        self.set_friction(friction);
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GestureOutcome {
    None,
    /// Released without rotating.
    Tap(Point),
    Rotated {
        velocity: f64,
        decelerating: bool,
    },
}

/// Turns a pointer stream into rotation, and a release into an inertial
/// coast.
pub struct GestureController {
    settings: GestureSettings,
    state: GestureState,
    center: Point,
    start_angle: f64,
    tracker: VelocityTracker,
    rotation: Rotation,
    decelerator: Animator,
    coast: Rc<Cell<Option<Deceleration>>>,
}

impl GestureController {
    pub fn new(rotation: Rotation, ticks: Rc<dyn TickSource>, settings: GestureSettings) -> Self {
        let coast: Rc<Cell<Option<Deceleration>>> = Rc::new(Cell::new(None));
        let decelerator = Animator::new(ticks);
        {
            let coast = coast.clone();
            let rotation = rotation.clone();
            decelerator.set_observer(move |event| match event {
                AnimatorEvent::Progress(phase) => {
                    if let Some(deceleration) = coast.get() {
                        rotation.set_raw(deceleration.angle_at(phase));
                    }
                }
                AnimatorEvent::Stopped => coast.set(None),
            });
        }

        Self {
            settings,
            state: GestureState::Idle,
            center: Point::default(),
            start_angle: 0.0,
            tracker: VelocityTracker::new(),
            rotation,
            decelerator,
            coast,
        }
    }

    pub fn state(&self) -> GestureState {
        self.state
    }

    pub fn settings(&self) -> &GestureSettings {
        &self.settings
    }

    pub fn set_settings(&mut self, settings: GestureSettings) {
        self.settings = settings;
    }

    pub fn set_center(&mut self, center: Point) {
        self.center = center;
    }

    pub fn is_decelerating(&self) -> bool {
        self.decelerator.is_running()
    }

    pub fn begin(&mut self, point: Point, time: f64) {
        self.stop_deceleration();
        self.tracker.reset();
        if self.settings.rotation_enabled {
            self.sample(point, time);
        }
        self.start_angle = angle_for_point(point, self.center) - self.rotation.normalized();
        self.state = GestureState::Pending { origin: point };
    }

    pub fn moved(&mut self, point: Point, time: f64) {
        if self.state == GestureState::Idle {
            return;
        }
        if self.settings.drag_deceleration_enabled {
            self.sample(point, time);
        }

        if let GestureState::Pending { origin } = self.state
            && point.distance_to(origin) > self.settings.drag_threshold
        {
            if self.settings.rotation_enabled {
                log::debug!("Gesture classified as rotation");
                self.state = GestureState::Rotating;
            } else {
                // a drag that cannot rotate is not a tap either
                self.state = GestureState::Idle;
                return;
            }
        }

        if self.state == GestureState::Rotating {
            self.rotation
                .set_raw(angle_for_point(point, self.center) - self.start_angle);
        }
    }

    pub fn end(&mut self, point: Point, time: f64) -> GestureOutcome {
        match std::mem::take(&mut self.state) {
            GestureState::Idle => GestureOutcome::None,
            GestureState::Pending { .. } => GestureOutcome::Tap(point),
            GestureState::Rotating if !self.settings.drag_deceleration_enabled => {
                GestureOutcome::Rotated {
                    velocity: 0.0,
                    decelerating: false,
                }
            }
            GestureState::Rotating => {
                self.sample(point, time);
                let velocity = self.tracker.velocity();
                let decelerating = self.start_deceleration(velocity);
                GestureOutcome::Rotated {
                    velocity,
                    decelerating,
                }
            }
        }
    }

    /// Drops the gesture. Rotation applied so far stays.
    pub fn cancel(&mut self) {
        self.state = GestureState::Idle;
        self.tracker.reset();
    }

    /// Coasts from the current rotation at `velocity` degrees per second.
    /// Returns whether a coast was started.
    pub fn start_deceleration(&mut self, velocity: f64) -> bool {
        self.stop_deceleration();

        let Some(deceleration) =
            Deceleration::from_velocity(velocity, self.settings.friction, self.rotation.raw())
        else {
            return false;
        };

        log::debug!(
            "Decelerating from {:.1} deg/s: {:.1} degrees over {:.3}s",
            velocity,
            deceleration.total_rotation,
            deceleration.duration
        );
        self.coast.set(Some(deceleration));
        self.decelerator
            .animate(deceleration.duration, Some(Deceleration::EASING.into()));
        true
    }

    /// Freezes the rotation where it is.
    pub fn stop_deceleration(&mut self) {
        self.coast.set(None);
        self.decelerator.stop();
    }

    fn sample(&mut self, point: Point, time: f64) {
        self.tracker
            .add_sample(time, angle_for_point(point, self.center));
    }
}
