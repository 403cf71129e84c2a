use super::geometry::normalize_angle;
use std::cell::{Cell, RefCell};
use std::rc::Rc;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RotationState {
    /// Unbounded, keeps count of full turns.
    pub raw: f64,
    /// `raw` reduced into `[0, 360)`.
    pub normalized: f64,
}

impl RotationState {
    pub fn from_raw(raw: f64) -> Self {
        Self {
            raw,
            normalized: normalize_angle(raw),
        }
    }
}

type RotationListener = Rc<dyn Fn(RotationState)>;

#[derive(Default)]
struct Shared {
    state: Cell<RotationState>,
    listener: RefCell<Option<RotationListener>>,
}

/// Shared handle to the chart rotation. Gestures, spins and decelerations
/// all write through the same handle; only one of them is active at a time.
#[derive(Clone, Default)]
pub struct Rotation {
    shared: Rc<Shared>,
}

impl Rotation {
    pub fn new(raw: f64) -> Self {
        let rotation = Self::default();
        rotation.shared.state.set(RotationState::from_raw(raw));
        rotation
    }

    pub fn set_listener(&self, listener: impl Fn(RotationState) + 'static) {
        *self.shared.listener.borrow_mut() = Some(Rc::new(listener));
    }

    pub fn state(&self) -> RotationState {
        self.shared.state.get()
    }

    pub fn raw(&self) -> f64 {
        self.state().raw
    }

    pub fn normalized(&self) -> f64 {
        self.state().normalized
    }

    pub fn set_raw(&self, raw: f64) {
        let state = RotationState::from_raw(raw);
        self.shared.state.set(state);

        let listener = self.shared.listener.borrow().clone();
        if let Some(listener) = listener {
            listener(state);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_raw_keeps_turns() {
        let rotation = Rotation::new(0.0);
        rotation.set_raw(-450.0);
        assert_eq!(rotation.raw(), -450.0);
        assert_eq!(rotation.normalized(), 270.0);

        rotation.set_raw(725.0);
        assert_eq!(rotation.normalized(), 5.0);
    }

    #[test]
    fn test_clones_share_state_and_notify() {
        let rotation = Rotation::new(10.0);
        let seen = Rc::new(Cell::new(RotationState::default()));
        let sink = seen.clone();
        rotation.set_listener(move |s| sink.set(s));

        let writer = rotation.clone();
        writer.set_raw(370.0);

        assert_eq!(rotation.normalized(), 10.0);
        assert_eq!(seen.get(), RotationState::from_raw(370.0));
    }
}
