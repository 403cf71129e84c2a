use crate::chart::Point;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerKind {
    Begin,
    Move,
    End,
    Cancel,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerEvent {
    pub kind: PointerKind,
    pub point: Point,
    /// Seconds on the same clock as the ticks.
    pub timestamp: f64,
}

impl PointerEvent {
    pub fn new(kind: PointerKind, point: Point, timestamp: f64) -> Self {
        Self {
            kind,
            point,
            timestamp,
        }
    }
}

#[derive(Debug, Clone)]
pub enum AppEvent {
    Tick(f64),
    Pointer(PointerEvent),
    ConfigReload,
    Quit,
}
