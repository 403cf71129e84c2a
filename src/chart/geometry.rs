#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance_to(&self, other: Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub origin: Point,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            origin: Point::new(x, y),
            width,
            height,
        }
    }

    pub fn center(&self) -> Point {
        Point::new(
            self.origin.x + self.width / 2.0,
            self.origin.y + self.height / 2.0,
        )
    }

    pub fn min_side(&self) -> f64 {
        self.width.min(self.height)
    }
}

/// Reduces any angle in degrees into `[0, 360)`.
pub fn normalize_angle(angle: f64) -> f64 {
    let a = angle.rem_euclid(360.0);
    // rem_euclid can round up to the modulus for tiny negative inputs
    if a >= 360.0 { 0.0 } else { a }
}

/// Angle of `point` around `center` in degrees: 0 due north, growing
/// clockwise in screen coordinates (y grows downward).
///
/// Undefined when `point == center`; callers reject that case via
/// [`distance_to_center`] first.
pub fn angle_for_point(point: Point, center: Point) -> f64 {
    let (dx, dy) = (point.x - center.x, point.y - center.y);
    normalize_angle(dx.atan2(-dy).to_degrees())
}

pub fn distance_to_center(point: Point, center: Point) -> f64 {
    point.distance_to(center)
}

/// Inverse of [`angle_for_point`]: the point `distance` away from `center`
/// at `angle` degrees.
pub fn position_on_circle(center: Point, distance: f64, angle: f64) -> Point {
    let rad = angle.to_radians();
    Point::new(
        center.x + distance * rad.sin(),
        center.y - distance * rad.cos(),
    )
}
