use super::VELOCITY_WINDOW;
use std::collections::VecDeque;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VelocitySample {
    pub time: f64,
    pub angle: f64,
}

/// Angular velocity over a sliding window of pointer samples.
#[derive(Debug, Clone, Default)]
pub struct VelocityTracker {
    samples: VecDeque<VelocitySample>,
}

impl VelocityTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reset(&mut self) {
        self.samples.clear();
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn add_sample(&mut self, time: f64, angle: f64) {
        self.samples.push_back(VelocitySample { time, angle });

        // keep two samples so the direction is still known
        while self.samples.len() > 2 {
            match (self.samples.front(), self.samples.back()) {
                (Some(first), Some(last)) if last.time - first.time > VELOCITY_WINDOW => {
                    self.samples.pop_front();
                }
                _ => break,
            }
        }
    }

    /// Degrees per second, positive when clockwise.
    pub fn velocity(&self) -> f64 {
        let (Some(first), Some(last)) = (self.samples.front(), self.samples.back()) else {
            return 0.0;
        };

        let before_last = self
            .samples
            .iter()
            .rev()
            .find(|s| s.angle != last.angle)
            .unwrap_or(first);

        let mut time_delta = last.time - first.time;
        if time_delta == 0.0 {
            time_delta = 0.1;
        }

        let mut clockwise = last.angle >= before_last.angle;
        if (last.angle - before_last.angle).abs() > 270.0 {
            clockwise = !clockwise;
        }

        let (mut first_angle, mut last_angle) = (first.angle, last.angle);
        if last_angle - first_angle > 180.0 {
            first_angle += 360.0;
        } else if first_angle - last_angle > 180.0 {
            last_angle += 360.0;
        }

        let velocity = (last_angle - first_angle).abs() / time_delta;
        if clockwise { velocity } else { -velocity }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tracker(samples: &[(f64, f64)]) -> VelocityTracker {
        let mut tracker = VelocityTracker::new();
        for &(time, angle) in samples {
            tracker.add_sample(time, angle);
        }
        tracker
    }

    #[test]
    fn test_empty_is_still() {
        assert_eq!(VelocityTracker::new().velocity(), 0.0);
    }

    #[test]
    fn test_clockwise_and_counter_clockwise() {
        let cw = tracker(&[(0.0, 10.0), (0.1, 20.0), (0.2, 30.0)]);
        assert!((cw.velocity() - 100.0).abs() < 1e-9);

        let ccw = tracker(&[(0.0, 30.0), (0.1, 20.0), (0.2, 10.0)]);
        assert!((ccw.velocity() + 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_wraparound_is_small_and_clockwise() {
        let t = tracker(&[(0.0, 350.0), (0.1, 10.0)]);
        assert!((t.velocity() - 200.0).abs() < 1e-9);

        let back = tracker(&[(0.0, 10.0), (0.1, 350.0)]);
        assert!((back.velocity() + 200.0).abs() < 1e-9);
    }

    #[test]
    fn test_stationary_tail_keeps_direction() {
        let t = tracker(&[(0.0, 40.0), (0.1, 30.0), (0.2, 30.0), (0.3, 30.0)]);
        assert!(t.velocity() < 0.0);
    }

    #[test]
    fn test_single_sample_uses_fallback_delta() {
        let t = tracker(&[(5.0, 90.0)]);
        assert_eq!(t.velocity(), 0.0);
    }

    #[test]
    fn test_old_samples_are_evicted_but_two_remain() {
        let t = tracker(&[(0.0, 0.0), (0.5, 10.0), (1.2, 20.0), (1.3, 30.0)]);
        assert_eq!(t.len(), 3);

        let sparse = tracker(&[(0.0, 0.0), (5.0, 10.0)]);
        assert_eq!(sparse.len(), 2);

        let stale = tracker(&[(0.0, 0.0), (5.0, 10.0), (10.0, 20.0)]);
        assert_eq!(stale.len(), 2);
    }
}
