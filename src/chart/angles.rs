use super::data::Dataset;
use super::geometry::normalize_angle;

/// Per-slice sweep (`draw`) and cumulative end angle (`absolute`), in degrees.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct AngleTable {
    draw: Vec<f64>,
    absolute: Vec<f64>,
}

impl AngleTable {
    pub fn compute(dataset: &Dataset) -> Self {
        let sum = dataset.sum();
        let max_angle = dataset.max_angle();

        let draw: Vec<f64> = dataset
            .entries()
            .iter()
            .map(|e| {
                if sum > 0.0 && sum.is_finite() {
                    max_angle * e.magnitude() / sum
                } else {
                    0.0
                }
            })
            .collect();

        let absolute = draw
            .iter()
            .scan(0.0, |acc, d| {
                *acc += d;
                Some(*acc)
            })
            .collect();

        Self { draw, absolute }
    }

    pub fn draw_angles(&self) -> &[f64] {
        &self.draw
    }

    pub fn absolute_angles(&self) -> &[f64] {
        &self.absolute
    }

    pub fn len(&self) -> usize {
        self.draw.len()
    }

    pub fn is_empty(&self) -> bool {
        self.draw.is_empty()
    }

    pub fn index_for_angle(&self, angle: f64, rotation: f64) -> Option<usize> {
        index_for_angle(angle, rotation, &self.absolute)
    }
}

/// The slice under `angle` once `rotation` is taken out. An angle exactly on
/// a boundary belongs to the following slice.
pub fn index_for_angle(angle: f64, rotation: f64, absolute: &[f64]) -> Option<usize> {
    let a = normalize_angle(angle - rotation);
    absolute.iter().position(|&end| end > a)
}
