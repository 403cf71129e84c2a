use super::angles::index_for_angle;
use super::data::Dataset;
use super::geometry::{Point, angle_for_point, distance_to_center};
use super::pie::RadialChart;

/// A selected slice.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Highlight {
    pub index: usize,
    pub value: f64,
}

impl Highlight {
    /// Resolves `index` against the dataset; stale indices give `None`.
    pub fn for_index(dataset: &Dataset, index: usize) -> Option<Self> {
        dataset.entry(index).map(|entry| Self {
            index,
            value: entry.value,
        })
    }
}

/// Inputs for one hit test: the pie circle plus the rotation and sweep
/// phase it is currently drawn with.
#[derive(Debug, Clone, Copy)]
pub struct HitTest {
    pub center: Point,
    pub radius: f64,
    pub rotation: f64,
    pub phase: f64,
}

impl HitTest {
    pub fn index_at(&self, point: Point, absolute: &[f64], count: usize) -> Option<usize> {
        if distance_to_center(point, self.center) > self.radius || self.phase == 0.0 {
            return None;
        }
        // hit-test against the fully unrolled pie
        let angle = angle_for_point(point, self.center) / self.phase;
        index_for_angle(angle, self.rotation, absolute).filter(|&index| index < count)
    }
}

/// Maps touch points to slices of a [`RadialChart`].
pub struct PieHighlighter<'a, C: RadialChart> {
    chart: &'a C,
}

impl<'a, C: RadialChart> PieHighlighter<'a, C> {
    pub fn new(chart: &'a C) -> Self {
        Self { chart }
    }

    pub fn index_at(&self, point: Point, rotation: f64, phase: f64, count: usize) -> Option<usize> {
        HitTest {
            center: self.chart.center(),
            radius: self.chart.radius(),
            rotation,
            phase,
        }
        .index_at(point, self.chart.absolute_angles(), count)
    }

    pub fn highlight_at(
        &self,
        dataset: &Dataset,
        point: Point,
        rotation: f64,
        phase: f64,
    ) -> Option<Highlight> {
        self.index_at(point, rotation, phase, dataset.len())
            .and_then(|index| Highlight::for_index(dataset, index))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::geometry::{Rect, position_on_circle};
    use crate::chart::pie::PieChart;

    fn chart(values: &[f64]) -> PieChart {
        // 200x200 content, shift 0 -> radius 100 at (100, 100)
        let mut data = Dataset::from_values(values);
        data.selection_shift = 0.0;
        PieChart::new(data, Rect::new(0.0, 0.0, 200.0, 200.0))
    }

    #[test]
    fn test_hit_each_slice() {
        let chart = chart(&[10.0, 20.0, 30.0, 40.0]);
        let highlighter = PieHighlighter::new(&chart);
        let center = chart.center();

        let cases = vec![(10.0, 0), (50.0, 1), (150.0, 2), (300.0, 3)];
        for (angle, expected) in cases {
            let point = position_on_circle(center, 50.0, angle);
            let hit = highlighter.highlight_at(chart.dataset(), point, 0.0, 1.0);
            assert_eq!(hit.map(|h| h.index), Some(expected), "angle {angle}");
        }
    }

    #[test]
    fn test_outside_radius_is_no_hit() {
        let chart = chart(&[1.0, 1.0]);
        let highlighter = PieHighlighter::new(&chart);
        let point = position_on_circle(chart.center(), 100.5, 45.0);
        assert_eq!(highlighter.index_at(point, 0.0, 1.0, 2), None);
    }

    #[test]
    fn test_rotation_shifts_hit() {
        let chart = chart(&[10.0, 20.0, 30.0, 40.0]);
        let highlighter = PieHighlighter::new(&chart);
        let point = position_on_circle(chart.center(), 50.0, 10.0);
        assert_eq!(highlighter.index_at(point, 90.0, 1.0, 4), Some(3));
    }

    #[test]
    fn test_phase_divides_out_sweep() {
        let chart = chart(&[10.0, 20.0, 30.0, 40.0]);
        let highlighter = PieHighlighter::new(&chart);
        // at half phase slice 1 is drawn over 18..54
        let point = position_on_circle(chart.center(), 50.0, 30.0);
        assert_eq!(highlighter.index_at(point, 0.0, 0.5, 4), Some(1));
        assert_eq!(highlighter.index_at(point, 0.0, 0.0, 4), None);
    }

    #[test]
    fn test_zero_sum_never_hits() {
        let chart = chart(&[0.0, 0.0, 0.0]);
        let highlighter = PieHighlighter::new(&chart);
        for angle in [0.0, 120.0, 240.0] {
            let point = position_on_circle(chart.center(), 40.0, angle);
            assert_eq!(highlighter.index_at(point, 0.0, 1.0, 3), None);
        }
    }

    #[test]
    fn test_stale_index_is_no_highlight() {
        let data = Dataset::from_values(&[1.0, 2.0]);
        assert_eq!(
            Highlight::for_index(&data, 1),
            Some(Highlight {
                index: 1,
                value: 2.0
            })
        );
        assert_eq!(Highlight::for_index(&data, 2), None);
    }

    #[test]
    fn test_count_rejects_indices_beyond_entries() {
        let absolute = [36.0, 108.0, 216.0, 360.0];
        let hit = HitTest {
            center: Point::default(),
            radius: 10.0,
            rotation: 0.0,
            phase: 1.0,
        };
        let point = position_on_circle(Point::default(), 5.0, 300.0);
        assert_eq!(hit.index_at(point, &absolute, 4), Some(3));
        assert_eq!(hit.index_at(point, &absolute, 3), None);
    }
}
