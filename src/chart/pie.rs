use super::DEFAULT_HOLE_RADIUS_RATIO;
use super::angles::{AngleTable, index_for_angle};
use super::data::{Dataset, Entry};
use super::geometry::{Point, Rect, position_on_circle};

/// Capabilities every radial chart variant provides to the engine.
pub trait RadialChart {
    fn compute_angles(&self, dataset: &Dataset) -> AngleTable;
    fn radius(&self) -> f64;
    fn center(&self) -> Point;
    fn absolute_angles(&self) -> &[f64];
    fn required_base_offset(&self) -> f64;
    fn required_legend_offset(&self, legend_font_size: f64) -> f64;

    fn index_for_angle(&self, angle: f64, rotation: f64) -> Option<usize> {
        index_for_angle(angle, rotation, self.absolute_angles())
    }
}

#[derive(Debug, Clone)]
pub struct PieChart {
    dataset: Dataset,
    angles: AngleTable,
    content: Rect,
    circle_box: Rect,
    pub draws_hole: bool,
    pub hole_radius_ratio: f64,
}

impl PieChart {
    pub fn new(dataset: Dataset, content: Rect) -> Self {
        let mut chart = Self {
            dataset: Dataset::default(),
            angles: AngleTable::default(),
            content,
            circle_box: Rect::default(),
            draws_hole: false,
            hole_radius_ratio: DEFAULT_HOLE_RADIUS_RATIO,
        };
        chart.set_data(dataset);
        chart
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    pub fn angles(&self) -> &AngleTable {
        &self.angles
    }

    pub fn content_rect(&self) -> Rect {
        self.content
    }

    pub fn circle_box(&self) -> Rect {
        self.circle_box
    }

    pub fn entry_count(&self) -> usize {
        self.dataset.len()
    }

    pub fn set_data(&mut self, dataset: Dataset) {
        self.angles = self.compute_angles(&dataset);
        self.dataset = dataset;
        self.calculate_offsets();
        log::debug!(
            "Angle table recomputed for {} entries over {} degrees",
            self.angles.len(),
            self.dataset.max_angle()
        );
    }

    pub fn set_content_rect(&mut self, content: Rect) {
        self.content = content;
        self.calculate_offsets();
    }

    /// The pie is the square centred in the content area, inset by the
    /// selection shift so a highlighted slice still fits.
    fn calculate_offsets(&mut self) {
        let center = self.content.center();
        let shift = self.dataset.selection_shift;
        let side = (self.content.min_side() - 2.0 * shift).max(0.0);
        self.circle_box = Rect::new(center.x - side / 2.0, center.y - side / 2.0, side, side);
    }

    /// Slice spacing actually used for drawing: none with fewer than two
    /// visible slices, or when the spacing would swallow the thinnest one.
    pub fn effective_slice_space(&self) -> f64 {
        let space = self.dataset.slice_space();
        if self.dataset.visible_count() <= 1 {
            return 0.0;
        }
        if self.dataset.auto_disable_slice_spacing {
            let sum = self.dataset.sum();
            let thinnest = self
                .dataset
                .entries()
                .iter()
                .map(Entry::magnitude)
                .reduce(f64::min)
                .unwrap_or(0.0);
            let min_side = self.content.min_side();
            if min_side <= 0.0 || sum <= 0.0 || space / min_side > thinnest / sum * 2.0 {
                return 0.0;
            }
        }
        space
    }

    /// Anchor for the label or marker of slice `index`, halfway through its
    /// sweep and pulled in from the rim.
    pub fn slice_center_position(&self, index: usize, rotation: f64, phase: f64) -> Option<Point> {
        let draw = *self.angles.draw_angles().get(index)?;
        let absolute = *self.angles.absolute_angles().get(index)?;

        let radius = self.radius();
        let inset = if self.draws_hole {
            (radius - radius * self.hole_radius_ratio) / 2.0
        } else {
            radius / 10.0 * 3.6
        };
        let angle = (rotation + absolute - draw / 2.0) * phase;

        Some(position_on_circle(self.center(), radius - inset, angle))
    }
}

impl RadialChart for PieChart {
    fn compute_angles(&self, dataset: &Dataset) -> AngleTable {
        AngleTable::compute(dataset)
    }

    fn radius(&self) -> f64 {
        self.circle_box.width / 2.0
    }

    fn center(&self) -> Point {
        self.circle_box.center()
    }

    fn absolute_angles(&self) -> &[f64] {
        self.angles.absolute_angles()
    }

    fn required_base_offset(&self) -> f64 {
        0.0
    }

    fn required_legend_offset(&self, legend_font_size: f64) -> f64 {
        legend_font_size * 2.0
    }
}
