pub mod angles;
pub mod data;
pub mod geometry;
pub mod highlight;
pub mod pie;
pub mod rotation;
pub mod theme;

pub use angles::AngleTable;
pub use data::{Dataset, Entry, EntryLabel};
pub use geometry::{Point, Rect};
pub use highlight::{Highlight, HitTest, PieHighlighter};
pub use pie::{PieChart, RadialChart};
pub use rotation::{Rotation, RotationState};
pub use theme::{AssetProvider, BundledAssets, ChartColors, ColorTemplate};

pub const FULL_SWEEP: f64 = 360.0;
pub const MIN_SWEEP: f64 = 90.0;
pub const MAX_SLICE_SPACE: f64 = 20.0;
pub const DEFAULT_SELECTION_SHIFT: f64 = 18.0;
pub const DEFAULT_HOLE_RADIUS_RATIO: f64 = 0.5;
