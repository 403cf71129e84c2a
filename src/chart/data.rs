use super::{DEFAULT_SELECTION_SHIFT, FULL_SWEEP, MAX_SLICE_SPACE, MIN_SWEEP};
use derive_more::{AsRef, Deref, Display, From, Into};
use serde::{Deserialize, Serialize};

#[derive(
    Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Display, Deref, From, Into, AsRef,
)]
#[serde(transparent)]
pub struct EntryLabel(String);

impl EntryLabel {
    pub fn new(s: impl Into<String>) -> Self {
        Self(s.into())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entry {
    pub value: f64,
    #[serde(default)]
    pub label: Option<EntryLabel>,
}

impl Entry {
    pub fn new(value: f64) -> Self {
        Self { value, label: None }
    }

    pub fn labeled(value: f64, label: impl Into<String>) -> Self {
        Self {
            value,
            label: Some(EntryLabel::new(label)),
        }
    }

    /// Absolute value; `NaN` and infinities count as nothing.
    pub fn magnitude(&self) -> f64 {
        if self.value.is_finite() {
            self.value.abs()
        } else {
            0.0
        }
    }
}

/// Ordered slices plus the presentation knobs the geometry reads.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    entries: Vec<Entry>,
    max_angle: f64,
    slice_space: f64,
    pub selection_shift: f64,
    pub auto_disable_slice_spacing: bool,
}

impl Default for Dataset {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
            max_angle: FULL_SWEEP,
            slice_space: 0.0,
            selection_shift: DEFAULT_SELECTION_SHIFT,
            auto_disable_slice_spacing: false,
        }
    }
}

impl Dataset {
    pub fn new(entries: Vec<Entry>) -> Self {
        Self {
            entries,
            ..Self::default()
        }
    }

    pub fn from_values(values: &[f64]) -> Self {
        Self::new(values.iter().copied().map(Entry::new).collect())
    }

    pub fn with_max_angle(mut self, max_angle: f64) -> Self {
        self.set_max_angle(max_angle);
        self
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn entry(&self, index: usize) -> Option<&Entry> {
        self.entries.get(index)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn add_entry(&mut self, entry: Entry) {
        self.entries.push(entry);
    }

    /// Sum of finite absolute magnitudes.
    pub fn sum(&self) -> f64 {
        self.entries.iter().map(Entry::magnitude).sum()
    }

    pub fn y_min(&self) -> Option<f64> {
        self.entries.iter().map(|e| e.value).reduce(f64::min)
    }

    pub fn y_max(&self) -> Option<f64> {
        self.entries.iter().map(|e| e.value).reduce(f64::max)
    }

    pub fn visible_count(&self) -> usize {
        self.entries.iter().filter(|e| e.magnitude() > 0.0).count()
    }

    pub fn max_angle(&self) -> f64 {
        self.max_angle
    }

    pub fn set_max_angle(&mut self, max_angle: f64) {
        let clamped = if max_angle.is_nan() {
            FULL_SWEEP
        } else {
            max_angle.clamp(MIN_SWEEP, FULL_SWEEP)
        };
        if clamped != max_angle {
            log::warn!("Sweep angle {} clamped to {}", max_angle, clamped);
        }
        self.max_angle = clamped;
    }

    pub fn slice_space(&self) -> f64 {
        self.slice_space
    }

    pub fn set_slice_space(&mut self, space: f64) {
        let clamped = if space.is_nan() {
            0.0
        } else {
            space.clamp(0.0, MAX_SLICE_SPACE)
        };
        if clamped != space {
            log::warn!("Slice space {} clamped to {}", space, clamped);
        }
        self.slice_space = clamped;
    }
}
