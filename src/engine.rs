use crate::animation::{Animator, AnimatorEvent, EasingFn, TickSource};
use crate::chart::geometry::{angle_for_point, distance_to_center};
use crate::chart::{
    AssetProvider, BundledAssets, ChartColors, ColorTemplate, Dataset, Entry, Highlight,
    PieChart, PieHighlighter, Point, RadialChart, Rect, Rotation,
};
use crate::config::{AnimationConfig, EngineConfig};
use crate::events::{PointerEvent, PointerKind};
use crate::gesture::{GestureController, GestureOutcome};
use palette::Srgba;
use std::cell::{Cell, RefCell};
use std::rc::Rc;

#[derive(Debug, Clone, PartialEq)]
pub enum ChartEvent {
    RedrawRequested,
    ValueSelected { entry: Entry, highlight: Highlight },
    NothingSelected,
}

type Listener = Rc<dyn Fn(&ChartEvent)>;

#[derive(Clone, Default)]
struct ListenerSlot(Rc<RefCell<Option<Listener>>>);

impl ListenerSlot {
    fn emit(&self, event: &ChartEvent) {
        let listener = self.0.borrow().clone();
        if let Some(listener) = listener {
            listener(event);
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct SpinRun {
    from: f64,
    to: f64,
}

/// The interaction engine behind one pie chart view: rotation, sweep-in and
/// spin animations, gestures and slice selection.
pub struct ChartEngine {
    chart: PieChart,
    rotation: Rotation,
    sweep: Animator,
    spinner: Animator,
    spin: Rc<Cell<Option<SpinRun>>>,
    gestures: GestureController,
    highlighted: Option<Highlight>,
    last_highlighted: Option<Highlight>,
    highlight_per_tap: bool,
    animation: AnimationConfig,
    assets: Rc<dyn AssetProvider>,
    template: ColorTemplate,
    colors: ChartColors,
    slice_colors: Vec<Srgba<f64>>,
    listener: ListenerSlot,
}

impl ChartEngine {
    pub fn new(
        config: &EngineConfig,
        dataset: Dataset,
        content: Rect,
        ticks: Rc<dyn TickSource>,
    ) -> Self {
        let listener = ListenerSlot::default();
        let chart = PieChart::new(dataset, content);

        let rotation = Rotation::new(config.rotation_angle);
        {
            let listener = listener.clone();
            rotation.set_listener(move |_| listener.emit(&ChartEvent::RedrawRequested));
        }

        let sweep = Animator::new(ticks.clone());
        {
            let listener = listener.clone();
            sweep.set_observer(move |event| {
                if let AnimatorEvent::Progress(_) = event {
                    listener.emit(&ChartEvent::RedrawRequested);
                }
            });
        }

        let spin: Rc<Cell<Option<SpinRun>>> = Rc::new(Cell::new(None));
        let spinner = Animator::new(ticks.clone());
        {
            let spin = spin.clone();
            let rotation = rotation.clone();
            spinner.set_observer(move |event| match event {
                AnimatorEvent::Progress(phase) => {
                    if let Some(run) = spin.get() {
                        rotation.set_raw(run.from + (run.to - run.from) * phase);
                    }
                }
                AnimatorEvent::Stopped => spin.set(None),
            });
        }

        let mut gestures =
            GestureController::new(rotation.clone(), ticks, config.gesture_settings());
        gestures.set_center(chart.center());

        let assets: Rc<dyn AssetProvider> = Rc::new(BundledAssets::default());
        let colors = ChartColors::from_provider(assets.as_ref());
        let slice_colors = config.color_template.colors(assets.as_ref());

        Self {
            chart,
            rotation,
            sweep,
            spinner,
            spin,
            gestures,
            highlighted: None,
            last_highlighted: None,
            highlight_per_tap: config.highlight_per_tap,
            animation: config.animation.clone(),
            assets,
            template: config.color_template,
            colors,
            slice_colors,
            listener,
        }
    }

    pub fn set_listener(&self, listener: impl Fn(&ChartEvent) + 'static) {
        *self.listener.0.borrow_mut() = Some(Rc::new(listener));
    }

    /// Applies a reloaded config. Rotation and running animations are kept.
    pub fn apply_config(&mut self, config: &EngineConfig) {
        self.gestures.set_settings(config.gesture_settings());
        self.highlight_per_tap = config.highlight_per_tap;
        self.animation = config.animation.clone();
        if config.color_template != self.template {
            self.template = config.color_template;
            self.resolve_colors();
        }
        log::debug!("Engine config applied");
    }

    /// Swaps the source of named colors, e.g. for a host theme.
    pub fn set_asset_provider(&mut self, assets: Rc<dyn AssetProvider>) {
        self.assets = assets;
        self.resolve_colors();
    }

    fn resolve_colors(&mut self) {
        self.colors = ChartColors::from_provider(self.assets.as_ref());
        self.slice_colors = self.template.colors(self.assets.as_ref());
        if self.slice_colors.is_empty() {
            log::warn!("No colors found for template {}", self.template);
        }
        self.redraw();
    }

    pub fn colors(&self) -> &ChartColors {
        &self.colors
    }

    /// Fill for a slice, cycling through the template.
    pub fn slice_color(&self, index: usize) -> Option<Srgba<f64>> {
        if self.slice_colors.is_empty() {
            return None;
        }
        self.slice_colors
            .get(index % self.slice_colors.len())
            .copied()
    }

    pub fn chart(&self) -> &PieChart {
        &self.chart
    }

    pub fn dataset(&self) -> &Dataset {
        self.chart.dataset()
    }

    /// Replaces the data. Rotation carries over; a highlight that no longer
    /// resolves is dropped.
    pub fn set_data(&mut self, dataset: Dataset) {
        self.chart.set_data(dataset);
        self.gestures.set_center(self.chart.center());
        self.highlighted = self
            .highlighted
            .and_then(|h| Highlight::for_index(self.chart.dataset(), h.index));
        self.redraw();
    }

    pub fn set_content_rect(&mut self, content: Rect) {
        self.chart.set_content_rect(content);
        self.gestures.set_center(self.chart.center());
        self.redraw();
    }

    pub fn rotation_angle(&self) -> f64 {
        self.rotation.normalized()
    }

    pub fn raw_rotation_angle(&self) -> f64 {
        self.rotation.raw()
    }

    pub fn set_rotation_angle(&self, angle: f64) {
        self.rotation.set_raw(angle);
    }

    pub fn draw_angles(&self) -> &[f64] {
        self.chart.angles().draw_angles()
    }

    pub fn absolute_angles(&self) -> &[f64] {
        self.chart.angles().absolute_angles()
    }

    pub fn current_phase(&self) -> f64 {
        self.sweep.phase()
    }

    /// Sweeps the slices in from nothing.
    pub fn animate(&self, duration: f64, easing: Option<EasingFn>) {
        self.sweep.animate(duration, easing);
    }

    pub fn animate_default(&self) {
        self.animate(self.animation.duration, Some(self.animation.easing.into()));
    }

    /// Rotates from `from` to `to` degrees, replacing any spin in progress.
    pub fn spin(&mut self, duration: f64, from: f64, to: f64, easing: Option<EasingFn>) {
        self.spinner.stop();
        self.gestures.stop_deceleration();

        log::debug!("Spinning from {} to {} over {}s", from, to, duration);
        self.rotation.set_raw(from);
        self.spin.set(Some(SpinRun { from, to }));
        self.spinner.animate(duration, easing);
    }

    /// Ends the spin at its target angle.
    pub fn stop_spin_animation(&self) {
        self.spinner.stop();
    }

    pub fn start_deceleration(&mut self, velocity: f64) -> bool {
        self.spinner.stop();
        self.gestures.start_deceleration(velocity)
    }

    pub fn stop_deceleration(&mut self) {
        self.gestures.stop_deceleration();
    }

    pub fn is_animating(&self) -> bool {
        self.sweep.is_running()
    }

    pub fn is_spinning(&self) -> bool {
        self.spinner.is_running()
    }

    pub fn is_decelerating(&self) -> bool {
        self.gestures.is_decelerating()
    }

    pub fn is_busy(&self) -> bool {
        self.is_animating() || self.is_spinning() || self.is_decelerating()
    }

    pub fn distance_to_center(&self, point: Point) -> f64 {
        distance_to_center(point, self.chart.center())
    }

    pub fn angle_for_point(&self, point: Point) -> f64 {
        angle_for_point(point, self.chart.center())
    }

    pub fn get_highlight(&self, point: Point) -> Option<Highlight> {
        PieHighlighter::new(&self.chart).highlight_at(
            self.chart.dataset(),
            point,
            self.rotation.normalized(),
            self.sweep.phase(),
        )
    }

    pub fn slice_center_position(&self, index: usize) -> Option<Point> {
        self.chart
            .slice_center_position(index, self.rotation.normalized(), self.sweep.phase())
    }

    pub fn handle_pointer(&mut self, event: PointerEvent) -> GestureOutcome {
        let PointerEvent {
            kind,
            point,
            timestamp,
        } = event;

        match kind {
            PointerKind::Begin => {
                // freeze the spin where it is rather than at its target
                self.spin.set(None);
                self.spinner.stop();
                self.gestures.begin(point, timestamp);
                GestureOutcome::None
            }
            PointerKind::Move => {
                self.gestures.moved(point, timestamp);
                GestureOutcome::None
            }
            PointerKind::End => {
                let outcome = self.gestures.end(point, timestamp);
                if let GestureOutcome::Tap(at) = outcome
                    && self.highlight_per_tap
                {
                    self.tap(at);
                }
                outcome
            }
            PointerKind::Cancel => {
                self.gestures.cancel();
                GestureOutcome::None
            }
        }
    }

    /// Tapping the selected slice again clears the selection.
    fn tap(&mut self, point: Point) {
        let hit = self.get_highlight(point);
        if hit.is_none() || hit == self.last_highlighted {
            self.highlight_value(None, true);
            self.last_highlighted = None;
        } else {
            self.highlight_value(hit, true);
        }
    }

    pub fn highlighted(&self) -> Option<Highlight> {
        self.highlighted
    }

    pub fn last_highlighted(&self) -> Option<Highlight> {
        self.last_highlighted
    }

    pub fn needs_highlight(&self, index: usize) -> bool {
        self.highlighted.is_some_and(|h| h.index == index)
    }

    /// Selects a slice, or clears the selection with `None` or a stale
    /// index. With `notify` the listener hears about the change.
    pub fn highlight_value(&mut self, highlight: Option<Highlight>, notify: bool) {
        let resolved = highlight.and_then(|h| {
            Highlight::for_index(self.chart.dataset(), h.index)
                .zip(self.chart.dataset().entry(h.index).cloned())
        });

        self.highlighted = resolved.as_ref().map(|(h, _)| *h);
        self.last_highlighted = highlight;

        if notify {
            let event = match resolved {
                Some((highlight, entry)) => ChartEvent::ValueSelected { entry, highlight },
                None => ChartEvent::NothingSelected,
            };
            self.listener.emit(&event);
        }
        self.redraw();
    }

    fn redraw(&self) {
        self.listener.emit(&ChartEvent::RedrawRequested);
    }
}
