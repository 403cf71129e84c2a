use super::easing::EasingFn;
use super::ticker::{SubscriptionId, TickSource};
use std::cell::RefCell;
use std::rc::{Rc, Weak};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AnimatorEvent {
    Progress(f64),
    /// Sent exactly once per run, after the final progress value.
    Stopped,
}

pub type AnimatorObserver = Rc<dyn Fn(AnimatorEvent)>;

struct Run {
    start_time: f64,
    duration: f64,
    easing: Option<EasingFn>,
    subscription: SubscriptionId,
    generation: u64,
}

struct AnimatorState {
    run: Option<Run>,
    phase: f64,
    observer: Option<AnimatorObserver>,
    ticks: Rc<dyn TickSource>,
    next_generation: u64,
}

impl Drop for AnimatorState {
    fn drop(&mut self) {
        if let Some(run) = self.run.take() {
            self.ticks.unsubscribe(run.subscription);
        }
    }
}

/// Owns at most one time-phased run driven by a [`TickSource`].
///
/// The observer is always invoked with the animator unborrowed, so it may
/// call [`Animator::stop`] or [`Animator::animate`] on the same animator.
pub struct Animator {
    state: Rc<RefCell<AnimatorState>>,
}

impl Animator {
    pub fn new(ticks: Rc<dyn TickSource>) -> Self {
        Self {
            state: Rc::new(RefCell::new(AnimatorState {
                run: None,
                phase: 1.0,
                observer: None,
                ticks,
                next_generation: 0,
            })),
        }
    }

    pub fn set_observer(&self, observer: impl Fn(AnimatorEvent) + 'static) {
        self.state.borrow_mut().observer = Some(Rc::new(observer));
    }

    pub fn phase(&self) -> f64 {
        self.state.borrow().phase
    }

    pub fn is_running(&self) -> bool {
        self.state.borrow().run.is_some()
    }

    /// Starts a new run, stopping any run in flight first. A non-positive
    /// duration completes synchronously without touching the tick source.
    pub fn animate(&self, duration: f64, easing: Option<EasingFn>) {
        self.stop();

        if !duration.is_finite() || duration <= 0.0 {
            self.state.borrow_mut().phase = 1.0;
            self.notify(AnimatorEvent::Progress(1.0));
            self.notify(AnimatorEvent::Stopped);
            return;
        }

        let (ticks, generation) = {
            let mut state = self.state.borrow_mut();
            state.next_generation += 1;
            state.phase = easing.as_ref().map_or(0.0, |e| e.ease(0.0));
            (state.ticks.clone(), state.next_generation)
        };

        let weak: Weak<RefCell<AnimatorState>> = Rc::downgrade(&self.state);
        let start_time = ticks.now();
        let subscription = ticks.subscribe(Box::new(move |now| {
            if let Some(state) = weak.upgrade() {
                Animator { state }.on_tick(now);
            }
        }));

        log::debug!("Animation started: {}s from t={}", duration, start_time);

        self.state.borrow_mut().run = Some(Run {
            start_time,
            duration,
            easing,
            subscription,
            generation,
        });
    }

    /// Ends the current run: forces the phase to 1.0, then sends the
    /// terminal event. No-op when idle.
    pub fn stop(&self) {
        let (run, ticks, changed) = {
            let mut state = self.state.borrow_mut();
            let Some(run) = state.run.take() else {
                return;
            };
            let changed = state.phase != 1.0;
            state.phase = 1.0;
            (run, state.ticks.clone(), changed)
        };
        ticks.unsubscribe(run.subscription);
        log::debug!("Animation stopped (run {})", run.generation);

        if changed {
            self.notify(AnimatorEvent::Progress(1.0));
        }
        self.notify(AnimatorEvent::Stopped);
    }

    fn on_tick(&self, now: f64) {
        let (phase, finished, generation) = {
            let mut state = self.state.borrow_mut();
            let Some(run) = state.run.as_ref() else {
                return;
            };
            let elapsed = (now - run.start_time).clamp(0.0, run.duration);
            let progress = elapsed / run.duration;
            let phase = run.easing.as_ref().map_or(progress, |e| e.ease(progress));
            let finished = elapsed >= run.duration;
            let generation = run.generation;
            state.phase = phase;
            (phase, finished, generation)
        };
        log::trace!("Animation phase {:.4}", phase);

        self.notify(AnimatorEvent::Progress(phase));

        // the observer may have replaced this run
        if finished && self.current_generation() == Some(generation) {
            self.stop();
        }
    }

    fn current_generation(&self) -> Option<u64> {
        self.state.borrow().run.as_ref().map(|run| run.generation)
    }

    fn notify(&self, event: AnimatorEvent) {
        let observer = self.state.borrow().observer.clone();
        if let Some(observer) = observer {
            observer(event);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animation::easing::Easing;
    use crate::animation::ticker::Ticker;
    use std::cell::Cell;

    fn recorded(animator: &Animator) -> Rc<RefCell<Vec<AnimatorEvent>>> {
        let events = Rc::new(RefCell::new(Vec::new()));
        let sink = events.clone();
        animator.set_observer(move |e| sink.borrow_mut().push(e));
        events
    }

    fn stopped_count(events: &[AnimatorEvent]) -> usize {
        events
            .iter()
            .filter(|e| **e == AnimatorEvent::Stopped)
            .count()
    }

    #[test]
    fn test_phase_follows_linear_progress() {
        let ticker = Ticker::new();
        let animator = Animator::new(Rc::new(ticker.clone()));
        let events = recorded(&animator);

        animator.animate(1.0, None);
        assert_eq!(animator.phase(), 0.0);

        ticker.tick(0.25);
        assert_eq!(animator.phase(), 0.25);
        ticker.tick(0.5);
        assert_eq!(animator.phase(), 0.5);
        ticker.tick(1.5);

        assert_eq!(animator.phase(), 1.0);
        assert!(!animator.is_running());
        assert!(ticker.is_idle());
        assert_eq!(
            *events.borrow(),
            vec![
                AnimatorEvent::Progress(0.25),
                AnimatorEvent::Progress(0.5),
                AnimatorEvent::Progress(1.0),
                AnimatorEvent::Stopped,
            ]
        );
    }

    #[test]
    fn test_easing_applied_to_progress() {
        let ticker = Ticker::new();
        let animator = Animator::new(Rc::new(ticker.clone()));
        animator.animate(2.0, Some(Easing::EaseInQuad.into()));

        ticker.tick(1.0);
        assert_eq!(animator.phase(), 0.25);
    }

    #[test]
    fn test_stop_mid_flight_finalizes_phase() {
        let ticker = Ticker::new();
        let animator = Animator::new(Rc::new(ticker.clone()));
        let events = recorded(&animator);

        animator.animate(1.0, None);
        ticker.tick(0.4);
        animator.stop();
        animator.stop();
        ticker.tick(0.6);

        assert_eq!(animator.phase(), 1.0);
        let events = events.borrow();
        assert_eq!(stopped_count(&events), 1);
        assert_eq!(
            events[events.len() - 2..],
            [AnimatorEvent::Progress(1.0), AnimatorEvent::Stopped]
        );
    }

    #[test]
    fn test_stop_when_idle_is_silent() {
        let ticker = Ticker::new();
        let animator = Animator::new(Rc::new(ticker));
        let events = recorded(&animator);
        animator.stop();
        assert!(events.borrow().is_empty());
        assert_eq!(animator.phase(), 1.0);
    }

    #[test]
    fn test_zero_duration_completes_synchronously() {
        let ticker = Ticker::new();
        let animator = Animator::new(Rc::new(ticker.clone()));
        let events = recorded(&animator);

        animator.animate(0.0, Some(Easing::EaseOutBounce.into()));

        assert!(ticker.is_idle());
        assert!(!animator.is_running());
        assert_eq!(
            *events.borrow(),
            vec![AnimatorEvent::Progress(1.0), AnimatorEvent::Stopped]
        );
    }

    #[test]
    fn test_animate_replaces_run_in_flight() {
        let ticker = Ticker::new();
        let animator = Animator::new(Rc::new(ticker.clone()));
        let events = recorded(&animator);

        animator.animate(1.0, None);
        ticker.tick(0.5);
        animator.animate(1.0, None);

        assert_eq!(ticker.subscriber_count(), 1);
        assert_eq!(stopped_count(&events.borrow()), 1);

        ticker.tick(1.0);
        assert_eq!(animator.phase(), 0.5);
    }

    #[test]
    fn test_stop_from_inside_progress_notification() {
        let ticker = Ticker::new();
        let animator = Rc::new(Animator::new(Rc::new(ticker.clone())));
        let stops = Rc::new(Cell::new(0));

        let weak = Rc::downgrade(&animator);
        let counter = stops.clone();
        animator.set_observer(move |e| match e {
            AnimatorEvent::Progress(p) if p < 1.0 => {
                if let Some(animator) = weak.upgrade() {
                    animator.stop();
                }
            }
            AnimatorEvent::Stopped => counter.set(counter.get() + 1),
            _ => {}
        });

        animator.animate(1.0, None);
        ticker.tick(0.3);

        assert_eq!(stops.get(), 1);
        assert_eq!(animator.phase(), 1.0);
        assert!(ticker.is_idle());
    }

    #[test]
    fn test_stop_from_inside_terminal_notification() {
        let ticker = Ticker::new();
        let animator = Rc::new(Animator::new(Rc::new(ticker.clone())));
        let events = Rc::new(RefCell::new(Vec::new()));

        let weak = Rc::downgrade(&animator);
        let sink = events.clone();
        animator.set_observer(move |e| {
            sink.borrow_mut().push(e);
            if e == AnimatorEvent::Stopped
                && let Some(animator) = weak.upgrade()
            {
                animator.stop();
            }
        });

        animator.animate(1.0, None);
        ticker.tick(0.5);
        animator.stop();

        assert_eq!(
            *events.borrow(),
            vec![
                AnimatorEvent::Progress(0.5),
                AnimatorEvent::Progress(1.0),
                AnimatorEvent::Stopped,
            ]
        );
        assert!(!animator.is_running());
        assert!(ticker.is_idle());
    }

    #[test]
    fn test_run_started_after_idle_gap_measures_from_start() {
        let time = Rc::new(Cell::new(0.0));
        let source = time.clone();
        let ticker = Ticker::with_clock(move || source.get());
        let animator = Animator::new(Rc::new(ticker.clone()));
        let events = recorded(&animator);

        ticker.tick(0.0);
        // host stops ticking while nothing is subscribed
        time.set(9.5);
        animator.animate(1.0, None);
        ticker.tick(10.0);

        assert_eq!(animator.phase(), 0.5);
        assert!(animator.is_running());
        assert_eq!(*events.borrow(), vec![AnimatorEvent::Progress(0.5)]);

        ticker.tick(10.5);
        assert!(!animator.is_running());
        assert_eq!(stopped_count(&events.borrow()), 1);
    }

    #[test]
    fn test_chained_animate_from_terminal_notification() {
        let ticker = Ticker::new();
        let animator = Rc::new(Animator::new(Rc::new(ticker.clone())));
        let runs = Rc::new(Cell::new(0));

        let weak = Rc::downgrade(&animator);
        let counter = runs.clone();
        animator.set_observer(move |e| {
            if e == AnimatorEvent::Stopped {
                counter.set(counter.get() + 1);
                if counter.get() < 2
                    && let Some(animator) = weak.upgrade()
                {
                    animator.animate(1.0, None);
                }
            }
        });

        animator.animate(1.0, None);
        ticker.tick(1.0);

        assert_eq!(runs.get(), 1);
        assert!(animator.is_running());
        assert_eq!(ticker.subscriber_count(), 1);

        ticker.tick(2.0);
        assert_eq!(runs.get(), 2);
        assert!(ticker.is_idle());
    }

    #[test]
    fn test_drop_releases_subscription() {
        let ticker = Ticker::new();
        {
            let animator = Animator::new(Rc::new(ticker.clone()));
            animator.animate(1.0, None);
            assert_eq!(ticker.subscriber_count(), 1);
        }
        assert!(ticker.is_idle());
        ticker.tick(0.5);
    }
}
