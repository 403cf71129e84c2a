use derive_more::{Display, From, Into};
use std::cell::RefCell;
use std::rc::Rc;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, From, Into)]
pub struct SubscriptionId(u64);

pub type TickCallback = Box<dyn FnMut(f64)>;

/// Reads the host's monotonic time in seconds, in the same timebase as the
/// timestamps handed to [`Ticker::tick`].
pub type Clock = Rc<dyn Fn() -> f64>;

/// A periodic callback source delivering monotonic timestamps in seconds.
pub trait TickSource {
    fn now(&self) -> f64;
    fn subscribe(&self, callback: TickCallback) -> SubscriptionId;
    fn unsubscribe(&self, id: SubscriptionId);
}

struct Subscriber {
    id: SubscriptionId,
    callback: Option<TickCallback>,
}

#[derive(Default)]
struct TickerState {
    next_id: u64,
    last_tick: f64,
    clock: Option<Clock>,
    subscribers: Vec<Subscriber>,
}

/// Single-threaded tick hub. The host calls [`Ticker::tick`] from its
/// display-sync callback or from the fixed-rate fallback service.
///
/// Without a clock, time only advances when ticked. A host that pauses its
/// ticks while [`Ticker::is_idle`] must use [`Ticker::with_clock`], or runs
/// started after the pause would be measured from the last tick.
#[derive(Clone, Default)]
pub struct Ticker {
    state: Rc<RefCell<TickerState>>,
}

impl Ticker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_clock(clock: impl Fn() -> f64 + 'static) -> Self {
        let ticker = Self::default();
        ticker.state.borrow_mut().clock = Some(Rc::new(clock));
        ticker
    }

    /// Dispatches one tick to every subscriber. Callbacks run with the hub
    /// unborrowed, so they may subscribe or unsubscribe (including
    /// themselves) freely.
    pub fn tick(&self, timestamp: f64) {
        let (now, ids) = {
            let mut state = self.state.borrow_mut();
            if timestamp < state.last_tick {
                log::warn!(
                    "Tick went backwards ({} < {}), holding the clock",
                    timestamp,
                    state.last_tick
                );
            } else {
                state.last_tick = timestamp;
            }
            let ids: Vec<SubscriptionId> = state.subscribers.iter().map(|s| s.id).collect();
            (state.last_tick, ids)
        };

        for id in ids {
            let callback = {
                let mut state = self.state.borrow_mut();
                state
                    .subscribers
                    .iter_mut()
                    .find(|s| s.id == id)
                    .and_then(|s| s.callback.take())
            };
            let Some(mut callback) = callback else {
                continue;
            };

            callback(now);

            let leftover = {
                let mut state = self.state.borrow_mut();
                match state.subscribers.iter_mut().find(|s| s.id == id) {
                    Some(slot) => {
                        slot.callback = Some(callback);
                        None
                    }
                    None => Some(callback),
                }
            };
            // dropped outside the borrow, its captures may touch the hub
            drop(leftover);
        }
    }

    pub fn subscriber_count(&self) -> usize {
        self.state.borrow().subscribers.len()
    }

    pub fn is_idle(&self) -> bool {
        self.subscriber_count() == 0
    }
}

impl TickSource for Ticker {
    fn now(&self) -> f64 {
        let (last_tick, clock) = {
            let state = self.state.borrow();
            (state.last_tick, state.clock.clone())
        };
        clock.map_or(last_tick, |clock| clock().max(last_tick))
    }

    fn subscribe(&self, callback: TickCallback) -> SubscriptionId {
        let mut state = self.state.borrow_mut();
        let id = SubscriptionId(state.next_id);
        state.next_id += 1;
        state.subscribers.push(Subscriber {
            id,
            callback: Some(callback),
        });
        id
    }

    fn unsubscribe(&self, id: SubscriptionId) {
        let removed = {
            let mut state = self.state.borrow_mut();
            let pos = state.subscribers.iter().position(|s| s.id == id);
            pos.map(|pos| state.subscribers.remove(pos))
        };
        drop(removed);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn test_tick_delivers_timestamp() {
        let ticker = Ticker::new();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = seen.clone();
        ticker.subscribe(Box::new(move |t| sink.borrow_mut().push(t)));

        ticker.tick(0.5);
        ticker.tick(1.0);

        assert_eq!(*seen.borrow(), vec![0.5, 1.0]);
        assert_eq!(ticker.now(), 1.0);
    }

    #[test]
    fn test_backwards_tick_holds_clock() {
        let ticker = Ticker::new();
        ticker.tick(2.0);
        ticker.tick(1.0);
        assert_eq!(ticker.now(), 2.0);
    }

    #[test]
    fn test_clock_advances_between_ticks() {
        let time = Rc::new(Cell::new(0.0));
        let source = time.clone();
        let ticker = Ticker::with_clock(move || source.get());

        ticker.tick(1.0);
        assert_eq!(ticker.now(), 1.0);

        time.set(7.5);
        assert_eq!(ticker.now(), 7.5);

        // a tick ahead of the clock still wins
        ticker.tick(9.0);
        assert_eq!(ticker.now(), 9.0);
    }

    #[test]
    fn test_unsubscribe_self_during_dispatch() {
        let ticker = Ticker::new();
        let calls = Rc::new(Cell::new(0));
        let id_slot: Rc<Cell<Option<SubscriptionId>>> = Rc::new(Cell::new(None));

        let hub = ticker.clone();
        let counter = calls.clone();
        let slot = id_slot.clone();
        let id = ticker.subscribe(Box::new(move |_| {
            counter.set(counter.get() + 1);
            if let Some(id) = slot.get() {
                hub.unsubscribe(id);
            }
        }));
        id_slot.set(Some(id));

        ticker.tick(0.1);
        ticker.tick(0.2);

        assert_eq!(calls.get(), 1);
        assert!(ticker.is_idle());
    }

    #[test]
    fn test_subscribe_during_dispatch_waits_for_next_tick() {
        let ticker = Ticker::new();
        let late_calls = Rc::new(Cell::new(0));

        let hub = ticker.clone();
        let late = late_calls.clone();
        let added = Rc::new(Cell::new(false));
        ticker.subscribe(Box::new(move |_| {
            if !added.replace(true) {
                let late = late.clone();
                hub.subscribe(Box::new(move |_| late.set(late.get() + 1)));
            }
        }));

        ticker.tick(0.1);
        assert_eq!(late_calls.get(), 0);
        ticker.tick(0.2);
        assert_eq!(late_calls.get(), 1);
        assert_eq!(ticker.subscriber_count(), 2);
    }

    #[test]
    fn test_unsubscribe_other_during_dispatch_skips_it() {
        let ticker = Ticker::new();
        let second_calls = Rc::new(Cell::new(0));
        let second_id: Rc<Cell<Option<SubscriptionId>>> = Rc::new(Cell::new(None));

        let hub = ticker.clone();
        let target = second_id.clone();
        ticker.subscribe(Box::new(move |_| {
            if let Some(id) = target.get() {
                hub.unsubscribe(id);
            }
        }));
        let counter = second_calls.clone();
        second_id.set(Some(
            ticker.subscribe(Box::new(move |_| counter.set(counter.get() + 1))),
        ));

        ticker.tick(0.1);
        assert_eq!(second_calls.get(), 0);
        assert_eq!(ticker.subscriber_count(), 1);
    }
}
