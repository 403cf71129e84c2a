pub mod animator;
pub mod easing;
pub mod ticker;

pub use animator::{Animator, AnimatorEvent, AnimatorObserver};
pub use easing::{Easing, EasingFn, EasingFunction};
pub use ticker::{Clock, SubscriptionId, TickCallback, TickSource, Ticker};
