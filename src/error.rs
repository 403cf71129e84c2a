use thiserror::Error;

/// The one unrecoverable setup failure: nothing can drive animations.
#[derive(Error, Debug)]
pub enum ClockError {
    #[error("Tick source unavailable: {reason}")]
    TickSourceUnavailable { reason: String },
}

impl ClockError {
    pub fn unavailable(reason: impl Into<String>) -> Self {
        Self::TickSourceUnavailable {
            reason: reason.into(),
        }
    }
}
