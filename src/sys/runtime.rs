use crate::error::ClockError;
use crate::events::AppEvent;
use async_channel::Sender;
use std::thread;
use std::time::{Duration, Instant};
use tokio::runtime::Runtime;
use tokio::time::MissedTickBehavior;

/// Starts the fixed-rate tick fallback (and optionally the config watcher)
/// on a background tokio runtime. Ticks arrive as [`AppEvent::Tick`] with
/// seconds since `origin`, the instant the host's clock also counts from;
/// Ctrl-C arrives as [`AppEvent::Quit`].
///
/// Fails before any tick is sent if the rate is unusable or the runtime
/// cannot be built.
pub fn start_background_services(
    tx: Sender<AppEvent>,
    origin: Instant,
    rate_hz: f64,
    watch_config: bool,
) -> Result<(), ClockError> {
    if !rate_hz.is_finite() || rate_hz <= 0.0 {
        return Err(ClockError::unavailable(format!(
            "tick rate must be a positive number of Hz, got {rate_hz}"
        )));
    }
    let period = Duration::from_secs_f64(1.0 / rate_hz);
    if period.is_zero() {
        return Err(ClockError::unavailable(format!(
            "tick rate {rate_hz} Hz is too fast"
        )));
    }

    let (ready_tx, ready_rx) = async_channel::bounded::<Result<(), String>>(1);

    thread::Builder::new()
        .name("rotary-ticks".into())
        .spawn(move || {
            let rt = match Runtime::new() {
                Ok(rt) => rt,
                Err(e) => {
                    let _ = ready_tx.send_blocking(Err(e.to_string()));
                    return;
                }
            };
            let _ = ready_tx.send_blocking(Ok(()));

            rt.block_on(async {
                {
                    let tx = tx.clone();
                    tokio::spawn(async move {
                        if tokio::signal::ctrl_c().await.is_ok() {
                            let _ = tx.send(AppEvent::Quit).await;
                        }
                    });
                }

                if watch_config {
                    let tx = tx.clone();
                    tokio::spawn(async move {
                        crate::config::run_async_watcher(tx).await;
                    });
                }

                run_ticks(tx, origin, period).await;
            });
        })
        .map_err(|e| ClockError::unavailable(e.to_string()))?;

    match ready_rx.recv_blocking() {
        Ok(Ok(())) => {
            log::debug!("Tick service running at {} Hz", rate_hz);
            Ok(())
        }
        Ok(Err(reason)) => Err(ClockError::unavailable(reason)),
        Err(_) => Err(ClockError::unavailable("tick thread exited during startup")),
    }
}

async fn run_ticks(tx: Sender<AppEvent>, origin: Instant, period: Duration) {
    let mut interval = tokio::time::interval(period);
    interval.set_missed_tick_behavior(MissedTickBehavior::Skip);

    loop {
        interval.tick().await;
        let t = origin.elapsed().as_secs_f64();
        if tx.send(AppEvent::Tick(t)).await.is_err() {
            log::debug!("Tick receiver gone, stopping tick service");
            break;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_rate_is_reported_up_front() {
        for rate in [0.0, -60.0, f64::NAN, f64::INFINITY] {
            let (tx, _rx) = async_channel::unbounded();
            let err = start_background_services(tx, Instant::now(), rate, false).unwrap_err();
            assert!(matches!(err, ClockError::TickSourceUnavailable { .. }));
        }
    }

    #[test]
    fn test_ticks_are_monotonic() {
        let (tx, rx) = async_channel::bounded(8);
        start_background_services(tx, Instant::now(), 200.0, false).unwrap();

        let mut last = -1.0;
        for _ in 0..3 {
            match rx.recv_blocking().unwrap() {
                AppEvent::Tick(t) => {
                    assert!(t >= last);
                    last = t;
                }
                other => panic!("unexpected event {other:?}"),
            }
        }
        drop(rx);
    }
}
