use anyhow::Context;
use async_channel::Receiver;
use clap::{Parser, Subcommand};
use rotary::animation::{Easing, Ticker};
use rotary::chart::geometry::position_on_circle;
use rotary::chart::theme::color_to_hex;
use rotary::chart::{Dataset, Point, RadialChart, Rect};
use rotary::config;
use rotary::engine::{ChartEngine, ChartEvent};
use rotary::events::{AppEvent, PointerEvent, PointerKind};
use rotary::gesture::GestureOutcome;
use rotary::sys::runtime;
use std::rc::Rc;
use std::time::Instant;

#[derive(Parser, Debug)]
#[command(version, about = "Drive a radial chart engine from the terminal", long_about = None)]
struct Args {
    /// Slice magnitudes in order (e.g., "10,20,30,40")
    #[arg(
        long,
        value_delimiter = ',',
        default_value = "10,20,30,40",
        allow_negative_numbers = true
    )]
    values: Vec<f64>,

    /// Total sweep of the pie in degrees, 90 to 360
    #[arg(long, default_value_t = 360.0)]
    max_angle: f64,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the draw angle, absolute angle and fill of every slice
    Angles,
    /// Print the slice under a point of the 400x400 canvas
    Hit {
        #[arg(long, allow_negative_numbers = true)]
        x: f64,
        #[arg(long, allow_negative_numbers = true)]
        y: f64,
    },
    /// Spin the chart between two angles
    Spin {
        #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
        from: f64,
        #[arg(long, default_value_t = 360.0, allow_negative_numbers = true)]
        to: f64,
        #[arg(long, default_value_t = 1.0)]
        duration: f64,
        /// Easing name (e.g., "easeOutBack")
        #[arg(long)]
        easing: Option<Easing>,
    },
    /// Let the chart coast from an angular velocity in degrees per second
    Flick {
        #[arg(long, default_value_t = 300.0, allow_negative_numbers = true)]
        velocity: f64,
    },
    /// Sweep the slices in
    Animate {
        #[arg(long)]
        duration: Option<f64>,
        #[arg(long)]
        easing: Option<Easing>,
    },
    /// Drag the chart around an arc and release it
    Drag {
        /// Degrees dragged, negative for counter-clockwise
        #[arg(long, default_value_t = 90.0, allow_negative_numbers = true)]
        sweep: f64,
        /// Seconds the drag takes
        #[arg(long, default_value_t = 0.2)]
        duration: f64,
    },
    /// Write the default config file if none exists
    InitConfig,
}

const CANVAS: Rect = Rect {
    origin: Point { x: 0.0, y: 0.0 },
    width: 400.0,
    height: 400.0,
};

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    if let Command::InitConfig = args.command {
        let path = config::write_default_config().context("Failed to write default config")?;
        println!("{}", path.display());
        return Ok(());
    }

    let config = config::load_or_default();
    let dataset = Dataset::from_values(&args.values).with_max_angle(args.max_angle);
    let origin = Instant::now();
    let ticker = Ticker::with_clock(move || origin.elapsed().as_secs_f64());
    let mut engine = ChartEngine::new(&config, dataset, CANVAS, Rc::new(ticker.clone()));

    engine.set_listener(|event| match event {
        ChartEvent::RedrawRequested => log::trace!("Redraw requested"),
        ChartEvent::ValueSelected { entry, highlight } => {
            log::info!("Selected slice {} ({})", highlight.index, entry.value)
        }
        ChartEvent::NothingSelected => log::info!("Selection cleared"),
    });

    match args.command {
        Command::Angles => {
            for (i, (draw, absolute)) in engine
                .draw_angles()
                .iter()
                .zip(engine.absolute_angles())
                .enumerate()
            {
                let color = engine
                    .slice_color(i)
                    .map_or_else(|| "-".to_string(), color_to_hex);
                println!("{i}\tdraw {draw:.4}\tabsolute {absolute:.4}\tcolor {color}");
            }
            return Ok(());
        }
        Command::Hit { x, y } => {
            let point = Point::new(x, y);
            println!(
                "angle {:.4}\tdistance {:.4}",
                engine.angle_for_point(point),
                engine.distance_to_center(point)
            );
            match engine.get_highlight(point) {
                Some(h) => println!("slice {} ({})", h.index, h.value),
                None => println!("no slice"),
            }
            return Ok(());
        }
        Command::InitConfig => return Ok(()),
        _ => {}
    }

    let (tx, rx) = async_channel::bounded(32);
    runtime::start_background_services(tx, origin, config.ticks.rate_hz, true)
        .context("Cannot drive animations")?;

    let mut drag = None;
    match args.command {
        Command::Spin {
            from,
            to,
            duration,
            easing,
        } => engine.spin(duration, from, to, easing.map(Into::into)),
        Command::Flick { velocity } => {
            if !engine.start_deceleration(velocity) {
                println!("{velocity} deg/s is too slow to coast");
                return Ok(());
            }
        }
        Command::Animate { duration, easing } => match (duration, easing) {
            (None, None) => engine.animate_default(),
            (duration, easing) => engine.animate(
                duration.unwrap_or(config.animation.duration),
                Some(easing.unwrap_or(config.animation.easing).into()),
            ),
        },
        Command::Drag { sweep, duration } => drag = Some(DragScript::new(sweep, duration)),
        _ => {}
    }

    run_event_loop(&mut engine, &ticker, &rx, drag)?;

    println!(
        "rotation {:.4} (raw {:.4})\tphase {:.4}",
        engine.rotation_angle(),
        engine.raw_rotation_angle(),
        engine.current_phase()
    );
    Ok(())
}

fn run_event_loop(
    engine: &mut ChartEngine,
    ticker: &Ticker,
    rx: &Receiver<AppEvent>,
    mut drag: Option<DragScript>,
) -> anyhow::Result<()> {
    loop {
        match rx.recv_blocking().context("Tick service stopped")? {
            AppEvent::Tick(t) => {
                ticker.tick(t);
                if let Some(script) = drag.as_mut()
                    && let Some(event) = script.next_event(engine.chart(), t)
                {
                    report_gesture(engine.handle_pointer(event));
                }
                log::info!(
                    "t={:.3}\trotation {:.2}\tphase {:.3}",
                    t,
                    engine.rotation_angle(),
                    engine.current_phase()
                );
            }
            AppEvent::Pointer(event) => report_gesture(engine.handle_pointer(event)),
            AppEvent::ConfigReload => {
                log::info!("Config changed, reloading");
                engine.apply_config(&config::load_or_default());
            }
            AppEvent::Quit => break,
        }

        let dragging = drag.as_ref().is_some_and(|d| !d.is_finished());
        if !dragging && !engine.is_busy() {
            break;
        }
    }
    Ok(())
}

fn report_gesture(outcome: GestureOutcome) {
    match outcome {
        GestureOutcome::Rotated {
            velocity,
            decelerating,
        } => log::info!(
            "Released at {:.1} deg/s{}",
            velocity,
            if decelerating { ", coasting" } else { "" }
        ),
        GestureOutcome::Tap(point) => log::info!("Tap at ({:.1}, {:.1})", point.x, point.y),
        GestureOutcome::None => {}
    }
}

/// Synthesizes a one-finger drag along an arc, timed by the ticks.
struct DragScript {
    sweep: f64,
    duration: f64,
    started_at: Option<f64>,
    finished: bool,
}

impl DragScript {
    fn new(sweep: f64, duration: f64) -> Self {
        Self {
            sweep,
            duration: duration.max(0.0),
            started_at: None,
            finished: false,
        }
    }

    fn is_finished(&self) -> bool {
        self.finished
    }

    fn next_event(&mut self, chart: &impl RadialChart, t: f64) -> Option<PointerEvent> {
        if self.finished {
            return None;
        }
        let at = |angle: f64| position_on_circle(chart.center(), chart.radius() * 0.6, angle);

        let Some(start) = self.started_at else {
            self.started_at = Some(t);
            return Some(PointerEvent::new(PointerKind::Begin, at(0.0), t));
        };

        let progress = if self.duration > 0.0 {
            ((t - start) / self.duration).min(1.0)
        } else {
            1.0
        };
        let point = at(self.sweep * progress);

        if progress >= 1.0 {
            self.finished = true;
            Some(PointerEvent::new(PointerKind::End, point, t))
        } else {
            Some(PointerEvent::new(PointerKind::Move, point, t))
        }
    }
}
