use std::error::Error as StdError;
use std::thread;
use std::time::{Duration, Instant};

use twinloop_common::Color;
use twinloop_input::{EventSource, Translated, translate};
use twinloop_render::Surface;

use crate::shared::{RunFlag, SharedWorld};
use crate::world::World;

/// Timing for the two loops.
#[derive(Debug, Clone)]
pub struct DriverConfig {
    /// Wall-clock time between simulation steps.
    pub tick_interval: Duration,
    /// Ticks passed to `World::update` per step.
    pub tick_step: u32,
    /// Minimum time per presented frame. `None` relies on the display to pace itself
    /// (vsync); headless displays should set it.
    pub frame_interval: Option<Duration>,
}

impl Default for DriverConfig {
    fn default() -> Self {
        Self {
            tick_interval: Duration::from_millis(1000),
            tick_step: 1,
            frame_interval: None,
        }
    }
}

/// Errors from running the two loops.
#[derive(Debug, thiserror::Error)]
pub enum DriverError {
    #[error("display setup failed")]
    Display(#[source] Box<dyn StdError + Send + Sync>),
    #[error("failed to spawn {0} thread: {1}")]
    Spawn(&'static str, #[source] std::io::Error),
    #[error("{0} loop panicked")]
    ThreadPanicked(&'static str),
}

/// Totals reported after a clean shutdown.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub ticks: u64,
    pub frames: u64,
    pub events: u64,
}

/// Fixed-interval simulation loop. Returns the number of steps it ran.
///
/// Each step waits a full `tick_interval` after the previous one finished, so a slow
/// update delays later steps instead of bunching them up. The flag is checked after
/// every wait and no step starts once it is cleared.
pub fn run_simulation<W: World>(
    shared: &SharedWorld<W>,
    flag: &RunFlag,
    config: &DriverConfig,
) -> u64 {
    tracing::info!(
        interval_ms = config.tick_interval.as_millis() as u64,
        step = config.tick_step,
        "simulation loop started"
    );
    let mut steps = 0u64;
    loop {
        if !flag.wait_until(Instant::now() + config.tick_interval) {
            break;
        }
        shared.tick(config.tick_step);
        steps += 1;
    }
    tracing::info!(steps, "simulation loop stopped");
    steps
}

/// Presentation loop: clear, draw the front buffer, present, drain input.
///
/// Input is handed to the world with [`SharedWorld::dispatch`], which never waits on a
/// running tick.
///
/// Returns the number of frames presented once the display reports `Quit`.
pub fn run_presentation<W, D>(
    shared: &SharedWorld<W>,
    display: &mut D,
    config: &DriverConfig,
) -> u64
where
    W: World,
    D: Surface + EventSource,
{
    tracing::info!("presentation loop started");
    let mut frames = 0u64;
    loop {
        let frame_start = Instant::now();
        {
            let _span = tracing::trace_span!("frame", n = frames).entered();
            let front = shared.front();
            display.set_draw_color(Color::BLACK);
            display.clear();
            front.replay(display);
            display.present();
        }
        frames += 1;

        let mut quit = false;
        while let Some(event) = display.poll_event() {
            match translate(event) {
                Translated::Quit => quit = true,
                Translated::Input(input) => shared.dispatch(input),
                Translated::Ignored => {}
            }
        }
        if quit {
            break;
        }

        if let Some(interval) = config.frame_interval {
            let elapsed = frame_start.elapsed();
            if elapsed < interval {
                thread::sleep(interval - elapsed);
            }
        }
    }
    tracing::info!(frames, "presentation loop stopped");
    frames
}

/// Launches and joins both loops around one world.
pub struct Driver {
    config: DriverConfig,
}

impl Driver {
    pub fn new(config: DriverConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &DriverConfig {
        &self.config
    }

    /// Run until the display quits.
    ///
    /// `open_display` runs on the presentation thread, which then owns and drops the
    /// display. If it fails, presentation never starts, the simulation loop is
    /// stopped and joined, and the error is returned. Shutdown order: presentation
    /// exits, the run flag is cleared, the simulation loop is joined.
    pub fn run<W, D, F, E>(&self, world: W, open_display: F) -> Result<RunSummary, DriverError>
    where
        W: World + Send,
        D: Surface + EventSource,
        F: FnOnce() -> Result<D, E> + Send,
        E: Into<Box<dyn StdError + Send + Sync>>,
    {
        let shared = SharedWorld::new(world);
        let flag = RunFlag::new();
        let config = &self.config;

        let summary = {
            let shared = &shared;
            let flag = &flag;
            thread::scope(|s| -> Result<RunSummary, DriverError> {
                let simulation = thread::Builder::new()
                    .name("simulation".into())
                    .spawn_scoped(s, move || run_simulation(shared, flag, config))
                    .map_err(|e| DriverError::Spawn("simulation", e))?;

                let presentation = thread::Builder::new()
                    .name("presentation".into())
                    .spawn_scoped(s, move || -> Result<u64, DriverError> {
                        let mut display =
                            open_display().map_err(|e| DriverError::Display(e.into()))?;
                        Ok(run_presentation(shared, &mut display, config))
                    });
                let presentation = match presentation {
                    Ok(handle) => handle,
                    Err(e) => {
                        flag.stop();
                        let _ = simulation.join();
                        return Err(DriverError::Spawn("presentation", e));
                    }
                };

                let presented = presentation.join();
                flag.stop();
                let ticks = simulation
                    .join()
                    .map_err(|_| DriverError::ThreadPanicked("simulation"))?;
                let frames = presented.map_err(|_| DriverError::ThreadPanicked("presentation"))??;
                shared.flush();

                Ok(RunSummary {
                    ticks,
                    frames,
                    events: shared.events(),
                })
            })
        };

        match &summary {
            Ok(s) => tracing::info!(
                ticks = s.ticks,
                frames = s.frames,
                events = s.events,
                "driver finished"
            ),
            Err(e) => tracing::error!("driver failed: {e}"),
        }
        summary
    }
}
