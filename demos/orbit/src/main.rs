//! orbit — smallest runnable example for the framebeat scheduler.
//!
//! Three planets circle at different speeds while an observatory, weighted
//! to run first every frame, periodically eclipses the innermost one and
//! launches a short-lived comet.  Frames are paced in real time at the
//! configured nominal interval.
//!
//! ```text
//! cargo run -p orbit -- demos/orbit/orbit.toml
//! ```

mod config;
mod scripts;

use std::path::Path;
use std::time::Instant;

use anyhow::Result;
use fb_behavior::Scheduler;
use fb_driver::{PacedHost, TickDriver};
use fb_output::{CsvTraceWriter, TraceObserver};
use tracing::info;
use tracing_subscriber::EnvFilter;

use config::DemoConfig;
use scripts::{Observatory, Planet};

// ── Constants ─────────────────────────────────────────────────────────────────

const OBSERVATORY_WEIGHT: i64 = 100;
const COMET_WEIGHT:       i64 = 50;
const ECLIPSE_MS:         f64 = 640.0;
const COMET_AT_MS:        f64 = 1_000.0;

fn main() -> Result<()> {
    let config = match std::env::args().nth(1) {
        Some(path) => DemoConfig::load(Path::new(&path))?,
        None       => DemoConfig::default(),
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.log_filter)),
        )
        .init();

    info!(frames = config.frames, nominal_frame_ms = config.scheduler.nominal_frame_ms, "orbit starting");

    // ── Scheduler + behaviors ─────────────────────────────────────────────
    let scheduler = Scheduler::with_config(config.scheduler.clone());

    let mercury = scheduler.builder(Planet::new("mercury", 0.9)).weight(3).spawn()?;
    let venus   = scheduler.builder(Planet::new("venus", 2.3)).weight(2).spawn()?;
    let earth   = scheduler.builder(Planet::new("earth", 3.7)).weight(1).spawn()?;
    let _observatory = scheduler
        .builder(Observatory::new(mercury.downgrade(), ECLIPSE_MS, COMET_AT_MS, COMET_WEIGHT))
        .weight(OBSERVATORY_WEIGHT)
        .spawn()?;

    info!(order = ?scheduler.order(), "initial tick order");

    // ── Host + driver ─────────────────────────────────────────────────────
    let mut host = PacedHost::new(&config.scheduler)?;
    let started = Instant::now();

    match &config.trace_csv {
        Some(path) => {
            let writer = CsvTraceWriter::create(path)?;
            let driver = TickDriver::with_observer(&scheduler, TraceObserver::new(writer))
                .attach(&mut host);
            host.run_frames(config.frames)?;
            driver.finish();
            if let Some(e) = driver.with_observer(|o| o.take_error()) {
                return Err(e.into());
            }
            let rows = driver.with_observer(|o| o.writer().rows_written());
            info!(path = %path.display(), rows, "trace written");
        }
        None => {
            let driver = TickDriver::new(&scheduler).attach(&mut host);
            host.run_frames(config.frames)?;
            driver.finish();
        }
    }

    // ── Summary ───────────────────────────────────────────────────────────
    for planet in [&mercury, &venus, &earth] {
        let script = planet.script();
        info!(
            planet = script.name,
            revolutions = script.revolutions,
            t_ms = planet.accumulated_time(),
            enabled = planet.enabled(),
            "final"
        );
    }
    info!(
        wall_ms = started.elapsed().as_millis() as u64,
        registered = scheduler.len(),
        resorts = scheduler.resort_count(),
        "orbit done"
    );
    Ok(())
}
