//! Dots headless runner
//!
//! Spawns one circle of dots, runs the simulator and prints the tick
//! report, the conservation drift and the final snapshot as JSON.
//!
//! Usage: `dots [CONFIG.json] [--ticks N] [--realtime]`

use std::path::PathBuf;
use std::time::Instant;

use dots::sim::{Arena, FixedStep, Scheduler, Spawner, TickReport};
use dots::{ConservationMonitor, Drift, Error, Result, SimConfig, Snapshot};
use serde::Serialize;

const DEFAULT_TICKS: u64 = 250;

/// Printed on stdout when the run ends
#[derive(Debug, Serialize)]
struct RunSummary {
    report: TickReport,
    drift: Drift,
    snapshot: Snapshot,
}

#[derive(Debug, Default)]
struct Args {
    config: Option<PathBuf>,
    ticks: Option<u64>,
    realtime: bool,
}

fn parse_args() -> Result<Args> {
    let mut args = Args::default();
    let mut it = std::env::args().skip(1);
    while let Some(arg) = it.next() {
        match arg.as_str() {
            "--ticks" => {
                let n = it
                    .next()
                    .ok_or_else(|| Error::InvalidParam("--ticks needs a value".into()))?;
                let n = n
                    .parse()
                    .map_err(|_| Error::InvalidParam(format!("bad tick count: {n}")))?;
                args.ticks = Some(n);
            }
            "--realtime" => args.realtime = true,
            flag if flag.starts_with("--") => {
                return Err(Error::InvalidParam(format!("unknown flag: {flag}")));
            }
            path => args.config = Some(PathBuf::from(path)),
        }
    }
    Ok(args)
}

fn log_snapshot(tick: u64, arena: &Arena, monitor: &ConservationMonitor) {
    let snap = Snapshot::capture(arena);
    let drift = monitor.check(arena);
    log::info!(
        "tick {tick}: {} dots, p = ({:.3}, {:.3}), wall p = ({:.3}, {:.3}), E = {:.3} (drift {:.2e}), spin = {:.3}",
        snap.count,
        snap.ball_momentum.x,
        snap.ball_momentum.y,
        snap.wall_momentum.x,
        snap.wall_momentum.y,
        snap.energy,
        drift.energy,
        snap.spin,
    );
}

fn run() -> Result<()> {
    let args = parse_args()?;
    let config = match &args.config {
        Some(path) => SimConfig::load(path)?,
        None => SimConfig::default(),
    };

    let mut spawner = match config.seed {
        Some(seed) => Spawner::new(seed, config.ranges.clone())?,
        None => Spawner::from_entropy(config.ranges.clone())?,
    };
    let mut arena = Arena::new(config.bounds);
    spawner.spawn_circle(&mut arena, config.circle_count, config.circle_radius)?;
    let monitor = ConservationMonitor::new(&arena);
    let mut scheduler = Scheduler::new(config.collision_policy);

    let total = args.ticks.unwrap_or(DEFAULT_TICKS);
    let per_second = u64::from(config.tick_rate_hz.max(1));
    log::info!(
        "Running {total} ticks at {} Hz with {} dots ({:?})",
        config.tick_rate_hz,
        arena.len(),
        config.collision_policy
    );

    let mut report = TickReport::default();
    let mut step = |arena: &mut Arena, scheduler: &mut Scheduler| {
        report.merge(scheduler.tick(arena));
        if scheduler.ticks() % per_second == 0 {
            log_snapshot(scheduler.ticks(), arena, &monitor);
        }
    };

    if args.realtime {
        let mut clock = FixedStep::new(config.tick_rate_hz)?;
        let mut last = Instant::now();
        while scheduler.ticks() < total {
            std::thread::sleep(clock.interval());
            let now = Instant::now();
            let mut due = 0;
            clock.advance(now - last, || due += 1);
            last = now;
            for _ in 0..due {
                if scheduler.ticks() >= total {
                    break;
                }
                step(&mut arena, &mut scheduler);
            }
        }
    } else {
        for _ in 0..total {
            step(&mut arena, &mut scheduler);
        }
    }

    log::info!(
        "Done: {} collisions, {} wall bounces over {total} ticks",
        report.collisions,
        report.wall_bounces
    );
    let summary = RunSummary {
        report,
        drift: monitor.check(&arena),
        snapshot: Snapshot::capture(&arena),
    };
    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}

fn main() {
    env_logger::init();
    if let Err(e) = run() {
        log::error!("{e}");
        eprintln!("dots: {e}");
        std::process::exit(1);
    }
}
