//! Fixed-step clock driver
//!
//! Turns elapsed wall time into whole ticks with an accumulator. Capped per
//! call so a stall cannot snowball into ever longer catch-up bursts.

use std::time::Duration;

use crate::consts::MAX_SUBSTEPS;
use crate::error::{Error, Result};

#[derive(Debug, Clone)]
pub struct FixedStep {
    dt: f64,
    accumulator: f64,
    max_substeps: u32,
}

impl FixedStep {
    /// Clock ticking `rate_hz` times per second.
    pub fn new(rate_hz: u32) -> Result<Self> {
        if rate_hz == 0 {
            return Err(Error::InvalidParam("tick rate must be > 0".into()));
        }
        Ok(Self {
            dt: 1.0 / rate_hz as f64,
            accumulator: 0.0,
            max_substeps: MAX_SUBSTEPS,
        })
    }

    pub fn with_max_substeps(mut self, max_substeps: u32) -> Self {
        self.max_substeps = max_substeps.max(1);
        self
    }

    /// Seconds per tick
    #[inline]
    pub fn dt(&self) -> f64 {
        self.dt
    }

    #[inline]
    pub fn interval(&self) -> Duration {
        Duration::from_secs_f64(self.dt)
    }

    /// Feed `elapsed` wall time and call `on_tick` once per whole tick due.
    /// Returns the number of ticks run.
    pub fn advance<F: FnMut()>(&mut self, elapsed: Duration, mut on_tick: F) -> u32 {
        self.accumulator += elapsed.as_secs_f64();

        let mut substeps = 0;
        while self.accumulator >= self.dt && substeps < self.max_substeps {
            on_tick();
            self.accumulator -= self.dt;
            substeps += 1;
        }

        // Drop backlog we refused to run
        if substeps == self.max_substeps && self.accumulator >= self.dt {
            log::debug!("Clock dropped {:.3}s of backlog", self.accumulator);
            self.accumulator = 0.0;
        }
        substeps
    }
}
