//! Creating dots
//!
//! Random parameters come from a seeded PCG stream so a run can be replayed.

use std::f64::consts::{PI, TAU};
use std::ops::Range;

use glam::DVec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::arena::Arena;
use super::particle::{DotColor, Particle, ParticleId};
use crate::error::{Error, Result};
use crate::polar_to_cartesian;

/// Colors handed out to successive circles
pub const CIRCLE_COLORS: [DotColor; 3] = [DotColor::Red, DotColor::Blue, DotColor::Green];

/// Half-open ranges random dot parameters are drawn from
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DotRanges {
    pub heading: Range<f64>,
    pub speed: Range<f64>,
    pub mass: Range<f64>,
    pub radius: Range<f64>,
    pub spin: Range<f64>,
}

impl Default for DotRanges {
    fn default() -> Self {
        Self {
            heading: 0.0..TAU,
            speed: 1.0..2.0,
            mass: 1.0..2.0,
            radius: 2.0..8.0,
            spin: 0.0..10.0,
        }
    }
}

impl DotRanges {
    /// Reject empty ranges and ranges that could yield invalid dots.
    pub fn validate(&self) -> Result<()> {
        let named = [
            ("heading", &self.heading),
            ("speed", &self.speed),
            ("mass", &self.mass),
            ("radius", &self.radius),
            ("spin", &self.spin),
        ];
        for (name, r) in named {
            if !(r.start.is_finite() && r.end.is_finite()) || r.start >= r.end {
                return Err(Error::InvalidParam(format!(
                    "{name} range must be finite and non-empty, got {}..{}",
                    r.start, r.end
                )));
            }
        }
        if self.speed.start < 0.0 {
            return Err(Error::InvalidParam("speed range must start at >= 0".into()));
        }
        if self.mass.start <= 0.0 || self.radius.start <= 0.0 {
            return Err(Error::InvalidParam(
                "mass and radius ranges must start above 0".into(),
            ));
        }
        Ok(())
    }
}

/// Places new dots into an arena
#[derive(Debug, Clone)]
pub struct Spawner {
    rng: Pcg32,
    ranges: DotRanges,
    color_cycle: usize,
}

impl Spawner {
    pub fn new(seed: u64, ranges: DotRanges) -> Result<Self> {
        ranges.validate()?;
        Ok(Self {
            rng: Pcg32::seed_from_u64(seed),
            ranges,
            color_cycle: 0,
        })
    }

    /// Seeded from OS entropy
    pub fn from_entropy(ranges: DotRanges) -> Result<Self> {
        Self::new(rand::rng().random(), ranges)
    }

    pub fn ranges(&self) -> &DotRanges {
        &self.ranges
    }

    /// A dot at `pos` with random heading, speed, mass, radius and spin.
    pub fn random_dot(&mut self, pos: DVec2, color: DotColor) -> Result<Particle> {
        let heading = self.rng.random_range(self.ranges.heading.clone());
        let speed = self.rng.random_range(self.ranges.speed.clone());
        let mass = self.rng.random_range(self.ranges.mass.clone());
        let radius = self.rng.random_range(self.ranges.radius.clone());
        let spin = self.rng.random_range(self.ranges.spin.clone());
        Ok(Particle::new(pos, heading, speed, mass, radius)?
            .with_spin(spin)
            .with_color(color))
    }

    /// Color the next circle gets; advances the cycle.
    fn next_circle_color(&mut self) -> DotColor {
        self.color_cycle += 1;
        CIRCLE_COLORS[self.color_cycle % CIRCLE_COLORS.len()]
    }

    /// Spawn `count` random dots evenly spaced on a circle of `radius`
    /// around the arena origin, all in the next cycle color.
    pub fn spawn_circle(&mut self, arena: &mut Arena, count: usize, radius: f64) -> Result<Vec<ParticleId>> {
        if !radius.is_finite() || radius < 0.0 {
            return Err(Error::InvalidParam("circle radius must be finite and >= 0".into()));
        }
        let color = self.next_circle_color();
        let mut ids = Vec::with_capacity(count);
        for i in 0..count {
            let theta = i as f64 * TAU / count as f64;
            let dot = self.random_dot(polar_to_cartesian(radius, theta), color)?;
            ids.push(arena.add_particle(dot));
        }
        log::debug!("Spawned circle of {count} {color:?} dots (r = {radius})");
        Ok(ids)
    }

    /// One random dot at the arena origin.
    pub fn spawn_single(&mut self, arena: &mut Arena, color: DotColor) -> Result<ParticleId> {
        let dot = self.random_dot(DVec2::ZERO, color)?;
        let id = arena.add_particle(dot);
        log::debug!("Spawned {color:?} dot {id}");
        Ok(id)
    }

    /// Two identical dots on crossing courses, for eyeballing a collision.
    pub fn spawn_demo_pair(&mut self, arena: &mut Arena) -> Result<(ParticleId, ParticleId)> {
        let a = Particle::new(DVec2::new(-200.0, -200.0), PI / 4.0, 4.0, 1.0, 5.0)?
            .with_color(DotColor::Red);
        let b = Particle::new(DVec2::new(200.0, -200.0), 3.0 * PI / 4.0, 4.0, 1.0, 5.0)?
            .with_color(DotColor::Green);
        Ok((arena.add_particle(a), arena.add_particle(b)))
    }
}
