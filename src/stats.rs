//! Arena diagnostics
//!
//! Totals the dots' momentum and energy, the momentum the walls have
//! absorbed, and bins speeds and headings. Ball momentum plus wall momentum
//! only changes through collisions, so its drift is a useful health check.

use std::collections::BTreeMap;

use glam::DVec2;
use serde::Serialize;

use crate::consts::{HEADING_BUCKETS_PER_RADIAN, SPEED_BUCKETS_PER_UNIT};
use crate::positive_angle;
use crate::sim::Arena;

/// Point-in-time totals over every dot in an arena
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Snapshot {
    pub count: usize,
    /// Σ m·v
    pub ball_momentum: DVec2,
    /// Σ m·(velocity given to walls)
    pub wall_momentum: DVec2,
    /// Ball momentum plus wall momentum
    pub total_momentum: DVec2,
    /// Σ m·s²/2
    pub energy: f64,
    pub spin: f64,
    /// round(speed · 10) → dots
    pub speed_histogram: BTreeMap<i64, usize>,
    /// round(heading in [0, 2π) · 48) → dots
    pub heading_histogram: BTreeMap<i64, usize>,
}

impl Snapshot {
    pub fn capture(arena: &Arena) -> Self {
        let mut snap = Self {
            count: arena.len(),
            ..Default::default()
        };
        for p in arena.particles() {
            snap.ball_momentum += p.momentum();
            snap.wall_momentum += p.wall_momentum();
            snap.energy += p.kinetic_energy();
            snap.spin += p.spin;
            *snap.speed_histogram.entry(speed_bucket(p.speed)).or_default() += 1;
            *snap
                .heading_histogram
                .entry(heading_bucket(p.heading))
                .or_default() += 1;
        }
        snap.total_momentum = snap.ball_momentum + snap.wall_momentum;
        snap
    }
}

#[inline]
pub fn speed_bucket(speed: f64) -> i64 {
    (speed * SPEED_BUCKETS_PER_UNIT).round() as i64
}

#[inline]
pub fn heading_bucket(heading: f64) -> i64 {
    (positive_angle(heading) * HEADING_BUCKETS_PER_RADIAN).round() as i64
}

/// Drift of the conserved totals since a baseline
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Drift {
    /// |E - E₀| / |E₀| (absolute when E₀ is ~0)
    pub energy: f64,
    /// |p - p₀| over ball + wall momentum
    pub momentum: f64,
}

impl Drift {
    pub fn exceeds(&self, energy_tol: f64, momentum_tol: f64) -> bool {
        self.energy > energy_tol || self.momentum > momentum_tol
    }
}

/// Compares later snapshots against a baseline
#[derive(Debug, Clone)]
pub struct ConservationMonitor {
    baseline: Snapshot,
}

impl ConservationMonitor {
    pub fn new(arena: &Arena) -> Self {
        Self {
            baseline: Snapshot::capture(arena),
        }
    }

    pub fn baseline(&self) -> &Snapshot {
        &self.baseline
    }

    /// Reset the baseline, e.g. after dots were added or edited.
    pub fn rebase(&mut self, arena: &Arena) {
        self.baseline = Snapshot::capture(arena);
    }

    pub fn check(&self, arena: &Arena) -> Drift {
        let now = Snapshot::capture(arena);
        let e0 = self.baseline.energy;
        let energy = if e0.abs() > 1e-12 {
            (now.energy - e0).abs() / e0.abs()
        } else {
            (now.energy - e0).abs()
        };
        Drift {
            energy,
            momentum: (now.total_momentum - self.baseline.total_momentum).length(),
        }
    }
}
