//! Two-phase simulation tick
//!
//! Compute phase: every dot, in arena order, resolves collisions against the
//! current (not yet moved) positions of all dots, then gets its bounced and
//! clamped next position stored as pending. Velocity and spin changes from
//! collisions are visible right away to dots visited later in the same
//! pass; position changes are not.
//!
//! Commit phase: every dot takes its pending position.

use serde::{Deserialize, Serialize};

use super::arena::Arena;
use super::collision::{pair_mut, resolve};
use super::overlap::colliding_with;

/// How overlapping pairs are visited during the compute phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CollisionPolicy {
    /// Every dot resolves against every overlapping neighbor, so a pair
    /// is resolved twice per tick (once from each side)
    #[default]
    EachSide,
    /// A pair is resolved once, from the visit of the earlier dot
    OncePerPair,
}

/// What happened during one or more ticks
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TickReport {
    /// Number of the last tick covered by this report
    pub tick: u64,
    /// `resolve` calls
    pub collisions: usize,
    /// Wall reflections
    pub wall_bounces: usize,
}

impl TickReport {
    /// Fold a later report into this one
    pub fn merge(&mut self, other: TickReport) {
        self.tick = self.tick.max(other.tick);
        self.collisions += other.collisions;
        self.wall_bounces += other.wall_bounces;
    }
}

/// Drives the arena one tick at a time
#[derive(Debug, Clone, Default)]
pub struct Scheduler {
    ticks: u64,
    policy: CollisionPolicy,
}

impl Scheduler {
    pub fn new(policy: CollisionPolicy) -> Self {
        Self { ticks: 0, policy }
    }

    /// Ticks completed so far
    #[inline]
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    #[inline]
    pub fn policy(&self) -> CollisionPolicy {
        self.policy
    }

    /// Advance the arena by one tick.
    pub fn tick(&mut self, arena: &mut Arena) -> TickReport {
        self.ticks += 1;
        let mut report = TickReport {
            tick: self.ticks,
            ..Default::default()
        };

        let bounds = arena.bounds();
        let particles = arena.particles_mut();

        // --- COMPUTE ---
        for i in 0..particles.len() {
            for j in colliding_with(particles, i) {
                if self.policy == CollisionPolicy::OncePerPair && j < i {
                    continue;
                }
                let (a, b) = pair_mut(particles, i, j);
                resolve(a, b);
                report.collisions += 1;
            }

            let p = &mut particles[i];
            let predicted = p.pos + p.velocity();
            let bounce = bounds.wall_bounce(p.pos, predicted, p.heading, p.speed);
            if bounce.wall.is_some() {
                p.heading = bounce.heading;
                p.wall_impulse += bounce.impulse;
                report.wall_bounces += 1;
            }
            p.set_pending(bounce.position);
        }

        // --- COMMIT ---
        for p in particles.iter_mut() {
            if let Some(pos) = p.take_pending() {
                p.pos = pos;
            }
        }

        log::trace!(
            "tick {}: {} dots, {} collisions, {} wall bounces",
            report.tick,
            particles.len(),
            report.collisions,
            report.wall_bounces
        );
        report
    }

    /// Run `n` ticks and return the combined report.
    pub fn run(&mut self, arena: &mut Arena, n: u64) -> TickReport {
        let mut total = TickReport {
            tick: self.ticks,
            ..Default::default()
        };
        for _ in 0..n {
            total.merge(self.tick(arena));
        }
        total
    }
}
