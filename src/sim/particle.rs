//! Dot state
//!
//! A dot is pure data: position, polar velocity (speed + heading), mass,
//! radius and spin. Only the scheduler, the collision resolver and the
//! selector write to it.

use std::fmt;

use glam::DVec2;

use crate::consts::BOUNDING_ADJUST;
use crate::error::{Error, Result};

/// Stable identifier handed out by the arena on insertion
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ParticleId(pub u32);

impl fmt::Display for ParticleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Selection tag. No physical effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DotColor {
    #[default]
    Red,
    Green,
    Blue,
    Yellow,
}

/// Axis-aligned box around a dot, in arena coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingRect {
    pub min: DVec2,
    pub max: DVec2,
}

/// A single dot
#[derive(Debug, Clone)]
pub struct Particle {
    id: ParticleId,
    /// Center, arena coordinates
    pub pos: DVec2,
    /// Direction of travel (radians, atan2 convention)
    pub heading: f64,
    /// Distance travelled per tick (>= 0)
    pub speed: f64,
    /// Mass (> 0)
    pub mass: f64,
    /// Disk radius (> 0)
    pub radius: f64,
    /// Angular-momentum-like scalar, mixed on collision
    pub spin: f64,
    pub color: DotColor,
    /// Velocity handed to the walls by bounces so far
    pub wall_impulse: DVec2,
    /// Cached bounding half-extent, refreshed by `calc_bounding`
    half_extent: f64,
    /// Next position, only present between compute and commit
    pending: Option<DVec2>,
}

impl Particle {
    /// Create a dot after validating invariants.
    ///
    /// Errors:
    /// - `Error::InvalidParam` if the position or heading is not finite,
    ///   `speed < 0`, `mass <= 0` or `radius <= 0`.
    pub fn new(pos: DVec2, heading: f64, speed: f64, mass: f64, radius: f64) -> Result<Self> {
        if !pos.is_finite() {
            return Err(Error::InvalidParam("position must be finite".into()));
        }
        if !heading.is_finite() {
            return Err(Error::InvalidParam("heading must be finite".into()));
        }
        if !speed.is_finite() || speed < 0.0 {
            return Err(Error::InvalidParam("speed must be finite and >= 0".into()));
        }
        if !mass.is_finite() || mass <= 0.0 {
            return Err(Error::InvalidParam("mass must be finite and > 0".into()));
        }
        if !radius.is_finite() || radius <= 0.0 {
            return Err(Error::InvalidParam("radius must be finite and > 0".into()));
        }
        Ok(Self {
            id: ParticleId(0),
            pos,
            heading,
            speed,
            mass,
            radius,
            spin: 0.0,
            color: DotColor::default(),
            wall_impulse: DVec2::ZERO,
            half_extent: radius + BOUNDING_ADJUST,
            pending: None,
        })
    }

    pub fn with_spin(mut self, spin: f64) -> Self {
        self.spin = spin;
        self
    }

    pub fn with_color(mut self, color: DotColor) -> Self {
        self.color = color;
        self
    }

    /// Id assigned by the arena (`#0` until inserted)
    #[inline]
    pub fn id(&self) -> ParticleId {
        self.id
    }

    pub(crate) fn set_id(&mut self, id: ParticleId) {
        self.id = id;
    }

    /// Cartesian velocity (displacement per tick)
    #[inline]
    pub fn velocity(&self) -> DVec2 {
        DVec2::new(self.speed * self.heading.cos(), self.speed * self.heading.sin())
    }

    /// Replace the velocity from cartesian components.
    #[inline]
    pub fn set_velocity(&mut self, v: DVec2) {
        self.heading = v.y.atan2(v.x);
        self.speed = (v.x * v.x + v.y * v.y).sqrt();
    }

    #[inline]
    pub fn momentum(&self) -> DVec2 {
        self.mass * self.velocity()
    }

    /// 1/2 m s^2
    #[inline]
    pub fn kinetic_energy(&self) -> f64 {
        self.mass * self.speed * self.speed / 2.0
    }

    /// Momentum transferred to the arena walls by this dot's bounces
    #[inline]
    pub fn wall_momentum(&self) -> DVec2 {
        self.mass * self.wall_impulse
    }

    /// Refresh derived geometry after `radius` changed.
    pub fn calc_bounding(&mut self) {
        self.half_extent = self.radius + BOUNDING_ADJUST;
    }

    pub fn bounding_rect(&self) -> BoundingRect {
        let h = DVec2::splat(self.half_extent);
        BoundingRect {
            min: self.pos - h,
            max: self.pos + h,
        }
    }

    /// Is `p` inside this dot's disk?
    pub fn contains_point(&self, p: DVec2) -> bool {
        self.pos.distance_squared(p) <= self.radius * self.radius
    }

    /// Position this dot will take at the next commit, if computed
    #[inline]
    pub fn pending_position(&self) -> Option<DVec2> {
        self.pending
    }

    pub(crate) fn set_pending(&mut self, pos: DVec2) {
        self.pending = Some(pos);
    }

    pub(crate) fn take_pending(&mut self) -> Option<DVec2> {
        self.pending.take()
    }
}
