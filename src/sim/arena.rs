//! Bounded rectangular world
//!
//! The arena owns the dots and knows how a dot bounces off its four walls.
//! Iteration order over the dots is insertion order; the scheduler relies on
//! it being stable between ticks.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use super::particle::{DotColor, Particle, ParticleId};
use crate::consts::*;
use crate::error::{Error, Result};

/// Arena rectangle. `top < bottom` (y grows downward, screen style).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub left: f64,
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
}

impl Default for Bounds {
    fn default() -> Self {
        Self {
            left: ARENA_LEFT,
            top: ARENA_TOP,
            right: ARENA_RIGHT,
            bottom: ARENA_BOTTOM,
        }
    }
}

/// The wall a bounce was resolved against
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Wall {
    Left,
    Right,
    Top,
    Bottom,
}

/// Outcome of the wall test for one dot's predicted move
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WallBounce {
    /// Heading after reflection (unchanged if no wall was hit)
    pub heading: f64,
    /// Re-projected and clamped next position
    pub position: DVec2,
    /// Wall that triggered the reflection, if any
    pub wall: Option<Wall>,
    /// Velocity handed to the wall (zero without a bounce)
    pub impulse: DVec2,
}

impl Bounds {
    /// Build from edges, rejecting empty or non-finite rectangles.
    pub fn new(left: f64, top: f64, right: f64, bottom: f64) -> Result<Self> {
        let bounds = Self {
            left,
            top,
            right,
            bottom,
        };
        bounds.validate()?;
        Ok(bounds)
    }

    /// Build from a top-left corner and a size.
    pub fn from_origin_size(x: f64, y: f64, width: f64, height: f64) -> Result<Self> {
        Self::new(x, y, x + width, y + height)
    }

    pub fn validate(&self) -> Result<()> {
        let edges = [self.left, self.top, self.right, self.bottom];
        if !edges.iter().all(|e| e.is_finite()) {
            return Err(Error::InvalidParam("arena bounds must be finite".into()));
        }
        if self.left >= self.right || self.top >= self.bottom {
            return Err(Error::InvalidParam(
                "arena bounds must have left < right and top < bottom".into(),
            ));
        }
        Ok(())
    }

    #[inline]
    pub fn width(&self) -> f64 {
        self.right - self.left
    }

    #[inline]
    pub fn height(&self) -> f64 {
        self.bottom - self.top
    }

    /// Inclusive containment test
    #[inline]
    pub fn contains(&self, p: DVec2) -> bool {
        p.x >= self.left && p.x <= self.right && p.y >= self.top && p.y <= self.bottom
    }

    /// Clamp each coordinate independently into the rectangle
    #[inline]
    pub fn clamp(&self, p: DVec2) -> DVec2 {
        DVec2::new(
            p.x.max(self.left).min(self.right),
            p.y.max(self.top).min(self.bottom),
        )
    }

    /// First wall `p` is on or past, tested left, right, top, bottom.
    pub fn crossed_wall(&self, p: DVec2) -> Option<Wall> {
        if p.x <= self.left {
            Some(Wall::Left)
        } else if p.x >= self.right {
            Some(Wall::Right)
        } else if p.y <= self.top {
            Some(Wall::Top)
        } else if p.y >= self.bottom {
            Some(Wall::Bottom)
        } else {
            None
        }
    }

    /// Bounce a dot that would move from `origin` to `predicted` this tick.
    ///
    /// Only the first crossed wall is corrected. Left/right reflect the
    /// heading to `π - heading`, top/bottom to `-heading`. After a
    /// reflection the move is re-projected once from `origin` with the new
    /// heading, and the result is clamped into the arena either way.
    pub fn wall_bounce(&self, origin: DVec2, predicted: DVec2, heading: f64, speed: f64) -> WallBounce {
        let wall = self.crossed_wall(predicted);
        let (heading, position, impulse) = match wall {
            Some(wall) => {
                // Only the reflected axis changes, by twice its old value
                let (reflected, impulse) = match wall {
                    Wall::Left | Wall::Right => (
                        std::f64::consts::PI - heading,
                        DVec2::new(2.0 * speed * heading.cos(), 0.0),
                    ),
                    Wall::Top | Wall::Bottom => {
                        (-heading, DVec2::new(0.0, 2.0 * speed * heading.sin()))
                    }
                };
                let step = DVec2::new(speed * reflected.cos(), speed * reflected.sin());
                (reflected, origin + step, impulse)
            }
            None => (heading, predicted, DVec2::ZERO),
        };
        WallBounce {
            heading,
            position: self.clamp(position),
            wall,
            impulse,
        }
    }
}

/// The world: bounds plus the dots living in it
#[derive(Debug, Clone)]
pub struct Arena {
    bounds: Bounds,
    particles: Vec<Particle>,
    next_id: u32,
}

impl Default for Arena {
    fn default() -> Self {
        Self::new(Bounds::default())
    }
}

impl Arena {
    pub fn new(bounds: Bounds) -> Self {
        Self {
            bounds,
            particles: Vec::new(),
            next_id: 1,
        }
    }

    #[inline]
    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    /// Dots in iteration order (read-only view for renderers)
    #[inline]
    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    #[inline]
    pub(crate) fn particles_mut(&mut self) -> &mut [Particle] {
        &mut self.particles
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.particles.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    /// Allocate a new particle ID
    fn next_particle_id(&mut self) -> ParticleId {
        let id = ParticleId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Insert a dot and return the id it was given.
    pub fn add_particle(&mut self, mut particle: Particle) -> ParticleId {
        let id = self.next_particle_id();
        particle.set_id(id);
        self.particles.push(particle);
        id
    }

    pub fn get(&self, id: ParticleId) -> Option<&Particle> {
        self.particles.iter().find(|p| p.id() == id)
    }

    pub fn get_mut(&mut self, id: ParticleId) -> Option<&mut Particle> {
        self.particles.iter_mut().find(|p| p.id() == id)
    }

    /// Remove one dot, keeping the order of the rest.
    pub fn remove_particle(&mut self, id: ParticleId) -> Result<Particle> {
        let index = self
            .particles
            .iter()
            .position(|p| p.id() == id)
            .ok_or(Error::UnknownParticle(id))?;
        Ok(self.particles.remove(index))
    }

    /// Remove every dot.
    pub fn clear(&mut self) {
        log::debug!("Clearing {} dots", self.particles.len());
        self.particles.clear();
    }

    /// Dots carrying `color`
    pub fn with_color(&self, color: DotColor) -> impl Iterator<Item = &Particle> {
        self.particles.iter().filter(move |p| p.color == color)
    }

    /// See [`Bounds::wall_bounce`].
    #[inline]
    pub fn wall_bounce(&self, origin: DVec2, predicted: DVec2, heading: f64, speed: f64) -> WallBounce {
        self.bounds.wall_bounce(origin, predicted, heading, speed)
    }
}
