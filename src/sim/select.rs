//! Bulk edits of dots picked by color
//!
//! An external input layer picks a color filter and an attribute, then
//! nudges that attribute up or down on every matching dot.

use super::arena::Arena;
use super::particle::{DotColor, Particle};

/// Numeric attribute a selection adjusts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Attribute {
    #[default]
    Mass,
    Radius,
}

impl Attribute {
    pub fn as_str(&self) -> &'static str {
        match self {
            Attribute::Mass => "mass",
            Attribute::Radius => "radius",
        }
    }

    pub fn get(&self, particle: &Particle) -> f64 {
        match self {
            Attribute::Mass => particle.mass,
            Attribute::Radius => particle.radius,
        }
    }

    fn slot<'a>(&self, particle: &'a mut Particle) -> &'a mut f64 {
        match self {
            Attribute::Mass => &mut particle.mass,
            Attribute::Radius => &mut particle.radius,
        }
    }
}

/// Which dots to edit, and what to edit on them
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Selection {
    /// `None` matches every dot
    pub color: Option<DotColor>,
    pub attribute: Attribute,
}

impl Selection {
    pub fn new(color: Option<DotColor>, attribute: Attribute) -> Self {
        Self { color, attribute }
    }

    #[inline]
    pub fn matches(&self, particle: &Particle) -> bool {
        self.color.is_none_or(|c| particle.color == c)
    }

    /// Add `delta` to the selected attribute of every matching dot and
    /// refresh their bounding geometry. Returns how many dots changed.
    ///
    /// Values are not validated: driving mass or radius to zero or below is
    /// the caller's problem and makes later collisions produce NaN.
    pub fn adjust(&self, arena: &mut Arena, delta: f64) -> usize {
        let mut changed = 0;
        for p in arena.particles_mut().iter_mut().filter(|p| self.matches(p)) {
            let slot = self.attribute.slot(p);
            *slot += delta;
            if *slot <= 0.0 {
                log::warn!(
                    "dot {} {} dropped to {}",
                    p.id(),
                    self.attribute.as_str(),
                    self.attribute.get(p)
                );
            }
            p.calc_bounding();
            changed += 1;
        }
        log::debug!(
            "Adjusted {} by {} on {} dots ({:?})",
            self.attribute.as_str(),
            delta,
            changed,
            self.color
        );
        changed
    }
}
