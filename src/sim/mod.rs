//! Simulation core
//!
//! Pure and windowing-free:
//! - Discrete ticks, one unit of time each
//! - Two-phase update (compute everything, then commit positions)
//! - Stable iteration order (arena insertion order)
//! - Seeded RNG only for spawning

pub mod arena;
pub mod clock;
pub mod collision;
pub mod overlap;
pub mod particle;
pub mod select;
pub mod spawn;
pub mod tick;

pub use arena::{Arena, Bounds, Wall, WallBounce};
pub use clock::FixedStep;
pub use collision::{CollisionOutcome, collide, contact_angle, elastic_1d, mix_spin, resolve};
pub use overlap::{colliding_with, overlaps};
pub use particle::{BoundingRect, DotColor, Particle, ParticleId};
pub use select::{Attribute, Selection};
pub use spawn::{CIRCLE_COLORS, DotRanges, Spawner};
pub use tick::{CollisionPolicy, Scheduler, TickReport};
