//! Dots - elastic collisions between spinning dots in a bounded arena
//!
//! Core modules:
//! - `sim`: Simulation core (particles, arena, collisions, two-phase tick)
//! - `settings`: Simulation configuration
//! - `stats`: Momentum/energy diagnostics and histograms
//! - `error`: Crate error type

pub mod error;
pub mod settings;
pub mod sim;
pub mod stats;

pub use error::{Error, Result};
pub use settings::SimConfig;
pub use stats::{ConservationMonitor, Drift, Snapshot};

use glam::DVec2;

/// Simulation configuration constants
pub mod consts {
    /// Default clock cadence (ticks per second)
    pub const TICK_RATE_HZ: u32 = 25;
    /// Maximum ticks the clock driver runs per call before dropping backlog
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Default arena bounds
    pub const ARENA_LEFT: f64 = -600.0;
    pub const ARENA_TOP: f64 = -600.0;
    pub const ARENA_RIGHT: f64 = 600.0;
    pub const ARENA_BOTTOM: f64 = 300.0;

    /// Circle spawn defaults
    pub const CIRCLE_COUNT: usize = 48;
    pub const CIRCLE_RADIUS: f64 = 200.0;

    /// Padding added around a dot's disk for its bounding box
    pub const BOUNDING_ADJUST: f64 = 0.5;

    /// Histogram bucket scales
    pub const SPEED_BUCKETS_PER_UNIT: f64 = 10.0;
    pub const HEADING_BUCKETS_PER_RADIAN: f64 = 48.0;
}

/// Normalized angle to [-π, π)
#[inline]
pub fn normalize_angle(angle: f64) -> f64 {
    use std::f64::consts::{PI, TAU};
    let wrapped = (angle + PI).rem_euclid(TAU) - PI;
    // rem_euclid can round up to exactly TAU for tiny negative inputs
    if wrapped >= PI { wrapped - TAU } else { wrapped }
}

/// Normalized angle to [0, 2π)
#[inline]
pub fn positive_angle(angle: f64) -> f64 {
    use std::f64::consts::TAU;
    let wrapped = angle.rem_euclid(TAU);
    if wrapped >= TAU { 0.0 } else { wrapped }
}

/// Convert polar (r, theta) to cartesian (x, y)
#[inline]
pub fn polar_to_cartesian(r: f64, theta: f64) -> DVec2 {
    DVec2::new(r * theta.cos(), r * theta.sin())
}

/// Convert cartesian (x, y) to polar (r, theta)
#[inline]
pub fn cartesian_to_polar(pos: DVec2) -> (f64, f64) {
    (pos.length(), pos.y.atan2(pos.x))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::{FRAC_PI_2, PI, TAU};

    #[test]
    fn test_normalize_angle_range() {
        for &a in &[0.0, PI, -PI, 3.0 * PI, -3.5 * PI, 10.0, -1e-18] {
            let n = normalize_angle(a);
            assert!((-PI..PI).contains(&n), "{a} -> {n}");
        }
        assert!((normalize_angle(3.0 * FRAC_PI_2) + FRAC_PI_2).abs() < 1e-12);
    }

    #[test]
    fn test_positive_angle_range() {
        for &a in &[0.0, -PI, TAU, -1e-18, 7.0] {
            let n = positive_angle(a);
            assert!((0.0..TAU).contains(&n), "{a} -> {n}");
        }
        assert!((positive_angle(-FRAC_PI_2) - 3.0 * FRAC_PI_2).abs() < 1e-12);
    }

    #[test]
    fn test_polar_roundtrip() {
        let p = polar_to_cartesian(200.0, 0.75);
        let (r, theta) = cartesian_to_polar(p);
        assert!((r - 200.0).abs() < 1e-9);
        assert!((theta - 0.75).abs() < 1e-12);
    }
}
