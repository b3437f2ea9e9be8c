//! Collision response between two dots
//!
//! The 2D collision is reduced to a 1D one: both velocities are rotated into
//! the frame of the contact normal, the normal components go through the
//! 1D elastic collision formula, the tangential components are kept
//! (smooth disks, no friction), and the result is rotated back.
//!
//! Spin is blended afterwards with `mass * radius` standing in for the
//! moment of inertia. That blend does NOT conserve angular momentum under
//! its own proxy: both dots get `angular * m * r` where `angular` is the
//! weighted mean rate. It is kept exactly as is so runs stay reproducible.

use super::particle::Particle;

/// Post-collision state for one dot
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CollisionOutcome {
    pub speed: f64,
    pub heading: f64,
    pub spin: f64,
}

/// Angle of the contact normal, pointing from `b` to `a`.
///
/// Coincident centers give `atan2(0, 0) == 0`.
#[inline]
pub fn contact_angle(a: &Particle, b: &Particle) -> f64 {
    let d = a.pos - b.pos;
    d.y.atan2(d.x)
}

/// 1D elastic collision: returns the new velocity of the body with mass
/// `m1` moving at `v1` after hitting a body of mass `m2` moving at `v2`.
#[inline]
pub fn elastic_1d(m1: f64, v1: f64, m2: f64, v2: f64) -> f64 {
    ((m1 - m2) * v1 + 2.0 * m2 * v2) / (m1 + m2)
}

/// Compute both outcomes without touching the dots.
///
/// Does not check that the dots overlap; the caller decides that.
pub fn collide(a: &Particle, b: &Particle) -> (CollisionOutcome, CollisionOutcome) {
    let phi = contact_angle(a, b);
    let (sin_phi, cos_phi) = phi.sin_cos();

    // (normal, tangent) components in the contact frame
    let an = a.speed * (a.heading - phi).cos();
    let at = a.speed * (a.heading - phi).sin();
    let bn = b.speed * (b.heading - phi).cos();
    let bt = b.speed * (b.heading - phi).sin();

    let an_after = elastic_1d(a.mass, an, b.mass, bn);
    let bn_after = elastic_1d(b.mass, bn, a.mass, an);

    let (a_speed, a_heading) = to_world(an_after, at, cos_phi, sin_phi);
    let (b_speed, b_heading) = to_world(bn_after, bt, cos_phi, sin_phi);

    let (a_spin, b_spin) = mix_spin(a, b);

    (
        CollisionOutcome {
            speed: a_speed,
            heading: a_heading,
            spin: a_spin,
        },
        CollisionOutcome {
            speed: b_speed,
            heading: b_heading,
            spin: b_spin,
        },
    )
}

/// Resolve a collision in place: `speed`, `heading` and `spin` of both dots
/// are replaced. Positions are left alone.
pub fn resolve(a: &mut Particle, b: &mut Particle) {
    let (oa, ob) = collide(a, b);
    apply(a, oa);
    apply(b, ob);
}

/// Blended spin for both dots.
///
/// `angular = (ma ra sa + mb rb sb) / (ma ra + mb rb)`, then each dot gets
/// `angular * m * r`. Zero or negative `m * r` sums divide through as-is.
pub fn mix_spin(a: &Particle, b: &Particle) -> (f64, f64) {
    let ia = a.mass * a.radius;
    let ib = b.mass * b.radius;
    let angular = (ia * a.spin + ib * b.spin) / (ia + ib);
    (angular * ia, angular * ib)
}

#[inline]
fn apply(p: &mut Particle, outcome: CollisionOutcome) {
    p.speed = outcome.speed;
    p.heading = outcome.heading;
    p.spin = outcome.spin;
}

/// Rotate a (normal, tangent) pair back to world axes and return
/// (speed, heading).
#[inline]
fn to_world(normal: f64, tangent: f64, cos_phi: f64, sin_phi: f64) -> (f64, f64) {
    let vx = cos_phi * normal - sin_phi * tangent;
    let vy = sin_phi * normal + cos_phi * tangent;
    (vx.hypot(vy), vy.atan2(vx))
}

/// Split `slice[i]` and `slice[j]` into two mutable borrows.
///
/// Panics if `i == j` or either index is out of range.
pub(crate) fn pair_mut<T>(slice: &mut [T], i: usize, j: usize) -> (&mut T, &mut T) {
    assert_ne!(i, j, "pair_mut needs two distinct indices");
    if i < j {
        let (lo, hi) = slice.split_at_mut(j);
        (&mut lo[i], &mut hi[0])
    } else {
        let (lo, hi) = slice.split_at_mut(i);
        (&mut hi[0], &mut lo[j])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::DVec2;
    use proptest::prelude::*;
    use std::f64::consts::PI;

    fn dot(x: f64, y: f64, heading: f64, speed: f64, mass: f64, radius: f64) -> Particle {
        Particle::new(DVec2::new(x, y), heading, speed, mass, radius).unwrap()
    }

    fn momentum(ps: &[&Particle]) -> DVec2 {
        ps.iter().map(|p| p.momentum()).sum()
    }

    #[test]
    fn test_reference_scenario_mass_two_hits_mass_one() {
        // A at origin moving +x, B at (8, 0) at rest; contact normal is
        // along -x so phi = pi.
        let mut a = dot(0.0, 0.0, 0.0, 5.0, 2.0, 5.0);
        let mut b = dot(8.0, 0.0, 0.0, 0.0, 1.0, 5.0);
        resolve(&mut a, &mut b);

        let va = a.velocity();
        let vb = b.velocity();
        // 1D elastic: va' = (2-1)/3 * 5 = 5/3, vb' = 2*2/3 * 5 = 20/3
        assert!((va.x - 5.0 / 3.0).abs() < 1e-9);
        assert!((vb.x - 20.0 / 3.0).abs() < 1e-9);
        assert!(va.y.abs() < 1e-9 && vb.y.abs() < 1e-9);
        assert!(a.speed < 5.0, "A slows down");
        assert!(vb.x > 0.0, "B is pushed along +x");
        assert!((2.0 * va.x + 1.0 * vb.x - 10.0).abs() < 1e-9);
    }

    #[test]
    fn test_equal_mass_head_on_swaps_velocities() {
        let mut a = dot(-4.0, 0.0, 0.0, 3.0, 1.5, 5.0);
        let mut b = dot(4.0, 0.0, PI, 3.0, 1.5, 5.0);
        resolve(&mut a, &mut b);
        let va = a.velocity();
        let vb = b.velocity();
        assert!((va - DVec2::new(-3.0, 0.0)).length() < 1e-9);
        assert!((vb - DVec2::new(3.0, 0.0)).length() < 1e-9);
    }

    #[test]
    fn test_tangential_component_untouched() {
        // Normal along x; B at rest. A moves diagonally: the y part must survive.
        let mut a = dot(0.0, 0.0, PI / 4.0, 2.0_f64.sqrt(), 1.0, 5.0);
        let mut b = dot(6.0, 0.0, 0.0, 0.0, 1.0, 5.0);
        resolve(&mut a, &mut b);
        let va = a.velocity();
        let vb = b.velocity();
        assert!(va.x.abs() < 1e-9);
        assert!((va.y - 1.0).abs() < 1e-9);
        assert!((vb.x - 1.0).abs() < 1e-9);
        assert!(vb.y.abs() < 1e-9);
    }

    #[test]
    fn test_coincident_centers_use_zero_normal() {
        let a = dot(3.0, 3.0, 0.0, 2.0, 1.0, 5.0);
        let b = dot(3.0, 3.0, PI, 1.0, 3.0, 5.0);
        assert_eq!(contact_angle(&a, &b), 0.0);
        let (oa, ob) = collide(&a, &b);
        // Along x: va' = ((1-3)*2 + 2*3*(-1))/4 = -2.5, vb' = ((3-1)*(-1) + 2*1*2)/4 = 0.5
        assert!((oa.speed - 2.5).abs() < 1e-9);
        assert!((oa.heading.abs() - PI).abs() < 1e-9);
        assert!((ob.speed - 0.5).abs() < 1e-9);
        assert!(ob.heading.abs() < 1e-9);
    }

    #[test]
    fn test_spin_mixing_formula() {
        let a = dot(0.0, 0.0, 0.0, 1.0, 2.0, 3.0).with_spin(4.0);
        let b = dot(5.0, 0.0, 0.0, 1.0, 1.0, 2.0).with_spin(-1.0);
        // ia = 6, ib = 2, angular = (24 - 2) / 8 = 2.75
        let (sa, sb) = mix_spin(&a, &b);
        assert!((sa - 16.5).abs() < 1e-12);
        assert!((sb - 5.5).abs() < 1e-12);
        // Not conserved under the m*r proxy: 6*4 + 2*(-1) = 22 before
        let before = 6.0 * 4.0 + 2.0 * -1.0;
        let after = 6.0 * sa + 2.0 * sb;
        assert!((before - after).abs() > 1.0);
    }

    #[test]
    fn test_zero_mass_propagates_nan() {
        let mut a = dot(0.0, 0.0, 0.0, 1.0, 1.0, 1.0);
        let mut b = dot(1.0, 0.0, 0.0, 1.0, 1.0, 1.0);
        a.mass = 0.0;
        b.mass = 0.0;
        resolve(&mut a, &mut b);
        assert!(a.speed.is_nan());
        assert!(a.spin.is_nan());
    }

    #[test]
    fn test_pair_mut_both_orders() {
        let mut v = vec![1, 2, 3, 4];
        {
            let (a, b) = pair_mut(&mut v, 0, 3);
            std::mem::swap(a, b);
        }
        {
            let (a, b) = pair_mut(&mut v, 2, 1);
            *a += 10;
            *b += 20;
        }
        assert_eq!(v, vec![4, 22, 13, 1]);
    }

    proptest! {
        #[test]
        fn prop_head_on_momentum_conserved(
            m1 in 0.1f64..50.0,
            m2 in 0.1f64..50.0,
            v1 in -20.0f64..20.0,
            v2 in -20.0f64..20.0,
        ) {
            // Centers on the x axis: all velocity is along the normal.
            let h1 = if v1 < 0.0 { PI } else { 0.0 };
            let h2 = if v2 < 0.0 { PI } else { 0.0 };
            let mut a = dot(-3.0, 0.0, h1, v1.abs(), m1, 5.0);
            let mut b = dot(3.0, 0.0, h2, v2.abs(), m2, 5.0);
            let before = momentum(&[&a, &b]);
            let energy_before = a.kinetic_energy() + b.kinetic_energy();
            resolve(&mut a, &mut b);
            let after = momentum(&[&a, &b]);
            let scale = 1.0 + before.length();
            prop_assert!((before - after).length() < 1e-9 * scale);
            let energy_after = a.kinetic_energy() + b.kinetic_energy();
            prop_assert!((energy_before - energy_after).abs() < 1e-9 * (1.0 + energy_before));
        }

        #[test]
        fn prop_oblique_collision_conserves_momentum_and_energy(
            x in -10.0f64..10.0,
            y in -10.0f64..10.0,
            ha in -PI..PI,
            hb in -PI..PI,
            sa in 0.0f64..10.0,
            sb in 0.0f64..10.0,
            ma in 0.5f64..5.0,
            mb in 0.5f64..5.0,
        ) {
            let mut a = dot(0.0, 0.0, ha, sa, ma, 5.0);
            let mut b = dot(x, y, hb, sb, mb, 5.0);
            let p0 = momentum(&[&a, &b]);
            let e0 = a.kinetic_energy() + b.kinetic_energy();
            resolve(&mut a, &mut b);
            let p1 = momentum(&[&a, &b]);
            let e1 = a.kinetic_energy() + b.kinetic_energy();
            prop_assert!((p0 - p1).length() < 1e-9 * (1.0 + p0.length()));
            prop_assert!((e0 - e1).abs() < 1e-9 * (1.0 + e0));
        }
    }
}
