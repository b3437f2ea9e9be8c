//! Naive pairwise overlap detection
//!
//! O(n) per dot, O(n²) per tick. Fine for tens of dots.

use super::particle::Particle;

/// Do the two disks intersect? Touching counts as overlapping.
#[inline]
pub fn overlaps(a: &Particle, b: &Particle) -> bool {
    let reach = a.radius + b.radius;
    a.pos.distance_squared(b.pos) <= reach * reach
}

/// Indices of the dots overlapping `particles[index]`, in slice order.
///
/// The dot itself is never reported.
pub fn colliding_with(particles: &[Particle], index: usize) -> Vec<usize> {
    let Some(this) = particles.get(index) else {
        return Vec::new();
    };
    particles
        .iter()
        .enumerate()
        .filter(|&(j, other)| j != index && overlaps(this, other))
        .map(|(j, _)| j)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::DVec2;

    fn dot(x: f64, y: f64, radius: f64) -> Particle {
        Particle::new(DVec2::new(x, y), 0.0, 1.0, 1.0, radius).unwrap()
    }

    #[test]
    fn test_overlap_by_sum_of_radii() {
        let a = dot(0.0, 0.0, 5.0);
        assert!(overlaps(&a, &dot(8.0, 0.0, 5.0)));
        assert!(overlaps(&a, &dot(6.0, 8.0, 5.0))); // exactly touching
        assert!(!overlaps(&a, &dot(6.0, 8.1, 5.0)));
        assert!(overlaps(&a, &dot(0.0, 0.0, 1.0))); // concentric
    }

    #[test]
    fn test_overlap_is_symmetric() {
        let a = dot(1.0, 2.0, 3.0);
        let b = dot(4.0, 6.0, 2.5);
        assert_eq!(overlaps(&a, &b), overlaps(&b, &a));
    }

    #[test]
    fn test_colliding_with_preserves_order_and_skips_self() {
        let dots = vec![
            dot(0.0, 0.0, 5.0),
            dot(100.0, 0.0, 5.0),
            dot(-7.0, 0.0, 5.0),
            dot(0.0, 9.0, 5.0),
        ];
        assert_eq!(colliding_with(&dots, 0), vec![2, 3]);
        assert_eq!(colliding_with(&dots, 1), Vec::<usize>::new());
        assert!(colliding_with(&dots, 99).is_empty());
    }

    #[test]
    fn test_matches_disk_intersection_oracle() {
        // Oracle: disks intersect iff some point lies in both. Sample the
        // segment between centers.
        let a = dot(0.0, 0.0, 4.0);
        for i in 0..40 {
            let b = dot(i as f64 * 0.5, 1.0, 3.0);
            let oracle = (0..=1000).any(|k| {
                let t = k as f64 / 1000.0;
                let p = a.pos.lerp(b.pos, t);
                a.contains_point(p) && b.contains_point(p)
            });
            assert_eq!(overlaps(&a, &b), oracle, "offset {}", i as f64 * 0.5);
        }
    }
}
