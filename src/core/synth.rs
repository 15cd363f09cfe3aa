//! Synthetic point clouds used to seed the chart payloads.
//!
//! Every generator draws from an injected [`RandomSource`]; given the same
//! source state they always return the same points.

use std::f64::consts::PI;

use crate::model::Point;
use crate::prng::RandomSource;

pub const DEFAULT_LINEAR_NOISE: f64 = 0.2;

pub const RING_CENTER: Point = Point::new(50.0, 50.0);
pub const RING_RADIUS_MIN: f64 = 30.0;
pub const RING_RADIUS_MAX: f64 = 50.0;

/// Points of one cluster, labelled `Cluster {n}` (1-based).
#[derive(Debug, Clone, PartialEq)]
pub struct LabeledPoints {
    pub label: String,
    pub points: Vec<Point>,
}

/// Noisy samples around the line `y = 0.5x + 30`, `x ∈ [0, 100)`.
///
/// `noise` scales a uniform perturbation in `[-50 * noise, 50 * noise)`.
pub fn linear(rng: &mut impl RandomSource, samples: usize, noise: f64) -> Vec<Point> {
    (0..samples)
        .map(|_| {
            let x = rng.next_f64() * 100.0;
            let y = 0.5 * x + 30.0 + (rng.next_f64() - 0.5) * noise * 100.0;
            Point::new(x, y)
        })
        .collect()
}

/// `points_per_cluster` points around each center, jittered uniformly in
/// `[-spread/2, spread/2)` on both axes.
pub fn clusters(
    rng: &mut impl RandomSource,
    centers: &[Point],
    points_per_cluster: usize,
    spread: f64,
) -> Vec<LabeledPoints> {
    centers
        .iter()
        .enumerate()
        .map(|(i, center)| LabeledPoints {
            label: format!("Cluster {}", i + 1),
            points: (0..points_per_cluster)
                .map(|_| {
                    Point::new(
                        center.x + (rng.next_f64() - 0.5) * spread,
                        center.y + (rng.next_f64() - 0.5) * spread,
                    )
                })
                .collect(),
        })
        .collect()
}

/// Annulus around [`RING_CENTER`] with radius in `[30, 50)`.
pub fn ring(rng: &mut impl RandomSource, samples: usize) -> Vec<Point> {
    (0..samples)
        .map(|_| {
            let angle = rng.next_f64() * PI * 2.0;
            let radius = rng.gen_range_f64(RING_RADIUS_MIN, RING_RADIUS_MAX);
            Point::new(
                angle.cos() * radius + RING_CENTER.x,
                angle.sin() * radius + RING_CENTER.y,
            )
        })
        .collect()
}

pub fn translate(points: Vec<Point>, dx: f64, dy: f64) -> Vec<Point> {
    points
        .into_iter()
        .map(|p| Point::new(p.x + dx, p.y + dy))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prng::testing::Scripted;
    use crate::prng::Prng;

    #[test]
    fn linear_follows_the_line_without_noise() {
        let mut rng = Prng::new(3);
        let pts = linear(&mut rng, 200, 0.0);
        assert_eq!(pts.len(), 200);
        for p in &pts {
            assert!((0.0..100.0).contains(&p.x));
            assert!((p.y - (0.5 * p.x + 30.0)).abs() < 1e-9);
        }
    }

    #[test]
    fn linear_noise_is_bounded() {
        let mut rng = Prng::new(11);
        for p in linear(&mut rng, 500, DEFAULT_LINEAR_NOISE) {
            let residual = p.y - (0.5 * p.x + 30.0);
            assert!(residual.abs() <= 10.0, "residual {residual} beyond noise band");
        }
    }

    #[test]
    fn linear_with_scripted_source() {
        // x draw 0.5 -> 50, noise draw 0.75 -> +0.25 * 0.2 * 100 = +5
        let mut rng = Scripted::new(&[0.5, 0.75]);
        let pts = linear(&mut rng, 1, 0.2);
        assert_eq!(pts.len(), 1);
        assert!((pts[0].x - 50.0).abs() < 1e-9);
        assert!((pts[0].y - 60.0).abs() < 1e-9);
        assert_eq!(rng.draws(), 2);
    }

    #[test]
    fn clusters_jitter_stays_within_spread() {
        let centers = [Point::new(30.0, 30.0), Point::new(70.0, 70.0)];
        let mut rng = Prng::new(5);
        let out = clusters(&mut rng, &centers, 20, 15.0);

        assert_eq!(out.len(), 2);
        assert_eq!(out[0].label, "Cluster 1");
        assert_eq!(out[1].label, "Cluster 2");
        for (cluster, center) in out.iter().zip(centers.iter()) {
            assert_eq!(cluster.points.len(), 20);
            for p in &cluster.points {
                assert!((p.x - center.x).abs() <= 7.5);
                assert!((p.y - center.y).abs() <= 7.5);
            }
        }
    }

    #[test]
    fn clusters_of_nothing() {
        let mut rng = Prng::new(5);
        assert!(clusters(&mut rng, &[], 10, 1.0).is_empty());
        let empty = clusters(&mut rng, &[Point::new(0.0, 0.0)], 0, 1.0);
        assert_eq!(empty.len(), 1);
        assert!(empty[0].points.is_empty());
    }

    #[test]
    fn ring_points_lie_in_annulus() {
        let mut rng = Prng::new(8);
        for p in ring(&mut rng, 1_000) {
            let r = ((p.x - 50.0).powi(2) + (p.y - 50.0).powi(2)).sqrt();
            assert!(r >= RING_RADIUS_MIN - 1e-9 && r < RING_RADIUS_MAX + 1e-9, "radius {r}");
        }
    }

    #[test]
    fn generators_are_deterministic_per_seed() {
        let a = ring(&mut Prng::new(77), 50);
        let b = ring(&mut Prng::new(77), 50);
        let c = ring(&mut Prng::new(78), 50);
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn translate_shifts_every_point() {
        let moved = translate(vec![Point::new(1.0, 2.0), Point::new(-1.0, 0.0)], 20.0, -20.0);
        assert_eq!(moved, vec![Point::new(21.0, -18.0), Point::new(19.0, -20.0)]);
    }
}
