//! Point cloud ownership and per-frame simulation

use rand::Rng;

use crate::point::PolarPoint;

/// Owns the animated dataset.
///
/// Created once at startup, advanced once per animation frame. Points are
/// never added or removed individually; the whole cloud lives for the
/// process lifetime (or until reseeded).
pub struct PointCloud {
    points: Vec<PolarPoint>,
}

impl PointCloud {
    /// Create `count` points with uniform-random radius in [0, 1) and
    /// uniform-random theta in [0, 360).
    pub fn new(count: usize) -> Self {
        Self::new_with_rng(count, &mut rand::thread_rng())
    }

    /// Like [`PointCloud::new`] but drawing from the given generator, for
    /// deterministic tests and demos.
    pub fn new_with_rng<R: Rng + ?Sized>(count: usize, rng: &mut R) -> Self {
        let points = (0..count)
            .map(|_| PolarPoint::new(rng.gen::<f32>(), rng.gen::<f32>() * 360.0))
            .collect();
        Self { points }
    }

    /// Build a cloud from explicit points.
    pub fn from_points(points: Vec<PolarPoint>) -> Self {
        Self { points }
    }

    /// The current point set.
    pub fn points(&self) -> &[PolarPoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Advance every point by one animation frame.
    ///
    /// Single writer, in place; the active backend reads the result later in
    /// the same frame.
    pub fn advance(&mut self) {
        for point in &mut self.points {
            *point = point.advanced();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_init_produces_exact_count_in_range() {
        let mut rng = StdRng::seed_from_u64(7);
        let cloud = PointCloud::new_with_rng(1000, &mut rng);
        assert_eq!(cloud.len(), 1000);
        for p in cloud.points() {
            assert!((0.0..1.0).contains(&p.radius), "radius {} out of range", p.radius);
            assert!((0.0..360.0).contains(&p.theta), "theta {} out of range", p.theta);
        }
    }

    #[test]
    fn test_advance_keeps_radius_and_steps_theta() {
        let mut rng = StdRng::seed_from_u64(11);
        let mut cloud = PointCloud::new_with_rng(100, &mut rng);
        let before: Vec<_> = cloud.points().to_vec();

        cloud.advance();

        for (old, new) in before.iter().zip(cloud.points()) {
            assert_eq!(new.radius, old.radius);
            assert!((new.theta - (old.theta + old.radius.sqrt())).abs() < 1e-5);
        }
    }

    #[test]
    fn test_fixed_points_end_to_end() {
        // Three fixed points, one tick: thetas become {0, 91, 180 + sqrt(0.5)}
        let mut cloud = PointCloud::from_points(vec![
            PolarPoint::new(0.0, 0.0),
            PolarPoint::new(1.0, 90.0),
            PolarPoint::new(0.5, 180.0),
        ]);

        cloud.advance();

        let thetas: Vec<f32> = cloud.points().iter().map(|p| p.theta).collect();
        assert!((thetas[0] - 0.0).abs() < 1e-6);
        assert!((thetas[1] - 91.0).abs() < 1e-6);
        assert!((thetas[2] - (180.0 + 0.5_f32.sqrt())).abs() < 1e-5);
    }

    #[test]
    fn test_empty_cloud_advance_is_noop() {
        let mut cloud = PointCloud::from_points(Vec::new());
        cloud.advance();
        assert!(cloud.is_empty());
    }
}
