//! Point simulation system
//!
//! Advances the point cloud once per animation frame and tracks frame
//! statistics for the optional periodic log line.

use std::time::Instant;

use whorl_points::PointCloud;

/// Result of a simulation update
pub struct SimulationResult {
    /// Frames advanced since startup
    pub frame_index: u64,
    /// Seconds since the previous update
    pub frame_time: f32,
}

/// Manages the per-frame simulation step
pub struct SimulationSystem {
    last_frame: Instant,
    frame_index: u64,
}

impl SimulationSystem {
    /// Create a new simulation system
    pub fn new() -> Self {
        Self {
            last_frame: Instant::now(),
            frame_index: 0,
        }
    }

    /// Advance the cloud by one animation frame.
    ///
    /// The step is frame-based, not time-based: each call adds exactly
    /// `sqrt(radius)` degrees to every point, however long the frame took.
    pub fn update(&mut self, cloud: &mut PointCloud) -> SimulationResult {
        let now = Instant::now();
        let frame_time = (now - self.last_frame).as_secs_f32();
        self.last_frame = now;

        cloud.advance();

        self.frame_index += 1;
        SimulationResult {
            frame_index: self.frame_index,
            frame_time,
        }
    }
}

impl Default for SimulationSystem {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use whorl_points::PolarPoint;

    #[test]
    fn test_update_advances_cloud_and_counts_frames() {
        let mut sim = SimulationSystem::new();
        let mut cloud = PointCloud::from_points(vec![PolarPoint::new(1.0, 0.0)]);

        let first = sim.update(&mut cloud);
        let second = sim.update(&mut cloud);

        assert_eq!(first.frame_index, 1);
        assert_eq!(second.frame_index, 2);
        assert!((cloud.points()[0].theta - 2.0).abs() < 1e-6);
    }

    #[test]
    fn test_update_tolerates_empty_cloud() {
        let mut sim = SimulationSystem::new();
        let mut cloud = PointCloud::from_points(Vec::new());

        let result = sim.update(&mut cloud);

        assert_eq!(result.frame_index, 1);
        assert!(cloud.is_empty());
    }

    #[test]
    fn test_frame_time_is_non_negative() {
        let mut sim = SimulationSystem::new();
        let mut cloud = PointCloud::from_points(Vec::new());
        let result = sim.update(&mut cloud);
        assert!(result.frame_time >= 0.0);
    }
}
