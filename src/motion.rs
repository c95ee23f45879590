//! Relative motion decomposition and the odometry noise model.
//!
//! The motion between two consecutive odometry poses is decomposed into a
//! rotate-translate-rotate (RTR) triple. The noise model converts that
//! triple plus the configured coefficients into one Gaussian distribution
//! per component, computed once per odometry update and shared by every
//! particle sampled against it.

use rand::RngCore;
use rand_distr::{Distribution, StandardNormal};

use crate::config::MotionModelConfig;
use crate::core::math::{angle_diff, normalize_angle, sq};
use crate::core::Pose2D;

/// Rotate-translate-rotate decomposition of a planar relative motion.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct RelativeMotion {
    /// Initial heading change (radians), wrapped to (-π, π].
    pub first_rotation: f32,
    /// Translation distance along the rotated heading (meters).
    /// Non-negative when produced by [`between`](Self::between).
    pub translation: f32,
    /// Final heading change (radians), wrapped to (-π, π].
    pub second_rotation: f32,
}

impl RelativeMotion {
    /// Decompose the motion from `previous` to `current` into an RTR triple.
    ///
    /// When the translation distance is at or below `distance_threshold`
    /// the motion is treated as pure in-place rotation: the first rotation
    /// is forced to zero rather than estimated from atan2 on a near-zero
    /// displacement vector.
    ///
    /// The decomposition is invertible: [`apply_to`](Self::apply_to) on
    /// `previous` reconstructs `current` within floating tolerance.
    pub fn between(previous: Pose2D, current: Pose2D, distance_threshold: f32) -> Self {
        let dx = current.x - previous.x;
        let dy = current.y - previous.y;
        let distance = (sq(dx) + sq(dy)).sqrt();

        let first_rotation = if distance > distance_threshold {
            angle_diff(previous.theta, dy.atan2(dx))
        } else {
            0.0
        };
        let second_rotation =
            normalize_angle(angle_diff(previous.theta, current.theta) - first_rotation);

        Self {
            first_rotation,
            translation: distance,
            second_rotation,
        }
    }

    /// Apply this motion to a pose in the pose's own body frame:
    /// rotate, translate forward, rotate again.
    #[inline]
    pub fn apply_to(self, pose: Pose2D) -> Pose2D {
        pose * Pose2D::rotation(self.first_rotation)
            * Pose2D::translation(self.translation, 0.0)
            * Pose2D::rotation(self.second_rotation)
    }
}

/// Variance attributed to a rotation, symmetric under θ ↦ θ + π.
///
/// A heading change near ±π is ambiguous with its antipodal reading
/// (driving backward vs. turning around), so forward and backward motion
/// must contribute the same rotational noise. The smaller of |θ| and
/// |θ + π| (wrapped) is squared.
#[inline]
pub fn rotation_variance(angle: f32) -> f32 {
    let angle = normalize_angle(angle);
    let flipped = normalize_angle(angle + std::f32::consts::PI);
    sq(angle.abs().min(flipped.abs()))
}

/// Mean and standard deviation of one Gaussian distribution.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct GaussianParams {
    /// Distribution mean.
    pub mean: f32,
    /// Distribution standard deviation, always >= 0.
    pub std_dev: f32,
}

impl GaussianParams {
    /// Draw one sample: `mean + std_dev * g` with `g ~ N(0, 1)`.
    ///
    /// A zero standard deviation returns the mean without consuming
    /// randomness.
    #[inline]
    pub fn sample(&self, rng: &mut dyn RngCore) -> f32 {
        if self.std_dev == 0.0 {
            return self.mean;
        }
        let g: f32 = StandardNormal.sample(rng);
        self.mean + self.std_dev * g
    }
}

/// Gaussian parameters for each RTR component.
///
/// `Default` is the degenerate all-zero triple, which makes sampling a
/// deterministic identity. Replaced as a whole on every odometry update.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct NoiseParams {
    /// Distribution of the first rotation.
    pub first_rotation: GaussianParams,
    /// Distribution of the translation.
    pub translation: GaussianParams,
    /// Distribution of the second rotation.
    pub second_rotation: GaussianParams,
}

impl NoiseParams {
    /// Build distribution parameters from a decomposed motion and the
    /// configured noise coefficients (Probabilistic Robotics table 5.6).
    ///
    /// With non-negative coefficients every variance term is non-negative,
    /// so the square roots are always well defined.
    pub fn from_motion(motion: &RelativeMotion, config: &MotionModelConfig) -> Self {
        let distance_variance = sq(motion.translation);
        let combined_rotation = motion.first_rotation + motion.second_rotation;

        Self {
            first_rotation: GaussianParams {
                mean: motion.first_rotation,
                std_dev: (config.rotation_noise_from_rotation
                    * rotation_variance(motion.first_rotation)
                    + config.rotation_noise_from_translation * distance_variance)
                    .sqrt(),
            },
            translation: GaussianParams {
                mean: motion.translation,
                std_dev: (config.translation_noise_from_translation * distance_variance
                    + config.translation_noise_from_rotation
                        * rotation_variance(combined_rotation))
                .sqrt(),
            },
            second_rotation: GaussianParams {
                mean: motion.second_rotation,
                std_dev: (config.rotation_noise_from_rotation
                    * rotation_variance(motion.second_rotation)
                    + config.rotation_noise_from_translation * distance_variance)
                    .sqrt(),
            },
        }
    }

    /// Sample one motion from the three distributions and apply it to
    /// `state` in the state's own body frame.
    #[inline]
    pub fn sample_motion(&self, state: Pose2D, rng: &mut dyn RngCore) -> Pose2D {
        let motion = RelativeMotion {
            first_rotation: self.first_rotation.sample(rng),
            translation: self.translation.sample(rng),
            second_rotation: self.second_rotation.sample(rng),
        };
        motion.apply_to(state)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::f32::consts::{FRAC_PI_2, PI};

    const THRESHOLD: f32 = 0.01;

    #[test]
    fn test_decompose_forward_translation() {
        let motion = RelativeMotion::between(
            Pose2D::identity(),
            Pose2D::new(1.0, 0.0, 0.0),
            THRESHOLD,
        );

        assert_relative_eq!(motion.first_rotation, 0.0, epsilon = 1e-6);
        assert_relative_eq!(motion.translation, 1.0, epsilon = 1e-6);
        assert_relative_eq!(motion.second_rotation, 0.0, epsilon = 1e-6);
    }

    #[test]
    fn test_decompose_in_place_rotation() {
        // Distance 0 is below the threshold: the first rotation must be
        // forced to zero, not estimated from atan2(0, 0)
        let motion = RelativeMotion::between(
            Pose2D::identity(),
            Pose2D::new(0.0, 0.0, FRAC_PI_2),
            THRESHOLD,
        );

        assert_eq!(motion.first_rotation, 0.0);
        assert_relative_eq!(motion.translation, 0.0, epsilon = 1e-6);
        assert_relative_eq!(motion.second_rotation, FRAC_PI_2, epsilon = 1e-6);
    }

    #[test]
    fn test_decompose_diagonal_with_heading() {
        // Moving to (1, 1) while facing +X requires a 45° first rotation
        let motion = RelativeMotion::between(
            Pose2D::identity(),
            Pose2D::new(1.0, 1.0, 0.0),
            THRESHOLD,
        );

        assert_relative_eq!(motion.first_rotation, PI / 4.0, epsilon = 1e-5);
        assert_relative_eq!(motion.translation, 2.0f32.sqrt(), epsilon = 1e-5);
        assert_relative_eq!(motion.second_rotation, -PI / 4.0, epsilon = 1e-5);
    }

    #[test]
    fn test_decompose_round_trip() {
        let poses = [
            Pose2D::identity(),
            Pose2D::new(1.0, 0.0, 0.0),
            Pose2D::new(-2.0, 3.0, 2.5),
            Pose2D::new(0.3, -0.7, -FRAC_PI_2),
            Pose2D::new(5.0, 5.0, PI - 0.01),
        ];

        for &previous in &poses {
            for &current in &poses {
                let motion = RelativeMotion::between(previous, current, THRESHOLD);
                let reconstructed = motion.apply_to(previous);
                assert!(
                    reconstructed.approx_eq(current, 1e-4, 1e-4),
                    "round trip failed: {:?} -> {:?} gave {:?}",
                    previous,
                    current,
                    reconstructed
                );
            }
        }
    }

    #[test]
    fn test_decompose_backward_motion() {
        // Driving 1m backward: heading of the displacement is π off the
        // robot heading
        let motion = RelativeMotion::between(
            Pose2D::identity(),
            Pose2D::new(-1.0, 0.0, 0.0),
            THRESHOLD,
        );

        assert_relative_eq!(motion.translation, 1.0, epsilon = 1e-6);
        assert!((motion.first_rotation.abs() - PI).abs() < 1e-5);
        let reconstructed = motion.apply_to(Pose2D::identity());
        assert!(reconstructed.approx_eq(Pose2D::new(-1.0, 0.0, 0.0), 1e-5, 1e-5));
    }

    #[test]
    fn test_decompose_identical_poses() {
        let pose = Pose2D::new(2.0, -1.0, 0.8);
        let motion = RelativeMotion::between(pose, pose, THRESHOLD);

        assert_eq!(motion.first_rotation, 0.0);
        assert_relative_eq!(motion.translation, 0.0, epsilon = 1e-6);
        assert_relative_eq!(motion.second_rotation, 0.0, epsilon = 1e-6);
    }

    #[test]
    fn test_rotation_variance_zero() {
        assert_eq!(rotation_variance(0.0), 0.0);
    }

    #[test]
    fn test_rotation_variance_antipodal_symmetry() {
        for theta in [0.0, 0.1, -0.4, 1.0, FRAC_PI_2, 2.0, -3.0] {
            assert_relative_eq!(
                rotation_variance(theta),
                rotation_variance(theta + PI),
                epsilon = 1e-5
            );
        }
        // π itself is ambiguous with 0, so contributes no variance
        assert!(rotation_variance(PI) < 1e-9);
    }

    #[test]
    fn test_rotation_variance_small_angle() {
        assert_relative_eq!(rotation_variance(0.1), 0.01, epsilon = 1e-6);
        assert_relative_eq!(rotation_variance(-0.1), 0.01, epsilon = 1e-6);
    }

    #[test]
    fn test_noise_params_default_is_degenerate() {
        let params = NoiseParams::default();
        assert_eq!(params.first_rotation, GaussianParams::default());
        assert_eq!(params.translation, GaussianParams::default());
        assert_eq!(params.second_rotation, GaussianParams::default());
    }

    #[test]
    fn test_from_motion_table_5_6() {
        let config = MotionModelConfig::new().with_noise(0.1, 0.2, 0.3, 0.4);
        let motion = RelativeMotion {
            first_rotation: 0.1,
            translation: 2.0,
            second_rotation: -0.2,
        };

        let params = NoiseParams::from_motion(&motion, &config);

        assert_relative_eq!(params.first_rotation.mean, 0.1, epsilon = 1e-6);
        assert_relative_eq!(params.translation.mean, 2.0, epsilon = 1e-6);
        assert_relative_eq!(params.second_rotation.mean, -0.2, epsilon = 1e-6);

        let d2: f32 = 4.0;
        assert_relative_eq!(
            params.first_rotation.std_dev,
            (0.1 * 0.01 + 0.2 * d2).sqrt(),
            epsilon = 1e-5
        );
        // Combined rotation is 0.1 - 0.2 = -0.1
        assert_relative_eq!(
            params.translation.std_dev,
            (0.3 * d2 + 0.4 * 0.01).sqrt(),
            epsilon = 1e-5
        );
        assert_relative_eq!(
            params.second_rotation.std_dev,
            (0.1 * 0.04 + 0.2 * d2).sqrt(),
            epsilon = 1e-5
        );
    }

    #[test]
    fn test_from_motion_zero_motion_zero_std() {
        // Identical poses: every std must be zero regardless of how large
        // the coefficients are
        let config = MotionModelConfig::new().with_noise(10.0, 10.0, 10.0, 10.0);
        let motion = RelativeMotion::default();

        let params = NoiseParams::from_motion(&motion, &config);
        assert_eq!(params.first_rotation.std_dev, 0.0);
        assert_eq!(params.translation.std_dev, 0.0);
        assert_eq!(params.second_rotation.std_dev, 0.0);
    }

    #[test]
    fn test_gaussian_params_zero_std_is_deterministic() {
        let params = GaussianParams {
            mean: 1.5,
            std_dev: 0.0,
        };
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..10 {
            assert_eq!(params.sample(&mut rng), 1.5);
        }
    }

    #[test]
    fn test_gaussian_params_sample_spread() {
        let params = GaussianParams {
            mean: 0.0,
            std_dev: 1.0,
        };
        let mut rng = StdRng::seed_from_u64(42);

        let n = 2000;
        let samples: Vec<f32> = (0..n).map(|_| params.sample(&mut rng)).collect();
        let mean: f32 = samples.iter().sum::<f32>() / n as f32;
        let var: f32 = samples.iter().map(|s| (s - mean) * (s - mean)).sum::<f32>() / n as f32;

        assert!(mean.abs() < 0.1, "sample mean {} too far from 0", mean);
        assert!((var - 1.0).abs() < 0.15, "sample variance {} too far from 1", var);
    }
}
