//! Sampling odometry motion model for a differential drive.
//!
//! One producer feeds absolute odometry poses through
//! [`update`](crate::MotionModel::update); many consumers concurrently call
//! [`predict`](crate::MotionModel::predict), one per particle. The noise
//! distribution parameters are computed once per update and shared by all
//! predictions against that update.

use std::sync::{PoisonError, RwLock};

use rand::RngCore;

use crate::config::{ConfigError, MotionModelConfig};
use crate::core::Pose2D;
use crate::motion::{NoiseParams, RelativeMotion};
use crate::MotionModel;

/// Everything a reader may observe, replaced wholesale on each update so
/// no reader ever sees a mix of old and new values.
#[derive(Clone, Copy, Debug, Default)]
struct Snapshot {
    params: NoiseParams,
    last_pose: Option<Pose2D>,
}

/// Sampled odometry motion model (Probabilistic Robotics chapter 5.4.2).
///
/// The model holds no per-particle state: `predict` is a pure function of
/// the particle pose, the current noise parameters, and the caller's
/// random generator. Share it across threads behind an `Arc`; `update`,
/// `predict`, and `latest_update` all take `&self`.
///
/// # Example
/// ```
/// use gati_mcl::{MotionModel, MotionModelConfig, OdometryMotionModel};
/// use gati_mcl::core::Pose2D;
/// use rand::rngs::SmallRng;
/// use rand::SeedableRng;
///
/// let model = OdometryMotionModel::new(MotionModelConfig::default()).unwrap();
/// let mut rng = SmallRng::seed_from_u64(1);
///
/// model.update(Pose2D::identity());
/// model.update(Pose2D::new(0.5, 0.0, 0.0));
///
/// let particle = Pose2D::new(3.0, 1.0, 0.2);
/// let predicted = model.predict(particle, &mut rng);
/// ```
pub struct OdometryMotionModel {
    config: MotionModelConfig,
    snapshot: RwLock<Snapshot>,
}

impl OdometryMotionModel {
    /// Create a motion model with the given configuration.
    ///
    /// Fails fast on negative or non-finite coefficients rather than
    /// letting them surface as NaN standard deviations at runtime.
    pub fn new(config: MotionModelConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            config,
            snapshot: RwLock::new(Snapshot::default()),
        })
    }

    /// The configured noise coefficients and threshold.
    pub fn config(&self) -> &MotionModelConfig {
        &self.config
    }

    /// Current noise distribution parameters, as one coherent triple.
    ///
    /// The degenerate all-zero triple before the first pair of updates.
    pub fn noise_params(&self) -> NoiseParams {
        self.read_snapshot().params
    }

    /// Return the model to its uninitialized state: no last pose, zero
    /// noise parameters. The next `update` call re-initializes.
    pub fn reset(&self) {
        let mut snapshot = self
            .snapshot
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        *snapshot = Snapshot::default();
    }

    fn read_snapshot(&self) -> Snapshot {
        // The write path only stores plain floats, so a poisoned lock
        // still holds a coherent snapshot.
        *self
            .snapshot
            .read()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

impl MotionModel for OdometryMotionModel {
    /// Feed the next absolute odometry pose.
    ///
    /// The first call only records the pose; every subsequent call
    /// decomposes the motion since the previous pose and refreshes the
    /// noise parameters. The parameter triple and the last pose are
    /// replaced under a single write lock acquisition.
    fn update(&self, pose: Pose2D) {
        let mut snapshot = self
            .snapshot
            .write()
            .unwrap_or_else(PoisonError::into_inner);

        if let Some(previous) = snapshot.last_pose {
            let motion = RelativeMotion::between(previous, pose, self.config.distance_threshold);
            snapshot.params = NoiseParams::from_motion(&motion, &self.config);
            log::trace!(
                "motion update: r1={:.4} d={:.4} r2={:.4}",
                motion.first_rotation,
                motion.translation,
                motion.second_rotation
            );
        }
        snapshot.last_pose = Some(pose);
    }

    /// Apply one sampled motion to a particle pose.
    ///
    /// Reads a coherent copy of the noise parameters, draws one value per
    /// RTR component from the caller's generator, and composes the
    /// sampled motion in the particle's body frame. Before any update has
    /// occurred all parameters are zero and the state is returned
    /// unchanged.
    fn predict(&self, state: Pose2D, rng: &mut dyn RngCore) -> Pose2D {
        let params = self.read_snapshot().params;
        params.sample_motion(state, rng)
    }

    /// The last absolute pose received, or `None` before the first update.
    fn latest_update(&self) -> Option<Pose2D> {
        self.read_snapshot().last_pose
    }
}
