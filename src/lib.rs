//! # Gati-MCL: Sampling Odometry Motion Model
//!
//! A sampling-based odometry motion model for Monte Carlo localization.
//! Given the noisy relative motion reported by wheel/IMU odometry, it
//! predicts the new pose of each particle tracked by the filter.
//!
//! ## How it works
//!
//! Each odometry update is decomposed into a rotate-translate-rotate
//! (RTR) triple. The configured noise coefficients turn that triple into
//! three Gaussian distributions, computed once per update. Every particle
//! prediction then draws one sample per component and composes the
//! sampled motion in the particle's own body frame.
//!
//! ```text
//!  odometry pose ──► decompose ──► noise model ──► parameter store
//!                                                       │ (read)
//!  particle pose ──────────────────► sampler ◄──────────┘
//!        ▲                              │
//!        └───────── new pose ◄──────────┘
//! ```
//!
//! Updates come from a single producer; predictions may run concurrently
//! on arbitrarily many threads. The parameter triple and the last
//! received pose live under one reader-writer lock, so readers always
//! observe a coherent snapshot.
//!
//! ## Quick Start
//!
//! ```
//! use gati_mcl::{MotionModel, MotionModelConfig, OdometryMotionModel};
//! use gati_mcl::core::Pose2D;
//! use rand::rngs::SmallRng;
//! use rand::SeedableRng;
//!
//! let config = MotionModelConfig::default();
//! let model = OdometryMotionModel::new(config).expect("valid config");
//! let mut rng = SmallRng::seed_from_u64(42);
//!
//! // Odometry stream (one producer)
//! model.update(Pose2D::identity());
//! model.update(Pose2D::new(0.1, 0.0, 0.02));
//!
//! // Particle filter core (many concurrent consumers)
//! let particle = Pose2D::new(1.0, 2.0, 0.5);
//! let predicted = model.predict(particle, &mut rng);
//! ```
//!
//! ## Coordinate Frame
//!
//! All coordinates follow the ROS REP-103 convention: X-forward, Y-left,
//! counter-clockwise positive rotation. Angles are wrapped to (-π, π].
//!
//! ## Scope
//!
//! Resampling, particle weighting, the sensor model, and the map
//! representation belong to the filter core, not this crate. The model
//! also does not own a random generator: callers supply one per
//! `predict` call, and statistical independence across concurrent
//! callers is their responsibility.

pub mod config;
pub mod core;
pub mod model;
pub mod motion;

pub use config::{ConfigError, MotionModelConfig};
pub use model::OdometryMotionModel;
pub use motion::{GaussianParams, NoiseParams, RelativeMotion};

use crate::core::Pose2D;
use rand::RngCore;

/// Motion model capability consumed by the particle filter core.
///
/// All methods take `&self` so one model instance can be shared across
/// the odometry thread and the prediction workers (e.g. behind an `Arc`).
/// The trait is object-safe: the filter core may hold a
/// `Box<dyn MotionModel>` or stay generic over the concrete type.
pub trait MotionModel: Send + Sync {
    /// Feed the next absolute odometry pose. Called once per odometry
    /// cycle by a single producer.
    fn update(&self, pose: Pose2D);

    /// Predict a new pose for one particle by sampling the current
    /// motion distribution. Never mutates model state; safe to call from
    /// many threads concurrently.
    fn predict(&self, state: Pose2D, rng: &mut dyn RngCore) -> Pose2D;

    /// The last odometry pose received, or `None` before the first
    /// update. Lets the filter skip prediction/resampling cycles when
    /// the robot has not moved.
    fn latest_update(&self) -> Option<Pose2D>;
}
