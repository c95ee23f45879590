//! Configuration for the odometry motion model.
//!
//! The four noise coefficients follow the classical odometry motion model
//! from Probabilistic Robotics (Thrun et al., chapter 5.4.2, table 5.6)
//! and are often called alpha1..alpha4.

use serde::{Deserialize, Serialize};

/// Noise coefficients and thresholds for the odometry motion model.
///
/// Each coefficient relates one component of the observed relative motion
/// to the expected error magnitude of another. All values must be
/// non-negative and finite; [`validate`](Self::validate) enforces this.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct MotionModelConfig {
    /// Rotational noise generated by the relative rotation between the
    /// last two odometry updates (alpha1).
    /// Default: 0.2
    pub rotation_noise_from_rotation: f32,

    /// Rotational noise generated by the relative translation between the
    /// last two odometry updates (alpha2).
    /// Default: 0.2
    pub rotation_noise_from_translation: f32,

    /// Translational noise generated by the relative translation between
    /// the last two odometry updates (alpha3).
    /// Default: 0.2
    pub translation_noise_from_translation: f32,

    /// Translational noise generated by the relative rotation between the
    /// last two odometry updates (alpha4).
    /// Default: 0.2
    pub translation_noise_from_rotation: f32,

    /// Translation distance below which an update is treated as pure
    /// in-place rotation (meters). Guards the heading estimate against
    /// atan2 on a near-zero displacement vector.
    /// Default: 0.01m (1cm)
    pub distance_threshold: f32,
}

impl Default for MotionModelConfig {
    fn default() -> Self {
        Self {
            rotation_noise_from_rotation: 0.2,
            rotation_noise_from_translation: 0.2,
            translation_noise_from_translation: 0.2,
            translation_noise_from_rotation: 0.2,
            distance_threshold: 0.01,
        }
    }
}

impl MotionModelConfig {
    /// Create a configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set all four noise coefficients at once (alpha1..alpha4 order).
    pub fn with_noise(mut self, a1: f32, a2: f32, a3: f32, a4: f32) -> Self {
        self.rotation_noise_from_rotation = a1;
        self.rotation_noise_from_translation = a2;
        self.translation_noise_from_translation = a3;
        self.translation_noise_from_rotation = a4;
        self
    }

    /// Set the in-place rotation detection threshold (meters).
    pub fn with_distance_threshold(mut self, threshold: f32) -> Self {
        self.distance_threshold = threshold;
        self
    }

    /// Validate the configuration.
    ///
    /// Negative or non-finite coefficients would yield NaN standard
    /// deviations at runtime, so they are rejected here instead.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let coefficients = [
            ("rotation_noise_from_rotation", self.rotation_noise_from_rotation),
            (
                "rotation_noise_from_translation",
                self.rotation_noise_from_translation,
            ),
            (
                "translation_noise_from_translation",
                self.translation_noise_from_translation,
            ),
            (
                "translation_noise_from_rotation",
                self.translation_noise_from_rotation,
            ),
            ("distance_threshold", self.distance_threshold),
        ];

        for (name, value) in coefficients {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::InvalidValue(format!(
                    "{} must be finite and >= 0, got {}",
                    name, value
                )));
            }
        }

        Ok(())
    }
}

/// Motion model configuration error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// A parameter is out of its valid range.
    InvalidValue(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::InvalidValue(msg) => write!(f, "Invalid config: {}", msg),
        }
    }
}

impl std::error::Error for ConfigError {}
