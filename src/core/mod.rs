//! Fundamental geometry types: 2D poses and angle math.

pub mod math;
pub mod pose;

pub use pose::Pose2D;
