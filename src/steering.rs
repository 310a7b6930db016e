//! Seek steering toward a target point.
//!
//! Pure functions over `glam` vectors so the movement rule can be exercised
//! without an ECS world. Characters move in a straight line at constant
//! speed, never pass their target, and face it about the +Y axis.
use glam::{Quat, Vec3};

/// Outcome of a single seek step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SeekStep {
    /// Still travelling; the character should take this pose.
    Advance {
        /// Position after the step.
        position: Vec3,
        /// Yaw in radians that points the model's +Z axis at the target.
        heading: f32,
    },
    /// Within the arrival threshold; nothing moved.
    Arrived,
}

/// Advances `position` toward `target` by at most `speed * delta_seconds`.
///
/// Returns [`SeekStep::Arrived`] when the remaining distance is at or below
/// `threshold`. The step is clamped to the remaining distance so that a long
/// frame lands on the target instead of passing it.
///
/// # Examples
///
/// ```
/// use glam::Vec3;
/// use foxchase::steering::{seek_step, SeekStep};
///
/// let step = seek_step(Vec3::ZERO, Vec3::new(0.0, 0.0, 10.0), 2.0, 0.5, 0.1);
/// let SeekStep::Advance { position, heading } = step else {
///     panic!("should still be moving");
/// };
/// assert!((position.z - 1.0).abs() < 1e-6);
/// assert!(heading.abs() < 1e-6);
///
/// let step = seek_step(Vec3::ZERO, Vec3::new(0.05, 0.0, 0.0), 2.0, 0.5, 0.1);
/// assert_eq!(step, SeekStep::Arrived);
/// ```
#[must_use]
pub fn seek_step(
    position: Vec3,
    target: Vec3,
    speed: f32,
    delta_seconds: f32,
    threshold: f32,
) -> SeekStep {
    let to_target = target - position;
    let distance = to_target.length();
    if distance.is_nan() || distance <= threshold {
        return SeekStep::Arrived;
    }

    let direction = to_target / distance;
    let travel = (speed * delta_seconds).clamp(0.0, distance);
    SeekStep::Advance {
        position: position + direction * travel,
        heading: heading_towards(direction),
    }
}

/// Yaw about +Y that rotates the +Z axis onto `direction`'s floor projection.
#[must_use]
pub fn heading_towards(direction: Vec3) -> f32 {
    direction.x.atan2(direction.z)
}

/// Orientation for a character with the given heading and model correction.
#[must_use]
pub fn facing(heading: f32, heading_offset: f32) -> Quat {
    Quat::from_rotation_y(heading + heading_offset)
}
