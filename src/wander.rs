//! Random retargeting for characters that never rest.

use bevy::prelude::*;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::WANDER_HALF_EXTENT;

/// Square on the floor plane, centred on the origin, that wander targets are
/// drawn from.
#[derive(Resource, Debug, Clone, Copy, PartialEq)]
pub struct WanderArea {
    half_extent: f32,
}

impl WanderArea {
    /// Creates an area spanning `[-half_extent, half_extent)` on x and z.
    ///
    /// Non-positive or non-finite extents collapse to the origin.
    #[must_use]
    pub fn new(half_extent: f32) -> Self {
        let clamped = if half_extent.is_finite() && half_extent > 0.0 {
            half_extent
        } else {
            0.0
        };
        Self {
            half_extent: clamped,
        }
    }

    /// Half the side length of the square.
    #[must_use]
    pub const fn half_extent(&self) -> f32 {
        self.half_extent
    }

    /// Draws a point uniformly inside the square with `y = 0`.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Vec3 {
        if self.half_extent == 0.0 {
            return Vec3::ZERO;
        }
        let extent = self.half_extent;
        Vec3::new(
            rng.gen_range(-extent..extent),
            0.0,
            rng.gen_range(-extent..extent),
        )
    }

    /// Whether `point` lies inside the closed square on the floor plane.
    #[must_use]
    pub fn contains(&self, point: Vec3) -> bool {
        point.y == 0.0 && point.x.abs() <= self.half_extent && point.z.abs() <= self.half_extent
    }
}

impl Default for WanderArea {
    fn default() -> Self {
        Self::new(WANDER_HALF_EXTENT)
    }
}

/// Random source for wander targets.
///
/// Seeded explicitly for reproducible runs and tests, from entropy otherwise.
#[derive(Resource, Debug, Clone)]
pub struct WanderRng(ChaCha8Rng);

impl WanderRng {
    /// Creates a generator from `seed`, or from OS entropy when `None`.
    #[must_use]
    pub fn new(seed: Option<u64>) -> Self {
        let rng = seed.map_or_else(ChaCha8Rng::from_entropy, ChaCha8Rng::seed_from_u64);
        Self(rng)
    }

    /// Mutable access to the generator.
    pub fn rng(&mut self) -> &mut ChaCha8Rng {
        &mut self.0
    }
}

impl Default for WanderRng {
    fn default() -> Self {
        Self::new(None)
    }
}
