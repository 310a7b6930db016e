//! ECS component types used by the scene.
//! Character steering state, arrival behaviour, and the static pick targets.
use bevy::math::bounding::Aabb3d;
use bevy::prelude::*;

/// Steering state for a moving character.
///
/// The entity's `Transform` carries position and orientation; this component
/// carries what the simulation needs on top of it. `target.y` is always 0.
#[derive(Component, Reflect, Debug, Clone, Copy, PartialEq)]
#[reflect(Component)]
#[require(Transform, Locomotion)]
pub struct Character {
    target: Vec3,
    /// Units per second.
    pub speed: f32,
    /// Extra yaw in radians applied after facing the target.
    pub heading_offset: f32,
}

impl Character {
    /// Creates a character heading for `target` (projected onto the floor).
    #[must_use]
    pub const fn new(target: Vec3, speed: f32) -> Self {
        Self {
            target: Vec3::new(target.x, 0.0, target.z),
            speed,
            heading_offset: 0.0,
        }
    }

    /// Sets the yaw correction for models whose forward axis is not +Z.
    #[must_use]
    pub const fn with_heading_offset(mut self, radians: f32) -> Self {
        self.heading_offset = radians;
        self
    }

    /// Current target on the floor plane.
    #[must_use]
    pub const fn target(&self) -> Vec3 {
        self.target
    }

    /// Retargets the character. The height is dropped onto the floor plane.
    pub fn set_target(&mut self, target: Vec3) {
        self.target = Vec3::new(target.x, 0.0, target.z);
    }
}

/// What a character does once it reaches its target.
#[derive(Component, Reflect, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[reflect(Component, Default)]
pub enum ArrivalPolicy {
    /// Stop and switch to the resting clip.
    #[default]
    Rest,
    /// Pick a fresh random target and keep walking.
    Wander,
}

/// Whether a character is currently travelling.
///
/// Written only on transitions, so `Changed<Locomotion>` marks the frames
/// where the animation has to switch.
#[derive(Component, Reflect, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[reflect(Component, Default)]
pub enum Locomotion {
    /// Heading for the target.
    #[default]
    Moving,
    /// Arrived and waiting for a new target.
    Resting,
}

/// Marks the character whose target follows pointer picks.
#[derive(Component, Reflect, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[reflect(Component, Default)]
pub struct PlayerControlled;

/// Static floor box; the only surface pointer rays are tested against.
#[derive(Component, Reflect, Debug, Clone, Copy, PartialEq)]
#[reflect(Component)]
pub struct Floor {
    /// Box centre in world space.
    pub center: Vec3,
    /// Half the box dimensions.
    pub half_extents: Vec3,
}

impl Floor {
    /// Builds a floor from its full dimensions.
    #[must_use]
    pub fn from_size(center: Vec3, size: Vec3) -> Self {
        Self {
            center,
            half_extents: size * 0.5,
        }
    }

    /// The box as a bounding volume for ray casts.
    #[must_use]
    pub fn aabb(&self) -> Aabb3d {
        Aabb3d::new(self.center, self.half_extents)
    }

    /// Height of the walkable top face.
    #[must_use]
    pub fn top(&self) -> f32 {
        self.center.y + self.half_extents.y
    }
}

/// Marks the camera used for rendering and picking.
#[derive(Component, Reflect, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[reflect(Component, Default)]
pub struct SceneCamera;
