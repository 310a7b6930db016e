//! Spawn helpers mirroring the default scene layout.

use bevy::prelude::*;
use foxchase::config::CharacterSettings;
use foxchase::{ArrivalPolicy, Character, Floor, PlayerControlled, SceneSettings};

/// Spawns a character from its settings block.
pub fn spawn_character(
    world: &mut World,
    settings: &CharacterSettings,
    policy: ArrivalPolicy,
) -> Entity {
    world
        .spawn((
            Transform::from_translation(settings.start()),
            Character::new(settings.floor_target(), settings.speed)
                .with_heading_offset(settings.heading_offset()),
            policy,
        ))
        .id()
}

/// Spawns the default fox: player controlled, rests on arrival.
pub fn spawn_fox(world: &mut World) -> Entity {
    let fox = spawn_character(world, &CharacterSettings::fox(), ArrivalPolicy::Rest);
    world.entity_mut(fox).insert(PlayerControlled);
    fox
}

/// Spawns the default chicken: wanders forever.
pub fn spawn_chicken(world: &mut World) -> Entity {
    spawn_character(world, &CharacterSettings::chicken(), ArrivalPolicy::Wander)
}

/// Spawns the default floor box.
pub fn spawn_floor(world: &mut World) -> Entity {
    let floor = SceneSettings::default().floor;
    let center = Vec3::new(0.0, floor.center_y, 0.0);
    world
        .spawn((
            Transform::from_translation(center),
            Floor::from_size(center, Vec3::from_array(floor.size)),
        ))
        .id()
}

/// Spawns the default perspective scene camera.
///
/// `GlobalTransform` is written directly because headless apps have no
/// transform propagation.
#[cfg(feature = "render")]
pub fn spawn_scene_camera(world: &mut World) -> Entity {
    let camera = SceneSettings::default().camera;
    let transform = Transform::from_translation(Vec3::from_array(camera.position))
        .looking_at(Vec3::from_array(camera.look_at), Vec3::Y);
    world
        .spawn((
            transform,
            GlobalTransform::from(transform),
            Projection::Perspective(PerspectiveProjection {
                fov: camera.fov_degrees.to_radians(),
                near: camera.near,
                far: camera.far,
                ..default()
            }),
            foxchase::SceneCamera,
        ))
        .id()
}

/// Position of `entity`.
///
/// # Panics
/// Panics if the entity has no `Transform`.
#[must_use]
pub fn position(world: &World, entity: Entity) -> Vec3 {
    world
        .get::<Transform>(entity)
        .unwrap_or_else(|| panic!("{entity} has no Transform"))
        .translation
}

/// Current target of `entity`.
///
/// # Panics
/// Panics if the entity is not a character.
#[must_use]
pub fn target(world: &World, entity: Entity) -> Vec3 {
    world
        .get::<Character>(entity)
        .unwrap_or_else(|| panic!("{entity} is not a character"))
        .target()
}
