//! Spawning the floor, characters, camera and lights once models are ready.

use bevy::prelude::*;
use bevy_ecs::system::SystemParam;
use log::info;

use super::assets::{CharacterRole, LoadedCharacter, LoadedCharacters};
use crate::animation::CharacterClips;
use crate::components::{Character, Floor, PlayerControlled, SceneCamera};
use crate::config::{CameraSettings, CharacterSettings, FloorSettings, SceneSettings};
use crate::steering::{facing, heading_towards};
use crate::{AMBIENT_INTENSITY, BACKGROUND_COLOR, DIRECTIONAL_INTENSITY, FLOOR_COLOR};

/// Ambient brightness corresponding to a relative intensity of 1.
const FULL_AMBIENT_BRIGHTNESS: f32 = 1_000.0;
/// Directional illuminance in lux corresponding to a relative intensity of 1.
const FULL_DIRECTIONAL_ILLUMINANCE: f32 = 10_000.0;

fn color_from_hex(rgb: u32) -> Color {
    let [_, r, g, b] = rgb.to_be_bytes();
    Color::srgb_u8(r, g, b)
}

/// Assets and configuration needed to spawn the scene.
#[derive(SystemParam)]
pub struct SceneSpawnContext<'w> {
    settings: Res<'w, SceneSettings>,
    loaded: Res<'w, LoadedCharacters>,
    meshes: ResMut<'w, Assets<Mesh>>,
    materials: ResMut<'w, Assets<StandardMaterial>>,
    graphs: ResMut<'w, Assets<AnimationGraph>>,
}

fn spawn_floor(commands: &mut Commands, context: &mut SceneSpawnContext, settings: &FloorSettings) {
    let size = Vec3::from_array(settings.size);
    let center = Vec3::new(0.0, settings.center_y, 0.0);
    commands.spawn((
        Name::new("Floor"),
        Mesh3d(context.meshes.add(Cuboid::from_size(size))),
        MeshMaterial3d(context.materials.add(color_from_hex(FLOOR_COLOR))),
        Transform::from_translation(center),
        Floor::from_size(center, size),
    ));
}

fn spawn_character(
    commands: &mut Commands,
    graphs: &mut Assets<AnimationGraph>,
    role: CharacterRole,
    loaded: &LoadedCharacter,
    settings: &CharacterSettings,
) {
    let mut graph = AnimationGraph::new();
    let root = graph.root;
    let moving = graph.add_clip(loaded.moving.clone(), 1.0, root);
    let resting = loaded
        .resting
        .clone()
        .map(|clip| graph.add_clip(clip, 1.0, root));
    let clips = CharacterClips {
        graph: graphs.add(graph),
        moving,
        resting,
    };

    let start = settings.start();
    let target = settings.floor_target();
    let heading_offset = settings.heading_offset();
    let mut entity = commands.spawn((
        Name::new(role.name()),
        SceneRoot(loaded.scene.clone()),
        Transform::from_translation(start)
            .with_rotation(facing(heading_towards(target - start), heading_offset)),
        Character::new(target, settings.speed).with_heading_offset(heading_offset),
        role.arrival_policy(),
        clips,
    ));
    if role.is_player_controlled() {
        entity.insert(PlayerControlled);
    }
    info!("spawned {} at {start} heading for {target}", role.name());
}

fn spawn_camera(commands: &mut Commands, settings: &CameraSettings) {
    commands.spawn((
        Name::new("SceneCamera"),
        Camera3d::default(),
        Projection::Perspective(PerspectiveProjection {
            fov: settings.fov_degrees.to_radians(),
            near: settings.near,
            far: settings.far,
            ..default()
        }),
        Transform::from_translation(Vec3::from_array(settings.position))
            .looking_at(Vec3::from_array(settings.look_at), Vec3::Y),
        AmbientLight {
            color: Color::WHITE,
            brightness: AMBIENT_INTENSITY * FULL_AMBIENT_BRIGHTNESS,
            ..default()
        },
        SceneCamera,
    ));
}

fn spawn_lights(commands: &mut Commands) {
    commands.insert_resource(ClearColor(color_from_hex(BACKGROUND_COLOR)));
    commands.spawn((
        Name::new("DirectionalLight"),
        DirectionalLight {
            color: Color::WHITE,
            illuminance: DIRECTIONAL_INTENSITY * FULL_DIRECTIONAL_ILLUMINANCE,
            ..default()
        },
        Transform::from_xyz(0.0, 1.0, 0.0).looking_at(Vec3::ZERO, Vec3::NEG_Z),
    ));
}

/// Builds the whole scene from the validated models.
pub fn spawn_scene_system(mut commands: Commands, mut context: SceneSpawnContext) {
    let settings = context.settings.clone();
    spawn_floor(&mut commands, &mut context, &settings.floor);

    let loaded = context.loaded.clone();
    for (role, character) in loaded.iter() {
        spawn_character(
            &mut commands,
            &mut context.graphs,
            role,
            character,
            role.settings(&settings),
        );
    }

    spawn_camera(&mut commands, &settings.camera);
    spawn_lights(&mut commands);
    info!("scene ready");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_colours_are_read_as_srgb_bytes() {
        assert_eq!(color_from_hex(0x00a8_a8a8), Color::srgb_u8(0xa8, 0xa8, 0xa8));
        assert_eq!(color_from_hex(FLOOR_COLOR), Color::srgb_u8(0x9c, 0x9c, 0x9c));
    }
}
