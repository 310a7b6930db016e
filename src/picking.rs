//! Pointer-to-floor picking.
//!
//! A tap (or a held left mouse button) becomes a [`PickRequest`] in logical
//! window pixels. The request is converted to normalised device coordinates,
//! cast as a ray from the scene camera, and tested against the [`Floor`] box
//! only. A hit retargets the player-controlled character; a miss changes
//! nothing.
//!
//! The geometry is plain functions so it can be tested without a window.
//! The ECS glue requires the `render` feature because it reads the camera's
//! `Projection` and the primary window.

use bevy::math::bounding::RayCast3d;
use bevy::prelude::*;

use crate::components::Floor;

/// Window size and pixel density needed to map pointer positions.
#[derive(Resource, Debug, Clone, Copy, PartialEq)]
pub struct ViewportMetrics {
    /// Drawing buffer size in physical pixels.
    pub physical_size: UVec2,
    /// Physical pixels per logical pixel.
    pub scale_factor: f32,
}

impl ViewportMetrics {
    /// Width over height, or `None` for an empty viewport.
    #[must_use]
    pub fn aspect_ratio(&self) -> Option<f32> {
        let size = self.physical_size.as_vec2();
        (size.x > 0.0 && size.y > 0.0).then(|| size.x / size.y)
    }
}

/// Vertical field of view and aspect ratio of a perspective camera.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PerspectiveLens {
    /// Vertical field of view in radians.
    pub fov_y: f32,
    /// Width over height.
    pub aspect_ratio: f32,
}

/// Converts a logical pointer position to normalised device coordinates.
///
/// The position is scaled to physical pixels first, matching how the
/// drawing buffer is measured. The result has +y up and spans `-1..1` across
/// the viewport. Returns `None` for an empty viewport.
///
/// # Examples
///
/// ```
/// use bevy::math::{UVec2, Vec2};
/// use foxchase::picking::{screen_to_ndc, ViewportMetrics};
///
/// let metrics = ViewportMetrics { physical_size: UVec2::new(1600, 1200), scale_factor: 2.0 };
/// let centre = screen_to_ndc(Vec2::new(400.0, 300.0), &metrics).unwrap();
/// assert!(centre.length() < 1e-6);
/// ```
#[must_use]
pub fn screen_to_ndc(position: Vec2, metrics: &ViewportMetrics) -> Option<Vec2> {
    metrics.aspect_ratio()?;
    let physical = position * metrics.scale_factor;
    let size = metrics.physical_size.as_vec2();
    Some(Vec2::new(
        (physical.x / size.x) * 2.0 - 1.0,
        (1.0 - physical.y / size.y) * 2.0 - 1.0,
    ))
}

/// Builds the world-space ray through `ndc` for a perspective camera.
///
/// The camera looks down its local -Z axis with +Y up.
#[must_use]
pub fn camera_ray(ndc: Vec2, camera: &Transform, lens: PerspectiveLens) -> Option<Ray3d> {
    let half_height = (lens.fov_y * 0.5).tan();
    let view_direction = Vec3::new(
        ndc.x * half_height * lens.aspect_ratio,
        ndc.y * half_height,
        -1.0,
    );
    let direction = Dir3::new(camera.rotation * view_direction).ok()?;
    Some(Ray3d::new(camera.translation, direction))
}

/// First point where `ray` enters the floor box.
#[must_use]
pub fn floor_hit(ray: Ray3d, floor: &Floor) -> Option<Vec3> {
    RayCast3d::from_ray(ray, f32::MAX)
        .aabb_intersection_at(&floor.aabb())
        .map(|distance| ray.get_point(distance))
}

/// Maps a pointer position to a floor target with `y = 0`.
///
/// Combines [`screen_to_ndc`], [`camera_ray`], and [`floor_hit`]. The aspect
/// ratio comes from the viewport so it matches the drawing buffer.
#[must_use]
pub fn pick_floor_target(
    position: Vec2,
    metrics: &ViewportMetrics,
    camera: &Transform,
    fov_y: f32,
    floor: &Floor,
) -> Option<Vec3> {
    let ndc = screen_to_ndc(position, metrics)?;
    let lens = PerspectiveLens {
        fov_y,
        aspect_ratio: metrics.aspect_ratio()?,
    };
    let hit = floor_hit(camera_ray(ndc, camera, lens)?, floor)?;
    Some(Vec3::new(hit.x, 0.0, hit.z))
}

/// A pointer press or drag, in logical window pixels.
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct PickRequest {
    /// Pointer position relative to the window's top-left corner.
    pub screen_position: Vec2,
}

#[cfg(feature = "render")]
pub use systems::{
    collect_pointer_input_system, pick_floor_target_observer, track_viewport_system,
    PickingPlugin,
};

#[cfg(feature = "render")]
mod systems {
    use bevy::input::touch::{TouchInput, TouchPhase};
    use bevy::prelude::*;
    use bevy::window::PrimaryWindow;
    use log::debug;

    use super::{pick_floor_target, PickRequest, ViewportMetrics};
    use crate::components::{Character, Floor, PlayerControlled, SceneCamera};
    use crate::scene::SceneState;

    /// Mirrors the primary window's drawing buffer into [`ViewportMetrics`].
    ///
    /// The resource is removed while the window has no area, which disables
    /// picking until it is restored.
    #[expect(
        clippy::needless_pass_by_value,
        reason = "Bevy system parameters use `Query<T>` by value."
    )]
    pub fn track_viewport_system(
        mut commands: Commands,
        windows: Query<&Window, (With<PrimaryWindow>, Changed<Window>)>,
    ) {
        let Ok(window) = windows.single() else {
            return;
        };

        let metrics = ViewportMetrics {
            physical_size: UVec2::new(window.physical_width(), window.physical_height()),
            scale_factor: window.scale_factor(),
        };
        if metrics.aspect_ratio().is_some() {
            commands.insert_resource(metrics);
        } else {
            commands.remove_resource::<ViewportMetrics>();
        }
    }

    /// Turns touch starts, touch moves, and left-button drags into picks.
    ///
    /// Touches are read as messages so a finger held still after moving
    /// produces no further picks.
    #[expect(
        clippy::needless_pass_by_value,
        reason = "Bevy system parameters use `Res<T>` by value."
    )]
    pub fn collect_pointer_input_system(
        mut commands: Commands,
        mut touches: MessageReader<TouchInput>,
        mouse: Res<ButtonInput<MouseButton>>,
        windows: Query<&Window, With<PrimaryWindow>>,
    ) {
        for touch in touches
            .read()
            .filter(|touch| matches!(touch.phase, TouchPhase::Started | TouchPhase::Moved))
        {
            commands.trigger(PickRequest {
                screen_position: touch.position,
            });
        }

        if !mouse.pressed(MouseButton::Left) {
            return;
        }
        if let Some(cursor) = windows.single().ok().and_then(Window::cursor_position) {
            commands.trigger(PickRequest {
                screen_position: cursor,
            });
        }
    }

    /// Retargets the player-controlled character when a pick hits the floor.
    ///
    /// Missing prerequisites (viewport, camera, floor, or character) make the
    /// request a no-op; this is the normal case before the scene is ready.
    #[expect(
        clippy::needless_pass_by_value,
        reason = "Observer systems must accept On<T> by value for Events V2."
    )]
    pub fn pick_floor_target_observer(
        request: On<PickRequest>,
        metrics: Option<Res<ViewportMetrics>>,
        cameras: Query<(&GlobalTransform, &Projection), With<SceneCamera>>,
        floors: Query<&Floor>,
        mut players: Query<&mut Character, With<PlayerControlled>>,
    ) {
        let position = request.event().screen_position;
        let Some(metrics) = metrics else {
            debug!("pick at {position} ignored: viewport not ready");
            return;
        };
        let Ok((camera_transform, projection)) = cameras.single() else {
            debug!("pick at {position} ignored: no scene camera");
            return;
        };
        let Projection::Perspective(perspective) = projection else {
            debug!("pick at {position} ignored: camera is not perspective");
            return;
        };
        let Ok(floor) = floors.single() else {
            debug!("pick at {position} ignored: no floor");
            return;
        };
        let Ok(mut player) = players.single_mut() else {
            debug!("pick at {position} ignored: no player character");
            return;
        };

        let camera = camera_transform.compute_transform();
        match pick_floor_target(position, &metrics, &camera, perspective.fov, floor) {
            Some(target) => {
                debug!("pick at {position} retargeted player to {target}");
                player.set_target(target);
            }
            None => debug!("pick at {position} missed the floor"),
        }
    }

    /// Bevy plugin wiring pointer input into floor picking.
    ///
    /// Input is only collected while the scene is [`SceneState::Ready`]; the
    /// observer itself is always installed so hosts can trigger
    /// [`PickRequest`] directly.
    #[derive(Debug, Default)]
    pub struct PickingPlugin;

    impl Plugin for PickingPlugin {
        fn build(&self, app: &mut App) {
            app.add_observer(pick_floor_target_observer);
            app.add_systems(
                PreUpdate,
                (
                    track_viewport_system,
                    collect_pointer_input_system.run_if(in_state(SceneState::Ready)),
                )
                    .chain()
                    .after(bevy::input::InputSystems),
            );
        }
    }
}
