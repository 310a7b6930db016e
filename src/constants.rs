//! Scene and simulation constants.
//!
//! These are the defaults baked into [`crate::config::SceneSettings`]; a
//! settings file or CLI flags may override most of them at startup.

/// Distance to target at or below which a character counts as arrived.
pub const ARRIVAL_THRESHOLD: f32 = 0.1;
/// Half the side length of the square the chicken wanders inside.
pub const WANDER_HALF_EXTENT: f32 = 5.0;

/// Fox model, relative to the asset root.
pub const FOX_MODEL_PATH: &str = "models/fox.gltf";
/// Fox spawn position.
pub const FOX_START: [f32; 3] = [-1.0, 0.0, 0.0];
/// Fox initial target.
pub const FOX_TARGET: [f32; 3] = [4.0, 0.0, 3.0];
/// Fox speed in units per second.
pub const FOX_SPEED: f32 = 3.0;
/// Clip the fox plays while moving.
pub const FOX_RUN_CLIP: &str = "Run";
/// Clip the fox plays once it has arrived.
pub const FOX_IDLE_CLIP: &str = "Idle";

/// Chicken model, relative to the asset root.
pub const CHICKEN_MODEL_PATH: &str = "models/chicken.gltf";
/// Chicken spawn position.
pub const CHICKEN_START: [f32; 3] = [1.0, 0.0, 0.0];
/// Chicken initial target.
pub const CHICKEN_TARGET: [f32; 3] = [-2.0, 0.0, -3.0];
/// Chicken speed in units per second.
pub const CHICKEN_SPEED: f32 = 0.6;
/// Clip the chicken plays at all times.
pub const CHICKEN_WALK_CLIP: &str = "Walk";
/// The chicken model faces +X rather than +Z, so its yaw is corrected.
pub const CHICKEN_HEADING_OFFSET_DEGREES: f32 = -90.0;

/// Floor box dimensions (x, y, z). The top face sits on `y = 0`.
pub const FLOOR_SIZE: [f32; 3] = [16.0, 1.0, 20.0];
/// Floor box centre height.
pub const FLOOR_CENTER_Y: f32 = -0.5;
/// Floor colour as `0xRRGGBB`.
pub const FLOOR_COLOR: u32 = 0x009c_9c9c;
/// Clear colour as `0xRRGGBB`.
pub const BACKGROUND_COLOR: u32 = 0x00a8_a8a8;

/// Camera position.
pub const CAMERA_POSITION: [f32; 3] = [0.0, 5.0, 15.0];
/// Point the camera looks at.
pub const CAMERA_LOOK_AT: [f32; 3] = [0.0, 0.0, 0.0];
/// Vertical field of view.
pub const CAMERA_FOV_DEGREES: f32 = 75.0;
/// Near clipping distance.
pub const CAMERA_NEAR: f32 = 0.1;
/// Far clipping distance.
pub const CAMERA_FAR: f32 = 1000.0;

/// Ambient light intensity relative to full white.
pub const AMBIENT_INTENSITY: f32 = 0.5;
/// Directional light intensity relative to full white.
pub const DIRECTIONAL_INTENSITY: f32 = 0.4;
