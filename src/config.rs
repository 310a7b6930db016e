//! Runtime configuration for the scene.
//!
//! [`SceneSettings`] holds every tunable the scene uses. Its `Default`
//! reproduces the stock scene; a JSON file may override any top-level
//! section. A character block that is present must be complete, because the
//! fox and chicken have different defaults and there is no sensible per-field
//! fallback.

use std::fs;
use std::path::{Path, PathBuf};

use bevy::prelude::*;
use serde::Deserialize;
use thiserror::Error;

use crate::constants::{
    ARRIVAL_THRESHOLD, CAMERA_FAR, CAMERA_FOV_DEGREES, CAMERA_LOOK_AT, CAMERA_NEAR,
    CAMERA_POSITION, CHICKEN_HEADING_OFFSET_DEGREES, CHICKEN_MODEL_PATH, CHICKEN_SPEED,
    CHICKEN_START, CHICKEN_TARGET, CHICKEN_WALK_CLIP, FLOOR_CENTER_Y, FLOOR_SIZE,
    FOX_IDLE_CLIP, FOX_MODEL_PATH, FOX_RUN_CLIP, FOX_SPEED, FOX_START, FOX_TARGET,
    WANDER_HALF_EXTENT,
};

/// Errors raised while loading or validating [`SceneSettings`].
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The settings file could not be read.
    #[error("failed to read settings file {}: {source}", .path.display())]
    Read {
        /// File that was requested.
        path: PathBuf,
        /// Underlying I/O failure.
        source: std::io::Error,
    },
    /// The settings document was not valid JSON for [`SceneSettings`].
    #[error("malformed settings: {0}")]
    Parse(#[from] serde_json::Error),
    /// A value parsed but is outside its permitted range.
    #[error("invalid setting `{field}`: {reason}")]
    Invalid {
        /// Dotted path of the offending field.
        field: &'static str,
        /// Why the value was rejected.
        reason: String,
    },
}

/// Per-character configuration.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CharacterSettings {
    /// glTF model path relative to the asset root.
    pub model: String,
    /// Spawn position.
    pub position: [f32; 3],
    /// Initial target. Its `y` is ignored; targets always lie on the floor.
    pub target: [f32; 3],
    /// Movement speed in units per second.
    pub speed: f32,
    /// Clip played while moving.
    pub moving_clip: String,
    /// Clip played once arrived. `None` means the character never rests.
    #[serde(default)]
    pub resting_clip: Option<String>,
    /// Extra yaw applied after facing the target, in degrees.
    #[serde(default)]
    pub heading_offset_degrees: f32,
}

impl CharacterSettings {
    /// Stock fox: runs to tapped points and idles on arrival.
    #[must_use]
    pub fn fox() -> Self {
        Self {
            model: FOX_MODEL_PATH.to_owned(),
            position: FOX_START,
            target: FOX_TARGET,
            speed: FOX_SPEED,
            moving_clip: FOX_RUN_CLIP.to_owned(),
            resting_clip: Some(FOX_IDLE_CLIP.to_owned()),
            heading_offset_degrees: 0.0,
        }
    }

    /// Stock chicken: walks between random points forever.
    #[must_use]
    pub fn chicken() -> Self {
        Self {
            model: CHICKEN_MODEL_PATH.to_owned(),
            position: CHICKEN_START,
            target: CHICKEN_TARGET,
            speed: CHICKEN_SPEED,
            moving_clip: CHICKEN_WALK_CLIP.to_owned(),
            resting_clip: None,
            heading_offset_degrees: CHICKEN_HEADING_OFFSET_DEGREES,
        }
    }

    /// Spawn position as a vector.
    #[must_use]
    pub const fn start(&self) -> Vec3 {
        Vec3::from_array(self.position)
    }

    /// Initial target projected onto the floor plane.
    #[must_use]
    pub const fn floor_target(&self) -> Vec3 {
        let [x, _, z] = self.target;
        Vec3::new(x, 0.0, z)
    }

    /// Heading offset in radians.
    #[must_use]
    pub fn heading_offset(&self) -> f32 {
        self.heading_offset_degrees.to_radians()
    }
}

/// Camera placement and lens.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CameraSettings {
    /// Camera position.
    pub position: [f32; 3],
    /// Point the camera looks at.
    pub look_at: [f32; 3],
    /// Vertical field of view in degrees.
    pub fov_degrees: f32,
    /// Near clipping distance.
    pub near: f32,
    /// Far clipping distance.
    pub far: f32,
}

impl Default for CameraSettings {
    fn default() -> Self {
        Self {
            position: CAMERA_POSITION,
            look_at: CAMERA_LOOK_AT,
            fov_degrees: CAMERA_FOV_DEGREES,
            near: CAMERA_NEAR,
            far: CAMERA_FAR,
        }
    }
}

/// Floor box geometry.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FloorSettings {
    /// Box dimensions (x, y, z).
    pub size: [f32; 3],
    /// Height of the box centre.
    pub center_y: f32,
}

impl Default for FloorSettings {
    fn default() -> Self {
        Self {
            size: FLOOR_SIZE,
            center_y: FLOOR_CENTER_Y,
        }
    }
}

/// Complete scene configuration.
///
/// Inserted as a resource before the plugins are added; the plugins read it
/// during `build` and at startup.
#[derive(Resource, Clone, Debug, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SceneSettings {
    /// The pointer-controlled character.
    pub fox: CharacterSettings,
    /// The wandering character.
    pub chicken: CharacterSettings,
    /// Camera placement.
    pub camera: CameraSettings,
    /// Floor geometry.
    pub floor: FloorSettings,
    /// Arrival distance shared by all characters.
    pub arrival_threshold: f32,
    /// Half the side length of the wander square.
    pub wander_half_extent: f32,
    /// Seed for the wander RNG. `None` seeds from entropy.
    pub seed: Option<u64>,
}

impl Default for SceneSettings {
    fn default() -> Self {
        Self {
            fox: CharacterSettings::fox(),
            chicken: CharacterSettings::chicken(),
            camera: CameraSettings::default(),
            floor: FloorSettings::default(),
            arrival_threshold: ARRIVAL_THRESHOLD,
            wander_half_extent: WANDER_HALF_EXTENT,
            seed: None,
        }
    }
}

impl SceneSettings {
    /// Parses and validates settings from a JSON document.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for malformed JSON and
    /// [`ConfigError::Invalid`] for out-of-range values.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let settings: Self = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Reads, parses, and validates a JSON settings file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Read`] when the file cannot be read, otherwise
    /// the errors of [`SceneSettings::from_json_str`].
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let json = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&json)
    }

    /// Checks every value the simulation relies on.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] naming the first offending field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_character(&self.fox, &FOX_FIELDS)?;
        check_character(&self.chicken, &CHICKEN_FIELDS)?;
        ensure_positive("arrival_threshold", self.arrival_threshold)?;
        ensure_positive("wander_half_extent", self.wander_half_extent)?;

        let fov = self.camera.fov_degrees;
        if !(fov > 0.0 && fov < 180.0) {
            return Err(ConfigError::Invalid {
                field: "camera.fov_degrees",
                reason: format!("{fov} is outside (0, 180)"),
            });
        }
        ensure_positive("camera.near", self.camera.near)?;
        if self.camera.far <= self.camera.near {
            return Err(ConfigError::Invalid {
                field: "camera.far",
                reason: format!(
                    "{} must exceed camera.near ({})",
                    self.camera.far, self.camera.near
                ),
            });
        }
        if Vec3::from_array(self.camera.position) == Vec3::from_array(self.camera.look_at) {
            return Err(ConfigError::Invalid {
                field: "camera.look_at",
                reason: "must differ from camera.position".to_owned(),
            });
        }

        for extent in self.floor.size {
            ensure_positive("floor.size", extent)?;
        }
        Ok(())
    }
}

/// Dotted field names reported for one character block.
struct CharacterFields {
    speed: &'static str,
    model: &'static str,
    moving_clip: &'static str,
}

const FOX_FIELDS: CharacterFields = CharacterFields {
    speed: "fox.speed",
    model: "fox.model",
    moving_clip: "fox.moving_clip",
};

const CHICKEN_FIELDS: CharacterFields = CharacterFields {
    speed: "chicken.speed",
    model: "chicken.model",
    moving_clip: "chicken.moving_clip",
};

fn check_character(
    character: &CharacterSettings,
    fields: &CharacterFields,
) -> Result<(), ConfigError> {
    ensure_positive(fields.speed, character.speed)?;
    ensure_not_blank(fields.model, &character.model)?;
    ensure_not_blank(fields.moving_clip, &character.moving_clip)
}

fn ensure_not_blank(field: &'static str, value: &str) -> Result<(), ConfigError> {
    if value.trim().is_empty() {
        Err(ConfigError::Invalid {
            field,
            reason: "must not be empty".to_owned(),
        })
    } else {
        Ok(())
    }
}

fn ensure_positive(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::Invalid {
            field,
            reason: format!("{value} must be a positive finite number"),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn defaults_validate() {
        assert!(SceneSettings::default().validate().is_ok());
    }

    #[test]
    fn empty_document_yields_defaults() {
        let settings = SceneSettings::from_json_str("{}").expect("empty object is valid");
        assert_eq!(settings, SceneSettings::default());
    }

    #[test]
    fn top_level_override_keeps_other_sections() {
        let settings = SceneSettings::from_json_str(r#"{ "seed": 7, "camera": { "fov_degrees": 60 } }"#)
            .expect("override parses");
        assert_eq!(settings.seed, Some(7));
        assert!((settings.camera.fov_degrees - 60.0).abs() < f32::EPSILON);
        assert_eq!(settings.camera.position, CAMERA_POSITION);
        assert_eq!(settings.fox, CharacterSettings::fox());
    }

    #[test]
    fn floor_target_drops_height() {
        let mut fox = CharacterSettings::fox();
        fox.target = [1.0, 9.0, 2.0];
        assert_eq!(fox.floor_target(), Vec3::new(1.0, 0.0, 2.0));
    }

    #[rstest]
    #[case::zero_speed(r#"{ "fox": { "model": "f.gltf", "position": [0,0,0], "target": [1,0,1], "speed": 0, "moving_clip": "Run" } }"#, "fox.speed")]
    #[case::negative_threshold(r#"{ "arrival_threshold": -1 }"#, "arrival_threshold")]
    #[case::flat_fov(r#"{ "camera": { "fov_degrees": 180 } }"#, "camera.fov_degrees")]
    #[case::inverted_clip_planes(r#"{ "camera": { "near": 10, "far": 1 } }"#, "camera.far")]
    #[case::flat_floor(r#"{ "floor": { "size": [16, 0, 20] } }"#, "floor.size")]
    fn rejects_out_of_range_values(#[case] json: &str, #[case] expected_field: &str) {
        match SceneSettings::from_json_str(json) {
            Err(ConfigError::Invalid { field, .. }) => assert_eq!(field, expected_field),
            other => panic!("expected invalid `{expected_field}`, got {other:?}"),
        }
    }

    #[test]
    fn rejects_unknown_fields() {
        let result = SceneSettings::from_json_str(r#"{ "gravity": 9.8 }"#);
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn missing_file_reports_path() {
        let path = Path::new("definitely/not/here.json");
        match SceneSettings::from_path(path) {
            Err(ConfigError::Read { path: reported, .. }) => assert_eq!(reported, path),
            other => panic!("expected read error, got {other:?}"),
        }
    }
}
