//! Scene bootstrap: load the character models, validate them, spawn the world.
//!
//! `ChaseScenePlugin` drives [`SceneState`] from `Loading` to either `Ready`
//! or `Failed`. Nothing is spawned until both models and all required clips
//! are available. Any [`SceneSetupError`] is fatal: it is logged, the state
//! moves to `Failed`, and the app is asked to exit with an error code.

mod assets;
mod spawn;

use bevy::prelude::*;
use log::error;
use thiserror::Error;

pub use assets::{
    load_character_assets_system, monitor_character_assets_system, require_clip,
    validate_asset_path, CharacterRole, LoadedCharacter, LoadedCharacters, PendingCharacterAssets,
};
pub use spawn::spawn_scene_system;

use crate::animation::CharacterAnimationPlugin;
use crate::picking::PickingPlugin;
use crate::simulation::SimulationPlugin;

/// Readiness of the chase scene.
#[derive(States, Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SceneState {
    /// Models are loading; nothing is spawned.
    #[default]
    Loading,
    /// Everything is spawned and interactive.
    Ready,
    /// Setup failed; the app is shutting down.
    Failed,
}

/// Reasons the scene could not be built.
#[derive(Event, Error, Debug, Clone, PartialEq, Eq)]
pub enum SceneSetupError {
    /// A configured model path is not a valid relative asset path.
    #[error("invalid asset path {path:?}")]
    InvalidAssetPath {
        /// Path as configured.
        path: String,
    },
    /// The asset server could not load a model or one of its dependencies.
    #[error("failed to load {path}: {detail}")]
    AssetLoadFailed {
        /// Asset-server path of the model.
        path: String,
        /// Loader error message.
        detail: String,
    },
    /// A model lacks a named animation clip the scene relies on.
    #[error("{path} has no animation clip named {clip:?}")]
    MissingClip {
        /// Asset-server path of the model.
        path: String,
        /// Name of the absent clip.
        clip: String,
    },
    /// A model contains no scene to instantiate.
    #[error("{path} contains no scene")]
    MissingScene {
        /// Asset-server path of the model.
        path: String,
    },
}

#[expect(
    clippy::needless_pass_by_value,
    reason = "Observer systems must accept On<T> by value for Events V2."
)]
fn fail_scene_setup(
    event: On<SceneSetupError>,
    mut next_state: ResMut<NextState<SceneState>>,
    mut exit: MessageWriter<AppExit>,
) {
    error!("scene setup failed: {}", event.event());
    next_state.set(SceneState::Failed);
    exit.write(AppExit::error());
}

/// Bevy plugin that loads and spawns the fox-and-chicken scene.
///
/// Requires the engine's asset, state, and glTF plugins, all of which
/// `DefaultPlugins` provides. Reads [`crate::config::SceneSettings`] when it
/// is inserted before the plugin; uses defaults otherwise.
#[derive(Debug, Default)]
pub struct ChaseScenePlugin;

impl Plugin for ChaseScenePlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<crate::config::SceneSettings>();
        app.init_resource::<PendingCharacterAssets>();
        app.init_state::<SceneState>();
        app.add_observer(fail_scene_setup);

        app.add_systems(Startup, load_character_assets_system);
        app.add_systems(
            Update,
            monitor_character_assets_system.run_if(in_state(SceneState::Loading)),
        );
        app.add_systems(OnEnter(SceneState::Ready), spawn_scene_system);
    }
}

/// Everything the interactive scene needs, in one plugin.
#[derive(Debug, Default)]
pub struct FoxChasePlugin;

impl Plugin for FoxChasePlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins((
            ChaseScenePlugin,
            SimulationPlugin,
            CharacterAnimationPlugin,
            PickingPlugin,
        ));
    }
}
