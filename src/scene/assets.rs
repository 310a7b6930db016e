//! Loading and validating the character models.

use std::path::{Component as PathComponent, Path};

use bevy::asset::RecursiveDependencyLoadState;
use bevy::gltf::Gltf;
use bevy::prelude::*;
use bevy_ecs::system::SystemParam;
use log::info;

use super::{SceneSetupError, SceneState};
use crate::components::ArrivalPolicy;
use crate::config::{CharacterSettings, SceneSettings};

/// The two characters in the scene.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CharacterRole {
    /// Follows pointer picks and rests on arrival.
    Fox,
    /// Wanders forever.
    Chicken,
}

impl CharacterRole {
    /// Every role, in spawn order.
    pub const ALL: [Self; 2] = [Self::Fox, Self::Chicken];

    /// Entity name for the character.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Fox => "Fox",
            Self::Chicken => "Chicken",
        }
    }

    /// Behaviour once the target is reached.
    #[must_use]
    pub const fn arrival_policy(self) -> ArrivalPolicy {
        match self {
            Self::Fox => ArrivalPolicy::Rest,
            Self::Chicken => ArrivalPolicy::Wander,
        }
    }

    /// Whether pointer picks retarget this character.
    #[must_use]
    pub const fn is_player_controlled(self) -> bool {
        matches!(self, Self::Fox)
    }

    /// The configuration block for this role.
    #[must_use]
    pub const fn settings(self, settings: &SceneSettings) -> &CharacterSettings {
        match self {
            Self::Fox => &settings.fox,
            Self::Chicken => &settings.chicken,
        }
    }
}

/// Rejects asset paths the asset server would resolve outside its root.
///
/// # Errors
///
/// Returns [`SceneSetupError::InvalidAssetPath`] for empty, absolute, or
/// parent-relative paths.
pub fn validate_asset_path(path: &str) -> Result<(), SceneSetupError> {
    let escapes_root = Path::new(path)
        .components()
        .any(|component| matches!(component, PathComponent::ParentDir));
    if path.trim().is_empty() || path.starts_with('/') || escapes_root {
        return Err(SceneSetupError::InvalidAssetPath {
            path: path.to_owned(),
        });
    }
    Ok(())
}

/// Looks up a named clip, reporting which asset lacked it.
///
/// # Errors
///
/// Returns [`SceneSetupError::MissingClip`] when `lookup` has no entry.
pub fn require_clip<H>(
    lookup: impl Fn(&str) -> Option<H>,
    path: &str,
    clip: &str,
) -> Result<H, SceneSetupError> {
    lookup(clip).ok_or_else(|| SceneSetupError::MissingClip {
        path: path.to_owned(),
        clip: clip.to_owned(),
    })
}

/// Handles extracted from a validated model.
#[derive(Debug, Clone)]
pub struct LoadedCharacter {
    /// Scene to instantiate.
    pub scene: Handle<Scene>,
    /// Clip looped while moving.
    pub moving: Handle<AnimationClip>,
    /// Clip looped while resting.
    pub resting: Option<Handle<AnimationClip>>,
}

/// Validated models, available once the scene is ready.
#[derive(Resource, Debug, Clone, Default)]
pub struct LoadedCharacters {
    characters: Vec<(CharacterRole, LoadedCharacter)>,
}

impl LoadedCharacters {
    /// Every loaded character.
    #[must_use = "iterators are lazy"]
    pub fn iter(&self) -> impl Iterator<Item = (CharacterRole, &LoadedCharacter)> {
        self.characters.iter().map(|(role, character)| (*role, character))
    }
}

fn resolve_character(
    path: &str,
    gltf: &Gltf,
    settings: &CharacterSettings,
) -> Result<LoadedCharacter, SceneSetupError> {
    let scene = gltf
        .default_scene
        .clone()
        .or_else(|| gltf.scenes.first().cloned())
        .ok_or_else(|| SceneSetupError::MissingScene {
            path: path.to_owned(),
        })?;

    let lookup = |name: &str| gltf.named_animations.get(name).cloned();
    let moving = require_clip(lookup, path, &settings.moving_clip)?;
    let resting = settings
        .resting_clip
        .as_deref()
        .map(|clip| require_clip(lookup, path, clip))
        .transpose()?;

    Ok(LoadedCharacter {
        scene,
        moving,
        resting,
    })
}

#[derive(Debug, Clone)]
struct PendingCharacter {
    role: CharacterRole,
    path: String,
    handle: Handle<Gltf>,
}

/// Tracks the model loads started at startup.
///
/// Hosts that already hold the models can [`track`](Self::track) them before
/// the first update; startup loading is then skipped.
#[derive(Resource, Debug, Default)]
pub struct PendingCharacterAssets {
    entries: Vec<PendingCharacter>,
    has_finalised: bool,
}

impl PendingCharacterAssets {
    /// Registers an existing model handle for `role`.
    ///
    /// # Errors
    ///
    /// Returns [`SceneSetupError::InvalidAssetPath`] when `path` would not be
    /// accepted by the asset server.
    pub fn track(
        &mut self,
        role: CharacterRole,
        path: impl Into<String>,
        handle: Handle<Gltf>,
    ) -> Result<(), SceneSetupError> {
        let path = path.into();
        validate_asset_path(&path)?;
        self.entries.retain(|entry| entry.role != role);
        self.entries.push(PendingCharacter { role, path, handle });
        Ok(())
    }

    /// Whether loading has finished, successfully or not.
    #[must_use]
    pub const fn has_finalised(&self) -> bool {
        self.has_finalised
    }
}

/// Starts loading both models after validating their paths.
#[expect(
    clippy::needless_pass_by_value,
    reason = "Bevy system parameters use `Res<T>` by value."
)]
pub fn load_character_assets_system(
    mut commands: Commands,
    asset_server: Res<AssetServer>,
    settings: Res<SceneSettings>,
    mut pending: ResMut<PendingCharacterAssets>,
) {
    if !pending.entries.is_empty() {
        return;
    }
    let invalid = CharacterRole::ALL
        .iter()
        .map(|role| validate_asset_path(&role.settings(&settings).model))
        .find_map(Result::err);
    if let Some(err) = invalid {
        pending.has_finalised = true;
        commands.trigger(err);
        return;
    }

    pending.entries = CharacterRole::ALL
        .iter()
        .map(|&role| {
            let path = role.settings(&settings).model.clone();
            info!("loading {} model from {path}", role.name());
            PendingCharacter {
                role,
                handle: asset_server.load(path.clone()),
                path,
            }
        })
        .collect();
    pending.has_finalised = false;
}

/// Resources read while validating loaded models.
#[derive(SystemParam)]
pub struct CharacterAssetContext<'w> {
    asset_server: Res<'w, AssetServer>,
    gltfs: Res<'w, Assets<Gltf>>,
    settings: Res<'w, SceneSettings>,
    next_state: ResMut<'w, NextState<SceneState>>,
}

/// Waits for both models, validates them, and marks the scene ready.
pub fn monitor_character_assets_system(
    mut commands: Commands,
    mut context: CharacterAssetContext,
    mut pending: ResMut<PendingCharacterAssets>,
) {
    if pending.has_finalised || pending.entries.is_empty() {
        return;
    }

    let mut still_loading = false;
    let mut failure = None;
    for entry in &pending.entries {
        match context
            .asset_server
            .recursive_dependency_load_state(entry.handle.id())
        {
            RecursiveDependencyLoadState::Loaded => {}
            RecursiveDependencyLoadState::Failed(error) => {
                failure = Some(SceneSetupError::AssetLoadFailed {
                    path: entry.path.clone(),
                    detail: error.to_string(),
                });
                break;
            }
            // Assets added straight to `Assets<Gltf>` are never tracked by
            // the server and stay `NotLoaded`.
            RecursiveDependencyLoadState::NotLoaded if context.gltfs.contains(&entry.handle) => {}
            RecursiveDependencyLoadState::NotLoaded | RecursiveDependencyLoadState::Loading => {
                still_loading = true;
            }
        }
    }
    if let Some(err) = failure {
        pending.has_finalised = true;
        commands.trigger(err);
        return;
    }
    if still_loading {
        return;
    }

    let resolved: Result<Vec<_>, SceneSetupError> = pending
        .entries
        .iter()
        .map(|entry| {
            let gltf = context.gltfs.get(&entry.handle).ok_or_else(|| {
                SceneSetupError::AssetLoadFailed {
                    path: entry.path.clone(),
                    detail: "asset reported loaded but is not available".to_owned(),
                }
            })?;
            resolve_character(&entry.path, gltf, entry.role.settings(&context.settings))
                .map(|character| (entry.role, character))
        })
        .collect();

    pending.has_finalised = true;
    match resolved {
        Ok(characters) => {
            info!("character models ready");
            commands.insert_resource(LoadedCharacters { characters });
            context.next_state.set(SceneState::Ready);
        }
        Err(err) => commands.trigger(err),
    }
}
