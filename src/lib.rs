#![cfg_attr(docsrs, feature(doc_cfg))]
//! Library crate for the fox-and-chicken chase scene.
//!
//! A fox runs to wherever the floor is tapped while a chicken wanders
//! around it. Movement, picking geometry and clip selection are plain code;
//! the Bevy plugins wire them into a rendered scene.
pub mod animation;
pub mod components;
pub mod config;
pub mod constants;
pub mod logging;
pub mod picking;
#[cfg(feature = "render")]
#[cfg_attr(docsrs, doc(cfg(feature = "render")))]
pub mod scene;
pub mod simulation;
pub mod steering;
pub mod wander;
pub use constants::*;

pub use components::{
    ArrivalPolicy, Character, Floor, Locomotion, PlayerControlled, SceneCamera,
};
pub use config::{ConfigError, SceneSettings};
pub use logging::init as init_logging;
pub use picking::{PickRequest, ViewportMetrics};
#[cfg(feature = "render")]
#[cfg_attr(docsrs, doc(cfg(feature = "render")))]
pub use picking::PickingPlugin;
#[cfg(feature = "render")]
#[cfg_attr(docsrs, doc(cfg(feature = "render")))]
pub use animation::CharacterAnimationPlugin;
#[cfg(feature = "render")]
#[cfg_attr(docsrs, doc(cfg(feature = "render")))]
pub use scene::{ChaseScenePlugin, FoxChasePlugin, SceneSetupError, SceneState};
pub use simulation::{
    simulation_step_system, SimulationControl, SimulationPlugin, SimulationTuning,
};
pub use wander::{WanderArea, WanderRng};
