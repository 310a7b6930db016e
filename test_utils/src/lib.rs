//! Utility helpers for tests.
//!
//! Headless app builders with manual time stepping, plus spawn helpers that
//! place the default fox, chicken, floor and camera without loading models.

pub mod spawn;

use std::time::Duration;

use bevy::prelude::*;
use bevy::time::TimeUpdateStrategy;
use foxchase::{SceneSettings, SimulationPlugin};

/// Simulated time per tick in [`headless_app`].
pub const FRAME: Duration = Duration::from_millis(100);

/// Builds a `MinimalPlugins` app running the simulation with a fixed seed.
///
/// Time advances by [`FRAME`] each update, except the very first update,
/// which always has zero delta. Call [`prime`] to get past it.
#[must_use]
pub fn headless_app(seed: u64) -> App {
    headless_app_with(SceneSettings {
        seed: Some(seed),
        ..SceneSettings::default()
    })
}

/// Like [`headless_app`] with explicit settings.
#[must_use]
pub fn headless_app_with(settings: SceneSettings) -> App {
    let mut app = App::new();
    app.insert_resource(settings);
    app.add_plugins(MinimalPlugins);
    app.add_plugins(SimulationPlugin);
    app.insert_resource(TimeUpdateStrategy::ManualDuration(FRAME));
    app
}

/// Finalises plugins and runs the zero-delta first update.
pub fn prime(app: &mut App) {
    app.finish();
    app.cleanup();
    app.update();
}

/// Runs `frames` updates.
pub fn step_frames(app: &mut App, frames: usize) {
    for _ in 0..frames {
        app.update();
    }
}

/// Seconds of simulated time covered by `frames` updates after [`prime`].
#[must_use]
pub fn elapsed_secs(frames: usize) -> f32 {
    FRAME.as_secs_f32() * frames as f32
}
