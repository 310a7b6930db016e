//! Per-frame character simulation.
//!
//! `SimulationPlugin` owns the steering step and its supporting resources.
//! It is independent of rendering: it reads `Time` and `Transform` and
//! writes `Transform`, [`Character`] targets, and [`Locomotion`], so it runs
//! the same under `MinimalPlugins` as under the full engine.

use bevy::prelude::*;
use log::{debug, info};

use crate::components::{ArrivalPolicy, Character, Locomotion, PlayerControlled};
use crate::config::SceneSettings;
use crate::steering::{facing, seek_step, SeekStep};
use crate::wander::{WanderArea, WanderRng};

/// Parameters shared by every character's step.
#[derive(Resource, Debug, Clone, Copy, PartialEq)]
pub struct SimulationTuning {
    /// Arrival distance.
    pub arrival_threshold: f32,
}

impl Default for SimulationTuning {
    fn default() -> Self {
        Self {
            arrival_threshold: crate::ARRIVAL_THRESHOLD,
        }
    }
}

/// Run/stop switch for the simulation step.
///
/// The engine owns the frame loop; this is the hook that halts stepping on
/// teardown or when the host wants the scene frozen.
#[derive(Resource, Debug, Clone, Copy, PartialEq, Eq)]
pub struct SimulationControl {
    running: bool,
}

impl SimulationControl {
    /// Whether characters are stepped each frame.
    #[must_use]
    pub const fn is_running(&self) -> bool {
        self.running
    }

    /// Halts the step. Idempotent.
    pub const fn stop(&mut self) {
        self.running = false;
    }

    /// Resumes the step. Idempotent.
    pub const fn resume(&mut self) {
        self.running = true;
    }
}

impl Default for SimulationControl {
    fn default() -> Self {
        Self { running: true }
    }
}

/// Run condition gating [`simulation_step_system`].
#[expect(
    clippy::needless_pass_by_value,
    reason = "Bevy run conditions take `Res<T>` by value."
)]
#[must_use]
pub fn simulation_running(control: Res<SimulationControl>) -> bool {
    control.is_running()
}

/// Query data for one simulated character.
type CharacterItem = (
    &'static mut Transform,
    &'static mut Character,
    &'static ArrivalPolicy,
    &'static mut Locomotion,
    Has<PlayerControlled>,
);

/// Advances every character toward its target by one frame.
///
/// Frames with no elapsed time leave every component untouched. Arrivals
/// apply the character's [`ArrivalPolicy`]: resting characters switch their
/// [`Locomotion`], wandering characters draw a new target.
#[expect(
    clippy::needless_pass_by_value,
    reason = "Bevy system parameters use `Res<T>` by value."
)]
pub fn simulation_step_system(
    time: Res<Time>,
    tuning: Res<SimulationTuning>,
    area: Res<WanderArea>,
    mut rng: ResMut<WanderRng>,
    mut characters: Query<CharacterItem>,
) {
    let delta = time.delta_secs();
    if delta <= 0.0 || !delta.is_finite() {
        return;
    }

    for (mut transform, mut character, policy, mut locomotion, controlled) in &mut characters {
        let step = seek_step(
            transform.translation,
            character.target(),
            character.speed,
            delta,
            tuning.arrival_threshold,
        );

        match (step, policy) {
            (SeekStep::Advance { position, heading }, _) => {
                transform.translation = position;
                transform.rotation = facing(heading, character.heading_offset);
                if locomotion.set_if_neq(Locomotion::Moving) {
                    debug!("character set off toward {}", character.target());
                }
            }
            (SeekStep::Arrived, ArrivalPolicy::Rest) => {
                if locomotion.set_if_neq(Locomotion::Resting) {
                    debug!(
                        "character arrived at {} (player controlled: {controlled})",
                        character.target()
                    );
                }
            }
            (SeekStep::Arrived, ArrivalPolicy::Wander) => {
                let next = area.sample(rng.rng());
                debug!("wandering character retargeted to {next}");
                character.set_target(next);
            }
        }
    }
}

/// Stops the simulation once the app has been asked to exit.
pub fn stop_on_exit_system(
    mut exits: MessageReader<AppExit>,
    mut control: ResMut<SimulationControl>,
) {
    if exits.read().last().is_some() && control.is_running() {
        control.stop();
        info!("simulation stopped for shutdown");
    }
}

/// Bevy plugin installing the character simulation.
///
/// Reads [`SceneSettings`] when present so the arrival threshold, wander
/// area, and RNG seed follow configuration; falls back to defaults otherwise.
#[derive(Debug, Default)]
pub struct SimulationPlugin;

impl Plugin for SimulationPlugin {
    fn build(&self, app: &mut App) {
        let settings = app
            .world()
            .get_resource::<SceneSettings>()
            .cloned()
            .unwrap_or_default();

        app.register_type::<Character>();
        app.register_type::<ArrivalPolicy>();
        app.register_type::<Locomotion>();
        app.register_type::<PlayerControlled>();

        app.insert_resource(SimulationTuning {
            arrival_threshold: settings.arrival_threshold,
        });
        app.insert_resource(WanderArea::new(settings.wander_half_extent));
        app.insert_resource(WanderRng::new(settings.seed));
        app.init_resource::<SimulationControl>();

        app.add_systems(
            Update,
            simulation_step_system.run_if(simulation_running),
        );
        app.add_systems(Last, stop_on_exit_system);
    }
}
