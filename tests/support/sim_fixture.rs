//! Shared fixture for simulation behaviour suites.
//!
//! rspec clones the fixture for every example while the `Arc` inside keeps
//! pointing at one app. A context's `before_each` runs once per direct child,
//! so every innermost hook must call [`SimulationFixture::reset`] itself
//! before it ticks. Entity ids are deterministic in a fresh world.

use std::sync::MutexGuard;

use bevy::prelude::*;
use foxchase::{Character, Locomotion, PlayerControlled, SimulationControl};

use crate::thread_safe_app::{lock_app, share, SharedApp, ThreadSafeApp};

/// Populates a fresh world before the first tick.
pub type Setup = fn(&mut World);

/// A headless simulation app that can be reset between examples.
#[derive(Debug, Clone)]
pub struct SimulationFixture {
    app: SharedApp,
    seed: u64,
    setup: Setup,
}

impl SimulationFixture {
    /// Creates a fixture whose world is populated by `setup`.
    #[must_use]
    pub fn new(seed: u64, setup: Setup) -> Self {
        Self {
            app: share(App::new()),
            seed,
            setup,
        }
    }

    /// Rebuilds the app, populates it and runs the zero-delta first tick.
    pub fn reset(&self) {
        let mut app = test_utils::headless_app(self.seed);
        (self.setup)(app.world_mut());
        test_utils::prime(&mut app);
        *self.app_guard() = ThreadSafeApp(app);
    }

    /// Locks the underlying `App` for direct inspection or mutation.
    pub fn app_guard(&self) -> MutexGuard<'_, ThreadSafeApp> {
        lock_app(&self.app)
    }

    /// Advances the app by `frames` ticks of [`test_utils::FRAME`].
    pub fn tick(&self, frames: usize) {
        test_utils::step_frames(&mut self.app_guard(), frames);
    }

    /// Runs one update with no elapsed time.
    pub fn tick_without_time(&self) {
        let mut app = self.app_guard();
        app.insert_resource(bevy::time::TimeUpdateStrategy::ManualDuration(
            std::time::Duration::ZERO,
        ));
        app.update();
        app.insert_resource(bevy::time::TimeUpdateStrategy::ManualDuration(
            test_utils::FRAME,
        ));
    }

    /// Simulated seconds since the app was built.
    pub fn elapsed_secs(&self) -> f32 {
        self.app_guard().world().resource::<Time>().elapsed_secs()
    }

    /// Halts the simulation step.
    pub fn stop(&self) {
        self.app_guard()
            .world_mut()
            .resource_mut::<SimulationControl>()
            .stop();
    }

    /// The fox entity.
    ///
    /// # Panics
    /// Panics unless exactly one player-controlled character exists.
    pub fn fox(&self) -> Entity {
        let mut app = self.app_guard();
        let world = app.world_mut();
        let mut query = world.query_filtered::<Entity, With<PlayerControlled>>();
        query
            .single(world)
            .unwrap_or_else(|err| panic!("expected one fox: {err}"))
    }

    /// The first character without player control.
    ///
    /// # Panics
    /// Panics if there is none.
    pub fn chicken(&self) -> Entity {
        let mut app = self.app_guard();
        let world = app.world_mut();
        let mut query =
            world.query_filtered::<Entity, (With<Character>, Without<PlayerControlled>)>();
        query
            .iter(world)
            .next()
            .unwrap_or_else(|| panic!("expected a chicken"))
    }

    /// Position of `entity`.
    pub fn position(&self, entity: Entity) -> Vec3 {
        test_utils::spawn::position(self.app_guard().world(), entity)
    }

    /// Orientation of `entity`.
    pub fn rotation(&self, entity: Entity) -> Quat {
        self.app_guard()
            .world()
            .get::<Transform>(entity)
            .map(|transform| transform.rotation)
            .unwrap_or_else(|| panic!("{entity} has no Transform"))
    }

    /// Target of `entity`.
    pub fn target(&self, entity: Entity) -> Vec3 {
        test_utils::spawn::target(self.app_guard().world(), entity)
    }

    /// Locomotion state of `entity`.
    pub fn locomotion(&self, entity: Entity) -> Locomotion {
        self.app_guard()
            .world()
            .get::<Locomotion>(entity)
            .copied()
            .unwrap_or_else(|| panic!("{entity} has no Locomotion"))
    }

    /// Overwrites the target of `entity`.
    pub fn retarget(&self, entity: Entity, target: Vec3) {
        let mut app = self.app_guard();
        let mut entity_mut = app.world_mut().entity_mut(entity);
        let Some(mut character) = entity_mut.get_mut::<Character>() else {
            panic!("{entity} is not a character");
        };
        character.set_target(target);
    }
}
