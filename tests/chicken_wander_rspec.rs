//! Behaviour tests for the chicken's endless wandering using rust-rspec.

#[path = "support/thread_safe_app.rs"]
mod thread_safe_app;

#[path = "support/rspec_runner.rs"]
mod rspec_runner;

#[path = "support/sim_fixture.rs"]
mod sim_fixture;

use approx::assert_relative_eq;
use bevy::prelude::*;
use foxchase::steering::{facing, heading_towards};
use foxchase::{
    Locomotion, WanderArea, CHICKEN_HEADING_OFFSET_DEGREES, CHICKEN_TARGET, WANDER_HALF_EXTENT,
};
use rspec_runner::run_serial;
use sim_fixture::SimulationFixture;

fn chicken_only(world: &mut World) {
    test_utils::spawn::spawn_chicken(world);
}

#[test]
fn chicken_wanders_without_resting() {
    run_serial(&rspec::given(
        "a headless scene with only the chicken",
        SimulationFixture::new(11, chicken_only),
        |ctx| {
            // Runs once per direct child; every `when` resets again itself.
            ctx.before_each(|fixture| fixture.reset());

            ctx.when("it has walked for a second", |ctx| {
                ctx.before_each(|fixture| {
                    fixture.reset();
                    fixture.tick(10);
                });

                ctx.then("its model is turned by the heading correction", |fixture| {
                    let chicken = fixture.chicken();
                    let direction = fixture.target(chicken) - fixture.position(chicken);
                    let expected = facing(
                        heading_towards(direction),
                        CHICKEN_HEADING_OFFSET_DEGREES.to_radians(),
                    );
                    assert_relative_eq!(
                        fixture.rotation(chicken).angle_between(expected),
                        0.0,
                        epsilon = 1e-3
                    );
                });
            });

            ctx.when("it reaches its first target", |ctx| {
                ctx.before_each(|fixture| {
                    fixture.reset();
                    fixture.tick(80);
                });

                ctx.then("it has been given a new target inside the wander square", |fixture| {
                    let chicken = fixture.chicken();
                    let target = fixture.target(chicken);
                    assert_ne!(target, Vec3::from_array(CHICKEN_TARGET));
                    assert!(
                        WanderArea::new(WANDER_HALF_EXTENT).contains(target),
                        "{target:?} is outside the wander square"
                    );
                });

                ctx.then("it is still walking", |fixture| {
                    assert_eq!(fixture.locomotion(fixture.chicken()), Locomotion::Moving);
                });
            });

            ctx.then("it never rests over a long stretch", |fixture| {
                let chicken = fixture.chicken();
                let area = WanderArea::new(WANDER_HALF_EXTENT);
                for _ in 0..600 {
                    fixture.tick(1);
                    assert_eq!(fixture.locomotion(chicken), Locomotion::Moving);
                    assert!(area.contains(fixture.target(chicken)));
                }
            });
        },
    ));
}
