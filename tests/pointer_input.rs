#![cfg_attr(
    feature = "test-support",
    doc = "Tests turning raw pointer input into pick requests."
)]
#![cfg_attr(not(feature = "test-support"), doc = "Tests require `test-support`.")]
#![cfg(feature = "test-support")]
//! Feeds touch messages, mouse state and window changes through the input
//! plugin and records which `PickRequest`s come out.

use bevy::input::touch::{TouchInput, TouchPhase};
use bevy::input::InputPlugin;
use bevy::prelude::*;
use bevy::window::PrimaryWindow;
use foxchase::picking::{collect_pointer_input_system, track_viewport_system};
use foxchase::{PickRequest, ViewportMetrics};
use rstest::{fixture, rstest};

#[derive(Resource, Debug, Default)]
struct CapturedPicks(Vec<Vec2>);

#[expect(
    clippy::needless_pass_by_value,
    reason = "Observer systems must accept On<T> by value for Events V2."
)]
fn capture_pick(request: On<PickRequest>, mut captured: ResMut<CapturedPicks>) {
    captured.0.push(request.event().screen_position);
}

#[fixture]
fn input_app() -> App {
    let mut app = App::new();
    app.add_plugins((MinimalPlugins, InputPlugin));
    app.init_resource::<CapturedPicks>();
    app.add_observer(capture_pick);
    app.add_systems(
        Update,
        (track_viewport_system, collect_pointer_input_system).chain(),
    );
    app.finish();
    app.cleanup();
    app
}

fn touch(app: &mut App, phase: TouchPhase, position: Vec2) {
    app.world_mut().write_message(TouchInput {
        phase,
        position,
        window: Entity::PLACEHOLDER,
        force: None,
        id: 0,
    });
}

fn picks(app: &App) -> &[Vec2] {
    &app.world().resource::<CapturedPicks>().0
}

#[rstest]
fn touch_start_and_move_each_pick_once(mut input_app: App) {
    touch(&mut input_app, TouchPhase::Started, Vec2::new(10.0, 10.0));
    input_app.update();
    assert_eq!(picks(&input_app), [Vec2::new(10.0, 10.0)]);

    touch(&mut input_app, TouchPhase::Moved, Vec2::new(20.0, 20.0));
    input_app.update();
    assert_eq!(picks(&input_app), [Vec2::new(10.0, 10.0), Vec2::new(20.0, 20.0)]);

    // Holding the finger still sends no messages.
    input_app.update();
    input_app.update();
    assert_eq!(picks(&input_app).len(), 2);
}

#[rstest]
#[case::ended(TouchPhase::Ended)]
#[case::canceled(TouchPhase::Canceled)]
fn lifting_a_finger_does_not_pick(mut input_app: App, #[case] phase: TouchPhase) {
    touch(&mut input_app, phase, Vec2::new(30.0, 30.0));
    input_app.update();
    assert!(picks(&input_app).is_empty());
}

#[rstest]
fn held_left_button_picks_at_the_cursor(mut input_app: App) {
    let mut window = Window::default();
    window.set_cursor_position(Some(Vec2::new(100.0, 50.0)));
    input_app.world_mut().spawn((window, PrimaryWindow));
    input_app
        .world_mut()
        .resource_mut::<ButtonInput<MouseButton>>()
        .press(MouseButton::Left);

    input_app.update();

    assert_eq!(picks(&input_app), [Vec2::new(100.0, 50.0)]);
}

#[rstest]
fn left_button_without_a_window_is_ignored(mut input_app: App) {
    input_app
        .world_mut()
        .resource_mut::<ButtonInput<MouseButton>>()
        .press(MouseButton::Left);

    input_app.update();

    assert!(picks(&input_app).is_empty());
}

#[rstest]
fn viewport_follows_the_primary_window(mut input_app: App) {
    let window = input_app
        .world_mut()
        .spawn((Window::default(), PrimaryWindow))
        .id();
    input_app.update();
    assert_eq!(
        input_app.world().get_resource::<ViewportMetrics>(),
        Some(&ViewportMetrics {
            physical_size: UVec2::new(1280, 720),
            scale_factor: 1.0,
        })
    );

    input_app
        .world_mut()
        .get_mut::<Window>(window)
        .unwrap_or_else(|| panic!("window entity keeps its Window"))
        .resolution
        .set_physical_resolution(0, 0);
    input_app.update();

    assert!(input_app.world().get_resource::<ViewportMetrics>().is_none());
}
