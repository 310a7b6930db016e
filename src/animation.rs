//! Locomotion-driven animation clip selection.
//!
//! Each character carries a looping "moving" clip and, optionally, a
//! "resting" clip. Whenever [`Locomotion`] changes, exactly one of them is
//! playing afterwards. The selection rule is a plain function over clip ids;
//! binding it to `AnimationPlayer` requires the `render` feature.

use crate::components::Locomotion;

/// Clip changes for one locomotion transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClipSwitch<I> {
    /// Clip to start looping, if any.
    pub play: Option<I>,
    /// Clip to stop, if any.
    pub stop: Option<I>,
}

/// Picks which clip plays for `locomotion`.
///
/// Characters without a resting clip stop animating when they rest.
#[must_use]
pub fn clip_switch<I: Copy>(locomotion: Locomotion, moving: I, resting: Option<I>) -> ClipSwitch<I> {
    match locomotion {
        Locomotion::Moving => ClipSwitch {
            play: Some(moving),
            stop: resting,
        },
        Locomotion::Resting => ClipSwitch {
            play: resting,
            stop: Some(moving),
        },
    }
}

#[cfg(feature = "render")]
pub use systems::{
    bind_animation_players_system, sync_locomotion_clips_system, AnimationLink,
    CharacterAnimationPlugin, CharacterClips,
};

#[cfg(feature = "render")]
mod systems {
    use bevy::prelude::*;
    use log::{debug, warn};

    use super::{clip_switch, ClipSwitch};
    use crate::components::Locomotion;
    use crate::simulation::simulation_step_system;

    /// Animation graph and clip nodes for one character.
    #[derive(Component, Debug, Clone)]
    pub struct CharacterClips {
        /// Graph holding every clip the character uses.
        pub graph: Handle<AnimationGraph>,
        /// Node looped while moving.
        pub moving: AnimationNodeIndex,
        /// Node looped while resting.
        pub resting: Option<AnimationNodeIndex>,
    }

    impl CharacterClips {
        fn switch_for(&self, locomotion: Locomotion) -> ClipSwitch<AnimationNodeIndex> {
            clip_switch(locomotion, self.moving, self.resting)
        }
    }

    /// Points a character root at the `AnimationPlayer` inside its model.
    #[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
    pub struct AnimationLink(pub Entity);

    fn apply_switch(player: &mut AnimationPlayer, switch: ClipSwitch<AnimationNodeIndex>) {
        if let Some(stop) = switch.stop {
            player.stop(stop);
        }
        if let Some(play) = switch.play {
            player.play(play).repeat();
        }
    }

    /// Finds the animation player spawned with each character's model.
    ///
    /// Models arrive asynchronously as scene instances, so roots are polled
    /// until a descendant carries an `AnimationPlayer`. Binding installs the
    /// graph and starts the clip for the current locomotion state.
    #[expect(
        clippy::needless_pass_by_value,
        reason = "Bevy system parameters use `Query<T>` by value."
    )]
    pub fn bind_animation_players_system(
        mut commands: Commands,
        roots: Query<(Entity, &CharacterClips, &Locomotion, Option<&Name>), Without<AnimationLink>>,
        children: Query<&Children>,
        mut players: Query<&mut AnimationPlayer>,
    ) {
        for (root, clips, locomotion, name) in &roots {
            let Some(player_entity) = children
                .iter_descendants(root)
                .find(|entity| players.contains(*entity))
            else {
                continue;
            };
            let Ok(mut player) = players.get_mut(player_entity) else {
                continue;
            };

            apply_switch(&mut player, clips.switch_for(*locomotion));
            commands
                .entity(player_entity)
                .insert(AnimationGraphHandle(clips.graph.clone()));
            commands.entity(root).insert(AnimationLink(player_entity));
            debug!(
                "bound animation player {player_entity} to {}",
                name.map_or("character", Name::as_str)
            );
        }
    }

    /// Switches clips on the frames where a character's locomotion changed.
    #[expect(
        clippy::needless_pass_by_value,
        reason = "Bevy system parameters use `Query<T>` by value."
    )]
    pub fn sync_locomotion_clips_system(
        characters: Query<(&Locomotion, &CharacterClips, &AnimationLink), Changed<Locomotion>>,
        mut players: Query<&mut AnimationPlayer>,
    ) {
        for (locomotion, clips, link) in &characters {
            let Ok(mut player) = players.get_mut(link.0) else {
                warn!("animation player {} vanished", link.0);
                continue;
            };
            apply_switch(&mut player, clips.switch_for(*locomotion));
        }
    }

    /// Bevy plugin keeping character clips in step with the simulation.
    #[derive(Debug, Default)]
    pub struct CharacterAnimationPlugin;

    impl Plugin for CharacterAnimationPlugin {
        fn build(&self, app: &mut App) {
            app.add_systems(
                Update,
                (bind_animation_players_system, sync_locomotion_clips_system)
                    .chain()
                    .after(simulation_step_system),
            );
        }
    }
}
