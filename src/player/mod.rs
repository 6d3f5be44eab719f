//! Player domain: movement state machine, sprite animation, camera follow
//! and spawning/respawning.

pub mod animation;
pub mod camera;
pub mod movement;
pub mod spawn;

use bevy::prelude::*;
use crate::shared::*;

pub struct PlayerPlugin;

impl Plugin for PlayerPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<JumpSfxCycle>()
            .init_resource::<camera::CameraScroll>();

        app.add_systems(OnEnter(Screen::Game), spawn::spawn_player);

        app.add_systems(
            Update,
            (
                movement::player_movement,
                animation::animate_player_sprite.after(movement::player_movement),
            )
                .in_set(StageSet::Player)
                .run_if(in_state(PlayState::Running)),
        );

        app.add_systems(
            Update,
            (
                camera::camera_follow_player,
                camera::sync_camera_transform,
                camera::sync_body_transforms,
            )
                .chain()
                .in_set(StageSet::Camera)
                .run_if(in_state(PlayState::Running)),
        );

        // Respawn resets run even while the fade still covers the screen.
        app.add_systems(
            Update,
            spawn::handle_respawn
                .in_set(StageSet::Transition)
                .run_if(in_state(Screen::Game)),
        );
    }
}

/// The four jump cues, played round-robin: every jump advances the index
/// by one, wrapping after the fourth.
pub const JUMP_SFX_CUES: [&str; 4] = ["jump_1", "jump_2", "jump_3", "jump_4"];

#[derive(Resource, Debug, Clone, Copy, Default)]
pub struct JumpSfxCycle {
    index: usize,
}

impl JumpSfxCycle {
    pub fn next_cue(&mut self) -> &'static str {
        let cue = JUMP_SFX_CUES[self.index];
        self.index = (self.index + 1) % JUMP_SFX_CUES.len();
        cue
    }
}
