//! Player per-tick state machine.
//!
//! Evaluated in order each tick: world-edge clamp, death plane, walk
//! input, gravity, edge-triggered jump, pose override. Landing detection
//! lives in the collision resolver, which clears `Body::jumping`.

use bevy::prelude::*;
use crate::shared::*;
use super::JumpSfxCycle;

pub fn player_movement(
    frame: Res<FrameDelta>,
    input: Res<PlayerInput>,
    mut cycle: ResMut<JumpSfxCycle>,
    mut transition: ResMut<ScreenTransition>,
    mut sfx: EventWriter<PlaySfxEvent>,
    mut query: Query<(&mut Body, &mut Alive, &mut PoseState), With<Player>>,
) {
    let Ok((mut body, mut alive, mut pose)) = query.get_single_mut() else {
        return;
    };

    // The player can't walk off the left edge of the world.
    body.pos.x = body.pos.x.max(0.0);

    // Past the death plane: stop steering, let gravity finish the fall,
    // and schedule a restart of the Game screen from the checkpoint.
    if body.pos.y > DEATH_PLANE_Y {
        if alive.0 {
            alive.0 = false;
            transition.request(Screen::Game);
        }
        body.vel.x = 0.0;
        return;
    }

    pose.pose = Pose::Idle;
    body.vel.x = 0.0;
    if input.move_axis != 0.0 {
        pose.pose = Pose::Walk;
        pose.facing = if input.move_axis > 0.0 {
            Facing::Right
        } else {
            Facing::Left
        };
        body.vel.x = PLAYER_SPEED * input.move_axis;
    }

    body.vel.y += PLAYER_GRAVITY * frame.0;

    if input.jump && !body.jumping {
        body.jumping = true;
        body.vel.y = -PLAYER_JUMP_SPEED;
        sfx.send(PlaySfxEvent {
            sfx_id: cycle.next_cue().to_string(),
        });
    }

    // Jump overrides walk/idle until the resolver clears it on landing.
    if body.jumping {
        pose.pose = Pose::Jump;
    }
}
