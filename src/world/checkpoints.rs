//! Checkpoint triggers: overlapping one rewrites the persisted respawn
//! coordinate.

use bevy::prelude::*;
use crate::shared::*;

/// A checkpoint trigger region in y-down pixel space.
#[derive(Component, Debug, Clone, Copy)]
pub struct Checkpoint {
    pub rect: Rect,
}

/// Capture the respawn point while the player stands inside a trigger.
/// The stored x is the checkpoint's, not the player's, so a respawn never
/// places the player embedded in a tile edge; the y is the player's so
/// elevated checkpoints respawn at the height the player actually reached.
pub fn capture_checkpoints(
    checkpoints: Query<&Checkpoint>,
    player: Query<&Body, With<Player>>,
    mut save: ResMut<SaveData>,
    mut events: EventWriter<CheckpointReachedEvent>,
) {
    let Ok(body) = player.get_single() else {
        return;
    };

    for checkpoint in &checkpoints {
        if rects_overlap(checkpoint.rect, body.rect()) {
            let pos = [checkpoint.rect.min.x, body.pos.y];
            if save.checkpoint_pos != pos {
                save.checkpoint_pos = pos;
                events.send(CheckpointReachedEvent { pos });
            }
        }
    }
}
