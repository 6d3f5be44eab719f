//! Sprite-sheet animation: a pose picks an atlas row, elapsed time picks
//! the frame within it.

use bevy::prelude::*;
use crate::shared::*;

/// Columns in the character sheet; rows are poses.
pub const SHEET_COLUMNS: usize = 6;

/// Accumulated animation time in game time units.
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct SpriteAnimation {
    pub elapsed: f32,
}

/// One row of the sheet: where it is, how many frames it has, and the
/// time per frame. `speed == 0` marks a static pose.
#[derive(Debug, Clone, Copy)]
pub struct Clip {
    pub row: usize,
    pub frames: usize,
    pub speed: f32,
}

pub fn clip_for(pose: Pose) -> Clip {
    match pose {
        Pose::Idle => Clip { row: 0, frames: 4, speed: 2.0 },
        Pose::Walk => Clip { row: 1, frames: 6, speed: 0.8 },
        Pose::Jump => Clip { row: 2, frames: 1, speed: 0.0 },
        Pose::Talk => Clip { row: 3, frames: 2, speed: 0.6 },
    }
}

/// Frame selection: `floor(elapsed / speed)` wrapped over the clip, or
/// the final frame for static clips. An empty clip is a caller bug; we
/// pin it to frame 0 rather than panic mid-frame.
pub fn frame_index(elapsed: f32, speed: f32, frames: usize) -> usize {
    if frames == 0 {
        return 0;
    }
    if speed == 0.0 {
        return frames - 1;
    }
    (elapsed / speed).floor() as usize % frames
}

/// Advance the player's animation clock and point its sprite at the
/// current frame of the active pose row.
pub fn animate_player_sprite(
    frame: Res<FrameDelta>,
    mut query: Query<(&PoseState, &mut SpriteAnimation, &mut Sprite), With<Player>>,
) {
    for (pose, mut animation, mut sprite) in &mut query {
        animation.elapsed += frame.0;

        let clip = clip_for(pose.pose);
        let index = clip.row * SHEET_COLUMNS + frame_index(animation.elapsed, clip.speed, clip.frames);
        if let Some(ref mut atlas) = sprite.texture_atlas {
            atlas.index = index;
        }
        sprite.flip_x = pose.facing == Facing::Left;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_frame_index_wraps_over_clip() {
        // speed 0.5 → one frame per half unit; 4 frames wrap at 2.0
        assert_eq!(frame_index(0.0, 0.5, 4), 0);
        assert_eq!(frame_index(0.6, 0.5, 4), 1);
        assert_eq!(frame_index(1.9, 0.5, 4), 3);
        assert_eq!(frame_index(2.1, 0.5, 4), 0);
    }

    #[test]
    fn test_static_clip_holds_final_frame() {
        assert_eq!(frame_index(123.0, 0.0, 1), 0);
        assert_eq!(frame_index(0.0, 0.0, 3), 2);
    }

    #[test]
    fn test_empty_clip_is_guarded() {
        assert_eq!(frame_index(5.0, 0.5, 0), 0);
    }
}
