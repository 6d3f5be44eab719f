//! Player spawning and checkpoint respawn.

use bevy::prelude::*;
use crate::shared::*;
use super::animation::{SpriteAnimation, SHEET_COLUMNS};
use super::camera::CameraScroll;

/// Spawn the player at the persisted checkpoint when the Game screen is
/// built, and snap the camera onto it.
pub fn spawn_player(
    mut commands: Commands,
    save: Res<SaveData>,
    asset_server: Res<AssetServer>,
    mut layouts: ResMut<Assets<TextureAtlasLayout>>,
    mut camera: ResMut<CameraScroll>,
) {
    let pos = Vec2::from(save.checkpoint_pos);

    let image = asset_server.load("sprites/player.png");
    let layout = layouts.add(TextureAtlasLayout::from_grid(
        UVec2::new(16, 16),
        SHEET_COLUMNS as u32,
        4,
        None,
        None,
    ));

    commands.spawn((
        ScreenScoped,
        Player,
        Alive(true),
        Body::new(pos, PLAYER_SIZE),
        PoseState::default(),
        SpriteAnimation::default(),
        Sprite {
            image,
            texture_atlas: Some(TextureAtlas { layout, index: 0 }),
            ..default()
        },
        Transform::from_xyz(pos.x, -pos.y, 5.0),
    ));

    camera.snap_to(Rect::from_corners(pos, pos + PLAYER_SIZE));

    info!("Player spawned at checkpoint {:?}", save.checkpoint_pos);
}

/// Death restart: the transition commit asked for the same screen, so
/// instead of rebuilding it we put the player back on the checkpoint.
pub fn handle_respawn(
    mut events: EventReader<RespawnEvent>,
    save: Res<SaveData>,
    mut camera: ResMut<CameraScroll>,
    mut query: Query<(&mut Body, &mut Alive, &mut PoseState), With<Player>>,
) {
    for _ in events.read() {
        let Ok((mut body, mut alive, mut pose)) = query.get_single_mut() else {
            continue;
        };
        body.pos = Vec2::from(save.checkpoint_pos);
        body.vel = Vec2::ZERO;
        body.jumping = false;
        alive.0 = true;
        *pose = PoseState::default();
        camera.snap_to(body.rect());

        info!("Player respawned at {:?}", save.checkpoint_pos);
    }
}
