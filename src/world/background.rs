//! Menu parallax background.
//!
//! Four looping layers scroll at different speeds toward wherever the
//! pointer drifts, plus a slow constant pan. In the Game screen the
//! background is a flat clear color; the parallax only exists on the menu.

use bevy::prelude::*;
use crate::shared::*;

/// How much the pointer position is damped before driving the scroll.
const POINTER_DAMP: f32 = 10.0;
/// Constant rightward pan added on top of pointer following.
const PAN_SPEED: f32 = 30.0;

/// Horizontal menu scroll, in pixels. Not the gameplay camera.
#[derive(Resource, Debug, Clone, Copy, Default)]
pub struct MenuScroll(pub f32);

/// One looping layer. Two sprites per layer wrap around the view width.
#[derive(Component, Debug, Clone, Copy)]
pub struct ParallaxLayer {
    pub speed: f32,
    /// 0 or 1: which of the layer's two wrap copies this sprite is.
    pub copy: usize,
}

/// The gameplay camera follow only runs in the Game screen, so the render
/// camera comes back to the origin where the menu layers live.
pub fn reset_menu_camera(mut query: Query<&mut Transform, With<Camera2d>>) {
    for mut transform in &mut query {
        transform.translation = Vec3::ZERO;
    }
}

/// Spawn the menu's parallax layers. The third layer swaps to the sunset
/// variant once the game has been completed.
pub fn spawn_menu_background(
    mut commands: Commands,
    asset_server: Res<AssetServer>,
    profile: Res<Profile>,
) {
    commands.insert_resource(MenuScroll::default());

    let special_layer = if profile.game_complete {
        "backgrounds/bg5.png"
    } else {
        "backgrounds/bg2.png"
    };
    let layers: [(&str, f32); 4] = [
        ("backgrounds/bg0.png", 0.05),
        ("backgrounds/bg1.png", 0.15),
        (special_layer, 0.3),
        ("backgrounds/bg3.png", 0.4),
    ];

    for (depth, (path, speed)) in layers.into_iter().enumerate() {
        for copy in 0..2 {
            commands.spawn((
                ScreenScoped,
                ParallaxLayer { speed, copy },
                Sprite {
                    image: asset_server.load(path),
                    custom_size: Some(Vec2::new(VIEW_WIDTH, VIEW_HEIGHT)),
                    ..default()
                },
                Transform::from_xyz(0.0, 0.0, -10.0 + depth as f32),
            ));
        }
    }
}

/// Nudge the scroll toward the pointer with the same critically-damped
/// step the gameplay camera uses, plus a constant pan so the scene never
/// stands still.
pub fn scroll_menu_background(
    frame: Res<FrameDelta>,
    input: Res<PlayerInput>,
    mut scroll: ResMut<MenuScroll>,
) {
    let pointer_x = input.pointer.map(|pointer| pointer.x).unwrap_or(0.0) / POINTER_DAMP;
    scroll.0 += ((pointer_x - scroll.0 - VIEW_WIDTH / 2.0) + PAN_SPEED) * frame.0;
}

/// Position each layer's two copies so the texture wraps seamlessly.
pub fn apply_parallax(
    scroll: Res<MenuScroll>,
    mut layers: Query<(&ParallaxLayer, &mut Transform)>,
) {
    for (layer, mut transform) in &mut layers {
        let x = (-scroll.0 * layer.speed).rem_euclid(VIEW_WIDTH);
        let offset = if layer.copy == 0 { x } else { x - VIEW_WIDTH };
        transform.translation.x = offset;
    }
}
