//! Screen fade overlay and the transition commit gate.
//!
//! A pending screen target is only an intent. The actual
//! `NextState<Screen>` write happens here, on the tick the fade-out
//! reaches full black, so no screen swap is ever visible mid-fade. A
//! pending target equal to the current screen is a death restart and
//! resolves to a `RespawnEvent` instead of a state change.

use bevy::prelude::*;
use crate::shared::*;

/// Marker for the full-screen fade overlay node.
#[derive(Component)]
pub struct ScreenFadeOverlay;

/// Fade state, in the 0..255 alpha units the rest of the game uses.
#[derive(Resource, Debug, Clone, Copy)]
pub struct ScreenFade {
    /// 0 transparent, 255 opaque black.
    pub alpha: f32,
    pub speed: f32,
}

impl Default for ScreenFade {
    fn default() -> Self {
        Self {
            alpha: 255.0,
            speed: FADE_SPEED,
        }
    }
}

impl ScreenFade {
    /// Step toward opaque (`fade_out`) or transparent.
    pub fn advance(&mut self, dt: f32, fade_out: bool) {
        if fade_out {
            self.alpha = (self.alpha + self.speed * dt).min(255.0);
        } else {
            self.alpha = (self.alpha - self.speed * dt).max(0.0);
            if self.alpha <= 0.0 {
                // A one-off slow fade (credits exit) ends here.
                self.speed = FADE_SPEED;
            }
        }
    }
}

/// Spawn the always-present overlay, above every other node and
/// transparent to picking.
pub fn spawn_fade_overlay(mut commands: Commands) {
    commands.spawn((
        ScreenFadeOverlay,
        Node {
            width: Val::Percent(100.0),
            height: Val::Percent(100.0),
            position_type: PositionType::Absolute,
            ..default()
        },
        BackgroundColor(Color::srgba(0.0, 0.0, 0.0, 1.0)),
        GlobalZIndex(100),
        PickingBehavior::IGNORE,
    ));
}

/// Drive the fade and commit any pending transition once it is hidden
/// behind full black.
pub fn update_transition(
    delta: Res<FrameDelta>,
    mut fade: ResMut<ScreenFade>,
    mut transition: ResMut<ScreenTransition>,
    screen: Res<State<Screen>>,
    mut next_screen: ResMut<NextState<Screen>>,
    mut respawn: EventWriter<RespawnEvent>,
    mut save_requests: EventWriter<SaveRequestEvent>,
    mut overlay_query: Query<&mut BackgroundColor, With<ScreenFadeOverlay>>,
) {
    let fade_out = transition.pending.is_some();
    fade.advance(delta.0, fade_out);

    // Commit as soon as the pending target sits behind full black. The
    // request may land while the overlay is already opaque (a screen's
    // first frame, for example); it still commits that same tick.
    if fade_out && fade.alpha >= 255.0 {
        if let Some(target) = transition.pending.take() {
            let current = *screen.get();
            if current == Screen::Game {
                save_requests.send(SaveRequestEvent);
            }
            if target == current {
                info!("Respawning in place");
                respawn.send(RespawnEvent);
            } else {
                info!("Screen transition: {:?} -> {:?}", current, target);
                next_screen.set(target);
            }
        }
    }

    for mut bg in &mut overlay_query {
        bg.0 = Color::srgba(0.0, 0.0, 0.0, fade.alpha / 255.0);
    }
}

/// Every screen comes up behind a full fade-in.
pub fn begin_fade_in(mut fade: ResMut<ScreenFade>) {
    fade.alpha = 255.0;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fade_out_clamps_at_full_black() {
        let mut fade = ScreenFade {
            alpha: 0.0,
            speed: FADE_SPEED,
        };
        for _ in 0..20 {
            fade.advance(1.0, true);
        }
        assert_eq!(fade.alpha, 255.0);
    }

    #[test]
    fn test_fade_in_restores_default_speed() {
        let mut fade = ScreenFade {
            alpha: 255.0,
            speed: FADE_SPEED / 5.0,
        };
        for _ in 0..100 {
            fade.advance(1.0, false);
        }
        assert_eq!(fade.alpha, 0.0);
        assert_eq!(fade.speed, FADE_SPEED);
    }

    #[test]
    fn test_fade_out_takes_several_ticks_from_transparent() {
        let mut fade = ScreenFade {
            alpha: 0.0,
            speed: FADE_SPEED,
        };
        fade.advance(1.0, true);
        assert!(fade.alpha < 255.0);
    }
}
