//! Credits screen, reached when the last quest item is delivered.

use bevy::prelude::*;
use crate::shared::*;

use super::transitions::ScreenFade;
use super::UiFontHandle;

const CREDITS_TEXT: &str = "Every shell found its keeper.\n\
Every bottle found its reader.\n\n\
The lighthouse light swings out over the water,\n\
and the beach settles in for the evening.\n\n\
Thank you for playing.\n\n\
Press E to return to the menu.";

pub fn spawn_credits(
    mut commands: Commands,
    font_handle: Res<UiFontHandle>,
    theme: Res<MenuTheme>,
) {
    commands
        .spawn((
            ScreenScoped,
            Node {
                width: Val::Percent(100.0),
                height: Val::Percent(100.0),
                justify_content: JustifyContent::Center,
                align_items: AlignItems::Center,
                ..default()
            },
            BackgroundColor(Color::BLACK),
        ))
        .with_children(|parent| {
            parent.spawn((
                Text::new(CREDITS_TEXT),
                TextFont {
                    font: font_handle.0.clone(),
                    font_size: 16.0,
                    ..default()
                },
                TextColor(theme.text_dim),
                TextLayout::new_with_justify(JustifyText::Center),
                PickingBehavior::IGNORE,
            ));
        });
}

/// Leave the credits at a fifth of the usual fade speed, a slow tide out.
pub fn advance_credits(
    input: Res<PlayerInput>,
    mut transition: ResMut<ScreenTransition>,
    mut fade: ResMut<ScreenFade>,
) {
    if !input.interact && !input.ui_confirm {
        return;
    }
    if transition.pending.is_none() {
        fade.speed = FADE_SPEED / 5.0;
    }
    transition.request(Screen::Menu);
}
