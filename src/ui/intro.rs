//! Intro screen: a few lines of scene-setting text, shown once per
//! profile.

use bevy::prelude::*;
use crate::shared::*;

use super::UiFontHandle;

const INTRO_TEXT: &str = "The bus dropped you at the last stop before the sea.\n\n\
Somewhere down this beach is the lighthouse,\n\
and everyone you meet on the way has something to ask.\n\n\
Press E to walk down to the water.";

pub fn spawn_intro(mut commands: Commands, font_handle: Res<UiFontHandle>, theme: Res<MenuTheme>) {
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
                Text::new(INTRO_TEXT),
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

/// The interact key dismisses the intro for good and heads into the game.
pub fn advance_intro(
    input: Res<PlayerInput>,
    mut profile: ResMut<Profile>,
    mut transition: ResMut<ScreenTransition>,
    mut save_requests: EventWriter<SaveRequestEvent>,
) {
    if !input.interact && !input.ui_confirm {
        return;
    }
    if profile.run_intro {
        profile.run_intro = false;
        save_requests.send(SaveRequestEvent);
    }
    transition.request(Screen::Game);
}
