//! Main menu screen: title, play / reset / exit.

use bevy::app::AppExit;
use bevy::prelude::*;
use crate::shared::*;

use super::menu_kit::{self, activated_index, set_button_visual, step_cursor};
use super::UiFontHandle;

#[derive(Component)]
pub struct MainMenuRoot;

/// Tracks main menu selection.
#[derive(Resource)]
pub struct MainMenuState {
    pub cursor: usize,
}

const MENU_OPTIONS: &[&str] = &["Play", "Reset Save", "Exit"];

pub fn spawn_main_menu(
    mut commands: Commands,
    font_handle: Res<UiFontHandle>,
    theme: Res<MenuTheme>,
) {
    commands.insert_resource(MainMenuState { cursor: 0 });
    let font = font_handle.0.clone();

    commands
        .spawn((
            MainMenuRoot,
            ScreenScoped,
            Node {
                width: Val::Percent(100.0),
                height: Val::Percent(100.0),
                justify_content: JustifyContent::Center,
                align_items: AlignItems::Center,
                flex_direction: FlexDirection::Column,
                row_gap: Val::Px(16.0),
                ..default()
            },
        ))
        .with_children(|parent| {
            menu_kit::spawn_menu_title(parent, "SHOREBOUND", &theme, &font);

            for (i, label) in MENU_OPTIONS.iter().enumerate() {
                menu_kit::spawn_menu_button(parent, i, label, &theme, &font);
            }

            menu_kit::spawn_menu_footer(
                parent,
                "Up/Down: Select | Enter: Confirm",
                &theme,
                &font,
            );
        });
}

pub fn despawn_main_menu_state(mut commands: Commands) {
    commands.remove_resource::<MainMenuState>();
}

pub fn update_main_menu_visuals(
    state: Option<Res<MainMenuState>>,
    theme: Res<MenuTheme>,
    mut query: Query<(&MenuItem, &mut BackgroundColor)>,
) {
    let Some(state) = state else { return };
    for (item, mut bg) in &mut query {
        set_button_visual(&mut bg, &theme, item.index == state.cursor);
    }
}

pub fn main_menu_navigation(
    action: Res<MenuAction>,
    mut state: Option<ResMut<MainMenuState>>,
    profile: Res<Profile>,
    mut transition: ResMut<ScreenTransition>,
    mut sfx: EventWriter<PlaySfxEvent>,
    mut reset_writer: EventWriter<ResetSaveEvent>,
    mut exit: EventWriter<AppExit>,
) {
    let Some(ref mut state) = state else { return };

    step_cursor(&mut state.cursor, MENU_OPTIONS.len(), &action, &mut sfx);

    let Some(index) = activated_index(state.cursor, &action) else {
        return;
    };
    match index {
        0 => {
            // First run goes through the intro, later runs straight in.
            let target = if profile.run_intro {
                Screen::Intro
            } else {
                Screen::Game
            };
            transition.request(target);
        }
        1 => {
            reset_writer.send(ResetSaveEvent);
        }
        2 => {
            exit.send(AppExit::Success);
        }
        _ => {}
    }
}
