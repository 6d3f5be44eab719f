//! Pause menu: Escape toggles, gameplay sets freeze underneath.

use bevy::app::AppExit;
use bevy::prelude::*;
use crate::shared::*;

use super::menu_kit::{self, activated_index, set_button_visual, step_cursor};
use super::UiFontHandle;

#[derive(Component)]
pub struct PauseMenuRoot;

/// Tracks pause menu selection.
#[derive(Resource)]
pub struct PauseMenuState {
    pub cursor: usize,
}

const PAUSE_OPTIONS: &[&str] = &["Continue", "Main Menu", "Save & Exit"];

/// Escape flips the pause sub-state. Runs in both halves so the same key
/// closes what it opened.
pub fn toggle_pause(
    input: Res<PlayerInput>,
    play_state: Res<State<PlayState>>,
    mut next_play_state: ResMut<NextState<PlayState>>,
    transition: Res<ScreenTransition>,
) {
    // No pausing while a fade-out is in flight.
    if !input.pause || transition.pending.is_some() {
        return;
    }
    match play_state.get() {
        PlayState::Running => next_play_state.set(PlayState::Paused),
        PlayState::Paused => next_play_state.set(PlayState::Running),
    }
}

pub fn spawn_pause_menu(
    mut commands: Commands,
    font_handle: Res<UiFontHandle>,
    theme: Res<MenuTheme>,
) {
    commands.insert_resource(PauseMenuState { cursor: 0 });
    let font = font_handle.0.clone();

    commands
        .spawn((
            PauseMenuRoot,
            Node {
                width: Val::Percent(100.0),
                height: Val::Percent(100.0),
                justify_content: JustifyContent::Center,
                align_items: AlignItems::Center,
                flex_direction: FlexDirection::Column,
                row_gap: Val::Px(12.0),
                ..default()
            },
            BackgroundColor(theme.overlay),
        ))
        .with_children(|parent| {
            menu_kit::spawn_menu_title(parent, "PAUSED", &theme, &font);

            for (i, label) in PAUSE_OPTIONS.iter().enumerate() {
                menu_kit::spawn_menu_button(parent, i, label, &theme, &font);
            }

            menu_kit::spawn_menu_footer(parent, "Esc: Continue", &theme, &font);
        });
}

pub fn despawn_pause_menu(mut commands: Commands, query: Query<Entity, With<PauseMenuRoot>>) {
    for entity in &query {
        commands.entity(entity).despawn_recursive();
    }
    commands.remove_resource::<PauseMenuState>();
}

pub fn update_pause_menu_visuals(
    state: Option<Res<PauseMenuState>>,
    theme: Res<MenuTheme>,
    mut query: Query<(&MenuItem, &mut BackgroundColor)>,
) {
    let Some(state) = state else { return };
    for (item, mut bg) in &mut query {
        set_button_visual(&mut bg, &theme, item.index == state.cursor);
    }
}

pub fn pause_menu_navigation(
    action: Res<MenuAction>,
    mut state: Option<ResMut<PauseMenuState>>,
    mut next_play_state: ResMut<NextState<PlayState>>,
    mut transition: ResMut<ScreenTransition>,
    mut sfx: EventWriter<PlaySfxEvent>,
    mut save_requests: EventWriter<SaveRequestEvent>,
    mut exit: EventWriter<AppExit>,
) {
    let Some(ref mut state) = state else { return };

    step_cursor(&mut state.cursor, PAUSE_OPTIONS.len(), &action, &mut sfx);

    if action.cancel {
        next_play_state.set(PlayState::Running);
        return;
    }

    let Some(index) = activated_index(state.cursor, &action) else {
        return;
    };
    match index {
        0 => {
            next_play_state.set(PlayState::Running);
        }
        1 => {
            transition.request(Screen::Menu);
        }
        2 => {
            // Exit means the process, not the menu. The save handler runs
            // later this tick, before the exit is honored.
            save_requests.send(SaveRequestEvent);
            exit.send(AppExit::Success);
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy::state::app::StatesPlugin;

    #[test]
    fn test_save_and_exit_saves_then_quits_the_process() {
        let mut app = App::new();
        app.add_plugins(StatesPlugin);
        app.init_state::<Screen>();
        app.add_sub_state::<PlayState>();
        app.init_resource::<ScreenTransition>();
        app.insert_resource(PauseMenuState { cursor: 2 });
        app.add_event::<PlaySfxEvent>();
        app.add_event::<SaveRequestEvent>();
        app.insert_resource(MenuAction {
            activate: true,
            ..default()
        });
        app.add_systems(Update, pause_menu_navigation);

        app.update();

        let world = app.world();
        assert_eq!(world.resource::<Events<SaveRequestEvent>>().len(), 1);
        assert!(!world.resource::<Events<AppExit>>().is_empty());
        // "Save & Exit" never routes back through the screen fade.
        assert!(world.resource::<ScreenTransition>().pending.is_none());
    }
}
