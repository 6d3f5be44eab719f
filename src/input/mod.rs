use bevy::prelude::*;
use bevy::window::PrimaryWindow;
use crate::shared::*;

pub struct InputPlugin;

impl Plugin for InputPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<PlayerInput>()
            .init_resource::<InputContext>()
            .init_resource::<KeyBindings>()
            .add_systems(
                PreUpdate,
                (manage_input_context, reset_and_read_input)
                    .chain()
                    .in_set(InputReadSet),
            );
    }
}

/// The single point where hardware input becomes game actions.
fn reset_and_read_input(
    keys: Res<ButtonInput<KeyCode>>,
    mouse: Res<ButtonInput<MouseButton>>,
    bindings: Res<KeyBindings>,
    context: Res<InputContext>,
    windows: Query<&Window, With<PrimaryWindow>>,
    mut input: ResMut<PlayerInput>,
) {
    *input = PlayerInput::default();

    input.any_key =
        keys.get_just_pressed().next().is_some() || mouse.get_just_pressed().next().is_some();

    // Pointer in logical view pixels (window coords are pre-scale).
    input.pointer = windows
        .get_single()
        .ok()
        .and_then(|window| window.cursor_position())
        .map(|cursor| cursor / PIXEL_SCALE);

    match *context {
        InputContext::Disabled => {}

        InputContext::Gameplay => {
            // Opposing keys cancel each other out rather than latching.
            let left = keys.pressed(bindings.move_left) || keys.pressed(KeyCode::ArrowLeft);
            let right = keys.pressed(bindings.move_right) || keys.pressed(KeyCode::ArrowRight);
            input.move_axis = match (left, right) {
                (true, false) => -1.0,
                (false, true) => 1.0,
                _ => 0.0,
            };

            input.jump = keys.just_pressed(bindings.jump);
            input.interact = keys.just_pressed(bindings.interact);
            input.pause = keys.just_pressed(bindings.pause);
        }

        InputContext::Menu => {
            input.ui_up =
                keys.just_pressed(KeyCode::KeyW) || keys.just_pressed(KeyCode::ArrowUp);
            input.ui_down =
                keys.just_pressed(KeyCode::KeyS) || keys.just_pressed(KeyCode::ArrowDown);
            input.ui_confirm = keys.just_pressed(bindings.ui_confirm)
                || keys.just_pressed(bindings.interact);
            input.ui_cancel = keys.just_pressed(bindings.ui_cancel);
            input.pause = keys.just_pressed(bindings.pause);
            // Intro and credits advance on the interact key.
            input.interact = keys.just_pressed(bindings.interact);
        }
    }
}

/// Derives InputContext from the active states. One system, no per-domain
/// key guards.
fn manage_input_context(
    screen: Res<State<Screen>>,
    play_state: Option<Res<State<PlayState>>>,
    mut context: ResMut<InputContext>,
) {
    *context = match *screen.get() {
        Screen::Boot => InputContext::Disabled,
        Screen::Menu | Screen::Intro | Screen::Credits => InputContext::Menu,
        Screen::Game => match play_state.map(|state| *state.get()) {
            Some(PlayState::Paused) => InputContext::Menu,
            _ => InputContext::Gameplay,
        },
    };
}
