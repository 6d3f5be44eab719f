//! Shared menu builder helpers.
//!
//! Flat-color buttons with Bevy 0.15 pointer observers, plus common title
//! and footer text spawners. Every menu screen builds from these so hover
//! and click behave identically everywhere.

use bevy::prelude::*;
use crate::shared::*;

/// Marker for the text child inside a menu button.
#[derive(Component)]
pub struct MenuButtonText {
    pub index: usize,
}

/// Spawns a menu button with pointer observers for mouse support.
/// Returns the button Entity.
pub fn spawn_menu_button(
    parent: &mut ChildBuilder,
    index: usize,
    label: &str,
    theme: &MenuTheme,
    font: &Handle<Font>,
) -> Entity {
    parent
        .spawn((
            MenuItem { index },
            Node {
                width: Val::Px(220.0),
                height: Val::Px(44.0),
                justify_content: JustifyContent::Center,
                align_items: AlignItems::Center,
                ..default()
            },
            BackgroundColor(theme.button_normal),
        ))
        .observe(on_button_over)
        .observe(on_button_click)
        .with_children(|btn| {
            btn.spawn((
                MenuButtonText { index },
                Text::new(label),
                TextFont {
                    font: font.clone(),
                    font_size: 18.0,
                    ..default()
                },
                TextColor(theme.text_color),
                PickingBehavior::IGNORE,
            ));
        })
        .id()
}

/// Spawns a title text node styled by the theme.
pub fn spawn_menu_title(
    parent: &mut ChildBuilder,
    text: &str,
    theme: &MenuTheme,
    font: &Handle<Font>,
) {
    parent.spawn((
        Text::new(text),
        TextFont {
            font: font.clone(),
            font_size: 36.0,
            ..default()
        },
        TextColor(theme.text_dim),
        PickingBehavior::IGNORE,
    ));
}

/// Spawns a hint/footer text node.
pub fn spawn_menu_footer(
    parent: &mut ChildBuilder,
    text: &str,
    theme: &MenuTheme,
    font: &Handle<Font>,
) {
    parent.spawn((
        Text::new(text),
        TextFont {
            font: font.clone(),
            font_size: 12.0,
            ..default()
        },
        TextColor(theme.text_dim),
        PickingBehavior::IGNORE,
    ));
}

/// Updates a button's background based on selection state.
pub fn set_button_visual(bg: &mut BackgroundColor, theme: &MenuTheme, selected: bool) {
    bg.0 = if selected {
        theme.button_selected
    } else {
        theme.button_normal
    };
}

// ═══════════════════════════════════════════════════════════════════════
// POINTER OBSERVERS — set MenuAction from the mouse
// ═══════════════════════════════════════════════════════════════════════

fn on_button_over(
    trigger: Trigger<Pointer<Over>>,
    query: Query<&MenuItem>,
    mut action: ResMut<MenuAction>,
    mut sfx: EventWriter<PlaySfxEvent>,
) {
    if let Ok(item) = query.get(trigger.entity()) {
        action.set_cursor = Some(item.index);
        sfx.send(PlaySfxEvent {
            sfx_id: "button_low".to_string(),
        });
    }
}

fn on_button_click(
    trigger: Trigger<Pointer<Click>>,
    query: Query<&MenuItem>,
    mut action: ResMut<MenuAction>,
    mut sfx: EventWriter<PlaySfxEvent>,
) {
    if let Ok(item) = query.get(trigger.entity()) {
        action.clicked = Some(item.index);
        sfx.send(PlaySfxEvent {
            sfx_id: "button_high".to_string(),
        });
    }
}

/// Merge keyboard navigation into the per-frame MenuAction. Pointer
/// observers write their own fields; keyboard ORs on top.
pub fn merge_keyboard_menu_action(input: Res<PlayerInput>, mut action: ResMut<MenuAction>) {
    action.move_up = action.move_up || input.ui_up;
    action.move_down = action.move_down || input.ui_down;
    action.activate = action.activate || input.ui_confirm;
    action.cancel = action.cancel || input.ui_cancel;
}

/// Clear the one-frame fields before anything writes this frame's.
pub fn reset_menu_action(mut action: ResMut<MenuAction>) {
    *action = MenuAction::default();
}

/// Shared cursor-movement helper: hover and keyboard both move it, and a
/// move cue plays when it lands somewhere new.
pub fn step_cursor(
    cursor: &mut usize,
    option_count: usize,
    action: &MenuAction,
    sfx: &mut EventWriter<PlaySfxEvent>,
) {
    let before = *cursor;
    if let Some(index) = action.set_cursor {
        if index < option_count {
            *cursor = index;
        }
    }
    if action.move_down && *cursor + 1 < option_count {
        *cursor += 1;
    }
    if action.move_up && *cursor > 0 {
        *cursor -= 1;
    }
    if *cursor != before && action.set_cursor.is_none() {
        sfx.send(PlaySfxEvent {
            sfx_id: "button_low".to_string(),
        });
    }
}

/// Which option fired this frame, from click or keyboard confirm.
pub fn activated_index(cursor: usize, action: &MenuAction) -> Option<usize> {
    if let Some(index) = action.clicked {
        return Some(index);
    }
    if action.activate {
        return Some(cursor);
    }
    None
}
