//! In-game HUD: seashell counter and quest toast line.

use bevy::prelude::*;
use crate::shared::*;

use super::UiFontHandle;

#[derive(Component)]
pub struct SeashellCounterText;

#[derive(Component)]
pub struct ToastText;

/// How long a toast line stays up, in game time units.
const TOAST_DURATION: f32 = 30.0;

/// The current toast line and its remaining time.
#[derive(Resource, Debug, Default)]
pub struct QuestToast {
    pub message: String,
    pub remaining: f32,
}

pub fn spawn_hud(mut commands: Commands, font_handle: Res<UiFontHandle>, theme: Res<MenuTheme>) {
    let font = font_handle.0.clone();

    commands
        .spawn((
            ScreenScoped,
            Node {
                width: Val::Percent(100.0),
                padding: UiRect::all(Val::Px(8.0)),
                flex_direction: FlexDirection::Column,
                align_items: AlignItems::FlexStart,
                row_gap: Val::Px(4.0),
                ..default()
            },
            PickingBehavior::IGNORE,
        ))
        .with_children(|parent| {
            parent.spawn((
                SeashellCounterText,
                Text::new("Seashells: 0"),
                TextFont {
                    font: font.clone(),
                    font_size: 16.0,
                    ..default()
                },
                TextColor(theme.text_dim),
                PickingBehavior::IGNORE,
            ));
            parent.spawn((
                ToastText,
                Text::new(""),
                TextFont {
                    font,
                    font_size: 12.0,
                    ..default()
                },
                TextColor(Color::srgba(0.95, 0.85, 0.45, 0.0)),
                PickingBehavior::IGNORE,
            ));
        });
}

pub fn update_seashell_counter(
    save: Res<SaveData>,
    mut query: Query<&mut Text, With<SeashellCounterText>>,
) {
    if !save.is_changed() {
        return;
    }
    for mut text in &mut query {
        text.0 = format!("Seashells: {}", save.seashells);
    }
}

/// Quest events raise a toast line; it fades with its remaining time.
pub fn update_quest_toast(
    delta: Res<FrameDelta>,
    mut accepted: EventReader<QuestAcceptedEvent>,
    mut completed: EventReader<QuestCompletedEvent>,
    mut toast: ResMut<QuestToast>,
    mut query: Query<(&mut Text, &mut TextColor), With<ToastText>>,
) {
    for event in accepted.read() {
        toast.message = format!("Picked up: {}", display_name(&event.item));
        toast.remaining = TOAST_DURATION;
    }
    for event in completed.read() {
        toast.message = format!("Delivered: {} (+1 seashell)", display_name(&event.item));
        toast.remaining = TOAST_DURATION;
    }

    toast.remaining = (toast.remaining - delta.0).max(0.0);
    let alpha = (toast.remaining / TOAST_DURATION).min(1.0);

    for (mut text, mut color) in &mut query {
        text.0 = toast.message.clone();
        color.0 = Color::srgba(0.95, 0.85, 0.45, alpha);
    }
}

fn display_name(item: &str) -> String {
    item.replace('_', " ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_name_spaces_underscores() {
        assert_eq!(display_name("amber_shell"), "amber shell");
    }
}
